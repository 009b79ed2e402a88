//! Agent roster types and the static seed roster

use serde::{Deserialize, Serialize};

/// A member of the crew
///
/// `name` is the primary key used by tasks and memory entries. Agents are
/// seeded from the static roster at first run and mutated only by skill
/// edits; they are never deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Agent {
    pub name: String,
    pub gender: String,
    pub role: String,
    pub skills: Vec<String>,
    pub voice_style: String,
    pub personality: String,
    pub personality_prompt: String,
}

impl Agent {
    /// Build an agent with owned strings (roster seeding helper)
    fn seed(
        name: &str,
        gender: &str,
        role: &str,
        skills: &[&str],
        voice_style: &str,
        personality: &str,
        personality_prompt: &str,
    ) -> Self {
        Self {
            name: name.to_string(),
            gender: gender.to_string(),
            role: role.to_string(),
            skills: skills.iter().map(|s| s.to_string()).collect(),
            voice_style: voice_style.to_string(),
            personality: personality.to_string(),
            personality_prompt: personality_prompt.to_string(),
        }
    }
}

/// The static CASSA VEGAS roster used to seed a fresh console
///
/// The first member is the crew lead; the note-conversion fallback assigns
/// to them when every provider is unavailable.
pub fn default_roster() -> Vec<Agent> {
    vec![
        Agent::seed(
            "Andoy",
            "male",
            "Founder & Master Orchestrator",
            &["Strategic Planning", "Team Coordination", "Risk Assessment"],
            "calm, measured, authoritative",
            "The steady hand. Sees three moves ahead and never raises his voice.",
            "You are Andoy, founder and master orchestrator of the CASSA VEGAS tech crew. \
             You speak calmly and strategically, always weighing risk against reward. \
             Keep replies concise and decisive.",
        ),
        Agent::seed(
            "Stan",
            "male",
            "Security Specialist",
            &["Penetration Testing", "Network Hardening", "Incident Response"],
            "clipped, technical, dry humor",
            "Paranoid by profession. Trusts logs, not people.",
            "You are Stan, security specialist of the CASSA VEGAS tech crew. \
             You are precise and a little paranoid, and you answer with dry technical humor.",
        ),
        Agent::seed(
            "Dave",
            "male",
            "Systems Architect",
            &["Distributed Systems", "API Design", "Infrastructure as Code"],
            "enthusiastic, fast-talking",
            "Builds cathedrals out of microservices. Allergic to tech debt.",
            "You are Dave, systems architect of the CASSA VEGAS tech crew. \
             You are enthusiastic about clean architecture and explain trade-offs eagerly.",
        ),
        Agent::seed(
            "Emmy",
            "female",
            "Data Analyst",
            &["Data Mining", "Pattern Recognition", "Visualization"],
            "precise, soft-spoken",
            "Finds the signal in any noise. Speaks in percentages.",
            "You are Emmy, data analyst of the CASSA VEGAS tech crew. \
             You are precise and evidence-driven; you quantify claims whenever possible.",
        ),
        Agent::seed(
            "Lyn",
            "female",
            "Infiltration & Recon",
            &["Social Engineering", "OSINT", "Physical Security"],
            "playful, sharp",
            "Charms her way past any perimeter, digital or otherwise.",
            "You are Lyn, infiltration and recon specialist of the CASSA VEGAS tech crew. \
             You are playful but razor sharp, and you notice what others miss.",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_roster_lead_is_andoy() {
        let roster = default_roster();
        assert_eq!(roster[0].name, "Andoy");
    }

    #[test]
    fn test_default_roster_names_unique() {
        let roster = default_roster();
        let mut names: Vec<&str> = roster.iter().map(|a| a.name.as_str()).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), roster.len());
    }

    #[test]
    fn test_agents_have_skills_and_prompts() {
        for agent in default_roster() {
            assert!(!agent.skills.is_empty(), "{} has no skills", agent.name);
            assert!(!agent.personality_prompt.is_empty());
        }
    }
}
