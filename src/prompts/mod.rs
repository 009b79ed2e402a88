//! Prompt construction for orchestration operations
//!
//! Deterministic, side-effect-free rendering of domain state into the
//! natural-language instruction blocks sent to providers. Templates live in
//! `prompts/*.pmt` and are embedded at build time; domain state is
//! pre-serialized to JSON in Rust and injected as opaque strings.
//!
//! Word limits, count ranges, and stage constraints are part of the prompt
//! contract the provider is instructed to respect; parsers do not re-enforce
//! them post-hoc.

pub mod embedded;

use eyre::Result;
use handlebars::Handlebars;
use serde::Serialize;
use serde_json::json;
use tracing::debug;

use crate::domain::{Agent, CalendarNote, MemoryEntry, NotesByDate, Stage, Task};

/// Render the recent-activity digest fed into every prompt
///
/// The last 10 entries in chronological order, one line each; this digest
/// is the only continuity the orchestration layer has across calls.
pub fn format_recent_activity(memories: &[MemoryEntry]) -> String {
    if memories.is_empty() {
        return "No recent activity logged.".to_string();
    }
    let start = memories.len().saturating_sub(10);
    memories[start..]
        .iter()
        .map(|mem| {
            format!(
                "- {}: [{}] {}",
                mem.timestamp.format("%Y-%m-%d %H:%M"),
                mem.entry_type,
                mem.summary
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Registry of embedded prompt templates
pub struct PromptLibrary {
    registry: Handlebars<'static>,
}

#[derive(Serialize)]
struct InitialTasksContext {
    profile: String,
    stages: String,
}

#[derive(Serialize)]
struct HandoffContext {
    crew: String,
    task_content: String,
    task_agent: String,
    source_stage: String,
    destination_stage: String,
    activity: String,
}

#[derive(Serialize)]
struct TaskFromNoteContext {
    date: String,
    crew: String,
    note: String,
    activity: String,
}

#[derive(Serialize)]
struct SkillsContext {
    agent_name: String,
    agent_role: String,
    current_skills: String,
    activity: String,
}

#[derive(Serialize)]
struct SkillTasksContext {
    agent_name: String,
    agent_role: String,
    added_skills: String,
    activity: String,
}

#[derive(Serialize)]
struct CommandContext {
    agents: String,
    tasks: String,
    activity: String,
    notes: String,
    command: String,
}

#[derive(Serialize)]
struct HintsContext {
    agents: String,
    tasks: String,
    activity: String,
    notes: String,
}

#[derive(Serialize)]
struct ChatSystemContext {
    personality_prompt: String,
    activity: String,
}

impl PromptLibrary {
    /// Register all embedded templates
    pub fn new() -> Result<Self> {
        let mut registry = Handlebars::new();
        // Prompts are plain text, not HTML
        registry.register_escape_fn(handlebars::no_escape);
        for (name, template) in embedded::ALL {
            registry.register_template_string(name, template)?;
        }
        debug!(template_count = embedded::ALL.len(), "PromptLibrary::new: registered");
        Ok(Self { registry })
    }

    /// Prompt for seeding the board with initial tasks
    pub fn initial_tasks(&self, agents: &[Agent]) -> Result<String> {
        let profile = serde_json::to_string_pretty(&json!({
            "organization": "CASSA VEGAS",
            "members": agents,
        }))?;
        let stages = serde_json::to_string(&Stage::ALL.map(|s| s.name()))?;
        Ok(self.registry.render("initial-tasks", &InitialTasksContext { profile, stages })?)
    }

    /// Prompt for a hand-off suggestion after a stage transition
    pub fn handoff(
        &self,
        task: &Task,
        source: Stage,
        destination: Stage,
        agents: &[Agent],
        memories: &[MemoryEntry],
    ) -> Result<String> {
        let crew = serde_json::to_string_pretty(
            &agents
                .iter()
                .map(|a| json!({ "name": a.name, "skills": a.skills, "role": a.role }))
                .collect::<Vec<_>>(),
        )?;
        Ok(self.registry.render(
            "handoff",
            &HandoffContext {
                crew,
                task_content: task.content.clone(),
                task_agent: task.agent_name.clone(),
                source_stage: source.name().to_string(),
                destination_stage: destination.name().to_string(),
                activity: format_recent_activity(memories),
            },
        )?)
    }

    /// Prompt for converting a calendar note into a task
    pub fn task_from_note(&self, note: &CalendarNote, agents: &[Agent], memories: &[MemoryEntry]) -> Result<String> {
        let crew = serde_json::to_string_pretty(
            &agents
                .iter()
                .map(|a| json!({ "name": a.name, "role": a.role, "skills": a.skills }))
                .collect::<Vec<_>>(),
        )?;
        Ok(self.registry.render(
            "task-from-note",
            &TaskFromNoteContext {
                date: note.date.clone(),
                crew,
                note: note.content.clone(),
                activity: format_recent_activity(memories),
            },
        )?)
    }

    /// Prompt for suggesting new skills for one agent
    pub fn skills(&self, agent: &Agent, memories: &[MemoryEntry]) -> Result<String> {
        Ok(self.registry.render(
            "skills",
            &SkillsContext {
                agent_name: agent.name.clone(),
                agent_role: agent.role.clone(),
                current_skills: serde_json::to_string(&agent.skills)?,
                activity: format_recent_activity(memories),
            },
        )?)
    }

    /// Prompt for tasks that exercise an agent's newly gained skills
    pub fn skill_tasks(&self, agent: &Agent, added_skills: &[String], memories: &[MemoryEntry]) -> Result<String> {
        Ok(self.registry.render(
            "skill-tasks",
            &SkillTasksContext {
                agent_name: agent.name.clone(),
                agent_role: agent.role.clone(),
                added_skills: serde_json::to_string(added_skills)?,
                activity: format_recent_activity(memories),
            },
        )?)
    }

    /// Prompt for interpreting a free-text operator command
    pub fn command(
        &self,
        command: &str,
        agents: &[Agent],
        tasks: &[Task],
        memories: &[MemoryEntry],
        notes: &NotesByDate,
    ) -> Result<String> {
        let agents_json = serde_json::to_string_pretty(
            &agents
                .iter()
                .map(|a| json!({ "name": a.name, "role": a.role, "skills": a.skills.len() }))
                .collect::<Vec<_>>(),
        )?;
        let tasks_json = if tasks.is_empty() {
            "No active tasks.".to_string()
        } else {
            serde_json::to_string_pretty(tasks)?
        };
        let notes_json = if notes.is_empty() {
            "No notes.".to_string()
        } else {
            serde_json::to_string_pretty(notes)?
        };
        Ok(self.registry.render(
            "command",
            &CommandContext {
                agents: agents_json,
                tasks: tasks_json,
                activity: format_recent_activity(memories),
                notes: notes_json,
                command: command.to_string(),
            },
        )?)
    }

    /// Prompt for generating operator command hints
    pub fn hints(
        &self,
        agents: &[Agent],
        tasks: &[Task],
        memories: &[MemoryEntry],
        notes: &NotesByDate,
    ) -> Result<String> {
        let agents_json = serde_json::to_string(
            &agents
                .iter()
                .map(|a| {
                    let task_count = tasks.iter().filter(|t| t.agent_name == a.name).count();
                    json!({ "name": a.name, "role": a.role, "taskCount": task_count })
                })
                .collect::<Vec<_>>(),
        )?;
        let tasks_json = serde_json::to_string(
            &tasks
                .iter()
                .map(|t| json!({ "content": t.content, "agent": t.agent_name, "stage": t.stage }))
                .collect::<Vec<_>>(),
        )?;
        let notes_json = serde_json::to_string(
            &notes
                .values()
                .flatten()
                .map(|n| n.content.as_str())
                .collect::<Vec<_>>(),
        )?;
        Ok(self.registry.render(
            "hints",
            &HintsContext {
                agents: agents_json,
                tasks: tasks_json,
                activity: format_recent_activity(memories),
                notes: notes_json,
            },
        )?)
    }

    /// System instruction for an agent conversation
    pub fn chat_system(&self, agent: &Agent, memories: &[MemoryEntry]) -> Result<String> {
        Ok(self.registry.render(
            "chat-system",
            &ChatSystemContext {
                personality_prompt: agent.personality_prompt.clone(),
                activity: format_recent_activity(memories),
            },
        )?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{MemoryType, default_roster};
    use chrono::{Duration, Utc};
    use proptest::prelude::*;

    fn entries(count: usize) -> Vec<MemoryEntry> {
        let base = Utc::now();
        (0..count)
            .map(|i| {
                let mut entry = MemoryEntry::new(
                    MemoryType::TaskCreation,
                    None,
                    format!("event {i}"),
                    serde_json::Value::Null,
                );
                entry.timestamp = base + Duration::seconds(i as i64);
                entry
            })
            .collect()
    }

    #[test]
    fn test_activity_empty_literal() {
        assert_eq!(format_recent_activity(&[]), "No recent activity logged.");
    }

    #[test]
    fn test_activity_preserves_order() {
        let digest = format_recent_activity(&entries(3));
        let lines: Vec<&str> = digest.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].contains("event 0"));
        assert!(lines[2].contains("event 2"));
        assert!(lines[0].contains("[TASK_CREATION]"));
        assert!(lines[0].starts_with("- "));
    }

    #[test]
    fn test_activity_truncates_to_most_recent_ten() {
        let digest = format_recent_activity(&entries(25));
        let lines: Vec<&str> = digest.lines().collect();
        assert_eq!(lines.len(), 10);
        assert!(lines[0].contains("event 15"));
        assert!(lines[9].contains("event 24"));
    }

    proptest! {
        #[test]
        fn prop_activity_line_count(count in 0usize..30) {
            let digest = format_recent_activity(&entries(count));
            if count == 0 {
                prop_assert_eq!(digest, "No recent activity logged.");
            } else {
                prop_assert_eq!(digest.lines().count(), count.min(10));
            }
        }
    }

    #[test]
    fn test_initial_tasks_prompt_embeds_roster_and_stages() {
        let library = PromptLibrary::new().unwrap();
        let prompt = library.initial_tasks(&default_roster()).unwrap();
        assert!(prompt.contains("CASSA VEGAS"));
        assert!(prompt.contains("Andoy"));
        assert!(prompt.contains("\"In Progress\""));
        assert!(prompt.contains("under 15 words"));
    }

    #[test]
    fn test_handoff_prompt_names_transition() {
        let library = PromptLibrary::new().unwrap();
        let task = Task::new("Audit the VPN", "Stan");
        let prompt = library
            .handoff(&task, Stage::ToDo, Stage::Review, &default_roster(), &[])
            .unwrap();
        assert!(prompt.contains("From \"To Do\" to \"Review\""));
        assert!(prompt.contains("'Stan' still the right owner"));
        assert!(prompt.contains("No recent activity logged."));
    }

    #[test]
    fn test_command_prompt_handles_empty_state() {
        let library = PromptLibrary::new().unwrap();
        let prompt = library
            .command("Summarize all active tasks.", &default_roster(), &[], &[], &NotesByDate::new())
            .unwrap();
        assert!(prompt.contains("**COMMAND:** \"Summarize all active tasks.\""));
        assert!(prompt.contains("No active tasks."));
        assert!(prompt.contains("No notes."));
    }

    #[test]
    fn test_hints_prompt_counts_tasks_per_agent() {
        let library = PromptLibrary::new().unwrap();
        let tasks = vec![Task::new("a", "Stan"), Task::new("b", "Stan")];
        let prompt = library.hints(&default_roster(), &tasks, &[], &NotesByDate::new()).unwrap();
        assert!(prompt.contains("\"taskCount\":2"));
    }

    #[test]
    fn test_chat_system_prompt_leads_with_personality() {
        let library = PromptLibrary::new().unwrap();
        let roster = default_roster();
        let prompt = library.chat_system(&roster[1], &[]).unwrap();
        assert!(prompt.starts_with("You are Stan"));
        assert!(prompt.contains("Recent Crew Activity:"));
    }
}
