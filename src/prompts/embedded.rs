//! Embedded prompt templates
//!
//! These are compiled into the binary from .pmt files at build time.

/// Initial KANBAN board seeding prompt
pub const INITIAL_TASKS: &str = include_str!("../../prompts/initial-tasks.pmt");

/// Stage-transition hand-off prompt
pub const HANDOFF: &str = include_str!("../../prompts/handoff.pmt");

/// Calendar-note conversion prompt
pub const TASK_FROM_NOTE: &str = include_str!("../../prompts/task-from-note.pmt");

/// Skill suggestion prompt
pub const SKILLS: &str = include_str!("../../prompts/skills.pmt");

/// Tasks-for-new-skills prompt
pub const SKILL_TASKS: &str = include_str!("../../prompts/skill-tasks.pmt");

/// Operator command orchestration prompt
pub const COMMAND: &str = include_str!("../../prompts/command.pmt");

/// Command hint prompt
pub const HINTS: &str = include_str!("../../prompts/hints.pmt");

/// Chat system instruction (personality + activity digest)
pub const CHAT_SYSTEM: &str = include_str!("../../prompts/chat-system.pmt");

/// All templates by registry name
pub const ALL: [(&str, &str); 8] = [
    ("initial-tasks", INITIAL_TASKS),
    ("handoff", HANDOFF),
    ("task-from-note", TASK_FROM_NOTE),
    ("skills", SKILLS),
    ("skill-tasks", SKILL_TASKS),
    ("command", COMMAND),
    ("hints", HINTS),
    ("chat-system", CHAT_SYSTEM),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_templates_carry_their_contracts() {
        assert!(INITIAL_TASKS.contains("5-7 tasks"));
        assert!(INITIAL_TASKS.contains("under 15 words"));
        assert!(INITIAL_TASKS.contains("'Backlog' stage"));
        assert!(HANDOFF.contains("handed off"));
        assert!(SKILLS.contains("3-5 new"));
        assert!(SKILL_TASKS.contains("2-3 concise"));
        assert!(COMMAND.contains("Omit 'newTask' if not implied"));
        assert!(HINTS.contains("3-4 command strings"));
    }

    #[test]
    fn test_all_names_unique() {
        let mut names: Vec<&str> = ALL.iter().map(|(name, _)| *name).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), ALL.len());
    }
}
