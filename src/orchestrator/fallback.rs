//! Deterministic fallback values
//!
//! When every configured provider has failed, each operation degrades to a
//! fixed, safe value instead of surfacing an error to the console. These
//! values are part of the operation contracts and must not drift.

use crate::domain::{CalendarNote, OrchestrationResponse, Suggestion, TaskDraft};

/// Board seeding yields no tasks
pub fn initial_tasks() -> Vec<TaskDraft> {
    Vec::new()
}

/// Hand-off advice is skipped entirely
pub fn handoff() -> Option<Suggestion> {
    None
}

/// Note conversion produces a truncated-note task for the founder
pub fn task_from_note(note: &CalendarNote) -> TaskDraft {
    let prefix: String = note.content.chars().take(20).collect();
    TaskDraft {
        content: format!("Address calendar note: {prefix}..."),
        agent_name: "Andoy".to_string(),
    }
}

/// No skill suggestions
pub fn skill_suggestions() -> Vec<String> {
    Vec::new()
}

/// No skill-exercise tasks
pub fn skill_tasks() -> Vec<String> {
    Vec::new()
}

/// The operator sees an explicit failure message, never a silent drop
pub fn command() -> OrchestrationResponse {
    OrchestrationResponse {
        response_text: "Critical error processing command. All providers failed.".to_string(),
        new_task: None,
    }
}

/// Two generic but always-applicable hints
pub fn hints() -> Vec<String> {
    vec![
        "Summarize all active tasks.".to_string(),
        "Who is the most available agent?".to_string(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_note_fallback_truncates_to_twenty_chars() {
        let note = CalendarNote::new("2026-08-27", "Quarterly security review of every perimeter system");
        let draft = task_from_note(&note);
        assert_eq!(draft.content, "Address calendar note: Quarterly security r...");
        assert_eq!(draft.agent_name, "Andoy");
    }

    #[test]
    fn test_short_note_is_not_padded() {
        let note = CalendarNote::new("2026-08-27", "Call Vegas");
        assert_eq!(task_from_note(&note).content, "Address calendar note: Call Vegas...");
    }

    #[test]
    fn test_command_fallback_has_no_task() {
        let response = command();
        assert_eq!(response.response_text, "Critical error processing command. All providers failed.");
        assert!(response.new_task.is_none());
    }
}
