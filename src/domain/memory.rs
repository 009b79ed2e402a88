//! Memory log types
//!
//! The memory log is the console's append-only audit trail and the sole
//! continuity mechanism for orchestration: the last 10 entries are rendered
//! into every prompt as the "recent activity" digest. Entries are immutable
//! once created; deletion is the only permitted mutation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::id::generate_id;

/// What kind of event a memory entry records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MemoryType {
    TaskCreation,
    TaskHandoff,
    Conversation,
    SkillUpdate,
    NoteCreation,
    NoteDelete,
}

impl MemoryType {
    /// The wire/display name, e.g. `TASK_CREATION`
    pub fn name(&self) -> &'static str {
        match self {
            MemoryType::TaskCreation => "TASK_CREATION",
            MemoryType::TaskHandoff => "TASK_HANDOFF",
            MemoryType::Conversation => "CONVERSATION",
            MemoryType::SkillUpdate => "SKILL_UPDATE",
            MemoryType::NoteCreation => "NOTE_CREATION",
            MemoryType::NoteDelete => "NOTE_DELETE",
        }
    }
}

impl std::fmt::Display for MemoryType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// An immutable log record of console activity
///
/// `agent_name` is `None` for system-level events. `details` is a free-form
/// structured payload kept for audit; it is never fed back into prompts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemoryEntry {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    #[serde(rename = "type")]
    pub entry_type: MemoryType,
    pub agent_name: Option<String>,
    pub summary: String,
    #[serde(default)]
    pub details: serde_json::Value,
}

impl MemoryEntry {
    /// Create a new entry stamped with the current wall clock
    pub fn new(
        entry_type: MemoryType,
        agent_name: Option<String>,
        summary: impl Into<String>,
        details: serde_json::Value,
    ) -> Self {
        let entry = Self {
            id: generate_id("mem"),
            timestamp: Utc::now(),
            entry_type,
            agent_name,
            summary: summary.into(),
            details,
        };
        debug!(id = %entry.id, entry_type = %entry.entry_type, "MemoryEntry::new: created");
        entry
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_type_wire_names() {
        assert_eq!(serde_json::to_value(MemoryType::TaskCreation).unwrap(), "TASK_CREATION");
        assert_eq!(serde_json::to_value(MemoryType::NoteDelete).unwrap(), "NOTE_DELETE");
        assert_eq!(MemoryType::SkillUpdate.to_string(), "SKILL_UPDATE");
    }

    #[test]
    fn test_new_entry_fields() {
        let entry = MemoryEntry::new(
            MemoryType::TaskHandoff,
            Some("Stan".to_string()),
            "Task handed to Stan",
            serde_json::json!({"from": "Dave"}),
        );
        assert!(entry.id.starts_with("mem-"));
        assert_eq!(entry.agent_name.as_deref(), Some("Stan"));
        assert_eq!(entry.entry_type, MemoryType::TaskHandoff);
    }

    #[test]
    fn test_system_event_has_no_agent() {
        let entry = MemoryEntry::new(MemoryType::NoteCreation, None, "Note added", serde_json::Value::Null);
        assert!(entry.agent_name.is_none());
        let value = serde_json::to_value(&entry).unwrap();
        assert_eq!(value["type"], "NOTE_CREATION");
        assert!(value["agentName"].is_null());
    }
}
