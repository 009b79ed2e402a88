//! Task board types and operation result types

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::id::generate_id;

/// Kanban workflow stage
///
/// The closed, ordered set of board columns. No other value is valid input
/// or output anywhere in the system; provider payloads claiming a different
/// stage are overridden at the operation boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Stage {
    #[default]
    Backlog,
    #[serde(rename = "To Do")]
    ToDo,
    #[serde(rename = "In Progress")]
    InProgress,
    Review,
    Done,
}

impl Stage {
    /// All stages in board order
    pub const ALL: [Stage; 5] = [Stage::Backlog, Stage::ToDo, Stage::InProgress, Stage::Review, Stage::Done];

    /// The display/wire name of the stage
    pub fn name(&self) -> &'static str {
        match self {
            Stage::Backlog => "Backlog",
            Stage::ToDo => "To Do",
            Stage::InProgress => "In Progress",
            Stage::Review => "Review",
            Stage::Done => "Done",
        }
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A task on the Kanban board
///
/// `agent_name` is a loose foreign key into the roster; it is not enforced
/// referentially and may reference a name not currently present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub content: String,
    pub agent_name: String,
    pub stage: Stage,
}

impl Task {
    /// Create a new backlog task with a freshly generated id
    ///
    /// Ids are always minted locally; a provider payload never supplies one.
    pub fn new(content: impl Into<String>, agent_name: impl Into<String>) -> Self {
        let task = Self {
            id: generate_id("task"),
            content: content.into(),
            agent_name: agent_name.into(),
            stage: Stage::Backlog,
        };
        debug!(id = %task.id, agent = %task.agent_name, "Task::new: created");
        task
    }
}

/// A task before id/stage assignment
///
/// This is both the payload shape providers return for note conversion and
/// the optional `newTask` member of a command response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskDraft {
    pub content: String,
    pub agent_name: String,
}

/// Hand-off suggestion for a task that just changed stage
///
/// Advisory only; the caller applies the re-assignment unconditionally.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Suggestion {
    pub suggested_agent: String,
    pub next_action: String,
}

/// Response to an operator console command
///
/// `new_task` is present only when the command implied creating a task.
/// When absent it must be omitted from the serialized form entirely -
/// callers test for key presence, not truthiness.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrchestrationResponse {
    pub response_text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_task: Option<TaskDraft>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_wire_names() {
        assert_eq!(serde_json::to_value(Stage::Backlog).unwrap(), "Backlog");
        assert_eq!(serde_json::to_value(Stage::ToDo).unwrap(), "To Do");
        assert_eq!(serde_json::to_value(Stage::InProgress).unwrap(), "In Progress");
        assert_eq!(serde_json::to_value(Stage::Review).unwrap(), "Review");
        assert_eq!(serde_json::to_value(Stage::Done).unwrap(), "Done");
    }

    #[test]
    fn test_stage_rejects_unknown_value() {
        let result: Result<Stage, _> = serde_json::from_value(serde_json::json!("Blocked"));
        assert!(result.is_err());
    }

    #[test]
    fn test_task_new_defaults() {
        let a = Task::new("Audit the VPN", "Stan");
        let b = Task::new("Audit the VPN", "Stan");
        assert_eq!(a.stage, Stage::Backlog);
        assert!(a.id.starts_with("task-"));
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_task_serializes_camel_case() {
        let task = Task::new("Map the subnet", "Lyn");
        let value = serde_json::to_value(&task).unwrap();
        assert_eq!(value["agentName"], "Lyn");
        assert_eq!(value["stage"], "Backlog");
    }

    #[test]
    fn test_orchestration_response_omits_absent_new_task() {
        let response = OrchestrationResponse {
            response_text: "All quiet.".to_string(),
            new_task: None,
        };
        let value = serde_json::to_value(&response).unwrap();
        assert!(value.get("newTask").is_none());

        let response = OrchestrationResponse {
            response_text: "On it.".to_string(),
            new_task: Some(TaskDraft {
                content: "Sweep the logs".to_string(),
                agent_name: "Stan".to_string(),
            }),
        };
        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["newTask"]["agentName"], "Stan");
    }
}
