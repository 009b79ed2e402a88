//! Validators for provider payloads
//!
//! Providers mostly honor their schemas, but a payload that parsed as JSON
//! can still miss required fields or carry the wrong shape. Each operation
//! runs its payload through one of these before accepting it; a rejection
//! here cascades to the next provider exactly like a transport failure.

use serde_json::Value;

use crate::domain::{OrchestrationResponse, Suggestion, TaskDraft};
use crate::llm::LlmError;

fn invalid(what: &str, err: serde_json::Error) -> LlmError {
    LlmError::InvalidResponse(format!("payload is not {what}: {err}"))
}

/// An array of task drafts
///
/// A provider-supplied `stage` field is ignored; tasks always enter the
/// board in Backlog with a locally minted id.
pub fn task_drafts(payload: Value) -> Result<Vec<TaskDraft>, LlmError> {
    serde_json::from_value(payload).map_err(|e| invalid("a task draft array", e))
}

/// A single task draft
pub fn task_draft(payload: Value) -> Result<TaskDraft, LlmError> {
    serde_json::from_value(payload).map_err(|e| invalid("a task draft", e))
}

/// A hand-off suggestion
pub fn suggestion(payload: Value) -> Result<Suggestion, LlmError> {
    serde_json::from_value(payload).map_err(|e| invalid("a hand-off suggestion", e))
}

/// A plain string array (skills, hints)
pub fn string_array(payload: Value) -> Result<Vec<String>, LlmError> {
    serde_json::from_value(payload).map_err(|e| invalid("a string array", e))
}

/// An orchestration response
///
/// `newTask` absence is preserved as `None`; an explicit JSON `null` is
/// treated the same way.
pub fn orchestration_response(payload: Value) -> Result<OrchestrationResponse, LlmError> {
    if let Value::Object(mut map) = payload {
        if map.get("newTask").is_some_and(Value::is_null) {
            map.remove("newTask");
        }
        serde_json::from_value(Value::Object(map)).map_err(|e| invalid("an orchestration response", e))
    } else {
        Err(LlmError::InvalidResponse("payload is not an orchestration response: expected an object".to_string()))
    }
}
