//! Integration tests for the orchestration cascade
//!
//! These tests drive the operations end-to-end against scripted mock
//! providers and assert the cascade policy: primary first, secondary on
//! failure, fixed fallback values on exhaustion, and exact call counts.

use std::sync::Arc;

use serde_json::json;
use tokio::sync::mpsc;

use crewdeck::domain::{CalendarNote, NotesByDate, Stage, Task, default_roster};
use crewdeck::llm::{LlmError, Provider, StreamChunk, mock::MockProvider};
use crewdeck::orchestrator::{Orchestrator, Route};

fn orchestrator(primary: Option<Arc<MockProvider>>, secondary: Option<Arc<MockProvider>>) -> Orchestrator {
    Orchestrator::new(
        primary.map(|p| p as Arc<dyn Provider>),
        secondary.map(|p| p as Arc<dyn Provider>),
    )
    .expect("orchestrator construction")
}

// =============================================================================
// Cascade Policy
// =============================================================================

#[tokio::test]
async fn test_primary_success_never_touches_secondary() {
    let roster = default_roster();
    let primary = Arc::new(MockProvider::returning(
        "primary",
        json!([
            {"content": "Audit the VPN", "agentName": "Stan", "stage": "Backlog"},
            {"content": "Map the subnet", "agentName": "Lyn", "stage": "Backlog"},
        ]),
    ));
    let secondary = Arc::new(MockProvider::returning("secondary", json!([])));
    let orch = orchestrator(Some(primary.clone()), Some(secondary.clone()));

    let outcome = orch.generate_initial_tasks(&roster).await;
    assert_eq!(outcome.route, Route::Primary);
    assert_eq!(outcome.value.len(), 2);
    assert_eq!(primary.calls(), 1);
    assert_eq!(secondary.calls(), 0);
}

#[tokio::test]
async fn test_primary_failure_cascades_to_secondary() {
    let roster = default_roster();
    let primary = Arc::new(MockProvider::failing("primary", "simulated outage"));
    let secondary = Arc::new(MockProvider::returning(
        "secondary",
        json!({"suggestedAgent": "Bob", "nextAction": "Run penetration test."}),
    ));
    let orch = orchestrator(Some(primary.clone()), Some(secondary.clone()));

    let task = Task::new("Harden the perimeter", "Alice");
    let outcome = orch
        .get_handoff_suggestion(&task, Stage::ToDo, Stage::Review, &roster, &[])
        .await;

    assert_eq!(outcome.route, Route::Secondary);
    let suggestion = outcome.value.expect("suggestion present");
    // The payload passes through without mutation, even when the agent
    // name is not in the current roster
    assert_eq!(suggestion.suggested_agent, "Bob");
    assert_eq!(suggestion.next_action, "Run penetration test.");
    assert_eq!(primary.calls(), 1);
    assert_eq!(secondary.calls(), 1);
}

#[tokio::test]
async fn test_schema_invalid_payload_counts_as_failure() {
    let roster = default_roster();
    // Valid JSON, wrong shape: the validator must reject it and cascade
    let primary = Arc::new(MockProvider::returning("primary", json!({"tasks": "not an array"})));
    let secondary = Arc::new(MockProvider::returning(
        "secondary",
        json!(["Check the calendar.", "Reassign stale tasks."]),
    ));
    let orch = orchestrator(Some(primary.clone()), Some(secondary.clone()));

    let outcome = orch.generate_hints(&roster, &[], &[], &NotesByDate::new()).await;
    assert_eq!(outcome.route, Route::Secondary);
    assert_eq!(outcome.value, vec!["Check the calendar.", "Reassign stale tasks."]);
    assert_eq!(primary.calls(), 1);
    assert_eq!(secondary.calls(), 1);
}

// =============================================================================
// Fallback Values
// =============================================================================

#[tokio::test]
async fn test_exhaustion_degrades_to_fixed_fallbacks() {
    let roster = default_roster();
    let orch = orchestrator(None, None);

    let tasks = orch.generate_initial_tasks(&roster).await;
    assert_eq!(tasks.route, Route::Fallback);
    assert!(tasks.value.is_empty());

    let handoff = orch
        .get_handoff_suggestion(&Task::new("x", "Stan"), Stage::Backlog, Stage::ToDo, &roster, &[])
        .await;
    assert_eq!(handoff.route, Route::Fallback);
    assert!(handoff.value.is_none());

    let skills = orch.suggest_skills(&roster[1], &[]).await;
    assert!(skills.value.is_empty());

    let hints = orch.generate_hints(&roster, &[], &[], &NotesByDate::new()).await;
    assert_eq!(
        hints.value,
        vec!["Summarize all active tasks.".to_string(), "Who is the most available agent?".to_string()]
    );
}

#[tokio::test]
async fn test_note_fallback_task_truncates_content() {
    let roster = default_roster();
    let orch = orchestrator(Some(Arc::new(MockProvider::failing("primary", "down"))), None);

    let note = CalendarNote::new("2026-08-27", "Quarterly security review of every perimeter system");
    let outcome = orch.generate_task_from_note(&note, &roster, &[]).await;

    assert_eq!(outcome.route, Route::Fallback);
    assert_eq!(outcome.value.content, "Address calendar note: Quarterly security r...");
    assert_eq!(outcome.value.agent_name, "Andoy");
    assert_eq!(outcome.value.stage, Stage::Backlog);
    assert!(outcome.value.id.starts_with("task-"));
}

#[tokio::test]
async fn test_command_fallback_surfaces_failure_text() {
    let roster = default_roster();
    let orch = orchestrator(
        Some(Arc::new(MockProvider::failing("primary", "down"))),
        Some(Arc::new(MockProvider::failing("secondary", "also down"))),
    );

    let outcome = orch
        .orchestrate_command("Do something.", &roster, &[], &[], &NotesByDate::new())
        .await;
    assert_eq!(outcome.route, Route::Fallback);
    assert_eq!(outcome.value.response_text, "Critical error processing command. All providers failed.");
    assert!(outcome.value.new_task.is_none());
}

// =============================================================================
// Task Materialization
// =============================================================================

#[tokio::test]
async fn test_initial_tasks_mint_local_ids_and_force_backlog() {
    let roster = default_roster();
    // The provider claims a bogus stage; it must be discarded
    let primary = Arc::new(MockProvider::returning(
        "primary",
        json!([
            {"content": "Task one", "agentName": "Stan", "stage": "Done"},
            {"content": "Task two", "agentName": "Dave", "stage": "Llama"},
            {"content": "Task three", "agentName": "Emmy", "stage": "Review"},
            {"content": "Task four", "agentName": "Lyn", "stage": ""},
            {"content": "Task five", "agentName": "Andoy", "stage": "Backlog"},
        ]),
    ));
    let orch = orchestrator(Some(primary), None);

    let outcome = orch.generate_initial_tasks(&roster).await;
    assert_eq!(outcome.value.len(), 5);

    let mut ids: Vec<&str> = outcome.value.iter().map(|t| t.id.as_str()).collect();
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), 5, "every task gets a fresh unique id");

    for task in &outcome.value {
        assert_eq!(task.stage, Stage::Backlog);
        assert!(task.id.starts_with("task-"));
    }
}

#[tokio::test]
async fn test_skill_tasks_belong_to_the_upgraded_agent() {
    let roster = default_roster();
    let primary = Arc::new(MockProvider::returning(
        "primary",
        json!(["Model threats for the new vault", "Draft a cloud hardening runbook"]),
    ));
    let orch = orchestrator(Some(primary), None);

    let added = vec!["Threat Modeling".to_string(), "Cloud Security".to_string()];
    let outcome = orch.suggest_tasks_for_new_skills(&roster[1], &added, &[]).await;

    assert_eq!(outcome.route, Route::Primary);
    assert_eq!(outcome.value.len(), 2);
    for task in &outcome.value {
        assert_eq!(task.agent_name, "Stan");
        assert_eq!(task.stage, Stage::Backlog);
    }
}

#[tokio::test]
async fn test_command_response_without_task_omits_the_key() {
    let roster = default_roster();
    let primary = Arc::new(MockProvider::returning(
        "primary",
        json!({"responseText": "Three tasks active, all in Backlog."}),
    ));
    let orch = orchestrator(Some(primary), None);

    let outcome = orch
        .orchestrate_command("Summarize all active tasks.", &roster, &[], &[], &NotesByDate::new())
        .await;
    assert_eq!(outcome.route, Route::Primary);
    assert!(outcome.value.new_task.is_none());

    // Key presence, not nullness: the serialized form must not carry newTask
    let serialized = serde_json::to_value(&outcome.value).expect("serialize");
    assert!(serialized.get("newTask").is_none());
    assert_eq!(serialized["responseText"], "Three tasks active, all in Backlog.");
}

// =============================================================================
// Conversation Streaming
// =============================================================================

#[tokio::test]
async fn test_conversation_prefers_secondary_and_streams_in_order() {
    let roster = default_roster();
    let primary = Arc::new(MockProvider::streaming("primary", vec!["wrong provider"]));
    let secondary = Arc::new(MockProvider::streaming("secondary", vec!["Hel", "lo", " there"]));
    let orch = orchestrator(Some(primary.clone()), Some(secondary.clone()));

    let (tx, mut rx) = mpsc::channel(16);
    let reply = orch
        .start_conversation(&roster[0], &[], "Status report.", &[], tx)
        .await
        .expect("stream succeeds");
    assert_eq!(reply, "Hello there");
    assert_eq!(secondary.stream_calls(), 1);
    assert_eq!(primary.stream_calls(), 0);

    let mut deltas = Vec::new();
    while let Some(chunk) = rx.recv().await {
        match chunk {
            StreamChunk::TextDelta(text) => deltas.push(text),
            StreamChunk::Done => break,
            StreamChunk::Error(e) => panic!("unexpected error chunk: {e}"),
        }
    }
    assert_eq!(deltas, vec!["Hel", "lo", " there"], "three partial appends, in order");
}

#[tokio::test]
async fn test_conversation_falls_back_to_primary_when_secondary_absent() {
    let roster = default_roster();
    let primary = Arc::new(MockProvider::streaming("primary", vec!["On it."]));
    let orch = orchestrator(Some(primary.clone()), None);

    let (tx, _rx) = mpsc::channel(16);
    let reply = orch
        .start_conversation(&roster[0], &[], "Status report.", &[], tx)
        .await
        .expect("stream succeeds");
    assert_eq!(reply, "On it.");
    assert_eq!(primary.stream_calls(), 1);
}

#[tokio::test]
async fn test_conversation_without_providers_is_an_error() {
    let roster = default_roster();
    let orch = orchestrator(None, None);

    let (tx, _rx) = mpsc::channel(16);
    let err = orch
        .start_conversation(&roster[0], &[], "Status report.", &[], tx)
        .await
        .expect_err("no providers configured");
    assert!(matches!(err, LlmError::NoProviderConfigured));
    assert!(err.is_config());
}
