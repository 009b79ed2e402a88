//! Crewdeck - Multi-provider AI orchestration for an agent operations console
//!
//! Crewdeck coordinates a roster of fictional AI agents across a Kanban
//! board, a calendar, a memory log, and a command console. Content (tasks,
//! hand-off suggestions, skills, hints, command responses, chat replies) is
//! generated by an LLM provider; this crate implements the orchestration
//! layer that sits between the console and the providers.
//!
//! # Core Concepts
//!
//! - **Two interchangeable adapters**: a schema-native JSON-mode provider
//!   (Gemini) and a forced tool-call provider (OpenAI) implement one trait
//! - **Sequential cascade**: try primary, on any failure try secondary, on
//!   exhaustion degrade to a deterministic fallback value - never an error
//! - **Stateless operations**: every call is independent; continuity comes
//!   only from the memory-log digest passed in by the caller
//! - **Chat inverts the cascade**: conversations prefer the secondary
//!   provider and propagate exhaustion, since streams have no safe fallback
//!
//! # Modules
//!
//! - [`domain`] - Agents, tasks, memory log, calendar notes
//! - [`llm`] - Provider trait, adapters, schema descriptors, errors
//! - [`prompts`] - Activity digest and prompt template rendering
//! - [`orchestrator`] - The operations and their cascade/fallback policy
//! - [`config`] - Configuration types and loading
//! - [`cli`] - Command-line interface

pub mod cli;
pub mod config;
pub mod domain;
pub mod llm;
pub mod orchestrator;
pub mod prompts;

// Re-export commonly used types
pub use config::{Config, ProviderConfig, ResolvedProvider};
pub use domain::{
    Agent, CalendarNote, ChatRole, ChatTurn, MemoryEntry, MemoryType, NotesByDate, OrchestrationResponse, Stage,
    Suggestion, Task, TaskDraft, default_roster,
};
pub use llm::{
    GeminiClient, LlmError, OpenAIClient, Provider, SchemaDescriptor, Shape, StreamChunk, mock::MockProvider,
};
pub use orchestrator::{Orchestrator, Outcome, Route};
pub use prompts::{PromptLibrary, format_recent_activity};
