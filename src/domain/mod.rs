//! Domain types for Crewdeck
//!
//! Core domain types: Agent, Task, MemoryEntry, CalendarNote, plus the
//! transient result types that flow back from orchestration operations.
//!
//! Wire names are camelCase to match the console's persisted snapshot
//! format. `Agent.name` is the only identity used for cross-references;
//! it is never validated against the live roster, so a task or memory may
//! reference a name no longer present.

mod agent;
mod chat;
mod id;
mod memory;
mod note;
mod task;

pub use agent::{Agent, default_roster};
pub use chat::{ChatRole, ChatTurn};
pub use id::generate_id;
pub use memory::{MemoryEntry, MemoryType};
pub use note::{CalendarNote, NotesByDate};
pub use task::{OrchestrationResponse, Stage, Suggestion, Task, TaskDraft};
