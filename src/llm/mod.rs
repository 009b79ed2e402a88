//! LLM provider layer for Crewdeck
//!
//! One trait, two adapters. The primary provider speaks schema-native JSON
//! mode; the secondary speaks forced tool-calls with an equivalent
//! parameter schema, so every operation descriptor translates to both wire
//! formats. Adapters are single-shot: failure policy belongs to the
//! orchestration cascade, not here.

mod error;
mod gemini;
pub mod mock;
mod openai;
mod provider;
mod schema;
pub mod sse;
mod types;

pub use error::LlmError;
pub use gemini::GeminiClient;
pub use openai::OpenAIClient;
pub use provider::Provider;
pub use schema::{SchemaDescriptor, Shape};
pub use types::StreamChunk;
