//! Provider trait definition

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::mpsc;

use crate::domain::ChatTurn;

use super::{LlmError, SchemaDescriptor, StreamChunk};

/// One LLM provider behind a uniform capability set
///
/// Implementations are stateless request/response adapters: each call is a
/// single request (or a single stream) with no internal retry and no
/// backoff. Failure policy lives entirely in the orchestration cascade, so
/// adapters surface every error as a typed [`LlmError`] and never swallow
/// one.
#[async_trait]
pub trait Provider: Send + Sync {
    /// Short provider name for logs
    fn name(&self) -> &'static str;

    /// Request a structured JSON payload matching the descriptor
    ///
    /// Both adapters return the same *logical* payload for a given
    /// descriptor, regardless of whether it traveled as JSON-mode output or
    /// as forced tool-call arguments.
    async fn generate_structured(&self, prompt: &str, schema: &SchemaDescriptor) -> Result<Value, LlmError>;

    /// Stream a conversational reply
    ///
    /// Text deltas are sent to `chunk_tx` in arrival order for progressive
    /// rendering; the full concatenated reply is returned once the stream
    /// ends.
    async fn stream_conversation(
        &self,
        system_prompt: &str,
        history: &[ChatTurn],
        message: &str,
        chunk_tx: mpsc::Sender<StreamChunk>,
    ) -> Result<String, LlmError>;
}
