//! Mock provider for tests
//!
//! Scripted responses plus atomic call counters, so tests can assert the
//! exact number of attempts each provider received during a cascade.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::mpsc;
use tracing::debug;

use crate::domain::ChatTurn;

use super::{LlmError, Provider, SchemaDescriptor, StreamChunk};

/// Scripted mock implementation of [`Provider`]
pub struct MockProvider {
    name: &'static str,
    /// Structured responses consumed in order; `Err` entries simulate a
    /// failed attempt
    responses: Vec<Result<Value, String>>,
    /// Deltas emitted by `stream_conversation`; `None` simulates a stream
    /// that fails to open
    stream_chunks: Option<Vec<String>>,
    calls: AtomicUsize,
    stream_calls: AtomicUsize,
}

impl MockProvider {
    /// A provider that answers every structured call with `value`
    pub fn returning(name: &'static str, value: Value) -> Self {
        Self {
            name,
            responses: vec![Ok(value)],
            stream_chunks: None,
            calls: AtomicUsize::new(0),
            stream_calls: AtomicUsize::new(0),
        }
    }

    /// A provider whose every call fails with `message`
    pub fn failing(name: &'static str, message: &str) -> Self {
        Self {
            name,
            responses: vec![Err(message.to_string())],
            stream_chunks: None,
            calls: AtomicUsize::new(0),
            stream_calls: AtomicUsize::new(0),
        }
    }

    /// A provider that streams the given deltas for conversations
    pub fn streaming(name: &'static str, chunks: Vec<&str>) -> Self {
        Self {
            name,
            responses: vec![],
            stream_chunks: Some(chunks.into_iter().map(String::from).collect()),
            calls: AtomicUsize::new(0),
            stream_calls: AtomicUsize::new(0),
        }
    }

    /// Number of structured calls received so far
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Number of stream calls received so far
    pub fn stream_calls(&self) -> usize {
        self.stream_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Provider for MockProvider {
    fn name(&self) -> &'static str {
        self.name
    }

    async fn generate_structured(&self, _prompt: &str, _schema: &SchemaDescriptor) -> Result<Value, LlmError> {
        let idx = self.calls.fetch_add(1, Ordering::SeqCst);
        debug!(provider = self.name, idx, "MockProvider::generate_structured: called");
        // The last scripted response repeats for any further calls
        let scripted = self
            .responses
            .get(idx)
            .or_else(|| self.responses.last())
            .cloned()
            .ok_or_else(|| LlmError::InvalidResponse("No scripted responses".to_string()))?;
        scripted.map_err(LlmError::InvalidResponse)
    }

    async fn stream_conversation(
        &self,
        _system_prompt: &str,
        _history: &[ChatTurn],
        _message: &str,
        chunk_tx: mpsc::Sender<StreamChunk>,
    ) -> Result<String, LlmError> {
        self.stream_calls.fetch_add(1, Ordering::SeqCst);
        debug!(provider = self.name, "MockProvider::stream_conversation: called");
        let chunks = self
            .stream_chunks
            .as_ref()
            .ok_or_else(|| LlmError::Stream("mock stream not scripted".to_string()))?;

        let mut reply = String::new();
        for chunk in chunks {
            reply.push_str(chunk);
            let _ = chunk_tx.send(StreamChunk::TextDelta(chunk.clone())).await;
        }
        let _ = chunk_tx.send(StreamChunk::Done).await;
        Ok(reply)
    }
}
