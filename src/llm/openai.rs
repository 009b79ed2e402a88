//! OpenAI API client implementation (secondary provider)
//!
//! Structured generation travels as a single forced tool-call: the schema
//! becomes the declared function's parameters, and the tool-call arguments
//! come back as the payload. Conversations use the chunked `data:`/`[DONE]`
//! stream decoded incrementally.

use async_trait::async_trait;
use futures::StreamExt;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::debug;

use crate::config::ResolvedProvider;
use crate::domain::{ChatRole, ChatTurn};

use super::sse::{DONE_SENTINEL, SseLineBuffer, data_payload};
use super::{LlmError, Provider, SchemaDescriptor, StreamChunk};

/// OpenAI API client
pub struct OpenAIClient {
    model: String,
    api_key: String,
    base_url: String,
    http: Client,
}

impl OpenAIClient {
    /// Create a new client from resolved configuration
    pub fn from_config(config: &ResolvedProvider) -> Result<Self, LlmError> {
        debug!(model = %config.model, "OpenAIClient::from_config: called");
        let http = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(LlmError::Network)?;

        Ok(Self {
            model: config.model.clone(),
            api_key: config.api_key.clone(),
            base_url: config.base_url.clone(),
            http,
        })
    }

    /// Build the forced tool-call request body
    fn build_tool_body(&self, prompt: &str, schema: &SchemaDescriptor) -> Value {
        debug!(%self.model, tool = schema.tool_name, "build_tool_body: called");
        serde_json::json!({
            "model": self.model,
            "messages": [{ "role": "user", "content": prompt }],
            "tools": [{
                "type": "function",
                "function": {
                    "name": schema.tool_name,
                    "description": schema.tool_description,
                    "parameters": schema.tool_parameters(),
                },
            }],
            "tool_choice": { "type": "function", "function": { "name": schema.tool_name } },
        })
    }

    /// Build the streaming chat request body
    fn build_chat_body(&self, system_prompt: &str, history: &[ChatTurn], message: &str) -> Value {
        debug!(%self.model, turns = history.len(), "build_chat_body: called");
        let mut messages = vec![serde_json::json!({ "role": "system", "content": system_prompt })];
        for turn in history {
            let role = match turn.role {
                ChatRole::User => "user",
                ChatRole::Model => "assistant",
            };
            messages.push(serde_json::json!({ "role": role, "content": turn.content }));
        }
        messages.push(serde_json::json!({ "role": "user", "content": message }));

        serde_json::json!({
            "model": self.model,
            "messages": messages,
            "stream": true,
        })
    }

    /// Extract and parse the forced tool-call arguments
    fn parse_tool_response(&self, api_response: OpenAIResponse, schema: &SchemaDescriptor) -> Result<Value, LlmError> {
        let tool_call = api_response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.tool_calls)
            .and_then(|calls| calls.into_iter().next())
            .ok_or_else(|| {
                LlmError::InvalidResponse("OpenAI response did not include the expected tool call".to_string())
            })?;

        debug!(tool = %tool_call.function.name, "parse_tool_response: tool call received");
        let arguments: Value = serde_json::from_str(&tool_call.function.arguments)?;
        Ok(schema.unwrap_arguments(arguments))
    }
}

#[async_trait]
impl Provider for OpenAIClient {
    fn name(&self) -> &'static str {
        "openai"
    }

    async fn generate_structured(&self, prompt: &str, schema: &SchemaDescriptor) -> Result<Value, LlmError> {
        debug!(%self.model, tool = schema.tool_name, "generate_structured: called");
        let url = format!("{}/v1/chat/completions", self.base_url);
        let body = self.build_tool_body(prompt, schema);

        let response = self
            .http
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("content-type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(LlmError::Network)?;

        let status = response.status().as_u16();
        if !response.status().is_success() {
            debug!(%status, "generate_structured: API error");
            let message = response.text().await.unwrap_or_default();
            return Err(LlmError::Api { status, message });
        }

        let api_response: OpenAIResponse = response.json().await?;
        self.parse_tool_response(api_response, schema)
    }

    async fn stream_conversation(
        &self,
        system_prompt: &str,
        history: &[ChatTurn],
        message: &str,
        chunk_tx: mpsc::Sender<StreamChunk>,
    ) -> Result<String, LlmError> {
        debug!(%self.model, turns = history.len(), "stream_conversation: called");
        let url = format!("{}/v1/chat/completions", self.base_url);
        let body = self.build_chat_body(system_prompt, history, message);

        let response = self
            .http
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("content-type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(LlmError::Network)?;

        let status = response.status().as_u16();
        if !response.status().is_success() {
            let message = response.text().await.unwrap_or_default();
            let _ = chunk_tx.send(StreamChunk::Error(message.clone())).await;
            return Err(LlmError::Api { status, message });
        }

        let mut stream = response.bytes_stream();
        let mut lines = SseLineBuffer::new();
        let mut full_reply = String::new();

        'outer: while let Some(chunk_result) = stream.next().await {
            let chunk = chunk_result.map_err(LlmError::Network)?;
            for line in lines.push(&chunk) {
                let Some(payload) = data_payload(&line) else { continue };
                if payload == DONE_SENTINEL {
                    debug!("stream_conversation: done sentinel");
                    break 'outer;
                }
                let record: OpenAIStreamChunk = serde_json::from_str(payload)?;
                if let Some(choice) = record.choices.first()
                    && let Some(content) = &choice.delta.content
                {
                    full_reply.push_str(content);
                    let _ = chunk_tx.send(StreamChunk::TextDelta(content.clone())).await;
                }
            }
        }

        let _ = chunk_tx.send(StreamChunk::Done).await;
        debug!(reply_len = full_reply.len(), "stream_conversation: complete");
        Ok(full_reply)
    }
}

// OpenAI API response types

#[derive(Debug, Deserialize)]
struct OpenAIResponse {
    choices: Vec<OpenAIChoice>,
}

#[derive(Debug, Deserialize)]
struct OpenAIChoice {
    message: OpenAIMessage,
}

#[derive(Debug, Deserialize)]
struct OpenAIMessage {
    tool_calls: Option<Vec<OpenAIToolCall>>,
}

#[derive(Debug, Deserialize)]
struct OpenAIToolCall {
    function: OpenAIFunction,
}

#[derive(Debug, Deserialize)]
struct OpenAIFunction {
    name: String,
    arguments: String,
}

// Streaming types

#[derive(Debug, Deserialize)]
struct OpenAIStreamChunk {
    #[serde(default)]
    choices: Vec<OpenAIStreamChoice>,
}

#[derive(Debug, Deserialize)]
struct OpenAIStreamChoice {
    delta: OpenAIStreamDelta,
}

#[derive(Debug, Default, Deserialize)]
struct OpenAIStreamDelta {
    content: Option<String>,
}
