//! Gemini API client implementation (primary provider)
//!
//! Structured generation uses JSON-mode output: the request carries a
//! response schema and the reply text is parsed as a JSON document.
//! Conversations use the provider-native SSE token stream.

use async_trait::async_trait;
use futures::StreamExt;
use reqwest::Client;
use reqwest_eventsource::{Event, EventSource};
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::debug;

use crate::config::ResolvedProvider;
use crate::domain::{ChatRole, ChatTurn};

use super::{LlmError, Provider, SchemaDescriptor, StreamChunk};

/// Gemini API client
pub struct GeminiClient {
    model: String,
    api_key: String,
    base_url: String,
    http: Client,
}

impl GeminiClient {
    /// Create a new client from resolved configuration
    pub fn from_config(config: &ResolvedProvider) -> Result<Self, LlmError> {
        debug!(model = %config.model, "GeminiClient::from_config: called");
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

    /// Build the JSON-mode generation request body
    fn build_generate_body(&self, prompt: &str, schema: &SchemaDescriptor) -> Value {
        debug!(%self.model, tool = schema.tool_name, "build_generate_body: called");
        serde_json::json!({
            "contents": [{ "role": "user", "parts": [{ "text": prompt }] }],
            "generationConfig": {
                "responseMimeType": "application/json",
                "responseSchema": schema.response_schema(),
            },
        })
    }

    /// Build the streaming chat request body
    fn build_chat_body(&self, system_prompt: &str, history: &[ChatTurn], message: &str) -> Value {
        debug!(%self.model, turns = history.len(), "build_chat_body: called");
        let mut contents: Vec<Value> = history
            .iter()
            .map(|turn| {
                let role = match turn.role {
                    ChatRole::User => "user",
                    ChatRole::Model => "model",
                };
                serde_json::json!({ "role": role, "parts": [{ "text": turn.content }] })
            })
            .collect();
        contents.push(serde_json::json!({ "role": "user", "parts": [{ "text": message }] }));

        serde_json::json!({
            "systemInstruction": { "parts": [{ "text": system_prompt }] },
            "contents": contents,
        })
    }

    /// Concatenate the text parts of the first candidate
    fn extract_text(response: &GeminiResponse) -> Result<String, LlmError> {
        let candidate = response
            .candidates
            .first()
            .ok_or_else(|| LlmError::InvalidResponse("Gemini response contained no candidates".to_string()))?;

        let text: String = candidate
            .content
            .parts
            .iter()
            .filter_map(|part| part.text.as_deref())
            .collect();

        if text.is_empty() {
            return Err(LlmError::InvalidResponse(
                "Gemini candidate contained no text parts".to_string(),
            ));
        }
        Ok(text)
    }
}

#[async_trait]
impl Provider for GeminiClient {
    fn name(&self) -> &'static str {
        "gemini"
    }

    async fn generate_structured(&self, prompt: &str, schema: &SchemaDescriptor) -> Result<Value, LlmError> {
        debug!(%self.model, tool = schema.tool_name, "generate_structured: called");
        let url = format!("{}/v1beta/models/{}:generateContent", self.base_url, self.model);
        let body = self.build_generate_body(prompt, schema);

        let response = self
            .http
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
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

        let api_response: GeminiResponse = response.json().await?;
        let text = Self::extract_text(&api_response)?;

        debug!(text_len = text.len(), "generate_structured: parsing JSON payload");
        let payload: Value = serde_json::from_str(text.trim())?;
        Ok(payload)
    }

    async fn stream_conversation(
        &self,
        system_prompt: &str,
        history: &[ChatTurn],
        message: &str,
        chunk_tx: mpsc::Sender<StreamChunk>,
    ) -> Result<String, LlmError> {
        debug!(%self.model, turns = history.len(), "stream_conversation: called");
        let url = format!(
            "{}/v1beta/models/{}:streamGenerateContent?alt=sse",
            self.base_url, self.model
        );
        let body = self.build_chat_body(system_prompt, history, message);

        let request = self
            .http
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .header("content-type", "application/json")
            .json(&body);

        let mut es = EventSource::new(request).map_err(|e| LlmError::Stream(e.to_string()))?;
        let mut full_reply = String::new();

        while let Some(event) = es.next().await {
            match event {
                Ok(Event::Open) => {
                    debug!("stream_conversation: stream open");
                }
                Ok(Event::Message(msg)) => {
                    let data: GeminiResponse = serde_json::from_str(&msg.data)?;
                    if let Ok(delta) = Self::extract_text(&data) {
                        full_reply.push_str(&delta);
                        let _ = chunk_tx.send(StreamChunk::TextDelta(delta)).await;
                    }
                }
                // Gemini has no terminal sentinel; a clean close ends the stream
                Err(reqwest_eventsource::Error::StreamEnded) => {
                    debug!("stream_conversation: stream ended");
                    break;
                }
                Err(reqwest_eventsource::Error::InvalidStatusCode(code, response)) => {
                    es.close();
                    let message = response.text().await.unwrap_or_default();
                    let _ = chunk_tx.send(StreamChunk::Error(message.clone())).await;
                    return Err(LlmError::Api {
                        status: code.as_u16(),
                        message,
                    });
                }
                Err(e) => {
                    es.close();
                    let _ = chunk_tx.send(StreamChunk::Error(e.to_string())).await;
                    return Err(LlmError::Stream(e.to_string()));
                }
            }
        }

        let _ = chunk_tx.send(StreamChunk::Done).await;
        debug!(reply_len = full_reply.len(), "stream_conversation: complete");
        Ok(full_reply)
    }
}

// Gemini API response types

#[derive(Debug, Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
}

#[derive(Debug, Deserialize)]
struct GeminiCandidate {
    #[serde(default)]
    content: GeminiContent,
}

#[derive(Debug, Default, Deserialize)]
struct GeminiContent {
    #[serde(default)]
    parts: Vec<GeminiPart>,
}

#[derive(Debug, Deserialize)]
struct GeminiPart {
    text: Option<String>,
}
