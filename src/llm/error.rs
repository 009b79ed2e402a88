//! LLM error types

use thiserror::Error;

/// Errors that can occur during LLM operations
///
/// Configuration errors (`MissingApiKey`, `NoProviderConfigured`) are
/// distinguished from runtime errors so logs can tell "never set up" apart
/// from "fell over", even though the cascade degrades both to the same
/// fallback value.
#[derive(Debug, Error)]
pub enum LlmError {
    #[error("{provider} API key not configured. Set the {env} environment variable.")]
    MissingApiKey { provider: &'static str, env: String },

    #[error("No AI provider is configured for conversations.")]
    NoProviderConfigured,

    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Stream error: {0}")]
    Stream(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl LlmError {
    /// Check if this is a configuration error rather than a runtime failure
    pub fn is_config(&self) -> bool {
        matches!(self, LlmError::MissingApiKey { .. } | LlmError::NoProviderConfigured)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_api_key_message_names_provider_and_env() {
        let err = LlmError::MissingApiKey {
            provider: "gemini",
            env: "GEMINI_API_KEY".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("gemini"));
        assert!(msg.contains("GEMINI_API_KEY"));
    }

    #[test]
    fn test_is_config() {
        assert!(
            LlmError::MissingApiKey {
                provider: "openai",
                env: "OPENAI_API_KEY".to_string()
            }
            .is_config()
        );
        assert!(LlmError::NoProviderConfigured.is_config());
        assert!(
            !LlmError::Api {
                status: 500,
                message: "boom".to_string()
            }
            .is_config()
        );
        assert!(!LlmError::InvalidResponse("not json".to_string()).is_config());
    }
}
