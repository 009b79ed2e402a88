//! Configuration types and loading
//!
//! API keys never live in the config file; each provider section names the
//! environment variable that carries its key. A missing variable disables
//! that provider and is reported as a configuration error, distinct from
//! any runtime transport failure.

use std::fs;
use std::path::{Path, PathBuf};

use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::llm::LlmError;

/// Main configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Primary provider (JSON-mode structured output)
    pub gemini: ProviderConfig,

    /// Secondary provider (forced tool-calls, preferred for chat)
    pub openai: ProviderConfig,

    /// Voice synthesis credential passthrough
    pub voice: VoiceConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            gemini: ProviderConfig {
                model: "gemini-2.5-flash".to_string(),
                api_key_env: "GEMINI_API_KEY".to_string(),
                base_url: "https://generativelanguage.googleapis.com".to_string(),
                timeout_ms: default_timeout_ms(),
            },
            openai: ProviderConfig {
                model: "gpt-4o".to_string(),
                api_key_env: "OPENAI_API_KEY".to_string(),
                base_url: "https://api.openai.com".to_string(),
                timeout_ms: default_timeout_ms(),
            },
            voice: VoiceConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration with fallback chain
    pub fn load(config_path: Option<&PathBuf>) -> Result<Self> {
        // If explicit config path provided, try to load it
        if let Some(path) = config_path {
            return Self::load_from_file(path).context(format!("Failed to load config from {}", path.display()));
        }

        // Try project-local config: .crewdeck.yml
        let local_config = PathBuf::from(".crewdeck.yml");
        if local_config.exists() {
            match Self::load_from_file(&local_config) {
                Ok(config) => return Ok(config),
                Err(e) => {
                    warn!("Failed to load config from {}: {}", local_config.display(), e);
                }
            }
        }

        // Try user config: ~/.config/crewdeck/crewdeck.yml
        if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join("crewdeck").join("crewdeck.yml");
            if user_config.exists() {
                match Self::load_from_file(&user_config) {
                    Ok(config) => return Ok(config),
                    Err(e) => {
                        warn!("Failed to load config from {}: {}", user_config.display(), e);
                    }
                }
            }
        }

        // No config file found, use defaults
        info!("No config file found, using defaults");
        Ok(Self::default())
    }

    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path).context("Failed to read config file")?;

        let config: Self = serde_yaml::from_str(&content).context("Failed to parse config file")?;

        info!("Loaded config from: {}", path.as_ref().display());
        Ok(config)
    }
}

/// One provider's connection settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Model identifier
    pub model: String,

    /// Environment variable containing the API key
    #[serde(rename = "api-key-env")]
    pub api_key_env: String,

    /// API base URL
    #[serde(rename = "base-url")]
    pub base_url: String,

    /// Request timeout in milliseconds
    #[serde(rename = "timeout-ms", default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

fn default_timeout_ms() -> u64 {
    60_000
}

impl ProviderConfig {
    /// Resolve the credential into a ready-to-use provider config
    ///
    /// The provider label in the error is derived from the env var name so
    /// the message identifies which provider is unconfigured.
    pub fn resolve(&self) -> Result<ResolvedProvider, LlmError> {
        let provider = provider_label(&self.api_key_env);
        let api_key = std::env::var(&self.api_key_env)
            .ok()
            .filter(|v| !v.is_empty())
            .ok_or_else(|| LlmError::MissingApiKey {
                provider,
                env: self.api_key_env.clone(),
            })?;
        Ok(ResolvedProvider {
            model: self.model.clone(),
            api_key,
            base_url: self.base_url.trim_end_matches('/').to_string(),
            timeout_ms: self.timeout_ms,
        })
    }
}

fn provider_label(api_key_env: &str) -> &'static str {
    if api_key_env.contains("OPENAI") { "OpenAI" } else { "Gemini" }
}

/// Provider settings with the credential resolved
#[derive(Debug, Clone)]
pub struct ResolvedProvider {
    pub model: String,
    pub api_key: String,
    pub base_url: String,
    pub timeout_ms: u64,
}

/// Voice synthesis settings
///
/// Carried for callers that drive text-to-speech; nothing in the
/// orchestration layer reads the key.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VoiceConfig {
    /// Environment variable containing the voice API key
    #[serde(rename = "api-key-env")]
    pub api_key_env: String,
}

impl Default for VoiceConfig {
    fn default() -> Self {
        Self {
            api_key_env: "ELEVENLABS_API_KEY".to_string(),
        }
    }
}
