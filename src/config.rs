use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use anyhow::Result;
use chrono::Duration;
use once_cell::sync::Lazy;
use regex::Regex;

static ENV_PLACEHOLDER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\$\{(\w+)\}").expect("placeholder pattern is valid"));

const MAX_RETENTION_HOURS: u64 = 24 * 365 * 100;

/// Top-level configuration, built once at startup and handed to every component.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(rename = "@context")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<serde_json::Value>,

    #[serde(default)]
    pub system_config: SystemConfig,

    pub llm_config: LLMConfig,

    #[serde(default)]
    pub tts_config: TTSConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_audio_dir")]
    pub audio_dir: String,
    #[serde(default = "default_audio_retention_hours")]
    pub audio_retention_hours: u64,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5001
}

fn default_audio_dir() -> String {
    "audio_files".to_string()
}

fn default_audio_retention_hours() -> u64 {
    24
}

impl SystemConfig {
    pub fn audio_path(&self) -> PathBuf {
        PathBuf::from(&self.audio_dir)
    }

    /// Age after which generated audio is deleted, capped at a century.
    pub fn audio_retention(&self) -> Duration {
        let hours = self.audio_retention_hours.min(MAX_RETENTION_HOURS);
        Duration::hours(hours as i64)
    }
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            audio_dir: default_audio_dir(),
            audio_retention_hours: default_audio_retention_hours(),
        }
    }
}

/// Configuration for the text generation provider
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LLMConfig {
    #[serde(default = "default_llm_provider")]
    pub llm_provider: String,

    #[serde(default = "default_model")]
    pub model: String,

    #[serde(default = "default_llm_base_url")]
    pub base_url: String,

    /// Required by hosted providers; local OpenAI-compatible servers may leave it empty.
    #[serde(default)]
    pub llm_api_key: String,

    #[serde(default)]
    pub temperature: Option<f32>,
}

fn default_llm_provider() -> String {
    "gemini_llm".to_string()
}

fn default_model() -> String {
    "gemini-1.5-pro".to_string()
}

fn default_llm_base_url() -> String {
    "https://generativelanguage.googleapis.com".to_string()
}

impl Default for LLMConfig {
    fn default() -> Self {
        Self {
            llm_provider: default_llm_provider(),
            model: default_model(),
            base_url: default_llm_base_url(),
            llm_api_key: String::new(),
            temperature: None,
        }
    }
}

/// Configuration for Text-to-Speech
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TTSConfig {
    #[serde(default = "default_tts_model")]
    pub tts_model: String,

    #[serde(default = "default_tts_base_url")]
    pub base_url: String,

    #[serde(default = "default_max_chunk_chars")]
    pub max_chunk_chars: usize,
}

fn default_tts_model() -> String {
    "google_translate_tts".to_string()
}

fn default_tts_base_url() -> String {
    "https://translate.google.com".to_string()
}

fn default_max_chunk_chars() -> usize {
    100
}

impl Default for TTSConfig {
    fn default() -> Self {
        Self {
            tts_model: default_tts_model(),
            base_url: default_tts_base_url(),
            max_chunk_chars: default_max_chunk_chars(),
        }
    }
}

impl Config {
    /// Load configuration from a YAML or JSON/JSON-LD file.
    ///
    /// `${VAR_NAME}` placeholders are replaced with environment values before parsing.
    pub fn load(path: &str) -> Result<Self> {
        if !Path::new(path).exists() {
            anyhow::bail!("Configuration file not found: {}", path);
        }

        let bytes = fs::read(path)?;
        // decode() strips a UTF-8 BOM if present
        let (content, _, had_errors) = encoding_rs::UTF_8.decode(&bytes);
        if had_errors {
            anyhow::bail!("Configuration file is not valid UTF-8: {}", path);
        }

        let content = substitute_env_vars(&content);

        let path_lower = path.to_lowercase();
        if path_lower.ends_with(".jsonld") || path_lower.ends_with(".json") {
            Self::from_json_str(&content)
        } else {
            Self::from_yaml_str(&content)
        }
    }

    pub fn from_yaml_str(content: &str) -> Result<Self> {
        let config: Config = serde_yaml::from_str(content)?;
        Ok(config)
    }

    pub fn from_json_str(content: &str) -> Result<Self> {
        let config: Config = serde_json::from_str(content)?;
        Ok(config)
    }

    /// Apply process-level overrides such as `PORT`.
    pub fn apply_env_overrides(&mut self) {
        if let Some(port) = std::env::var("PORT").ok().and_then(|p| p.parse().ok()) {
            self.system_config.port = port;
        }
    }
}

/// Replace `${VAR}` with the value of `VAR`, leaving unknown variables untouched.
pub fn substitute_env_vars(content: &str) -> String {
    ENV_PLACEHOLDER
        .replace_all(content, |caps: &regex::Captures| {
            std::env::var(&caps[1]).unwrap_or_else(|_| caps[0].to_string())
        })
        .into_owned()
}
