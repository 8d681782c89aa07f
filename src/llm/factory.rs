use std::sync::Arc;
use tracing::info;
use anyhow::Result;

use crate::config::LLMConfig;
use super::gemini_llm::GeminiLLM;
use super::interface::StatelessLLMInterface;
use super::openai_compatible_llm::OpenAICompatibleLLM;

/// Providers that usually run locally without authentication
const KEYLESS_PROVIDERS: [&str; 2] = ["ollama_llm", "openai_compatible_llm"];

/// Factory for creating stateless LLM instances
pub struct StatelessLLMFactory;

impl StatelessLLMFactory {
    /// Create an LLM based on the configured provider
    pub fn create_llm(config: &LLMConfig) -> Result<Arc<dyn StatelessLLMInterface>> {
        info!("Initializing LLM: {}", config.llm_provider);

        let api_key = config.llm_api_key.trim();
        if api_key.starts_with("${") {
            anyhow::bail!("llm_api_key placeholder was not resolved: {}", api_key);
        }
        if api_key.is_empty() && !KEYLESS_PROVIDERS.contains(&config.llm_provider.as_str()) {
            anyhow::bail!("llm_api_key is not set for provider {}", config.llm_provider);
        }

        match config.llm_provider.as_str() {
            "gemini_llm" => Ok(Arc::new(GeminiLLM::new(
                config.model.clone(),
                config.base_url.clone(),
                api_key.to_string(),
                config.temperature,
            ))),
            "openai_compatible_llm" | "openai_llm" | "ollama_llm" | "groq_llm"
            | "deepseek_llm" => Ok(Arc::new(OpenAICompatibleLLM::new(
                config.model.clone(),
                config.base_url.clone(),
                api_key.to_string(),
                config.temperature,
            ))),
            other => Err(anyhow::anyhow!("Unsupported LLM provider: {}", other)),
        }
    }
}
