use std::sync::Arc;
use anyhow::Result;
use tracing::info;
use crate::config::TTSConfig;
use super::client::GoogleTranslateTTS;
use super::interface::TTSInterface;

/// Factory for creating TTS engines/clients
pub struct TTSFactory;

impl TTSFactory {
    /// Create a TTS client based on configuration
    pub fn create_tts(tts_config: &TTSConfig) -> Result<Arc<dyn TTSInterface>> {
        info!("Initializing TTS engine: {}", tts_config.tts_model);

        match tts_config.tts_model.as_str() {
            "google_translate_tts" | "gtts" => Ok(Arc::new(GoogleTranslateTTS::new(
                tts_config.base_url.clone(),
                tts_config.max_chunk_chars,
            ))),
            other => Err(anyhow::anyhow!("Unsupported TTS model: {}", other)),
        }
    }
}
