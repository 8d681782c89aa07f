use async_trait::async_trait;
use std::path::Path;

/// TTS interface trait
#[async_trait]
pub trait TTSInterface: Send + Sync {
    /// Synthesize `text` spoken in `language` and write the audio to `output_path`
    ///
    /// # Arguments
    /// * `text` - The text to synthesize
    /// * `language` - Two-letter language code, e.g. `de`
    /// * `output_path` - Destination file, overwritten if present
    async fn generate_audio(
        &self,
        text: &str,
        language: &str,
        output_path: &Path,
    ) -> Result<(), anyhow::Error>;
}
