use std::sync::Arc;
use tracing::{info, warn};

use crate::error::AppError;
use crate::language::{Language, LanguageDetector};
use crate::llm::StatelessLLMInterface;
use crate::storage::AudioStore;
use crate::tts::TTSInterface;

use super::interface::TranslateResponse;
use super::parser::{parse_response, ParsedResponse};
use super::prompt::build_prompt;

const GERMAN_SPECIAL_CHARS: [char; 4] = ['ä', 'ö', 'ü', 'ß'];

/// Runs one translation request end to end: detect, prompt, parse, speak.
pub struct TranslateService {
    detector: LanguageDetector,
    llm: Arc<dyn StatelessLLMInterface>,
    tts: Arc<dyn TTSInterface>,
    audio_store: Arc<AudioStore>,
}

impl TranslateService {
    pub fn new(
        detector: LanguageDetector,
        llm: Arc<dyn StatelessLLMInterface>,
        tts: Arc<dyn TTSInterface>,
        audio_store: Arc<AudioStore>,
    ) -> Self {
        Self {
            detector,
            llm,
            tts,
            audio_store,
        }
    }

    pub async fn translate(&self, text: &str) -> Result<TranslateResponse, AppError> {
        let user_text = text.trim();
        if user_text.is_empty() {
            return Err(AppError::EmptyInput);
        }

        self.audio_store.cleanup_expired().await;

        let pair = self.detector.detect_pair(user_text);
        info!("Translating {} chars ({})", user_text.chars().count(), pair.label());

        let prompt = build_prompt(user_text, pair);
        let raw = self.llm.generate(&prompt).await?;
        let parsed = parse_response(&raw)?;

        if parsed.translation.to_lowercase() == user_text.to_lowercase() {
            return Err(AppError::EchoedInput);
        }

        if pair.target == Language::German && !has_german_special_chars(&parsed.translation) {
            warn!(
                "German translation may lack special characters - {}",
                parsed.translation
            );
        }

        let artifact = self.audio_store.allocate();
        self.tts
            .generate_audio(parsed.example_target(), pair.target.code(), &artifact.path)
            .await?;

        let ParsedResponse {
            translation,
            example,
        } = parsed;

        Ok(TranslateResponse {
            original: user_text.to_string(),
            translation,
            example,
            audio_url: artifact.url(),
        })
    }
}

fn has_german_special_chars(text: &str) -> bool {
    text.to_lowercase()
        .chars()
        .any(|c| GERMAN_SPECIAL_CHARS.contains(&c))
}
