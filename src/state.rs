use std::sync::Arc;

use crate::config::Config;
use crate::language::{LanguageDetector, LanguageIdentifier, WhatlangIdentifier};
use crate::llm::{StatelessLLMFactory, StatelessLLMInterface};
use crate::storage::AudioStore;
use crate::translate::TranslateService;
use crate::tts::{TTSFactory, TTSInterface};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub audio_store: Arc<AudioStore>,
    pub translator: Arc<TranslateService>,
}

impl AppState {
    /// Build the state from configuration, creating the configured providers.
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let llm = StatelessLLMFactory::create_llm(&config.llm_config)?;
        let tts = TTSFactory::create_tts(&config.tts_config)?;
        Ok(Self::from_parts(
            config,
            Arc::new(WhatlangIdentifier::new()),
            llm,
            tts,
        ))
    }

    /// Build the state around explicitly supplied collaborators.
    pub fn from_parts(
        config: Config,
        identifier: Arc<dyn LanguageIdentifier>,
        llm: Arc<dyn StatelessLLMInterface>,
        tts: Arc<dyn TTSInterface>,
    ) -> Self {
        let audio_store = Arc::new(AudioStore::from_config(&config.system_config));
        let translator = Arc::new(TranslateService::new(
            LanguageDetector::new(identifier),
            llm,
            tts,
            audio_store.clone(),
        ));

        Self {
            config: Arc::new(config),
            audio_store,
            translator,
        }
    }
}
