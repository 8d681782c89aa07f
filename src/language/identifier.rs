use whatlang::{Detector, Lang};

/// Result of a statistical language guess
#[derive(Debug, Clone, PartialEq)]
pub struct LanguageGuess {
    pub code: String,
    pub confidence: f64,
}

impl LanguageGuess {
    pub fn unknown() -> Self {
        Self {
            code: "unknown".to_string(),
            confidence: 0.0,
        }
    }
}

/// Statistical language identification
pub trait LanguageIdentifier: Send + Sync {
    fn classify(&self, text: &str) -> LanguageGuess;
}

/// Trigram-based identifier backed by whatlang
pub struct WhatlangIdentifier {
    detector: Detector,
}

impl WhatlangIdentifier {
    pub fn new() -> Self {
        tracing::info!("Initializing whatlang language identifier");
        Self {
            detector: Detector::new(),
        }
    }
}

impl Default for WhatlangIdentifier {
    fn default() -> Self {
        Self::new()
    }
}

impl LanguageIdentifier for WhatlangIdentifier {
    fn classify(&self, text: &str) -> LanguageGuess {
        match self.detector.detect(text) {
            Some(info) => {
                let code = match info.lang() {
                    Lang::Eng => "en",
                    Lang::Deu => "de",
                    other => other.code(),
                };
                LanguageGuess {
                    code: code.to_string(),
                    confidence: info.confidence(),
                }
            }
            None => LanguageGuess::unknown(),
        }
    }
}
