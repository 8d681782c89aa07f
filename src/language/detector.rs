use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

use super::identifier::LanguageIdentifier;

const GERMAN_CHARS: [char; 4] = ['ä', 'ö', 'ü', 'ß'];
const GERMAN_MARKER_WORDS: [&str; 4] = ["ich", "du", "wir", "sein"];
const CLASSIFIER_CONFIDENCE_THRESHOLD: f64 = 0.8;
const GERMAN_INDICATOR_THRESHOLD: usize = 2;

/// The two languages the service translates between.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    English,
    German,
}

impl Language {
    pub fn code(&self) -> &'static str {
        match self {
            Language::English => "en",
            Language::German => "de",
        }
    }

    pub fn counterpart(&self) -> Language {
        match self {
            Language::English => Language::German,
            Language::German => Language::English,
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Source and target language of one request; always complementary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LanguagePair {
    pub source: Language,
    pub target: Language,
}

impl LanguagePair {
    pub fn from_source(source: Language) -> Self {
        Self {
            source,
            target: source.counterpart(),
        }
    }

    /// Upper-case label such as `EN-DE`
    pub fn label(&self) -> String {
        format!(
            "{}-{}",
            self.source.code().to_uppercase(),
            self.target.code().to_uppercase()
        )
    }
}

/// German/English detector combining a statistical guess with character and word heuristics.
///
/// Anything that does not collect at least two German indicators is treated as English.
pub struct LanguageDetector {
    identifier: Arc<dyn LanguageIdentifier>,
}

impl LanguageDetector {
    pub fn new(identifier: Arc<dyn LanguageIdentifier>) -> Self {
        Self { identifier }
    }

    pub fn detect(&self, text: &str) -> Language {
        let text_lower = text.to_lowercase();
        let guess = self.identifier.classify(text);

        let has_german_chars = text_lower.chars().any(|c| GERMAN_CHARS.contains(&c));

        let tokens: HashSet<&str> = text_lower.split_whitespace().collect();
        let marker_hits = GERMAN_MARKER_WORDS
            .iter()
            .filter(|word| tokens.contains(*word))
            .count();
        let has_marker_words = marker_hits > 1;

        let classifier_says_german =
            guess.code == "de" && guess.confidence > CLASSIFIER_CONFIDENCE_THRESHOLD;

        let indicators = [has_german_chars, has_marker_words, classifier_says_german]
            .iter()
            .filter(|hit| **hit)
            .count();

        let language = if indicators >= GERMAN_INDICATOR_THRESHOLD {
            Language::German
        } else {
            Language::English
        };

        debug!(
            "Language detection: guess={}({:.2}) chars={} words={} -> {}",
            guess.code, guess.confidence, has_german_chars, marker_hits, language
        );

        language
    }

    pub fn detect_pair(&self, text: &str) -> LanguagePair {
        LanguagePair::from_source(self.detect(text))
    }
}
