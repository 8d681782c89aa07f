use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use crate::error::AppError;

const SNIPPET_CHARS: usize = 150;

/// Accepted response shapes, tried in order. Each captures
/// (translation, example sentence, example gloss).
static RESPONSE_PATTERNS: Lazy<Vec<(&'static str, Regex)>> = Lazy::new(|| {
    [
        ("strict", r"(?is)Translation:\s*([^\n]+)\nExample:\s*([^(]+)\(([^)]+)"),
        ("unlabeled", r"(?is)([^\n]+)\n([^(]+)\(([^)]+)"),
        ("multiline", r"(?is)Translation:\s*([^\n]+).*?Example:\s*([^(]+)\(([^)]+)"),
    ]
    .into_iter()
    .map(|(name, pattern)| (name, Regex::new(pattern).expect("response pattern is valid")))
    .collect()
});

/// Translation and example sentence extracted from model output
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedResponse {
    pub translation: String,
    /// `<target-language sentence> (<gloss>)`
    pub example: String,
}

impl ParsedResponse {
    fn from_captures(caps: &Captures<'_>) -> Self {
        let translation = caps[1].trim().to_string();
        let example_target = caps[2].trim();
        let example_gloss = caps[3].trim();
        Self {
            translation,
            example: format!("{} ({})", example_target, example_gloss),
        }
    }

    /// The part of the example sentence before the parenthesised gloss.
    pub fn example_target(&self) -> &str {
        self.example
            .split('(')
            .next()
            .unwrap_or_default()
            .trim()
    }
}

/// Extract the translation and example from free-form model output.
pub fn parse_response(raw: &str) -> Result<ParsedResponse, AppError> {
    for (name, pattern) in RESPONSE_PATTERNS.iter() {
        if let Some(caps) = pattern.captures(raw) {
            tracing::debug!("Model response matched {} pattern", name);
            return Ok(ParsedResponse::from_captures(&caps));
        }
    }

    Err(AppError::Parse {
        snippet: raw.chars().take(SNIPPET_CHARS).collect(),
    })
}
