pub mod identifier;
pub mod detector;

pub use identifier::{LanguageGuess, LanguageIdentifier, WhatlangIdentifier};
pub use detector::{Language, LanguageDetector, LanguagePair};
