use crate::language::{Language, LanguagePair};

/// Build the generation prompt for one translation request.
///
/// The worked example at the end pins the `Translation:` / `Example:` layout
/// that [`parse_response`](super::parser::parse_response) expects.
pub fn build_prompt(text: &str, pair: LanguagePair) -> String {
    let target_upper = pair.target.code().to_uppercase();
    let (sample_translation, sample_example) = match pair.target {
        Language::German => ("Hallo", "Hallo, wie geht es Ihnen? (Hello, how are you?)"),
        Language::English => ("Hello", "Hello, how are you? (Hallo, wie geht es Ihnen?)"),
    };

    format!(
        "**{label} Translation Request**\n\
         Input: \"{text}\"\n\
         \n\
         - Provide ONLY:\n\
         \x20 1. Direct translation\n\
         \x20 2. {target} example sentence\n\
         \x20 3. English translation of example in parentheses\n\
         \n\
         **Example Response:**\n\
         Translation: {sample_translation}\n\
         Example: {sample_example}",
        label = pair.label(),
        text = text,
        target = target_upper,
        sample_translation = sample_translation,
        sample_example = sample_example,
    )
}
