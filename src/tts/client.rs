use async_trait::async_trait;
use reqwest::Client;
use std::path::Path;
use tracing::debug;

use super::interface::TTSInterface;

const SENTENCE_BREAKS: [char; 5] = ['.', '!', '?', ';', ':'];
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0 Safari/537.36";

/// TTS client for the public Google Translate speech endpoint.
///
/// The endpoint only accepts short inputs, so text is split into chunks of at
/// most `max_chunk_chars` characters and the returned MP3 frames are concatenated.
pub struct GoogleTranslateTTS {
    client: Client,
    base_url: String,
    max_chunk_chars: usize,
}

impl GoogleTranslateTTS {
    pub fn new(base_url: String, max_chunk_chars: usize) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            max_chunk_chars: max_chunk_chars.max(1),
        }
    }

    async fn synthesize_chunk(&self, text: &str, language: &str) -> Result<Vec<u8>, anyhow::Error> {
        let response = self
            .client
            .get(format!("{}/translate_tts", self.base_url))
            .query(&[
                ("ie", "UTF-8"),
                ("client", "tw-ob"),
                ("tl", language),
                ("q", text),
            ])
            .header("User-Agent", USER_AGENT)
            .header("Referer", "https://translate.google.com/")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            anyhow::bail!("TTS synthesis failed ({}) for chunk: {}", status, text);
        }

        Ok(response.bytes().await?.to_vec())
    }
}

#[async_trait]
impl TTSInterface for GoogleTranslateTTS {
    async fn generate_audio(
        &self,
        text: &str,
        language: &str,
        output_path: &Path,
    ) -> Result<(), anyhow::Error> {
        if text.trim().is_empty() {
            anyhow::bail!("No text to speak");
        }

        let chunks = chunk_text(text, self.max_chunk_chars);
        debug!("Synthesizing {} chunk(s) in {}", chunks.len(), language);

        let mut audio = Vec::new();
        for chunk in &chunks {
            audio.extend(self.synthesize_chunk(chunk, language).await?);
        }

        tokio::fs::write(output_path, &audio).await?;
        debug!("Wrote {} bytes of audio to {:?}", audio.len(), output_path);
        Ok(())
    }
}

/// Split text into chunks of at most `max_chars` characters.
///
/// Text that already fits is returned as a single trimmed chunk. Longer text is
/// cut after sentence punctuation that is followed by whitespace, so decimals
/// and clock times stay intact, then at word boundaries, then hard cuts.
pub fn chunk_text(text: &str, max_chars: usize) -> Vec<String> {
    let max_chars = max_chars.max(1);
    let text = text.trim();
    if text.is_empty() {
        return Vec::new();
    }
    if char_len(text) <= max_chars {
        return vec![text.to_string()];
    }

    let mut chunks = Vec::new();
    let mut current = String::new();

    for sentence in split_sentences(text) {
        if char_len(&current) + char_len(sentence) <= max_chars {
            current.push_str(sentence);
            continue;
        }
        flush(&mut chunks, &mut current);
        if char_len(sentence) <= max_chars {
            current.push_str(sentence);
            continue;
        }

        for word in sentence.split_inclusive(char::is_whitespace) {
            if char_len(&current) + char_len(word) <= max_chars {
                current.push_str(word);
            } else if char_len(word) <= max_chars {
                flush(&mut chunks, &mut current);
                current.push_str(word);
            } else {
                flush(&mut chunks, &mut current);
                let chars: Vec<char> = word.chars().collect();
                for piece in chars.chunks(max_chars) {
                    current = piece.iter().collect();
                    flush(&mut chunks, &mut current);
                }
            }
        }
    }

    flush(&mut chunks, &mut current);
    chunks
}

/// Slices of `text` ending after a sentence break and its trailing whitespace.
fn split_sentences(text: &str) -> Vec<&str> {
    let mut sentences = Vec::new();
    let mut start = 0;
    let mut chars = text.char_indices().peekable();

    while let Some((_, c)) = chars.next() {
        if !SENTENCE_BREAKS.contains(&c) {
            continue;
        }
        if !matches!(chars.peek(), Some((_, next)) if next.is_whitespace()) {
            continue;
        }
        while let Some((_, next)) = chars.peek() {
            if !next.is_whitespace() {
                break;
            }
            chars.next();
        }
        let end = chars.peek().map_or(text.len(), |(i, _)| *i);
        sentences.push(&text[start..end]);
        start = end;
    }
    if start < text.len() {
        sentences.push(&text[start..]);
    }
    sentences
}

fn char_len(s: &str) -> usize {
    s.chars().count()
}

fn flush(chunks: &mut Vec<String>, current: &mut String) {
    let chunk = current.trim();
    if !chunk.is_empty() {
        chunks.push(chunk.to_string());
    }
    current.clear();
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn short_text_is_one_chunk() {
        assert_eq!(
            chunk_text("Hallo Welt. Wie geht es dir?", 100),
            vec!["Hallo Welt. Wie geht es dir?"]
        );
    }

    #[test]
    fn long_sentences_fall_back_to_words() {
        assert_eq!(
            chunk_text("Hallo Welt. Wie geht es dir?", 12),
            vec!["Hallo Welt.", "Wie geht es", "dir?"]
        );
    }

    #[test]
    fn oversized_words_are_cut() {
        assert_eq!(
            chunk_text("Donaudampfschifffahrt", 10),
            vec!["Donaudampf", "schifffahr", "t"]
        );
    }

    #[test]
    fn short_text_keeps_decimals_and_times() {
        assert_eq!(
            chunk_text("Der Preis ist 3.50 Euro.", 100),
            vec!["Der Preis ist 3.50 Euro."]
        );
        assert_eq!(
            chunk_text("  Der Zug fährt um 10:30 ab.  ", 100),
            vec!["Der Zug fährt um 10:30 ab."]
        );
    }

    #[test]
    fn long_text_splits_only_at_sentence_ends() {
        assert_eq!(
            chunk_text("Es kostet 3.50 Euro. Wir treffen uns um 10:30 Uhr.", 30),
            vec!["Es kostet 3.50 Euro.", "Wir treffen uns um 10:30 Uhr."]
        );
    }

    #[test]
    fn chunk_limit_counts_characters_not_bytes() {
        assert_eq!(chunk_text("Grüße äöü", 9), vec!["Grüße äöü"]);
    }

    #[tokio::test]
    async fn writes_concatenated_audio() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/translate_tts"))
            .and(query_param("tl", "de"))
            .and(query_param("client", "tw-ob"))
            .and(query_param("q", "Hallo Welt."))
            .and(header("Referer", "https://translate.google.com/"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(b"AAA".to_vec()))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/translate_tts"))
            .and(query_param("q", "Wie geht es dir?"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(b"BBB".to_vec()))
            .expect(1)
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("out.mp3");
        let tts = GoogleTranslateTTS::new(server.uri(), 16);
        tts.generate_audio("Hallo Welt. Wie geht es dir?", "de", &output)
            .await
            .unwrap();

        assert_eq!(std::fs::read(&output).unwrap(), b"AAABBB");
    }

    #[tokio::test]
    async fn http_failure_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(429))
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("out.mp3");
        let tts = GoogleTranslateTTS::new(server.uri(), 100);
        let err = tts.generate_audio("Hello", "en", &output).await.unwrap_err();
        assert!(err.to_string().contains("429"));
        assert!(!output.exists());
    }

    #[tokio::test]
    async fn empty_text_is_rejected() {
        let tts = GoogleTranslateTTS::new("http://127.0.0.1:9".to_string(), 100);
        let dir = tempfile::tempdir().unwrap();
        assert!(tts
            .generate_audio("   ", "en", &dir.path().join("x.mp3"))
            .await
            .is_err());
    }
}
