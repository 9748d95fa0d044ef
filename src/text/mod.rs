//! Text preparation for playback.
//!
//! Turns the raw text extracted from a document into the sentence queue the
//! playback controller consumes, plus the short preview shown before reading.

pub mod segment;

pub use segment::segment;

/// Collapse every run of whitespace (newlines included) into one space.
pub fn normalize_whitespace(input: &str) -> String {
    input.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// First `max_chars` characters of `text` on a single line, with `...` appended
/// when the text was cut.
pub fn preview(text: &str, max_chars: usize) -> String {
    let flattened: String = text
        .chars()
        .map(|ch| if ch == '\n' || ch == '\r' { ' ' } else { ch })
        .collect();
    match flattened.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}...", &flattened[..cut]),
        None => flattened,
    }
}

/// Shorten a sentence for the progress line.
pub fn truncate(sentence: &str, max_chars: usize) -> String {
    match sentence.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}...", &sentence[..cut]),
        None => sentence.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_mixed_whitespace() {
        assert_eq!(normalize_whitespace("  a\n\nb \t c\r\n"), "a b c");
        assert_eq!(normalize_whitespace(""), "");
    }

    #[test]
    fn preview_keeps_short_text_intact() {
        assert_eq!(preview("Line one\nLine two", 200), "Line one Line two");
    }

    #[test]
    fn preview_cuts_on_character_boundaries() {
        let text = "ñ".repeat(10);
        assert_eq!(preview(&text, 4), "ññññ...");
    }

    #[test]
    fn truncate_marks_long_sentences() {
        assert_eq!(truncate("abcdef", 3), "abc...");
        assert_eq!(truncate("abc", 3), "abc");
    }
}
