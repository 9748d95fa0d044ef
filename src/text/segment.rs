use once_cell::sync::Lazy;
use regex::Regex;

/// Fragments at or below this many characters (after trimming) are dropped.
pub const MIN_SENTENCE_CHARS: usize = 5;

static SENTENCE_END: Lazy<Regex> = Lazy::new(|| Regex::new(r"[.!?]+").unwrap());

/// Split extracted text into sentences ready for playback.
///
/// Whitespace runs (newlines included) collapse to single spaces, the text is
/// cut after every run of `.`, `!` or `?`, and the punctuation stays attached
/// to the sentence it closes. Text after the last punctuation run is not a
/// sentence and is discarded. An empty result means there is nothing to read.
pub fn segment(input: &str) -> Vec<String> {
    let normalized = super::normalize_whitespace(input);
    let mut sentences = Vec::new();
    let mut start = 0;

    for mat in SENTENCE_END.find_iter(&normalized) {
        let mut sentence = normalized[start..mat.start()].trim().to_string();
        sentence.push_str(mat.as_str());
        start = mat.end();

        if sentence.trim().chars().count() > MIN_SENTENCE_CHARS {
            sentences.push(sentence);
        }
    }

    sentences
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_terminal_punctuation() {
        let sentences = segment("Hello world. This is a test! Short. Done now?");
        assert_eq!(
            sentences,
            vec!["Hello world.", "This is a test!", "Short.", "Done now?"]
        );
    }

    #[test]
    fn drops_fragments_at_the_length_boundary() {
        // "Tiny." is five characters, "Short." is six.
        let sentences = segment("Tiny. Short. Ok!");
        assert_eq!(sentences, vec!["Short."]);
    }

    #[test]
    fn keeps_punctuation_runs_together() {
        let sentences = segment("Wait for it... What?! Really??");
        assert_eq!(sentences, vec!["Wait for it...", "What?!", "Really??"]);
    }

    #[test]
    fn collapses_newlines_and_spaces() {
        let sentences = segment("First  line\ncontinues\r\n here.\n\nSecond\tone!");
        assert_eq!(sentences, vec!["First line continues here.", "Second one!"]);
    }

    #[test]
    fn unpunctuated_text_yields_at_most_one_sentence() {
        assert!(segment("A heading without any full stop").len() <= 1);
        assert!(segment("tiny").is_empty());
        assert!(segment("").is_empty());
        assert!(segment("   \n\t ").is_empty());
    }

    #[test]
    fn trailing_fragment_without_punctuation_is_dropped() {
        let sentences = segment("The end is near. Page 12");
        assert_eq!(sentences, vec!["The end is near."]);
    }

    #[test]
    fn counts_characters_not_bytes() {
        // Four accented letters plus the full stop: ten bytes, five characters.
        assert!(segment("ÉÀÜÖ.").is_empty());
        assert_eq!(segment("Olá, são.").len(), 1);
    }

    #[test]
    fn never_emits_short_sentences() {
        let inputs = [
            "a. b. c. d.",
            "... !!! ???",
            "One. Two. Three. Four five six. Seven!",
            "x.y.z.w.v.u.t.",
            "Mr. Smith went to Washington. He stayed.",
        ];
        for input in inputs {
            for sentence in segment(input) {
                assert!(
                    sentence.trim().chars().count() > MIN_SENTENCE_CHARS,
                    "{sentence:?} from {input:?}"
                );
            }
        }
    }
}
