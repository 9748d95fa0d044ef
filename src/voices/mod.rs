//! Voice catalog grouped by language.

pub mod language;

use std::collections::BTreeMap;

use log::{info, warn};

use crate::speech::SpeechEngine;

pub use language::{language_label, primary_language};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoiceDescriptor {
    /// Position in the engine's listing.
    pub index: usize,
    pub id: String,
    pub name: String,
    pub languages: Vec<String>,
}

impl VoiceDescriptor {
    pub fn primary_language(&self) -> String {
        primary_language(self.languages.as_slice())
    }

    /// ` (also: French (France), DE (AT))`, empty for single-language voices.
    pub fn additional_languages(&self) -> String {
        if self.languages.len() <= 1 {
            return String::new();
        }
        let others: Vec<String> = self
            .languages
            .iter()
            .skip(1)
            .take(2)
            .map(|tag| language_label(tag))
            .collect();
        let ellipsis = if self.languages.len() > 3 { "..." } else { "" };
        format!(" (also: {}){ellipsis}", others.join(", "))
    }
}

#[derive(Debug, Default)]
pub struct VoiceCatalog {
    voices: Vec<VoiceDescriptor>,
    by_language: BTreeMap<String, Vec<usize>>,
}

impl VoiceCatalog {
    /// Ask the engine for its voices once. An engine that cannot list voices
    /// yields an empty catalog.
    pub fn query<E: SpeechEngine>(engine: &E) -> Self {
        match engine.voices() {
            Ok(voices) => {
                let catalog = Self::from_descriptors(
                    voices
                        .into_iter()
                        .enumerate()
                        .map(|(index, voice)| VoiceDescriptor {
                            index,
                            name: if voice.name.trim().is_empty() {
                                format!("Voice {}", index + 1)
                            } else {
                                voice.name
                            },
                            id: voice.id,
                            languages: voice.languages,
                        })
                        .collect(),
                );
                info!(
                    "found {} voices in {} languages",
                    catalog.len(),
                    catalog.language_count()
                );
                catalog
            }
            Err(err) => {
                warn!("unable to list voices: {err}");
                Self::default()
            }
        }
    }

    pub fn from_descriptors(voices: Vec<VoiceDescriptor>) -> Self {
        let mut by_language: BTreeMap<String, Vec<usize>> = BTreeMap::new();
        for (position, voice) in voices.iter().enumerate() {
            by_language
                .entry(voice.primary_language())
                .or_default()
                .push(position);
        }
        Self {
            voices,
            by_language,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.voices.is_empty()
    }

    pub fn len(&self) -> usize {
        self.voices.len()
    }

    pub fn language_count(&self) -> usize {
        self.by_language.len()
    }

    /// Voices in engine order.
    #[cfg(test)]
    pub fn list(&self) -> &[VoiceDescriptor] {
        &self.voices
    }

    /// Language labels in sorted order.
    pub fn languages(&self) -> Vec<&str> {
        self.by_language.keys().map(String::as_str).collect()
    }

    pub fn voices_for(&self, language: &str) -> Vec<&VoiceDescriptor> {
        self.by_language
            .get(language)
            .map(|positions| positions.iter().map(|&i| &self.voices[i]).collect())
            .unwrap_or_default()
    }

    /// Label → voices, iterated in sorted label order.
    pub fn grouped(&self) -> impl Iterator<Item = (&str, Vec<&VoiceDescriptor>)> + '_ {
        self.by_language.iter().map(|(language, positions)| {
            (
                language.as_str(),
                positions.iter().map(|&i| &self.voices[i]).collect(),
            )
        })
    }

    /// Voices in the order they are numbered by the grouped listing.
    pub fn grouped_order(&self) -> Vec<&VoiceDescriptor> {
        self.grouped().flat_map(|(_, voices)| voices).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::speech::{EngineVoice, SpeechError, Utterance};

    struct ListingEngine(Result<Vec<EngineVoice>, ()>);

    impl SpeechEngine for ListingEngine {
        fn speak(&self, _utterance: &Utterance<'_>) -> Result<(), SpeechError> {
            Ok(())
        }

        fn voices(&self) -> Result<Vec<EngineVoice>, SpeechError> {
            self.0
                .clone()
                .map_err(|_| SpeechError::Unavailable("no engine".into()))
        }
    }

    fn voice(id: &str, name: &str, languages: &[&str]) -> EngineVoice {
        EngineVoice {
            id: id.into(),
            name: name.into(),
            languages: languages.iter().map(|tag| tag.to_string()).collect(),
        }
    }

    fn sample_engine() -> ListingEngine {
        ListingEngine(Ok(vec![
            voice("samantha", "Samantha", &["en_US"]),
            voice("thomas", "Thomas", &["fr_FR"]),
            voice("alex", "Alex", &["en_US", "en_GB", "fr_FR", "de_DE"]),
            voice("daniel", "Daniel", &["en_GB"]),
            voice("mystery", "", &[]),
        ]))
    }

    #[test]
    fn groups_voices_by_language_label() {
        let catalog = VoiceCatalog::query(&sample_engine());
        assert_eq!(catalog.len(), 5);
        assert_eq!(
            catalog.languages(),
            vec!["English (UK)", "English (US)", "French (France)", "Unknown"]
        );
        let us: Vec<&str> = catalog
            .voices_for("English (US)")
            .iter()
            .map(|voice| voice.id.as_str())
            .collect();
        assert_eq!(us, vec!["samantha", "alex"]);
    }

    #[test]
    fn grouped_order_follows_sorted_labels() {
        let catalog = VoiceCatalog::query(&sample_engine());
        let order: Vec<&str> = catalog
            .grouped_order()
            .iter()
            .map(|voice| voice.id.as_str())
            .collect();
        assert_eq!(order, vec!["daniel", "samantha", "alex", "thomas", "mystery"]);
    }

    #[test]
    fn fills_in_missing_names() {
        let catalog = VoiceCatalog::query(&sample_engine());
        assert_eq!(catalog.list()[4].name, "Voice 5");
        assert_eq!(catalog.list()[4].index, 4);
    }

    #[test]
    fn lists_additional_languages() {
        let catalog = VoiceCatalog::query(&sample_engine());
        assert_eq!(
            catalog.list()[2].additional_languages(),
            " (also: English (UK), French (France))..."
        );
        assert_eq!(catalog.list()[0].additional_languages(), "");
    }

    #[test]
    fn failing_engine_yields_empty_catalog() {
        let catalog = VoiceCatalog::query(&ListingEngine(Err(())));
        assert!(catalog.is_empty());
        assert!(catalog.languages().is_empty());
        assert!(catalog.voices_for("English (US)").is_empty());
    }
}
