use std::io;

use log::warn;

use crate::{
    config::Settings,
    playback::input::{ask, is_yes, CommandInput},
    speech::{SpeechEngine, Utterance},
    voices::{VoiceCatalog, VoiceDescriptor},
};

const SAMPLE_TEXT: &str = "Hello! This is how I will sound when reading your PDF.";

enum Screen {
    Main,
    AllVoices,
    Languages,
    LanguageVoices(String),
    Confirm(VoiceDescriptor),
}

enum Choice {
    Back,
    Index(usize),
    Closed,
}

/// Walk the user through picking a voice. `Ok(None)` keeps the engine default;
/// so does an empty catalog or the end of input.
pub fn select_voice<E, I>(
    engine: &E,
    input: &mut I,
    settings: &Settings,
) -> io::Result<Option<String>>
where
    E: SpeechEngine,
    I: CommandInput + ?Sized,
{
    let catalog = VoiceCatalog::query(engine);
    if catalog.is_empty() {
        println!("No voices available or unable to detect voices");
        return Ok(None);
    }
    println!(
        "Found {} voices in {} languages",
        catalog.len(),
        catalog.language_count()
    );

    let mut screen = Screen::Main;
    loop {
        screen = match screen {
            Screen::Main => {
                println!("\nLanguage Selection:");
                println!("1. View all voices grouped by language");
                println!("2. Select by language first");
                println!("3. Use default voice");
                match ask(input, "\nChoose option (1-3): ")?.as_deref().map(str::trim) {
                    Some("1") => {
                        print_grouped(&catalog);
                        Screen::AllVoices
                    }
                    Some("2") => Screen::Languages,
                    Some("3") | None => {
                        println!("Using default system voice");
                        return Ok(None);
                    }
                    Some(_) => {
                        println!("Please enter 1, 2, or 3");
                        Screen::Main
                    }
                }
            }
            Screen::AllVoices => {
                let voices = catalog.grouped_order();
                let question = format!("\nSelect voice (1-{}) or 'back': ", voices.len());
                match choose(input, &question, voices.len())? {
                    Choice::Back => Screen::Main,
                    Choice::Index(i) => Screen::Confirm(voices[i].clone()),
                    Choice::Closed => return Ok(None),
                }
            }
            Screen::Languages => {
                let languages = catalog.languages();
                println!("\nAvailable Languages:");
                println!("{}", "-".repeat(30));
                for (i, language) in languages.iter().enumerate() {
                    let count = catalog.voices_for(language).len();
                    println!("{:2}. {language} ({count} {})", i + 1, plural(count));
                }
                let question = format!("\nSelect language (1-{}) or 'back': ", languages.len());
                match choose(input, &question, languages.len())? {
                    Choice::Back => Screen::Main,
                    Choice::Index(i) => Screen::LanguageVoices(languages[i].to_string()),
                    Choice::Closed => return Ok(None),
                }
            }
            Screen::LanguageVoices(language) => {
                let voices = catalog.voices_for(&language);
                println!("\n{language} Voices:");
                println!("{}", "-".repeat(40));
                for (i, voice) in voices.iter().enumerate() {
                    println!("{}. {}{}", i + 1, voice.name, voice.additional_languages());
                }
                let question = format!("\nSelect voice (1-{}) or 'back': ", voices.len());
                match choose(input, &question, voices.len())? {
                    Choice::Back => Screen::Languages,
                    Choice::Index(i) => Screen::Confirm(voices[i].clone()),
                    Choice::Closed => return Ok(None),
                }
            }
            Screen::Confirm(voice) => {
                println!("Selected voice: {}", voice.name);
                println!("Testing selected voice...");
                let sample = Utterance {
                    text: SAMPLE_TEXT,
                    rate: settings.rate,
                    volume: settings.volume,
                    voice: Some(&voice.id),
                };
                if let Err(err) = engine.speak(&sample) {
                    warn!("voice sample for {} failed: {err}", voice.id);
                    println!("Could not play a sample of this voice: {err}");
                }
                if is_yes(ask(input, "Keep this voice? (y/n): ")?.as_deref()) {
                    return Ok(Some(voice.id));
                }
                println!("Let's try another voice...\n");
                Screen::Main
            }
        };
    }
}

fn print_grouped(catalog: &VoiceCatalog) {
    println!("\nAvailable Voices (Grouped by Language):");
    println!("{}", "=".repeat(60));
    let mut number = 1;
    for (language, voices) in catalog.grouped() {
        println!("\n{language} ({} {})", voices.len(), plural(voices.len()));
        println!("{}", "-".repeat(40));
        for voice in voices {
            println!("{number:2}. {}{}", voice.name, voice.additional_languages());
            number += 1;
        }
    }
    println!(
        "\nTotal: {} voices in {} language groups",
        catalog.len(),
        catalog.language_count()
    );
}

fn choose<I: CommandInput + ?Sized>(
    input: &mut I,
    question: &str,
    count: usize,
) -> io::Result<Choice> {
    loop {
        let Some(answer) = ask(input, question)? else {
            return Ok(Choice::Closed);
        };
        let answer = answer.trim().to_lowercase();
        if answer == "back" {
            return Ok(Choice::Back);
        }
        match answer.parse::<usize>() {
            Ok(n) if (1..=count).contains(&n) => return Ok(Choice::Index(n - 1)),
            Ok(_) => println!("Please enter a number between 1 and {count}"),
            Err(_) => println!("Please enter a valid number or 'back'"),
        }
    }
}

fn plural(count: usize) -> &'static str {
    if count == 1 {
        "voice"
    } else {
        "voices"
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;
    use crate::{
        playback::input::ScriptedInput,
        speech::{EngineVoice, SpeechError},
    };

    struct MenuEngine {
        voices: Vec<EngineVoice>,
        samples: RefCell<Vec<String>>,
    }

    impl MenuEngine {
        fn new() -> Self {
            let voice = |id: &str, name: &str, tag: &str| EngineVoice {
                id: id.into(),
                name: name.into(),
                languages: vec![tag.into()],
            };
            Self {
                voices: vec![
                    voice("fr-fr", "French", "fr_FR"),
                    voice("en-us", "American", "en_US"),
                    voice("en-gb", "British", "en_GB"),
                    voice("en-us-2", "American Two", "en_US"),
                ],
                samples: RefCell::new(vec![]),
            }
        }
    }

    impl SpeechEngine for MenuEngine {
        fn speak(&self, utterance: &Utterance<'_>) -> Result<(), SpeechError> {
            self.samples
                .borrow_mut()
                .push(utterance.voice.unwrap_or_default().to_string());
            Ok(())
        }

        fn voices(&self) -> Result<Vec<EngineVoice>, SpeechError> {
            Ok(self.voices.clone())
        }
    }

    fn run(engine: &MenuEngine, lines: &[&str]) -> Option<String> {
        let mut input = ScriptedInput::new().lines(lines.iter().copied());
        select_voice(engine, &mut input, &Settings::default()).unwrap()
    }

    #[test]
    fn selects_by_language_then_voice() {
        let engine = MenuEngine::new();
        // Languages sort as English (UK), English (US), French (France).
        let voice = run(&engine, &["2", "2", "2", "y"]);
        assert_eq!(voice.as_deref(), Some("en-us-2"));
        assert_eq!(*engine.samples.borrow(), vec!["en-us-2"]);
    }

    #[test]
    fn numbers_all_voices_in_grouped_order() {
        let engine = MenuEngine::new();
        let voice = run(&engine, &["1", "1", "yes"]);
        assert_eq!(voice.as_deref(), Some("en-gb"));
    }

    #[test]
    fn default_voice_option() {
        let engine = MenuEngine::new();
        assert_eq!(run(&engine, &["3"]), None);
        assert!(engine.samples.borrow().is_empty());
    }

    #[test]
    fn rejecting_a_voice_returns_to_menu() {
        let engine = MenuEngine::new();
        let voice = run(&engine, &["1", "4", "n", "1", "2", "y"]);
        assert_eq!(voice.as_deref(), Some("en-us"));
        assert_eq!(*engine.samples.borrow(), vec!["fr-fr", "en-us"]);
    }

    #[test]
    fn back_and_invalid_entries_are_handled() {
        let engine = MenuEngine::new();
        let voice = run(
            &engine,
            &["9", "2", "abc", "7", "3", "back", "back", "2", "1", "1", "y"],
        );
        assert_eq!(voice.as_deref(), Some("en-gb"));
    }

    #[test]
    fn end_of_input_keeps_default() {
        let engine = MenuEngine::new();
        assert_eq!(run(&engine, &["2"]), None);
        assert_eq!(run(&engine, &[]), None);
    }

    #[test]
    fn empty_catalog_skips_menu() {
        let engine = MenuEngine {
            voices: vec![],
            samples: RefCell::new(vec![]),
        };
        let mut input = ScriptedInput::new().lines(["1"]);
        assert_eq!(
            select_voice(&engine, &mut input, &Settings::default()).unwrap(),
            None
        );
        assert_eq!(input.read_line().unwrap().as_deref(), Some("1"));
    }

    #[test]
    fn interrupt_is_propagated() {
        let engine = MenuEngine::new();
        let mut input = ScriptedInput::new();
        input.interrupt_when_exhausted = true;
        let err = select_voice(&engine, &mut input, &Settings::default()).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::Interrupted);
    }
}
