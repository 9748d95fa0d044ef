//! The interactive front end: load the PDF, pick a voice, confirm, then hand
//! the sentences to the playback controller.

mod voice_menu;

use std::{io, path::Path};

use log::{info, warn};
use thiserror::Error;

use crate::{
    config::Settings,
    document::{self, DocumentError},
    playback::{
        input::{ask, is_yes},
        CommandInput, Controller, Outcome, PlaybackError, PlaybackReport, CONTROLS_HELP,
    },
    speech::{SpeechEngine, SpeechError},
    state::SessionState,
    text,
    util::interrupt::InterruptFlag,
};

pub use voice_menu::select_voice;

#[derive(Debug, Error)]
pub enum ReaderError {
    #[error(transparent)]
    Document(#[from] DocumentError),
    #[error(transparent)]
    Playback(#[from] PlaybackError),
    #[error("failed to read input: {0}")]
    Input(#[from] io::Error),
}

/// How a session ended without an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    /// The document had no text, or no complete sentences.
    NothingToRead,
    /// No speech engine; the document was loaded but not read.
    EngineUnavailable,
    /// The user answered no at the confirmation prompt.
    Cancelled,
    Interrupted,
    Played(PlaybackReport),
}

pub struct Session<E, I> {
    settings: Settings,
    engine: Result<E, SpeechError>,
    input: I,
    interrupt: InterruptFlag,
}

impl<E: SpeechEngine, I: CommandInput> Session<E, I> {
    pub fn new(
        settings: Settings,
        engine: Result<E, SpeechError>,
        input: I,
        interrupt: InterruptFlag,
    ) -> Self {
        Self {
            settings,
            engine,
            input,
            interrupt,
        }
    }

    pub fn run(&mut self, path: &Path) -> Result<SessionEnd, ReaderError> {
        println!("PDF Text-to-Speech Reader");
        println!("{}", "=".repeat(60));
        match &self.engine {
            Ok(_) => println!("Speech engine ready"),
            Err(err) => {
                warn!("speech engine unavailable: {err}");
                println!("Speech engine failed to initialize: {err}");
            }
        }

        println!("\nReading PDF: {}", path.display());
        let document = match document::load(path) {
            Ok(document) => document,
            Err(err @ DocumentError::NoExtractableText(_)) => {
                println!("Warning: {err}");
                println!("No text to read. Exiting.");
                return Ok(SessionEnd::NothingToRead);
            }
            Err(err) => return Err(err.into()),
        };

        println!("Total pages: {}", document.page_count);
        if !document.failed_pages.is_empty() {
            let pages: Vec<String> = document.failed_pages.iter().map(u32::to_string).collect();
            println!("Could not extract text from page(s): {}", pages.join(", "));
        }
        println!("Extracted {} characters", document.char_count());

        self.narrate(&document.text)
    }

    /// Everything after loading: segment, voice menu, preview, confirmation
    /// and playback.
    pub fn narrate(&mut self, document_text: &str) -> Result<SessionEnd, ReaderError> {
        match self.narrate_inner(document_text) {
            Err(ReaderError::Input(err)) if err.kind() == io::ErrorKind::Interrupted => {
                println!("\n\nInterrupted. Goodbye!");
                Ok(SessionEnd::Interrupted)
            }
            result => result,
        }
    }

    fn narrate_inner(&mut self, document_text: &str) -> Result<SessionEnd, ReaderError> {
        let sentences = text::segment(document_text);
        if sentences.is_empty() {
            println!("No complete sentences found. Nothing to read.");
            return Ok(SessionEnd::NothingToRead);
        }

        let engine = match &self.engine {
            Ok(engine) => engine,
            Err(_) => {
                println!("Skipping reading: no speech engine available.");
                return Ok(SessionEnd::EngineUnavailable);
            }
        };

        println!("\nVoice Selection");
        println!("{}", "-".repeat(20));
        let voice = select_voice(engine, &mut self.input, &self.settings)?;

        let char_count = document_text.chars().count();
        println!(
            "\nText preview (first {} characters):",
            self.settings.preview_chars
        );
        println!("{}", "-".repeat(50));
        println!("{}", text::preview(document_text, self.settings.preview_chars));
        println!("{}", "-".repeat(50));

        let question = format!("\nReady to read {char_count} characters? (y/n): ");
        if !is_yes(ask(&mut self.input, &question)?.as_deref()) {
            println!("Reading cancelled.");
            return Ok(SessionEnd::Cancelled);
        }

        println!("\n{CONTROLS_HELP}");
        println!("{}", "-".repeat(50));
        println!("Prepared {} sentences for reading", sentences.len());
        println!("Starting to read... (type 'help' for commands)\n");
        info!(
            "reading {} sentences with voice {}",
            sentences.len(),
            voice.as_deref().unwrap_or("default")
        );

        let mut state = SessionState::new(
            sentences,
            self.settings.rate,
            self.settings.volume,
            voice,
        );
        let report = Controller::new(engine, &mut self.input, self.interrupt.clone())
            .with_sentence_gap(self.settings.sentence_gap())
            .run(&mut state)?;

        match report.outcome {
            Outcome::Finished => println!("\nThanks for using the PDF reader!"),
            Outcome::Stopped => println!("\nReading stopped."),
            Outcome::Interrupted => println!("\n\nInterrupted. Goodbye!"),
        }
        info!(
            "session ended: {:?} after {} sentences",
            report.outcome, report.sentences_spoken
        );
        Ok(SessionEnd::Played(report))
    }
}
