//! Speech synthesis binding.
//!
//! [`SpeechEngine`] is the seam between the reader and the platform TTS. Each
//! call to [`SpeechEngine::speak`] receives the full [`Utterance`] settings and
//! must configure the engine from scratch, so a change of rate, volume or voice
//! between two sentences always reaches the next one. The default
//! implementation is [`EspeakEngine`], which runs one `espeak-ng` process per
//! sentence.

pub mod espeak;

use thiserror::Error;

pub use espeak::EspeakEngine;

#[derive(Debug, Error)]
pub enum SpeechError {
    #[error("speech engine unavailable: {0}")]
    Unavailable(String),
    #[error("failed to launch speech engine: {0}")]
    Spawn(#[from] std::io::Error),
    #[error("speech engine exited with status {status}: {stderr}")]
    Failed { status: i32, stderr: String },
}

/// One sentence together with the engine settings it must be spoken with.
#[derive(Debug, Clone, PartialEq)]
pub struct Utterance<'a> {
    pub text: &'a str,
    /// Words per minute.
    pub rate: u32,
    /// 0.0 (silent) to 1.0 (normal).
    pub volume: f32,
    pub voice: Option<&'a str>,
}

/// A voice as reported by the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineVoice {
    pub id: String,
    pub name: String,
    /// Locale tags such as `en_US`, most specific first.
    pub languages: Vec<String>,
}

pub trait SpeechEngine {
    /// Speak `utterance` and block until playback ends.
    fn speak(&self, utterance: &Utterance<'_>) -> Result<(), SpeechError>;

    /// List the voices installed for this engine.
    fn voices(&self) -> Result<Vec<EngineVoice>, SpeechError>;
}

impl<E: SpeechEngine + ?Sized> SpeechEngine for &E {
    fn speak(&self, utterance: &Utterance<'_>) -> Result<(), SpeechError> {
        (**self).speak(utterance)
    }

    fn voices(&self) -> Result<Vec<EngineVoice>, SpeechError> {
        (**self).voices()
    }
}
