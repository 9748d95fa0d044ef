use std::{
    ffi::OsString,
    io::{self, Write},
    process::{Command, Stdio},
    time::Instant,
};

use log::{debug, error, warn};

use super::{EngineVoice, SpeechEngine, SpeechError, Utterance};
use crate::util::engine_path::{self, EngineCommand};

/// Speaks through the `espeak-ng` (or `espeak`) command line tool.
///
/// A new process is started for every sentence with the rate, amplitude and
/// voice of that sentence, so no state carries over between calls.
#[derive(Debug, Clone)]
pub struct EspeakEngine {
    program: OsString,
    base_args: Vec<OsString>,
}

impl EspeakEngine {
    pub fn new(command: &EngineCommand) -> Self {
        let (program, base_args) = engine_path::command_to_args(command);
        Self { program, base_args }
    }

    /// Locate the engine, honouring a configured command line.
    pub fn resolve(configured: Option<&str>) -> Result<Self, SpeechError> {
        engine_path::resolve(configured)
            .map(|command| Self::new(&command))
            .map_err(|err| SpeechError::Unavailable(err.to_string()))
    }

    fn command(&self) -> Command {
        let mut command = Command::new(&self.program);
        command.args(&self.base_args);
        command
    }

    fn speech_arguments(command: &mut Command, utterance: &Utterance<'_>) {
        command.arg("-s");
        command.arg(utterance.rate.to_string());
        command.arg("-a");
        command.arg(amplitude(utterance.volume).to_string());
        if let Some(voice) = utterance.voice {
            command.arg("-v");
            command.arg(voice);
        }
        command.arg("--stdin");
    }
}

impl SpeechEngine for EspeakEngine {
    fn speak(&self, utterance: &Utterance<'_>) -> Result<(), SpeechError> {
        let start = Instant::now();
        let mut command = self.command();
        Self::speech_arguments(&mut command, utterance);
        let mut child = command
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()?;
        // An engine that rejects its arguments exits without reading stdin;
        // its exit status takes precedence over the failed write.
        let written = match child.stdin.take() {
            Some(mut stdin) => stdin.write_all(utterance.text.as_bytes()),
            None => Err(io::Error::new(
                io::ErrorKind::BrokenPipe,
                "engine stdin is not available",
            )),
        };
        let output = child.wait_with_output()?;

        if !output.status.success() {
            let status = output.status.code().unwrap_or(-1);
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            error!("espeak exited with status {status}: {stderr}");
            return Err(SpeechError::Failed { status, stderr });
        }
        if let Err(err) = written {
            warn!("engine exited cleanly but did not take the whole sentence: {err}");
            return Err(err.into());
        }

        debug!(
            "spoke {} chars at {} wpm in {} ms",
            utterance.text.chars().count(),
            utterance.rate,
            start.elapsed().as_millis()
        );
        Ok(())
    }

    fn voices(&self) -> Result<Vec<EngineVoice>, SpeechError> {
        let output = self.command().arg("--voices").output()?;
        if !output.status.success() {
            return Err(SpeechError::Failed {
                status: output.status.code().unwrap_or(-1),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        Ok(parse_voice_listing(&String::from_utf8_lossy(&output.stdout)))
    }
}

/// espeak amplitude runs 0-200 with 100 as the normal level.
fn amplitude(volume: f32) -> u32 {
    (volume.clamp(0.0, 1.0) * 100.0).round() as u32
}

/// Parse the table printed by `espeak-ng --voices`:
///
/// ```text
/// Pty Language       Age/Gender VoiceName          File                 Other Languages
///  5  en-us           --/M      English_(America)  gmw/en-US            (en 10)
/// ```
pub fn parse_voice_listing(listing: &str) -> Vec<EngineVoice> {
    let mut voices = Vec::new();
    for line in listing.lines() {
        let columns: Vec<&str> = line.split_whitespace().collect();
        if columns.len() < 5 || columns[0] == "Pty" {
            continue;
        }

        let mut languages = vec![locale_tag(columns[1])];
        for token in &columns[5..] {
            if let Some(code) = token.strip_prefix('(') {
                let tag = locale_tag(code.trim_end_matches(')'));
                if !languages.contains(&tag) {
                    languages.push(tag);
                }
            }
        }

        voices.push(EngineVoice {
            id: columns[1].to_string(),
            name: columns[3].replace('_', " "),
            languages,
        });
    }
    voices
}

/// `en-us` → `en_US`, `en-gb-scotland` → `en_GB-SCOTLAND`, `fr` → `fr`.
pub fn locale_tag(code: &str) -> String {
    match code.split_once('-') {
        Some((language, region)) => {
            format!("{}_{}", language.to_lowercase(), region.to_uppercase())
        }
        None => code.to_lowercase(),
    }
}
