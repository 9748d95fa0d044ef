use std::{io, thread, time::Duration};

use log::{debug, info, warn};
use thiserror::Error;

use super::{
    command::{Command, CONTROLS_HELP},
    input::{self, CommandInput},
};
use crate::{
    speech::{SpeechEngine, SpeechError, Utterance},
    state::SessionState,
    text,
    util::interrupt::InterruptFlag,
};

/// Characters of the current sentence shown on the progress line.
const PROGRESS_CHARS: usize = 80;

#[derive(Debug, Error)]
pub enum PlaybackError {
    #[error("failed to speak sentence {sentence}: {source}")]
    Speech {
        sentence: usize,
        #[source]
        source: SpeechError,
    },
    #[error("failed to read command input: {0}")]
    Input(#[source] io::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Every sentence was spoken and the user declined to start over.
    Finished,
    /// `stop` or `quit`.
    Stopped,
    /// Ctrl+C.
    Interrupted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaybackReport {
    pub outcome: Outcome,
    pub sentences_spoken: usize,
    /// Times the document was started from the top, counting the first.
    pub passes: usize,
}

/// Drives a [`SessionState`] sentence by sentence.
///
/// Speech calls block; commands are picked up between sentences through
/// [`CommandInput::try_read_line`] and, while paused, through blocking reads.
/// Stop and quit take effect at the next of those check points, never in the
/// middle of a sentence.
pub struct Controller<E, I> {
    engine: E,
    input: I,
    interrupt: InterruptFlag,
    sentence_gap: Duration,
}

impl<E: SpeechEngine, I: CommandInput> Controller<E, I> {
    pub fn new(engine: E, input: I, interrupt: InterruptFlag) -> Self {
        Self {
            engine,
            input,
            interrupt,
            sentence_gap: Duration::from_millis(300),
        }
    }

    pub fn with_sentence_gap(mut self, gap: Duration) -> Self {
        self.sentence_gap = gap;
        self
    }

    /// Read the whole sentence list, offering to start over each time the end
    /// is reached.
    pub fn run(&mut self, state: &mut SessionState) -> Result<PlaybackReport, PlaybackError> {
        let mut report = PlaybackReport {
            outcome: Outcome::Finished,
            sentences_spoken: 0,
            passes: 0,
        };
        if state.is_empty() {
            return Ok(report);
        }

        loop {
            report.passes += 1;
            report.outcome = self.read_through(state, &mut report.sentences_spoken)?;
            if report.outcome != Outcome::Finished {
                return Ok(report);
            }

            println!("\nFinished reading the entire document!");
            match input::ask(&mut self.input, "\nWould you like to restart reading? (y/n): ") {
                Ok(answer) if input::is_yes(answer.as_deref()) => {
                    println!("\nRestarting from the beginning...");
                    state.rewind();
                }
                Ok(_) => return Ok(report),
                Err(err) if err.kind() == io::ErrorKind::Interrupted => {
                    report.outcome = Outcome::Interrupted;
                    return Ok(report);
                }
                Err(err) => return Err(PlaybackError::Input(err)),
            }
        }
    }

    fn read_through(
        &mut self,
        state: &mut SessionState,
        spoken: &mut usize,
    ) -> Result<Outcome, PlaybackError> {
        while !state.stop_requested() {
            if self.interrupt.is_set() {
                return Ok(Outcome::Interrupted);
            }

            if state.restart_requested() {
                state.rewind();
                println!("Restarted from beginning");
                continue;
            }

            if state.is_paused() {
                if !self.wait_while_paused(state)? {
                    return Ok(Outcome::Interrupted);
                }
                continue;
            }

            let Some(sentence) = state.current_sentence() else {
                break;
            };
            println!(
                "\n[{}/{}] Speaking: {}",
                state.index() + 1,
                state.len(),
                text::truncate(sentence, PROGRESS_CHARS)
            );

            let utterance = Utterance {
                text: sentence,
                rate: state.rate(),
                volume: state.volume(),
                voice: state.voice(),
            };
            if let Err(err) = self.engine.speak(&utterance) {
                if self.interrupt.is_set() {
                    return Ok(Outcome::Interrupted);
                }
                return Err(PlaybackError::Speech {
                    sentence: state.index() + 1,
                    source: err,
                });
            }
            *spoken += 1;
            state.advance();

            if self.interrupt.is_set() {
                return Ok(Outcome::Interrupted);
            }

            // Every line typed during the sentence takes effect now.
            loop {
                match self.input.try_read_line() {
                    Ok(Some(line)) => self.apply(&Command::parse(&line), state),
                    Ok(None) => break,
                    Err(err) if err.kind() == io::ErrorKind::Interrupted => {
                        return Ok(Outcome::Interrupted);
                    }
                    Err(err) => return Err(PlaybackError::Input(err)),
                }
            }

            if !state.is_finished() && !state.stop_requested() && !self.sentence_gap.is_zero() {
                thread::sleep(self.sentence_gap);
            }
        }

        Ok(if state.stop_requested() {
            Outcome::Stopped
        } else {
            Outcome::Finished
        })
    }

    /// Block on typed commands until the pause is lifted or a stop or restart
    /// is requested. Returns `false` on Ctrl+C.
    fn wait_while_paused(&mut self, state: &mut SessionState) -> Result<bool, PlaybackError> {
        while state.is_paused() && !state.stop_requested() && !state.restart_requested() {
            println!("   [PAUSED] Type 'pause' to resume...");
            match input::ask(&mut self.input, ">>> ") {
                Ok(Some(line)) => self.apply(&Command::parse(&line), state),
                Ok(None) => {
                    info!("input closed while paused, stopping playback");
                    state.request_stop();
                }
                Err(err) if err.kind() == io::ErrorKind::Interrupted => return Ok(false),
                Err(err) => return Err(PlaybackError::Input(err)),
            }
        }
        Ok(true)
    }

    fn apply(&self, command: &Command, state: &mut SessionState) {
        debug!("applying {command:?} at sentence {}", state.index());
        match command {
            Command::Noop => {}
            Command::TogglePause => {
                if state.toggle_pause() {
                    println!("Paused - type 'pause' or 'p' to resume");
                } else {
                    println!("Resumed");
                }
            }
            Command::Stop => {
                state.request_stop();
                println!("Stopping...");
            }
            Command::Quit => {
                state.request_stop();
                println!("Quitting...");
            }
            Command::SpeedUp => println!("Speed set to {} WPM", state.speed_up()),
            Command::SpeedDown => println!("Speed set to {} WPM", state.slow_down()),
            Command::VolumeUp => println!("Volume set to {}%", percent(state.volume_up())),
            Command::VolumeDown => println!("Volume set to {}%", percent(state.volume_down())),
            Command::Restart => {
                state.request_restart();
                println!("Restarting from beginning...");
            }
            Command::Help => println!("\n{CONTROLS_HELP}"),
            Command::Unknown(token) => {
                warn!("unknown playback command {token:?}");
                println!("Unknown command: '{token}'. Type 'help' for commands.");
            }
        }
    }
}

fn percent(volume: f32) -> u32 {
    (volume * 100.0).round() as u32
}
