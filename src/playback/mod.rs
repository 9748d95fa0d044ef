//! Interactive sentence-by-sentence playback.

pub mod command;
pub mod controller;
pub mod input;

pub use command::CONTROLS_HELP;
pub use controller::{Controller, Outcome, PlaybackError, PlaybackReport};
pub use input::{stdin_input, CommandInput};
