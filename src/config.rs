use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use serde::Deserialize;
use thiserror::Error;

use crate::state::{RATE_MAX, RATE_MIN};

pub const DEFAULT_CONFIG_FILE: &str = "reader.json";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read settings file {0}: {1}")]
    Io(PathBuf, #[source] std::io::Error),
    #[error("failed to parse settings file {0}: {1}")]
    Parse(PathBuf, #[source] serde_json::Error),
}

/// Reader settings, read from `reader.json` when the file exists.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Words per minute at the start of a session.
    pub rate: u32,
    /// 0.0 to 1.0.
    pub volume: f32,
    /// Silence between two sentences.
    pub sentence_gap_ms: u64,
    pub preview_chars: usize,
    /// Full command line for the speech engine, e.g. `"espeak-ng --punct"`.
    pub tts_command: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            rate: 180,
            volume: 1.0,
            sentence_gap_ms: 300,
            preview_chars: 200,
            tts_command: None,
        }
    }
}

impl Settings {
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let data =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;
        let settings: Settings = serde_json::from_str(&data)
            .map_err(|err| ConfigError::Parse(path.to_path_buf(), err))?;
        Ok(settings.clamped())
    }

    fn clamped(mut self) -> Self {
        self.rate = self.rate.clamp(RATE_MIN, RATE_MAX);
        self.volume = if self.volume.is_finite() {
            self.volume.clamp(0.0, 1.0)
        } else {
            1.0
        };
        self
    }

    pub fn sentence_gap(&self) -> Duration {
        Duration::from_millis(self.sentence_gap_ms)
    }
}
