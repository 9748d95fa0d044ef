use std::ffi::OsString;
use std::path::PathBuf;

use shlex::Shlex;
use thiserror::Error;

/// Executables tried in order when no command line is configured.
const CANDIDATES: &[&str] = &["espeak-ng", "espeak"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineCommand {
    Executable(PathBuf),
    Custom { program: String, args: Vec<String> },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EnginePathError {
    #[error("neither espeak-ng nor espeak was found on PATH")]
    ExecutableMissing,
    #[error("the configured speech command is empty")]
    EmptyCommand,
}

/// Pick the speech executable: the configured command line when there is one,
/// otherwise the first espeak flavour found on `PATH`.
pub fn resolve(configured: Option<&str>) -> Result<EngineCommand, EnginePathError> {
    if let Some(raw) = configured {
        let mut parts: Vec<String> = Shlex::new(raw).collect();
        if parts.is_empty() {
            return Err(EnginePathError::EmptyCommand);
        }
        let program = parts.remove(0);
        return Ok(EngineCommand::Custom {
            program,
            args: parts,
        });
    }

    CANDIDATES
        .iter()
        .find_map(|name| which::which(name).ok())
        .map(EngineCommand::Executable)
        .ok_or(EnginePathError::ExecutableMissing)
}

pub fn command_to_args(cmd: &EngineCommand) -> (OsString, Vec<OsString>) {
    match cmd {
        EngineCommand::Executable(path) => (path.as_os_str().into(), vec![]),
        EngineCommand::Custom { program, args } => (
            OsString::from(program),
            args.iter().map(OsString::from).collect(),
        ),
    }
}
