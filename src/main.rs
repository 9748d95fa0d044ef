use std::{
    ffi::OsString,
    path::{Path, PathBuf},
    process::ExitCode,
};

use log::{error, info, warn};

mod config;
mod document;
mod playback;
mod session;
mod speech;
mod state;
mod text;
mod util;
mod voices;

use config::{Settings, DEFAULT_CONFIG_FILE};
use session::Session;
use speech::EspeakEngine;
use util::interrupt::InterruptFlag;

const USAGE: &str = "Usage: reader-cli <pdf_file>";

fn pdf_argument(args: &[OsString]) -> Option<PathBuf> {
    match args {
        [path] => Some(PathBuf::from(path)),
        _ => None,
    }
}

fn load_settings(path: &Path) -> Settings {
    Settings::load_or_default(path).unwrap_or_else(|err| {
        warn!("{err}; using default settings");
        Settings::default()
    })
}

fn main() -> ExitCode {
    let _logger = match util::logging::init() {
        Ok(handle) => Some(handle),
        Err(err) => {
            eprintln!("Failed to initialise logger: {err}");
            None
        }
    };

    let args: Vec<OsString> = std::env::args_os().skip(1).collect();
    let Some(pdf_path) = pdf_argument(&args) else {
        println!("{USAGE}");
        println!("Example: reader-cli document.pdf");
        return ExitCode::from(2);
    };

    let settings = load_settings(Path::new(DEFAULT_CONFIG_FILE));
    info!("starting reader for {}", pdf_path.display());

    let interrupt = InterruptFlag::install().unwrap_or_else(|err| {
        warn!("{err:#}");
        InterruptFlag::default()
    });
    let engine = EspeakEngine::resolve(settings.tts_command.as_deref());
    let input = playback::stdin_input(interrupt.clone());

    match Session::new(settings, engine, input, interrupt).run(&pdf_path) {
        Ok(end) => {
            info!("session finished: {end:?}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!("{err}");
            println!("Error: {err}");
            ExitCode::FAILURE
        }
    }
}
