use flexi_logger::{Logger, LoggerHandle};

/// Level used when `RUST_LOG` is not set. Stdout belongs to the prompts, so
/// only warnings and errors reach stderr by default.
pub const DEFAULT_SPEC: &str = "warn";

/// Start logging to stderr. The returned handle must stay alive for as long as
/// the program logs.
pub fn init() -> anyhow::Result<LoggerHandle> {
    let handle = Logger::try_with_env_or_str(DEFAULT_SPEC)?
        .log_to_stderr()
        .format_for_stderr(flexi_logger::default_format)
        .start()?;
    Ok(handle)
}
