pub mod engine_path;
pub mod interrupt;
pub mod logging;
