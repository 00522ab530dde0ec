//! Process-wide logging setup for the warden binaries.

pub mod logging;

pub use logging::LogFormat;

/// Initialize logging from the environment.
///
/// Safe to call multiple times; subsequent calls are no-ops.
pub fn init() {
    logging::init(LogFormat::from_env());
}
