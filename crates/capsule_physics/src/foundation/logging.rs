//! Logging utilities and structured logging support

pub use log::{debug, info, warn, error, trace};

/// Initialize the logging system with a default filter
///
/// `RUST_LOG` still wins when it is set, so a config file can pick the
/// baseline level without taking control away from the command line.
pub fn init_with_level(level: &str) {
    let env = env_logger::Env::default().default_filter_or(level);
    // Tests may initialise more than once.
    let _ = env_logger::Builder::from_env(env).try_init();
}
