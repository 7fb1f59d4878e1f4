//! # Sampler Log
//!
//! Subscriber setup shared by sampler tools. Library code only emits
//! `tracing` events; binaries call one of the init functions once at
//! startup.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! fn main() -> sampler_log::Result<()> {
//!     let _guard = sampler_log::auto_init()?;
//!     sampler_log::info!(timeout_ms = 5000, "Polling started");
//!     Ok(())
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

mod builder;
mod config;

// Public API
pub use builder::{LoggerBuilder, LoggerGuard};
pub use config::{Config, DisplayConfig, Format};

/// Prelude for common imports
pub mod prelude {
    pub use crate::{Config, Format, Result, auto_init, debug, error, info, init, init_with, warn};
}

// Re-export tracing macros
pub use tracing::{debug, error, info, trace, warn};

/// Result type for logger operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for logger operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Filter parsing error
    #[error("Invalid filter: {0}")]
    Filter(String),

    /// A global subscriber is already installed
    #[error("Logger already initialized: {0}")]
    AlreadyInitialized(String),
}

/// Environment variable holding the filter directive, checked before `RUST_LOG`
pub const ENV_FILTER: &str = "SAMPLER_LOG";

/// Environment variable selecting the output format
pub const ENV_FORMAT: &str = "SAMPLER_LOG_FORMAT";

/// Auto-detect and initialize the best logging configuration
pub fn auto_init() -> Result<LoggerGuard> {
    if std::env::var(ENV_FILTER).is_ok() || std::env::var("RUST_LOG").is_ok() {
        init_with(Config::from_env())
    } else if cfg!(debug_assertions) {
        init_with(Config::development())
    } else {
        init_with(Config::production())
    }
}

/// Initialize with default configuration
pub fn init() -> Result<LoggerGuard> {
    init_with(Config::default())
}

/// Initialize with custom configuration
pub fn init_with(config: Config) -> Result<LoggerGuard> {
    LoggerBuilder::from_config(config).build()
}
