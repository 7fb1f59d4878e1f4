//! Core types shared by the sampler and its waiters
//!
//! Error types, the probe fault channel, the per-attempt context handed
//! to callbacks, and serializable configuration.

mod config;
mod context;
mod error;
mod fault;

pub use config::SamplerConfig;
pub use context::AttemptContext;
pub use error::{ConfigError, ConfigResult, SamplerError, SamplerResult};
pub use fault::{Fault, Outcome};

/// Core constants
pub mod constants {
    use std::time::Duration;

    /// Default run budget used by [`SamplerConfig::default`](super::SamplerConfig)
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

    /// Default pause between attempts
    pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(1);
}
