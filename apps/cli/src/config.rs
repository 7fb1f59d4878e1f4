//! Layered configuration: defaults → `sampler.toml` / `--config` → `SAMPLER_*` env
//!
//! Command-line flags form the last layer and are applied by
//! [`SamplerArgs::resolve`](crate::commands::SamplerArgs::resolve).

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use figment::value::Uncased;
use sampler::SamplerConfig;
use serde::{Deserialize, Serialize};

/// Config file picked up from the working directory when `--config` is absent
pub const DEFAULT_CONFIG_FILE: &str = "sampler.toml";

/// Everything the CLI reads from files and the environment
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// Timing and fault policy
    pub sampler: SamplerConfig,
    /// Subscriber settings
    pub log: sampler_log::Config,
}

impl CliConfig {
    /// Load the layered configuration.
    ///
    /// An explicit `path` must exist; the default file is optional. The
    /// result is not validated: command-line flags still apply on top.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let file = match path {
            Some(path) if !path.is_file() => bail!("config file {} not found", path.display()),
            Some(path) => path.to_path_buf(),
            None => PathBuf::from(DEFAULT_CONFIG_FILE),
        };

        Figment::from(Serialized::defaults(Self::default()))
            .merge(Toml::file(&file))
            .merge(env())
            .extract()
            .with_context(|| format!("failed to load configuration from {}", file.display()))
    }
}

/// `SAMPLER_TIMEOUT`, `SAMPLER_INTERVAL`, `SAMPLER_RERAISE`, `SAMPLER_LOG`
/// and `SAMPLER_LOG_FORMAT`
fn env() -> Env {
    Env::prefixed("SAMPLER_")
        .only(&["timeout", "interval", "reraise", "log", "log_format"])
        .map(|key| match key.as_str() {
            "log" => Uncased::from("log.level"),
            "log_format" => Uncased::from("log.format"),
            other => Uncased::from(format!("sampler.{other}")),
        })
}
