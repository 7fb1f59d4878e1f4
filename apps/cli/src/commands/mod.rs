//! Subcommands and the options they share

pub mod status;
pub mod wait;
pub mod watch;

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use clap::Args;
use sampler::{Fault, Sampler, SamplerError};
use tracing::debug;

use crate::config::CliConfig;
use crate::probe::{CommandProbe, ProbeError};

/// Exit code reported when the budget ran out without a match
pub const TIMEOUT_EXIT: u8 = 1;

/// Options accepted by every subcommand
#[derive(Args, Debug, Clone)]
pub struct SamplerArgs {
    /// Wall-clock budget, e.g. "30s" or "5m"
    #[arg(long, value_parser = humantime::parse_duration)]
    pub timeout: Option<Duration>,

    /// Pause between attempts, e.g. "1s"
    #[arg(long, value_parser = humantime::parse_duration)]
    pub interval: Option<Duration>,

    /// Fail on the first unsuccessful command run instead of retrying
    #[arg(long)]
    pub reraise: bool,

    /// Configuration file (defaults to ./sampler.toml when present)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Log filter directive, e.g. "debug" or "sampler=trace"
    #[arg(long, value_name = "FILTER")]
    pub log_level: Option<String>,

    /// Log output format: pretty, compact or json
    #[arg(long, value_name = "FORMAT")]
    pub log_format: Option<sampler_log::Format>,

    /// Command to poll, with its arguments
    #[arg(last = true, required = true, value_name = "COMMAND")]
    pub command: Vec<String>,
}

impl SamplerArgs {
    /// Resolve configuration layers and apply command-line overrides.
    ///
    /// Validation runs once every layer is applied.
    pub fn resolve(&self) -> Result<CliConfig> {
        let mut config = CliConfig::load(self.config.as_deref())?;

        if let Some(timeout) = self.timeout {
            config.sampler.timeout = timeout;
        }
        if let Some(interval) = self.interval {
            config.sampler.interval = interval;
        }
        if self.reraise {
            config.sampler.reraise = true;
        }
        if let Some(level) = &self.log_level {
            config.log.level.clone_from(level);
        }
        if let Some(format) = self.log_format {
            config.log.format = format;
        }

        config
            .sampler
            .validate()
            .context("invalid sampler configuration")?;
        Ok(config)
    }

    /// Install logging and build a sampler polling the command.
    ///
    /// `map` turns the command's trimmed stdout into the sampled value.
    pub fn sampler<T, F>(&self, map: F) -> Result<Sampler<T, ProbeError>>
    where
        T: 'static,
        F: Fn(String) -> T + 'static,
    {
        let config = self.resolve()?;
        let _guard = sampler_log::init_with(config.log.clone())?;

        let probe = CommandProbe::new(&self.command).context("no command given")?;
        let name = probe.to_string();
        debug!(
            command = %name,
            timeout = ?config.sampler.timeout,
            interval = ?config.sampler.interval,
            reraise = config.sampler.reraise,
            "Polling command"
        );

        let sampler = Sampler::from_config(&config.sampler, move || -> Result<T, Fault<ProbeError>> {
            probe.run().map(&map)
        })
        .context("invalid sampler configuration")?;
        Ok(sampler.named(name))
    }
}

/// Map a run-ending error onto the process outcome.
///
/// Signals become exit codes; anything else is reported as an error.
pub fn finish(error: SamplerError<ProbeError>) -> Result<ExitCode> {
    match error {
        SamplerError::Interrupted => Ok(ExitCode::from(crate::probe::INTERRUPTED_CODE as u8)),
        SamplerError::Exit { code } => Ok(ExitCode::from(code as u8)),
        other => Err(anyhow!(other)),
    }
}
