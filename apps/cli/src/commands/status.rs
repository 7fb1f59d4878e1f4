//! `sampler status`: poll until the command exits successfully

use std::process::ExitCode;

use anyhow::Result;
use clap::Args;

use super::{SamplerArgs, TIMEOUT_EXIT, finish};

#[derive(Args, Debug)]
pub struct StatusArgs {
    /// Report a timeout as an error instead of exiting with status 1
    #[arg(long)]
    pub raise: bool,

    #[command(flatten)]
    pub sampler: SamplerArgs,
}

pub fn run(args: StatusArgs) -> Result<ExitCode> {
    // Any successful run counts; failed runs never yield a value.
    let mut sampler = args.sampler.sampler(|_| true)?;

    match sampler.wait_for_status_with(&true, args.raise) {
        Ok(true) => Ok(ExitCode::SUCCESS),
        Ok(false) => Ok(ExitCode::from(TIMEOUT_EXIT)),
        Err(error) => finish(error),
    }
}
