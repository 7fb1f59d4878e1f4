//! `sampler wait`: poll until the command prints the expected text

use std::process::ExitCode;

use anyhow::Result;
use clap::Args;

use super::{SamplerArgs, TIMEOUT_EXIT, finish};

#[derive(Args, Debug)]
pub struct WaitArgs {
    /// Output (trimmed stdout) to wait for
    #[arg(long, value_name = "TEXT")]
    pub expect: String,

    /// Report a timeout as an error instead of exiting with status 1
    #[arg(long)]
    pub raise: bool,

    #[command(flatten)]
    pub sampler: SamplerArgs,
}

pub fn run(args: WaitArgs) -> Result<ExitCode> {
    let mut sampler = args.sampler.sampler(|stdout| stdout)?;

    match sampler.wait_for_value_with(&args.expect, args.raise) {
        Ok(Some(value)) => {
            println!("{value}");
            Ok(ExitCode::SUCCESS)
        }
        Ok(None) => Ok(ExitCode::from(TIMEOUT_EXIT)),
        Err(error) => finish(error),
    }
}
