//! `sampler watch`: print every sampled output

use std::process::ExitCode;

use anyhow::Result;
use clap::Args;
use tracing::info;

use super::{SamplerArgs, finish};

#[derive(Args, Debug)]
pub struct WatchArgs {
    /// Stop after this many samples
    #[arg(long, value_name = "N")]
    pub count: Option<usize>,

    #[command(flatten)]
    pub sampler: SamplerArgs,
}

pub fn run(args: WatchArgs) -> Result<ExitCode> {
    let mut sampler = args.sampler.sampler(|stdout| stdout)?;
    let limit = args.count.unwrap_or(usize::MAX);

    let mut printed = 0;
    for sample in sampler.samples().take(limit) {
        match sample {
            Ok(output) => {
                println!("{output}");
                printed += 1;
            }
            Err(error) if error.is_timeout() => break,
            Err(error) => return finish(error),
        }
    }

    info!(samples = printed, attempts = sampler.attempts(), "Watch finished");
    Ok(ExitCode::SUCCESS)
}
