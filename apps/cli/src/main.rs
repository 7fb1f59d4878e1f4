use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod config;
mod probe;

#[derive(Parser)]
#[command(name = "sampler", about = "Poll a command until its output converges")]
#[command(version, propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Wait until the command prints the expected text
    Wait(commands::wait::WaitArgs),
    /// Wait until the command exits successfully
    Status(commands::status::StatusArgs),
    /// Print every sampled output until the budget runs out
    Watch(commands::watch::WatchArgs),
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Wait(args) => commands::wait::run(args),
        Commands::Status(args) => commands::status::run(args),
        Commands::Watch(args) => commands::watch::run(args),
    }
}
