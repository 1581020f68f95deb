//! # navppo
//!
//! Trains a navigation agent from the command line. See [`navppo::cli::Cli`]
//! for the flags.

use anyhow::Result;
use clap::Parser;
use navppo::cli::Cli;

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();
    let report = navppo::app::run(&cli)?;
    tracing::info!(
        episodes = report.episodes.len(),
        divergences = report.divergences,
        mean_reward = report.mean_reward(),
        "training finished"
    );
    Ok(())
}
