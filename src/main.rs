//! `rwh`: rooftop rainwater harvesting estimates from the command line.

use clap::Parser;

mod cli;

fn main() -> anyhow::Result<()> {
    cli::Cli::parse().run()
}
