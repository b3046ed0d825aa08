use std::path::{Path, PathBuf};

mod config;
mod estimate;
mod terminal;
mod tiers;
mod weather;

use anyhow::Context;
use clap::ArgAction;
use estimate::Estimate;
use rainharvest::{Config, domain::LANGUAGES};
use tiers::Tiers;
use tracing::instrument;
use weather::Weather;

#[derive(Debug, clap::Parser)]
#[command(version, about)]
pub struct Cli {
    /// Verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// A TOML file overriding the estimation constants
    #[arg(short, long, value_name = "PATH", global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

impl Cli {
    pub fn run(self) -> anyhow::Result<()> {
        Self::setup_logging(self.verbose);

        self.command.run(self.config.as_deref())
    }

    fn setup_logging(verbosity: u8) {
        use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

        let level = match verbosity {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            2 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        };

        let filter = tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into());

        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
            .with_thread_names(false)
            .with_line_number(false);

        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .init();
    }
}

#[derive(Debug, clap::Parser)]
pub enum Command {
    /// Estimate collection, cost and payback for a rooftop
    Estimate(Estimate),

    /// Show the system cost tiers
    Tiers(Tiers),

    /// Show or create configuration files
    Config(config::Command),

    /// Show the placeholder weather profile
    Weather(Weather),

    /// List the supported interface languages
    Languages,
}

impl Command {
    fn run(self, config_path: Option<&Path>) -> anyhow::Result<()> {
        match self {
            Self::Estimate(command) => command.run(load_config(config_path)?)?,
            Self::Tiers(command) => command.run(&load_config(config_path)?),
            Self::Config(command) => command.run(config_path)?,
            Self::Weather(command) => command.run()?,
            Self::Languages => list_languages(),
        }
        Ok(())
    }
}

/// Loads the configuration at `path`, or the built-in defaults when no path
/// was given.
#[instrument(level = "debug")]
fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let Some(path) = path else {
        return Ok(Config::default());
    };
    let config = Config::load(path)
        .with_context(|| format!("failed to load configuration from {}", path.display()))?;
    tracing::info!(path = %path.display(), "loaded configuration");
    Ok(config)
}

fn list_languages() {
    for language in LANGUAGES {
        println!("{:<4} {:<10} {}", language.code, language.name, language.native);
    }
}
