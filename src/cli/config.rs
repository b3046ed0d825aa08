use std::path::{Path, PathBuf};

use rainharvest::Config;
use tracing::instrument;

use super::terminal::Colorize;

#[derive(Debug, clap::Parser)]
/// Show or create configuration files
///
/// A configuration file overrides the constants behind every estimate:
/// rainfall, runoff and roof efficiencies, savings and carbon factors, the
/// system cost tiers, savings fractions by water source, and the projection
/// horizons. Pass it to any command with `--config <PATH>`.
pub struct Command {
    #[command(subcommand)]
    command: ConfigCommand,
}

#[derive(Debug, clap::Parser)]
enum ConfigCommand {
    /// Print the effective configuration as TOML
    Show,

    /// Write the default configuration to a file
    Init {
        /// Where to write the file
        path: PathBuf,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

impl Command {
    #[instrument]
    pub fn run(self, config_path: Option<&Path>) -> anyhow::Result<()> {
        match self.command {
            ConfigCommand::Show => Self::show_config(config_path),
            ConfigCommand::Init { path, force } => Self::init_config(&path, force),
        }
    }

    fn show_config(config_path: Option<&Path>) -> anyhow::Result<()> {
        let config = super::load_config(config_path)?;

        match config_path {
            Some(path) => println!("{}", format!("# from {}", path.display()).dim()),
            None => println!("{}", "# built-in defaults".dim()),
        }
        print!("{}", config.to_toml()?);
        Ok(())
    }

    fn init_config(path: &Path, force: bool) -> anyhow::Result<()> {
        if path.exists() && !force {
            anyhow::bail!(
                "{} already exists (use --force to overwrite)",
                path.display()
            );
        }

        Config::default()
            .save(path)
            .map_err(|e| anyhow::anyhow!("Failed to create {}: {e}", path.display()))?;

        println!("Wrote default configuration to {}", path.display());
        println!("{}", "Edit the file, then pass it with --config.".dim());
        Ok(())
    }
}
