//! Configuration CLI commands.

use std::path::Path;

use clap::Subcommand;
use ewrepo::config::SuffixConfig;

use crate::error::CliError;

/// Config subcommands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// List all configuration settings
    List,

    /// Show the configuration file path
    Path,

    /// Write the current settings to the configuration file
    Init,
}

/// Run a config subcommand.
pub fn run(command: ConfigCommands, path: &Path, config: &SuffixConfig) -> Result<(), CliError> {
    match command {
        ConfigCommands::List => {
            println!("{}", list(config));
            Ok(())
        }
        ConfigCommands::Path => {
            println!("{}", path.display());
            Ok(())
        }
        ConfigCommands::Init => {
            if path.exists() {
                return Err(CliError::Config(format!(
                    "{} already exists",
                    path.display()
                )));
            }
            config.save_to(path)?;
            println!("Wrote {}", path.display());
            Ok(())
        }
    }
}

/// Render settings as `section.key = value` lines.
pub fn list(config: &SuffixConfig) -> String {
    [
        format!(
            "grammar.package_extensions = {}",
            config.package_extensions.join(",")
        ),
        format!("defaults.area = {}", config.default_area),
        format!("logging.level = {}", config.log_level),
    ]
    .join("\n")
}
