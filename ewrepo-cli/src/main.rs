//! ewrepo CLI - Command-line interface
//!
//! Composes repository suffixes from components and decomposes suffixes
//! into typed segments, using the grammar configured in `config.ini`.

mod commands;
mod error;
mod logging;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use ewrepo::config::{config_file_path, SuffixConfig};
use ewrepo::suffix::{Grammar, SuffixParser, DEFAULT_PACKAGE_EXTENSIONS};

use commands::compose::{ComposeRequest, FixedForm, SideArg};
use commands::config::ConfigCommands;
use error::CliError;

#[derive(Debug, Parser)]
#[command(name = "ewrepo")]
#[command(version, about = "Compose and decompose package repository suffixes")]
struct Cli {
    /// Path to the configuration file (default: ~/.ewrepo/config.ini)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Split a suffix into typed segments
    Decompose {
        /// Suffix to decompose, e.g. /5.5.5/Generic/lib/gas/5.1.0/gas.tar.gz
        suffix: String,

        /// Print components as JSON
        #[arg(long)]
        json: bool,
    },

    /// Build a suffix down to the deepest component given
    Compose {
        /// Runtime version, e.g. 5.5.5
        erts_version: String,

        /// Deployment area (default from config)
        #[arg(long)]
        area: Option<String>,

        /// Distribution side (ignored for the Meta area)
        #[arg(long, value_enum)]
        side: Option<SideArg>,

        /// Package name
        #[arg(long)]
        name: Option<String>,

        /// Package version
        #[arg(long)]
        vsn: Option<String>,

        /// Append the package archive file name
        #[arg(long)]
        file: bool,
    },

    /// Build the suffix of an application descriptor (.app)
    ComposeApp {
        erts_version: String,
        name: String,
        vsn: String,
    },

    /// Build the suffix of a release descriptor (.rel)
    ComposeRel {
        erts_version: String,
        name: String,
        vsn: String,
    },

    /// Build the suffix of the runtime archive for an area
    ComposeErts { erts_version: String, area: String },

    /// View configuration settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let config_path = match cli.config {
        Some(path) => path,
        None => config_file_path()?,
    };
    let config = SuffixConfig::load_from(&config_path)?;
    logging::init_logging(&config.log_level, cli.verbose)?;

    let owned_grammar;
    let grammar = if config.package_extensions == DEFAULT_PACKAGE_EXTENSIONS {
        Grammar::default_grammar()
    } else {
        owned_grammar = config.grammar()?;
        &owned_grammar
    };
    let parser = SuffixParser::new(grammar);
    tracing::debug!(
        extensions = ?parser.grammar().package_extensions(),
        "grammar ready"
    );

    match cli.command {
        Commands::Decompose { suffix, json } => commands::decompose::run(&parser, &suffix, json),
        Commands::Compose {
            erts_version,
            area,
            side,
            name,
            vsn,
            file,
        } => {
            let request = ComposeRequest {
                erts_version,
                area,
                side,
                name,
                vsn,
                file,
            };
            let suffix = commands::compose::build(&parser, &request, &config.default_area)?;
            println!("{}", suffix);
            Ok(())
        }
        Commands::ComposeApp {
            erts_version,
            name,
            vsn,
        } => {
            let suffix = commands::compose::build_fixed(
                &parser,
                FixedForm::DotApp,
                &erts_version,
                &name,
                &vsn,
            )?;
            println!("{}", suffix);
            Ok(())
        }
        Commands::ComposeRel {
            erts_version,
            name,
            vsn,
        } => {
            let suffix = commands::compose::build_fixed(
                &parser,
                FixedForm::DotRel,
                &erts_version,
                &name,
                &vsn,
            )?;
            println!("{}", suffix);
            Ok(())
        }
        Commands::ComposeErts { erts_version, area } => {
            let suffix = commands::compose::build_erts(&parser, &erts_version, &area)?;
            println!("{}", suffix);
            Ok(())
        }
        Commands::Config { command } => commands::config::run(command, &config_path, &config),
    }
}
