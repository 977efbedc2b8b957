//! # Voltwise CLI
//!
//! Terminal front end for the Voltwise electrical calculators: run any
//! calculator from flags or interactively, reopen share links, print
//! summaries or PDFs, and browse the reference tables.

mod commands;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use calc_core::Settings;
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

/// Settings file picked up from the working directory when `--config` is not given
const DEFAULT_CONFIG: &str = "voltwise.toml";

/// Electrical reference calculators
#[derive(Parser)]
#[command(name = "voltwise")]
#[command(author = "Voltwise Contributors")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Electrical calculators: voltage drop, wire size, box and conduit fill, and more", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Settings file (TOML)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List calculators and reference tables
    List,
    /// Show a calculator's fields and defaults
    Fields(commands::catalog::FieldsArgs),
    /// Run a calculator
    Calc(commands::calc::CalcArgs),
    /// Reopen a share link
    Open(commands::calc::OpenArgs),
    /// Print a reference table
    Table(commands::catalog::TableArgs),
    /// Fill in a calculator interactively
    Prompt(commands::prompt::PromptArgs),
}

fn init_logging(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn load_settings(path: Option<&Path>) -> Result<Settings> {
    match path {
        Some(path) => {
            Settings::load(path).with_context(|| format!("Failed to load settings from {}", path.display()))
        }
        None if Path::new(DEFAULT_CONFIG).exists() => {
            Settings::load(DEFAULT_CONFIG).with_context(|| format!("Failed to load {DEFAULT_CONFIG}"))
        }
        None => Ok(Settings::default()),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let settings = load_settings(cli.config.as_deref())?;

    match cli.command {
        Commands::List => commands::catalog::list(),
        Commands::Fields(args) => commands::catalog::fields(args, &settings),
        Commands::Calc(args) => commands::calc::execute(args, &settings),
        Commands::Open(args) => commands::calc::open(args, &settings),
        Commands::Table(args) => commands::catalog::table(args),
        Commands::Prompt(args) => commands::prompt::execute(args, &settings),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_calc() {
        let cli = Cli::try_parse_from([
            "voltwise",
            "-vv",
            "calc",
            "voltage-drop",
            "-s",
            "gauge=10",
            "--set",
            "length=150",
            "--json",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Commands::Calc(args) => {
                assert_eq!(args.calculator, calc_core::CalculatorKind::VoltageDrop);
                assert_eq!(args.set, ["gauge=10", "length=150"]);
                assert!(args.output.json);
            }
            _ => panic!("expected calc"),
        }
    }

    #[test]
    fn test_unknown_calculator_rejected() {
        assert!(Cli::try_parse_from(["voltwise", "calc", "load-calc"]).is_err());
    }

    #[test]
    fn test_global_config_after_subcommand() {
        let cli = Cli::try_parse_from(["voltwise", "list", "--config", "site.toml"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("site.toml")));
    }

    #[test]
    fn test_missing_config_file_errors() {
        assert!(load_settings(Some(Path::new("/nonexistent/voltwise.toml"))).is_err());
    }
}
