//! mcpricer - Monte Carlo option pricing from the command line
//!
//! Prices a European payoff, written as an arithmetic expression in the
//! terminal price `ST`, under risk-neutral geometric Brownian motion.
//!
//! # Commands
//!
//! - `mcpricer price [--spot ..] [--payoff ..]` - Price a payoff by simulation
//! - `mcpricer validate --payoff <expr>` - Check a payoff expression without pricing
//!
//! # Architecture
//!
//! As part of the **S**ervice layer, this crate turns untyped user input
//! into a validated [`pricer_core::types::PricingInput`] and hands it to
//! `pricer_pricing`. Reports go to stdout; logs go to stderr.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod commands;
mod config;
mod error;
mod form;

use config::{build_config, CliArgs, CliConfig};
use form::Form;

pub use error::{CliError, Result};

/// Monte Carlo option pricer CLI
#[derive(Parser)]
#[command(name = "mcpricer")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file path (defaults to ./mcpricer.toml when present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Price a payoff expression by Monte Carlo simulation
    Price {
        /// Spot price S(0)
        #[arg(long, allow_hyphen_values = true)]
        spot: Option<String>,

        /// Annualised risk-free rate, continuously compounded
        #[arg(short, long, allow_hyphen_values = true)]
        rate: Option<String>,

        /// Annualised volatility
        #[arg(long, allow_hyphen_values = true)]
        volatility: Option<String>,

        /// Time to maturity in years
        #[arg(short, long, allow_hyphen_values = true)]
        maturity: Option<String>,

        /// Number of simulated paths
        #[arg(short = 'n', long, allow_hyphen_values = true)]
        simulations: Option<String>,

        /// Payoff expression in the terminal price ST
        #[arg(short, long, allow_hyphen_values = true)]
        payoff: Option<String>,

        /// Seed for a reproducible run
        #[arg(short, long)]
        seed: Option<u64>,

        /// Output format (table, json)
        #[arg(short, long)]
        format: Option<String>,
    },

    /// Check a payoff expression without pricing it
    Validate {
        /// Payoff expression in the terminal price ST
        #[arg(short, long, allow_hyphen_values = true)]
        payoff: String,
    },
}

fn init_tracing(config: &CliConfig) {
    // RUST_LOG wins over the configured level.
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.as_filter_str()));

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let (seed, format) = match &cli.command {
        Commands::Price { seed, format, .. } => (*seed, format.clone()),
        Commands::Validate { .. } => (None, None),
    };

    let config = build_config(&CliArgs {
        config_file: cli.config,
        verbose: cli.verbose,
        seed,
        format,
    })?;

    init_tracing(&config);
    debug!(?config, "Configuration loaded");

    match cli.command {
        Commands::Price {
            spot,
            rate,
            volatility,
            maturity,
            simulations,
            payoff,
            ..
        } => {
            let form: Form = [
                ("spot", spot),
                ("rate", rate),
                ("volatility", volatility),
                ("maturity", maturity),
                ("simulations", simulations),
                ("payoff", payoff),
            ]
            .into_iter()
            .filter_map(|(field, value)| value.map(|v| (field.to_string(), v)))
            .collect();

            commands::price::run(&config, &form)
        }
        Commands::Validate { payoff } => commands::validate::run(&payoff),
    }
}

fn main() -> ExitCode {
    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
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
    fn test_parse_price_flags() {
        let cli = Cli::try_parse_from([
            "mcpricer",
            "price",
            "--spot",
            "120",
            "--rate",
            "-0.01",
            "--payoff",
            "-ST + 150",
            "--seed",
            "42",
            "--format",
            "json",
        ])
        .unwrap();

        match cli.command {
            Commands::Price {
                spot,
                rate,
                payoff,
                seed,
                format,
                volatility,
                ..
            } => {
                assert_eq!(spot.as_deref(), Some("120"));
                assert_eq!(rate.as_deref(), Some("-0.01"));
                assert_eq!(payoff.as_deref(), Some("-ST + 150"));
                assert_eq!(seed, Some(42));
                assert_eq!(format.as_deref(), Some("json"));
                assert_eq!(volatility, None);
            }
            Commands::Validate { .. } => panic!("expected price"),
        }
    }

    #[test]
    fn test_numeric_flags_are_not_parsed_by_clap() {
        // Conversion errors are reported by the form layer.
        let cli = Cli::try_parse_from(["mcpricer", "price", "--spot", "abc"]).unwrap();
        assert!(matches!(cli.command, Commands::Price { spot: Some(ref s), .. } if s == "abc"));
    }

    #[test]
    fn test_parse_validate() {
        let cli = Cli::try_parse_from([
            "mcpricer",
            "-v",
            "validate",
            "--payoff",
            "maximum(ST - 100, 0)",
        ])
        .unwrap();
        assert!(cli.verbose);
        assert!(matches!(
            cli.command,
            Commands::Validate { ref payoff } if payoff == "maximum(ST - 100, 0)"
        ));
    }
}
