//! babel: command-line front end for babel-core.
//!
//! ```text
//! babel address --text "hello world"        # print an address
//! babel search "<address>"                  # print the page at an address
//! babel --binary address --input photo.jpg  # raw bytes, base64 address
//! babel verify --seed 42                    # deterministic self-check
//! ```

mod cli;
mod commands;
mod config;
mod input_gen;

use anyhow::{Context, Result};
use babel_core::{AlphabetRegistry, Codec};
use clap::Parser;
use cli::{Cli, Command};
use config::Config;
use std::process::ExitCode;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

/// Log to stderr; `RUST_LOG` wins over `-v`.
fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let config = Config::resolve(&cli.codec, cli.config.as_deref())?;
    if cli.print_config {
        config.print();
    }

    let registry = Arc::new(AlphabetRegistry::standard());
    let codec = Codec::new(registry.clone(), config.codec.clone())
        .context("invalid codec configuration")?;
    tracing::debug!(?config, "resolved configuration");

    match cli.command {
        Command::Address { text, input } => {
            commands::address(&codec, &config, text.as_deref(), input.as_deref())
        }
        Command::Search {
            address,
            input,
            output,
        } => commands::search(&codec, address.as_deref(), input.as_deref(), output.as_deref()),
        Command::Verify { samples, len } => commands::verify(&codec, &config, samples, len),
        Command::Alphabets => commands::alphabets(&registry),
    }
}
