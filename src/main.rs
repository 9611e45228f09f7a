//! stepcheck - verifies debugger stepping scenarios
//!
//! Loads stepping scenarios and the stops a session driver recorded for
//! them, and reports which expected stops were missed and which observed
//! stops were unexpected.

use clap::Parser;
use std::path::PathBuf;

use stepcheck::common::{config::Config, logging};
use stepcheck::{cli, commands::Commands};

#[derive(Parser)]
#[command(name = "stepcheck", about = "Verify debugger stepping scenarios")]
#[command(version, long_about = None)]
struct Cli {
    /// Configuration file (default: platform config dir)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

fn main() {
    let cli = Cli::parse();

    let verbose = matches!(cli.command, Commands::Verify { verbose: true, .. });
    logging::init_cli(verbose);

    let config = match &cli.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    };

    let result = config.and_then(|config| {
        if !config.report.color {
            colored::control::set_override(false);
        }
        tracing::debug!(?config, "Loaded configuration");
        cli::dispatch(cli.command, &config)
    });

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
