//! CLI command definitions
//!
//! Defines the clap commands for the stepcheck CLI.

use clap::Subcommand;
use std::path::PathBuf;

#[derive(Subcommand)]
pub enum Commands {
    /// Show how many stops each scenario expects and the wait budget for it
    Count {
        /// Path to the YAML or JSON scenario suite
        suite: PathBuf,
    },

    /// List the scenarios of a suite
    #[command(alias = "ls")]
    List {
        /// Path to the YAML or JSON scenario suite
        suite: PathBuf,
    },

    /// Verify a recorded session against a scenario suite
    Verify {
        /// Path to the YAML or JSON scenario suite
        suite: PathBuf,

        /// Path to the session log with the observed stops
        session: PathBuf,

        /// Only verify the test with this title
        #[arg(long)]
        only: Option<String>,

        /// Verbose output
        #[arg(long, short)]
        verbose: bool,
    },
}
