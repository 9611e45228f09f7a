//! CLI command handling
//!
//! Dispatches CLI commands and formats output.

use colored::Colorize;

use crate::commands::Commands;
use crate::common::config::Config;
use crate::common::{Error, Result};
use crate::testing::{self, count_expected_stops, load_suite, RunOptions};

/// Dispatch a CLI command
pub fn dispatch(command: Commands, config: &Config) -> Result<()> {
    match command {
        Commands::Count { suite } => {
            let tests = load_suite(&suite)?;
            let mut total = 0;

            for test in &tests {
                // Skipped scenarios are never run, so they need not be complete
                if test.skip {
                    println!("{}: {}", test.title, "skipped".yellow());
                    continue;
                }

                let stops = count_expected_stops(test)?;
                total += stops;
                println!(
                    "{}: {} stop(s), wait budget {}s",
                    test.title,
                    stops,
                    config.wait_budget(stops).as_secs()
                );
            }

            println!("Total: {} stop(s)", total);
            Ok(())
        }

        Commands::List { suite } => {
            let tests = load_suite(&suite)?;

            for test in &tests {
                let skip = if test.skip { " [skip]" } else { "" };
                println!("{}{}", test.title.bold(), skip.yellow());

                match &test.test_arg {
                    Some(arg) => println!("  Program: {} {}", test.test, arg),
                    None => println!("  Program: {}", test.test),
                }

                if let Some(breakpoints) = &test.initial_breakpoints {
                    for bp in breakpoints {
                        println!("  Break: {}", bp);
                    }
                }

                if let Some(initial) = &test.initial_stop {
                    println!("  Initial stop: {}", initial);
                }

                for (i, step) in test.steps.iter().enumerate() {
                    let stops = step.stops.as_ref().map_or(0, Vec::len);
                    println!(
                        "  {:>3}. {} on {} ({} stop(s))",
                        i + 1,
                        step.label(),
                        step.activity,
                        stops
                    );
                }
            }

            Ok(())
        }

        Commands::Verify {
            suite,
            session,
            only,
            verbose,
        } => {
            let options = RunOptions {
                verbose: verbose || config.report.verbose,
                only,
            };

            let result = testing::run_suite(&suite, &session, &options)?;

            if result.all_passed() {
                Ok(())
            } else {
                Err(Error::TestsFailed {
                    failed: result.failed(),
                    total: result.ran(),
                })
            }
        }
    }
}
