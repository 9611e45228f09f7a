//! Suite runner implementation
//!
//! Verifies every scenario of a suite against the stops a session driver
//! recorded, one check for the initial stop and one per step.

use std::collections::HashSet;
use std::path::Path;

use colored::Colorize;

use crate::common::{Error, Result};

use super::scenario::{load_suite, Test};
use super::session::{ObservedSession, ObservedTest};
use super::verifier::verify_stops;

/// Options controlling a suite run
#[derive(Debug, Default, Clone)]
pub struct RunOptions {
    /// Print every passing check, not only the test outcome
    pub verbose: bool,
    /// Only run the test with this title
    pub only: Option<String>,
}

/// Result of verifying one test
#[derive(Debug)]
pub struct TestResult {
    pub title: String,
    pub passed: bool,
    pub skipped: bool,
    pub checks_run: usize,
    pub checks_total: usize,
    pub error: Option<String>,
}

impl TestResult {
    fn skipped(test: &Test) -> Self {
        Self {
            title: test.title.clone(),
            passed: true,
            skipped: true,
            checks_run: 0,
            checks_total: checks_total(test),
            error: None,
        }
    }

    fn failed(test: &Test, checks_run: usize, error: &Error) -> Self {
        Self {
            title: test.title.clone(),
            passed: false,
            skipped: false,
            checks_run,
            checks_total: checks_total(test),
            error: Some(error.to_string()),
        }
    }
}

/// Results of a whole suite
#[derive(Debug, Default)]
pub struct SuiteResult {
    pub results: Vec<TestResult>,
}

impl SuiteResult {
    pub fn passed(&self) -> usize {
        self.results.iter().filter(|r| r.passed && !r.skipped).count()
    }

    pub fn failed(&self) -> usize {
        self.results.iter().filter(|r| !r.passed).count()
    }

    /// Number of tests that were verified, skipped ones excluded
    pub fn ran(&self) -> usize {
        self.passed() + self.failed()
    }

    pub fn skipped(&self) -> usize {
        self.results.iter().filter(|r| r.skipped).count()
    }

    pub fn all_passed(&self) -> bool {
        self.failed() == 0
    }
}

fn checks_total(test: &Test) -> usize {
    1 + test.steps.len()
}

/// Run a suite file against a recorded session log
pub fn run_suite(suite_path: &Path, session_path: &Path, options: &RunOptions) -> Result<SuiteResult> {
    let suite = load_suite(suite_path)?;
    let session = ObservedSession::load(session_path)?;

    if let Some(only) = &options.only {
        if !suite.iter().any(|t| &t.title == only) {
            return Err(Error::Config(format!(
                "No test titled '{}' in {}",
                only,
                suite_path.display()
            )));
        }
    }

    let mut seen = HashSet::new();
    for test in &suite {
        if !seen.insert(test.title.as_str()) {
            tracing::warn!(title = %test.title, "Duplicate test title; all copies use the same observed stops");
        }
    }

    for title in session.titles() {
        if !seen.contains(title) {
            tracing::warn!(%title, "Session log records a test the suite does not declare");
        }
    }

    let result = run_tests(&suite, &session, options);

    println!(
        "\n{} {} passed, {} failed, {} skipped\n",
        "Summary:".blue().bold(),
        result.passed().to_string().green(),
        result.failed().to_string().red(),
        result.skipped().to_string().yellow()
    );

    Ok(result)
}

/// Run already loaded tests against a session
pub fn run_tests(suite: &[Test], session: &ObservedSession, options: &RunOptions) -> SuiteResult {
    let mut result = SuiteResult::default();

    for test in suite {
        if options.only.as_ref().is_some_and(|only| only != &test.title) {
            continue;
        }

        println!(
            "\n{} {}",
            "Running Test:".blue().bold(),
            test.title.white().bold()
        );

        if test.skip {
            println!("  {} skipped", "-".yellow());
            result.results.push(TestResult::skipped(test));
            continue;
        }

        let test_result = match session.for_test(&test.title) {
            Some(observed) => verify_test(test, observed, options.verbose),
            None => {
                let err = Error::UnknownTest(test.title.clone());
                println!("  {} {}", "✗".red(), err);
                TestResult::failed(test, 0, &err)
            }
        };

        if test_result.passed {
            println!("  {} {}", "✓".green().bold(), "Test Passed".green().bold());
        }
        result.results.push(test_result);
    }

    result
}

/// Verify one test: the initial stop first, then every step in order
///
/// The first failing check ends the test.
pub fn verify_test(test: &Test, observed: &ObservedTest, verbose: bool) -> TestResult {
    let mut checks_run = 0;

    match run_checks(test, observed, verbose, &mut checks_run) {
        Ok(()) => TestResult {
            title: test.title.clone(),
            passed: true,
            skipped: false,
            checks_run,
            checks_total: checks_total(test),
            error: None,
        },
        Err(e) => {
            let what = match checks_run {
                0 | 1 => "Initial stop".to_string(),
                n => format!("Step {}", n - 1),
            };
            println!("  {} {}: {}", "✗".red(), what, e);
            TestResult::failed(test, checks_run, &e)
        }
    }
}

fn run_checks(
    test: &Test,
    observed: &ObservedTest,
    verbose: bool,
    checks_run: &mut usize,
) -> Result<()> {
    let initial = test.require_initial_stop()?;

    *checks_run += 1;
    let actual = observed.initial_stops()?;
    verify_stops(&actual, Some(std::slice::from_ref(initial)))?;
    if verbose {
        println!("  {} Initial stop: {}", "✓".green(), initial.to_string().dimmed());
    }

    for (i, step) in test.steps.iter().enumerate() {
        *checks_run += 1;
        let actual = observed.step_stops(i)?;
        verify_stops(&actual, step.stops.as_deref())?;

        if verbose {
            println!(
                "  {} Step {}: {} on {} ({} stop(s))",
                "✓".green(),
                i + 1,
                step.label().dimmed(),
                step.activity,
                actual.len()
            );
        }
    }

    if observed.steps_recorded() > test.steps.len() {
        tracing::warn!(
            title = %test.title,
            recorded = observed.steps_recorded(),
            declared = test.steps.len(),
            "Session log has more step entries than the scenario declares"
        );
    }

    Ok(())
}
