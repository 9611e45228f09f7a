//! Stop verification
//!
//! Observed and expected stops are compared as multisets: order does not
//! matter, duplicates do. Matching is greedy: each expected stop, in
//! declaration order, takes the first unconsumed observed stop equal to it.
//! There is no backtracking, so near-duplicates are reported exactly as the
//! greedy pass leaves them.

use std::fmt;

use crate::common::Result;

use super::scenario::{Stop, Test};

/// Residuals left after matching observed stops against expected ones
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StopMismatch {
    /// Expected stops that were never observed
    pub unmatched_expected: Vec<Stop>,
    /// Observed stops that no expectation accounts for
    pub unmatched_actual: Vec<Stop>,
}

impl std::error::Error for StopMismatch {}

impl fmt::Display for StopMismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} expected stop(s) not observed, {} unexpected stop(s) observed",
            self.unmatched_expected.len(),
            self.unmatched_actual.len()
        )?;
        for stop in &self.unmatched_expected {
            write!(f, "\n  missing:    {}", stop)?;
        }
        for stop in &self.unmatched_actual {
            write!(f, "\n  unexpected: {}", stop)?;
        }
        Ok(())
    }
}

/// Total number of stop events a scenario is expected to produce
///
/// One for the initial stop plus the expected stops of every step. A
/// scenario without an initial stop is rejected.
pub fn count_expected_stops<B>(test: &Test<B>) -> Result<usize> {
    test.require_initial_stop()?;

    let step_stops: usize = test
        .steps
        .iter()
        .map(|step| step.stops.as_ref().map_or(0, Vec::len))
        .sum();

    Ok(1 + step_stops)
}

/// Check observed stops against the expected ones
///
/// `expected == None` means the step is declared to produce no stops, so any
/// observed stop is a mismatch. Neither input is modified.
pub fn verify_stops(
    actual: &[Stop],
    expected: Option<&[Stop]>,
) -> std::result::Result<(), StopMismatch> {
    let Some(expected) = expected else {
        if actual.is_empty() {
            return Ok(());
        }
        return Err(StopMismatch {
            unmatched_expected: Vec::new(),
            unmatched_actual: actual.to_vec(),
        });
    };

    let mut actual_consumed = vec![false; actual.len()];
    let mut expected_consumed = vec![false; expected.len()];

    for stop in expected {
        if consume_first_match(actual, &mut actual_consumed, stop) {
            consume_first_match(expected, &mut expected_consumed, stop);
        }
    }

    let unmatched_expected = residual(expected, &expected_consumed);
    let unmatched_actual = residual(actual, &actual_consumed);

    if unmatched_expected.is_empty() && unmatched_actual.is_empty() {
        return Ok(());
    }

    tracing::debug!(
        missing = unmatched_expected.len(),
        unexpected = unmatched_actual.len(),
        "Stop sets differ"
    );

    Err(StopMismatch {
        unmatched_expected,
        unmatched_actual,
    })
}

/// Mark the first unconsumed stop equal to `wanted` as consumed
fn consume_first_match(stops: &[Stop], consumed: &mut [bool], wanted: &Stop) -> bool {
    let found = stops
        .iter()
        .zip(consumed.iter())
        .position(|(stop, &taken)| !taken && stop == wanted);

    match found {
        Some(idx) => {
            consumed[idx] = true;
            true
        }
        None => false,
    }
}

fn residual(stops: &[Stop], consumed: &[bool]) -> Vec<Stop> {
    stops
        .iter()
        .zip(consumed)
        .filter_map(|(stop, &taken)| (!taken).then(|| stop.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::Error;
    use crate::testing::scenario::{ActivityHandle, Step, StepKind};

    fn s1() -> Stop {
        Stop::new(10, "Foo>>#bar", 2, "main")
    }

    fn s2() -> Stop {
        Stop::new(11, "Foo>>#bar", 2, "main")
    }

    fn s3() -> Stop {
        Stop::new(4, "Actor>>#run", 1, "actor")
    }

    fn step(stops: Option<Vec<Stop>>) -> Step {
        Step {
            kind: StepKind::new("stepOver"),
            desc: None,
            activity: ActivityHandle::new("main"),
            stops,
        }
    }

    fn test_with(steps: Vec<Step>) -> Test {
        Test {
            title: "counting".to_string(),
            test: "stepping.som".to_string(),
            test_arg: None,
            initial_breakpoints: None,
            initial_stop: Some(s1()),
            steps,
            skip: false,
        }
    }

    #[test]
    fn test_count_expected_stops() {
        let test = test_with(vec![step(Some(vec![s1(), s2()])), step(Some(vec![])), step(None)]);
        assert_eq!(count_expected_stops(&test).unwrap(), 3);
    }

    #[test]
    fn test_count_without_steps() {
        assert_eq!(count_expected_stops(&test_with(Vec::new())).unwrap(), 1);
    }

    #[test]
    fn test_count_requires_initial_stop() {
        let mut test = test_with(vec![step(Some(vec![s1()]))]);
        test.initial_stop = None;
        assert!(matches!(
            count_expected_stops(&test),
            Err(Error::MissingInitialStop { .. })
        ));
    }

    #[test]
    fn test_exact_match_passes() {
        let stops = vec![s1(), s2(), s3()];
        assert_eq!(verify_stops(&stops, Some(stops.as_slice())), Ok(()));
    }

    #[test]
    fn test_order_independence() {
        assert_eq!(verify_stops(&[s2(), s1()], Some(&[s1(), s2()])), Ok(()));
        assert_eq!(verify_stops(&[s3(), s1(), s3()], Some(&[s3(), s3(), s1()])), Ok(()));

        let forward = verify_stops(&[s1(), s3()], Some(&[s1(), s2()])).unwrap_err();
        let reversed = verify_stops(&[s3(), s1()], Some(&[s2(), s1()])).unwrap_err();
        assert_eq!(forward, reversed);
    }

    #[test]
    fn test_absent_expected_requires_no_stops() {
        assert_eq!(verify_stops(&[], None), Ok(()));
        assert_eq!(
            verify_stops(&[s1()], None),
            Err(StopMismatch {
                unmatched_expected: vec![],
                unmatched_actual: vec![s1()],
            })
        );
    }

    #[test]
    fn test_empty_expected_behaves_like_absent() {
        assert_eq!(verify_stops(&[], Some(&[])), Ok(()));
        let err = verify_stops(&[s2()], Some(&[])).unwrap_err();
        assert_eq!(err.unmatched_actual, vec![s2()]);
        assert!(err.unmatched_expected.is_empty());
    }

    #[test]
    fn test_duplicates_are_counted() {
        assert_eq!(
            verify_stops(&[s1()], Some(&[s1(), s1()])),
            Err(StopMismatch {
                unmatched_expected: vec![s1()],
                unmatched_actual: vec![],
            })
        );
        assert_eq!(
            verify_stops(&[s1(), s1()], Some(&[s1()])),
            Err(StopMismatch {
                unmatched_expected: vec![],
                unmatched_actual: vec![s1()],
            })
        );
    }

    #[test]
    fn test_extra_and_missing_together() {
        assert_eq!(
            verify_stops(&[s1(), s3()], Some(&[s1(), s2()])),
            Err(StopMismatch {
                unmatched_expected: vec![s2()],
                unmatched_actual: vec![s3()],
            })
        );
    }

    #[test]
    fn test_every_field_is_significant() {
        let base = s1();
        let variants = [
            Stop { line: base.line + 1, ..base.clone() },
            Stop { method_name: "Foo>>#qux".to_string(), ..base.clone() },
            Stop { stack_height: base.stack_height + 1, ..base.clone() },
            Stop { activity: ActivityHandle::new("other"), ..base.clone() },
        ];

        for variant in variants {
            let err = verify_stops(&[variant.clone()], Some(&[base.clone()])).unwrap_err();
            assert_eq!(err.unmatched_expected, vec![base.clone()]);
            assert_eq!(err.unmatched_actual, vec![variant]);
        }
    }

    #[test]
    fn test_residuals_keep_original_order() {
        let err = verify_stops(&[s3(), s2()], Some(&[s2(), s1(), s1()])).unwrap_err();
        assert_eq!(err.unmatched_expected, vec![s1(), s1()]);
        assert_eq!(err.unmatched_actual, vec![s3()]);
    }

    #[test]
    fn test_inputs_are_not_mutated() {
        let actual = vec![s1(), s3()];
        let expected = vec![s1(), s2()];
        let actual_before = actual.clone();
        let expected_before = expected.clone();

        let first = verify_stops(&actual, Some(expected.as_slice()));
        let second = verify_stops(&actual, Some(expected.as_slice()));

        assert_eq!(first, second);
        assert_eq!(actual, actual_before);
        assert_eq!(expected, expected_before);
    }

    #[test]
    fn test_mismatch_display_lists_residuals() {
        let err = verify_stops(&[s3()], Some(&[s1()])).unwrap_err();
        let text = err.to_string();
        assert!(text.starts_with("1 expected stop(s) not observed, 1 unexpected stop(s) observed"));
        assert!(text.contains("missing:    main@Foo>>#bar:10 (stack height 2)"));
        assert!(text.contains("unexpected: actor@Actor>>#run:4 (stack height 1)"));
    }
}
