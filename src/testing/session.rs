//! Observed session logs
//!
//! A session driver records, per test, the stops it saw after the program
//! halted first and after each step:
//!
//! ```json
//! { "tests": { "<title>": { "initialStop": [ ... ], "steps": [[ ... ], [ ... ]] } } }
//! ```
//!
//! Stop collections stay untyped until they are asked for, so a collection
//! that is not an array is reported as malformed input rather than as a
//! stop mismatch.

use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;
use std::path::Path;

use crate::common::{Error, Result};

use super::scenario::{is_json, Stop};

/// Stops recorded for every test of a run
#[derive(Debug, Deserialize)]
pub struct ObservedSession {
    #[serde(default)]
    tests: HashMap<String, ObservedTest>,
}

/// Stops recorded for one test
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObservedTest {
    #[serde(default)]
    initial_stop: Value,
    #[serde(default)]
    steps: Vec<Value>,
}

impl ObservedSession {
    /// Load a session log from a JSON or YAML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::file_read(path, &e))?;

        let value: Value = if is_json(path) {
            serde_json::from_str(&content)?
        } else {
            serde_yaml::from_str(&content)?
        };

        let session = Self::from_value(value)?;
        tracing::debug!(path = %path.display(), tests = session.tests.len(), "Loaded session log");
        Ok(session)
    }

    pub fn from_value(value: Value) -> Result<Self> {
        Ok(serde_json::from_value(value)?)
    }

    /// Observed stops for the test with the given title
    pub fn for_test(&self, title: &str) -> Option<&ObservedTest> {
        self.tests.get(title)
    }

    /// Titles of every recorded test
    pub fn titles(&self) -> impl Iterator<Item = &str> {
        self.tests.keys().map(String::as_str)
    }
}

impl ObservedTest {
    /// Stops observed when the program halted for the first time
    pub fn initial_stops(&self) -> Result<Vec<Stop>> {
        decode_stops(&self.initial_stop, "the initial stop")
    }

    /// Stops observed after the step at `index` (zero-based)
    pub fn step_stops(&self, index: usize) -> Result<Vec<Stop>> {
        let context = format!("step {}", index + 1);
        match self.steps.get(index) {
            Some(value) => decode_stops(value, &context),
            None => Err(Error::MalformedStops {
                context,
                reason: "no recorded entry".to_string(),
            }),
        }
    }

    /// Number of steps the driver recorded
    pub fn steps_recorded(&self) -> usize {
        self.steps.len()
    }
}

fn decode_stops(value: &Value, context: &str) -> Result<Vec<Stop>> {
    let Value::Array(items) = value else {
        return Err(Error::malformed_stops(context, "an array of stops", value));
    };

    items
        .iter()
        .map(|item| {
            let entry = format!("an entry of {}", context);
            if !item.is_object() {
                return Err(Error::malformed_stops(&entry, "a stop object", item));
            }
            Stop::deserialize(item).map_err(|e| Error::MalformedStops {
                context: entry,
                reason: format!("invalid stop: {}", e),
            })
        })
        .collect()
}
