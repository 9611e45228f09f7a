//! Error types for stepcheck
//!
//! Messages name the scenario or file at fault so a failing run points the
//! author straight at what to fix.

use std::io;
use thiserror::Error;

use crate::testing::StopMismatch;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for stepcheck
#[derive(Error, Debug)]
pub enum Error {
    // === Scenario Errors ===
    #[error("Test '{title}' has no initialStop; every scenario must declare where the program first halts")]
    MissingInitialStop { title: String },

    #[error("Test '{0}' not found in the observed session log")]
    UnknownTest(String),

    // === Verification Errors ===
    #[error("Malformed stops for {context}: {reason}")]
    MalformedStops { context: String, reason: String },

    #[error("Stop mismatch: {0}")]
    StopMismatch(#[from] StopMismatch),

    #[error("{failed} of {total} test(s) failed")]
    TestsFailed { failed: usize, total: usize },

    // === Configuration Errors ===
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid configuration file: {0}")]
    ConfigParse(String),

    // === IO Errors ===
    #[error("Failed to read file '{path}': {error}")]
    FileRead { path: String, error: String },

    // === Serialization Errors ===
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl Error {
    /// Create a malformed stops error, describing the offending value by kind
    pub fn malformed_stops(context: &str, expected: &str, found: &serde_json::Value) -> Self {
        let found = match found {
            serde_json::Value::Null => "null",
            serde_json::Value::Bool(_) => "a boolean",
            serde_json::Value::Number(_) => "a number",
            serde_json::Value::String(_) => "a string",
            serde_json::Value::Array(_) => "an array",
            serde_json::Value::Object(_) => "an object",
        };
        Self::MalformedStops {
            context: context.to_string(),
            reason: format!("expected {}, found {}", expected, found),
        }
    }

    /// Create a file read error for `path`
    pub fn file_read(path: &std::path::Path, error: &io::Error) -> Self {
        Self::FileRead {
            path: path.display().to_string(),
            error: error.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_stops_names_value_kind() {
        let err = Error::malformed_stops(
            "step 2 of 'demo'",
            "an array of stops",
            &serde_json::json!({"line": 3}),
        );
        assert_eq!(
            err.to_string(),
            "Malformed stops for step 2 of 'demo': expected an array of stops, found an object"
        );
    }

    #[test]
    fn test_missing_initial_stop_message() {
        let err = Error::MissingInitialStop {
            title: "stepping into a method".to_string(),
        };
        assert!(err.to_string().contains("'stepping into a method'"));
    }
}
