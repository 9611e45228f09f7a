//! Breakpoint locations carried by scenarios
//!
//! Scenarios list the breakpoints the session driver installs before the
//! program starts. They are written as strings, either `file:line` or a
//! method name.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

use crate::common::Error;

/// Breakpoint location specification
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum BreakpointLocation {
    /// File and line number
    Line { file: PathBuf, line: u32 },
    /// Method or function name
    Method { name: String },
}

impl BreakpointLocation {
    /// Parse a location string like "file.som:42" or "Foo>>bar"
    pub fn parse(s: &str) -> Result<Self, Error> {
        // Only a trailing ':' followed by digits makes a line location, which
        // keeps Windows drive letters and selector syntax intact
        if let Some(colon_idx) = s.rfind(':') {
            let (file_part, line_part) = s.split_at(colon_idx);
            let line_str = &line_part[1..];

            if !line_str.is_empty() && line_str.chars().all(|c| c.is_ascii_digit()) {
                let line: u32 = line_str.parse().map_err(|_| {
                    Error::Config(format!("invalid breakpoint line number: {}", line_str))
                })?;
                if line == 0 {
                    return Err(Error::Config(format!(
                        "breakpoint line numbers start at 1: {}",
                        s
                    )));
                }
                return Ok(Self::Line {
                    file: PathBuf::from(file_part),
                    line,
                });
            }
        }

        if s.trim().is_empty() {
            return Err(Error::Config("empty breakpoint location".to_string()));
        }

        Ok(Self::Method {
            name: s.to_string(),
        })
    }
}

impl TryFrom<String> for BreakpointLocation {
    type Error = Error;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl From<BreakpointLocation> for String {
    fn from(location: BreakpointLocation) -> Self {
        location.to_string()
    }
}

impl fmt::Display for BreakpointLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Line { file, line } => write!(f, "{}:{}", file.display(), line),
            Self::Method { name } => write!(f, "{}", name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_file_line() {
        let loc = BreakpointLocation::parse("tests/stepping.som:42").unwrap();
        match loc {
            BreakpointLocation::Line { file, line } => {
                assert_eq!(file, PathBuf::from("tests/stepping.som"));
                assert_eq!(line, 42);
            }
            _ => panic!("Expected Line variant"),
        }
    }

    #[test]
    fn test_parse_method() {
        let loc = BreakpointLocation::parse("Foo>>bar:").unwrap();
        assert_eq!(
            loc,
            BreakpointLocation::Method {
                name: "Foo>>bar:".to_string()
            }
        );
    }

    #[test]
    fn test_parse_rejects_line_zero_and_empty() {
        assert!(BreakpointLocation::parse("main.som:0").is_err());
        assert!(BreakpointLocation::parse("  ").is_err());
    }

    #[test]
    fn test_string_round_trip_through_serde() {
        let loc: BreakpointLocation = serde_json::from_str("\"main.som:7\"").unwrap();
        assert_eq!(loc.to_string(), "main.som:7");
        assert_eq!(serde_json::to_string(&loc).unwrap(), "\"main.som:7\"");
    }
}
