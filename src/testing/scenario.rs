//! Stepping scenario types
//!
//! Defines the data structures for deserializing stepping scenarios. Field
//! names follow the camelCase layout scenario authors already write
//! (`methodName`, `stackHeight`, `initialStop`, ...).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

use crate::common::{Error, Result};

use super::breakpoint::BreakpointLocation;

/// Test specific handle for an activity (thread, actor, process).
///
/// Handles are bound to the debuggee's real activity ids by the session
/// driver on first use; here they are only compared.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActivityHandle(pub String);

impl ActivityHandle {
    pub fn new(handle: impl Into<String>) -> Self {
        Self(handle.into())
    }
}

impl fmt::Display for ActivityHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Kind of stepping operation (e.g. "stepInto", "stepOver", "resume").
///
/// Left open: only the session driver interprets it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StepKind(pub String);

impl StepKind {
    pub fn new(kind: impl Into<String>) -> Self {
        Self(kind.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StepKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A single execution stop
///
/// Two stops are equal only if all four fields are equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stop {
    /// Line at which execution stops
    #[serde(deserialize_with = "positive_line")]
    pub line: u32,
    /// Method in which execution stops
    pub method_name: String,
    /// Height of the stack when execution stops
    pub stack_height: u32,
    /// Activity that stopped
    pub activity: ActivityHandle,
}

impl Stop {
    pub fn new(
        line: u32,
        method_name: impl Into<String>,
        stack_height: u32,
        activity: impl Into<String>,
    ) -> Self {
        Self {
            line,
            method_name: method_name.into(),
            stack_height,
            activity: ActivityHandle::new(activity),
        }
    }
}

impl fmt::Display for Stop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}@{}:{} (stack height {})",
            self.activity, self.method_name, self.line, self.stack_height
        )
    }
}

/// Source lines start at 1
fn positive_line<'de, D>(deserializer: D) -> std::result::Result<u32, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let line = u32::deserialize(deserializer)?;
    if line == 0 {
        return Err(serde::de::Error::custom("line numbers start at 1"));
    }
    Ok(line)
}

/// One stepping operation performed on a stopped activity
#[derive(Debug, Clone, Deserialize)]
pub struct Step {
    /// Type of the stepping operation to be performed
    #[serde(rename = "type")]
    pub kind: StepKind,
    /// Description shown in reports; the type is used if not given
    #[serde(default)]
    pub desc: Option<String>,
    /// Activity the step is performed on
    pub activity: ActivityHandle,
    /// All execution stops that are a result of this step
    #[serde(default)]
    pub stops: Option<Vec<Stop>>,
}

impl Step {
    /// Label used when reporting on this step
    pub fn label(&self) -> &str {
        self.desc.as_deref().unwrap_or(self.kind.as_str())
    }
}

/// A complete stepping scenario
///
/// `B` is the breakpoint payload handed to the session driver; the verifier
/// never looks inside it.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", bound(deserialize = "B: Deserialize<'de>"))]
pub struct Test<B = BreakpointLocation> {
    pub title: String,
    /// Program to be executed under the debugger
    pub test: String,
    /// Argument given to the program
    #[serde(default)]
    pub test_arg: Option<String>,
    #[serde(default)]
    pub initial_breakpoints: Option<Vec<B>>,
    /// Where the program halts first. Mandatory; kept optional here so a
    /// scenario lacking it still loads and is rejected with a clear error.
    #[serde(default)]
    pub initial_stop: Option<Stop>,
    #[serde(default)]
    pub steps: Vec<Step>,
    /// Mark test to be skipped
    #[serde(default)]
    pub skip: bool,
}

impl<B> Test<B> {
    /// The initial stop, or the precondition error if the scenario lacks one
    pub fn require_initial_stop(&self) -> Result<&Stop> {
        self.initial_stop
            .as_ref()
            .ok_or_else(|| Error::MissingInitialStop {
                title: self.title.clone(),
            })
    }
}

/// Whether a file should be read as JSON rather than YAML
pub(crate) fn is_json(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
}

/// Load a suite of scenarios from a YAML or JSON file
pub fn load_suite(path: &Path) -> Result<Vec<Test>> {
    let content = std::fs::read_to_string(path).map_err(|e| Error::file_read(path, &e))?;

    let suite: Vec<Test> = if is_json(path) {
        serde_json::from_str(&content)?
    } else {
        serde_yaml::from_str(&content)?
    };

    tracing::debug!(path = %path.display(), tests = suite.len(), "Loaded scenario suite");
    Ok(suite)
}
