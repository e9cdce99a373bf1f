//! The right-hand side of the editor: values and test results produced by
//! the last run.

use serde::{Deserialize, Serialize};

/// One interaction value produced by a run (a top-level binding or
/// expression result).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Interaction {
    pub key: String,
    pub name: String,
    pub value: serde_json::Value,
}

/// Outcome of a single test check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckResult {
    pub name: String,
    pub passed: bool,
    #[serde(default)]
    pub message: Option<String>,
}

/// The pipeline result set. `outdated` flips on the instant any buffer text
/// changes and clears only when a fresh run succeeds, so stale results are
/// never presented as current.
#[derive(Debug, Clone, Default)]
pub struct RhsObjects {
    pub interactions: Vec<Interaction>,
    pub checks: Vec<CheckResult>,
    pub outdated: bool,
}

impl RhsObjects {
    pub fn mark_outdated(&mut self) {
        self.outdated = true;
    }

    /// Install the results of a fresh successful run
    pub fn replace(&mut self, interactions: Vec<Interaction>, checks: Vec<CheckResult>) {
        self.interactions = interactions;
        self.checks = checks;
        self.outdated = false;
    }
}
