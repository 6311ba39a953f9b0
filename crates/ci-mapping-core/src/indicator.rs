//! Reason-table rows and the resolved contra-indicator record.

use serde::{Deserialize, Serialize};

/// One row of the CI→reason table.
///
/// Both fields default to empty so partially-filled rows still deserialize
/// and are caught by validation instead of by the JSON layer.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ReasonEntry {
    #[serde(default)]
    pub ci: String,
    #[serde(default)]
    pub reason: String,
}

impl ReasonEntry {
    pub fn new(ci: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            ci: ci.into(),
            reason: reason.into(),
        }
    }

    /// The CI code with surrounding whitespace removed.
    pub fn ci_code(&self) -> &str {
        self.ci.trim()
    }
}

/// A resolved contra-indicator. Equal iff both `ci` and `reason` match.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContraIndicator {
    pub ci: String,
    pub reason: String,
}

impl ContraIndicator {
    pub fn new(ci: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            ci: ci.into(),
            reason: reason.into(),
        }
    }
}

/// Find the reason for `ci`. The first matching row wins.
pub fn find_reason<'a>(reasons: &'a [ReasonEntry], ci: &str) -> Option<&'a str> {
    let ci = ci.trim();
    reasons
        .iter()
        .find(|r| r.ci_code() == ci)
        .map(|r| r.reason.as_str())
}
