//! Error→CI mapping table parsing.
//!
//! Entries are configured as `"errA,errB:CI_CODE"`. Parsing never fails;
//! malformed entries are carried as partial records so the validator can
//! reject them together.

use serde::{Deserialize, Serialize};

/// One row of the error→CI table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MappingEntry {
    /// Trimmed error keys from the left of the first colon. Empty parts are kept.
    pub matched_error_keys: Vec<String>,
    /// Trimmed value right of the first colon; empty when there is no colon.
    pub ci_code: String,
}

impl MappingEntry {
    /// Parse a raw `"key1,key2:CI"` configuration string.
    pub fn parse(raw: &str) -> Self {
        let (keys, ci) = match raw.split_once(':') {
            Some((keys, ci)) => (keys, ci),
            None => (raw, ""),
        };

        Self {
            matched_error_keys: keys.split(',').map(|k| k.trim().to_string()).collect(),
            ci_code: ci.trim().to_string(),
        }
    }

    /// Keys re-joined with commas; the string tokens are matched against.
    pub fn joined_keys(&self) -> String {
        self.matched_error_keys.join(",")
    }

    /// Whether `token` matches this entry.
    ///
    /// NOTE: substring test on the joined key string, not key membership,
    /// so `"bb"` matches an entry keyed `"bbbb"`. Kept for compatibility
    /// with existing mapping configurations.
    pub fn matches(&self, token: &str) -> bool {
        self.joined_keys().contains(token)
    }

    /// Has at least one non-empty error key and a non-empty CI value.
    pub fn is_well_formed(&self) -> bool {
        self.matched_error_keys.iter().any(|k| !k.is_empty()) && !self.ci_code.is_empty()
    }
}

/// Parse every raw mapping string, preserving order.
pub fn parse_mappings<S: AsRef<str>>(raw: &[S]) -> Vec<MappingEntry> {
    raw.iter().map(|s| MappingEntry::parse(s.as_ref())).collect()
}

/// Split comma-packed error codes into trimmed tokens.
///
/// `["gggg,aaaa", "bbbb"]` becomes `["gggg", "aaaa", "bbbb"]`. Blank tokens
/// are dropped: an empty token is a substring of every entry.
pub fn flatten_error_codes<S: AsRef<str>>(codes: &[S]) -> Vec<String> {
    codes
        .iter()
        .flat_map(|code| code.as_ref().split(','))
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect()
}
