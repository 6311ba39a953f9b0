//! Resolution of HMRC error tokens to contra-indicators.

use crate::error::{ConfigurationError, Result};
use crate::indicator::{find_reason, ContraIndicator};
use crate::validator::ValidatedMappings;

/// Resolve every token against the mapping table.
///
/// Mapping entries are walked in configuration order and, for each entry,
/// every matching token contributes one `(ci, reason)` pair. The output is
/// therefore ordered by entry first, then by token; duplicates are kept for
/// [`deduplicate`](crate::dedup::deduplicate) to remove.
///
/// # Errors
///
/// `MissingReason` when a matched CI has no reason row. Validation rules
/// this out; hitting it means the inputs were not validated.
pub fn resolve(validated: &ValidatedMappings) -> Result<Vec<ContraIndicator>> {
    let mut resolved = Vec::new();

    for entry in &validated.entries {
        for token in validated.tokens.iter().filter(|t| entry.matches(t)) {
            let reason = find_reason(&validated.reasons, &entry.ci_code).ok_or_else(|| {
                ConfigurationError::MissingReason {
                    ci: entry.ci_code.clone(),
                }
            })?;
            tracing::trace!(token = %token, ci = %entry.ci_code, "hmrc error matched");
            resolved.push(ContraIndicator::new(entry.ci_code.clone(), reason));
        }
    }

    Ok(resolved)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicator::ReasonEntry;
    use crate::mapping::{flatten_error_codes, parse_mappings};

    fn validated(tokens: &[&str], reasons: Vec<ReasonEntry>) -> ValidatedMappings {
        ValidatedMappings {
            entries: parse_mappings(&["aaaa:ci_1", "bbbb,cccc,dddd:ci_2", "eeee,ffff,gggg:ci_3"]),
            tokens: flatten_error_codes(tokens),
            reasons,
        }
    }

    fn standard_reasons() -> Vec<ReasonEntry> {
        vec![
            ReasonEntry::new("ci_1", "ci_1 reason"),
            ReasonEntry::new("ci_2", "ci_2 reason"),
            ReasonEntry::new("ci_3", "ci_3 reason"),
        ]
    }

    #[test]
    fn test_single_token_resolves_to_its_ci() {
        let out = resolve(&validated(&["aaaa"], standard_reasons())).unwrap();
        assert_eq!(out, vec![ContraIndicator::new("ci_1", "ci_1 reason")]);
    }

    #[test]
    fn test_each_matching_token_contributes_before_dedup() {
        let out = resolve(&validated(&["eeee", "ffff", "gggg"], standard_reasons())).unwrap();
        assert_eq!(out.len(), 3);
        assert!(out
            .iter()
            .all(|ci| *ci == ContraIndicator::new("ci_3", "ci_3 reason")));
    }

    #[test]
    fn test_order_follows_mapping_entries_not_tokens() {
        let out = resolve(&validated(&["gggg,aaaa,gggg"], standard_reasons())).unwrap();
        assert_eq!(
            out,
            vec![
                ContraIndicator::new("ci_1", "ci_1 reason"),
                ContraIndicator::new("ci_3", "ci_3 reason"),
                ContraIndicator::new("ci_3", "ci_3 reason"),
            ]
        );
    }

    #[test]
    fn test_substring_token_matches_longer_key() {
        let out = resolve(&validated(&["bb"], standard_reasons())).unwrap();
        assert_eq!(out, vec![ContraIndicator::new("ci_2", "ci_2 reason")]);
    }

    #[test]
    fn test_missing_reason_is_an_error() {
        let reasons = vec![ReasonEntry::new("ci_2", "ci_2 reason")];
        let err = resolve(&validated(&["aaaa"], reasons)).unwrap_err();
        match err {
            ConfigurationError::MissingReason { ci } => assert_eq!(ci, "ci_1"),
            other => panic!("Expected MissingReason, got {:?}", other),
        }
    }
}
