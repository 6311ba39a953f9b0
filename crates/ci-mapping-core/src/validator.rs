//! Configuration validation for a [`CiMappingEvent`].
//!
//! Runs before any resolution and fails fast: the first failing check
//! decides the reported error, and nothing is resolved on failure.

use std::collections::HashSet;

use serde::Serialize;

use crate::error::{ConfigurationError, Result};
use crate::event::CiMappingEvent;
use crate::indicator::ReasonEntry;
use crate::mapping::{flatten_error_codes, parse_mappings, MappingEntry};

/// Parsed, validated inputs ready for resolution.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidatedMappings {
    pub entries: Vec<MappingEntry>,
    /// Flattened, trimmed HMRC error tokens in input order.
    pub tokens: Vec<String>,
    pub reasons: Vec<ReasonEntry>,
}

/// Validate an event.
///
/// Checks, in order:
/// 1. The mapping table is present and non-empty.
/// 2. The reasons table is present and non-empty.
/// 3. `hmrcErrors` has at least one non-blank token after flattening.
/// 4. Every mapping entry has an error key and a CI value.
/// 5. The mapping and reasons tables reference the same set of CIs.
/// 6. Every HMRC error token matches some mapping entry.
///
/// # Errors
///
/// - `MappingAbsent`, `ReasonsAbsent`, `HmrcErrorsAbsent`: checks 1–3.
/// - `InvalidMappingFormat`: check 4.
/// - `UnmatchedReasons`: a mapped CI has no reason row.
/// - `UnmatchedMappings`: a reason row's CI is never mapped.
/// - `NoMatchingHmrcError`: no token matched any entry.
/// - `NotAllHmrcErrorsMatched`: some tokens matched, some did not.
pub fn validate(event: &CiMappingEvent) -> Result<ValidatedMappings> {
    let raw_mappings = non_empty(&event.contra_indication_mapping)
        .ok_or(ConfigurationError::MappingAbsent)?;
    let reasons = non_empty(&event.contra_indicator_reasons_mapping)
        .ok_or(ConfigurationError::ReasonsAbsent)?;
    let hmrc_errors =
        non_empty(&event.hmrc_errors).ok_or(ConfigurationError::HmrcErrorsAbsent)?;

    let entries = parse_mappings(raw_mappings);
    let tokens = flatten_error_codes(hmrc_errors);
    if tokens.is_empty() {
        return Err(ConfigurationError::HmrcErrorsAbsent);
    }

    if !entries.iter().all(MappingEntry::is_well_formed) {
        return Err(ConfigurationError::InvalidMappingFormat);
    }

    check_cross_consistency(&entries, reasons)?;
    check_token_coverage(&entries, &tokens)?;

    Ok(ValidatedMappings {
        entries,
        tokens,
        reasons: reasons.to_vec(),
    })
}

fn non_empty<T>(list: &Option<Vec<T>>) -> Option<&[T]> {
    list.as_deref().filter(|l| !l.is_empty())
}

/// Distinct values in first-seen order.
fn ordered_distinct<'a>(values: impl Iterator<Item = &'a str>) -> Vec<&'a str> {
    let mut seen = HashSet::new();
    values.filter(|v| seen.insert(*v)).collect()
}

fn check_cross_consistency(entries: &[MappingEntry], reasons: &[ReasonEntry]) -> Result<()> {
    let mapped = ordered_distinct(entries.iter().map(|e| e.ci_code.as_str()));
    let reasoned = ordered_distinct(reasons.iter().map(ReasonEntry::ci_code));

    let reasoned_set: HashSet<&str> = reasoned.iter().copied().collect();
    let mapped_set: HashSet<&str> = mapped.iter().copied().collect();

    let without_reason: Vec<String> = mapped
        .iter()
        .filter(|ci| !reasoned_set.contains(*ci))
        .map(|ci| ci.to_string())
        .collect();
    if !without_reason.is_empty() {
        return Err(ConfigurationError::UnmatchedReasons {
            cis: without_reason,
        });
    }

    let without_mapping: Vec<String> = reasoned
        .iter()
        .filter(|ci| !mapped_set.contains(*ci))
        .map(|ci| ci.to_string())
        .collect();
    if !without_mapping.is_empty() {
        return Err(ConfigurationError::UnmatchedMappings {
            cis: without_mapping,
        });
    }

    Ok(())
}

fn check_token_coverage(entries: &[MappingEntry], tokens: &[String]) -> Result<()> {
    let matched = tokens
        .iter()
        .filter(|token| entries.iter().any(|e| e.matches(token)))
        .count();

    if matched == 0 {
        Err(ConfigurationError::NoMatchingHmrcError)
    } else if matched < tokens.len() {
        Err(ConfigurationError::NotAllHmrcErrorsMatched)
    } else {
        Ok(())
    }
}
