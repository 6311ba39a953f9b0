//! Order-preserving deduplication of resolved contra-indicators.

use std::collections::HashSet;

use crate::indicator::ContraIndicator;

/// Drop exact `(ci, reason)` duplicates, keeping first occurrences in order.
///
/// Indicators that share a `ci` but differ in `reason` are both kept.
pub fn deduplicate(indicators: Vec<ContraIndicator>) -> Vec<ContraIndicator> {
    let mut seen = HashSet::with_capacity(indicators.len());
    indicators
        .into_iter()
        .filter(|ci| seen.insert(ci.clone()))
        .collect()
}
