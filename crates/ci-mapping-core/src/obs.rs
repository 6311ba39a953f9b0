//! Structured observability hooks for mapping invocations.
//!
//! This module provides:
//! - Invocation-scoped tracing spans via the `InvocationSpan` RAII guard
//! - Emission functions for lifecycle events: start, finish, rejection
//!
//! For JSON output, pass `json = true` to [`init_tracing`](crate::init_tracing).

use tracing::info;

/// RAII guard that enters a journey-scoped span for one invocation.
///
/// # Example
///
/// ```ignore
/// let _span = InvocationSpan::enter("journey-123");
/// // every event below carries journey_id = "journey-123"
/// ```
pub struct InvocationSpan {
    _span: tracing::span::EnteredSpan,
}

impl InvocationSpan {
    /// Create and enter a span tagged with the journey id.
    pub fn enter(journey_id: &str) -> Self {
        let span = tracing::info_span!("ci_mapping.invocation", journey_id = %journey_id);
        Self {
            _span: span.entered(),
        }
    }
}

/// Emit event: resolution started with table and input sizes.
pub fn emit_resolution_started(journey_id: &str, mappings: usize, reasons: usize, errors: usize) {
    info!(
        event = "resolution.started",
        journey_id = %journey_id,
        mappings = mappings,
        reasons = reasons,
        hmrc_errors = errors,
    );
}

/// Emit event: resolution finished with the number of distinct indicators.
pub fn emit_resolution_finished(journey_id: &str, indicators: usize) {
    info!(
        event = "resolution.finished",
        journey_id = %journey_id,
        indicators = indicators,
    );
}

/// Emit event: no HMRC errors were supplied, so no indicators apply.
pub fn emit_hmrc_errors_absent(journey_id: &str) {
    info!(event = "hmrc_errors.absent", journey_id = %journey_id);
}

/// Emit event: configuration rejected (warning level).
pub fn emit_configuration_rejected(journey_id: &str, error: &dyn std::fmt::Display) {
    tracing::warn!(event = "configuration.rejected", journey_id = %journey_id, error = %error);
}
