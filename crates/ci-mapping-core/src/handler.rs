//! Invocation entry point: validate, resolve, deduplicate.

use std::sync::Arc;

use crate::dedup::deduplicate;
use crate::error::{ConfigurationError, Result};
use crate::event::CiMappingEvent;
use crate::indicator::ContraIndicator;
use crate::obs::{
    emit_configuration_rejected, emit_hmrc_errors_absent, emit_resolution_finished,
    emit_resolution_started, InvocationSpan,
};
use crate::resolver::resolve;
use crate::sink::{LogSink, TracingLogSink};
use crate::validator::{validate, ValidatedMappings};

/// Source name attached to every line this handler logs.
pub const HANDLER_SOURCE: &str = "CiMappingHandler";

/// Maps one event's HMRC errors to a deduplicated list of contra-indicators.
///
/// Holds no per-invocation state; one handler can serve any number of events.
#[derive(Clone)]
pub struct CiMappingHandler {
    sink: Arc<dyn LogSink>,
}

impl CiMappingHandler {
    pub fn new(sink: Arc<dyn LogSink>) -> Self {
        Self { sink }
    }

    /// Handler logging through `tracing`.
    pub fn with_tracing() -> Self {
        Self::new(Arc::new(TracingLogSink))
    }

    /// Validate the event only.
    pub fn validate_only(&self, event: &CiMappingEvent) -> Result<ValidatedMappings> {
        let journey_id = event.journey_id();
        validate(event).inspect_err(|err| self.reject(journey_id, err))
    }

    /// Validate, resolve and deduplicate.
    ///
    /// Any configuration error is logged and returned; there is no partial
    /// result.
    pub fn handle(&self, event: &CiMappingEvent) -> Result<Vec<ContraIndicator>> {
        let journey_id = event.journey_id();
        let _span = InvocationSpan::enter(journey_id);

        let validated = self.validate_only(event)?;
        emit_resolution_started(
            journey_id,
            validated.entries.len(),
            validated.reasons.len(),
            validated.tokens.len(),
        );

        let resolved = resolve(&validated).inspect_err(|err| self.reject(journey_id, err))?;
        let indicators = deduplicate(resolved);

        emit_resolution_finished(journey_id, indicators.len());
        self.sink.info(
            HANDLER_SOURCE,
            journey_id,
            &format!("Resolved {} contra-indicator(s)", indicators.len()),
        );
        Ok(indicators)
    }

    /// Resolution for credential issuance: an event with no HMRC errors
    /// produces no indicators instead of failing.
    pub fn contra_indicators_for_credential(
        &self,
        event: &CiMappingEvent,
    ) -> Result<Vec<ContraIndicator>> {
        match self.handle(event) {
            Err(err) if err.is_hmrc_errors_absent() => {
                let journey_id = event.journey_id();
                emit_hmrc_errors_absent(journey_id);
                self.sink.info(HANDLER_SOURCE, journey_id, "Found no HMRC errors.");
                Ok(Vec::new())
            }
            other => other,
        }
    }

    fn reject(&self, journey_id: &str, err: &ConfigurationError) {
        if err.is_hmrc_errors_absent() {
            return;
        }
        emit_configuration_rejected(journey_id, err);
        self.sink.error(
            HANDLER_SOURCE,
            journey_id,
            &format!("An unexpected Error has occurred getting HMRC errors: {}", err),
        );
    }
}

impl Default for CiMappingHandler {
    fn default() -> Self {
        Self::with_tracing()
    }
}
