//! End-to-end resolution scenarios through `CiMappingHandler::handle`.

use ci_mapping_core::{
    deduplicate, CiMappingEvent, CiMappingHandler, ConfigurationError, ContraIndicator,
    ReasonEntry,
};
use serde_json::json;

fn standard_event(errors: serde_json::Value) -> CiMappingEvent {
    serde_json::from_value(json!({
        "contraIndicationMapping": ["aaaa:ci_1", "bbbb,cccc,dddd:ci_2", "eeee,ffff,gggg:ci_3"],
        "hmrcErrors": errors,
        "contraIndicatorReasonsMapping": [
            { "ci": "ci_1", "reason": "ci_1 reason" },
            { "ci": "ci_2", "reason": "ci_2 reason" },
            { "ci": "ci_3", "reason": "ci_3 reason" }
        ],
        "govJourneyId": "journey-scenarios"
    }))
    .unwrap()
}

fn ci(code: &str) -> ContraIndicator {
    ContraIndicator::new(code, format!("{} reason", code))
}

fn handle(event: &CiMappingEvent) -> Result<Vec<ContraIndicator>, ConfigurationError> {
    CiMappingHandler::default().handle(event)
}

// ── Successful resolution ───────────────────────────────────────────────

#[test]
fn single_error_maps_to_single_ci() {
    let out = handle(&standard_event(json!(["aaaa"]))).unwrap();
    assert_eq!(out, vec![ci("ci_1")]);
}

#[test]
fn errors_sharing_a_ci_collapse_to_one_entry() {
    let out = handle(&standard_event(json!(["eeee", "ffff", "gggg"]))).unwrap();
    assert_eq!(out, vec![ci("ci_3")]);
}

#[test]
fn comma_packed_error_resolves_in_mapping_order() {
    let out = handle(&standard_event(json!(["gggg,aaaa,gggg"]))).unwrap();
    assert_eq!(out, vec![ci("ci_1"), ci("ci_3")]);
}

#[test]
fn errors_across_every_group_yield_every_ci() {
    let out = handle(&standard_event(json!(["dddd", "gggg", "aaaa"]))).unwrap();
    assert_eq!(out, vec![ci("ci_1"), ci("ci_2"), ci("ci_3")]);
}

#[test]
fn output_serializes_as_ci_reason_array() {
    let out = handle(&standard_event(json!(["bbbb"]))).unwrap();
    assert_eq!(
        serde_json::to_value(out).unwrap(),
        json!([{ "ci": "ci_2", "reason": "ci_2 reason" }])
    );
}

// ── Configuration failures ──────────────────────────────────────────────

#[test]
fn mapping_without_reason_names_the_missing_ci() {
    let event: CiMappingEvent = serde_json::from_value(json!({
        "contraIndicationMapping": ["aaaa:ci_1", "bbbb:ci_2"],
        "hmrcErrors": ["aaaa"],
        "contraIndicatorReasonsMapping": [{ "ci": "ci_2", "reason": "ci_2 reason" }]
    }))
    .unwrap();

    let err = handle(&event).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Unmatched ContraIndicatorReasonsMapping ci_1 detected in configured mappings"
    );
}

#[test]
fn reason_without_mapping_names_the_extra_ci() {
    let mut event = standard_event(json!(["aaaa"]));
    if let Some(reasons) = event.contra_indicator_reasons_mapping.as_mut() {
        reasons.push(ReasonEntry::new("ci_4", "ci_4 reason"));
    }

    let err = handle(&event).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Unmatched ContraIndicationMappings ci_4 detected in configured mappings"
    );
}

#[test]
fn unmapped_error_is_rejected() {
    let err = handle(&standard_event(json!(["not-a-mapped-error"]))).unwrap_err();
    assert_eq!(
        err.to_string(),
        "No matching hmrcError for any ContraIndicationMapping"
    );
}

#[test]
fn partially_mapped_errors_are_rejected() {
    let err = handle(&standard_event(json!(["aaaa", "not-a-mapped-error"]))).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Not all items in hmrc_errors have matching ContraIndicationMapping"
    );
}

#[test]
fn empty_hmrc_errors_are_reported_absent() {
    let err = handle(&standard_event(json!([]))).unwrap_err();
    assert_eq!(err.to_string(), "Hmrc errors absent in CiMappingEvent");
}

#[test]
fn empty_mapping_is_reported_before_absent_errors() {
    let event: CiMappingEvent = serde_json::from_value(json!({
        "contraIndicationMapping": [],
        "hmrcErrors": [],
        "contraIndicatorReasonsMapping": []
    }))
    .unwrap();

    let err = handle(&event).unwrap_err();
    assert_eq!(
        err.to_string(),
        "ContraIndicationMapping cannot be undefined in CiMappingEvent"
    );
}

#[test]
fn missing_reasons_table_is_reported() {
    let event: CiMappingEvent = serde_json::from_value(json!({
        "contraIndicationMapping": ["aaaa:ci_1"],
        "hmrcErrors": ["aaaa"]
    }))
    .unwrap();

    let err = handle(&event).unwrap_err();
    assert_eq!(
        err.to_string(),
        "ContraIndicatorReasonsMapping cannot be undefined in CiMappingEvent"
    );
}

#[test]
fn malformed_mapping_is_reported() {
    let event: CiMappingEvent = serde_json::from_value(json!({
        "contraIndicationMapping": ["aaaa,ci_1"],
        "hmrcErrors": ["aaaa"],
        "contraIndicatorReasonsMapping": [{ "ci": "ci_1", "reason": "ci_1 reason" }]
    }))
    .unwrap();

    let err = handle(&event).unwrap_err();
    assert_eq!(err.to_string(), "ContraIndicationMapping format is invalid");
}

// ── Properties ──────────────────────────────────────────────────────────

#[test]
fn deduplication_of_handler_output_is_a_no_op() {
    let out = handle(&standard_event(json!(["gggg,aaaa,gggg", "eeee", "bbbb"]))).unwrap();
    assert_eq!(deduplicate(out.clone()), out);
}

#[test]
fn matched_tables_validate_for_every_single_error() {
    for error in ["aaaa", "bbbb", "cccc", "dddd", "eeee", "ffff", "gggg"] {
        let out = handle(&standard_event(json!([error]))).unwrap();
        assert_eq!(out.len(), 1, "expected one CI for {}", error);
    }
}
