//! Input event for a single mapping invocation.

use serde::{Deserialize, Serialize};

use crate::indicator::ReasonEntry;

/// Journey id used in log lines when the event carries none.
pub const UNKNOWN_JOURNEY_ID: &str = "unknown";

/// Payload handed to the mapping step by the workflow.
///
/// Every field is optional on the wire; absence is reported by validation
/// with the same message as an empty list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CiMappingEvent {
    /// Raw `"errA,errB:CI"` strings.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contra_indication_mapping: Option<Vec<String>>,

    /// Upstream error codes; each may be a comma-packed list.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hmrc_errors: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contra_indicator_reasons_mapping: Option<Vec<ReasonEntry>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gov_journey_id: Option<String>,
}

impl CiMappingEvent {
    /// Journey id for log correlation, or [`UNKNOWN_JOURNEY_ID`].
    pub fn journey_id(&self) -> &str {
        self.gov_journey_id
            .as_deref()
            .filter(|id| !id.is_empty())
            .unwrap_or(UNKNOWN_JOURNEY_ID)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_deserializes_camel_case_payload() {
        let event: CiMappingEvent = serde_json::from_value(json!({
            "contraIndicationMapping": ["aaaa:ci_1"],
            "hmrcErrors": ["aaaa"],
            "contraIndicatorReasonsMapping": [{ "ci": "ci_1", "reason": "ci_1 reason" }],
            "govJourneyId": "journey-1"
        }))
        .unwrap();

        assert_eq!(
            event.contra_indication_mapping,
            Some(vec!["aaaa:ci_1".to_string()])
        );
        assert_eq!(event.hmrc_errors, Some(vec!["aaaa".to_string()]));
        assert_eq!(
            event.contra_indicator_reasons_mapping,
            Some(vec![ReasonEntry::new("ci_1", "ci_1 reason")])
        );
        assert_eq!(event.journey_id(), "journey-1");
    }

    #[test]
    fn test_empty_object_deserializes_to_all_absent() {
        let event: CiMappingEvent = serde_json::from_str("{}").unwrap();
        assert_eq!(event, CiMappingEvent::default());
        assert_eq!(event.journey_id(), UNKNOWN_JOURNEY_ID);
    }

    #[test]
    fn test_blank_journey_id_falls_back_to_unknown() {
        let event = CiMappingEvent {
            gov_journey_id: Some(String::new()),
            ..Default::default()
        };
        assert_eq!(event.journey_id(), UNKNOWN_JOURNEY_ID);
    }
}
