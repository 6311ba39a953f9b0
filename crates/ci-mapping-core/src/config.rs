//! Mapping tables loaded from parameter-store values.
//!
//! The error mapping is stored as one string with entries separated by
//! `||` (`"aaaa:ci_1||bbbb,cccc:ci_2"`); the reasons table is stored as a
//! JSON array of `{ci, reason}` objects.

use serde::{Deserialize, Serialize};

use crate::error::{ConfigurationError, Result};
use crate::event::CiMappingEvent;
use crate::indicator::ReasonEntry;

/// Separator between entries in the stored error mapping.
pub const MAPPING_SEPARATOR: &str = "||";

/// Environment variable holding the `||`-separated error mapping.
pub const ERROR_MAPPING_ENV: &str = "CI_MAPPING_CONTRAINDICATION_MAPPINGS";

/// Environment variable holding the JSON reasons table.
pub const REASONS_MAPPING_ENV: &str = "CI_MAPPING_REASONS_MAPPING";

/// Both mapping tables, loaded once per process and reused per invocation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CiMappingConfig {
    pub error_mapping: Vec<String>,
    pub reasons_mapping: Vec<ReasonEntry>,
}

impl CiMappingConfig {
    /// Parse the stored parameter values.
    ///
    /// Blank mapping segments are dropped; an entirely blank mapping yields
    /// an empty table, which validation reports as absent.
    pub fn from_parameters(error_mapping: &str, reasons_mapping: &str) -> Result<Self> {
        let error_mapping = error_mapping
            .split(MAPPING_SEPARATOR)
            .filter(|entry| !entry.trim().is_empty())
            .map(str::to_string)
            .collect();

        let reasons_mapping = if reasons_mapping.trim().is_empty() {
            Vec::new()
        } else {
            serde_json::from_str(reasons_mapping)?
        };

        Ok(Self {
            error_mapping,
            reasons_mapping,
        })
    }

    /// Load from [`ERROR_MAPPING_ENV`] and [`REASONS_MAPPING_ENV`].
    pub fn from_env() -> Result<Self> {
        let error_mapping = read_env(ERROR_MAPPING_ENV)?;
        let reasons_mapping = read_env(REASONS_MAPPING_ENV)?;
        Self::from_parameters(&error_mapping, &reasons_mapping)
    }

    /// Build the event for one invocation from these tables.
    pub fn event_for(&self, hmrc_errors: Vec<String>, journey_id: Option<String>) -> CiMappingEvent {
        CiMappingEvent {
            contra_indication_mapping: Some(self.error_mapping.clone()),
            hmrc_errors: Some(hmrc_errors),
            contra_indicator_reasons_mapping: Some(self.reasons_mapping.clone()),
            gov_journey_id: journey_id,
        }
    }
}

fn read_env(name: &str) -> Result<String> {
    std::env::var(name).map_err(|_| ConfigurationError::MissingParameter {
        name: name.to_string(),
    })
}
