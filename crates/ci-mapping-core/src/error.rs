//! Error taxonomy for contra-indicator mapping.
//!
//! Every failure is a configuration problem: the shape or consistency of the
//! event payload (or the parameters it was built from) is wrong. None of them
//! can succeed on retry without a configuration change.

use thiserror::Error;

/// Configuration errors raised while validating or resolving a
/// [`CiMappingEvent`](crate::event::CiMappingEvent).
///
/// Display strings are part of the external contract: the calling workflow
/// branches on them.
#[derive(Error, Debug)]
pub enum ConfigurationError {
    #[error("ContraIndicationMapping cannot be undefined in CiMappingEvent")]
    MappingAbsent,

    #[error("ContraIndicatorReasonsMapping cannot be undefined in CiMappingEvent")]
    ReasonsAbsent,

    #[error("Hmrc errors absent in CiMappingEvent")]
    HmrcErrorsAbsent,

    #[error("ContraIndicationMapping format is invalid")]
    InvalidMappingFormat,

    /// CIs referenced by the mapping table with no row in the reasons table.
    #[error("Unmatched ContraIndicatorReasonsMapping {} detected in configured mappings", .cis.join(","))]
    UnmatchedReasons { cis: Vec<String> },

    /// CIs referenced by the reasons table with no entry in the mapping table.
    #[error("Unmatched ContraIndicationMappings {} detected in configured mappings", .cis.join(","))]
    UnmatchedMappings { cis: Vec<String> },

    #[error("No matching hmrcError for any ContraIndicationMapping")]
    NoMatchingHmrcError,

    #[error("Not all items in hmrc_errors have matching ContraIndicationMapping")]
    NotAllHmrcErrorsMatched,

    /// A resolved CI had no reason row. Unreachable after validation.
    #[error("No ContraIndicatorReasonsMapping found for resolved CI {ci}")]
    MissingReason { ci: String },

    #[error("ContraIndicatorReasonsMapping parameter is not valid JSON: {0}")]
    ReasonsParameter(#[from] serde_json::Error),

    #[error("configuration parameter {name} is not set")]
    MissingParameter { name: String },
}

impl ConfigurationError {
    /// Whether this error means "there was nothing to map" rather than a
    /// broken configuration.
    pub fn is_hmrc_errors_absent(&self) -> bool {
        matches!(self, ConfigurationError::HmrcErrorsAbsent)
    }
}

/// Result type for contra-indicator mapping operations.
pub type Result<T> = std::result::Result<T, ConfigurationError>;
