use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while loading and validating the site configuration.
///
/// Decisions themselves never fail; every evaluation yields a definite
/// allow or deny.
#[derive(Debug, Error, Serialize, Deserialize, PartialEq, Eq)]
pub enum PolicyError {
    #[error("failed to parse configuration: {0}")]
    ParseError(String),

    #[error("invalid {domain} type slug '{slug}'")]
    InvalidSlug { domain: String, slug: String },

    #[error("duplicate {domain} type '{slug}'")]
    DuplicateType { domain: String, slug: String },

    #[error("unknown action '{action}' in {key}")]
    UnknownAction { key: String, action: String },

    #[error("invalid role '{role}' in {key}")]
    InvalidRole { key: String, role: String },

    #[error("empty rule set for {0}")]
    EmptyRuleSet(String),

    #[error("group type '{group}' overrides unknown content type '{slug}'")]
    UnknownContainedType { group: String, slug: String },

    #[error("Invalid format: {0}")]
    InvalidFormat(String),
}

impl From<serde_json::Error> for PolicyError {
    fn from(err: serde_json::Error) -> Self {
        PolicyError::ParseError(err.to_string())
    }
}
