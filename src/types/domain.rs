//! Entity categories that carry their own rule tables.

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumIter, EnumString};
use utoipa::ToSchema;

/// The category of entity being authorized.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    ToSchema,
    AsRefStr,
    Display,
    EnumIter,
    EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Domain {
    Content,
    Group,
    Comment,
    User,
}

impl Domain {
    /// Whether authors of entities in this domain get the ownership grant.
    pub fn has_owners(&self) -> bool {
        matches!(self, Domain::Content | Domain::Group | Domain::Comment)
    }

    /// Whether entities in this domain are subject to the draft gate.
    pub fn has_drafts(&self) -> bool {
        matches!(self, Domain::Content | Domain::Group)
    }

    /// Whether entities in this domain can live inside a group.
    pub fn is_group_scoped(&self) -> bool {
        matches!(self, Domain::Content | Domain::Comment)
    }
}
