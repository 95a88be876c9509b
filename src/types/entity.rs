//! Minimal snapshot of the entity being acted on.

use std::fmt::{Display, Formatter, Result as FmtResult};

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// The fields of a content item, group or comment that decisions look at.
///
/// Callers pass whatever their data layer loaded; unknown fields are ignored
/// when deserializing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Entity {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(default)]
    pub draft: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_type: Option<String>,
}

impl Entity {
    pub fn new() -> Self {
        Entity::default()
    }

    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    pub fn with_draft(mut self, draft: bool) -> Self {
        self.draft = draft;
        self
    }

    /// Place the entity inside a group. The group type may be unknown to
    /// the caller, in which case the group snapshot's own type is used.
    pub fn in_group(mut self, group_id: impl Into<String>, group_type: Option<&str>) -> Self {
        self.group_id = Some(group_id.into());
        self.group_type = group_type.map(str::to_string);
        self
    }

    pub fn author(&self) -> Option<&str> {
        self.author.as_deref()
    }

    pub fn group_id(&self) -> Option<&str> {
        self.group_id.as_deref().filter(|id| !id.is_empty())
    }

    pub fn group_type(&self) -> Option<&str> {
        self.group_type.as_deref().filter(|t| !t.is_empty())
    }
}

impl Display for Entity {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(
            f,
            "author={} draft={} group={}",
            self.author().unwrap_or("-"),
            self.draft,
            self.group_id().unwrap_or("-")
        )
    }
}
