//! Group snapshots and their member lists.

use std::collections::BTreeSet;
use std::fmt::{Display, Formatter, Result as FmtResult};

use itertools::Itertools;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::entity::Entity;
use super::role::Role;

/// One entry of a group's member list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Member {
    pub id: String,
    #[serde(default)]
    pub roles: BTreeSet<Role>,
}

impl Member {
    pub fn new<I, R>(id: impl Into<String>, roles: I) -> Self
    where
        I: IntoIterator<Item = R>,
        R: Into<Role>,
    {
        Member {
            id: id.into(),
            roles: roles.into_iter().map(Into::into).collect(),
        }
    }
}

/// A group as loaded by the caller.
///
/// `type_slug` names the group type definition whose overrides apply to
/// content and comments posted inside the group.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct GroupSnapshot {
    pub id: String,
    #[serde(rename = "type")]
    pub type_slug: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(default)]
    pub draft: bool,
    #[serde(default)]
    pub members: Vec<Member>,
}

impl GroupSnapshot {
    pub fn new(id: impl Into<String>, type_slug: impl Into<String>) -> Self {
        GroupSnapshot {
            id: id.into(),
            type_slug: type_slug.into(),
            ..Default::default()
        }
    }

    pub fn with_member(mut self, member: Member) -> Self {
        self.members.push(member);
        self
    }

    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    /// View of the group as an entity of the group domain, for decisions
    /// about the group itself.
    pub fn as_entity(&self) -> Entity {
        Entity {
            author: self.author.clone(),
            draft: self.draft,
            group_id: None,
            group_type: None,
        }
    }
}

impl Display for GroupSnapshot {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(
            f,
            "{}::{}[{}]",
            self.type_slug,
            self.id,
            self.members.iter().map(|m| m.id.as_str()).join(", ")
        )
    }
}
