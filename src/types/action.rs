//! Actions that rule tables grant.

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumIter, EnumString};
use utoipa::ToSchema;

/// An operation on an entity.
///
/// The `user.*` actions are only meaningful in the group domain, where they
/// govern access to a group's member list.
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
pub enum Action {
    #[serde(rename = "read")]
    #[strum(serialize = "read")]
    Read,
    #[serde(rename = "create")]
    #[strum(serialize = "create")]
    Create,
    #[serde(rename = "update")]
    #[strum(serialize = "update")]
    Update,
    #[serde(rename = "delete")]
    #[strum(serialize = "delete")]
    Delete,
    #[serde(rename = "admin")]
    #[strum(serialize = "admin")]
    Admin,
    #[serde(rename = "user.read")]
    #[strum(serialize = "user.read")]
    MemberRead,
    #[serde(rename = "user.create")]
    #[strum(serialize = "user.create")]
    MemberCreate,
    #[serde(rename = "user.update")]
    #[strum(serialize = "user.update")]
    MemberUpdate,
    #[serde(rename = "user.delete")]
    #[strum(serialize = "user.delete")]
    MemberDelete,
    #[serde(rename = "user.admin")]
    #[strum(serialize = "user.admin")]
    MemberAdmin,
}

impl Action {
    /// The action whose rule set also grants this one.
    ///
    /// `admin` implies every plain action, `user.admin` every member-list
    /// action. The implying actions map to themselves.
    pub fn implied_by(&self) -> Action {
        if self.is_member_action() {
            Action::MemberAdmin
        } else {
            Action::Admin
        }
    }

    /// Whether this is one of the group member-list actions.
    pub fn is_member_action(&self) -> bool {
        matches!(
            self,
            Action::MemberRead
                | Action::MemberCreate
                | Action::MemberUpdate
                | Action::MemberDelete
                | Action::MemberAdmin
        )
    }

    /// Actions that the ownership grant applies to.
    pub fn is_ownable(&self) -> bool {
        matches!(self, Action::Update | Action::Delete)
    }

    /// Lift a plain action into its member-list counterpart.
    pub fn for_members(&self) -> Action {
        match self {
            Action::Read => Action::MemberRead,
            Action::Create => Action::MemberCreate,
            Action::Update => Action::MemberUpdate,
            Action::Delete => Action::MemberDelete,
            Action::Admin => Action::MemberAdmin,
            other => *other,
        }
    }
}
