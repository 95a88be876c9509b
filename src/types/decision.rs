//! Authorization decisions and what produced them.

use std::fmt::{Display, Formatter, Result as FmtResult};

use serde::{Deserialize, Serialize};
use strum_macros::AsRefStr;
use utoipa::ToSchema;

use super::role::Role;

/// What granted an allowed action.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema, AsRefStr)]
#[serde(tag = "kind", content = "role", rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Grant {
    /// The rule set contains `PUBLIC`.
    Public,
    /// The actor holds the global `ADMIN` role.
    Admin,
    /// One of the actor's global roles is in the rule set.
    Role(Role),
    /// A role the actor holds within the enclosing group is in the rule set.
    MembershipRole(Role),
    /// The actor authored the entity.
    Ownership,
}

impl Display for Grant {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Grant::Role(role) | Grant::MembershipRole(role) => {
                write!(f, "{}={}", self.as_ref(), role)
            }
            _ => write!(f, "{}", self.as_ref()),
        }
    }
}

/// Why an action was denied.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema, AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum DenyReason {
    /// The rule set requires a session and none was given.
    Unauthenticated,
    /// None of the actor's roles is in the rule set.
    NoMatchingRole,
    /// The entity is a draft and the actor is neither owner nor admin.
    Draft,
}

/// Allow or deny, with the grant or the reason.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum Decision {
    Allow { grant: Grant },
    Deny { reason: DenyReason },
}

impl Decision {
    pub fn allow(grant: Grant) -> Self {
        Decision::Allow { grant }
    }

    pub fn deny(reason: DenyReason) -> Self {
        Decision::Deny { reason }
    }

    pub fn is_allowed(&self) -> bool {
        matches!(self, Decision::Allow { .. })
    }

    pub fn grant(&self) -> Option<&Grant> {
        match self {
            Decision::Allow { grant } => Some(grant),
            Decision::Deny { .. } => None,
        }
    }

    /// Keep the first allow; between two denials keep the more specific
    /// reason (`NoMatchingRole` over `Unauthenticated`).
    pub(crate) fn or_else(self, other: impl FnOnce() -> Decision) -> Decision {
        match self {
            Decision::Allow { .. } => self,
            Decision::Deny { reason } => match other() {
                allow @ Decision::Allow { .. } => allow,
                Decision::Deny {
                    reason: DenyReason::Unauthenticated,
                } => Decision::Deny { reason },
                deny => deny,
            },
        }
    }
}

impl Display for Decision {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Decision::Allow { grant } => write!(f, "Allow({grant})"),
            Decision::Deny { reason } => write!(f, "Deny({})", reason.as_ref()),
        }
    }
}

impl From<Decision> for bool {
    fn from(decision: Decision) -> Self {
        decision.is_allowed()
    }
}
