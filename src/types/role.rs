//! Role tokens and the rule sets built from them.

use std::borrow::Borrow;
use std::collections::BTreeSet;
use std::fmt::{Display, Formatter, Result as FmtResult};

use itertools::Itertools;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Matches any actor, including anonymous ones.
pub const PUBLIC: &str = "PUBLIC";
/// Implicit superuser.
pub const ADMIN: &str = "ADMIN";
/// Membership role of group administrators.
pub const GROUP_ADMIN: &str = "GROUP_ADMIN";
/// Membership role of plain group members.
pub const GROUP_MEMBER: &str = "GROUP_MEMBER";

/// An opaque role token, e.g. `USER` or `GROUP_ADMIN`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct Role(String);

impl Role {
    pub fn new(name: impl Into<String>) -> Self {
        Role(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_public(&self) -> bool {
        self.0 == PUBLIC
    }

    pub fn is_admin(&self) -> bool {
        self.0 == ADMIN
    }

    /// Rank used to pick the highest-privilege membership role.
    pub(crate) fn membership_rank(&self) -> u8 {
        match self.0.as_str() {
            GROUP_ADMIN => 2,
            GROUP_MEMBER => 1,
            _ => 0,
        }
    }
}

impl Display for Role {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.0)
    }
}

impl Borrow<str> for Role {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Role {
    fn from(name: &str) -> Self {
        Role::new(name)
    }
}

impl From<String> for Role {
    fn from(name: String) -> Self {
        Role(name)
    }
}

/// The roles permitted to perform one action on one type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RuleSet(BTreeSet<Role>);

impl RuleSet {
    pub fn new<I, R>(roles: I) -> Self
    where
        I: IntoIterator<Item = R>,
        R: Into<Role>,
    {
        RuleSet(roles.into_iter().map(Into::into).collect())
    }

    /// `PUBLIC` in a rule set lifts the authentication requirement.
    pub fn is_public(&self) -> bool {
        self.0.contains(PUBLIC)
    }

    pub fn contains(&self, role: &str) -> bool {
        self.0.contains(role)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn roles(&self) -> &BTreeSet<Role> {
        &self.0
    }

    /// Set union, used to fold implying actions into one rule set.
    pub fn union(&self, other: &RuleSet) -> RuleSet {
        RuleSet(self.0.union(&other.0).cloned().collect())
    }
}

impl Display for RuleSet {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "[{}]", self.0.iter().join(", "))
    }
}

impl<R: Into<Role>> FromIterator<R> for RuleSet {
    fn from_iter<T: IntoIterator<Item = R>>(iter: T) -> Self {
        RuleSet::new(iter)
    }
}
