//! The authenticated user a decision is made for.

use std::collections::BTreeSet;
use std::fmt::{Display, Formatter, Result as FmtResult};

use itertools::Itertools;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::role::{ADMIN, Role};

/// An authenticated actor with its global roles.
///
/// Anonymous requests are modelled as `Option<&Actor>::None` at the call
/// sites, never as an actor with an empty id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Actor {
    #[serde(default)]
    id: String,
    #[serde(default)]
    roles: BTreeSet<Role>,
}

impl Actor {
    pub fn new<I, R>(id: impl Into<String>, roles: I) -> Self
    where
        I: IntoIterator<Item = R>,
        R: Into<Role>,
    {
        Actor {
            id: id.into(),
            roles: roles.into_iter().map(Into::into).collect(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn roles(&self) -> &BTreeSet<Role> {
        &self.roles
    }

    /// Holder of the global `ADMIN` role.
    pub fn is_admin(&self) -> bool {
        self.roles.contains(ADMIN)
    }

    /// Ownership check that fails closed: a blank id or a missing author
    /// never match.
    pub fn owns(&self, author: Option<&str>) -> bool {
        match author {
            Some(author) if !author.is_empty() && !self.id.is_empty() => author == self.id,
            _ => false,
        }
    }
}

impl Display for Actor {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}[{}]", self.id, self.roles.iter().join(","))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use yare::parameterized;

    #[parameterized(
        same_author = { "myid", Some("myid"), true },
        other_author = { "myid", Some("another"), false },
        missing_author = { "myid", None, false },
        blank_author = { "myid", Some(""), false },
        blank_actor_blank_author = { "", Some(""), false },
    )]
    fn test_owns(actor_id: &str, author: Option<&str>, expected: bool) {
        let actor = Actor::new(actor_id, ["USER"]);
        assert_eq!(actor.owns(author), expected);
    }

    #[test]
    fn test_is_admin() {
        assert!(Actor::new("root", ["USER", "ADMIN"]).is_admin());
        assert!(!Actor::new("bob", ["USER"]).is_admin());
    }

    #[test]
    fn test_actor_deserializes_without_id() {
        let actor: Actor = serde_json::from_str(r#"{"roles": ["USER"]}"#).unwrap();
        assert_eq!(actor.id(), "");
        assert!(!actor.owns(Some("")));
    }

    #[test]
    fn test_actor_display() {
        let actor = Actor::new("alice", ["USER", "EDITOR"]);
        assert_eq!(actor.to_string(), "alice[EDITOR,USER]");
    }
}
