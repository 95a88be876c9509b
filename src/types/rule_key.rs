//! Dotted catalog keys such as `content.post.read`.

use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::PolicyError;

use super::action::Action;
use super::domain::Domain;

/// Identifies one rule set: `(domain, type, action)`.
///
/// The user domain has a single rule table, so its keys carry no type and
/// render as `user.<action>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema)]
pub struct RuleKey {
    pub domain: Domain,
    pub type_slug: String,
    pub action: Action,
}

impl RuleKey {
    pub fn new(domain: Domain, type_slug: impl Into<String>, action: Action) -> Self {
        let type_slug = match domain {
            Domain::User => String::new(),
            _ => type_slug.into(),
        };
        RuleKey {
            domain,
            type_slug,
            action,
        }
    }

    pub fn content(type_slug: impl Into<String>, action: Action) -> Self {
        RuleKey::new(Domain::Content, type_slug, action)
    }

    pub fn group(type_slug: impl Into<String>, action: Action) -> Self {
        RuleKey::new(Domain::Group, type_slug, action)
    }

    pub fn comment(type_slug: impl Into<String>, action: Action) -> Self {
        RuleKey::new(Domain::Comment, type_slug, action)
    }

    pub fn user(action: Action) -> Self {
        RuleKey::new(Domain::User, "", action)
    }
}

impl Display for RuleKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self.domain {
            Domain::User => write!(f, "{}.{}", self.domain, self.action),
            _ => write!(f, "{}.{}.{}", self.domain, self.type_slug, self.action),
        }
    }
}

impl FromStr for RuleKey {
    type Err = PolicyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || {
            PolicyError::InvalidFormat(format!(
                "Failed to parse rule key '{s}' (expected format: domain.type.action or user.action)"
            ))
        };

        let (domain, rest) = s.split_once('.').ok_or_else(invalid)?;
        let domain = Domain::from_str(domain).map_err(|_| invalid())?;

        let (type_slug, action) = match domain {
            Domain::User => ("", rest),
            _ => rest.split_once('.').ok_or_else(invalid)?,
        };
        if domain != Domain::User && type_slug.is_empty() {
            return Err(invalid());
        }

        let action = Action::from_str(action).map_err(|_| invalid())?;
        Ok(RuleKey::new(domain, type_slug, action))
    }
}
