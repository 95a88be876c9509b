//! Authorization request type.

use std::fmt::{Display, Formatter, Result as FmtResult};

use super::action::Action;
use super::actor::Actor;
use super::domain::Domain;
use super::entity::Entity;
use super::group::GroupSnapshot;
use super::rule_key::RuleKey;

/// One `(actor, domain, type, action, entity?, group?)` question.
///
/// Borrows the snapshots the caller already holds; nothing is cloned or
/// retained past the decision.
#[derive(Debug, Clone, Copy)]
pub struct Request<'a> {
    pub actor: Option<&'a Actor>,
    pub domain: Domain,
    pub type_slug: &'a str,
    pub action: Action,
    pub entity: Option<&'a Entity>,
    pub group: Option<&'a GroupSnapshot>,
}

impl<'a> Request<'a> {
    pub fn new(domain: Domain, type_slug: &'a str, action: Action) -> Self {
        Request {
            actor: None,
            domain,
            type_slug,
            action,
            entity: None,
            group: None,
        }
    }

    /// A request for a catalog key, without entity or group.
    pub fn for_key(key: &'a RuleKey, actor: Option<&'a Actor>) -> Self {
        Request::new(key.domain, &key.type_slug, key.action).with_actor(actor)
    }

    pub fn with_actor(mut self, actor: Option<&'a Actor>) -> Self {
        self.actor = actor;
        self
    }

    pub fn with_entity(mut self, entity: &'a Entity) -> Self {
        self.entity = Some(entity);
        self
    }

    pub fn with_group(mut self, group: Option<&'a GroupSnapshot>) -> Self {
        self.group = group;
        self
    }

    pub fn key(&self) -> RuleKey {
        RuleKey::new(self.domain, self.type_slug, self.action)
    }
}

impl Display for Request<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self.actor {
            Some(actor) => write!(f, "{} -> {}", actor, self.key()),
            None => write!(f, "anonymous -> {}", self.key()),
        }
    }
}
