//! Data model for decisions: actors, entity and group snapshots, roles,
//! actions and the decisions themselves.
//!
//! Canonical string forms:
//! - Role: `ADMIN`, `GROUP_MEMBER`, `PUBLIC`
//! - Action: `read`, `delete`, `user.read` (group member lists)
//! - Rule key: `content.post.read`, `group.project.user.read`, `user.admin`

mod action;
mod actor;
mod decision;
mod domain;
mod entity;
mod group;
mod request;
mod role;
mod rule_key;
mod rule_table;

pub use action::Action;
pub use actor::Actor;
pub use decision::{Decision, DenyReason, Grant};
pub use domain::Domain;
pub use entity::Entity;
pub use group::{GroupSnapshot, Member};
pub use request::Request;
pub use role::{ADMIN, GROUP_ADMIN, GROUP_MEMBER, PUBLIC, Role, RuleSet};
pub use rule_key::RuleKey;
pub(crate) use rule_table::effective_rules;
pub use rule_table::RuleTable;
