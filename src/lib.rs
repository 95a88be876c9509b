// src/lib.rs
pub use catalog::RoleCatalog;
pub use config::{
    CommentSettings, ContainedType, ContentTypeDefinition, GroupTypeDefinition, SiteConfig,
};
pub use engine::PolicyEngine;
pub use error::PolicyError;
pub use loader::{compile_config, compile_config_value};
pub use membership::{role_of, roles_in};
pub use types::{
    ADMIN, Action, Actor, Decision, DenyReason, Domain, Entity, GROUP_ADMIN, GROUP_MEMBER, Grant,
    GroupSnapshot, Member, PUBLIC, Request, Role, RuleKey, RuleSet, RuleTable,
};

mod catalog;
mod config;
mod engine;
mod error;
mod evaluator;
mod loader;
mod membership;
mod scoped;
mod types;
