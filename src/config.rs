//! Validated type definitions of the site configuration.
//!
//! These are produced by [`crate::compile_config`] and are immutable once
//! the engine is built.

use crate::types::{Action, RuleTable};

/// Comment settings of a content type, or of a contained type inside a
/// group type.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommentSettings {
    pub enabled: bool,
    pub permissions: RuleTable,
}

/// A content type and its global rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentTypeDefinition {
    pub slug: String,
    pub permissions: RuleTable,
    pub draft_mode: bool,
    pub comments: CommentSettings,
}

/// A group type's redeclaration of the rules for one content type posted
/// inside groups of that type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainedType {
    pub slug: String,
    pub permissions: RuleTable,
    pub comments: Option<CommentSettings>,
}

/// A group type, its own rules and its override blocks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupTypeDefinition {
    pub slug: String,
    pub permissions: RuleTable,
    /// Member-list rules, keyed by the plain actions (`read`, `update`, ...).
    pub member_permissions: RuleTable,
    pub draft_mode: bool,
    pub content_types: Vec<ContainedType>,
}

impl GroupTypeDefinition {
    /// The override block for a contained content type, if declared.
    pub fn contained(&self, slug: &str) -> Option<&ContainedType> {
        self.content_types.iter().find(|c| c.slug == slug)
    }

    /// Own rules plus member-list rules lifted to the `user.*` actions.
    pub(crate) fn rule_table(&self) -> RuleTable {
        let mut table = self.permissions.clone();
        table.extend_lifted(&self.member_permissions, |a: Action| a.for_members());
        table
    }
}

/// Everything the engine is built from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SiteConfig {
    pub content_types: Vec<ContentTypeDefinition>,
    pub group_types: Vec<GroupTypeDefinition>,
    pub user_permissions: RuleTable,
}
