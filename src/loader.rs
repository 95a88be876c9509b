use std::collections::{BTreeMap, HashSet};
use std::str::FromStr;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;
use tracing::info;

use crate::config::{
    CommentSettings, ContainedType, ContentTypeDefinition, GroupTypeDefinition, SiteConfig,
};
use crate::error::PolicyError;
use crate::types::{Action, Role, RuleSet, RuleTable};

static SLUG_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z0-9][a-z0-9_-]*$").expect("slug pattern must compile"));

static ROLE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z][A-Za-z0-9_-]*$").expect("role pattern must compile"));

type RawPermissions = BTreeMap<String, Vec<String>>;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawSite {
    content: RawContentSection,
    groups: RawGroupSection,
    user: RawPermissionBlock,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawContentSection {
    types: Vec<RawContentType>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawGroupSection {
    types: Vec<RawGroupType>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawPermissionBlock {
    permissions: RawPermissions,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawPublishing {
    #[serde(rename = "draftMode")]
    draft_mode: bool,
}

#[derive(Debug, Deserialize)]
struct RawComments {
    #[serde(default = "enabled_by_default")]
    enabled: bool,
    #[serde(default)]
    permissions: RawPermissions,
}

fn enabled_by_default() -> bool {
    true
}

#[derive(Debug, Deserialize)]
struct RawContentType {
    slug: String,
    #[serde(default)]
    permissions: RawPermissions,
    #[serde(default)]
    publishing: RawPublishing,
    #[serde(default)]
    comments: Option<RawComments>,
}

#[derive(Debug, Deserialize)]
struct RawGroupType {
    slug: String,
    #[serde(default)]
    permissions: RawPermissions,
    #[serde(default)]
    publishing: RawPublishing,
    #[serde(default)]
    user: RawPermissionBlock,
    #[serde(default, rename = "contentTypes")]
    content_types: Vec<RawContainedType>,
}

#[derive(Debug, Deserialize)]
struct RawContainedType {
    slug: String,
    #[serde(default)]
    permissions: RawPermissions,
    #[serde(default)]
    comments: Option<RawComments>,
}

/// Parse and validate the JSON site configuration.
///
/// The document follows the shape `{content: {types}, groups: {types}, user:
/// {permissions}}`; fields the engine does not use (titles, form fields, ...)
/// are ignored. Validation rejects malformed slugs and role tokens, unknown
/// actions, empty rule sets, duplicate types and override blocks for
/// content types that do not exist.
///
/// Example:
/// ```rust
/// use edge_policy_core::compile_config;
/// let config = compile_config(r#"{
///     "content": { "types": [
///         { "slug": "post", "permissions": { "read": ["PUBLIC"], "update": ["ADMIN"] } }
///     ] }
/// }"#).unwrap();
/// assert_eq!(config.content_types.len(), 1);
/// ```
pub fn compile_config(text: &str) -> Result<SiteConfig, PolicyError> {
    let raw: RawSite = serde_json::from_str(text)?;
    compile_raw(raw)
}

/// Same as [`compile_config`], for configuration that is already parsed.
pub fn compile_config_value(value: serde_json::Value) -> Result<SiteConfig, PolicyError> {
    let raw: RawSite = serde_json::from_value(value)?;
    compile_raw(raw)
}

fn compile_raw(raw: RawSite) -> Result<SiteConfig, PolicyError> {
    let mut seen = HashSet::new();
    let mut content_types = Vec::with_capacity(raw.content.types.len());
    for raw_type in raw.content.types {
        check_slug("content", &raw_type.slug, &mut seen)?;
        content_types.push(compile_content_type(raw_type)?);
    }

    let mut seen = HashSet::new();
    let mut group_types = Vec::with_capacity(raw.groups.types.len());
    for raw_type in raw.groups.types {
        check_slug("group", &raw_type.slug, &mut seen)?;
        group_types.push(compile_group_type(raw_type, &content_types)?);
    }

    let user_permissions = compile_rules("user", &raw.user.permissions)?;

    info!(
        event = "Config",
        phase = "Loaded",
        content_types = content_types.len(),
        group_types = group_types.len(),
        user_actions = user_permissions.len()
    );

    Ok(SiteConfig {
        content_types,
        group_types,
        user_permissions,
    })
}

fn compile_content_type(raw: RawContentType) -> Result<ContentTypeDefinition, PolicyError> {
    let permissions = compile_rules(&format!("content.{}", raw.slug), &raw.permissions)?;
    let comments = match &raw.comments {
        Some(comments) => compile_comments(&format!("comment.{}", raw.slug), comments)?,
        None => CommentSettings::default(),
    };
    Ok(ContentTypeDefinition {
        slug: raw.slug,
        permissions,
        draft_mode: raw.publishing.draft_mode,
        comments,
    })
}

fn compile_group_type(
    raw: RawGroupType,
    content_types: &[ContentTypeDefinition],
) -> Result<GroupTypeDefinition, PolicyError> {
    let prefix = format!("group.{}", raw.slug);
    let permissions = compile_rules(&prefix, &raw.permissions)?;
    let member_permissions = compile_rules(&format!("{prefix}.user"), &raw.user.permissions)?;

    let mut seen = HashSet::new();
    let mut contained = Vec::with_capacity(raw.content_types.len());
    for block in raw.content_types {
        check_slug(&prefix, &block.slug, &mut seen)?;
        if !content_types.iter().any(|t| t.slug == block.slug) {
            return Err(PolicyError::UnknownContainedType {
                group: raw.slug.clone(),
                slug: block.slug,
            });
        }
        let block_prefix = format!("{prefix}.{}", block.slug);
        let permissions = compile_rules(&block_prefix, &block.permissions)?;
        let comments = block
            .comments
            .as_ref()
            .map(|c| compile_comments(&format!("{block_prefix}.comments"), c))
            .transpose()?;
        contained.push(ContainedType {
            slug: block.slug,
            permissions,
            comments,
        });
    }

    Ok(GroupTypeDefinition {
        slug: raw.slug,
        permissions,
        member_permissions,
        draft_mode: raw.publishing.draft_mode,
        content_types: contained,
    })
}

fn compile_comments(prefix: &str, raw: &RawComments) -> Result<CommentSettings, PolicyError> {
    Ok(CommentSettings {
        enabled: raw.enabled,
        permissions: compile_rules(prefix, &raw.permissions)?,
    })
}

fn check_slug(domain: &str, slug: &str, seen: &mut HashSet<String>) -> Result<(), PolicyError> {
    if !SLUG_PATTERN.is_match(slug) {
        return Err(PolicyError::InvalidSlug {
            domain: domain.to_string(),
            slug: slug.to_string(),
        });
    }
    if !seen.insert(slug.to_string()) {
        return Err(PolicyError::DuplicateType {
            domain: domain.to_string(),
            slug: slug.to_string(),
        });
    }
    Ok(())
}

/// Rule tables in the configuration are keyed by the plain actions only;
/// member-list actions come from a group type's `user` block.
fn compile_rules(prefix: &str, raw: &RawPermissions) -> Result<RuleTable, PolicyError> {
    let mut table = RuleTable::new();
    for (name, roles) in raw {
        let action = Action::from_str(name)
            .ok()
            .filter(|a| !a.is_member_action())
            .ok_or_else(|| PolicyError::UnknownAction {
                key: prefix.to_string(),
                action: name.clone(),
            })?;

        let key = format!("{prefix}.{action}");
        if roles.is_empty() {
            return Err(PolicyError::EmptyRuleSet(key));
        }
        if let Some(bad) = roles.iter().find(|r| !ROLE_PATTERN.is_match(r)) {
            return Err(PolicyError::InvalidRole {
                key,
                role: bad.clone(),
            });
        }

        table.insert(action, roles.iter().map(|r| Role::new(r.as_str())).collect::<RuleSet>());
    }
    Ok(table)
}
