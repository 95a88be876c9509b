//! The role catalog: immutable lookup from `(domain, type)` to rule tables.

use std::collections::HashMap;

use crate::config::{GroupTypeDefinition, SiteConfig};
use crate::types::{Action, Domain, RuleKey, RuleSet, RuleTable};

#[derive(Debug, Clone)]
struct TypeEntry {
    rules: RuleTable,
    draft_mode: bool,
}

/// Rule tables for every known `(domain, type)` pair, plus the group type
/// definitions needed to resolve group-scoped overrides.
#[derive(Debug, Clone, Default)]
pub struct RoleCatalog {
    entries: HashMap<Domain, HashMap<String, TypeEntry>>,
    group_types: HashMap<String, GroupTypeDefinition>,
}

impl RoleCatalog {
    pub fn from_config(config: &SiteConfig) -> Self {
        let mut catalog = RoleCatalog::default();

        for content in &config.content_types {
            catalog.register(
                Domain::Content,
                &content.slug,
                content.permissions.clone(),
                content.draft_mode,
            );
            // Comments on a type without enabled comments stay unknown.
            if content.comments.enabled {
                catalog.register(
                    Domain::Comment,
                    &content.slug,
                    content.comments.permissions.clone(),
                    false,
                );
            }
        }

        for group in &config.group_types {
            catalog.register(Domain::Group, &group.slug, group.rule_table(), group.draft_mode);
            catalog.group_types.insert(group.slug.clone(), group.clone());
        }

        catalog.register(Domain::User, "", config.user_permissions.clone(), false);
        catalog
    }

    fn register(&mut self, domain: Domain, type_slug: &str, rules: RuleTable, draft_mode: bool) {
        self.entries
            .entry(domain)
            .or_default()
            .insert(type_slug.to_string(), TypeEntry { rules, draft_mode });
    }

    fn entry(&self, domain: Domain, type_slug: &str) -> Option<&TypeEntry> {
        let type_slug = match domain {
            Domain::User => "",
            _ => type_slug,
        };
        self.entries.get(&domain)?.get(type_slug)
    }

    /// The rule table for a type. `None` for types the domain does not
    /// know; the user domain ignores `type_slug`.
    pub fn permissions_for(&self, domain: Domain, type_slug: &str) -> Option<&RuleTable> {
        self.entry(domain, type_slug).map(|e| &e.rules)
    }

    /// Effective rule set for an action, with `admin` implication applied.
    /// Empty when the type or action is not configured.
    pub fn rules_for(&self, domain: Domain, type_slug: &str, action: Action) -> RuleSet {
        self.permissions_for(domain, type_slug)
            .map(|table| table.effective(action))
            .unwrap_or_default()
    }

    pub fn rules_for_key(&self, key: &RuleKey) -> RuleSet {
        self.rules_for(key.domain, &key.type_slug, key.action)
    }

    pub fn is_known(&self, domain: Domain, type_slug: &str) -> bool {
        self.entry(domain, type_slug).is_some()
    }

    /// Whether drafts of this type are hidden from non-owners.
    pub fn draft_mode(&self, domain: Domain, type_slug: &str) -> bool {
        self.entry(domain, type_slug).is_some_and(|e| e.draft_mode)
    }

    pub fn group_type(&self, slug: &str) -> Option<&GroupTypeDefinition> {
        self.group_types.get(slug)
    }
}
