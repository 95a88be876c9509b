//! Group-scoped override resolution for content and comments posted
//! inside a group.

use std::collections::BTreeSet;

use tracing::{debug, warn};

use crate::catalog::RoleCatalog;
use crate::config::GroupTypeDefinition;
use crate::membership::roles_in;
use crate::types::{Action, Actor, Domain, Entity, GroupSnapshot, Role, RuleSet, RuleTable, effective_rules};

/// The enclosing group of an entity, resolved against the catalog.
#[derive(Debug)]
pub(crate) struct GroupScope<'a> {
    pub(crate) group_type: &'a GroupTypeDefinition,
    pub(crate) membership: BTreeSet<Role>,
}

/// Resolve the group an entity lives in.
///
/// Returns `None` when the group snapshot is missing, belongs to another
/// group, or names a group type the catalog does not know. Callers then
/// evaluate the general rules only.
pub(crate) fn resolve_scope<'a>(
    catalog: &'a RoleCatalog,
    entity: &Entity,
    group: Option<&GroupSnapshot>,
    actor: Option<&Actor>,
) -> Option<GroupScope<'a>> {
    let group_id = entity.group_id()?;

    let Some(group) = group else {
        debug!(
            event = "Scope",
            phase = "Fallback",
            group_id = group_id,
            reason = "group not found"
        );
        return None;
    };

    if group.id != group_id {
        warn!(
            event = "Scope",
            phase = "Fallback",
            group_id = group_id,
            snapshot_id = group.id.as_str(),
            reason = "group snapshot does not match entity"
        );
        return None;
    }

    let type_slug = Some(group.type_slug.as_str())
        .filter(|slug| !slug.is_empty())
        .or_else(|| entity.group_type());
    let Some(group_type) = type_slug.and_then(|slug| catalog.group_type(slug)) else {
        warn!(
            event = "Config",
            phase = "Scope",
            group_id = group_id,
            group_type = type_slug.unwrap_or("-"),
            reason = "unknown group type"
        );
        return None;
    };

    Some(GroupScope {
        group_type,
        membership: roles_in(group, actor.map(Actor::id)),
    })
}

/// The rule set the group-scoped path evaluates for `action` on the
/// contained type `type_slug`.
///
/// For every action involved (the action itself and its implying `admin`),
/// an override declared by the group type replaces the global rule set;
/// undeclared actions fall back to the global one. `None` when the group
/// type has no override block for the type, or disables its comments.
pub(crate) fn scoped_rules(
    group_type: &GroupTypeDefinition,
    domain: Domain,
    type_slug: &str,
    action: Action,
    global: Option<&RuleTable>,
) -> Option<RuleSet> {
    let block = group_type.contained(type_slug)?;
    let overrides = match domain {
        Domain::Content => &block.permissions,
        Domain::Comment => {
            &block
                .comments
                .as_ref()
                .filter(|comments| comments.enabled)?
                .permissions
        }
        Domain::Group | Domain::User => return None,
    };

    Some(effective_rules(action, |a| {
        overrides.get(a).or_else(|| global.and_then(|table| table.get(a)))
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::compile_config;
    use crate::types::Member;

    const SITE: &str = r#"{
        "content": { "types": [
            {
                "slug": "post",
                "permissions": { "read": ["PUBLIC"], "update": ["ADMIN"], "admin": ["ADMIN"] },
                "comments": { "enabled": true, "permissions": {
                    "delete": ["ADMIN", "COMMENTS_DELETE_ROLE"], "admin": ["ADMIN", "COMMENTS_ADMIN"]
                } }
            },
            { "slug": "event", "permissions": { "read": ["PUBLIC"] } }
        ]},
        "groups": { "types": [
            {
                "slug": "project",
                "contentTypes": [{
                    "slug": "post",
                    "comments": { "enabled": true, "permissions": { "delete": ["GROUP_ADMIN"] } },
                    "permissions": { "create": ["GROUP_MEMBER", "GROUP_ADMIN"], "admin": ["GROUP_ADMIN"] }
                }]
            },
            {
                "slug": "club",
                "contentTypes": [{
                    "slug": "post",
                    "comments": { "enabled": false, "permissions": { "delete": ["GROUP_ADMIN"] } }
                }]
            }
        ]}
    }"#;

    fn catalog() -> RoleCatalog {
        RoleCatalog::from_config(&compile_config(SITE).unwrap())
    }

    #[test]
    fn test_override_replaces_declared_action() {
        let catalog = catalog();
        let project = catalog.group_type("project").unwrap();
        let global = catalog.permissions_for(Domain::Comment, "post");
        let rules = scoped_rules(project, Domain::Comment, "post", Action::Delete, global).unwrap();
        // delete comes from the override, admin from the global table.
        assert_eq!(rules, RuleSet::new(["GROUP_ADMIN", "ADMIN", "COMMENTS_ADMIN"]));
        assert!(!rules.contains("COMMENTS_DELETE_ROLE"));
    }

    #[test]
    fn test_override_admin_implies_content_actions() {
        let catalog = catalog();
        let project = catalog.group_type("project").unwrap();
        let global = catalog.permissions_for(Domain::Content, "post");
        let rules = scoped_rules(project, Domain::Content, "post", Action::Update, global).unwrap();
        assert_eq!(rules, RuleSet::new(["ADMIN", "GROUP_ADMIN"]));

        let rules = scoped_rules(project, Domain::Content, "post", Action::Create, global).unwrap();
        assert_eq!(rules, RuleSet::new(["GROUP_MEMBER", "GROUP_ADMIN"]));
    }

    #[test]
    fn test_no_override_block() {
        let catalog = catalog();
        let project = catalog.group_type("project").unwrap();
        let global = catalog.permissions_for(Domain::Content, "event");
        assert!(scoped_rules(project, Domain::Content, "event", Action::Read, global).is_none());
    }

    #[test]
    fn test_disabled_comments_override() {
        let catalog = catalog();
        let club = catalog.group_type("club").unwrap();
        let global = catalog.permissions_for(Domain::Comment, "post");
        assert!(scoped_rules(club, Domain::Comment, "post", Action::Delete, global).is_none());
        // The block still exists for the content itself.
        assert!(scoped_rules(club, Domain::Content, "post", Action::Read, None).is_some());
    }

    #[test]
    fn test_resolve_scope() {
        let catalog = catalog();
        let entity = Entity::new().in_group("g1", Some("project"));
        let group = GroupSnapshot::new("g1", "project").with_member(Member::new("user1", ["GROUP_ADMIN"]));
        let actor = Actor::new("user1", ["USER"]);

        let scope = resolve_scope(&catalog, &entity, Some(&group), Some(&actor)).unwrap();
        assert_eq!(scope.group_type.slug, "project");
        assert!(scope.membership.contains("GROUP_ADMIN"));
    }

    #[test]
    fn test_resolve_scope_uses_entity_group_type_as_fallback() {
        let catalog = catalog();
        let entity = Entity::new().in_group("g1", Some("project"));
        let group = GroupSnapshot::new("g1", "");
        let scope = resolve_scope(&catalog, &entity, Some(&group), None).unwrap();
        assert_eq!(scope.group_type.slug, "project");
        assert!(scope.membership.is_empty());
    }

    #[test]
    fn test_resolve_scope_fallbacks() {
        let catalog = catalog();
        let entity = Entity::new().in_group("g1", Some("project"));

        assert!(resolve_scope(&catalog, &entity, None, None).is_none());

        let other = GroupSnapshot::new("g2", "project");
        assert!(resolve_scope(&catalog, &entity, Some(&other), None).is_none());

        let unknown = GroupSnapshot::new("g1", "guild");
        assert!(resolve_scope(&catalog, &entity, Some(&unknown), None).is_none());

        let outside = Entity::new();
        let group = GroupSnapshot::new("g1", "project");
        assert!(resolve_scope(&catalog, &outside, Some(&group), None).is_none());
    }
}
