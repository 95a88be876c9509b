//! The single decision primitive shared by general and group-scoped
//! evaluation.

use std::collections::BTreeSet;

use crate::types::{Actor, Decision, DenyReason, Grant, Role, RuleSet};

/// Decide one rule set for one actor.
///
/// `membership` holds the roles the actor has inside the enclosing group
/// (empty outside groups). They match the rule set exactly like global
/// roles. Order of checks: `PUBLIC`, authentication, global `ADMIN`, role
/// intersection. Ownership is layered on by the caller.
pub(crate) fn check_rules(
    rules: &RuleSet,
    actor: Option<&Actor>,
    membership: &BTreeSet<Role>,
) -> Decision {
    if rules.is_public() {
        return Decision::allow(Grant::Public);
    }

    let Some(actor) = actor else {
        return Decision::deny(DenyReason::Unauthenticated);
    };

    if actor.is_admin() {
        return Decision::allow(Grant::Admin);
    }

    let held: BTreeSet<&Role> = actor.roles().iter().chain(membership.iter()).collect();
    match rules.roles().iter().find(|role| held.contains(role)) {
        Some(role) if actor.roles().contains(role) => Decision::allow(Grant::Role(role.clone())),
        Some(role) => Decision::allow(Grant::MembershipRole(role.clone())),
        None => Decision::deny(DenyReason::NoMatchingRole),
    }
}

/// Ownership grant: authenticated authors may update and delete what they
/// wrote, whatever the rule sets say.
pub(crate) fn check_ownership(actor: Option<&Actor>, author: Option<&str>) -> Option<Decision> {
    actor
        .filter(|actor| actor.owns(author))
        .map(|_| Decision::allow(Grant::Ownership))
}

#[cfg(test)]
mod tests {
    use super::*;
    use yare::parameterized;

    fn none() -> BTreeSet<Role> {
        BTreeSet::new()
    }

    #[test]
    fn test_public_allows_anonymous() {
        let rules = RuleSet::new(["PUBLIC"]);
        assert_eq!(check_rules(&rules, None, &none()), Decision::allow(Grant::Public));
    }

    #[test]
    fn test_anonymous_denied_without_public() {
        let rules = RuleSet::new(["USER"]);
        assert_eq!(
            check_rules(&rules, None, &none()),
            Decision::deny(DenyReason::Unauthenticated)
        );
    }

    #[parameterized(
        admin_on_empty_rules = { &[], &["ADMIN"], Some(Grant::Admin) },
        admin_on_unrelated_rules = { &["EDITOR"], &["ADMIN"], Some(Grant::Admin) },
        role_match = { &["USER", "EDITOR"], &["EDITOR"], Some(Grant::Role(Role::new("EDITOR"))) },
        no_match = { &["ADMIN"], &["USER"], None },
        empty_rules = { &[], &["USER"], None },
        no_roles = { &["USER"], &[], None },
    )]
    fn test_global_roles(rules: &[&str], roles: &[&str], expected: Option<Grant>) {
        let rules = RuleSet::new(rules.iter().copied());
        let actor = Actor::new("alice", roles.iter().copied());
        let decision = check_rules(&rules, Some(&actor), &none());
        match expected {
            Some(grant) => assert_eq!(decision, Decision::allow(grant)),
            None => assert_eq!(decision, Decision::deny(DenyReason::NoMatchingRole)),
        }
    }

    #[test]
    fn test_membership_roles_count_like_global_roles() {
        let rules = RuleSet::new(["GROUP_ADMIN"]);
        let actor = Actor::new("user1", ["USER"]);
        let membership: BTreeSet<Role> = [Role::new("GROUP_ADMIN")].into_iter().collect();
        assert_eq!(
            check_rules(&rules, Some(&actor), &membership),
            Decision::allow(Grant::MembershipRole(Role::new("GROUP_ADMIN")))
        );
    }

    #[test]
    fn test_global_role_reported_before_membership() {
        let rules = RuleSet::new(["EDITOR"]);
        let actor = Actor::new("user1", ["EDITOR"]);
        let membership: BTreeSet<Role> = [Role::new("EDITOR")].into_iter().collect();
        assert_eq!(
            check_rules(&rules, Some(&actor), &membership),
            Decision::allow(Grant::Role(Role::new("EDITOR")))
        );
    }

    #[test]
    fn test_ownership() {
        let actor = Actor::new("myid", ["USER"]);
        assert_eq!(
            check_ownership(Some(&actor), Some("myid")),
            Some(Decision::allow(Grant::Ownership))
        );
        assert_eq!(check_ownership(Some(&actor), Some("another")), None);
        assert_eq!(check_ownership(Some(&actor), None), None);
        assert_eq!(check_ownership(None, Some("myid")), None);
    }
}
