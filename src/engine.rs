use std::collections::BTreeSet;
use std::sync::Arc;

use strum::IntoEnumIterator;
use tracing::{debug, info, warn};

use crate::catalog::RoleCatalog;
use crate::config::SiteConfig;
use crate::error::PolicyError;
use crate::evaluator::{check_ownership, check_rules};
use crate::loader;
use crate::scoped::{resolve_scope, scoped_rules};
use crate::types::{
    Action, Actor, Decision, DenyReason, Domain, Entity, GroupSnapshot, Request, Role, RuleKey,
    RuleSet, RuleTable,
};

/// The main engine handle. Cloneable and thread-safe.
///
/// The catalog is built once and never changes; every decision is computed
/// fresh from the request and nothing is cached between calls.
#[derive(Debug, Clone)]
pub struct PolicyEngine {
    inner: Arc<RoleCatalog>,
}

impl PolicyEngine {
    pub fn new(config: &SiteConfig) -> Self {
        let catalog = RoleCatalog::from_config(config);
        info!(
            event = "Engine",
            phase = "Built",
            content_types = config.content_types.len(),
            group_types = config.group_types.len()
        );
        PolicyEngine {
            inner: Arc::new(catalog),
        }
    }

    /// Build an engine from the JSON site configuration.
    pub fn new_from_str(config_text: &str) -> Result<Self, PolicyError> {
        let config = loader::compile_config(config_text)?;
        Ok(PolicyEngine::new(&config))
    }

    pub fn catalog(&self) -> &RoleCatalog {
        &self.inner
    }

    /// The rule table configured for a type, `None` if the type is unknown.
    pub fn permissions_for(&self, domain: Domain, type_slug: &str) -> Option<&RuleTable> {
        self.inner.permissions_for(domain, type_slug)
    }

    /// Whether `actor` may perform `action` on an entity of `type_slug`.
    ///
    /// `entity` is needed for ownership, draft and group-scoped rules;
    /// `group` is the snapshot of the entity's group, `None` when the caller
    /// could not load it.
    pub fn decide(
        &self,
        actor: Option<&Actor>,
        domain: Domain,
        type_slug: &str,
        action: Action,
        entity: Option<&Entity>,
        group: Option<&GroupSnapshot>,
    ) -> bool {
        let request = Request {
            actor,
            domain,
            type_slug,
            action,
            entity,
            group,
        };
        self.evaluate(&request).is_allowed()
    }

    /// Like [`PolicyEngine::decide`], returning what granted or denied the
    /// request.
    pub fn evaluate(&self, request: &Request<'_>) -> Decision {
        self.evaluate_with(request, GapLog::Warn)
    }

    fn evaluate_with(&self, request: &Request<'_>, gaps: GapLog) -> Decision {
        debug!(
            event = "Request",
            phase = "Evaluation",
            request = request.to_string(),
            entity = request.entity.map(|e| e.to_string()),
            group = request.group.map(|g| g.to_string())
        );

        let decision = self.role_decision(request, gaps);
        let decision = self.draft_gate(request, decision);

        debug!(
            event = "Request",
            phase = "Result",
            request = request.to_string(),
            decision = decision.to_string()
        );
        decision
    }

    /// True if any of `keys` is granted to `actor` by roles alone.
    ///
    /// Used by forms that only need to know whether e.g.
    /// `content.post.create` or `content.post.admin` is available.
    pub fn has_any(&self, actor: Option<&Actor>, keys: &[RuleKey]) -> bool {
        keys.iter().any(|key| {
            let request = Request::for_key(key, actor);
            self.evaluate_with(&request, GapLog::Quiet).is_allowed()
        })
    }

    /// Whether `actor` may see the member lists of groups of `group_type`.
    pub fn can_view_members(&self, actor: Option<&Actor>, group_type: &str) -> bool {
        let request = Request::new(Domain::Group, group_type, Action::MemberRead).with_actor(actor);
        self.evaluate_with(&request, GapLog::Quiet).is_allowed()
    }

    /// Whether a listing of `type_slug` must leave out drafts.
    ///
    /// Drafts stay visible to admins, and to their author when the listing
    /// is filtered to that author.
    pub fn hides_drafts(
        &self,
        actor: Option<&Actor>,
        domain: Domain,
        type_slug: &str,
        author_filter: Option<&str>,
    ) -> bool {
        if !domain.has_drafts() || !self.inner.draft_mode(domain, type_slug) {
            return false;
        }
        !actor.is_some_and(|actor| actor.is_admin() || actor.owns(author_filter))
    }

    /// Every action the request's actor may perform on its entity, in
    /// catalog order. The request's own action is ignored.
    pub fn permitted_actions(&self, request: &Request<'_>) -> Vec<Action> {
        Action::iter()
            .filter(|action| request.domain == Domain::Group || !action.is_member_action())
            .filter(|action| {
                let request = Request {
                    action: *action,
                    ..*request
                };
                self.evaluate_with(&request, GapLog::Quiet).is_allowed()
            })
            .collect()
    }

    /// Catalog lookup, then ownership, then the general rules, then the
    /// group-scoped rules. Ownership never grants an action the catalog
    /// leaves unconfigured.
    fn role_decision(&self, request: &Request<'_>, gaps: GapLog) -> Decision {
        let nobody = BTreeSet::new();
        let Some(global) = self.inner.permissions_for(request.domain, request.type_slug) else {
            gaps.log(request, "unknown type");
            return check_rules(&RuleSet::default(), request.actor, &nobody);
        };

        let general_rules = global.effective(request.action);
        let scoped = self.group_rules(request, global);
        let scoped_empty = scoped.as_ref().is_none_or(|(rules, _)| rules.is_empty());
        if general_rules.is_empty() && scoped_empty {
            gaps.log(request, "no rule set for action");
            return check_rules(&general_rules, request.actor, &nobody);
        }

        let author = request.entity.and_then(Entity::author);
        if request.domain.has_owners() && request.action.is_ownable() {
            if let Some(decision) = check_ownership(request.actor, author) {
                return decision;
            }
        }

        let general = check_rules(&general_rules, request.actor, &nobody);
        match scoped {
            Some((rules, membership)) => {
                general.or_else(|| check_rules(&rules, request.actor, &membership))
            }
            None => general,
        }
    }

    /// The override rule set and the actor's membership roles when the
    /// entity sits inside a group that redeclares its type.
    fn group_rules(
        &self,
        request: &Request<'_>,
        global: &RuleTable,
    ) -> Option<(RuleSet, BTreeSet<Role>)> {
        if !request.domain.is_group_scoped() {
            return None;
        }
        let scope = resolve_scope(&self.inner, request.entity?, request.group, request.actor)?;
        let Some(rules) = scoped_rules(
            scope.group_type,
            request.domain,
            request.type_slug,
            request.action,
            Some(global),
        ) else {
            debug!(
                event = "Scope",
                phase = "Fallback",
                group_type = scope.group_type.slug.as_str(),
                reason = "no override for type"
            );
            return None;
        };
        Some((rules, scope.membership))
    }

    /// Drafts are readable only by admins and their author, whatever the
    /// read rules grant.
    fn draft_gate(&self, request: &Request<'_>, decision: Decision) -> Decision {
        if !decision.is_allowed() || request.action != Action::Read || !request.domain.has_drafts()
        {
            return decision;
        }
        let Some(entity) = request.entity.filter(|entity| entity.draft) else {
            return decision;
        };
        if !self.inner.draft_mode(request.domain, request.type_slug) {
            return decision;
        }

        let privileged = request
            .actor
            .is_some_and(|actor| actor.is_admin() || actor.owns(entity.author()));
        if privileged {
            decision
        } else {
            debug!(
                event = "Request",
                phase = "Draft",
                request = request.to_string()
            );
            Decision::deny(DenyReason::Draft)
        }
    }
}

/// How configuration gaps met during a decision are reported. Enumerating
/// helpers probe actions the type may never declare, so they stay quiet.
#[derive(Debug, Clone, Copy)]
enum GapLog {
    Warn,
    Quiet,
}

impl GapLog {
    fn log(self, request: &Request<'_>, reason: &str) {
        match self {
            GapLog::Warn => warn!(
                event = "Config",
                phase = "Lookup",
                key = request.key().to_string(),
                reason = reason
            ),
            GapLog::Quiet => debug!(
                event = "Config",
                phase = "Lookup",
                key = request.key().to_string(),
                reason = reason
            ),
        }
    }
}

#[cfg(test)]
mod tests;
