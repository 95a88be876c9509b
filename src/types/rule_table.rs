//! Per-type mapping from actions to rule sets.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::action::Action;
use super::role::RuleSet;

/// All rule sets declared for one type, keyed by action.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RuleTable(BTreeMap<Action, RuleSet>);

impl RuleTable {
    pub fn new() -> Self {
        RuleTable::default()
    }

    pub fn insert(&mut self, action: Action, rules: RuleSet) -> Option<RuleSet> {
        self.0.insert(action, rules)
    }

    /// The rule set declared for exactly this action.
    pub fn get(&self, action: Action) -> Option<&RuleSet> {
        self.0.get(&action)
    }

    /// The rule set that grants `action`: its own rules joined with the
    /// rules of the implying `admin` action. Empty when neither is declared.
    pub fn effective(&self, action: Action) -> RuleSet {
        effective_rules(action, |a| self.get(a))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Action, &RuleSet)> {
        self.0.iter()
    }

    /// Copy every entry of `other` into this table, lifting each action with
    /// `lift` first.
    pub(crate) fn extend_lifted(&mut self, other: &RuleTable, lift: impl Fn(Action) -> Action) {
        for (action, rules) in other.iter() {
            self.0.insert(lift(*action), rules.clone());
        }
    }
}

/// Join the rules found for `action` and its implying action through
/// `lookup`.
pub(crate) fn effective_rules<'a>(
    action: Action,
    lookup: impl Fn(Action) -> Option<&'a RuleSet>,
) -> RuleSet {
    let own = lookup(action).cloned().unwrap_or_default();
    let implier = action.implied_by();
    if implier == action {
        return own;
    }
    match lookup(implier) {
        Some(implied) => own.union(implied),
        None => own,
    }
}

impl FromIterator<(Action, RuleSet)> for RuleTable {
    fn from_iter<T: IntoIterator<Item = (Action, RuleSet)>>(iter: T) -> Self {
        RuleTable(iter.into_iter().collect())
    }
}
