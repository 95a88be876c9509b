//! Membership resolution: the roles a user holds inside one group.

use std::collections::BTreeSet;

use crate::types::{GroupSnapshot, Role};

/// Every membership role of `user_id` in `group`.
///
/// All member entries with a matching id are considered, so a user listed
/// twice holds the union of both entries. Anonymous actors and blank ids
/// hold nothing.
pub fn roles_in(group: &GroupSnapshot, user_id: Option<&str>) -> BTreeSet<Role> {
    let Some(user_id) = user_id.filter(|id| !id.is_empty()) else {
        return BTreeSet::new();
    };

    group
        .members
        .iter()
        .filter(|member| member.id == user_id)
        .flat_map(|member| member.roles.iter().cloned())
        .collect()
}

/// The highest-privilege membership role of `user_id` in `group`.
///
/// `GROUP_ADMIN` outranks `GROUP_MEMBER`, which outranks any other role;
/// ties between other roles go to the lexicographically first.
pub fn role_of(group: &GroupSnapshot, user_id: Option<&str>) -> Option<Role> {
    roles_in(group, user_id)
        .into_iter()
        .rev()
        .max_by_key(Role::membership_rank)
}
