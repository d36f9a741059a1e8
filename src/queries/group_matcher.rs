use crate::error::{ChatGraphError, ChatGraphResult};
use crate::model::{looks_like_group_id, GroupRecord};
use crate::validation::normalize_name;

/// Every group matching `selector`, in list order.
///
/// A selector shaped like a group id is compared to ids only. Anything else is
/// compared to display names after trimming and lowercasing both sides: equality
/// when `exact`, containment otherwise.
pub fn find_all_groups<'g>(
    groups: &'g [GroupRecord],
    selector: &str,
    exact: bool,
) -> Vec<&'g GroupRecord> {
    let selector = selector.trim();
    if looks_like_group_id(selector) {
        return groups.iter().filter(|g| g.id.as_str() == selector).collect();
    }

    let needle = normalize_name(Some(selector));
    groups
        .iter()
        .filter(|g| {
            let name = normalize_name(g.display_name.as_deref());
            if exact {
                name == needle
            } else {
                name.contains(&needle)
            }
        })
        .collect()
}

/// The first group matching `selector`; see [`find_all_groups`].
pub fn find_group<'g>(
    groups: &'g [GroupRecord],
    selector: &str,
    exact: bool,
) -> ChatGraphResult<&'g GroupRecord> {
    find_all_groups(groups, selector, exact)
        .into_iter()
        .next()
        .ok_or_else(|| ChatGraphError::GroupNotFound {
            selector: selector.to_string(),
            candidates: groups.iter().map(GroupRecord::summary).collect(),
        })
}
