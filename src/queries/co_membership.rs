use std::collections::{HashMap, HashSet};

use crate::model::{canonical_edge_key, CoMembership, GroupRecord, Wid};

/// Counts, for every pair of `contacts`, how many groups both belong to.
///
/// Members outside `contacts` are ignored and a member listed twice in one
/// group counts once. Result is ordered by descending count, then by pair.
pub fn co_membership(groups: &[GroupRecord], contacts: &HashSet<Wid>) -> Vec<CoMembership> {
    let mut counts: HashMap<(Wid, Wid), u32> = HashMap::new();

    for group in groups {
        let mut members: Vec<&Wid> = group
            .participant_ids
            .iter()
            .filter(|id| contacts.contains(*id))
            .collect();
        members.sort();
        members.dedup();

        for (i, a) in members.iter().enumerate() {
            for b in &members[i + 1..] {
                *counts.entry(canonical_edge_key(a, b)).or_insert(0) += 1;
            }
        }
    }

    let mut pairs: Vec<CoMembership> = counts
        .into_iter()
        .map(|((a, b), shared_groups)| CoMembership { a, b, shared_groups })
        .collect();
    pairs.sort_by(|x, y| {
        y.shared_groups
            .cmp(&x.shared_groups)
            .then_with(|| x.a.cmp(&y.a))
            .then_with(|| x.b.cmp(&y.b))
    });

    tracing::info!(pairs = pairs.len(), "computed co-membership");
    pairs
}
