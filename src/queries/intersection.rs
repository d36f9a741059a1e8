use std::collections::HashSet;

use crate::model::{GroupRecord, IntersectionReport, OverlapRow, Wid};
use crate::ops::resolver::ContactResolver;

/// Participants of `group` other than `self_id`, first occurrence kept.
pub fn distinct_members<'g>(group: &'g GroupRecord, self_id: &Wid) -> Vec<&'g Wid> {
    let mut seen = HashSet::new();
    group
        .participant_ids
        .iter()
        .filter(|id| *id != self_id && seen.insert(*id))
        .collect()
}

/// Compares `target` with every other group and reports the shared members.
///
/// Groups without overlap produce no report. Rows are resolved through
/// `resolver` and sorted by phone number, absent numbers first; equal numbers
/// keep the other group's participant order.
pub fn analyze(
    target: &GroupRecord,
    all_groups: &[GroupRecord],
    self_id: &Wid,
    resolver: &mut ContactResolver<'_>,
) -> Vec<IntersectionReport> {
    let target_set: HashSet<&Wid> = distinct_members(target, self_id).into_iter().collect();
    tracing::info!(group = %target.id, members = target_set.len(), "analyzing overlaps");

    let mut reports = Vec::new();
    for group in all_groups {
        if group.id == target.id {
            continue;
        }

        let overlap: Vec<&Wid> = distinct_members(group, self_id)
            .into_iter()
            .filter(|id| target_set.contains(id))
            .collect();
        if overlap.is_empty() {
            continue;
        }

        let mut rows: Vec<OverlapRow> = overlap
            .into_iter()
            .map(|id| OverlapRow {
                id: id.clone(),
                info: resolver.resolve(id),
            })
            .collect();
        // Stable: equal numbers keep participant order.
        rows.sort_by(|a, b| a.info.phone_sort_key().cmp(b.info.phone_sort_key()));

        reports.push(IntersectionReport {
            other_group_id: group.id.clone(),
            other_group_name: group.name().to_string(),
            overlap_count: rows.len(),
            rows,
        });
    }

    tracing::debug!(reports = reports.len(), lookups = resolver.lookup_count(), "overlap analysis done");
    reports
}
