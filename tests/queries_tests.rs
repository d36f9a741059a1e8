mod common;

use std::collections::HashSet;

use chatgraph::error::ChatGraphError;
use chatgraph::model::*;
use chatgraph::ops::ContactResolver;
use chatgraph::queries::*;
use common::*;

const ME: &str = "self";

fn setup() -> (FakeSource, Vec<GroupRecord>) {
    let source = FakeSource::new(
        vec![owned("a", Some("1"), None), owned("b", Some("2"), None)],
        vec![],
    );
    let groups = vec![
        group_record("g1@g.us", "G1", &[ME, "a", "b"]),
        group_record("g2@g.us", "G2", &[ME, "a"]),
    ];
    (source, groups)
}

fn member_set(report: &IntersectionReport) -> HashSet<String> {
    report.rows.iter().map(|r| r.id.to_string()).collect()
}

// ==========================================================================
// CONTACT RESOLVER
// ==========================================================================

#[test]
fn seed_only_takes_owned_contacts() {
    let source = FakeSource::new(
        vec![
            owned("a@c.us", Some("1"), Some("Ann")),
            stranger("b@c.us", Some("2"), Some("Bee")),
            owned(ME, Some("0"), Some("Me")),
        ],
        vec![],
    );
    let mut resolver = ContactResolver::new(&source);
    assert_eq!(resolver.seed(&source.contacts, &wid(ME)), 1);
    assert!(resolver.is_saved(&wid("a@c.us")));
    assert!(!resolver.is_saved(&wid("b@c.us")));
    assert!(!resolver.is_saved(&wid(ME)));
    assert_eq!(resolver.display_name(&wid("a@c.us")), Some("Ann"));

    // Unowned contacts are still reachable through a lookup.
    let info = resolver.resolve(&wid("b@c.us"));
    assert_eq!(info.profile_nickname.as_deref(), Some("Bee"));
    assert_eq!(source.lookups.get(), 1);
}

#[test]
fn seeded_ids_never_hit_the_source() {
    let (source, _) = setup();
    let mut resolver = ContactResolver::new(&source);
    resolver.seed(&source.contacts, &wid(ME));
    assert_eq!(resolver.resolve(&wid("a")).phone_number.as_deref(), Some("1"));
    assert_eq!(resolver.lookup_count(), 0);
    assert_eq!(source.lookups.get(), 0);
}

#[test]
fn repeated_resolve_looks_up_once() {
    let source = FakeSource::new(vec![stranger("x@c.us", Some("5"), None)], vec![]);
    let mut resolver = ContactResolver::new(&source);
    let first = resolver.resolve(&wid("x@c.us"));
    for _ in 0..5 {
        assert_eq!(resolver.resolve(&wid("x@c.us")), first);
    }
    assert_eq!(source.lookups_for("x@c.us"), 1);
}

#[test]
fn failed_lookup_is_cached_as_unknown() {
    let mut source = FakeSource::new(vec![stranger("x@c.us", Some("5"), None)], vec![]);
    source.failing.push(wid("x@c.us"));
    let mut resolver = ContactResolver::new(&source);

    assert_eq!(resolver.resolve(&wid("x@c.us")), ContactInfo::unknown());
    assert_eq!(resolver.resolve(&wid("x@c.us")), ContactInfo::unknown());
    assert_eq!(resolver.resolve(&wid("nobody@c.us")), ContactInfo::unknown());
    assert_eq!(source.lookups_for("x@c.us"), 1);
    assert_eq!(resolver.lookup_count(), 2);
}

#[test]
fn seed_does_not_overwrite_cached_entries() {
    let source = FakeSource::new(vec![stranger("x@c.us", Some("5"), None)], vec![]);
    let mut resolver = ContactResolver::new(&source);
    let before = resolver.resolve(&wid("x@c.us"));
    resolver.seed(&[owned("x@c.us", Some("9"), Some("Later"))], &wid(ME));
    assert_eq!(resolver.resolve(&wid("x@c.us")), before);
}

// ==========================================================================
// GROUP MATCHER
// ==========================================================================

#[test]
fn group_id_selector_uses_id_equality() {
    let groups = vec![
        group_record("999@g.us", "1234@g.us", &[]),
        group_record("1234@g.us", "Real", &[]),
    ];
    let found = find_group(&groups, "1234@g.us", false).unwrap();
    assert_eq!(found.id.as_str(), "1234@g.us");
    assert_eq!(found.name(), "Real");
}

#[test]
fn group_id_selector_without_match_is_not_found() {
    let groups = vec![group_record("999@g.us", "5555@g.us", &[])];
    assert!(matches!(
        find_group(&groups, "5555@g.us", false),
        Err(ChatGraphError::GroupNotFound { .. })
    ));
}

#[test]
fn ambiguous_selector_returns_every_match() {
    let groups = vec![
        group_record("1@g.us", "Family", &[]),
        group_record("2@g.us", "Family (extended)", &[]),
        group_record("3@g.us", "Work", &[]),
    ];
    let all = find_all_groups(&groups, "family", false);
    assert_eq!(all.len(), 2);
    assert_eq!(find_group(&groups, "family", false).unwrap().id.as_str(), "1@g.us");
    assert_eq!(find_all_groups(&groups, "family", true).len(), 1);
}

// ==========================================================================
// INTERSECTION ANALYZER
// ==========================================================================

#[test]
fn two_group_scenario() {
    let (source, groups) = setup();
    let mut resolver = ContactResolver::new(&source);
    resolver.seed(&source.contacts, &wid(ME));

    let reports = analyze(&groups[0], &groups, &wid(ME), &mut resolver);
    assert_eq!(reports.len(), 1);
    let report = &reports[0];
    assert_eq!(report.other_group_id.as_str(), "g2@g.us");
    assert_eq!(report.other_group_name, "G2");
    assert_eq!(report.overlap_count, 1);
    assert_eq!(report.rows.len(), 1);
    assert_eq!(report.rows[0].id.as_str(), "a");
    assert_eq!(report.rows[0].info.phone_number.as_deref(), Some("1"));
}

#[test]
fn intersection_is_symmetric() {
    let groups = vec![
        group_record("a@g.us", "A", &["p1", ME, "p2", "p3", "p4"]),
        group_record("b@g.us", "B", &["p4", "p3", "p9", ME, "p1"]),
        group_record("c@g.us", "C", &["p9"]),
    ];
    let source = FakeSource::new(vec![], vec![]);
    let mut resolver = ContactResolver::new(&source);

    for (i, x) in groups.iter().enumerate() {
        for y in groups.iter().skip(i + 1) {
            let from_x = analyze(x, &groups, &wid(ME), &mut resolver);
            let from_y = analyze(y, &groups, &wid(ME), &mut resolver);
            let x_to_y = from_x.iter().find(|r| r.other_group_id == y.id).map(member_set);
            let y_to_x = from_y.iter().find(|r| r.other_group_id == x.id).map(member_set);
            assert_eq!(x_to_y, y_to_x);
        }
    }
}

#[test]
fn duplicate_participants_count_once() {
    let groups = vec![
        group_record("a@g.us", "A", &["p1", "p1", "p2"]),
        group_record("b@g.us", "B", &["p1", "p1", "p1"]),
    ];
    let source = FakeSource::new(vec![], vec![]);
    let mut resolver = ContactResolver::new(&source);

    let reports = analyze(&groups[0], &groups, &wid(ME), &mut resolver);
    assert_eq!(reports[0].overlap_count, 1);
    assert_eq!(source.lookups_for("p1"), 1);
    assert_eq!(distinct_members(&groups[0], &wid(ME)).len(), 2);
}

#[test]
fn self_and_empty_overlaps_are_excluded() {
    let groups = vec![
        group_record("a@g.us", "A", &[ME, "p1"]),
        group_record("b@g.us", "B", &[ME, "p2"]),
    ];
    let source = FakeSource::new(vec![], vec![]);
    let mut resolver = ContactResolver::new(&source);
    assert!(analyze(&groups[0], &groups, &wid(ME), &mut resolver).is_empty());
}

#[test]
fn rows_sort_by_phone_with_missing_first_and_stable_ties() {
    let source = FakeSource::new(
        vec![
            owned("n3", Some("30"), None),
            owned("n1", Some("10"), Some("first ten")),
            owned("m1", None, Some("no phone")),
            owned("n1b", Some("10"), Some("second ten")),
        ],
        vec![],
    );
    let groups = vec![
        group_record("t@g.us", "T", &["n1", "n3", "m1", "n1b", "x"]),
        group_record("o@g.us", "O", &["n3", "n1", "x", "m1", "n1b"]),
    ];
    let mut resolver = ContactResolver::new(&source);
    resolver.seed(&source.contacts, &wid(ME));

    let reports = analyze(&groups[0], &groups, &wid(ME), &mut resolver);
    let ids: Vec<&str> = reports[0].rows.iter().map(|r| r.id.as_str()).collect();
    // "x" is unknown (lookup fails) and "m1" has no phone: both sort first,
    // in the other group's order.
    assert_eq!(ids, vec!["x", "m1", "n1", "n1b", "n3"]);
}

#[test]
fn group_without_name_reports_its_id() {
    let unnamed = GroupRecord {
        id: wid("u@g.us"),
        display_name: None,
        participant_ids: vec![wid("p1")],
    };
    let groups = vec![group_record("a@g.us", "A", &["p1"]), unnamed];
    let source = FakeSource::new(vec![], vec![]);
    let mut resolver = ContactResolver::new(&source);
    let reports = analyze(&groups[0], &groups, &wid(ME), &mut resolver);
    assert_eq!(reports[0].other_group_name, "u@g.us");
}

// ==========================================================================
// CO-MEMBERSHIP
// ==========================================================================

#[test]
fn co_membership_counts_shared_groups() {
    let groups = vec![
        group_record("1@g.us", "One", &["a", "b", "c", "a"]),
        group_record("2@g.us", "Two", &["b", "a", "z"]),
        group_record("3@g.us", "Three", &["c"]),
    ];
    let contacts: HashSet<Wid> = ["a", "b", "c"].iter().map(|s| wid(s)).collect();

    let pairs = co_membership(&groups, &contacts);
    assert_eq!(pairs.len(), 3);
    assert_eq!(pairs[0].a.as_str(), "a");
    assert_eq!(pairs[0].b.as_str(), "b");
    assert_eq!(pairs[0].shared_groups, 2);
    assert!(pairs[1..].iter().all(|p| p.shared_groups == 1));
    assert!(pairs.iter().all(|p| p.a < p.b));
}
