mod common;

use chatgraph::model::*;
use chatgraph::ops::*;
use common::*;

const ME: &str = "100@c.us";

fn setup() -> FakeSource {
    FakeSource::new(
        vec![
            owned("1@c.us", Some("491"), Some("Alice")),
            owned("2@c.us", Some("492"), None),
            stranger("3@c.us", Some("493"), Some("Carl")),
        ],
        vec![
            group("g1@g.us", "Climbing", &[ME, "1@c.us", "3@c.us"]),
            RawChat::direct(wid("2@c.us")),
            RawChat::direct(wid(BROADCAST_ID)),
            RawChat::direct(wid(ME)),
        ],
    )
}

fn build(source: &FakeSource, policy: InclusionPolicy) -> (SocialGraph, IngestStats) {
    let mut resolver = ContactResolver::new(source);
    resolver.seed(&source.contacts, &wid(ME));
    let mut builder = GraphBuilder::new();
    let stats = builder.ingest(&wid(ME), "Me (me)", &source.chats, policy, &resolver);
    (builder.finish(), stats)
}

// ==========================================================================
// NODE / EDGE DEDUP
// ==========================================================================

#[test]
fn add_node_keeps_first_label() {
    let mut builder = GraphBuilder::new();
    for (label1, label2) in [("a", "b"), ("Alice", "alice"), ("", "x")] {
        let id = wid(&format!("{}{}@c.us", label1, label2));
        assert!(builder.add_node(&id, label1, NodeCategory::Person));
        assert!(!builder.add_node(&id, label2, NodeCategory::Group));
    }
    let graph = builder.finish();
    assert_eq!(graph.nodes.len(), 3);
    assert_eq!(graph.nodes[1].label, "Alice");
    assert_eq!(graph.nodes[1].category, NodeCategory::Person);
}

#[test]
fn edge_set_is_order_independent() {
    let pairs = [("a@c.us", "b@c.us"), ("z@g.us", "a@c.us"), ("1@c.us", "10@c.us")];
    for (a, b) in pairs {
        let mut forward = GraphBuilder::new();
        forward.add_edge(&wid(a), &wid(b));
        let mut backward = GraphBuilder::new();
        backward.add_edge(&wid(b), &wid(a));
        assert_eq!(forward.finish().edges, backward.finish().edges);
    }
}

#[test]
fn self_loops_never_change_edge_set() {
    let mut builder = GraphBuilder::new();
    builder.add_edge(&wid("a@c.us"), &wid("g@g.us"));
    assert!(!builder.add_edge(&wid("g@g.us"), &wid("g@g.us")));
    assert_eq!(builder.edge_count(), 1);
}

// ==========================================================================
// INGEST
// ==========================================================================

#[test]
fn full_mode_includes_unsaved_participants() {
    let source = setup();
    let (graph, stats) = build(&source, InclusionPolicy::All);

    let ids: Vec<&str> = graph.nodes.iter().map(|n| n.id.as_str()).collect();
    assert_eq!(ids, vec![ME, "g1@g.us", "1@c.us", "3@c.us", "2@c.us"]);
    assert_eq!(stats.groups, 1);
    assert_eq!(stats.direct_chats, 1);

    assert!(graph.has_edge(&wid(ME), &wid("g1@g.us")));
    assert!(graph.has_edge(&wid("g1@g.us"), &wid("3@c.us")));
    assert!(graph.has_edge(&wid(ME), &wid("2@c.us")));
    assert_eq!(graph.edges.len(), 4);
}

#[test]
fn self_node_added_once_with_owner_category() {
    let source = setup();
    let (graph, _) = build(&source, InclusionPolicy::All);
    let owners: Vec<_> = graph.nodes.iter().filter(|n| n.id.as_str() == ME).collect();
    assert_eq!(owners.len(), 1);
    assert_eq!(owners[0].category, NodeCategory::Owner);
    assert_eq!(owners[0].label, "Me (me)");
}

#[test]
fn labels_use_saved_name_then_local_part() {
    let source = setup();
    let (graph, _) = build(&source, InclusionPolicy::All);
    assert_eq!(graph.node("1@c.us").unwrap().label, "Alice");
    // Saved without a name: falls back to the phone number.
    assert_eq!(graph.node("2@c.us").unwrap().label, "492");
    // Unsaved: local part of the id, not the profile nickname.
    assert_eq!(graph.node("3@c.us").unwrap().label, "3");
    assert_eq!(graph.node("g1@g.us").unwrap().label, "Climbing");
}

#[test]
fn broadcast_never_becomes_a_node() {
    let mut source = setup();
    source.chats.push(group("g2@g.us", "Odd", &[BROADCAST_ID, "1@c.us"]));
    for policy in [InclusionPolicy::All, InclusionPolicy::SavedOnly] {
        let (graph, _) = build(&source, policy);
        assert!(graph.node(BROADCAST_ID).is_none());
        assert!(graph.edges.iter().all(|e| !e.source.is_broadcast() && !e.target.is_broadcast()));
    }
}

#[test]
fn saved_only_skips_unknown_participants() {
    let source = setup();
    let (graph, _) = build(&source, InclusionPolicy::SavedOnly);
    assert!(graph.node("3@c.us").is_none());
    assert!(!graph.has_edge(&wid("3@c.us"), &wid("g1@g.us")));
    assert!(graph.node("1@c.us").is_some());
    assert!(graph.node("2@c.us").is_some());
}

#[test]
fn duplicated_participant_yields_one_edge() {
    let source = FakeSource::new(
        vec![],
        vec![group("g1@g.us", "Dupes", &["1@c.us", ME, "1@c.us", "1@c.us"])],
    );
    let (graph, _) = build(&source, InclusionPolicy::All);
    let member_edges = graph
        .edges
        .iter()
        .filter(|e| e.source.as_str() == "1@c.us" || e.target.as_str() == "1@c.us")
        .count();
    assert_eq!(member_edges, 1);
    assert_eq!(graph.nodes.len(), 3);
}

#[test]
fn malformed_records_are_skipped() {
    let mut chats = vec![RawChat::default()];
    let mut g = group("g1@g.us", "", &["1@c.us"]);
    g.participants.push(RawParticipant { id: None });
    chats.push(g);
    let source = FakeSource::new(vec![], chats);

    let (graph, stats) = build(&source, InclusionPolicy::All);
    assert_eq!(stats.skipped, 2);
    assert_eq!(graph.node("g1@g.us").unwrap().label, "Unknown group");
    assert!(graph.node("1@c.us").is_some());
}

#[test]
fn output_order_is_stable_between_runs() {
    let source = setup();
    let (first, _) = build(&source, InclusionPolicy::All);
    let (second, _) = build(&source, InclusionPolicy::All);
    assert_eq!(first, second);
}

#[test]
fn ingest_never_triggers_lookups() {
    let source = setup();
    build(&source, InclusionPolicy::All);
    assert_eq!(source.lookups.get(), 0);
}
