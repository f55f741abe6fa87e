use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use sfas::{Edge, Error, InvalidInput, OrderOptions, RawEdge, compute_order};
use sfas::{compute_order_from_records, error::Endpoint};
use std::collections::{BTreeSet, HashMap};

fn positions<N: std::hash::Hash + Eq + Clone>(order: &[N]) -> HashMap<N, usize> {
    order
        .iter()
        .enumerate()
        .map(|(i, n)| (n.clone(), i))
        .collect()
}

fn backward(edges: &[(String, String, u64)], order: &[String]) -> (u64, Vec<usize>) {
    let pos = positions(order);
    let mut total = 0;
    let mut idx = Vec::new();
    for (i, (s, t, w)) in edges.iter().enumerate() {
        if pos[t] <= pos[s] {
            total += w;
            idx.push(i);
        }
    }
    (total, idx)
}

fn is_rotation(order: &[&str], expected: &[&str]) -> bool {
    (0..expected.len()).any(|k| {
        let mut rotated = expected.to_vec();
        rotated.rotate_left(k);
        rotated == order
    })
}

fn random_graph(seed: u64, nodes: usize, edges: usize) -> Vec<(String, String, u64)> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..edges)
        .map(|_| {
            let s = rng.gen_range(0..nodes);
            let t = rng.gen_range(0..nodes);
            (format!("n{s}"), format!("n{t}"), rng.gen_range(0..10))
        })
        .collect()
}

#[test]
fn order_of_a_three_cycle_is_a_rotation_with_one_backward_edge() {
    for seed in 0..20 {
        let result = compute_order(
            [("A", "B", 5u64), ("B", "C", 5), ("C", "A", 5)],
            &OrderOptions::default().with_seed(seed),
        )
        .unwrap();
        assert!(is_rotation(&result.order, &["A", "B", "C"]), "{:?}", result.order);
        assert_eq!(result.feedback, 5);
        assert_eq!(result.feedback_edges.len(), 1);
        assert_eq!(result.stats.placements.deltas, 1);
    }
}

#[test]
fn order_resolves_an_anti_parallel_pair_to_the_heavier_direction() {
    for seed in 0..10 {
        let result = compute_order(
            [("A", "B", 5u64), ("B", "A", 3)],
            &OrderOptions::default().with_seed(seed),
        )
        .unwrap();
        assert_eq!(result.order, vec!["A", "B"]);
        assert_eq!(result.feedback, 3);
        assert_eq!(result.feedback_edges, vec![1]);
        assert_eq!(result.stats.anti_parallel_pairs, 1);
        assert_eq!(result.stats.canceled_weight, 3);
    }
}

#[test]
fn order_handles_disconnected_components_independently() {
    let edges = [
        ("A", "B", 5u64),
        ("B", "C", 5),
        ("C", "A", 5),
        ("X", "Y", 7),
        ("Y", "Z", 7),
        ("Z", "X", 7),
    ];
    for seed in 0..10 {
        let result = compute_order(edges, &OrderOptions::default().with_seed(seed)).unwrap();
        assert_eq!(result.feedback, 12);

        let abc: Vec<&str> = result
            .order
            .iter()
            .copied()
            .filter(|n| ["A", "B", "C"].contains(n))
            .collect();
        let xyz: Vec<&str> = result
            .order
            .iter()
            .copied()
            .filter(|n| ["X", "Y", "Z"].contains(n))
            .collect();
        assert!(is_rotation(&abc, &["A", "B", "C"]));
        assert!(is_rotation(&xyz, &["X", "Y", "Z"]));
    }
}

#[test]
fn order_of_an_empty_graph_is_empty() {
    let result = compute_order(Vec::<(&str, &str, u64)>::new(), &OrderOptions::default()).unwrap();
    assert!(result.order.is_empty());
    assert_eq!(result.feedback, 0);
    assert!(result.feedback_edges.is_empty());
    assert_eq!(result.stats.nodes, 0);
}

#[test]
fn order_is_deterministic_for_a_seed() {
    let edges = random_graph(3, 60, 300);
    for seed in [0, 1, 42] {
        let opts = OrderOptions::default().with_seed(seed);
        let a = compute_order(edges.clone(), &opts).unwrap();
        let b = compute_order(edges.clone(), &opts).unwrap();
        assert_eq!(a, b);
    }
}

#[test]
fn order_is_a_permutation_and_feedback_matches_backward_weight() {
    for seed in 0..25 {
        let edges = random_graph(seed, 40, 160);
        let result =
            compute_order(edges.clone(), &OrderOptions::default().with_seed(seed)).unwrap();

        let universe: BTreeSet<String> = edges
            .iter()
            .flat_map(|(s, t, _)| [s.clone(), t.clone()])
            .collect();
        let ordered: BTreeSet<String> = result.order.iter().cloned().collect();
        assert_eq!(result.order.len(), universe.len());
        assert_eq!(ordered, universe);

        let (weight, indices) = backward(&edges, &result.order);
        assert_eq!(result.feedback, weight);
        assert_eq!(result.feedback_edges, indices);
        assert!(result.feedback <= result.stats.total_weight);
    }
}

#[test]
fn order_of_an_acyclic_graph_is_topological() {
    for seed in 0..10 {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut names: Vec<String> = (0..50).map(|i| format!("v{i}")).collect();
        names.shuffle(&mut rng);
        let mut edges = Vec::new();
        for _ in 0..200 {
            let a = rng.gen_range(0..50);
            let b = rng.gen_range(0..50);
            if a < b {
                edges.push((names[a].clone(), names[b].clone(), rng.gen_range(1..5u64)));
            }
        }

        let result =
            compute_order(edges.clone(), &OrderOptions::default().with_seed(seed)).unwrap();
        assert_eq!(result.feedback, 0);
        let pos = positions(&result.order);
        for (s, t, _) in &edges {
            assert!(pos[s] < pos[t], "{s} -> {t}");
        }
    }
}

#[test]
fn order_counts_self_loops_as_backward() {
    let result = compute_order([("A", "A", 4u64), ("A", "B", 1)], &OrderOptions::default()).unwrap();
    assert_eq!(result.order, vec!["A", "B"]);
    assert_eq!(result.feedback, 4);
    assert_eq!(result.feedback_edges, vec![0]);
}

#[test]
fn order_merges_parallel_edges_before_resolution() {
    let result = compute_order(
        [("A", "B", 2u64), ("A", "B", 3), ("B", "A", 4)],
        &OrderOptions::default(),
    )
    .unwrap();
    assert_eq!(result.order, vec!["A", "B"]);
    assert_eq!(result.feedback, 4);
    assert_eq!(result.feedback_edges, vec![2]);
    assert_eq!(result.stats.input_edges, 3);
    assert_eq!(result.stats.merged_edges, 2);
}

#[test]
fn order_cancels_equal_zero_weight_pairs() {
    let result = compute_order([("A", "B", 0u64), ("B", "A", 0)], &OrderOptions::default()).unwrap();
    assert_eq!(result.order.len(), 2);
    assert_eq!(result.feedback, 0);
    assert_eq!(result.feedback_edges.len(), 1);
}

#[test]
fn order_accepts_integer_ids_and_signed_weights() {
    let edges: Vec<Edge<u32, i64>> = vec![
        Edge::new(1, 2, 3),
        Edge::new(2, 3, 3),
        Edge::new(3, 1, 1),
        Edge::new(3, 4, 2),
    ];
    let result = compute_order(edges, &OrderOptions::default()).unwrap();
    assert_eq!(result.feedback, 1);
    let pos = positions(&result.order);
    assert!(pos[&1] < pos[&2]);
    assert!(pos[&2] < pos[&3]);
    assert!(pos[&3] < pos[&4]);
}

#[test]
fn order_rejects_negative_weights() {
    let err = compute_order([("A", "B", 1i64), ("B", "C", -2)], &OrderOptions::default())
        .unwrap_err();
    assert!(err.is_invalid_input());
    assert_eq!(
        err,
        Error::InvalidInput(InvalidInput::NegativeWeight {
            index: 1,
            weight: "-2".to_string(),
        })
    );
}

#[test]
fn order_rejects_weight_totals_that_overflow() {
    let err =
        compute_order([("A", "B", 200u8), ("B", "C", 100)], &OrderOptions::default()).unwrap_err();
    assert_eq!(
        err,
        Error::InvalidInput(InvalidInput::WeightOverflow { index: 1 })
    );
}

#[test]
fn order_from_records_rejects_missing_fields() {
    let records = vec![
        RawEdge {
            source: Some("A"),
            target: Some("B"),
            weight: Some(1u64),
        },
        RawEdge {
            source: Some("B"),
            target: None,
            weight: Some(1),
        },
    ];
    let err = compute_order_from_records(records, &OrderOptions::default()).unwrap_err();
    assert_eq!(
        err,
        Error::InvalidInput(InvalidInput::MissingEndpoint {
            index: 1,
            endpoint: Endpoint::Target,
        })
    );

    let records = vec![RawEdge {
        source: Some("A"),
        target: Some("B"),
        weight: None::<u64>,
    }];
    let err = compute_order_from_records(records, &OrderOptions::default()).unwrap_err();
    assert_eq!(
        err,
        Error::InvalidInput(InvalidInput::MissingWeight { index: 0 })
    );
}

#[test]
fn order_from_records_matches_order_from_edges() {
    let edges = random_graph(11, 20, 60);
    let records: Vec<RawEdge<String, u64>> = edges
        .iter()
        .cloned()
        .map(|e| RawEdge::from(Edge::from(e)))
        .collect();
    let opts = OrderOptions::default().with_seed(5);
    assert_eq!(
        compute_order_from_records(records, &opts).unwrap(),
        compute_order(edges, &opts).unwrap()
    );
}

#[test]
fn order_serializes_to_json() {
    let result = compute_order([("A", "B", 5u64), ("B", "A", 3)], &OrderOptions::default()).unwrap();
    let v = serde_json::to_value(&result).unwrap();
    assert_eq!(v["order"], serde_json::json!(["A", "B"]));
    assert_eq!(v["feedback"], serde_json::json!(3));
    assert_eq!(v["stats"]["anti_parallel_pairs"], serde_json::json!(1));
}

#[test]
fn order_with_high_verbosity_still_produces_the_same_result() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing_subscriber::filter::LevelFilter::TRACE)
        .with_test_writer()
        .try_init();

    let small = random_graph(1, 12, 40);
    let quiet = compute_order(small.clone(), &OrderOptions::default()).unwrap();
    let loud = compute_order(small, &OrderOptions::default().with_verbosity(3)).unwrap();
    assert_eq!(quiet, loud);

    let large = random_graph(2, 2500, 5000);
    let quiet = compute_order(large.clone(), &OrderOptions::default()).unwrap();
    let loud = compute_order(large, &OrderOptions::default().with_verbosity(2)).unwrap();
    assert_eq!(quiet, loud);
}
