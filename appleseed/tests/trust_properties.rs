// Unwrap is allowed while testing
#![allow(clippy::unwrap_used)]

use appleseed::{
	error::AppleseedError,
	graph::{NodeId, TrustGraph},
	run, Params,
};
use rand::{rngs::StdRng, Rng, SeedableRng};
use std::collections::VecDeque;
use std::panic::{catch_unwind, AssertUnwindSafe};

/// Builds a graph of `size` nodes with the given edges, in order.
fn build(size: usize, edges: &[(usize, usize, f64)]) -> (TrustGraph, Vec<NodeId>) {
	let mut graph = TrustGraph::new();
	let ids: Vec<NodeId> = (0..size).map(|_| graph.add_node()).collect();
	for &(from, to, weight) in edges {
		graph.add_edge(ids[from], ids[to], weight).unwrap();
	}
	(graph, ids)
}

fn random_edges(rng: &mut StdRng, size: usize, count: usize) -> Vec<(usize, usize, f64)> {
	(0..count)
		.map(|_| {
			let from = rng.gen_range(0..size);
			let to = rng.gen_range(0..size);
			let weight = rng.gen_range(0.1..=1.0);
			(from, to, weight)
		})
		.collect()
}

fn reachable_from(source: usize, size: usize, edges: &[(usize, usize, f64)]) -> Vec<bool> {
	let mut seen = vec![false; size];
	let mut queue = VecDeque::from([source]);
	seen[source] = true;
	while let Some(node) = queue.pop_front() {
		for &(from, to, _) in edges {
			if from == node && !seen[to] {
				seen[to] = true;
				queue.push_back(to);
			}
		}
	}
	seen
}

fn trust_of(graph: &TrustGraph, ids: &[NodeId]) -> Vec<f64> {
	ids.iter().map(|&id| graph.trust(id).unwrap()).collect()
}

#[test]
fn source_trust_stays_zero() {
	let edges = [(0, 1, 0.8), (1, 0, 0.9), (1, 2, 0.5), (2, 0, 0.3)];
	for spreading_factor in [0.0, 0.3, 0.85, 1.0] {
		let (mut graph, ids) = build(3, &edges);
		let params = Params::new(200.0, spreading_factor, 0.01);

		run(&mut graph, ids[0], &params).unwrap();

		assert_eq!(graph.trust(ids[0]), Some(0.0));
	}
}

#[test]
fn reachable_positive_unreachable_zero() {
	let rng = &mut StdRng::seed_from_u64(7);
	let params = Params::new(200.0, 0.85, 1e-6);

	for _ in 0..10 {
		let size = 20;
		let edges = random_edges(rng, size, 30);
		let reachable = reachable_from(0, size, &edges);
		let (mut graph, ids) = build(size, &edges);

		run(&mut graph, ids[0], &params).unwrap();

		for (i, trust) in trust_of(&graph, &ids).into_iter().enumerate().skip(1) {
			if reachable[i] {
				assert!(trust > 0.0, "reachable node {} has no trust", i);
			} else {
				assert_eq!(trust, 0.0, "unreachable node {} has trust", i);
			}
		}
	}
}

#[test]
fn total_trust_within_budget() {
	let rng = &mut StdRng::seed_from_u64(11);
	let edges = random_edges(rng, 15, 40);
	let (mut graph, ids) = build(15, &edges);

	run(&mut graph, ids[0], &Params::default()).unwrap();

	let total: f64 = trust_of(&graph, &ids).iter().sum();
	assert!(total > 0.0);
	assert!(total <= 200.0);
}

#[test]
fn distance_decay() {
	let (mut graph, ids) = build(4, &[(0, 1, 0.8), (1, 2, 0.8), (1, 3, 0.8)]);

	run(&mut graph, ids[0], &Params::default()).unwrap();

	let trust = trust_of(&graph, &ids);
	assert!(trust[1] > trust[2]);
	assert!(trust[1] > trust[3]);
	assert!((trust[2] - trust[3]).abs() < 1e-9);
}

#[test]
fn weight_sensitivity() {
	let (mut graph, ids) = build(4, &[(0, 1, 0.8), (1, 2, 0.8), (1, 3, 0.4)]);

	run(&mut graph, ids[0], &Params::default()).unwrap();

	let trust = trust_of(&graph, &ids);
	assert!(trust[2] > trust[3]);
	assert!(trust[2] < trust[1]);
	assert!(trust[3] < trust[1]);
}

#[test]
fn fan_in_amplification() {
	let edges = [(0, 1, 0.8), (0, 2, 0.8), (1, 3, 0.8), (1, 4, 0.8), (2, 3, 0.8)];
	let (mut graph, ids) = build(5, &edges);

	run(&mut graph, ids[0], &Params::default()).unwrap();

	let trust = trust_of(&graph, &ids);
	assert!(trust[3] > trust[4]);
}

#[test]
fn disconnected_component_isolation() {
	let (mut graph, ids) = build(5, &[(0, 1, 0.8), (1, 2, 0.6), (3, 4, 0.9)]);

	run(&mut graph, ids[0], &Params::default()).unwrap();

	let trust = trust_of(&graph, &ids);
	assert!(trust[1] > 0.0);
	assert!(trust[2] > 0.0);
	assert_eq!(trust[3], 0.0);
	assert_eq!(trust[4], 0.0);
}

#[test]
fn failed_validation_leaves_nodes_untouched() {
	let invalid = [
		Params::new(0.0, 0.85, 0.01),
		Params::new(200.0, 1.2, 0.01),
		Params::new(200.0, 0.85, -1.0),
	];

	for params in invalid {
		let (mut graph, ids) = build(3, &[(0, 1, 0.8), (1, 2, 0.8)]);
		let before = graph.nodes().to_vec();

		let res = run(&mut graph, ids[0], &params);

		assert!(matches!(
			res,
			Err(AppleseedError::InitialEnergyOutOfRange(_)
				| AppleseedError::SpreadingFactorOutOfRange(_)
				| AppleseedError::ThresholdOutOfRange(_))
		));
		assert_eq!(graph.nodes(), &before[..]);
	}
}

#[test]
fn identical_inputs_give_identical_scores() {
	let edges = random_edges(&mut StdRng::seed_from_u64(3), 25, 60);

	let (mut first, ids) = build(25, &edges);
	let (mut second, _) = build(25, &edges);
	run(&mut first, ids[0], &Params::default()).unwrap();
	run(&mut second, ids[0], &Params::default()).unwrap();

	for (a, b) in trust_of(&first, &ids).iter().zip(trust_of(&second, &ids).iter()) {
		assert!((a - b).abs() < 1e-12);
	}
}

#[test]
fn skipping_reset_is_detected() {
	let edges = [(0, 1, 0.8), (1, 2, 0.8), (2, 0, 0.5)];
	let (mut graph, ids) = build(3, &edges);
	run(&mut graph, ids[0], &Params::default()).unwrap();
	let fresh_scores = trust_of(&graph, &ids);

	// Reusing the graph as is must not pass silently
	let rerun = catch_unwind(AssertUnwindSafe(|| run(&mut graph, ids[0], &Params::default())));
	assert!(rerun.is_err());

	// After an explicit reset the run matches a fresh one
	graph.reset();
	run(&mut graph, ids[0], &Params::default()).unwrap();
	assert_eq!(trust_of(&graph, &ids), fresh_scores);
}

#[test]
fn round_ceiling_reports_non_convergence() {
	let (mut graph, ids) = build(3, &[(0, 1, 0.8), (1, 2, 0.8)]);
	let params = Params::new(200.0, 0.85, 1e-9).with_max_rounds(5);

	let res = run(&mut graph, ids[0], &params);

	assert!(matches!(res, Err(AppleseedError::NotConverged { rounds: 5 })));
}
