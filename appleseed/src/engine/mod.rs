//! # Engine Module.
//!
//! Spreads the source's energy budget over the trust graph round by round until
//! the largest per-round trust increase drops below the threshold.
//!
//! Every round walks the edge list in order. The first time a round visits a node
//! its bookkeeping runs: the retained part of last round's energy becomes trust,
//! the energy buckets roll over, and a backflow share returns to the source. Each
//! edge then forwards a weighted share of its source's energy to its destination.

mod discovery;
mod propagation;
mod upkeep;

use crate::{
	error::AppleseedError,
	graph::{Edge, Node, NodeId, TrustGraph},
	params::{Params, MIN_ROUNDS},
};
use discovery::discover_outgoing_weights;
use log::{debug, trace, warn};
use propagation::propagate;
use upkeep::upkeep;

/// Computes the trust of every node from the perspective of `source`.
///
/// Parameters and the source handle are validated before any node is touched.
/// The graph must be fresh, either newly built or cleared with
/// [`TrustGraph::reset`]; running it again without a reset panics.
pub fn run(graph: &mut TrustGraph, source: NodeId, params: &Params) -> Result<(), AppleseedError> {
	params.validate()?;
	graph.check(source)?;
	assert!(
		graph.is_fresh(),
		"Trust graph holds state from a previous run, reset it first"
	);

	debug!(
		"Spreading {} energy from {} over {} nodes and {} edges",
		params.initial_energy,
		source,
		graph.len(),
		graph.edges().len()
	);

	let (nodes, edges) = graph.split_mut();
	spread(nodes, edges, source, params)
}

/// Injects the energy budget at the source and runs rounds until convergence.
fn spread(
	nodes: &mut [Node], edges: &[Edge], source: NodeId, params: &Params,
) -> Result<(), AppleseedError> {
	let src = &mut nodes[source.index()];
	src.trust = 0.0;
	src.incoming_next = params.initial_energy;

	discover_outgoing_weights(nodes, edges, source);

	let mut round: u32 = 0;
	loop {
		let mut max_delta = f64::NEG_INFINITY;

		for edge in edges {
			let (from, to) = (edge.source(), edge.dest());
			assert!(
				nodes[from.index()].holds_invariant() && nodes[to.index()].holds_invariant(),
				"Node accumulated trust before its first upkeep on edge {} -> {}",
				from,
				to
			);

			upkeep(nodes, from, round, source, params, &mut max_delta);
			upkeep(nodes, to, round, source, params, &mut max_delta);
			propagate(nodes, from, to, edge.weight(), params);
		}

		round += 1;
		trace!("Round {} max delta {}", round, max_delta);

		if max_delta <= params.threshold && round >= MIN_ROUNDS {
			debug!("Converged after {} rounds", round);
			return Ok(());
		}

		if let Some(max_rounds) = params.max_rounds {
			if round >= max_rounds {
				warn!(
					"Stopped after {} rounds with max delta {} above threshold {}",
					round, max_delta, params.threshold
				);
				return Err(AppleseedError::NotConverged { rounds: round });
			}
		}
	}
}
