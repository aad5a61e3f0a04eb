use super::propagation::propagate;
use crate::{
	graph::{Node, NodeId},
	params::Params,
};

/// Weight of the notional edge every serviced node keeps back to the run source.
pub(crate) const BACKFLOW_WEIGHT: f64 = 1.0;

/// Runs the once-per-round bookkeeping of `id` if it is due for `round`.
///
/// A serviced node other than the source then makes sure the source has been
/// serviced for the same round and pushes its backflow share onto the source's
/// next-round bucket. The source never recurses, so this is at most one hop deep.
pub(crate) fn upkeep(
	nodes: &mut [Node], id: NodeId, round: u32, source: NodeId, params: &Params,
	max_delta: &mut f64,
) {
	if !service(nodes, id, round, source, params, max_delta) {
		return;
	}

	if id != source {
		service(nodes, source, round, source, params, max_delta);
		propagate(nodes, id, source, BACKFLOW_WEIGHT, params);
	}
}

/// Accumulates trust and rolls over the energy buckets. Returns `false` when the
/// node was already serviced this round.
fn service(
	nodes: &mut [Node], id: NodeId, round: u32, source: NodeId, params: &Params,
	max_delta: &mut f64,
) -> bool {
	let node = &mut nodes[id.index()];
	if node.next_upkeep != round {
		return false;
	}
	node.next_upkeep = round + 1;

	if id != source {
		let delta = node.incoming_next * (1.0 - params.spreading_factor);
		*max_delta = max_delta.max(delta);
		node.trust += delta;
	}

	node.incoming = node.incoming_next;
	node.incoming_next = 0.0;

	true
}
