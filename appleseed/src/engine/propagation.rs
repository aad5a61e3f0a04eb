use crate::{
	graph::{Node, NodeId},
	params::Params,
};

/// Pushes `src`'s share of available energy for an edge of `weight` onto
/// `dst`'s next-round bucket. Only `dst.incoming_next` changes.
pub(crate) fn propagate(nodes: &mut [Node], src: NodeId, dst: NodeId, weight: f64, params: &Params) {
	let from = &nodes[src.index()];
	// Zero only for a source whose outgoing edges all weigh nothing
	let share = if from.outgoing_weight > 0.0 { weight / from.outgoing_weight } else { 0.0 };
	let energy = (from.incoming * params.spreading_factor) * share;

	nodes[dst.index()].incoming_next += energy;
}
