use crate::graph::{Edge, Node, NodeId};

/// Capacity every non-source node keeps for itself. Also keeps sinks from
/// having a zero denominator.
pub(crate) const SELF_RETENTION_WEIGHT: f64 = 1.0;

/// Sums the outgoing edge weights of every node and adds the self-retention
/// term once to each node except the run source.
pub(crate) fn discover_outgoing_weights(nodes: &mut [Node], edges: &[Edge], source: NodeId) {
	for edge in edges {
		nodes[edge.source().index()].outgoing_weight += edge.weight();

		for id in [edge.source(), edge.dest()] {
			if id == source {
				continue;
			}

			let node = &mut nodes[id.index()];
			if !node.outgoing_weights_discovered {
				node.outgoing_weight += SELF_RETENTION_WEIGHT;
				node.outgoing_weights_discovered = true;
			}
		}
	}
}
