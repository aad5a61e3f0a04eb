//! # Graph Module.
//!
//! The trust graph is an arena of nodes addressed by [`NodeId`] handles, plus an
//! ordered list of weighted edges between them. Node state is only created fresh
//! and can only be cleared through [`TrustGraph::reset`].

use crate::error::AppleseedError;
use std::fmt;

/// Stable handle of a node inside a [`TrustGraph`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(usize);

impl NodeId {
	/// Position of the node in the arena.
	pub fn index(&self) -> usize {
		self.0
	}
}

impl fmt::Display for NodeId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "#{}", self.0)
	}
}

/// Per-vertex accumulator mutated by the engine during a run.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Node {
	pub(crate) trust: f64,
	pub(crate) next_upkeep: u32,
	pub(crate) incoming: f64,
	pub(crate) incoming_next: f64,
	pub(crate) outgoing_weights_discovered: bool,
	pub(crate) outgoing_weight: f64,
}

impl Node {
	/// Constructs a node in its reset state.
	pub fn new() -> Self {
		Self::default()
	}

	/// Accumulated trust.
	pub fn trust(&self) -> f64 {
		self.trust
	}

	/// Round index at which the node's bookkeeping is still pending.
	pub fn next_upkeep(&self) -> u32 {
		self.next_upkeep
	}

	/// Energy available as of the last completed round.
	pub fn incoming(&self) -> f64 {
		self.incoming
	}

	/// Energy accumulating for the round in progress.
	pub fn incoming_next(&self) -> f64 {
		self.incoming_next
	}

	/// Normalizing denominator for the node's outgoing edges.
	pub fn outgoing_weight(&self) -> f64 {
		self.outgoing_weight
	}

	/// Whether the self-retention term has been added to the outgoing weight.
	pub fn outgoing_weights_discovered(&self) -> bool {
		self.outgoing_weights_discovered
	}

	/// No trust can be accumulated before the first upkeep.
	pub fn holds_invariant(&self) -> bool {
		self.next_upkeep != 0 || self.trust == 0.0
	}

	/// Whether every field still holds its default.
	pub fn is_fresh(&self) -> bool {
		*self == Self::default()
	}

	/// Restores the default state.
	pub fn reset(&mut self) {
		*self = Self::default();
	}
}

/// Directed, weighted trust relation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Edge {
	source: NodeId,
	dest: NodeId,
	weight: f64,
}

impl Edge {
	/// Truster.
	pub fn source(&self) -> NodeId {
		self.source
	}

	/// Trustee.
	pub fn dest(&self) -> NodeId {
		self.dest
	}

	/// Non-negative trust weight.
	pub fn weight(&self) -> f64 {
		self.weight
	}
}

/// Arena of nodes and the ordered edge list connecting them.
#[derive(Clone, Debug, Default)]
pub struct TrustGraph {
	pub(crate) nodes: Vec<Node>,
	edges: Vec<Edge>,
}

impl TrustGraph {
	/// Constructs an empty graph.
	pub fn new() -> Self {
		Self::default()
	}

	/// Allocates a fresh node and returns its handle.
	pub fn add_node(&mut self) -> NodeId {
		self.nodes.push(Node::new());
		NodeId(self.nodes.len() - 1)
	}

	/// Appends an edge. Edge order is the order every round walks them in.
	pub fn add_edge(
		&mut self, source: NodeId, dest: NodeId, weight: f64,
	) -> Result<(), AppleseedError> {
		self.check(source)?;
		self.check(dest)?;
		if !weight.is_finite() || weight < 0.0 {
			return Err(AppleseedError::ValidationError(format!(
				"Edge {} -> {} has invalid weight {}",
				source, dest, weight
			)));
		}

		self.edges.push(Edge { source, dest, weight });
		Ok(())
	}

	/// Returns an error if the handle is not part of this graph.
	pub fn check(&self, id: NodeId) -> Result<(), AppleseedError> {
		if id.0 < self.nodes.len() {
			Ok(())
		} else {
			Err(AppleseedError::UnknownNode(id.0))
		}
	}

	/// Looks up a node.
	pub fn node(&self, id: NodeId) -> Option<&Node> {
		self.nodes.get(id.0)
	}

	/// Trust of a node, `None` for foreign handles.
	pub fn trust(&self, id: NodeId) -> Option<f64> {
		self.node(id).map(Node::trust)
	}

	/// All nodes, indexed by [`NodeId::index`].
	pub fn nodes(&self) -> &[Node] {
		&self.nodes
	}

	/// All edges in walk order.
	pub fn edges(&self) -> &[Edge] {
		&self.edges
	}

	/// Handles of every node.
	pub fn node_ids(&self) -> impl Iterator<Item = NodeId> {
		(0..self.nodes.len()).map(NodeId)
	}

	/// Number of nodes.
	pub fn len(&self) -> usize {
		self.nodes.len()
	}

	/// Whether the graph has no nodes.
	pub fn is_empty(&self) -> bool {
		self.nodes.is_empty()
	}

	/// Whether every node is in its reset state.
	pub fn is_fresh(&self) -> bool {
		self.nodes.iter().all(Node::is_fresh)
	}

	/// Clears all node state so the graph can be run again. Edges are kept.
	pub fn reset(&mut self) {
		self.nodes.iter_mut().for_each(Node::reset);
	}

	/// Mutable nodes alongside the read-only edge list.
	pub(crate) fn split_mut(&mut self) -> (&mut [Node], &[Edge]) {
		(&mut self.nodes, &self.edges)
	}
}
