//! # Appleseed
//!
//! A library for computing personalized trust rankings over a directed, weighted
//! trust graph.
//!
//! ## Main characteristics:
//!
//! **Subjective** - scores are computed from the perspective of a single source
//! node. Two viewers of the same graph get two different rankings.
//!
//! **Bounded** - a fixed energy budget is injected at the source and can only
//! shrink as it spreads, so the total trust handed out never exceeds it.
//!
//! **Local** - nodes the source has no directed path to receive no trust at all.
//!
//! ## Implementation
//!
//! Energy spreads along trust edges in discrete rounds. Each round every node
//! keeps part of the energy it received as trust, forwards the rest in
//! proportion to its outgoing edge weights, and returns a share to the source.
//! Rounds repeat until the largest per-round trust increase falls below a
//! threshold.
//!
//! The [`engine`] works on a [`graph::TrustGraph`] directly. The [`Client`] builds
//! that graph from named [`storage::EdgeRecord`]s and turns the result into a
//! ranking.

// Rustc
#![warn(trivial_casts)]
#![deny(
	absolute_paths_not_starting_with_crate, deprecated, future_incompatible, missing_docs,
	nonstandard_style, unreachable_code, unreachable_patterns
)]
#![forbid(unsafe_code)]
// Clippy
#![allow(clippy::tabs_in_doc_comments, clippy::needless_range_loop, clippy::new_without_default)]
#![deny(
	// Complexity
 	clippy::unnecessary_cast,
	clippy::needless_question_mark,
	clippy::clone_on_copy,
	// Pedantic
 	clippy::cast_lossless,
 	clippy::cast_possible_wrap,
	// Perf
	clippy::redundant_clone,
	// Restriction
 	clippy::panic,
	// Style
 	clippy::let_and_return,
 	clippy::needless_borrow
)]

pub mod engine;
pub mod error;
pub mod graph;
pub mod params;
pub mod storage;

pub use engine::run;
pub use params::Params;

use error::AppleseedError;
use graph::{NodeId, TrustGraph};
use log::info;
use std::collections::HashMap;
use storage::EdgeRecord;

/// Score struct.
#[derive(Clone, Debug, PartialEq)]
pub struct Score {
	/// Participant name.
	pub peer: String,
	/// Trust from the perspective of the source.
	pub score: f64,
}

/// Client struct.
pub struct Client {
	params: Params,
}

impl Client {
	/// Creates a new Client instance.
	pub fn new(params: Params) -> Self {
		Self { params }
	}

	/// Calculates the trust of every peer from the perspective of `source`.
	///
	/// Peers are returned from most to least trusted, ties ordered by name. The
	/// source itself is left out of the ranking.
	pub fn calculate_scores(
		&self, source: &str, edges: Vec<EdgeRecord>,
	) -> Result<Vec<Score>, AppleseedError> {
		if edges.is_empty() {
			return Err(AppleseedError::ValidationError(
				"No trust edges found.".to_string(),
			));
		}

		// Intern peer names in order of first appearance
		let mut graph = TrustGraph::new();
		let mut ids: HashMap<String, NodeId> = HashMap::new();
		let mut names: Vec<String> = Vec::new();

		for edge in &edges {
			let weight = edge.weight();
			if !weight.is_finite() || weight < 0.0 {
				return Err(AppleseedError::ValidationError(format!(
					"Trust edge {} -> {} has invalid weight {}",
					edge.truster(),
					edge.trustee(),
					weight
				)));
			}

			let [from, to] = [edge.truster(), edge.trustee()].map(|name| {
				*ids.entry(name.to_string()).or_insert_with(|| {
					names.push(name.to_string());
					graph.add_node()
				})
			});

			graph.add_edge(from, to, weight)?;
		}

		let source_id = *ids.get(source).ok_or_else(|| {
			AppleseedError::ValidationError(format!(
				"Source \"{}\" not found in trust edges.",
				source
			))
		})?;

		run(&mut graph, source_id, &self.params)?;

		let mut scores: Vec<Score> = graph
			.node_ids()
			.filter(|id| *id != source_id)
			.map(|id| Score {
				peer: names[id.index()].clone(),
				score: graph.trust(id).unwrap_or_default(),
			})
			.collect();

		scores.sort_by(|a, b| b.score.total_cmp(&a.score).then_with(|| a.peer.cmp(&b.peer)));

		info!(
			"Calculated {} scores from the perspective of \"{}\".",
			scores.len(),
			source
		);

		Ok(scores)
	}

	/// Gets params.
	pub fn get_params(&self) -> &Params {
		&self.params
	}
}
