//! # Parameters Module.
//!
//! Numeric configuration of a trust run. Parameters are plain serde data so they
//! can be persisted as JSON, and are checked by [`Params::validate`] before the
//! engine touches any node.

use crate::error::AppleseedError;
use serde::{Deserialize, Serialize};

/// Default energy injected at the source.
pub const DEFAULT_INITIAL_ENERGY: f64 = 200.0;
/// Default fraction of a node's energy forwarded each round.
pub const DEFAULT_SPREADING_FACTOR: f64 = 0.85;
/// Default bound on the largest per-round trust increase.
pub const DEFAULT_THRESHOLD: f64 = 0.01;
/// Rounds that must complete before the convergence test may stop the loop.
pub const MIN_ROUNDS: u32 = 3;

/// Trust run parameters.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct Params {
	/// Total energy injected at the source.
	#[serde(default = "default_initial_energy")]
	pub initial_energy: f64,
	/// Fraction of available energy forwarded onward, the rest is kept as trust.
	#[serde(default = "default_spreading_factor")]
	pub spreading_factor: f64,
	/// Convergence bound on the largest per-round trust increase.
	#[serde(default = "default_threshold")]
	pub threshold: f64,
	/// Optional ceiling on the number of rounds.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub max_rounds: Option<u32>,
}

fn default_initial_energy() -> f64 {
	DEFAULT_INITIAL_ENERGY
}

fn default_spreading_factor() -> f64 {
	DEFAULT_SPREADING_FACTOR
}

fn default_threshold() -> f64 {
	DEFAULT_THRESHOLD
}

impl Default for Params {
	fn default() -> Self {
		Self {
			initial_energy: DEFAULT_INITIAL_ENERGY,
			spreading_factor: DEFAULT_SPREADING_FACTOR,
			threshold: DEFAULT_THRESHOLD,
			max_rounds: None,
		}
	}
}

impl Params {
	/// Constructs unbounded parameters.
	pub fn new(initial_energy: f64, spreading_factor: f64, threshold: f64) -> Self {
		Self { initial_energy, spreading_factor, threshold, max_rounds: None }
	}

	/// Sets the round ceiling.
	pub fn with_max_rounds(mut self, max_rounds: u32) -> Self {
		self.max_rounds = Some(max_rounds);
		self
	}

	/// Checks every parameter. NaN is rejected everywhere.
	pub fn validate(&self) -> Result<(), AppleseedError> {
		if !(self.initial_energy > 0.0) {
			return Err(AppleseedError::InitialEnergyOutOfRange(
				self.initial_energy,
			));
		}

		if !(0.0..=1.0).contains(&self.spreading_factor) {
			return Err(AppleseedError::SpreadingFactorOutOfRange(
				self.spreading_factor,
			));
		}

		if !(self.threshold > 0.0) {
			return Err(AppleseedError::ThresholdOutOfRange(self.threshold));
		}

		if let Some(max_rounds) = self.max_rounds {
			if max_rounds < MIN_ROUNDS {
				return Err(AppleseedError::ValidationError(format!(
					"max_rounds {} is below the minimum of {} rounds",
					max_rounds, MIN_ROUNDS
				)));
			}
		}

		Ok(())
	}
}
