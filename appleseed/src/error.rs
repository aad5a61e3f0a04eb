//! # Error Module.
//!
//! This module features the `AppleseedError` enum for error handling throughout the project.

use thiserror::Error;

/// The crate-wide error variants.
#[derive(Debug, Error)]
pub enum AppleseedError {
	/// Initial energy must be strictly positive
	#[error("InitialEnergyOutOfRange: {0} must be greater than 0")]
	InitialEnergyOutOfRange(f64),

	/// Spreading factor must lie within [0, 1]
	#[error("SpreadingFactorOutOfRange: {0} must be within [0, 1]")]
	SpreadingFactorOutOfRange(f64),

	/// Convergence threshold must be strictly positive
	#[error("ThresholdOutOfRange: {0} must be greater than 0")]
	ThresholdOutOfRange(f64),

	/// The round ceiling was hit before the scores converged
	#[error("NotConverged: no convergence after {rounds} rounds")]
	NotConverged {
		/// Number of completed rounds.
		rounds: u32,
	},

	/// Node handle does not belong to the graph
	#[error("UnknownNode: {0}")]
	UnknownNode(usize),

	/// File read/write error
	#[error("FileIOError: {0}")]
	FileIOError(String),

	/// Input/output error
	#[error("IOError: {0}")]
	IOError(std::io::Error),

	/// Parsing error
	#[error("ParsingError: {0}")]
	ParsingError(String),

	/// Validation error
	#[error("ValidationError: {0}")]
	ValidationError(String),
}
