//! # CLI Module.
//!
//! This module contains all CLI related data handling and conversions.

use crate::fs::{get_file_path, load_source, save_config, FileType, EDGES_FILENAME, SCORES_FILENAME};
use appleseed::{
	error::AppleseedError,
	storage::{CSVFileStorage, EdgeRecord, ScoreRecord, Storage},
	Client, Params,
};
use clap::{Args, Parser, Subcommand};
use log::info;
use std::path::PathBuf;

/// Number of ranked peers logged after a scores run.
const TOP_SCORES_SHOWN: usize = 10;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
	#[command(subcommand)]
	pub mode: Mode,
}

/// CLI commands.
#[derive(Subcommand)]
pub enum Mode {
	/// Calculate the trust scores from the saved edges. Requires 'ScoresData'.
	Scores(ScoresData),
	/// Display the current configuration.
	Show,
	/// Update the configuration. Requires 'ParamsData'.
	Update(ParamsData),
}

/// Scores subcommand input.
#[derive(Args, Debug)]
pub struct ScoresData {
	/// Peer whose perspective the scores are computed from (defaults to $SOURCE).
	#[clap(long = "source")]
	source: Option<String>,
	/// Path to a CSV file of trust edges (from,to,weight).
	#[clap(long = "edges")]
	edges: Option<String>,
	/// Parameter overrides for this run only.
	#[command(flatten)]
	params: ParamsData,
}

/// Parameters input, shared by `scores` and `update`.
#[derive(Args, Debug, Default)]
pub struct ParamsData {
	/// Total energy injected at the source.
	#[clap(long = "initial-energy")]
	initial_energy: Option<String>,
	/// Fraction of energy forwarded each round (0-1).
	#[clap(long = "spreading-factor")]
	spreading_factor: Option<String>,
	/// Convergence bound on the largest per-round trust increase.
	#[clap(long = "threshold")]
	threshold: Option<String>,
	/// Ceiling on the number of rounds.
	#[clap(long = "max-rounds")]
	max_rounds: Option<String>,
}

impl ParamsData {
	/// Applies the given values on top of `params` and validates the result.
	pub fn apply(&self, params: &mut Params) -> Result<(), AppleseedError> {
		if let Some(initial_energy) = &self.initial_energy {
			params.initial_energy = parse_f64(initial_energy)?;
		}

		if let Some(spreading_factor) = &self.spreading_factor {
			params.spreading_factor = parse_f64(spreading_factor)?;
		}

		if let Some(threshold) = &self.threshold {
			params.threshold = parse_f64(threshold)?;
		}

		if let Some(max_rounds) = &self.max_rounds {
			let rounds =
				max_rounds.parse::<u32>().map_err(|e| AppleseedError::ParsingError(e.to_string()))?;
			params.max_rounds = Some(rounds);
		}

		params.validate()
	}
}

fn parse_f64(value: &str) -> Result<f64, AppleseedError> {
	value.parse::<f64>().map_err(|e| AppleseedError::ParsingError(e.to_string()))
}

/// Handle `scores` command.
pub fn handle_scores(config: Params, data: ScoresData) -> Result<(), AppleseedError> {
	let mut params = config;
	data.params.apply(&mut params)?;

	let source = data.source.or_else(load_source).ok_or_else(|| {
		AppleseedError::ValidationError(
			"Missing source. Use --source or set SOURCE.".to_string(),
		)
	})?;

	let edges_fp = match data.edges {
		Some(path) => PathBuf::from(path),
		None => get_file_path(EDGES_FILENAME, FileType::Csv)?,
	};
	let edges: Vec<EdgeRecord> = CSVFileStorage::<EdgeRecord>::new(edges_fp).load()?;

	// Calculate scores
	let client = Client::new(params);
	let score_records: Vec<ScoreRecord> = client
		.calculate_scores(&source, edges)?
		.into_iter()
		.enumerate()
		.map(|(i, score)| ScoreRecord::from_score(i + 1, score))
		.collect();

	for record in score_records.iter().take(TOP_SCORES_SHOWN) {
		info!("{:>3}. {} {:.6}", record.rank(), record.peer(), record.score());
	}

	let scores_fp = get_file_path(SCORES_FILENAME, FileType::Csv)?;

	// Save scores
	let mut records_storage = CSVFileStorage::<ScoreRecord>::new(scores_fp);

	records_storage.save(score_records)?;

	info!(
		"Scores saved at \"{}\".",
		records_storage.filepath().display()
	);

	Ok(())
}

/// Handles the CLI project configuration update.
pub fn handle_update(config: &mut Params, data: ParamsData) -> Result<(), AppleseedError> {
	data.apply(config)?;
	save_config(*config)?;

	info!("Configuration updated:\n{:#?}", config);

	Ok(())
}
