//! # Filesystem Actions Module.
//!
//! This module provides functionalities for filesystem actions.

use appleseed::{
	error::AppleseedError,
	storage::{JSONFileStorage, Storage},
	Params,
};
use dotenv::{dotenv, var};
use log::warn;
use std::{env::current_dir, path::PathBuf};

/// Library configuration file name.
pub const CONFIG_FILENAME: &str = "config";
/// Trust edges file name.
pub const EDGES_FILENAME: &str = "edges";
/// Scores file name.
pub const SCORES_FILENAME: &str = "scores";

/// Enum representing the possible file extensions.
pub enum FileType {
	/// CSV file.
	Csv,
	/// JSON file.
	Json,
}

impl FileType {
	/// Converts the enum variant into its corresponding file extension.
	fn as_str(&self) -> &'static str {
		match self {
			FileType::Csv => "csv",
			FileType::Json => "json",
		}
	}
}

/// Loads the source peer from the environment file.
pub fn load_source() -> Option<String> {
	dotenv().ok();
	var("SOURCE").ok()
}

/// Retrieves the path to the `assets` directory.
pub fn get_assets_path() -> Result<PathBuf, AppleseedError> {
	current_dir().map_err(AppleseedError::IOError).map(|current_dir| {
		// Workaround for the tests running in the `appleseed-cli` directory.
		#[cfg(test)]
		{
			current_dir.join("assets")
		}

		#[cfg(not(test))]
		{
			current_dir.join("appleseed-cli/assets")
		}
	})
}

/// Helper function to get the path of a file in the `assets` directory.
pub fn get_file_path(file_name: &str, file_type: FileType) -> Result<PathBuf, AppleseedError> {
	let assets_path = get_assets_path()?;
	Ok(assets_path.join(format!("{}.{}", file_name, file_type.as_str())))
}

/// Loads the configuration file, falling back to the default parameters.
pub fn load_config() -> Result<Params, AppleseedError> {
	let filepath = get_file_path(CONFIG_FILENAME, FileType::Json)?;
	if !filepath.exists() {
		warn!(
			"No configuration at \"{}\". Using default parameters.",
			filepath.display()
		);
		return Ok(Params::default());
	}

	JSONFileStorage::<Params>::new(filepath).load()
}

/// Saves the configuration file.
pub fn save_config(config: Params) -> Result<(), AppleseedError> {
	let filepath = get_file_path(CONFIG_FILENAME, FileType::Json)?;
	JSONFileStorage::<Params>::new(filepath).save(config)
}
