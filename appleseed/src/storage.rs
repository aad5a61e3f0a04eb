//! # Storage Module.
//!
//! This module contains generic storage traits and implementations.

use crate::{error::AppleseedError, Score};
use csv::{ReaderBuilder, WriterBuilder};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::{from_reader, to_string_pretty};
use std::fs::File;
use std::io::{BufReader, Write};
use std::marker::PhantomData;
use std::path::PathBuf;

/// The main trait to be implemented by different storage types.
pub trait Storage<T> {
	/// The error type.
	type Err;

	/// Loads data from storage.
	fn load(&self) -> Result<T, Self::Err>;
	/// Saves data to storage.
	fn save(&mut self, data: T) -> Result<(), Self::Err>;
}

/// The `CSVFileStorage` struct provides a mechanism for persisting
/// and retrieving structured data to and from CSV files.
///
/// # Examples
///
/// ```no_run
/// use appleseed::storage::{CSVFileStorage, EdgeRecord, Storage};
/// use std::path::PathBuf;
///
/// let filepath = PathBuf::from("/path/to/your/edges.csv");
/// let mut storage = CSVFileStorage::<EdgeRecord>::new(filepath);
///
/// let data = vec![EdgeRecord::new("alice".into(), "bob".into(), 0.8)];
///
/// // Save the data to the CSV file.
/// storage.save(data.clone()).unwrap();
///
/// // Load the data from the CSV file.
/// let loaded_data = storage.load().unwrap();
/// assert_eq!(data, loaded_data);
/// ```
pub struct CSVFileStorage<T> {
	filepath: PathBuf,
	phantom: PhantomData<T>,
}

impl<T> CSVFileStorage<T> {
	/// Creates a new CSVFileStorage.
	pub fn new(filepath: PathBuf) -> Self {
		Self { filepath, phantom: PhantomData }
	}

	/// Returns the path to the file.
	pub fn filepath(&self) -> &PathBuf {
		&self.filepath
	}
}

impl<T: Serialize + DeserializeOwned> Storage<Vec<T>> for CSVFileStorage<T> {
	type Err = AppleseedError;

	fn load(&self) -> Result<Vec<T>, AppleseedError> {
		let file = File::open(&self.filepath).map_err(AppleseedError::IOError)?;
		let mut reader = ReaderBuilder::new().trim(csv::Trim::All).from_reader(BufReader::new(file));

		reader
			.deserialize()
			.map(|result| result.map_err(|e| AppleseedError::FileIOError(e.to_string())))
			.collect()
	}

	fn save(&mut self, data: Vec<T>) -> Result<(), AppleseedError> {
		let mut writer = WriterBuilder::new()
			.from_path(&self.filepath)
			.map_err(|e| AppleseedError::FileIOError(e.to_string()))?;

		for record in &data {
			writer.serialize(record).map_err(|e| AppleseedError::FileIOError(e.to_string()))?;
		}

		writer.flush().map_err(|e| AppleseedError::FileIOError(e.to_string()))?;

		Ok(())
	}
}

/// The `JSONFileStorage` struct provides a mechanism for persisting
/// and retrieving structured data to and from JSON files.
pub struct JSONFileStorage<T> {
	filepath: PathBuf,
	phantom: PhantomData<T>,
}

impl<T> JSONFileStorage<T> {
	/// Creates a new JSONFileStorage.
	pub fn new(filepath: PathBuf) -> Self {
		Self { filepath, phantom: PhantomData }
	}

	/// Returns the path to the file.
	pub fn filepath(&self) -> &PathBuf {
		&self.filepath
	}
}

impl<T: Serialize + DeserializeOwned> Storage<T> for JSONFileStorage<T> {
	type Err = AppleseedError;

	fn load(&self) -> Result<T, Self::Err> {
		let file = File::open(&self.filepath).map_err(AppleseedError::IOError)?;
		let reader = BufReader::new(file);
		from_reader(reader).map_err(|e| AppleseedError::ParsingError(e.to_string()))
	}

	fn save(&mut self, data: T) -> Result<(), Self::Err> {
		let json_str =
			to_string_pretty(&data).map_err(|e| AppleseedError::ParsingError(e.to_string()))?;

		let mut file = File::create(&self.filepath).map_err(AppleseedError::IOError)?;
		file.write_all(json_str.as_bytes()).map_err(AppleseedError::IOError)
	}
}

/// Trust edge record.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EdgeRecord {
	/// Name of the truster.
	from: String,
	/// Name of the trustee.
	to: String,
	/// Non-negative trust weight.
	weight: f64,
}

impl EdgeRecord {
	/// Creates a new edge record.
	pub fn new(from: String, to: String, weight: f64) -> Self {
		Self { from, to, weight }
	}

	/// Returns the truster.
	pub fn truster(&self) -> &str {
		&self.from
	}

	/// Returns the trustee.
	pub fn trustee(&self) -> &str {
		&self.to
	}

	/// Returns the weight.
	pub fn weight(&self) -> f64 {
		self.weight
	}
}

/// Score record
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScoreRecord {
	/// Position in the ranking, starting at 1.
	rank: usize,
	/// The peer's name.
	peer: String,
	/// The peer's trust.
	score: f64,
}

impl ScoreRecord {
	/// Creates a new score record.
	pub fn new(rank: usize, peer: String, score: f64) -> Self {
		Self { rank, peer, score }
	}

	/// Creates a score record from a ranked score.
	pub fn from_score(rank: usize, score: Score) -> Self {
		Self::new(rank, score.peer, score.score)
	}

	/// Returns the rank.
	pub fn rank(&self) -> usize {
		self.rank
	}

	/// Returns the peer's name.
	pub fn peer(&self) -> &str {
		&self.peer
	}

	/// Returns the score.
	pub fn score(&self) -> f64 {
		self.score
	}
}
