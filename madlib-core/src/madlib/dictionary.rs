use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::thread;

use log::info;
use serde::{Deserialize, Serialize};

use super::lexicon::Lexicon;
use crate::error::{MadlibError, Result};
use crate::io::{build_output_path, get_filename, list_files, read_word_list};

/// Category dictionary used to fill madlibs.
///
/// Maps a category name (`NAME`, `ADJECTIVE`, ...) to its candidate words.
///
/// # Responsibilities
/// - Build the dictionary from a folder of word lists (`<CATEGORY>.txt`)
/// - Persist / restore it as a compact binary cache (`postcard`)
/// - Merge partial dictionaries (parallel loading)
///
/// # Invariants
/// - Words are unique within a category, in order of first appearance
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct WordDictionary {
	categories: BTreeMap<String, Vec<String>>,
}

impl WordDictionary {
	/// Returns an empty dictionary.
	pub fn new() -> Self {
		Self::default()
	}

	/// Adds `words` to `category`, skipping words already present.
	pub fn insert<I, S>(&mut self, category: &str, words: I)
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		let entry = self.categories.entry(category.to_owned()).or_default();
		for word in words {
			let word = word.into();
			if !entry.contains(&word) {
				entry.push(word);
			}
		}
	}

	/// Candidate words of `category`.
	pub fn get(&self, category: &str) -> Option<&[String]> {
		self.categories.get(category).map(Vec::as_slice)
	}

	/// Category names, sorted.
	pub fn categories(&self) -> impl Iterator<Item = &str> {
		self.categories.keys().map(String::as_str)
	}

	/// Number of categories.
	pub fn len(&self) -> usize {
		self.categories.len()
	}

	pub fn is_empty(&self) -> bool {
		self.categories.is_empty()
	}

	/// Merges another dictionary into this one.
	///
	/// Word lists of shared categories are concatenated without duplicates.
	pub fn merge(&mut self, other: &Self) {
		for (category, words) in &other.categories {
			self.insert(category, words.iter().cloned());
		}
	}

	/// Loads a dictionary, preferring the binary cache `<folder>.bin` when it
	/// exists.
	///
	/// When there is no cache, the word lists are read with `from_folder` and
	/// the cache is written for the next load.
	pub fn load<P: AsRef<Path>>(folder: P) -> Result<Self> {
		let cache_path = build_output_path(&folder, "", "bin")?;
		if cache_path.exists() {
			info!("loading word dictionary from cache {}", cache_path.display());
			return Self::from_bytes(&std::fs::read(&cache_path)?);
		}
		Self::rebuild(folder)
	}

	/// Reads the word lists of `folder` and overwrites its binary cache.
	pub fn rebuild<P: AsRef<Path>>(folder: P) -> Result<Self> {
		let dictionary = Self::from_folder(&folder)?;
		dictionary.save(build_output_path(&folder, "", "bin")?)?;
		Ok(dictionary)
	}

	/// Builds a dictionary from every `*.txt` word list of `folder`.
	///
	/// # Behavior
	/// - The category name is the file stem (`NAME.txt` → `NAME`).
	/// - Files are split into chunks (one per CPU) read by worker threads;
	///   partial dictionaries are merged as they arrive.
	///
	/// # Errors
	/// Returns an error if `folder` is not a directory or a file can't be read.
	pub fn from_folder<P: AsRef<Path>>(folder: P) -> Result<Self> {
		let folder = folder.as_ref();
		if !folder.is_dir() {
			return Err(MadlibError::InvalidPath(format!("Expected a directory, got: {}", folder.display())));
		}

		let files = list_files(folder, "txt")?;
		let chunk_size = files.len().div_ceil(num_cpus::get().max(1)).max(1);

		let (tx, rx) = mpsc::channel();
		for chunk in files.chunks(chunk_size) {
			let tx = tx.clone();
			let chunk: Vec<PathBuf> = chunk.to_vec();

			thread::spawn(move || {
				// The receiver lives until every sender is dropped
				let _ = tx.send(Self::read_word_lists(&chunk));
			});
		}
		drop(tx);

		let mut dictionary = Self::new();
		for partial in rx.iter() {
			dictionary.merge(&partial?);
		}

		info!("loaded {} categories from {}", dictionary.len(), folder.display());
		Ok(dictionary)
	}

	fn read_word_lists(files: &[PathBuf]) -> Result<Self> {
		let mut partial = Self::new();
		for file in files {
			partial.insert(&get_filename(file)?, read_word_list(file)?);
		}
		Ok(partial)
	}

	/// Writes the dictionary to `path` (postcard encoding).
	pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
		std::fs::write(path, self.to_bytes()?)?;
		Ok(())
	}

	pub fn to_bytes(&self) -> Result<Vec<u8>> {
		Ok(postcard::to_stdvec(self)?)
	}

	pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
		Ok(postcard::from_bytes(bytes)?)
	}
}

impl Lexicon for WordDictionary {
	fn candidate_count(&self, category: &str) -> Result<Option<usize>> {
		self.categories.candidate_count(category)
	}

	fn candidate(&self, category: &str, index: usize) -> Result<&str> {
		self.categories.candidate(category, index)
	}
}
