use std::collections::HashMap;
use std::path::{Path, PathBuf};

use log::info;
use rand::Rng;
use rand::seq::IndexedRandom;

use super::dictionary::WordDictionary;
use super::filler::{FillOptions, fill_in_madlib_with};
use crate::error::{MadlibError, Result};
use crate::io;

/// Stem suffix of the files written by [`Generator::process_file`].
pub const FILLED_SUFFIX: &str = "_filled";

/// High-level generator combining a word dictionary and a set of templates.
///
/// # Layout
/// A data folder contains:
/// - `words/`: one `<CATEGORY>.txt` word list per category (cached as `words.bin`)
/// - `templates/`: one `<name>.txt` madlib template per file
///
/// # Responsibilities
/// - Load the dictionary and the templates
/// - Fill a named or a random template
/// - Fill a template file and write the result next to it
#[derive(Debug, Default)]
pub struct Generator {
	dictionary: WordDictionary,
	templates: HashMap<String, String>,

	/// Options applied to every fill.
	pub options: FillOptions,
}

impl Generator {
	/// Creates a generator from a data folder.
	///
	/// # Parameters
	/// - `data_dir`: folder holding `words/` and `templates/`.
	///   Both `"folder"` and `"folder/"` are accepted, `"."` is the working directory.
	///
	/// # Errors
	/// - The path is not a directory.
	/// - `words/` can't be loaded or a template can't be read.
	pub fn new<P: AsRef<Path>>(data_dir: P) -> Result<Self> {
		let folder = io::normalize_folder(data_dir.as_ref());
		if !folder.is_dir() {
			return Err(MadlibError::InvalidPath(format!("Expected a directory, got: {}", folder.display())));
		}

		let dictionary = WordDictionary::load(folder.join("words"))?;
		let mut generator = Self::from_dictionary(dictionary);

		let templates = folder.join("templates");
		if templates.is_dir() {
			for file in io::list_files(&templates, "txt")? {
				let name = io::get_filename(&file)?;
				// Output of `process_file`, not a template
				if name.ends_with(FILLED_SUFFIX) {
					continue;
				}
				generator.add_template(&name, io::read_file(&file)?);
			}
		}

		info!(
			"generator ready: {} categories, {} templates",
			generator.dictionary.len(),
			generator.templates.len()
		);
		Ok(generator)
	}

	/// Creates a generator with no templates around an existing dictionary.
	pub fn from_dictionary(dictionary: WordDictionary) -> Self {
		Self { dictionary, ..Self::default() }
	}

	/// Registers (or replaces) a template.
	pub fn add_template(&mut self, name: &str, template: impl Into<String>) {
		self.templates.insert(name.to_owned(), template.into());
	}

	pub fn dictionary(&self) -> &WordDictionary {
		&self.dictionary
	}

	/// Returns the loaded template names, sorted.
	pub fn template_names(&self) -> Vec<String> {
		let mut names: Vec<String> = self.templates.keys().cloned().collect();
		names.sort();
		names
	}

	/// Fills an arbitrary template with the generator's dictionary.
	pub fn fill_text(&self, template: &str) -> Result<String> {
		fill_in_madlib_with(template, &self.dictionary, &self.options, &mut rand::rng())
	}

	/// Fills the template registered as `name`.
	pub fn fill(&self, name: &str) -> Result<String> {
		let template = self
			.templates
			.get(name)
			.ok_or_else(|| MadlibError::UnknownTemplate(name.to_owned()))?;
		self.fill_text(template)
	}

	/// Picks a template uniformly at random and fills it.
	pub fn generate(&self) -> Result<String> {
		self.generate_with(&mut rand::rng())
	}

	/// Same as `generate` with an explicit random source.
	pub fn generate_with<R: Rng>(&self, rng: &mut R) -> Result<String> {
		// Sorted so a seeded generator always picks the same template
		let names = self.template_names();
		let name = names.choose(rng).ok_or(MadlibError::NoTemplates)?;
		fill_in_madlib_with(&self.templates[name], &self.dictionary, &self.options, rng)
	}

	/// Fills the template stored in `path` and writes it to
	/// `<stem>_filled.txt` in the same folder. Files with that suffix are
	/// skipped when templates are loaded.
	///
	/// Returns the path of the written file.
	pub fn process_file<P: AsRef<Path>>(&self, path: P) -> Result<PathBuf> {
		let filled = self.fill_text(&io::read_file(&path)?)?;
		let output = io::build_output_path(&path, FILLED_SUFFIX, "txt")?;
		std::fs::write(&output, filled)?;
		info!("wrote {}", output.display());
		Ok(output)
	}
}
