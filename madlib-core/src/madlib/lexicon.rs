use std::collections::{BTreeMap, HashMap};

use serde_json::{Map, Value};

use crate::error::{MadlibError, Result};

/// Source of candidate words for placeholder categories.
///
/// The filler only needs two things from a dictionary: how many candidates a
/// category holds, and the candidate at a given index. Candidates are checked
/// when they are drawn, so a dynamically typed lexicon may hold invalid
/// values that only fault if the random draw lands on them.
pub trait Lexicon {
	/// Number of candidates under `category`, `None` when the category is unknown.
	fn candidate_count(&self, category: &str) -> Result<Option<usize>>;

	/// Candidate at `index` (`index < candidate_count`).
	fn candidate(&self, category: &str, index: usize) -> Result<&str>;
}

fn nth_word<'a, S: AsRef<str> + 'a>(words: Option<&'a Vec<S>>, category: &str, index: usize) -> Result<&'a str> {
	words
		.and_then(|words| words.get(index))
		.map(|word| word.as_ref())
		.ok_or_else(|| MadlibError::UnknownCategory(category.to_owned()))
}

impl<S: AsRef<str>> Lexicon for HashMap<String, Vec<S>> {
	fn candidate_count(&self, category: &str) -> Result<Option<usize>> {
		Ok(self.get(category).map(Vec::len))
	}

	fn candidate(&self, category: &str, index: usize) -> Result<&str> {
		nth_word(self.get(category), category, index)
	}
}

impl<S: AsRef<str>> Lexicon for BTreeMap<String, Vec<S>> {
	fn candidate_count(&self, category: &str) -> Result<Option<usize>> {
		Ok(self.get(category).map(Vec::len))
	}

	fn candidate(&self, category: &str, index: usize) -> Result<&str> {
		nth_word(self.get(category), category, index)
	}
}

/// A JSON object used as a dictionary.
///
/// - A category mapped to anything other than an array is a type fault.
/// - An array element that is not a string is a type fault, raised only when
///   that element is drawn.
impl Lexicon for Map<String, Value> {
	fn candidate_count(&self, category: &str) -> Result<Option<usize>> {
		match self.get(category) {
			None => Ok(None),
			Some(Value::Array(values)) => Ok(Some(values.len())),
			Some(_) => Err(MadlibError::CandidateNotString(category.to_owned())),
		}
	}

	fn candidate(&self, category: &str, index: usize) -> Result<&str> {
		match self.get(category) {
			None => Err(MadlibError::UnknownCategory(category.to_owned())),
			Some(Value::Array(values)) => match values.get(index) {
				Some(Value::String(word)) => Ok(word.as_str()),
				_ => Err(MadlibError::CandidateNotString(category.to_owned())),
			},
			Some(_) => Err(MadlibError::CandidateNotString(category.to_owned())),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use serde_json::json;

	#[test]
	fn hash_map_lexicon() {
		let mut words: HashMap<String, Vec<&str>> = HashMap::new();
		words.insert("NAME".into(), vec!["Ted", "Ned"]);

		assert_eq!(words.candidate_count("NAME").unwrap(), Some(2));
		assert_eq!(words.candidate_count("NOPE").unwrap(), None);
		assert_eq!(words.candidate("NAME", 1).unwrap(), "Ned");
	}

	#[test]
	fn json_lexicon_checks_values_lazily() {
		let value = json!({ "NAME": ["Ted", 4], "BAD": "Ted" });
		let map = value.as_object().unwrap();

		assert_eq!(map.candidate_count("NAME").unwrap(), Some(2));
		assert_eq!(map.candidate("NAME", 0).unwrap(), "Ted");
		assert!(matches!(map.candidate("NAME", 1), Err(MadlibError::CandidateNotString(_))));
		assert!(matches!(map.candidate_count("BAD"), Err(MadlibError::CandidateNotString(_))));
		assert_eq!(map.candidate_count("MISSING").unwrap(), None);
	}
}
