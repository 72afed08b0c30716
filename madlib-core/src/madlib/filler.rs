use std::collections::HashSet;

use log::{debug, warn};
use rand::Rng;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::capitalize::capitalize_sentences;
use super::lexicon::Lexicon;
use crate::error::{MadlibError, Result};

/// Tuning knobs for a fill operation.
///
/// # Notes
/// - `max_redraws: None` keeps the historical behavior: if a category cannot
///   provide an unused value, the redraw loop never ends. Callers with small
///   word lists should either set a bound or guard the call externally.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FillOptions {
	/// Maximum number of redraws for a single placeholder before giving up
	/// with `MadlibError::Exhausted`.
	pub max_redraws: Option<usize>,
}

/// A `[CATEGORY]` or `[CATEGORY_SUFFIX]` span inside a template.
struct Placeholder<'a> {
	/// Byte offset of `[`.
	start: usize,
	/// Byte offset just past `]`.
	end: usize,
	/// Interior text up to the first underscore.
	category: &'a str,
}

/// Locates the first placeholder of `text`.
///
/// The closing bracket is the first `]` after the first `[`.
fn next_placeholder(text: &str) -> Result<Option<Placeholder<'_>>> {
	let Some(start) = text.find('[') else {
		return Ok(None);
	};
	let close = text[start..]
		.find(']')
		.ok_or(MadlibError::UnterminatedPlaceholder(start))?;
	let end = start + close + 1;

	let interior = &text[start + 1..end - 1];
	let category = interior.split_once('_').map_or(interior, |(category, _)| category);

	Ok(Some(Placeholder { start, end, category }))
}

/// Values already used during one fill, across every category.
///
/// Seeded with the empty string so an empty candidate is never selected.
struct ReplacementLedger {
	used: HashSet<String>,
}

impl ReplacementLedger {
	fn new() -> Self {
		Self { used: HashSet::from([String::new()]) }
	}

	fn contains(&self, value: &str) -> bool {
		self.used.contains(value)
	}

	fn record(&mut self, value: &str) {
		self.used.insert(value.to_owned());
	}
}

/// Draws a value from `category` that is not in the ledger yet.
///
/// Each draw is uniform over the whole category; collisions are simply
/// redrawn. The drawn candidate is type-checked before the ledger lookup.
fn draw_unused<'l, L, R>(
	lexicon: &'l L,
	category: &str,
	ledger: &ReplacementLedger,
	options: &FillOptions,
	rng: &mut R,
) -> Result<&'l str>
where
	L: Lexicon + ?Sized,
	R: Rng,
{
	let count = lexicon
		.candidate_count(category)?
		.ok_or_else(|| MadlibError::UnknownCategory(category.to_owned()))?;
	if count == 0 {
		return Err(MadlibError::EmptyCategory(category.to_owned()));
	}

	let mut redraws = 0;
	loop {
		let candidate = lexicon.candidate(category, rng.random_range(0..count))?;
		if !ledger.contains(candidate) {
			return Ok(candidate);
		}

		if options.max_redraws.is_some_and(|max| redraws >= max) {
			warn!("category {category:?} exhausted after {redraws} redraws");
			return Err(MadlibError::Exhausted { category: category.to_owned(), attempts: redraws });
		}
		redraws += 1;
	}
}

/// Fills every placeholder of `madlib` using `lexicon`, an explicit random
/// source and `options`, then capitalizes the result.
///
/// # Behavior
/// - Placeholders are resolved left to right, always re-scanning from the
///   start of the partially substituted text, so inserted values that contain
///   placeholders are expanded too.
/// - Only the text before the first `_` names the category: `[NAME_2]` draws
///   from `NAME`.
/// - No value is used twice within one call, whatever its category.
///
/// # Errors
/// - `UnknownCategory` / `EmptyCategory` when a placeholder cannot be resolved.
/// - `CandidateNotString` when the drawn candidate is not a string.
/// - `UnterminatedPlaceholder` when a `[` has no `]` after it.
/// - `Exhausted` when `options.max_redraws` is set and exceeded.
pub fn fill_in_madlib_with<L, R>(madlib: &str, lexicon: &L, options: &FillOptions, rng: &mut R) -> Result<String>
where
	L: Lexicon + ?Sized,
	R: Rng,
{
	let mut text = madlib.to_owned();
	let mut ledger = ReplacementLedger::new();

	while let Some(placeholder) = next_placeholder(&text)? {
		let replacement = draw_unused(lexicon, placeholder.category, &ledger, options, rng)?;
		debug!("[{}] -> {replacement:?}", placeholder.category);

		let range = placeholder.start..placeholder.end;
		ledger.record(replacement);
		text.replace_range(range, replacement);
	}

	Ok(capitalize_sentences(&text))
}

/// Fills `madlib` from `lexicon` with the thread-local random generator and
/// an unbounded redraw loop.
///
/// ```
/// use std::collections::HashMap;
/// use madlib_core::madlib::filler::fill_in_madlib;
///
/// let dictionary = HashMap::from([("NAME".to_owned(), vec!["Ted"])]);
/// assert_eq!(fill_in_madlib("hi [NAME]", &dictionary).unwrap(), "Hi Ted");
/// ```
pub fn fill_in_madlib<L: Lexicon + ?Sized>(madlib: &str, lexicon: &L) -> Result<String> {
	fill_in_madlib_with(madlib, lexicon, &FillOptions::default(), &mut rand::rng())
}

/// Dynamically typed entry point, for templates and dictionaries that come
/// from JSON.
///
/// # Errors
/// - `MadlibNotString` if `madlib` is not a JSON string.
/// - `DictionaryNotMapping` if `dictionary` is not a JSON object.
/// - Everything `fill_in_madlib_with` raises. Non-string candidates only fault
///   when they are drawn.
pub fn fill_in_madlib_json(madlib: &Value, dictionary: &Value, options: &FillOptions) -> Result<String> {
	let madlib = madlib.as_str().ok_or(MadlibError::MadlibNotString)?;
	let dictionary = dictionary.as_object().ok_or(MadlibError::DictionaryNotMapping)?;
	fill_in_madlib_with(madlib, dictionary, options, &mut rand::rng())
}
