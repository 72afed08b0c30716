/// Characters that end a sentence.
const TERMINATORS: [char; 3] = ['.', '!', '?'];

/// Computes which characters of `chars` start a sentence.
///
/// - Index 0 is always marked.
/// - Index `i + 2` is marked when `chars[i]` (with `i >= 1`) is a terminator,
///   `chars[i + 1]` is exactly one space and `chars[i + 2]` exists.
///
/// A terminator at index 0 never triggers the lookahead, and a terminator
/// followed by two spaces only "marks" the second space.
fn sentence_starts(chars: &[char]) -> Vec<bool> {
	let mut marks = vec![false; chars.len()];
	if let Some(first) = marks.first_mut() {
		*first = true;
	}

	for i in 1..chars.len() {
		if TERMINATORS.contains(&chars[i])
			&& chars.get(i + 1) == Some(&' ')
			&& i + 2 < chars.len()
		{
			marks[i + 2] = true;
		}
	}

	marks
}

/// Rebuilds a string from `chars`, uppercasing every marked character.
///
/// Uppercasing may expand a character (`'ß'` → `"SS"`), which is why the
/// marks are computed on the original characters first.
fn apply_marks(chars: &[char], marks: &[bool]) -> String {
	let mut out = String::with_capacity(chars.len());
	for (c, upper) in chars.iter().zip(marks) {
		if *upper {
			out.extend(c.to_uppercase());
		} else {
			out.push(*c);
		}
	}
	out
}

/// Capitalizes the first character of `text` and the first character of
/// every sentence that follows a `.`, `!` or `?` and a single space.
///
/// Everything else is left untouched, so the function is idempotent.
///
/// ```
/// use madlib_core::madlib::capitalize::capitalize_sentences;
///
/// assert_eq!(capitalize_sentences("hello. nice to meet you!"), "Hello. Nice to meet you!");
/// assert_eq!(capitalize_sentences("tEST"), "TEST");
/// assert_eq!(capitalize_sentences("...hello. how are you?"), "...hello. How are you?");
/// ```
pub fn capitalize_sentences(text: &str) -> String {
	let chars: Vec<char> = text.chars().collect();
	let marks = sentence_starts(&chars);
	apply_marks(&chars, &marks)
}

/// Capitalizes a grid of word tokens as if its rows were one running text.
///
/// The rows are flattened (tokens separated by single spaces), capitalized
/// with the same rules as [`capitalize_sentences`] and split back along the
/// original token boundaries. The output always has the shape of the input.
///
/// Token boundaries are tracked by offset, so a token containing a space (or
/// an empty token) stays in its own cell.
///
/// ```
/// use madlib_core::madlib::capitalize::capitalize_sentence_grid;
///
/// let grid = vec![vec!["hello.", "how", "are"], vec!["you", "today?"], vec!["good!"]];
/// assert_eq!(
/// 	capitalize_sentence_grid(&grid),
/// 	vec![vec!["Hello.", "How", "are"], vec!["you", "today?"], vec!["Good!"]]
/// );
/// ```
pub fn capitalize_sentence_grid<R, S>(grid: &[R]) -> Vec<Vec<String>>
where
	R: AsRef<[S]>,
	S: AsRef<str>,
{
	let mut chars: Vec<char> = Vec::new();
	let mut spans: Vec<(usize, usize)> = Vec::new();

	for row in grid {
		for token in row.as_ref() {
			let start = chars.len();
			chars.extend(token.as_ref().chars());
			spans.push((start, chars.len()));
			chars.push(' ');
		}
	}
	// Exactly one trailing separator
	chars.pop();

	let marks = sentence_starts(&chars);
	let mut spans = spans.into_iter();

	grid.iter()
		.map(|row| {
			row.as_ref()
				.iter()
				.zip(spans.by_ref())
				.map(|(_, (start, end))| apply_marks(&chars[start..end], &marks[start..end]))
				.collect()
		})
		.collect()
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn empty_text_stays_empty() {
		assert_eq!(capitalize_sentences(""), "");
	}

	#[test]
	fn capitalizes_after_each_terminator() {
		assert_eq!(capitalize_sentences("a. b! c? d"), "A. B! C? D");
	}

	#[test]
	fn terminator_at_end_does_not_fault() {
		assert_eq!(capitalize_sentences("done."), "Done.");
		assert_eq!(capitalize_sentences("done. "), "Done. ");
		assert_eq!(capitalize_sentences("x!"), "X!");
	}

	#[test]
	fn two_spaces_do_not_capitalize() {
		assert_eq!(capitalize_sentences("one.  two"), "One.  two");
	}

	#[test]
	fn terminator_without_space_does_not_capitalize() {
		assert_eq!(capitalize_sentences("e.g.this"), "E.g.this");
	}

	#[test]
	fn leading_terminator_does_not_trigger_lookahead() {
		assert_eq!(capitalize_sentences(". hello"), ". hello");
		assert_eq!(capitalize_sentences("a. hello"), "A. Hello");
	}

	#[test]
	fn existing_capitals_are_kept() {
		assert_eq!(capitalize_sentences("hello World. BYE"), "Hello World. BYE");
	}

	#[test]
	fn expanding_uppercase_is_handled() {
		assert_eq!(capitalize_sentences("ß. ß"), "SS. SS");
		assert_eq!(capitalize_sentences("élan. été"), "Élan. Été");
	}

	#[test]
	fn grid_capitalizes_across_rows() {
		let grid = vec![vec!["hello", "how", "are"], vec!["you?", "good."]];
		assert_eq!(
			capitalize_sentence_grid(&grid),
			vec![vec!["Hello", "how", "are"], vec!["you?", "Good."]]
		);
	}

	#[test]
	fn grid_with_single_token_rows() {
		let grid = vec![vec!["test"], vec!["test"], vec!["test.", "test?", "test!"]];
		assert_eq!(
			capitalize_sentence_grid(&grid),
			vec![vec!["Test"], vec!["test"], vec!["test.", "Test?", "Test!"]]
		);
	}

	#[test]
	fn grid_preserves_shape_with_spaces_and_empty_tokens() {
		let grid = vec![vec!["one. two", ""], vec![], vec!["three", "four"]];
		let result = capitalize_sentence_grid(&grid);
		assert_eq!(result.len(), 3);
		assert_eq!(result[0], vec!["One. Two", ""]);
		assert!(result[1].is_empty());
		assert_eq!(result[2], vec!["three", "four"]);
	}

	#[test]
	fn empty_grid() {
		let grid: Vec<Vec<String>> = Vec::new();
		assert!(capitalize_sentence_grid(&grid).is_empty());
	}
}
