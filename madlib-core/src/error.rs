use thiserror::Error;

/// Broad classification of a `MadlibError`.
///
/// Callers (the HTTP server for instance) use it to decide how to surface a
/// failure without matching every variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaultKind {
	/// A caller-supplied value has the wrong shape.
	Type,
	/// A placeholder or template name could not be resolved.
	Lookup,
	/// The template markup is malformed.
	Syntax,
	/// A bounded redraw loop gave up.
	Liveness,
	/// Reading or decoding persisted data failed.
	Storage,
}

/// Errors raised while filling madlibs or loading their data.
///
/// Every fault aborts the whole operation: no partially substituted text is
/// ever returned.
#[derive(Debug, Error)]
pub enum MadlibError {
	#[error("madlib must be a string")]
	MadlibNotString,

	#[error("dictionary must be a mapping")]
	DictionaryNotMapping,

	/// A drawn candidate (or the collection holding it) is not a string.
	#[error("category values must be strings (category {0:?})")]
	CandidateNotString(String),

	#[error("unknown category {0:?}")]
	UnknownCategory(String),

	/// The category exists but holds no candidate at all.
	#[error("category {0:?} has no candidates")]
	EmptyCategory(String),

	/// A `[` with no `]` after it, at the given byte offset.
	#[error("unterminated placeholder at byte {0}")]
	UnterminatedPlaceholder(usize),

	#[error("category {category:?} exhausted after {attempts} redraws")]
	Exhausted { category: String, attempts: usize },

	#[error("unknown template {0:?}")]
	UnknownTemplate(String),

	#[error("no templates loaded")]
	NoTemplates,

	#[error("I/O error: {0}")]
	Io(#[from] std::io::Error),

	#[error("invalid dictionary cache: {0}")]
	Decode(#[from] postcard::Error),

	#[error("{0}")]
	InvalidPath(String),
}

impl MadlibError {
	/// Returns the fault class of this error.
	pub fn kind(&self) -> FaultKind {
		match self {
			MadlibError::MadlibNotString
			| MadlibError::DictionaryNotMapping
			| MadlibError::CandidateNotString(_) => FaultKind::Type,
			MadlibError::UnknownCategory(_)
			| MadlibError::EmptyCategory(_)
			| MadlibError::UnknownTemplate(_)
			| MadlibError::NoTemplates => FaultKind::Lookup,
			MadlibError::UnterminatedPlaceholder(_) => FaultKind::Syntax,
			MadlibError::Exhausted { .. } => FaultKind::Liveness,
			MadlibError::Io(_) | MadlibError::Decode(_) | MadlibError::InvalidPath(_) => FaultKind::Storage,
		}
	}
}

/// Result type alias for madlib operations.
pub type Result<T> = std::result::Result<T, MadlibError>;

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn type_faults_are_classified_as_type() {
		assert_eq!(MadlibError::MadlibNotString.kind(), FaultKind::Type);
		assert_eq!(MadlibError::DictionaryNotMapping.kind(), FaultKind::Type);
		assert_eq!(MadlibError::CandidateNotString("A".into()).kind(), FaultKind::Type);
	}

	#[test]
	fn lookup_faults_are_classified_as_lookup() {
		assert_eq!(MadlibError::UnknownCategory("X".into()).kind(), FaultKind::Lookup);
		assert_eq!(MadlibError::EmptyCategory("X".into()).kind(), FaultKind::Lookup);
		assert_eq!(MadlibError::NoTemplates.kind(), FaultKind::Lookup);
	}

	#[test]
	fn exhaustion_is_a_liveness_fault() {
		let err = MadlibError::Exhausted { category: "A".into(), attempts: 3 };
		assert_eq!(err.kind(), FaultKind::Liveness);
		assert_eq!(err.to_string(), "category \"A\" exhausted after 3 redraws");
	}

	#[test]
	fn messages_match_fault_descriptions() {
		assert_eq!(MadlibError::MadlibNotString.to_string(), "madlib must be a string");
		assert_eq!(MadlibError::DictionaryNotMapping.to_string(), "dictionary must be a mapping");
		assert!(MadlibError::CandidateNotString("A".into())
			.to_string()
			.starts_with("category values must be strings"));
	}
}
