//! Top-level module for the madlib engine.
//!
//! This module provides:
//! - Sentence capitalization for flat texts and token grids (`capitalize`)
//! - Placeholder substitution with a per-call no-repeat ledger (`filler`)
//! - The dictionary abstraction used by the filler (`lexicon`)
//! - A persistent word dictionary (`dictionary`)
//! - A high-level generator over a data folder (`generator`)

/// Sentence-boundary capitalization.
///
/// Capitalizes the first character of a text and the first character
/// following `.`, `!` or `?` and a single space. Also works on token grids.
pub mod capitalize;

/// Placeholder filling.
///
/// Replaces `[CATEGORY]` / `[CATEGORY_SUFFIX]` placeholders with random,
/// never repeated words, then capitalizes the result.
pub mod filler;

/// Dictionary abstraction (`Lexicon`) and its implementations for maps and
/// JSON objects.
pub mod lexicon;

/// Category word lists with folder loading and binary caching.
pub mod dictionary;

/// Template library and random generation.
pub mod generator;
