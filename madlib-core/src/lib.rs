//! Madlib generation library.
//!
//! This crate fills natural-language templates such as
//! `"I really admire [NAME]. [NAME_2] is [ADJECTIVE]!"` with random words
//! taken from category word lists, and normalizes sentence capitalization of
//! the result.
//!
//! It provides:
//! - Sentence capitalization (flat text and token grids)
//! - Placeholder filling with a no-repeat constraint
//! - A persistent word dictionary and a template generator
//! - Internal utilities for I/O and path handling

/// Madlib engine: capitalization, filling, dictionaries and generation.
pub mod madlib;

/// Error type shared by the whole crate.
pub mod error;

/// I/O utilities (file loading, path helpers).
///
/// Not exposed
pub(crate) mod io;
