//! Prefix-trie word-completion library.
//!
//! This crate provides a frequency-ranked auto-completion engine including:
//! - A per-character branching trie over inserted words
//! - Prefix membership tests and prefix lookup
//! - Suggestions ranked by how often each word was picked under a prefix
//! - Selection feedback that adapts future rankings
//! - Internal utilities for word-list I/O
//!
//! Only the high-level API is exposed publicly. Low-level components
//! are kept internal to ensure consistency and prevent misuse.

/// Core trie structure and completion logic.
///
/// This module exposes the high-level completion engine while keeping
/// the internal node representation private.
pub mod trie;

/// I/O utilities (word-list loading).
///
/// Not exposed
pub(crate) mod io;
