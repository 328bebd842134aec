//! Top-level module for the word-completion engine.
//!
//! This crate provides a prefix-trie completion system, including:
//! - The public completion engine (`PrefixTrie`)
//! - Internal node representation (`TrieNode`)
//! - Typed error values (`TrieError`)

/// Typed errors produced by the completion engine.
///
/// Covers the selection of unknown words and word-list I/O failures.
pub mod error;

/// Internal representation of a single trie node.
///
/// Tracks child edges and the per-prefix selection counters of a
/// completed word. This module is not exposed publicly.
mod node;

/// The completion engine itself.
///
/// Handles word insertion, membership tests, frequency-ranked
/// suggestion, selection feedback, merging and parallel bulk loading.
pub mod prefix_trie;
