use std::path::Path;
use std::sync::mpsc;
use std::thread;

use log::debug;

use super::error::TrieError;
use super::node::TrieNode;
use crate::io::read_file;

/// A prefix trie that ranks completions by selection frequency.
///
/// The trie stores a vocabulary of words and, for every completed word,
/// one selection counter per query prefix that led to it. Suggestions
/// for a prefix are ordered by those counters, so the engine adapts to
/// what the user actually picks.
///
/// # Responsibilities
/// - Insert words, creating path nodes lazily (nodes are never removed)
/// - Answer exact membership queries
/// - Enumerate and rank every completion of a prefix
/// - Record selections and feed them back into future rankings
/// - Merge tries built independently (parallel bulk loading)
///
/// # Invariants
/// - The path from the root to any node spells exactly one prefix, and
///   the node is terminal iff that prefix is a complete inserted word
/// - `word_count` counts insert calls, not distinct words, and never
///   decreases
///
/// # Notes
/// - [`PrefixTrie::suggest`] is a **write** operation: it materializes
///   missing counters at the baseline of 1. This is why it takes
///   `&mut self`, and why callers sharing a trie across threads must
///   treat it like `insert` and `select`, not like `contains`.
#[derive(Clone, Debug, Default)]
pub struct PrefixTrie {
	/// Root node, representing the empty string.
	root: TrieNode,
	/// Number of insert calls (duplicate insertions counted again).
	word_count: usize,
}

impl PrefixTrie {
	/// Creates an empty trie.
	pub fn new() -> Self {
		Self::default()
	}

	/// Inserts a batch of words, in the given order.
	///
	/// Each word bumps `word_count` by 1 and lazily creates the path of
	/// nodes spelling it; the final node is marked terminal. Re-inserting
	/// a word bumps the count again but preserves the learned selection
	/// counters.
	///
	/// Inserting the empty word is legal and marks the root terminal.
	pub fn insert<I, S>(&mut self, words: I)
	where
		I: IntoIterator<Item = S>,
		S: AsRef<str>,
	{
		for word in words {
			self.insert_word(word.as_ref());
		}
	}

	fn insert_word(&mut self, word: &str) {
		self.word_count += 1;
		let mut node = &mut self.root;
		for ch in word.chars() {
			node = node.children.entry(ch).or_default();
		}
		node.mark_terminal();
	}

	/// Returns whether `word` was inserted as a complete word.
	///
	/// A node that only exists as an internal path node of a longer word
	/// does not count: `contains("ca")` is false after inserting "cat".
	///
	/// Pure read, no side effects.
	pub fn contains(&self, word: &str) -> bool {
		let mut node = &self.root;
		for ch in word.chars() {
			match node.children.get(&ch) {
				Some(child) => node = child,
				None => return false,
			}
		}
		node.is_terminal()
	}

	/// Returns every stored word starting with `prefix`, best first.
	///
	/// Words are ordered by their selection count under this exact
	/// prefix, descending; ties are broken lexicographically ascending
	/// so the result is deterministic. A word equal to the prefix itself
	/// is included. An unknown prefix yields an empty list.
	///
	/// # Notes
	/// - This is a **write** operation: the first time a prefix is used
	///   to query a word, that word's counter under the prefix is
	///   created at the baseline of 1 and persisted, so a later
	///   [`PrefixTrie::select`] always has a counter to bump.
	/// - The subtree walk uses an explicit stack; one very long word
	///   cannot overflow the call stack.
	pub fn suggest(&mut self, prefix: &str) -> Vec<String> {
		let mut node = &mut self.root;
		for ch in prefix.chars() {
			match node.children.get_mut(&ch) {
				Some(child) => node = child,
				None => return Vec::new(),
			}
		}

		let mut ranked: Vec<(String, u64)> = Vec::new();
		let mut stack: Vec<(String, &mut TrieNode)> = vec![(prefix.to_owned(), node)];
		while let Some((word, node)) = stack.pop() {
			if let Some(count) = node.count_under(prefix) {
				ranked.push((word.clone(), count));
			}
			for (ch, child) in node.children.iter_mut() {
				let mut next = word.clone();
				next.push(*ch);
				stack.push((next, child));
			}
		}

		ranked.sort_by(|(word_a, count_a), (word_b, count_b)| {
			count_b.cmp(count_a).then_with(|| word_a.cmp(word_b))
		});
		ranked.into_iter().map(|(word, _)| word).collect()
	}

	/// Records that the user picked `word` after typing `prefix`.
	///
	/// The word's counter under `prefix` is increased by 1, created at
	/// the baseline of 1 first if the pair was never suggested (a first
	/// selection therefore lands at 2). Future `suggest(prefix)` calls
	/// rank the word accordingly.
	///
	/// # Errors
	/// Returns [`TrieError::WordNotFound`] if `word` was never inserted;
	/// the trie is left unmutated in that case.
	pub fn select(&mut self, prefix: &str, word: &str) -> Result<(), TrieError> {
		if !self.contains(word) {
			return Err(TrieError::WordNotFound(word.to_owned()));
		}

		let mut node = &mut self.root;
		for ch in word.chars() {
			node = node
				.children
				.get_mut(&ch)
				.ok_or_else(|| TrieError::WordNotFound(word.to_owned()))?;
		}
		if !node.record_selection(prefix) {
			return Err(TrieError::WordNotFound(word.to_owned()));
		}
		Ok(())
	}

	/// Returns the total number of insert calls.
	///
	/// Duplicate insertions of the same word are counted again.
	pub fn word_count(&self) -> usize {
		self.word_count
	}

	/// Merges another trie into this one.
	///
	/// Selection counters are summed key-wise, subtrees are unioned and
	/// `word_count`s are added. Intended for combining partial tries
	/// built independently, e.g. one per worker thread during bulk
	/// loading.
	pub fn merge(&mut self, other: &Self) {
		self.root.merge(&other.root);
		self.word_count += other.word_count;
	}

	/// Builds a trie from a newline-delimited word-list file.
	///
	/// # Behavior
	/// - Reads the whole file and strips line endings; blank lines are
	///   skipped.
	/// - Splits the words into chunks (based on CPU cores * factor).
	/// - Spawns threads to build a partial trie for each chunk.
	/// - Merges all partial tries sequentially.
	///
	/// # Errors
	/// Returns [`TrieError::Io`] if the file cannot be read.
	///
	/// # Notes
	/// - Uses MPSC channels to collect tries from threads.
	/// - Every thread owns its own partial trie; the merged trie is
	///   never touched concurrently.
	pub fn from_word_file<P: AsRef<Path>>(filepath: P) -> Result<Self, TrieError> {
		let words: Vec<String> = read_file(&filepath)?
			.into_iter()
			.filter(|line| !line.is_empty())
			.collect();

		if words.is_empty() {
			return Ok(Self::new());
		}

		let cpus = num_cpus::get();
		let factor = 8;
		let chunks = cpus * factor;
		let chunk_size = (words.len() + chunks - 1) / chunks;

		let (tx, rx) = mpsc::channel();
		for chunk in words.chunks(chunk_size) {
			let tx = tx.clone();
			let chunk: Vec<String> = chunk.to_vec();

			thread::spawn(move || {
				let mut partial = PrefixTrie::new();
				partial.insert(&chunk);
				tx.send(partial).expect("Failed to send from thread");
			});
		}
		drop(tx);

		let mut trie = PrefixTrie::new();
		for partial in rx.iter() {
			trie.merge(&partial);
		}

		debug!(
			"loaded {} words from {}",
			trie.word_count,
			filepath.as_ref().display()
		);
		Ok(trie)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn sample() -> PrefixTrie {
		let mut trie = PrefixTrie::new();
		trie.insert(["cat", "car", "cart"]);
		trie
	}

	#[test]
	fn inserted_words_are_contained() {
		let trie = sample();
		assert_eq!(trie.word_count(), 3);
		assert!(trie.contains("car"));
		assert!(trie.contains("cart"));
		// Internal path node, not a word.
		assert!(!trie.contains("ca"));
		assert!(!trie.contains("dog"));
	}

	#[test]
	fn unmatched_prefix_suggests_nothing() {
		let mut trie = sample();
		assert!(trie.suggest("xy").is_empty());
		assert!(trie.suggest("cartoon").is_empty());
	}

	#[test]
	fn equal_counts_rank_lexicographically() {
		let mut trie = sample();
		assert_eq!(trie.suggest("ca"), vec!["car", "cart", "cat"]);
	}

	#[test]
	fn suggestions_are_limited_to_the_prefix() {
		let mut trie = sample();
		trie.insert(["dog"]);
		let suggestions = trie.suggest("ca");
		assert_eq!(suggestions.len(), 3);
		assert!(suggestions.iter().all(|word| word.starts_with("ca")));
	}

	#[test]
	fn a_word_equal_to_the_prefix_is_suggested() {
		let mut trie = sample();
		assert_eq!(trie.suggest("car"), vec!["car", "cart"]);
	}

	#[test]
	fn selections_rerank_suggestions() {
		let mut trie = sample();
		trie.select("ca", "car").unwrap();
		trie.select("ca", "car").unwrap();
		trie.select("ca", "cat").unwrap();
		// Counts under "ca": car 3, cat 2, cart 1 (baseline).
		assert_eq!(trie.suggest("ca"), vec!["car", "cat", "cart"]);
	}

	#[test]
	fn a_first_selection_beats_the_baseline() {
		let mut trie = PrefixTrie::new();
		trie.insert(["car", "cat"]);
		// "cat" sorts after "car", so only its count can rank it first.
		trie.select("c", "cat").unwrap();
		assert_eq!(trie.suggest("c"), vec!["cat", "car"]);
	}

	#[test]
	fn suggest_materializes_counters_for_later_selections() {
		let mut trie = sample();
		assert_eq!(trie.suggest("ca"), vec!["car", "cart", "cat"]);
		trie.select("ca", "cart").unwrap();
		// cart moved from the baseline of 1 to 2.
		assert_eq!(trie.suggest("ca"), vec!["cart", "car", "cat"]);
	}

	#[test]
	fn counters_are_kept_per_prefix() {
		let mut trie = sample();
		trie.select("ca", "cat").unwrap();
		assert_eq!(trie.suggest("ca"), vec!["cat", "car", "cart"]);
		// The "car" prefix never saw that selection.
		assert_eq!(trie.suggest("car"), vec!["car", "cart"]);
	}

	#[test]
	fn selecting_under_a_never_queried_prefix_succeeds() {
		let mut trie = sample();
		// "xy" is not a path in the trie, but "car" exists: the counter
		// is created on the word's terminal node, keyed by "xy".
		trie.select("xy", "car").unwrap();
		// Unrelated prefixes are unaffected.
		assert_eq!(trie.suggest("ca"), vec!["car", "cart", "cat"]);
	}

	#[test]
	fn selecting_an_unknown_word_fails_without_mutation() {
		let mut trie = sample();
		let before = trie.suggest("ca");
		let err = trie.select("ca", "dog").unwrap_err();
		assert!(matches!(err, TrieError::WordNotFound(word) if word == "dog"));
		assert!(!trie.contains("dog"));
		assert_eq!(trie.suggest("ca"), before);
	}

	#[test]
	fn reinserting_a_word_preserves_its_counters() {
		let mut trie = PrefixTrie::new();
		trie.insert(["car", "cab"]);
		trie.select("ca", "car").unwrap();
		trie.insert(["car"]);
		assert_eq!(trie.word_count(), 3);
		// A reset counter would rank "cab" first on the lexicographic
		// tie-break.
		assert_eq!(trie.suggest("ca"), vec!["car", "cab"]);
	}

	#[test]
	fn the_empty_word_is_a_word() {
		let mut trie = PrefixTrie::new();
		assert!(!trie.contains(""));
		trie.insert(["", "a"]);
		assert!(trie.contains(""));
		assert_eq!(trie.suggest(""), vec!["", "a"]);
	}

	#[test]
	fn merge_combines_words_and_counters() {
		let mut left = PrefixTrie::new();
		left.insert(["cat"]);
		left.select("ca", "cat").unwrap();

		let mut right = PrefixTrie::new();
		right.insert(["cat", "car"]);
		right.suggest("ca");

		left.merge(&right);
		assert_eq!(left.word_count(), 3);
		assert!(left.contains("car"));
		// cat: 2 (left) + 1 (right baseline) = 3; car: 1.
		assert_eq!(left.suggest("ca"), vec!["cat", "car"]);
	}

	#[test]
	fn word_files_load_in_parallel() {
		let path = std::env::temp_dir().join("rs_suggest_word_file_test.txt");
		std::fs::write(&path, "cat\ncar\n\ncart\n").unwrap();
		let loaded = PrefixTrie::from_word_file(&path);
		std::fs::remove_file(&path).unwrap();

		let mut trie = loaded.unwrap();
		assert_eq!(trie.word_count(), 3);
		assert!(trie.contains("cart"));
		assert_eq!(trie.suggest("ca"), vec!["car", "cart", "cat"]);
	}

	#[test]
	fn missing_word_files_report_io_errors() {
		let path = std::env::temp_dir().join("rs_suggest_no_such_file.txt");
		let err = PrefixTrie::from_word_file(&path).unwrap_err();
		assert!(matches!(err, TrieError::Io(_)));
	}
}
