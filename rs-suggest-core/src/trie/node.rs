use std::collections::HashMap;

/// Represents one character position in the trie.
///
/// A `TrieNode` is reached by spelling out a unique prefix, one child
/// edge per character, starting from the root (which represents the
/// empty string).
///
/// ## Responsibilities:
/// - Own the child edges leading to longer prefixes
/// - Mark a node as the end of a complete word
/// - Accumulate per-prefix selection counters for that word
/// - Merge with the node for the same prefix in another trie
///
/// ## Invariants
/// - `terminal` is `Some` iff the prefix spelling this node is a
///   complete inserted word
/// - Every counter key is a string prefix of that word
/// - Every counter value is >= 1
#[derive(Clone, Debug, Default)]
pub(super) struct TrieNode {
	/// Child nodes indexed by the next character.
	pub(super) children: HashMap<char, TrieNode>,
	/// Present iff a complete word ends at this node. Maps each query
	/// prefix that led to this word to its selection count.
	/// Example: { "ca" => 3, "car" => 1 }
	terminal: Option<HashMap<String, u64>>,
}

impl TrieNode {
	/// Marks this node as the end of a complete word.
	///
	/// If the marker already exists, its learned counters are preserved,
	/// so re-inserting a word never resets its ranking.
	pub(super) fn mark_terminal(&mut self) {
		self.terminal.get_or_insert_with(HashMap::new);
	}

	/// Returns whether a complete word ends at this node.
	pub(super) fn is_terminal(&self) -> bool {
		self.terminal.is_some()
	}

	/// Returns this word's selection count under `prefix`, creating the
	/// counter at the baseline of 1 on first use.
	///
	/// Returns `None` if no word ends at this node.
	///
	/// The lazy creation is persistent: once a prefix has been used to
	/// query this word, a later selection always has a counter to bump.
	pub(super) fn count_under(&mut self, prefix: &str) -> Option<u64> {
		let counters = self.terminal.as_mut()?;
		Some(*counters.entry(prefix.to_owned()).or_insert(1))
	}

	/// Records one selection of this word under `prefix`.
	///
	/// - If the counter already exists, it is increased by 1.
	/// - Otherwise it is created at the baseline of 1 and then increased,
	///   landing at 2 on a first selection.
	///
	/// Returns `false` if no word ends at this node.
	pub(super) fn record_selection(&mut self, prefix: &str) -> bool {
		match self.terminal.as_mut() {
			Some(counters) => {
				*counters.entry(prefix.to_owned()).or_insert(1) += 1;
				true
			}
			None => false,
		}
	}

	/// Merges another subtree into this one.
	///
	/// Both nodes must represent the same prefix in their respective
	/// tries. Selection counters are summed key-wise; children missing
	/// on this side are cloned wholesale, children present on both sides
	/// are merged in turn.
	///
	/// Uses an explicit work stack, so the call stack stays flat even
	/// when the other trie holds one very long word.
	pub(super) fn merge(&mut self, other: &Self) {
		let mut stack: Vec<(&mut TrieNode, &TrieNode)> = vec![(self, other)];
		while let Some((dst, src)) = stack.pop() {
			if let Some(src_counters) = &src.terminal {
				let counters = dst.terminal.get_or_insert_with(HashMap::new);
				for (prefix, occurrence) in src_counters {
					*counters.entry(prefix.clone()).or_insert(0) += occurrence;
				}
			}

			let mut shared = Vec::new();
			for (ch, src_child) in &src.children {
				if dst.children.contains_key(ch) {
					shared.push(*ch);
				} else {
					dst.children.insert(*ch, src_child.clone());
				}
			}
			for (ch, dst_child) in dst.children.iter_mut() {
				if shared.contains(ch) {
					if let Some(src_child) = src.children.get(ch) {
						stack.push((dst_child, src_child));
					}
				}
			}
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn remarking_a_terminal_preserves_counters() {
		let mut node = TrieNode::default();
		node.mark_terminal();
		assert!(node.record_selection("ca"));
		node.mark_terminal();
		// Counter was created at 1 and bumped to 2, and must survive
		// the second mark.
		assert_eq!(node.count_under("ca"), Some(2));
	}

	#[test]
	fn counting_on_a_path_node_yields_none() {
		let mut node = TrieNode::default();
		assert_eq!(node.count_under("ca"), None);
		assert!(!node.record_selection("ca"));
	}

	#[test]
	fn merge_sums_counters_and_unions_children() {
		let mut left = TrieNode::default();
		left.mark_terminal();
		left.record_selection("a");
		left.children.insert('x', TrieNode::default());

		let mut right = TrieNode::default();
		right.mark_terminal();
		right.record_selection("a");
		right.record_selection("b");
		let mut right_child = TrieNode::default();
		right_child.mark_terminal();
		right.children.insert('y', right_child);

		left.merge(&right);
		assert_eq!(left.count_under("a"), Some(4));
		assert_eq!(left.count_under("b"), Some(2));
		assert!(left.children.contains_key(&'x'));
		assert!(left.children[&'y'].is_terminal());
	}
}
