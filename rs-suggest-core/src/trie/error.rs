use thiserror::Error;

/// Errors produced by the completion engine.
///
/// The trie itself cannot reach an invalid state through its public
/// operations; the only failure modes are asking the engine to record a
/// selection for a word it never learned, and I/O errors while bulk
/// loading a word list.
#[derive(Debug, Error)]
pub enum TrieError {
	/// The selected word was never inserted. The trie is left untouched.
	#[error("word not in dictionary: {0}")]
	WordNotFound(String),

	/// Failure while reading a word-list file.
	#[error(transparent)]
	Io(#[from] std::io::Error),
}
