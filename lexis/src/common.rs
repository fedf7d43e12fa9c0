//! Common constants.

/// Weight given to a word added without an explicit weight.
///
/// It stands for a user-added word with high confidence.
pub const DEFAULT_WEIGHT: i32 = 1000;

/// The maximum number of words that a single index can hold.
///
/// Word ids are stored as trie values, which are 31-bit integers.
pub const MAX_NUM_WORDS: usize = 0x7fff_ffff;
