mod trie;

use std::fmt;

use crate::buffer::GrowableBuffer;
use crate::common::MAX_NUM_WORDS;
use crate::dictionary::store::WordStore;
use crate::errors::{LexisError, Result};
use crate::utils::FromU32;
use trie::Trie;

pub(crate) use trie::Trie as RawTrie;

/// Immutable prefix index over a set of words.
///
/// An index is built once from a fully materialized, sorted word set and is
/// never modified afterwards, so it can be shared freely between threads.
pub struct TrieIndex {
    trie: Trie,
    weights: Vec<i32>,
}

impl TrieIndex {
    /// Builds an index from a word store.
    pub(crate) fn from_store(store: &WordStore) -> Result<Self> {
        Self::from_sorted_entries(store.iter())
    }

    /// Builds an index from `(word, weight)` pairs sorted by word without
    /// duplicates.
    ///
    /// # Errors
    ///
    /// [`LexisError`] is returned when
    ///
    ///  - a word is empty or contains `'\0'`,
    ///  - the number of words exceeds [`MAX_NUM_WORDS`], or
    ///  - the trie cannot be constructed.
    pub fn from_sorted_entries<'a, I>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (&'a str, i32)>,
    {
        let entries = entries.into_iter();
        let mut records = GrowableBuffer::new();
        let mut weights = GrowableBuffer::new();
        records.ensure_capacity(entries.size_hint().0)?;
        weights.ensure_capacity(entries.size_hint().0)?;

        for (word, weight) in entries {
            if word.is_empty() {
                return Err(LexisError::invalid_argument(
                    "word",
                    "an empty word cannot be indexed",
                ));
            }
            if word.contains('\0') {
                return Err(LexisError::invalid_argument(
                    "word",
                    "a word containing '\\0' cannot be indexed",
                ));
            }
            if weights.len() >= MAX_NUM_WORDS {
                return Err(LexisError::capacity_overflow(
                    Some(weights.len() + 1),
                    MAX_NUM_WORDS,
                ));
            }
            let word_id = u32::try_from(weights.len())?;
            records.push((word, word_id))?;
            weights.push(weight)?;
        }

        Ok(Self {
            trie: Trie::from_records(&records[..])?,
            weights: weights.into_vec(),
        })
    }

    /// Gets the number of indexed words.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.weights.len()
    }

    /// Checks if the index has no words.
    ///
    /// Always false for indices built by a dictionary, since an empty
    /// dictionary publishes no index at all.
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    /// Gets the weight of `word` if it is indexed.
    #[inline(always)]
    pub fn get(&self, word: &str) -> Option<i32> {
        self.trie
            .exact_match(word)
            .map(|word_id| self.weights[usize::from_u32(word_id)])
    }

    /// Finds the longest indexed word that is a prefix of `text`.
    ///
    /// Returns the word and its weight.
    pub fn longest_prefix(&self, text: &str) -> Option<(String, i32)> {
        let chars: Vec<_> = text.chars().collect();
        self.common_prefix_iterator(&chars)
            .last()
            .map(|m| (chars[..m.end_char].iter().collect(), m.weight))
    }

    /// Iterates over indexed words that are prefixes of `input`, shortest
    /// first.
    #[inline(always)]
    pub fn common_prefix_iterator<'a>(
        &'a self,
        input: &'a [char],
    ) -> impl Iterator<Item = PrefixMatch> + 'a {
        self.trie.common_prefix_iterator(input).map(move |m| {
            PrefixMatch::new(m.end_char, self.weights[usize::from_u32(m.value)])
        })
    }
}

impl fmt::Debug for TrieIndex {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("TrieIndex")
            .field("len", &self.len())
            .finish_non_exhaustive()
    }
}

/// Result of a prefix search.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct PrefixMatch {
    /// Number of characters of the matched word.
    pub end_char: usize,

    /// Weight of the matched word.
    pub weight: i32,
}

impl PrefixMatch {
    #[inline(always)]
    pub(crate) const fn new(end_char: usize, weight: i32) -> Self {
        Self { end_char, weight }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build(entries: &[(&str, i32)]) -> TrieIndex {
        TrieIndex::from_sorted_entries(entries.iter().copied()).unwrap()
    }

    #[test]
    fn test_get() {
        let index = build(&[("京都", 7), ("東京", 3), ("東京都", -2)]);
        assert_eq!(index.len(), 3);
        assert_eq!(index.get("東京"), Some(3));
        assert_eq!(index.get("東京都"), Some(-2));
        assert_eq!(index.get("京"), None);
        assert_eq!(index.get(""), None);
    }

    #[test]
    fn test_longest_prefix() {
        let index = build(&[("京都", 7), ("東京", 3), ("東京都", -2)]);
        assert_eq!(
            index.longest_prefix("東京都庁"),
            Some(("東京都".to_string(), -2))
        );
        assert_eq!(index.longest_prefix("東京タワー"), Some(("東京".to_string(), 3)));
        assert_eq!(index.longest_prefix("大阪"), None);
        assert_eq!(index.longest_prefix(""), None);
    }

    #[test]
    fn test_common_prefix_iterator() {
        let index = build(&[("京都", 7), ("東京", 3), ("東京都", -2)]);
        let input: Vec<_> = "東京都".chars().collect();
        let mut it = index.common_prefix_iterator(&input);
        assert_eq!(it.next(), Some(PrefixMatch::new(2, 3)));
        assert_eq!(it.next(), Some(PrefixMatch::new(3, -2)));
        assert_eq!(it.next(), None);
    }

    #[test]
    fn test_empty_word() {
        let e = TrieIndex::from_sorted_entries([("", 1), ("a", 2)]).unwrap_err();
        assert!(matches!(e, LexisError::InvalidArgument(_)));
    }

    #[test]
    fn test_nul_in_word() {
        let e = TrieIndex::from_sorted_entries([("\0x", 1), ("a", 2)]).unwrap_err();
        assert!(matches!(e, LexisError::InvalidArgument(_)));
        let e = TrieIndex::from_sorted_entries([("a\0", 1)]).unwrap_err();
        assert!(matches!(e, LexisError::InvalidArgument(_)));
    }
}
