//! Custom dictionaries.
//!
//! A [`CustomDictionary`] holds user vocabulary in two forms:
//!
//!  - a mutable store ordered by word, which receives every edit, and
//!  - an immutable trie index, which answers every query.
//!
//! The index is rebuilt only when [`CustomDictionary::rebuild()`] is called.
//! Rebuilding costs time superlinear in the vocabulary size, so edits should be
//! batched: perform a burst of [`add_word`](CustomDictionary::add_word) and
//! [`remove_word`](CustomDictionary::remove_word) calls, then rebuild once.
//! Until then, queries keep answering from the previous index.
//!
//! # Threads
//!
//! Edits and rebuilds need `&mut self`, so a dictionary has a single writer.
//! Any number of [`DictionaryReader`]s may query concurrently from other
//! threads. A rebuilt index is published with one atomic swap, so readers
//! observe either the old index or the new one, never a partial one.
mod index;
mod stopword;
mod store;

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use arc_swap::ArcSwapOption;

use crate::common::DEFAULT_WEIGHT;
use crate::errors::Result;
use store::WordStore;

pub use index::{PrefixMatch, TrieIndex};
pub use stopword::{StopWordDict, StopWordReader};
pub use store::Iter;

/// Dictionary of user-defined words and their weights.
pub struct CustomDictionary {
    store: WordStore,
    index: Arc<ArcSwapOption<TrieIndex>>,
    stale: bool,
}

impl CustomDictionary {
    /// Creates an empty dictionary.
    ///
    /// An empty store rebuilds to an absent index, so all queries return `None`.
    pub fn new() -> Self {
        Self {
            store: WordStore::new(),
            index: Arc::new(ArcSwapOption::empty()),
            stale: false,
        }
    }

    /// Creates a dictionary from a pre-populated mapping and builds its index.
    ///
    /// # Errors
    ///
    /// [`LexisError`](crate::errors::LexisError) is returned when the index
    /// cannot be built, e.g., when the mapping contains an empty word.
    pub fn from_map(map: BTreeMap<String, i32>) -> Result<Self> {
        let mut dict = Self::new();
        dict.store = WordStore::from_map(map);
        dict.rebuild()?;
        Ok(dict)
    }

    /// Creates a dictionary from `(word, weight)` pairs and builds its index.
    ///
    /// Later pairs overwrite earlier ones with the same word.
    ///
    /// # Errors
    ///
    /// See [`CustomDictionary::from_map()`].
    pub fn from_entries<I, S>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, i32)>,
        S: Into<String>,
    {
        Self::from_map(
            entries
                .into_iter()
                .map(|(word, weight)| (word.into(), weight))
                .collect(),
        )
    }

    /// Adds a word with [`DEFAULT_WEIGHT`], overwriting any existing weight.
    ///
    /// The index is not updated until [`CustomDictionary::rebuild()`].
    #[inline(always)]
    pub fn add_word<S>(&mut self, word: S)
    where
        S: Into<String>,
    {
        self.add_word_with_weight(word, DEFAULT_WEIGHT);
    }

    /// Adds a word with an explicit weight, overwriting any existing weight.
    ///
    /// The index is not updated until [`CustomDictionary::rebuild()`].
    pub fn add_word_with_weight<S>(&mut self, word: S, weight: i32)
    where
        S: Into<String>,
    {
        if self.store.insert(word.into(), weight) != Some(weight) {
            self.stale = true;
        }
    }

    /// Removes a word, returning its weight if it was in the store.
    ///
    /// Removing a missing word does nothing. The index is not updated until
    /// [`CustomDictionary::rebuild()`].
    pub fn remove_word(&mut self, word: &str) -> Option<i32> {
        let removed = self.store.remove(word);
        if removed.is_some() {
            self.stale = true;
        }
        removed
    }

    /// Rebuilds the index from the current contents of the store.
    ///
    /// If the store is empty, the index becomes absent. Otherwise a new index
    /// is built and then published in a single atomic swap.
    ///
    /// # Errors
    ///
    /// [`LexisError`](crate::errors::LexisError) is returned when the index
    /// cannot be built: a word is empty or contains `'\0'`, the number of
    /// words exceeds [`MAX_NUM_WORDS`](crate::common::MAX_NUM_WORDS), or the
    /// trie construction fails. The previously published index stays in place.
    pub fn rebuild(&mut self) -> Result<()> {
        if self.store.is_empty() {
            self.index.store(None);
            self.stale = false;
            tracing::debug!("store is empty; published an absent index");
            return Ok(());
        }
        let index = match TrieIndex::from_store(&self.store) {
            Ok(index) => index,
            Err(e) => {
                tracing::warn!(
                    num_words = self.store.len(),
                    error = %e,
                    "failed to rebuild the index; keeping the previous one"
                );
                return Err(e);
            }
        };
        tracing::debug!(num_words = index.len(), "published a rebuilt index");
        self.index.store(Some(Arc::new(index)));
        self.stale = false;
        Ok(())
    }

    /// Gets the weight of `word` from the published index.
    ///
    /// Edits made after the last rebuild are not visible here.
    #[inline(always)]
    pub fn query(&self, word: &str) -> Option<i32> {
        let index = self.index.load();
        Option::as_ref(&*index).and_then(|index| index.get(word))
    }

    /// Finds the longest word in the published index that prefixes `text`.
    pub fn longest_prefix(&self, text: &str) -> Option<(String, i32)> {
        let index = self.index.load();
        Option::as_ref(&*index).and_then(|index| index.longest_prefix(text))
    }

    /// Pins the published index, or returns `None` if it is absent.
    #[inline(always)]
    pub fn index(&self) -> Option<Arc<TrieIndex>> {
        self.index.load_full()
    }

    /// Creates a read handle that follows the published index.
    pub fn reader(&self) -> DictionaryReader {
        DictionaryReader {
            index: Arc::clone(&self.index),
        }
    }

    /// Checks if `word` is in the store, regardless of the index.
    #[inline(always)]
    pub fn contains_word(&self, word: &str) -> bool {
        self.store.get(word).is_some()
    }

    /// Gets the weight of `word` from the store, regardless of the index.
    #[inline(always)]
    pub fn word_weight(&self, word: &str) -> Option<i32> {
        self.store.get(word)
    }

    /// Iterates over stored `(word, weight)` pairs in lexicographic order.
    #[inline(always)]
    pub fn words(&self) -> Iter<'_> {
        self.store.iter()
    }

    /// Gets the number of words in the store.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.store.len()
    }

    /// Checks if the store is empty.
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// Checks if the store has edits not yet reflected in the index.
    #[inline(always)]
    pub const fn is_stale(&self) -> bool {
        self.stale
    }
}

impl Default for CustomDictionary {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for CustomDictionary {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("CustomDictionary")
            .field("num_words", &self.store.len())
            .field("index", &self.index())
            .field("stale", &self.stale)
            .finish()
    }
}

/// Read handle of a [`CustomDictionary`].
///
/// A reader always queries the index most recently published by its
/// dictionary. It is cheap to clone and can be sent to other threads.
#[derive(Clone)]
pub struct DictionaryReader {
    index: Arc<ArcSwapOption<TrieIndex>>,
}

impl DictionaryReader {
    /// Gets the weight of `word` from the published index.
    #[inline(always)]
    pub fn query(&self, word: &str) -> Option<i32> {
        let index = self.index.load();
        Option::as_ref(&*index).and_then(|index| index.get(word))
    }

    /// Finds the longest word in the published index that prefixes `text`.
    pub fn longest_prefix(&self, text: &str) -> Option<(String, i32)> {
        let index = self.index.load();
        Option::as_ref(&*index).and_then(|index| index.longest_prefix(text))
    }

    /// Pins the published index, or returns `None` if it is absent.
    ///
    /// Use this to run many lookups against one consistent snapshot.
    #[inline(always)]
    pub fn snapshot(&self) -> Option<Arc<TrieIndex>> {
        self.index.load_full()
    }
}

impl fmt::Debug for DictionaryReader {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("DictionaryReader")
            .field("index", &self.snapshot())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::errors::LexisError;

    #[test]
    fn test_new_is_empty() {
        let dict = CustomDictionary::new();
        assert!(dict.is_empty());
        assert!(dict.index().is_none());
        assert_eq!(dict.query("言語"), None);
        assert!(!dict.is_stale());
    }

    #[test]
    fn test_from_entries_is_query_consistent() {
        let dict = CustomDictionary::from_entries([("自然", 10), ("言語", 20)]).unwrap();
        assert_eq!(dict.query("自然"), Some(10));
        assert_eq!(dict.query("言語"), Some(20));
        assert!(!dict.is_stale());
    }

    #[test]
    fn test_add_word_default_weight() {
        let mut dict = CustomDictionary::new();
        dict.add_word("言語処理");
        dict.rebuild().unwrap();
        assert_eq!(dict.query("言語処理"), Some(DEFAULT_WEIGHT));
    }

    #[test]
    fn test_stale_flag() {
        let mut dict = CustomDictionary::new();
        dict.add_word("a");
        assert!(dict.is_stale());
        dict.rebuild().unwrap();
        assert!(!dict.is_stale());
        dict.add_word("a");
        assert!(!dict.is_stale());
        dict.remove_word("missing");
        assert!(!dict.is_stale());
        dict.remove_word("a");
        assert!(dict.is_stale());
    }

    #[test]
    fn test_rebuild_to_empty() {
        let mut dict = CustomDictionary::from_entries([("a", 1)]).unwrap();
        dict.remove_word("a");
        assert_eq!(dict.query("a"), Some(1));
        dict.rebuild().unwrap();
        assert!(dict.index().is_none());
        assert_eq!(dict.query("a"), None);
    }

    #[test]
    fn test_failed_rebuild_keeps_previous_index() {
        let mut dict = CustomDictionary::from_entries([("a", 1)]).unwrap();
        dict.add_word("b");
        dict.add_word("");
        let e = dict.rebuild().unwrap_err();
        assert!(matches!(e, LexisError::InvalidArgument(_)));
        assert_eq!(dict.query("a"), Some(1));
        assert_eq!(dict.query("b"), None);
        assert!(dict.is_stale());

        dict.remove_word("");
        dict.rebuild().unwrap();
        assert_eq!(dict.query("b"), Some(DEFAULT_WEIGHT));
    }

    #[test]
    fn test_rebuild_rejects_nul_char() {
        let mut dict = CustomDictionary::from_entries([("a", 1)]).unwrap();
        dict.add_word("\0x");
        let e = dict.rebuild().unwrap_err();
        assert!(matches!(e, LexisError::InvalidArgument(_)));
        assert_eq!(dict.query("a"), Some(1));

        dict.remove_word("\0x");
        dict.rebuild().unwrap();
        assert!(!dict.is_stale());
    }

    #[test]
    fn test_from_map_with_empty_word() {
        let mut map = BTreeMap::new();
        map.insert(String::new(), 1);
        assert!(CustomDictionary::from_map(map).is_err());
    }

    #[test]
    fn test_longest_prefix() {
        let dict = CustomDictionary::from_entries([("東京", 3), ("東京都", 5)]).unwrap();
        assert_eq!(
            dict.longest_prefix("東京都庁"),
            Some(("東京都".to_string(), 5))
        );
        assert_eq!(dict.longest_prefix("京都"), None);
    }

    #[test]
    fn test_reader_follows_rebuild() {
        let mut dict = CustomDictionary::new();
        let reader = dict.reader();
        assert_eq!(reader.query("x"), None);
        dict.add_word_with_weight("x", 42);
        assert_eq!(reader.query("x"), None);
        dict.rebuild().unwrap();
        assert_eq!(reader.query("x"), Some(42));
        assert_eq!(reader.longest_prefix("xyz"), Some(("x".to_string(), 42)));
    }

    #[test]
    fn test_snapshot_is_pinned() {
        let mut dict = CustomDictionary::from_entries([("x", 1)]).unwrap();
        let snapshot = dict.reader().snapshot().unwrap();
        dict.add_word_with_weight("x", 2);
        dict.rebuild().unwrap();
        assert_eq!(snapshot.get("x"), Some(1));
        assert_eq!(dict.query("x"), Some(2));
    }

    #[test]
    fn test_words() {
        let mut dict = CustomDictionary::new();
        dict.add_word_with_weight("b", 2);
        dict.add_word_with_weight("a", 1);
        let words: Vec<_> = dict.words().collect();
        assert_eq!(words, [("a", 1), ("b", 2)]);
        assert!(dict.contains_word("a"));
        assert_eq!(dict.word_weight("b"), Some(2));
    }
}
