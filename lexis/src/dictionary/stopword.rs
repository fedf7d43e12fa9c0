use std::fmt;
use std::sync::Arc;

use arc_swap::ArcSwapOption;
use hashbrown::HashSet;

use super::index::RawTrie;
use crate::errors::{LexisError, Result};

const DEFAULT_STOP_WORDS: &[&str] = &[
    "a", "an", "and", "are", "as", "at", "be", "but", "by", "for", "if", "in", "into", "is", "it",
    "no", "not", "of", "on", "or", "such", "that", "the", "their", "then", "there", "these",
    "they", "this", "to", "was", "will", "with", "的", "了", "和", "是", "就", "都", "而", "及",
    "与", "着", "或", "一个", "没有", "我们", "你们", "他们",
];

/// Dictionary of stop words.
///
/// Stop words can be added and removed at any time, but lookups only see them
/// after [`StopWordDict::commit()`].
pub struct StopWordDict {
    words: HashSet<String>,
    trie: Arc<ArcSwapOption<RawTrie>>,
}

impl StopWordDict {
    /// Creates a dictionary from the given words and commits it.
    ///
    /// # Errors
    ///
    /// [`LexisError`](crate::errors::LexisError) is returned when the words
    /// contain an empty string.
    pub fn new<I, S>(words: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut dict = Self {
            words: words.into_iter().map(Into::into).collect(),
            trie: Arc::new(ArcSwapOption::empty()),
        };
        dict.commit()?;
        Ok(dict)
    }

    /// Creates a dictionary with a built-in list of common English and
    /// Chinese function words.
    ///
    /// # Errors
    ///
    /// See [`StopWordDict::new()`].
    pub fn with_default_words() -> Result<Self> {
        Self::new(DEFAULT_STOP_WORDS.iter().copied())
    }

    /// Adds a stop word. Not visible to lookups until committed.
    pub fn add<S>(&mut self, word: S)
    where
        S: Into<String>,
    {
        self.words.insert(word.into());
    }

    /// Removes a stop word. Not visible to lookups until committed.
    pub fn remove(&mut self, word: &str) {
        self.words.remove(word);
    }

    /// Publishes the current stop words to lookups.
    ///
    /// # Errors
    ///
    /// [`LexisError`](crate::errors::LexisError) is returned when the trie
    /// cannot be built. The previous stop words stay in effect.
    pub fn commit(&mut self) -> Result<()> {
        if self.words.is_empty() {
            self.trie.store(None);
            tracing::debug!("no stop words; published an empty set");
            return Ok(());
        }
        let mut records: Vec<_> = self.words.iter().map(|w| (w.as_str(), 0)).collect();
        records.sort_unstable();
        if records[0].0.is_empty() {
            return Err(LexisError::invalid_argument(
                "word",
                "an empty stop word cannot be committed",
            ));
        }
        if records.iter().any(|(w, _)| w.contains('\0')) {
            return Err(LexisError::invalid_argument(
                "word",
                "a stop word containing '\\0' cannot be committed",
            ));
        }
        let trie = RawTrie::from_records(&records)?;
        self.trie.store(Some(Arc::new(trie)));
        tracing::debug!(num_words = records.len(), "committed stop words");
        Ok(())
    }

    /// Checks if `word` is a committed stop word.
    #[inline(always)]
    pub fn contains(&self, word: &str) -> bool {
        contains(&self.trie, word)
    }

    /// Gets the number of stop words, including uncommitted ones.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Checks if there are no stop words, including uncommitted ones.
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Creates a read handle that follows committed stop words.
    pub fn reader(&self) -> StopWordReader {
        StopWordReader {
            trie: Arc::clone(&self.trie),
        }
    }
}

impl fmt::Debug for StopWordDict {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("StopWordDict")
            .field("num_words", &self.words.len())
            .finish_non_exhaustive()
    }
}

/// Read handle of a [`StopWordDict`].
#[derive(Clone)]
pub struct StopWordReader {
    trie: Arc<ArcSwapOption<RawTrie>>,
}

impl StopWordReader {
    /// Checks if `word` is a committed stop word.
    #[inline(always)]
    pub fn contains(&self, word: &str) -> bool {
        contains(&self.trie, word)
    }
}

impl fmt::Debug for StopWordReader {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("StopWordReader").finish_non_exhaustive()
    }
}

#[inline(always)]
fn contains(trie: &ArcSwapOption<RawTrie>, word: &str) -> bool {
    let trie = trie.load();
    Option::as_ref(&*trie).map_or(false, |trie| trie.exact_match(word).is_some())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_words() {
        let dict = StopWordDict::with_default_words().unwrap();
        assert!(dict.contains("the"));
        assert!(dict.contains("的"));
        assert!(!dict.contains("dictionary"));
        assert_eq!(dict.len(), DEFAULT_STOP_WORDS.len());
    }

    #[test]
    fn test_commit() {
        let mut dict = StopWordDict::new(["foo"]).unwrap();
        let reader = dict.reader();
        dict.add("bar");
        dict.remove("foo");
        assert!(reader.contains("foo"));
        assert!(!reader.contains("bar"));
        dict.commit().unwrap();
        assert!(!reader.contains("foo"));
        assert!(reader.contains("bar"));
    }

    #[test]
    fn test_empty() {
        let mut dict = StopWordDict::new(["foo"]).unwrap();
        dict.remove("foo");
        dict.commit().unwrap();
        assert!(dict.is_empty());
        assert!(!dict.contains("foo"));
        assert!(!dict.contains(""));
    }

    #[test]
    fn test_empty_word() {
        let mut dict = StopWordDict::new(["foo"]).unwrap();
        dict.add("");
        assert!(dict.commit().is_err());
        assert!(dict.contains("foo"));
    }

    #[test]
    fn test_nul_char() {
        let mut dict = StopWordDict::new(["foo"]).unwrap();
        dict.add("a\0");
        let e = dict.commit().unwrap_err();
        assert!(matches!(e, LexisError::InvalidArgument(_)));
        assert!(dict.contains("foo"));
    }
}
