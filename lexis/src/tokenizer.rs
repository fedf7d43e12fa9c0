//! Term sources and the maximum-matching tokenizer.
use std::sync::Arc;

use crate::dictionary::{DictionaryReader, TrieIndex};
use crate::term::{Term, TermStream};

/// Capability of producing a term stream from input text.
///
/// Implemented by base tokenizers and by [`Analyzer`](crate::Analyzer), so
/// analyzers can be nested.
pub trait TermSource {
    /// Produces a lazy term stream from `text`.
    fn terms<'a>(&'a self, text: &'a str) -> TermStream<'a>;
}

impl<T> TermSource for &T
where
    T: TermSource + ?Sized,
{
    fn terms<'a>(&'a self, text: &'a str) -> TermStream<'a> {
        (**self).terms(text)
    }
}

impl<T> TermSource for Box<T>
where
    T: TermSource + ?Sized,
{
    fn terms<'a>(&'a self, text: &'a str) -> TermStream<'a> {
        (**self).terms(text)
    }
}

impl<T> TermSource for Arc<T>
where
    T: TermSource + ?Sized,
{
    fn terms<'a>(&'a self, text: &'a str) -> TermStream<'a> {
        (**self).terms(text)
    }
}

/// Tokenizer by forward maximum matching.
///
/// At each position the longest word of the custom dictionary is taken. If no
/// word matches, a run of ASCII alphanumerics or a single other character
/// becomes a term. Whitespace is skipped.
///
/// Each call to [`TermSource::terms()`] pins the index published at that time,
/// so one text is always segmented against one consistent snapshot.
#[derive(Clone, Debug)]
pub struct MaxMatchTokenizer {
    dict: DictionaryReader,
}

impl MaxMatchTokenizer {
    /// Creates a new instance.
    ///
    /// # Arguments
    ///
    ///  - `dict`: Read handle of the dictionary to be used.
    pub const fn new(dict: DictionaryReader) -> Self {
        Self { dict }
    }
}

impl TermSource for MaxMatchTokenizer {
    fn terms<'a>(&'a self, text: &'a str) -> TermStream<'a> {
        Box::new(MaxMatchIter::new(text, self.dict.snapshot()))
    }
}

struct MaxMatchIter<'a> {
    text: &'a str,
    chars: Vec<char>,
    c2b: Vec<usize>,
    pos: usize,
    index: Option<Arc<TrieIndex>>,
}

impl<'a> MaxMatchIter<'a> {
    fn new(text: &'a str, index: Option<Arc<TrieIndex>>) -> Self {
        let mut chars = Vec::with_capacity(text.len());
        let mut c2b = Vec::with_capacity(text.len() + 1);
        for (bi, ch) in text.char_indices() {
            chars.push(ch);
            c2b.push(bi);
        }
        c2b.push(text.len());
        Self {
            text,
            chars,
            c2b,
            pos: 0,
            index,
        }
    }

    fn longest_match(&self, pos: usize) -> Option<usize> {
        let index = self.index.as_ref()?;
        index
            .common_prefix_iterator(&self.chars[pos..])
            .last()
            .map(|m| pos + m.end_char)
    }

    fn group_end(&self, pos: usize) -> usize {
        if !self.chars[pos].is_ascii_alphanumeric() {
            return pos + 1;
        }
        let mut end = pos + 1;
        while end < self.chars.len() && self.chars[end].is_ascii_alphanumeric() {
            end += 1;
        }
        end
    }
}

impl Iterator for MaxMatchIter<'_> {
    type Item = Term;

    fn next(&mut self) -> Option<Term> {
        while self.pos < self.chars.len() && self.chars[self.pos].is_whitespace() {
            self.pos += 1;
        }
        if self.pos == self.chars.len() {
            return None;
        }
        let start = self.pos;
        let end = self
            .longest_match(start)
            .unwrap_or_else(|| self.group_end(start));
        self.pos = end;
        let (start_byte, end_byte) = (self.c2b[start], self.c2b[end]);
        Some(Term::new(&self.text[start_byte..end_byte], start_byte))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::CustomDictionary;

    fn words<S: TermSource>(source: &S, text: &str) -> Vec<String> {
        source.terms(text).map(|t| t.word).collect()
    }

    #[test]
    fn test_max_match() {
        let dict = CustomDictionary::from_entries([
            ("自然", 1),
            ("言語", 1),
            ("処理", 1),
            ("自然言語", 1),
        ])
        .unwrap();
        let tokenizer = MaxMatchTokenizer::new(dict.reader());
        assert_eq!(words(&tokenizer, "自然言語処理"), ["自然言語", "処理"]);
    }

    #[test]
    fn test_fallback() {
        let tokenizer = MaxMatchTokenizer::new(CustomDictionary::new().reader());
        let terms: Vec<_> = tokenizer.terms("rust 言語, v2").collect();
        assert_eq!(
            terms,
            [
                Term::new("rust", 0),
                Term::new("言", 5),
                Term::new("語", 8),
                Term::new(",", 11),
                Term::new("v2", 13),
            ]
        );
    }

    #[test]
    fn test_empty() {
        let tokenizer = MaxMatchTokenizer::new(CustomDictionary::new().reader());
        assert!(words(&tokenizer, "").is_empty());
        assert!(words(&tokenizer, "  \t").is_empty());
    }

    #[test]
    fn test_stale_index_is_used() {
        let mut dict = CustomDictionary::new();
        let tokenizer = MaxMatchTokenizer::new(dict.reader());
        dict.add_word("言語");
        assert_eq!(words(&tokenizer, "言語"), ["言", "語"]);
        dict.rebuild().unwrap();
        assert_eq!(words(&tokenizer, "言語"), ["言語"]);
    }
}
