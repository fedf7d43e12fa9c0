//! Filters that refine term streams.
use std::collections::VecDeque;
use std::sync::Arc;

use regex::Regex;

use crate::dictionary::{DictionaryReader, StopWordReader, TrieIndex};
use crate::errors::{LexisError, Result};
use crate::term::{Term, TermStream};

/// A stage of an analyzer.
///
/// A filter consumes the stream of the previous stage and returns a new lazy
/// stream. Filters drop or transform terms but keep the relative order of the
/// surviving terms.
pub trait Filter: Send + Sync {
    /// Wraps an upstream term stream.
    fn wrap<'a>(&'a self, upstream: TermStream<'a>) -> TermStream<'a>;

    /// Gets the name of the filter.
    fn name(&self) -> &'static str;
}

/// Removes terms consisting only of punctuation or symbols.
#[derive(Clone, Debug)]
pub struct PunctuationFilter {
    pattern: Regex,
}

impl PunctuationFilter {
    /// Creates a filter that removes Unicode punctuation and symbols.
    pub fn new() -> Self {
        Self {
            pattern: Regex::new(r"^[\p{P}\p{S}]+$").unwrap(),
        }
    }

    /// Creates a filter that removes terms matching `pattern`.
    ///
    /// # Errors
    ///
    /// [`LexisError`] is returned when `pattern` is not a valid regex.
    pub fn with_pattern(pattern: &str) -> Result<Self> {
        let pattern = Regex::new(pattern)
            .map_err(|e| LexisError::invalid_argument("pattern", e.to_string()))?;
        Ok(Self { pattern })
    }
}

impl Default for PunctuationFilter {
    fn default() -> Self {
        Self::new()
    }
}

impl Filter for PunctuationFilter {
    fn wrap<'a>(&'a self, upstream: TermStream<'a>) -> TermStream<'a> {
        Box::new(upstream.filter(move |t| !self.pattern.is_match(&t.word)))
    }

    fn name(&self) -> &'static str {
        "punctuation"
    }
}

/// Removes stop words.
#[derive(Clone, Debug)]
pub struct StopWordFilter {
    stop_words: StopWordReader,
}

impl StopWordFilter {
    /// Creates a new instance.
    pub const fn new(stop_words: StopWordReader) -> Self {
        Self { stop_words }
    }
}

impl Filter for StopWordFilter {
    fn wrap<'a>(&'a self, upstream: TermStream<'a>) -> TermStream<'a> {
        Box::new(upstream.filter(move |t| !self.stop_words.contains(&t.word)))
    }

    fn name(&self) -> &'static str {
        "stop_word"
    }
}

/// Converts terms to lowercase.
#[derive(Clone, Copy, Debug, Default)]
pub struct LowercaseFilter;

impl Filter for LowercaseFilter {
    fn wrap<'a>(&'a self, upstream: TermStream<'a>) -> TermStream<'a> {
        Box::new(upstream.map(|mut t| {
            if t.word.chars().any(char::is_uppercase) {
                t.word = t.word.to_lowercase();
            }
            t
        }))
    }

    fn name(&self) -> &'static str {
        "lowercase"
    }
}

/// Merges adjacent terms that together form a word of a custom dictionary.
///
/// At each term, the longest dictionary word that spans it and up to
/// `max_span - 1` following adjacent terms, ending on a term boundary, replaces
/// those terms. The merged term takes the position of the first one, so the
/// stream order is kept.
#[derive(Clone, Debug)]
pub struct CustomWordFilter {
    dict: DictionaryReader,
    max_span: usize,
}

impl CustomWordFilter {
    /// Default maximum number of terms merged into one.
    pub const DEFAULT_MAX_SPAN: usize = 8;

    /// Creates a new instance.
    pub const fn new(dict: DictionaryReader) -> Self {
        Self {
            dict,
            max_span: Self::DEFAULT_MAX_SPAN,
        }
    }

    /// Specifies the maximum number of terms merged into one.
    ///
    /// # Errors
    ///
    /// [`LexisError`] is returned when `max_span` is less than 2.
    pub fn max_span(mut self, max_span: usize) -> Result<Self> {
        if max_span < 2 {
            return Err(LexisError::invalid_argument(
                "max_span",
                "max_span must be at least 2",
            ));
        }
        self.max_span = max_span;
        Ok(self)
    }
}

impl Filter for CustomWordFilter {
    fn wrap<'a>(&'a self, upstream: TermStream<'a>) -> TermStream<'a> {
        match self.dict.snapshot() {
            Some(index) => Box::new(MergeIter {
                upstream,
                pending: VecDeque::with_capacity(self.max_span),
                index,
                max_span: self.max_span,
            }),
            None => upstream,
        }
    }

    fn name(&self) -> &'static str {
        "custom_word"
    }
}

struct MergeIter<'a> {
    upstream: TermStream<'a>,
    pending: VecDeque<Term>,
    index: Arc<TrieIndex>,
    max_span: usize,
}

impl MergeIter<'_> {
    fn fill(&mut self) {
        while self.pending.len() < self.max_span {
            match self.upstream.next() {
                Some(t) => self.pending.push_back(t),
                None => break,
            }
        }
    }

    /// Gets the number of leading terms that form the longest word.
    fn span(&self) -> usize {
        let mut chars = vec![];
        let mut boundaries = vec![];
        let mut prev_end = None;
        for t in &self.pending {
            if prev_end.map_or(false, |end| end != t.offset) {
                break;
            }
            chars.extend(t.word.chars());
            boundaries.push(chars.len());
            prev_end = Some(t.end_offset());
        }
        let mut span = 1;
        for m in self.index.common_prefix_iterator(&chars) {
            if let Some(i) = boundaries.iter().position(|&b| b == m.end_char) {
                span = span.max(i + 1);
            }
        }
        span
    }
}

impl Iterator for MergeIter<'_> {
    type Item = Term;

    fn next(&mut self) -> Option<Term> {
        self.fill();
        let span = self.span();
        let mut merged = self.pending.pop_front()?;
        for t in self.pending.drain(..span - 1) {
            merged.word.push_str(&t.word);
        }
        Some(merged)
    }
}
