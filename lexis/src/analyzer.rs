//! Analyzers: base term sources wrapped with ordered filter chains.
//!
//! An [`Analyzer`] starts from a [`TermSource`] and applies its filters in
//! the order they were declared. A term dropped by an earlier filter is never
//! seen by a later one.
//!
//! ```text
//! tokenizer -> filter_1 -> filter_2 -> ... -> terms
//! ```
pub mod filter;

use std::fmt;
use std::str::FromStr;

use crate::buffer::GrowableBuffer;
use crate::dictionary::{DictionaryReader, StopWordDict, StopWordReader};
use crate::errors::{LexisError, Result};
use crate::term::{Term, TermStream};
use crate::tokenizer::TermSource;
use filter::{CustomWordFilter, Filter, LowercaseFilter, PunctuationFilter, StopWordFilter};

/// Kind of a built-in filter.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum FilterKind {
    /// [`PunctuationFilter`].
    Punctuation,
    /// [`StopWordFilter`].
    StopWord,
    /// [`CustomWordFilter`].
    CustomWord,
    /// [`LowercaseFilter`].
    Lowercase,
}

/// Predefined analyzer configuration.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub enum Profile {
    /// Removes punctuation, then stop words.
    #[default]
    Standard,
    /// Applies no filters.
    Raw,
    /// Merges custom words, removes punctuation, then stop words.
    Custom,
}

impl Profile {
    /// Gets the filters of the profile in application order.
    pub const fn filter_kinds(self) -> &'static [FilterKind] {
        match self {
            Self::Standard => &[FilterKind::Punctuation, FilterKind::StopWord],
            Self::Raw => &[],
            Self::Custom => &[
                FilterKind::CustomWord,
                FilterKind::Punctuation,
                FilterKind::StopWord,
            ],
        }
    }

    /// Gets the name of the profile.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::Raw => "raw",
            Self::Custom => "custom",
        }
    }
}

impl fmt::Display for Profile {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Profile {
    type Err = LexisError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "standard" => Ok(Self::Standard),
            "raw" => Ok(Self::Raw),
            "custom" => Ok(Self::Custom),
            _ => Err(LexisError::invalid_argument(
                "profile",
                format!("unknown profile: {}", s),
            )),
        }
    }
}

/// Term source refined by an ordered chain of filters.
pub struct Analyzer<T> {
    source: T,
    filters: Vec<Box<dyn Filter>>,
}

impl<T> Analyzer<T>
where
    T: TermSource,
{
    /// Creates an analyzer without filters.
    pub const fn new(source: T) -> Self {
        Self {
            source,
            filters: vec![],
        }
    }

    /// Creates a builder.
    pub const fn builder(source: T) -> AnalyzerBuilder<T> {
        AnalyzerBuilder::new(source)
    }

    /// Analyzes `text` into a lazy term stream.
    pub fn analyze<'a>(&'a self, text: &'a str) -> TermStream<'a> {
        let mut stream = self.source.terms(text);
        for filter in &self.filters {
            stream = filter.wrap(stream);
        }
        stream
    }

    /// Analyzes `text` and collects the terms.
    ///
    /// # Errors
    ///
    /// [`LexisError`] is returned when the term buffer cannot grow.
    pub fn analyze_to_vec(&self, text: &str) -> Result<Vec<Term>> {
        let mut terms = GrowableBuffer::new();
        terms.extend(self.analyze(text))?;
        Ok(terms.into_vec())
    }

    /// Gets the names of the filters in application order.
    pub fn filter_names(&self) -> Vec<&'static str> {
        self.filters.iter().map(|f| f.name()).collect()
    }

    /// Gets the reference to the base term source.
    pub const fn source(&self) -> &T {
        &self.source
    }
}

impl<T> TermSource for Analyzer<T>
where
    T: TermSource,
{
    fn terms<'a>(&'a self, text: &'a str) -> TermStream<'a> {
        self.analyze(text)
    }
}

impl<T> fmt::Debug for Analyzer<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let names: Vec<_> = self.filters.iter().map(|f| f.name()).collect();
        f.debug_struct("Analyzer")
            .field("filters", &names)
            .finish_non_exhaustive()
    }
}

enum Stage {
    Builtin(FilterKind),
    Dyn(Box<dyn Filter>),
}

/// Builder of [`Analyzer`].
///
/// Stages are applied in the order the builder methods are called.
pub struct AnalyzerBuilder<T> {
    source: T,
    stages: Vec<Stage>,
    stop_words: Option<StopWordReader>,
    custom_words: Option<DictionaryReader>,
}

impl<T> AnalyzerBuilder<T>
where
    T: TermSource,
{
    /// Creates a builder without stages.
    pub const fn new(source: T) -> Self {
        Self {
            source,
            stages: vec![],
            stop_words: None,
            custom_words: None,
        }
    }

    /// Specifies the stop words used by stop-word stages.
    ///
    /// If unspecified, [`StopWordDict::with_default_words()`] is used.
    pub fn stop_words(mut self, stop_words: StopWordReader) -> Self {
        self.stop_words = Some(stop_words);
        self
    }

    /// Specifies the dictionary used by custom-word stages.
    pub fn custom_words(mut self, dict: DictionaryReader) -> Self {
        self.custom_words = Some(dict);
        self
    }

    /// Appends a built-in stage.
    pub fn stage(mut self, kind: FilterKind) -> Self {
        self.stages.push(Stage::Builtin(kind));
        self
    }

    /// Appends [`PunctuationFilter`].
    pub fn punctuation(self) -> Self {
        self.stage(FilterKind::Punctuation)
    }

    /// Appends [`StopWordFilter`].
    pub fn stop_word(self) -> Self {
        self.stage(FilterKind::StopWord)
    }

    /// Appends [`CustomWordFilter`].
    pub fn custom_word(self) -> Self {
        self.stage(FilterKind::CustomWord)
    }

    /// Appends [`LowercaseFilter`].
    pub fn lowercase(self) -> Self {
        self.stage(FilterKind::Lowercase)
    }

    /// Appends a user-defined filter.
    pub fn filter<F>(mut self, filter: F) -> Self
    where
        F: Filter + 'static,
    {
        self.stages.push(Stage::Dyn(Box::new(filter)));
        self
    }

    /// Appends the stages of a profile.
    pub fn profile(mut self, profile: Profile) -> Self {
        self.stages
            .extend(profile.filter_kinds().iter().map(|&k| Stage::Builtin(k)));
        self
    }

    /// Builds the analyzer.
    ///
    /// # Errors
    ///
    /// [`LexisError`] is returned when a custom-word stage is declared without
    /// a dictionary.
    pub fn build(self) -> Result<Analyzer<T>> {
        let mut stop_words = self.stop_words;
        let mut filters: Vec<Box<dyn Filter>> = Vec::with_capacity(self.stages.len());
        for stage in self.stages {
            let filter: Box<dyn Filter> = match stage {
                Stage::Builtin(FilterKind::Punctuation) => Box::new(PunctuationFilter::new()),
                Stage::Builtin(FilterKind::StopWord) => {
                    let reader = match stop_words.as_ref() {
                        Some(reader) => reader.clone(),
                        None => {
                            let reader = StopWordDict::with_default_words()?.reader();
                            stop_words = Some(reader.clone());
                            reader
                        }
                    };
                    Box::new(StopWordFilter::new(reader))
                }
                Stage::Builtin(FilterKind::CustomWord) => {
                    let dict = self.custom_words.clone().ok_or_else(|| {
                        LexisError::invalid_argument(
                            "custom_words",
                            "a custom-word stage requires a dictionary",
                        )
                    })?;
                    Box::new(CustomWordFilter::new(dict))
                }
                Stage::Builtin(FilterKind::Lowercase) => Box::new(LowercaseFilter),
                Stage::Dyn(filter) => filter,
            };
            filters.push(filter);
        }
        tracing::debug!(
            filters = ?filters.iter().map(|f| f.name()).collect::<Vec<_>>(),
            "built an analyzer"
        );
        Ok(Analyzer {
            source: self.source,
            filters,
        })
    }
}
