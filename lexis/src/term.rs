//! Terms produced by tokenizers and analyzers.
use std::fmt;

/// A term in a term stream.
#[derive(Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct Term {
    /// Surface string.
    pub word: String,

    /// Byte offset of the term in the analyzed text.
    pub offset: usize,
}

impl Term {
    /// Creates a new term.
    pub fn new<S>(word: S, offset: usize) -> Self
    where
        S: Into<String>,
    {
        Self {
            word: word.into(),
            offset,
        }
    }

    /// Gets the byte offset just past the end of the term.
    #[inline(always)]
    pub fn end_offset(&self) -> usize {
        self.offset + self.word.len()
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.word)
    }
}

/// Lazy stream of terms.
pub type TermStream<'a> = Box<dyn Iterator<Item = Term> + 'a>;
