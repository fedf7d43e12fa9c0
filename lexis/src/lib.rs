//! # Lexis
//!
//! Custom dictionaries and analyzer pipelines for text segmentation.
//!
//! A [`CustomDictionary`] keeps user vocabulary in a mutable ordered store and
//! answers queries from an immutable double-array trie. Edits are batched: call
//! [`CustomDictionary::rebuild()`] after a burst of edits to publish them.
//!
//! ```
//! use lexis::analyzer::{Analyzer, Profile};
//! use lexis::tokenizer::MaxMatchTokenizer;
//! use lexis::CustomDictionary;
//!
//! let mut dict = CustomDictionary::new();
//! dict.add_word("自然言語");
//! dict.add_word("処理");
//! dict.rebuild().unwrap();
//!
//! let tokenizer = MaxMatchTokenizer::new(dict.reader());
//! let analyzer = Analyzer::builder(tokenizer)
//!     .profile(Profile::Standard)
//!     .build()
//!     .unwrap();
//! let words: Vec<_> = analyzer.analyze("自然言語処理。").map(|t| t.word).collect();
//! assert_eq!(words, ["自然言語", "処理"]);
//! ```
#![deny(missing_docs)]

#[cfg(target_pointer_width = "16")]
compile_error!("`target_pointer_width` must be larger than or equal to 32");

pub mod analyzer;
pub mod buffer;
pub mod common;
pub mod dictionary;
pub mod errors;
pub mod growth;
pub mod term;
pub mod tokenizer;
mod utils;

#[cfg(test)]
mod tests;

pub use analyzer::Analyzer;
pub use dictionary::{CustomDictionary, DictionaryReader, StopWordDict};
