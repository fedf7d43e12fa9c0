//! Definition of errors.

use std::error::Error;
use std::fmt;

/// A specialized Result type for Lexis.
pub type Result<T, E = LexisError> = std::result::Result<T, E>;

/// The error type for Lexis.
#[derive(Debug)]
pub enum LexisError {
    /// The error variant for [`InvalidArgumentError`].
    InvalidArgument(InvalidArgumentError),

    /// The error variant for [`CapacityOverflowError`].
    CapacityOverflow(CapacityOverflowError),

    /// The error variant for [`IndexBuildError`].
    IndexBuild(IndexBuildError),

    /// The error variant for [`TryFromIntError`](std::num::TryFromIntError).
    TryFromInt(std::num::TryFromIntError),
}

impl LexisError {
    pub(crate) fn invalid_argument<S>(arg: &'static str, msg: S) -> Self
    where
        S: Into<String>,
    {
        Self::InvalidArgument(InvalidArgumentError {
            arg,
            msg: msg.into(),
        })
    }

    pub(crate) const fn capacity_overflow(requested: Option<usize>, max_len: usize) -> Self {
        Self::CapacityOverflow(CapacityOverflowError {
            requested,
            max_len,
        })
    }

    pub(crate) fn index_build<S>(msg: S) -> Self
    where
        S: Into<String>,
    {
        Self::IndexBuild(IndexBuildError { msg: msg.into() })
    }
}

impl fmt::Display for LexisError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::InvalidArgument(e) => e.fmt(f),
            Self::CapacityOverflow(e) => e.fmt(f),
            Self::IndexBuild(e) => e.fmt(f),
            Self::TryFromInt(e) => e.fmt(f),
        }
    }
}

impl Error for LexisError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::TryFromInt(e) => Some(e),
            _ => None,
        }
    }
}

/// Error used when the argument is invalid.
#[derive(Debug)]
pub struct InvalidArgumentError {
    /// Name of the argument.
    pub(crate) arg: &'static str,

    /// Error message.
    pub(crate) msg: String,
}

impl InvalidArgumentError {
    /// Gets the name of the argument.
    pub const fn arg(&self) -> &'static str {
        self.arg
    }
}

impl fmt::Display for InvalidArgumentError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "InvalidArgumentError: {}: {}", self.arg, self.msg)
    }
}

impl Error for InvalidArgumentError {}

/// Error used when a buffer cannot grow to the requested size.
#[derive(Debug)]
pub struct CapacityOverflowError {
    /// Requested minimum size, or `None` if it is not representable in `usize`.
    pub(crate) requested: Option<usize>,

    /// The maximum length allowed by the sizing strategy.
    pub(crate) max_len: usize,
}

impl CapacityOverflowError {
    /// Gets the requested minimum size, or `None` if it overflowed `usize`.
    pub const fn requested(&self) -> Option<usize> {
        self.requested
    }

    /// Gets the maximum length allowed by the sizing strategy.
    pub const fn max_len(&self) -> usize {
        self.max_len
    }
}

impl fmt::Display for CapacityOverflowError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.requested {
            Some(requested) => write!(
                f,
                "CapacityOverflowError: requested {} elements, but the maximum is {}",
                requested, self.max_len
            ),
            None => write!(
                f,
                "CapacityOverflowError: requested size overflows usize (the maximum is {})",
                self.max_len
            ),
        }
    }
}

impl Error for CapacityOverflowError {}

/// Error used when a trie index cannot be built.
#[derive(Debug)]
pub struct IndexBuildError {
    /// Error message.
    pub(crate) msg: String,
}

impl fmt::Display for IndexBuildError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "IndexBuildError: {}", self.msg)
    }
}

impl Error for IndexBuildError {}

impl From<std::num::TryFromIntError> for LexisError {
    fn from(error: std::num::TryFromIntError) -> Self {
        Self::TryFromInt(error)
    }
}
