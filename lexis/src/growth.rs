//! Growth policies for backing buffers.
//!
//! A sizing strategy decides the new capacity of a buffer that must hold more
//! elements than it currently can. Strategies are pure: the same inputs always
//! give the same output.
use crate::errors::{LexisError, Result};

/// Strategy for growing a buffer.
pub trait ArraySizingStrategy {
    /// Computes a new buffer length.
    ///
    /// # Arguments
    ///
    ///  - `current_len`: Current length of the buffer. It can be zero,
    ///    indicating growth from an empty buffer.
    ///  - `num_elements`: Number of elements stored in the buffer.
    ///  - `expected_additions`: Expected number of additions.
    ///
    /// The returned length is at least `num_elements + expected_additions`.
    ///
    /// # Errors
    ///
    /// [`LexisError`] is returned when the required length cannot be represented.
    fn grow(&self, current_len: usize, num_elements: usize, expected_additions: usize)
        -> Result<usize>;
}

/// Proportional growth clamped to a minimum and maximum increment.
///
/// The buffer grows by `current_len * ratio`, but by at least `min_grow` and at
/// most `max_grow` elements. The result never exceeds `max_len`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoundedProportionalSizing {
    ratio: f32,
    min_grow: usize,
    max_grow: usize,
    max_len: usize,
}

impl BoundedProportionalSizing {
    /// Default growth ratio.
    pub const DEFAULT_RATIO: f32 = 0.5;

    /// Default minimum number of elements to grow by.
    pub const DEFAULT_MIN_GROW: usize = 10;

    /// Default maximum number of elements to grow by.
    pub const DEFAULT_MAX_GROW: usize = i32::MAX as usize;

    /// The largest length any `Vec` can have.
    pub const MAX_LEN: usize = isize::MAX as usize;

    /// Creates a new instance with the default parameters.
    pub const fn new() -> Self {
        Self {
            ratio: Self::DEFAULT_RATIO,
            min_grow: Self::DEFAULT_MIN_GROW,
            max_grow: Self::DEFAULT_MAX_GROW,
            max_len: Self::MAX_LEN,
        }
    }

    /// Specifies the growth ratio.
    ///
    /// # Errors
    ///
    /// [`LexisError`] is returned when `ratio` is not a positive finite number.
    pub fn with_ratio(mut self, ratio: f32) -> Result<Self> {
        if !ratio.is_finite() || ratio <= 0.0 {
            return Err(LexisError::invalid_argument(
                "ratio",
                format!("growth ratio must be positive, but got {}", ratio),
            ));
        }
        self.ratio = ratio;
        Ok(self)
    }

    /// Specifies the bounds of a single growth step.
    ///
    /// # Errors
    ///
    /// [`LexisError`] is returned when `min_grow > max_grow` or `max_grow == 0`.
    pub fn with_grow_bounds(mut self, min_grow: usize, max_grow: usize) -> Result<Self> {
        if max_grow == 0 || min_grow > max_grow {
            return Err(LexisError::invalid_argument(
                "max_grow",
                format!("invalid bounds: min_grow={}, max_grow={}", min_grow, max_grow),
            ));
        }
        self.min_grow = min_grow;
        self.max_grow = max_grow;
        Ok(self)
    }

    /// Specifies the maximum buffer length.
    pub const fn with_max_len(mut self, max_len: usize) -> Self {
        self.max_len = if max_len < Self::MAX_LEN {
            max_len
        } else {
            Self::MAX_LEN
        };
        self
    }

    /// Gets the maximum buffer length.
    pub const fn max_len(&self) -> usize {
        self.max_len
    }
}

impl Default for BoundedProportionalSizing {
    fn default() -> Self {
        Self::new()
    }
}

impl ArraySizingStrategy for BoundedProportionalSizing {
    fn grow(
        &self,
        current_len: usize,
        num_elements: usize,
        expected_additions: usize,
    ) -> Result<usize> {
        let required = num_elements
            .checked_add(expected_additions)
            .ok_or_else(|| LexisError::capacity_overflow(None, self.max_len))?;
        if required > self.max_len {
            return Err(LexisError::capacity_overflow(Some(required), self.max_len));
        }

        // `as` saturates for out-of-range floats.
        let grow_by = (current_len as f64 * f64::from(self.ratio)) as usize;
        let grow_by = grow_by.clamp(self.min_grow, self.max_grow);
        let grow_to = current_len.saturating_add(grow_by).min(self.max_len);

        Ok(required.max(grow_to))
    }
}
