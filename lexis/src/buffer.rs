//! Buffer whose capacity is managed by a sizing strategy.
use std::mem;
use std::ops::Deref;

use crate::errors::{LexisError, Result};
use crate::growth::{ArraySizingStrategy, BoundedProportionalSizing};

/// Growable buffer.
///
/// Unlike [`Vec`], the capacity changes only as the given
/// [`ArraySizingStrategy`] decides, and running out of representable space is
/// reported as an error instead of a panic.
#[derive(Clone, Debug)]
pub struct GrowableBuffer<T, S = BoundedProportionalSizing> {
    data: Vec<T>,
    strategy: S,
}

impl<T> GrowableBuffer<T> {
    /// Creates an empty buffer with the default strategy.
    pub const fn new() -> Self {
        Self::with_strategy(BoundedProportionalSizing::new())
    }
}

impl<T> Default for GrowableBuffer<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, S> GrowableBuffer<T, S> {
    /// Creates an empty buffer with the given strategy.
    pub const fn with_strategy(strategy: S) -> Self {
        Self {
            data: Vec::new(),
            strategy,
        }
    }

    /// Gets the number of elements.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Checks if the buffer is empty.
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Gets the current capacity.
    #[inline(always)]
    pub fn capacity(&self) -> usize {
        self.data.capacity()
    }

    /// Converts into the inner vector.
    #[allow(clippy::missing_const_for_fn)]
    pub fn into_vec(self) -> Vec<T> {
        self.data
    }
}

impl<T, S> GrowableBuffer<T, S>
where
    S: ArraySizingStrategy,
{
    /// Largest element count whose allocation fits in `isize::MAX` bytes.
    fn max_elements() -> usize {
        match mem::size_of::<T>() {
            0 => usize::MAX,
            n => isize::MAX as usize / n,
        }
    }

    /// Makes room for at least `additions` more elements.
    ///
    /// # Errors
    ///
    /// [`LexisError`] is returned when the strategy cannot provide the
    /// requested capacity or the allocation fails.
    pub fn ensure_capacity(&mut self, additions: usize) -> Result<()> {
        let len = self.data.len();
        if self.data.capacity() - len >= additions {
            return Ok(());
        }
        let new_len = self.strategy.grow(self.data.capacity(), len, additions)?;
        self.data.try_reserve_exact(new_len - len).map_err(|_| {
            LexisError::capacity_overflow(Some(new_len), Self::max_elements())
        })?;
        Ok(())
    }

    /// Appends an element.
    ///
    /// # Errors
    ///
    /// See [`GrowableBuffer::ensure_capacity()`].
    pub fn push(&mut self, x: T) -> Result<()> {
        self.ensure_capacity(1)?;
        self.data.push(x);
        Ok(())
    }

    /// Appends all elements of an iterator, reserving for its lower size bound
    /// up front.
    ///
    /// # Errors
    ///
    /// See [`GrowableBuffer::ensure_capacity()`].
    pub fn extend<I>(&mut self, iter: I) -> Result<()>
    where
        I: IntoIterator<Item = T>,
    {
        let iter = iter.into_iter();
        self.ensure_capacity(iter.size_hint().0)?;
        for x in iter {
            self.push(x)?;
        }
        Ok(())
    }
}

impl<T, S> Deref for GrowableBuffer<T, S> {
    type Target = [T];

    #[inline(always)]
    fn deref(&self) -> &[T] {
        &self.data
    }
}
