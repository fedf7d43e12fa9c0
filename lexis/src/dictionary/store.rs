use std::collections::btree_map;
use std::collections::BTreeMap;

/// Ordered mapping from words to weights.
///
/// Words are kept in lexicographic order, so the store can be handed to the
/// index builder as a sorted key set without extra work.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct WordStore {
    map: BTreeMap<String, i32>,
}

impl WordStore {
    #[inline(always)]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline(always)]
    pub const fn from_map(map: BTreeMap<String, i32>) -> Self {
        Self { map }
    }

    /// Inserts or overwrites a word, returning the previous weight.
    #[inline(always)]
    pub fn insert(&mut self, word: String, weight: i32) -> Option<i32> {
        self.map.insert(word, weight)
    }

    #[inline(always)]
    pub fn remove(&mut self, word: &str) -> Option<i32> {
        self.map.remove(word)
    }

    #[inline(always)]
    pub fn get(&self, word: &str) -> Option<i32> {
        self.map.get(word).copied()
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.map.len()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    #[inline(always)]
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            inner: self.map.iter(),
        }
    }
}

/// Iterator over `(word, weight)` pairs in lexicographic order.
pub struct Iter<'a> {
    inner: btree_map::Iter<'a, String, i32>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = (&'a str, i32);

    #[inline(always)]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(w, &c)| (w.as_str(), c))
    }

    #[inline(always)]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for Iter<'_> {}
