use crate::errors::{LexisError, Result};

pub struct Trie {
    da: crawdad::Trie,
}

impl Trie {
    pub fn from_records<K>(records: &[(K, u32)]) -> Result<Self>
    where
        K: AsRef<str>,
    {
        Ok(Self {
            da: crawdad::Trie::from_records(records.iter().map(|(k, v)| (k, *v)))
                .map_err(|e| LexisError::index_build(e.to_string()))?,
        })
    }

    #[inline(always)]
    pub fn exact_match(&self, key: &str) -> Option<u32> {
        self.da.exact_match(key.chars())
    }

    #[inline(always)]
    pub fn common_prefix_iterator<'a>(
        &'a self,
        input: &'a [char],
    ) -> impl Iterator<Item = TrieMatch> + 'a {
        self.da
            .common_prefix_search(input.iter().cloned())
            .map(move |(value, end_char)| TrieMatch::new(value, end_char))
    }
}

#[derive(Debug, Eq, PartialEq, Clone)]
pub struct TrieMatch {
    pub value: u32,
    pub end_char: usize,
}

impl TrieMatch {
    #[inline(always)]
    pub const fn new(value: u32, end_char: usize) -> Self {
        Self { value, end_char }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_match() {
        let trie = Trie::from_records(&[("東京", 0), ("東京都", 1), ("京都", 2)]).unwrap();
        assert_eq!(trie.exact_match("東京都"), Some(1));
        assert_eq!(trie.exact_match("京都"), Some(2));
        assert_eq!(trie.exact_match("東"), None);
        assert_eq!(trie.exact_match("東京都庁"), None);
    }

    #[test]
    fn test_common_prefix_iterator() {
        let trie = Trie::from_records(&[("東京", 0), ("東京都", 1), ("京都", 2)]).unwrap();
        let input: Vec<_> = "東京都庁".chars().collect();
        let mut it = trie.common_prefix_iterator(&input);
        assert_eq!(it.next(), Some(TrieMatch::new(0, 2)));
        assert_eq!(it.next(), Some(TrieMatch::new(1, 3)));
        assert_eq!(it.next(), None);
    }
}
