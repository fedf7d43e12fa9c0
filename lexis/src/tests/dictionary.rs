use std::collections::BTreeMap;

use proptest::prelude::*;

use crate::common::DEFAULT_WEIGHT;
use crate::CustomDictionary;

const VOCAB: &str = include_str!("./resources/vocab.txt");

fn vocab() -> Vec<&'static str> {
    VOCAB.lines().filter(|l| !l.is_empty()).collect()
}

#[test]
fn test_idempotent_add() {
    let mut dict = CustomDictionary::new();
    dict.add_word("形態素解析");
    dict.add_word("形態素解析");
    assert_eq!(dict.len(), 1);
    assert_eq!(dict.word_weight("形態素解析"), Some(DEFAULT_WEIGHT));

    dict.add_word_with_weight("辞書", 5);
    dict.add_word_with_weight("辞書", 7);
    assert_eq!(dict.len(), 2);
    assert_eq!(dict.word_weight("辞書"), Some(7));
}

#[test]
fn test_staleness_contract() {
    let mut dict = CustomDictionary::from_entries([("東京", 10)]).unwrap();
    let before_new = dict.query("京都");
    let before_old = dict.query("東京");

    dict.add_word("京都");
    dict.add_word_with_weight("東京", 20);
    assert_eq!(dict.query("京都"), before_new);
    assert_eq!(dict.query("東京"), before_old);

    dict.remove_word("東京");
    assert_eq!(dict.query("東京"), Some(10));

    dict.rebuild().unwrap();
    assert_eq!(dict.query("京都"), Some(DEFAULT_WEIGHT));
    assert_eq!(dict.query("東京"), None);
}

#[test]
fn test_empty_store_query() {
    let dict = CustomDictionary::from_map(BTreeMap::new()).unwrap();
    for word in vocab() {
        assert_eq!(dict.query(word), None);
        assert_eq!(dict.longest_prefix(word), None);
    }
    assert_eq!(dict.query(""), None);
}

#[test]
fn test_bulk_load() {
    let map: BTreeMap<_, _> = vocab()
        .into_iter()
        .enumerate()
        .map(|(i, w)| (w.to_string(), i as i32))
        .collect();
    let dict = CustomDictionary::from_map(map.clone()).unwrap();
    assert_eq!(dict.len(), map.len());
    for (word, weight) in &map {
        assert_eq!(dict.query(word), Some(*weight));
    }
    assert_eq!(
        dict.longest_prefix("形態素解析器"),
        Some(("形態素解析".to_string(), map["形態素解析"]))
    );
}

#[derive(Clone, Debug)]
enum Edit {
    Add(usize),
    AddWithWeight(usize, i32),
    Remove(usize),
}

fn edit_strategy(n: usize) -> impl Strategy<Value = Edit> {
    prop_oneof![
        (0..n).prop_map(Edit::Add),
        (0..n, any::<i32>()).prop_map(|(i, w)| Edit::AddWithWeight(i, w)),
        (0..n).prop_map(Edit::Remove),
    ]
}

proptest! {
    #[test]
    fn prop_rebuild_consistency(
        edits in prop::collection::vec(edit_strategy(14), 0..64),
    ) {
        let vocab = vocab();
        let mut dict = CustomDictionary::new();
        let mut expected = BTreeMap::new();
        for edit in edits {
            match edit {
                Edit::Add(i) => {
                    dict.add_word(vocab[i]);
                    expected.insert(vocab[i], DEFAULT_WEIGHT);
                }
                Edit::AddWithWeight(i, w) => {
                    dict.add_word_with_weight(vocab[i], w);
                    expected.insert(vocab[i], w);
                }
                Edit::Remove(i) => {
                    dict.remove_word(vocab[i]);
                    expected.remove(vocab[i]);
                }
            }
        }
        dict.rebuild().unwrap();
        prop_assert_eq!(dict.index().is_none(), expected.is_empty());
        for word in &vocab {
            prop_assert_eq!(dict.query(word), expected.get(word).copied());
        }
    }
}
