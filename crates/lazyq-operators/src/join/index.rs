//! Build-side indexes.
//!
//! Both index kinds report matches as build-side positions in ascending
//! order, which keeps matches in build-side source order.

use std::collections::HashMap;
use std::hash::Hash;
use std::rc::Rc;

use lazyq_core::compare::EqualityComparer;

pub(crate) trait JoinIndex<K> {
    /// Append the positions of every build element whose key matches `key`.
    /// Comparer-based indexes call `eq(key, build_key)`.
    fn collect_matches(&self, key: &K, out: &mut Vec<usize>);
}

/// Key to positions multimap.
pub(crate) struct HashIndex<K> {
    positions: HashMap<K, Vec<usize>>,
}

impl<K: Hash + Eq> JoinIndex<K> for HashIndex<K> {
    fn collect_matches(&self, key: &K, out: &mut Vec<usize>) {
        if let Some(found) = self.positions.get(key) {
            out.extend_from_slice(found);
        }
    }
}

/// Keys in build order, scanned in full with the comparer.
pub(crate) struct ScanIndex<K> {
    keys: Vec<K>,
    eq: EqualityComparer<K>,
}

impl<K> JoinIndex<K> for ScanIndex<K> {
    fn collect_matches(&self, key: &K, out: &mut Vec<usize>) {
        out.extend(
            self.keys
                .iter()
                .enumerate()
                .filter(|(_, k)| (self.eq)(key, k))
                .map(|(pos, _)| pos),
        );
    }
}

pub(crate) trait JoinStrategy<K>: 'static {
    type Index: JoinIndex<K> + 'static;

    fn build(&self, keys: Vec<K>) -> Self::Index;
}

pub(crate) struct HashJoin;

impl<K: Hash + Eq + 'static> JoinStrategy<K> for HashJoin {
    type Index = HashIndex<K>;

    fn build(&self, keys: Vec<K>) -> HashIndex<K> {
        let mut positions: HashMap<K, Vec<usize>> = HashMap::with_capacity(keys.len());
        for (pos, key) in keys.into_iter().enumerate() {
            positions.entry(key).or_default().push(pos);
        }
        HashIndex { positions }
    }
}

pub(crate) struct ScanJoin<K> {
    eq: EqualityComparer<K>,
}

impl<K> ScanJoin<K> {
    pub(crate) fn new<E>(eq: E) -> Self
    where
        E: Fn(&K, &K) -> bool + 'static,
    {
        Self { eq: Rc::new(eq) }
    }

    /// For joins probed with the inner side: the build keys are outer keys,
    /// so the arguments are swapped back to `eq(outer_key, inner_key)`.
    pub(crate) fn outer_first<E>(eq: E) -> Self
    where
        E: Fn(&K, &K) -> bool + 'static,
    {
        Self::new(move |inner: &K, outer: &K| eq(outer, inner))
    }
}

impl<K: 'static> JoinStrategy<K> for ScanJoin<K> {
    type Index = ScanIndex<K>;

    fn build(&self, keys: Vec<K>) -> ScanIndex<K> {
        ScanIndex {
            keys,
            eq: Rc::clone(&self.eq),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_index_keeps_build_order() {
        let index = HashJoin.build(vec!["a", "b", "a", "c", "a"]);
        let mut out = Vec::new();
        index.collect_matches(&"a", &mut out);
        assert_eq!(out, vec![0, 2, 4]);

        out.clear();
        index.collect_matches(&"z", &mut out);
        assert!(out.is_empty());
    }

    #[test]
    fn test_scan_index_matches_with_comparer() {
        let strategy = ScanJoin::new(|a: &i32, b: &i32| a % 10 == b % 10);
        let index = strategy.build(vec![11, 2, 21, 5]);
        let mut out = Vec::new();
        index.collect_matches(&1, &mut out);
        assert_eq!(out, vec![0, 2]);
    }

    #[test]
    fn test_scan_index_argument_order() {
        let prefix = |short: &String, long: &String| long.starts_with(short.as_str());
        let mut out = Vec::new();

        let index = ScanJoin::new(prefix).build(vec!["abc".to_string(), "xyz".to_string()]);
        index.collect_matches(&"ab".to_string(), &mut out);
        assert_eq!(out, vec![0]);

        out.clear();
        let index = ScanJoin::outer_first(prefix).build(vec!["ab".to_string(), "x".to_string()]);
        index.collect_matches(&"xyz".to_string(), &mut out);
        assert_eq!(out, vec![1]);
    }
}
