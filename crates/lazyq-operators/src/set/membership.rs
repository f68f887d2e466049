//! Key membership tables used by the set operators.
//!
//! Default equality hashes keys. A custom equality comparer cannot be
//! hashed, so [`ScanSet`] keeps keys in a vector and scans it.

use std::collections::HashSet;
use std::hash::Hash;
use std::rc::Rc;

use lazyq_core::compare::EqualityComparer;

pub(crate) trait KeySet<K> {
    fn contains(&self, key: &K) -> bool;

    /// Returns `true` when `key` was not yet present.
    fn insert(&mut self, key: K) -> bool;

    fn remove(&mut self, key: &K) -> bool;

    fn len(&self) -> usize;
}

impl<K: Hash + Eq> KeySet<K> for HashSet<K> {
    fn contains(&self, key: &K) -> bool {
        HashSet::contains(self, key)
    }

    fn insert(&mut self, key: K) -> bool {
        HashSet::insert(self, key)
    }

    fn remove(&mut self, key: &K) -> bool {
        HashSet::remove(self, key)
    }

    fn len(&self) -> usize {
        HashSet::len(self)
    }
}

/// Calls `eq(stored, candidate)`.
pub(crate) struct ScanSet<K> {
    keys: Vec<K>,
    eq: EqualityComparer<K>,
}

impl<K> ScanSet<K> {
    fn position(&self, key: &K) -> Option<usize> {
        self.keys.iter().position(|k| (self.eq)(k, key))
    }
}

impl<K> KeySet<K> for ScanSet<K> {
    fn contains(&self, key: &K) -> bool {
        self.position(key).is_some()
    }

    fn insert(&mut self, key: K) -> bool {
        if self.contains(&key) {
            return false;
        }
        self.keys.push(key);
        true
    }

    fn remove(&mut self, key: &K) -> bool {
        match self.position(key) {
            Some(pos) => {
                self.keys.swap_remove(pos);
                true
            }
            None => false,
        }
    }

    fn len(&self) -> usize {
        self.keys.len()
    }
}

/// Creates empty key sets. Each cursor builds its own.
pub(crate) trait Membership<K>: 'static {
    type Set: KeySet<K> + 'static;

    fn new_set(&self) -> Self::Set;
}

pub(crate) struct Hashed;

impl<K: Hash + Eq + 'static> Membership<K> for Hashed {
    type Set = HashSet<K>;

    fn new_set(&self) -> HashSet<K> {
        HashSet::new()
    }
}

pub(crate) struct Scanned<K> {
    eq: EqualityComparer<K>,
}

impl<K> Scanned<K> {
    pub(crate) fn new<E>(eq: E) -> Self
    where
        E: Fn(&K, &K) -> bool + 'static,
    {
        Self { eq: Rc::new(eq) }
    }
}

impl<K: 'static> Membership<K> for Scanned<K> {
    type Set = ScanSet<K>;

    fn new_set(&self) -> ScanSet<K> {
        ScanSet {
            keys: Vec::new(),
            eq: Rc::clone(&self.eq),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scan_set_uses_comparer() {
        let scanned = Scanned::new(|a: &String, b: &String| a.eq_ignore_ascii_case(b));
        let mut set = scanned.new_set();
        assert!(set.insert("Rex".to_string()));
        assert!(!set.insert("REX".to_string()));
        assert!(set.contains(&"rex".to_string()));
        assert_eq!(set.len(), 1);
        assert!(set.remove(&"rEx".to_string()));
        assert!(!set.contains(&"Rex".to_string()));
    }

    #[test]
    fn test_hashed_insert_reports_novelty() {
        let mut set = Membership::<i32>::new_set(&Hashed);
        assert!(KeySet::insert(&mut set, 1));
        assert!(!KeySet::insert(&mut set, 1));
        assert_eq!(KeySet::len(&set), 1);
    }
}
