//! Grouping by key and eager lookups.

use std::collections::HashMap;
use std::hash::Hash;
use std::rc::Rc;

use lazyq_core::group::KeyGroup;
use lazyq_core::sequence::Seq;

pub trait Grouping<T: 'static> {
    /// Groups in order of each key's first occurrence; elements keep source
    /// order inside a group.
    fn group_by<K, F>(&self, key: F) -> Seq<KeyGroup<K, T>>
    where
        K: Hash + Eq + Clone + 'static,
        F: Fn(&T) -> K + 'static;

    /// Like [`Grouping::group_by`], matching keys with `eq` by linear scan.
    fn group_by_with<K, F, E>(&self, key: F, eq: E) -> Seq<KeyGroup<K, T>>
    where
        K: 'static,
        F: Fn(&T) -> K + 'static,
        E: Fn(&K, &K) -> bool + 'static;

    /// Drain the sequence now into a keyed lookup.
    fn to_lookup<K, F>(&self, key: F) -> Lookup<K, T>
    where
        K: Hash + Eq + Clone,
        F: Fn(&T) -> K;
}

fn hashed_groups<T, K>(items: impl Iterator<Item = T>, key: &dyn Fn(&T) -> K) -> Lookup<K, T>
where
    K: Hash + Eq + Clone,
{
    let mut index: HashMap<K, usize> = HashMap::new();
    let mut groups: Vec<KeyGroup<K, T>> = Vec::new();
    for item in items {
        let k = key(&item);
        let slot = *index.entry(k.clone()).or_insert_with(|| {
            groups.push(KeyGroup::new(k));
            groups.len() - 1
        });
        groups[slot].items.push(item);
    }
    Lookup { index, groups }
}

impl<T: 'static> Grouping<T> for Seq<T> {
    fn group_by<K, F>(&self, key: F) -> Seq<KeyGroup<K, T>>
    where
        K: Hash + Eq + Clone + 'static,
        F: Fn(&T) -> K + 'static,
    {
        let src = self.clone();
        Seq::from_fn(move || hashed_groups(src.cursor(), &key).groups)
    }

    fn group_by_with<K, F, E>(&self, key: F, eq: E) -> Seq<KeyGroup<K, T>>
    where
        K: 'static,
        F: Fn(&T) -> K + 'static,
        E: Fn(&K, &K) -> bool + 'static,
    {
        let src = self.clone();
        let eq = Rc::new(eq);
        Seq::from_fn(move || {
            let mut groups: Vec<KeyGroup<K, T>> = Vec::new();
            for item in src.cursor() {
                let k = key(&item);
                match groups.iter_mut().find(|group| eq(&group.key, &k)) {
                    Some(group) => group.items.push(item),
                    None => {
                        let mut group = KeyGroup::new(k);
                        group.items.push(item);
                        groups.push(group);
                    }
                }
            }
            groups
        })
    }

    fn to_lookup<K, F>(&self, key: F) -> Lookup<K, T>
    where
        K: Hash + Eq + Clone,
        F: Fn(&T) -> K,
    {
        hashed_groups(self.cursor(), &key)
    }
}

/// Materialized key groups with O(1) access by key.
#[derive(Debug, Clone)]
pub struct Lookup<K, T> {
    index: HashMap<K, usize>,
    groups: Vec<KeyGroup<K, T>>,
}

impl<K: Hash + Eq, T> Lookup<K, T> {
    /// Elements under `key`, in source order.
    pub fn get(&self, key: &K) -> Option<&[T]> {
        self.index.get(key).map(|&slot| self.groups[slot].items())
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.index.contains_key(key)
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Groups in first-occurrence order.
    pub fn iter(&self) -> std::slice::Iter<'_, KeyGroup<K, T>> {
        self.groups.iter()
    }

    pub fn into_groups(self) -> Vec<KeyGroup<K, T>> {
        self.groups
    }
}
