//! Terminal operations. Each call opens one cursor and drives it.
//!
//! Empty-sequence and cardinality violations come back as `Err`; the
//! `_or_none` forms return `None` instead.

use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};
use std::hash::Hash;
use std::ops::Add;

use lazyq_core::compare::default_compare;
use lazyq_core::error::{Error, Result};
use lazyq_core::sequence::Seq;

pub trait Consume<T: 'static> {
    fn to_vec(&self) -> Vec<T>;

    fn to_set(&self) -> HashSet<T>
    where
        T: Hash + Eq;

    /// Later elements overwrite earlier ones with an equal key.
    fn to_map<K, V, FK, FV>(&self, key: FK, value: FV) -> HashMap<K, V>
    where
        K: Hash + Eq,
        FK: Fn(&T) -> K,
        FV: Fn(T) -> V;

    /// O(1) on indexed sequences.
    fn count(&self) -> usize;

    fn count_where<P>(&self, predicate: P) -> usize
    where
        P: Fn(&T) -> bool;

    /// O(1) on indexed sequences.
    fn element_at(&self, index: usize) -> Result<T>;

    fn element_at_or_none(&self, index: usize) -> Option<T>;

    fn first(&self) -> Result<T>;

    fn first_or_none(&self) -> Option<T>;

    fn first_where<P>(&self, predicate: P) -> Result<T>
    where
        P: Fn(&T) -> bool;

    /// O(1) on indexed sequences.
    fn last(&self) -> Result<T>;

    fn last_or_none(&self) -> Option<T>;

    /// The only element; fails when empty or when a second element exists.
    fn single(&self) -> Result<T>;

    /// `Ok(None)` when empty; still fails on a second element.
    fn single_or_none(&self) -> Result<Option<T>>;

    fn any(&self) -> bool;

    fn any_where<P>(&self, predicate: P) -> bool
    where
        P: Fn(&T) -> bool;

    fn all<P>(&self, predicate: P) -> bool
    where
        P: Fn(&T) -> bool;

    fn contains(&self, value: &T) -> bool
    where
        T: PartialEq;

    /// Fold without a seed; the first element seeds the accumulator.
    fn aggregate<F>(&self, f: F) -> Result<T>
    where
        F: FnMut(T, T) -> T;

    fn fold<A, F>(&self, seed: A, f: F) -> A
    where
        F: FnMut(A, T) -> A;

    fn sum(&self) -> Result<T>
    where
        T: Add<Output = T>;

    fn average(&self) -> Result<f64>
    where
        T: Into<f64>;

    /// First minimal element under the default comparer.
    fn min(&self) -> Result<T>
    where
        T: PartialOrd;

    /// First maximal element under the default comparer.
    fn max(&self) -> Result<T>
    where
        T: PartialOrd;

    fn min_by_key<K, F>(&self, key: F) -> Result<T>
    where
        K: PartialOrd,
        F: Fn(&T) -> K;

    fn max_by_key<K, F>(&self, key: F) -> Result<T>
    where
        K: PartialOrd,
        F: Fn(&T) -> K;
}

impl<T: 'static> Consume<T> for Seq<T> {
    fn to_vec(&self) -> Vec<T> {
        self.cursor().collect()
    }

    fn to_set(&self) -> HashSet<T>
    where
        T: Hash + Eq,
    {
        self.cursor().collect()
    }

    fn to_map<K, V, FK, FV>(&self, key: FK, value: FV) -> HashMap<K, V>
    where
        K: Hash + Eq,
        FK: Fn(&T) -> K,
        FV: Fn(T) -> V,
    {
        self.cursor()
            .map(|item| (key(&item), value(item)))
            .collect()
    }

    fn count(&self) -> usize {
        match self.as_indexed() {
            Some(indexed) => indexed.len(),
            None => self.cursor().count(),
        }
    }

    fn count_where<P>(&self, predicate: P) -> usize
    where
        P: Fn(&T) -> bool,
    {
        self.cursor().filter(|item| predicate(item)).count()
    }

    fn element_at(&self, index: usize) -> Result<T> {
        if let Some(indexed) = self.as_indexed() {
            return indexed.get(index).ok_or(Error::IndexOutOfBounds {
                index,
                len: indexed.len(),
            });
        }
        let mut seen = 0;
        for item in self.cursor() {
            if seen == index {
                return Ok(item);
            }
            seen += 1;
        }
        Err(Error::IndexOutOfBounds { index, len: seen })
    }

    fn element_at_or_none(&self, index: usize) -> Option<T> {
        self.element_at(index).ok()
    }

    fn first(&self) -> Result<T> {
        self.cursor().next().ok_or(Error::empty("first"))
    }

    fn first_or_none(&self) -> Option<T> {
        self.cursor().next()
    }

    fn first_where<P>(&self, predicate: P) -> Result<T>
    where
        P: Fn(&T) -> bool,
    {
        self.cursor()
            .find(|item| predicate(item))
            .ok_or(Error::empty("first_where"))
    }

    fn last(&self) -> Result<T> {
        self.last_or_none().ok_or(Error::empty("last"))
    }

    fn last_or_none(&self) -> Option<T> {
        match self.as_indexed() {
            Some(indexed) => indexed.len().checked_sub(1).and_then(|i| indexed.get(i)),
            None => self.cursor().last(),
        }
    }

    fn single(&self) -> Result<T> {
        self.single_or_none()?.ok_or(Error::empty("single"))
    }

    fn single_or_none(&self) -> Result<Option<T>> {
        let mut cursor = self.cursor();
        let Some(first) = cursor.next() else {
            return Ok(None);
        };
        if cursor.next().is_some() {
            return Err(Error::Cardinality { op: "single" });
        }
        Ok(Some(first))
    }

    fn any(&self) -> bool {
        self.cursor().next().is_some()
    }

    fn any_where<P>(&self, predicate: P) -> bool
    where
        P: Fn(&T) -> bool,
    {
        self.cursor().any(|item| predicate(&item))
    }

    fn all<P>(&self, predicate: P) -> bool
    where
        P: Fn(&T) -> bool,
    {
        self.cursor().all(|item| predicate(&item))
    }

    fn contains(&self, value: &T) -> bool
    where
        T: PartialEq,
    {
        self.cursor().any(|item| &item == value)
    }

    fn aggregate<F>(&self, f: F) -> Result<T>
    where
        F: FnMut(T, T) -> T,
    {
        self.cursor().reduce(f).ok_or(Error::empty("aggregate"))
    }

    fn fold<A, F>(&self, seed: A, f: F) -> A
    where
        F: FnMut(A, T) -> A,
    {
        self.cursor().fold(seed, f)
    }

    fn sum(&self) -> Result<T>
    where
        T: Add<Output = T>,
    {
        self.cursor()
            .reduce(|acc, item| acc + item)
            .ok_or(Error::empty("sum"))
    }

    fn average(&self) -> Result<f64>
    where
        T: Into<f64>,
    {
        let (total, n) = self
            .cursor()
            .fold((0.0_f64, 0_usize), |(total, n), item| (total + item.into(), n + 1));
        if n == 0 {
            return Err(Error::empty("average"));
        }
        Ok(total / n as f64)
    }

    fn min(&self) -> Result<T>
    where
        T: PartialOrd,
    {
        extreme(self, Ordering::Less).ok_or(Error::empty("min"))
    }

    fn max(&self) -> Result<T>
    where
        T: PartialOrd,
    {
        extreme(self, Ordering::Greater).ok_or(Error::empty("max"))
    }

    fn min_by_key<K, F>(&self, key: F) -> Result<T>
    where
        K: PartialOrd,
        F: Fn(&T) -> K,
    {
        pick(self, key, Ordering::Less).ok_or(Error::empty("min_by_key"))
    }

    fn max_by_key<K, F>(&self, key: F) -> Result<T>
    where
        K: PartialOrd,
        F: Fn(&T) -> K,
    {
        pick(self, key, Ordering::Greater).ok_or(Error::empty("max_by_key"))
    }
}

/// First element whose key beats every earlier key in direction `wins`.
fn pick<T, K, F>(seq: &Seq<T>, key: F, wins: Ordering) -> Option<T>
where
    T: 'static,
    K: PartialOrd,
    F: Fn(&T) -> K,
{
    let mut best: Option<(K, T)> = None;
    for item in seq.cursor() {
        let k = key(&item);
        let replace = match &best {
            None => true,
            Some((best_key, _)) => default_compare(&k, best_key) == wins,
        };
        if replace {
            best = Some((k, item));
        }
    }
    best.map(|(_, item)| item)
}

fn extreme<T>(seq: &Seq<T>, wins: Ordering) -> Option<T>
where
    T: PartialOrd + 'static,
{
    seq.cursor().fold(None, |best, item| match best {
        Some(best) if default_compare(&item, &best) != wins => Some(best),
        _ => Some(item),
    })
}
