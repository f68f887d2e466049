//! Set algebra over a source and any number of other collections.
//!
//! Every operator comes in four forms:
//! - plain: the element is its own key, compared with `Hash + Eq`;
//! - `_by`: a key selector, keys compared with `Hash + Eq`;
//! - `_with`: an equality comparer on the element (linear scan);
//! - `_by_with`: a key selector plus an equality comparer on the key.
//!
//! A custom comparer is called as `eq(held, candidate)`: the key already in
//! the working set first, the key being tested or inserted second.
//!
//! Multi-source operators accept anything that iterates [`IntoSeq`] values,
//! for example `[other]` or `vec![a, b]`.

mod engine;
mod membership;

use std::hash::Hash;
use std::rc::Rc;

use lazyq_core::compare::KeySelector;
use lazyq_core::sequence::{IntoSeq, Seq};

use membership::{Hashed, Scanned};

pub trait SetAlgebra<T: 'static> {
    /// First occurrence of each element.
    fn distinct(&self) -> Seq<T>
    where
        T: Hash + Eq + Clone;

    fn distinct_by<K, F>(&self, key: F) -> Seq<T>
    where
        K: Hash + Eq + 'static,
        F: Fn(&T) -> K + 'static;

    fn distinct_with<E>(&self, eq: E) -> Seq<T>
    where
        T: Clone,
        E: Fn(&T, &T) -> bool + 'static;

    fn distinct_by_with<K, F, E>(&self, key: F, eq: E) -> Seq<T>
    where
        K: 'static,
        F: Fn(&T) -> K + 'static,
        E: Fn(&K, &K) -> bool + 'static;

    /// The source followed by every other collection, first occurrence wins.
    fn union<I, S>(&self, others: I) -> Seq<T>
    where
        T: Hash + Eq + Clone,
        I: IntoIterator<Item = S>,
        S: IntoSeq<T>;

    fn union_by<K, F, I, S>(&self, others: I, key: F) -> Seq<T>
    where
        K: Hash + Eq + 'static,
        F: Fn(&T) -> K + 'static,
        I: IntoIterator<Item = S>,
        S: IntoSeq<T>;

    fn union_with<E, I, S>(&self, others: I, eq: E) -> Seq<T>
    where
        T: Clone,
        E: Fn(&T, &T) -> bool + 'static,
        I: IntoIterator<Item = S>,
        S: IntoSeq<T>;

    fn union_by_with<K, F, E, I, S>(&self, others: I, key: F, eq: E) -> Seq<T>
    where
        K: 'static,
        F: Fn(&T) -> K + 'static,
        E: Fn(&K, &K) -> bool + 'static,
        I: IntoIterator<Item = S>,
        S: IntoSeq<T>;

    /// Source elements whose key occurs in every other collection. Each key
    /// is yielded at most once. With no other collections the source is
    /// returned unchanged.
    fn intersect<I, S>(&self, others: I) -> Seq<T>
    where
        T: Hash + Eq + Clone,
        I: IntoIterator<Item = S>,
        S: IntoSeq<T>;

    fn intersect_by<K, F, I, S>(&self, others: I, key: F) -> Seq<T>
    where
        K: Hash + Eq + 'static,
        F: Fn(&T) -> K + 'static,
        I: IntoIterator<Item = S>,
        S: IntoSeq<T>;

    fn intersect_with<E, I, S>(&self, others: I, eq: E) -> Seq<T>
    where
        T: Clone,
        E: Fn(&T, &T) -> bool + 'static,
        I: IntoIterator<Item = S>,
        S: IntoSeq<T>;

    fn intersect_by_with<K, F, E, I, S>(&self, others: I, key: F, eq: E) -> Seq<T>
    where
        K: 'static,
        F: Fn(&T) -> K + 'static,
        E: Fn(&K, &K) -> bool + 'static,
        I: IntoIterator<Item = S>,
        S: IntoSeq<T>;

    /// Distinct source elements whose key occurs in no other collection.
    fn except<I, S>(&self, others: I) -> Seq<T>
    where
        T: Hash + Eq + Clone,
        I: IntoIterator<Item = S>,
        S: IntoSeq<T>;

    fn except_by<K, F, I, S>(&self, others: I, key: F) -> Seq<T>
    where
        K: Hash + Eq + 'static,
        F: Fn(&T) -> K + 'static,
        I: IntoIterator<Item = S>,
        S: IntoSeq<T>;

    fn except_with<E, I, S>(&self, others: I, eq: E) -> Seq<T>
    where
        T: Clone,
        E: Fn(&T, &T) -> bool + 'static,
        I: IntoIterator<Item = S>,
        S: IntoSeq<T>;

    fn except_by_with<K, F, E, I, S>(&self, others: I, key: F, eq: E) -> Seq<T>
    where
        K: 'static,
        F: Fn(&T) -> K + 'static,
        E: Fn(&K, &K) -> bool + 'static,
        I: IntoIterator<Item = S>,
        S: IntoSeq<T>;

    /// Elements whose key occurs in exactly one of the collections
    /// (the source included), in first-occurrence order.
    fn xor<I, S>(&self, others: I) -> Seq<T>
    where
        T: Hash + Eq + Clone,
        I: IntoIterator<Item = S>,
        S: IntoSeq<T>;

    fn xor_by<K, F, I, S>(&self, others: I, key: F) -> Seq<T>
    where
        K: Hash + Eq + Clone + 'static,
        F: Fn(&T) -> K + 'static,
        I: IntoIterator<Item = S>,
        S: IntoSeq<T>;

    fn xor_with<E, I, S>(&self, others: I, eq: E) -> Seq<T>
    where
        T: Clone,
        E: Fn(&T, &T) -> bool + 'static,
        I: IntoIterator<Item = S>,
        S: IntoSeq<T>;

    fn xor_by_with<K, F, E, I, S>(&self, others: I, key: F, eq: E) -> Seq<T>
    where
        K: Clone + 'static,
        F: Fn(&T) -> K + 'static,
        E: Fn(&K, &K) -> bool + 'static,
        I: IntoIterator<Item = S>,
        S: IntoSeq<T>;
}

fn identity<T: Clone + 'static>() -> KeySelector<T, T> {
    Rc::new(|item: &T| item.clone())
}

fn selector<T, K, F>(key: F) -> KeySelector<T, K>
where
    F: Fn(&T) -> K + 'static,
{
    Rc::new(key)
}

fn collect_others<T, I, S>(others: I) -> Rc<[Seq<T>]>
where
    I: IntoIterator<Item = S>,
    S: IntoSeq<T>,
{
    others.into_iter().map(IntoSeq::into_seq).collect()
}

impl<T: 'static> SetAlgebra<T> for Seq<T> {
    fn distinct(&self) -> Seq<T>
    where
        T: Hash + Eq + Clone,
    {
        engine::distinct(self.clone(), identity(), Hashed)
    }

    fn distinct_by<K, F>(&self, key: F) -> Seq<T>
    where
        K: Hash + Eq + 'static,
        F: Fn(&T) -> K + 'static,
    {
        engine::distinct(self.clone(), selector(key), Hashed)
    }

    fn distinct_with<E>(&self, eq: E) -> Seq<T>
    where
        T: Clone,
        E: Fn(&T, &T) -> bool + 'static,
    {
        engine::distinct(self.clone(), identity(), Scanned::new(eq))
    }

    fn distinct_by_with<K, F, E>(&self, key: F, eq: E) -> Seq<T>
    where
        K: 'static,
        F: Fn(&T) -> K + 'static,
        E: Fn(&K, &K) -> bool + 'static,
    {
        engine::distinct(self.clone(), selector(key), Scanned::new(eq))
    }

    fn union<I, S>(&self, others: I) -> Seq<T>
    where
        T: Hash + Eq + Clone,
        I: IntoIterator<Item = S>,
        S: IntoSeq<T>,
    {
        engine::union(self.clone(), collect_others(others), identity(), Hashed)
    }

    fn union_by<K, F, I, S>(&self, others: I, key: F) -> Seq<T>
    where
        K: Hash + Eq + 'static,
        F: Fn(&T) -> K + 'static,
        I: IntoIterator<Item = S>,
        S: IntoSeq<T>,
    {
        engine::union(self.clone(), collect_others(others), selector(key), Hashed)
    }

    fn union_with<E, I, S>(&self, others: I, eq: E) -> Seq<T>
    where
        T: Clone,
        E: Fn(&T, &T) -> bool + 'static,
        I: IntoIterator<Item = S>,
        S: IntoSeq<T>,
    {
        engine::union(
            self.clone(),
            collect_others(others),
            identity(),
            Scanned::new(eq),
        )
    }

    fn union_by_with<K, F, E, I, S>(&self, others: I, key: F, eq: E) -> Seq<T>
    where
        K: 'static,
        F: Fn(&T) -> K + 'static,
        E: Fn(&K, &K) -> bool + 'static,
        I: IntoIterator<Item = S>,
        S: IntoSeq<T>,
    {
        engine::union(
            self.clone(),
            collect_others(others),
            selector(key),
            Scanned::new(eq),
        )
    }

    fn intersect<I, S>(&self, others: I) -> Seq<T>
    where
        T: Hash + Eq + Clone,
        I: IntoIterator<Item = S>,
        S: IntoSeq<T>,
    {
        engine::intersect(self.clone(), collect_others(others), identity(), Hashed)
    }

    fn intersect_by<K, F, I, S>(&self, others: I, key: F) -> Seq<T>
    where
        K: Hash + Eq + 'static,
        F: Fn(&T) -> K + 'static,
        I: IntoIterator<Item = S>,
        S: IntoSeq<T>,
    {
        engine::intersect(self.clone(), collect_others(others), selector(key), Hashed)
    }

    fn intersect_with<E, I, S>(&self, others: I, eq: E) -> Seq<T>
    where
        T: Clone,
        E: Fn(&T, &T) -> bool + 'static,
        I: IntoIterator<Item = S>,
        S: IntoSeq<T>,
    {
        engine::intersect(
            self.clone(),
            collect_others(others),
            identity(),
            Scanned::new(eq),
        )
    }

    fn intersect_by_with<K, F, E, I, S>(&self, others: I, key: F, eq: E) -> Seq<T>
    where
        K: 'static,
        F: Fn(&T) -> K + 'static,
        E: Fn(&K, &K) -> bool + 'static,
        I: IntoIterator<Item = S>,
        S: IntoSeq<T>,
    {
        engine::intersect(
            self.clone(),
            collect_others(others),
            selector(key),
            Scanned::new(eq),
        )
    }

    fn except<I, S>(&self, others: I) -> Seq<T>
    where
        T: Hash + Eq + Clone,
        I: IntoIterator<Item = S>,
        S: IntoSeq<T>,
    {
        engine::except(self.clone(), collect_others(others), identity(), Hashed)
    }

    fn except_by<K, F, I, S>(&self, others: I, key: F) -> Seq<T>
    where
        K: Hash + Eq + 'static,
        F: Fn(&T) -> K + 'static,
        I: IntoIterator<Item = S>,
        S: IntoSeq<T>,
    {
        engine::except(self.clone(), collect_others(others), selector(key), Hashed)
    }

    fn except_with<E, I, S>(&self, others: I, eq: E) -> Seq<T>
    where
        T: Clone,
        E: Fn(&T, &T) -> bool + 'static,
        I: IntoIterator<Item = S>,
        S: IntoSeq<T>,
    {
        engine::except(
            self.clone(),
            collect_others(others),
            identity(),
            Scanned::new(eq),
        )
    }

    fn except_by_with<K, F, E, I, S>(&self, others: I, key: F, eq: E) -> Seq<T>
    where
        K: 'static,
        F: Fn(&T) -> K + 'static,
        E: Fn(&K, &K) -> bool + 'static,
        I: IntoIterator<Item = S>,
        S: IntoSeq<T>,
    {
        engine::except(
            self.clone(),
            collect_others(others),
            selector(key),
            Scanned::new(eq),
        )
    }

    fn xor<I, S>(&self, others: I) -> Seq<T>
    where
        T: Hash + Eq + Clone,
        I: IntoIterator<Item = S>,
        S: IntoSeq<T>,
    {
        engine::xor(self.clone(), collect_others(others), identity(), Hashed)
    }

    fn xor_by<K, F, I, S>(&self, others: I, key: F) -> Seq<T>
    where
        K: Hash + Eq + Clone + 'static,
        F: Fn(&T) -> K + 'static,
        I: IntoIterator<Item = S>,
        S: IntoSeq<T>,
    {
        engine::xor(self.clone(), collect_others(others), selector(key), Hashed)
    }

    fn xor_with<E, I, S>(&self, others: I, eq: E) -> Seq<T>
    where
        T: Clone,
        E: Fn(&T, &T) -> bool + 'static,
        I: IntoIterator<Item = S>,
        S: IntoSeq<T>,
    {
        engine::xor(
            self.clone(),
            collect_others(others),
            identity(),
            Scanned::new(eq),
        )
    }

    fn xor_by_with<K, F, E, I, S>(&self, others: I, key: F, eq: E) -> Seq<T>
    where
        K: Clone + 'static,
        F: Fn(&T) -> K + 'static,
        E: Fn(&K, &K) -> bool + 'static,
        I: IntoIterator<Item = S>,
        S: IntoSeq<T>,
    {
        engine::xor(
            self.clone(),
            collect_others(others),
            selector(key),
            Scanned::new(eq),
        )
    }
}
