//! Multi-key stable ordering.
//!
//! `order_by` buffers the source on first advance, computes every key once,
//! and emits equal-key groups in key order. `then_by` on the resulting
//! [`OrderedSeq`] re-sorts inside each tied group only, so a chain of k
//! levels is a stable sort on the k-tuple of keys.

mod ordered;
mod partition;

pub use ordered::OrderedSeq;

use std::cmp::Ordering;

use lazyq_core::compare::default_compare;
use lazyq_core::sequence::Seq;

use ordered::level;

pub trait OrderBy<T: 'static> {
    fn order_by<K, F>(&self, key: F) -> OrderedSeq<T>
    where
        K: PartialOrd + 'static,
        F: Fn(&T) -> K + 'static;

    fn order_by_with<K, F, C>(&self, key: F, comparer: C) -> OrderedSeq<T>
    where
        K: 'static,
        F: Fn(&T) -> K + 'static,
        C: Fn(&K, &K) -> Ordering + 'static;

    /// Groups in descending key order; elements inside a group keep source
    /// order.
    fn order_by_descending<K, F>(&self, key: F) -> OrderedSeq<T>
    where
        K: PartialOrd + 'static,
        F: Fn(&T) -> K + 'static;

    fn order_by_descending_with<K, F, C>(&self, key: F, comparer: C) -> OrderedSeq<T>
    where
        K: 'static,
        F: Fn(&T) -> K + 'static,
        C: Fn(&K, &K) -> Ordering + 'static;
}

impl<T: 'static> OrderBy<T> for Seq<T> {
    fn order_by<K, F>(&self, key: F) -> OrderedSeq<T>
    where
        K: PartialOrd + 'static,
        F: Fn(&T) -> K + 'static,
    {
        self.order_by_with(key, |a: &K, b: &K| default_compare(a, b))
    }

    fn order_by_with<K, F, C>(&self, key: F, comparer: C) -> OrderedSeq<T>
    where
        K: 'static,
        F: Fn(&T) -> K + 'static,
        C: Fn(&K, &K) -> Ordering + 'static,
    {
        OrderedSeq::new(self.clone(), level(key, comparer, false))
    }

    fn order_by_descending<K, F>(&self, key: F) -> OrderedSeq<T>
    where
        K: PartialOrd + 'static,
        F: Fn(&T) -> K + 'static,
    {
        self.order_by_descending_with(key, |a: &K, b: &K| default_compare(a, b))
    }

    fn order_by_descending_with<K, F, C>(&self, key: F, comparer: C) -> OrderedSeq<T>
    where
        K: 'static,
        F: Fn(&T) -> K + 'static,
        C: Fn(&K, &K) -> Ordering + 'static,
    {
        OrderedSeq::new(self.clone(), level(key, comparer, true))
    }
}
