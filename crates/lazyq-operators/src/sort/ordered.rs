use std::cmp::Ordering;
use std::ops::Deref;
use std::rc::Rc;

use lazyq_core::compare::{default_compare, Comparer, KeySelector};
use lazyq_core::sequence::{IntoSeq, Seq, SeqCursor};

use super::partition::{refiner, Refine};

/// Produces the equal-key groups of an ordering, in final order.
type Partitions<T> = Rc<dyn Fn() -> Vec<Vec<T>>>;

/// A sequence in key order that can be refined with secondary keys.
///
/// Besides the flattened `Seq` it keeps the partition producer, so each
/// `then_by` only re-sorts inside groups that are still tied.
pub struct OrderedSeq<T> {
    seq: Seq<T>,
    partitions: Partitions<T>,
}

impl<T> Clone for OrderedSeq<T> {
    fn clone(&self) -> Self {
        Self {
            seq: self.seq.clone(),
            partitions: Rc::clone(&self.partitions),
        }
    }
}

impl<T: 'static> OrderedSeq<T> {
    pub(crate) fn new(source: Seq<T>, refine: Refine<T>) -> Self {
        let partitions: Partitions<T> = Rc::new(move || {
            let items: Vec<T> = source.cursor().collect();
            if items.is_empty() {
                return Vec::new();
            }
            #[cfg(feature = "tracing")]
            let rows = items.len();
            let groups = refine(items);
            #[cfg(feature = "tracing")]
            tracing::trace!(rows, groups = groups.len(), "order_by partitioned");
            groups
        });
        Self::from_partitions(partitions)
    }

    fn from_partitions(partitions: Partitions<T>) -> Self {
        let producer = Rc::clone(&partitions);
        let seq = Seq::from_fn(move || producer().into_iter().flatten());
        Self { seq, partitions }
    }

    fn refine(&self, refine: Refine<T>) -> Self {
        let upstream = Rc::clone(&self.partitions);
        let partitions: Partitions<T> = Rc::new(move || {
            let mut out = Vec::new();
            for group in upstream() {
                // A singleton is already in final position.
                if group.len() < 2 {
                    out.push(group);
                } else {
                    out.extend(refine(group));
                }
            }
            out
        });
        Self::from_partitions(partitions)
    }

    pub fn then_by<K, F>(&self, key: F) -> Self
    where
        K: PartialOrd + 'static,
        F: Fn(&T) -> K + 'static,
    {
        self.then_by_with(key, |a: &K, b: &K| default_compare(a, b))
    }

    pub fn then_by_with<K, F, C>(&self, key: F, comparer: C) -> Self
    where
        K: 'static,
        F: Fn(&T) -> K + 'static,
        C: Fn(&K, &K) -> Ordering + 'static,
    {
        self.refine(level(key, comparer, false))
    }

    pub fn then_by_descending<K, F>(&self, key: F) -> Self
    where
        K: PartialOrd + 'static,
        F: Fn(&T) -> K + 'static,
    {
        self.then_by_descending_with(key, |a: &K, b: &K| default_compare(a, b))
    }

    pub fn then_by_descending_with<K, F, C>(&self, key: F, comparer: C) -> Self
    where
        K: 'static,
        F: Fn(&T) -> K + 'static,
        C: Fn(&K, &K) -> Ordering + 'static,
    {
        self.refine(level(key, comparer, true))
    }

    /// The tied groups at the current refinement level, in final order.
    pub fn partitions(&self) -> Seq<Vec<T>> {
        let partitions = Rc::clone(&self.partitions);
        Seq::from_fn(move || partitions())
    }

    pub fn as_seq(&self) -> &Seq<T> {
        &self.seq
    }
}

pub(crate) fn level<T, K, F, C>(key: F, comparer: C, descending: bool) -> Refine<T>
where
    T: 'static,
    K: 'static,
    F: Fn(&T) -> K + 'static,
    C: Fn(&K, &K) -> Ordering + 'static,
{
    let key: KeySelector<T, K> = Rc::new(key);
    let cmp: Comparer<K> = Rc::new(comparer);
    refiner(key, cmp, descending)
}

impl<T> Deref for OrderedSeq<T> {
    type Target = Seq<T>;

    fn deref(&self) -> &Seq<T> {
        &self.seq
    }
}

impl<T> IntoSeq<T> for OrderedSeq<T> {
    fn into_seq(self) -> Seq<T> {
        self.seq
    }
}

impl<T: 'static> IntoIterator for &OrderedSeq<T> {
    type Item = T;
    type IntoIter = SeqCursor<T>;

    fn into_iter(self) -> SeqCursor<T> {
        self.seq.cursor()
    }
}
