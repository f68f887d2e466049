//! Set operators over one source and N other collections, generic over
//! the membership strategy.
//!
//! `distinct`, `union` and `except` stream the source; `intersect` and
//! `except` read the other collections when the first element is pulled;
//! `xor` buffers everything before its first yield.

use std::rc::Rc;

use lazyq_core::compare::KeySelector;
use lazyq_core::sequence::Seq;

use super::membership::{KeySet, Membership};

fn key_set<T, K, M>(membership: &M, seq: &Seq<T>, key: &KeySelector<T, K>) -> M::Set
where
    T: 'static,
    M: Membership<K>,
{
    let mut set = membership.new_set();
    for item in seq.cursor() {
        set.insert(key(&item));
    }
    set
}

fn chained<T: 'static>(src: Seq<T>, others: Rc<[Seq<T>]>) -> Seq<T> {
    Seq::from_fn(move || {
        let others = Rc::clone(&others);
        let tail = (0..others.len()).flat_map(move |i| others[i].cursor());
        src.cursor().chain(tail)
    })
}

pub(crate) fn distinct<T, K, M>(src: Seq<T>, key: KeySelector<T, K>, membership: M) -> Seq<T>
where
    T: 'static,
    K: 'static,
    M: Membership<K>,
{
    Seq::from_fn(move || {
        let key = Rc::clone(&key);
        let mut seen = membership.new_set();
        src.cursor().filter(move |item| seen.insert(key(item)))
    })
}

pub(crate) fn union<T, K, M>(
    src: Seq<T>,
    others: Rc<[Seq<T>]>,
    key: KeySelector<T, K>,
    membership: M,
) -> Seq<T>
where
    T: 'static,
    K: 'static,
    M: Membership<K>,
{
    distinct(chained(src, others), key, membership)
}

pub(crate) fn intersect<T, K, M>(
    src: Seq<T>,
    others: Rc<[Seq<T>]>,
    key: KeySelector<T, K>,
    membership: M,
) -> Seq<T>
where
    T: 'static,
    K: 'static,
    M: Membership<K>,
{
    Seq::from_fn(move || {
        let mut sets: Vec<M::Set> = others
            .iter()
            .map(|other| key_set(&membership, other, &key))
            .collect();
        #[cfg(feature = "tracing")]
        tracing::trace!(collections = sets.len(), "intersect working sets built");
        // An empty working set can never match again.
        let exhausted = sets.iter().any(|set| set.len() == 0);
        let key = Rc::clone(&key);
        src.cursor()
            .take_while(move |_| !exhausted)
            .filter(move |item| {
                let k = key(item);
                if !sets.iter().all(|set| set.contains(&k)) {
                    return false;
                }
                for set in sets.iter_mut() {
                    set.remove(&k);
                }
                true
            })
    })
}

pub(crate) fn except<T, K, M>(
    src: Seq<T>,
    others: Rc<[Seq<T>]>,
    key: KeySelector<T, K>,
    membership: M,
) -> Seq<T>
where
    T: 'static,
    K: 'static,
    M: Membership<K>,
{
    Seq::from_fn(move || {
        let mut excluded = membership.new_set();
        for other in others.iter() {
            for item in other.cursor() {
                excluded.insert(key(&item));
            }
        }
        #[cfg(feature = "tracing")]
        tracing::trace!(excluded = excluded.len(), "except table built");
        let key = Rc::clone(&key);
        src.cursor().filter(move |item| excluded.insert(key(item)))
    })
}

/// Symmetric difference across the source and every other collection.
///
/// A key survives only if exactly one collection holds it; repeats inside
/// one collection count once. Survivors come out in first-occurrence order.
pub(crate) fn xor<T, K, M>(
    src: Seq<T>,
    others: Rc<[Seq<T>]>,
    key: KeySelector<T, K>,
    membership: M,
) -> Seq<T>
where
    T: 'static,
    K: Clone + 'static,
    M: Membership<K>,
{
    Seq::from_fn(move || {
        let mut once = membership.new_set();
        let mut dropped = membership.new_set();
        let mut candidates: Vec<(K, T)> = Vec::new();

        for collection in std::iter::once(&src).chain(others.iter()) {
            let mut local = membership.new_set();
            for item in collection.cursor() {
                let k = key(&item);
                if !local.insert(k.clone()) || dropped.contains(&k) {
                    continue;
                }
                if once.remove(&k) {
                    dropped.insert(k);
                } else {
                    once.insert(k.clone());
                    candidates.push((k, item));
                }
            }
        }
        #[cfg(feature = "tracing")]
        tracing::trace!(
            candidates = candidates.len(),
            survivors = once.len(),
            "xor table built"
        );

        candidates
            .into_iter()
            .filter(|(k, _)| once.contains(k))
            .map(|(_, item)| item)
            .collect::<Vec<T>>()
    })
}
