//! Relational joins: inner, left, right and full, each with one shared key
//! selector (`_homogeneous`) or one selector per side (`_heterogeneous`),
//! plus `group_join`.
//!
//! Keys are hashed by default. The `_with` forms take an equality comparer
//! and scan the whole build side for every probe element. The comparer is
//! always called as `eq(outer_key, inner_key)`, whichever side probes.
//!
//! Probe-side order is preserved and matches follow build-side order. Left,
//! inner and full joins probe with the outer (`self`) side; right joins probe
//! with the inner side but still hand `both` its arguments as
//! `(outer, inner)`.

mod engine;
mod index;

use std::hash::Hash;
use std::rc::Rc;

use lazyq_core::compare::KeySelector;
use lazyq_core::sequence::{IntoSeq, Seq};

use engine::{Projection, Sides};
use index::{HashJoin, JoinStrategy, ScanJoin};

pub trait Join<T: 'static> {
    fn inner_join_homogeneous<K, R, S, FK, FB>(&self, inner: S, key: FK, both: FB) -> Seq<R>
    where
        T: Clone,
        K: Hash + Eq + 'static,
        R: 'static,
        S: IntoSeq<T>,
        FK: Fn(&T) -> K + 'static,
        FB: Fn(T, T) -> R + 'static;

    fn inner_join_homogeneous_with<K, R, S, FK, FB, E>(
        &self,
        inner: S,
        key: FK,
        both: FB,
        eq: E,
    ) -> Seq<R>
    where
        T: Clone,
        K: 'static,
        R: 'static,
        S: IntoSeq<T>,
        FK: Fn(&T) -> K + 'static,
        FB: Fn(T, T) -> R + 'static,
        E: Fn(&K, &K) -> bool + 'static;

    fn inner_join_heterogeneous<U, K, R, S, FO, FI, FB>(
        &self,
        inner: S,
        outer_key: FO,
        inner_key: FI,
        both: FB,
    ) -> Seq<R>
    where
        T: Clone,
        U: Clone + 'static,
        K: Hash + Eq + 'static,
        R: 'static,
        S: IntoSeq<U>,
        FO: Fn(&T) -> K + 'static,
        FI: Fn(&U) -> K + 'static,
        FB: Fn(T, U) -> R + 'static;

    #[allow(clippy::too_many_arguments)]
    fn inner_join_heterogeneous_with<U, K, R, S, FO, FI, FB, E>(
        &self,
        inner: S,
        outer_key: FO,
        inner_key: FI,
        both: FB,
        eq: E,
    ) -> Seq<R>
    where
        T: Clone,
        U: Clone + 'static,
        K: 'static,
        R: 'static,
        S: IntoSeq<U>,
        FO: Fn(&T) -> K + 'static,
        FI: Fn(&U) -> K + 'static,
        FB: Fn(T, U) -> R + 'static,
        E: Fn(&K, &K) -> bool + 'static;

    /// Every outer element at least once: once per match, or once through
    /// `left_only` when nothing matches.
    fn left_join_homogeneous<K, R, S, FK, FB, FL>(
        &self,
        inner: S,
        key: FK,
        both: FB,
        left_only: FL,
    ) -> Seq<R>
    where
        T: Clone,
        K: Hash + Eq + 'static,
        R: 'static,
        S: IntoSeq<T>,
        FK: Fn(&T) -> K + 'static,
        FB: Fn(T, T) -> R + 'static,
        FL: Fn(T) -> R + 'static;

    fn left_join_homogeneous_with<K, R, S, FK, FB, FL, E>(
        &self,
        inner: S,
        key: FK,
        both: FB,
        left_only: FL,
        eq: E,
    ) -> Seq<R>
    where
        T: Clone,
        K: 'static,
        R: 'static,
        S: IntoSeq<T>,
        FK: Fn(&T) -> K + 'static,
        FB: Fn(T, T) -> R + 'static,
        FL: Fn(T) -> R + 'static,
        E: Fn(&K, &K) -> bool + 'static;

    fn left_join_heterogeneous<U, K, R, S, FO, FI, FB, FL>(
        &self,
        inner: S,
        outer_key: FO,
        inner_key: FI,
        both: FB,
        left_only: FL,
    ) -> Seq<R>
    where
        T: Clone,
        U: Clone + 'static,
        K: Hash + Eq + 'static,
        R: 'static,
        S: IntoSeq<U>,
        FO: Fn(&T) -> K + 'static,
        FI: Fn(&U) -> K + 'static,
        FB: Fn(T, U) -> R + 'static,
        FL: Fn(T) -> R + 'static;

    #[allow(clippy::too_many_arguments)]
    fn left_join_heterogeneous_with<U, K, R, S, FO, FI, FB, FL, E>(
        &self,
        inner: S,
        outer_key: FO,
        inner_key: FI,
        both: FB,
        left_only: FL,
        eq: E,
    ) -> Seq<R>
    where
        T: Clone,
        U: Clone + 'static,
        K: 'static,
        R: 'static,
        S: IntoSeq<U>,
        FO: Fn(&T) -> K + 'static,
        FI: Fn(&U) -> K + 'static,
        FB: Fn(T, U) -> R + 'static,
        FL: Fn(T) -> R + 'static,
        E: Fn(&K, &K) -> bool + 'static;

    /// Every inner element at least once, in inner order.
    fn right_join_homogeneous<K, R, S, FK, FB, FR>(
        &self,
        inner: S,
        key: FK,
        both: FB,
        right_only: FR,
    ) -> Seq<R>
    where
        T: Clone,
        K: Hash + Eq + 'static,
        R: 'static,
        S: IntoSeq<T>,
        FK: Fn(&T) -> K + 'static,
        FB: Fn(T, T) -> R + 'static,
        FR: Fn(T) -> R + 'static;

    fn right_join_homogeneous_with<K, R, S, FK, FB, FR, E>(
        &self,
        inner: S,
        key: FK,
        both: FB,
        right_only: FR,
        eq: E,
    ) -> Seq<R>
    where
        T: Clone,
        K: 'static,
        R: 'static,
        S: IntoSeq<T>,
        FK: Fn(&T) -> K + 'static,
        FB: Fn(T, T) -> R + 'static,
        FR: Fn(T) -> R + 'static,
        E: Fn(&K, &K) -> bool + 'static;

    fn right_join_heterogeneous<U, K, R, S, FO, FI, FB, FR>(
        &self,
        inner: S,
        outer_key: FO,
        inner_key: FI,
        both: FB,
        right_only: FR,
    ) -> Seq<R>
    where
        T: Clone,
        U: Clone + 'static,
        K: Hash + Eq + 'static,
        R: 'static,
        S: IntoSeq<U>,
        FO: Fn(&T) -> K + 'static,
        FI: Fn(&U) -> K + 'static,
        FB: Fn(T, U) -> R + 'static,
        FR: Fn(U) -> R + 'static;

    #[allow(clippy::too_many_arguments)]
    fn right_join_heterogeneous_with<U, K, R, S, FO, FI, FB, FR, E>(
        &self,
        inner: S,
        outer_key: FO,
        inner_key: FI,
        both: FB,
        right_only: FR,
        eq: E,
    ) -> Seq<R>
    where
        T: Clone,
        U: Clone + 'static,
        K: 'static,
        R: 'static,
        S: IntoSeq<U>,
        FO: Fn(&T) -> K + 'static,
        FI: Fn(&U) -> K + 'static,
        FB: Fn(T, U) -> R + 'static,
        FR: Fn(U) -> R + 'static,
        E: Fn(&K, &K) -> bool + 'static;

    /// Matched pairs and unmatched outer elements in outer order, then the
    /// inner elements that never matched, in inner order.
    #[allow(clippy::too_many_arguments)]
    fn full_join_homogeneous<K, R, S, FK, FB, FL, FR>(
        &self,
        inner: S,
        key: FK,
        both: FB,
        left_only: FL,
        right_only: FR,
    ) -> Seq<R>
    where
        T: Clone,
        K: Hash + Eq + 'static,
        R: 'static,
        S: IntoSeq<T>,
        FK: Fn(&T) -> K + 'static,
        FB: Fn(T, T) -> R + 'static,
        FL: Fn(T) -> R + 'static,
        FR: Fn(T) -> R + 'static;

    #[allow(clippy::too_many_arguments)]
    fn full_join_homogeneous_with<K, R, S, FK, FB, FL, FR, E>(
        &self,
        inner: S,
        key: FK,
        both: FB,
        left_only: FL,
        right_only: FR,
        eq: E,
    ) -> Seq<R>
    where
        T: Clone,
        K: 'static,
        R: 'static,
        S: IntoSeq<T>,
        FK: Fn(&T) -> K + 'static,
        FB: Fn(T, T) -> R + 'static,
        FL: Fn(T) -> R + 'static,
        FR: Fn(T) -> R + 'static,
        E: Fn(&K, &K) -> bool + 'static;

    #[allow(clippy::too_many_arguments)]
    fn full_join_heterogeneous<U, K, R, S, FO, FI, FB, FL, FR>(
        &self,
        inner: S,
        outer_key: FO,
        inner_key: FI,
        both: FB,
        left_only: FL,
        right_only: FR,
    ) -> Seq<R>
    where
        T: Clone,
        U: Clone + 'static,
        K: Hash + Eq + 'static,
        R: 'static,
        S: IntoSeq<U>,
        FO: Fn(&T) -> K + 'static,
        FI: Fn(&U) -> K + 'static,
        FB: Fn(T, U) -> R + 'static,
        FL: Fn(T) -> R + 'static,
        FR: Fn(U) -> R + 'static;

    #[allow(clippy::too_many_arguments)]
    fn full_join_heterogeneous_with<U, K, R, S, FO, FI, FB, FL, FR, E>(
        &self,
        inner: S,
        outer_key: FO,
        inner_key: FI,
        both: FB,
        left_only: FL,
        right_only: FR,
        eq: E,
    ) -> Seq<R>
    where
        T: Clone,
        U: Clone + 'static,
        K: 'static,
        R: 'static,
        S: IntoSeq<U>,
        FO: Fn(&T) -> K + 'static,
        FI: Fn(&U) -> K + 'static,
        FB: Fn(T, U) -> R + 'static,
        FL: Fn(T) -> R + 'static,
        FR: Fn(U) -> R + 'static,
        E: Fn(&K, &K) -> bool + 'static;

    /// Every outer element with the (possibly empty) list of matching inner
    /// elements, in inner order.
    fn group_join<U, K, R, S, FO, FI, FG>(
        &self,
        inner: S,
        outer_key: FO,
        inner_key: FI,
        result: FG,
    ) -> Seq<R>
    where
        U: Clone + 'static,
        K: Hash + Eq + 'static,
        R: 'static,
        S: IntoSeq<U>,
        FO: Fn(&T) -> K + 'static,
        FI: Fn(&U) -> K + 'static,
        FG: Fn(T, Vec<U>) -> R + 'static;

    #[allow(clippy::too_many_arguments)]
    fn group_join_with<U, K, R, S, FO, FI, FG, E>(
        &self,
        inner: S,
        outer_key: FO,
        inner_key: FI,
        result: FG,
        eq: E,
    ) -> Seq<R>
    where
        U: Clone + 'static,
        K: 'static,
        R: 'static,
        S: IntoSeq<U>,
        FO: Fn(&T) -> K + 'static,
        FI: Fn(&U) -> K + 'static,
        FG: Fn(T, Vec<U>) -> R + 'static,
        E: Fn(&K, &K) -> bool + 'static;
}

/// One key selector shared by both sides of a homogeneous join.
fn shared_key<T, K, F>(key: F) -> (KeySelector<T, K>, KeySelector<T, K>)
where
    F: Fn(&T) -> K + 'static,
{
    let key: KeySelector<T, K> = Rc::new(key);
    (Rc::clone(&key), key)
}

fn outer_probe<T, U, K>(
    outer: &Seq<T>,
    inner: Seq<U>,
    outer_key: KeySelector<T, K>,
    inner_key: KeySelector<U, K>,
) -> Sides<T, U, K> {
    Sides {
        probe: outer.clone(),
        build: inner,
        probe_key: outer_key,
        build_key: inner_key,
    }
}

fn inner_probe<T, U, K>(
    outer: &Seq<T>,
    inner: Seq<U>,
    outer_key: KeySelector<T, K>,
    inner_key: KeySelector<U, K>,
) -> Sides<U, T, K> {
    Sides {
        probe: inner,
        build: outer.clone(),
        probe_key: inner_key,
        build_key: outer_key,
    }
}

fn inner_join<T, U, K, R, J>(sides: Sides<T, U, K>, both: Rc<dyn Fn(T, U) -> R>, strategy: J) -> Seq<R>
where
    T: Clone + 'static,
    U: Clone + 'static,
    K: 'static,
    R: 'static,
    J: JoinStrategy<K>,
{
    let projection = Projection::matched(move |o: T, i: U| both(o, i));
    engine::probe_join(sides, projection, strategy)
}

fn left_join<T, U, K, R, J>(
    sides: Sides<T, U, K>,
    both: Rc<dyn Fn(T, U) -> R>,
    left_only: Rc<dyn Fn(T) -> R>,
    strategy: J,
) -> Seq<R>
where
    T: Clone + 'static,
    U: Clone + 'static,
    K: 'static,
    R: 'static,
    J: JoinStrategy<K>,
{
    let projection =
        Projection::matched(move |o: T, i: U| both(o, i)).or_probe(move |o: T| left_only(o));
    engine::probe_join(sides, projection, strategy)
}

fn right_join<T, U, K, R, J>(
    sides: Sides<U, T, K>,
    both: Rc<dyn Fn(T, U) -> R>,
    right_only: Rc<dyn Fn(U) -> R>,
    strategy: J,
) -> Seq<R>
where
    T: Clone + 'static,
    U: Clone + 'static,
    K: 'static,
    R: 'static,
    J: JoinStrategy<K>,
{
    // Probe is the inner side; restore (outer, inner) argument order.
    let projection =
        Projection::matched(move |i: U, o: T| both(o, i)).or_probe(move |i: U| right_only(i));
    engine::probe_join(sides, projection, strategy)
}

fn full_join<T, U, K, R, J>(
    sides: Sides<T, U, K>,
    both: Rc<dyn Fn(T, U) -> R>,
    left_only: Rc<dyn Fn(T) -> R>,
    right_only: Rc<dyn Fn(U) -> R>,
    strategy: J,
) -> Seq<R>
where
    T: Clone + 'static,
    U: Clone + 'static,
    K: 'static,
    R: 'static,
    J: JoinStrategy<K>,
{
    let projection = Projection::matched(move |o: T, i: U| both(o, i))
        .or_probe(move |o: T| left_only(o))
        .or_build(move |i: U| right_only(i));
    engine::probe_join(sides, projection, strategy)
}

fn group_join<T, U, K, R, J>(
    sides: Sides<T, U, K>,
    result: Rc<dyn Fn(T, Vec<U>) -> R>,
    strategy: J,
) -> Seq<R>
where
    T: 'static,
    U: Clone + 'static,
    K: 'static,
    R: 'static,
    J: JoinStrategy<K>,
{
    engine::group_probe(sides, result, strategy)
}

impl<T: 'static> Join<T> for Seq<T> {
    fn inner_join_homogeneous<K, R, S, FK, FB>(&self, inner: S, key: FK, both: FB) -> Seq<R>
    where
        T: Clone,
        K: Hash + Eq + 'static,
        R: 'static,
        S: IntoSeq<T>,
        FK: Fn(&T) -> K + 'static,
        FB: Fn(T, T) -> R + 'static,
    {
        let (outer_key, inner_key) = shared_key(key);
        let sides = outer_probe(self, inner.into_seq(), outer_key, inner_key);
        inner_join(sides, Rc::new(both), HashJoin)
    }

    fn inner_join_homogeneous_with<K, R, S, FK, FB, E>(
        &self,
        inner: S,
        key: FK,
        both: FB,
        eq: E,
    ) -> Seq<R>
    where
        T: Clone,
        K: 'static,
        R: 'static,
        S: IntoSeq<T>,
        FK: Fn(&T) -> K + 'static,
        FB: Fn(T, T) -> R + 'static,
        E: Fn(&K, &K) -> bool + 'static,
    {
        let (outer_key, inner_key) = shared_key(key);
        let sides = outer_probe(self, inner.into_seq(), outer_key, inner_key);
        inner_join(sides, Rc::new(both), ScanJoin::new(eq))
    }

    fn inner_join_heterogeneous<U, K, R, S, FO, FI, FB>(
        &self,
        inner: S,
        outer_key: FO,
        inner_key: FI,
        both: FB,
    ) -> Seq<R>
    where
        T: Clone,
        U: Clone + 'static,
        K: Hash + Eq + 'static,
        R: 'static,
        S: IntoSeq<U>,
        FO: Fn(&T) -> K + 'static,
        FI: Fn(&U) -> K + 'static,
        FB: Fn(T, U) -> R + 'static,
    {
        let sides = outer_probe(self, inner.into_seq(), Rc::new(outer_key), Rc::new(inner_key));
        inner_join(sides, Rc::new(both), HashJoin)
    }

    fn inner_join_heterogeneous_with<U, K, R, S, FO, FI, FB, E>(
        &self,
        inner: S,
        outer_key: FO,
        inner_key: FI,
        both: FB,
        eq: E,
    ) -> Seq<R>
    where
        T: Clone,
        U: Clone + 'static,
        K: 'static,
        R: 'static,
        S: IntoSeq<U>,
        FO: Fn(&T) -> K + 'static,
        FI: Fn(&U) -> K + 'static,
        FB: Fn(T, U) -> R + 'static,
        E: Fn(&K, &K) -> bool + 'static,
    {
        let sides = outer_probe(self, inner.into_seq(), Rc::new(outer_key), Rc::new(inner_key));
        inner_join(sides, Rc::new(both), ScanJoin::new(eq))
    }

    fn left_join_homogeneous<K, R, S, FK, FB, FL>(
        &self,
        inner: S,
        key: FK,
        both: FB,
        left_only: FL,
    ) -> Seq<R>
    where
        T: Clone,
        K: Hash + Eq + 'static,
        R: 'static,
        S: IntoSeq<T>,
        FK: Fn(&T) -> K + 'static,
        FB: Fn(T, T) -> R + 'static,
        FL: Fn(T) -> R + 'static,
    {
        let (outer_key, inner_key) = shared_key(key);
        let sides = outer_probe(self, inner.into_seq(), outer_key, inner_key);
        left_join(sides, Rc::new(both), Rc::new(left_only), HashJoin)
    }

    fn left_join_homogeneous_with<K, R, S, FK, FB, FL, E>(
        &self,
        inner: S,
        key: FK,
        both: FB,
        left_only: FL,
        eq: E,
    ) -> Seq<R>
    where
        T: Clone,
        K: 'static,
        R: 'static,
        S: IntoSeq<T>,
        FK: Fn(&T) -> K + 'static,
        FB: Fn(T, T) -> R + 'static,
        FL: Fn(T) -> R + 'static,
        E: Fn(&K, &K) -> bool + 'static,
    {
        let (outer_key, inner_key) = shared_key(key);
        let sides = outer_probe(self, inner.into_seq(), outer_key, inner_key);
        left_join(sides, Rc::new(both), Rc::new(left_only), ScanJoin::new(eq))
    }

    fn left_join_heterogeneous<U, K, R, S, FO, FI, FB, FL>(
        &self,
        inner: S,
        outer_key: FO,
        inner_key: FI,
        both: FB,
        left_only: FL,
    ) -> Seq<R>
    where
        T: Clone,
        U: Clone + 'static,
        K: Hash + Eq + 'static,
        R: 'static,
        S: IntoSeq<U>,
        FO: Fn(&T) -> K + 'static,
        FI: Fn(&U) -> K + 'static,
        FB: Fn(T, U) -> R + 'static,
        FL: Fn(T) -> R + 'static,
    {
        let sides = outer_probe(self, inner.into_seq(), Rc::new(outer_key), Rc::new(inner_key));
        left_join(sides, Rc::new(both), Rc::new(left_only), HashJoin)
    }

    fn left_join_heterogeneous_with<U, K, R, S, FO, FI, FB, FL, E>(
        &self,
        inner: S,
        outer_key: FO,
        inner_key: FI,
        both: FB,
        left_only: FL,
        eq: E,
    ) -> Seq<R>
    where
        T: Clone,
        U: Clone + 'static,
        K: 'static,
        R: 'static,
        S: IntoSeq<U>,
        FO: Fn(&T) -> K + 'static,
        FI: Fn(&U) -> K + 'static,
        FB: Fn(T, U) -> R + 'static,
        FL: Fn(T) -> R + 'static,
        E: Fn(&K, &K) -> bool + 'static,
    {
        let sides = outer_probe(self, inner.into_seq(), Rc::new(outer_key), Rc::new(inner_key));
        left_join(sides, Rc::new(both), Rc::new(left_only), ScanJoin::new(eq))
    }

    fn right_join_homogeneous<K, R, S, FK, FB, FR>(
        &self,
        inner: S,
        key: FK,
        both: FB,
        right_only: FR,
    ) -> Seq<R>
    where
        T: Clone,
        K: Hash + Eq + 'static,
        R: 'static,
        S: IntoSeq<T>,
        FK: Fn(&T) -> K + 'static,
        FB: Fn(T, T) -> R + 'static,
        FR: Fn(T) -> R + 'static,
    {
        let (outer_key, inner_key) = shared_key(key);
        let sides = inner_probe(self, inner.into_seq(), outer_key, inner_key);
        right_join(sides, Rc::new(both), Rc::new(right_only), HashJoin)
    }

    fn right_join_homogeneous_with<K, R, S, FK, FB, FR, E>(
        &self,
        inner: S,
        key: FK,
        both: FB,
        right_only: FR,
        eq: E,
    ) -> Seq<R>
    where
        T: Clone,
        K: 'static,
        R: 'static,
        S: IntoSeq<T>,
        FK: Fn(&T) -> K + 'static,
        FB: Fn(T, T) -> R + 'static,
        FR: Fn(T) -> R + 'static,
        E: Fn(&K, &K) -> bool + 'static,
    {
        let (outer_key, inner_key) = shared_key(key);
        let sides = inner_probe(self, inner.into_seq(), outer_key, inner_key);
        right_join(sides, Rc::new(both), Rc::new(right_only), ScanJoin::outer_first(eq))
    }

    fn right_join_heterogeneous<U, K, R, S, FO, FI, FB, FR>(
        &self,
        inner: S,
        outer_key: FO,
        inner_key: FI,
        both: FB,
        right_only: FR,
    ) -> Seq<R>
    where
        T: Clone,
        U: Clone + 'static,
        K: Hash + Eq + 'static,
        R: 'static,
        S: IntoSeq<U>,
        FO: Fn(&T) -> K + 'static,
        FI: Fn(&U) -> K + 'static,
        FB: Fn(T, U) -> R + 'static,
        FR: Fn(U) -> R + 'static,
    {
        let sides = inner_probe(self, inner.into_seq(), Rc::new(outer_key), Rc::new(inner_key));
        right_join(sides, Rc::new(both), Rc::new(right_only), HashJoin)
    }

    fn right_join_heterogeneous_with<U, K, R, S, FO, FI, FB, FR, E>(
        &self,
        inner: S,
        outer_key: FO,
        inner_key: FI,
        both: FB,
        right_only: FR,
        eq: E,
    ) -> Seq<R>
    where
        T: Clone,
        U: Clone + 'static,
        K: 'static,
        R: 'static,
        S: IntoSeq<U>,
        FO: Fn(&T) -> K + 'static,
        FI: Fn(&U) -> K + 'static,
        FB: Fn(T, U) -> R + 'static,
        FR: Fn(U) -> R + 'static,
        E: Fn(&K, &K) -> bool + 'static,
    {
        let sides = inner_probe(self, inner.into_seq(), Rc::new(outer_key), Rc::new(inner_key));
        right_join(sides, Rc::new(both), Rc::new(right_only), ScanJoin::outer_first(eq))
    }

    fn full_join_homogeneous<K, R, S, FK, FB, FL, FR>(
        &self,
        inner: S,
        key: FK,
        both: FB,
        left_only: FL,
        right_only: FR,
    ) -> Seq<R>
    where
        T: Clone,
        K: Hash + Eq + 'static,
        R: 'static,
        S: IntoSeq<T>,
        FK: Fn(&T) -> K + 'static,
        FB: Fn(T, T) -> R + 'static,
        FL: Fn(T) -> R + 'static,
        FR: Fn(T) -> R + 'static,
    {
        let (outer_key, inner_key) = shared_key(key);
        let sides = outer_probe(self, inner.into_seq(), outer_key, inner_key);
        full_join(
            sides,
            Rc::new(both),
            Rc::new(left_only),
            Rc::new(right_only),
            HashJoin,
        )
    }

    fn full_join_homogeneous_with<K, R, S, FK, FB, FL, FR, E>(
        &self,
        inner: S,
        key: FK,
        both: FB,
        left_only: FL,
        right_only: FR,
        eq: E,
    ) -> Seq<R>
    where
        T: Clone,
        K: 'static,
        R: 'static,
        S: IntoSeq<T>,
        FK: Fn(&T) -> K + 'static,
        FB: Fn(T, T) -> R + 'static,
        FL: Fn(T) -> R + 'static,
        FR: Fn(T) -> R + 'static,
        E: Fn(&K, &K) -> bool + 'static,
    {
        let (outer_key, inner_key) = shared_key(key);
        let sides = outer_probe(self, inner.into_seq(), outer_key, inner_key);
        full_join(
            sides,
            Rc::new(both),
            Rc::new(left_only),
            Rc::new(right_only),
            ScanJoin::new(eq),
        )
    }

    fn full_join_heterogeneous<U, K, R, S, FO, FI, FB, FL, FR>(
        &self,
        inner: S,
        outer_key: FO,
        inner_key: FI,
        both: FB,
        left_only: FL,
        right_only: FR,
    ) -> Seq<R>
    where
        T: Clone,
        U: Clone + 'static,
        K: Hash + Eq + 'static,
        R: 'static,
        S: IntoSeq<U>,
        FO: Fn(&T) -> K + 'static,
        FI: Fn(&U) -> K + 'static,
        FB: Fn(T, U) -> R + 'static,
        FL: Fn(T) -> R + 'static,
        FR: Fn(U) -> R + 'static,
    {
        let sides = outer_probe(self, inner.into_seq(), Rc::new(outer_key), Rc::new(inner_key));
        full_join(
            sides,
            Rc::new(both),
            Rc::new(left_only),
            Rc::new(right_only),
            HashJoin,
        )
    }

    fn full_join_heterogeneous_with<U, K, R, S, FO, FI, FB, FL, FR, E>(
        &self,
        inner: S,
        outer_key: FO,
        inner_key: FI,
        both: FB,
        left_only: FL,
        right_only: FR,
        eq: E,
    ) -> Seq<R>
    where
        T: Clone,
        U: Clone + 'static,
        K: 'static,
        R: 'static,
        S: IntoSeq<U>,
        FO: Fn(&T) -> K + 'static,
        FI: Fn(&U) -> K + 'static,
        FB: Fn(T, U) -> R + 'static,
        FL: Fn(T) -> R + 'static,
        FR: Fn(U) -> R + 'static,
        E: Fn(&K, &K) -> bool + 'static,
    {
        let sides = outer_probe(self, inner.into_seq(), Rc::new(outer_key), Rc::new(inner_key));
        full_join(
            sides,
            Rc::new(both),
            Rc::new(left_only),
            Rc::new(right_only),
            ScanJoin::new(eq),
        )
    }

    fn group_join<U, K, R, S, FO, FI, FG>(
        &self,
        inner: S,
        outer_key: FO,
        inner_key: FI,
        result: FG,
    ) -> Seq<R>
    where
        U: Clone + 'static,
        K: Hash + Eq + 'static,
        R: 'static,
        S: IntoSeq<U>,
        FO: Fn(&T) -> K + 'static,
        FI: Fn(&U) -> K + 'static,
        FG: Fn(T, Vec<U>) -> R + 'static,
    {
        let sides = outer_probe(self, inner.into_seq(), Rc::new(outer_key), Rc::new(inner_key));
        group_join(sides, Rc::new(result), HashJoin)
    }

    fn group_join_with<U, K, R, S, FO, FI, FG, E>(
        &self,
        inner: S,
        outer_key: FO,
        inner_key: FI,
        result: FG,
        eq: E,
    ) -> Seq<R>
    where
        U: Clone + 'static,
        K: 'static,
        R: 'static,
        S: IntoSeq<U>,
        FO: Fn(&T) -> K + 'static,
        FI: Fn(&U) -> K + 'static,
        FG: Fn(T, Vec<U>) -> R + 'static,
        E: Fn(&K, &K) -> bool + 'static,
    {
        let sides = outer_probe(self, inner.into_seq(), Rc::new(outer_key), Rc::new(inner_key));
        group_join(sides, Rc::new(result), ScanJoin::new(eq))
    }
}
