//! Probe/build join execution.
//!
//! On the first pull the build side is drained into a vector and indexed.
//! The probe side then streams: each probe element yields one projection
//! per build match, in build order, or its probe-only projection when it
//! has none. Build elements never matched are emitted last, in build
//! order, when a build-only projection is present.

use std::rc::Rc;

use lazyq_core::compare::KeySelector;
use lazyq_core::sequence::{Seq, SeqCursor};

use super::index::{JoinIndex, JoinStrategy};

/// Result projections for the probe/build sides of one join.
pub(crate) struct Projection<P, B, R> {
    both: Rc<dyn Fn(P, B) -> R>,
    probe_only: Option<Rc<dyn Fn(P) -> R>>,
    build_only: Option<Rc<dyn Fn(B) -> R>>,
}

impl<P, B, R> Clone for Projection<P, B, R> {
    fn clone(&self) -> Self {
        Self {
            both: Rc::clone(&self.both),
            probe_only: self.probe_only.clone(),
            build_only: self.build_only.clone(),
        }
    }
}

impl<P, B, R> Projection<P, B, R> {
    pub(crate) fn matched<F>(both: F) -> Self
    where
        F: Fn(P, B) -> R + 'static,
    {
        Self {
            both: Rc::new(both),
            probe_only: None,
            build_only: None,
        }
    }

    pub(crate) fn or_probe<F>(mut self, probe_only: F) -> Self
    where
        F: Fn(P) -> R + 'static,
    {
        self.probe_only = Some(Rc::new(probe_only));
        self
    }

    pub(crate) fn or_build<F>(mut self, build_only: F) -> Self
    where
        F: Fn(B) -> R + 'static,
    {
        self.build_only = Some(Rc::new(build_only));
        self
    }
}

/// The two sides of a join with their key selectors.
pub(crate) struct Sides<P, B, K> {
    pub(crate) probe: Seq<P>,
    pub(crate) build: Seq<B>,
    pub(crate) probe_key: KeySelector<P, K>,
    pub(crate) build_key: KeySelector<B, K>,
}

fn build_index<B, K, J>(build: &Seq<B>, key: &KeySelector<B, K>, strategy: &J) -> (Vec<B>, J::Index)
where
    B: 'static,
    J: JoinStrategy<K>,
{
    let rows: Vec<B> = build.cursor().collect();
    let keys: Vec<K> = rows.iter().map(|row| key(row)).collect();
    #[cfg(feature = "tracing")]
    tracing::trace!(rows = rows.len(), "join build side indexed");
    (rows, strategy.build(keys))
}

pub(crate) fn probe_join<P, B, K, R, J>(
    sides: Sides<P, B, K>,
    projection: Projection<P, B, R>,
    strategy: J,
) -> Seq<R>
where
    P: Clone + 'static,
    B: Clone + 'static,
    K: 'static,
    R: 'static,
    J: JoinStrategy<K>,
{
    Seq::from_fn(move || {
        let (rows, index) = build_index(&sides.build, &sides.build_key, &strategy);
        JoinCursor {
            probe: sides.probe.cursor(),
            probe_key: Rc::clone(&sides.probe_key),
            matched: vec![false; rows.len()],
            rows,
            index,
            projection: projection.clone(),
            active: None,
            scratch: Vec::new(),
            probe_done: false,
            tail: 0,
        }
    })
}

/// Every probe element with the build elements that match it, in build
/// order.
pub(crate) fn group_probe<P, B, K, R, J>(
    sides: Sides<P, B, K>,
    result: Rc<dyn Fn(P, Vec<B>) -> R>,
    strategy: J,
) -> Seq<R>
where
    P: 'static,
    B: Clone + 'static,
    K: 'static,
    R: 'static,
    J: JoinStrategy<K>,
{
    Seq::from_fn(move || {
        let (rows, index) = build_index(&sides.build, &sides.build_key, &strategy);
        let probe_key = Rc::clone(&sides.probe_key);
        let result = Rc::clone(&result);
        let mut scratch = Vec::new();
        sides.probe.cursor().map(move |item| {
            scratch.clear();
            index.collect_matches(&probe_key(&item), &mut scratch);
            let group: Vec<B> = scratch.iter().map(|&pos| rows[pos].clone()).collect();
            result(item, group)
        })
    })
}

struct Active<P> {
    item: P,
    matches: Vec<usize>,
    next: usize,
}

struct JoinCursor<P, B, K, R, I> {
    probe: SeqCursor<P>,
    probe_key: KeySelector<P, K>,
    rows: Vec<B>,
    index: I,
    matched: Vec<bool>,
    projection: Projection<P, B, R>,
    active: Option<Active<P>>,
    scratch: Vec<usize>,
    probe_done: bool,
    tail: usize,
}

impl<P, B, K, R, I> JoinCursor<P, B, K, R, I>
where
    P: Clone + 'static,
    B: Clone,
    I: JoinIndex<K>,
{
    fn next_pair(&mut self) -> Option<R> {
        let active = self.active.as_mut()?;
        let Some(&pos) = active.matches.get(active.next) else {
            self.active = None;
            return None;
        };
        active.next += 1;
        self.matched[pos] = true;
        Some((self.projection.both)(active.item.clone(), self.rows[pos].clone()))
    }

    fn next_unmatched_build(&mut self) -> Option<R> {
        let build_only = self.projection.build_only.as_ref()?;
        while self.tail < self.rows.len() {
            let pos = self.tail;
            self.tail += 1;
            if !self.matched[pos] {
                return Some(build_only(self.rows[pos].clone()));
            }
        }
        None
    }
}

impl<P, B, K, R, I> Iterator for JoinCursor<P, B, K, R, I>
where
    P: Clone + 'static,
    B: Clone,
    I: JoinIndex<K>,
{
    type Item = R;

    fn next(&mut self) -> Option<R> {
        loop {
            if let Some(out) = self.next_pair() {
                return Some(out);
            }
            if self.probe_done {
                return self.next_unmatched_build();
            }
            let Some(item) = self.probe.next() else {
                self.probe_done = true;
                continue;
            };

            self.scratch.clear();
            self.index
                .collect_matches(&(self.probe_key)(&item), &mut self.scratch);
            if self.scratch.is_empty() {
                if let Some(probe_only) = &self.projection.probe_only {
                    return Some(probe_only(item));
                }
                continue;
            }
            self.active = Some(Active {
                item,
                matches: std::mem::take(&mut self.scratch),
                next: 0,
            });
        }
    }
}
