//! The sequence contract.
//!
//! A [`Seq`] is a handle over a cursor factory. Every call to [`Seq::cursor`]
//! yields an independent cursor that walks the *current* contents of the
//! underlying source from the start. Nothing is cached between cursors.
//!
//! Invariants:
//! - Opening a cursor does no work; the factory runs on the first `next`.
//! - A `Seq` holds its source by reference-counted closure only; cloning a
//!   `Seq` never copies elements.
//! - `Seq` is `Rc`-based and therefore `!Send`: pipelines run on one thread.

use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque};
use std::fmt;
use std::rc::Rc;

use crate::source::{IndexedSource, Range, Repeat, Shared, Snapshot};

/// A forward-only cursor produced by a stream factory.
pub type Cursor<T> = Box<dyn Iterator<Item = T>>;

type Factory<T> = Rc<dyn Fn() -> Cursor<T>>;

/// Storage strategy. Operations that can exploit random access check for
/// `Indexed` instead of relying on a type hierarchy.
enum Storage<T> {
    Stream(Factory<T>),
    Indexed(Rc<dyn IndexedSource<T>>),
}

impl<T> Clone for Storage<T> {
    fn clone(&self) -> Self {
        match self {
            Storage::Stream(f) => Storage::Stream(Rc::clone(f)),
            Storage::Indexed(src) => Storage::Indexed(Rc::clone(src)),
        }
    }
}

impl<T: 'static> Storage<T> {
    fn open(&self) -> Cursor<T> {
        match self {
            Storage::Stream(factory) => factory(),
            Storage::Indexed(src) => Box::new(IndexedCursor {
                source: Rc::clone(src),
                pos: 0,
            }),
        }
    }
}

/// A restartable, lazily evaluated sequence of `T`.
pub struct Seq<T> {
    storage: Storage<T>,
}

impl<T> Clone for Seq<T> {
    fn clone(&self) -> Self {
        Self {
            storage: self.storage.clone(),
        }
    }
}

impl<T> fmt::Debug for Seq<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self.storage {
            Storage::Stream(_) => "stream",
            Storage::Indexed(_) => "indexed",
        };
        f.debug_struct("Seq").field("storage", &kind).finish()
    }
}

impl<T: 'static> Seq<T> {
    /// Wrap any iterator factory. The factory is invoked once per cursor,
    /// on that cursor's first advance.
    pub fn from_fn<F, I>(factory: F) -> Self
    where
        F: Fn() -> I + 'static,
        I: IntoIterator<Item = T>,
        I::IntoIter: 'static,
    {
        Self {
            storage: Storage::Stream(Rc::new(move || Box::new(factory().into_iter()))),
        }
    }

    /// Wrap a random-access source.
    pub fn from_indexed<S>(source: S) -> Self
    where
        S: IndexedSource<T> + 'static,
    {
        Self {
            storage: Storage::Indexed(Rc::new(source)),
        }
    }

    /// Take ownership of `items`; each cursor clones elements out.
    pub fn from_vec(items: Vec<T>) -> Self
    where
        T: Clone,
    {
        Self::from_indexed(Snapshot::new(items))
    }

    /// Borrow a caller-owned vector. Cursors observe mutations made to it
    /// after the sequence was built, including between pulls.
    pub fn from_shared(items: Rc<RefCell<Vec<T>>>) -> Self
    where
        T: Clone,
    {
        Self::from_indexed(Shared::new(items))
    }

    pub fn empty() -> Self {
        Self::from_fn(std::iter::empty)
    }

    pub fn once(item: T) -> Self
    where
        T: Clone,
    {
        Self::repeat(item, 1)
    }

    pub fn repeat(item: T, count: usize) -> Self
    where
        T: Clone,
    {
        Self::from_indexed(Repeat::new(item, count))
    }

    /// Open a fresh cursor. No upstream work happens until it is advanced.
    pub fn cursor(&self) -> SeqCursor<T> {
        SeqCursor {
            pending: Some(self.storage.clone()),
            running: None,
        }
    }

    pub fn iter(&self) -> SeqCursor<T> {
        self.cursor()
    }

    /// The random-access source behind this sequence, if it has one.
    pub fn as_indexed(&self) -> Option<Rc<dyn IndexedSource<T>>> {
        match &self.storage {
            Storage::Indexed(src) => Some(Rc::clone(src)),
            Storage::Stream(_) => None,
        }
    }

    pub fn is_indexed(&self) -> bool {
        matches!(self.storage, Storage::Indexed(_))
    }
}

impl Seq<i64> {
    /// `count` consecutive integers starting at `start`.
    pub fn range(start: i64, count: usize) -> Self {
        Self::from_indexed(Range::new(start, count))
    }
}

/// Cursor over a [`Seq`]. Opens the underlying storage on first advance.
pub struct SeqCursor<T> {
    pending: Option<Storage<T>>,
    running: Option<Cursor<T>>,
}

impl<T: 'static> Iterator for SeqCursor<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        if let Some(storage) = self.pending.take() {
            self.running = Some(storage.open());
        }
        self.running.as_mut()?.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match (&self.pending, &self.running) {
            (Some(Storage::Indexed(src)), _) => {
                let len = src.len();
                (len, Some(len))
            }
            (_, Some(cursor)) => cursor.size_hint(),
            _ => (0, None),
        }
    }
}

struct IndexedCursor<T> {
    source: Rc<dyn IndexedSource<T>>,
    pos: usize,
}

impl<T> Iterator for IndexedCursor<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        let item = self.source.get(self.pos)?;
        self.pos += 1;
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = self.source.len().saturating_sub(self.pos);
        (left, Some(left))
    }
}

impl<T: 'static> IntoIterator for Seq<T> {
    type Item = T;
    type IntoIter = SeqCursor<T>;

    fn into_iter(self) -> SeqCursor<T> {
        self.cursor()
    }
}

impl<T: 'static> IntoIterator for &Seq<T> {
    type Item = T;
    type IntoIter = SeqCursor<T>;

    fn into_iter(self) -> SeqCursor<T> {
        self.cursor()
    }
}

/// Conversion of an iterable into a [`Seq`].
///
/// Owned collections become immutable snapshots; `Rc<RefCell<Vec<T>>>`
/// stays live. A `Seq` converts to itself unchanged.
pub trait IntoSeq<T> {
    fn into_seq(self) -> Seq<T>;
}

impl<T> IntoSeq<T> for Seq<T> {
    fn into_seq(self) -> Seq<T> {
        self
    }
}

impl<T: 'static> IntoSeq<T> for &Seq<T> {
    fn into_seq(self) -> Seq<T> {
        self.clone()
    }
}

impl<T: Clone + 'static> IntoSeq<T> for Vec<T> {
    fn into_seq(self) -> Seq<T> {
        Seq::from_vec(self)
    }
}

impl<T: Clone + 'static> IntoSeq<T> for &[T] {
    fn into_seq(self) -> Seq<T> {
        Seq::from_vec(self.to_vec())
    }
}

impl<T: Clone + 'static, const N: usize> IntoSeq<T> for [T; N] {
    fn into_seq(self) -> Seq<T> {
        Seq::from_vec(Vec::from(self))
    }
}

impl<T: Clone + 'static> IntoSeq<T> for VecDeque<T> {
    fn into_seq(self) -> Seq<T> {
        Seq::from_vec(Vec::from(self))
    }
}

impl<T: Clone + 'static> IntoSeq<T> for Rc<RefCell<Vec<T>>> {
    fn into_seq(self) -> Seq<T> {
        Seq::from_shared(self)
    }
}

impl<T: Clone + 'static, S> IntoSeq<T> for HashSet<T, S> {
    fn into_seq(self) -> Seq<T> {
        Seq::from_vec(self.into_iter().collect())
    }
}

impl<T: Clone + 'static> IntoSeq<T> for BTreeSet<T> {
    fn into_seq(self) -> Seq<T> {
        Seq::from_vec(self.into_iter().collect())
    }
}

impl<K: Clone + 'static, V: Clone + 'static, S> IntoSeq<(K, V)> for HashMap<K, V, S> {
    fn into_seq(self) -> Seq<(K, V)> {
        Seq::from_vec(self.into_iter().collect())
    }
}

impl<K: Clone + 'static, V: Clone + 'static> IntoSeq<(K, V)> for BTreeMap<K, V> {
    fn into_seq(self) -> Seq<(K, V)> {
        Seq::from_vec(self.into_iter().collect())
    }
}

impl IntoSeq<char> for String {
    fn into_seq(self) -> Seq<char> {
        Seq::from_vec(self.chars().collect())
    }
}

impl IntoSeq<char> for &str {
    fn into_seq(self) -> Seq<char> {
        Seq::from_vec(self.chars().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_factory_runs_on_first_advance() {
        let opened = Rc::new(Cell::new(0));
        let probe = Rc::clone(&opened);
        let seq = Seq::from_fn(move || {
            probe.set(probe.get() + 1);
            vec![1, 2, 3]
        });

        let mut cursor = seq.cursor();
        assert_eq!(opened.get(), 0);
        assert_eq!(cursor.next(), Some(1));
        assert_eq!(opened.get(), 1);

        let all: Vec<i32> = seq.iter().collect();
        assert_eq!(all, vec![1, 2, 3]);
        assert_eq!(opened.get(), 2);
    }

    #[test]
    fn test_into_seq_is_idempotent() {
        let seq = Seq::from_vec(vec![1, 2]);
        let again = seq.clone().into_seq();
        assert!(again.is_indexed());
        assert_eq!(again.iter().collect::<Vec<_>>(), vec![1, 2]);
    }

    #[test]
    fn test_indexed_size_hint() {
        let seq = Seq::range(0, 4);
        assert_eq!(seq.cursor().size_hint(), (4, Some(4)));
    }
}
