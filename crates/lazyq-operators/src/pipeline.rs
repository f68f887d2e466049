//! Pipeline stages: filter, project, slice and combine.
//!
//! Every stage returns a new `Seq` whose factory captures the upstream `Seq`
//! and the user callback. Nothing runs until a cursor over the result is
//! advanced, and each cursor re-reads the upstream from scratch. Callbacks
//! fire once per element per iteration, interleaved with downstream pulls,
//! so `take`/`take_while` stop upstream work early.

use std::rc::Rc;

use lazyq_core::error::{Error, Result};
use lazyq_core::sequence::{IntoSeq, Seq};
use lazyq_core::source::{Mapped, Reversed};

pub trait Pipeline<T: 'static> {
    /// Elements for which `predicate` holds, in source order.
    fn filter<P>(&self, predicate: P) -> Seq<T>
    where
        P: Fn(&T) -> bool + 'static;

    /// Project each element. Indexed sources stay indexed.
    fn select<U, F>(&self, f: F) -> Seq<U>
    where
        U: 'static,
        F: Fn(T) -> U + 'static;

    fn select_with_index<U, F>(&self, f: F) -> Seq<U>
    where
        U: 'static,
        F: Fn(T, usize) -> U + 'static;

    /// Project each element to an iterable and flatten the results.
    fn select_many<U, I, F>(&self, f: F) -> Seq<U>
    where
        U: 'static,
        I: IntoIterator<Item = U> + 'static,
        I::IntoIter: 'static,
        F: Fn(T) -> I + 'static;

    fn take(&self, count: usize) -> Seq<T>;

    fn take_while<P>(&self, predicate: P) -> Seq<T>
    where
        P: Fn(&T) -> bool + 'static;

    fn skip(&self, count: usize) -> Seq<T>;

    fn skip_while<P>(&self, predicate: P) -> Seq<T>
    where
        P: Fn(&T) -> bool + 'static;

    fn concat<S>(&self, other: S) -> Seq<T>
    where
        S: IntoSeq<T>;

    fn append(&self, item: T) -> Seq<T>
    where
        T: Clone;

    fn prepend(&self, item: T) -> Seq<T>
    where
        T: Clone;

    /// Back-to-front. Indexed sources are read in reverse without buffering;
    /// streams are buffered on first advance.
    fn reverse(&self) -> Seq<T>;

    fn zip<U, S>(&self, other: S) -> Seq<(T, U)>
    where
        U: 'static,
        S: IntoSeq<U>;

    /// Consecutive runs of `size` elements; the last run may be shorter.
    fn chunk(&self, size: usize) -> Result<Seq<Vec<T>>>;

    /// Run `f` on each element as it flows past.
    fn inspect<F>(&self, f: F) -> Seq<T>
    where
        F: Fn(&T) + 'static;
}

impl<T: 'static> Pipeline<T> for Seq<T> {
    fn filter<P>(&self, predicate: P) -> Seq<T>
    where
        P: Fn(&T) -> bool + 'static,
    {
        let src = self.clone();
        let predicate = Rc::new(predicate);
        Seq::from_fn(move || {
            let predicate = Rc::clone(&predicate);
            src.cursor().filter(move |item| predicate(item))
        })
    }

    fn select<U, F>(&self, f: F) -> Seq<U>
    where
        U: 'static,
        F: Fn(T) -> U + 'static,
    {
        let f: Rc<dyn Fn(T) -> U> = Rc::new(f);
        if let Some(indexed) = self.as_indexed() {
            return Seq::from_indexed(Mapped::new(indexed, f));
        }
        let src = self.clone();
        Seq::from_fn(move || {
            let f = Rc::clone(&f);
            src.cursor().map(move |item| f(item))
        })
    }

    fn select_with_index<U, F>(&self, f: F) -> Seq<U>
    where
        U: 'static,
        F: Fn(T, usize) -> U + 'static,
    {
        let src = self.clone();
        let f = Rc::new(f);
        Seq::from_fn(move || {
            let f = Rc::clone(&f);
            src.cursor()
                .enumerate()
                .map(move |(index, item)| f(item, index))
        })
    }

    fn select_many<U, I, F>(&self, f: F) -> Seq<U>
    where
        U: 'static,
        I: IntoIterator<Item = U> + 'static,
        I::IntoIter: 'static,
        F: Fn(T) -> I + 'static,
    {
        let src = self.clone();
        let f = Rc::new(f);
        Seq::from_fn(move || {
            let f = Rc::clone(&f);
            src.cursor().flat_map(move |item| f(item))
        })
    }

    fn take(&self, count: usize) -> Seq<T> {
        let src = self.clone();
        Seq::from_fn(move || src.cursor().take(count))
    }

    fn take_while<P>(&self, predicate: P) -> Seq<T>
    where
        P: Fn(&T) -> bool + 'static,
    {
        let src = self.clone();
        let predicate = Rc::new(predicate);
        Seq::from_fn(move || {
            let predicate = Rc::clone(&predicate);
            src.cursor().take_while(move |item| predicate(item))
        })
    }

    fn skip(&self, count: usize) -> Seq<T> {
        let src = self.clone();
        Seq::from_fn(move || src.cursor().skip(count))
    }

    fn skip_while<P>(&self, predicate: P) -> Seq<T>
    where
        P: Fn(&T) -> bool + 'static,
    {
        let src = self.clone();
        let predicate = Rc::new(predicate);
        Seq::from_fn(move || {
            let predicate = Rc::clone(&predicate);
            src.cursor().skip_while(move |item| predicate(item))
        })
    }

    fn concat<S>(&self, other: S) -> Seq<T>
    where
        S: IntoSeq<T>,
    {
        let first = self.clone();
        let second = other.into_seq();
        Seq::from_fn(move || first.cursor().chain(second.cursor()))
    }

    fn append(&self, item: T) -> Seq<T>
    where
        T: Clone,
    {
        self.concat(Seq::once(item))
    }

    fn prepend(&self, item: T) -> Seq<T>
    where
        T: Clone,
    {
        Seq::once(item).concat(self.clone())
    }

    fn reverse(&self) -> Seq<T> {
        if let Some(indexed) = self.as_indexed() {
            return Seq::from_indexed(Reversed::new(indexed));
        }
        let src = self.clone();
        Seq::from_fn(move || {
            let mut items: Vec<T> = src.cursor().collect();
            items.reverse();
            items
        })
    }

    fn zip<U, S>(&self, other: S) -> Seq<(T, U)>
    where
        U: 'static,
        S: IntoSeq<U>,
    {
        let left = self.clone();
        let right = other.into_seq();
        Seq::from_fn(move || left.cursor().zip(right.cursor()))
    }

    fn chunk(&self, size: usize) -> Result<Seq<Vec<T>>> {
        if size == 0 {
            return Err(Error::invalid_argument(
                "size",
                "chunk size must be greater than zero",
            ));
        }
        let src = self.clone();
        Ok(Seq::from_fn(move || {
            let mut cursor = src.cursor();
            std::iter::from_fn(move || {
                let chunk: Vec<T> = cursor.by_ref().take(size).collect();
                (!chunk.is_empty()).then_some(chunk)
            })
        }))
    }

    fn inspect<F>(&self, f: F) -> Seq<T>
    where
        F: Fn(&T) + 'static,
    {
        let src = self.clone();
        let f = Rc::new(f);
        Seq::from_fn(move || {
            let f = Rc::clone(&f);
            src.cursor().inspect(move |item| f(item))
        })
    }
}
