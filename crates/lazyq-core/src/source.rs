//! Random-access storage behind indexed sequences.
//!
//! A `Seq` backed by an [`IndexedSource`] can answer `count`, `element_at`
//! and `last` without walking a cursor. Every `get` re-reads the source, so
//! live sources ([`Shared`]) reflect mutations made between pulls.

use std::cell::RefCell;
use std::rc::Rc;

/// A source that knows its length and can fetch any position by value.
pub trait IndexedSource<T> {
    fn len(&self) -> usize;

    fn get(&self, index: usize) -> Option<T>;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Immutable snapshot taken when the sequence was built.
pub struct Snapshot<T>(Rc<[T]>);

impl<T> Snapshot<T> {
    pub fn new(items: Vec<T>) -> Self {
        Self(items.into())
    }
}

impl<T: Clone> IndexedSource<T> for Snapshot<T> {
    fn len(&self) -> usize {
        self.0.len()
    }

    fn get(&self, index: usize) -> Option<T> {
        self.0.get(index).cloned()
    }
}

/// A vector shared with the caller. Reads always see its current contents.
///
/// The `RefCell` borrow is held only for the duration of a single `get`.
pub struct Shared<T>(Rc<RefCell<Vec<T>>>);

impl<T> Shared<T> {
    pub fn new(items: Rc<RefCell<Vec<T>>>) -> Self {
        Self(items)
    }
}

impl<T: Clone> IndexedSource<T> for Shared<T> {
    fn len(&self) -> usize {
        self.0.borrow().len()
    }

    fn get(&self, index: usize) -> Option<T> {
        self.0.borrow().get(index).cloned()
    }
}

/// `count` copies of one value.
pub struct Repeat<T> {
    item: T,
    count: usize,
}

impl<T> Repeat<T> {
    pub fn new(item: T, count: usize) -> Self {
        Self { item, count }
    }
}

impl<T: Clone> IndexedSource<T> for Repeat<T> {
    fn len(&self) -> usize {
        self.count
    }

    fn get(&self, index: usize) -> Option<T> {
        (index < self.count).then(|| self.item.clone())
    }
}

/// `count` consecutive integers starting at `start`.
pub struct Range {
    start: i64,
    count: usize,
}

impl Range {
    pub fn new(start: i64, count: usize) -> Self {
        Self { start, count }
    }
}

impl IndexedSource<i64> for Range {
    fn len(&self) -> usize {
        self.count
    }

    fn get(&self, index: usize) -> Option<i64> {
        if index >= self.count {
            return None;
        }
        i64::try_from(index)
            .ok()
            .and_then(|offset| self.start.checked_add(offset))
    }
}

/// Projection over another indexed source; keeps random access through `select`.
pub struct Mapped<T, U> {
    inner: Rc<dyn IndexedSource<T>>,
    f: Rc<dyn Fn(T) -> U>,
}

impl<T, U> Mapped<T, U> {
    pub fn new(inner: Rc<dyn IndexedSource<T>>, f: Rc<dyn Fn(T) -> U>) -> Self {
        Self { inner, f }
    }
}

impl<T, U> IndexedSource<U> for Mapped<T, U> {
    fn len(&self) -> usize {
        self.inner.len()
    }

    fn get(&self, index: usize) -> Option<U> {
        self.inner.get(index).map(|item| (self.f)(item))
    }
}

/// Back-to-front view over another indexed source.
pub struct Reversed<T> {
    inner: Rc<dyn IndexedSource<T>>,
}

impl<T> Reversed<T> {
    pub fn new(inner: Rc<dyn IndexedSource<T>>) -> Self {
        Self { inner }
    }
}

impl<T> IndexedSource<T> for Reversed<T> {
    fn len(&self) -> usize {
        self.inner.len()
    }

    fn get(&self, index: usize) -> Option<T> {
        let len = self.inner.len();
        if index >= len {
            return None;
        }
        self.inner.get(len - 1 - index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shared_sees_mutation() {
        let items = Rc::new(RefCell::new(vec![1, 2]));
        let src = Shared::new(Rc::clone(&items));
        assert_eq!(src.len(), 2);
        items.borrow_mut().push(3);
        assert_eq!(src.len(), 3);
        assert_eq!(src.get(2), Some(3));
    }

    #[test]
    fn test_range_overflow_is_end() {
        let src = Range::new(i64::MAX, 2);
        assert_eq!(src.get(0), Some(i64::MAX));
        assert_eq!(src.get(1), None);
    }

    #[test]
    fn test_reversed() {
        let inner: Rc<dyn IndexedSource<char>> = Rc::new(Snapshot::new(vec!['a', 'b', 'c']));
        let rev = Reversed::new(inner);
        assert_eq!(rev.get(0), Some('c'));
        assert_eq!(rev.get(2), Some('a'));
        assert_eq!(rev.get(3), None);
    }
}
