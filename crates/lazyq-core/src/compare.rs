//! Comparer, equality and selector shapes shared by the operators.

use std::cmp::Ordering;
use std::rc::Rc;

/// Three-way comparer over keys or priorities.
pub type Comparer<K> = Rc<dyn Fn(&K, &K) -> Ordering>;

/// Caller-supplied replacement for default equality.
pub type EqualityComparer<K> = Rc<dyn Fn(&K, &K) -> bool>;

/// Maps an element to the value used for comparison, grouping or matching.
pub type KeySelector<T, K> = Rc<dyn Fn(&T) -> K>;

/// Generic three-way compare. Incomparable values (NaN) compare as equal.
pub fn default_compare<K: PartialOrd + ?Sized>(a: &K, b: &K) -> Ordering {
    a.partial_cmp(b).unwrap_or(Ordering::Equal)
}

/// The default comparer as a shareable handle.
pub fn default_comparer<K: PartialOrd + 'static>() -> Comparer<K> {
    Rc::new(|a: &K, b: &K| default_compare(a, b))
}
