//! One ordering level: group by key, order the groups, keep source order
//! inside each group.

use std::cmp::Ordering;
use std::rc::Rc;

use lazyq_core::compare::{Comparer, KeySelector};

/// Splits one group of elements into ordered, equal-key subgroups.
pub(crate) type Refine<T> = Rc<dyn Fn(Vec<T>) -> Vec<Vec<T>>>;

/// Erase the key type of one ordering level so levels with different key
/// types can be chained.
pub(crate) fn refiner<T, K>(key: KeySelector<T, K>, cmp: Comparer<K>, descending: bool) -> Refine<T>
where
    T: 'static,
    K: 'static,
{
    Rc::new(move |items: Vec<T>| partition_sorted(items, &*key, &*cmp, descending))
}

/// Compute each key once, stable-sort by key, then split into runs of
/// comparer-equal keys. Descending reverses the run order only; elements
/// inside a run keep their source order.
pub(crate) fn partition_sorted<T, K>(
    items: Vec<T>,
    key: &dyn Fn(&T) -> K,
    cmp: &dyn Fn(&K, &K) -> Ordering,
    descending: bool,
) -> Vec<Vec<T>> {
    let keyed: Vec<(K, T)> = items.into_iter().map(|item| (key(&item), item)).collect();
    let keyed = merge_sort(keyed, &|a: &(K, T), b: &(K, T)| cmp(&a.0, &b.0));

    let mut groups: Vec<Vec<T>> = Vec::new();
    let mut run_key: Option<K> = None;
    for (k, item) in keyed {
        let same_run = run_key
            .as_ref()
            .is_some_and(|prev| cmp(prev, &k) == Ordering::Equal);
        match groups.last_mut() {
            Some(group) if same_run => group.push(item),
            _ => {
                groups.push(vec![item]);
                run_key = Some(k);
            }
        }
    }

    if descending {
        groups.reverse();
    }
    groups
}

/// Stable top-down merge sort. Only ever asks whether the right element is
/// strictly less than the left one, so a comparer that is not a total order
/// (NaN keys, inconsistent user comparers) yields some permutation instead of
/// a panic.
fn merge_sort<E>(mut items: Vec<E>, cmp: &dyn Fn(&E, &E) -> Ordering) -> Vec<E> {
    if items.len() <= 1 {
        return items;
    }
    let right = items.split_off(items.len() / 2);
    let left = merge_sort(items, cmp);
    let right = merge_sort(right, cmp);

    let mut merged = Vec::with_capacity(left.len() + right.len());
    let mut left = left.into_iter().peekable();
    let mut right = right.into_iter().peekable();
    loop {
        let take_right = match (left.peek(), right.peek()) {
            (Some(l), Some(r)) => cmp(r, l) == Ordering::Less,
            (Some(_), None) => false,
            (None, Some(_)) => true,
            (None, None) => break,
        };
        merged.extend(if take_right { right.next() } else { left.next() });
    }
    merged
}
