//! Pipeline composition: deferred execution, re-iteration, short-circuiting
//! and the consumers.

mod test_data_gen;

use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, HashSet};
use std::rc::Rc;

use lazyq_core::Error;
use lazyq_operators::prelude::*;
use test_data_gen::generate_random_ints;

fn counter() -> (Rc<Cell<usize>>, Rc<Cell<usize>>) {
    let calls = Rc::new(Cell::new(0));
    (Rc::clone(&calls), calls)
}

#[test]
fn test_filter_keeps_matching_in_order() {
    let data = generate_random_ints(200, 50, 11);
    let expected: Vec<u32> = data.iter().copied().filter(|n| n % 3 == 0).collect();

    let seq = data.clone().into_seq();
    assert_eq!(seq.filter(|n| n % 3 == 0).to_vec(), expected);
}

#[test]
fn test_building_a_pipeline_does_no_work() {
    let (probe, calls) = counter();
    let seq = vec![1, 2, 3].into_seq().select(move |n| {
        probe.set(probe.get() + 1);
        n * 2
    });
    let filtered = seq.filter(|n| *n > 2);

    let _cursor = filtered.cursor();
    assert_eq!(calls.get(), 0);

    assert_eq!(filtered.to_vec(), vec![4, 6]);
    assert_eq!(calls.get(), 3);
}

#[test]
fn test_mutations_before_consumption_are_visible() {
    let shared = Rc::new(RefCell::new(vec![1, 2, 3]));
    let evens = Rc::clone(&shared).into_seq().filter(|n| n % 2 == 0);

    shared.borrow_mut().push(4);
    assert_eq!(evens.to_vec(), vec![2, 4]);

    shared.borrow_mut().clear();
    assert!(!evens.any());
}

#[test]
fn test_reiteration_yields_identical_results() {
    let seq = Seq::range(1, 10)
        .filter(|n| n % 2 == 1)
        .select(|n| n * n)
        .skip(1);
    let first = seq.to_vec();
    let second = seq.to_vec();
    assert_eq!(first, vec![9, 25, 49, 81]);
    assert_eq!(first, second);
}

#[test]
fn test_take_short_circuits_upstream() {
    let (probe, calls) = counter();
    let seq = Seq::range(0, 1_000).inspect(move |_| probe.set(probe.get() + 1));

    assert_eq!(seq.take(3).to_vec(), vec![0, 1, 2]);
    assert_eq!(calls.get(), 3);

    calls.set(0);
    assert_eq!(seq.take_while(|n| *n < 5).count(), 5);
    assert_eq!(calls.get(), 6);
}

#[test]
fn test_select_keeps_indexed_fast_paths() {
    let (probe, calls) = counter();
    let seq = vec![10, 20, 30].into_seq().select(move |n| {
        probe.set(probe.get() + 1);
        n + 1
    });

    assert!(seq.is_indexed());
    assert_eq!(seq.count(), 3);
    assert_eq!(calls.get(), 0);
    assert_eq!(seq.element_at(2), Ok(31));
    assert_eq!(seq.last(), Ok(31));
    assert_eq!(calls.get(), 2);
}

#[test]
fn test_reverse_indexed_and_streamed() {
    let indexed = vec![1, 2, 3].into_seq();
    assert!(indexed.reverse().is_indexed());
    assert_eq!(indexed.reverse().to_vec(), vec![3, 2, 1]);

    let streamed = indexed.filter(|_| true);
    assert!(!streamed.is_indexed());
    assert_eq!(streamed.reverse().to_vec(), vec![3, 2, 1]);
}

#[test]
fn test_slicing_and_combining() {
    let seq = vec![1, 2, 3, 4, 5].into_seq();

    assert_eq!(seq.skip_while(|n| *n < 3).to_vec(), vec![3, 4, 5]);
    assert_eq!(seq.concat(vec![6, 7]).count(), 7);
    assert_eq!(seq.take(2).append(9).prepend(0).to_vec(), vec![0, 1, 2, 9]);
    assert_eq!(
        seq.zip("abc").to_vec(),
        vec![(1, 'a'), (2, 'b'), (3, 'c')]
    );
    assert_eq!(
        seq.select_with_index(|n, i| n * i as i32).to_vec(),
        vec![0, 2, 6, 12, 20]
    );
    assert_eq!(
        seq.take(3).select_many(|n| std::iter::repeat(n).take(n as usize)).to_vec(),
        vec![1, 2, 2, 3, 3, 3]
    );
}

#[test]
fn test_chunk() {
    let chunks = Seq::range(0, 5).chunk(2).unwrap();
    assert_eq!(chunks.to_vec(), vec![vec![0, 1], vec![2, 3], vec![4]]);

    let err = Seq::range(0, 5).chunk(0).unwrap_err();
    assert!(matches!(err, Error::InvalidArgument { name: "size", .. }));
}

#[test]
fn test_sources_convert() {
    let set: HashSet<i32> = [1, 2, 3].into_iter().collect();
    assert_eq!(set.into_seq().count(), 3);

    let map: BTreeMap<&str, i32> = [("b", 2), ("a", 1)].into_iter().collect();
    assert_eq!(map.into_seq().to_vec(), vec![("a", 1), ("b", 2)]);

    assert_eq!("héllo".into_seq().count(), 5);
    assert_eq!(Seq::repeat('x', 3).to_vec(), vec!['x', 'x', 'x']);
    assert_eq!(Seq::<u8>::empty().count(), 0);
}

#[test]
fn test_element_consumers() {
    let seq = vec![4, 8, 15, 16, 23, 42].into_seq();
    let empty = Seq::<i32>::empty();

    assert_eq!(seq.first(), Ok(4));
    assert_eq!(seq.first_where(|n| *n > 10), Ok(15));
    assert_eq!(seq.last_or_none(), Some(42));
    assert_eq!(seq.element_at_or_none(6), None);
    assert_eq!(
        seq.filter(|_| true).element_at(9),
        Err(Error::IndexOutOfBounds { index: 9, len: 6 })
    );

    assert_eq!(empty.first(), Err(Error::EmptySequence { op: "first" }));
    assert_eq!(empty.first_or_none(), None);
    assert!(empty.last().is_err());
}

#[test]
fn test_single_cardinality() {
    assert_eq!(Seq::once(7).single(), Ok(7));
    assert_eq!(Seq::<i32>::empty().single_or_none(), Ok(None));
    assert!(matches!(
        Seq::<i32>::empty().single(),
        Err(Error::EmptySequence { .. })
    ));
    assert_eq!(
        vec![1, 2].into_seq().single_or_none(),
        Err(Error::Cardinality { op: "single" })
    );
}

#[test]
fn test_folds_and_extremes() {
    let seq = vec![3, 1, 4, 1, 5].into_seq();

    assert_eq!(seq.sum(), Ok(14));
    assert_eq!(seq.aggregate(|a, b| a * b), Ok(60));
    assert_eq!(seq.fold(String::new(), |acc, n| acc + &n.to_string()), "31415");
    assert_eq!(seq.average(), Ok(2.8));
    assert_eq!(seq.min(), Ok(1));
    assert_eq!(seq.max(), Ok(5));
    assert!(seq.all(|n| *n > 0));
    assert!(seq.any_where(|n| *n == 4));
    assert!(seq.contains(&5));
    assert_eq!(seq.count_where(|n| *n == 1), 2);

    let words = vec!["kiwi", "fig", "banana", "pear"].into_seq();
    assert_eq!(words.min_by_key(|w| w.len()), Ok("fig"));
    assert_eq!(words.max_by_key(|w| w.len()), Ok("banana"));

    let lengths = words.to_map(|w| w.to_string(), |w| w.len());
    assert_eq!(lengths["pear"], 4);
    assert_eq!(Seq::<f64>::empty().average(), Err(Error::EmptySequence { op: "average" }));
}
