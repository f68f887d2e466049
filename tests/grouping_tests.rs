mod test_data_gen;

use std::cell::RefCell;
use std::rc::Rc;

use lazyq_operators::prelude::*;
use test_data_gen::{people, pets};

#[test]
fn test_group_by_first_occurrence_order() {
    let groups = people().into_seq().group_by(|p| p.age).to_vec();

    let keys: Vec<u32> = groups.iter().map(|g| g.key).collect();
    assert_eq!(keys, vec![41, 30, 25]);

    let names: Vec<Vec<String>> = groups
        .iter()
        .map(|g| g.items().iter().map(|p| p.name.clone()).collect())
        .collect();
    assert_eq!(
        names,
        vec![
            vec!["Carol".to_string(), "Erin".to_string()],
            vec!["Alice".to_string(), "Dave".to_string()],
            vec!["Bob".to_string()],
        ]
    );
}

#[test]
fn test_group_sizes_sum_to_source() {
    let seq = people().into_seq();
    let total: usize = seq.group_by(|p| p.age % 2).select(|g| g.len()).sum().unwrap();
    assert_eq!(total, seq.count());
}

#[test]
fn test_group_by_with_custom_equality() {
    let words = vec!["apple", "Avocado", "banana", "Blueberry", "cherry"].into_seq();
    let groups = words
        .group_by_with(
            |w| w.chars().next().unwrap_or(' '),
            |a: &char, b: &char| a.eq_ignore_ascii_case(b),
        )
        .select(|g| g.into_parts())
        .to_vec();

    assert_eq!(
        groups,
        vec![
            ('a', vec!["apple", "Avocado"]),
            ('b', vec!["banana", "Blueberry"]),
            ('c', vec!["cherry"]),
        ]
    );
}

#[test]
fn test_group_by_is_deferred() {
    let source = Rc::new(RefCell::new(vec![1, 2, 3]));
    let grouped = Rc::clone(&source).into_seq().group_by(|n| n % 2);

    source.borrow_mut().push(5);
    let odd = grouped.first().unwrap();
    assert_eq!(odd.key, 1);
    assert_eq!(odd.items, vec![1, 3, 5]);
}

#[test]
fn test_to_lookup() {
    let lookup = pets().into_seq().to_lookup(|p| p.owner_id);

    assert_eq!(lookup.len(), 3);
    assert!(!lookup.is_empty());
    assert!(lookup.contains_key(&2));
    assert!(!lookup.contains_key(&4));

    let bobs: Vec<&str> = lookup
        .get(&2)
        .unwrap()
        .iter()
        .map(|p| p.name.as_str())
        .collect();
    assert_eq!(bobs, vec!["Rex", "Kit"]);
    assert_eq!(lookup.get(&4), None);

    let keys: Vec<u32> = lookup.iter().map(|g| *g.key()).collect();
    assert_eq!(keys, vec![2, 3, 9]);
    assert_eq!(lookup.into_groups().len(), 3);
}

#[test]
fn test_empty_lookup() {
    let lookup = Seq::<i32>::empty().to_lookup(|n| *n);
    assert!(lookup.is_empty());
    assert_eq!(lookup.get(&0), None);
}
