//! The eight join variants, their `_with` forms and group_join.

mod test_data_gen;

use lazyq_operators::prelude::*;
use test_data_gen::{people, person, pet, pets, Person, Pet};

type Row = (String, Option<String>);

fn owner_pairs() -> (Seq<Person>, Seq<Pet>) {
    (people().into_seq(), pets().into_seq())
}

#[test]
fn test_left_join_homogeneous_scenario() {
    let a = person(1, "A", 20);
    let b = person(2, "B", 30);
    let owners = vec![a, b].into_seq();
    // A pet modelled as a person record whose id is the owner's id.
    let pets_of_b = vec![person(2, "pet", 1)];

    let rows: Vec<Row> = owners
        .left_join_homogeneous(
            pets_of_b,
            |p| p.id,
            |owner, pet| (owner.name, Some(pet.name)),
            |owner| (owner.name, None),
        )
        .to_vec();
    assert_eq!(
        rows,
        vec![
            ("A".to_string(), None),
            ("B".to_string(), Some("pet".to_string()))
        ]
    );
}

#[test]
fn test_inner_join_cardinality_and_order() {
    let (owners, pets) = owner_pairs();
    let rows = owners
        .inner_join_heterogeneous(
            pets,
            |p| p.id,
            |pet| pet.owner_id,
            |owner, pet| (owner.name, pet.name),
        )
        .to_vec();
    // Outer order, then inner order per outer element.
    assert_eq!(
        rows,
        vec![
            ("Carol".to_string(), "Tom".to_string()),
            ("Bob".to_string(), "Rex".to_string()),
            ("Bob".to_string(), "Kit".to_string()),
        ]
    );
}

#[test]
fn test_inner_join_homogeneous_matches_every_pair() {
    let left = vec![1, 2, 2, 3].into_seq();
    let rows = left
        .inner_join_homogeneous(vec![2, 3, 3], |n| *n, |a, b| (a, b))
        .to_vec();
    // 2 matches once for each of its two outer copies, 3 twice.
    assert_eq!(rows, vec![(2, 2), (2, 2), (3, 3), (3, 3)]);
}

#[test]
fn test_left_join_size() {
    let (owners, pets) = owner_pairs();
    let rows = owners
        .left_join_heterogeneous(
            pets,
            |p| p.id,
            |pet| pet.owner_id,
            |owner, pet| (owner.id, Some(pet.name)),
            |owner| (owner.id, None),
        )
        .to_vec();
    assert!(rows.len() >= 5);
    assert_eq!(rows.len(), 6);
    assert_eq!(
        rows.iter().map(|(id, _)| *id).collect::<Vec<_>>(),
        vec![3, 1, 4, 2, 2, 5]
    );
}

#[test]
fn test_right_join_keeps_argument_order() {
    let (owners, pets) = owner_pairs();
    let rows = owners
        .right_join_heterogeneous(
            pets,
            |p| p.id,
            |pet| pet.owner_id,
            |owner, pet| format!("{}:{}", owner.name, pet.name),
            |pet| format!("-:{}", pet.name),
        )
        .to_vec();
    assert_eq!(rows, vec!["Bob:Rex", "Carol:Tom", "Bob:Kit", "-:Moby"]);
}

#[test]
fn test_right_join_homogeneous() {
    let rows = vec![1, 2]
        .into_seq()
        .right_join_homogeneous(vec![2, 3], |n| *n, |l, r| l * 10 + r, |r| -r)
        .to_vec();
    assert_eq!(rows, vec![22, -3]);
}

#[test]
fn test_full_join_emits_both_tails() {
    let (owners, pets) = owner_pairs();
    let rows = owners
        .full_join_heterogeneous(
            pets,
            |p| p.id,
            |pet| pet.owner_id,
            |owner, pet| format!("{}+{}", owner.name, pet.name),
            |owner| format!("{}+", owner.name),
            |pet| format!("+{}", pet.name),
        )
        .to_vec();
    assert_eq!(
        rows,
        vec!["Carol+Tom", "Alice+", "Dave+", "Bob+Rex", "Bob+Kit", "Erin+", "+Moby"]
    );
}

#[test]
fn test_full_join_homogeneous_tail_in_inner_order() {
    let rows = vec![1, 2]
        .into_seq()
        .full_join_homogeneous(
            vec![5, 2, 4],
            |n| *n,
            |l, r| (Some(l), Some(r)),
            |l| (Some(l), None),
            |r| (None, Some(r)),
        )
        .to_vec();
    assert_eq!(
        rows,
        vec![
            (Some(1), None),
            (Some(2), Some(2)),
            (None, Some(5)),
            (None, Some(4))
        ]
    );
}

#[test]
fn test_custom_equality_sees_outer_key_first() {
    // Matches when the inner key extends the outer key.
    let extends = |outer: &String, inner: &String| inner.starts_with(outer.as_str());
    let left = vec!["ab", "x"].into_seq();
    let right = vec!["abc", "q", "xy"];

    let left_rows = left
        .left_join_homogeneous_with(
            right.clone(),
            |s| s.to_string(),
            |l, r| format!("{l}={r}"),
            |l| format!("{l}=?"),
            extends,
        )
        .to_vec();
    assert_eq!(left_rows, vec!["ab=abc", "x=xy"]);

    let right_rows = left
        .right_join_homogeneous_with(
            right.clone(),
            |s| s.to_string(),
            |l, r| format!("{l}={r}"),
            |r| format!("?={r}"),
            extends,
        )
        .to_vec();
    assert_eq!(right_rows, vec!["ab=abc", "?=q", "x=xy"]);

    let full_rows = left
        .full_join_homogeneous_with(
            right,
            |s| s.to_string(),
            |l, r| format!("{l}={r}"),
            |l| format!("{l}=?"),
            |r| format!("?={r}"),
            extends,
        )
        .to_vec();
    assert_eq!(full_rows, vec!["ab=abc", "x=xy", "?=q"]);
}

#[test]
fn test_custom_equality_joins() {
    let ci = |a: &String, b: &String| a.eq_ignore_ascii_case(b);
    let left = vec!["Ann", "bob", "Cy"].into_seq();
    let right = vec!["ANN", "BOB", "bob", "Dee"];

    let inner = left
        .inner_join_homogeneous_with(right.clone(), |s| s.to_string(), |l, r| format!("{l}={r}"), ci)
        .to_vec();
    assert_eq!(inner, vec!["Ann=ANN", "bob=BOB", "bob=bob"]);

    let left_rows = left
        .left_join_homogeneous_with(
            right.clone(),
            |s| s.to_string(),
            |l, r| format!("{l}={r}"),
            |l| format!("{l}=?"),
            ci,
        )
        .to_vec();
    assert_eq!(left_rows, vec!["Ann=ANN", "bob=BOB", "bob=bob", "Cy=?"]);

    let right_rows = left
        .right_join_homogeneous_with(
            right.clone(),
            |s| s.to_string(),
            |l, r| format!("{l}={r}"),
            |r| format!("?={r}"),
            ci,
        )
        .to_vec();
    assert_eq!(right_rows, vec!["Ann=ANN", "bob=BOB", "bob=bob", "?=Dee"]);

    let full_rows = left
        .full_join_homogeneous_with(
            right,
            |s| s.to_string(),
            |l, r| format!("{l}={r}"),
            |l| format!("{l}=?"),
            |r| format!("?={r}"),
            ci,
        )
        .to_vec();
    assert_eq!(
        full_rows,
        vec!["Ann=ANN", "bob=BOB", "bob=bob", "Cy=?", "?=Dee"]
    );
}

#[test]
fn test_heterogeneous_with_comparer() {
    let (owners, pets) = owner_pairs();
    let near = |a: &u32, b: &u32| a == b;

    let inner = owners
        .inner_join_heterogeneous_with(
            pets.clone(),
            |p| p.id,
            |pet| pet.owner_id,
            |o, p| (o.id, p.name),
            near,
        )
        .count();
    assert_eq!(inner, 3);

    let left = owners
        .left_join_heterogeneous_with(
            pets.clone(),
            |p| p.id,
            |pet| pet.owner_id,
            |_, _| 1,
            |_| 0,
            near,
        )
        .to_vec();
    assert_eq!(left, vec![1, 0, 0, 1, 1, 0]);

    let right = owners
        .right_join_heterogeneous_with(
            pets.clone(),
            |p| p.id,
            |pet| pet.owner_id,
            |o, _| o.id,
            |_| 0,
            near,
        )
        .to_vec();
    assert_eq!(right, vec![2, 3, 2, 0]);

    let full = owners
        .full_join_heterogeneous_with(
            pets,
            |p| p.id,
            |pet| pet.owner_id,
            |_, _| 'm',
            |_| 'l',
            |_| 'r',
            near,
        )
        .to_vec();
    assert_eq!(full, vec!['m', 'l', 'l', 'm', 'm', 'l', 'r']);
}

#[test]
fn test_group_join() {
    let (owners, pets) = owner_pairs();
    let groups = owners
        .group_join(
            pets.clone(),
            |p| p.id,
            |pet| pet.owner_id,
            |owner, pets| (owner.name, pets.into_iter().map(|p| p.name).collect::<Vec<_>>()),
        )
        .to_vec();
    assert_eq!(groups.len(), 5);
    assert_eq!(groups[0], ("Carol".to_string(), vec!["Tom".to_string()]));
    assert_eq!(groups[1], ("Alice".to_string(), Vec::<String>::new()));
    assert_eq!(
        groups[3],
        ("Bob".to_string(), vec!["Rex".to_string(), "Kit".to_string()])
    );

    let counts = owners
        .group_join_with(
            pets,
            |p| p.id,
            |pet| pet.owner_id,
            |_, pets| pets.len(),
            |a: &u32, b: &u32| a == b,
        )
        .to_vec();
    assert_eq!(counts, vec![1, 0, 0, 2, 0]);
}

#[test]
fn test_join_is_lazy_and_reiterable() {
    use std::cell::RefCell;
    use std::rc::Rc;

    let inner = Rc::new(RefCell::new(vec![pet("Rex", 1)]));
    let joined = vec![person(1, "Alice", 30)]
        .into_seq()
        .inner_join_heterogeneous(
            Rc::clone(&inner),
            |p| p.id,
            |pet| pet.owner_id,
            |_, pet| pet.name,
        );

    inner.borrow_mut().push(pet("Tom", 1));
    assert_eq!(joined.to_vec(), vec!["Rex", "Tom"]);
    assert_eq!(joined.count(), 2);
}
