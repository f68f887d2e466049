//! Shared fixtures for the integration tests.

#![allow(dead_code)]

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Person {
    pub id: u32,
    pub name: String,
    pub age: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Pet {
    pub name: String,
    pub owner_id: u32,
}

pub fn person(id: u32, name: &str, age: u32) -> Person {
    Person {
        id,
        name: name.to_string(),
        age,
    }
}

pub fn pet(name: &str, owner_id: u32) -> Pet {
    Pet {
        name: name.to_string(),
        owner_id,
    }
}

pub fn people() -> Vec<Person> {
    vec![
        person(3, "Carol", 41),
        person(1, "Alice", 30),
        person(4, "Dave", 30),
        person(2, "Bob", 25),
        person(5, "Erin", 41),
    ]
}

pub fn pets() -> Vec<Pet> {
    vec![
        pet("Rex", 2),
        pet("Tom", 3),
        pet("Kit", 2),
        pet("Moby", 9),
    ]
}

/// Deterministic pseudo-random integers in `0..modulo`.
pub fn generate_random_ints(count: usize, modulo: u32, seed: u32) -> Vec<u32> {
    let mut state = seed;
    (0..count)
        .map(|_| {
            state = state.wrapping_mul(1_103_515_245).wrapping_add(12_345);
            (state >> 16) % modulo
        })
        .collect()
}
