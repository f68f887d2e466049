use serde::{Deserialize, Serialize};

/// A key and the elements that share it, in source order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyGroup<K, T> {
    pub key: K,
    pub items: Vec<T>,
}

impl<K, T> KeyGroup<K, T> {
    pub fn new(key: K) -> Self {
        Self {
            key,
            items: Vec::new(),
        }
    }

    pub fn key(&self) -> &K {
        &self.key
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn into_parts(self) -> (K, Vec<T>) {
        (self.key, self.items)
    }
}
