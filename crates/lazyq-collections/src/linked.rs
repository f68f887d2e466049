//! Doubly linked list over an owned slot arena.
//!
//! Nodes are addressed by [`NodeId`], a copyable handle carrying the owning
//! list's identity, the arena slot and the slot generation. Freeing a slot
//! bumps its generation, so handles to removed nodes are rejected instead of
//! aliasing whatever reuses the slot.
//!
//! A node is either *linked* (reachable from `first_node`) or *detached*
//! (still holding its value, see [`LinkedList::unlink`]). `len` counts linked
//! nodes only.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};

use lazyq_core::config::QueryConfig;
use lazyq_core::sequence::Seq;

use crate::error::{Error, Result};

static NEXT_LIST_ID: AtomicU64 = AtomicU64::new(1);

/// Handle to a node of one specific [`LinkedList`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId {
    list: u64,
    slot: usize,
    generation: u32,
}

struct Slot<T> {
    value: Option<T>,
    prev: Option<usize>,
    next: Option<usize>,
    linked: bool,
    generation: u32,
}

pub struct LinkedList<T> {
    id: u64,
    slots: Vec<Slot<T>>,
    free: Vec<usize>,
    head: Option<usize>,
    tail: Option<usize>,
    len: usize,
    /// Generation given to newly pushed slots; raised when the arena is
    /// shrunk so handles from before the shrink stay invalid.
    generation_floor: u32,
    shrink_on_clear: bool,
}

impl<T> Default for LinkedList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> LinkedList<T> {
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            id: NEXT_LIST_ID.fetch_add(1, Ordering::Relaxed),
            slots: Vec::with_capacity(capacity),
            free: Vec::new(),
            head: None,
            tail: None,
            len: 0,
            generation_floor: 0,
            shrink_on_clear: false,
        }
    }

    pub fn with_config(config: &QueryConfig) -> Self {
        let mut list = Self::with_capacity(config.initial_capacity());
        list.shrink_on_clear = config.shrink_on_clear;
        list
    }

    /// Number of linked nodes.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    // ------------------------------------------------------------------
    // Insert (allocate + link)
    // ------------------------------------------------------------------

    pub fn add_first(&mut self, value: T) -> NodeId {
        let slot = self.alloc(value);
        self.link_between(slot, None, self.head);
        self.id_of(slot)
    }

    pub fn add_last(&mut self, value: T) -> NodeId {
        let slot = self.alloc(value);
        self.link_between(slot, self.tail, None);
        self.id_of(slot)
    }

    /// Insert `value` right after the linked node `anchor`.
    pub fn add_after(&mut self, anchor: NodeId, value: T) -> Result<NodeId> {
        let anchor = self.resolve_linked(anchor)?;
        let slot = self.alloc(value);
        self.link_between(slot, Some(anchor), self.slots[anchor].next);
        Ok(self.id_of(slot))
    }

    /// Insert `value` right before the linked node `anchor`.
    pub fn add_before(&mut self, anchor: NodeId, value: T) -> Result<NodeId> {
        let anchor = self.resolve_linked(anchor)?;
        let slot = self.alloc(value);
        self.link_between(slot, self.slots[anchor].prev, Some(anchor));
        Ok(self.id_of(slot))
    }

    // ------------------------------------------------------------------
    // Re-link detached nodes
    // ------------------------------------------------------------------

    pub fn add_node_first(&mut self, node: NodeId) -> Result<()> {
        let slot = self.resolve_detached(node)?;
        self.link_between(slot, None, self.head);
        Ok(())
    }

    pub fn add_node_last(&mut self, node: NodeId) -> Result<()> {
        let slot = self.resolve_detached(node)?;
        self.link_between(slot, self.tail, None);
        Ok(())
    }

    pub fn add_node_after(&mut self, anchor: NodeId, node: NodeId) -> Result<()> {
        let anchor = self.resolve_linked(anchor)?;
        let slot = self.resolve_detached(node)?;
        self.link_between(slot, Some(anchor), self.slots[anchor].next);
        Ok(())
    }

    pub fn add_node_before(&mut self, anchor: NodeId, node: NodeId) -> Result<()> {
        let anchor = self.resolve_linked(anchor)?;
        let slot = self.resolve_detached(node)?;
        self.link_between(slot, self.slots[anchor].prev, Some(anchor));
        Ok(())
    }

    /// Detach a linked node from the chain without freeing it. The handle
    /// stays valid for `get`, `remove_node` and the `add_node_*` family.
    pub fn unlink(&mut self, node: NodeId) -> Result<()> {
        let slot = self.resolve_linked(node)?;
        self.unlink_slot(slot);
        Ok(())
    }

    // ------------------------------------------------------------------
    // Remove (unlink + free)
    // ------------------------------------------------------------------

    /// Remove the first node holding a value equal to `value`.
    pub fn remove(&mut self, value: &T) -> bool
    where
        T: PartialEq,
    {
        match self.find(value) {
            Some(node) => self.remove_node(node).is_ok(),
            None => false,
        }
    }

    /// Free `node`, linked or detached, and return its value.
    pub fn remove_node(&mut self, node: NodeId) -> Result<T> {
        let slot = self.resolve(node)?;
        if self.slots[slot].linked {
            self.unlink_slot(slot);
        }
        self.release(slot).ok_or(Error::StaleNode)
    }

    pub fn remove_first(&mut self) -> Result<T> {
        self.try_remove_first().ok_or(Error::Empty {
            collection: "linked list",
            op: "remove_first",
        })
    }

    pub fn remove_last(&mut self) -> Result<T> {
        self.try_remove_last().ok_or(Error::Empty {
            collection: "linked list",
            op: "remove_last",
        })
    }

    pub fn try_remove_first(&mut self) -> Option<T> {
        let slot = self.head?;
        self.unlink_slot(slot);
        self.release(slot)
    }

    pub fn try_remove_last(&mut self) -> Option<T> {
        let slot = self.tail?;
        self.unlink_slot(slot);
        self.release(slot)
    }

    /// Drop every node, linked or detached. All outstanding handles become
    /// stale.
    pub fn clear(&mut self) {
        #[cfg(feature = "tracing")]
        tracing::trace!(len = self.len, slots = self.slots.len(), "linked list cleared");

        let mut cursor = self.head;
        while let Some(slot) = cursor {
            let node = &mut self.slots[slot];
            cursor = node.next.take();
            node.prev = None;
            node.linked = false;
        }
        self.head = None;
        self.tail = None;
        self.len = 0;

        if self.shrink_on_clear {
            let top = self.slots.iter().map(|s| s.generation).max().unwrap_or(0);
            self.generation_floor = self.generation_floor.max(top).wrapping_add(1);
            self.slots = Vec::new();
            self.free = Vec::new();
            return;
        }

        self.free.clear();
        for (index, node) in self.slots.iter_mut().enumerate() {
            if node.value.take().is_some() {
                node.generation = node.generation.wrapping_add(1);
            }
            self.free.push(index);
        }
    }

    // ------------------------------------------------------------------
    // Navigation and access
    // ------------------------------------------------------------------

    pub fn first_node(&self) -> Option<NodeId> {
        self.head.map(|slot| self.id_of(slot))
    }

    pub fn last_node(&self) -> Option<NodeId> {
        self.tail.map(|slot| self.id_of(slot))
    }

    pub fn next_node(&self, node: NodeId) -> Result<Option<NodeId>> {
        let slot = self.resolve_linked(node)?;
        Ok(self.slots[slot].next.map(|next| self.id_of(next)))
    }

    pub fn prev_node(&self, node: NodeId) -> Result<Option<NodeId>> {
        let slot = self.resolve_linked(node)?;
        Ok(self.slots[slot].prev.map(|prev| self.id_of(prev)))
    }

    pub fn is_linked(&self, node: NodeId) -> Result<bool> {
        let slot = self.resolve(node)?;
        Ok(self.slots[slot].linked)
    }

    pub fn get(&self, node: NodeId) -> Result<&T> {
        let slot = self.resolve(node)?;
        self.slots[slot].value.as_ref().ok_or(Error::StaleNode)
    }

    pub fn get_mut(&mut self, node: NodeId) -> Result<&mut T> {
        let slot = self.resolve(node)?;
        self.slots[slot].value.as_mut().ok_or(Error::StaleNode)
    }

    pub fn front(&self) -> Option<&T> {
        self.head.and_then(|slot| self.slots[slot].value.as_ref())
    }

    pub fn back(&self) -> Option<&T> {
        self.tail.and_then(|slot| self.slots[slot].value.as_ref())
    }

    /// First linked node holding a value equal to `value`.
    pub fn find(&self, value: &T) -> Option<NodeId>
    where
        T: PartialEq,
    {
        let mut cursor = self.head;
        while let Some(slot) = cursor {
            let node = &self.slots[slot];
            if node.value.as_ref() == Some(value) {
                return Some(self.id_of(slot));
            }
            cursor = node.next;
        }
        None
    }

    pub fn contains(&self, value: &T) -> bool
    where
        T: PartialEq,
    {
        self.find(value).is_some()
    }

    /// Linked values, first to last.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            list: self,
            cursor: self.head,
            remaining: self.len,
        }
    }

    /// Snapshot of the current values as a sequence.
    pub fn to_seq(&self) -> Seq<T>
    where
        T: Clone + 'static,
    {
        Seq::from_vec(self.iter().cloned().collect())
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    fn id_of(&self, slot: usize) -> NodeId {
        NodeId {
            list: self.id,
            slot,
            generation: self.slots[slot].generation,
        }
    }

    fn resolve(&self, node: NodeId) -> Result<usize> {
        if node.list != self.id {
            return Err(Error::ForeignNode);
        }
        match self.slots.get(node.slot) {
            Some(slot) if slot.generation == node.generation && slot.value.is_some() => {
                Ok(node.slot)
            }
            _ => Err(Error::StaleNode),
        }
    }

    fn resolve_linked(&self, node: NodeId) -> Result<usize> {
        let slot = self.resolve(node)?;
        if !self.slots[slot].linked {
            return Err(Error::NodeDetached);
        }
        Ok(slot)
    }

    fn resolve_detached(&self, node: NodeId) -> Result<usize> {
        let slot = self.resolve(node)?;
        if self.slots[slot].linked {
            return Err(Error::NodeLinked);
        }
        Ok(slot)
    }

    fn alloc(&mut self, value: T) -> usize {
        if let Some(slot) = self.free.pop() {
            self.slots[slot].value = Some(value);
            return slot;
        }
        #[cfg(feature = "tracing")]
        if self.slots.len() == self.slots.capacity() {
            tracing::trace!(slots = self.slots.len(), "linked list arena growing");
        }
        self.slots.push(Slot {
            value: Some(value),
            prev: None,
            next: None,
            linked: false,
            generation: self.generation_floor,
        });
        self.slots.len() - 1
    }

    fn release(&mut self, slot: usize) -> Option<T> {
        let node = &mut self.slots[slot];
        let value = node.value.take()?;
        node.generation = node.generation.wrapping_add(1);
        node.prev = None;
        node.next = None;
        node.linked = false;
        self.free.push(slot);
        Some(value)
    }

    fn link_between(&mut self, slot: usize, prev: Option<usize>, next: Option<usize>) {
        let node = &mut self.slots[slot];
        node.prev = prev;
        node.next = next;
        node.linked = true;

        match prev {
            Some(p) => self.slots[p].next = Some(slot),
            None => self.head = Some(slot),
        }
        match next {
            Some(n) => self.slots[n].prev = Some(slot),
            None => self.tail = Some(slot),
        }
        self.len += 1;
    }

    fn unlink_slot(&mut self, slot: usize) {
        let node = &mut self.slots[slot];
        let prev = node.prev.take();
        let next = node.next.take();
        node.linked = false;

        match prev {
            Some(p) => self.slots[p].next = next,
            None => self.head = next,
        }
        match next {
            Some(n) => self.slots[n].prev = prev,
            None => self.tail = prev,
        }
        self.len -= 1;
    }
}

impl<T: fmt::Debug> fmt::Debug for LinkedList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T> FromIterator<T> for LinkedList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut list = Self::new();
        list.extend(iter);
        list
    }
}

impl<T> Extend<T> for LinkedList<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.add_last(value);
        }
    }
}

/// Borrowing iterator over linked values.
pub struct Iter<'a, T> {
    list: &'a LinkedList<T>,
    cursor: Option<usize>,
    remaining: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        let slot = self.cursor?;
        let node = &self.list.slots[slot];
        self.cursor = node.next;
        self.remaining = self.remaining.saturating_sub(1);
        node.value.as_ref()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, T> IntoIterator for &'a LinkedList<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}

/// A live sequence over a shared list.
///
/// Each pull borrows the list only for the duration of the pull, so the
/// list may be mutated between pulls. A cursor whose next node was removed
/// in the meantime ends early.
pub fn shared_seq<T>(list: &Rc<RefCell<LinkedList<T>>>) -> Seq<T>
where
    T: Clone + 'static,
{
    let list = Rc::clone(list);
    Seq::from_fn(move || LiveCursor {
        list: Rc::clone(&list),
        next: None,
        started: false,
    })
}

struct LiveCursor<T> {
    list: Rc<RefCell<LinkedList<T>>>,
    next: Option<NodeId>,
    started: bool,
}

impl<T: Clone> Iterator for LiveCursor<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        let list = self.list.borrow();
        let node = if self.started {
            self.next?
        } else {
            self.started = true;
            list.first_node()?
        };
        let value = list.get(node).ok()?.clone();
        self.next = list.next_node(node).ok().flatten();
        Some(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn walk<T>(list: &LinkedList<T>) -> usize {
        let mut count = 0;
        let mut cursor = list.first_node();
        while let Some(node) = cursor {
            count += 1;
            cursor = list.next_node(node).unwrap();
        }
        count
    }

    #[test]
    fn test_add_and_navigate() {
        let mut list = LinkedList::new();
        let b = list.add_last("b");
        let a = list.add_first("a");
        let d = list.add_last("d");
        let c = list.add_before(d, "c").unwrap();
        list.add_after(d, "e").unwrap();

        assert_eq!(list.iter().copied().collect::<Vec<_>>(), vec!["a", "b", "c", "d", "e"]);
        assert_eq!(list.first_node(), Some(a));
        assert_eq!(list.next_node(b).unwrap(), Some(c));
        assert_eq!(list.prev_node(a).unwrap(), None);
        assert_eq!(walk(&list), list.len());
    }

    #[test]
    fn test_freed_slot_rejects_old_handle() {
        let mut list = LinkedList::new();
        let first = list.add_last(1);
        assert_eq!(list.remove_node(first), Ok(1));

        let reused = list.add_last(2);
        assert_eq!(reused.slot, first.slot);
        assert_eq!(list.get(first), Err(Error::StaleNode));
        assert_eq!(list.get(reused), Ok(&2));
    }

    #[test]
    fn test_foreign_handle() {
        let mut a = LinkedList::new();
        let mut b = LinkedList::new();
        let node = a.add_last(1);
        b.add_last(1);
        assert_eq!(b.get(node), Err(Error::ForeignNode));
        assert_eq!(b.add_after(node, 2), Err(Error::ForeignNode));
    }

    #[test]
    fn test_single_element_resets() {
        let mut list = LinkedList::new();
        list.add_last(7);
        assert_eq!(list.remove_last(), Ok(7));
        assert!(list.is_empty());
        assert_eq!(list.first_node(), None);
        assert_eq!(list.last_node(), None);
        assert!(matches!(list.remove_first(), Err(Error::Empty { .. })));
    }

    #[test]
    fn test_clear_frees_every_slot() {
        let mut list: LinkedList<i32> = (0..4).collect();
        let kept = list.first_node().unwrap();
        let detached = list.last_node().unwrap();
        list.unlink(detached).unwrap();
        list.clear();

        assert_eq!(list.len(), 0);
        assert_eq!(list.get(kept), Err(Error::StaleNode));
        assert_eq!(list.get(detached), Err(Error::StaleNode));
        assert_eq!(list.free.len(), 4);
    }

    #[test]
    fn test_shrink_on_clear_keeps_handles_stale() {
        let config = QueryConfig {
            collection_capacity: 4,
            shrink_on_clear: true,
        };
        let mut list = LinkedList::with_config(&config);
        let old = list.add_last('x');
        list.clear();
        assert!(list.slots.is_empty());

        let new = list.add_last('y');
        assert_eq!(new.slot, old.slot);
        assert_eq!(list.get(old), Err(Error::StaleNode));
        assert_eq!(list.get(new), Ok(&'y'));
    }
}
