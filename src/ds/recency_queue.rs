//! Recency-ordered queue of cache keys.
//!
//! A doubly linked list of key nodes stored in a [`NodeArena`] and linked by
//! [`NodeId`] handles, bounded by two fixed sentinel nodes. Real nodes are
//! inserted strictly between the sentinels, so every live node always has two
//! neighbors and insert/remove logic has no null-edge special cases.
//!
//! ```text
//!   arena (NodeArena<QueueNode>)
//!   ┌────────┬──────────────────────────────────────────────────┐
//!   │ NodeId │ QueueNode { key, prev, next }                    │
//!   ├────────┼──────────────────────────────────────────────────┤
//!   │ id_0   │ { key: None (head), next: id_2, .. }             │
//!   │ id_1   │ { key: None (tail), prev: id_3, .. }             │
//!   │ id_2   │ { key: "b", prev: id_0, next: id_3 }             │
//!   │ id_3   │ { key: "a", prev: id_2, next: id_1 }             │
//!   └────────┴──────────────────────────────────────────────────┘
//!
//!   head ─► [ "b" ] ◄──► [ "a" ] ◄── tail
//!   (MRU)                  (LRU)
//! ```
//!
//! The queue knows nothing about values; it only maintains the total order
//! "most recently used → least recently used" over a set of keys, with O(1)
//! insert-at-front, move-to-front, arbitrary removal, and LRU access.
//!
//! [`touch`](RecencyQueue::touch) and [`discard`](RecencyQueue::discard)
//! return [`InconsistencyError`] when a node's neighbor links are not both
//! present or point outside the arena. That state is unreachable under
//! correct usage and signals structural corruption; callers are expected to
//! distrust the whole queue once it is observed.

use crate::ds::arena::{NodeArena, NodeId};
use crate::error::InconsistencyError;

#[derive(Debug)]
struct QueueNode {
    /// `None` for the two sentinels.
    key: Option<String>,
    prev: Option<NodeId>,
    next: Option<NodeId>,
}

#[derive(Debug)]
pub struct RecencyQueue {
    arena: NodeArena<QueueNode>,
    head: NodeId,
    tail: NodeId,
}

impl RecencyQueue {
    pub fn new() -> Self {
        let mut arena = NodeArena::new();
        let (head, tail) = Self::link_sentinels(&mut arena);
        Self { arena, head, tail }
    }

    fn link_sentinels(arena: &mut NodeArena<QueueNode>) -> (NodeId, NodeId) {
        let head = arena.alloc(QueueNode {
            key: None,
            prev: None,
            next: None,
        });
        let tail = arena.alloc(QueueNode {
            key: None,
            prev: Some(head),
            next: None,
        });
        if let Some(node) = arena.get_mut(head) {
            node.next = Some(tail);
        }
        (head, tail)
    }

    /// Number of tracked keys (sentinels excluded).
    pub fn len(&self) -> usize {
        self.arena.len().saturating_sub(2)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Creates a node for `key` and links it at the most-recently-used end.
    pub fn enqueue(&mut self, key: impl Into<String>) -> NodeId {
        let first = self.next_of(self.head).unwrap_or(self.tail);
        let id = self.arena.alloc(QueueNode {
            key: Some(key.into()),
            prev: Some(self.head),
            next: Some(first),
        });
        if let Some(node) = self.arena.get_mut(self.head) {
            node.next = Some(id);
        }
        if let Some(node) = self.arena.get_mut(first) {
            node.prev = Some(id);
        }
        id
    }

    /// Unlinks `id` from its current position and relinks it at the
    /// most-recently-used end.
    pub fn touch(&mut self, id: NodeId) -> Result<(), InconsistencyError> {
        self.unlink(id)?;
        let first = self.next_of(self.head).unwrap_or(self.tail);
        if let Some(node) = self.arena.get_mut(id) {
            node.prev = Some(self.head);
            node.next = Some(first);
        }
        if let Some(node) = self.arena.get_mut(self.head) {
            node.next = Some(id);
        }
        if let Some(node) = self.arena.get_mut(first) {
            node.prev = Some(id);
        }
        Ok(())
    }

    /// Unlinks `id` without relinking and frees its slot.
    pub fn discard(&mut self, id: NodeId) -> Result<(), InconsistencyError> {
        self.unlink(id)?;
        self.arena.free(id);
        Ok(())
    }

    /// Key of the least-recently-used node, or `None` when the queue is empty.
    pub fn peek_lru(&self) -> Option<&str> {
        let last = self.prev_of(self.tail)?;
        if last == self.head {
            return None;
        }
        self.arena.get(last).and_then(|node| node.key.as_deref())
    }

    /// Unlinks the least-recently-used node. No-op on an empty queue.
    pub fn evict_lru(&mut self) {
        let Some(last) = self.prev_of(self.tail) else {
            return;
        };
        if last == self.head {
            return;
        }
        // Bridge the second-to-last node straight to the tail sentinel.
        let Some(prev) = self.prev_of(last) else {
            return;
        };
        if let Some(node) = self.arena.get_mut(prev) {
            node.next = Some(self.tail);
        }
        if let Some(node) = self.arena.get_mut(self.tail) {
            node.prev = Some(prev);
        }
        self.arena.free(last);
    }

    /// Discards the entire chain and relinks fresh sentinels.
    pub fn flush(&mut self) {
        self.arena.clear();
        let (head, tail) = Self::link_sentinels(&mut self.arena);
        self.head = head;
        self.tail = tail;
    }

    fn next_of(&self, id: NodeId) -> Option<NodeId> {
        self.arena.get(id).and_then(|node| node.next)
    }

    fn prev_of(&self, id: NodeId) -> Option<NodeId> {
        self.arena.get(id).and_then(|node| node.prev)
    }

    /// Bridges `id`'s neighbors together, detaching it from the chain.
    ///
    /// Every live node must have two present, arena-resident neighbors;
    /// anything else is corruption.
    fn unlink(&mut self, id: NodeId) -> Result<(), InconsistencyError> {
        let (prev, next, key) = match self.arena.get(id) {
            Some(node) => (node.prev, node.next, node.key.clone()),
            None => {
                return Err(InconsistencyError::new(format!(
                    "queue node {} is not in the arena",
                    id.index()
                )))
            }
        };
        let key = key.unwrap_or_else(|| "<sentinel>".to_string());
        let (Some(prev), Some(next)) = (prev, next) else {
            return Err(InconsistencyError::new(format!(
                "queue node for {key:?} has a severed neighbor link"
            )));
        };
        if !self.arena.contains(prev) || !self.arena.contains(next) {
            return Err(InconsistencyError::new(format!(
                "queue node for {key:?} links to a vacated slot"
            )));
        }
        if let Some(node) = self.arena.get_mut(prev) {
            node.next = Some(next);
        }
        if let Some(node) = self.arena.get_mut(next) {
            node.prev = Some(prev);
        }
        Ok(())
    }

    #[cfg(any(test, debug_assertions))]
    pub fn debug_validate_invariants(&self) {
        let mut count = 0usize;
        let mut prev = None;
        let mut current = Some(self.head);
        while let Some(id) = current {
            let node = self.arena.get(id).expect("chain points at a vacated slot");
            assert_eq!(node.prev, prev, "backlink mismatch");
            if id != self.head && id != self.tail {
                assert!(node.key.is_some(), "interior node without a key");
                count += 1;
                assert!(count <= self.len(), "cycle detected in chain");
            }
            prev = Some(id);
            if id == self.tail {
                assert!(node.next.is_none());
                break;
            }
            current = node.next;
        }
        assert_eq!(prev, Some(self.tail), "chain does not reach the tail");
        assert_eq!(count, self.len());
    }

    /// Test-only corruption hook for the self-healing tests.
    #[cfg(test)]
    pub(crate) fn sever_links(&mut self, id: NodeId) {
        if let Some(node) = self.arena.get_mut(id) {
            node.prev = None;
            node.next = None;
        }
    }

    /// Test-only view of the chain from MRU to LRU.
    #[cfg(test)]
    pub(crate) fn snapshot_keys(&self) -> Vec<String> {
        let mut keys = Vec::new();
        let mut current = self.next_of(self.head);
        while let Some(id) = current {
            if id == self.tail {
                break;
            }
            let Some(node) = self.arena.get(id) else {
                break;
            };
            if let Some(key) = &node.key {
                keys.push(key.clone());
            }
            current = node.next;
        }
        keys
    }
}

impl Default for RecencyQueue {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_queue_is_empty() {
        let queue = RecencyQueue::new();
        assert!(queue.is_empty());
        assert_eq!(queue.peek_lru(), None);
        queue.debug_validate_invariants();
    }

    #[test]
    fn enqueue_orders_most_recent_first() {
        let mut queue = RecencyQueue::new();
        queue.enqueue("a");
        queue.enqueue("b");
        queue.enqueue("c");

        assert_eq!(queue.len(), 3);
        assert_eq!(queue.snapshot_keys(), vec!["c", "b", "a"]);
        assert_eq!(queue.peek_lru(), Some("a"));
        queue.debug_validate_invariants();
    }

    #[test]
    fn touch_promotes_to_front() {
        let mut queue = RecencyQueue::new();
        let a = queue.enqueue("a");
        queue.enqueue("b");
        queue.enqueue("c");

        queue.touch(a).unwrap();
        assert_eq!(queue.snapshot_keys(), vec!["a", "c", "b"]);
        assert_eq!(queue.peek_lru(), Some("b"));
        queue.debug_validate_invariants();
    }

    #[test]
    fn touch_front_node_keeps_order() {
        let mut queue = RecencyQueue::new();
        queue.enqueue("a");
        let b = queue.enqueue("b");

        queue.touch(b).unwrap();
        assert_eq!(queue.snapshot_keys(), vec!["b", "a"]);
        queue.debug_validate_invariants();
    }

    #[test]
    fn touch_single_node_queue() {
        let mut queue = RecencyQueue::new();
        let a = queue.enqueue("a");
        queue.touch(a).unwrap();
        assert_eq!(queue.snapshot_keys(), vec!["a"]);
        assert_eq!(queue.peek_lru(), Some("a"));
        queue.debug_validate_invariants();
    }

    #[test]
    fn discard_removes_interior_node() {
        let mut queue = RecencyQueue::new();
        queue.enqueue("a");
        let b = queue.enqueue("b");
        queue.enqueue("c");

        queue.discard(b).unwrap();
        assert_eq!(queue.snapshot_keys(), vec!["c", "a"]);
        assert_eq!(queue.len(), 2);
        queue.debug_validate_invariants();
    }

    #[test]
    fn evict_lru_drops_tail_most_node() {
        let mut queue = RecencyQueue::new();
        queue.enqueue("a");
        queue.enqueue("b");

        queue.evict_lru();
        assert_eq!(queue.snapshot_keys(), vec!["b"]);
        assert_eq!(queue.peek_lru(), Some("b"));

        queue.evict_lru();
        assert!(queue.is_empty());
        assert_eq!(queue.peek_lru(), None);

        // Eviction on an empty queue is a no-op.
        queue.evict_lru();
        assert!(queue.is_empty());
        queue.debug_validate_invariants();
    }

    #[test]
    fn flush_resets_and_queue_is_reusable() {
        let mut queue = RecencyQueue::new();
        queue.enqueue("a");
        queue.enqueue("b");

        queue.flush();
        assert!(queue.is_empty());
        assert_eq!(queue.peek_lru(), None);

        queue.enqueue("c");
        assert_eq!(queue.peek_lru(), Some("c"));
        queue.debug_validate_invariants();
    }

    #[test]
    fn touch_severed_node_reports_inconsistency() {
        let mut queue = RecencyQueue::new();
        let a = queue.enqueue("a");
        queue.enqueue("b");

        queue.sever_links(a);
        let err = queue.touch(a).unwrap_err();
        assert!(err.to_string().contains("severed"));
    }

    #[test]
    fn discard_severed_node_reports_inconsistency() {
        let mut queue = RecencyQueue::new();
        let a = queue.enqueue("a");

        queue.sever_links(a);
        let err = queue.discard(a).unwrap_err();
        assert!(err.to_string().contains("severed"));
    }

    #[test]
    fn touch_vacated_handle_reports_inconsistency() {
        let mut queue = RecencyQueue::new();
        let a = queue.enqueue("a");
        queue.discard(a).unwrap();

        let err = queue.touch(a).unwrap_err();
        assert!(err.to_string().contains("not in the arena"));
    }

    #[test]
    fn node_slots_are_reused_after_discard() {
        let mut queue = RecencyQueue::new();
        let a = queue.enqueue("a");
        queue.discard(a).unwrap();

        let b = queue.enqueue("b");
        assert_eq!(b.index(), a.index());
        assert_eq!(queue.peek_lru(), Some("b"));
        queue.debug_validate_invariants();
    }
}
