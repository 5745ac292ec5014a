//! Slab arena addressed by typed index, the resolution of the "arena +
//! indices" design note: nodes are never referenced by raw pointer, so a
//! corrupted reference is representable as "index out of range" or "index
//! of a freed slot" — a cheap, ordinary bounds check — rather than a
//! dereference that might fault. `F > 0`'s process-global SIGSEGV
//! trampoline has no counterpart here; see `DanglingReference` in
//! [`crate::RhamtError`].

use crate::node::Node;

/// An index into an [`Arena`]. Redundant copies of the same logical pointer
/// are multiple `NodeId`s that, absent corruption, compare equal — they are
/// aliases of one arena slot, never independent copies of a node's data.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub(crate) struct NodeId(u32);

impl NodeId {
    /// Constructs a `NodeId` from a raw index without checking that it
    /// addresses a live slot. Used only by [`crate::Injector`] to inject
    /// dangling or out-of-bounds references.
    pub(crate) const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    const fn index(self) -> usize {
        self.0 as usize
    }
}

/// Slab of nodes. A freed slot becomes `None` and its index is recycled on
/// the next allocation, so the arena never grows unboundedly under a
/// churning insert/remove workload.
pub(crate) struct Arena<K, V, H> {
    slots: Vec<Option<Node<K, V, H>>>,
    free: Vec<u32>,
}

impl<K, V, H> Arena<K, V, H> {
    pub(crate) const fn new() -> Self {
        Self { slots: Vec::new(), free: Vec::new() }
    }

    pub(crate) fn alloc(&mut self, node: Node<K, V, H>) -> NodeId {
        if let Some(raw) = self.free.pop() {
            self.slots[raw as usize] = Some(node);
            NodeId(raw)
        } else {
            self.slots.push(Some(node));
            NodeId((self.slots.len() - 1) as u32)
        }
    }

    /// Returns `None` for an index past the end of the slab or one that
    /// currently addresses a freed slot — the two corruption shapes the
    /// fast path must detect without ever dereferencing a raw pointer.
    pub(crate) fn get(&self, id: NodeId) -> Option<&Node<K, V, H>> {
        self.slots.get(id.index())?.as_ref()
    }

    pub(crate) fn get_mut(&mut self, id: NodeId) -> Option<&mut Node<K, V, H>> {
        self.slots.get_mut(id.index())?.as_mut()
    }

    pub(crate) fn free(&mut self, id: NodeId) {
        if let Some(slot) = self.slots.get_mut(id.index()) {
            *slot = None;
            self.free.push(id.0);
        }
    }

    /// Number of live (non-freed) slots. Test-only diagnostic, not part of
    /// the public surface.
    #[cfg(test)]
    pub(crate) fn live_len(&self) -> usize {
        self.slots.len() - self.free.len()
    }
}
