//! White-box fault-injection harness. Deliberately breaches the
//! encapsulation [`crate::Rhamt`] otherwise holds: every method here reaches
//! straight into a [`crate::node::SplitNode`]'s or
//! [`crate::node::LeafNode`]'s redundant replicas and overwrites them, to
//! let tests manufacture exactly the corruption the voter and the safe path
//! are supposed to mask. Used only by tests — nothing in the golden-path
//! facade ever constructs one.

use std::hash::Hash;

use crate::arena::{Arena, NodeId};
use crate::error::RhamtError;
use crate::hash_width::HashWidth;
use crate::node::{Node, NCHILD};
use crate::rhamt::Rhamt;

/// An unchecked arena slot index for fault injection, distinct from the
/// crate-private [`NodeId`] it wraps. Unlike `NodeId`, a `RawNodeId` is not
/// expected to address a live node — manufacturing a dangling or
/// out-of-bounds one is the entire point of this module.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RawNodeId(
    /// The raw slot index, not checked against the arena's current bounds.
    pub u32,
);

impl RawNodeId {
    fn to_node_id(self) -> NodeId {
        NodeId::from_raw(self.0)
    }

    fn random() -> Self {
        Self(rand::random())
    }
}

/// Wraps a [`Rhamt`] and exposes the corruption operations of `spec.md`
/// §4.6 alongside pass-through `insert`/`read`/`remove`/`len` so a test can
/// drive a single handle throughout a scenario.
pub struct Injector<K, V, H = u32, const F: usize = 1> {
    rhamt: Rhamt<K, V, H, F>,
}

impl<K, V, H, const F: usize> Injector<K, V, H, F>
where
    H: HashWidth,
{
    /// Wraps a freshly constructed, empty [`Rhamt`].
    #[must_use]
    pub fn new() -> Self {
        Self { rhamt: Rhamt::new() }
    }

    /// Number of distinct keys currently stored.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rhamt.len()
    }

    /// Whether the wrapped container holds no keys.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rhamt.is_empty()
    }
}

impl<K, V, H, const F: usize> Default for Injector<K, V, H, F>
where
    H: HashWidth,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, H, const F: usize> Injector<K, V, H, F>
where
    K: Hash + Eq,
    H: HashWidth,
{
    /// Pass-through to [`Rhamt::insert`].
    pub fn insert(&mut self, key: K, value: V) -> &V {
        self.rhamt.insert(key, value)
    }

    /// Pass-through to [`Rhamt::read`].
    pub fn read(&mut self, key: &K) -> Option<&V> {
        self.rhamt.read(key)
    }

    /// Pass-through to [`Rhamt::remove`].
    pub fn remove(&mut self, key: &K) -> bool {
        self.rhamt.remove(key)
    }

    /// Descends the path addressed by `hash` in the first replica only,
    /// then swaps `children[a][0]` and `children[b][0]` of the `SplitNode`
    /// reached at `depth`.
    pub fn swap_children_local(&mut self, hash: H, depth: u32, a: usize, b: usize) -> Result<(), RhamtError> {
        check_depth_bounds::<H>(depth)?;
        check_child_bounds(a)?;
        check_child_bounds(b)?;

        let target = raw_descend(&self.rhamt.arena, self.rhamt.root, hash, depth)?;
        match self.rhamt.arena.get_mut(target) {
            Some(Node::Split(sp)) => {
                let tmp = sp.children[a][0];
                sp.children[a][0] = sp.children[b][0];
                sp.children[b][0] = tmp;
                Ok(())
            }
            _ => Err(RhamtError::InvalidOperation),
        }
    }

    /// Descends both `(h1, d1)` and `(h2, d2)` in their first replica, then
    /// swaps `children[slot][0]` between the two `SplitNode`s reached.
    pub fn swap_children_other(
        &mut self,
        h1: H,
        d1: u32,
        h2: H,
        d2: u32,
        slot: usize,
    ) -> Result<(), RhamtError> {
        check_depth_bounds::<H>(d1)?;
        check_depth_bounds::<H>(d2)?;
        check_child_bounds(slot)?;

        let t1 = raw_descend(&self.rhamt.arena, self.rhamt.root, h1, d1)?;
        let t2 = raw_descend(&self.rhamt.arena, self.rhamt.root, h2, d2)?;

        let val1 = match self.rhamt.arena.get(t1) {
            Some(Node::Split(sp)) => sp.children[slot][0],
            _ => return Err(RhamtError::InvalidOperation),
        };
        let val2 = match self.rhamt.arena.get(t2) {
            Some(Node::Split(sp)) => sp.children[slot][0],
            _ => return Err(RhamtError::InvalidOperation),
        };

        match self.rhamt.arena.get_mut(t1) {
            Some(Node::Split(sp)) => sp.children[slot][0] = val2,
            _ => return Err(RhamtError::InvalidOperation),
        }
        match self.rhamt.arena.get_mut(t2) {
            Some(Node::Split(sp)) => sp.children[slot][0] = val1,
            _ => return Err(RhamtError::InvalidOperation),
        }
        Ok(())
    }

    /// Overwrites the first `count` redundant copies of `children[slot]` at
    /// the `SplitNode` addressed by `(hash, depth)`. `val = None` draws a
    /// PRNG sample from `rand` instead of an explicit value — garbage
    /// rather than a deliberately chosen replacement, the more realistic
    /// single-event-upset shape.
    pub fn set_child(
        &mut self,
        hash: H,
        depth: u32,
        slot: usize,
        val: Option<Option<RawNodeId>>,
        count: usize,
    ) -> Result<(), RhamtError> {
        check_depth_bounds::<H>(depth)?;
        check_child_bounds(slot)?;
        check_count_bounds(count, Rhamt::<K, V, H, F>::FT_WIDTH)?;

        let target = raw_descend(&self.rhamt.arena, self.rhamt.root, hash, depth)?;
        let Some(Node::Split(sp)) = self.rhamt.arena.get_mut(target) else {
            return Err(RhamtError::InvalidOperation);
        };

        for replica in sp.children[slot].iter_mut().take(count) {
            *replica = match val {
                Some(explicit) => explicit.map(RawNodeId::to_node_id),
                None => Some(RawNodeId::random().to_node_id()),
            };
        }
        Ok(())
    }

    /// Descends to the leaf addressed by `hash` and overwrites the first
    /// `count` redundant copies of its hash array, the same way
    /// [`Self::set_child`] corrupts a pointer slot.
    pub fn set_hash(&mut self, hash: H, val: Option<H>, count: usize) -> Result<(), RhamtError> {
        check_count_bounds(count, Rhamt::<K, V, H, F>::FT_WIDTH)?;

        let leaf_id = raw_descend(&self.rhamt.arena, self.rhamt.root, hash, H::MAXDEPTH)?;
        let Some(Node::Leaf(leaf)) = self.rhamt.arena.get_mut(leaf_id) else {
            return Err(RhamtError::InvalidOperation);
        };

        for replica in leaf.hashes.iter_mut().take(count) {
            *replica = val.unwrap_or_else(|| H::from_bits(rand::random()));
        }
        Ok(())
    }
}

/// Descends `steps` levels from `root` along `hash`'s path, following only
/// the first replica of each slot and performing no voting — the raw,
/// untrusting-nothing-extra counterpart to [`crate::ops::locate`], because
/// the whole point of this module is to reach nodes the safe path would
/// refuse to trust.
fn raw_descend<K, V, H>(arena: &Arena<K, V, H>, root: NodeId, hash: H, steps: u32) -> Result<NodeId, RhamtError>
where
    H: HashWidth,
{
    let mut current = root;
    for depth in 0..steps {
        let slot = hash.subhash(depth);
        let Some(Node::Split(sp)) = arena.get(current) else {
            return Err(RhamtError::InvalidOperation);
        };
        match sp.children[slot][0] {
            Some(id) => current = id,
            None => return Err(RhamtError::InvalidOperation),
        }
    }
    Ok(current)
}

fn check_depth_bounds<H: HashWidth>(depth: u32) -> Result<(), RhamtError> {
    if depth < H::MAXDEPTH {
        Ok(())
    } else {
        Err(RhamtError::out_of_range("depth", depth as usize, H::MAXDEPTH as usize - 1))
    }
}

fn check_child_bounds(slot: usize) -> Result<(), RhamtError> {
    if slot < NCHILD {
        Ok(())
    } else {
        Err(RhamtError::out_of_range("slot", slot, NCHILD - 1))
    }
}

fn check_count_bounds(count: usize, ft_width: usize) -> Result<(), RhamtError> {
    if count <= ft_width {
        Ok(())
    } else {
        Err(RhamtError::out_of_range("count", count, ft_width))
    }
}
