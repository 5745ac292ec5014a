//! The fast/safe traversal state machine (`spec.md` §4.5), shared by
//! `read`, `insert`, and `remove`: all three differ only in what they do
//! once a leaf has been located, not in how they get there.
//!
//! Because every hash width has a finite `MAXDEPTH`, descent is a bounded
//! loop over [`SplitNode`](crate::node::SplitNode) levels rather than
//! recursion — there is no node-by-value copy trick to thread a borrow
//! through, and no risk of stack depth tracking hash width. Each loop
//! iteration re-borrows the arena fresh, so mutation (voting repairs,
//! materializing a missing child) and the read that decides the next hop
//! never alias.

use std::hash::Hash;

use crate::arena::{Arena, NodeId};
use crate::error::{abort, RhamtError};
use crate::hash_width::{hash_key, HashWidth};
use crate::node::{LeafNode, Node, SplitNode};
use crate::rhamt::Rhamt;
use crate::voter::vote;

/// Sentinel for "this traversal hit an inconsistency it cannot itself
/// resolve" — a dangling pointer on the fast path (no voting happened to
/// catch it), or a failed/contradicted vote on the safe path. The caller
/// decides what that means: the fast path retries via the safe path: the
/// safe path has no further fallback and turns it into a public error.
pub(crate) struct Broken;

/// The path taken to reach a leaf: each visited `SplitNode`'s id paired
/// with the slot index chosen there, root first, plus the leaf itself.
/// `insert` walks this forward to bump every level's `count`; `remove`
/// walks it in reverse to decrement counts and prune emptied subtrees.
pub(crate) struct Descent {
    pub(crate) leaf: NodeId,
    pub(crate) path: Vec<(NodeId, usize)>,
}

/// Descends from `root` toward the leaf addressed by `hash`.
///
/// `create`: materialize a `SplitNode`/`LeafNode` into an empty slot
/// (insert) rather than stopping there (read/remove).
///
/// `safe`: vote on each redundant pointer slot before trusting it (and
/// repair it in place) rather than blindly following the first replica.
///
/// An empty slot encountered while `!safe && F > 0` is itself ambiguous —
/// it is indistinguishable from a corrupted pointer whose every live
/// replica was nulled out — so the fast path cannot conclude "key absent"
/// on its own; it reports [`Broken`] and defers to a voted safe-path
/// confirmation. At `F == 0` there is no redundancy to distrust, so an
/// empty slot is taken at face value.
pub(crate) fn descend<K, V, H, const F: usize>(
    arena: &mut Arena<K, V, H>,
    root: NodeId,
    hash: H,
    create: bool,
    safe: bool,
) -> Result<Option<Descent>, Broken>
where
    H: HashWidth,
{
    let ft_width = 2 * F + 1;
    let mut current = root;
    let mut path = Vec::with_capacity(H::MAXDEPTH as usize);

    for depth in 0..H::MAXDEPTH {
        let slot = hash.subhash(depth);

        let Some(Node::Split(sp)) = arena.get_mut(current) else {
            return Err(Broken);
        };

        if safe && F > 0 {
            vote(&mut sp.children[slot], F).map_err(|_| Broken)?;
        }

        let existing = sp.children[slot][0];

        let child = match existing {
            Some(id) => id,
            None if create => {
                let is_last = depth + 1 == H::MAXDEPTH;
                let new_node = if is_last {
                    Node::Leaf(LeafNode::new(hash, ft_width))
                } else {
                    Node::Split(SplitNode::new(ft_width))
                };
                let new_id = arena.alloc(new_node);
                let Some(Node::Split(sp)) = arena.get_mut(current) else {
                    unreachable!("current resolved moments ago and nothing else can free it mid-call")
                };
                sp.fill_slot(slot, new_id, ft_width);
                new_id
            }
            None => {
                if !safe && F > 0 {
                    return Err(Broken);
                }
                return Ok(None);
            }
        };

        path.push((current, slot));
        current = child;
    }

    Ok(Some(Descent { leaf: current, path }))
}

/// Votes on a leaf's redundant hash array and checks the voted (or already
/// unanimous) value against the hash that addressed it. This is the fast
/// path's *only* verification step (`spec.md` §4.5: "if F > 0, invoke the
/// hash-voter on hashes... restart the whole operation from root" on
/// either a failed vote or a post-vote mismatch) and the safe path's final
/// one.
fn verify_leaf<K, V, H, const F: usize>(
    arena: &mut Arena<K, V, H>,
    leaf: NodeId,
    hash: H,
) -> Result<(), Broken>
where
    H: HashWidth,
{
    let Some(Node::Leaf(leaf)) = arena.get_mut(leaf) else {
        return Err(Broken);
    };
    if F > 0 {
        vote(&mut leaf.hashes, F).map_err(|_| Broken)?;
    }
    if leaf.hashes[0] == hash {
        Ok(())
    } else {
        Err(Broken)
    }
}

/// Locates the leaf addressed by `key`, trying the fast path first and
/// falling back to a voted, self-repairing safe-path restart from the root
/// on any detected inconsistency.
///
/// Returns `None` only when the safe path — the one traversal mode
/// entitled to trust an empty slot — confirms the key is genuinely absent.
/// A corruption that survives the safe-path restart is not returned as an
/// error: per the façade's contract (`spec.md` §7), it aborts the call
/// right here.
pub(crate) fn locate<K, V, H, const F: usize>(
    rhamt: &mut Rhamt<K, V, H, F>,
    key: &K,
    create: bool,
) -> Option<Descent>
where
    K: Hash + Eq,
    H: HashWidth,
{
    let hash: H = hash_key(key);

    match descend::<K, V, H, F>(&mut rhamt.arena, rhamt.root, hash, create, false) {
        Ok(None) => return None,
        Ok(Some(descent)) => {
            if verify_leaf::<K, V, H, F>(&mut rhamt.arena, descent.leaf, hash).is_ok() {
                return Some(descent);
            }
        }
        Err(Broken) => {}
    }

    tracing::warn!("fast path detected an inconsistency; restarting from root on the safe path");

    let descent = match descend::<K, V, H, F>(&mut rhamt.arena, rhamt.root, hash, create, true) {
        Ok(Some(descent)) => descent,
        Ok(None) => return None,
        Err(Broken) => abort(RhamtError::UnrepairableCorruption),
    };

    if verify_leaf::<K, V, H, F>(&mut rhamt.arena, descent.leaf, hash).is_err() {
        abort(RhamtError::UnrepairableCorruption);
    }

    Some(descent)
}
