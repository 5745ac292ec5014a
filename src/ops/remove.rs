//! Removal: locate the leaf without creating anything, delete the matching
//! entry, then walk the descent path bottom-up decrementing `count` and
//! pruning any subtree that has become empty — mirroring the original's
//! recursive post-order `count`/deallocation pass, just as an explicit
//! stack (the recorded path) instead of the call stack.

use std::hash::Hash;

use crate::error::{abort, RhamtError};
use crate::hash_width::HashWidth;
use crate::node::Node;
use crate::ops::locate;
use crate::rhamt::Rhamt;

pub(crate) fn remove<K, V, H, const F: usize>(rhamt: &mut Rhamt<K, V, H, F>, key: &K) -> bool
where
    K: Hash + Eq,
    H: HashWidth,
{
    let Some(descent) = locate::<K, V, H, F>(rhamt, key, false) else {
        return false;
    };

    let removed = match rhamt.arena.get_mut(descent.leaf) {
        Some(Node::Leaf(leaf)) => leaf.remove_local(key),
        _ => abort(RhamtError::DanglingReference),
    };

    if !removed {
        return false;
    }

    let ft_width = 2 * F + 1;

    // `freed` tracks the node one level below the one currently being
    // processed; `freed_is_empty` says whether that node should be pruned
    // from the parent we are about to look at. Pruning lags one step
    // behind the count decrement so each node is freed by exactly the
    // parent that owns its slot, never by itself.
    let mut freed = descent.leaf;
    let mut freed_is_empty = matches!(
        rhamt.arena.get(freed),
        Some(Node::Leaf(leaf)) if leaf.entries.is_empty()
    );

    for &(node_id, slot) in descent.path.iter().rev() {
        let now_empty = {
            let Some(Node::Split(sp)) = rhamt.arena.get_mut(node_id) else {
                abort(RhamtError::DanglingReference);
            };
            sp.count -= 1;
            if freed_is_empty {
                sp.clear_slot(slot, ft_width);
            }
            sp.count == 0
        };

        if freed_is_empty {
            rhamt.arena.free(freed);
        }

        freed = node_id;
        // The root lives for the container's lifetime and is never pruned,
        // even if every key under it has just been removed.
        freed_is_empty = now_empty && node_id != rhamt.root;
    }

    true
}
