//! Lookup, routed through the same fast/safe traversal every other
//! operation uses. `create = false`: a missing path never materializes a
//! node.

use std::hash::Hash;

use crate::error::{abort, RhamtError};
use crate::hash_width::HashWidth;
use crate::node::Node;
use crate::ops::locate;
use crate::rhamt::Rhamt;

pub(crate) fn read<'a, K, V, H, const F: usize>(rhamt: &'a mut Rhamt<K, V, H, F>, key: &K) -> Option<&'a V>
where
    K: Hash + Eq,
    H: HashWidth,
{
    let descent = locate::<K, V, H, F>(rhamt, key, false)?;

    match rhamt.arena.get(descent.leaf) {
        Some(Node::Leaf(leaf)) => leaf.get(key),
        _ => abort(RhamtError::DanglingReference),
    }
}
