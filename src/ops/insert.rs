//! Insertion: locate (materializing any missing `SplitNode`/`LeafNode`
//! along the way), write the leaf entry, then propagate a `count` delta
//! of 1 up every level on the path if the key was genuinely new.
//!
//! No node is cloned — unlike a copy-on-write design, RHAMT mutates nodes
//! in place, so `K`/`V` never need a `Clone` bound here.

use std::hash::Hash;

use crate::error::{abort, RhamtError};
use crate::hash_width::HashWidth;
use crate::node::Node;
use crate::ops::locate;
use crate::rhamt::Rhamt;

pub(crate) fn insert<'a, K, V, H, const F: usize>(
    rhamt: &'a mut Rhamt<K, V, H, F>,
    key: K,
    value: V,
) -> &'a V
where
    K: Hash + Eq,
    H: HashWidth,
{
    let descent = locate::<K, V, H, F>(rhamt, &key, true)
        .expect("insert always materializes a leaf and never reports absence");

    let (index, inserted) = match rhamt.arena.get_mut(descent.leaf) {
        Some(Node::Leaf(leaf)) => leaf.insert_local(key, value),
        _ => abort(RhamtError::DanglingReference),
    };

    if inserted {
        for (node_id, _slot) in &descent.path {
            match rhamt.arena.get_mut(*node_id) {
                Some(Node::Split(sp)) => sp.count += 1,
                _ => abort(RhamtError::DanglingReference),
            }
        }
    }

    match rhamt.arena.get(descent.leaf) {
        Some(Node::Leaf(leaf)) => &leaf.entries[index].1,
        _ => unreachable!("the leaf just written to cannot have vanished"),
    }
}
