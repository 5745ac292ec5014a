//! A Reliable Hash Array Mapped Trie (RHAMT).
//!
//! RHAMT is a HAMT that tolerates a bounded number of bit-level or
//! structural corruptions of its own internal nodes. Every internal child
//! pointer and every leaf-stored hash is kept in `2F+1` redundant copies for
//! a compile-time fault-tolerance factor `F`. A majority-voting procedure
//! recovers the correct value whenever at most `F` of the `2F+1` copies
//! disagree.
//!
//! # Two traversal paths
//!
//! - **Fast path** trusts the first replica of each pointer and verifies
//!   only at the leaf, via a vote over the leaf's redundant hashes. This is
//!   the path taken on every access when nothing has gone wrong.
//! - **Safe path** votes on every redundant pointer before following it,
//!   repairing corrupted replicas in place as it goes. It is entered
//!   automatically whenever the fast path detects an inconsistency (a
//!   pointer that does not resolve to a live node, or a leaf hash that
//!   disagrees with the key being looked up), and the whole operation is
//!   restarted from the root.
//!
//! # Key properties
//!
//! - **Bounded fault tolerance**: masks up to `F` corrupted replicas per
//!   protected datum; `F + 1` or more corruptions in one place surface as
//!   [`RhamtError::UnrepairableCorruption`] rather than a silently wrong
//!   answer.
//! - **Zero runtime overhead at `F == 0`**: the voting branches are
//!   compile-time dead on the degenerate, non-redundant instantiation.
//! - **Zero `unsafe`**: corrupted pointers are modeled as arena indices that
//!   fail a bounds check, not as raw pointers guarded by a signal handler.
//!
//! # Fault injection
//!
//! [`Injector`] is a white-box harness, grounded in the same recovery
//! contract, that deliberately corrupts redundant copies to exercise the
//! voter and the safe path in tests.

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![allow(clippy::module_name_repetitions)]

mod arena;
mod error;
mod hash_width;
mod injector;
mod node;
mod ops;
mod rhamt;
mod voter;

#[cfg(test)]
mod tests;

pub use error::RhamtError;
pub use hash_width::HashWidth;
pub use injector::{Injector, RawNodeId};
pub use rhamt::Rhamt;
