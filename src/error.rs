//! Error kinds surfaced by the voter, the safe traversal path, and the
//! fault-injection harness.

/// Failure modes of a RHAMT instance.
///
/// `read`, `insert`, and `remove` never return this type: an
/// [`RhamtError::UnrepairableCorruption`] or [`RhamtError::DanglingReference`]
/// that survives a safe-path restart is turned into a panic at the call
/// boundary instead, matching the "unrecoverable corruption aborts the call"
/// policy of the golden-path surface. This type is the `Err` of the internal
/// voting/traversal machinery and of every [`crate::Injector`] method.
#[derive(Debug, thiserror::Error)]
pub enum RhamtError {
    /// The voter found no value with a strict majority among its replicas.
    #[error("no strict majority among {width} redundant copies")]
    NoConsensus {
        /// Number of replicas the voter was asked to reconcile (`2F+1`).
        width: usize,
    },

    /// The safe path voted and repaired, but the result still does not
    /// match the expected value (more than `F` replicas were corrupted).
    #[error("corruption could not be repaired by voting")]
    UnrepairableCorruption,

    /// A redundant pointer did not resolve to a live arena node. Taken on
    /// the fast path, this plays the role the original single-event-upset
    /// design gave a signal handler trapping a dereference into unmapped
    /// memory: it triggers a safe-path restart rather than a crash.
    #[error("redundant pointer referenced a freed or out-of-bounds arena slot")]
    DanglingReference,

    /// An [`crate::Injector`] argument exceeded a structural bound.
    #[error("{what} out of range: {value} (limit {limit})")]
    OutOfRange {
        /// Name of the argument that violated its bound.
        what: &'static str,
        /// The offending value.
        value: usize,
        /// The largest value that would have been accepted.
        limit: usize,
    },

    /// An [`crate::Injector`] operation targeted a path that does not
    /// resolve to the node kind the operation expects.
    #[error("operation does not apply to the targeted node")]
    InvalidOperation,
}

impl RhamtError {
    /// Builds an [`RhamtError::OutOfRange`] with a human-readable argument
    /// name, keeping call sites terse.
    pub(crate) const fn out_of_range(what: &'static str, value: usize, limit: usize) -> Self {
        Self::OutOfRange { what, value, limit }
    }
}

/// Logs and panics at the golden-path call boundary. `read`/`insert`/`remove`
/// never return a `Result`; an error that survives a safe-path restart
/// aborts the call here instead.
pub(crate) fn abort(reason: RhamtError) -> ! {
    tracing::error!(error = %reason, "unrecoverable corruption at container boundary");
    panic!("{reason}")
}
