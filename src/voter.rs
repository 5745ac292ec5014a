//! Majority-vote reconciliation over a redundant, fixed-width sequence.

use crate::error::RhamtError;

/// Reconciles `seq`, a sequence of `2F+1` redundant copies of some
/// equality-comparable datum (a child pointer slot or a leaf's hash array).
///
/// Tallies up to `seq.len()` distinct value/count pairs with a linear scan,
/// exiting early on unanimity. If any value occurs more than `f` times —
/// a strict majority for `2F+1` replicas — every entry of `seq` is
/// overwritten with it and voting succeeds, repairing whichever replicas
/// disagreed. Otherwise the replicas are split too evenly to recover a
/// trustworthy value and voting fails with [`RhamtError::NoConsensus`].
///
/// With `f == 0` this is a no-op that always succeeds: there is only one
/// replica, so "majority" is vacuous. The check is on `f` itself rather
/// than on a separate flag so that, at `F == 0`, the call is monomorphized
/// down to nothing for the compiler to eliminate.
pub(crate) fn vote<T: Clone + PartialEq>(seq: &mut [T], f: usize) -> Result<(), RhamtError> {
    if f == 0 {
        return Ok(());
    }

    let mut vals: Vec<T> = Vec::with_capacity(seq.len());
    let mut counts: Vec<u32> = Vec::with_capacity(seq.len());

    for item in seq.iter() {
        if let Some(pos) = vals.iter().position(|v| v == item) {
            counts[pos] += 1;
        } else {
            vals.push(item.clone());
            counts.push(1);
        }
    }

    // Full agreement — nothing to repair.
    if vals.len() == 1 {
        return Ok(());
    }

    for (val, count) in vals.iter().zip(counts.iter()) {
        let count = *count as usize;
        if count == seq.len() {
            return Ok(());
        }
        if count > f {
            tracing::debug!(
                majority_count = count,
                replicas = seq.len(),
                "voter repairing disagreeing replicas"
            );
            for slot in seq.iter_mut() {
                *slot = val.clone();
            }
            return Ok(());
        }
    }

    Err(RhamtError::NoConsensus { width: seq.len() })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unanimous_is_a_no_op() {
        let mut seq = [7, 7, 7];
        vote(&mut seq, 1).unwrap();
        assert_eq!(seq, [7, 7, 7]);
    }

    #[test]
    fn strict_majority_repairs_minority() {
        let mut seq = [7, 7, 9];
        vote(&mut seq, 1).unwrap();
        assert_eq!(seq, [7, 7, 7]);
    }

    #[test]
    fn even_split_is_no_consensus() {
        // FT_WIDTH = 5 (F = 2): 2 vs 2 vs 1 has no count > f = 2.
        let mut seq = [1, 1, 2, 2, 3];
        let err = vote(&mut seq, 2).unwrap_err();
        assert!(matches!(err, RhamtError::NoConsensus { width: 5 }));
    }

    #[test]
    fn f_zero_never_touches_the_sequence() {
        let mut seq = [1, 2, 3];
        vote(&mut seq, 0).unwrap();
        assert_eq!(seq, [1, 2, 3]);
    }

    #[test]
    fn minority_corruption_is_masked() {
        // FT_WIDTH = 3 (F = 1): one corrupted replica is still a minority.
        let mut seq = [4, 99, 4];
        vote(&mut seq, 1).unwrap();
        assert_eq!(seq, [4, 4, 4]);
    }
}
