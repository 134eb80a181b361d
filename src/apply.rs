//! Applying permutations to sequences.
//!
//! Two composition styles are provided and deliberately kept distinct:
//!
//! * [`permute`] applies permutations in place with *scatter* semantics: the
//!   element at position i moves to position p(i).
//! * [`permuted`] builds a new vector with *gather* semantics: position i of
//!   the result reads from position p(i) of the input.
//!
//! For a single permutation the two are related by inversion (gathering
//! through p equals scattering through p's inverse), but chained calls over
//! the same permutation list do not pass through the same intermediate
//! states. Callers must pick one style and stay with it.
use std::error::Error;
use std::fmt;
use std::mem::replace;

use crate::perm::Perm;

/// An error which indicates that a permutation was applied to a sequence of a different length.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SizeMismatch {
    /// Length of the offending permutation.
    pub perm_len: usize,
    /// Length of the sequence it was applied to.
    pub base_len: usize,
}

impl fmt::Display for SizeMismatch {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "cannot apply a permutation of length {} to a sequence of length {}",
            self.perm_len, self.base_len
        )
    }
}

impl Error for SizeMismatch {}

/// Apply permutations to a sequence, in place.
///
/// The permutations are applied left to right, each one to the already permuted state of `base`.
/// Applying a permutation moves the element at position i to position p(i).
///
/// All lengths are checked up front: on a mismatch no element is moved and `base` comes back
/// completely untouched. An empty permutation list is a no-op. The permutations themselves are
/// never modified.
///
/// Each application follows the permutation's cycles, so no second buffer of elements is needed;
/// the only allocation is a visited bitset sized to the sequence, reused across permutations.
pub fn permute<T>(base: &mut [T], perms: &[&Perm]) -> Result<(), SizeMismatch> {
    check_lengths(base.len(), perms)?;

    let mut scratch = Vec::new();
    for perm in perms {
        scatter_with_scratch(perm, base, &mut scratch);
    }

    Ok(())
}

/// Apply permutations to a sequence, producing a new vector.
///
/// The permutations are applied left to right. Each step builds a sequence whose position i holds
/// the previous sequence's element at position p(i), and the final sequence is returned; `base`
/// itself is never modified.
///
/// All lengths are checked up front. An empty permutation list returns a copy of `base`.
pub fn permuted<T: Clone>(base: &[T], perms: &[&Perm]) -> Result<Vec<T>, SizeMismatch> {
    check_lengths(base.len(), perms)?;

    let mut out = base.to_vec();
    for perm in perms {
        out = perm
            .as_slice()
            .iter()
            .map(|&p_i| out[p_i as usize].clone())
            .collect();
    }

    Ok(out)
}

fn check_lengths(base_len: usize, perms: &[&Perm]) -> Result<(), SizeMismatch> {
    for perm in perms {
        if perm.len() != base_len {
            return Err(SizeMismatch {
                perm_len: perm.len(),
                base_len,
            });
        }
    }
    Ok(())
}

// Moves the element at position i to position p(i) for every i, by walking each proper cycle and
// swapping the cycle's start with each later cycle position in turn. Fixed points never move.
fn scatter_with_scratch<T>(perm: &Perm, base: &mut [T], scratch: &mut Vec<bool>) {
    let mut cycles = perm.cycles_with_scratch(replace(scratch, Vec::new()));

    while let Some(mut cycle) = cycles.next() {
        let start = cycle.next().unwrap();
        for current in cycle {
            base.swap(start as usize, current as usize);
        }
    }

    *scratch = cycles.into_scratch();
}
