//! Ranking permutations via factorial-base (Lehmer code) encoding.
//!
//! Every permutation of {0, ..., n-1} has a Lehmer code: for each position,
//! the count of smaller values to its right. Reading the code as digits of a
//! mixed-radix number with radices n, n-1, ..., 1 yields an integer in
//! [0, n!-1], and the mapping is a bijection that orders permutations
//! lexicographically. [`rank`] computes the integer, [`unrank`] inverts it.
use std::error::Error;
use std::fmt;

use crate::perm::Perm;
use crate::El;

/// Largest permutation length accepted by [`rank`] and [`unrank`].
///
/// 18! is the largest factorial below 2^53, so every rank of a permutation no
/// longer than this survives a round trip through an IEEE-754 double and can
/// safely cross JSON and similar interchange boundaries.
pub const MAX_RANK_LEN: usize = 18;

/// Largest argument accepted by [`factorial`]; 20! is the largest factorial
/// representable in a `u64`.
pub const MAX_FACTORIAL: usize = 20;

/// An error produced by the ranking operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RankError {
    /// The input slice is not a permutation of {0, ..., n-1}.
    NotAPermutation,
    /// The requested length exceeds the supported maximum.
    TooLong { len: usize, max: usize },
    /// The rank has no permutation of the requested length, i.e. it is >= n!.
    OutOfRange { rank: u64, len: usize },
}

impl fmt::Display for RankError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            RankError::NotAPermutation => {
                f.write_str("input is not a permutation of 0..n")
            }
            RankError::TooLong { len, max } => {
                write!(f, "length {} exceeds the supported maximum of {}", len, max)
            }
            RankError::OutOfRange { rank, len } => {
                write!(
                    f,
                    "rank {} is out of range for permutations of length {}",
                    rank, len
                )
            }
        }
    }
}

impl Error for RankError {}

/// n!, computed as an iterative product. 0! = 1.
///
/// Fails with [`RankError::TooLong`] for n > [`MAX_FACTORIAL`], where the
/// result no longer fits a `u64`.
pub fn factorial(n: usize) -> Result<u64, RankError> {
    if n > MAX_FACTORIAL {
        return Err(RankError::TooLong {
            len: n,
            max: MAX_FACTORIAL,
        });
    }

    let mut acc = 1u64;
    for i in 2..=n as u64 {
        acc *= i;
    }
    Ok(acc)
}

/// The rank of a permutation in the lexicographic order of S<sub>n</sub>.
///
/// Fails with [`RankError::NotAPermutation`] when the slice is not a
/// permutation and with [`RankError::TooLong`] when its length exceeds
/// [`MAX_RANK_LEN`]. The input is never modified.
///
/// Each position's Lehmer digit is the count of smaller values to its right;
/// the digits are accumulated against a running place value that starts at
/// (n-1)! and divides down by n-1, n-2, ... as the scan moves right, which
/// avoids recomputing factorials per position.
pub fn rank(perm: &[El]) -> Result<u64, RankError> {
    if !Perm::is_valid(perm) {
        return Err(RankError::NotAPermutation);
    }
    if perm.len() > MAX_RANK_LEN {
        return Err(RankError::TooLong {
            len: perm.len(),
            max: MAX_RANK_LEN,
        });
    }

    let n = perm.len();
    let mut place = factorial(n.saturating_sub(1))?;
    let mut value = 0u64;

    for (i, &p_i) in perm.iter().enumerate() {
        let digit = perm[i + 1..].iter().filter(|&&x| x < p_i).count() as u64;
        value += digit * place;

        let remaining = (n - 1 - i) as u64;
        if remaining > 0 {
            place /= remaining;
        }
    }

    Ok(value)
}

/// The permutation of the given length at the given lexicographic rank.
///
/// This is the exact inverse of [`rank`]: `unrank(rank(p)?, p.len())` yields
/// `p` again for every valid permutation of length at most [`MAX_RANK_LEN`].
///
/// Fails with [`RankError::TooLong`] when the length exceeds
/// [`MAX_RANK_LEN`] and with [`RankError::OutOfRange`] when the rank is n!
/// or larger.
pub fn unrank(rank: u64, len: usize) -> Result<Perm, RankError> {
    if len > MAX_RANK_LEN {
        return Err(RankError::TooLong {
            len,
            max: MAX_RANK_LEN,
        });
    }
    if rank >= factorial(len)? {
        return Err(RankError::OutOfRange { rank, len });
    }

    // Mixed-radix digits, least significant (rightmost position) first.
    let mut code = vec![0u64; len];
    let mut value = rank;
    for k in 0..len {
        let radix = (k + 1) as u64;
        code[len - 1 - k] = value % radix;
        value /= radix;
    }

    // Rebuild the permutation right to left. Placing a digit shifts every
    // already placed value that is >= it up by one, undoing the virtual
    // removal the encoding performs.
    let mut perm = vec![0; len];
    for i in (0..len).rev() {
        let digit = code[i] as El;
        for later in perm[i + 1..].iter_mut() {
            if *later >= digit {
                *later += 1;
            }
        }
        perm[i] = digit;
    }

    Ok(Perm::from_vec_unchecked(perm))
}

#[cfg(test)]
mod tests {
    use super::*;

    use proptest::prelude::*;

    const S3_LEX_ORDER: [[El; 3]; 6] = [
        [0, 1, 2],
        [0, 2, 1],
        [1, 0, 2],
        [1, 2, 0],
        [2, 0, 1],
        [2, 1, 0],
    ];

    #[test]
    fn factorial_small_values() {
        assert_eq!(factorial(0), Ok(1));
        assert_eq!(factorial(1), Ok(1));
        assert_eq!(factorial(4), Ok(24));
        assert_eq!(factorial(18), Ok(6_402_373_705_728_000));
        assert_eq!(factorial(20), Ok(2_432_902_008_176_640_000));
    }

    #[test]
    fn factorial_too_long() {
        assert_eq!(
            factorial(21),
            Err(RankError::TooLong { len: 21, max: 20 })
        );
    }

    #[test]
    fn rank_matches_lexicographic_order() {
        for (expected, perm) in S3_LEX_ORDER.iter().enumerate() {
            assert_eq!(rank(perm), Ok(expected as u64));
        }
    }

    #[test]
    fn unrank_matches_lexicographic_order() {
        for (value, perm) in S3_LEX_ORDER.iter().enumerate() {
            assert_eq!(
                unrank(value as u64, 3).unwrap().as_slice(),
                &perm[..]
            );
        }
    }

    #[test]
    fn rank_extremes() {
        assert_eq!(rank(&[]), Ok(0));
        assert_eq!(rank(Perm::identity(7).as_slice()), Ok(0));

        let reversed: Vec<El> = (0..7).rev().collect();
        assert_eq!(rank(&reversed), Ok(factorial(7).unwrap() - 1));
    }

    #[test]
    fn rank_rejects_non_permutations() {
        assert_eq!(rank(&[0, 0]), Err(RankError::NotAPermutation));
        assert_eq!(rank(&[1, 2, 3]), Err(RankError::NotAPermutation));
    }

    #[test]
    fn rank_rejects_long_permutations() {
        let perm = Perm::identity(19);
        assert_eq!(
            rank(perm.as_slice()),
            Err(RankError::TooLong { len: 19, max: 18 })
        );
    }

    #[test]
    fn unrank_out_of_domain() {
        assert_eq!(
            unrank(6, 3),
            Err(RankError::OutOfRange { rank: 6, len: 3 })
        );
        assert_eq!(
            unrank(0, 19),
            Err(RankError::TooLong { len: 19, max: 18 })
        );
        assert_eq!(unrank(0, 0).unwrap(), Perm::new());
        assert_eq!(
            unrank(1, 0),
            Err(RankError::OutOfRange { rank: 1, len: 0 })
        );
    }

    proptest! {
        #[test]
        fn unrank_inverts_rank(
            perm in (0..=18u32)
                .prop_map(|n| (0..n).collect::<Vec<_>>())
                .prop_shuffle()
                .prop_map(|vec| Perm::from_vec(vec).unwrap())
        ) {
            let value = perm.rank().unwrap();
            prop_assert_eq!(unrank(value, perm.len()).unwrap(), perm);
        }

        #[test]
        fn rank_inverts_unrank(
            (len, value) in (0..=8usize).prop_flat_map(|len| {
                let count = factorial(len).unwrap();
                (Just(len), 0..count)
            })
        ) {
            let perm = unrank(value, len).unwrap();
            prop_assert_eq!(perm.rank(), Ok(value));
        }
    }
}
