//! Permutations of finite sets.
use std::fmt;
use std::mem::replace;

use num_integer::Integer;
use num_traits::{FromPrimitive, ToPrimitive};
use rand::Rng;

use crate::rank::{self, RankError};
use crate::El;

/// A permutation of a finite set.
///
/// A permutation rearranges the elements of a finite set. It is a bijection from a set to the same
/// set.
///
/// In permutils these sets are always {0, ..., n-1} for some n of the integer type [`El`].
/// Permutations on another finite set X can be represented by fixing a bijection from X to {0, ...,
/// |X|-1}. The set of permutations of {0, ..., n-1} is called the symmetric group of order n and
/// also written as S<sub>n</sub>.
///
/// Internally a permutation is stored as a vector containing the images of {0, ..., n - 1}. The
/// length n is part of the permutation's identity: combining permutations of different lengths, or
/// applying a permutation to a sequence of a different length, is an error rather than an implicit
/// extension by fixed points. Only element lookup through [`Perm::image`] treats out-of-range
/// elements as fixed.
#[derive(Default, Clone, PartialEq, Eq, Hash)]
pub struct Perm {
    perm: Box<[El]>,
}

impl Perm {
    /// The empty permutation.
    pub fn new() -> Perm {
        Perm::default()
    }

    /// The identity permutation of {0, ..., n-1}.
    pub fn identity(n: usize) -> Perm {
        // Having the size of the perm vec be a valid El itself simplifies some things
        assert!(n <= El::MAX as usize);
        Perm {
            perm: (0..n as El).collect(),
        }
    }

    /// Check whether a slice contains the images of a permutation of {0, ..., n-1}.
    ///
    /// This rejects out-of-range values and duplicates (a duplicate always leaves some value of
    /// the range uncovered). Runs in O(n) time and space; the empty slice is a valid permutation.
    pub fn is_valid(perm: &[El]) -> bool {
        Self::is_valid_with_scratch(perm, &mut vec![])
    }

    /// Check whether a slice contains a permutation. Use existing scratch space.
    ///
    /// The scratch space will be overwritten.
    pub fn is_valid_with_scratch(perm: &[El], scratch: &mut Vec<bool>) -> bool {
        let seen = scratch;
        seen.clear();
        seen.resize(perm.len(), false);

        for &p_i in perm.iter() {
            let p_i = p_i as usize;
            if p_i >= perm.len() || seen[p_i] {
                return false;
            }
            seen[p_i] = true;
        }

        true
    }

    /// Create a permutation from a vector containing the images of 0..n.
    ///
    /// Returns None if the vector does not correspond to a permutation.
    pub fn from_vec(perm: Vec<El>) -> Option<Perm> {
        Self::from_vec_with_scratch(perm, &mut vec![])
    }

    /// Create a permutation from a vector containing the images of 0..n.
    ///
    /// Returns None if the vector does not correspond to a permutation.
    /// The last parameter is used as scratch space and will be overwritten.
    pub fn from_vec_with_scratch(perm: Vec<El>, scratch: &mut Vec<bool>) -> Option<Perm> {
        assert!(perm.len() <= El::MAX as usize);
        if !Self::is_valid_with_scratch(&perm, scratch) {
            return None;
        }

        Some(Perm {
            perm: perm.into_boxed_slice(),
        })
    }

    /// Create a permutation from a vector known to contain the images of 0..n.
    pub(crate) fn from_vec_unchecked(perm: Vec<El>) -> Perm {
        debug_assert!(Perm::is_valid(&perm));
        Perm {
            perm: perm.into_boxed_slice(),
        }
    }

    /// A uniformly random permutation of {0, ..., n-1}, using the thread-local RNG.
    pub fn random(n: usize) -> Perm {
        Self::random_with_rng(n, &mut rand::rng())
    }

    /// A uniformly random permutation of {0, ..., n-1} drawn from `rng`.
    ///
    /// This shuffles the identity permutation with a Fisher–Yates pass, so the result is uniform
    /// over all n! permutations assuming a uniform `rng`.
    pub fn random_with_rng<R: Rng + ?Sized>(n: usize, rng: &mut R) -> Perm {
        let mut perm = Perm::identity(n);
        crate::seq::shuffle(&mut perm.perm, rng);
        perm
    }

    /// The size of the set this permutation is defined on.
    pub fn len(&self) -> usize {
        self.perm.len()
    }

    /// Whether this is the empty permutation.
    pub fn is_empty(&self) -> bool {
        self.perm.is_empty()
    }

    /// The slice containing the images of {0, ..., n-1}.
    pub fn as_slice(&self) -> &[El] {
        &self.perm
    }

    /// Recover the vector containing the images of {0, ..., n-1}.
    pub fn into_vec(self) -> Vec<El> {
        self.perm.into_vec()
    }

    /// The image of an element under this permutation.
    ///
    /// Elements outside {0, ..., n-1} are fixed points.
    pub fn image(&self, el: El) -> El {
        self.perm.get(el as usize).cloned().unwrap_or(el)
    }

    /// Exchange the images of two elements.
    ///
    /// Panics when either element is out of range.
    pub fn transpose(&mut self, a: El, b: El) {
        self.perm.swap(a as usize, b as usize);
    }

    /// The inverse of this permutation.
    ///
    /// For every element i, the inverse maps the image of i back to i.
    pub fn inverse(&self) -> Perm {
        let mut inv = vec![0; self.perm.len()];
        for (i, &p_i) in self.perm.iter().enumerate() {
            inv[p_i as usize] = i as El;
        }
        Perm {
            perm: inv.into_boxed_slice(),
        }
    }

    /// The permutation that applies `self` first and `other` second.
    ///
    /// Panics when the lengths differ.
    pub fn then(&self, other: &Perm) -> Perm {
        assert_eq!(
            self.len(),
            other.len(),
            "composed permutations must have equal lengths"
        );
        Perm::from_vec_unchecked(
            self.perm
                .iter()
                .map(|&p_i| other.perm[p_i as usize])
                .collect(),
        )
    }

    /// A power of this permutation.
    ///
    /// Negative exponents produce powers of the inverse. This implementation performs efficient
    /// exponentiation by squaring.
    pub fn pow<E>(&self, exponent: E) -> Perm
    where
        E: Integer + ToPrimitive + FromPrimitive,
    {
        let neg = exponent < E::zero();
        let mut exp = if neg {
            E::zero() - exponent
        } else {
            exponent
        };

        let mut acc = Perm::identity(self.len());
        let mut base = if neg { self.inverse() } else { self.clone() };

        while exp > E::zero() {
            if exp.is_odd() {
                acc = acc.then(&base);
            }
            exp = exp / E::from_usize(2).unwrap();
            if exp > E::zero() {
                base = base.then(&base);
            }
        }

        acc
    }

    /// The rank of this permutation in the lexicographic order of S<sub>n</sub>.
    ///
    /// See [`rank`][rank::rank] for the encoding and its length limit.
    pub fn rank(&self) -> Result<u64, RankError> {
        rank::rank(&self.perm)
    }

    /// Return the cycle starting at an element.
    ///
    /// Returns a 1-cycle when the element is a fixed point of this permutation.
    pub fn cycle_at(&self, el: El) -> Cycle {
        Cycle {
            perm: self,
            pos: Some(el),
            start: el,
        }
    }

    /// Returns an iterator over all proper cycles of a permutation.
    ///
    /// The returned iterator does not produce any 1-cycles.
    pub fn cycles(&self) -> Cycles {
        self.cycles_with_scratch(Default::default())
    }

    /// Return an iterator over all proper cycles of a permutation. Use existing scratch space.
    ///
    /// The ownership of the scratch space is passed to the returned iterator and can be recovered
    /// by [`Cycles::into_scratch`].
    pub fn cycles_with_scratch(&self, mut scratch: Vec<bool>) -> Cycles {
        scratch.clear();
        scratch.resize(self.perm.len(), false);
        Cycles {
            perm: self,
            seen: scratch,
            pos: 0,
        }
    }

    /// Emit this permutation to a [`Formatter`][fmt::Formatter]. Use existing scratch space.
    ///
    /// When formatting a lot of permutations, reusing the required scratch space using this method
    /// can be more efficient.
    pub fn format_with_scratch(
        &self,
        f: &mut fmt::Formatter,
        scratch: &mut Vec<bool>,
    ) -> fmt::Result {
        let mut cycles = self.cycles_with_scratch(replace(scratch, Default::default()));

        let mut empty = true;

        while let Some(cycle) = cycles.next() {
            empty = false;
            fmt::Display::fmt(&cycle, f)?;
        }

        *scratch = cycles.into_scratch();

        if empty {
            f.write_str("()")?;
        }

        Ok(())
    }
}

impl From<Perm> for Vec<El> {
    fn from(perm: Perm) -> Vec<El> {
        perm.into_vec()
    }
}

impl fmt::Display for Perm {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.format_with_scratch(f, &mut Default::default())
    }
}

impl fmt::Debug for Perm {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.format_with_scratch(f, &mut Default::default())
    }
}

/// Iterator over the elements of a permutation's cycle.
#[derive(Clone)]
pub struct Cycle<'a> {
    perm: &'a Perm,
    pos: Option<El>,
    start: El,
}

impl<'a> Iterator for Cycle<'a> {
    type Item = El;

    fn next(&mut self) -> Option<El> {
        self.pos.map(|pos| {
            let next = self.perm.image(pos);
            self.pos = if next == self.start { None } else { Some(next) };

            pos
        })
    }
}

impl<'a> fmt::Display for Cycle<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut first = true;
        for el in self.clone() {
            f.write_str(if first { "(" } else { " " })?;
            first = false;
            fmt::Display::fmt(&el, f)?;
        }
        f.write_str(if first { "()" } else { ")" })
    }
}

impl<'a> fmt::Debug for Cycle<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

/// Iterator over the proper cycles of a permutation.
#[derive(Clone)]
pub struct Cycles<'a> {
    perm: &'a Perm,
    seen: Vec<bool>,
    pos: El,
}

impl<'a> Cycles<'a> {
    /// Recover the scratch space needed for efficient iteration over the cycles of a permutation.
    pub fn into_scratch(self) -> Vec<bool> {
        self.seen
    }
}

impl<'a> Iterator for Cycles<'a> {
    type Item = Cycle<'a>;

    fn next(&mut self) -> Option<Cycle<'a>> {
        loop {
            if self.pos as usize >= self.perm.len() {
                return None;
            } else if self.seen[self.pos as usize] || self.perm.image(self.pos) == self.pos {
                self.pos += 1;
            } else {
                let cycle = self.perm.cycle_at(self.pos);
                for el in cycle.clone() {
                    self.seen[el as usize] = true;
                }
                return Some(cycle);
            }
        }
    }
}
