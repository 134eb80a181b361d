//! Utilities for generating, composing, and ranking permutations.
//!
//! This crate provides a validated permutation type, [`Perm`], together with a
//! small set of pure helpers built around it: Fisher–Yates shuffling, in-place
//! and allocating application of permutations to sequences, a bijection
//! between permutations and integers via factorial-base (Lehmer code)
//! ranking, balanced tree reduction and cyclic lookup.
//!
pub mod apply;
pub mod perm;
pub mod rank;
pub mod seq;

pub use crate::apply::{permute, permuted, SizeMismatch};
pub use crate::perm::Perm;
pub use crate::rank::{factorial, rank, unrank, RankError, MAX_RANK_LEN};
pub use crate::seq::{next_wrapping, shuffle, shuffled, treeduce, try_swap};

/// Set element.
///
/// Set elements are represented by non-negative integers (`u32`).
pub type El = u32;
