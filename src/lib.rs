//! # Wordle Optimal
//!
//! Computes the guessing strategy that minimizes the expected number of
//! guesses in Wordle, by exhaustive memoized search over the sets of secrets
//! still consistent with the feedback received.
//!
//! The pieces, leaves first:
//! - [`Vocabulary`]: solutions followed by extra allowed guesses.
//! - [`PatternTable`]: feedback for every (guess, solution) pair.
//! - [`Solver`]: the recursive expected-value search over a [`MemoCache`].
//! - [`Driver`]: every word forced as the opening guess, in parallel, ranked.

pub mod driver;
pub mod error;
pub mod feedback;
pub mod memo;
pub mod patterns;
pub mod solver;
pub mod words;

pub use driver::{rank, Driver, RankedResult};
pub use error::{Error, Result};
pub use feedback::{Feedback, FeedbackPattern};
pub use memo::MemoCache;
pub use patterns::PatternTable;
pub use solver::{Optimal, Partition, Solver};
pub use words::{Vocabulary, Word, WordIndex};

/// Word length for Wordle
pub const WORD_LENGTH: usize = 5;

/// Letters `A..=Z`.
pub const ALPHABET_SIZE: usize = 26;
