//! Parallel evaluation of every vocabulary word as the opening guess.

use std::cmp::Ordering;
use std::time::Instant;

use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};

use crate::error::Result;
use crate::memo::MemoCache;
use crate::patterns::PatternTable;
use crate::solver::Solver;
use crate::words::{Vocabulary, WordIndex};

/// Opening guesses sharing one expected value.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedResult {
    pub guesses: Vec<WordIndex>,
    pub value: f64,
}

/// Worker count used when none is configured: one per hardware thread.
pub fn default_threads() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}

pub struct Driver<'a> {
    solver: Solver<'a>,
    vocab: &'a Vocabulary,
    pool: ThreadPool,
}

impl<'a> Driver<'a> {
    pub fn new(
        vocab: &'a Vocabulary,
        patterns: &'a PatternTable,
        memo: &'a MemoCache,
        threads: usize,
    ) -> Result<Self> {
        let threads = threads.max(1);
        let pool = ThreadPoolBuilder::new()
            .num_threads(threads)
            .thread_name(|i| format!("search-{}", i))
            .build()?;
        log::debug!("worker pool started with {} threads", threads);
        Ok(Self {
            solver: Solver::new(vocab, patterns, memo),
            vocab,
            pool,
        })
    }

    pub fn threads(&self) -> usize {
        self.pool.current_num_threads()
    }

    /// Force every vocabulary word as the first guess for `set` and rank them.
    ///
    /// Blocks until every task has finished; the first failing task fails
    /// the whole run.
    pub fn solve_top_level(&self, set: &[WordIndex]) -> Result<Vec<RankedResult>> {
        let start = Instant::now();
        let solver = self.solver;
        let vocab = self.vocab;

        let values: Vec<(WordIndex, f64)> = self.pool.install(|| {
            (0..vocab.len())
                .into_par_iter()
                .map(|guess| -> Result<(WordIndex, f64)> {
                    let guess = guess as WordIndex;
                    let optimal = solver.optimal_with_guess(set, guess)?;
                    log::debug!("{} -> {:.6}", vocab.word(guess), optimal.value);
                    Ok((guess, optimal.value))
                })
                .collect::<Result<Vec<_>>>()
        })?;

        log::info!(
            "evaluated {} opening guesses over {} solutions in {:.2?} ({} memo entries)",
            values.len(),
            set.len(),
            start.elapsed(),
            solver.memo().len()
        );
        Ok(rank(values))
    }
}

/// Sort ascending by value then index, and merge equal values into groups.
pub fn rank(mut values: Vec<(WordIndex, f64)>) -> Vec<RankedResult> {
    values.sort_by(|a, b| match a.1.total_cmp(&b.1) {
        Ordering::Equal => a.0.cmp(&b.0),
        ord => ord,
    });

    let mut ranked: Vec<RankedResult> = Vec::new();
    for (guess, value) in values {
        match ranked.last_mut() {
            Some(last) if last.value == value => last.guesses.push(guess),
            _ => ranked.push(RankedResult {
                guesses: vec![guess],
                value,
            }),
        }
    }
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rank_groups_ties_and_orders_by_index() {
        let ranked = rank(vec![(4, 2.0), (1, 1.5), (3, 2.0), (0, f64::INFINITY), (2, 1.5)]);
        assert_eq!(
            ranked,
            vec![
                RankedResult {
                    guesses: vec![1, 2],
                    value: 1.5
                },
                RankedResult {
                    guesses: vec![3, 4],
                    value: 2.0
                },
                RankedResult {
                    guesses: vec![0],
                    value: f64::INFINITY
                },
            ]
        );
    }

    #[test]
    fn rank_of_nothing_is_empty() {
        assert!(rank(Vec::new()).is_empty());
    }
}
