//! Exact expected-guess search.
//!
//! The value of a solution set is the minimum, over every guess, of the
//! average number of guesses needed to finish once that guess is played.
//! Sets of three or more are memoized in a [`MemoCache`] shared by all workers.
//!
//! Guesses are compared on their unnormalized total (the sum over every
//! secret of the guesses it takes), which lets a partially summed guess be
//! abandoned as soon as it passes the best total found so far.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::feedback::FeedbackPattern;
use crate::memo::MemoCache;
use crate::patterns::PatternTable;
use crate::words::{Vocabulary, WordIndex};

/// Below this size, guesses drawn from the set itself are tried first.
pub const IN_SET_THRESHOLD: usize = 12;

/// Expected number of guesses and every guess that achieves it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Optimal {
    pub value: f64,
    pub guesses: Vec<WordIndex>,
}

impl Optimal {
    fn unsolvable() -> Self {
        Self {
            value: f64::INFINITY,
            guesses: Vec::new(),
        }
    }
}

/// A solution set split by the feedback one guess would produce.
///
/// Groups are ordered by pattern and members keep the order of the input
/// set, so an ascending input yields ascending groups.
#[derive(Debug, Clone)]
pub struct Partition {
    members: Vec<WordIndex>,
    groups: Vec<(FeedbackPattern, usize, usize)>,
}

impl Partition {
    pub fn new(patterns: &PatternTable, guess: WordIndex, set: &[WordIndex]) -> Self {
        let row = patterns.row(guess);
        let mut counts = [0usize; FeedbackPattern::NUM_PATTERNS];
        for &s in set {
            counts[row[s as usize] as usize] += 1;
        }

        let mut offsets = [0usize; FeedbackPattern::NUM_PATTERNS];
        let mut groups = Vec::new();
        let mut start = 0;
        for (pattern, &count) in counts.iter().enumerate() {
            offsets[pattern] = start;
            if count > 0 {
                groups.push((FeedbackPattern(pattern as u8), start, start + count));
            }
            start += count;
        }

        let mut members = vec![0; set.len()];
        for &s in set {
            let slot = &mut offsets[row[s as usize] as usize];
            members[*slot] = s;
            *slot += 1;
        }

        Self { members, groups }
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (FeedbackPattern, &[WordIndex])> + '_ {
        self.groups
            .iter()
            .map(move |&(pattern, start, end)| (pattern, &self.members[start..end]))
    }
}

struct Best {
    total: f64,
    guesses: Vec<WordIndex>,
}

impl Best {
    fn offer(&mut self, guess: WordIndex, total: f64) {
        if total < self.total {
            self.total = total;
            self.guesses.clear();
            self.guesses.push(guess);
        } else if total == self.total {
            self.guesses.push(guess);
        }
    }
}

/// Borrowed view over the immutable tables plus the shared memo.
#[derive(Clone, Copy)]
pub struct Solver<'a> {
    vocab: &'a Vocabulary,
    patterns: &'a PatternTable,
    memo: &'a MemoCache,
}

impl<'a> Solver<'a> {
    pub fn new(vocab: &'a Vocabulary, patterns: &'a PatternTable, memo: &'a MemoCache) -> Self {
        Self {
            vocab,
            patterns,
            memo,
        }
    }

    pub fn memo(&self) -> &'a MemoCache {
        self.memo
    }

    /// Best guesses for `set`, which must be strictly ascending solution indices.
    pub fn optimal(&self, set: &[WordIndex]) -> Result<Optimal> {
        self.check_set(set)?;
        self.search(set, None)
    }

    /// Value of `set` when the next guess must be `guess`. Never cached.
    pub fn optimal_with_guess(&self, set: &[WordIndex], guess: WordIndex) -> Result<Optimal> {
        self.check_set(set)?;
        if guess as usize >= self.vocab.len() {
            return Err(Error::InvalidInput(format!(
                "guess index {} outside vocabulary of {}",
                guess,
                self.vocab.len()
            )));
        }
        self.search(set, Some(guess))
    }

    /// Total guesses summed over `set` when `guess` is played next.
    ///
    /// `None` when the guess cannot split the set or its running total
    /// passes `bound`.
    pub fn cost_of(&self, guess: WordIndex, set: &[WordIndex], bound: f64) -> Result<Option<f64>> {
        let partition = Partition::new(self.patterns, guess, set);
        if partition.len() == 1 && set.len() > 1 {
            return Ok(None);
        }

        let mut total = 0.0;
        for (pattern, group) in partition.iter() {
            total += if pattern.is_win() {
                group.len() as f64
            } else {
                match group.len() {
                    1 => 2.0,
                    2 => 5.0,
                    n => n as f64 * (1.0 + self.search(group, None)?.value),
                }
            };
            if total > bound {
                return Ok(None);
            }
        }
        Ok(Some(total))
    }

    fn search(&self, set: &[WordIndex], forced: Option<WordIndex>) -> Result<Optimal> {
        let n = match set.len() {
            0 => {
                return Err(Error::InvalidInput(
                    "cannot solve an empty solution set".to_string(),
                ))
            }
            1 => {
                return Ok(Optimal {
                    value: 1.0,
                    guesses: set.to_vec(),
                })
            }
            2 => {
                return Ok(Optimal {
                    value: 1.5,
                    guesses: set.to_vec(),
                })
            }
            n => n,
        };

        let mut best = Best {
            total: f64::INFINITY,
            guesses: Vec::new(),
        };

        if let Some(guess) = forced {
            if let Some(total) = self.cost_of(guess, set, best.total)? {
                best.offer(guess, total);
            }
            if best.guesses.is_empty() {
                return Ok(Optimal::unsolvable());
            }
            return Ok(Optimal {
                value: best.total / n as f64,
                guesses: best.guesses,
            });
        }

        if let Some(hit) = self.memo.get(set) {
            return Ok(hit);
        }

        let in_set_first = n < IN_SET_THRESHOLD;
        if in_set_first {
            for &guess in set {
                if let Some(total) = self.cost_of(guess, set, best.total)? {
                    best.offer(guess, total);
                }
            }
        }

        // A guess outside the set can at best finish every secret on the
        // following turn, so once 2 per secret is reached nothing else helps.
        if best.total > 2.0 * n as f64 {
            for guess in 0..self.vocab.len() {
                let guess = guess as WordIndex;
                if in_set_first && set.binary_search(&guess).is_ok() {
                    continue;
                }
                if let Some(total) = self.cost_of(guess, set, best.total)? {
                    best.offer(guess, total);
                }
            }
        }

        let optimal = Optimal {
            value: best.total / n as f64,
            guesses: best.guesses,
        };
        self.memo.insert_if_absent(set, optimal.clone());
        Ok(optimal)
    }

    fn check_set(&self, set: &[WordIndex]) -> Result<()> {
        if !set.windows(2).all(|w| w[0] < w[1]) {
            return Err(Error::InvalidInput(
                "solution set must be strictly ascending".to_string(),
            ));
        }
        if let Some(&bad) = set.iter().find(|&&s| !self.vocab.is_solution(s)) {
            return Err(Error::InvalidInput(format!(
                "index {} is not a solution",
                bad
            )));
        }
        Ok(())
    }
}
