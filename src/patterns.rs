//! Precomputed feedback for every (guess, solution) pair.
//!
//! Stored row-major by guess index, one byte per solution. The same layout is
//! used for the on-disk cache so a restore is a length check plus a copy.

use std::fs;
use std::io;
use std::path::Path;

use rayon::prelude::*;

use crate::error::{Error, Result};
use crate::feedback::{letter_mask, FeedbackPattern};
use crate::words::{Vocabulary, WordIndex};

#[derive(Debug, Clone)]
pub struct PatternTable {
    patterns: Vec<u8>,
    solution_count: usize,
}

impl PatternTable {
    pub fn build(vocab: &Vocabulary) -> Self {
        let solution_count = vocab.solution_count();
        let words = vocab.words();
        let masks: Vec<u32> = words.iter().map(letter_mask).collect();

        let mut patterns = vec![0u8; words.len() * solution_count];
        patterns
            .par_chunks_mut(solution_count)
            .enumerate()
            .for_each(|(guess_idx, row)| {
                let guess = &words[guess_idx];
                let guess_mask = masks[guess_idx];
                for (soln_idx, cell) in row.iter_mut().enumerate() {
                    // No shared letters: all grey, which the zeroed row already holds.
                    if guess_mask & masks[soln_idx] != 0 {
                        *cell = FeedbackPattern::calculate(guess, &words[soln_idx]).0;
                    }
                }
            });

        Self {
            patterns,
            solution_count,
        }
    }

    /// Adopt a serialized table after checking it matches `vocab`.
    pub fn from_bytes(bytes: Vec<u8>, vocab: &Vocabulary) -> Result<Self> {
        let expected = vocab.len() * vocab.solution_count();
        if bytes.len() != expected {
            return Err(Error::CacheUnavailable(format!(
                "pattern table has {} bytes, expected {}",
                bytes.len(),
                expected
            )));
        }
        if let Some(pos) = bytes.iter().position(|&b| !FeedbackPattern(b).is_valid()) {
            return Err(Error::CacheUnavailable(format!(
                "pattern table byte {} holds {}, outside 0..243",
                pos, bytes[pos]
            )));
        }
        Ok(Self {
            patterns: bytes,
            solution_count: vocab.solution_count(),
        })
    }

    pub fn load(path: &Path, vocab: &Vocabulary) -> Result<Self> {
        let bytes = fs::read(path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => {
                Error::CacheUnavailable(format!("{} does not exist", path.display()))
            }
            _ => Error::CacheUnavailable(format!("cannot read {}: {}", path.display(), e)),
        })?;
        Self::from_bytes(bytes, vocab)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        fs::write(path, &self.patterns).map_err(|e| {
            Error::PersistenceFailure(format!("cannot write {}: {}", path.display(), e))
        })
    }

    /// Restore from `path`, or compute and overwrite it.
    ///
    /// Neither a bad cache file nor a failed write is an error here.
    pub fn load_or_build(path: &Path, vocab: &Vocabulary) -> Self {
        let start = std::time::Instant::now();
        match Self::load(path, vocab) {
            Ok(table) => {
                log::info!(
                    "restored pattern table from {} in {:.2?}",
                    path.display(),
                    start.elapsed()
                );
                return table;
            }
            Err(e) => log::warn!("{}; recomputing pattern table", e),
        }

        let table = Self::build(vocab);
        log::info!(
            "computed {} patterns in {:.2?}",
            table.patterns.len(),
            start.elapsed()
        );
        if let Err(e) = table.save(path) {
            log::warn!("{}", e);
        }
        table
    }

    #[inline]
    pub fn get(&self, guess: WordIndex, solution: WordIndex) -> FeedbackPattern {
        FeedbackPattern(self.patterns[guess as usize * self.solution_count + solution as usize])
    }

    /// Members of `set` that answer `guess` with `pattern`, in set order.
    pub fn consistent(
        &self,
        guess: WordIndex,
        pattern: FeedbackPattern,
        set: &[WordIndex],
    ) -> Vec<WordIndex> {
        let row = self.row(guess);
        set.iter()
            .copied()
            .filter(|&s| row[s as usize] == pattern.0)
            .collect()
    }

    pub fn row(&self, guess: WordIndex) -> &[u8] {
        let start = guess as usize * self.solution_count;
        &self.patterns[start..start + self.solution_count]
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.patterns
    }

    pub fn guess_count(&self) -> usize {
        self.patterns.len() / self.solution_count
    }

    pub fn solution_count(&self) -> usize {
        self.solution_count
    }
}
