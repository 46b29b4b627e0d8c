//! Word lists and the guess vocabulary.
//!
//! The vocabulary is the solution list followed by the extra allowed guesses.
//! Indices below `solution_count()` are possible secrets; every index is a
//! valid guess.

use std::collections::HashSet;
use std::fmt;
use std::fs;
use std::path::Path;

use rand::rngs::StdRng;
use rand::seq::index;
use rand::SeedableRng;

use crate::error::{Error, Result};
use crate::WORD_LENGTH;

/// Index of a word in the vocabulary.
pub type WordIndex = u16;

/// A five letter word over `A..=Z`. Only built through [`Word::parse`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Word([u8; WORD_LENGTH]);

impl Word {
    /// Parse a word, ignoring surrounding whitespace and letter case.
    pub fn parse(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        let bytes = trimmed.as_bytes();
        if bytes.len() != WORD_LENGTH || !bytes.iter().all(u8::is_ascii_alphabetic) {
            return Err(Error::InvalidWord(trimmed.to_string()));
        }
        let mut letters = [0u8; WORD_LENGTH];
        for (dst, src) in letters.iter_mut().zip(bytes) {
            *dst = src.to_ascii_uppercase();
        }
        Ok(Self(letters))
    }

    pub fn as_bytes(&self) -> &[u8; WORD_LENGTH] {
        &self.0
    }

    pub fn as_str(&self) -> &str {
        // Only ASCII letters are ever stored.
        std::str::from_utf8(&self.0).unwrap_or("?????")
    }
}

impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Solutions followed by extra guesses. Immutable once built.
///
/// Every word appears once: solutions must be distinct, and extra guesses
/// that repeat an earlier word are dropped.
#[derive(Debug, Clone)]
pub struct Vocabulary {
    words: Vec<Word>,
    solution_count: usize,
}

impl Vocabulary {
    pub fn new(solutions: Vec<Word>, extra_guesses: Vec<Word>) -> Result<Self> {
        if solutions.is_empty() {
            return Err(Error::EmptySolutions);
        }
        let mut seen = HashSet::with_capacity(solutions.len() + extra_guesses.len());
        for word in &solutions {
            if !seen.insert(*word) {
                return Err(Error::InvalidInput(format!("duplicate solution {}", word)));
            }
        }

        let solution_count = solutions.len();
        let extra_count = extra_guesses.len();
        let mut words = solutions;
        words.extend(extra_guesses.into_iter().filter(|w| seen.insert(*w)));
        let dropped = solution_count + extra_count - words.len();
        if dropped > 0 {
            log::debug!("dropped {} extra guesses already in the vocabulary", dropped);
        }

        // Indices run 0..len and must all fit a WordIndex, so len itself must too.
        if words.len() > WordIndex::MAX as usize {
            return Err(Error::VocabularyTooLarge(words.len()));
        }
        Ok(Self {
            words,
            solution_count,
        })
    }

    /// Build from string slices, mostly useful for tests and small demos.
    pub fn from_strs(solutions: &[&str], extra_guesses: &[&str]) -> Result<Self> {
        let solutions = solutions.iter().map(|s| Word::parse(s)).collect::<Result<_>>()?;
        let extras = extra_guesses.iter().map(|s| Word::parse(s)).collect::<Result<_>>()?;
        Self::new(solutions, extras)
    }

    /// Load two word lists, one word per line.
    pub fn load(solution_path: &Path, guess_path: &Path) -> Result<Self> {
        let solutions = read_word_list(solution_path)?;
        let extras = read_word_list(guess_path)?;
        log::info!(
            "loaded {} solutions and {} extra guesses",
            solutions.len(),
            extras.len()
        );
        Self::new(solutions, extras)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn solution_count(&self) -> usize {
        self.solution_count
    }

    pub fn is_solution(&self, index: WordIndex) -> bool {
        (index as usize) < self.solution_count
    }

    pub fn word(&self, index: WordIndex) -> &Word {
        &self.words[index as usize]
    }

    pub fn words(&self) -> &[Word] {
        &self.words
    }

    /// Every word's letters in vocabulary order; identifies the word lists
    /// a cache was built from.
    pub fn letters(&self) -> Vec<u8> {
        self.words.iter().flat_map(|w| w.0).collect()
    }

    /// First matching index; solutions are searched before extra guesses.
    pub fn index_of(&self, word: &Word) -> Option<WordIndex> {
        self.words
            .iter()
            .position(|w| w == word)
            .map(|i| i as WordIndex)
    }

    /// Every solution, ascending.
    pub fn solution_indices(&self) -> Vec<WordIndex> {
        (0..self.solution_count as WordIndex).collect()
    }

    /// The first `n` solutions.
    pub fn first_solutions(&self, n: usize) -> Result<Vec<WordIndex>> {
        self.check_subset_size(n)?;
        Ok((0..n as WordIndex).collect())
    }

    /// A reproducible random subset of `n` solutions, sorted ascending.
    pub fn sample_solutions(&self, n: usize, seed: u64) -> Result<Vec<WordIndex>> {
        self.check_subset_size(n)?;
        let mut rng = StdRng::seed_from_u64(seed);
        let mut picked: Vec<WordIndex> = index::sample(&mut rng, self.solution_count, n)
            .into_iter()
            .map(|i| i as WordIndex)
            .collect();
        picked.sort_unstable();
        Ok(picked)
    }

    /// Resolve words to a canonical solution set.
    pub fn solution_set(&self, words: &[Word]) -> Result<Vec<WordIndex>> {
        let mut set = Vec::with_capacity(words.len());
        for word in words {
            match self.index_of(word) {
                Some(i) if self.is_solution(i) => set.push(i),
                _ => {
                    return Err(Error::InvalidInput(format!(
                        "{} is not in the solution list",
                        word
                    )))
                }
            }
        }
        set.sort_unstable();
        set.dedup();
        Ok(set)
    }

    fn check_subset_size(&self, n: usize) -> Result<()> {
        if n == 0 || n > self.solution_count {
            return Err(Error::InvalidInput(format!(
                "subset size {} must be between 1 and {}",
                n, self.solution_count
            )));
        }
        Ok(())
    }
}

fn read_word_list(path: &Path) -> Result<Vec<Word>> {
    let text = fs::read_to_string(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;
    text.lines()
        .filter(|line| !line.trim().is_empty())
        .map(Word::parse)
        .collect()
}
