//! Process-wide memo of optimal values keyed by solution set.
//!
//! Values are pure functions of the set and the immutable pattern table, so
//! two workers racing on the same key compute the same value. The map keeps
//! whichever insert lands first and the loser's work is simply discarded.

use std::fs;
use std::path::Path;

use dashmap::DashMap;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::solver::Optimal;
use crate::words::{Vocabulary, WordIndex};
use crate::WORD_LENGTH;

#[derive(Debug, Default)]
pub struct MemoCache {
    map: DashMap<Box<[WordIndex]>, Optimal>,
}

#[derive(Serialize, Deserialize)]
struct Snapshot {
    /// Letters of every vocabulary word, in index order.
    vocabulary: Vec<u8>,
    solution_count: usize,
    entries: Vec<(Vec<WordIndex>, Optimal)>,
}

impl MemoCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy so no shard lock outlives the call.
    pub fn get(&self, set: &[WordIndex]) -> Option<Optimal> {
        self.map.get(set).map(|entry| entry.value().clone())
    }

    /// Keep an existing entry if another worker got there first.
    pub fn insert_if_absent(&self, set: &[WordIndex], optimal: Optimal) {
        self.map.entry(set.into()).or_insert(optimal);
    }

    pub fn contains(&self, set: &[WordIndex]) -> bool {
        self.map.contains_key(set)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn clear(&self) {
        self.map.clear();
    }

    pub fn save(&self, path: &Path, vocab: &Vocabulary) -> Result<()> {
        let mut entries: Vec<(Vec<WordIndex>, Optimal)> = self
            .map
            .iter()
            .map(|entry| (entry.key().to_vec(), entry.value().clone()))
            .collect();
        entries.sort_unstable_by(|a, b| a.0.cmp(&b.0));

        let snapshot = Snapshot {
            vocabulary: vocab.letters(),
            solution_count: vocab.solution_count(),
            entries,
        };
        let data = bincode::serialize(&snapshot)
            .map_err(|e| Error::PersistenceFailure(format!("cannot encode memo cache: {}", e)))?;
        fs::write(path, data).map_err(|e| {
            Error::PersistenceFailure(format!("cannot write {}: {}", path.display(), e))
        })
    }

    /// Restore a saved cache. Every entry is validated before any is used.
    pub fn load(path: &Path, vocab: &Vocabulary) -> Result<Self> {
        let data = fs::read(path).map_err(|e| {
            Error::CacheUnavailable(format!("cannot read {}: {}", path.display(), e))
        })?;
        let snapshot: Snapshot = bincode::deserialize(&data)
            .map_err(|e| Error::CacheUnavailable(format!("cannot decode memo cache: {}", e)))?;

        if snapshot.solution_count != vocab.solution_count()
            || snapshot.vocabulary != vocab.letters()
        {
            return Err(Error::CacheUnavailable(format!(
                "memo cache was built for other word lists ({} words / {} solutions, have {} / {})",
                snapshot.vocabulary.len() / WORD_LENGTH,
                snapshot.solution_count,
                vocab.len(),
                vocab.solution_count()
            )));
        }

        let map = DashMap::with_capacity(snapshot.entries.len());
        for (key, optimal) in snapshot.entries {
            validate_entry(&key, &optimal, vocab)?;
            map.insert(key.into_boxed_slice(), optimal);
        }
        Ok(Self { map })
    }

    /// Load `path` if it holds a usable cache, otherwise start empty.
    pub fn load_or_default(path: &Path, vocab: &Vocabulary) -> Self {
        match Self::load(path, vocab) {
            Ok(cache) => {
                log::info!("restored {} memo entries from {}", cache.len(), path.display());
                cache
            }
            Err(e) => {
                log::warn!("{}; starting with an empty memo cache", e);
                Self::new()
            }
        }
    }
}

fn validate_entry(key: &[WordIndex], optimal: &Optimal, vocab: &Vocabulary) -> Result<()> {
    let bad = |why: &str| -> Result<()> {
        Err(Error::CacheUnavailable(format!("memo entry {:?}: {}", key, why)))
    };

    if key.len() < 3 {
        return bad("sets smaller than 3 are never cached");
    }
    if !key.windows(2).all(|w| w[0] < w[1]) {
        return bad("set is not strictly ascending");
    }
    if key.iter().any(|&i| !vocab.is_solution(i)) {
        return bad("set holds a non-solution index");
    }
    if !optimal.value.is_finite() || optimal.value < 1.0 {
        return bad("value out of range");
    }
    if optimal.guesses.is_empty() || optimal.guesses.iter().any(|&g| g as usize >= vocab.len()) {
        return bad("best guesses out of range");
    }
    Ok(())
}
