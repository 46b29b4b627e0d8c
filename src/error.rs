//! Error type shared by the library.

use std::io;
use std::path::PathBuf;

/// Errors produced while loading words, restoring caches, or searching.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A solver precondition was violated (empty or non-canonical set, bad index).
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("invalid word: {0:?}")]
    InvalidWord(String),

    #[error("the solution list is empty")]
    EmptySolutions,

    #[error("vocabulary of {0} words does not fit the u16 index space")]
    VocabularyTooLarge(usize),

    /// A cache file is missing, corrupt, or shaped for another vocabulary.
    /// Callers recover by recomputing.
    #[error("cache unavailable: {0}")]
    CacheUnavailable(String),

    /// A cache file could not be written. The in-memory data stays valid.
    #[error("persistence failure: {0}")]
    PersistenceFailure(String),

    #[error("cannot start worker pool: {0}")]
    WorkerPool(#[from] rayon::ThreadPoolBuildError),

    #[error("IO error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
