use std::fs;
use std::path::PathBuf;

use wordle_optimal::{Error, MemoCache, Optimal, PatternTable, Solver, Vocabulary};

fn temp_path(name: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!(
        "wordle-optimal-{}-{}",
        std::process::id(),
        name
    ));
    let _ = fs::remove_file(&path);
    path
}

fn get_test_words() -> Vocabulary {
    Vocabulary::from_strs(
        &["BATCH", "HATCH", "MATCH", "LATCH", "PATCH", "CRANE"],
        &["HELMS", "FJORD"],
    )
    .unwrap()
}

#[test]
fn test_pattern_table_round_trip() {
    let vocab = get_test_words();
    let path = temp_path("patterns-round-trip");
    let table = PatternTable::build(&vocab);
    table.save(&path).unwrap();

    assert_eq!(
        fs::metadata(&path).unwrap().len() as usize,
        vocab.len() * vocab.solution_count()
    );
    let restored = PatternTable::load(&path, &vocab).unwrap();
    assert_eq!(restored.as_bytes(), table.as_bytes());
    fs::remove_file(&path).unwrap();
}

#[test]
fn test_pattern_table_rejects_wrong_shape() {
    let vocab = get_test_words();
    let table = PatternTable::build(&vocab);

    let short = table.as_bytes()[1..].to_vec();
    assert!(matches!(
        PatternTable::from_bytes(short, &vocab),
        Err(Error::CacheUnavailable(_))
    ));

    let mut garbled = table.as_bytes().to_vec();
    garbled[3] = 243;
    assert!(matches!(
        PatternTable::from_bytes(garbled, &vocab),
        Err(Error::CacheUnavailable(_))
    ));

    let missing = temp_path("patterns-missing");
    assert!(matches!(
        PatternTable::load(&missing, &vocab),
        Err(Error::CacheUnavailable(_))
    ));
}

#[test]
fn test_pattern_table_rebuilds_bad_cache() {
    let vocab = get_test_words();
    let path = temp_path("patterns-rebuild");
    fs::write(&path, b"not a pattern table").unwrap();

    let table = PatternTable::load_or_build(&path, &vocab);
    assert_eq!(table.as_bytes(), PatternTable::build(&vocab).as_bytes());
    // The bad file is overwritten with the recomputed table.
    assert_eq!(fs::read(&path).unwrap(), table.as_bytes());
    fs::remove_file(&path).unwrap();
}

#[test]
fn test_memo_round_trip() {
    let vocab = get_test_words();
    let table = PatternTable::build(&vocab);
    let memo = MemoCache::new();
    let set = vocab.first_solutions(5).unwrap();
    let optimal = Solver::new(&vocab, &table, &memo).optimal(&set).unwrap();

    let path = temp_path("memo-round-trip");
    memo.save(&path, &vocab).unwrap();
    let restored = MemoCache::load(&path, &vocab).unwrap();
    assert_eq!(restored.len(), memo.len());
    assert_eq!(restored.get(&set), Some(optimal));
    fs::remove_file(&path).unwrap();
}

#[test]
fn test_memo_for_other_vocabulary_is_rejected() {
    let vocab = get_test_words();
    let table = PatternTable::build(&vocab);
    let memo = MemoCache::new();
    Solver::new(&vocab, &table, &memo)
        .optimal(&vocab.solution_indices())
        .unwrap();

    let path = temp_path("memo-other-vocab");
    memo.save(&path, &vocab).unwrap();

    let other = Vocabulary::from_strs(&["BATCH", "HATCH", "MATCH"], &["HELMS"]).unwrap();
    assert!(matches!(
        MemoCache::load(&path, &other),
        Err(Error::CacheUnavailable(_))
    ));
    assert!(MemoCache::load_or_default(&path, &other).is_empty());
    fs::remove_file(&path).unwrap();
}

#[test]
fn test_memo_rejects_invalid_entries() {
    let vocab = get_test_words();
    let path = temp_path("memo-invalid-entry");

    let memo = MemoCache::new();
    // HELMS (index 6) is not a secret, so this key can never come from a search.
    memo.insert_if_absent(
        &[0, 1, 6],
        Optimal {
            value: 2.0,
            guesses: vec![6],
        },
    );
    memo.save(&path, &vocab).unwrap();
    assert!(matches!(
        MemoCache::load(&path, &vocab),
        Err(Error::CacheUnavailable(_))
    ));

    fs::write(&path, [0xffu8; 7]).unwrap();
    assert!(matches!(
        MemoCache::load(&path, &vocab),
        Err(Error::CacheUnavailable(_))
    ));
    fs::remove_file(&path).unwrap();
}

#[test]
fn test_memo_save_failure_is_reported() {
    let vocab = get_test_words();
    let memo = MemoCache::new();
    let dir = temp_path("memo-dir");
    fs::create_dir_all(&dir).unwrap();

    // A directory cannot be written as a file.
    assert!(matches!(
        memo.save(&dir, &vocab),
        Err(Error::PersistenceFailure(_))
    ));
    fs::remove_dir(&dir).unwrap();
}

#[test]
fn test_memo_for_same_sized_word_lists_is_rejected() {
    let vocab = get_test_words();
    let table = PatternTable::build(&vocab);
    let memo = MemoCache::new();
    Solver::new(&vocab, &table, &memo)
        .optimal(&vocab.solution_indices())
        .unwrap();

    let path = temp_path("memo-same-size");
    memo.save(&path, &vocab).unwrap();

    // Same counts, one word swapped.
    let other = Vocabulary::from_strs(
        &["BATCH", "HATCH", "MATCH", "LATCH", "WATCH", "CRANE"],
        &["HELMS", "FJORD"],
    )
    .unwrap();
    assert_eq!(other.len(), vocab.len());
    assert_eq!(other.solution_count(), vocab.solution_count());
    assert!(matches!(
        MemoCache::load(&path, &other),
        Err(Error::CacheUnavailable(_))
    ));
    assert!(MemoCache::load(&path, &vocab).is_ok());
    fs::remove_file(&path).unwrap();
}
