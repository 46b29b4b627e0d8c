use wordle_optimal::{Driver, MemoCache, PatternTable, RankedResult, Vocabulary};

fn get_test_words() -> Vocabulary {
    Vocabulary::from_strs(
        &[
            "CRANE", "SLATE", "TRACE", "CRATE", "RAISE", "ARISE", "STARE", "ROAST", "TOAST",
            "BEAST", "LEAST", "FEAST", "GRATE",
        ],
        &["SALET", "CLOTH", "DUMPY"],
    )
    .unwrap()
}

fn guesses(results: &[RankedResult]) -> Vec<Vec<u16>> {
    results.iter().map(|r| r.guesses.clone()).collect()
}

#[test]
fn test_ranks_every_opening_guess() {
    let vocab = get_test_words();
    let table = PatternTable::build(&vocab);
    let memo = MemoCache::new();
    let driver = Driver::new(&vocab, &table, &memo, 4).unwrap();

    let ranked = driver.solve_top_level(&vocab.solution_indices()).unwrap();

    assert_eq!(
        guesses(&ranked),
        vec![
            vec![0, 2, 3, 12],
            vec![1],
            vec![7, 10, 13, 14],
            vec![4, 5, 6, 8, 9, 11],
            vec![15],
        ]
    );
    assert!((ranked[0].value - 28.0 / 13.0).abs() < 1e-12);
    assert!((ranked[1].value - 29.0 / 13.0).abs() < 1e-12);
    assert!((ranked[2].value - 30.0 / 13.0).abs() < 1e-12);
    assert!((ranked[3].value - 31.0 / 13.0).abs() < 1e-12);
    assert!(ranked[4].value.is_infinite());

    let total: usize = ranked.iter().map(|r| r.guesses.len()).sum();
    assert_eq!(total, vocab.len());
    assert!(ranked.windows(2).all(|w| w[0].value < w[1].value));
}

#[test]
fn test_top_level_agrees_with_unforced_search() {
    let vocab = get_test_words();
    let table = PatternTable::build(&vocab);
    let memo = MemoCache::new();
    let set = vocab.first_solutions(10).unwrap();

    let driver = Driver::new(&vocab, &table, &memo, 2).unwrap();
    let ranked = driver.solve_top_level(&set).unwrap();

    let optimal = wordle_optimal::Solver::new(&vocab, &table, &memo)
        .optimal(&set)
        .unwrap();
    assert_eq!(ranked[0].value, optimal.value);
    assert_eq!(ranked[0].guesses, optimal.guesses);
}

#[test]
fn test_results_do_not_depend_on_scheduling() {
    let vocab = get_test_words();
    let table = PatternTable::build(&vocab);
    let set = vocab.solution_indices();

    let memo = MemoCache::new();
    let baseline = Driver::new(&vocab, &table, &memo, 1)
        .unwrap()
        .solve_top_level(&set)
        .unwrap();

    for threads in [2, 3, 8] {
        memo.clear();
        let driver = Driver::new(&vocab, &table, &memo, threads).unwrap();
        assert_eq!(driver.threads(), threads);
        assert_eq!(driver.solve_top_level(&set).unwrap(), baseline);
    }

    // A warm cache must not change anything either.
    let warm = Driver::new(&vocab, &table, &memo, 4)
        .unwrap()
        .solve_top_level(&set)
        .unwrap();
    assert_eq!(warm, baseline);
}

#[test]
fn test_zero_threads_means_one() {
    let vocab = get_test_words();
    let table = PatternTable::build(&vocab);
    let memo = MemoCache::new();
    let driver = Driver::new(&vocab, &table, &memo, 0).unwrap();
    assert_eq!(driver.threads(), 1);
}

#[test]
fn test_empty_set_fails_the_run() {
    let vocab = get_test_words();
    let table = PatternTable::build(&vocab);
    let memo = MemoCache::new();
    let driver = Driver::new(&vocab, &table, &memo, 2).unwrap();

    assert!(matches!(
        driver.solve_top_level(&[]),
        Err(wordle_optimal::Error::InvalidInput(_))
    ));
    assert!(memo.is_empty());
}
