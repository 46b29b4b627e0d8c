//! Wordle Optimal CLI
//!
//! Ranks opening guesses by exact expected number of guesses, or solves a
//! single set of candidate secrets.

use std::path::PathBuf;
use std::time::Instant;

use clap::{Parser, Subcommand};
use wordle_optimal::driver::default_threads;
use wordle_optimal::{
    Driver, Error, FeedbackPattern, MemoCache, PatternTable, Solver, Vocabulary, Word, WordIndex,
};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Possible secrets, one word per line
    #[arg(long, default_value = "solution_list.txt")]
    solutions: PathBuf,

    /// Extra allowed guesses, one word per line
    #[arg(long, default_value = "guess_list.txt")]
    guesses: PathBuf,

    /// Binary pattern table reused across runs
    #[arg(long, default_value = "patterns.bin")]
    pattern_cache: PathBuf,

    /// Memoized solution-set values reused across runs
    #[arg(long, default_value = "memo.bin")]
    memo_cache: PathBuf,

    /// Worker threads for ranking (defaults to available parallelism)
    #[arg(short, long)]
    threads: Option<usize>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Rank every word as the opening guess for a set of secrets
    Rank {
        /// Use the first N solutions
        #[arg(long, conflicts_with = "sample")]
        first: Option<usize>,

        /// Use N solutions picked at random
        #[arg(long)]
        sample: Option<usize>,

        /// Seed for --sample
        #[arg(long, default_value_t = 0)]
        seed: u64,

        /// Number of value groups to print
        #[arg(short = 'k', long, default_value_t = 10)]
        top: usize,
    },
    /// Find the best next guesses when exactly these words remain
    Solve {
        #[arg(required = true)]
        words: Vec<String>,
    },
    /// Show the feedback a guess gets against a secret
    Pattern { guess: String, solution: String },
    /// Keep the secrets consistent with feedback like "gybbb" and solve them
    Narrow {
        guess: String,
        /// g/2 = green, y/1 = yellow, b/x/0 = grey, one per letter
        pattern: String,
    },
}

fn words_to_string(vocab: &Vocabulary, indices: &[WordIndex]) -> String {
    indices
        .iter()
        .map(|&i| vocab.word(i).to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    if let Command::Pattern { guess, solution } = &args.command {
        let guess = Word::parse(guess)?;
        let solution = Word::parse(solution)?;
        let pattern = FeedbackPattern::calculate(&guess, &solution);
        println!("{} vs {}: {} {}", guess, solution, pattern.0, pattern);
        return Ok(());
    }

    let start = Instant::now();
    let vocab = Vocabulary::load(&args.solutions, &args.guesses)?;
    let patterns = PatternTable::load_or_build(&args.pattern_cache, &vocab);
    let memo = MemoCache::load_or_default(&args.memo_cache, &vocab);

    let outcome = run(&args, &vocab, &patterns, &memo);

    match memo.save(&args.memo_cache, &vocab) {
        Ok(()) => log::info!("saved {} memo entries to {}", memo.len(), args.memo_cache.display()),
        Err(e) => log::warn!("{}", e),
    }
    log::info!("finished in {:.2?}", start.elapsed());
    outcome
}

fn run(
    args: &Args,
    vocab: &Vocabulary,
    patterns: &PatternTable,
    memo: &MemoCache,
) -> Result<(), Box<dyn std::error::Error>> {
    match &args.command {
        Command::Rank {
            first,
            sample,
            seed,
            top,
        } => {
            let set = match (first, sample) {
                (Some(n), _) => vocab.first_solutions(*n)?,
                (None, Some(n)) => vocab.sample_solutions(*n, *seed)?,
                (None, None) => vocab.solution_indices(),
            };
            log::info!("solution set: {}", words_to_string(vocab, &set));

            let threads = args.threads.unwrap_or_else(default_threads);
            let driver = Driver::new(vocab, patterns, memo, threads)?;
            log::info!("ranking {} guesses on {} threads", vocab.len(), driver.threads());
            let ranked = driver.solve_top_level(&set)?;

            println!();
            println!("{:>4} {:>10}  Guesses", "#", "Expected");
            println!("{}", "-".repeat(50));
            for (i, result) in ranked.iter().take(*top).enumerate() {
                println!(
                    "{:>4} {:>10.6}  {}",
                    i + 1,
                    result.value,
                    words_to_string(vocab, &result.guesses)
                );
            }
            println!();
        }
        Command::Solve { words } => {
            let words = words
                .iter()
                .map(|w| Word::parse(w))
                .collect::<Result<Vec<_>, _>>()?;
            let set = vocab.solution_set(&words)?;
            let optimal = Solver::new(vocab, patterns, memo).optimal(&set)?;

            println!("Solution set: {}", words_to_string(vocab, &set));
            println!("Optimal guesses: {}", words_to_string(vocab, &optimal.guesses));
            println!("Expected value: {:.6}", optimal.value);
        }
        Command::Narrow { guess, pattern } => {
            let word = Word::parse(guess)?;
            let guess = vocab.index_of(&word).ok_or_else(|| {
                Error::InvalidInput(format!("{} is not an allowed guess", word))
            })?;
            let pattern = FeedbackPattern::parse(pattern).ok_or_else(|| {
                Error::InvalidInput(format!("bad pattern {:?}, use g/y/b per letter", pattern))
            })?;

            let set = patterns.consistent(guess, pattern, &vocab.solution_indices());
            println!("{} {}: {} solutions left", word, pattern, set.len());
            if set.is_empty() {
                return Ok(());
            }
            if set.len() <= 20 {
                println!("Remaining: {}", words_to_string(vocab, &set));
            }
            let optimal = Solver::new(vocab, patterns, memo).optimal(&set)?;
            println!("Optimal guesses: {}", words_to_string(vocab, &optimal.guesses));
            println!("Expected value: {:.6}", optimal.value);
        }
        Command::Pattern { .. } => {}
    }
    Ok(())
}
