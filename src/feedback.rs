//! Feedback calculation for a guess against a secret.
//!
//! A pattern is one base-3 digit per letter position, position 0 being the
//! least significant digit: grey = 0, yellow = 1, green = 2.

use crate::words::Word;
use crate::{ALPHABET_SIZE, WORD_LENGTH};

/// Feedback for a single letter position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Feedback {
    /// Correct letter in correct position (green)
    Correct,
    /// Correct letter in wrong position (yellow)
    Present,
    /// Letter not in word, or every copy already credited (grey)
    Absent,
}

impl Feedback {
    fn digit(self) -> u8 {
        match self {
            Feedback::Absent => 0,
            Feedback::Present => 1,
            Feedback::Correct => 2,
        }
    }

    pub fn to_char(self) -> char {
        match self {
            Feedback::Correct => '🟩',
            Feedback::Present => '🟨',
            Feedback::Absent => '⬛',
        }
    }

    /// Parse from a character (g=green, y=yellow, b=black/gray)
    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_lowercase() {
            'g' | '2' => Some(Feedback::Correct),
            'y' | '1' => Some(Feedback::Present),
            'b' | 'x' | '0' => Some(Feedback::Absent),
            _ => None,
        }
    }
}

/// A complete feedback pattern for a five letter guess, in `0..243`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FeedbackPattern(pub u8);

impl FeedbackPattern {
    /// Every position green: the guess is the secret.
    pub const ALL_CORRECT: Self = Self(2 + 2 * 3 + 2 * 9 + 2 * 27 + 2 * 81); // 242

    pub const ALL_ABSENT: Self = Self(0);

    /// 3^5
    pub const NUM_PATTERNS: usize = 243;

    pub fn new(feedbacks: [Feedback; WORD_LENGTH]) -> Self {
        let mut pattern: u8 = 0;
        let mut multiplier: u8 = 1;
        for fb in feedbacks {
            pattern += fb.digit() * multiplier;
            multiplier *= 3;
        }
        Self(pattern)
    }

    /// Compute the feedback the game gives for `guess` when the secret is
    /// `solution`.
    ///
    /// Greens consume letter credits before yellows, so a repeated guess
    /// letter is only yellow while the solution still has unmatched copies.
    pub fn calculate(guess: &Word, solution: &Word) -> Self {
        let guess = guess.as_bytes();
        let solution = solution.as_bytes();

        let mut remaining = [0u8; ALPHABET_SIZE];
        for &c in solution {
            remaining[letter_index(c)] += 1;
        }

        let mut feedback = [Feedback::Absent; WORD_LENGTH];
        for i in 0..WORD_LENGTH {
            if guess[i] == solution[i] {
                feedback[i] = Feedback::Correct;
                remaining[letter_index(guess[i])] -= 1;
            }
        }

        for i in 0..WORD_LENGTH {
            if feedback[i] == Feedback::Correct {
                continue;
            }
            let idx = letter_index(guess[i]);
            if remaining[idx] > 0 {
                feedback[i] = Feedback::Present;
                remaining[idx] -= 1;
            }
        }

        Self::new(feedback)
    }

    pub fn to_feedbacks(self) -> [Feedback; WORD_LENGTH] {
        let mut pattern = self.0;
        let mut feedbacks = [Feedback::Absent; WORD_LENGTH];
        for feedback in feedbacks.iter_mut() {
            *feedback = match pattern % 3 {
                0 => Feedback::Absent,
                1 => Feedback::Present,
                _ => Feedback::Correct,
            };
            pattern /= 3;
        }
        feedbacks
    }

    pub fn is_win(self) -> bool {
        self == Self::ALL_CORRECT
    }

    pub fn is_valid(self) -> bool {
        (self.0 as usize) < Self::NUM_PATTERNS
    }

    /// Parse a pattern from a string like "gybbb" or "21000"
    pub fn parse(s: &str) -> Option<Self> {
        if s.chars().count() != WORD_LENGTH {
            return None;
        }
        let feedbacks: Option<Vec<_>> = s.chars().map(Feedback::from_char).collect();
        let arr: [Feedback; WORD_LENGTH] = feedbacks?.try_into().ok()?;
        Some(Self::new(arr))
    }

    pub fn to_emoji_string(self) -> String {
        self.to_feedbacks().iter().map(|f| f.to_char()).collect()
    }
}

impl std::fmt::Display for FeedbackPattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_emoji_string())
    }
}

/// Bit `i` is set when letter `'A' + i` occurs in the word.
pub fn letter_mask(word: &Word) -> u32 {
    word.as_bytes()
        .iter()
        .fold(0, |mask, &c| mask | 1 << letter_index(c))
}

#[inline]
fn letter_index(c: u8) -> usize {
    (c - b'A') as usize
}
