//! Support for the guess-the-year trivia game.
//!
//! The game shows a headline and a handful of candidate years; the player
//! picks one. This module builds the candidate set ([`distractors`]) and
//! scores the answer ([`evaluate_guess`]). Candidates are drawn from the
//! years that actually occur in the corpus, so every option is plausible.

use rand::rng;
use rand::seq::{IndexedRandom, SliceRandom};

/// Number of year choices the game presents, the correct one included.
pub const YEAR_OPTIONS: usize = 4;

/// Guesses within this many years of the truth count as correct.
pub const GUESS_TOLERANCE: i32 = 2;

/// The scored result of one guess.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GuessOutcome {
    /// Actual year minus guessed year; positive means the guess was too
    /// early.
    pub delta: i32,
    /// Whether the guess landed within [`GUESS_TOLERANCE`].
    pub correct: bool,
}

impl GuessOutcome {
    /// The player-facing verdict line for this outcome.
    pub fn verdict(&self) -> String {
        match self.delta {
            0 => "Exactly right!".to_string(),
            d if d.abs() <= GUESS_TOLERANCE => {
                let off = d.abs();
                let unit = if off == 1 { "year" } else { "years" };
                format!("Close! Just {off} {unit} off.")
            }
            d if d > 0 => format!("{d} years too early."),
            d => format!("{} years too late.", d.abs()),
        }
    }
}

/// Build a unique, shuffled set of candidate years around the correct one.
///
/// The set is seeded with `correct_year`, then filled by sampling
/// `available_years` uniformly with replacement until `count` distinct
/// values are collected; the result is returned in random order so the
/// correct answer has no positional tell.
///
/// `available_years` is expected to hold at least `count` distinct values
/// (any real corpus does); that is not checked. An empty pool returns just
/// the seeded year instead of spinning.
///
/// # Arguments
///
/// * `correct_year` - The year the headline actually ran
/// * `count` - Total options wanted, usually [`YEAR_OPTIONS`]
/// * `available_years` - The corpus year pool to draw from
pub fn distractors(correct_year: i32, count: usize, available_years: &[i32]) -> Vec<i32> {
    let mut options = vec![correct_year];
    let mut r = rng();
    while options.len() < count {
        match available_years.choose(&mut r) {
            Some(&year) => {
                if !options.contains(&year) {
                    options.push(year);
                }
            }
            None => break,
        }
    }
    options.shuffle(&mut r);
    options
}

/// Score a guessed year against the actual one.
pub fn evaluate_guess(actual_year: i32, guess: i32) -> GuessOutcome {
    let delta = actual_year - guess;
    GuessOutcome {
        delta,
        correct: delta.abs() <= GUESS_TOLERANCE,
    }
}
