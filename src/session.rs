//! Game session state machine
//!
//! A [`GameSession`] owns the secret number, the guess range and the
//! attempt budget of a single game. It is replaced wholesale whenever a
//! new game starts; nothing here knows how the game is rendered.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;
use thiserror::Error;

use crate::{
    constants::session::{MAX_ATTEMPTS, MIN_RANGE_MAX},
    rng::RandomSource,
};

/// Lifecycle status of a game session
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Status {
    /// The player may still submit guesses
    #[default]
    InProgress,
    /// The player found the secret
    Won,
    /// The attempt budget ran out before the secret was found
    Lost,
}

impl Status {
    /// Whether the status accepts no more guesses
    pub fn is_terminal(self) -> bool {
        !matches!(self, Self::InProgress)
    }
}

/// Which way the secret lies relative to a wrong guess
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    /// The guess was below the secret
    TooLow,
    /// The guess was above the secret
    TooHigh,
}

/// Result of submitting a guess to a session in progress
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GuessOutcome {
    /// The guess was not a number in `1..=range_max`; nothing changed
    OutOfRange,
    /// The guess matched the secret
    Correct {
        /// The secret number
        secret: u32,
        /// Attempts used, including the winning one
        attempts: u32,
    },
    /// The guess was wrong and attempts remain
    Incorrect {
        /// Where the secret lies relative to the guess
        direction: Direction,
        /// Attempts left after this guess
        remaining: u32,
    },
    /// The guess was wrong and it was the last attempt
    GameOver {
        /// The secret number
        secret: u32,
    },
}

impl GuessOutcome {
    /// Whether this outcome consumed an attempt
    pub fn consumed_attempt(self) -> bool {
        !matches!(self, Self::OutOfRange)
    }

    /// Whether this outcome ended the game
    pub fn is_final(self) -> bool {
        matches!(self, Self::Correct { .. } | Self::GameOver { .. })
    }
}

/// Errors that can occur when starting or playing a session
#[derive(Error, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// A guess was submitted after the game had already ended
    #[error("the game is over, start a new game to keep playing")]
    InvalidState,
    /// The requested range cannot hold a game
    #[error("range maximum must be at least 2, got {range_max}")]
    InvalidConfiguration {
        /// The rejected upper bound
        range_max: u32,
    },
}

/// Serializable view of a session
///
/// The secret is only revealed once the session is over.
#[skip_serializing_none]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Upper bound of the guess range
    pub range_max: u32,
    /// Attempts consumed so far
    pub attempts_used: u32,
    /// Attempt budget
    pub attempts_max: u32,
    /// Current status
    pub status: Status,
    /// The secret, present only when the game has ended
    pub secret: Option<u32>,
}

/// A single game of number guessing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSession {
    range_max: u32,
    secret: u32,
    attempts_used: u32,
    attempts_max: u32,
    status: Status,
}

impl GameSession {
    /// Starts a fresh game over `1..=range_max`
    ///
    /// The secret is drawn from `rng`, the attempt counter starts at zero
    /// and the status at [`Status::InProgress`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] if `range_max` is below 2.
    pub fn start_new_game<R: RandomSource + ?Sized>(
        range_max: u32,
        rng: &mut R,
    ) -> Result<Self, Error> {
        if range_max < MIN_RANGE_MAX {
            tracing::warn!(range_max, "rejected new game with invalid range");
            return Err(Error::InvalidConfiguration { range_max });
        }

        let secret = rng.draw_secret(range_max);
        debug_assert!((1..=range_max).contains(&secret));
        tracing::debug!(secret, range_max, "started new game");

        Ok(Self {
            range_max,
            secret,
            attempts_used: 0,
            attempts_max: MAX_ATTEMPTS,
            status: Status::InProgress,
        })
    }

    /// Submits a numeric guess
    ///
    /// Guesses outside `1..=range_max` return [`GuessOutcome::OutOfRange`]
    /// without consuming an attempt. A correct guess always wins, even on
    /// the last attempt.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidState`] if the game has already ended.
    pub fn submit_guess(&mut self, guess: i64) -> Result<GuessOutcome, Error> {
        if self.status.is_terminal() {
            tracing::warn!(status = ?self.status, "rejected guess on finished game");
            return Err(Error::InvalidState);
        }

        if guess < 1 || guess > i64::from(self.range_max) {
            return Ok(GuessOutcome::OutOfRange);
        }

        self.attempts_used += 1;
        tracing::trace!(guess, attempts_used = self.attempts_used, "accepted guess");

        let outcome = match guess.cmp(&i64::from(self.secret)) {
            Ordering::Equal => {
                self.status = Status::Won;
                tracing::info!(attempts = self.attempts_used, "player won");
                GuessOutcome::Correct {
                    secret: self.secret,
                    attempts: self.attempts_used,
                }
            }
            _ if self.attempts_used == self.attempts_max => {
                self.status = Status::Lost;
                tracing::info!(secret = self.secret, "player ran out of attempts");
                GuessOutcome::GameOver {
                    secret: self.secret,
                }
            }
            ordering => GuessOutcome::Incorrect {
                direction: if ordering == Ordering::Less {
                    Direction::TooLow
                } else {
                    Direction::TooHigh
                },
                remaining: self.remaining(),
            },
        };

        Ok(outcome)
    }

    /// Submits raw player input
    ///
    /// The input is read leniently with [`parse_guess`], so `"42abc"` counts
    /// as 42. Anything without leading digits is out of range.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidState`] if the game has already ended.
    pub fn submit_input(&mut self, input: &str) -> Result<GuessOutcome, Error> {
        match parse_guess(input) {
            Some(guess) => self.submit_guess(guess),
            None if self.status.is_terminal() => Err(Error::InvalidState),
            None => Ok(GuessOutcome::OutOfRange),
        }
    }

    /// Upper bound of the guess range
    pub fn range_max(&self) -> u32 {
        self.range_max
    }

    /// The secret number
    pub fn secret(&self) -> u32 {
        self.secret
    }

    /// Attempts consumed so far
    pub fn attempts_used(&self) -> u32 {
        self.attempts_used
    }

    /// Attempt budget
    pub fn attempts_max(&self) -> u32 {
        self.attempts_max
    }

    /// Attempts left before the game is lost
    pub fn remaining(&self) -> u32 {
        self.attempts_max - self.attempts_used
    }

    /// Current status
    pub fn status(&self) -> Status {
        self.status
    }

    /// Whether the game has ended
    pub fn is_finished(&self) -> bool {
        self.status.is_terminal()
    }

    /// Whether `input` would be accepted as an in-range guess
    ///
    /// Used to check input while it is typed; empty or unparsable text is
    /// never accepted.
    pub fn accepts_input(&self, input: &str) -> bool {
        parse_guess(input)
            .is_some_and(|guess| (1..=i64::from(self.range_max)).contains(&guess))
    }

    /// Serializable view of the session
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            range_max: self.range_max,
            attempts_used: self.attempts_used,
            attempts_max: self.attempts_max,
            status: self.status,
            secret: self.is_finished().then_some(self.secret),
        }
    }
}

/// Reads the leading integer of `input`
///
/// Returns `None` when no digits follow the optional sign, or when the
/// number does not fit an `i64`.
pub fn parse_guess(input: &str) -> Option<i64> {
    let trimmed = input.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let digits_len = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits_len == 0 {
        return None;
    }

    let magnitude: i64 = rest[..digits_len].parse().ok()?;
    Some(if negative { -magnitude } else { magnitude })
}
