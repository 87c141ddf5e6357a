//! # Numguess
//!
//! This library provides the game logic for a single-player number
//! guessing game. A secret is drawn from a configurable range, the player
//! gets a fixed budget of guesses, and every guess is answered with
//! "too high" or "too low" until the player wins or runs out.
//!
//! The [`session`] module holds the state machine; [`game`] wraps it for a
//! front end and reports everything through a [`tunnel::Tunnel`].

#![cfg_attr(all(coverage_nightly, test), feature(coverage_attribute))]
#![deny(missing_docs)]
#![deny(rustdoc::missing_crate_level_docs)]
#![warn(clippy::pedantic)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
use serde::Serialize;

pub mod config;
pub mod constants;
pub mod easter_egg;
pub mod feedback;
pub mod game;
pub mod rng;
pub mod session;
pub mod tunnel;

/// Full state of a game, sent when a view needs to redraw from scratch
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct SyncMessage {
    /// The current session, with the secret hidden while in progress
    pub session: session::Snapshot,
    /// Feedback currently on display
    pub feedback: feedback::Feedback,
    /// Attempts used against the budget
    pub progress: feedback::Progress,
    /// Colour band of the attempts bar
    pub band: feedback::ProgressBand,
    /// Whether guess input should be disabled
    pub input_locked: bool,
}

impl SyncMessage {
    /// Converts the sync message to a JSON string for transmission
    ///
    /// # Panics
    ///
    /// This method panics if serialization fails, which should never happen
    /// with the default JSON serializer for well-formed data.
    pub fn to_message(&self) -> String {
        serde_json::to_string(self).expect("default serializer cannot fail")
    }
}

/// Incremental updates sent to a front end after each operation
#[derive(Debug, Serialize, Clone, PartialEq, derive_more::From)]
pub enum UpdateMessage {
    /// A new game started over `1..=range_max`
    NewGame {
        /// Upper bound of the guess range
        range_max: u32,
        /// Attempt budget
        attempts_max: u32,
    },
    /// New feedback to display
    #[from]
    Feedback(feedback::Feedback),
    /// The attempts bar changed
    Progress {
        /// Attempts used against the budget
        progress: feedback::Progress,
        /// Colour band of the attempts bar
        band: feedback::ProgressBand,
    },
    /// Guess input should be disabled (`true`) or enabled (`false`)
    InputLocked(bool),
    /// Typed input is (`true`) or is not (`false`) a guess in range
    InputValid(bool),
    /// A hidden key sequence was entered
    EasterEgg(String),
}

impl UpdateMessage {
    /// Converts the update message to a JSON string for transmission
    ///
    /// # Panics
    ///
    /// This method panics if serialization fails, which should never happen
    /// with the default JSON serializer for well-formed data.
    pub fn to_message(&self) -> String {
        serde_json::to_string(self).expect("default serializer cannot fail")
    }
}
