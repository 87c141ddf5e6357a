//! Konami code detection
//!
//! The tracker is owned by whoever feeds it key presses, so each game
//! keeps its own progress.

use serde::{Deserialize, Serialize};

/// Keys a front end reports to the tracker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Key {
    /// Up arrow
    Up,
    /// Down arrow
    Down,
    /// Left arrow
    Left,
    /// Right arrow
    Right,
    /// The B key
    B,
    /// The A key
    A,
    /// Any other key
    Other,
}

/// ↑ ↑ ↓ ↓ ← → ← → B A
const SEQUENCE: [Key; 10] = [
    Key::Up,
    Key::Up,
    Key::Down,
    Key::Down,
    Key::Left,
    Key::Right,
    Key::Left,
    Key::Right,
    Key::B,
    Key::A,
];

/// Message shown when the sequence is completed
pub const ACTIVATION_MESSAGE: &str = "🎮 Konami Code activated! You're a true gamer!";

/// Tracks progress through the Konami sequence
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KonamiTracker {
    progress: usize,
}

impl KonamiTracker {
    /// Feeds a key press, returning `true` when it completes the sequence
    ///
    /// A wrong key resets progress without counting as a fresh start, so
    /// `Up Up Up Down ...` needs to begin again from the first `Up`.
    pub fn press(&mut self, key: Key) -> bool {
        if SEQUENCE[self.progress] != key {
            self.progress = 0;
            return false;
        }

        self.progress += 1;
        if self.progress == SEQUENCE.len() {
            self.progress = 0;
            return true;
        }
        false
    }

    /// Number of keys matched so far
    pub fn progress(&self) -> usize {
        self.progress
    }
}
