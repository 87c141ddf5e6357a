//! Player-facing feedback derived from guess outcomes
//!
//! This module turns the bare outcomes of a session into what a front end
//! shows: an icon, a message, a tone and the cosmetic cues it may play.
//! It renders nothing itself.

use serde::{Deserialize, Serialize};

use crate::{
    constants::feedback::{CAUTION_PERCENTAGE, DANGER_PERCENTAGE, LOW_ATTEMPTS_WARNING},
    rng::RandomSource,
    session::{Direction, GuessOutcome},
};

/// Messages picked at random when the player wins
const CELEBRATIONS: [&str; 4] = [
    "🎉 Congratulations! You got it!",
    "🏆 Amazing! Perfect guess!",
    "⭐ Brilliant! You nailed it!",
    "🎯 Bullseye! Excellent work!",
];

/// Overall mood of a feedback message
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tone {
    /// Neutral prompt
    #[default]
    Default,
    /// The player won
    Success,
    /// A wrong but accepted guess
    Warning,
    /// Rejected input or a lost game
    Error,
}

/// Cosmetic effect a front end may play alongside feedback
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Cue {
    /// Shake the feedback box
    Shake,
    /// Pulse the feedback box
    Pulse,
    /// Rain confetti
    Confetti,
}

/// A feedback message ready for display
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feedback {
    /// Emoji shown next to the message
    pub icon: String,
    /// Text shown to the player
    pub message: String,
    /// Mood of the message
    pub tone: Tone,
    /// Effects to play, in order
    pub cues: Vec<Cue>,
}

impl Feedback {
    fn new(icon: &str, message: String, tone: Tone, cues: Vec<Cue>) -> Self {
        Self {
            icon: icon.to_owned(),
            message,
            tone,
            cues,
        }
    }

    /// Prompt shown when a game starts
    pub fn new_game() -> Self {
        Self::new("🤔", "Make your first guess!".to_owned(), Tone::Default, vec![])
    }

    /// Feedback for an outcome of a game over `1..=range_max`
    ///
    /// Winning messages are picked through `rng`.
    pub fn for_outcome<R: RandomSource + ?Sized>(
        outcome: GuessOutcome,
        range_max: u32,
        rng: &mut R,
    ) -> Self {
        match outcome {
            GuessOutcome::OutOfRange => Self::new(
                "❌",
                format!("Please enter a number between 1 and {range_max}"),
                Tone::Error,
                vec![Cue::Shake],
            ),
            GuessOutcome::Correct { secret, .. } => {
                let index = rng.pick(CELEBRATIONS.len()) % CELEBRATIONS.len();
                let celebration = CELEBRATIONS[index];
                Self::new(
                    "🎉",
                    format!("{celebration} The number was {secret}!"),
                    Tone::Success,
                    vec![Cue::Pulse, Cue::Confetti],
                )
            }
            GuessOutcome::GameOver { secret } => Self::new(
                "😔",
                format!("Game Over! The number was {secret}. Try again!"),
                Tone::Error,
                vec![Cue::Shake],
            ),
            GuessOutcome::Incorrect {
                direction,
                remaining,
            } => {
                let (icon, hint) = match direction {
                    Direction::TooLow => ("📈", "Too low! Try a higher number."),
                    Direction::TooHigh => ("📉", "Too high! Try a lower number."),
                };
                let cues = if remaining <= LOW_ATTEMPTS_WARNING {
                    vec![Cue::Shake]
                } else {
                    vec![]
                };
                Self::new(
                    icon,
                    format!("{hint} {remaining} attempts left."),
                    Tone::Warning,
                    cues,
                )
            }
        }
    }
}

/// Colour band of the attempts bar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProgressBand {
    /// Plenty of attempts left
    Calm,
    /// More than 60% of the budget used
    Caution,
    /// More than 80% of the budget used
    Danger,
}

/// How much of the attempt budget has been used
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Progress {
    /// Attempts used
    pub used: u32,
    /// Attempt budget
    pub max: u32,
}

impl Progress {
    /// Creates a progress value
    pub fn new(used: u32, max: u32) -> Self {
        Self { used, max }
    }

    /// Share of the budget used, from 0 to 100
    pub fn percentage(self) -> f64 {
        if self.max == 0 {
            return 0.0;
        }
        f64::from(self.used) / f64::from(self.max) * 100.0
    }

    /// Colour band for the current percentage
    pub fn band(self) -> ProgressBand {
        let percentage = self.percentage();
        if percentage > DANGER_PERCENTAGE {
            ProgressBand::Danger
        } else if percentage > CAUTION_PERCENTAGE {
            ProgressBand::Caution
        } else {
            ProgressBand::Calm
        }
    }
}
