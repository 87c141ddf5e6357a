//! Configuration constants for the number guessing game
//!
//! This module contains the limits and thresholds used throughout the
//! game so that the session, the options validation and the feedback
//! layer agree on the same boundaries.

/// Game session constants
pub mod session {
    /// Number of in-range guesses a player gets per game
    pub const MAX_ATTEMPTS: u32 = 10;
    /// Smallest accepted upper bound of the guess range
    pub const MIN_RANGE_MAX: u32 = 2;
    /// Upper bound of the guess range when nothing else is configured
    pub const DEFAULT_RANGE_MAX: u32 = 100;
}

/// Feedback presentation constants
pub mod feedback {
    /// Remaining attempts at or below which a wrong guess shakes the feedback
    pub const LOW_ATTEMPTS_WARNING: u32 = 3;
    /// Progress percentage above which the attempts bar turns to caution
    pub const CAUTION_PERCENTAGE: f64 = 60.0;
    /// Progress percentage above which the attempts bar turns to danger
    pub const DANGER_PERCENTAGE: f64 = 80.0;
}
