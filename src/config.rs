//! Game options
//!
//! Options are plain serde data validated with `garde`, so a front end can
//! load them from JSON or build them in code and get the same checks.

use garde::Validate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::session::{DEFAULT_RANGE_MAX, MIN_RANGE_MAX};

/// Options that shape every new game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct Options {
    /// Upper bound of the inclusive guess range `1..=range_max`
    #[serde(default = "default_range_max")]
    #[garde(range(min = MIN_RANGE_MAX))]
    range_max: u32,
}

fn default_range_max() -> u32 {
    DEFAULT_RANGE_MAX
}

impl Default for Options {
    /// A 1 to 100 game
    fn default() -> Self {
        Self {
            range_max: DEFAULT_RANGE_MAX,
        }
    }
}

/// Errors that can occur when loading options
#[derive(Error, Debug)]
pub enum Error {
    /// The options were not valid JSON
    #[error("malformed options: {0}")]
    Parse(#[from] serde_json::Error),
    /// The options parsed but broke a limit
    #[error("invalid options: {0}")]
    Invalid(#[from] garde::Report),
}

impl Options {
    /// Creates options for a game over `1..=range_max`
    ///
    /// # Errors
    ///
    /// Returns [`Error::Invalid`] if `range_max` is below 2.
    pub fn new(range_max: u32) -> Result<Self, Error> {
        let options = Self { range_max };
        options.validate()?;
        Ok(options)
    }

    /// Parses and validates options from JSON
    ///
    /// Missing fields take their default values.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Parse`] for malformed JSON and [`Error::Invalid`]
    /// when a value is outside its limits.
    pub fn from_json(json: &str) -> Result<Self, Error> {
        let options: Self = serde_json::from_str(json)?;
        options.validate()?;
        Ok(options)
    }

    /// Upper bound of the guess range
    pub fn range_max(&self) -> u32 {
        self.range_max
    }
}
