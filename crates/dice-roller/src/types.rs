//! Core data types for dice expressions and roll outcomes.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A dice expression: `count` dice with `sides` faces each.
///
/// Values built with [`DiceExpression::new`] are not range checked;
/// the roller rejects counts below 1 and dice with fewer than 2 sides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DiceExpression {
    pub count: u32,
    pub sides: u32,
}

impl DiceExpression {
    pub fn new(count: u32, sides: u32) -> Self {
        Self { count, sides }
    }
}

impl fmt::Display for DiceExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}d{}", self.count, self.sides)
    }
}

/// The result of rolling a [`DiceExpression`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollOutcome {
    /// One entry per die, each in `1..=sides`.
    pub rolls: Vec<u32>,
    pub sum: u64,
    /// Canonical `{count}d{sides}` form of the rolled expression.
    pub notation: String,
    /// ISO-8601 wall-clock time at which the roll completed.
    pub timestamp: String,
}

/// Errors that can occur while parsing or rolling dice.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum DiceError {
    #[error("Invalid dice notation: {0}")]
    InvalidNotation(String),

    #[error("Number of dice must be positive, got {0}")]
    InvalidCount(u32),

    #[error("Number of sides must be at least 2, got {0}")]
    InvalidSides(u32),
}

/// Convenience result type.
pub type DiceResult<T> = Result<T, DiceError>;
