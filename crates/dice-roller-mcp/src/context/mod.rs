//! Server context shared by the resource and tool adapters.

use dice_roller::{DiceExpression, RollOutcome};

use crate::config::ServerConfig;
use crate::types::{McpError, McpResult};

/// Immutable server state, built once at startup and shared behind an `Arc`.
#[derive(Debug, Clone)]
pub struct DiceContext {
    default_roll: DiceExpression,
    max_dice: u32,
}

impl DiceContext {
    /// Build the context, rejecting a default roll that could never succeed.
    pub fn new(config: ServerConfig) -> McpResult<Self> {
        let default_roll = dice_roller::parse(&config.default_roll)?;
        if default_roll.count < 1 || default_roll.sides < 2 || default_roll.count > config.max_dice
        {
            return Err(McpError::InvalidParams(format!(
                "Default roll {} is not a valid roll",
                config.default_roll
            )));
        }

        tracing::info!(
            "Dice context ready (default roll {default_roll}, max {} dice)",
            config.max_dice
        );

        Ok(Self {
            default_roll,
            max_dice: config.max_dice,
        })
    }

    /// Context with the built-in defaults.
    pub fn with_defaults() -> Self {
        let config = ServerConfig::default();
        let default_roll = dice_roller::parse(&config.default_roll)
            .unwrap_or_else(|_| DiceExpression::new(2, 6));
        Self {
            default_roll,
            max_dice: config.max_dice,
        }
    }

    pub fn default_roll(&self) -> DiceExpression {
        self.default_roll
    }

    pub fn max_dice(&self) -> u32 {
        self.max_dice
    }

    /// Parse `notation`, enforce the dice limit, and roll.
    ///
    /// Every failure comes back as [`McpError::RollError`] and is logged.
    pub fn roll_notation(&self, notation: &str) -> McpResult<RollOutcome> {
        self.try_roll(notation).inspect_err(|e| {
            tracing::error!("{e}");
        })
    }

    fn try_roll(&self, notation: &str) -> McpResult<RollOutcome> {
        let expr = dice_roller::parse(notation)?;
        if expr.count > self.max_dice {
            return Err(McpError::RollError(format!(
                "Too many dice: {} exceeds the limit of {}",
                expr.count, self.max_dice
            )));
        }
        Ok(dice_roller::roll(&expr)?)
    }
}

impl Default for DiceContext {
    fn default() -> Self {
        Self::with_defaults()
    }
}
