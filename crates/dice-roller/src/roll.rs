//! Dice rolling with a pluggable face source.

use chrono::{Local, SecondsFormat};
use rand::Rng;

use crate::types::{DiceError, DiceExpression, DiceResult, RollOutcome};

/// Interface for throwing a single die.
pub trait Source {
    /// Return a face in `1..=sides`. `sides` is always at least 2.
    fn throw(&mut self, sides: u32) -> u32;
}

/// Default face source backed by any [`rand::Rng`].
pub struct RandomSource<'a, R: Rng> {
    pub generator: &'a mut R,
}

impl<R: Rng> Source for RandomSource<'_, R> {
    fn throw(&mut self, sides: u32) -> u32 {
        self.generator.gen_range(1..=sides)
    }
}

/// Roll using the thread-local generator.
pub fn roll(expr: &DiceExpression) -> DiceResult<RollOutcome> {
    roll_with(expr, &mut rand::thread_rng())
}

/// Roll using the provided generator.
pub fn roll_with<R: Rng>(expr: &DiceExpression, generator: &mut R) -> DiceResult<RollOutcome> {
    roll_with_source(expr, &mut RandomSource { generator })
}

/// Roll using the provided face source.
pub fn roll_with_source<S: Source + ?Sized>(
    expr: &DiceExpression,
    source: &mut S,
) -> DiceResult<RollOutcome> {
    if expr.count < 1 {
        return Err(DiceError::InvalidCount(expr.count));
    }
    if expr.sides < 2 {
        return Err(DiceError::InvalidSides(expr.sides));
    }

    let rolls: Vec<u32> = (0..expr.count).map(|_| source.throw(expr.sides)).collect();
    let sum = rolls.iter().map(|&r| u64::from(r)).sum();

    tracing::debug!("Rolled {expr}: {rolls:?} = {sum}");

    Ok(RollOutcome {
        rolls,
        sum,
        notation: expr.to_string(),
        timestamp: Local::now().to_rfc3339_opts(SecondsFormat::Micros, false),
    })
}
