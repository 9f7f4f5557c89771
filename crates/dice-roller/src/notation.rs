//! Parser for standard `NdS` dice notation.

use std::str::FromStr;
use std::sync::OnceLock;

use regex::Regex;

use crate::types::{DiceError, DiceExpression, DiceResult};

/// Pattern accepted by [`parse`], anchored at both ends.
pub const NOTATION_PATTERN: &str = r"^\d+d\d+$";

/// Compiled notation regex.
///
/// Same shape as [`NOTATION_PATTERN`], restricted to ASCII digits.
fn notation_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^([0-9]+)d([0-9]+)$").expect("Invalid dice notation regex"))
}

/// Parse `NdS` text into a [`DiceExpression`].
///
/// Only the shape is checked here. A count of zero or a one-sided die parses
/// fine and is rejected later by the roller.
///
/// Text that matches `^\d+d\d+$` but whose count or sides do not fit in a
/// `u32` (for example `"99999999999d6"`) is still
/// [`DiceError::InvalidNotation`].
pub fn parse(text: &str) -> DiceResult<DiceExpression> {
    let invalid = || DiceError::InvalidNotation(text.to_string());

    let caps = notation_regex().captures(text).ok_or_else(invalid)?;
    let count: u32 = caps[1].parse().map_err(|_| invalid())?;
    let sides: u32 = caps[2].parse().map_err(|_| invalid())?;

    Ok(DiceExpression::new(count, sides))
}

impl FromStr for DiceExpression {
    type Err = DiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse(s)
    }
}
