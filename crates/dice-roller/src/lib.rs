//! dice-roller — core dice library for NdS notation parsing and randomized rolls.

pub mod notation;
pub mod roll;
pub mod types;

pub use notation::parse;
pub use roll::{roll, roll_with, roll_with_source, RandomSource, Source};
pub use types::*;
