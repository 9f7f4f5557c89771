//! Configuration loading and resolution.

/// Notation served by the static resource when nothing else is configured.
pub const DEFAULT_ROLL: &str = "2d6";

/// Upper bound on dice per roll when nothing else is configured.
pub const DEFAULT_MAX_DICE: u32 = 10_000;

/// Server settings, resolved once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub default_roll: String,
    pub max_dice: u32,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            default_roll: DEFAULT_ROLL.to_string(),
            max_dice: DEFAULT_MAX_DICE,
        }
    }
}

impl ServerConfig {
    /// Resolve settings: explicit value > environment > default.
    pub fn resolve(default_roll: Option<&str>, max_dice: Option<u32>) -> Self {
        Self {
            default_roll: resolve_default_roll(default_roll),
            max_dice: resolve_max_dice(max_dice),
        }
    }
}

/// Resolve the notation used for the `dice://` resource listing.
pub fn resolve_default_roll(explicit: Option<&str>) -> String {
    if let Some(notation) = explicit {
        return notation.to_string();
    }

    if let Ok(env_roll) = std::env::var("DICE_DEFAULT_ROLL") {
        return env_roll;
    }

    DEFAULT_ROLL.to_string()
}

/// Resolve the per-roll dice limit.
pub fn resolve_max_dice(explicit: Option<u32>) -> u32 {
    if let Some(max) = explicit {
        return max;
    }

    match std::env::var("DICE_MAX_DICE") {
        Ok(raw) => raw.parse().unwrap_or_else(|_| {
            tracing::warn!("Ignoring invalid DICE_MAX_DICE value: {raw}");
            DEFAULT_MAX_DICE
        }),
        Err(_) => DEFAULT_MAX_DICE,
    }
}
