//! Tool: roll_dice — Roll dice using NdS notation.

use serde_json::{json, Value};

use dice_roller::notation::NOTATION_PATTERN;

use crate::context::DiceContext;
use crate::types::{McpError, McpResult, ToolCallResult, ToolDefinition};

pub const NAME: &str = "roll_dice";

pub fn definition() -> ToolDefinition {
    ToolDefinition {
        name: NAME.to_string(),
        description: Some("Roll dice using standard notation (e.g., '2d6')".to_string()),
        input_schema: json!({
            "type": "object",
            "properties": {
                "notation": {
                    "type": "string",
                    "description": "Dice notation (e.g., '2d6', '1d20')",
                    "pattern": NOTATION_PATTERN
                }
            },
            "required": ["notation"]
        }),
    }
}

pub fn execute(arguments: Option<Value>, ctx: &DiceContext) -> McpResult<ToolCallResult> {
    let args = match arguments {
        Some(Value::Object(map)) => map,
        Some(other) => {
            return Err(McpError::InvalidArguments(format!(
                "expected an object, got {other}"
            )))
        }
        None => return Err(McpError::InvalidArguments("arguments are required".to_string())),
    };

    let notation = args
        .get("notation")
        .ok_or_else(|| McpError::InvalidArguments("'notation' is required".to_string()))?;

    let outcome = match notation {
        Value::String(text) => ctx.roll_notation(text)?,
        other => {
            let err = McpError::from(dice_roller::DiceError::InvalidNotation(other.to_string()));
            tracing::error!("{err}");
            return Err(err);
        }
    };

    Ok(ToolCallResult::json(&outcome)?)
}
