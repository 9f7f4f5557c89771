//! Tool registration and dispatch.

use serde_json::Value;

use crate::context::DiceContext;
use crate::types::{McpError, McpResult, ToolCallResult, ToolDefinition};

use super::roll_dice;

pub struct ToolRegistry;

impl ToolRegistry {
    pub fn list_tools() -> Vec<ToolDefinition> {
        vec![roll_dice::definition()]
    }

    pub fn call(
        name: &str,
        arguments: Option<Value>,
        ctx: &DiceContext,
    ) -> McpResult<ToolCallResult> {
        match name {
            roll_dice::NAME => roll_dice::execute(arguments, ctx),
            _ => {
                tracing::warn!("Rejected call to unknown tool {name}");
                Err(McpError::UnknownTool(name.to_string()))
            }
        }
    }
}
