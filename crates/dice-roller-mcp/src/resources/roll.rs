//! Resource: dice://{notation}

use crate::context::DiceContext;
use crate::types::{McpResult, ReadResourceResult, ResourceContent};

pub fn read_roll(uri: &str, notation: &str, ctx: &DiceContext) -> McpResult<ReadResourceResult> {
    let outcome = ctx.roll_notation(notation)?;

    Ok(ReadResourceResult {
        contents: vec![ResourceContent {
            uri: uri.to_string(),
            mime_type: Some("application/json".to_string()),
            text: Some(serde_json::to_string_pretty(&outcome)?),
        }],
    })
}
