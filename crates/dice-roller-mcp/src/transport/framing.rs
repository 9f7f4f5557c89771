//! Message framing for newline-delimited JSON.

use crate::types::{JsonRpcError, JsonRpcMessage, McpError, McpResult, RequestId};

/// Parse a single line of text as a JSON-RPC message.
pub fn parse_message(line: &str) -> McpResult<JsonRpcMessage> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Err(McpError::ParseError("Empty message".to_string()));
    }

    serde_json::from_str(trimmed).map_err(|e| McpError::ParseError(e.to_string()))
}

/// Serialize a value to a JSON line (with trailing newline).
pub fn frame_message(value: &serde_json::Value) -> McpResult<String> {
    let mut json = serde_json::to_string(value)?;
    json.push('\n');
    Ok(json)
}

/// Error reply for a line that could not be parsed; the id is unknown.
pub fn frame_parse_error(err: &McpError) -> McpResult<String> {
    let reply = JsonRpcError::new(RequestId::Null, err.code(), err.to_string());
    frame_message(&serde_json::to_value(reply)?)
}
