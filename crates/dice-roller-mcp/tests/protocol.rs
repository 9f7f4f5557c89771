//! End-to-end tests for the dice-roller MCP server.
//!
//! Every test drives `ProtocolHandler::handle_message` with raw JSON-RPC,
//! the same way the stdio transport does.

use std::sync::Arc;

use serde_json::{json, Value};

use dice_roller_mcp::config::ServerConfig;
use dice_roller_mcp::context::DiceContext;
use dice_roller_mcp::protocol::ProtocolHandler;
use dice_roller_mcp::transport::{framing, StdioTransport};
use dice_roller_mcp::types::*;

// ─────────────────────── helpers ───────────────────────

fn handler() -> ProtocolHandler {
    ProtocolHandler::new(Arc::new(DiceContext::default()))
}

fn mcp_request(id: i64, method: &str, params: Value) -> Value {
    json!({
        "jsonrpc": "2.0",
        "id": id,
        "method": method,
        "params": params
    })
}

fn init_request() -> Value {
    mcp_request(
        0,
        "initialize",
        json!({
            "protocolVersion": "2024-11-05",
            "capabilities": {},
            "clientInfo": { "name": "test-client", "version": "1.0" }
        }),
    )
}

async fn send(handler: &ProtocolHandler, msg: Value) -> Option<Value> {
    let parsed: JsonRpcMessage = serde_json::from_value(msg).unwrap();
    handler.handle_message(parsed).await
}

async fn send_unwrap(handler: &ProtocolHandler, msg: Value) -> Value {
    send(handler, msg).await.expect("expected response")
}

async fn call_tool(handler: &ProtocolHandler, name: &str, arguments: Value) -> Value {
    let msg = mcp_request(
        1,
        "tools/call",
        json!({ "name": name, "arguments": arguments }),
    );
    send_unwrap(handler, msg).await
}

async fn read_resource(handler: &ProtocolHandler, uri: &str) -> Value {
    let msg = mcp_request(2, "resources/read", json!({ "uri": uri }));
    send_unwrap(handler, msg).await
}

/// Check the rolls/sum/notation/timestamp invariants on a parsed outcome.
fn assert_outcome(outcome: &Value, count: usize, sides: u64) {
    let rolls = outcome["rolls"].as_array().expect("rolls array");
    assert_eq!(rolls.len(), count);
    let total: u64 = rolls
        .iter()
        .map(|r| {
            let r = r.as_u64().unwrap();
            assert!((1..=sides).contains(&r), "roll {r} out of range");
            r
        })
        .sum();
    assert_eq!(outcome["sum"].as_u64().unwrap(), total);
    assert_eq!(outcome["notation"], format!("{count}d{sides}"));
    assert!(outcome["timestamp"].as_str().is_some_and(|t| !t.is_empty()));
}

// ═══════════════════════════════════════════════════════
// HANDSHAKE
// ═══════════════════════════════════════════════════════

#[tokio::test]
async fn test_initialize_handshake() {
    let handler = handler();
    let resp = send_unwrap(&handler, init_request()).await;

    let result = &resp["result"];
    assert_eq!(result["protocolVersion"], "2024-11-05");
    assert_eq!(result["serverInfo"]["name"], "dice-roller-mcp");
    assert!(result["capabilities"]["tools"].is_object());
    assert!(result["capabilities"]["resources"].is_object());

    assert!(!handler.is_initialized().await);
    let notif = json!({ "jsonrpc": "2.0", "method": "notifications/initialized" });
    assert!(send(&handler, notif).await.is_none());
    assert!(handler.is_initialized().await);
}

#[tokio::test]
async fn test_ping_and_unknown_method() {
    let handler = handler();
    let pong = send_unwrap(&handler, mcp_request(5, "ping", json!({}))).await;
    assert_eq!(pong["id"], 5);
    assert_eq!(pong["result"], json!({}));

    let resp = send_unwrap(&handler, mcp_request(6, "prompts/list", json!({}))).await;
    assert_eq!(resp["error"]["code"], -32601);
}

#[tokio::test]
async fn test_wrong_jsonrpc_version() {
    let handler = handler();
    let msg = json!({ "jsonrpc": "1.0", "id": 1, "method": "ping" });
    let resp = send_unwrap(&handler, msg).await;
    assert_eq!(resp["error"]["code"], -32600);
}

// ═══════════════════════════════════════════════════════
// RESOURCES
// ═══════════════════════════════════════════════════════

#[tokio::test]
async fn test_list_resources() {
    let handler = handler();
    let resp = send_unwrap(&handler, mcp_request(1, "resources/list", json!({}))).await;

    let resources = resp["result"]["resources"].as_array().unwrap();
    assert_eq!(resources.len(), 1);
    assert_eq!(resources[0]["uri"], "dice://2d6");
    assert_eq!(resources[0]["name"], "Random 2d6 roll");
    assert_eq!(resources[0]["mimeType"], "application/json");
}

#[tokio::test]
async fn test_list_resource_templates() {
    let handler = handler();
    let resp = send_unwrap(
        &handler,
        mcp_request(1, "resources/templates/list", json!({})),
    )
    .await;

    let templates = resp["result"]["resourceTemplates"].as_array().unwrap();
    assert_eq!(templates.len(), 1);
    assert_eq!(templates[0]["uriTemplate"], "dice://{notation}");
}

#[tokio::test]
async fn test_read_resource() {
    let handler = handler();
    let resp = read_resource(&handler, "dice://2d6").await;

    let contents = resp["result"]["contents"].as_array().unwrap();
    assert_eq!(contents.len(), 1);
    assert_eq!(contents[0]["uri"], "dice://2d6");
    assert_eq!(contents[0]["mimeType"], "application/json");

    let text = contents[0]["text"].as_str().unwrap();
    assert!(text.contains("\n  \"sum\": "), "expected 2-space indent: {text}");
    let outcome: Value = serde_json::from_str(text).unwrap();
    assert_outcome(&outcome, 2, 6);
}

#[tokio::test]
async fn test_read_resource_other_notation() {
    let handler = handler();
    let resp = read_resource(&handler, "dice://4d20").await;
    let text = resp["result"]["contents"][0]["text"].as_str().unwrap();
    let outcome: Value = serde_json::from_str(text).unwrap();
    assert_outcome(&outcome, 4, 20);
}

#[tokio::test]
async fn test_read_unknown_scheme() {
    let handler = handler();
    let resp = read_resource(&handler, "invalid://2d6").await;
    assert_eq!(resp["error"]["code"], -32802);
    assert_eq!(resp["error"]["message"], "Unknown resource: invalid://2d6");
}

#[tokio::test]
async fn test_read_bad_notation() {
    let handler = handler();
    let resp = read_resource(&handler, "dice://2d").await;
    assert_eq!(resp["error"]["code"], -32850);
    assert_eq!(
        resp["error"]["message"],
        "Dice rolling error: Invalid dice notation: 2d"
    );

    let resp = read_resource(&handler, "dice://2d1").await;
    assert_eq!(resp["error"]["code"], -32850);
}

#[tokio::test]
async fn test_read_missing_params() {
    let handler = handler();
    let msg = json!({ "jsonrpc": "2.0", "id": 9, "method": "resources/read" });
    let resp = send_unwrap(&handler, msg).await;
    assert_eq!(resp["error"]["code"], -32602);
}

// ═══════════════════════════════════════════════════════
// TOOLS
// ═══════════════════════════════════════════════════════

#[tokio::test]
async fn test_list_tools() {
    let handler = handler();
    let resp = send_unwrap(&handler, mcp_request(1, "tools/list", json!({}))).await;

    let tools = resp["result"]["tools"].as_array().unwrap();
    assert_eq!(tools.len(), 1);
    assert_eq!(tools[0]["name"], "roll_dice");

    let schema = &tools[0]["inputSchema"];
    assert_eq!(schema["type"], "object");
    assert_eq!(schema["required"], json!(["notation"]));
    assert_eq!(schema["properties"]["notation"]["type"], "string");
    assert_eq!(schema["properties"]["notation"]["pattern"], r"^\d+d\d+$");
}

#[tokio::test]
async fn test_call_roll_dice() {
    let handler = handler();
    let resp = call_tool(&handler, "roll_dice", json!({ "notation": "2d6" })).await;

    let content = resp["result"]["content"].as_array().unwrap();
    assert_eq!(content.len(), 1);
    assert_eq!(content[0]["type"], "text");
    assert!(resp["result"].get("isError").is_none());

    let outcome: Value = serde_json::from_str(content[0]["text"].as_str().unwrap()).unwrap();
    assert_outcome(&outcome, 2, 6);
}

#[tokio::test]
async fn test_call_unknown_tool() {
    let handler = handler();
    let resp = call_tool(&handler, "invalid_tool", json!({})).await;
    assert_eq!(resp["error"]["code"], -32803);
}

#[tokio::test]
async fn test_call_missing_notation() {
    let handler = handler();
    let resp = call_tool(&handler, "roll_dice", json!({})).await;
    assert_eq!(resp["error"]["code"], -32602);

    // no arguments at all
    let msg = mcp_request(3, "tools/call", json!({ "name": "roll_dice" }));
    let resp = send_unwrap(&handler, msg).await;
    assert_eq!(resp["error"]["code"], -32602);

    // arguments that are not a mapping
    let resp = call_tool(&handler, "roll_dice", json!("2d6")).await;
    assert_eq!(resp["error"]["code"], -32602);
}

#[tokio::test]
async fn test_call_invalid_notation() {
    let handler = handler();
    for notation in ["invalid", "d20", "2d", "", "0d6", "2d1"] {
        let resp = call_tool(&handler, "roll_dice", json!({ "notation": notation })).await;
        assert_eq!(
            resp["error"]["code"], -32850,
            "{notation:?} should be a roll error, got {resp}"
        );
        assert!(resp["error"]["message"]
            .as_str()
            .unwrap()
            .starts_with("Dice rolling error: "));
    }
}

#[tokio::test]
async fn test_max_dice_limit() {
    let config = ServerConfig {
        default_roll: "2d6".to_string(),
        max_dice: 3,
    };
    let handler = ProtocolHandler::new(Arc::new(DiceContext::new(config).unwrap()));

    let ok = call_tool(&handler, "roll_dice", json!({ "notation": "3d6" })).await;
    assert!(ok.get("result").is_some());

    let too_many = call_tool(&handler, "roll_dice", json!({ "notation": "4d6" })).await;
    assert_eq!(too_many["error"]["code"], -32850);
}

#[tokio::test]
async fn test_custom_default_roll_listed() {
    let config = ServerConfig {
        default_roll: "1d20".to_string(),
        max_dice: 100,
    };
    let handler = ProtocolHandler::new(Arc::new(DiceContext::new(config).unwrap()));
    let resp = send_unwrap(&handler, mcp_request(1, "resources/list", json!({}))).await;
    assert_eq!(resp["result"]["resources"][0]["uri"], "dice://1d20");
}

#[tokio::test]
async fn test_concurrent_rolls() {
    let handler = Arc::new(handler());
    let mut tasks = Vec::new();
    for i in 0..16 {
        let handler = handler.clone();
        tasks.push(tokio::spawn(async move {
            let count = i % 5 + 1;
            let notation = format!("{count}d8");
            let resp = call_tool(&handler, "roll_dice", json!({ "notation": notation })).await;
            let text = resp["result"]["content"][0]["text"].as_str().unwrap().to_string();
            (count as usize, serde_json::from_str::<Value>(&text).unwrap())
        }));
    }
    for task in tasks {
        let (count, outcome) = task.await.unwrap();
        assert_outcome(&outcome, count, 8);
    }
}

// ═══════════════════════════════════════════════════════
// TRANSPORT
// ═══════════════════════════════════════════════════════

#[tokio::test]
async fn test_malformed_json() {
    let result = framing::parse_message(r#"{"broken":"#);
    let err = result.unwrap_err();
    assert_eq!(err.code(), -32700);

    assert!(framing::parse_message("").is_err());
}

#[tokio::test]
async fn test_stdio_session() {
    let input = [
        init_request().to_string(),
        json!({ "jsonrpc": "2.0", "method": "notifications/initialized" }).to_string(),
        String::new(),
        "not json".to_string(),
        mcp_request(7, "tools/call", json!({ "name": "roll_dice", "arguments": { "notation": "1d20" } }))
            .to_string(),
    ]
    .join("\n");

    let transport = StdioTransport::new(handler());
    let mut output = Vec::new();
    transport
        .serve(input.as_bytes(), &mut output)
        .await
        .unwrap();

    let lines: Vec<Value> = String::from_utf8(output)
        .unwrap()
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();

    // initialize, parse error, tool call; the notification gets no reply
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0]["id"], 0);
    assert_eq!(lines[1]["id"], Value::Null);
    assert_eq!(lines[1]["error"]["code"], -32700);
    assert_eq!(lines[2]["id"], 7);

    let text = lines[2]["result"]["content"][0]["text"].as_str().unwrap();
    let outcome: Value = serde_json::from_str(text).unwrap();
    assert_outcome(&outcome, 1, 20);
}

#[tokio::test]
async fn test_stdio_survives_invalid_utf8() {
    let mut input = vec![0xff, 0xfe, b'\n'];
    input.extend_from_slice(mcp_request(7, "ping", json!({})).to_string().as_bytes());
    input.push(b'\n');

    let transport = StdioTransport::new(handler());
    let mut output = Vec::new();
    transport.serve(input.as_slice(), &mut output).await.unwrap();

    let lines: Vec<Value> = String::from_utf8(output)
        .unwrap()
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();

    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0]["id"], Value::Null);
    assert_eq!(lines[0]["error"]["code"], -32700);
    assert_eq!(lines[1]["id"], 7);
    assert_eq!(lines[1]["result"], json!({}));
}
