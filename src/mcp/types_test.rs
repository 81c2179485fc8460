// ABOUTME: Tests for MCP types - serialization, deserialization.
// ABOUTME: Verifies JSON format matches MCP protocol.

use super::*;

#[test]
fn test_request_deserialization() {
    let json = r#"{
        "jsonrpc": "2.0",
        "id": 7,
        "method": "tools/call",
        "params": {"name": "internet_search", "arguments": {"query": "rust"}}
    }"#;

    let req: McpRequest = serde_json::from_str(json).unwrap();
    assert_eq!(req.id, Some(serde_json::json!(7)));
    assert_eq!(req.method, "tools/call");
    assert!(!req.is_notification());

    let params: McpToolCallParams = serde_json::from_value(req.params.unwrap()).unwrap();
    assert_eq!(params.name, "internet_search");
    assert_eq!(params.arguments.unwrap()["query"], "rust");
}

#[test]
fn test_string_ids_accepted() {
    let req: McpRequest =
        serde_json::from_str(r#"{"jsonrpc":"2.0","id":"abc-1","method":"ping"}"#).unwrap();
    assert_eq!(req.id, Some(serde_json::json!("abc-1")));
    assert!(req.params.is_none());
}

#[test]
fn test_notification_has_no_id() {
    let req: McpRequest = serde_json::from_str(
        r#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#,
    )
    .unwrap();
    assert!(req.is_notification());

    let json = serde_json::to_value(McpRequest::notification("notifications/cancelled", None))
        .unwrap();
    assert!(json.get("id").is_none());
}

#[test]
fn test_null_id_is_not_a_notification() {
    let req: McpRequest =
        serde_json::from_str(r#"{"jsonrpc":"2.0","id":null,"method":"ping"}"#).unwrap();
    assert_eq!(req.id, Some(serde_json::Value::Null));
    assert!(!req.is_notification());
}

#[test]
fn test_success_response_serialization() {
    let resp = McpResponse::success(serde_json::json!(1), serde_json::json!({"tools": []}));
    let json = serde_json::to_value(&resp).unwrap();

    assert_eq!(json["jsonrpc"], "2.0");
    assert_eq!(json["id"], 1);
    assert!(json["result"]["tools"].is_array());
    assert!(json.get("error").is_none());
}

#[test]
fn test_error_response_serialization() {
    let resp = McpResponse::failure(
        serde_json::Value::Null,
        McpRpcError::parse_error("expected value"),
    );
    let json = serde_json::to_value(&resp).unwrap();

    assert!(json["id"].is_null());
    assert_eq!(json["error"]["code"], -32700);
    assert_eq!(json["error"]["message"], "expected value");
    assert!(json["error"].get("data").is_none());
    assert!(json.get("result").is_none());
}

#[test]
fn test_error_codes() {
    assert_eq!(McpRpcError::method_not_found("x").code, -32601);
    assert_eq!(McpRpcError::method_not_found("x").message, "Method not found: x");
    assert_eq!(McpRpcError::invalid_params("p").code, -32602);
    assert_eq!(McpRpcError::invalid_request("r").code, -32600);
    assert_eq!(McpRpcError::internal("i").code, -32603);
}

#[test]
fn test_tool_info_serialization() {
    let info = McpToolInfo {
        name: "internet_search".to_string(),
        description: "Search".to_string(),
        input_schema: serde_json::json!({"type": "object"}),
    };

    let json = serde_json::to_value(&info).unwrap();
    assert_eq!(json["inputSchema"]["type"], "object");
    assert!(json.get("input_schema").is_none());
}

#[test]
fn test_initialize_params_deserialization() {
    let json = r#"{
        "protocolVersion": "2024-11-05",
        "capabilities": {},
        "clientInfo": {"name": "inspector", "version": "0.3.0"}
    }"#;

    let params: McpInitializeParams = serde_json::from_str(json).unwrap();
    assert_eq!(params.protocol_version, "2024-11-05");
    assert_eq!(params.client_info.unwrap().name, "inspector");
}

#[test]
fn test_initialize_result_serialization() {
    let result = McpInitializeResult {
        protocol_version: PROTOCOL_VERSION.to_string(),
        capabilities: McpServerCapabilities {
            tools: Some(serde_json::json!({})),
        },
        server_info: McpImplementation {
            name: "spooler".to_string(),
            version: "0.1.0".to_string(),
        },
    };

    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(json["protocolVersion"], "2024-11-05");
    assert_eq!(json["capabilities"]["tools"], serde_json::json!({}));
    assert_eq!(json["serverInfo"]["name"], "spooler");
}
