//! Minimal JSON-RPC 2.0 surface over the dispatcher and prompt catalog.

use gtooling::{Envelope, InvocationContext};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

use crate::Gateway;

pub const PROTOCOL_VERSION: &str = "2025-03-26";

pub const PARSE_ERROR: i32 = -32700;
pub const INVALID_REQUEST: i32 = -32600;
pub const METHOD_NOT_FOUND: i32 = -32601;
pub const INVALID_PARAMS: i32 = -32602;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcRequest {
    pub jsonrpc: String,
    #[serde(default)]
    pub id: Option<Value>,
    pub method: String,
    #[serde(default)]
    pub params: Value,
}

impl JsonRpcRequest {
    pub fn new(id: impl Into<Value>, method: impl Into<String>, params: Value) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id: Some(id.into()),
            method: method.into(),
            params,
        }
    }

    /// Requests without an id expect no response.
    pub fn is_notification(&self) -> bool {
        self.id.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonRpcResponse {
    pub jsonrpc: String,
    pub id: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonRpcError>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonRpcError {
    pub code: i32,
    pub message: String,
}

impl JsonRpcResponse {
    pub fn success(id: Option<Value>, result: Value) -> Self {
        Self {
            jsonrpc: "2.0".into(),
            id,
            result: Some(result),
            error: None,
        }
    }

    pub fn error(id: Option<Value>, code: i32, message: impl Into<String>) -> Self {
        Self {
            jsonrpc: "2.0".into(),
            id,
            result: None,
            error: Some(JsonRpcError {
                code,
                message: message.into(),
            }),
        }
    }
}

/// Decodes a request body. Malformed JSON is a parse error; well-formed JSON
/// that is not a request object is an invalid request.
pub fn parse_request(body: &[u8]) -> Result<JsonRpcRequest, JsonRpcResponse> {
    let value: Value = serde_json::from_slice(body)
        .map_err(|err| JsonRpcResponse::error(None, PARSE_ERROR, format!("parse error: {err}")))?;
    let id = value
        .get("id")
        .filter(|id| matches!(id, Value::String(_) | Value::Number(_)))
        .cloned();
    serde_json::from_value(value).map_err(|err| {
        JsonRpcResponse::error(id, INVALID_REQUEST, format!("invalid request: {err}"))
    })
}

pub async fn handle_request(gateway: &Gateway, request: JsonRpcRequest) -> JsonRpcResponse {
    let id = request.id.clone();
    if request.jsonrpc != "2.0" {
        return JsonRpcResponse::error(id, INVALID_REQUEST, "jsonrpc must be \"2.0\"");
    }

    let outcome = match request.method.as_str() {
        "initialize" => Ok(initialize_result(gateway)),
        "ping" => Ok(json!({})),
        "tools/list" => Ok(tools_list(gateway)),
        "tools/call" => tools_call(gateway, id.as_ref(), &request.params).await,
        "prompts/list" => Ok(prompts_list(gateway)),
        "prompts/get" => prompts_get(gateway, &request.params),
        method => Err((METHOD_NOT_FOUND, format!("method not found: {method}"))),
    };

    match outcome {
        Ok(result) => JsonRpcResponse::success(id, result),
        Err((code, message)) => JsonRpcResponse::error(id, code, message),
    }
}

type RpcResult = Result<Value, (i32, String)>;

fn initialize_result(gateway: &Gateway) -> Value {
    json!({
        "protocolVersion": PROTOCOL_VERSION,
        "capabilities": {"tools": {}, "prompts": {}},
        "serverInfo": {
            "name": gateway.servername(),
            "version": env!("CARGO_PKG_VERSION"),
        },
    })
}

fn tools_list(gateway: &Gateway) -> Value {
    let tools: Vec<Value> = gateway
        .dispatcher
        .schemas()
        .iter()
        .map(|schema| schema.to_json())
        .collect();
    json!({ "tools": tools })
}

async fn tools_call(gateway: &Gateway, id: Option<&Value>, params: &Value) -> RpcResult {
    let name = params
        .get("name")
        .and_then(Value::as_str)
        .ok_or_else(|| (INVALID_PARAMS, "tools/call requires a string 'name'".to_string()))?;
    let arguments = match params.get("arguments") {
        None | Some(Value::Null) => Map::new(),
        Some(Value::Object(arguments)) => arguments.clone(),
        Some(_) => {
            return Err((
                INVALID_PARAMS,
                "tools/call 'arguments' must be an object".to_string(),
            ));
        }
    };

    let mut context = InvocationContext::new().with_metadata("transport", "jsonrpc");
    if let Some(id) = id {
        context = context.with_call_id(rpc_id_string(id));
    }

    let envelope = gateway
        .dispatcher
        .invoke_with_context(name, arguments, context)
        .await;
    Ok(call_result(&envelope))
}

/// Maps an envelope onto a tool call result: the payload (or failure message)
/// as text content, with `isError` set on failure.
pub fn call_result(envelope: &Envelope) -> Value {
    match envelope {
        Envelope::Success { payload } => json!({
            "content": [{"type": "text", "text": payload.to_string()}],
            "structuredContent": payload,
            "isError": false,
        }),
        Envelope::Failure { message } => json!({
            "content": [{"type": "text", "text": message}],
            "isError": true,
        }),
    }
}

fn prompts_list(gateway: &Gateway) -> Value {
    let prompts: Vec<Value> = gateway
        .prompts
        .iter()
        .map(|prompt| json!({"name": prompt.name, "description": prompt.title}))
        .collect();
    json!({ "prompts": prompts })
}

fn prompts_get(gateway: &Gateway, params: &Value) -> RpcResult {
    let name = params
        .get("name")
        .and_then(Value::as_str)
        .ok_or_else(|| (INVALID_PARAMS, "prompts/get requires a string 'name'".to_string()))?;

    let prompt = gateway
        .prompts
        .get(name)
        .map_err(|error| (INVALID_PARAMS, error.message))?;

    Ok(json!({
        "description": prompt.title,
        "messages": [{
            "role": "user",
            "content": {"type": "text", "text": prompt.body},
        }],
    }))
}

fn rpc_id_string(id: &Value) -> String {
    match id {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}
