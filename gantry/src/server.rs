//! HTTP transport.
//!
//! Routes:
//! - `GET /` server banner
//! - `GET /tools` operation descriptors
//! - `POST /tools/{name}` invoke an operation; always answers with an envelope
//! - `GET /prompts`, `GET /prompts/{name}` prompt catalog
//! - `POST /mcp` JSON-RPC

use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use gtooling::{Envelope, InvocationContext};
use serde_json::{Map, Value, json};
use tokio::net::TcpListener;

use crate::rpc;
use crate::{Gateway, GatewayError};

const REQUEST_ID_HEADER: &str = "x-request-id";

pub fn router(gateway: Gateway) -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/tools", get(list_tools_handler))
        .route("/tools/{name}", post(invoke_handler))
        .route("/prompts", get(list_prompts_handler))
        .route("/prompts/{name}", get(get_prompt_handler))
        .route("/mcp", post(jsonrpc_handler))
        .with_state(gateway)
}

/// Serves on `listener` until ctrl-c.
pub async fn serve(gateway: Gateway, listener: TcpListener) -> Result<(), GatewayError> {
    let addr = listener
        .local_addr()
        .map_err(|err| GatewayError::io(format!("listener has no local address: {err}")))?;
    tracing::info!(%addr, servername = %gateway.servername(), "gateway listening");

    axum::serve(listener, router(gateway))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|err| GatewayError::io(format!("server error: {err}")))
}

pub async fn bind_and_serve(gateway: Gateway, bind: &str) -> Result<(), GatewayError> {
    let listener = TcpListener::bind(bind)
        .await
        .map_err(|err| GatewayError::io(format!("could not bind {bind}: {err}")))?;
    serve(gateway, listener).await
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %err, "could not listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown requested");
}

async fn index_handler(State(gateway): State<Gateway>) -> Json<Value> {
    Json(json!({
        "message": "MCP Server is running",
        "server": gateway.servername(),
    }))
}

async fn list_tools_handler(State(gateway): State<Gateway>) -> Json<Value> {
    let tools: Vec<Value> = gateway
        .dispatcher
        .schemas()
        .iter()
        .map(|schema| schema.to_json())
        .collect();
    Json(Value::Array(tools))
}

async fn invoke_handler(
    State(gateway): State<Gateway>,
    Path(name): Path<String>,
    headers: HeaderMap,
    body: Bytes,
) -> Json<Value> {
    let arguments = match parse_arguments(&body) {
        Ok(arguments) => arguments,
        Err(message) => {
            tracing::warn!(operation = %name, %message, "rejected request body");
            return Json(Envelope::failure(message).to_json());
        }
    };

    let mut context = InvocationContext::new().with_metadata("transport", "http");
    if let Some(request_id) = request_id(&headers) {
        context = context.with_call_id(request_id);
    }

    let envelope = gateway
        .dispatcher
        .invoke_with_context(&name, arguments, context)
        .await;
    Json(envelope.to_json())
}

fn parse_arguments(body: &[u8]) -> Result<Map<String, Value>, String> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Map::new());
    }
    match serde_json::from_slice::<Value>(body) {
        Ok(Value::Object(arguments)) => Ok(arguments),
        Ok(Value::Null) => Ok(Map::new()),
        Ok(_) => Err("request body must be a JSON object of arguments".to_string()),
        Err(err) => Err(format!("invalid JSON body: {err}")),
    }
}

fn request_id(headers: &HeaderMap) -> Option<String> {
    headers
        .get(REQUEST_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

async fn list_prompts_handler(State(gateway): State<Gateway>) -> Json<Value> {
    let prompts: Vec<Value> = gateway
        .prompts
        .iter()
        .map(|prompt| json!({"name": prompt.name, "title": prompt.title}))
        .collect();
    Json(Value::Array(prompts))
}

async fn get_prompt_handler(
    State(gateway): State<Gateway>,
    Path(name): Path<String>,
) -> Response {
    match gateway.prompts.get(&name) {
        Ok(prompt) => Json(prompt.as_ref()).into_response(),
        Err(error) => {
            (StatusCode::NOT_FOUND, Json(json!({"error": error.message}))).into_response()
        }
    }
}

async fn jsonrpc_handler(State(gateway): State<Gateway>, body: Bytes) -> Response {
    let request = match rpc::parse_request(&body) {
        Ok(request) => request,
        Err(response) => return Json(response).into_response(),
    };

    if request.is_notification() {
        tracing::debug!(method = %request.method, "ignoring JSON-RPC notification");
        return StatusCode::ACCEPTED.into_response();
    }

    Json(rpc::handle_request(&gateway, request).await).into_response()
}
