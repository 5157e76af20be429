use std::fs;
use std::sync::Arc;

use gantry::gworkspace::{
    BackendError, BackendFuture, ClusterInfo, DbfsEntry, StatementRequest, StatementResult,
    WarehouseInfo,
};
use gantry::rpc::{self, JsonRpcRequest};
use gantry::{
    Gateway, GatewayConfig, WorkspaceClient, WorkspaceToolSettings, bootstrap_with_settings,
    router,
};
use serde_json::{Value, json};
use tempfile::TempDir;

#[derive(Debug)]
struct StubWorkspace;

impl WorkspaceClient for StubWorkspace {
    fn list_clusters<'a>(&'a self) -> BackendFuture<'a, Result<Vec<ClusterInfo>, BackendError>> {
        Box::pin(async move {
            Ok(vec![ClusterInfo {
                cluster_id: "c1".to_string(),
                cluster_name: Some("shared".to_string()),
                state: Some("RUNNING".to_string()),
                spark_version: None,
                node_type_id: None,
            }])
        })
    }

    fn list_warehouses<'a>(
        &'a self,
    ) -> BackendFuture<'a, Result<Vec<WarehouseInfo>, BackendError>> {
        Box::pin(async move { Err(BackendError::authentication("Invalid access token")) })
    }

    fn execute_statement<'a>(
        &'a self,
        _request: StatementRequest,
    ) -> BackendFuture<'a, Result<StatementResult, BackendError>> {
        Box::pin(async move { Ok(StatementResult::default()) })
    }

    fn list_dbfs<'a>(
        &'a self,
        _path: &'a str,
    ) -> BackendFuture<'a, Result<Vec<DbfsEntry>, BackendError>> {
        Box::pin(async move { Ok(Vec::new()) })
    }
}

fn gateway(strict: bool) -> (Gateway, TempDir) {
    let prompts = tempfile::tempdir().expect("temp dir should be created");
    fs::write(
        prompts.path().join("explore.md"),
        "# Explore the lakehouse\n\nList clusters first.\n",
    )
    .expect("prompt should be written");
    fs::write(prompts.path().join("notes.md"), "no heading here\n").expect("prompt should be written");

    let mut config = GatewayConfig::default();
    config.servername = "test-gateway".to_string();
    config.prompts_dir = prompts.path().to_path_buf();
    config.strict_arguments = strict;

    let mut settings = WorkspaceToolSettings::new("test-gateway");
    settings.databricks_configured = true;

    let gateway = bootstrap_with_settings(config, Arc::new(StubWorkspace), settings)
        .expect("gateway should bootstrap");
    (gateway, prompts)
}

async fn spawn_server(gateway: Gateway) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("listener should bind");
    let addr = listener.local_addr().expect("listener address");
    tokio::spawn(async move {
        axum::serve(listener, router(gateway))
            .await
            .expect("server should run");
    });
    format!("http://{addr}")
}

#[tokio::test]
async fn bootstrap_registers_operations_and_prompts() {
    let (gateway, _dir) = gateway(true);
    assert_eq!(gateway.dispatcher.registry().len(), 5);
    assert_eq!(gateway.prompts.list(), vec!["explore", "notes"]);
    assert_eq!(
        gateway.prompts.get("explore").expect("explore loads").title,
        "Explore the lakehouse"
    );
}

#[tokio::test]
async fn http_routes_serve_tools_prompts_and_envelopes() {
    let (gateway, _dir) = gateway(true);
    let base = spawn_server(gateway).await;
    let client = reqwest::Client::new();

    let index: Value = client
        .get(format!("{base}/"))
        .send()
        .await
        .expect("index request")
        .json()
        .await
        .expect("index body");
    assert_eq!(
        index,
        json!({"message": "MCP Server is running", "server": "test-gateway"})
    );

    let tools: Value = client
        .get(format!("{base}/tools"))
        .send()
        .await
        .expect("tools request")
        .json()
        .await
        .expect("tools body");
    let sql = tools
        .as_array()
        .expect("tools array")
        .iter()
        .find(|tool| tool["name"] == "execute_dbsql")
        .expect("execute_dbsql listed");
    assert_eq!(sql["inputSchema"]["required"], json!(["query"]));
    assert_eq!(sql["inputSchema"]["properties"]["limit"]["type"], json!("integer"));

    let health = client
        .post(format!("{base}/tools/health"))
        .send()
        .await
        .expect("health request");
    assert_eq!(health.status(), reqwest::StatusCode::OK);
    let health: Value = health.json().await.expect("health body");
    assert_eq!(health["ok"], json!(true));
    assert_eq!(health["payload"]["service"], json!("test-gateway"));

    let malformed: Value = client
        .post(format!("{base}/tools/list_clusters"))
        .body("{not json")
        .send()
        .await
        .expect("malformed request")
        .json()
        .await
        .expect("malformed body");
    assert_eq!(malformed["ok"], json!(false));

    let unknown: Value = client
        .post(format!("{base}/tools/drop_everything"))
        .json(&json!({}))
        .send()
        .await
        .expect("unknown request")
        .json()
        .await
        .expect("unknown body");
    assert_eq!(
        unknown,
        json!({"ok": false, "message": "unknown operation: drop_everything"})
    );

    let prompts: Value = client
        .get(format!("{base}/prompts"))
        .send()
        .await
        .expect("prompts request")
        .json()
        .await
        .expect("prompts body");
    assert_eq!(
        prompts,
        json!([
            {"name": "explore", "title": "Explore the lakehouse"},
            {"name": "notes", "title": "Prompt: notes"}
        ])
    );

    let missing = client
        .get(format!("{base}/prompts/absent"))
        .send()
        .await
        .expect("missing prompt request");
    assert_eq!(missing.status(), reqwest::StatusCode::NOT_FOUND);

    let rpc: Value = client
        .post(format!("{base}/mcp"))
        .json(&json!({"jsonrpc": "2.0", "id": 1, "method": "tools/list"}))
        .send()
        .await
        .expect("rpc request")
        .json()
        .await
        .expect("rpc body");
    assert_eq!(rpc["result"]["tools"].as_array().map(Vec::len), Some(5));

    let no_method: Value = client
        .post(format!("{base}/mcp"))
        .json(&json!({"jsonrpc": "2.0", "id": 2}))
        .send()
        .await
        .expect("rpc request without method")
        .json()
        .await
        .expect("rpc error body");
    assert_eq!(no_method["id"], json!(2));
    assert_eq!(no_method["error"]["code"], json!(rpc::INVALID_REQUEST));

    let garbled: Value = client
        .post(format!("{base}/mcp"))
        .body("{\"jsonrpc\": ")
        .send()
        .await
        .expect("garbled rpc request")
        .json()
        .await
        .expect("rpc error body");
    assert_eq!(garbled["error"]["code"], json!(rpc::PARSE_ERROR));
}

#[tokio::test]
async fn strictness_controls_unknown_argument_keys() {
    let (strict, _strict_dir) = gateway(true);
    let rejected = rpc::handle_request(
        &strict,
        JsonRpcRequest::new(
            1,
            "tools/call",
            json!({"name": "health", "arguments": {"verbose": true}}),
        ),
    )
    .await;
    let result = rejected.result.expect("tool failures are results");
    assert_eq!(result["isError"], json!(true));
    assert_eq!(result["content"][0]["text"], json!("unexpected argument verbose"));

    let (lenient, _lenient_dir) = gateway(false);
    let accepted = rpc::handle_request(
        &lenient,
        JsonRpcRequest::new(
            2,
            "tools/call",
            json!({"name": "health", "arguments": {"verbose": true}}),
        ),
    )
    .await;
    assert_eq!(
        accepted.result.expect("health succeeds")["isError"],
        json!(false)
    );
}

#[tokio::test]
async fn jsonrpc_maps_backend_errors_and_prompts() {
    let (gateway, _dir) = gateway(true);

    let warehouses = rpc::handle_request(
        &gateway,
        JsonRpcRequest::new("w", "tools/call", json!({"name": "list_warehouses"})),
    )
    .await;
    assert_eq!(warehouses.id, Some(json!("w")));
    let result = warehouses.result.expect("result present");
    assert_eq!(result["isError"], json!(true));
    assert_eq!(result["content"][0]["text"], json!("Invalid access token"));

    let prompt = rpc::handle_request(
        &gateway,
        JsonRpcRequest::new(3, "prompts/get", json!({"name": "explore"})),
    )
    .await;
    let prompt = prompt.result.expect("prompt found");
    assert_eq!(prompt["description"], json!("Explore the lakehouse"));
    assert_eq!(
        prompt["messages"][0]["content"]["text"],
        json!("# Explore the lakehouse\n\nList clusters first.\n")
    );

    let missing = rpc::handle_request(
        &gateway,
        JsonRpcRequest::new(4, "prompts/get", json!({"name": "absent"})),
    )
    .await;
    assert_eq!(missing.error.map(|error| error.code), Some(rpc::INVALID_PARAMS));

    let unknown = rpc::handle_request(&gateway, JsonRpcRequest::new(5, "resources/list", json!({})))
        .await;
    assert_eq!(
        unknown.error.map(|error| error.code),
        Some(rpc::METHOD_NOT_FOUND)
    );

    let listed = rpc::handle_request(&gateway, JsonRpcRequest::new(6, "prompts/list", Value::Null))
        .await;
    assert_eq!(
        listed.result.expect("prompts listed")["prompts"][1],
        json!({"name": "notes", "description": "Prompt: notes"})
    );
}
