use std::sync::{Arc, Mutex};

use gtooling::{Dispatcher, Envelope, ToolRegistry};
use gworkspace::{
    BackendError, BackendFuture, ClusterInfo, DbfsEntry, StatementRequest, StatementResult,
    WarehouseInfo, WorkspaceClient, WorkspaceToolSettings, register_workspace_tools,
};
use serde_json::{Map, Value, json};

#[derive(Debug, Default)]
struct FakeWorkspace {
    clusters: Vec<ClusterInfo>,
    warehouses: Vec<WarehouseInfo>,
    statement: Option<Result<StatementResult, BackendError>>,
    files: Vec<DbfsEntry>,
    statements: Mutex<Vec<StatementRequest>>,
    listed_paths: Mutex<Vec<String>>,
}

impl WorkspaceClient for FakeWorkspace {
    fn list_clusters<'a>(&'a self) -> BackendFuture<'a, Result<Vec<ClusterInfo>, BackendError>> {
        Box::pin(async move { Ok(self.clusters.clone()) })
    }

    fn list_warehouses<'a>(
        &'a self,
    ) -> BackendFuture<'a, Result<Vec<WarehouseInfo>, BackendError>> {
        Box::pin(async move { Ok(self.warehouses.clone()) })
    }

    fn execute_statement<'a>(
        &'a self,
        request: StatementRequest,
    ) -> BackendFuture<'a, Result<StatementResult, BackendError>> {
        Box::pin(async move {
            self.statements
                .lock()
                .expect("statement log should lock")
                .push(request);
            self.statement
                .clone()
                .unwrap_or_else(|| Ok(StatementResult::default()))
        })
    }

    fn list_dbfs<'a>(
        &'a self,
        path: &'a str,
    ) -> BackendFuture<'a, Result<Vec<DbfsEntry>, BackendError>> {
        Box::pin(async move {
            self.listed_paths
                .lock()
                .expect("path log should lock")
                .push(path.to_string());
            Ok(self.files.clone())
        })
    }
}

fn settings(warehouse: Option<&str>) -> WorkspaceToolSettings {
    let mut settings = WorkspaceToolSettings::new("workshop-test");
    settings.databricks_configured = true;
    settings.default_warehouse_id = warehouse.map(str::to_string);
    settings
}

fn dispatcher(fake: Arc<FakeWorkspace>, settings: WorkspaceToolSettings) -> Dispatcher {
    let mut registry = ToolRegistry::new();
    register_workspace_tools(&mut registry, fake, settings).expect("tools should register");
    Dispatcher::new(registry)
}

fn args(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        other => panic!("arguments must be an object, got {other}"),
    }
}

fn payload(envelope: Envelope) -> Value {
    match envelope {
        Envelope::Success { payload } => payload,
        Envelope::Failure { message } => panic!("expected success, got failure: {message}"),
    }
}

fn cluster(id: &str, state: Option<&str>) -> ClusterInfo {
    ClusterInfo {
        cluster_id: id.to_string(),
        cluster_name: Some(format!("{id}-name")),
        state: state.map(str::to_string),
        spark_version: Some("15.4.x-scala2.12".to_string()),
        node_type_id: Some("i3.xlarge".to_string()),
    }
}

#[tokio::test]
async fn all_workspace_operations_are_registered() {
    let dispatcher = dispatcher(Arc::new(FakeWorkspace::default()), settings(None));
    let names: Vec<_> = dispatcher.schemas().into_iter().map(|s| s.name).collect();
    assert_eq!(
        names,
        vec![
            "execute_dbsql",
            "health",
            "list_clusters",
            "list_dbfs_files",
            "list_warehouses"
        ]
    );
}

#[tokio::test]
async fn health_reports_service_and_configuration() {
    let dispatcher = dispatcher(Arc::new(FakeWorkspace::default()), settings(None));
    let envelope = dispatcher.invoke("health", Map::new()).await;
    assert_eq!(
        payload(envelope),
        json!({"status": "healthy", "service": "workshop-test", "databricks_configured": true})
    );
}

#[tokio::test]
async fn clusters_are_filtered_by_state_with_running_default() {
    let fake = Arc::new(FakeWorkspace {
        clusters: vec![
            cluster("c1", Some("RUNNING")),
            cluster("c2", Some("TERMINATED")),
            cluster("c3", None),
        ],
        ..FakeWorkspace::default()
    });
    let dispatcher = dispatcher(fake, settings(None));

    let running = payload(dispatcher.invoke("list_clusters", Map::new()).await);
    assert_eq!(running["count"], json!(1));
    assert_eq!(running["clusters"][0]["id"], json!("c1"));
    assert_eq!(running["clusters"][0]["node_type"], json!("i3.xlarge"));
    assert_eq!(running["message"], json!("Found 1 cluster(s) with status RUNNING"));

    let terminated = payload(
        dispatcher
            .invoke("list_clusters", args(json!({"status": "TERMINATED"})))
            .await,
    );
    assert_eq!(terminated["clusters"][0]["id"], json!("c2"));
}

#[tokio::test]
async fn warehouses_fill_unknown_state_and_type() {
    let fake = Arc::new(FakeWorkspace {
        warehouses: vec![WarehouseInfo {
            id: "w1".to_string(),
            name: Some("Starter".to_string()),
            state: None,
            cluster_size: Some("Small".to_string()),
            warehouse_type: None,
        }],
        ..FakeWorkspace::default()
    });
    let dispatcher = dispatcher(fake, settings(None));

    let listed = payload(dispatcher.invoke("list_warehouses", Map::new()).await);
    assert_eq!(
        listed["warehouses"],
        json!([{"id": "w1", "name": "Starter", "state": "UNKNOWN", "size": "Small", "type": "UNKNOWN"}])
    );
    assert_eq!(listed["message"], json!("Found 1 SQL warehouse(s)"));
}

#[tokio::test]
async fn sql_without_any_warehouse_fails_with_guidance() {
    let fake = Arc::new(FakeWorkspace::default());
    let dispatcher = dispatcher(Arc::clone(&fake), settings(None));

    let envelope = dispatcher
        .invoke("execute_dbsql", args(json!({"query": "SELECT 1"})))
        .await;

    assert_eq!(
        envelope.message(),
        Some("No SQL warehouse ID provided. Set DATABRICKS_SQL_WAREHOUSE_ID or pass warehouse_id.")
    );
    assert!(fake.statements.lock().expect("lock").is_empty());
}

#[tokio::test]
async fn sql_prefixes_catalog_and_schema_and_truncates_rows() {
    let fake = Arc::new(FakeWorkspace {
        statement: Some(Ok(StatementResult {
            columns: vec!["n".to_string()],
            rows: (0..5).map(|n| vec![json!(n.to_string())]).collect(),
        })),
        ..FakeWorkspace::default()
    });
    let dispatcher = dispatcher(Arc::clone(&fake), settings(Some("default-wh")));

    let result = payload(
        dispatcher
            .invoke(
                "execute_dbsql",
                args(json!({
                    "query": "SELECT n FROM t",
                    "catalog": "main",
                    "schema": "sales",
                    "limit": "3"
                })),
            )
            .await,
    );

    assert_eq!(result["row_count"], json!(3));
    assert_eq!(result["data"]["rows"][2], json!({"n": "2"}));

    let statements = fake.statements.lock().expect("lock");
    assert_eq!(statements[0].warehouse_id, "default-wh");
    assert_eq!(
        statements[0].statement,
        "USE CATALOG main; USE SCHEMA sales; SELECT n FROM t"
    );
    assert_eq!(statements[0].wait_timeout, "30s");
}

#[tokio::test]
async fn sql_with_only_catalog_runs_query_unchanged() {
    let fake = Arc::new(FakeWorkspace::default());
    let dispatcher = dispatcher(Arc::clone(&fake), settings(None));

    let result = payload(
        dispatcher
            .invoke(
                "execute_dbsql",
                args(json!({"query": "SELECT 1", "warehouse_id": "wh-arg", "catalog": "main"})),
            )
            .await,
    );

    assert_eq!(result["row_count"], json!(0));
    let statements = fake.statements.lock().expect("lock");
    assert_eq!(statements[0].statement, "SELECT 1");
    assert_eq!(statements[0].warehouse_id, "wh-arg");
}

#[tokio::test]
async fn backend_failures_become_failure_envelopes() {
    let fake = Arc::new(FakeWorkspace {
        statement: Some(Err(BackendError::invalid_request(
            "TABLE_OR_VIEW_NOT_FOUND: nope",
        ))),
        ..FakeWorkspace::default()
    });
    let dispatcher = dispatcher(fake, settings(Some("wh")));

    let envelope = dispatcher
        .invoke("execute_dbsql", args(json!({"query": "SELECT * FROM nope"})))
        .await;
    assert_eq!(envelope.message(), Some("TABLE_OR_VIEW_NOT_FOUND: nope"));

    let negative = dispatcher
        .invoke("execute_dbsql", args(json!({"query": "SELECT 1", "limit": -1})))
        .await;
    assert!(!negative.is_success());
}

#[tokio::test]
async fn dbfs_listing_hides_directory_sizes() {
    let fake = Arc::new(FakeWorkspace {
        files: vec![
            DbfsEntry {
                path: "/data".to_string(),
                is_dir: true,
                file_size: Some(0),
                modification_time: Some(1_700_000_000_000),
            },
            DbfsEntry {
                path: "/readme.txt".to_string(),
                is_dir: false,
                file_size: Some(42),
                modification_time: None,
            },
        ],
        ..FakeWorkspace::default()
    });
    let dispatcher = dispatcher(Arc::clone(&fake), settings(None));

    let listed = payload(dispatcher.invoke("list_dbfs_files", Map::new()).await);
    assert_eq!(listed["path"], json!("/"));
    assert_eq!(listed["count"], json!(2));
    assert_eq!(listed["files"][0]["size"], Value::Null);
    assert_eq!(listed["files"][1]["size"], json!(42));
    assert_eq!(listed["message"], json!("Listed 2 item(s) in /"));
    assert_eq!(*fake.listed_paths.lock().expect("lock"), vec!["/".to_string()]);
}
