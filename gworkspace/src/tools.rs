//! Workspace operations exposed as gateway tools.

use std::sync::Arc;

use gtooling::{
    InvocationContext, ParameterKind, ParameterSpec, RegistryError, ToolArguments, ToolError,
    ToolRegistry, ToolSchema,
};
use serde_json::{Map, Value, json};

use crate::{StatementRequest, StatementResult, WorkspaceClient, WorkspaceCredentials};

pub const DEFAULT_CLUSTER_STATUS: &str = "RUNNING";
pub const DEFAULT_DBFS_PATH: &str = "/";
pub const DEFAULT_ROW_LIMIT: i64 = 100;
pub const DEFAULT_STATEMENT_WAIT: &str = "30s";
const UNKNOWN: &str = "UNKNOWN";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkspaceToolSettings {
    pub service_name: String,
    pub databricks_configured: bool,
    pub default_warehouse_id: Option<String>,
    pub statement_wait_timeout: String,
}

impl WorkspaceToolSettings {
    pub fn new(service_name: impl Into<String>) -> Self {
        Self {
            service_name: service_name.into(),
            databricks_configured: false,
            default_warehouse_id: None,
            statement_wait_timeout: DEFAULT_STATEMENT_WAIT.to_string(),
        }
    }

    pub fn from_credentials(
        service_name: impl Into<String>,
        credentials: &WorkspaceCredentials,
    ) -> Self {
        Self {
            databricks_configured: credentials.is_configured(),
            default_warehouse_id: credentials.warehouse_id.clone(),
            ..Self::new(service_name)
        }
    }

    pub fn with_statement_wait_timeout(mut self, wait: impl Into<String>) -> Self {
        self.statement_wait_timeout = wait.into();
        self
    }
}

/// Registers `health`, `list_clusters`, `list_warehouses`, `execute_dbsql`
/// and `list_dbfs_files`.
pub fn register_workspace_tools(
    registry: &mut ToolRegistry,
    client: Arc<dyn WorkspaceClient>,
    settings: WorkspaceToolSettings,
) -> Result<(), RegistryError> {
    let settings = Arc::new(settings);

    let health_settings = Arc::clone(&settings);
    registry.register_sync_fn(
        ToolSchema::new(
            "health",
            "Check the health of the server and the workspace connection.",
        ),
        move |_, _| Ok(health_payload(&health_settings)),
    )?;

    let clusters_client = Arc::clone(&client);
    registry.register_fn(
        ToolSchema::new("list_clusters", "List workspace clusters by state.").with_parameter(
            ParameterSpec::optional("status", ParameterKind::String, DEFAULT_CLUSTER_STATUS)
                .with_description("Cluster state to match (RUNNING, TERMINATED, ...)"),
        ),
        move |args, context| list_clusters(Arc::clone(&clusters_client), args, context),
    )?;

    let warehouses_client = Arc::clone(&client);
    registry.register_fn(
        ToolSchema::new("list_warehouses", "List all SQL warehouses in the workspace."),
        move |args, context| list_warehouses(Arc::clone(&warehouses_client), args, context),
    )?;

    let sql_client = Arc::clone(&client);
    let sql_settings = Arc::clone(&settings);
    registry.register_fn(
        ToolSchema::new("execute_dbsql", "Execute a SQL query on a SQL warehouse.")
            .with_parameter(
                ParameterSpec::required("query", ParameterKind::String)
                    .with_description("SQL query to execute"),
            )
            .with_parameter(
                ParameterSpec::nullable("warehouse_id", ParameterKind::String)
                    .with_description("SQL warehouse id; falls back to the configured default"),
            )
            .with_parameter(ParameterSpec::nullable("catalog", ParameterKind::String))
            .with_parameter(ParameterSpec::nullable("schema", ParameterKind::String))
            .with_parameter(
                ParameterSpec::optional("limit", ParameterKind::Integer, DEFAULT_ROW_LIMIT)
                    .with_description("Maximum number of rows to return"),
            ),
        move |args, context| {
            execute_dbsql(Arc::clone(&sql_client), Arc::clone(&sql_settings), args, context)
        },
    )?;

    let dbfs_client = client;
    registry.register_fn(
        ToolSchema::new("list_dbfs_files", "List files and directories in DBFS.").with_parameter(
            ParameterSpec::optional("path", ParameterKind::String, DEFAULT_DBFS_PATH)
                .with_description("DBFS path to list"),
        ),
        move |args, context| list_dbfs_files(Arc::clone(&dbfs_client), args, context),
    )?;

    Ok(())
}

fn health_payload(settings: &WorkspaceToolSettings) -> Value {
    json!({
        "status": "healthy",
        "service": settings.service_name,
        "databricks_configured": settings.databricks_configured,
    })
}

async fn list_clusters(
    client: Arc<dyn WorkspaceClient>,
    args: ToolArguments,
    _context: InvocationContext,
) -> Result<Value, ToolError> {
    let status = args.string("status")?;
    let clusters: Vec<Value> = client
        .list_clusters()
        .await?
        .into_iter()
        .filter(|cluster| cluster.state.as_deref() == Some(status))
        .map(|cluster| {
            json!({
                "id": cluster.cluster_id,
                "name": cluster.cluster_name,
                "state": cluster.state,
                "spark_version": cluster.spark_version,
                "node_type": cluster.node_type_id,
            })
        })
        .collect();

    let count = clusters.len();
    Ok(json!({
        "clusters": clusters,
        "count": count,
        "message": format!("Found {count} cluster(s) with status {status}"),
    }))
}

async fn list_warehouses(
    client: Arc<dyn WorkspaceClient>,
    _args: ToolArguments,
    _context: InvocationContext,
) -> Result<Value, ToolError> {
    let warehouses: Vec<Value> = client
        .list_warehouses()
        .await?
        .into_iter()
        .map(|warehouse| {
            json!({
                "id": warehouse.id,
                "name": warehouse.name,
                "state": warehouse.state.unwrap_or_else(|| UNKNOWN.to_string()),
                "size": warehouse.cluster_size,
                "type": warehouse.warehouse_type.unwrap_or_else(|| UNKNOWN.to_string()),
            })
        })
        .collect();

    let count = warehouses.len();
    Ok(json!({
        "warehouses": warehouses,
        "count": count,
        "message": format!("Found {count} SQL warehouse(s)"),
    }))
}

async fn execute_dbsql(
    client: Arc<dyn WorkspaceClient>,
    settings: Arc<WorkspaceToolSettings>,
    args: ToolArguments,
    context: InvocationContext,
) -> Result<Value, ToolError> {
    let query = args.string("query")?;
    let limit = args.integer("limit")?;
    if limit < 0 {
        return Err(ToolError::invalid_arguments(format!(
            "invalid argument limit: must not be negative, got {limit}"
        )));
    }

    let warehouse_id = non_blank(args.optional_string("warehouse_id")?)
        .or(settings.default_warehouse_id.as_deref())
        .ok_or_else(|| {
            ToolError::execution(
                "No SQL warehouse ID provided. Set DATABRICKS_SQL_WAREHOUSE_ID or pass warehouse_id.",
            )
        })?;

    let statement = match (
        non_blank(args.optional_string("catalog")?),
        non_blank(args.optional_string("schema")?),
    ) {
        (Some(catalog), Some(schema)) => {
            format!("USE CATALOG {catalog}; USE SCHEMA {schema}; {query}")
        }
        _ => query.to_string(),
    };

    tracing::debug!(
        call_id = ?context.call_id,
        warehouse_id,
        limit,
        "executing SQL statement"
    );

    let result = client
        .execute_statement(StatementRequest {
            warehouse_id: warehouse_id.to_string(),
            statement,
            wait_timeout: settings.statement_wait_timeout.clone(),
        })
        .await?;

    Ok(statement_payload(result, limit))
}

fn statement_payload(result: StatementResult, limit: i64) -> Value {
    if result.rows.is_empty() {
        return json!({
            "data": {"message": "Query executed successfully with no results"},
            "row_count": 0,
        });
    }

    let limit = usize::try_from(limit).unwrap_or(usize::MAX);
    let rows: Vec<Value> = result
        .rows
        .into_iter()
        .take(limit)
        .map(|row| {
            let mut object = Map::new();
            for (index, column) in result.columns.iter().enumerate() {
                object.insert(column.clone(), row.get(index).cloned().unwrap_or(Value::Null));
            }
            Value::Object(object)
        })
        .collect();

    let row_count = rows.len();
    json!({
        "data": {"columns": result.columns, "rows": rows},
        "row_count": row_count,
    })
}

async fn list_dbfs_files(
    client: Arc<dyn WorkspaceClient>,
    args: ToolArguments,
    _context: InvocationContext,
) -> Result<Value, ToolError> {
    let path = args.string("path")?;
    let files: Vec<Value> = client
        .list_dbfs(path)
        .await?
        .into_iter()
        .map(|entry| {
            let size = if entry.is_dir { None } else { entry.file_size };
            json!({
                "path": entry.path,
                "is_dir": entry.is_dir,
                "size": size,
                "modification_time": entry.modification_time,
            })
        })
        .collect();

    let count = files.len();
    Ok(json!({
        "path": path,
        "files": files,
        "count": count,
        "message": format!("Listed {count} item(s) in {path}"),
    }))
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|text| !text.trim().is_empty())
}
