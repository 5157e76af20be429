//! Backend client trait and the records it returns.

use gcommon::BoxFuture;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::BackendError;

pub type BackendFuture<'a, T> = BoxFuture<'a, T>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClusterInfo {
    pub cluster_id: String,
    #[serde(default)]
    pub cluster_name: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub spark_version: Option<String>,
    #[serde(default)]
    pub node_type_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WarehouseInfo {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub cluster_size: Option<String>,
    #[serde(default)]
    pub warehouse_type: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatementRequest {
    pub warehouse_id: String,
    pub statement: String,
    pub wait_timeout: String,
}

/// Column names plus row cells in column order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StatementResult {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Value>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DbfsEntry {
    pub path: String,
    #[serde(default)]
    pub is_dir: bool,
    #[serde(default)]
    pub file_size: Option<i64>,
    #[serde(default)]
    pub modification_time: Option<i64>,
}

pub trait WorkspaceClient: Send + Sync + std::fmt::Debug {
    fn list_clusters<'a>(&'a self) -> BackendFuture<'a, Result<Vec<ClusterInfo>, BackendError>>;

    fn list_warehouses<'a>(
        &'a self,
    ) -> BackendFuture<'a, Result<Vec<WarehouseInfo>, BackendError>>;

    fn execute_statement<'a>(
        &'a self,
        request: StatementRequest,
    ) -> BackendFuture<'a, Result<StatementResult, BackendError>>;

    fn list_dbfs<'a>(
        &'a self,
        path: &'a str,
    ) -> BackendFuture<'a, Result<Vec<DbfsEntry>, BackendError>>;
}
