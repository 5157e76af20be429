//! REST payload models and conversion helpers.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{BackendError, ClusterInfo, DbfsEntry, StatementResult, WarehouseInfo};

pub(crate) fn extract_error_message(body: &str) -> Option<String> {
    let parsed = serde_json::from_str::<ApiErrorBody>(body).ok()?;
    parsed.message.filter(|message| !message.is_empty())
}

#[derive(Debug, Deserialize)]
pub(crate) struct ApiErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct ClusterListResponse {
    #[serde(default)]
    pub clusters: Vec<ClusterInfo>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct WarehouseListResponse {
    #[serde(default)]
    pub warehouses: Vec<WarehouseInfo>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct DbfsListResponse {
    #[serde(default)]
    pub files: Vec<DbfsEntry>,
}

#[derive(Debug, Serialize)]
pub(crate) struct StatementApiRequest<'a> {
    pub warehouse_id: &'a str,
    pub statement: &'a str,
    pub wait_timeout: &'a str,
}

#[derive(Debug, Deserialize)]
pub(crate) struct StatementApiResponse {
    #[serde(default)]
    pub statement_id: Option<String>,
    #[serde(default)]
    pub status: Option<StatementStatus>,
    #[serde(default)]
    pub manifest: Option<StatementManifest>,
    #[serde(default)]
    pub result: Option<StatementData>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct StatementStatus {
    pub state: String,
    #[serde(default)]
    pub error: Option<ApiErrorBody>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct StatementManifest {
    #[serde(default)]
    pub schema: Option<StatementSchema>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct StatementSchema {
    #[serde(default)]
    pub columns: Vec<StatementColumn>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct StatementColumn {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct StatementData {
    #[serde(default)]
    pub data_array: Option<Vec<Vec<Value>>>,
}

impl StatementApiResponse {
    pub(crate) fn into_result(self) -> Result<StatementResult, BackendError> {
        let statement = self.statement_id.as_deref().unwrap_or("<unknown>");
        if let Some(status) = &self.status {
            match status.state.as_str() {
                "SUCCEEDED" => {}
                "PENDING" | "RUNNING" => {
                    return Err(BackendError::timeout(format!(
                        "statement {statement} is still {} after the wait timeout",
                        status.state
                    )));
                }
                state => {
                    let detail = status
                        .error
                        .as_ref()
                        .and_then(|error| error.message.clone())
                        .unwrap_or_else(|| format!("statement {statement} ended in state {state}"));
                    return Err(BackendError::invalid_request(detail));
                }
            }
        }

        let columns = self
            .manifest
            .and_then(|manifest| manifest.schema)
            .map(|schema| schema.columns.into_iter().map(|column| column.name).collect())
            .unwrap_or_default();
        let rows = self
            .result
            .and_then(|data| data.data_array)
            .unwrap_or_default();

        Ok(StatementResult { columns, rows })
    }
}
