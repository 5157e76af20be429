//! reqwest-based workspace client.

use std::time::Duration;

use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;

use crate::serde_api::{
    ClusterListResponse, DbfsListResponse, StatementApiRequest, StatementApiResponse,
    WarehouseListResponse, extract_error_message,
};
use crate::{
    BackendError, BackendFuture, ClusterInfo, DbfsEntry, StatementRequest, StatementResult,
    WarehouseInfo, WorkspaceClient, WorkspaceCredentials,
};

pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone)]
pub struct DatabricksHttpClient {
    client: Client,
    credentials: WorkspaceCredentials,
}

impl DatabricksHttpClient {
    pub fn new(client: Client, credentials: WorkspaceCredentials) -> Self {
        Self {
            client,
            credentials,
        }
    }

    /// Builds a client whose requests give up after `timeout`.
    pub fn with_timeout(
        credentials: WorkspaceCredentials,
        timeout: Duration,
    ) -> Result<Self, BackendError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| BackendError::other(format!("failed to build HTTP client: {err}")))?;
        Ok(Self::new(client, credentials))
    }

    pub fn credentials(&self) -> &WorkspaceCredentials {
        &self.credentials
    }

    fn endpoint(&self, path: &str) -> Result<String, BackendError> {
        let host = self.credentials.host.as_deref().ok_or_else(|| {
            BackendError::not_configured(format!(
                "{} is not set; the workspace backend is not configured",
                crate::HOST_VAR
            ))
        })?;
        Ok(join_url(host, path))
    }

    fn authorize(&self, builder: RequestBuilder) -> Result<RequestBuilder, BackendError> {
        let token = self.credentials.token.as_ref().ok_or_else(|| {
            BackendError::not_configured(format!(
                "{} is not set; cannot authenticate with the workspace",
                crate::TOKEN_VAR
            ))
        })?;
        Ok(builder.bearer_auth(token.expose()))
    }

    async fn send<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T, BackendError> {
        let response = self
            .authorize(builder)?
            .send()
            .await
            .map_err(map_send_error)?;

        if !response.status().is_success() {
            return Err(parse_error(response).await);
        }

        response
            .json()
            .await
            .map_err(|err| BackendError::transport(format!("invalid response body: {err}")))
    }

    async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T, BackendError> {
        let url = self.endpoint(path)?;
        tracing::debug!(url = %url, "workspace GET");
        self.send(self.client.get(url).query(query)).await
    }
}

impl WorkspaceClient for DatabricksHttpClient {
    fn list_clusters<'a>(&'a self) -> BackendFuture<'a, Result<Vec<ClusterInfo>, BackendError>> {
        Box::pin(async move {
            let response: ClusterListResponse = self.get("api/2.0/clusters/list", &[]).await?;
            Ok(response.clusters)
        })
    }

    fn list_warehouses<'a>(
        &'a self,
    ) -> BackendFuture<'a, Result<Vec<WarehouseInfo>, BackendError>> {
        Box::pin(async move {
            let response: WarehouseListResponse = self.get("api/2.0/sql/warehouses", &[]).await?;
            Ok(response.warehouses)
        })
    }

    fn execute_statement<'a>(
        &'a self,
        request: StatementRequest,
    ) -> BackendFuture<'a, Result<StatementResult, BackendError>> {
        Box::pin(async move {
            let url = self.endpoint("api/2.0/sql/statements")?;
            let body = StatementApiRequest {
                warehouse_id: &request.warehouse_id,
                statement: &request.statement,
                wait_timeout: &request.wait_timeout,
            };
            tracing::debug!(
                url = %url,
                warehouse_id = %request.warehouse_id,
                "submitting SQL statement"
            );
            let response: StatementApiResponse =
                self.send(self.client.post(url).json(&body)).await?;
            response.into_result()
        })
    }

    fn list_dbfs<'a>(
        &'a self,
        path: &'a str,
    ) -> BackendFuture<'a, Result<Vec<DbfsEntry>, BackendError>> {
        Box::pin(async move {
            let response: DbfsListResponse =
                self.get("api/2.0/dbfs/list", &[("path", path)]).await?;
            Ok(response.files)
        })
    }
}

fn join_url(host: &str, path: &str) -> String {
    let host = host.trim_end_matches('/');
    if host.starts_with("http://") || host.starts_with("https://") {
        format!("{host}/{path}")
    } else {
        format!("https://{host}/{path}")
    }
}

fn map_send_error(err: reqwest::Error) -> BackendError {
    if err.is_timeout() {
        BackendError::timeout(err.to_string())
    } else {
        BackendError::transport(err.to_string())
    }
}

async fn parse_error(response: Response) -> BackendError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    error_for_status(status, &body)
}

fn error_for_status(status: StatusCode, body: &str) -> BackendError {
    let message = extract_error_message(body)
        .unwrap_or_else(|| format!("workspace request failed with status {status}"));

    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => BackendError::authentication(message),
        StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => BackendError::timeout(message),
        StatusCode::BAD_REQUEST | StatusCode::NOT_FOUND | StatusCode::UNPROCESSABLE_ENTITY => {
            BackendError::invalid_request(message)
        }
        StatusCode::TOO_MANY_REQUESTS
        | StatusCode::SERVICE_UNAVAILABLE
        | StatusCode::BAD_GATEWAY => BackendError::unavailable(message),
        _ => BackendError::transport(message),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{BackendErrorKind, SecretString};

    #[test]
    fn urls_gain_a_scheme_when_the_host_has_none() {
        assert_eq!(
            join_url("adb-1.azuredatabricks.net/", "api/2.0/clusters/list"),
            "https://adb-1.azuredatabricks.net/api/2.0/clusters/list"
        );
        assert_eq!(
            join_url("http://localhost:8080", "api/2.0/dbfs/list"),
            "http://localhost:8080/api/2.0/dbfs/list"
        );
    }

    #[test]
    fn status_codes_map_to_backend_error_kinds() {
        let cases = [
            (StatusCode::UNAUTHORIZED, BackendErrorKind::Authentication),
            (StatusCode::FORBIDDEN, BackendErrorKind::Authentication),
            (StatusCode::GATEWAY_TIMEOUT, BackendErrorKind::Timeout),
            (StatusCode::NOT_FOUND, BackendErrorKind::InvalidRequest),
            (StatusCode::TOO_MANY_REQUESTS, BackendErrorKind::Unavailable),
            (StatusCode::INTERNAL_SERVER_ERROR, BackendErrorKind::Transport),
        ];

        for (status, kind) in cases {
            assert_eq!(error_for_status(status, "").kind, kind, "status {status}");
        }
    }

    #[test]
    fn error_body_message_is_preferred() {
        let error = error_for_status(
            StatusCode::BAD_REQUEST,
            r#"{"error_code":"INVALID_PARAMETER_VALUE","message":"Path must be absolute"}"#,
        );
        assert_eq!(error.message, "Path must be absolute");

        let fallback = error_for_status(StatusCode::BAD_GATEWAY, "upstream gone");
        assert!(fallback.message.contains("502"));
    }

    #[tokio::test]
    async fn missing_host_or_token_fails_before_any_request() {
        let unconfigured = DatabricksHttpClient::new(Client::new(), WorkspaceCredentials::default());
        let error = unconfigured
            .list_clusters()
            .await
            .expect_err("missing host should fail");
        assert_eq!(error.kind, BackendErrorKind::NotConfigured);
        assert!(error.message.contains(crate::HOST_VAR));

        let no_token = DatabricksHttpClient::new(
            Client::new(),
            WorkspaceCredentials {
                host: Some("https://example.invalid".to_string()),
                token: None,
                warehouse_id: None,
            },
        );
        let error = no_token
            .list_dbfs("/")
            .await
            .expect_err("missing token should fail");
        assert_eq!(error.kind, BackendErrorKind::NotConfigured);
        assert!(error.message.contains(crate::TOKEN_VAR));
    }

    #[test]
    fn credentials_are_kept_on_the_client() {
        let client = DatabricksHttpClient::with_timeout(
            WorkspaceCredentials {
                host: Some("h".to_string()),
                token: Some(SecretString::new("t")),
                warehouse_id: Some("w".to_string()),
            },
            Duration::from_secs(5),
        )
        .expect("client should build");
        assert_eq!(client.credentials().warehouse_id.as_deref(), Some("w"));
    }
}
