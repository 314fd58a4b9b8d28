//! HTTP transport seam.
//!
//! Services describe each call as an [`ApiRequest`] relative to the backend
//! root and hand it to a [`Transport`]. [`ReqwestTransport`] is the real
//! implementation; tests substitute a recording one.

use async_trait::async_trait;
use configs::BackendConfig;
use reqwest::{Client, Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::errors::ClientError;

/// One outbound request, path relative to the backend host.
#[derive(Clone, Debug, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self { method, path: path.into(), query: Vec::new(), body: None }
    }

    pub fn get(path: impl Into<String>) -> Self { Self::new(Method::GET, path) }
    pub fn post(path: impl Into<String>) -> Self { Self::new(Method::POST, path) }
    pub fn put(path: impl Into<String>) -> Self { Self::new(Method::PUT, path) }
    pub fn delete(path: impl Into<String>) -> Self { Self::new(Method::DELETE, path) }

    pub fn query(mut self, key: &str, value: impl ToString) -> Self {
        self.query.push((key.to_string(), value.to_string()));
        self
    }

    pub fn json<B: Serialize + ?Sized>(mut self, body: &B) -> Result<Self, ClientError> {
        self.body = Some(serde_json::to_value(body).map_err(ClientError::Encode)?);
        Ok(self)
    }
}

/// Raw answer from the backend, before status handling.
#[derive(Clone, Debug)]
pub struct ApiResponse {
    pub status: StatusCode,
    pub body: String,
}

impl ApiResponse {
    pub fn new(status: StatusCode, body: impl Into<String>) -> Self {
        Self { status, body: body.into() }
    }

    pub fn ok_json(body: &Value) -> Self { Self::new(StatusCode::OK, body.to_string()) }

    pub fn error_for_status(self) -> Result<Self, ClientError> {
        if self.status.is_success() {
            Ok(self)
        } else {
            Err(ClientError::Status { status: self.status, body: self.body })
        }
    }

    pub fn decode<R: DeserializeOwned>(&self) -> Result<R, ClientError> {
        serde_json::from_str(&self.body).map_err(ClientError::Decode)
    }
}

#[async_trait]
pub trait Transport: Send + Sync {
    /// Issue exactly one request. Non-2xx answers are returned, not rejected.
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ClientError>;
}

/// Send and decode a JSON payload, failing on non-2xx.
pub(crate) async fn fetch<T, R>(transport: &T, request: ApiRequest) -> Result<R, ClientError>
where
    T: Transport + ?Sized,
    R: DeserializeOwned,
{
    transport.send(request).await?.error_for_status()?.decode()
}

/// Send and discard the payload, failing on non-2xx.
pub(crate) async fn execute<T>(transport: &T, request: ApiRequest) -> Result<(), ClientError>
where
    T: Transport + ?Sized,
{
    transport.send(request).await?.error_for_status()?;
    Ok(())
}

/// Transport backed by a shared `reqwest::Client`.
#[derive(Clone, Debug)]
pub struct ReqwestTransport {
    client: Client,
    base_url: String,
}

impl ReqwestTransport {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    /// Build a client honoring the configured timeouts; unset ones keep reqwest defaults.
    pub fn from_config(cfg: &BackendConfig) -> Result<Self, ClientError> {
        let mut builder = Client::builder();
        if let Some(t) = cfg.connect_timeout() { builder = builder.connect_timeout(t); }
        if let Some(t) = cfg.request_timeout() { builder = builder.timeout(t); }
        let client = builder.build()?;
        Ok(Self::with_client(client, cfg.host.as_str()))
    }

    pub fn base_url(&self) -> &str { &self.base_url }

    pub fn url_for(&self, path: &str) -> String { format!("{}{}", self.base_url, path) }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ClientError> {
        let url = self.url_for(&request.path);
        debug!(method = %request.method, %url, query = ?request.query, "sending backend request");

        let mut builder = self.client.request(request.method.clone(), url.as_str());
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let resp = builder.send().await?;
        let status = resp.status();
        let body = resp.text().await?;
        if !status.is_success() {
            warn!(method = %request.method, %url, %status, "backend rejected request");
        }
        Ok(ApiResponse { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn base_url_trailing_slash_is_dropped() {
        let t = ReqwestTransport::new("http://localhost:8080/");
        assert_eq!(t.base_url(), "http://localhost:8080");
        assert_eq!(t.url_for("/customers"), "http://localhost:8080/customers");
    }

    #[test]
    fn from_config_uses_configured_host() {
        let cfg = BackendConfig { host: "http://bank:9000".into(), connect_timeout_secs: Some(2), request_timeout_secs: None };
        let t = ReqwestTransport::from_config(&cfg).unwrap();
        assert_eq!(t.url_for("/accounts"), "http://bank:9000/accounts");
    }

    #[test]
    fn request_builder_collects_query_in_order() {
        let req = ApiRequest::get("/x").query("page", 0).query("size", 10);
        assert_eq!(req.query, vec![("page".to_string(), "0".to_string()), ("size".to_string(), "10".to_string())]);
        assert!(req.body.is_none());
    }

    #[test]
    fn non_success_status_becomes_error() {
        let err = ApiResponse::new(StatusCode::INTERNAL_SERVER_ERROR, "boom").error_for_status().unwrap_err();
        assert_eq!(err.status(), Some(StatusCode::INTERNAL_SERVER_ERROR));
        assert!(err.to_string().contains("boom"));
    }

    #[test]
    fn decode_failure_is_reported() {
        let resp = ApiResponse::ok_json(&json!({"unexpected": true}));
        let err = resp.decode::<models::AccountDetails>().unwrap_err();
        assert!(matches!(err, ClientError::Decode(_)));
    }
}
