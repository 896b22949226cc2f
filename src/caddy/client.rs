//! Client for Caddy's administrative HTTP API.
//!
//! Covers the endpoints the editor and the bridge server need: reading and
//! mutating the config tree, adapting and loading configs, PKI lookups and
//! the reverse-proxy upstream listing.

use crate::error::CaddyError;
use reqwest::{
    header::{self, HeaderMap, HeaderValue},
    Method, RequestBuilder, Response,
};
use serde_json::Value;

/// Default address of the Caddy admin endpoint.
pub const DEFAULT_ADMIN_URL: &str = "http://localhost:2019";

/// Body of an adapt or load call.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigPayload {
    Json(Value),
    Text { body: String, content_type: String },
}

impl ConfigPayload {
    pub fn caddyfile(body: impl Into<String>) -> Self {
        ConfigPayload::Text {
            body: body.into(),
            content_type: "text/caddyfile".to_string(),
        }
    }

    /// Picks JSON or raw text depending on the requested content type.
    ///
    /// No content type, or any JSON type, sends `config` as JSON. Anything
    /// else sends it as text; strings are sent verbatim.
    pub fn from_parts(config: Value, content_type: Option<&str>) -> Self {
        match content_type {
            Some(ct) if !ct.to_ascii_lowercase().contains("json") => {
                let body = match config {
                    Value::String(s) => s,
                    other => other.to_string(),
                };
                ConfigPayload::Text {
                    body,
                    content_type: ct.to_string(),
                }
            }
            _ => ConfigPayload::Json(config),
        }
    }
}

#[derive(Debug, Clone)]
pub struct CaddyClient {
    base_url: String,
    auth_token: Option<String>,
    http: reqwest::Client,
}

impl CaddyClient {
    pub fn new(api_url: &str, auth_token: Option<String>) -> Result<Self, CaddyError> {
        let parsed = url::Url::parse(api_url)
            .map_err(|e| CaddyError::InvalidUrl(format!("{}: {}", api_url, e)))?;
        if parsed.host_str().is_none() {
            return Err(CaddyError::InvalidUrl(format!("{}: URL has no host", api_url)));
        }

        let mut headers = HeaderMap::new();
        headers.insert(header::ACCEPT, HeaderValue::from_static("application/json"));
        let http = reqwest::Client::builder().default_headers(headers).build()?;

        tracing::debug!(url = %api_url, "Initialized Caddy admin client");

        Ok(Self {
            base_url: api_url.trim_end_matches('/').to_string(),
            auth_token,
            http,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url, endpoint)
    }

    fn config_endpoint(path: Option<&str>) -> String {
        match path.map(|p| p.trim_matches('/')).filter(|p| !p.is_empty()) {
            Some(path) => format!("/config/{}", path),
            None => "/config".to_string(),
        }
    }

    fn request(&self, method: Method, endpoint: &str) -> RequestBuilder {
        let builder = self.http.request(method, self.url(endpoint));
        match &self.auth_token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn send(
        &self,
        method: Method,
        endpoint: &str,
        builder: RequestBuilder,
    ) -> Result<Response, CaddyError> {
        tracing::debug!(%method, endpoint, "Calling Caddy admin API");

        let response = builder.send().await.map_err(|e| {
            tracing::error!(%method, endpoint, error = %e, "Caddy admin request failed");
            CaddyError::RequestFailed(e)
        })?;

        let status = response.status();
        if status.is_success() {
            tracing::debug!(status = status.as_u16(), endpoint, "Caddy admin response");
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = error_message(&body).unwrap_or_else(|| {
            status
                .canonical_reason()
                .unwrap_or("Unknown error")
                .to_string()
        });
        tracing::error!(status = status.as_u16(), endpoint, %message, "Caddy admin API error");
        Err(CaddyError::Status {
            status: status.as_u16(),
            message,
        })
    }

    async fn call(&self, method: Method, endpoint: &str) -> Result<Value, CaddyError> {
        let builder = self.request(method.clone(), endpoint);
        let response = self.send(method, endpoint, builder).await?;
        read_json(response).await
    }

    async fn call_with_json(
        &self,
        method: Method,
        endpoint: &str,
        body: &Value,
    ) -> Result<Value, CaddyError> {
        let builder = self.request(method.clone(), endpoint).json(body);
        let response = self.send(method, endpoint, builder).await?;
        read_json(response).await
    }

    async fn send_payload(
        &self,
        endpoint: &str,
        payload: &ConfigPayload,
    ) -> Result<Response, CaddyError> {
        let builder = self.request(Method::POST, endpoint);
        let builder = match payload {
            ConfigPayload::Json(value) => builder.json(value),
            ConfigPayload::Text { body, content_type } => builder
                .header(header::CONTENT_TYPE, content_type.as_str())
                .body(body.clone()),
        };
        self.send(Method::POST, endpoint, builder).await
    }

    /// Whole config, or the subtree at `path`.
    pub async fn get_config(&self, path: Option<&str>) -> Result<Value, CaddyError> {
        self.call(Method::GET, &Self::config_endpoint(path)).await
    }

    /// Appends `items` to the array at `path`.
    pub async fn add_to_config_array(
        &self,
        path: &str,
        items: &[Value],
    ) -> Result<Value, CaddyError> {
        let endpoint = format!("{}/...", Self::config_endpoint(Some(path)));
        self.call_with_json(Method::POST, &endpoint, &Value::Array(items.to_vec()))
            .await
    }

    /// Inserts `item` at `index` of the array at `path`.
    pub async fn insert_into_config_array(
        &self,
        path: &str,
        index: usize,
        item: &Value,
    ) -> Result<Value, CaddyError> {
        let endpoint = format!("{}/{}", Self::config_endpoint(Some(path)), index);
        self.call_with_json(Method::PUT, &endpoint, item).await
    }

    /// Replaces the existing value at `path`.
    pub async fn replace_config_value(
        &self,
        path: &str,
        value: &Value,
    ) -> Result<Value, CaddyError> {
        self.call_with_json(Method::PATCH, &Self::config_endpoint(Some(path)), value)
            .await
    }

    pub async fn delete_config(&self, path: Option<&str>) -> Result<Value, CaddyError> {
        self.call(Method::DELETE, &Self::config_endpoint(path)).await
    }

    /// Adapts a config to Caddy JSON without loading it.
    pub async fn adapt_config(&self, payload: &ConfigPayload) -> Result<Value, CaddyError> {
        let response = self.send_payload("/adapt", payload).await?;

        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_string();
        if !content_type.to_ascii_lowercase().contains("json") {
            return Err(CaddyError::NotJson(if content_type.is_empty() {
                "no content type".to_string()
            } else {
                content_type
            }));
        }

        read_json(response).await
    }

    /// Replaces the running config.
    pub async fn load_config(&self, payload: &ConfigPayload) -> Result<Value, CaddyError> {
        let response = self.send_payload("/load", payload).await?;
        read_json(response).await
    }

    pub async fn get_pki_ca(&self, id: &str) -> Result<Value, CaddyError> {
        self.call(Method::GET, &format!("/pki/ca/{}", id)).await
    }

    pub async fn get_pki_ca_certificates(&self, id: &str) -> Result<Value, CaddyError> {
        self.call(Method::GET, &format!("/pki/ca/{}/certificates", id))
            .await
    }

    pub async fn get_proxy_upstreams(&self) -> Result<Value, CaddyError> {
        self.call(Method::GET, "/reverse_proxy/upstreams").await
    }

    /// Gracefully stops the Caddy process.
    pub async fn stop_server(&self) -> Result<Value, CaddyError> {
        self.call(Method::POST, "/stop").await
    }
}

/// Parses a response body as JSON; Caddy answers mutations with an empty body.
async fn read_json(response: Response) -> Result<Value, CaddyError> {
    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string();
    let body = response.text().await?;
    if body.trim().is_empty() {
        return Ok(Value::Null);
    }
    serde_json::from_str(&body).map_err(|_| CaddyError::NotJson(content_type))
}

/// Extracts the `error` string Caddy puts in failure bodies.
pub(crate) fn error_message(body: &str) -> Option<String> {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| v.get("error").and_then(Value::as_str).map(str::to_string))
        .filter(|m| !m.is_empty())
}
