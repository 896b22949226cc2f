//! Submission of translated handlers to a remote route array.
//!
//! [`HandlerSink`] is the seam the editor submits through. The browser-facing
//! bridge contract (`POST /config/array` with `{path, items}`) is implemented
//! by [`BridgeSubmitter`]; [`CaddyClient`] appends straight to the admin API.

use crate::caddy::CaddyClient;
use crate::caddy::client::error_message;
use crate::error::SubmissionError;
use crate::workspace::HandlerObject;
use serde::Serialize;
use serde_json::Value;
use std::future::Future;
use std::pin::Pin;

/// Default route array handlers are appended to.
pub const DEFAULT_ROUTES_PATH: &str = "apps/http/servers/srv0/routes";

pub type SubmitFuture<'a> =
    Pin<Box<dyn Future<Output = Result<Value, SubmissionError>> + Send + 'a>>;

/// Anything that can append items to an array in a remote config tree.
pub trait HandlerSink: Send + Sync {
    /// Appends `items` to the array at `path` and returns the server's reply.
    fn append(&self, path: String, items: Vec<Value>) -> SubmitFuture<'_>;
}

impl HandlerSink for CaddyClient {
    fn append(&self, path: String, items: Vec<Value>) -> SubmitFuture<'_> {
        Box::pin(async move { Ok(self.add_to_config_array(&path, &items).await?) })
    }
}

#[derive(Serialize)]
struct AppendBody<'a> {
    path: &'a str,
    items: &'a [Value],
}

/// Posts to a bridge server's array-append endpoint.
#[derive(Debug, Clone)]
pub struct BridgeSubmitter {
    endpoint: String,
    http: reqwest::Client,
}

impl BridgeSubmitter {
    pub fn new(base_url: &str) -> Result<Self, SubmissionError> {
        url::Url::parse(base_url)
            .map_err(|e| SubmissionError::InvalidUrl(format!("{}: {}", base_url, e)))?;
        Ok(Self {
            endpoint: format!("{}/config/array", base_url.trim_end_matches('/')),
            http: reqwest::Client::new(),
        })
    }

    async fn post(&self, path: &str, items: &[Value]) -> Result<Value, SubmissionError> {
        let response = self
            .http
            .post(&self.endpoint)
            .json(&AppendBody { path, items })
            .send()
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "Error adding handle");
                SubmissionError::Transport(e)
            })?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let message = error_message(&body).unwrap_or_else(|| "Unknown error".to_string());
            tracing::warn!(status = status.as_u16(), %message, "Bridge rejected handle");
            return Err(SubmissionError::Server {
                status: status.as_u16(),
                message,
            });
        }

        let result = if body.trim().is_empty() {
            Value::Null
        } else {
            serde_json::from_str(&body).map_err(|e| SubmissionError::Server {
                status: status.as_u16(),
                message: format!("invalid JSON response: {}", e),
            })?
        };
        tracing::info!(path, "Handle added successfully");
        Ok(result)
    }
}

impl HandlerSink for BridgeSubmitter {
    fn append(&self, path: String, items: Vec<Value>) -> SubmitFuture<'_> {
        Box::pin(async move { self.post(&path, &items).await })
    }
}

/// Appends a single handler to the array at `path`.
pub async fn submit_handler(
    sink: &dyn HandlerSink,
    path: &str,
    handler: &HandlerObject,
) -> Result<Value, SubmissionError> {
    sink.append(path.to_string(), vec![handler.to_value()]).await
}
