//! Bridge endpoints forwarding browser calls to the Caddy admin API.
//!
//! Request validation failures answer 400 and admin failures 500, both with
//! an `{"error": ...}` body.

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;

use super::json::ApiJson;
use super::state::AppState;
use crate::caddy::ConfigPayload;
use crate::error::AppError;

type JsonResult = Result<Json<Value>, AppError>;

#[derive(Debug, Deserialize)]
pub struct PathQuery {
    pub path: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct IdQuery {
    pub id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateConfigRequest {
    pub path: Option<String>,
    pub value: Option<Value>,
}

#[derive(Debug, Deserialize)]
pub struct AppendRequest {
    pub path: Option<String>,
    pub items: Option<Vec<Value>>,
}

#[derive(Debug, Deserialize)]
pub struct InsertRequest {
    pub path: Option<String>,
    pub index: Option<usize>,
    pub item: Option<Value>,
}

#[derive(Debug, Deserialize)]
pub struct ConfigRequest {
    pub config: Option<Value>,
    /// Adapter content type, e.g. `text/caddyfile`; JSON when omitted.
    pub content_type: Option<String>,
}

fn bad_request(message: &str) -> AppError {
    AppError::BadRequest(format!("Invalid request. {}", message))
}

pub async fn get_config(
    State(state): State<Arc<AppState>>,
    Query(query): Query<PathQuery>,
) -> JsonResult {
    Ok(Json(state.caddy.get_config(query.path.as_deref()).await?))
}

pub async fn update_config(
    State(state): State<Arc<AppState>>,
    ApiJson(request): ApiJson<UpdateConfigRequest>,
) -> JsonResult {
    let (Some(path), Some(value)) = (request.path, request.value) else {
        return Err(bad_request(r#""path" and "value" are required."#));
    };
    Ok(Json(state.caddy.replace_config_value(&path, &value).await?))
}

pub async fn delete_config(
    State(state): State<Arc<AppState>>,
    Query(query): Query<PathQuery>,
) -> JsonResult {
    Ok(Json(state.caddy.delete_config(query.path.as_deref()).await?))
}

pub async fn add_to_config_array(
    State(state): State<Arc<AppState>>,
    ApiJson(request): ApiJson<AppendRequest>,
) -> JsonResult {
    let (Some(path), Some(items)) = (request.path, request.items) else {
        return Err(bad_request(r#""path" and "items" are required."#));
    };
    tracing::debug!(%path, count = items.len(), "Appending to config array");
    Ok(Json(state.caddy.add_to_config_array(&path, &items).await?))
}

pub async fn insert_into_config_array(
    State(state): State<Arc<AppState>>,
    ApiJson(request): ApiJson<InsertRequest>,
) -> JsonResult {
    let (Some(path), Some(index), Some(item)) = (request.path, request.index, request.item) else {
        return Err(bad_request(r#""path", "index", and "item" are required."#));
    };
    Ok(Json(
        state
            .caddy
            .insert_into_config_array(&path, index, &item)
            .await?,
    ))
}

fn payload(request: ConfigRequest) -> Result<ConfigPayload, AppError> {
    let config = request
        .config
        .ok_or_else(|| bad_request(r#""config" is required."#))?;
    Ok(ConfigPayload::from_parts(config, request.content_type.as_deref()))
}

pub async fn adapt_config(
    State(state): State<Arc<AppState>>,
    ApiJson(request): ApiJson<ConfigRequest>,
) -> JsonResult {
    let payload = payload(request)?;
    Ok(Json(state.caddy.adapt_config(&payload).await?))
}

pub async fn load_config(
    State(state): State<Arc<AppState>>,
    ApiJson(request): ApiJson<ConfigRequest>,
) -> JsonResult {
    let payload = payload(request)?;
    Ok(Json(state.caddy.load_config(&payload).await?))
}

fn require_id(query: IdQuery) -> Result<String, AppError> {
    query
        .id
        .filter(|id| !id.is_empty())
        .ok_or_else(|| AppError::BadRequest(r#""id" query parameter is required."#.to_string()))
}

pub async fn get_pki_ca(
    State(state): State<Arc<AppState>>,
    Query(query): Query<IdQuery>,
) -> JsonResult {
    let id = require_id(query)?;
    Ok(Json(state.caddy.get_pki_ca(&id).await?))
}

pub async fn get_pki_ca_certificates(
    State(state): State<Arc<AppState>>,
    Query(query): Query<IdQuery>,
) -> JsonResult {
    let id = require_id(query)?;
    Ok(Json(state.caddy.get_pki_ca_certificates(&id).await?))
}

pub async fn get_proxy_upstreams(State(state): State<Arc<AppState>>) -> JsonResult {
    Ok(Json(state.caddy.get_proxy_upstreams().await?))
}

pub async fn stop_server(State(state): State<Arc<AppState>>) -> JsonResult {
    tracing::warn!("Stopping Caddy");
    Ok(Json(state.caddy.stop_server().await?))
}
