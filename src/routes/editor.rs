use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::json::ApiJson;
use super::state::AppState;
use crate::editor::UiCommand;
use crate::error::AppError;
use crate::workspace::{locate_workspace, HandlerObject, Node, RouteType};

/// Workspace snapshot posted by the frontend.
#[derive(Debug, Deserialize)]
pub struct WorkspaceRequest {
    /// The workspace element, or any ancestor of it.
    pub workspace: Node,
    /// Block type recorded when the block was dropped, if the page knows it.
    #[serde(default)]
    pub route_type: Option<RouteType>,
}

#[derive(Debug, Serialize)]
pub struct CommandsResponse {
    pub commands: Vec<UiCommand>,
}

pub async fn translate(
    State(state): State<Arc<AppState>>,
    ApiJson(request): ApiJson<WorkspaceRequest>,
) -> Result<Json<HandlerObject>, AppError> {
    let workspace = locate_workspace(&request.workspace)?;
    let translator = state.editor.translator();
    let handler = match request.route_type {
        Some(route_type) => translator.translate_as(workspace, route_type)?,
        None => translator.translate(workspace)?,
    };
    Ok(Json(handler))
}

pub async fn preview(
    State(state): State<Arc<AppState>>,
    ApiJson(request): ApiJson<WorkspaceRequest>,
) -> Json<CommandsResponse> {
    let workspace = locate_workspace(&request.workspace).unwrap_or(&request.workspace);
    Json(CommandsResponse {
        commands: state.editor.preview(workspace, request.route_type),
    })
}

pub async fn save(
    State(state): State<Arc<AppState>>,
    ApiJson(request): ApiJson<WorkspaceRequest>,
) -> Json<CommandsResponse> {
    let workspace = locate_workspace(&request.workspace).unwrap_or(&request.workspace);
    tracing::debug!(routes_path = %state.editor.routes_path(), "Saving workspace");
    let commands = state.editor.save(workspace, request.route_type).await;
    Json(CommandsResponse { commands })
}

pub async fn clear(State(state): State<Arc<AppState>>) -> Json<CommandsResponse> {
    Json(CommandsResponse {
        commands: state.editor.clear(),
    })
}
