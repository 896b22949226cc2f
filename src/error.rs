use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// The workspace cannot be translated into a route.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    #[error("missing workspace")]
    MissingWorkspace,

    #[error("missing general options")]
    MissingGeneralOptions,

    #[error("unknown route type")]
    UnknownRouteType,
}

/// Failure talking to the Caddy admin API.
#[derive(Error, Debug)]
pub enum CaddyError {
    #[error("Request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Caddy returned {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Expected a JSON response, got {0}")]
    NotJson(String),
}

/// Failure appending a handler to the remote route array.
#[derive(Error, Debug)]
pub enum SubmissionError {
    #[error("Server error: {status} - {message}")]
    Server { status: u16, message: String },

    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

impl From<CaddyError> for SubmissionError {
    fn from(err: CaddyError) -> Self {
        match err {
            CaddyError::RequestFailed(e) => SubmissionError::Transport(e),
            CaddyError::InvalidUrl(url) => SubmissionError::InvalidUrl(url),
            CaddyError::Status { status, message } => SubmissionError::Server { status, message },
            CaddyError::NotJson(content_type) => SubmissionError::Server {
                status: 502,
                message: format!("unexpected content type {}", content_type),
            },
        }
    }
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    BadRequest(String),

    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    #[error(transparent)]
    Caddy(#[from] CaddyError),
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(format!("Invalid request. {}", rejection.body_text()))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_code) = match &self {
            AppError::BadRequest(_) => (StatusCode::BAD_REQUEST, "BAD_REQUEST"),
            AppError::Configuration(_) => {
                (StatusCode::UNPROCESSABLE_ENTITY, "CONFIGURATION_ERROR")
            }
            AppError::Caddy(e) => {
                let code = match e {
                    CaddyError::RequestFailed(e) if e.is_timeout() => "TIMEOUT",
                    CaddyError::RequestFailed(e) if e.is_connect() => "CONNECTION_FAILED",
                    CaddyError::RequestFailed(_) => "REQUEST_FAILED",
                    CaddyError::InvalidUrl(_) => "INVALID_URL",
                    CaddyError::Status { .. } => "CADDY_ERROR",
                    CaddyError::NotJson(_) => "NOT_JSON",
                };
                (StatusCode::INTERNAL_SERVER_ERROR, code)
            }
        };

        let body = Json(json!({
            "error": self.to_string(),
            "code": error_code,
        }));

        (status, body).into_response()
    }
}
