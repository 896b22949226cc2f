pub mod caddy;
pub mod config;
pub mod editor;
pub mod error;
pub mod routes;
pub mod submit;
pub mod workspace;

#[cfg(test)]
pub(crate) mod test_support;

pub use caddy::{CaddyClient, ConfigPayload};
pub use config::Config;
pub use editor::{Banner, BannerKind, Editor, UiCommand};
pub use error::{AppError, CaddyError, ConfigurationError, SubmissionError};
pub use routes::{create_router, AppState};
pub use submit::{submit_handler, BridgeSubmitter, HandlerSink};
pub use workspace::{HandlerObject, Node, RouteType, Translator, TranslatorConfig};
