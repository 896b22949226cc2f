//! Editor actions and the UI commands they produce.
//!
//! Nothing here touches the page. Each trigger (preview, save, clear) returns
//! the list of [`UiCommand`]s the frontend should execute in order.

use crate::error::ConfigurationError;
use crate::submit::{submit_handler, HandlerSink};
use crate::workspace::{HandlerObject, Node, RouteType, Translator};
use serde::Serialize;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Display time of transient banners.
pub const DEFAULT_BANNER_MS: u64 = 5000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BannerKind {
    Info,
    Success,
    Warning,
    Error,
}

impl BannerKind {
    /// Background and text colors.
    pub fn colors(self) -> (&'static str, &'static str) {
        match self {
            BannerKind::Info => ("#007bff", "#fff"),
            BannerKind::Success => ("#28a745", "#fff"),
            BannerKind::Warning => ("#ffc107", "#000"),
            BannerKind::Error => ("#dc3545", "#fff"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Banner {
    pub kind: BannerKind,
    pub message: String,
    /// Zero keeps the banner until dismissed.
    pub duration_ms: u64,
    pub dismissible: bool,
    pub color: &'static str,
    pub text_color: &'static str,
}

impl Banner {
    /// Slides away after [`DEFAULT_BANNER_MS`].
    pub fn transient(kind: BannerKind, message: impl Into<String>) -> Self {
        let (color, text_color) = kind.colors();
        Self {
            kind,
            message: message.into(),
            duration_ms: DEFAULT_BANNER_MS,
            dismissible: false,
            color,
            text_color,
        }
    }

    /// Stays until the user closes it.
    pub fn persistent(kind: BannerKind, message: impl Into<String>) -> Self {
        Self {
            duration_ms: 0,
            dismissible: true,
            ..Self::transient(kind, message)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum UiCommand {
    ShowPreview { json: String },
    ShowBanner { banner: Banner },
    ShowBusy,
    HideBusy,
    /// Remove every workspace child except the general options.
    ClearBlocks,
    /// Put the draggable templates back into the palette.
    ResetPalette,
}

impl UiCommand {
    fn banner(banner: Banner) -> Self {
        UiCommand::ShowBanner { banner }
    }
}

/// Drives translation and submission for one editor page.
pub struct Editor {
    translator: Translator,
    sink: Arc<dyn HandlerSink>,
    routes_path: String,
    in_flight: AtomicBool,
}

/// Clears the busy flag when a submission finishes, however it ends.
struct InFlight<'a>(&'a AtomicBool);

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl Editor {
    pub fn new(
        translator: Translator,
        sink: Arc<dyn HandlerSink>,
        routes_path: impl Into<String>,
    ) -> Self {
        Self {
            translator,
            sink,
            routes_path: routes_path.into(),
            in_flight: AtomicBool::new(false),
        }
    }

    pub fn translator(&self) -> &Translator {
        &self.translator
    }

    pub fn routes_path(&self) -> &str {
        &self.routes_path
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    fn translate(
        &self,
        workspace: &Node,
        route_type: Option<RouteType>,
    ) -> Result<HandlerObject, ConfigurationError> {
        match route_type {
            Some(route_type) => self.translator.translate_as(workspace, route_type),
            None => self.translator.translate(workspace),
        }
    }

    /// Renders the handler for the preview pane.
    pub fn preview(&self, workspace: &Node, route_type: Option<RouteType>) -> Vec<UiCommand> {
        match self.translate(workspace, route_type) {
            Ok(handler) => {
                let json = serde_json::to_string_pretty(&handler).unwrap_or_default();
                vec![UiCommand::ShowPreview { json }]
            }
            Err(e) => {
                tracing::warn!(error = %e, "Preview failed");
                vec![UiCommand::banner(Banner::persistent(
                    BannerKind::Error,
                    format!("Cannot build handle: {}", e),
                ))]
            }
        }
    }

    /// Translates the workspace and appends the result to the routes array.
    pub async fn save(&self, workspace: &Node, route_type: Option<RouteType>) -> Vec<UiCommand> {
        let handler = match self.translate(workspace, route_type) {
            Ok(handler) => handler,
            Err(e) => {
                tracing::warn!(error = %e, "Save aborted");
                return vec![UiCommand::banner(Banner::persistent(
                    BannerKind::Error,
                    format!("Cannot build handle: {}", e),
                ))];
            }
        };

        if self
            .in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            tracing::warn!("Save requested while a submission is in flight");
            return vec![UiCommand::banner(Banner::transient(
                BannerKind::Warning,
                "A submission is already in progress",
            ))];
        }
        let guard = InFlight(&self.in_flight);

        let mut commands = vec![UiCommand::ShowBusy];
        let result = submit_handler(self.sink.as_ref(), &self.routes_path, &handler).await;
        drop(guard);
        commands.push(UiCommand::HideBusy);

        match result {
            Ok(_) => {
                commands.push(UiCommand::ClearBlocks);
                commands.push(UiCommand::ResetPalette);
                commands.push(UiCommand::banner(Banner::transient(
                    BannerKind::Success,
                    "Handle added successfully!",
                )));
            }
            Err(e) => {
                tracing::error!(error = %e, "Error adding handle");
                commands.push(UiCommand::banner(Banner::persistent(
                    BannerKind::Error,
                    format!("Error adding handle! {}", e),
                )));
            }
        }
        commands
    }

    pub fn clear(&self) -> Vec<UiCommand> {
        vec![UiCommand::ClearBlocks, UiCommand::ResetPalette]
    }
}
