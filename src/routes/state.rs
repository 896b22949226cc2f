//! Shared server state.

use crate::caddy::CaddyClient;
use crate::config::Config;
use crate::editor::Editor;
use crate::error::CaddyError;
use crate::workspace::{Translator, TranslatorConfig};
use std::sync::Arc;

pub struct AppState {
    pub caddy: CaddyClient,
    pub editor: Editor,
}

impl AppState {
    /// Wires the admin client, translator and editor from `config`.
    ///
    /// The editor submits straight to the admin API, so saves from the
    /// browser and `POST /config/array` land in the same place.
    pub fn from_config(config: &Config) -> Result<Arc<Self>, CaddyError> {
        let caddy = CaddyClient::new(&config.caddy_api_url, config.caddy_auth_token.clone())?;
        let translator = Translator::new(TranslatorConfig {
            debug: config.debug,
        });
        let editor = Editor::new(translator, Arc::new(caddy.clone()), config.routes_path.clone());
        Ok(Arc::new(Self { caddy, editor }))
    }
}
