use crate::caddy::DEFAULT_ADMIN_URL;
use crate::submit::DEFAULT_ROUTES_PATH;
use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub caddy_api_url: String,
    pub caddy_auth_token: Option<String>,
    pub routes_path: String,
    pub debug: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 5002,
            caddy_api_url: DEFAULT_ADMIN_URL.to_string(),
            caddy_auth_token: None,
            routes_path: DEFAULT_ROUTES_PATH.to_string(),
            debug: false,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            port: lookup("PORT")
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.port),
            caddy_api_url: lookup("CADDY_API_URL").unwrap_or(defaults.caddy_api_url),
            caddy_auth_token: lookup("CADDY_AUTH_TOKEN").filter(|t| !t.is_empty()),
            routes_path: lookup("ROUTES_PATH").unwrap_or(defaults.routes_path),
            debug: lookup("EDITOR_DEBUG")
                .map(|v| matches!(v.to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on"))
                .unwrap_or(defaults.debug),
        }
    }
}
