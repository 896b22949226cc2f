//! Caddy route schema produced by the translator.
//!
//! Field names follow the JSON layout of `apps/http/servers/*/routes`
//! entries. Missing user input stays `None` and is serialized as `null`.

use serde::{Deserialize, Serialize};

/// One route entry: a host matcher in front of a single subroute.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HandlerObject {
    pub handle: Vec<Handler>,
    #[serde(rename = "match")]
    pub matchers: Vec<HostMatch>,
    pub terminal: bool,
}

impl HandlerObject {
    /// Wraps `handle` in a subroute matched on `host`.
    pub fn subroute(host: Option<String>, handle: Vec<Handler>) -> Self {
        Self {
            handle: vec![Handler::Subroute {
                routes: vec![Route { handle }],
            }],
            matchers: vec![HostMatch { host: vec![host] }],
            terminal: true,
        }
    }

    /// Handlers of the innermost route.
    pub fn inner_handlers(&self) -> &[Handler] {
        match self.handle.first() {
            Some(Handler::Subroute { routes }) => routes
                .first()
                .map(|route| route.handle.as_slice())
                .unwrap_or_default(),
            _ => &[],
        }
    }

    pub fn host(&self) -> Option<&str> {
        self.matchers
            .first()
            .and_then(|m| m.host.first())
            .and_then(|host| host.as_deref())
    }

    pub fn to_value(&self) -> serde_json::Value {
        // Plain data with string keys; serialization cannot fail.
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "handler", rename_all = "snake_case")]
pub enum Handler {
    Subroute {
        routes: Vec<Route>,
    },
    ReverseProxy {
        upstreams: Vec<Upstream>,
    },
    Vars {
        root: Option<String>,
    },
    FileServer {
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        hide: Vec<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        browse: Option<Browse>,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Route {
    pub handle: Vec<Handler>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Upstream {
    pub dial: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HostMatch {
    pub host: Vec<Option<String>>,
}

/// Directory listing switch; serializes as `{}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Browse {}
