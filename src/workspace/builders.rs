//! Handler builders, one per route type.
//!
//! Builders never fail. A missing `siteURL`, `proxyURL` or `folderPath`
//! leaves the corresponding slot empty and it is up to the caller (or Caddy)
//! to reject the result.

use super::extract::OptionSet;
use super::handler::{Browse, Handler, HandlerObject, Upstream};

pub const SITE_URL: &str = "siteURL";
pub const PROXY_URL: &str = "proxyURL";
pub const FOLDER_PATH: &str = "folderPath";
pub const BROWSEABLE: &str = "browseable";

/// Files the generated file server refuses to serve.
pub const HIDDEN_FILES: &[&str] = &[".env"];

fn site_host(general: &OptionSet) -> Option<String> {
    general.text(SITE_URL).map(str::to_string)
}

pub fn build_reverse_proxy(general: &OptionSet, block: &OptionSet) -> HandlerObject {
    let upstream = Upstream {
        dial: block.text(PROXY_URL).map(str::to_string),
    };
    HandlerObject::subroute(
        site_host(general),
        vec![Handler::ReverseProxy {
            upstreams: vec![upstream],
        }],
    )
}

pub fn build_static_route(general: &OptionSet, block: &OptionSet) -> HandlerObject {
    let folder = block
        .text(FOLDER_PATH)
        .filter(|path| !path.trim().is_empty());

    let file_server = Handler::FileServer {
        hide: HIDDEN_FILES.iter().map(|f| f.to_string()).collect(),
        browse: block.flag(BROWSEABLE).then(Browse::default),
    };

    let handle = match folder {
        Some(root) => vec![
            Handler::Vars {
                root: Some(root.to_string()),
            },
            file_server,
        ],
        None => vec![file_server],
    };

    HandlerObject::subroute(site_host(general), handle)
}
