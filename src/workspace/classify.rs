//! Route-type detection from block markers.

use super::node::{Node, REVERSE_PROXY_MARKER, STATIC_ROUTE_MARKER};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which handler template a workspace translates to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RouteType {
    ReverseProxy,
    StaticRoute,
    Unknown,
}

impl RouteType {
    /// Marker id a placed block of this type carries.
    pub fn marker(self) -> Option<&'static str> {
        match self {
            RouteType::ReverseProxy => Some(REVERSE_PROXY_MARKER),
            RouteType::StaticRoute => Some(STATIC_ROUTE_MARKER),
            RouteType::Unknown => None,
        }
    }
}

impl fmt::Display for RouteType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RouteType::ReverseProxy => "reverse_proxy",
            RouteType::StaticRoute => "static_route",
            RouteType::Unknown => "unknown",
        };
        f.write_str(name)
    }
}

/// Lookup order; the first marker found wins.
const PRECEDENCE: [RouteType; 2] = [RouteType::ReverseProxy, RouteType::StaticRoute];

/// Determines the route type from the markers below `workspace`.
///
/// Both markers present resolves to [`RouteType::ReverseProxy`]. The UI only
/// lets one block type into the workspace, so this is never reconciled.
pub fn classify(workspace: &Node) -> RouteType {
    PRECEDENCE
        .into_iter()
        .find(|route_type| {
            route_type
                .marker()
                .is_some_and(|marker| workspace.find_descendant(marker).is_some())
        })
        .unwrap_or(RouteType::Unknown)
}
