//! Workspace translation engine.
//!
//! Turns a snapshot of the editor workspace into a single Caddy route:
//! fields are extracted per container, the route type is classified from the
//! placed block, and the matching builder assembles the handler tree.

pub mod builders;
pub mod classify;
pub mod extract;
pub mod handler;
pub mod node;
pub mod translate;

pub use classify::{classify, RouteType};
pub use extract::{extract_options, OptionEntry, OptionSet, OptionValue};
pub use handler::{Browse, Handler, HandlerObject, HostMatch, Route, Upstream};
pub use node::{Field, Node, SelectOption};
pub use translate::{locate_workspace, Translator, TranslatorConfig};
