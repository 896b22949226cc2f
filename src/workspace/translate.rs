//! Workspace to handler translation.

use super::builders::{build_reverse_proxy, build_static_route};
use super::classify::{classify, RouteType};
use super::extract::{extract_options, OptionSet};
use super::handler::HandlerObject;
use super::node::{Node, GENERAL_OPTIONS_ID, HANDLE_INFO_ATTR, WORKSPACE_ID};
use crate::error::ConfigurationError;

/// Settings injected into the translator at construction.
#[derive(Debug, Clone, Default)]
pub struct TranslatorConfig {
    /// Log every extracted entry and the resulting handler.
    pub debug: bool,
}

/// Converts a workspace snapshot into a Caddy route.
///
/// Holds no state between calls: translating an unchanged workspace twice
/// yields equal handlers.
#[derive(Debug, Clone, Default)]
pub struct Translator {
    config: TranslatorConfig,
}

impl Translator {
    pub fn new(config: TranslatorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &TranslatorConfig {
        &self.config
    }

    /// Translates `workspace`, deriving the route type from its markers.
    pub fn translate(&self, workspace: &Node) -> Result<HandlerObject, ConfigurationError> {
        let route_type = classify(workspace);
        if self.config.debug {
            tracing::debug!(%route_type, "Classified workspace");
        }
        self.translate_as(workspace, route_type)
    }

    /// Translates `workspace` using a route type picked by the caller.
    pub fn translate_as(
        &self,
        workspace: &Node,
        route_type: RouteType,
    ) -> Result<HandlerObject, ConfigurationError> {
        let general_container = workspace
            .find_descendant(GENERAL_OPTIONS_ID)
            .ok_or(ConfigurationError::MissingGeneralOptions)?;

        let general = extract_options(general_container, HANDLE_INFO_ATTR);
        self.trace_options("general", &general);

        let block = self.pool_block_options(workspace);

        let handler = match route_type {
            RouteType::ReverseProxy => build_reverse_proxy(&general, &block),
            RouteType::StaticRoute => build_static_route(&general, &block),
            RouteType::Unknown => return Err(ConfigurationError::UnknownRouteType),
        };

        if self.config.debug {
            tracing::debug!(handler = ?handler, "Built handler");
        }
        Ok(handler)
    }

    /// Block options of every direct `div` child except the general options,
    /// pooled into one set.
    fn pool_block_options(&self, workspace: &Node) -> OptionSet {
        let mut pooled = OptionSet::new();
        let mut containers = 0usize;

        for child in &workspace.children {
            if child.has_id(GENERAL_OPTIONS_ID) || !child.is_tag("div") {
                continue;
            }
            containers += 1;
            let options = extract_options(child, HANDLE_INFO_ATTR);
            self.trace_options(child.id.as_deref().unwrap_or("<anonymous>"), &options);
            pooled.extend(options);
        }

        if containers > 1 {
            tracing::warn!(
                containers,
                "Multiple blocks in workspace; options are merged by id"
            );
        }
        pooled
    }

    fn trace_options(&self, scope: &str, options: &OptionSet) {
        if !self.config.debug {
            return;
        }
        for entry in options.iter() {
            tracing::debug!(scope, id = %entry.id, value = ?entry.value, "Handle info");
        }
    }
}

/// Finds the workspace element in a larger document snapshot.
pub fn locate_workspace(document: &Node) -> Result<&Node, ConfigurationError> {
    document
        .find(WORKSPACE_ID)
        .ok_or(ConfigurationError::MissingWorkspace)
}
