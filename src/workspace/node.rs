//! Serializable snapshot of the editor's DOM.
//!
//! The browser walks its workspace element and posts it as a tree of
//! [`Node`]s, which is all the translation engine ever sees.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Id of the workspace drop zone.
pub const WORKSPACE_ID: &str = "workspace";
/// Id of the reserved container holding site-wide settings.
pub const GENERAL_OPTIONS_ID: &str = "general_options";
/// Id carried by a placed reverse-proxy block.
pub const REVERSE_PROXY_MARKER: &str = "reverseproxy";
/// Id carried by a placed static-route block.
pub const STATIC_ROUTE_MARKER: &str = "staticroute";
/// Attribute marking a field as relevant to the generated handler.
pub const HANDLE_INFO_ATTR: &str = "data-handleinfo";

/// One element of the workspace snapshot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Node {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default = "default_tag")]
    pub tag: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<Field>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Node>,
}

fn default_tag() -> String {
    "div".to_string()
}

/// Current state of a form control.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Field {
    Checkbox {
        #[serde(default)]
        checked: bool,
    },
    Textarea {
        #[serde(default)]
        text: String,
    },
    Select {
        #[serde(default)]
        options: Vec<SelectOption>,
        /// Index of the selected option; `None` means the browser default.
        #[serde(default)]
        selected: Option<usize>,
    },
    Input {
        #[serde(default)]
        value: String,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectOption {
    pub value: String,
    #[serde(default)]
    pub label: String,
}

impl Node {
    /// Creates an element with the given tag and no id.
    pub fn element(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Default::default()
        }
    }

    /// Creates a `div` container with the given id.
    pub fn container(id: impl Into<String>) -> Self {
        Self::element("div").with_id(id)
    }

    /// Creates a handle-relevant form control.
    pub fn field(id: impl Into<String>, field: Field) -> Self {
        let tag = match field {
            Field::Textarea { .. } => "textarea",
            Field::Select { .. } => "select",
            Field::Checkbox { .. } | Field::Input { .. } => "input",
        };
        let mut node = Self::element(tag).with_id(id);
        node.attributes
            .insert(HANDLE_INFO_ATTR.to_string(), String::new());
        node.field = Some(field);
        node
    }

    /// Shorthand for a handle-relevant text input.
    pub fn text_input(id: impl Into<String>, value: impl Into<String>) -> Self {
        Self::field(
            id,
            Field::Input {
                value: value.into(),
            },
        )
    }

    /// Shorthand for a handle-relevant checkbox.
    pub fn checkbox(id: impl Into<String>, checked: bool) -> Self {
        Self::field(id, Field::Checkbox { checked })
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_child(mut self, child: Node) -> Self {
        self.children.push(child);
        self
    }

    pub fn with_children(mut self, children: impl IntoIterator<Item = Node>) -> Self {
        self.children.extend(children);
        self
    }

    pub fn has_id(&self, id: &str) -> bool {
        self.id.as_deref() == Some(id)
    }

    pub fn has_attribute(&self, name: &str) -> bool {
        self.attributes.contains_key(name)
    }

    pub fn is_tag(&self, tag: &str) -> bool {
        self.tag.eq_ignore_ascii_case(tag)
    }

    /// Depth-first search over strict descendants, in document order.
    pub fn find_descendant(&self, id: &str) -> Option<&Node> {
        self.children.iter().find_map(|child| {
            if child.has_id(id) {
                Some(child)
            } else {
                child.find_descendant(id)
            }
        })
    }

    /// Like [`Node::find_descendant`] but also matches `self`.
    pub fn find(&self, id: &str) -> Option<&Node> {
        if self.has_id(id) {
            Some(self)
        } else {
            self.find_descendant(id)
        }
    }
}
