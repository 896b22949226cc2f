//! Field extraction from form-bearing containers.

use super::node::{Field, Node, GENERAL_OPTIONS_ID};
use serde::{Deserialize, Serialize};

/// Value read from a single form control.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OptionValue {
    Flag(bool),
    Text(String),
}

impl OptionValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            OptionValue::Text(text) => Some(text),
            OptionValue::Flag(_) => None,
        }
    }

    pub fn is_set(&self) -> bool {
        match self {
            OptionValue::Flag(flag) => *flag,
            OptionValue::Text(text) => {
                text.eq_ignore_ascii_case("true") || text.eq_ignore_ascii_case("on")
            }
        }
    }
}

impl From<&Field> for OptionValue {
    fn from(field: &Field) -> Self {
        match field {
            Field::Checkbox { checked } => OptionValue::Flag(*checked),
            Field::Textarea { text } => OptionValue::Text(text.clone()),
            Field::Select { options, selected } => {
                // Browsers select the first option when nothing is chosen.
                let index = selected.unwrap_or(0);
                let value = options
                    .get(index)
                    .map(|option| option.value.clone())
                    .unwrap_or_default();
                OptionValue::Text(value)
            }
            Field::Input { value } => OptionValue::Text(value.clone()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptionEntry {
    pub id: String,
    pub value: OptionValue,
}

/// Ordered option entries, looked up by key.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OptionSet {
    entries: Vec<OptionEntry>,
}

impl OptionSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, id: impl Into<String>, value: OptionValue) {
        self.entries.push(OptionEntry {
            id: id.into(),
            value,
        });
    }

    pub fn extend(&mut self, other: OptionSet) {
        self.entries.extend(other.entries);
    }

    /// First entry with the given id.
    pub fn get(&self, id: &str) -> Option<&OptionValue> {
        self.entries
            .iter()
            .find(|entry| entry.id == id)
            .map(|entry| &entry.value)
    }

    pub fn text(&self, id: &str) -> Option<&str> {
        self.get(id).and_then(OptionValue::as_text)
    }

    pub fn flag(&self, id: &str) -> bool {
        self.get(id).is_some_and(OptionValue::is_set)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &OptionEntry> {
        self.entries.iter()
    }
}

/// Collects every descendant of `container` carrying `marker_attr`.
///
/// Nested general-options containers are not entered, so block extraction
/// never picks up site-wide fields. The container itself is always scanned,
/// which is how the general options are read.
pub fn extract_options(container: &Node, marker_attr: &str) -> OptionSet {
    let mut options = OptionSet::new();
    for child in &container.children {
        collect(child, marker_attr, &mut options);
    }
    options
}

fn collect(node: &Node, marker_attr: &str, options: &mut OptionSet) {
    if node.has_id(GENERAL_OPTIONS_ID) {
        return;
    }

    if node.has_attribute(marker_attr) {
        if let (Some(id), Some(field)) = (node.id.as_deref(), node.field.as_ref()) {
            options.push(id, OptionValue::from(field));
        }
    }

    for child in &node.children {
        collect(child, marker_attr, options);
    }
}
