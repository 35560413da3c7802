//! Option types: the `SelectItem` trait and the stock `SelectOption`.

use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use std::hash::Hash;

/// Anything that can be listed in a select widget.
///
/// The key identifies the option and must be unique within one list; the
/// label is what the user reads.
pub trait SelectItem {
    type Key: Clone + Eq + Hash + Debug;

    fn key(&self) -> &Self::Key;

    fn label(&self) -> &str;

    /// Optional second line shown next to the label.
    fn description(&self) -> Option<&str> {
        None
    }
}

/// A string-keyed option, as loaded from an options file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectOption {
    pub value: String,
    /// Defaults to `value` when omitted in the file.
    #[serde(default)]
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl SelectOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Parse a `value=label` pair. A bare `value` is its own label.
    pub fn parse_pair(pair: &str) -> Self {
        match pair.split_once('=') {
            Some((value, label)) => Self::new(value.trim(), label.trim()),
            None => Self::new(pair.trim(), pair.trim()),
        }
    }
}

impl SelectItem for SelectOption {
    type Key = String;

    fn key(&self) -> &String {
        &self.value
    }

    fn label(&self) -> &str {
        if self.label.is_empty() {
            &self.value
        } else {
            &self.label
        }
    }

    fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
}

/// Top-level shape of an options file:
///
/// ```toml
/// [[options]]
/// value = "red"
/// label = "Red"
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OptionsFile {
    #[serde(default)]
    pub options: Vec<SelectOption>,
}

impl OptionsFile {
    pub fn load(path: &std::path::Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let file: Self = toml::from_str(&content)?;
        Ok(file)
    }
}
