//! Content supplied for a slide, keyed by placeholder name.

use crate::error::Result;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

/// A value bound to one placeholder.
///
/// Strings carry text, an image path, a table file path or JSON-encoded
/// rows, depending on the placeholder kind. Structured rows only make sense
/// for tables.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ContentValue {
    Text(String),
    Rows(Vec<Vec<Cell>>),
}

/// A scalar table cell as it may appear in JSON content.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Cell {
    Text(String),
    Number(serde_json::Number),
    Bool(bool),
    Null(()),
}

impl Cell {
    /// Cell text. `null` becomes the empty string.
    pub fn into_text(self) -> String {
        match self {
            Self::Text(s) => s,
            Self::Number(n) => n.to_string(),
            Self::Bool(b) => b.to_string(),
            Self::Null(()) => String::new(),
        }
    }
}

impl From<&str> for Cell {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for Cell {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl ContentValue {
    /// The string form, if this value is one.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            Self::Rows(_) => None,
        }
    }
}

impl From<&str> for ContentValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for ContentValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl<C: Into<Cell>> From<Vec<Vec<C>>> for ContentValue {
    fn from(rows: Vec<Vec<C>>) -> Self {
        Self::Rows(
            rows.into_iter()
                .map(|row| row.into_iter().map(Into::into).collect())
                .collect(),
        )
    }
}

/// Placeholder name to content value.
///
/// Entries whose name matches no placeholder are ignored when a slide is
/// assembled.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct ContentMap {
    values: HashMap<String, ContentValue>,
}

impl ContentMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a value to a placeholder, replacing any previous one.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<ContentValue>) {
        self.values.insert(name.into(), value.into());
    }

    /// Builder form of [`ContentMap::insert`].
    pub fn with(mut self, name: impl Into<String>, value: impl Into<ContentValue>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn get(&self, name: &str) -> Option<&ContentValue> {
        self.values.get(name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn from_json_str(s: &str) -> Result<Self> {
        Ok(serde_json::from_str(s)?)
    }

    /// Load content from a JSON object file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }
}

impl<K: Into<String>, V: Into<ContentValue>> FromIterator<(K, V)> for ContentMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (name, value) in iter {
            map.insert(name, value);
        }
        map
    }
}
