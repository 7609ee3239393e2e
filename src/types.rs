//! Core types used throughout the project.

use std::collections::BTreeMap;
use std::fmt;
use std::path::{
    Path,
    PathBuf,
};

use serde::{
    Deserialize,
    Serialize,
};
use serde_json::Value;

/// Language identifier such as `en` or `en-US`. Compared by exact match.
pub type LanguageCode = String;

/// Mapping of translation keys to values. One per language at the root.
pub type Tree = BTreeMap<String, TranslationValue>;

/// A translation value: a string, a list, or a nested tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TranslationValue {
    Scalar(String),
    List(Vec<TranslationValue>),
    Tree(Tree),
}

impl TranslationValue {
    /// Returns the text if this is a `Scalar`.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Scalar(text) => Some(text),
            Self::List(_) | Self::Tree(_) => None,
        }
    }

    #[must_use]
    pub const fn as_tree(&self) -> Option<&Tree> {
        match self {
            Self::Tree(tree) => Some(tree),
            Self::Scalar(_) | Self::List(_) => None,
        }
    }

    #[must_use]
    pub fn as_list(&self) -> Option<&[Self]> {
        match self {
            Self::List(items) => Some(items),
            Self::Scalar(_) | Self::Tree(_) => None,
        }
    }
}

/// Numbers and booleans keep their textual form; `null` becomes an empty string.
impl From<Value> for TranslationValue {
    fn from(value: Value) -> Self {
        match value {
            Value::String(text) => Self::Scalar(text),
            Value::Null => Self::Scalar(String::new()),
            Value::Bool(_) | Value::Number(_) => Self::Scalar(value.to_string()),
            Value::Array(items) => Self::List(items.into_iter().map(Self::from).collect()),
            Value::Object(map) => {
                Self::Tree(map.into_iter().map(|(key, value)| (key, Self::from(value))).collect())
            }
        }
    }
}

impl From<&TranslationValue> for Value {
    fn from(value: &TranslationValue) -> Self {
        match value {
            TranslationValue::Scalar(text) => Self::String(text.clone()),
            TranslationValue::List(items) => Self::Array(items.iter().map(Self::from).collect()),
            TranslationValue::Tree(tree) => Self::Object(tree_to_map(tree)),
        }
    }
}

impl From<&str> for TranslationValue {
    fn from(text: &str) -> Self {
        Self::Scalar(text.to_string())
    }
}

impl From<String> for TranslationValue {
    fn from(text: String) -> Self {
        Self::Scalar(text)
    }
}

impl PartialEq<str> for TranslationValue {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == Some(other)
    }
}

impl PartialEq<&str> for TranslationValue {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == Some(*other)
    }
}

/// Converts a tree into a JSON object.
#[must_use]
pub fn tree_to_map(tree: &Tree) -> serde_json::Map<String, Value> {
    tree.iter().map(|(key, value)| (key.clone(), Value::from(value))).collect()
}

/// Handle identifying where a document came from.
///
/// Only the persistence side interprets it; the store just carries it along.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Origin(String);

impl Origin {
    #[must_use]
    pub fn new(origin: impl Into<String>) -> Self {
        Self(origin.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn to_path_buf(&self) -> PathBuf {
        PathBuf::from(&self.0)
    }
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Origin {
    fn from(origin: &str) -> Self {
        Self(origin.to_string())
    }
}

impl From<String> for Origin {
    fn from(origin: String) -> Self {
        Self(origin)
    }
}

impl From<&Path> for Origin {
    fn from(path: &Path) -> Self {
        Self(path.to_string_lossy().to_string())
    }
}

/// Identifier shared by documents of one generation group.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GroupId(String);

impl GroupId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for GroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Contents of the reserved `generator` key of a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationMeta {
    pub id: GroupId,
    #[serde(default)]
    pub ignore: bool,
}

impl GenerationMeta {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: GroupId::new(id), ignore: false }
    }

    #[must_use]
    pub const fn ignored(mut self) -> Self {
        self.ignore = true;
        self
    }
}
