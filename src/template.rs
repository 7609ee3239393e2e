//! Placeholder substitution in resolved translation values.

use std::borrow::Borrow;
use std::collections::{
    BTreeMap,
    HashMap,
};
use std::fmt::Display;
use std::hash::{
    BuildHasher,
    Hash,
};
use std::sync::LazyLock;

use regex::{
    Captures,
    Regex,
};
use serde_json::Value;

use crate::error::Error;
use crate::types::TranslationValue;

/// Name of the capture group holding the placeholder name.
pub const PLACEHOLDER_GROUP: &str = "placeholder";

/// Matches `%{name}` tokens.
pub const DEFAULT_PLACEHOLDER_PATTERN: &str = r"%\{(?P<placeholder>.*?)\}";

static DEFAULT_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::expect_used)]
    Regex::new(DEFAULT_PLACEHOLDER_PATTERN).expect("default placeholder pattern is valid")
});

/// Values available for placeholder substitution, looked up by name.
pub trait Substitutions {
    fn lookup(&self, name: &str) -> Option<String>;
}

impl<K, V, S> Substitutions for HashMap<K, V, S>
where
    K: Borrow<str> + Eq + Hash,
    V: Display,
    S: BuildHasher,
{
    fn lookup(&self, name: &str) -> Option<String> {
        self.get(name).map(ToString::to_string)
    }
}

impl<K, V> Substitutions for BTreeMap<K, V>
where
    K: Borrow<str> + Ord,
    V: Display,
{
    fn lookup(&self, name: &str) -> Option<String> {
        self.get(name).map(ToString::to_string)
    }
}

impl<K, V> Substitutions for [(K, V)]
where
    K: AsRef<str>,
    V: Display,
{
    fn lookup(&self, name: &str) -> Option<String> {
        self.iter().find(|(key, _)| key.as_ref() == name).map(|(_, value)| value.to_string())
    }
}

impl<K, V, const N: usize> Substitutions for [(K, V); N]
where
    K: AsRef<str>,
    V: Display,
{
    fn lookup(&self, name: &str) -> Option<String> {
        self.as_slice().lookup(name)
    }
}

/// Strings are inserted without their JSON quotes; `null` counts as no value.
impl Substitutions for serde_json::Map<String, Value> {
    fn lookup(&self, name: &str) -> Option<String> {
        match self.get(name)? {
            Value::Null => None,
            Value::String(text) => Some(text.clone()),
            other => Some(other.to_string()),
        }
    }
}

impl<T: Substitutions + ?Sized> Substitutions for &T {
    fn lookup(&self, name: &str) -> Option<String> {
        (**self).lookup(name)
    }
}

/// Replaces placeholder tokens in scalar and list values.
#[derive(Debug, Clone)]
pub struct Templater {
    /// Token pattern; always has a `placeholder` capture group
    pattern: Regex,
}

impl Default for Templater {
    fn default() -> Self {
        Self { pattern: DEFAULT_PATTERN.clone() }
    }
}

impl Templater {
    /// # Errors
    /// - `Error::InvalidPattern` if `pattern` does not compile
    /// - `Error::MissingPlaceholderGroup` if it has no `placeholder` group
    pub fn new(pattern: &str) -> Result<Self, Error> {
        Self::with_regex(Regex::new(pattern)?)
    }

    /// # Errors
    /// `Error::MissingPlaceholderGroup` if `pattern` has no `placeholder` group.
    pub fn with_regex(pattern: Regex) -> Result<Self, Error> {
        check_placeholder_group(&pattern)?;
        Ok(Self { pattern })
    }

    #[must_use]
    pub const fn pattern(&self) -> &Regex {
        &self.pattern
    }

    /// Replace the token pattern. The old one is kept on error.
    ///
    /// # Errors
    /// Same as [`Templater::new`].
    pub fn set_pattern(&mut self, pattern: &str) -> Result<(), Error> {
        self.set_regex(Regex::new(pattern)?)
    }

    /// # Errors
    /// `Error::MissingPlaceholderGroup` if `pattern` has no `placeholder` group.
    pub fn set_regex(&mut self, pattern: Regex) -> Result<(), Error> {
        check_placeholder_group(&pattern)?;
        tracing::debug!(pattern = pattern.as_str(), "Placeholder pattern changed");
        self.pattern = pattern;
        Ok(())
    }

    /// Substitute every token in `text` whose name has a value.
    ///
    /// Tokens without a value are left as they are.
    #[must_use]
    pub fn substitute<S>(&self, text: &str, substitutions: &S) -> String
    where
        S: Substitutions + ?Sized,
    {
        self.pattern
            .replace_all(text, |caps: &Captures<'_>| {
                caps.name(PLACEHOLDER_GROUP)
                    .and_then(|name| substitutions.lookup(name.as_str()))
                    .unwrap_or_else(|| {
                        caps.get(0).map_or_else(String::new, |token| token.as_str().to_string())
                    })
            })
            .into_owned()
    }

    /// Apply substitutions to a resolved value.
    ///
    /// Scalars are substituted, lists have each scalar element substituted,
    /// and trees (including trees or lists nested in a list) pass through.
    #[must_use]
    pub fn apply<S>(&self, value: &TranslationValue, substitutions: &S) -> TranslationValue
    where
        S: Substitutions + ?Sized,
    {
        match value {
            TranslationValue::Scalar(text) => {
                TranslationValue::Scalar(self.substitute(text, substitutions))
            }
            TranslationValue::List(items) => TranslationValue::List(
                items
                    .iter()
                    .map(|item| match item {
                        TranslationValue::Scalar(text) => {
                            TranslationValue::Scalar(self.substitute(text, substitutions))
                        }
                        other => other.clone(),
                    })
                    .collect(),
            ),
            TranslationValue::Tree(_) => value.clone(),
        }
    }
}

fn check_placeholder_group(pattern: &Regex) -> Result<(), Error> {
    if pattern.capture_names().flatten().any(|name| name == PLACEHOLDER_GROUP) {
        Ok(())
    } else {
        Err(Error::MissingPlaceholderGroup { pattern: pattern.as_str().to_string() })
    }
}
