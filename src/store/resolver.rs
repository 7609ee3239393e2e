//! Key path resolution with single-hop language fallback.

use super::Store;
use crate::types::TranslationValue;

/// Delimiters accepted between key path segments. No escaping.
pub const KEY_DELIMITERS: [char; 2] = [':', '.'];

/// Split a key path like `menu.items` or `errors:notFound` into segments.
pub fn split_key_path(key_path: &str) -> impl Iterator<Item = &str> {
    key_path.split(KEY_DELIMITERS)
}

impl Store {
    /// Walk `key_path` through the merged tree of `code`.
    ///
    /// On a miss (unknown language or missing segment) the lookup is retried
    /// once with `fallback`, unless it equals `code`. There is no further
    /// chaining.
    #[must_use]
    pub fn resolve(
        &self,
        code: &str,
        key_path: &str,
        fallback: Option<&str>,
    ) -> Option<&TranslationValue> {
        if let Some(value) = self.lookup(code, key_path) {
            return Some(value);
        }

        let fallback = fallback.filter(|fallback| *fallback != code)?;
        let value = self.lookup(fallback, key_path);
        if value.is_some() {
            tracing::debug!(code, fallback, key_path, "Resolved key via fallback language");
        } else {
            tracing::trace!(code, fallback, key_path, "Key not found in fallback language");
        }
        value
    }

    /// Single-language walk. No partial results.
    fn lookup(&self, code: &str, key_path: &str) -> Option<&TranslationValue> {
        let Some(tree) = self.tree(code) else {
            tracing::trace!(code, "Unknown language");
            return None;
        };

        let mut segments = split_key_path(key_path);
        let first = segments.next()?;
        let mut current = tree.get(first)?;
        for segment in segments {
            current = current.as_tree()?.get(segment)?;
        }
        Some(current)
    }
}
