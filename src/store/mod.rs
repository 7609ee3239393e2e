//! Per-language translation store.
//!
//! Every ingested document is deep-merged into the tree of its language and
//! kept, unmodified, in an ordered log for missing-key generation.

pub mod merge;
pub mod resolver;

use std::collections::{
    BTreeSet,
    HashMap,
};

use crate::input::RawRecord;
use crate::types::{
    GenerationMeta,
    LanguageCode,
    Origin,
    Tree,
};

pub use merge::{
    deep_merge,
    skeleton,
};
pub use resolver::split_key_path;

/// Accumulates translation documents per language.
///
/// Single writer. Nothing is ever removed.
#[derive(Debug, Default, Clone)]
pub struct Store {
    /// Every language code ever ingested
    known: BTreeSet<LanguageCode>,
    /// Merged translations per language
    merged: HashMap<LanguageCode, Tree>,
    /// Raw records in arrival order
    log: Vec<RawRecord>,
}

impl Store {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge `body` into the tree of `code` and record it.
    pub fn ingest(
        &mut self,
        code: impl Into<LanguageCode>,
        body: Tree,
        origin: Origin,
        generation: Option<GenerationMeta>,
    ) {
        self.ingest_record(RawRecord { code: code.into(), body, origin, generation });
    }

    /// Merge a parsed record into the tree of its language and record it.
    pub fn ingest_record(&mut self, record: RawRecord) {
        tracing::debug!(
            code = %record.code,
            origin = %record.origin,
            keys = record.body.len(),
            "Ingesting translation document"
        );

        self.known.insert(record.code.clone());
        deep_merge(self.merged.entry(record.code.clone()).or_default(), record.body.clone());
        self.log.push(record);
    }

    /// Languages seen so far, sorted.
    pub fn known_languages(&self) -> impl Iterator<Item = &str> {
        self.known.iter().map(String::as_str)
    }

    #[must_use]
    pub fn is_known(&self, code: &str) -> bool {
        self.known.contains(code)
    }

    /// Merged translations of `code`.
    #[must_use]
    pub fn tree(&self, code: &str) -> Option<&Tree> {
        self.merged.get(code)
    }

    /// Raw records in arrival order.
    #[must_use]
    pub fn records(&self) -> &[RawRecord] {
        &self.log
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use googletest::prelude::*;
    use rstest::rstest;
    use serde_json::json;

    use super::*;
    use crate::test_utils::{
        ingest_json,
        tree,
    };
    use crate::types::TranslationValue;

    #[rstest]
    fn test_new_store_is_empty() {
        let store = Store::new();

        assert_that!(store.known_languages().count(), eq(0));
        assert_that!(store.records().len(), eq(0));
        assert_that!(store.tree("en"), none());
    }

    #[rstest]
    fn test_ingest_tracks_languages_and_log() {
        let mut store = Store::new();

        ingest_json(&mut store, json!({ "en": { "a": "1" } }));
        ingest_json(&mut store, json!({ "ja": { "a": "2" } }));
        ingest_json(&mut store, json!({ "en": { "b": "3" } }));

        assert_that!(store.known_languages().collect::<Vec<_>>(), eq(&vec!["en", "ja"]));
        assert_that!(store.is_known("en"), eq(true));
        assert_that!(store.is_known("EN"), eq(false));
        assert_that!(
            store.records().iter().map(|r| r.code.as_str()).collect::<Vec<_>>(),
            eq(&vec!["en", "ja", "en"])
        );
    }

    #[rstest]
    fn test_ingest_merges_in_arrival_order() {
        let mut store = Store::new();

        ingest_json(&mut store, json!({ "en": { "a": { "x": "1" } } }));
        ingest_json(&mut store, json!({ "en": { "a": { "y": "2" } } }));
        ingest_json(&mut store, json!({ "en": { "a": { "x": "3" } } }));

        assert_that!(store.tree("en"), some(eq(&tree(json!({ "a": { "x": "3", "y": "2" } })))));
    }

    #[rstest]
    fn test_ingest_keeps_raw_bodies() {
        let mut store = Store::new();

        ingest_json(&mut store, json!({ "en": { "a": "1" } }));
        ingest_json(&mut store, json!({ "en": { "a": "2" } }));

        let first = store.records().first().unwrap();
        assert_that!(first.body.get("a"), some(eq(&TranslationValue::from("1"))));
    }

    #[rstest]
    fn test_ingest_with_explicit_parts() {
        let mut store = Store::new();

        store.ingest(
            "en",
            tree(json!({ "hello": "Hello" })),
            Origin::from("en.json"),
            Some(GenerationMeta::new("common")),
        );

        let record = store.records().first().unwrap();
        assert_that!(record.origin.as_str(), eq("en.json"));
        assert_that!(record.generation.as_ref().map(|g| g.id.as_str()), some(eq("common")));
        assert_that!(store.resolve("en", "hello", None), some(eq(&TranslationValue::from("Hello"))));
    }

    #[rstest]
    fn test_known_includes_languages_with_empty_documents() {
        let mut store = Store::new();

        ingest_json(&mut store, json!({ "owo": {} }));

        assert_that!(store.is_known("owo"), eq(true));
        assert_that!(store.tree("owo").map(Tree::len), some(eq(0)));
    }
}
