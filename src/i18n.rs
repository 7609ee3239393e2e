//! Public entry point: a store, a templater, and an optional fallback language.

use regex::Regex;
use serde_json::Value;

use crate::config::StoreSettings;
use crate::error::Error;
use crate::generator::{
    self,
    Persist,
};
use crate::input::RawRecord;
use crate::store::Store;
use crate::template::{
    Substitutions,
    Templater,
};
use crate::types::{
    LanguageCode,
    Origin,
    TranslationValue,
};

/// Translation lookup, rendering and generation over one [`Store`].
#[derive(Debug, Default, Clone)]
pub struct I18n {
    store: Store,
    templater: Templater,
    /// Consulted once when a lookup misses
    fallback: Option<LanguageCode>,
    /// Default generation baseline, ahead of `fallback`
    baseline: Option<LanguageCode>,
}

impl I18n {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_fallback(fallback: impl Into<LanguageCode>) -> Self {
        Self { fallback: Some(fallback.into()), ..Self::default() }
    }

    /// Build from validated settings.
    ///
    /// # Errors
    /// Returns an error if the placeholder pattern is unusable.
    pub fn from_settings(settings: &StoreSettings) -> Result<Self, Error> {
        Ok(Self {
            store: Store::new(),
            templater: Templater::new(&settings.placeholder_pattern)?,
            fallback: settings.fallback_language.clone(),
            baseline: settings.generation.baseline.clone(),
        })
    }

    /// Parse a document and merge it into the store.
    ///
    /// # Errors
    /// `Error::InvalidDocument` if the document has no usable language key.
    pub fn ingest(&mut self, document: Value, origin: impl Into<Origin>) -> Result<&mut Self, Error> {
        let record = RawRecord::parse(document, origin.into())?;
        self.store.ingest_record(record);
        Ok(self)
    }

    /// Parse YAML or JSON text and merge the document in it into the store.
    ///
    /// # Errors
    /// - `Error::Yaml` if the text does not parse
    /// - `Error::InvalidDocument` if the document has no usable language key
    pub fn ingest_str(&mut self, text: &str, origin: impl Into<Origin>) -> Result<&mut Self, Error> {
        let record = RawRecord::parse_text(text, origin.into())?;
        self.store.ingest_record(record);
        Ok(self)
    }

    /// Resolve `key_path` in `code`, retrying once with the fallback language.
    #[must_use]
    pub fn resolve(&self, code: &str, key_path: &str) -> Option<&TranslationValue> {
        self.store.resolve(code, key_path, self.fallback.as_deref())
    }

    /// Like [`I18n::resolve`], but a miss yields `key_path` itself.
    #[must_use]
    pub fn get(&self, code: &str, key_path: &str) -> TranslationValue {
        self.resolve(code, key_path)
            .cloned()
            .unwrap_or_else(|| TranslationValue::Scalar(key_path.to_string()))
    }

    /// Resolve and substitute placeholders.
    ///
    /// A miss yields `key_path` itself, unsubstituted.
    #[must_use]
    pub fn render<S>(&self, code: &str, key_path: &str, substitutions: &S) -> TranslationValue
    where
        S: Substitutions + ?Sized,
    {
        self.resolve(code, key_path).map_or_else(
            || TranslationValue::Scalar(key_path.to_string()),
            |value| self.templater.apply(value, substitutions),
        )
    }

    /// Fill missing keys of every language grouped with `baseline`.
    ///
    /// Without `baseline` the configured one is used, see [`I18n::generation_baseline`].
    ///
    /// # Errors
    /// - `Error::MissingBaseline` if no baseline is available
    /// - `Error::Persist` if `sink` fails
    pub fn generate<P>(&self, baseline: Option<&str>, sink: &mut P) -> Result<usize, Error>
    where
        P: Persist + ?Sized,
    {
        let baseline = baseline.or(self.generation_baseline()).ok_or(Error::MissingBaseline)?;
        generator::generate(&self.store, baseline, sink)
    }

    #[must_use]
    pub const fn placeholder_pattern(&self) -> &Regex {
        self.templater.pattern()
    }

    /// # Errors
    /// See [`Templater::set_pattern`].
    pub fn set_placeholder_pattern(&mut self, pattern: &str) -> Result<(), Error> {
        self.templater.set_pattern(pattern)
    }

    #[must_use]
    pub fn fallback(&self) -> Option<&str> {
        self.fallback.as_deref()
    }

    pub fn set_fallback(&mut self, fallback: Option<LanguageCode>) {
        self.fallback = fallback;
    }

    /// The configured generation baseline, or the fallback language.
    #[must_use]
    pub fn generation_baseline(&self) -> Option<&str> {
        self.baseline.as_deref().or(self.fallback.as_deref())
    }

    pub fn set_generation_baseline(&mut self, baseline: Option<LanguageCode>) {
        self.baseline = baseline;
    }

    #[must_use]
    pub const fn store(&self) -> &Store {
        &self.store
    }
}
