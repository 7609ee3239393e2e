//! Translation document input definitions

use serde_json::Value;

use crate::error::Error;
use crate::types::{
    GenerationMeta,
    LanguageCode,
    Origin,
    Tree,
    TranslationValue,
    tree_to_map,
};

/// Reserved top-level key holding generation metadata.
pub const GENERATOR_KEY: &str = "generator";

/// One ingested document: a language, its translations, and where it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRecord {
    pub code: LanguageCode,
    pub body: Tree,
    pub origin: Origin,
    pub generation: Option<GenerationMeta>,
}

impl RawRecord {
    /// Parse YAML text (JSON text is valid YAML too) and then the document in it.
    ///
    /// # Errors
    /// `Error::Yaml` for malformed text, otherwise as [`RawRecord::parse`].
    pub fn parse_text(text: &str, origin: Origin) -> Result<Self, Error> {
        let document: Value = match serde_yaml::from_str(text) {
            Ok(document) => document,
            Err(source) => return Err(Error::Yaml { origin, source }),
        };
        Self::parse(document, origin)
    }

    /// Parse a document of the shape `{ <code>: { ... }, generator?: { id, ignore? } }`.
    ///
    /// # Errors
    /// Returns `Error::InvalidDocument` when
    /// - the document is not an object
    /// - there is not exactly one language key besides `generator`
    /// - the language value is not an object
    /// - `generator` is present but malformed
    pub fn parse(document: Value, origin: Origin) -> Result<Self, Error> {
        let Value::Object(mut map) = document else {
            return Err(Error::invalid_document(&origin, "document must be an object"));
        };

        let generation = match map.remove(GENERATOR_KEY) {
            Some(meta) => Some(parse_generation_meta(meta, &origin)?),
            None => None,
        };

        let mut entries = map.into_iter();
        let (code, body) = match (entries.next(), entries.next()) {
            (Some(entry), None) => entry,
            (None, _) => {
                return Err(Error::invalid_document(&origin, "no language key found"));
            }
            (Some((first, _)), Some((second, _))) => {
                return Err(Error::invalid_document(
                    &origin,
                    format!("expected a single language key, found '{first}' and '{second}'"),
                ));
            }
        };

        let TranslationValue::Tree(body) = TranslationValue::from(body) else {
            return Err(Error::invalid_document(
                &origin,
                format!("translations for '{code}' must be an object"),
            ));
        };

        Ok(Self { code, body, origin, generation })
    }

    /// Re-emit the record in the same shape it was parsed from.
    #[must_use]
    pub fn to_document(&self) -> Value {
        document_value(&self.code, &self.body, self.generation.as_ref())
    }
}

/// Build `{ <code>: body, generator?: meta }`.
#[must_use]
pub fn document_value(code: &str, body: &Tree, generation: Option<&GenerationMeta>) -> Value {
    let mut map = serde_json::Map::new();
    map.insert(code.to_string(), Value::Object(tree_to_map(body)));
    if let Some(meta) = generation {
        map.insert(
            GENERATOR_KEY.to_string(),
            serde_json::json!({ "id": meta.id.as_str(), "ignore": meta.ignore }),
        );
    }
    Value::Object(map)
}

/// Numeric ids are accepted and kept as their textual form.
fn parse_generation_meta(meta: Value, origin: &Origin) -> Result<GenerationMeta, Error> {
    let Value::Object(mut fields) = meta else {
        return Err(Error::invalid_document(origin, "'generator' must be an object"));
    };

    if let Some(Value::Number(id)) = fields.get("id") {
        let id = Value::String(id.to_string());
        fields.insert("id".to_string(), id);
    }

    serde_json::from_value(Value::Object(fields))
        .map_err(|e| Error::invalid_document(origin, format!("invalid 'generator': {e}")))
}
