use regex::Regex;
use serde::{
    Deserialize,
    Serialize,
};
use thiserror::Error;

use crate::template::{
    DEFAULT_PLACEHOLDER_PATTERN,
    PLACEHOLDER_GROUP,
};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Configuration error in '{field_path}': {message}")]
pub struct ValidationError {
    /// JSON path to the field (e.g., "translationFiles.filePattern")
    pub field_path: String,
    pub message: String,
}

impl ValidationError {
    #[must_use]
    pub fn new(field_path: impl Into<String>, message: impl Into<String>) -> Self {
        Self { field_path: field_path.into(), message: message.into() }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration validation failed:\n{}", format_validation_errors(.0))]
    ValidationErrors(Vec<ValidationError>),

    #[error("Failed to load configuration file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse configuration: {0}")]
    ParseError(#[from] serde_json::Error),
}

fn format_validation_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .enumerate()
        .map(|(i, err)| format!("  {}. {} - {}", i + 1, err.field_path, err.message))
        .collect::<Vec<_>>()
        .join("\n")
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StoreSettings {
    /// Language consulted once when a lookup misses.
    /// Also the generation baseline when `generation.baseline` is unset.
    pub fallback_language: Option<String>,

    /// Regular expression matching placeholder tokens.
    /// Must contain a capture group named `placeholder`.
    pub placeholder_pattern: String,

    pub translation_files: TranslationFilesConfig,

    pub generation: GenerationConfig,
}

/// Translation files picked up when no pattern is configured.
pub const DEFAULT_FILE_PATTERN: &str = "**/*.{json,yml,yaml}";

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TranslationFilesConfig {
    /// Glob relative to the translation directory.
    /// `.yml` and `.yaml` files are read as YAML, everything else as JSON.
    pub file_pattern: String,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GenerationConfig {
    /// Baseline language for missing-key generation.
    /// Falls back to `fallbackLanguage` when unset.
    pub baseline: Option<String>,
}

impl StoreSettings {
    /// # Errors
    /// - Language code is empty
    /// - Invalid placeholder pattern or missing `placeholder` group
    /// - Invalid glob pattern
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if let Some(code) = &self.fallback_language
            && code.is_empty()
        {
            errors.push(ValidationError::new(
                "fallbackLanguage",
                "The language code cannot be empty. Please specify a code (e.g., \"en\"), or remove this field",
            ));
        }

        match Regex::new(&self.placeholder_pattern) {
            Ok(regex) => {
                if !regex.capture_names().flatten().any(|name| name == PLACEHOLDER_GROUP) {
                    errors.push(ValidationError::new(
                        "placeholderPattern",
                        format!(
                            "The pattern '{}' needs a capture group named '{PLACEHOLDER_GROUP}'. Example: \"%\\{{(?P<placeholder>.*?)\\}}\"",
                            self.placeholder_pattern
                        ),
                    ));
                }
            }
            Err(e) => {
                errors.push(ValidationError::new(
                    "placeholderPattern",
                    format!("Invalid regular expression '{}': {e}", self.placeholder_pattern),
                ));
            }
        }

        if self.translation_files.file_pattern.is_empty() {
            errors.push(ValidationError::new(
                "translationFiles.filePattern",
                "The pattern cannot be empty. Example: \"**/*.{json,yml}\"",
            ));
        } else if let Err(e) = globset::Glob::new(&self.translation_files.file_pattern) {
            errors.push(ValidationError::new(
                "translationFiles.filePattern",
                format!("Invalid glob pattern '{}': {e}", self.translation_files.file_pattern),
            ));
        }

        if let Some(code) = &self.generation.baseline
            && code.is_empty()
        {
            errors.push(ValidationError::new(
                "generation.baseline",
                "The language code cannot be empty. Please specify a code (e.g., \"en\"), or remove this field",
            ));
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

impl Default for TranslationFilesConfig {
    fn default() -> Self {
        Self { file_pattern: DEFAULT_FILE_PATTERN.to_string() }
    }
}

impl Default for StoreSettings {
    fn default() -> Self {
        Self {
            fallback_language: None,
            placeholder_pattern: DEFAULT_PLACEHOLDER_PATTERN.to_string(),
            translation_files: TranslationFilesConfig::default(),
            generation: GenerationConfig::default(),
        }
    }
}
