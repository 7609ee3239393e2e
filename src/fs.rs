//! Filesystem collaborators: loading translation files and writing generated ones.

use std::path::{
    Path,
    PathBuf,
};

use globset::GlobBuilder;
use ignore::WalkBuilder;
use serde_json::Value;

use crate::error::{
    Error,
    PersistError,
};
use crate::generator::Persist;
use crate::i18n::I18n;
use crate::types::Origin;

/// Whether `path` names a YAML document (`.yml` or `.yaml`).
fn is_yaml(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("yml") || ext.eq_ignore_ascii_case("yaml"))
}

/// Read a translation file and ingest it, using its path as origin.
///
/// `.yml`/`.yaml` files are parsed as YAML, anything else as JSON.
///
/// # Errors
/// Returns error if file read or parse fails, or the document is invalid.
pub fn load_file(i18n: &mut I18n, file_path: &Path) -> Result<(), Error> {
    let content = std::fs::read_to_string(file_path)
        .map_err(|source| Error::Io { path: file_path.to_path_buf(), source })?;

    if is_yaml(file_path) {
        i18n.ingest_str(&content, file_path)?;
    } else {
        let document: Value = serde_json::from_str(&content)
            .map_err(|source| Error::Json { path: file_path.to_path_buf(), source })?;
        i18n.ingest(document, file_path)?;
    }
    Ok(())
}

/// Ingest every file under `dir` matching `file_pattern`, sorted by path.
///
/// Returns the number of files ingested.
///
/// # Errors
/// - Invalid glob pattern
/// - The directory cannot be walked
/// - Any file fails to load (files before it stay ingested)
pub fn load_dir(i18n: &mut I18n, dir: &Path, file_pattern: &str) -> Result<usize, Error> {
    tracing::debug!(dir = %dir.display(), file_pattern, "Loading translation directory");

    let files = find_translation_files(dir, file_pattern)?;
    for file in &files {
        load_file(i18n, file)?;
    }

    tracing::debug!(dir = %dir.display(), count = files.len(), "Loaded translation files");
    Ok(files.len())
}

/// Translation files under `dir`, in file name order.
///
/// `*` does not cross directory boundaries; use `**` for that.
fn find_translation_files(dir: &Path, file_pattern: &str) -> Result<Vec<PathBuf>, Error> {
    let matcher = GlobBuilder::new(file_pattern)
        .literal_separator(true)
        .build()
        .map_err(|source| Error::InvalidFilePattern { pattern: file_pattern.to_string(), source })?
        .compile_matcher();

    let mut found_files = Vec::new();
    for result in WalkBuilder::new(dir)
        .hidden(true)
        .git_ignore(false)
        .git_global(false)
        .git_exclude(false)
        .follow_links(false)
        .sort_by_file_name(|a, b| a.cmp(b))
        .build()
    {
        let entry = result.map_err(|source| Error::Walk { dir: dir.to_path_buf(), source })?;

        if !entry.file_type().is_some_and(|ft| ft.is_file()) {
            continue;
        }

        let path = entry.path();
        let Ok(relative_path) = path.strip_prefix(dir) else {
            continue;
        };
        if !matcher.is_match(relative_path) {
            continue;
        }

        found_files.push(path.to_path_buf());
    }

    Ok(found_files)
}

/// Writes generated documents to their origin path.
///
/// YAML origins get YAML, everything else pretty-printed JSON.
#[derive(Debug, Default, Clone, Copy)]
pub struct FsPersist;

impl Persist for FsPersist {
    fn persist(&mut self, origin: &Origin, document: &Value) -> Result<(), PersistError> {
        let path = origin.to_path_buf();
        let content = if is_yaml(&path) {
            serde_yaml::to_string(document)?
        } else {
            let mut content = serde_json::to_string_pretty(document)?;
            content.push('\n');
            content
        };
        std::fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::fs;

    use googletest::prelude::*;
    use rstest::rstest;
    use serde_json::json;
    use tempfile::TempDir;

    use super::*;
    use crate::types::TranslationValue;

    fn write_json(dir: &Path, name: &str, value: &Value) -> PathBuf {
        let path = dir.join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, serde_json::to_string(value).unwrap()).unwrap();
        path
    }

    #[rstest]
    fn test_load_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = write_json(temp_dir.path(), "en.json", &json!({ "en": { "THING": "abcd" } }));
        let mut i18n = I18n::new();

        load_file(&mut i18n, &path).unwrap();

        assert_that!(i18n.get("en", "THING"), eq("abcd"));
        assert_that!(
            i18n.store().records().first().map(|r| r.origin.to_path_buf()),
            some(eq(&path))
        );
    }

    #[rstest]
    fn test_load_file_missing() {
        let temp_dir = TempDir::new().unwrap();
        let mut i18n = I18n::new();

        let result = load_file(&mut i18n, &temp_dir.path().join("nope.json"));

        assert!(matches!(result, Err(Error::Io { .. })));
    }

    #[rstest]
    fn test_load_file_invalid_json() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("en.json");
        fs::write(&path, "{ not json").unwrap();
        let mut i18n = I18n::new();

        let result = load_file(&mut i18n, &path);

        assert!(matches!(result, Err(Error::Json { .. })));
    }

    #[rstest]
    fn test_load_dir_is_sorted_and_filtered() {
        let temp_dir = TempDir::new().unwrap();
        write_json(temp_dir.path(), "b.json", &json!({ "en": { "k": "from b" } }));
        write_json(temp_dir.path(), "a.json", &json!({ "en": { "k": "from a", "only_a": "a" } }));
        write_json(temp_dir.path(), "nested/c.json", &json!({ "ja": { "k": "c" } }));
        fs::write(temp_dir.path().join("notes.txt"), "ignored").unwrap();
        let mut i18n = I18n::new();

        let count = load_dir(&mut i18n, temp_dir.path(), "**/*.json").unwrap();

        assert_that!(count, eq(3));
        assert_that!(i18n.get("en", "k"), eq("from b"));
        assert_that!(i18n.get("en", "only_a"), eq("a"));
        assert_that!(i18n.get("ja", "k"), eq("c"));
    }

    #[rstest]
    fn test_load_dir_top_level_pattern() {
        let temp_dir = TempDir::new().unwrap();
        write_json(temp_dir.path(), "en.json", &json!({ "en": { "k": "v" } }));
        write_json(temp_dir.path(), "nested/ja.json", &json!({ "ja": { "k": "v" } }));
        let mut i18n = I18n::new();

        let count = load_dir(&mut i18n, temp_dir.path(), "*.json").unwrap();

        assert_that!(count, eq(1));
        assert_that!(i18n.store().is_known("ja"), eq(false));
    }

    #[rstest]
    fn test_load_dir_stops_on_invalid_document() {
        let temp_dir = TempDir::new().unwrap();
        write_json(temp_dir.path(), "a.json", &json!({ "en": { "k": "v" } }));
        write_json(temp_dir.path(), "b.json", &json!({ "en": {}, "ja": {} }));
        let mut i18n = I18n::new();

        let result = load_dir(&mut i18n, temp_dir.path(), "*.json");

        assert!(matches!(result, Err(Error::InvalidDocument { .. })));
        assert_that!(i18n.store().records().len(), eq(1));
    }

    #[rstest]
    fn test_fs_persist_writes_pretty_json() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("ja.json");
        let document = json!({ "ja": { "a": "" } });

        FsPersist.persist(&Origin::from(path.as_path()), &document).unwrap();

        let written = fs::read_to_string(&path).unwrap();
        assert_that!(written, ends_with("\n"));
        let parsed: Value = serde_json::from_str(&written).unwrap();
        assert_that!(parsed, eq(&document));
    }

    #[rstest]
    fn test_generate_round_trip_through_files() {
        let temp_dir = TempDir::new().unwrap();
        write_json(
            temp_dir.path(),
            "en.json",
            &json!({ "generator": { "id": "app" }, "en": { "a": "A", "b": ["x", "y"] } }),
        );
        let ja_path = write_json(
            temp_dir.path(),
            "ja.json",
            &json!({ "generator": { "id": "app" }, "ja": { "a": "あ" } }),
        );
        let mut i18n = I18n::new();
        load_dir(&mut i18n, temp_dir.path(), "*.json").unwrap();

        let emitted = i18n.generate(Some("en"), &mut FsPersist).unwrap();

        assert_that!(emitted, eq(1));
        let mut reloaded = I18n::new();
        load_file(&mut reloaded, &ja_path).unwrap();
        assert_that!(reloaded.get("ja", "a"), eq("あ"));
        assert_that!(reloaded.get("ja", "b"), eq(&TranslationValue::from(json!(["", ""]))));
        assert_that!(
            reloaded.store().records().first().and_then(|r| r.generation.as_ref()).map(|g| g.ignore),
            some(eq(false))
        );
    }

    #[rstest]
    #[case::yml("en.yml")]
    #[case::yaml("en.yaml")]
    #[case::upper("en.YML")]
    fn test_load_file_yaml(#[case] name: &str) {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(name);
        fs::write(&path, "en:\n  menu:\n    open: Open\n  count: 3\n").unwrap();
        let mut i18n = I18n::new();

        load_file(&mut i18n, &path).unwrap();

        assert_that!(i18n.get("en", "menu.open"), eq("Open"));
        assert_that!(i18n.get("en", "count"), eq("3"));
    }

    #[rstest]
    fn test_load_file_invalid_yaml() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("en.yml");
        fs::write(&path, "en:\n  a: [b\n").unwrap();
        let mut i18n = I18n::new();

        let result = load_file(&mut i18n, &path);

        assert!(matches!(result, Err(Error::Yaml { .. })));
    }

    #[rstest]
    fn test_load_dir_mixed_formats() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("a.yml"), "en:\n  k: from yaml\n  y: Y\n").unwrap();
        write_json(temp_dir.path(), "b.json", &json!({ "en": { "k": "from json" } }));

        let mut yaml_only = I18n::new();
        let count = load_dir(&mut yaml_only, temp_dir.path(), "*.yml").unwrap();
        let mut i18n = I18n::new();
        let all = load_dir(&mut i18n, temp_dir.path(), "*.{json,yml}").unwrap();

        assert_that!(count, eq(1));
        assert_that!(all, eq(2));
        assert_that!(yaml_only.get("en", "k"), eq("from yaml"));
        assert_that!(i18n.get("en", "k"), eq("from json"));
        assert_that!(i18n.get("en", "y"), eq("Y"));
    }

    #[rstest]
    fn test_load_dir_missing_directory() {
        let temp_dir = TempDir::new().unwrap();
        let mut i18n = I18n::new();

        let result = load_dir(&mut i18n, &temp_dir.path().join("absent"), "**/*.json");

        assert!(matches!(result, Err(Error::Walk { .. })));
    }

    #[rstest]
    fn test_generate_round_trip_through_yaml_files() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(
            temp_dir.path().join("en.yml"),
            "generator:\n  id: app\nen:\n  a: A\n  menu:\n    open: Open\n",
        )
        .unwrap();
        let ja_path = temp_dir.path().join("ja.yml");
        fs::write(&ja_path, "generator:\n  id: app\nja:\n  a: あ\n").unwrap();
        let mut i18n = I18n::new();
        load_dir(&mut i18n, temp_dir.path(), "*.yml").unwrap();

        i18n.generate(Some("en"), &mut FsPersist).unwrap();

        let written: Value = serde_yaml::from_str(&fs::read_to_string(&ja_path).unwrap()).unwrap();
        assert_that!(
            written,
            eq(&json!({
                "generator": { "id": "app", "ignore": false },
                "ja": { "a": "あ", "menu": { "open": "" } }
            }))
        );
    }
}
