//! Registry document loading: format detection, file discovery, and
//! multi-pack merging.
//!
//! A pack file holds one registry document (item id -> recipe entry) in
//! RON, TOML, or JSON, detected by extension. TOML cannot encode `null`
//! grid slots; TOML packs use the air sentinel for empty slots instead.

use craftplan_core::registry::{Document, RecipeBook};
use std::path::{Path, PathBuf};

// ===========================================================================
// Errors
// ===========================================================================

/// Errors that can occur while loading recipe packs.
#[derive(Debug, thiserror::Error)]
pub enum PackError {
    /// A required pack file was not found in the given directory.
    #[error("required pack '{base}' not found in {dir}")]
    MissingRequired { base: String, dir: PathBuf },

    /// The file has an extension we don't support.
    #[error("unsupported format for file: {file}")]
    UnsupportedFormat { file: PathBuf },

    /// Two files with the same base name but different formats exist.
    #[error("conflicting formats: {a} and {b}")]
    ConflictingFormats { a: PathBuf, b: PathBuf },

    /// A deserialization error occurred.
    #[error("parse error in {file}: {detail}")]
    Parse { file: PathBuf, detail: String },

    /// An I/O error occurred.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl PackError {
    fn parse(file: &Path, detail: impl ToString) -> Self {
        Self::Parse {
            file: file.to_path_buf(),
            detail: detail.to_string(),
        }
    }
}

// ===========================================================================
// Format detection
// ===========================================================================

/// Supported pack file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Ron,
    Toml,
    Json,
}

/// Detect the format of a file based on its extension.
pub fn detect_format(path: &Path) -> Result<Format, PackError> {
    match path.extension().and_then(|e| e.to_str()) {
        Some("ron") => Ok(Format::Ron),
        Some("toml") => Ok(Format::Toml),
        Some("json") => Ok(Format::Json),
        _ => Err(PackError::UnsupportedFormat {
            file: path.to_path_buf(),
        }),
    }
}

// ===========================================================================
// File discovery
// ===========================================================================

/// Scan a directory for a pack file with the given base name (without
/// extension).
///
/// Looks for `{base}.ron`, `{base}.toml`, and `{base}.json`. Returns
/// `Ok(None)` if no file is found, or `Err(ConflictingFormats)` if multiple
/// formats exist for the same base name.
pub fn find_data_file(dir: &Path, base: &str) -> Result<Option<PathBuf>, PackError> {
    let extensions = ["ron", "toml", "json"];
    let mut found: Option<PathBuf> = None;

    for ext in &extensions {
        let candidate = dir.join(format!("{base}.{ext}"));
        if candidate.exists() {
            if let Some(ref existing) = found {
                return Err(PackError::ConflictingFormats {
                    a: existing.clone(),
                    b: candidate,
                });
            }
            found = Some(candidate);
        }
    }

    Ok(found)
}

/// Like [`find_data_file`], but returns an error if no file is found.
pub fn require_data_file(dir: &Path, base: &str) -> Result<PathBuf, PackError> {
    find_data_file(dir, base)?.ok_or_else(|| PackError::MissingRequired {
        base: base.to_string(),
        dir: dir.to_path_buf(),
    })
}

// ===========================================================================
// Document loading
// ===========================================================================

/// Read a pack file and deserialize its registry document according to the
/// format detected from its extension.
pub fn load_document(path: &Path) -> Result<Document, PackError> {
    let format = detect_format(path)?;
    let content = std::fs::read_to_string(path)?;

    match format {
        Format::Ron => ron::from_str(&content).map_err(|e| PackError::parse(path, e)),
        Format::Json => serde_json::from_str(&content).map_err(|e| PackError::parse(path, e)),
        Format::Toml => toml::from_str(&content).map_err(|e| PackError::parse(path, e)),
    }
}

/// Load a single pack file into a fresh registry.
pub fn load_book(path: &Path) -> Result<RecipeBook, PackError> {
    let mut book = RecipeBook::new();
    book.load(load_document(path)?);
    Ok(book)
}

/// Load several pack files into one registry, in order. Later packs
/// override earlier ones on duplicate item ids.
pub fn merge_packs<P: AsRef<Path>>(paths: &[P]) -> Result<RecipeBook, PackError> {
    let mut book = RecipeBook::new();
    for path in paths {
        let document = load_document(path.as_ref())?;
        book.merge(document.into_iter().collect());
    }
    Ok(book)
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use craftplan_core::resolver::resolve;
    use craftplan_core::test_utils::sample_book;
    use std::fs;

    /// Create a temporary directory with a unique name for test isolation.
    fn make_test_dir(suffix: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "craftplan_data_test_{suffix}_{}",
            std::process::id()
        ));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn cleanup(dir: &Path) {
        let _ = fs::remove_dir_all(dir);
    }

    const JSON_PACK: &str = r#"{
        "minecraft:oak_log": {"sources": ["surface"], "blocks": ["minecraft:oak_log"]},
        "minecraft:oak_planks": {
            "sources": ["craft"],
            "craft": [{
                "recipe": ["minecraft:oak_log", null, null, null, null, null, null, null, null],
                "amount": 4
            }]
        },
        "minecraft:stone": {"sources": ["smelt"], "smelt": ["minecraft:cobblestone"]}
    }"#;

    // -----------------------------------------------------------------------
    // detect_format
    // -----------------------------------------------------------------------

    #[test]
    fn detect_format_by_extension() {
        assert_eq!(detect_format(Path::new("pack.ron")).unwrap(), Format::Ron);
        assert_eq!(detect_format(Path::new("pack.toml")).unwrap(), Format::Toml);
        assert_eq!(detect_format(Path::new("pack.json")).unwrap(), Format::Json);
    }

    #[test]
    fn detect_format_rejects_unknown_and_missing_extensions() {
        assert!(matches!(
            detect_format(Path::new("pack.yaml")),
            Err(PackError::UnsupportedFormat { .. })
        ));
        assert!(matches!(
            detect_format(Path::new("pack")),
            Err(PackError::UnsupportedFormat { .. })
        ));
    }

    // -----------------------------------------------------------------------
    // find_data_file / require_data_file
    // -----------------------------------------------------------------------

    #[test]
    fn find_data_file_locates_single_pack() {
        let dir = make_test_dir("find_single");
        fs::write(dir.join("recipes.json"), "{}").unwrap();

        let result = find_data_file(&dir, "recipes").unwrap();
        assert_eq!(result, Some(dir.join("recipes.json")));

        cleanup(&dir);
    }

    #[test]
    fn find_data_file_missing_is_none() {
        let dir = make_test_dir("find_missing");
        assert_eq!(find_data_file(&dir, "recipes").unwrap(), None);
        cleanup(&dir);
    }

    #[test]
    fn find_data_file_conflicting_formats_fail() {
        let dir = make_test_dir("find_conflict");
        fs::write(dir.join("recipes.ron"), "{}").unwrap();
        fs::write(dir.join("recipes.json"), "{}").unwrap();

        let result = find_data_file(&dir, "recipes");
        assert!(matches!(result, Err(PackError::ConflictingFormats { .. })));

        cleanup(&dir);
    }

    #[test]
    fn require_data_file_missing_fails() {
        let dir = make_test_dir("require_missing");
        let result = require_data_file(&dir, "recipes");
        assert!(matches!(
            result,
            Err(PackError::MissingRequired { ref base, .. }) if base == "recipes"
        ));
        cleanup(&dir);
    }

    // -----------------------------------------------------------------------
    // load_document / load_book
    // -----------------------------------------------------------------------

    #[test]
    fn load_document_json() {
        let dir = make_test_dir("doc_json");
        let path = dir.join("recipes.json");
        fs::write(&path, JSON_PACK).unwrap();

        let document = load_document(&path).unwrap();
        assert_eq!(document.len(), 3);
        assert!(document.contains_key("minecraft:oak_planks"));

        cleanup(&dir);
    }

    #[test]
    fn load_document_ron() {
        let dir = make_test_dir("doc_ron");
        let path = dir.join("recipes.ron");
        fs::write(
            &path,
            r#"{
                "minecraft:oak_log": (sources: [surface], blocks: Some(["minecraft:oak_log"])),
                "minecraft:oak_planks": (
                    sources: [craft],
                    craft: Some([(
                        recipe: [Some("minecraft:oak_log"), None, None, None, None, None, None, None, None],
                        amount: 4,
                    )]),
                ),
            }"#,
        )
        .unwrap();

        let document = load_document(&path).unwrap();
        assert_eq!(document.len(), 2);
        let planks = &document["minecraft:oak_planks"];
        assert_eq!(planks.craft.as_ref().unwrap()[0].amount, 4);

        cleanup(&dir);
    }

    #[test]
    fn load_document_toml_uses_air_for_empty_slots() {
        let dir = make_test_dir("doc_toml");
        let path = dir.join("recipes.toml");
        fs::write(
            &path,
            r#"
["minecraft:oak_log"]
sources = ["surface"]
blocks = ["minecraft:oak_log"]

["minecraft:stick"]
sources = ["craft"]

[["minecraft:stick".craft]]
recipe = [
    "minecraft:oak_planks", "minecraft:air", "minecraft:air",
    "minecraft:oak_planks", "minecraft:air", "minecraft:air",
    "minecraft:air", "minecraft:air", "minecraft:air",
]
amount = 4
"#,
        )
        .unwrap();

        let document = load_document(&path).unwrap();
        let stick = &document["minecraft:stick"];
        let counts = stick.craft.as_ref().unwrap()[0].ingredient_counts();
        assert_eq!(counts, vec![("minecraft:oak_planks".to_string(), 2)]);

        cleanup(&dir);
    }

    #[test]
    fn load_document_parse_error_carries_file() {
        let dir = make_test_dir("doc_bad");
        let path = dir.join("recipes.json");
        fs::write(&path, "not a document {{{").unwrap();

        let result = load_document(&path);
        assert!(matches!(
            result,
            Err(PackError::Parse { ref file, .. }) if file == &path
        ));

        cleanup(&dir);
    }

    #[test]
    fn load_document_missing_file_is_io_error() {
        let result = load_document(Path::new("/nonexistent/recipes.json"));
        assert!(matches!(result, Err(PackError::Io(_))));
    }

    #[test]
    fn load_book_resolves_end_to_end() {
        let dir = make_test_dir("book_resolve");
        let path = dir.join("recipes.json");
        fs::write(&path, JSON_PACK).unwrap();

        let book = load_book(&path).unwrap();
        let result = resolve(&book, "minecraft:oak_planks", 2).unwrap();
        assert_eq!(result.resource("minecraft:oak_log"), 2);

        cleanup(&dir);
    }

    #[test]
    fn saved_registry_loads_back_identically() {
        let dir = make_test_dir("round_trip");
        let path = dir.join("recipes.json");
        let book = sample_book();
        fs::write(&path, book.to_json().unwrap()).unwrap();

        let reloaded = load_book(&path).unwrap();
        assert_eq!(reloaded, book);

        cleanup(&dir);
    }

    // -----------------------------------------------------------------------
    // merge_packs
    // -----------------------------------------------------------------------

    #[test]
    fn merge_packs_later_files_win() {
        let dir = make_test_dir("merge");
        let base = dir.join("base.json");
        let patch = dir.join("patch.json");
        fs::write(&base, JSON_PACK).unwrap();
        fs::write(
            &patch,
            r#"{
                "minecraft:oak_planks": {
                    "sources": ["craft"],
                    "craft": [{
                        "recipe": ["minecraft:oak_log", null, null, null, null, null, null, null, null],
                        "amount": 8
                    }]
                },
                "minecraft:cobblestone": {"sources": ["underground"], "blocks": ["minecraft:cobblestone"]}
            }"#,
        )
        .unwrap();

        let book = merge_packs(&[&base, &patch]).unwrap();
        // Entries from both packs, with the patch overriding planks.
        assert_eq!(book.len(), 4);
        let planks = book.get("minecraft:oak_planks").unwrap();
        assert_eq!(planks.craft.as_ref().unwrap()[0].amount, 8);

        cleanup(&dir);
    }

    #[test]
    fn merge_packs_propagates_load_errors() {
        let dir = make_test_dir("merge_err");
        let good = dir.join("good.json");
        fs::write(&good, JSON_PACK).unwrap();

        let result = merge_packs(&[good.clone(), dir.join("absent.json")]);
        assert!(matches!(result, Err(PackError::Io(_))));

        cleanup(&dir);
    }
}
