//! Reading and writing documents and definition bundles.
//!
//! The format of every file is chosen from its extension (`.json`, `.yaml`,
//! `.yml`). A [`DefinitionBundle`] is a set of named definitions loaded from
//! disk; it implements [`DefinitionProvider`] so it can be merged into a
//! [`Document`].
//!
//! # Loading patterns
//!
//! ```no_run
//! use swagger_model_assemble::{DefinitionBundle, load_document};
//! use swagger_model_core::MergeStrategy;
//!
//! let mut doc = load_document("api.yaml").unwrap();
//!
//! // A single file: either a bare name -> definition map, or a full document
//! let shared = DefinitionBundle::from_file("shared.json").unwrap();
//! doc.merge_definitions(&shared, MergeStrategy::Union);
//!
//! // Every definition file in a directory
//! let models = DefinitionBundle::from_dir("models/").unwrap();
//! doc.merge_definitions(&models, MergeStrategy::PreferBase);
//! ```

use std::path::{Path, PathBuf};

use serde_json::Value;
use swagger_model_core::{
    Definition, DefinitionProvider, Document, DocumentError, Format, IndexMap, decode_as,
    decode_with, encode_as,
};
use tracing::debug;

use crate::error::{AssembleError, Result};

/// Top-level keys a full document may carry.
const DOCUMENT_FIELDS: [&str; 10] = [
    "swagger",
    "info",
    "host",
    "schemes",
    "basePath",
    "produces",
    "paths",
    "definitions",
    "security",
    "securityDefinitions",
];

/// Decides whether a bundle file holds a full document or a bare map.
///
/// A string `swagger` marks a document. Without one, the file is a document
/// only if `definitions` maps names to objects and every other top-level
/// key is a document field. A bare map whose only entry is a definition
/// named `definitions` is therefore still read as a document.
fn is_document(raw: &Value) -> bool {
    let Some(obj) = raw.as_object() else {
        return false;
    };
    if obj.get("swagger").is_some_and(Value::is_string) {
        return true;
    }
    let definitions_map = obj
        .get("definitions")
        .and_then(Value::as_object)
        .is_some_and(|defs| defs.values().all(Value::is_object));
    definitions_map && obj.keys().all(|key| DOCUMENT_FIELDS.contains(&key.as_str()))
}

/// Returns the format for `path`, or an error for unknown extensions.
pub fn format_for(path: &Path) -> Result<Format> {
    Format::from_path(path).ok_or_else(|| AssembleError::UnsupportedFormat(path.to_path_buf()))
}

/// Reads and decodes a document, choosing the format from the extension.
///
/// # Errors
///
/// Returns [`AssembleError::UnsupportedFormat`] for unknown extensions,
/// [`AssembleError::IoError`] if the file cannot be read, or
/// [`AssembleError::DocumentError`] if decoding fails.
pub fn load_document(path: impl AsRef<Path>) -> Result<Document> {
    let path = path.as_ref();
    let format = format_for(path)?;
    let bytes = std::fs::read(path)?;
    Ok(decode_with(&bytes, format)?)
}

/// Encodes a document and writes it to `path`, creating parent directories.
///
/// `pretty` indents JSON output; YAML is always block-formatted.
pub fn write_document(
    path: impl AsRef<Path>,
    doc: &Document,
    format: Format,
    pretty: bool,
) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let mut bytes = encode_as(doc, format, pretty)?;
    if format == Format::Json && pretty {
        bytes.push(b'\n');
    }
    std::fs::write(path, bytes)?;
    Ok(())
}

/// Describes where a [`DefinitionBundle`] was loaded from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BundleSource {
    /// A single definition or document file.
    File(PathBuf),
    /// Every definition file in a directory.
    Directory(PathBuf),
}

/// Named definitions loaded from disk.
///
/// # Examples
///
/// ```no_run
/// use swagger_model_assemble::DefinitionBundle;
///
/// let bundle = DefinitionBundle::load("models/").unwrap();
/// println!("{} definitions", bundle.len());
/// for name in bundle.names() {
///     println!("  {name}");
/// }
/// ```
#[derive(Debug, Clone)]
pub struct DefinitionBundle {
    definitions: IndexMap<String, Definition>,
    source: BundleSource,
}

impl DefinitionBundle {
    /// Loads a bundle from a file or a directory.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if path.is_dir() {
            Self::from_dir(path)
        } else {
            Self::from_file(path)
        }
    }

    /// Loads definitions from a single file.
    ///
    /// A file with a string `swagger` key, or with only document fields and
    /// a `definitions` object, is read as a full document and contributes its
    /// `definitions`. Any other object is read as a map of definition name to
    /// definition. A bare map holding just one definition named `definitions`
    /// is indistinguishable from a document and is read as one.
    ///
    /// # Errors
    ///
    /// Returns [`AssembleError::UnsupportedFormat`] for unknown extensions,
    /// [`AssembleError::IoError`] if the file cannot be read, or
    /// [`AssembleError::DocumentError`] if the content does not decode.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let format = format_for(path)?;
        let bytes = std::fs::read(path)?;
        let raw: Value = decode_as(&bytes, format)?;

        let as_document = is_document(&raw);

        let definitions = if as_document {
            let doc: Document = serde_json::from_value(raw).map_err(DocumentError::from)?;
            doc.definitions
        } else {
            serde_json::from_value(raw).map_err(DocumentError::from)?
        };

        debug!(
            path = %path.display(),
            count = definitions.len(),
            as_document,
            "loaded definition file"
        );

        Ok(Self {
            definitions,
            source: BundleSource::File(path.to_path_buf()),
        })
    }

    /// Loads every `.json`, `.yaml` and `.yml` file in a directory.
    ///
    /// Files are read in file-name order; a later file replaces a definition
    /// of the same name from an earlier one. Other files are skipped.
    ///
    /// # Errors
    ///
    /// Returns [`AssembleError::NoDefinitionFiles`] if the directory holds no
    /// definition files, or any error from [`from_file`](Self::from_file).
    pub fn from_dir(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        let mut files = Vec::new();
        for entry in std::fs::read_dir(path)? {
            let file_path = entry?.path();
            if file_path.is_file() && Format::from_path(&file_path).is_some() {
                files.push(file_path);
            }
        }
        if files.is_empty() {
            return Err(AssembleError::NoDefinitionFiles(path.to_path_buf()));
        }
        files.sort();

        let mut definitions = IndexMap::new();
        for file in &files {
            definitions.extend(Self::from_file(file)?.definitions);
        }

        Ok(Self {
            definitions,
            source: BundleSource::Directory(path.to_path_buf()),
        })
    }

    /// Looks up a definition by name.
    pub fn get(&self, name: &str) -> Option<&Definition> {
        self.definitions.get(name)
    }

    /// Returns the number of definitions.
    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    /// Returns `true` if the bundle holds no definitions.
    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    /// Returns an iterator over definition names, in load order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.definitions.keys().map(|s| s.as_str())
    }

    /// Returns where this bundle was loaded from.
    pub fn source(&self) -> &BundleSource {
        &self.source
    }
}

impl DefinitionProvider for DefinitionBundle {
    fn openapi_definitions(&self) -> IndexMap<String, Definition> {
        self.definitions.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write(dir: &Path, name: &str, content: &str) -> PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_from_file_bare_map() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(
            dir.path(),
            "models.json",
            r#"{"Widget":{"type":"object"},"Gadget":{"type":"string"}}"#,
        );

        let bundle = DefinitionBundle::from_file(&path).unwrap();
        assert_eq!(bundle.names().collect::<Vec<_>>(), vec!["Widget", "Gadget"]);
        assert_eq!(bundle.source(), &BundleSource::File(path));
    }

    #[test]
    fn test_from_file_full_document_yaml() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(
            dir.path(),
            "api.yaml",
            "swagger: '2.0'\ninfo:\n  title: T\ndefinitions:\n  User:\n    type: object\n",
        );

        let bundle = DefinitionBundle::from_file(&path).unwrap();
        assert_eq!(bundle.len(), 1);
        assert_eq!(bundle.get("User").unwrap().definition_type, "object");
    }

    #[test]
    fn test_from_file_unknown_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(dir.path(), "models.txt", "{}");

        let err = DefinitionBundle::from_file(&path).unwrap_err();
        assert!(matches!(err, AssembleError::UnsupportedFormat(_)));
    }

    #[test]
    fn test_from_file_shape_mismatch() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(dir.path(), "models.json", r#"{"Widget":{"required":"id"}}"#);

        match DefinitionBundle::from_file(&path).unwrap_err() {
            AssembleError::DocumentError(err) => assert!(err.is_shape_mismatch()),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_from_dir_later_file_wins() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "a.json", r#"{"Widget":{"type":"object"}}"#);
        write(dir.path(), "b.yml", "Widget:\n  type: string\nGadget:\n  type: object\n");
        write(dir.path(), "notes.md", "not a bundle");

        let bundle = DefinitionBundle::load(dir.path()).unwrap();
        assert_eq!(bundle.len(), 2);
        assert_eq!(bundle.get("Widget").unwrap().definition_type, "string");
        assert!(matches!(bundle.source(), BundleSource::Directory(_)));
    }

    #[test]
    fn test_from_dir_empty() {
        let dir = tempfile::tempdir().unwrap();
        let err = DefinitionBundle::from_dir(dir.path()).unwrap_err();
        assert!(matches!(err, AssembleError::NoDefinitionFiles(_)));
    }

    #[test]
    fn test_write_then_load_document() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out").join("api.yaml");
        let doc = Document::new("T", "1").with_host("example.com");

        write_document(&path, &doc, Format::Yaml, true).unwrap();
        assert_eq!(load_document(&path).unwrap(), doc);
    }

    #[test]
    fn test_definition_named_definitions_stays_bare_map() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(
            dir.path(),
            "models.json",
            r#"{"definitions":{"type":"object","properties":{"id":{"type":"string"}}},"Widget":{"type":"object"}}"#,
        );

        let bundle = DefinitionBundle::from_file(&path).unwrap();
        assert_eq!(bundle.names().collect::<Vec<_>>(), vec!["definitions", "Widget"]);
        assert_eq!(bundle.get("definitions").unwrap().properties.len(), 1);
    }

    #[test]
    fn test_document_detection() {
        let doc = |raw: &str| is_document(&serde_json::from_str(raw).unwrap());

        assert!(doc(r#"{"swagger":"2.0"}"#));
        assert!(doc(r#"{"info":{"title":"T"},"definitions":{"A":{"type":"object"}}}"#));
        assert!(!doc(r#"{"swagger":{"type":"object"}}"#));
        assert!(!doc(r#"{"definitions":{"type":"object"}}"#));
        assert!(!doc(r#"{"definitions":{"properties":{}},"Widget":{}}"#));
        assert!(!doc("[]"));
    }
}
