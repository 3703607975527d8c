//! Decoding and encoding of documents.
//!
//! [`decode`] and [`encode`] map between JSON bytes and a [`Document`].
//! Both are pure: they allocate a fresh tree or buffer and touch no shared
//! state, so any number of calls may run concurrently.
//!
//! # Example
//!
//! ```
//! use swagger_model_core::*;
//!
//! let raw = br#"{"swagger":"2.0","info":{"title":"T","version":"1"},"paths":{}}"#;
//! let doc = decode(raw).unwrap();
//! assert_eq!(doc.info.title, "T");
//!
//! let out = String::from_utf8(encode(&doc).unwrap()).unwrap();
//! assert_eq!(out, r#"{"swagger":"2.0","info":{"title":"T","version":"1"}}"#);
//! ```

use std::path::Path;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::Document;
use crate::error::{DocumentError, Result};

/// Textual encoding of a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum Format {
    /// JSON (the default).
    #[default]
    Json,
    /// YAML.
    Yaml,
}

impl Format {
    /// Infers the format from a file extension.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::path::Path;
    /// use swagger_model_core::Format;
    ///
    /// assert_eq!(Format::from_path(Path::new("api.json")), Some(Format::Json));
    /// assert_eq!(Format::from_path(Path::new("api.YML")), Some(Format::Yaml));
    /// assert_eq!(Format::from_path(Path::new("api.txt")), None);
    /// ```
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "json" => Some(Self::Json),
            "yaml" | "yml" => Some(Self::Yaml),
            _ => None,
        }
    }

    /// Canonical file extension, without the dot.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Yaml => "yaml",
        }
    }
}

/// Decodes a JSON payload into a [`Document`].
///
/// # Errors
///
/// Returns [`DocumentError::MalformedInput`] if the payload is not valid
/// JSON, or [`DocumentError::ShapeMismatch`] if a value has the wrong type
/// for its field.
pub fn decode(bytes: &[u8]) -> Result<Document> {
    decode_as(bytes, Format::Json)
}

/// Decodes a payload in the given format into a [`Document`].
pub fn decode_with(bytes: &[u8], format: Format) -> Result<Document> {
    decode_as(bytes, format)
}

/// Encodes a [`Document`] as compact JSON.
pub fn encode(doc: &Document) -> Result<Vec<u8>> {
    encode_as(doc, Format::Json, false)
}

/// Encodes a [`Document`] as indented JSON.
pub fn encode_pretty(doc: &Document) -> Result<Vec<u8>> {
    encode_as(doc, Format::Json, true)
}

/// Encodes a [`Document`] in the given format.
pub fn encode_with(doc: &Document, format: Format) -> Result<Vec<u8>> {
    encode_as(doc, format, false)
}

/// Decodes any model value from a payload.
///
/// Used for documents, legacy documents and bare definition maps alike.
/// YAML is checked for well-formedness before it is mapped onto `T`, so
/// syntax errors and type errors are reported as different kinds.
pub fn decode_as<T: DeserializeOwned>(bytes: &[u8], format: Format) -> Result<T> {
    match format {
        Format::Json => Ok(serde_json::from_slice(bytes)?),
        Format::Yaml => {
            serde_yaml::from_slice::<serde_yaml::Value>(bytes)
                .map_err(|e| DocumentError::MalformedInput(e.to_string()))?;
            serde_yaml::from_slice(bytes).map_err(|e| DocumentError::ShapeMismatch(e.to_string()))
        }
    }
}

/// Encodes any model value. `pretty` only affects JSON.
pub fn encode_as<T: Serialize>(value: &T, format: Format, pretty: bool) -> Result<Vec<u8>> {
    match format {
        Format::Json if pretty => {
            serde_json::to_vec_pretty(value).map_err(|e| DocumentError::Encode(e.to_string()))
        }
        Format::Json => serde_json::to_vec(value).map_err(|e| DocumentError::Encode(e.to_string())),
        Format::Yaml => serde_yaml::to_string(value)
            .map(String::into_bytes)
            .map_err(|e| DocumentError::Encode(e.to_string())),
    }
}
