//! Data model for OpenAPI 2.0 (Swagger) documents.
//!
//! This crate declares the shape of a Swagger document as plain Rust values
//! and maps it to and from its textual encoding:
//!
//! - [`Document`]: the root, holding info, paths, definitions and security.
//! - [`Request`], [`Parameter`], [`Response`]: one operation and its parts.
//! - [`Schema`], [`ItemRef`]: payload shapes; `$ref` strings stay opaque.
//! - [`Definition`], [`Property`]: reusable named types.
//! - [`SecurityDefinition`]: named auth schemes.
//!
//! Decoding ([`decode`], [`decode_with`]) ignores unknown fields and fills
//! missing ones with zero values. Encoding ([`encode`], [`encode_with`])
//! omits zero values. Errors are reported as [`DocumentError`].
//!
//! Extra definitions can be merged in from any [`DefinitionProvider`] with a
//! [`MergeStrategy`]. The reduced older shape lives in [`legacy`].
//!
//! This crate does not validate documents, resolve references, or support
//! OpenAPI 3.
//!
//! # Example
//!
//! ```
//! use swagger_model_core::*;
//!
//! let mut doc = Document::new("Widgets", "1.0.0");
//! doc.insert_operation(
//!     "/widgets/{id}",
//!     "get",
//!     Request::new("Fetch a widget")
//!         .with_parameter(Parameter::new("id", ParameterLocation::Path, "integer").required())
//!         .with_response("200", Response::new("OK").with_schema(Schema::reference("#/definitions/Widget"))),
//! );
//! doc.insert_definition("Widget", Definition::object().with_property("id", Property::of_type("integer")));
//!
//! let bytes = encode(&doc).unwrap();
//! assert_eq!(decode(&bytes).unwrap(), doc);
//! ```

mod codec;
mod de;
mod error;
pub mod legacy;
mod merge;
mod types;

pub use codec::{Format, decode, decode_as, decode_with, encode, encode_as, encode_pretty, encode_with};
pub use error::{DocumentError, Result};
pub use merge::{DefinitionProvider, MergeStrategy, merge_definitions};
pub use types::*;

pub use indexmap::IndexMap;
