//! Loading, merging and writing Swagger documents.
//!
//! This crate is the file-facing side of the document model: it picks a
//! codec from the file extension, loads definition bundles that implement
//! [`DefinitionProvider`](swagger_model_core::DefinitionProvider), and runs
//! config-driven assemblies.
//!
//! # Quick start
//!
//! ```no_run
//! use swagger_model_assemble::{Assembler, DefinitionBundle, load_document, write_document};
//! use swagger_model_core::{Format, MergeStrategy};
//!
//! // Merge by hand
//! let mut doc = load_document("api.yaml").unwrap();
//! let models = DefinitionBundle::load("models/").unwrap();
//! doc.merge_definitions(&models, MergeStrategy::Union);
//! write_document("dist/api.json", &doc, Format::Json, true).unwrap();
//!
//! // Or drive it from a YAML config
//! let report = Assembler::from_config_file("swagger-assemble.yml").unwrap().run().unwrap();
//! println!("{} definitions merged", report.merged.len());
//! ```

mod assemble;
mod config;
mod error;
mod loader;

pub use assemble::{Assembler, AssemblyReport};
pub use config::{AssembleConfig, OutputConfig};
pub use error::{AssembleError, Result};
pub use loader::{BundleSource, DefinitionBundle, format_for, load_document, write_document};
