//! Config-driven assembly: load a base document, merge definition bundles,
//! write the result.

use std::path::{Path, PathBuf};

use serde::Serialize;
use swagger_model_core::Document;
use tracing::{debug, info};

use crate::config::AssembleConfig;
use crate::error::Result;
use crate::loader::{DefinitionBundle, load_document, write_document};

/// Summary of one assembly run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AssemblyReport {
    /// Path the document was written to.
    pub output: PathBuf,
    /// Number of definitions in the written document.
    pub definitions_total: usize,
    /// Definition names added or changed by the merge, in merge order.
    pub merged: Vec<String>,
}

/// Runs an [`AssembleConfig`].
///
/// # Examples
///
/// ```no_run
/// use swagger_model_assemble::Assembler;
///
/// let report = Assembler::from_config_file("swagger-assemble.yml")
///     .unwrap()
///     .run()
///     .unwrap();
/// println!("wrote {} ({} definitions)", report.output.display(), report.definitions_total);
/// ```
#[derive(Debug, Clone)]
pub struct Assembler {
    config: AssembleConfig,
}

impl Assembler {
    /// Creates an assembler for a configuration whose paths are already
    /// resolved. The configuration is validated when the assembler runs.
    pub fn new(config: AssembleConfig) -> Self {
        Self { config }
    }

    /// Loads, validates and resolves a configuration file.
    ///
    /// Relative paths in the file are taken relative to its directory.
    pub fn from_config_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let config = AssembleConfig::load(path)?;
        config.validate()?;

        let dir = path.parent().unwrap_or_else(|| Path::new(""));
        Ok(Self::new(config.resolve_relative_to(dir)))
    }

    /// Returns the configuration in use.
    pub fn config(&self) -> &AssembleConfig {
        &self.config
    }

    /// Loads the base document and merges every configured bundle into it.
    ///
    /// Returns the merged document and the definition names that changed.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidConfig`](crate::AssembleError::InvalidConfig) before
    /// touching any file if the configuration does not validate.
    pub fn build(&self) -> Result<(Document, Vec<String>)> {
        self.config.validate()?;
        info!(base = %self.config.base.display(), "loading base document");
        let mut doc = load_document(&self.config.base)?;

        let mut merged = Vec::new();
        for source in &self.config.definitions {
            let bundle = DefinitionBundle::load(source)?;
            let changed = doc.merge_definitions(&bundle, self.config.strategy);
            debug!(
                source = %source.display(),
                definitions = bundle.len(),
                changed = changed.len(),
                "merged definition bundle"
            );
            for name in changed {
                if !merged.contains(&name) {
                    merged.push(name);
                }
            }
        }

        Ok((doc, merged))
    }

    /// Builds the document and writes it to the configured output.
    pub fn run(&self) -> Result<AssemblyReport> {
        let (doc, merged) = self.build()?;

        let output = &self.config.output;
        write_document(&output.path, &doc, output.resolved_format(), output.pretty)?;
        info!(
            output = %output.path.display(),
            definitions = doc.definitions.len(),
            merged = merged.len(),
            "wrote assembled document"
        );

        Ok(AssemblyReport {
            output: output.path.clone(),
            definitions_total: doc.definitions.len(),
            merged,
        })
    }
}
