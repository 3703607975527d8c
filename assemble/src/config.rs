//! Assembly configuration.
//!
//! Describes which base document to start from, which definition bundles to
//! merge into it, and where to write the result.
//!
//! # Example YAML
//!
//! ```yaml
//! version: "1.0"
//! base: api/base.yaml
//! definitions:
//!   - models/
//!   - shared/errors.json
//! strategy: union
//! output:
//!   path: dist/swagger.json
//!   pretty: true
//! ```
//!
//! Relative paths are resolved against the directory of the config file.

use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use swagger_model_core::{Format, MergeStrategy};

use crate::error::{AssembleError, Result};

/// Where and how the assembled document is written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Output file path.
    pub path: PathBuf,
    /// Output format. Inferred from `path` when absent, falling back to JSON.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<Format>,
    /// Indent JSON output.
    #[serde(default = "default_pretty")]
    pub pretty: bool,
}

fn default_pretty() -> bool {
    true
}

impl OutputConfig {
    /// Resolves the effective output format.
    ///
    /// # Examples
    ///
    /// ```
    /// # use swagger_model_assemble::OutputConfig;
    /// # use swagger_model_core::Format;
    /// let out = OutputConfig { path: "dist/api.yml".into(), format: None, pretty: true };
    /// assert_eq!(out.resolved_format(), Format::Yaml);
    /// ```
    pub fn resolved_format(&self) -> Format {
        self.format
            .or_else(|| Format::from_path(&self.path))
            .unwrap_or_default()
    }
}

/// Top-level assembly configuration.
///
/// Loaded from a YAML file, typically `swagger-assemble.yml` next to the
/// sources it names.
///
/// # Examples
///
/// ```no_run
/// use swagger_model_assemble::AssembleConfig;
///
/// let config = AssembleConfig::load("swagger-assemble.yml").unwrap();
/// println!("merging {} bundle(s) into {}", config.definitions.len(), config.base.display());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssembleConfig {
    /// Configuration format version (e.g. `"1.0"`).
    pub version: String,
    /// Base document to merge into.
    pub base: PathBuf,
    /// Definition files or directories, merged in order.
    #[serde(default)]
    pub definitions: Vec<PathBuf>,
    /// Conflict resolution for definition names present on both sides.
    #[serde(default)]
    pub strategy: MergeStrategy,
    /// Output settings.
    pub output: OutputConfig,
}

impl AssembleConfig {
    /// Loads configuration from a YAML file.
    ///
    /// Paths are returned exactly as written; see
    /// [`resolve_relative_to`](Self::resolve_relative_to).
    ///
    /// # Errors
    ///
    /// Returns [`IoError`](crate::AssembleError::IoError) if the file cannot
    /// be read, or [`YamlError`](crate::AssembleError::YamlError) if parsing
    /// fails.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        let reader = BufReader::new(file);
        let config = serde_yaml::from_reader(reader)?;
        Ok(config)
    }

    /// Saves the configuration as YAML.
    ///
    /// # Errors
    ///
    /// Returns [`IoError`](crate::AssembleError::IoError) if the file cannot
    /// be written, or [`YamlError`](crate::AssembleError::YamlError) if
    /// serialization fails.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let file = std::fs::File::create(path)?;
        let writer = BufWriter::new(file);
        serde_yaml::to_writer(writer, self)?;
        Ok(())
    }

    /// Checks that the configuration names a version and a base document.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidConfig`](crate::AssembleError::InvalidConfig)
    /// describing the first problem found.
    pub fn validate(&self) -> Result<()> {
        if self.version.trim().is_empty() {
            return Err(AssembleError::InvalidConfig(
                "version cannot be empty".to_string(),
            ));
        }
        if self.base.as_os_str().is_empty() {
            return Err(AssembleError::InvalidConfig(
                "base document path cannot be empty".to_string(),
            ));
        }
        if self.output.path.as_os_str().is_empty() {
            return Err(AssembleError::InvalidConfig(
                "output path cannot be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Returns a copy with every relative path joined onto `dir`.
    ///
    /// # Examples
    ///
    /// ```
    /// # let yaml = r#"
    /// # version: "1.0"
    /// # base: api.yaml
    /// # definitions: [/abs/models]
    /// # output: { path: out/api.json }
    /// # "#;
    /// # let config: swagger_model_assemble::AssembleConfig = serde_yaml::from_str(yaml).unwrap();
    /// use std::path::Path;
    ///
    /// let resolved = config.resolve_relative_to(Path::new("/srv/api"));
    /// assert_eq!(resolved.base, Path::new("/srv/api/api.yaml"));
    /// assert_eq!(resolved.definitions[0], Path::new("/abs/models"));
    /// assert_eq!(resolved.output.path, Path::new("/srv/api/out/api.json"));
    /// ```
    pub fn resolve_relative_to(&self, dir: &Path) -> Self {
        let resolve = |p: &Path| {
            if p.is_relative() {
                dir.join(p)
            } else {
                p.to_path_buf()
            }
        };

        let mut resolved = self.clone();
        resolved.base = resolve(self.base.as_path());
        resolved.definitions = self.definitions.iter().map(|p| resolve(p.as_path())).collect();
        resolved.output.path = resolve(self.output.path.as_path());
        resolved
    }
}
