//! Merging externally provided definitions into a document.
//!
//! Code that can enumerate named types implements [`DefinitionProvider`].
//! Nothing in the document model calls a provider on its own; an assembling
//! tool passes one to [`merge_definitions`] (or
//! [`Document::merge_definitions`]) before encoding.
//!
//! # Example
//!
//! ```
//! use indexmap::IndexMap;
//! use swagger_model_core::*;
//!
//! let mut doc = Document::new("T", "1");
//! doc.insert_definition("User", Definition::object());
//!
//! let mut extra = IndexMap::new();
//! extra.insert("Widget".to_string(), Definition::object());
//!
//! let changed = doc.merge_definitions(&extra, MergeStrategy::Union);
//! assert_eq!(changed, vec!["Widget"]);
//! assert_eq!(doc.definitions.len(), 2);
//! ```

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::{Definition, Document};

/// A source of named [`Definition`]s.
pub trait DefinitionProvider {
    /// Returns the definitions this provider contributes, keyed by name.
    fn openapi_definitions(&self) -> IndexMap<String, Definition>;
}

impl DefinitionProvider for IndexMap<String, Definition> {
    fn openapi_definitions(&self) -> IndexMap<String, Definition> {
        self.clone()
    }
}

impl DefinitionProvider for Document {
    fn openapi_definitions(&self) -> IndexMap<String, Definition> {
        self.definitions.clone()
    }
}

/// How to resolve a definition name present on both sides.
///
/// # Examples
///
/// ```
/// use indexmap::IndexMap;
/// use swagger_model_core::*;
///
/// let mut base = IndexMap::new();
/// base.insert("A".to_string(), Definition::of_type("string"));
/// let mut overlay = IndexMap::new();
/// overlay.insert("A".to_string(), Definition::of_type("integer"));
///
/// let mut kept = base.clone();
/// merge_definitions(&mut kept, &overlay, MergeStrategy::PreferBase);
/// assert_eq!(kept["A"].definition_type, "string");
///
/// let mut replaced = base.clone();
/// merge_definitions(&mut replaced, &overlay, MergeStrategy::PreferOverlay);
/// assert_eq!(replaced["A"].definition_type, "integer");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum MergeStrategy {
    /// Keep the existing definition.
    PreferBase,
    /// Replace the existing definition.
    PreferOverlay,
    /// Merge both field by field; the overlay wins per property.
    #[default]
    Union,
}

/// Merges `overlay` into `base` and returns the names that were added or changed.
///
/// New names are appended in overlay order. Existing names keep their
/// position.
pub fn merge_definitions(
    base: &mut IndexMap<String, Definition>,
    overlay: &IndexMap<String, Definition>,
    strategy: MergeStrategy,
) -> Vec<String> {
    let mut changed = Vec::new();

    for (name, incoming) in overlay {
        let Some(existing) = base.get_mut(name) else {
            base.insert(name.clone(), incoming.clone());
            changed.push(name.clone());
            continue;
        };

        let merged = match strategy {
            MergeStrategy::PreferBase => continue,
            MergeStrategy::PreferOverlay => incoming.clone(),
            MergeStrategy::Union => merge_definition(existing, incoming),
        };

        if merged != *existing {
            *existing = merged;
            changed.push(name.clone());
        }
    }

    changed
}

fn merge_definition(base: &Definition, overlay: &Definition) -> Definition {
    let mut merged = base.clone();

    if !overlay.definition_type.is_empty() {
        merged.definition_type = overlay.definition_type.clone();
    }
    for (name, property) in &overlay.properties {
        merged.properties.insert(name.clone(), property.clone());
    }
    for name in &overlay.required {
        if !merged.required.contains(name) {
            merged.required.push(name.clone());
        }
    }

    merged
}

impl Document {
    /// Merges the definitions of `provider` into this document.
    ///
    /// Returns the names that were added or changed.
    pub fn merge_definitions(
        &mut self,
        provider: &impl DefinitionProvider,
        strategy: MergeStrategy,
    ) -> Vec<String> {
        let incoming = provider.openapi_definitions();
        merge_definitions(&mut self.definitions, &incoming, strategy)
    }
}
