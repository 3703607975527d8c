//! Field deserializers shared by both document profiles.
//!
//! Producers commonly write `null` for an absent list, map or string. These
//! helpers read it as the field's zero value, the same as a missing field.

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer};

use crate::SecurityRequirement;

/// Deserializes `T`, treating `null` as `T::default()`.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    let opt: Option<T> = Option::deserialize(deserializer)?;
    Ok(opt.unwrap_or_default())
}

/// Deserializes a security requirement list.
///
/// A `null` list is empty, and a `null` scope list is an empty scope list.
pub(crate) fn security_requirements<'de, D>(
    deserializer: D,
) -> Result<Vec<SecurityRequirement>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<Vec<IndexMap<String, Option<Vec<String>>>>> = Option::deserialize(deserializer)?;
    Ok(raw
        .unwrap_or_default()
        .into_iter()
        .map(|requirement| {
            requirement
                .into_iter()
                .map(|(scheme, scopes)| (scheme, scopes.unwrap_or_default()))
                .collect()
        })
        .collect())
}
