//! Matching tracked identities against freshly fetched remote records.
//!
//! Remote collections are fetched anew on every read, so lookups are a linear
//! scan in upstream order. Keys compare by exact, case-sensitive equality and
//! the first match wins.

use crate::client::{Domain, ProjectEnv};
use crate::error::ProviderError;
use crate::resource_data::ResourceData;

/// Separator between the scope and the key of an import identifier.
pub const IMPORT_ID_SEPARATOR: char = ':';

/// A remote record that can be located by a string key.
pub trait RemoteRecord {
    /// Human-readable record kind used in not-found messages.
    const KIND: &'static str;

    /// The identifying key of this record.
    fn key(&self) -> &str;
}

impl RemoteRecord for ProjectEnv {
    const KIND: &'static str = "project env";

    fn key(&self) -> &str {
        &self.id
    }
}

impl RemoteRecord for Domain {
    const KIND: &'static str = "project domain";

    fn key(&self) -> &str {
        &self.domain
    }
}

/// Find the first record whose key equals `key`.
///
/// Returns [`ProviderError::NotFound`] when nothing matches, which callers
/// handle by clearing the tracked identity.
pub fn find_record<'a, R: RemoteRecord>(
    key: &str,
    records: &'a [R],
) -> Result<&'a R, ProviderError> {
    records
        .iter()
        .find(|record| record.key() == key)
        .ok_or_else(|| ProviderError::NotFound(format!("{} not found: {}", R::KIND, key)))
}

/// An import identifier split into its parts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportId {
    /// The parent scope, e.g. the project name.
    pub scope: String,
    /// The child key that becomes the tracked identity.
    pub key: String,
}

/// Split an import identifier of the form `<scope>:<key>`.
///
/// Returns `Ok(None)` when `raw` has no separator, meaning the identity is
/// already resolved and must be left alone. Empty segments are accepted.
pub fn parse_import_id(raw: &str) -> Result<Option<ImportId>, ProviderError> {
    if !raw.contains(IMPORT_ID_SEPARATOR) {
        return Ok(None);
    }

    let parts: Vec<&str> = raw.split(IMPORT_ID_SEPARATOR).collect();
    match parts.as_slice() {
        [scope, key] => Ok(Some(ImportId {
            scope: scope.to_string(),
            key: key.to_string(),
        })),
        _ => Err(ProviderError::InvalidImportId(format!(
            "expected <name>:<key>, got '{}'",
            raw
        ))),
    }
}

/// Resolve the import identifier held in `data.id()` into tracked state.
///
/// Sets `scope_field` to the scope, `key_field` (when given) to the key, and
/// the tracked identity to the key. A plain identifier leaves `data` untouched.
pub fn apply_import_id(
    data: &mut ResourceData,
    scope_field: &str,
    key_field: Option<&str>,
) -> Result<(), ProviderError> {
    let Some(import_id) = parse_import_id(data.id())? else {
        return Ok(());
    };

    data.set(scope_field, &import_id.scope)?;
    if let Some(key_field) = key_field {
        data.set(key_field, &import_id.key)?;
    }
    data.set_id(import_id.key);
    Ok(())
}
