//! Ingredient catalog files: a JSON array of `{"name", "measurement_unit"}`.

use std::collections::HashSet;

use serde::Deserialize;

use crate::error::CatalogError;
use crate::fields::{require_text, INGREDIENT_NAME_MAX_LENGTH, MEASUREMENT_UNIT_MAX_LENGTH};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CatalogEntry {
    pub name: String,
    pub measurement_unit: String,
}

/// Parse and validate a catalog. Fields are trimmed; repeated
/// (name, unit) pairs are dropped, keeping the first.
pub fn parse_catalog(json: &str) -> Result<Vec<CatalogEntry>, CatalogError> {
    let raw: Vec<CatalogEntry> = serde_json::from_str(json)?;

    let mut seen = HashSet::with_capacity(raw.len());
    let mut entries = Vec::with_capacity(raw.len());

    for (index, entry) in raw.iter().enumerate() {
        let name = require_text("name", &entry.name, Some(INGREDIENT_NAME_MAX_LENGTH))
            .map_err(|source| CatalogError::Entry { index, source })?;
        let unit = require_text(
            "measurement_unit",
            &entry.measurement_unit,
            Some(MEASUREMENT_UNIT_MAX_LENGTH),
        )
        .map_err(|source| CatalogError::Entry { index, source })?;

        if seen.insert((name, unit)) {
            entries.push(CatalogEntry {
                name: name.to_string(),
                measurement_unit: unit.to_string(),
            });
        }
    }

    Ok(entries)
}
