//! Bulk loading of the ingredient catalog (`--load-ingredients`).

use std::path::Path;

use diesel::prelude::*;
use foodgram_core::{parse_catalog, CatalogEntry, CatalogError};
use thiserror::Error;

use crate::models::NewIngredient;
use crate::schema::ingredients;

#[derive(Error, Debug)]
pub enum SeedError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error("Failed to insert ingredients: {0}")]
    Database(#[from] diesel::result::Error),
}

/// Insert entries that are not there yet. Returns how many were new.
pub fn insert_catalog(
    conn: &mut PgConnection,
    entries: &[CatalogEntry],
) -> Result<usize, diesel::result::Error> {
    let rows: Vec<NewIngredient> = entries
        .iter()
        .map(|entry| NewIngredient {
            name: &entry.name,
            measurement_unit: &entry.measurement_unit,
        })
        .collect();

    conn.transaction(|conn| {
        // Postgres caps bind parameters per statement at 65535.
        let mut inserted = 0;
        for chunk in rows.chunks(10_000) {
            inserted += diesel::insert_into(ingredients::table)
                .values(chunk)
                .on_conflict_do_nothing()
                .execute(conn)?;
        }
        Ok(inserted)
    })
}

pub fn load_ingredients_file(conn: &mut PgConnection, path: &Path) -> Result<usize, SeedError> {
    let json = std::fs::read_to_string(path).map_err(|source| SeedError::Read {
        path: path.display().to_string(),
        source,
    })?;

    let entries = parse_catalog(&json)?;
    let inserted = insert_catalog(conn, &entries)?;

    tracing::info!(
        path = %path.display(),
        total = entries.len(),
        inserted,
        "ingredient catalog loaded"
    );

    Ok(inserted)
}
