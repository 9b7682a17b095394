//! Catalog snapshot loading and saving

use super::{Catalog, Record};
use anyhow::{Context, Result};
use std::path::Path;
use tracing::info;

pub fn load_catalog<P: AsRef<Path>>(path: P) -> Result<Catalog> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read records file: {:?}", path))?;
    let records: Vec<Record> = serde_json::from_str(&text)
        .with_context(|| format!("Failed to parse records file: {:?}", path))?;

    let catalog = Catalog::with_records(records);
    let stats = catalog.statistics();
    info!(
        "Catalog loaded from {:?}:\n{} records\n{} available\n{} checked out\n{} unknown",
        path,
        stats.total,
        stats.available,
        stats.checked_out,
        stats.unknown()
    );
    Ok(catalog)
}

pub fn save_catalog<P: AsRef<Path>>(catalog: &Catalog, path: P) -> Result<()> {
    let path = path.as_ref();
    let text = serde_json::to_string_pretty(catalog.records())
        .context("Failed to serialize catalog records.")?;
    std::fs::write(path, text)
        .with_context(|| format!("Failed to write records file: {:?}", path))?;
    info!("Saved {} records to {:?}", catalog.len(), path);
    Ok(())
}
