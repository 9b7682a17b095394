//! Test fixture creation for catalogs and record files

use super::constants::*;
use anyhow::Result;
use library_catalog::catalog::{Availability, AvailabilityState, Catalog, Record};
use std::path::PathBuf;
use tempfile::TempDir;

/// Five records over two categories, covering every availability phrase.
pub fn test_records() -> Vec<Record> {
    vec![
        Record::new(DUNE_ID)
            .with_title("Dune")
            .with_author("Frank Herbert")
            .with_year(1965)
            .with_category(SCIENCE_FICTION)
            .with_availability(Availability::available_at("Shelf A3")),
        Record::new(LEFT_HAND_ID)
            .with_title("The Left Hand of Darkness")
            .with_author("Ursula K. Le Guin")
            .with_year(1969)
            .with_category(SCIENCE_FICTION)
            .with_availability(Availability::checked_out_until("2024-06-30")),
        Record::new(LEAVES_ID)
            .with_title("Leaves of Grass")
            .with_author("Walt Whitman")
            .with_year(1855)
            .with_category(POETRY),
        Record::new(FOUNDATION_ID)
            .with_title("Foundation")
            .with_author("Isaac Asimov")
            .with_year(1951)
            .with_category(SCIENCE_FICTION)
            .with_availability(Availability {
                state: AvailabilityState::Available,
                location: None,
                due_date: None,
            }),
        Record::new(ARIEL_ID)
            .with_title("Ariel")
            .with_author("Sylvia Plath")
            .with_year(1965)
            .with_category(POETRY)
            .with_availability(Availability {
                state: AvailabilityState::CheckedOut,
                location: None,
                due_date: None,
            }),
    ]
}

pub fn create_test_catalog() -> Catalog {
    Catalog::with_records(test_records())
}

/// Writes the test records as JSON into a temporary directory.
/// Returns (temp_dir, records_path)
pub fn write_test_records() -> Result<(TempDir, PathBuf)> {
    let dir = TempDir::new()?;
    let path = dir.path().join("records.json");
    std::fs::write(&path, serde_json::to_string_pretty(&test_records())?)?;
    Ok((dir, path))
}
