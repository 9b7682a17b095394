//! Shared constants for integration tests
//!
//! When the fixture records change, update only this file.

// ============================================================================
// Test Record IDs
// ============================================================================

/// "Dune", Science Fiction, available on shelf A3
pub const DUNE_ID: i64 = 1;

/// "The Left Hand of Darkness", Science Fiction, checked out
pub const LEFT_HAND_ID: i64 = 2;

/// "Leaves of Grass", Poetry, no availability information
pub const LEAVES_ID: i64 = 3;

/// "Foundation", Science Fiction, available with no location
pub const FOUNDATION_ID: i64 = 4;

/// "Ariel", Poetry, checked out with no due date
pub const ARIEL_ID: i64 = 5;

// ============================================================================
// Test Record Fields
// ============================================================================

pub const SCIENCE_FICTION: &str = "Science Fiction";
pub const POETRY: &str = "Poetry";

pub const RECORDS_COUNT: usize = 5;
pub const AVAILABLE_COUNT: usize = 2;
pub const CHECKED_OUT_COUNT: usize = 2;
