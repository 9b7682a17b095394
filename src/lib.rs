//! Library Catalog
//!
//! An in-memory catalog of book-like records with search, grouping,
//! availability filtering and statistics, plus a small memoization helper
//! for pure functions. The `library-catalog` binary is a console front-end
//! over this library.

pub mod catalog;
pub mod config;
pub mod memoize;

// Re-export commonly used types for convenience
pub use catalog::{Catalog, Record, RecordUpdate, SearchCriteria, Statistics};
pub use memoize::{memoize, Memoize};
