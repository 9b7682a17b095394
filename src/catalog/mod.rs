mod catalog;
mod load;
mod record;
mod search;
mod statistics;
mod summary;

pub use catalog::{Catalog, CategoryGroups, TitleSequence, Titles};
pub use load::{load_catalog, save_catalog};
pub use record::{Availability, AvailabilityState, AvailabilityUpdate, Record, RecordUpdate};
pub use search::SearchCriteria;
pub use statistics::Statistics;
pub use summary::{availability_phrase, summarize};
