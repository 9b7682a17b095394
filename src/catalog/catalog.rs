use super::{summary, AvailabilityState, Record, RecordUpdate, SearchCriteria, Statistics};
use indexmap::IndexMap;
use tracing::debug;

/// Records grouped by category, in the order categories were first seen.
/// Records without a category are grouped under `None`.
pub type CategoryGroups<'a> = IndexMap<Option<&'a str>, Vec<&'a Record>>;

#[derive(Debug, Clone, Default)]
pub struct Catalog {
    records: Vec<Record>,
    statistics: Statistics,
}

impl Catalog {
    pub fn new() -> Catalog {
        Catalog::default()
    }

    pub fn with_records(records: Vec<Record>) -> Catalog {
        let statistics = Statistics::compute(&records);
        Catalog {
            records,
            statistics,
        }
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// First record carrying the given identifier.
    pub fn get(&self, id: i64) -> Option<&Record> {
        self.records.iter().find(|r| r.id == id)
    }

    /// Appends the records at the end of the catalog, keeping their order.
    /// Identifiers are not de-duplicated.
    pub fn add(&mut self, records: Vec<Record>) {
        if records.is_empty() {
            return;
        }
        let added = records.len();
        self.records.extend(records);
        self.refresh_statistics();
        debug!("Added {} records, catalog now has {}", added, self.len());
    }

    /// Merges `updates` into the first record with the given identifier,
    /// only filling fields that are absent. Returns false, leaving the
    /// catalog untouched, when no such record exists.
    pub fn update(&mut self, id: i64, updates: &RecordUpdate) -> bool {
        let Some(record) = self.records.iter_mut().find(|r| r.id == id) else {
            debug!("Update ignored, no record with id {}", id);
            return false;
        };
        if updates.is_empty() {
            debug!("Nothing to merge into record {}", id);
            return true;
        }
        record.merge(updates);
        self.refresh_statistics();
        true
    }

    pub fn statistics(&self) -> Statistics {
        self.statistics
    }

    pub fn search(&self, criteria: &SearchCriteria, case_sensitive: bool) -> Vec<&Record> {
        if criteria.is_empty() {
            return self.records.iter().collect();
        }
        self.records
            .iter()
            .filter(|r| criteria.matches(r, case_sensitive))
            .collect()
    }

    /// Case-insensitive [`Catalog::search`].
    pub fn search_default(&self, criteria: &SearchCriteria) -> Vec<&Record> {
        self.search(criteria, false)
    }

    pub fn group_by_category(&self) -> CategoryGroups<'_> {
        let mut groups = CategoryGroups::new();
        for record in self.records.iter() {
            groups
                .entry(record.category.as_deref())
                .or_insert_with(Vec::new)
                .push(record);
        }
        groups
    }

    pub fn filter_by_status(&self, state: AvailabilityState) -> Vec<&Record> {
        self.records
            .iter()
            .filter(|r| r.state() == Some(state))
            .collect()
    }

    /// Like [`Catalog::filter_by_status`], parsing the state name.
    /// Unknown names match nothing.
    pub fn filter_by_status_name(&self, state: &str) -> Vec<&Record> {
        match state.parse::<AvailabilityState>() {
            Ok(state) => self.filter_by_status(state),
            Err(_) => vec![],
        }
    }

    pub fn title_sequence(&self) -> TitleSequence<'_> {
        TitleSequence {
            records: &self.records,
        }
    }

    pub fn summarize(&self, record: &Record) -> String {
        summary::summarize(record)
    }

    fn refresh_statistics(&mut self) {
        self.statistics = Statistics::compute(&self.records);
    }
}

/// Lazy view over the titles of a catalog.
///
/// Every call to [`TitleSequence::iter`] starts again from the first record,
/// yielding one entry per record (`None` for untitled ones).
#[derive(Debug, Clone, Copy)]
pub struct TitleSequence<'a> {
    records: &'a [Record],
}

impl<'a> TitleSequence<'a> {
    pub fn iter(&self) -> Titles<'a> {
        Titles {
            inner: self.records.iter(),
        }
    }
}

impl<'a> IntoIterator for TitleSequence<'a> {
    type Item = Option<&'a str>;
    type IntoIter = Titles<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[derive(Debug, Clone)]
pub struct Titles<'a> {
    inner: std::slice::Iter<'a, Record>,
}

impl<'a> Iterator for Titles<'a> {
    type Item = Option<&'a str>;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|r| r.title.as_deref())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for Titles<'_> {}
