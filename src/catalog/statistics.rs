use super::{AvailabilityState, Record};
use serde::Serialize;
use std::fmt;

/// Aggregate availability counts over a sequence of records.
#[derive(Clone, Copy, Serialize, Debug, Default, PartialEq, Eq)]
pub struct Statistics {
    pub total: usize,
    pub available: usize,
    pub checked_out: usize,
}

impl Statistics {
    pub fn compute(records: &[Record]) -> Statistics {
        records
            .iter()
            .fold(Statistics::default(), |mut stats, record| {
                stats.total += 1;
                match record.state() {
                    Some(AvailabilityState::Available) => stats.available += 1,
                    Some(AvailabilityState::CheckedOut) => stats.checked_out += 1,
                    None => {}
                }
                stats
            })
    }

    /// Records whose availability is not known.
    pub fn unknown(&self) -> usize {
        self.total
            .saturating_sub(self.available)
            .saturating_sub(self.checked_out)
    }
}

impl fmt::Display for Statistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Total: {} | Available: {} | Checked out: {}",
            self.total, self.available, self.checked_out
        )?;
        if self.unknown() > 0 {
            write!(f, " | Unknown: {}", self.unknown())?;
        }
        Ok(())
    }
}
