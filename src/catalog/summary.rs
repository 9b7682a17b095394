use super::{Availability, AvailabilityState, Record};

const UNKNOWN: &str = "Unknown";

/// One-line synopsis of a record, e.g. `Dune by Frank Herbert (1965) - Available at Shelf 3`.
pub fn summarize(record: &Record) -> String {
    let year = record
        .year
        .map(|y| y.to_string())
        .unwrap_or_else(|| UNKNOWN.to_string());
    format!(
        "{} by {} ({}) - {}",
        record.title.as_deref().unwrap_or(UNKNOWN),
        record.author.as_deref().unwrap_or(UNKNOWN),
        year,
        availability_phrase(record.availability.as_ref())
    )
}

pub fn availability_phrase(availability: Option<&Availability>) -> String {
    match availability {
        Some(Availability {
            state: AvailabilityState::Available,
            location,
            ..
        }) => format!(
            "Available at {}",
            location.as_deref().unwrap_or("Unknown Location")
        ),
        Some(Availability {
            state: AvailabilityState::CheckedOut,
            due_date,
            ..
        }) => format!(
            "Checked out, due on {}",
            due_date.as_deref().unwrap_or("N/A")
        ),
        None => "Status Unknown".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Record {
        Record::new(1)
            .with_title("Dune")
            .with_author("Frank Herbert")
            .with_year(1965)
    }

    #[test]
    fn available_with_location() {
        let record = base().with_availability(Availability::available_at("Shelf 3"));
        assert_eq!(
            summarize(&record),
            "Dune by Frank Herbert (1965) - Available at Shelf 3"
        );
    }

    #[test]
    fn available_without_location() {
        let record = base().with_availability(Availability {
            state: AvailabilityState::Available,
            location: None,
            due_date: None,
        });
        assert_eq!(
            summarize(&record),
            "Dune by Frank Herbert (1965) - Available at Unknown Location"
        );
    }

    #[test]
    fn checked_out_with_due_date() {
        let record = base().with_availability(Availability::checked_out_until("2024-05-01"));
        assert_eq!(
            summarize(&record),
            "Dune by Frank Herbert (1965) - Checked out, due on 2024-05-01"
        );
    }

    #[test]
    fn checked_out_without_due_date() {
        let record = base().with_availability(Availability {
            state: AvailabilityState::CheckedOut,
            location: Some("Ignored".to_string()),
            due_date: None,
        });
        assert_eq!(
            summarize(&record),
            "Dune by Frank Herbert (1965) - Checked out, due on N/A"
        );
    }

    #[test]
    fn missing_availability_is_status_unknown() {
        assert_eq!(
            summarize(&base()),
            "Dune by Frank Herbert (1965) - Status Unknown"
        );
    }

    #[test]
    fn missing_fields_render_as_unknown() {
        assert_eq!(
            summarize(&Record::new(9)),
            "Unknown by Unknown (Unknown) - Status Unknown"
        );
    }
}
