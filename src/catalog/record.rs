use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::warn;

#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case", try_from = "String")]
pub enum AvailabilityState {
    Available,
    CheckedOut,
}

impl AvailabilityState {
    pub fn as_str(&self) -> &'static str {
        match self {
            AvailabilityState::Available => "available",
            AvailabilityState::CheckedOut => "checked_out",
        }
    }
}

impl fmt::Display for AvailabilityState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AvailabilityState {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "available" => Ok(AvailabilityState::Available),
            "checked_out" | "checked-out" | "checked out" => Ok(AvailabilityState::CheckedOut),
            other => Err(format!("Unknown availability state \"{}\"", other)),
        }
    }
}

impl TryFrom<String> for AvailabilityState {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

#[derive(Clone, Serialize, Deserialize, Debug, PartialEq, Eq)]
pub struct Availability {
    pub state: AvailabilityState,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
}

impl Availability {
    pub fn available_at<S: Into<String>>(location: S) -> Availability {
        Availability {
            state: AvailabilityState::Available,
            location: Some(location.into()),
            due_date: None,
        }
    }

    pub fn checked_out_until<S: Into<String>>(due_date: S) -> Availability {
        Availability {
            state: AvailabilityState::CheckedOut,
            location: None,
            due_date: Some(due_date.into()),
        }
    }
}

/// A single catalog entry.
///
/// Only the identifier is mandatory. Every other field may be missing,
/// and consumers render a missing value as unknown instead of failing.
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq, Eq)]
pub struct Record {
    pub id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_availability",
        skip_serializing_if = "Option::is_none"
    )]
    pub availability: Option<Availability>,
}

#[derive(Deserialize)]
struct RawAvailability {
    #[serde(default)]
    state: Option<String>,
    #[serde(default)]
    location: Option<String>,
    #[serde(default)]
    due_date: Option<String>,
}

/// Reads an availability block, turning a missing or unrecognised state
/// into unknown availability instead of failing the whole record.
fn lenient_availability<'de, D>(deserializer: D) -> Result<Option<Availability>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(raw) = Option::<RawAvailability>::deserialize(deserializer)? else {
        return Ok(None);
    };
    let state = match raw.state.as_deref().map(str::parse::<AvailabilityState>) {
        Some(Ok(state)) => state,
        Some(Err(err)) => {
            warn!("{}, treating availability as unknown", err);
            return Ok(None);
        }
        None => {
            warn!("Availability without a state, treating it as unknown");
            return Ok(None);
        }
    };
    Ok(Some(Availability {
        state,
        location: raw.location,
        due_date: raw.due_date,
    }))
}

impl Record {
    pub fn new(id: i64) -> Record {
        Record {
            id,
            title: None,
            author: None,
            year: None,
            category: None,
            availability: None,
        }
    }

    pub fn with_title<S: Into<String>>(mut self, title: S) -> Record {
        self.title = Some(title.into());
        self
    }

    pub fn with_author<S: Into<String>>(mut self, author: S) -> Record {
        self.author = Some(author.into());
        self
    }

    pub fn with_year(mut self, year: i32) -> Record {
        self.year = Some(year);
        self
    }

    pub fn with_category<S: Into<String>>(mut self, category: S) -> Record {
        self.category = Some(category.into());
        self
    }

    pub fn with_availability(mut self, availability: Availability) -> Record {
        self.availability = Some(availability);
        self
    }

    pub fn state(&self) -> Option<AvailabilityState> {
        self.availability.as_ref().map(|a| a.state)
    }

    /// Fills the blanks of this record with the values carried by `updates`.
    ///
    /// A field is written only when it is `None` here. Present values are
    /// kept even when they are empty strings or zero. Availability merges
    /// field by field; a record with no availability adopts the update's
    /// one, provided the update names a state.
    pub fn merge(&mut self, updates: &RecordUpdate) {
        fill(&mut self.title, &updates.title);
        fill(&mut self.author, &updates.author);
        fill(&mut self.year, &updates.year);
        fill(&mut self.category, &updates.category);

        let Some(availability_update) = updates.availability.as_ref() else {
            return;
        };
        match self.availability.as_mut() {
            Some(availability) => {
                fill(&mut availability.location, &availability_update.location);
                fill(&mut availability.due_date, &availability_update.due_date);
            }
            None => {
                if let Some(state) = availability_update.state {
                    self.availability = Some(Availability {
                        state,
                        location: availability_update.location.clone(),
                        due_date: availability_update.due_date.clone(),
                    });
                }
            }
        }
    }
}

fn fill<T: Clone>(current: &mut Option<T>, update: &Option<T>) {
    if current.is_none() {
        current.clone_from(update);
    }
}

#[derive(Clone, Serialize, Deserialize, Debug, Default, PartialEq, Eq)]
#[serde(default)]
pub struct AvailabilityUpdate {
    pub state: Option<AvailabilityState>,
    pub location: Option<String>,
    pub due_date: Option<String>,
}

impl AvailabilityUpdate {
    pub fn is_empty(&self) -> bool {
        self.state.is_none() && self.location.is_none() && self.due_date.is_none()
    }
}

/// Partial record used by [`Record::merge`].
#[derive(Clone, Serialize, Deserialize, Debug, Default, PartialEq, Eq)]
#[serde(default)]
pub struct RecordUpdate {
    pub title: Option<String>,
    pub author: Option<String>,
    pub year: Option<i32>,
    pub category: Option<String>,
    pub availability: Option<AvailabilityUpdate>,
}

impl RecordUpdate {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.author.is_none()
            && self.year.is_none()
            && self.category.is_none()
            && self.availability.as_ref().map_or(true, |a| a.is_empty())
    }
}
