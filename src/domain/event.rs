use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::types::{ContentTitle, EventId, EventLocation, RichText, TypeConstraintError};

/// Conference, webinar or meetup with a structured agenda and speaker list.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Event {
    pub id: EventId,
    pub title: ContentTitle,
    pub description: RichText,
    pub location: Option<EventLocation>,
    pub starts_at: Option<NaiveDateTime>,
    /// Ordered agenda items, stored as a JSON array.
    pub agenda: Value,
    /// Speaker cards, stored as a JSON array.
    pub speakers: Value,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct NewEvent {
    pub title: ContentTitle,
    pub description: RichText,
    pub location: Option<EventLocation>,
    pub starts_at: Option<NaiveDateTime>,
    pub agenda: Value,
    pub speakers: Value,
}

/// Agenda and speakers must be JSON arrays; `null` means empty.
fn json_list(value: Value, field: &str) -> Result<Value, TypeConstraintError> {
    match value {
        Value::Null => Ok(Value::Array(Vec::new())),
        Value::Array(_) => Ok(value),
        _ => Err(TypeConstraintError::InvalidValue(format!(
            "{field} must be a JSON array"
        ))),
    }
}

impl NewEvent {
    pub fn try_new(
        title: impl Into<String>,
        description: impl Into<String>,
        location: Option<&str>,
        starts_at: Option<NaiveDateTime>,
        agenda: Value,
        speakers: Value,
    ) -> Result<Self, TypeConstraintError> {
        let location = match location.map(str::trim).filter(|s| !s.is_empty()) {
            Some(location) => Some(EventLocation::new(location)?),
            None => None,
        };

        Ok(Self {
            title: ContentTitle::new(title)?,
            description: RichText::new(description),
            location,
            starts_at,
            agenda: json_list(agenda, "agenda")?,
            speakers: json_list(speakers, "speakers")?,
        })
    }
}
