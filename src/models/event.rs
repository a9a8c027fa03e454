//! Diesel models for event rows. Agenda and speakers are stored as JSON text.

use chrono::{NaiveDateTime, Utc};
use diesel::prelude::*;
use serde_json::Value;

use crate::domain::event::{Event as DomainEvent, NewEvent as DomainNewEvent};
use crate::domain::types::{
    ContentTitle, EventId, EventLocation, RichText, TypeConstraintError,
};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::events)]
pub struct Event {
    pub id: String,
    pub title: String,
    pub description: String,
    pub location: Option<String>,
    pub starts_at: Option<NaiveDateTime>,
    pub agenda: String,
    pub speakers: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::events)]
pub struct NewEvent<'a> {
    pub id: String,
    pub title: &'a str,
    pub description: &'a str,
    pub location: Option<&'a str>,
    pub starts_at: Option<NaiveDateTime>,
    pub agenda: String,
    pub speakers: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::events)]
#[diesel(treat_none_as_null = true)]
pub struct UpdateEvent<'a> {
    pub title: &'a str,
    pub description: &'a str,
    pub location: Option<&'a str>,
    pub starts_at: Option<NaiveDateTime>,
    pub agenda: String,
    pub speakers: String,
    pub updated_at: NaiveDateTime,
}

/// Unreadable JSON in a stored blob is shown as an empty list.
fn parse_blob(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|err| {
        log::warn!("Discarding malformed event JSON blob: {err}");
        Value::Array(Vec::new())
    })
}

impl TryFrom<Event> for DomainEvent {
    type Error = TypeConstraintError;

    fn try_from(row: Event) -> Result<Self, Self::Error> {
        let location = match row.location.as_deref().map(str::trim) {
            Some(location) if !location.is_empty() => Some(EventLocation::new(location)?),
            _ => None,
        };

        Ok(Self {
            id: row.id.parse()?,
            title: ContentTitle::new(row.title)?,
            description: RichText::new(row.description),
            location,
            starts_at: row.starts_at,
            agenda: parse_blob(&row.agenda),
            speakers: parse_blob(&row.speakers),
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

impl<'a> NewEvent<'a> {
    /// Builds the insertable row under a freshly generated id.
    pub fn with_id(id: EventId, new: &'a DomainNewEvent) -> Self {
        let now = Utc::now().naive_utc();
        Self {
            id: id.to_string(),
            title: new.title.as_str(),
            description: new.description.as_str(),
            location: new.location.as_ref().map(EventLocation::as_str),
            starts_at: new.starts_at,
            agenda: new.agenda.to_string(),
            speakers: new.speakers.to_string(),
            created_at: now,
            updated_at: now,
        }
    }
}

impl<'a> From<&'a DomainNewEvent> for UpdateEvent<'a> {
    fn from(updates: &'a DomainNewEvent) -> Self {
        Self {
            title: updates.title.as_str(),
            description: updates.description.as_str(),
            location: updates.location.as_ref().map(EventLocation::as_str),
            starts_at: updates.starts_at,
            agenda: updates.agenda.to_string(),
            speakers: updates.speakers.to_string(),
            updated_at: Utc::now().naive_utc(),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn row(agenda: &str) -> Event {
        let now = Utc::now().naive_utc();
        Event {
            id: EventId::new().to_string(),
            title: "Annual meeting".to_string(),
            description: String::new(),
            location: None,
            starts_at: None,
            agenda: agenda.to_string(),
            speakers: "[{\"name\":\"Ada\"}]".to_string(),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn row_into_domain_parses_blobs() {
        let event = DomainEvent::try_from(row("[\"Welcome\",\"Q&A\"]")).unwrap();
        assert_eq!(event.agenda, json!(["Welcome", "Q&A"]));
        assert_eq!(event.speakers, json!([{"name": "Ada"}]));
    }

    #[test]
    fn malformed_blob_becomes_empty_list() {
        let event = DomainEvent::try_from(row("{oops")).unwrap();
        assert_eq!(event.agenda, json!([]));
    }

    #[test]
    fn invalid_id_is_rejected() {
        let mut bad = row("[]");
        bad.id = "42".to_string();
        assert_eq!(
            DomainEvent::try_from(bad),
            Err(TypeConstraintError::InvalidUuid)
        );
    }
}
