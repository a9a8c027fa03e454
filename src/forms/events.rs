use chrono::NaiveDateTime;
use serde::Deserialize;
use serde_json::Value;
use validator::Validate;

use crate::domain::event::NewEvent;
use crate::forms::{FormError, empty_as_none};

/// Formats accepted from `datetime-local` inputs.
const DATETIME_FORMATS: [&str; 3] = ["%Y-%m-%dT%H:%M", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"];

#[derive(Debug, Deserialize, Validate)]
/// Form data for creating or editing an event.
pub struct EventForm {
    #[validate(length(min = 1, max = 255))]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, deserialize_with = "empty_as_none")]
    #[validate(length(max = 255))]
    pub location: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub starts_at: Option<String>,
    /// JSON array of agenda entries.
    #[serde(default, deserialize_with = "empty_as_none")]
    pub agenda: Option<String>,
    /// JSON array of speakers.
    #[serde(default, deserialize_with = "empty_as_none")]
    pub speakers: Option<String>,
}

fn parse_json(field: &'static str, raw: Option<&str>) -> Result<Value, FormError> {
    match raw {
        None => Ok(Value::Null),
        Some(raw) => serde_json::from_str(raw).map_err(|err| FormError::InvalidJson {
            field,
            message: err.to_string(),
        }),
    }
}

fn parse_starts_at(raw: Option<&str>) -> Result<Option<NaiveDateTime>, FormError> {
    let Some(raw) = raw else {
        return Ok(None);
    };
    DATETIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
        .map(Some)
        .ok_or_else(|| FormError::InvalidDate(raw.to_string()))
}

impl TryFrom<EventForm> for NewEvent {
    type Error = FormError;

    fn try_from(form: EventForm) -> Result<Self, Self::Error> {
        form.validate()?;
        let starts_at = parse_starts_at(form.starts_at.as_deref())?;
        let agenda = parse_json("agenda", form.agenda.as_deref())?;
        let speakers = parse_json("speakers", form.speakers.as_deref())?;

        Ok(NewEvent::try_new(
            form.title,
            form.description,
            form.location.as_deref(),
            starts_at,
            agenda,
            speakers,
        )?)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn form(agenda: Option<&str>, starts_at: Option<&str>) -> EventForm {
        EventForm {
            title: "Investor day".into(),
            description: "Annual meeting".into(),
            location: Some("Main hall".into()),
            starts_at: starts_at.map(String::from),
            agenda: agenda.map(String::from),
            speakers: None,
        }
    }

    #[test]
    fn parses_datetime_local_and_json() {
        let event = NewEvent::try_from(form(
            Some(r#"[{"time": "10:00", "topic": "Opening"}]"#),
            Some("2026-03-01T10:00"),
        ))
        .unwrap();

        assert_eq!(event.agenda[0]["topic"], json!("Opening"));
        assert_eq!(event.speakers, json!([]));
        assert_eq!(
            event.starts_at.unwrap().format("%Y-%m-%d %H:%M").to_string(),
            "2026-03-01 10:00"
        );
    }

    #[test]
    fn broken_json_is_reported_per_field() {
        let err = NewEvent::try_from(form(Some("[1, 2"), None)).unwrap_err();
        assert!(matches!(err, FormError::InvalidJson { field: "agenda", .. }));
    }

    #[test]
    fn unknown_date_format_is_rejected() {
        let err = NewEvent::try_from(form(None, Some("next monday"))).unwrap_err();
        assert!(matches!(err, FormError::InvalidDate(_)));
    }
}
