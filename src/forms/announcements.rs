use serde::Deserialize;
use validator::Validate;

use crate::domain::announcement::NewAnnouncement;
use crate::forms::{FormError, empty_as_none};

#[derive(Debug, Deserialize, Validate)]
/// Form data for creating or editing an announcement.
pub struct AnnouncementForm {
    #[validate(length(min = 1, max = 255))]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, deserialize_with = "empty_as_none")]
    #[validate(url)]
    pub image: Option<String>,
}

impl TryFrom<AnnouncementForm> for NewAnnouncement {
    type Error = FormError;

    fn try_from(form: AnnouncementForm) -> Result<Self, Self::Error> {
        form.validate()?;
        Ok(NewAnnouncement::try_new(
            form.title,
            form.description,
            form.image.as_deref(),
        )?)
    }
}
