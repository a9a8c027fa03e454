use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::{AnnouncementId, ContentTitle, ContentUrl, RichText, TypeConstraintError};

/// Short notice shown on the landing page and the announcements list.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Announcement {
    pub id: AnnouncementId,
    pub title: ContentTitle,
    pub description: RichText,
    pub image: Option<ContentUrl>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Payload used for both inserting and updating an announcement.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct NewAnnouncement {
    pub title: ContentTitle,
    pub description: RichText,
    pub image: Option<ContentUrl>,
}

impl NewAnnouncement {
    /// Validates raw input and builds the payload.
    pub fn try_new(
        title: impl Into<String>,
        description: impl Into<String>,
        image: Option<&str>,
    ) -> Result<Self, TypeConstraintError> {
        Ok(Self {
            title: ContentTitle::new(title)?,
            description: RichText::new(description),
            image: ContentUrl::parse_optional(image)?,
        })
    }
}
