//! Diesel models for announcement rows.

use chrono::{NaiveDateTime, Utc};
use diesel::prelude::*;

use crate::domain::announcement::{
    Announcement as DomainAnnouncement, NewAnnouncement as DomainNewAnnouncement,
};
use crate::domain::types::{AnnouncementId, ContentTitle, ContentUrl, RichText, TypeConstraintError};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::announcements)]
pub struct Announcement {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub image: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::announcements)]
pub struct NewAnnouncement<'a> {
    pub title: &'a str,
    pub description: &'a str,
    pub image: Option<&'a str>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::announcements)]
#[diesel(treat_none_as_null = true)]
pub struct UpdateAnnouncement<'a> {
    pub title: &'a str,
    pub description: &'a str,
    pub image: Option<&'a str>,
    pub updated_at: NaiveDateTime,
}

impl TryFrom<Announcement> for DomainAnnouncement {
    type Error = TypeConstraintError;

    fn try_from(row: Announcement) -> Result<Self, Self::Error> {
        Ok(Self {
            id: AnnouncementId::new(row.id)?,
            title: ContentTitle::new(row.title)?,
            description: RichText::new(row.description),
            image: ContentUrl::parse_optional(row.image.as_deref())?,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

impl<'a> From<&'a DomainNewAnnouncement> for NewAnnouncement<'a> {
    fn from(new: &'a DomainNewAnnouncement) -> Self {
        let now = Utc::now().naive_utc();
        Self {
            title: new.title.as_str(),
            description: new.description.as_str(),
            image: new.image.as_ref().map(ContentUrl::as_str),
            created_at: now,
            updated_at: now,
        }
    }
}

impl<'a> From<&'a DomainNewAnnouncement> for UpdateAnnouncement<'a> {
    fn from(updates: &'a DomainNewAnnouncement) -> Self {
        Self {
            title: updates.title.as_str(),
            description: updates.description.as_str(),
            image: updates.image.as_ref().map(ContentUrl::as_str),
            updated_at: Utc::now().naive_utc(),
        }
    }
}
