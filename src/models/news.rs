//! Diesel models for news rows.

use chrono::{NaiveDateTime, Utc};
use diesel::prelude::*;

use crate::domain::news::{NewNews as DomainNewNews, News as DomainNews};
use crate::domain::types::{ContentTitle, ContentUrl, NewsId, RichText, TypeConstraintError};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::news)]
pub struct News {
    pub id: i32,
    pub title: String,
    pub content: String,
    pub image: Option<String>,
    pub pdf_url: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::news)]
pub struct NewNews<'a> {
    pub title: &'a str,
    pub content: &'a str,
    pub image: Option<&'a str>,
    pub pdf_url: Option<&'a str>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::news)]
#[diesel(treat_none_as_null = true)]
pub struct UpdateNews<'a> {
    pub title: &'a str,
    pub content: &'a str,
    pub image: Option<&'a str>,
    pub pdf_url: Option<&'a str>,
    pub updated_at: NaiveDateTime,
}

impl TryFrom<News> for DomainNews {
    type Error = TypeConstraintError;

    fn try_from(row: News) -> Result<Self, Self::Error> {
        Ok(Self {
            id: NewsId::new(row.id)?,
            title: ContentTitle::new(row.title)?,
            content: RichText::new(row.content),
            image: ContentUrl::parse_optional(row.image.as_deref())?,
            pdf_url: ContentUrl::parse_optional(row.pdf_url.as_deref())?,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

impl<'a> From<&'a DomainNewNews> for NewNews<'a> {
    fn from(new: &'a DomainNewNews) -> Self {
        let now = Utc::now().naive_utc();
        Self {
            title: new.title.as_str(),
            content: new.content.as_str(),
            image: new.image.as_ref().map(ContentUrl::as_str),
            pdf_url: new.pdf_url.as_ref().map(ContentUrl::as_str),
            created_at: now,
            updated_at: now,
        }
    }
}

impl<'a> From<&'a DomainNewNews> for UpdateNews<'a> {
    fn from(updates: &'a DomainNewNews) -> Self {
        Self {
            title: updates.title.as_str(),
            content: updates.content.as_str(),
            image: updates.image.as_ref().map(ContentUrl::as_str),
            pdf_url: updates.pdf_url.as_ref().map(ContentUrl::as_str),
            updated_at: Utc::now().naive_utc(),
        }
    }
}
