//! Diesel models for article rows.

use chrono::{NaiveDateTime, Utc};
use diesel::prelude::*;

use crate::domain::article::{Article as DomainArticle, NewArticle as DomainNewArticle};
use crate::domain::types::{ArticleId, ContentTitle, ContentUrl, RichText, TypeConstraintError};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::articles)]
pub struct Article {
    pub id: i32,
    pub title: String,
    pub content: String,
    pub image: Option<String>,
    pub pdf_url: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::articles)]
pub struct NewArticle<'a> {
    pub title: &'a str,
    pub content: &'a str,
    pub image: Option<&'a str>,
    pub pdf_url: Option<&'a str>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::articles)]
#[diesel(treat_none_as_null = true)]
pub struct UpdateArticle<'a> {
    pub title: &'a str,
    pub content: &'a str,
    pub image: Option<&'a str>,
    pub pdf_url: Option<&'a str>,
    pub updated_at: NaiveDateTime,
}

impl TryFrom<Article> for DomainArticle {
    type Error = TypeConstraintError;

    fn try_from(row: Article) -> Result<Self, Self::Error> {
        Ok(Self {
            id: ArticleId::new(row.id)?,
            title: ContentTitle::new(row.title)?,
            content: RichText::new(row.content),
            image: ContentUrl::parse_optional(row.image.as_deref())?,
            pdf_url: ContentUrl::parse_optional(row.pdf_url.as_deref())?,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

impl<'a> From<&'a DomainNewArticle> for NewArticle<'a> {
    fn from(new: &'a DomainNewArticle) -> Self {
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

impl<'a> From<&'a DomainNewArticle> for UpdateArticle<'a> {
    fn from(updates: &'a DomainNewArticle) -> Self {
        Self {
            title: updates.title.as_str(),
            content: updates.content.as_str(),
            image: updates.image.as_ref().map(ContentUrl::as_str),
            pdf_url: updates.pdf_url.as_ref().map(ContentUrl::as_str),
            updated_at: Utc::now().naive_utc(),
        }
    }
}
