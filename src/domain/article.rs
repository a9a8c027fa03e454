use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::{ArticleId, ContentTitle, ContentUrl, RichText, TypeConstraintError};

/// Long-form article, optionally shipped with a downloadable PDF.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Article {
    pub id: ArticleId,
    pub title: ContentTitle,
    pub content: RichText,
    pub image: Option<ContentUrl>,
    pub pdf_url: Option<ContentUrl>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Payload used for both inserting and updating an article.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct NewArticle {
    pub title: ContentTitle,
    pub content: RichText,
    pub image: Option<ContentUrl>,
    pub pdf_url: Option<ContentUrl>,
}

impl NewArticle {
    pub fn try_new(
        title: impl Into<String>,
        content: impl Into<String>,
        image: Option<&str>,
        pdf_url: Option<&str>,
    ) -> Result<Self, TypeConstraintError> {
        Ok(Self {
            title: ContentTitle::new(title)?,
            content: RichText::new(content),
            image: ContentUrl::parse_optional(image)?,
            pdf_url: ContentUrl::parse_optional(pdf_url)?,
        })
    }
}
