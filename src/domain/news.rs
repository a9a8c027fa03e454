use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::{ContentTitle, ContentUrl, NewsId, RichText, TypeConstraintError};

/// News item or press release. IR materials carry their document in `pdf_url`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct News {
    pub id: NewsId,
    pub title: ContentTitle,
    pub content: RichText,
    pub image: Option<ContentUrl>,
    pub pdf_url: Option<ContentUrl>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct NewNews {
    pub title: ContentTitle,
    pub content: RichText,
    pub image: Option<ContentUrl>,
    pub pdf_url: Option<ContentUrl>,
}

impl NewNews {
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_pdf_url_is_rejected() {
        assert_eq!(
            NewNews::try_new("FY report", "", None, Some("report.pdf")),
            Err(TypeConstraintError::InvalidUrl)
        );
    }
}
