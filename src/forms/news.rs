use serde::Deserialize;
use validator::Validate;

use crate::domain::news::NewNews;
use crate::forms::{FormError, empty_as_none};

#[derive(Debug, Deserialize, Validate)]
/// Form data for a news item or press release.
pub struct NewsForm {
    #[validate(length(min = 1, max = 255))]
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default, deserialize_with = "empty_as_none")]
    #[validate(url)]
    pub image: Option<String>,
    /// Link to the press release document.
    #[serde(default, deserialize_with = "empty_as_none")]
    #[validate(url)]
    pub pdf_url: Option<String>,
}

impl TryFrom<NewsForm> for NewNews {
    type Error = FormError;

    fn try_from(form: NewsForm) -> Result<Self, Self::Error> {
        form.validate()?;
        Ok(NewNews::try_new(
            form.title,
            form.content,
            form.image.as_deref(),
            form.pdf_url.as_deref(),
        )?)
    }
}
