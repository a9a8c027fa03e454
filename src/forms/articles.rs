use serde::Deserialize;
use validator::Validate;

use crate::domain::article::NewArticle;
use crate::forms::{FormError, empty_as_none};

#[derive(Debug, Deserialize, Validate)]
/// Form data for creating or editing an article.
pub struct ArticleForm {
    #[validate(length(min = 1, max = 255))]
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default, deserialize_with = "empty_as_none")]
    #[validate(url)]
    pub image: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none")]
    #[validate(url)]
    pub pdf_url: Option<String>,
}

impl TryFrom<ArticleForm> for NewArticle {
    type Error = FormError;

    fn try_from(form: ArticleForm) -> Result<Self, Self::Error> {
        form.validate()?;
        Ok(NewArticle::try_new(
            form.title,
            form.content,
            form.image.as_deref(),
            form.pdf_url.as_deref(),
        )?)
    }
}
