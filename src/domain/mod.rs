//! Domain aggregates exposed by the content service layer.

use std::str::FromStr;

use serde::Serialize;

use crate::domain::types::TypeConstraintError;

pub mod announcement;
pub mod article;
pub mod event;
pub mod news;
pub mod settings;
pub mod types;

/// The content tables managed by the dashboard and served by the public API.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentKind {
    Announcements,
    Articles,
    News,
    Events,
}

impl ContentKind {
    pub const ALL: [ContentKind; 4] = [
        ContentKind::Announcements,
        ContentKind::Articles,
        ContentKind::News,
        ContentKind::Events,
    ];

    /// Path segment used by both the dashboard and the public API.
    pub const fn slug(self) -> &'static str {
        match self {
            ContentKind::Announcements => "announcements",
            ContentKind::Articles => "articles",
            ContentKind::News => "news",
            ContentKind::Events => "events",
        }
    }

    /// Human readable heading for list screens.
    pub const fn title(self) -> &'static str {
        match self {
            ContentKind::Announcements => "Announcements",
            ContentKind::Articles => "Articles",
            ContentKind::News => "News & press releases",
            ContentKind::Events => "Events",
        }
    }
}

impl FromStr for ContentKind {
    type Err = TypeConstraintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ContentKind::ALL
            .into_iter()
            .find(|kind| kind.slug() == s)
            .ok_or_else(|| TypeConstraintError::InvalidValue(format!("unknown content kind {s:?}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_slugs() {
        assert_eq!("news".parse::<ContentKind>(), Ok(ContentKind::News));
        assert_eq!("events".parse::<ContentKind>(), Ok(ContentKind::Events));
        assert!("clients".parse::<ContentKind>().is_err());
    }

    #[test]
    fn slugs_are_unique() {
        let mut slugs: Vec<_> = ContentKind::ALL.iter().map(|k| k.slug()).collect();
        slugs.sort_unstable();
        slugs.dedup();
        assert_eq!(slugs.len(), ContentKind::ALL.len());
    }
}
