use serde::Serialize;

use crate::domain::ContentKind;
use crate::screen::ListView;

/// Data required to render one content list.
#[derive(Debug, Serialize)]
pub struct ListPageData<T> {
    pub kind: ContentKind,
    /// Zero-based page the list is on.
    pub page: usize,
    pub page_size: usize,
    /// Query string that reloads this exact page, e.g. `?page=2&size=20`.
    pub query: String,
    pub view: ListView<T>,
}
