use uuid::Uuid;

use crate::application::ports::bookmark_repository::{BookmarkQuery, SortField};
use crate::domain::bookmarks::bookmark::Bookmark;

pub const DEFAULT_PAGE: i64 = 1;
pub const DEFAULT_LIMIT: i64 = 10;
pub const MAX_LIMIT: i64 = 50;

/// Raw listing parameters as they arrive on the query string.
#[derive(Debug, Clone, Default)]
pub struct ListBookmarksParams {
    pub page: Option<String>,
    pub limit: Option<String>,
    pub tag: Option<String>,
    pub favorite: Option<String>,
    pub search: Option<String>,
    pub sort: Option<String>,
}

#[derive(Debug, Clone)]
pub struct ListBookmarksOutput {
    pub page: i64,
    pub limit: i64,
    pub total: i64,
    pub total_pages: i64,
    pub items: Vec<Bookmark>,
}

// Unparsable and zero values both mean "use the default".
fn parse_nonzero(raw: Option<&str>) -> Option<i64> {
    raw.and_then(|s| s.trim().parse::<i64>().ok())
        .filter(|n| *n != 0)
}

pub fn clamp_page(raw: Option<&str>) -> i64 {
    parse_nonzero(raw).unwrap_or(DEFAULT_PAGE).max(1)
}

pub fn clamp_limit(raw: Option<&str>) -> i64 {
    parse_nonzero(raw)
        .unwrap_or(DEFAULT_LIMIT)
        .clamp(1, MAX_LIMIT)
}

pub fn total_pages(total: i64, limit: i64) -> i64 {
    if limit <= 0 {
        return 0;
    }
    (total + limit - 1) / limit
}

impl ListBookmarksParams {
    /// Returns the owner-scoped query plus the effective `page` for the response.
    pub fn into_query(self, owner_id: Uuid) -> (BookmarkQuery, i64) {
        let page = clamp_page(self.page.as_deref());
        let limit = clamp_limit(self.limit.as_deref());
        let tag = self
            .tag
            .map(|t| t.trim().to_lowercase())
            .filter(|t| !t.is_empty());
        let favorite = self.favorite.map(|f| f == "true");
        let search = self.search.filter(|s| !s.is_empty());
        let sort = SortField::parse(self.sort.as_deref());
        let query = BookmarkQuery {
            owner_id,
            tag,
            favorite,
            search,
            sort,
            limit,
            // Saturates so an absurd page lands past the end instead of overflowing.
            offset: (page - 1).saturating_mul(limit),
        };
        (query, page)
    }
}
