use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::bookmarks::bookmark::{Bookmark, BookmarkChanges, NewBookmark};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortField {
    #[default]
    CreatedAt,
    UpdatedAt,
    Title,
    Url,
    IsFavorite,
}

impl SortField {
    /// Accepts the public (camelCase) field names; anything else falls back to `createdAt`.
    pub fn parse(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            Some("updatedAt") => SortField::UpdatedAt,
            Some("title") => SortField::Title,
            Some("url") => SortField::Url,
            Some("isFavorite") => SortField::IsFavorite,
            _ => SortField::CreatedAt,
        }
    }

    pub fn column(self) -> &'static str {
        match self {
            SortField::CreatedAt => "created_at",
            SortField::UpdatedAt => "updated_at",
            SortField::Title => "title",
            SortField::Url => "url",
            SortField::IsFavorite => "is_favorite",
        }
    }
}

/// Owner-scoped listing filter. All optional predicates are AND-ed with the owner predicate.
#[derive(Debug, Clone)]
pub struct BookmarkQuery {
    pub owner_id: Uuid,
    pub tag: Option<String>,
    pub favorite: Option<bool>,
    pub search: Option<String>,
    pub sort: SortField,
    pub limit: i64,
    pub offset: i64,
}

#[derive(Debug, Clone)]
pub struct BookmarkPage {
    pub items: Vec<Bookmark>,
    pub total: i64,
}

#[async_trait]
pub trait BookmarkRepository: Send + Sync {
    async fn create(&self, new: NewBookmark) -> anyhow::Result<Bookmark>;

    async fn get_by_id(&self, id: Uuid) -> anyhow::Result<Option<Bookmark>>;

    // None when the bookmark is missing or belongs to someone else
    async fn find_owned(&self, id: Uuid, owner_id: Uuid) -> anyhow::Result<Option<Bookmark>>;

    async fn list(&self, query: &BookmarkQuery) -> anyhow::Result<BookmarkPage>;

    async fn update(&self, id: Uuid, changes: BookmarkChanges) -> anyhow::Result<Option<Bookmark>>;

    async fn delete(&self, id: Uuid) -> anyhow::Result<bool>;
}
