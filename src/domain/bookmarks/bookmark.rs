use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct Bookmark {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub title: String,
    pub url: String,
    pub tags: Vec<String>,
    pub is_favorite: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Clone)]
pub struct NewBookmark {
    pub owner_id: Uuid,
    pub title: String,
    pub url: String,
    pub tags: Vec<String>,
    pub is_favorite: bool,
}

/// Partial update; `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default)]
pub struct BookmarkChanges {
    pub title: Option<String>,
    pub url: Option<String>,
    pub tags: Option<Vec<String>>,
    pub is_favorite: Option<bool>,
}

impl BookmarkChanges {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.url.is_none() && self.tags.is_none() && self.is_favorite.is_none()
    }
}

/// Trims a required text field, returning `None` when nothing is left.
pub fn normalize_required(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Tags are stored trimmed and lower-cased, in the order given. Blank entries are dropped.
pub fn normalize_tags<I, S>(tags: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    tags.into_iter()
        .map(|t| t.as_ref().trim().to_lowercase())
        .filter(|t| !t.is_empty())
        .collect()
}
