//! In-memory port implementations for unit and router tests.

use std::sync::Mutex;

use async_trait::async_trait;
use uuid::Uuid;

use crate::application::ports::bookmark_repository::{
    BookmarkPage, BookmarkQuery, BookmarkRepository, SortField,
};
use crate::application::ports::user_repository::{User, UserCredentials, UserRepository};
use crate::domain::bookmarks::bookmark::{Bookmark, BookmarkChanges, NewBookmark};
use crate::infrastructure::db::repositories::bookmark_repository_sqlx::contains_pattern;

/// Postgres `ILIKE` semantics: `%` any run, `_` one char, backslash escapes the next char.
fn ilike(pattern: &str, text: &str) -> bool {
    fn go(p: &[char], t: &[char]) -> bool {
        match p.split_first() {
            None => t.is_empty(),
            Some((&'%', rest)) => (0..=t.len()).any(|i| go(rest, &t[i..])),
            Some((&'_', rest)) => !t.is_empty() && go(rest, &t[1..]),
            Some((&'\\', rest)) => match rest.split_first() {
                Some((c, rest)) => t.first() == Some(c) && go(rest, &t[1..]),
                None => false,
            },
            Some((c, rest)) => t.first() == Some(c) && go(rest, &t[1..]),
        }
    }
    let p: Vec<char> = pattern.to_lowercase().chars().collect();
    let t: Vec<char> = text.to_lowercase().chars().collect();
    go(&p, &t)
}

#[derive(Default)]
pub struct InMemoryBookmarkRepository {
    rows: Mutex<Vec<Bookmark>>,
}

impl InMemoryBookmarkRepository {
    pub fn all(&self) -> Vec<Bookmark> {
        self.rows.lock().unwrap().clone()
    }

    fn matches(query: &BookmarkQuery, b: &Bookmark) -> bool {
        if b.owner_id != query.owner_id {
            return false;
        }
        if let Some(tag) = &query.tag {
            if !b.tags.iter().any(|t| t == tag) {
                return false;
            }
        }
        if let Some(fav) = query.favorite {
            if b.is_favorite != fav {
                return false;
            }
        }
        if let Some(search) = &query.search {
            let pattern = contains_pattern(search);
            let hit = ilike(&pattern, &b.title)
                || ilike(&pattern, &b.url)
                || b.tags.iter().any(|t| ilike(&pattern, t));
            if !hit {
                return false;
            }
        }
        true
    }
}

#[async_trait]
impl BookmarkRepository for InMemoryBookmarkRepository {
    async fn create(&self, new: NewBookmark) -> anyhow::Result<Bookmark> {
        // Keep creation order strictly increasing so sorting by created_at is deterministic.
        let mut rows = self.rows.lock().unwrap();
        let now = rows
            .iter()
            .map(|b| b.created_at)
            .max()
            .map(|last| last + chrono::Duration::milliseconds(1))
            .unwrap_or_else(chrono::Utc::now);
        let bookmark = Bookmark {
            id: Uuid::new_v4(),
            owner_id: new.owner_id,
            title: new.title,
            url: new.url,
            tags: new.tags,
            is_favorite: new.is_favorite,
            created_at: now,
            updated_at: now,
        };
        rows.push(bookmark.clone());
        Ok(bookmark)
    }

    async fn get_by_id(&self, id: Uuid) -> anyhow::Result<Option<Bookmark>> {
        Ok(self.rows.lock().unwrap().iter().find(|b| b.id == id).cloned())
    }

    async fn find_owned(&self, id: Uuid, owner_id: Uuid) -> anyhow::Result<Option<Bookmark>> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .find(|b| b.id == id && b.owner_id == owner_id)
            .cloned())
    }

    async fn list(&self, query: &BookmarkQuery) -> anyhow::Result<BookmarkPage> {
        let mut hits: Vec<Bookmark> = self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|b| Self::matches(query, b))
            .cloned()
            .collect();
        hits.sort_by(|a, b| {
            let primary = match query.sort {
                SortField::CreatedAt => b.created_at.cmp(&a.created_at),
                SortField::UpdatedAt => b.updated_at.cmp(&a.updated_at),
                SortField::Title => b.title.cmp(&a.title),
                SortField::Url => b.url.cmp(&a.url),
                SortField::IsFavorite => b.is_favorite.cmp(&a.is_favorite),
            };
            primary.then_with(|| b.id.cmp(&a.id))
        });
        let total = hits.len() as i64;
        let items = hits
            .into_iter()
            .skip(usize::try_from(query.offset).unwrap_or(usize::MAX))
            .take(usize::try_from(query.limit).unwrap_or(0))
            .collect();
        Ok(BookmarkPage { items, total })
    }

    async fn update(&self, id: Uuid, changes: BookmarkChanges) -> anyhow::Result<Option<Bookmark>> {
        let mut rows = self.rows.lock().unwrap();
        let Some(b) = rows.iter_mut().find(|b| b.id == id) else {
            return Ok(None);
        };
        if let Some(title) = changes.title {
            b.title = title;
        }
        if let Some(url) = changes.url {
            b.url = url;
        }
        if let Some(tags) = changes.tags {
            b.tags = tags;
        }
        if let Some(fav) = changes.is_favorite {
            b.is_favorite = fav;
        }
        b.updated_at = chrono::Utc::now();
        Ok(Some(b.clone()))
    }

    async fn delete(&self, id: Uuid) -> anyhow::Result<bool> {
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|b| b.id != id);
        Ok(rows.len() < before)
    }
}

/// Fails every call; used to exercise the 500 paths.
pub struct FailingBookmarkRepository;

#[async_trait]
impl BookmarkRepository for FailingBookmarkRepository {
    async fn create(&self, _new: NewBookmark) -> anyhow::Result<Bookmark> {
        anyhow::bail!("connection refused")
    }

    async fn get_by_id(&self, _id: Uuid) -> anyhow::Result<Option<Bookmark>> {
        anyhow::bail!("connection refused")
    }

    async fn find_owned(&self, _id: Uuid, _owner_id: Uuid) -> anyhow::Result<Option<Bookmark>> {
        anyhow::bail!("connection refused")
    }

    async fn list(&self, _query: &BookmarkQuery) -> anyhow::Result<BookmarkPage> {
        anyhow::bail!("connection refused")
    }

    async fn update(&self, _id: Uuid, _changes: BookmarkChanges) -> anyhow::Result<Option<Bookmark>> {
        anyhow::bail!("connection refused")
    }

    async fn delete(&self, _id: Uuid) -> anyhow::Result<bool> {
        anyhow::bail!("connection refused")
    }
}

#[derive(Default)]
pub struct InMemoryUserRepository {
    rows: Mutex<Vec<UserCredentials>>,
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create_user(
        &self,
        email: &str,
        name: &str,
        password_hash: &str,
    ) -> anyhow::Result<Option<User>> {
        let mut rows = self.rows.lock().unwrap();
        if rows.iter().any(|c| c.user.email == email) {
            return Ok(None);
        }
        let user = User {
            id: Uuid::new_v4(),
            email: email.to_string(),
            name: name.to_string(),
        };
        rows.push(UserCredentials {
            user: user.clone(),
            password_hash: password_hash.to_string(),
        });
        Ok(Some(user))
    }

    async fn find_credentials(&self, email: &str) -> anyhow::Result<Option<UserCredentials>> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .find(|c| c.user.email == email)
            .cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<User>> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .find(|c| c.user.id == id)
            .map(|c| c.user.clone()))
    }
}
