use uuid::Uuid;

use super::BookmarkError;
use crate::application::access::{self, Capability};
use crate::application::ports::bookmark_repository::BookmarkRepository;
use crate::domain::bookmarks::bookmark::{
    Bookmark, BookmarkChanges, normalize_required, normalize_tags,
};

pub const EMPTY_FIELDS: &str = "Title and url cannot be empty";

#[derive(Debug, Clone, Default)]
pub struct UpdateBookmarkInput {
    pub title: Option<String>,
    pub url: Option<String>,
    pub tags: Option<Vec<String>>,
    pub is_favorite: Option<bool>,
}

impl UpdateBookmarkInput {
    fn into_changes(self) -> Result<BookmarkChanges, BookmarkError> {
        let title = match self.title {
            Some(t) => Some(normalize_required(&t).ok_or(BookmarkError::Validation(EMPTY_FIELDS))?),
            None => None,
        };
        let url = match self.url {
            Some(u) => Some(normalize_required(&u).ok_or(BookmarkError::Validation(EMPTY_FIELDS))?),
            None => None,
        };
        Ok(BookmarkChanges {
            title,
            url,
            tags: self.tags.map(normalize_tags),
            is_favorite: self.is_favorite,
        })
    }
}

pub struct UpdateBookmark<'a, R: BookmarkRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: BookmarkRepository + ?Sized> UpdateBookmark<'a, R> {
    pub async fn execute(
        &self,
        id: Uuid,
        user_id: Uuid,
        input: UpdateBookmarkInput,
    ) -> Result<Bookmark, BookmarkError> {
        let current = self
            .repo
            .get_by_id(id)
            .await
            .map_err(BookmarkError::Repository)?
            .ok_or(BookmarkError::NotFound)?;
        if access::resolve_bookmark(user_id, &current) < Capability::Edit {
            return Err(BookmarkError::Forbidden);
        }
        let changes = input.into_changes()?;
        if changes.is_empty() {
            return Ok(current);
        }
        // Row can vanish between the ownership check and the write.
        self.repo
            .update(id, changes)
            .await
            .map_err(BookmarkError::Repository)?
            .ok_or(BookmarkError::NotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::bookmarks::bookmark::NewBookmark;
    use crate::testing::InMemoryBookmarkRepository;

    async fn seeded(repo: &InMemoryBookmarkRepository, owner: Uuid) -> Bookmark {
        repo.create(NewBookmark {
            owner_id: owner,
            title: "Docs".into(),
            url: "https://docs.rs".into(),
            tags: vec!["rust".into()],
            is_favorite: false,
        })
        .await
        .unwrap()
    }

    #[tokio::test]
    async fn partial_update_keeps_unspecified_fields() {
        let repo = InMemoryBookmarkRepository::default();
        let owner = Uuid::new_v4();
        let bm = seeded(&repo, owner).await;

        let updated = UpdateBookmark { repo: &repo }
            .execute(
                bm.id,
                owner,
                UpdateBookmarkInput {
                    is_favorite: Some(true),
                    tags: Some(vec![" Docs ".into(), "RUST".into()]),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert!(updated.is_favorite);
        assert_eq!(updated.tags, vec!["docs", "rust"]);
        assert_eq!(updated.title, "Docs");
        assert_eq!(updated.url, "https://docs.rs");
    }

    #[tokio::test]
    async fn non_owner_is_forbidden_and_nothing_changes() {
        let repo = InMemoryBookmarkRepository::default();
        let owner = Uuid::new_v4();
        let bm = seeded(&repo, owner).await;

        let err = UpdateBookmark { repo: &repo }
            .execute(
                bm.id,
                Uuid::new_v4(),
                UpdateBookmarkInput {
                    title: Some("hijacked".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();

        assert!(matches!(err, BookmarkError::Forbidden));
        assert_eq!(repo.all()[0].title, "Docs");
    }

    #[tokio::test]
    async fn missing_bookmark_is_not_found() {
        let repo = InMemoryBookmarkRepository::default();
        let err = UpdateBookmark { repo: &repo }
            .execute(Uuid::new_v4(), Uuid::new_v4(), UpdateBookmarkInput::default())
            .await
            .unwrap_err();
        assert!(matches!(err, BookmarkError::NotFound));
    }

    #[tokio::test]
    async fn blank_title_is_rejected() {
        let repo = InMemoryBookmarkRepository::default();
        let owner = Uuid::new_v4();
        let bm = seeded(&repo, owner).await;

        let err = UpdateBookmark { repo: &repo }
            .execute(
                bm.id,
                owner,
                UpdateBookmarkInput {
                    title: Some("  ".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, BookmarkError::Validation(EMPTY_FIELDS)));
    }
}
