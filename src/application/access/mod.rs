use uuid::Uuid;

use crate::domain::bookmarks::bookmark::Bookmark;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Capability {
    None,
    Edit,
}

// Ownership is the only grant: a bookmark has exactly one owner and nobody else may touch it.
pub fn resolve_bookmark(user_id: Uuid, bookmark: &Bookmark) -> Capability {
    if bookmark.owner_id == user_id {
        Capability::Edit
    } else {
        Capability::None
    }
}
