pub mod create_bookmark;
pub mod delete_bookmark;
pub mod get_bookmark;
pub mod list_bookmarks;
pub mod update_bookmark;

#[derive(thiserror::Error, Debug)]
pub enum BookmarkError {
    #[error("{0}")]
    Validation(&'static str),
    #[error("bookmark not found")]
    NotFound,
    #[error("bookmark belongs to another user")]
    Forbidden,
    #[error("bookmark repository failure")]
    Repository(#[source] anyhow::Error),
}
