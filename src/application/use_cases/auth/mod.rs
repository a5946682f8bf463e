pub mod login;
pub mod me;
pub mod register;

#[derive(thiserror::Error, Debug)]
pub enum AuthError {
    #[error("{0}")]
    Validation(&'static str),
    #[error("email already registered")]
    EmailTaken,
    #[error("user repository failure")]
    Repository(#[source] anyhow::Error),
}
