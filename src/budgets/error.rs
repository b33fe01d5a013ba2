use thiserror::Error;

#[derive(Error, Debug)]
pub enum BudgetError {
    /// No session on the request
    #[error("Unauthorized")]
    Unauthorized,

    /// Session is valid but has no internal user
    #[error("User not found")]
    UserNotFound,

    #[error("{0}")]
    MissingInput(&'static str),

    #[error("Invalid amount")]
    InvalidAmount,

    #[error(transparent)]
    StoreFailure(#[from] anyhow::Error),
}
