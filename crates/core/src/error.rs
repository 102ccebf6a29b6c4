use thiserror::Error;

use crate::models::IntentId;

#[derive(Debug, Error)]
pub enum ChatError {
    #[error("intent `{0}` has no replies to choose from")]
    EmptyReplySet(IntentId),

    #[error("catalog has no default replies")]
    NoDefaultReplies,

    #[error("session has already terminated")]
    SessionTerminated,

    #[error("invalid catalog: {0}")]
    InvalidCatalog(String),

    #[error("catalog parse error: {0}")]
    CatalogParse(#[from] serde_json::Error),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum HangmanError {
    #[error("`{0}` is not a single letter")]
    InvalidGuess(String),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PortfolioError {
    #[error("stock `{0}` not found")]
    UnknownSymbol(String),

    #[error("quantity must be positive")]
    NonPositiveQuantity,

    #[error("quantity of `{0}` is too large to track")]
    QuantityOverflow(String),
}
