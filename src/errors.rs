use thiserror::Error;

/// Rejections raised by the order form before anything is saved.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Order must contain at least one item")]
    NoItems,

    #[error("Item {index} is missing a name")]
    MissingItemName { index: usize },

    #[error("Item {index} is missing a price")]
    MissingItemPrice { index: usize },

    #[error("Complete item {index} before adding another one")]
    IncompleteItem { index: usize },

    #[error("At least one item must remain")]
    LastItem,

    #[error("No item at position {index}")]
    ItemOutOfRange { index: usize },

    #[error("Order id {0} appears more than once")]
    DuplicateId(String),
}

#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("Storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid order: {0}")]
    Validation(#[from] ValidationError),

    #[error("Order not found: {0}")]
    OrderNotFound(String),

    #[error("No deletion is waiting for confirmation")]
    NoPendingDeletion,

    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

pub type LedgerResult<T> = Result<T, LedgerError>;
