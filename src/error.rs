use crate::core::ledger::AccountId;
use crate::core::TokenId;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WardenError {
    #[error("Asset not found: {0}")]
    NotFound(TokenId),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Invalid admin candidate: {0}")]
    InvalidAdmin(AccountId),

    #[error("Admin for asset {0} is already set to this account")]
    NoOpRejected(TokenId),

    #[error("Transfer of asset {0} rejected by admin")]
    RejectedByAdmin(TokenId),

    #[error("Admin verifier failure: {0}")]
    PropagatedFailure(String),

    #[error("Ledger error: {0}")]
    Ledger(String),
}

pub type Result<T> = std::result::Result<T, WardenError>;
