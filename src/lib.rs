pub mod error;
pub mod core;

pub use error::{WardenError, Result};

// Core API exports
pub use crate::core::{Core, TokenId};
pub use crate::core::authorization::{
    AdminState,
    authorize_set_admin,
    authorize_reset_admin,
    authorize_set_approval,
};
pub use crate::core::events::AdminEvent;
pub use crate::core::ledger::{AccountId, AssetLedger, LedgerError, MemoryLedger};
pub use crate::core::registry::{AdminRecord, AdminRegistry};
pub use crate::core::verifier::{
    AdminVerifier,
    VerifierDirectory,
    VerifierFailure,
    MemoryDirectory,
    ACCEPT_MAGIC,
};
