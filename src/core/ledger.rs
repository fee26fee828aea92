//! Asset ownership ledger: mint/transfer/burn bookkeeping and existence checks.
//!
//! The admin registry consumes ownership through the [`AssetLedger`] trait; the
//! registry never writes ownership itself. [`MemoryLedger`] is the in-process
//! implementation used by [`crate::core::Core`] and by tests.
//!
//! # Invariants
//! - Every existing asset has exactly one owner.
//! - Token ids are never reused: a burned id stays retired and cannot be minted
//!   again.

use crate::core::TokenId;
use crate::error::{Result, WardenError};
use std::collections::{HashMap, HashSet};
use std::sync::RwLock;
use thiserror::Error;

/// Account identifier (alias for String).
pub type AccountId = String;

/// Read surface the admin registry consumes from the ownership authority.
pub trait AssetLedger: Send + Sync {
    /// Returns the current owner of the asset. Errors if the asset does not exist.
    fn owner_of(&self, token: TokenId) -> Result<AccountId>;

    /// Returns true if the asset currently exists (minted and not burned).
    fn exists(&self, token: TokenId) -> bool;
}

/// Errors produced by ledger bookkeeping.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    #[error("Unknown token: {0}")]
    UnknownToken(TokenId),

    #[error("Token already minted: {0}")]
    DuplicateToken(TokenId),

    #[error("Token id {0} was burned and cannot be reused")]
    RetiredToken(TokenId),

    #[error("Account {account} does not own token {token}")]
    NotOwner { token: TokenId, account: AccountId },
}

impl From<LedgerError> for WardenError {
    fn from(e: LedgerError) -> Self {
        match e {
            LedgerError::UnknownToken(token) => WardenError::NotFound(token),
            other => WardenError::Ledger(other.to_string()),
        }
    }
}

/// Thread-safe in-memory ownership ledger.
#[derive(Debug)]
pub struct MemoryLedger {
    owners: RwLock<HashMap<TokenId, AccountId>>,
    /// Ids of burned tokens; kept forever so ids are never reused.
    retired: RwLock<HashSet<TokenId>>,
}

impl MemoryLedger {
    pub fn new() -> Self {
        Self {
            owners: RwLock::new(HashMap::new()),
            retired: RwLock::new(HashSet::new()),
        }
    }

    /// Records `to` as the owner of a brand-new token. Errors if the id is
    /// already minted or was burned previously.
    pub fn mint(&self, to: &AccountId, token: TokenId) -> Result<()> {
        let mut owners = self.owners.write().unwrap();
        let retired = self.retired.read().unwrap();
        if retired.contains(&token) {
            return Err(LedgerError::RetiredToken(token).into());
        }
        if owners.contains_key(&token) {
            return Err(LedgerError::DuplicateToken(token).into());
        }
        owners.insert(token, to.clone());
        Ok(())
    }

    /// Reassigns ownership from `from` to `to`. Errors if the token is unknown
    /// or `from` is not the current owner.
    pub fn transfer(&self, from: &AccountId, to: &AccountId, token: TokenId) -> Result<()> {
        let mut owners = self.owners.write().unwrap();
        let current = owners
            .get(&token)
            .ok_or(LedgerError::UnknownToken(token))?;
        if current != from {
            return Err(LedgerError::NotOwner {
                token,
                account: from.clone(),
            }
            .into());
        }
        owners.insert(token, to.clone());
        Ok(())
    }

    /// Removes the token from the ledger and retires its id. Errors if the
    /// token is unknown or `from` is not the current owner.
    pub fn burn(&self, from: &AccountId, token: TokenId) -> Result<()> {
        let mut owners = self.owners.write().unwrap();
        let mut retired = self.retired.write().unwrap();
        let current = owners
            .get(&token)
            .ok_or(LedgerError::UnknownToken(token))?;
        if current != from {
            return Err(LedgerError::NotOwner {
                token,
                account: from.clone(),
            }
            .into());
        }
        owners.remove(&token);
        retired.insert(token);
        Ok(())
    }

    /// Returns the number of existing (minted, not burned) assets.
    pub fn len(&self) -> usize {
        let owners = self.owners.read().unwrap();
        owners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for MemoryLedger {
    fn default() -> Self {
        Self::new()
    }
}

impl AssetLedger for MemoryLedger {
    fn owner_of(&self, token: TokenId) -> Result<AccountId> {
        let owners = self.owners.read().unwrap();
        owners
            .get(&token)
            .cloned()
            .ok_or_else(|| LedgerError::UnknownToken(token).into())
    }

    fn exists(&self, token: TokenId) -> bool {
        let owners = self.owners.read().unwrap();
        owners.contains_key(&token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mint_and_owner_of() {
        let ledger = MemoryLedger::new();
        ledger.mint(&"alice".to_string(), 1).unwrap();
        assert!(ledger.exists(1));
        assert_eq!(ledger.owner_of(1).unwrap(), "alice");
    }

    #[test]
    fn test_mint_duplicate() {
        let ledger = MemoryLedger::new();
        ledger.mint(&"alice".to_string(), 1).unwrap();
        let r = ledger.mint(&"bob".to_string(), 1);
        assert_eq!(
            r,
            Err(LedgerError::DuplicateToken(1).into())
        );
    }

    #[test]
    fn test_owner_of_unknown() {
        let ledger = MemoryLedger::new();
        assert_eq!(ledger.owner_of(7), Err(WardenError::NotFound(7)));
        assert!(!ledger.exists(7));
    }

    #[test]
    fn test_transfer_success() {
        let ledger = MemoryLedger::new();
        ledger.mint(&"alice".to_string(), 1).unwrap();
        ledger
            .transfer(&"alice".to_string(), &"bob".to_string(), 1)
            .unwrap();
        assert_eq!(ledger.owner_of(1).unwrap(), "bob");
    }

    #[test]
    fn test_transfer_wrong_owner() {
        let ledger = MemoryLedger::new();
        ledger.mint(&"alice".to_string(), 1).unwrap();
        let r = ledger.transfer(&"bob".to_string(), &"carol".to_string(), 1);
        assert!(matches!(r, Err(WardenError::Ledger(_))));
        assert_eq!(ledger.owner_of(1).unwrap(), "alice");
    }

    #[test]
    fn test_burn_and_no_reuse() {
        let ledger = MemoryLedger::new();
        ledger.mint(&"alice".to_string(), 1).unwrap();
        ledger.burn(&"alice".to_string(), 1).unwrap();
        assert!(!ledger.exists(1));
        assert_eq!(ledger.owner_of(1), Err(WardenError::NotFound(1)));
        let r = ledger.mint(&"bob".to_string(), 1);
        assert_eq!(r, Err(LedgerError::RetiredToken(1).into()));
    }

    #[test]
    fn test_burn_wrong_owner() {
        let ledger = MemoryLedger::new();
        ledger.mint(&"alice".to_string(), 1).unwrap();
        let r = ledger.burn(&"bob".to_string(), 1);
        assert!(matches!(r, Err(WardenError::Ledger(_))));
        assert!(ledger.exists(1));
    }

    #[test]
    fn test_len() {
        let ledger = MemoryLedger::new();
        assert!(ledger.is_empty());
        ledger.mint(&"alice".to_string(), 1).unwrap();
        ledger.mint(&"alice".to_string(), 2).unwrap();
        assert_eq!(ledger.len(), 2);
        ledger.burn(&"alice".to_string(), 2).unwrap();
        assert_eq!(ledger.len(), 1);
    }
}
