// Core module for the admin-rights registry and its transfer gating.
//
// DETERMINISM GUARANTEES:
// =======================
// This module guarantees deterministic behavior:
// 1. Same call order → same ownership, admin records, and event log
// 2. No randomness: all operations are deterministic
// 3. No system time: no timestamps or time-dependent logic
// 4. Deterministic state root: records are sorted by token id before hashing
//
// INVARIANTS:
// - The transfer gate runs before every ledger commit; a gate failure leaves
//   ownership unchanged
// - Transfer and burn may only be initiated by the current owner
// - Mint is never gated (`from = None` in the lifecycle notification)

pub mod authorization;
pub mod events;
pub mod ledger;
pub mod registry;
pub mod verifier;

use crate::core::ledger::{AccountId, AssetLedger, MemoryLedger};
use crate::core::registry::AdminRegistry;
use crate::core::verifier::MemoryDirectory;
use crate::error::{Result, WardenError};
use std::sync::Arc;

/// Asset identifier type (alias for u64)
pub type TokenId = u64;

/// Core entry point combining the ownership ledger and the admin registry.
///
/// Wires the registry's transfer-gate hook in front of every ledger commit
/// (mint, transfer, burn). Transfer initiation is owner-only: holding an
/// approval grants the right to set an admin, never the right to move the
/// asset.
pub struct Core {
    ledger: Arc<MemoryLedger>,
    verifiers: Arc<MemoryDirectory>,
    registry: AdminRegistry,
}

impl Core {
    /// Creates a new Core instance with an empty ledger, an empty verifier
    /// directory, and an empty admin registry.
    pub fn new() -> Self {
        let ledger = Arc::new(MemoryLedger::new());
        let verifiers = Arc::new(MemoryDirectory::new());
        let registry = AdminRegistry::new(ledger.clone(), verifiers.clone());
        Self {
            ledger,
            verifiers,
            registry,
        }
    }

    /// Mints a new asset to `to`.
    ///
    /// The registry is notified with `from = None`, which is never gated, so
    /// admin state is irrelevant until it is first set. Fails if the token id
    /// was already minted or is retired.
    pub fn mint(&self, to: &AccountId, token: TokenId) -> Result<()> {
        self.registry.before_transfer(to, None, Some(to), token)?;
        self.ledger.mint(to, token)
    }

    /// Transfers an existing asset from its owner to `to`.
    ///
    /// `caller` must be the current owner. If an admin is set for the asset,
    /// the admin's verifier decides before the ledger commit; any gate failure
    /// leaves ownership unchanged.
    pub fn transfer(&self, caller: &AccountId, to: &AccountId, token: TokenId) -> Result<()> {
        let owner = self.ledger.owner_of(token)?;
        if caller != &owner {
            return Err(WardenError::Unauthorized(format!(
                "only the owner may transfer asset {}, not {}",
                token, caller
            )));
        }
        self.registry
            .before_transfer(caller, Some(&owner), Some(to), token)?;
        self.ledger.transfer(&owner, to, token)
    }

    /// Burns an existing asset, retiring its id.
    ///
    /// Same discipline as transfer, with `to = None` in the lifecycle
    /// notification: owner-only initiation, gated by the admin if one is set.
    pub fn burn(&self, caller: &AccountId, token: TokenId) -> Result<()> {
        let owner = self.ledger.owner_of(token)?;
        if caller != &owner {
            return Err(WardenError::Unauthorized(format!(
                "only the owner may burn asset {}, not {}",
                token, caller
            )));
        }
        self.registry
            .before_transfer(caller, Some(&owner), None, token)?;
        self.ledger.burn(&owner, token)
    }

    /// Gets the ownership ledger (for direct access if needed)
    pub fn ledger(&self) -> &MemoryLedger {
        &self.ledger
    }

    /// Gets the admin registry (for direct access if needed)
    pub fn registry(&self) -> &AdminRegistry {
        &self.registry
    }

    /// Gets the verifier directory (for registering admin endpoints)
    pub fn verifiers(&self) -> &MemoryDirectory {
        &self.verifiers
    }
}

impl Default for Core {
    fn default() -> Self {
        Self::new()
    }
}
