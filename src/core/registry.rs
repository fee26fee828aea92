//! Admin-rights registry: per-asset admin and pending-approval state.
//!
//! Maintains one [`AdminRecord`] per asset and implements the slot transitions
//! (set, reset, delegate-approval) plus the transfer-time verification hook.
//! Ownership and existence come from the external [`AssetLedger`]; the
//! contract-capability check and the verification callback go through the
//! [`VerifierDirectory`].
//!
//! # Determinism
//! Same sequence of calls yields the same records, the same event log, and the
//! same state root. No randomness or system time is used.
//!
//! # Invariants
//! - A recorded admin resolved in the verifier directory at assignment time.
//! - Setting or resetting the admin clears any pending approval atomically.
//! - The transfer gate writes no registry state; the nested verifier call runs
//!   with no lock held, so re-entrant reads observe a consistent state.

use crate::core::authorization::{self, AdminState};
use crate::core::events::AdminEvent;
use crate::core::ledger::{AccountId, AssetLedger};
use crate::core::verifier::{VerifierDirectory, ACCEPT_MAGIC};
use crate::core::TokenId;
use crate::error::{Result, WardenError};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

/// Per-asset admin slot: the current admin and the pending one-shot approval.
/// A missing record is equivalent to the default (vacant, no approval).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminRecord {
    pub admin: Option<AccountId>,
    pub approved: Option<AccountId>,
}

impl AdminRecord {
    /// Tagged view of the slot for authorization decisions. A pending approval
    /// is only visible in the vacant state; while an admin is held it is inert.
    pub fn state(&self) -> AdminState<'_> {
        match &self.admin {
            Some(admin) => AdminState::Held { admin },
            None => AdminState::Vacant {
                pending: self.approved.as_ref(),
            },
        }
    }

    fn is_empty(&self) -> bool {
        self.admin.is_none() && self.approved.is_none()
    }
}

/// Thread-safe admin-rights registry and transfer gate.
pub struct AdminRegistry {
    records: RwLock<HashMap<TokenId, AdminRecord>>,
    events: RwLock<Vec<AdminEvent>>,
    ledger: Arc<dyn AssetLedger>,
    verifiers: Arc<dyn VerifierDirectory>,
}

impl AdminRegistry {
    pub fn new(ledger: Arc<dyn AssetLedger>, verifiers: Arc<dyn VerifierDirectory>) -> Self {
        Self {
            records: RwLock::new(HashMap::new()),
            events: RwLock::new(Vec::new()),
            ledger,
            verifiers,
        }
    }

    /// Returns the admin of an existing asset, or `None` if no admin is set.
    /// Errors with `NotFound` for assets the ledger does not know.
    pub fn get_admin(&self, token: TokenId) -> Result<Option<AccountId>> {
        if !self.ledger.exists(token) {
            return Err(WardenError::NotFound(token));
        }
        let records = self.records.read().unwrap();
        Ok(records.get(&token).and_then(|r| r.admin.clone()))
    }

    /// Returns the pending approval holder for the asset, if any. Absence is a
    /// valid state, so no existence check is made.
    pub fn get_approved(&self, token: TokenId) -> Option<AccountId> {
        let records = self.records.read().unwrap();
        records.get(&token).and_then(|r| r.approved.clone())
    }

    /// Sets, replaces, or clears the admin for an asset.
    ///
    /// Allowed callers, in precedence order: the current admin (replacement,
    /// `None` included), the owner while no admin is set, or the pending
    /// approval holder while no admin is set. A non-null candidate must resolve
    /// in the verifier directory. Replacing the admin with itself is rejected.
    /// Success clears any pending approval and records an `AdminChanged` event.
    pub fn set_admin(
        &self,
        caller: &AccountId,
        token: TokenId,
        new_admin: Option<&AccountId>,
    ) -> Result<()> {
        if !self.ledger.exists(token) {
            return Err(WardenError::NotFound(token));
        }
        if let Some(candidate) = new_admin {
            if self.verifiers.resolve(candidate).is_none() {
                return Err(WardenError::InvalidAdmin(candidate.clone()));
            }
        }
        let owner = self.ledger.owner_of(token)?;

        let old_admin;
        {
            let mut records = self.records.write().unwrap();
            let record = records.entry(token).or_default();
            authorization::authorize_set_admin(&record.state(), &owner, caller)?;
            if record.admin.as_ref() == new_admin {
                return Err(WardenError::NoOpRejected(token));
            }
            old_admin = record.admin.clone();
            record.admin = new_admin.cloned();
            record.approved = None;
        }
        tracing::debug!(
            "admin of asset {} changed: {:?} -> {:?}",
            token,
            old_admin,
            new_admin
        );
        self.push_event(AdminEvent::AdminChanged {
            token,
            old_admin,
            new_admin: new_admin.cloned(),
        });
        Ok(())
    }

    /// Relinquishes admin control back to the owner's discretion. Only the
    /// current admin may call; clears any pending approval.
    pub fn reset_admin(&self, caller: &AccountId, token: TokenId) -> Result<()> {
        if !self.ledger.exists(token) {
            return Err(WardenError::NotFound(token));
        }
        let old_admin;
        {
            let mut records = self.records.write().unwrap();
            let record = records.entry(token).or_default();
            authorization::authorize_reset_admin(&record.state(), caller)?;
            old_admin = record.admin.take();
            record.approved = None;
        }
        tracing::debug!("admin of asset {} reset by {}", token, caller);
        self.push_event(AdminEvent::AdminChanged {
            token,
            old_admin,
            new_admin: None,
        });
        Ok(())
    }

    /// Grants `delegate` the one-shot right to set the admin while the slot is
    /// vacant. Owner-only; recorded regardless of current admin state and
    /// overwritten freely. The right is checked at `set_admin` time, not here.
    pub fn set_approval(
        &self,
        caller: &AccountId,
        token: TokenId,
        delegate: &AccountId,
    ) -> Result<()> {
        let owner = self.ledger.owner_of(token)?;
        authorization::authorize_set_approval(&owner, caller)?;
        {
            let mut records = self.records.write().unwrap();
            let record = records.entry(token).or_default();
            record.approved = Some(delegate.clone());
        }
        tracing::debug!("approval for asset {} granted to {}", token, delegate);
        self.push_event(AdminEvent::ApprovalSet {
            token,
            owner,
            delegate: delegate.clone(),
        });
        Ok(())
    }

    /// Transfer-lifecycle hook, invoked before any mint, transfer, or burn is
    /// committed. `from = None` signals a mint (never gated); `to = None`
    /// signals a burn. When an admin is set, the admin's verifier decides:
    /// the accept marker passes the transfer, any other return or a silent
    /// failure rejects it, and a failure carrying a reason is surfaced
    /// unchanged. Pure verification: no registry state is written, and no lock
    /// is held across the nested call.
    pub fn before_transfer(
        &self,
        operator: &AccountId,
        from: Option<&AccountId>,
        to: Option<&AccountId>,
        token: TokenId,
    ) -> Result<()> {
        let from = match from {
            Some(from) => from,
            None => return Ok(()),
        };
        let admin = {
            let records = self.records.read().unwrap();
            records.get(&token).and_then(|r| r.admin.clone())
        };
        let admin = match admin {
            Some(admin) => admin,
            None => return Ok(()),
        };
        // Admins can only ever be set to resolvable accounts; a capability
        // lost after assignment is not a recoverable condition.
        let verifier = match self.verifiers.resolve(&admin) {
            Some(v) => v,
            None => panic!(
                "INVARIANT: admin {} of asset {} no longer resolves to a verifier",
                admin, token
            ),
        };
        match verifier.verify_transfer(operator, from, to, token) {
            Ok(marker) if marker == ACCEPT_MAGIC => Ok(()),
            Ok(_) => {
                tracing::warn!("admin {} rejected transfer of asset {}", admin, token);
                Err(WardenError::RejectedByAdmin(token))
            }
            Err(failure) => match failure.stated_reason() {
                None => {
                    tracing::warn!("admin {} declined transfer of asset {}", admin, token);
                    Err(WardenError::RejectedByAdmin(token))
                }
                Some(reason) => Err(WardenError::PropagatedFailure(reason.to_string())),
            },
        }
    }

    /// Returns all recorded events in emission order.
    pub fn events(&self) -> Vec<AdminEvent> {
        let events = self.events.read().unwrap();
        events.clone()
    }

    /// Removes and returns all recorded events.
    pub fn drain_events(&self) -> Vec<AdminEvent> {
        let mut events = self.events.write().unwrap();
        std::mem::take(&mut *events)
    }

    /// Computes the deterministic digest of all non-empty records, iterated in
    /// ascending token order. Same records always yield the same digest.
    pub fn state_root(&self) -> String {
        let records = self.records.read().unwrap();
        let mut entries: Vec<(&TokenId, &AdminRecord)> =
            records.iter().filter(|(_, r)| !r.is_empty()).collect();
        entries.sort_by_key(|(token, _)| **token);
        let mut hasher = Sha256::new();
        for (token, record) in entries {
            hasher.update(token.to_le_bytes());
            Self::hash_slot(&mut hasher, &record.admin);
            Self::hash_slot(&mut hasher, &record.approved);
        }
        hex::encode(hasher.finalize())
    }

    fn hash_slot(hasher: &mut Sha256, slot: &Option<AccountId>) {
        match slot {
            Some(account) => {
                hasher.update([1u8]);
                hasher.update((account.len() as u64).to_le_bytes());
                hasher.update(account.as_bytes());
            }
            None => hasher.update([0u8]),
        }
    }

    fn push_event(&self, event: AdminEvent) {
        let mut events = self.events.write().unwrap();
        events.push(event);
    }
}
