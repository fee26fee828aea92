//! Role-based authorization for admin-slot transitions.
//!
//! Each writer operation on the registry is gated by a pure function of
//! `(slot state, caller)`. The slot state is a tagged view over the stored
//! record, so the rules live in one place instead of being repeated inside
//! every operation.
//!
//! # Rules
//! - A held slot answers only to its current admin, for replacement and reset
//!   alike. The owner has no say while an admin is set.
//! - A vacant slot answers to the asset owner, or to the pending delegate if
//!   one is recorded.
//! - Approval grants are owner-only in every state.

use crate::core::ledger::AccountId;
use crate::error::{Result, WardenError};

/// Tagged view of a single asset's admin slot, borrowed from the stored record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdminState<'a> {
    /// No admin set. `pending` holds the delegate approved to set one, if any.
    Vacant { pending: Option<&'a AccountId> },
    /// An admin is set and exclusively controls the slot.
    Held { admin: &'a AccountId },
}

/// Authorizes a `set_admin` call. Same inputs always yield the same verdict.
pub fn authorize_set_admin(
    state: &AdminState<'_>,
    owner: &AccountId,
    caller: &AccountId,
) -> Result<()> {
    match state {
        AdminState::Held { admin } => {
            if caller == *admin {
                Ok(())
            } else {
                Err(WardenError::Unauthorized(format!(
                    "only the current admin may replace the admin, not {}",
                    caller
                )))
            }
        }
        AdminState::Vacant { pending } => {
            if caller == owner || Some(caller) == *pending {
                Ok(())
            } else {
                Err(WardenError::Unauthorized(format!(
                    "{} is neither the owner nor the approved delegate",
                    caller
                )))
            }
        }
    }
}

/// Authorizes a `reset_admin` call: current admin only, in any state.
pub fn authorize_reset_admin(state: &AdminState<'_>, caller: &AccountId) -> Result<()> {
    match state {
        AdminState::Held { admin } if caller == *admin => Ok(()),
        AdminState::Held { .. } => Err(WardenError::Unauthorized(format!(
            "only the current admin may reset the admin, not {}",
            caller
        ))),
        AdminState::Vacant { .. } => Err(WardenError::Unauthorized(format!(
            "{} cannot reset an admin that is not set",
            caller
        ))),
    }
}

/// Authorizes a `set_approval` call: owner only, regardless of slot state.
pub fn authorize_set_approval(owner: &AccountId, caller: &AccountId) -> Result<()> {
    if caller == owner {
        Ok(())
    } else {
        Err(WardenError::Unauthorized(format!(
            "only the owner may grant approval, not {}",
            caller
        )))
    }
}
