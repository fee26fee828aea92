//! Events recorded by the admin registry for external observers and indexers.

use crate::core::ledger::AccountId;
use crate::core::TokenId;
use serde::{Deserialize, Serialize};

/// An observable state transition of an asset's admin slot. Events are recorded
/// in emission order; each carries the fields an indexer needs to key on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AdminEvent {
    /// The admin slot changed: set, replaced, or reset (`new_admin = None`).
    AdminChanged {
        token: TokenId,
        old_admin: Option<AccountId>,
        new_admin: Option<AccountId>,
    },
    /// The owner granted a one-shot approval to `delegate`.
    ApprovalSet {
        token: TokenId,
        owner: AccountId,
        delegate: AccountId,
    },
}

impl AdminEvent {
    /// Returns the asset id the event concerns.
    pub fn token(&self) -> TokenId {
        match self {
            AdminEvent::AdminChanged { token, .. } => *token,
            AdminEvent::ApprovalSet { token, .. } => *token,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_token() {
        let e = AdminEvent::AdminChanged {
            token: 42,
            old_admin: None,
            new_admin: Some("custodian".to_string()),
        };
        assert_eq!(e.token(), 42);
        let e = AdminEvent::ApprovalSet {
            token: 7,
            owner: "alice".to_string(),
            delegate: "bob".to_string(),
        };
        assert_eq!(e.token(), 7);
    }

    #[test]
    fn test_event_json_round_trip() {
        let e = AdminEvent::ApprovalSet {
            token: 3,
            owner: "alice".to_string(),
            delegate: "bob".to_string(),
        };
        let json = serde_json::to_string(&e).unwrap();
        let back: AdminEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(e, back);
    }
}
