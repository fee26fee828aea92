//! Admin verifier capability: the callback contract an admin account must honor.
//!
//! An account qualifies as an admin only if it can respond to the transfer
//! verification call. That capability check is modeled by [`VerifierDirectory`]:
//! an account is contract-capable iff the directory resolves it to an
//! [`AdminVerifier`] endpoint. The directory is consulted twice — at assignment
//! time (validation) and at transfer time (the actual callback).

use crate::core::ledger::AccountId;
use crate::core::TokenId;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

/// Fixed four-byte accept marker. A verifier approves a transfer by returning
/// exactly this value; any other return is a decline.
pub const ACCEPT_MAGIC: [u8; 4] = [0x77, 0x64, 0x6e, 0x01];

/// Failure raised by a verifier callback. A failure without a reason is a bare
/// decline; a failure carrying a reason must be surfaced to the caller verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifierFailure {
    pub reason: Option<String>,
}

impl VerifierFailure {
    /// A decline with no stated reason.
    pub fn silent() -> Self {
        Self { reason: None }
    }

    /// A failure carrying a reason that must reach the caller unchanged.
    pub fn with_reason(reason: impl Into<String>) -> Self {
        Self {
            reason: Some(reason.into()),
        }
    }

    /// Returns the reason if it is present and non-empty.
    pub fn stated_reason(&self) -> Option<&str> {
        match self.reason.as_deref() {
            Some("") | None => None,
            Some(r) => Some(r),
        }
    }
}

/// The synchronous verification call an admin endpoint answers during a
/// transfer. `from` is always a real account (mints are never gated); `to` is
/// `None` for burns.
pub trait AdminVerifier: Send + Sync {
    fn verify_transfer(
        &self,
        operator: &AccountId,
        from: &AccountId,
        to: Option<&AccountId>,
        token: TokenId,
    ) -> std::result::Result<[u8; 4], VerifierFailure>;
}

/// Resolves an account id to its verifier endpoint. Resolution success is the
/// "contract account" capability check.
pub trait VerifierDirectory: Send + Sync {
    fn resolve(&self, account: &AccountId) -> Option<Arc<dyn AdminVerifier>>;
}

/// Thread-safe in-memory verifier directory.
pub struct MemoryDirectory {
    endpoints: RwLock<HashMap<AccountId, Arc<dyn AdminVerifier>>>,
}

impl MemoryDirectory {
    pub fn new() -> Self {
        Self {
            endpoints: RwLock::new(HashMap::new()),
        }
    }

    /// Registers `account` as contract-capable, answering verification calls
    /// through `verifier`. Overwrites any previous registration.
    pub fn register(&self, account: &AccountId, verifier: Arc<dyn AdminVerifier>) {
        let mut endpoints = self.endpoints.write().unwrap();
        endpoints.insert(account.clone(), verifier);
    }

    /// Removes the account's capability. Existing admin assignments pointing at
    /// it become a fatal invariant breach at transfer time.
    pub fn deregister(&self, account: &AccountId) {
        let mut endpoints = self.endpoints.write().unwrap();
        endpoints.remove(account);
    }
}

impl Default for MemoryDirectory {
    fn default() -> Self {
        Self::new()
    }
}

impl VerifierDirectory for MemoryDirectory {
    fn resolve(&self, account: &AccountId) -> Option<Arc<dyn AdminVerifier>> {
        let endpoints = self.endpoints.read().unwrap();
        endpoints.get(account).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct AcceptAll;

    impl AdminVerifier for AcceptAll {
        fn verify_transfer(
            &self,
            _operator: &AccountId,
            _from: &AccountId,
            _to: Option<&AccountId>,
            _token: TokenId,
        ) -> std::result::Result<[u8; 4], VerifierFailure> {
            Ok(ACCEPT_MAGIC)
        }
    }

    #[test]
    fn test_directory_resolve() {
        let dir = MemoryDirectory::new();
        let account = "custodian".to_string();
        assert!(dir.resolve(&account).is_none());
        dir.register(&account, Arc::new(AcceptAll));
        assert!(dir.resolve(&account).is_some());
    }

    #[test]
    fn test_directory_deregister() {
        let dir = MemoryDirectory::new();
        let account = "custodian".to_string();
        dir.register(&account, Arc::new(AcceptAll));
        dir.deregister(&account);
        assert!(dir.resolve(&account).is_none());
    }

    #[test]
    fn test_resolved_verifier_answers() {
        let dir = MemoryDirectory::new();
        let account = "custodian".to_string();
        dir.register(&account, Arc::new(AcceptAll));
        let v = dir.resolve(&account).unwrap();
        let r = v.verify_transfer(&"op".to_string(), &"alice".to_string(), None, 1);
        assert_eq!(r, Ok(ACCEPT_MAGIC));
    }

    #[test]
    fn test_failure_stated_reason() {
        assert_eq!(VerifierFailure::silent().stated_reason(), None);
        assert_eq!(VerifierFailure::with_reason("").stated_reason(), None);
        assert_eq!(
            VerifierFailure::with_reason("custody hold").stated_reason(),
            Some("custody hold")
        );
    }
}
