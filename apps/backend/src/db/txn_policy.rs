use std::sync::OnceLock;

/// What the request transaction layer does with a transaction whose
/// response succeeded (status < 400). Failed responses always roll back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TxnPolicy {
    /// Commit on success (production behavior).
    CommitOnOk,
    /// Roll back even on success, so tests leave no rows behind.
    RollbackOnOk,
}

impl TxnPolicy {
    pub const fn as_str(&self) -> &'static str {
        match self {
            TxnPolicy::CommitOnOk => "commit_on_ok",
            TxnPolicy::RollbackOnOk => "rollback_on_ok",
        }
    }
}

static POLICY: OnceLock<TxnPolicy> = OnceLock::new();

/// Current process policy; `CommitOnOk` until one is set.
pub fn current() -> TxnPolicy {
    POLICY.get().copied().unwrap_or(TxnPolicy::CommitOnOk)
}

/// Set the process policy. Only the first call has any effect.
pub fn set_txn_policy(policy: TxnPolicy) {
    let _ = POLICY.set(policy);
}
