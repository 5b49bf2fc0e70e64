/// Failures of the wallet and diary sessions.
#[derive(Debug, thiserror::Error)]
pub enum DiaryError {
    #[error("another diary operation is still in progress")]
    Busy,
    #[error("wallet is not connected")]
    NotConnected,
    #[error("diary entry is empty")]
    EmptyEntry,
    #[error("wallet error: {0:#}")]
    Wallet(anyhow::Error),
    #[error("ledger error: {0:#}")]
    Ledger(anyhow::Error),
    #[error("cache error: {0:#}")]
    Cache(anyhow::Error),
}
