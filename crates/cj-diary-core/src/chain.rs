//! The chain collaborator the sessions talk to.
//!
//! Whether the browser has an injected wallet is decided once, when the
//! collaborator is built: [`OnChain`] drives a real wallet and ledger client,
//! [`Simulated`] keeps the app usable without either.

use async_trait::async_trait;
use cj_api_types::{Account, EntryFunctionId};
use cj_chain_client::{LedgerClient, WalletProvider};
use rand::RngCore;
use sha2::{Digest, Sha256};
use std::time::Duration;
use tracing::{debug, info};

use crate::config::DiaryFunctions;
use crate::error::DiaryError;

/// Address handed out by the simulated wallet.
pub const MOCK_WALLET_ADDRESS: &str = "0x1234567890abcdef1234567890abcdef12345678";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChainMode {
    Injected,
    Simulated,
}

#[async_trait(?Send)]
pub trait DiaryChain {
    fn mode(&self) -> ChainMode;

    async fn connect(&self) -> Result<Account, DiaryError>;

    /// Returns the transaction hash, or `None` when nothing was submitted.
    async fn initialize_diary(&self) -> Result<Option<String>, DiaryError>;

    /// Submits one entry and returns its transaction hash.
    async fn submit_entry(&self, content: &str) -> Result<String, DiaryError>;

    /// On-chain entry count for the connected account, when the chain has one.
    async fn entry_count(&self) -> Result<Option<u64>, DiaryError>;
}

/// Suspends the current task; the browser and the test runtime bring their own.
#[async_trait(?Send)]
pub trait Delay {
    async fn sleep(&self, duration: Duration);
}

// ── Injected wallet + ledger ─────────────────────────────────────────

pub struct OnChain<W, L> {
    wallet: W,
    ledger: L,
    functions: DiaryFunctions,
}

impl<W, L> OnChain<W, L>
where
    W: WalletProvider,
    L: LedgerClient,
{
    pub fn new(wallet: W, ledger: L, functions: DiaryFunctions) -> Self {
        Self {
            wallet,
            ledger,
            functions,
        }
    }

    pub fn wallet(&self) -> &W {
        &self.wallet
    }

    pub fn ledger(&self) -> &L {
        &self.ledger
    }

    async fn submit(
        &self,
        function: &EntryFunctionId,
        arguments: Vec<serde_json::Value>,
    ) -> Result<String, DiaryError> {
        let account = self.connect().await?;
        let txn = self
            .ledger
            .build_transaction(&account.address, function.payload(arguments))
            .await
            .map_err(DiaryError::Ledger)?;
        let pending = self
            .ledger
            .sign_and_submit(&self.wallet, txn)
            .await
            .map_err(DiaryError::Ledger)?;
        Ok(pending.hash)
    }
}

#[async_trait(?Send)]
impl<W, L> DiaryChain for OnChain<W, L>
where
    W: WalletProvider,
    L: LedgerClient,
{
    fn mode(&self) -> ChainMode {
        ChainMode::Injected
    }

    async fn connect(&self) -> Result<Account, DiaryError> {
        self.wallet.connect().await.map_err(DiaryError::Wallet)
    }

    async fn initialize_diary(&self) -> Result<Option<String>, DiaryError> {
        let hash = self.submit(&self.functions.initialize, Vec::new()).await?;
        Ok(Some(hash))
    }

    async fn submit_entry(&self, content: &str) -> Result<String, DiaryError> {
        self.submit(&self.functions.add_entry, vec![content.into()])
            .await
    }

    async fn entry_count(&self) -> Result<Option<u64>, DiaryError> {
        let account = self.connect().await?;
        let values = self
            .ledger
            .view(self.functions.entry_count.view(vec![account.address.into()]))
            .await
            .map_err(DiaryError::Ledger)?;

        // u64 view results come back as JSON strings.
        let count = values.first().and_then(|value| {
            value
                .as_str()
                .and_then(|raw| raw.parse().ok())
                .or_else(|| value.as_u64())
        });
        if count.is_none() {
            debug!("unexpected entry count payload: {:?}", values);
        }
        Ok(count)
    }
}

// ── No wallet: fixed account, fake latency ───────────────────────────

pub struct Simulated<D> {
    delay: D,
    latency: Duration,
}

impl<D: Delay> Simulated<D> {
    pub fn new(delay: D, latency: Duration) -> Self {
        Self { delay, latency }
    }
}

#[async_trait(?Send)]
impl<D: Delay> DiaryChain for Simulated<D> {
    fn mode(&self) -> ChainMode {
        ChainMode::Simulated
    }

    async fn connect(&self) -> Result<Account, DiaryError> {
        info!("using mock wallet for development");
        Ok(Account::with_placeholder_key(MOCK_WALLET_ADDRESS))
    }

    async fn initialize_diary(&self) -> Result<Option<String>, DiaryError> {
        info!("mock diary initialization for development");
        Ok(None)
    }

    async fn submit_entry(&self, content: &str) -> Result<String, DiaryError> {
        self.delay.sleep(self.latency).await;
        Ok(simulated_hash(content))
    }

    async fn entry_count(&self) -> Result<Option<u64>, DiaryError> {
        Ok(None)
    }
}

/// `0x` followed by 64 lowercase hex digits, like a real transaction hash.
fn simulated_hash(content: &str) -> String {
    let mut nonce = [0_u8; 32];
    rand::thread_rng().fill_bytes(&mut nonce);

    let mut hasher = Sha256::new();
    hasher.update(nonce);
    hasher.update(content.as_bytes());
    format!("0x{}", hex::encode(hasher.finalize()))
}
