//! Fakes shared by the unit tests.

use anyhow::{Result, bail};
use async_trait::async_trait;
use cj_api_types::{Account, EntryFunctionPayload, PendingTransaction, RawTransaction, ViewRequest};
use cj_chain_client::{LedgerClient, WalletProvider};
use cj_storage::{InMemoryStore, KeyValueStore};
use std::cell::{Cell, RefCell};
use std::time::Duration;

use crate::chain::Delay;

pub const WALLET_ADDRESS: &str = "0xa11ce00000000000000000000000000000000000000000000000000000000001";

pub fn is_transaction_hash(hash: &str) -> bool {
    hash.strip_prefix("0x").is_some_and(|digits| {
        digits.len() == 64 && digits.chars().all(|c| matches!(c, '0'..='9' | 'a'..='f'))
    })
}

pub struct FakeWallet {
    pub account: Account,
    pub fail_connect: Cell<bool>,
    pub connects: Cell<usize>,
    pub submitted: RefCell<Vec<RawTransaction>>,
}

impl Default for FakeWallet {
    fn default() -> Self {
        Self {
            account: Account::new(WALLET_ADDRESS, "0xed25519"),
            fail_connect: Cell::new(false),
            connects: Cell::new(0),
            submitted: RefCell::new(Vec::new()),
        }
    }
}

impl FakeWallet {
    /// Hash the wallet hands back for its `index`-th submission.
    pub fn submitted_hash(&self, index: usize) -> String {
        format!("0x{:064x}", index + 1)
    }
}

#[async_trait(?Send)]
impl WalletProvider for FakeWallet {
    fn name(&self) -> &str {
        "fake-wallet"
    }

    async fn connect(&self) -> Result<Account> {
        self.connects.set(self.connects.get() + 1);
        if self.fail_connect.get() {
            bail!("user rejected the request");
        }
        Ok(self.account.clone())
    }

    async fn sign_and_submit(&self, txn: &RawTransaction) -> Result<PendingTransaction> {
        let index = {
            let mut submitted = self.submitted.borrow_mut();
            submitted.push(txn.clone());
            submitted.len() - 1
        };
        Ok(PendingTransaction {
            hash: self.submitted_hash(index),
        })
    }
}

#[derive(Default)]
pub struct FakeLedger {
    pub built: RefCell<Vec<RawTransaction>>,
    pub views: RefCell<Vec<ViewRequest>>,
    pub entry_count: Cell<u64>,
    pub fail_submit: Cell<bool>,
    pub fail_view: Cell<bool>,
}

#[async_trait(?Send)]
impl LedgerClient for FakeLedger {
    async fn build_transaction(
        &self,
        sender: &str,
        payload: EntryFunctionPayload,
    ) -> Result<RawTransaction> {
        let txn = RawTransaction {
            sender: sender.to_owned(),
            payload,
        };
        self.built.borrow_mut().push(txn.clone());
        Ok(txn)
    }

    async fn sign_and_submit(
        &self,
        signer: &dyn WalletProvider,
        txn: RawTransaction,
    ) -> Result<PendingTransaction> {
        if self.fail_submit.get() {
            bail!("node unavailable");
        }
        signer.sign_and_submit(&txn).await
    }

    async fn view(&self, req: ViewRequest) -> Result<Vec<serde_json::Value>> {
        self.views.borrow_mut().push(req);
        if self.fail_view.get() {
            bail!("view function unavailable");
        }
        Ok(vec![self.entry_count.get().to_string().into()])
    }
}

pub struct TokioDelay;

#[async_trait(?Send)]
impl Delay for TokioDelay {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// In-memory store that counts writes and can be told to refuse them.
#[derive(Default)]
pub struct CountingStore {
    inner: InMemoryStore,
    pub writes: Cell<usize>,
    pub fail_writes: Cell<bool>,
}

impl KeyValueStore for CountingStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        self.inner.get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        if self.fail_writes.get() {
            bail!("quota exceeded");
        }
        self.writes.set(self.writes.get() + 1);
        self.inner.set(key, value)
    }

    fn remove(&self, key: &str) -> Result<()> {
        if self.fail_writes.get() {
            bail!("quota exceeded");
        }
        self.writes.set(self.writes.get() + 1);
        self.inner.remove(key)
    }
}
