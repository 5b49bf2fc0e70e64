//! Collaborator traits for the wallet and the ledger.
//!
//! Everything here runs on the browser's single UI thread, so the traits
//! are `?Send`: wallet adapters hold `JsValue`s.

use anyhow::Result;
use async_trait::async_trait;
use cj_api_types::{Account, EntryFunctionPayload, PendingTransaction, RawTransaction, ViewRequest};

/// A user-controlled wallet able to hand out an account and sign for it.
#[async_trait(?Send)]
pub trait WalletProvider {
    fn name(&self) -> &str;
    async fn connect(&self) -> Result<Account>;
    async fn sign_and_submit(&self, txn: &RawTransaction) -> Result<PendingTransaction>;
}

/// Ledger SDK surface: build, submit and read.
#[async_trait(?Send)]
pub trait LedgerClient {
    async fn build_transaction(
        &self,
        sender: &str,
        payload: EntryFunctionPayload,
    ) -> Result<RawTransaction>;

    async fn sign_and_submit(
        &self,
        signer: &dyn WalletProvider,
        txn: RawTransaction,
    ) -> Result<PendingTransaction>;

    async fn view(&self, req: ViewRequest) -> Result<Vec<serde_json::Value>>;
}
