use anyhow::{Context, Result};
use async_trait::async_trait;
use cj_api_types::{
    EntryFunctionId, EntryFunctionPayload, PendingTransaction, RawTransaction, ViewRequest,
};
use cj_chain_client::{LedgerClient, WalletProvider};
use serde::Deserialize;
use tracing::debug;

pub const APTOS_TESTNET_URL: &str = "https://fullnode.testnet.aptoslabs.com";

/// REST client for an Aptos full node.
///
/// Reads `APTOS_NODE_URL` from the environment at construction time when no
/// endpoint is given (default: the public testnet full node). Signing never
/// happens here: the browser wallet owns the key, so submission is handed to
/// the [`WalletProvider`].
pub struct AptosClient {
    endpoint: String,
    http: reqwest::Client,
}

impl Default for AptosClient {
    fn default() -> Self {
        Self::new(None)
    }
}

impl AptosClient {
    pub fn new(endpoint: Option<String>) -> Self {
        let endpoint = endpoint
            .or_else(|| std::env::var("APTOS_NODE_URL").ok())
            .unwrap_or_else(|| APTOS_TESTNET_URL.to_string());
        Self {
            endpoint: endpoint.trim_end_matches('/').to_string(),
            http: reqwest::Client::new(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

// ── Aptos REST API types ─────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct AptosErrorResponse {
    message: String,
    #[serde(default)]
    error_code: Option<String>,
}

#[async_trait(?Send)]
impl LedgerClient for AptosClient {
    async fn build_transaction(
        &self,
        sender: &str,
        payload: EntryFunctionPayload,
    ) -> Result<RawTransaction> {
        if sender.trim().is_empty() {
            anyhow::bail!("transaction sender is required");
        }
        payload
            .function
            .parse::<EntryFunctionId>()
            .context("aptos build_transaction")?;

        Ok(RawTransaction {
            sender: sender.to_owned(),
            payload,
        })
    }

    async fn sign_and_submit(
        &self,
        signer: &dyn WalletProvider,
        txn: RawTransaction,
    ) -> Result<PendingTransaction> {
        let pending = signer
            .sign_and_submit(&txn)
            .await
            .with_context(|| format!("{} rejected {}", signer.name(), txn.payload.function))?;

        if pending.hash.trim().is_empty() {
            anyhow::bail!("{} returned an empty transaction hash", signer.name());
        }

        debug!("submitted {} as {}", txn.payload.function, pending.hash);
        Ok(pending)
    }

    async fn view(&self, req: ViewRequest) -> Result<Vec<serde_json::Value>> {
        let url = format!("{}/v1/view", self.endpoint);
        let response = self
            .http
            .post(&url)
            .json(&req)
            .send()
            .await
            .context("aptos view transport")?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            if let Ok(err) = serde_json::from_str::<AptosErrorResponse>(&text) {
                anyhow::bail!(
                    "aptos view {} failed ({}): {}",
                    req.function,
                    err.error_code.as_deref().unwrap_or("unknown_error"),
                    err.message
                );
            }
            anyhow::bail!("aptos view HTTP {status}: {text}");
        }

        response
            .json::<Vec<serde_json::Value>>()
            .await
            .context("aptos view parse")
    }
}
