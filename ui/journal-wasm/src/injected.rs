//! Adapter for the wallet extension injected as `window.aptos`.

use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use cj_api_types::{Account, PLACEHOLDER_PUBLIC_KEY, PendingTransaction, RawTransaction};
use cj_chain_client::WalletProvider;
use js_sys::{Array, Function, Promise, Reflect};
use serde::Deserialize;
use serde::Serialize;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;

use crate::storage::js_error;

const PROVIDER_KEY: &str = "aptos";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ConnectResponse {
    address: String,
    #[serde(default)]
    public_key: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct SubmitResponse {
    hash: String,
}

pub struct InjectedWallet {
    provider: JsValue,
}

impl InjectedWallet {
    /// `None` when no extension put a provider on `window`.
    pub fn detect() -> Option<Self> {
        let provider = Reflect::get(&gloo_utils::window(), &JsValue::from_str(PROVIDER_KEY)).ok()?;
        if provider.is_undefined() || provider.is_null() {
            return None;
        }
        Some(Self { provider })
    }

    /// Call `window.aptos.<method>(...args)` and await the returned promise.
    async fn call(&self, method: &str, args: Array) -> Result<JsValue> {
        let function: Function = Reflect::get(&self.provider, &JsValue::from_str(method))
            .map_err(js_error)?
            .dyn_into()
            .map_err(|_| anyhow!("window.{PROVIDER_KEY}.{method} is not a function"))?;

        let returned = function.apply(&self.provider, &args).map_err(js_error)?;
        JsFuture::from(Promise::resolve(&returned))
            .await
            .map_err(js_error)
            .with_context(|| format!("window.{PROVIDER_KEY}.{method}"))
    }
}

#[async_trait(?Send)]
impl WalletProvider for InjectedWallet {
    fn name(&self) -> &str {
        "window.aptos"
    }

    async fn connect(&self) -> Result<Account> {
        let value = self.call("connect", Array::new()).await?;
        let response: ConnectResponse =
            serde_wasm_bindgen::from_value(value).map_err(|err| anyhow!("wallet connect response: {err}"))?;
        Ok(Account::new(
            response.address,
            public_key_text(response.public_key),
        ))
    }

    async fn sign_and_submit(&self, txn: &RawTransaction) -> Result<PendingTransaction> {
        let payload = txn
            .payload
            .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
            .map_err(|err| anyhow!("transaction payload: {err}"))?;

        let value = self
            .call("signAndSubmitTransaction", Array::of1(&payload))
            .await?;
        let response: SubmitResponse =
            serde_wasm_bindgen::from_value(value).map_err(|err| anyhow!("wallet submit response: {err}"))?;
        Ok(PendingTransaction {
            hash: response.hash,
        })
    }
}

/// Wallets disagree on the key's shape; keep strings as they are and
/// anything else as its JSON text.
fn public_key_text(value: Option<serde_json::Value>) -> String {
    match value {
        Some(serde_json::Value::String(key)) if !key.is_empty() => key,
        Some(serde_json::Value::Null) | None => PLACEHOLDER_PUBLIC_KEY.to_owned(),
        Some(serde_json::Value::String(_)) => PLACEHOLDER_PUBLIC_KEY.to_owned(),
        Some(other) => other.to_string(),
    }
}
