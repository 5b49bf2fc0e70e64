//! `window.localStorage` behind the [`KeyValueStore`] trait.

use anyhow::{Context, Result};
use cj_storage::KeyValueStore;
use wasm_bindgen::JsValue;

pub struct LocalStore {
    storage: web_sys::Storage,
}

impl LocalStore {
    pub fn open() -> Result<Self> {
        let storage = gloo_utils::window()
            .local_storage()
            .map_err(js_error)?
            .context("localStorage is disabled")?;
        Ok(Self { storage })
    }
}

impl KeyValueStore for LocalStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        self.storage.get_item(key).map_err(js_error)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.storage
            .set_item(key, value)
            .map_err(js_error)
            .with_context(|| format!("localStorage write of {key}"))
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.storage.remove_item(key).map_err(js_error)
    }
}

/// JS exceptions are not `Send`; keep only their text.
pub fn js_error(err: JsValue) -> anyhow::Error {
    let text = err
        .as_string()
        .or_else(|| {
            js_sys::Reflect::get(&err, &JsValue::from_str("message"))
                .ok()
                .and_then(|message| message.as_string())
        })
        .unwrap_or_else(|| format!("{err:?}"));
    anyhow::anyhow!(text)
}
