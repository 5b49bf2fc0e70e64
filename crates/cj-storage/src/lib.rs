use anyhow::{Context, Result, anyhow};
use cj_api_types::DiaryEntry;
use std::collections::HashMap;
use std::rc::Rc;
use std::sync::RwLock;

pub const CONNECTED_FLAG_KEY: &str = "walletConnected";
pub const WALLET_ADDRESS_KEY: &str = "walletAddress";
pub const DIARY_ENTRIES_KEY: &str = "diaryEntries";

/// String key-value storage with browser `localStorage` semantics.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
    fn remove(&self, key: &str) -> Result<()>;
}

#[derive(Default)]
pub struct NoopStore;

impl KeyValueStore for NoopStore {
    fn get(&self, _key: &str) -> Result<Option<String>> {
        Ok(None)
    }

    fn set(&self, _key: &str, _value: &str) -> Result<()> {
        Ok(())
    }

    fn remove(&self, _key: &str) -> Result<()> {
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemoryStore {
    values: RwLock<HashMap<String, String>>,
}

impl InMemoryStore {
    pub fn len(&self) -> usize {
        self.values.read().map(|guard| guard.len()).unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl KeyValueStore for InMemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let guard = self.values.read().map_err(|_| anyhow!("store lock poisoned"))?;
        Ok(guard.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut guard = self.values.write().map_err(|_| anyhow!("store lock poisoned"))?;
        guard.insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let mut guard = self.values.write().map_err(|_| anyhow!("store lock poisoned"))?;
        guard.remove(key);
        Ok(())
    }
}

/// Typed view over the three cache keys the diary uses.
///
/// Cheap to clone; every clone writes through to the same store.
#[derive(Clone)]
pub struct DiaryCache {
    store: Rc<dyn KeyValueStore>,
}

impl DiaryCache {
    pub fn new(store: Rc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Address of the last connected wallet, if the connected flag is set.
    pub fn connected_address(&self) -> Result<Option<String>> {
        let connected = self.store.get(CONNECTED_FLAG_KEY)?.as_deref() == Some("true");
        if !connected {
            return Ok(None);
        }
        Ok(self
            .store
            .get(WALLET_ADDRESS_KEY)?
            .filter(|address| !address.trim().is_empty()))
    }

    pub fn remember_connection(&self, address: &str) -> Result<()> {
        self.store.set(CONNECTED_FLAG_KEY, "true")?;
        self.store.set(WALLET_ADDRESS_KEY, address)?;
        Ok(())
    }

    pub fn forget_connection(&self) -> Result<()> {
        self.store.remove(CONNECTED_FLAG_KEY)?;
        self.store.remove(WALLET_ADDRESS_KEY)?;
        Ok(())
    }

    /// Cached entries, most recent first. A missing key is an empty diary.
    pub fn load_entries(&self) -> Result<Vec<DiaryEntry>> {
        match self.store.get(DIARY_ENTRIES_KEY)? {
            Some(raw) => serde_json::from_str(&raw).context("cached diary entries are unreadable"),
            None => Ok(Vec::new()),
        }
    }

    /// Read the cached list, put `entry` at its head and write it back.
    ///
    /// Not atomic across tabs sharing the same origin.
    pub fn prepend_entry(&self, entry: &DiaryEntry) -> Result<()> {
        let mut entries = self.load_entries().unwrap_or_else(|err| {
            tracing::warn!("replacing unreadable diary cache: {:#}", err);
            Vec::new()
        });
        entries.insert(0, entry.clone());
        let json = serde_json::to_string(&entries)?;
        self.store.set(DIARY_ENTRIES_KEY, &json)
    }
}
