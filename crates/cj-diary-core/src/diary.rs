use chrono::Utc;
use cj_api_types::DiaryEntry;
use cj_storage::DiaryCache;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use tracing::{debug, error, info, warn};

use crate::chain::DiaryChain;
use crate::error::DiaryError;

/// Holds the busy flag for the lifetime of one operation.
struct BusyGuard<'a>(&'a Cell<bool>);

impl<'a> BusyGuard<'a> {
    fn acquire(flag: &'a Cell<bool>) -> Result<Self, DiaryError> {
        if flag.replace(true) {
            return Err(DiaryError::Busy);
        }
        Ok(Self(flag))
    }
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.0.set(false);
    }
}

/// Owns the entry list and the busy flag.
///
/// At most one initialize, add or fetch runs at a time; a second one
/// started while the first is suspended is refused with
/// [`DiaryError::Busy`] (fetch just returns the current list).
pub struct DiarySession {
    chain: Rc<dyn DiaryChain>,
    cache: DiaryCache,
    entries: RefCell<Vec<DiaryEntry>>,
    busy: Cell<bool>,
}

impl DiarySession {
    pub fn new(chain: Rc<dyn DiaryChain>, cache: DiaryCache) -> Self {
        Self {
            chain,
            cache,
            entries: RefCell::new(Vec::new()),
            busy: Cell::new(false),
        }
    }

    pub fn is_busy(&self) -> bool {
        self.busy.get()
    }

    /// Snapshot of the list, most recent first.
    pub fn entries(&self) -> Vec<DiaryEntry> {
        self.entries.borrow().clone()
    }

    /// Returns the initialization transaction hash, if one was submitted.
    pub async fn initialize_diary(&self) -> Result<Option<String>, DiaryError> {
        let _busy = BusyGuard::acquire(&self.busy)?;

        match self.chain.initialize_diary().await {
            Ok(Some(hash)) => {
                info!("diary initialized: {}", hash);
                Ok(Some(hash))
            }
            Ok(None) => Ok(None),
            Err(err) => {
                error!("failed to initialize diary: {}", err);
                Err(err)
            }
        }
    }

    /// Submit `content` and put the resulting entry at the head of the list.
    ///
    /// The caller validates `content`. On failure the list is unchanged.
    pub async fn add_entry(&self, content: &str) -> Result<DiaryEntry, DiaryError> {
        if content.trim().is_empty() {
            return Err(DiaryError::EmptyEntry);
        }
        let _busy = BusyGuard::acquire(&self.busy)?;

        let hash = self.chain.submit_entry(content).await.inspect_err(|err| {
            error!("failed to add diary entry: {}", err);
        })?;

        let timestamp = Utc::now().timestamp_millis();
        let entry = DiaryEntry {
            id: self.next_id(timestamp),
            content: content.to_owned(),
            timestamp,
            transaction_hash: Some(hash),
        };
        self.entries.borrow_mut().insert(0, entry.clone());

        // The ledger already accepted the entry; keep it even if the cache
        // cannot be written.
        if let Err(err) = self.cache.prepend_entry(&entry) {
            warn!("failed to cache diary entry {}: {:#}", entry.id, err);
        }
        info!("diary entry {} added", entry.id);
        Ok(entry)
    }

    /// Reload the list from the cache. Failures are logged and the current
    /// list is kept.
    pub async fn fetch_entries(&self) -> Vec<DiaryEntry> {
        let Ok(_busy) = BusyGuard::acquire(&self.busy) else {
            debug!("fetch skipped, diary busy");
            return self.entries();
        };

        match self.load().await {
            Ok(entries) => *self.entries.borrow_mut() = entries,
            Err(err) => error!("failed to fetch diary entries: {}", err),
        }
        self.entries()
    }

    async fn load(&self) -> Result<Vec<DiaryEntry>, DiaryError> {
        // The count is not used to reconcile the list yet.
        if let Some(count) = self.chain.entry_count().await? {
            info!("on-chain diary entry count: {}", count);
        }
        self.cache.load_entries().map_err(DiaryError::Cache)
    }

    /// Epoch milliseconds, bumped past the newest id on a collision. An id
    /// that cannot be bumped (a tampered cache) is ignored.
    fn next_id(&self, timestamp: i64) -> String {
        let newest = self
            .entries
            .borrow()
            .iter()
            .filter_map(|entry| entry.id.parse::<i64>().ok())
            .max();
        match newest {
            Some(newest) if newest >= timestamp => match newest.checked_add(1) {
                Some(next) => next.to_string(),
                None => {
                    warn!("cached diary id {} is out of range", newest);
                    timestamp.to_string()
                }
            },
            _ => timestamp.to_string(),
        }
    }
}
