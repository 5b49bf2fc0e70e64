use cj_api_types::Account;
use cj_storage::DiaryCache;
use std::cell::RefCell;
use std::rc::Rc;
use tracing::{error, info, warn};

use crate::chain::DiaryChain;
use crate::error::DiaryError;

/// Connection state of the wallet session. The account only exists while
/// connected.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum WalletStatus {
    #[default]
    Disconnected,
    /// Rebuilt from the cache at startup; the wallet was not asked.
    Restored(Account),
    /// Handed out by the wallet in this page session.
    Verified(Account),
}

impl WalletStatus {
    pub fn account(&self) -> Option<&Account> {
        match self {
            Self::Disconnected => None,
            Self::Restored(account) | Self::Verified(account) => Some(account),
        }
    }

    pub fn is_connected(&self) -> bool {
        self.account().is_some()
    }
}

pub struct WalletSession {
    chain: Rc<dyn DiaryChain>,
    cache: DiaryCache,
    status: RefCell<WalletStatus>,
}

impl WalletSession {
    pub fn new(chain: Rc<dyn DiaryChain>, cache: DiaryCache) -> Self {
        Self {
            chain,
            cache,
            status: RefCell::new(WalletStatus::Disconnected),
        }
    }

    /// Optimistically trust the cached connection flag and address.
    pub fn restore(&self) -> WalletStatus {
        let status = match self.cache.connected_address() {
            Ok(Some(address)) => {
                info!("restored wallet session for {}", address);
                WalletStatus::Restored(Account::with_placeholder_key(address))
            }
            Ok(None) => WalletStatus::Disconnected,
            Err(err) => {
                warn!("failed to read cached wallet session: {:#}", err);
                WalletStatus::Disconnected
            }
        };
        *self.status.borrow_mut() = status.clone();
        status
    }

    pub async fn connect(&self) -> Result<Account, DiaryError> {
        let account = self.chain.connect().await.inspect_err(|err| {
            error!("failed to connect wallet: {}", err);
        })?;

        if let Err(err) = self.cache.remember_connection(&account.address) {
            warn!("failed to cache wallet connection: {:#}", err);
        }
        info!("wallet connected: {}", account.address);
        *self.status.borrow_mut() = WalletStatus::Verified(account.clone());
        Ok(account)
    }

    /// Local only: the wallet is not told.
    pub fn disconnect(&self) -> Result<(), DiaryError> {
        *self.status.borrow_mut() = WalletStatus::Disconnected;
        self.cache.forget_connection().map_err(DiaryError::Cache)?;
        info!("wallet disconnected");
        Ok(())
    }

    pub fn status(&self) -> WalletStatus {
        self.status.borrow().clone()
    }

    pub fn account(&self) -> Option<Account> {
        self.status.borrow().account().cloned()
    }

    pub fn is_connected(&self) -> bool {
        self.status.borrow().is_connected()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chain::{MOCK_WALLET_ADDRESS, Simulated};
    use crate::testing::{CountingStore, TokioDelay};
    use cj_api_types::PLACEHOLDER_PUBLIC_KEY;
    use cj_storage::{CONNECTED_FLAG_KEY, KeyValueStore, WALLET_ADDRESS_KEY};
    use std::time::Duration;

    fn session() -> (Rc<CountingStore>, WalletSession) {
        let store = Rc::new(CountingStore::default());
        let chain = Rc::new(Simulated::new(TokioDelay, Duration::from_millis(2000)));
        let session = WalletSession::new(chain, DiaryCache::new(store.clone()));
        (store, session)
    }

    #[test]
    fn restore_trusts_the_cached_address() -> anyhow::Result<()> {
        let (store, session) = session();
        store.set(CONNECTED_FLAG_KEY, "true")?;
        store.set(WALLET_ADDRESS_KEY, "0xfeed")?;

        let status = session.restore();

        assert_eq!(
            status,
            WalletStatus::Restored(Account::new("0xfeed", PLACEHOLDER_PUBLIC_KEY))
        );
        assert!(session.is_connected());
        Ok(())
    }

    #[test]
    fn restore_without_flag_stays_disconnected() -> anyhow::Result<()> {
        let (store, session) = session();
        store.set(WALLET_ADDRESS_KEY, "0xfeed")?;

        assert_eq!(session.restore(), WalletStatus::Disconnected);
        assert_eq!(session.account(), None);
        Ok(())
    }

    #[tokio::test]
    async fn connect_upgrades_a_restored_session() -> anyhow::Result<()> {
        let (store, session) = session();
        store.set(CONNECTED_FLAG_KEY, "true")?;
        store.set(WALLET_ADDRESS_KEY, MOCK_WALLET_ADDRESS)?;
        session.restore();

        let account = session.connect().await?;

        assert_eq!(session.status(), WalletStatus::Verified(account));
        Ok(())
    }

    #[tokio::test]
    async fn disconnect_clears_account_and_cache() -> anyhow::Result<()> {
        let (store, session) = session();
        session.connect().await?;
        assert_eq!(store.get(CONNECTED_FLAG_KEY)?.as_deref(), Some("true"));
        assert_eq!(store.get(WALLET_ADDRESS_KEY)?.as_deref(), Some(MOCK_WALLET_ADDRESS));

        session.disconnect()?;

        assert!(!session.is_connected());
        assert_eq!(store.get(CONNECTED_FLAG_KEY)?, None);
        assert_eq!(store.get(WALLET_ADDRESS_KEY)?, None);
        assert_eq!(session.restore(), WalletStatus::Disconnected);
        Ok(())
    }

    #[tokio::test]
    async fn connect_survives_an_unwritable_cache() -> anyhow::Result<()> {
        let (store, session) = session();
        store.fail_writes.set(true);

        session.connect().await?;

        assert!(session.is_connected());
        assert_eq!(store.writes.get(), 0);
        Ok(())
    }
}
