use cj_api_types::DiaryEntry;
use cj_storage::{DiaryCache, KeyValueStore};
use std::cell::Cell;
use std::rc::Rc;
use tracing::{info, warn};

use crate::chain::{ChainMode, DiaryChain};
use crate::diary::DiarySession;
use crate::error::DiaryError;
use crate::form::{ValidationError, validate_entry};
use crate::screen::Screen;
use crate::wallet::{WalletSession, WalletStatus};

/// Why a submitted entry did not make it into the diary.
#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    #[error(transparent)]
    Invalid(#[from] ValidationError),
    #[error("Another entry is still being added")]
    Busy,
    #[error("Failed to add diary entry. Please try again.")]
    Failed(#[source] DiaryError),
}

/// The app controller: one wallet session, one diary session and the
/// `initialized` flag that together select the [`Screen`].
pub struct Journal {
    mode: ChainMode,
    wallet: WalletSession,
    diary: DiarySession,
    initialized: Cell<bool>,
}

impl Journal {
    pub fn new(chain: Rc<dyn DiaryChain>, store: Rc<dyn KeyValueStore>) -> Self {
        let cache = DiaryCache::new(store);
        Self {
            mode: chain.mode(),
            wallet: WalletSession::new(chain.clone(), cache.clone()),
            diary: DiarySession::new(chain, cache),
            initialized: Cell::new(false),
        }
    }

    /// Startup rehydration. A restored session still has to initialize.
    pub fn start(&self) -> Screen {
        self.wallet.restore();
        self.initialized.set(false);
        self.screen()
    }

    pub fn screen(&self) -> Screen {
        Screen::select(self.wallet.is_connected(), self.initialized.get())
    }

    pub fn mode(&self) -> ChainMode {
        self.mode
    }

    pub fn wallet(&self) -> &WalletSession {
        &self.wallet
    }

    pub fn diary(&self) -> &DiarySession {
        &self.diary
    }

    pub fn is_busy(&self) -> bool {
        self.diary.is_busy()
    }

    pub async fn connect(&self) -> Result<Screen, DiaryError> {
        self.wallet.connect().await?;
        Ok(self.screen())
    }

    /// Initialize the diary and, on entering [`Screen::Ready`], load the
    /// entry list. A restored session is verified with the wallet first so
    /// the header and the cache name the account that signs.
    pub async fn initialize(&self) -> Result<Screen, DiaryError> {
        match self.wallet.status() {
            WalletStatus::Disconnected => return Err(DiaryError::NotConnected),
            WalletStatus::Restored(cached) => {
                let account = self.wallet.connect().await?;
                if account.address != cached.address {
                    info!("wallet switched from {} to {}", cached.address, account.address);
                }
            }
            WalletStatus::Verified(_) => {}
        }
        self.diary.initialize_diary().await?;
        self.initialized.set(true);
        self.diary.fetch_entries().await;
        Ok(self.screen())
    }

    /// Validate the raw form text and add it. Invalid text never reaches
    /// the diary session.
    pub async fn submit_entry(&self, input: &str) -> Result<DiaryEntry, SubmitError> {
        let content = validate_entry(input)?;
        if !self.wallet.is_connected() {
            return Err(SubmitError::Failed(DiaryError::NotConnected));
        }
        match self.diary.add_entry(content).await {
            Ok(entry) => Ok(entry),
            Err(DiaryError::Busy) => Err(SubmitError::Busy),
            Err(err) => Err(SubmitError::Failed(err)),
        }
    }

    pub async fn refresh(&self) -> Vec<DiaryEntry> {
        self.diary.fetch_entries().await
    }

    pub fn disconnect(&self) -> Screen {
        self.initialized.set(false);
        if let Err(err) = self.wallet.disconnect() {
            warn!("wallet disconnected but the cache was not cleared: {}", err);
        }
        info!("back to the connect screen");
        self.screen()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chain::{MOCK_WALLET_ADDRESS, OnChain, Simulated};
    use crate::config::DiaryFunctions;
    use crate::testing::{
        CountingStore, FakeLedger, FakeWallet, TokioDelay, WALLET_ADDRESS, is_transaction_hash,
    };
    use cj_storage::{KeyValueStore, WALLET_ADDRESS_KEY};
    use std::time::Duration;

    fn simulated(store: &Rc<CountingStore>) -> Journal {
        let chain = Rc::new(Simulated::new(TokioDelay, Duration::from_millis(2000)));
        Journal::new(chain, store.clone())
    }

    fn on_chain(store: &Rc<CountingStore>) -> (Rc<OnChain<FakeWallet, FakeLedger>>, Journal) {
        let chain = Rc::new(OnChain::new(
            FakeWallet::default(),
            FakeLedger::default(),
            DiaryFunctions::default(),
        ));
        let journal = Journal::new(chain.clone(), store.clone());
        (chain, journal)
    }

    #[tokio::test(start_paused = true)]
    async fn walkthrough_without_a_wallet() -> anyhow::Result<()> {
        let store = Rc::new(CountingStore::default());
        let journal = simulated(&store);
        assert_eq!(journal.start(), Screen::Disconnected);
        assert_eq!(journal.mode(), ChainMode::Simulated);

        assert_eq!(journal.connect().await?, Screen::AwaitingInit);
        assert_eq!(
            journal.wallet().account().map(|a| a.address),
            Some(MOCK_WALLET_ADDRESS.to_owned())
        );

        assert_eq!(journal.initialize().await?, Screen::Ready);

        let started = tokio::time::Instant::now();
        let entry = journal.submit_entry("Today was a good day.").await?;
        assert!(started.elapsed() >= Duration::from_millis(2000));

        assert_eq!(journal.diary().entries(), vec![entry.clone()]);
        assert_eq!(entry.content, "Today was a good day.");
        assert!(is_transaction_hash(entry.transaction_hash.as_deref().unwrap_or_default()));
        Ok(())
    }

    #[tokio::test]
    async fn short_input_never_reaches_the_ledger() -> anyhow::Result<()> {
        let store = Rc::new(CountingStore::default());
        let (chain, journal) = on_chain(&store);
        journal.connect().await?;
        journal.initialize().await?;
        let writes = store.writes.get();
        let built = chain.ledger().built.borrow().len();

        let err = journal.submit_entry("  short  ").await.unwrap_err();

        assert!(matches!(err, SubmitError::Invalid(ValidationError::TooShort)));
        assert_eq!(err.to_string(), "Entry must be at least 10 characters long");
        assert_eq!(chain.ledger().built.borrow().len(), built);
        assert_eq!(store.writes.get(), writes);
        assert!(journal.diary().entries().is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn submitted_text_is_trimmed() -> anyhow::Result<()> {
        let store = Rc::new(CountingStore::default());
        let (_chain, journal) = on_chain(&store);
        journal.connect().await?;

        let entry = journal.submit_entry("\n  Today was a good day.  \n").await?;

        assert_eq!(entry.content, "Today was a good day.");
        Ok(())
    }

    #[tokio::test]
    async fn ledger_failure_is_reported_with_the_form_message() -> anyhow::Result<()> {
        let store = Rc::new(CountingStore::default());
        let (chain, journal) = on_chain(&store);
        journal.connect().await?;
        chain.ledger().fail_submit.set(true);

        let err = journal.submit_entry("Today was a good day.").await.unwrap_err();

        assert!(matches!(err, SubmitError::Failed(DiaryError::Ledger(_))));
        assert_eq!(err.to_string(), "Failed to add diary entry. Please try again.");
        Ok(())
    }

    #[tokio::test(start_paused = true)]
    async fn second_submit_while_busy_appends_nothing() -> anyhow::Result<()> {
        let store = Rc::new(CountingStore::default());
        let journal = simulated(&store);
        journal.connect().await?;

        let (first, second) = tokio::join!(
            journal.submit_entry("Today was a good day."),
            journal.submit_entry("Today was a good day."),
        );

        first?;
        assert!(matches!(second, Err(SubmitError::Busy)));
        assert_eq!(journal.diary().entries().len(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn entering_ready_fetches_the_cached_list() -> anyhow::Result<()> {
        let store = Rc::new(CountingStore::default());
        let (_chain, journal) = on_chain(&store);
        journal.connect().await?;
        journal.initialize().await?;
        let entry = journal.submit_entry("Today was a good day.").await?;

        let (chain, reloaded) = on_chain(&store);
        assert_eq!(reloaded.start(), Screen::AwaitingInit);
        assert!(matches!(reloaded.wallet().status(), WalletStatus::Restored(_)));

        assert_eq!(reloaded.initialize().await?, Screen::Ready);
        assert_eq!(reloaded.diary().entries(), vec![entry.clone()]);
        assert_eq!(chain.ledger().views.borrow().len(), 1);

        assert_eq!(reloaded.refresh().await, vec![entry]);
        assert_eq!(chain.ledger().views.borrow().len(), 2);
        Ok(())
    }

    #[tokio::test]
    async fn initialize_verifies_a_restored_session() -> anyhow::Result<()> {
        let store = Rc::new(CountingStore::default());
        DiaryCache::new(store.clone()).remember_connection("0xstale")?;
        let (chain, journal) = on_chain(&store);
        assert_eq!(journal.start(), Screen::AwaitingInit);

        journal.initialize().await?;

        assert_eq!(
            journal.wallet().status(),
            WalletStatus::Verified(chain.wallet().account.clone())
        );
        assert_eq!(store.get(WALLET_ADDRESS_KEY)?.as_deref(), Some(WALLET_ADDRESS));
        assert_eq!(chain.ledger().built.borrow()[0].sender, WALLET_ADDRESS);
        Ok(())
    }

    #[tokio::test]
    async fn disconnect_resets_initialization() -> anyhow::Result<()> {
        let store = Rc::new(CountingStore::default());
        let (_chain, journal) = on_chain(&store);
        journal.connect().await?;
        journal.initialize().await?;

        assert_eq!(journal.disconnect(), Screen::Disconnected);
        assert_eq!(journal.connect().await?, Screen::AwaitingInit);

        let fresh = on_chain(&store).1;
        journal.disconnect();
        assert_eq!(fresh.start(), Screen::Disconnected);
        Ok(())
    }

    #[tokio::test]
    async fn initialize_requires_a_connection() {
        let store = Rc::new(CountingStore::default());
        let (chain, journal) = on_chain(&store);

        assert!(matches!(
            journal.initialize().await,
            Err(DiaryError::NotConnected)
        ));
        assert!(chain.ledger().built.borrow().is_empty());
    }
}
