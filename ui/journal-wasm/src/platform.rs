//! Startup wiring: configuration, storage and the chain collaborator.

use async_trait::async_trait;
use cj_chain_aptos::AptosClient;
use cj_diary_core::{Delay, DiaryChain, DiaryConfig, OnChain, Simulated};
use cj_storage::{KeyValueStore, NoopStore};
use std::rc::Rc;
use std::time::Duration;
use tracing::{info, warn};

use crate::injected::InjectedWallet;
use crate::logging;
use crate::storage::LocalStore;

pub struct GlooDelay;

#[async_trait(?Send)]
impl Delay for GlooDelay {
    async fn sleep(&self, duration: Duration) {
        gloo_timers::future::sleep(duration).await;
    }
}

/// Open localStorage and install logging with the filter stored there.
/// Without localStorage nothing persists across reloads.
pub fn open_store() -> Rc<dyn KeyValueStore> {
    let local = LocalStore::open();
    let directive = local
        .as_ref()
        .ok()
        .and_then(|store| store.get(logging::LOG_FILTER_KEY).ok().flatten());
    logging::init(directive);

    match local {
        Ok(store) => Rc::new(store),
        Err(err) => {
            warn!("browser storage unavailable, entries will not persist: {:#}", err);
            Rc::new(NoopStore)
        }
    }
}

/// Same keys as the process environment, read from localStorage.
pub fn load_config(store: &dyn KeyValueStore) -> DiaryConfig {
    DiaryConfig::from_lookup(|key| store.get(key).ok().flatten())
}

/// Decided once: a real wallet when one is injected, otherwise simulated.
pub fn select_chain(config: &DiaryConfig) -> Rc<dyn DiaryChain> {
    match InjectedWallet::detect() {
        Some(wallet) => {
            let ledger = AptosClient::new(config.node_url.clone());
            info!("wallet detected, using full node {}", ledger.endpoint());
            Rc::new(OnChain::new(wallet, ledger, config.functions()))
        }
        None => {
            info!("no wallet detected, transactions are simulated");
            Rc::new(Simulated::new(GlooDelay, config.simulated_latency))
        }
    }
}
