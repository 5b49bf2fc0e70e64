use cj_api_types::EntryFunctionId;
use std::time::Duration;
use tracing::warn;

pub const NODE_URL_KEY: &str = "CHAINJOURNAL_NODE_URL";
pub const MODULE_ADDRESS_KEY: &str = "CHAINJOURNAL_MODULE_ADDRESS";
pub const MODULE_NAME_KEY: &str = "CHAINJOURNAL_MODULE_NAME";
pub const SIMULATED_LATENCY_KEY: &str = "CHAINJOURNAL_SIMULATED_LATENCY_MS";

pub const DEFAULT_MODULE_ADDRESS: &str = "0x123";
pub const DEFAULT_MODULE_NAME: &str = "diary";
pub const DEFAULT_SIMULATED_LATENCY: Duration = Duration::from_millis(2000);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiaryConfig {
    /// Full node URL; `None` leaves the choice to the ledger client.
    pub node_url: Option<String>,
    pub module_address: String,
    pub module_name: String,
    /// How long the simulated chain pretends a submission takes.
    pub simulated_latency: Duration,
}

impl Default for DiaryConfig {
    fn default() -> Self {
        Self {
            node_url: None,
            module_address: DEFAULT_MODULE_ADDRESS.to_owned(),
            module_name: DEFAULT_MODULE_NAME.to_owned(),
            simulated_latency: DEFAULT_SIMULATED_LATENCY,
        }
    }
}

impl DiaryConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from any key lookup (process env, browser storage).
    /// Blank values are ignored; malformed ones fall back to the default.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let value = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_owned())
                .filter(|v| !v.is_empty())
        };
        let mut config = Self::default();

        config.node_url = value(NODE_URL_KEY);

        if let Some(address) = value(MODULE_ADDRESS_KEY) {
            if address.starts_with("0x") && address.len() > 2 {
                config.module_address = address;
            } else {
                warn!("{MODULE_ADDRESS_KEY}={address} is not a 0x address, using {DEFAULT_MODULE_ADDRESS}");
            }
        }

        if let Some(name) = value(MODULE_NAME_KEY) {
            config.module_name = name;
        }

        if let Some(raw) = value(SIMULATED_LATENCY_KEY) {
            match raw.parse::<u64>() {
                Ok(ms) => config.simulated_latency = Duration::from_millis(ms),
                Err(_) => warn!(
                    "{SIMULATED_LATENCY_KEY}={raw} is not a number of milliseconds, using {}",
                    DEFAULT_SIMULATED_LATENCY.as_millis()
                ),
            }
        }

        config
    }

    pub fn functions(&self) -> DiaryFunctions {
        let entry = |function: &str| {
            EntryFunctionId::new(&self.module_address, &self.module_name, function)
        };
        DiaryFunctions {
            initialize: entry("initialize_diary"),
            add_entry: entry("add_entry"),
            entry_count: entry("get_entry_count"),
        }
    }
}

/// The three entry points of the diary module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiaryFunctions {
    pub initialize: EntryFunctionId,
    pub add_entry: EntryFunctionId,
    pub entry_count: EntryFunctionId,
}

impl Default for DiaryFunctions {
    fn default() -> Self {
        DiaryConfig::default().functions()
    }
}
