use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Public key recorded for accounts that were not handed out by a wallet
/// (the simulated wallet and sessions restored from the cache).
pub const PLACEHOLDER_PUBLIC_KEY: &str = "mock-public-key";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub address: String,
    pub public_key: String,
}

impl Account {
    pub fn new(address: impl Into<String>, public_key: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            public_key: public_key.into(),
        }
    }

    pub fn with_placeholder_key(address: impl Into<String>) -> Self {
        Self::new(address, PLACEHOLDER_PUBLIC_KEY)
    }
}

/// One diary entry as shown in the UI and stored in the browser cache.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DiaryEntry {
    pub id: String,
    pub content: String,
    /// Creation time, epoch milliseconds.
    pub timestamp: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transaction_hash: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid entry function id `{0}`; expected <address>::<module>::<function>")]
pub struct ParseFunctionIdError(pub String);

/// Fully qualified Move entry point, e.g. `0x123::diary::add_entry`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EntryFunctionId {
    pub address: String,
    pub module: String,
    pub function: String,
}

impl EntryFunctionId {
    pub fn new(address: &str, module: &str, function: &str) -> Self {
        Self {
            address: address.to_owned(),
            module: module.to_owned(),
            function: function.to_owned(),
        }
    }

    pub fn payload(&self, arguments: Vec<serde_json::Value>) -> EntryFunctionPayload {
        EntryFunctionPayload {
            function: self.to_string(),
            type_arguments: Vec::new(),
            arguments,
        }
    }

    pub fn view(&self, arguments: Vec<serde_json::Value>) -> ViewRequest {
        ViewRequest {
            function: self.to_string(),
            type_arguments: Vec::new(),
            arguments,
        }
    }
}

impl fmt::Display for EntryFunctionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}::{}::{}", self.address, self.module, self.function)
    }
}

impl FromStr for EntryFunctionId {
    type Err = ParseFunctionIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split("::").collect();
        match parts.as_slice() {
            [address, module, function]
                if address.starts_with("0x")
                    && !module.is_empty()
                    && !function.is_empty() =>
            {
                Ok(Self::new(address, module, function))
            }
            _ => Err(ParseFunctionIdError(s.to_owned())),
        }
    }
}

/// Entry-function payload in the JSON shape wallets and full nodes accept.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename = "entry_function_payload")]
pub struct EntryFunctionPayload {
    pub function: String,
    pub type_arguments: Vec<String>,
    pub arguments: Vec<serde_json::Value>,
}

/// Unsigned transaction: who sends it and what it calls.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RawTransaction {
    pub sender: String,
    pub payload: EntryFunctionPayload,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PendingTransaction {
    pub hash: String,
}

/// Body of a view-function call.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ViewRequest {
    pub function: String,
    pub type_arguments: Vec<String>,
    pub arguments: Vec<serde_json::Value>,
}
