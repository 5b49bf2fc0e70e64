//! Wallet and diary sessions for the ChainJournal front-end.
//!
//! [`Journal`] ties a [`WalletSession`] and a [`DiarySession`] to one
//! [`DiaryChain`], chosen once at startup: [`OnChain`] when the browser has
//! a wallet, [`Simulated`] when it does not.

pub mod chain;
pub mod config;
pub mod diary;
pub mod display;
pub mod error;
pub mod form;
pub mod journal;
pub mod screen;
pub mod wallet;

#[cfg(test)]
mod testing;

pub use chain::{ChainMode, Delay, DiaryChain, MOCK_WALLET_ADDRESS, OnChain, Simulated};
pub use config::{DiaryConfig, DiaryFunctions};
pub use diary::DiarySession;
pub use error::DiaryError;
pub use form::{MAX_ENTRY_CHARS, MIN_ENTRY_CHARS, ValidationError, validate_entry};
pub use journal::{Journal, SubmitError};
pub use screen::Screen;
pub use wallet::{WalletSession, WalletStatus};
