//! Price history for selected offers: dated ledgers, medians, deals and the
//! per-run offer log, persisted behind [`HistoryStore`].

pub mod ledger;
pub mod offer_log;
pub mod store;

pub use ledger::{median, PriceHistory, PricePoint, PriceUpdate};
pub use offer_log::OfferLogEntry;
pub use store::{HistoryStore, JsonFileStore, MemoryStore};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum HistoryError {
    #[error("failed to read history file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write history file {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("history file {path} is not valid JSON: {source}")]
    Corrupt {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to serialize history: {0}")]
    Serialize(#[source] serde_json::Error),
}
