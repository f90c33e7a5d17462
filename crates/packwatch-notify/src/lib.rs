//! Push notifications through the Pushover message API.

mod client;

pub use client::PushoverClient;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum NotifyError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Pushover answered but did not accept the message.
    #[error("pushover rejected message (HTTP {status}): {body}")]
    Rejected { status: u16, body: String },

    #[error("invalid pushover base URL '{base_url}': {reason}")]
    InvalidBaseUrl { base_url: String, reason: String },
}
