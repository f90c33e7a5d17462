//! HTTP client for `POST /1/messages.json`.

use std::time::Duration;

use packwatch_core::PushoverCredentials;
use reqwest::{Client, Url};
use serde::Deserialize;

use crate::NotifyError;

const DEFAULT_BASE_URL: &str = "https://api.pushover.net/";

/// Body of a Pushover reply; `status` is `1` when the message was queued.
#[derive(Debug, Deserialize)]
struct PushoverReply {
    status: i64,
    #[serde(default)]
    errors: Vec<String>,
}

/// Sends plain-text messages to one Pushover user.
///
/// Use [`PushoverClient::new`] for production or
/// [`PushoverClient::with_base_url`] to point at a mock server in tests.
pub struct PushoverClient {
    client: Client,
    credentials: PushoverCredentials,
    endpoint: Url,
}

impl PushoverClient {
    /// # Errors
    ///
    /// Returns [`NotifyError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(credentials: PushoverCredentials, timeout_secs: u64) -> Result<Self, NotifyError> {
        Self::with_base_url(credentials, timeout_secs, DEFAULT_BASE_URL)
    }

    /// # Errors
    ///
    /// Returns [`NotifyError::Http`] if the client cannot be constructed, or
    /// [`NotifyError::InvalidBaseUrl`] if `base_url` is not a valid URL.
    pub fn with_base_url(
        credentials: PushoverCredentials,
        timeout_secs: u64,
        base_url: &str,
    ) -> Result<Self, NotifyError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .build()?;

        let invalid = |reason: String| NotifyError::InvalidBaseUrl {
            base_url: base_url.to_owned(),
            reason,
        };
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let endpoint = Url::parse(&normalised)
            .and_then(|base| base.join("1/messages.json"))
            .map_err(|e| invalid(e.to_string()))?;

        Ok(Self {
            client,
            credentials,
            endpoint,
        })
    }

    /// Posts `message` as form fields `token`, `user` and `message`.
    ///
    /// # Errors
    ///
    /// - [`NotifyError::Rejected`] on a non-2xx status or a reply whose
    ///   `status` is not `1`.
    /// - [`NotifyError::Http`] on network failure.
    pub async fn send(&self, message: &str) -> Result<(), NotifyError> {
        let form = [
            ("token", self.credentials.app_token.as_str()),
            ("user", self.credentials.user_key.as_str()),
            ("message", message),
        ];
        let response = self
            .client
            .post(self.endpoint.clone())
            .form(&form)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(NotifyError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        match serde_json::from_str::<PushoverReply>(&body) {
            Ok(reply) if reply.status != 1 => Err(NotifyError::Rejected {
                status: status.as_u16(),
                body: reply.errors.join("; "),
            }),
            Ok(_) => {
                tracing::debug!("pushover accepted message");
                Ok(())
            }
            Err(e) => {
                tracing::debug!(error = %e, "pushover reply was not JSON; treating 2xx as accepted");
                Ok(())
            }
        }
    }
}
