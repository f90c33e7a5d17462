use packwatch_core::AppConfig;

/// HTTP behaviour shared by every storefront source.
#[derive(Debug, Clone)]
pub struct ScraperSettings {
    pub request_timeout_secs: u64,
    pub user_agent: String,
    /// Additional attempts after the first failure on 429 / network errors.
    pub max_retries: u32,
    pub retry_backoff_base_secs: u64,
    /// Pause between consecutive requests to the same shop.
    pub inter_request_delay_ms: u64,
}

impl From<&AppConfig> for ScraperSettings {
    fn from(config: &AppConfig) -> Self {
        Self {
            request_timeout_secs: config.scraper_request_timeout_secs,
            user_agent: config.scraper_user_agent.clone(),
            max_retries: config.scraper_max_retries,
            retry_backoff_base_secs: config.scraper_retry_backoff_base_secs,
            inter_request_delay_ms: config.scraper_inter_request_delay_ms,
        }
    }
}
