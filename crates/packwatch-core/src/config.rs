use crate::app_config::{AppConfig, Environment, PushoverCredentials};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is invalid or only half of the Pushover
/// credential pair is set.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value is invalid or only half of the Pushover
/// credential pair is set.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the process environment so it can be tested with a plain
/// `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u32>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<usize>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let env = parse_environment(&or_default("PACKWATCH_ENV", "development"))?;
    let log_level = or_default("PACKWATCH_LOG_LEVEL", "info");
    let shops_path = PathBuf::from(or_default("PACKWATCH_SHOPS_PATH", "./config/shops.yaml"));
    let history_path = PathBuf::from(or_default(
        "PACKWATCH_HISTORY_PATH",
        "./data/price_history.json",
    ));

    let non_empty = |var: &str| lookup(var).ok().filter(|v| !v.trim().is_empty());
    let pushover = match (non_empty("PUSHOVER_USER_KEY"), non_empty("PUSHOVER_APP_TOKEN")) {
        (Some(user_key), Some(app_token)) => Some(PushoverCredentials {
            user_key,
            app_token,
        }),
        (Some(_), None) => {
            return Err(ConfigError::MissingEnvVar("PUSHOVER_APP_TOKEN".to_string()))
        }
        (None, Some(_)) => {
            return Err(ConfigError::MissingEnvVar("PUSHOVER_USER_KEY".to_string()))
        }
        (None, None) => None,
    };

    let scraper_request_timeout_secs =
        parse_u64("PACKWATCH_SCRAPER_REQUEST_TIMEOUT_SECS", "30")?;
    let scraper_user_agent = or_default(
        "PACKWATCH_SCRAPER_USER_AGENT",
        "packwatch/0.1 (sealed-price-tracker)",
    );
    let scraper_max_concurrent_shops =
        parse_usize("PACKWATCH_SCRAPER_MAX_CONCURRENT_SHOPS", "4")?;
    let scraper_inter_request_delay_ms =
        parse_u64("PACKWATCH_SCRAPER_INTER_REQUEST_DELAY_MS", "250")?;
    let scraper_max_retries = parse_u32("PACKWATCH_SCRAPER_MAX_RETRIES", "3")?;
    let scraper_retry_backoff_base_secs =
        parse_u64("PACKWATCH_SCRAPER_RETRY_BACKOFF_BASE_SECS", "5")?;

    Ok(AppConfig {
        env,
        log_level,
        shops_path,
        history_path,
        pushover,
        scraper_request_timeout_secs,
        scraper_user_agent,
        scraper_max_concurrent_shops,
        scraper_inter_request_delay_ms,
        scraper_max_retries,
        scraper_retry_backoff_base_secs,
    })
}

/// Parse a string into an `Environment` variant.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "PACKWATCH_ENV".to_string(),
            reason: format!("expected development, test or production, got '{other}'"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
