pub mod app_config;
pub mod config;
pub mod offers;
pub mod shops;

pub use app_config::{AppConfig, Environment, PushoverCredentials};
pub use config::{load_app_config, load_app_config_from_env};
pub use offers::{ChosenOffer, RawOffer};
pub use shops::{load_shops, parse_shops, CategoryPage, Platform, ShopConfig, ShopsFile};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read shops file {path}: {source}")]
    ShopsFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse shops file: {0}")]
    ShopsFileParse(#[from] serde_yaml::Error),

    #[error("shops config validation failed: {0}")]
    Validation(String),
}
