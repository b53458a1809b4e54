pub mod agency;
pub mod app_config;
pub mod config;
pub mod grouping;
pub mod sorting;

pub use agency::{AgencyRecord, RecordKey};
pub use app_config::AppConfig;
pub use config::{load_app_config, load_app_config_from_env};
pub use grouping::{group_by_niche, GroupedView};
pub use sorting::{compare_by, parse_price, sort_records, SortMode};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("unknown sort mode: {0}")]
    UnknownSortMode(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
