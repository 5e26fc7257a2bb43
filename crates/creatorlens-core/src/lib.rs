//! Shared domain types and configuration for creatorlens.
//!
//! Holds the normalized channel/video value types produced by the YouTube
//! collaborator and consumed by the analysis pipeline, plus the env-based
//! application config and the YAML channel roster.

use serde::{Deserialize, Serialize};
use thiserror::Error;

mod app_config;
mod config;
pub mod roster;
mod videos;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use roster::{load_roster, ChannelEntry, RosterFile};
pub use videos::{ChannelProfile, ChannelStats, VideoRecord};

/// API quota consumed while gathering the inputs for one evaluation.
///
/// The evaluation pipeline itself spends no quota; the data-source
/// collaborator fills this in and the final report echoes it unchanged.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuotaSnapshot {
    /// Quota units charged (search is far more expensive than list calls).
    pub units_used: u64,
    /// Number of HTTP requests issued.
    pub requests: u64,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required env var: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for env var {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read roster file {path}: {source}")]
    RosterIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse roster file: {0}")]
    RosterParse(#[from] serde_yaml::Error),

    #[error("roster validation failed: {0}")]
    Validation(String),
}
