use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub api_key: String,
    pub env: Environment,
    pub log_level: String,
    pub roster_path: PathBuf,
    /// How many recent uploads to fetch and analyze per channel.
    pub max_videos: usize,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    pub max_retries: u32,
    pub retry_backoff_base_ms: u64,
    /// Upper bound on channels evaluated concurrently in a batch run.
    pub max_concurrent_channels: usize,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("api_key", &"[redacted]")
            .field("env", &self.env)
            .field("log_level", &self.log_level)
            .field("roster_path", &self.roster_path)
            .field("max_videos", &self.max_videos)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("user_agent", &self.user_agent)
            .field("max_retries", &self.max_retries)
            .field("retry_backoff_base_ms", &self.retry_backoff_base_ms)
            .field("max_concurrent_channels", &self.max_concurrent_channels)
            .finish()
    }
}
