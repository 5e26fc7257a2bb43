use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

/// Load the application configuration, reading `.env` first.
///
/// # Errors
///
/// Returns `ConfigError` when a required variable is missing or a value
/// fails to parse.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load the configuration from whatever is already in the process
/// environment, without touching `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` when a required variable is missing or a value
/// fails to parse.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// The actual parsing and validation, with the env-var lookup injected so
/// tests can drive it from a plain `HashMap` instead of mutating the real
/// process environment.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var).map_err(|_| ConfigError::MissingEnvVar(var.to_string()))
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    fn parsed<T>(var: &str, raw: &str) -> Result<T, ConfigError>
    where
        T: std::str::FromStr,
        T::Err: std::fmt::Display,
    {
        raw.parse::<T>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    }

    let api_key = require("YOUTUBE_API_KEY")?;

    let env = parse_environment(&or_default("CLENS_ENV", "development"));

    let log_level = or_default("CLENS_LOG_LEVEL", "info");
    let roster_path = PathBuf::from(or_default("CLENS_ROSTER_PATH", "./config/channels.yaml"));

    let max_videos: usize = parsed("CLENS_MAX_VIDEOS", &or_default("CLENS_MAX_VIDEOS", "50"))?;
    if max_videos == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "CLENS_MAX_VIDEOS".to_string(),
            reason: "must be at least 1".to_string(),
        });
    }

    let request_timeout_secs: u64 = parsed(
        "CLENS_REQUEST_TIMEOUT_SECS",
        &or_default("CLENS_REQUEST_TIMEOUT_SECS", "30"),
    )?;
    let user_agent = or_default("CLENS_USER_AGENT", "creatorlens/0.1 (channel-evaluation)");
    let max_retries: u32 = parsed("CLENS_MAX_RETRIES", &or_default("CLENS_MAX_RETRIES", "3"))?;
    let retry_backoff_base_ms: u64 = parsed(
        "CLENS_RETRY_BACKOFF_BASE_MS",
        &or_default("CLENS_RETRY_BACKOFF_BASE_MS", "1000"),
    )?;
    let max_concurrent_channels: usize = parsed(
        "CLENS_MAX_CONCURRENT_CHANNELS",
        &or_default("CLENS_MAX_CONCURRENT_CHANNELS", "1"),
    )?;

    Ok(AppConfig {
        api_key,
        env,
        log_level,
        roster_path,
        max_videos,
        request_timeout_secs,
        user_agent,
        max_retries,
        retry_backoff_base_ms,
        max_concurrent_channels,
    })
}

/// Parse a string into an `Environment` variant.
///
/// Unrecognized values default to `Environment::Development`.
fn parse_environment(s: &str) -> Environment {
    match s {
        "production" => Environment::Production,
        "test" => Environment::Test,
        _ => Environment::Development,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::env::VarError;

    use super::*;

    fn lookup_from_map<'a>(
        map: &'a HashMap<&'a str, &'a str>,
    ) -> impl Fn(&str) -> Result<String, VarError> + 'a {
        move |key| {
            map.get(key)
                .map(|v| (*v).to_string())
                .ok_or(VarError::NotPresent)
        }
    }

    /// The minimal environment a successful load needs.
    fn full_env<'a>() -> HashMap<&'a str, &'a str> {
        let mut m = HashMap::new();
        m.insert("YOUTUBE_API_KEY", "test-api-key");
        m
    }

    #[test]
    fn parse_environment_development() {
        assert_eq!(parse_environment("development"), Environment::Development);
    }

    #[test]
    fn parse_environment_test() {
        assert_eq!(parse_environment("test"), Environment::Test);
    }

    #[test]
    fn parse_environment_production() {
        assert_eq!(parse_environment("production"), Environment::Production);
    }

    #[test]
    fn parse_environment_unknown_defaults_to_development() {
        assert_eq!(parse_environment("staging"), Environment::Development);
    }

    #[test]
    fn build_app_config_fails_without_api_key() {
        let map: HashMap<&str, &str> = HashMap::new();
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::MissingEnvVar(ref v)) if v == "YOUTUBE_API_KEY"),
            "expected MissingEnvVar(YOUTUBE_API_KEY), got: {result:?}"
        );
    }

    #[test]
    fn build_app_config_succeeds_with_all_required_vars() {
        let map = full_env();
        let result = build_app_config(lookup_from_map(&map));
        assert!(result.is_ok(), "expected Ok, got: {result:?}");
        let cfg = result.unwrap();
        assert_eq!(cfg.api_key, "test-api-key");
        assert_eq!(cfg.env, Environment::Development);
        assert_eq!(cfg.log_level, "info");
        assert_eq!(cfg.max_videos, 50);
        assert_eq!(cfg.request_timeout_secs, 30);
        assert_eq!(cfg.user_agent, "creatorlens/0.1 (channel-evaluation)");
        assert_eq!(cfg.max_retries, 3);
        assert_eq!(cfg.retry_backoff_base_ms, 1000);
        assert_eq!(cfg.max_concurrent_channels, 1);
    }

    #[test]
    fn build_app_config_max_videos_override() {
        let mut map = full_env();
        map.insert("CLENS_MAX_VIDEOS", "120");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert_eq!(cfg.max_videos, 120);
    }

    #[test]
    fn build_app_config_max_videos_zero_rejected() {
        let mut map = full_env();
        map.insert("CLENS_MAX_VIDEOS", "0");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "CLENS_MAX_VIDEOS"),
            "expected InvalidEnvVar(CLENS_MAX_VIDEOS), got: {result:?}"
        );
    }

    #[test]
    fn build_app_config_max_videos_invalid() {
        let mut map = full_env();
        map.insert("CLENS_MAX_VIDEOS", "not-a-number");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "CLENS_MAX_VIDEOS"),
            "expected InvalidEnvVar(CLENS_MAX_VIDEOS), got: {result:?}"
        );
    }

    #[test]
    fn build_app_config_retry_overrides() {
        let mut map = full_env();
        map.insert("CLENS_MAX_RETRIES", "5");
        map.insert("CLENS_RETRY_BACKOFF_BASE_MS", "250");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert_eq!(cfg.max_retries, 5);
        assert_eq!(cfg.retry_backoff_base_ms, 250);
    }

    #[test]
    fn build_app_config_concurrency_override() {
        let mut map = full_env();
        map.insert("CLENS_MAX_CONCURRENT_CHANNELS", "4");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert_eq!(cfg.max_concurrent_channels, 4);
    }

    #[test]
    fn build_app_config_roster_path_override() {
        let mut map = full_env();
        map.insert("CLENS_ROSTER_PATH", "/etc/creatorlens/roster.yaml");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert_eq!(
            cfg.roster_path.to_str().unwrap(),
            "/etc/creatorlens/roster.yaml"
        );
    }

    #[test]
    fn debug_redacts_api_key() {
        let map = full_env();
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        let rendered = format!("{cfg:?}");
        assert!(!rendered.contains("test-api-key"));
        assert!(rendered.contains("[redacted]"));
    }
}
