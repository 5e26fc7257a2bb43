use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// One channel queued for evaluation in the roster file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChannelEntry {
    /// Whatever identifies the channel: a raw `UC…` ID, an `@handle`, a full
    /// channel URL, or a free-text name to search for.
    pub input: String,
    /// Optional label used in run output; falls back to the resolved title.
    pub label: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RosterFile {
    pub channels: Vec<ChannelEntry>,
}

/// Load and validate the channel roster from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_roster(path: &Path) -> Result<RosterFile, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::RosterIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let roster: RosterFile = serde_yaml::from_str(&content)?;

    validate_roster(&roster)?;

    Ok(roster)
}

fn validate_roster(roster: &RosterFile) -> Result<(), ConfigError> {
    if roster.channels.is_empty() {
        return Err(ConfigError::Validation(
            "roster has no channels".to_string(),
        ));
    }

    let mut seen = HashSet::new();
    for entry in &roster.channels {
        if entry.input.trim().is_empty() {
            return Err(ConfigError::Validation(
                "channel input must be non-empty".to_string(),
            ));
        }

        let key = entry.input.trim().to_lowercase();
        if !seen.insert(key) {
            return Err(ConfigError::Validation(format!(
                "duplicate channel input: '{}'",
                entry.input
            )));
        }
    }

    Ok(())
}
