//! Policy loading from JSON.
//!
//! The file is an object keyed by level name. Each value may set
//! `autoSource`, `autoCallStack` and `maxCallStackDepth`; anything left out
//! keeps its default, and levels that are not mentioned keep all defaults.
//!
//! ```json
//! {
//!   "error": { "autoSource": true, "autoCallStack": true, "maxCallStackDepth": 8 },
//!   "debug": { "autoSource": true }
//! }
//! ```

use crate::level::Level;
use crate::policy::{LevelOptions, Policy};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Error type for policy loading.
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("failed to read policy file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid policy JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("unknown level in policy: {0}")]
    UnknownLevel(String),

    #[error("level {0} configured more than once")]
    DuplicateLevel(Level),
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct LevelEntry {
    #[serde(default)]
    auto_source: bool,
    #[serde(default)]
    auto_call_stack: bool,
    #[serde(default)]
    max_call_stack_depth: i64,
}

impl From<LevelEntry> for LevelOptions {
    fn from(entry: LevelEntry) -> Self {
        LevelOptions {
            auto_source: entry.auto_source,
            auto_callstack: entry.auto_call_stack,
            max_depth: usize::try_from(entry.max_call_stack_depth)
                .ok()
                .filter(|d| *d > 0),
        }
    }
}

/// Parse a policy from JSON text.
pub fn parse_policy(json: &str) -> Result<Policy, ConfigError> {
    let entries: BTreeMap<String, LevelEntry> = serde_json::from_str(json)?;

    let mut builder = Policy::builder();
    let mut seen = Vec::with_capacity(entries.len());
    for (name, entry) in entries {
        let level: Level = name
            .parse()
            .map_err(|_| ConfigError::UnknownLevel(name.clone()))?;
        if seen.contains(&level) {
            return Err(ConfigError::DuplicateLevel(level));
        }
        seen.push(level);
        builder = builder.level(level, entry.into());
    }
    Ok(builder.build())
}

/// Load and parse a policy file.
pub fn load_policy(path: impl AsRef<Path>) -> Result<Policy, ConfigError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_policy(&content)
}
