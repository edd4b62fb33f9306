//! Environment variable names used by this crate for configuration from
//! deployment manifests.
//!
//! These are purely helpers; loggers and sinks never read the environment
//! on their own. See [`Settings::from_env`](crate::init::Settings::from_env).

/// Path to a JSON policy file, see [`config`](crate::config).
pub const ZLOG_CONFIG_ENV: &str = "ZLOG_CONFIG";

/// Output destination, see [`parse_output`](crate::output::parse_output).
/// Defaults to `stdout`.
pub const ZLOG_OUTPUT_ENV: &str = "ZLOG_OUTPUT";

/// Read an environment variable or fall back to a provided default.
pub fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Read an environment variable, treating unset and blank the same.
pub fn env_opt(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}
