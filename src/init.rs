use crate::config::{load_policy, ConfigError};
use crate::env::{env_opt, env_or, ZLOG_CONFIG_ENV, ZLOG_OUTPUT_ENV};
use crate::facility;
use crate::output::{make_sink, parse_output, OutputError, OutputSpec};
use crate::policy::Policy;
use crate::sink::Sink;
use std::sync::Arc;

/// Process-wide logging setup.
///
/// **Fields**
/// - `output`: where records are written.
/// - `policy`: per-level source/call-stack capture settings.
#[derive(Clone, Debug, Default)]
pub struct Settings {
    pub output: OutputSpec,
    pub policy: Policy,
}

/// Error returned while building or applying [`Settings`].
#[derive(thiserror::Error, Debug)]
pub enum InitError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Output(#[from] OutputError),
}

impl Settings {
    /// Read settings from `ZLOG_OUTPUT` and `ZLOG_CONFIG`.
    ///
    /// An unset `ZLOG_OUTPUT` means stdout; an unset `ZLOG_CONFIG` means the
    /// default policy.
    pub fn from_env() -> Result<Self, InitError> {
        let output = parse_output(&env_or(ZLOG_OUTPUT_ENV, "stdout"))?;
        let policy = match env_opt(ZLOG_CONFIG_ENV) {
            Some(path) => load_policy(path)?,
            None => Policy::default(),
        };
        Ok(Settings { output, policy })
    }
}

/// Install `settings` as the process-wide output and policy.
///
/// **Effects**
///
/// Loggers created after this call write to the configured destination
/// with the configured policy. Loggers that already exist are unaffected.
pub fn init_with_settings(settings: Settings) -> Result<(), InitError> {
    let sink = make_sink(&settings.output)?;
    init(sink, settings.policy);
    tracing::debug!(output = %settings.output.raw, "zlog initialized");
    Ok(())
}

/// Install an explicit sink and policy.
pub fn init(sink: Arc<dyn Sink>, policy: Policy) {
    facility::set_sink(sink);
    facility::set_policy(policy);
}

/// Initialize from the environment.
///
/// Equivalent to [`init_with_settings`] with [`Settings::from_env`]. This is
/// the recommended entrypoint for services configured by deployment.
pub fn init_from_env() -> Result<(), InitError> {
    init_with_settings(Settings::from_env()?)
}
