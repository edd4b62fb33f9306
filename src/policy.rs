//! Per-level capture policy.
//!
//! A [`Policy`] says, for each [`Level`], whether loggers attach the caller's
//! source location and call stack automatically, and how deep call stacks
//! may go. The process-wide policy is an immutable snapshot behind an
//! [`ArcSwap`]: storing swaps in a complete new snapshot, and every logger
//! construction reads exactly one snapshot.

use crate::level::Level;
use arc_swap::ArcSwap;
use std::sync::Arc;

/// Depth used for level names outside the known set.
pub const DEFAULT_FALLBACK_DEPTH: usize = 5;

/// Built-in maximum call-stack depth for `level`.
pub const fn default_max_depth(level: Level) -> usize {
    match level {
        Level::Debug => 20,
        Level::Info => 5,
        Level::Warn => 5,
        Level::Error => 10,
    }
}

/// Built-in maximum depth for a level given by name, falling back to
/// [`DEFAULT_FALLBACK_DEPTH`] for names that are not levels.
pub fn default_max_depth_for_name(name: &str) -> usize {
    name.parse::<Level>()
        .map(default_max_depth)
        .unwrap_or(DEFAULT_FALLBACK_DEPTH)
}

/// Settings for a single level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LevelOptions {
    pub auto_source: bool,
    pub auto_callstack: bool,
    /// `None` means the built-in default for the level.
    pub max_depth: Option<usize>,
}

/// Immutable per-level policy snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Policy {
    levels: [LevelOptions; 4],
}

impl Policy {
    pub fn builder() -> PolicyBuilder {
        PolicyBuilder::default()
    }

    pub fn options(&self, level: Level) -> LevelOptions {
        self.levels[level.index()]
    }

    pub fn auto_source(&self, level: Level) -> bool {
        self.levels[level.index()].auto_source
    }

    pub fn auto_callstack(&self, level: Level) -> bool {
        self.levels[level.index()].auto_callstack
    }

    /// Configured depth for `level` if positive, otherwise the built-in
    /// default.
    pub fn effective_max_depth(&self, level: Level) -> usize {
        match self.levels[level.index()].max_depth {
            Some(depth) if depth > 0 => depth,
            _ => default_max_depth(level),
        }
    }
}

/// Builds a [`Policy`] starting from all defaults.
///
/// Nothing carries over from the policy currently installed; a built policy
/// replaces it completely.
#[derive(Debug, Clone, Default)]
pub struct PolicyBuilder {
    levels: [LevelOptions; 4],
}

impl PolicyBuilder {
    pub fn auto_source(mut self, level: Level, enabled: bool) -> Self {
        self.levels[level.index()].auto_source = enabled;
        self
    }

    pub fn auto_callstack(mut self, level: Level, enabled: bool) -> Self {
        self.levels[level.index()].auto_callstack = enabled;
        self
    }

    /// Maximum call-stack depth for `level`. Zero keeps the default.
    pub fn max_depth(mut self, level: Level, depth: usize) -> Self {
        self.levels[level.index()].max_depth = (depth > 0).then_some(depth);
        self
    }

    pub fn level(mut self, level: Level, options: LevelOptions) -> Self {
        self.levels[level.index()] = LevelOptions {
            max_depth: options.max_depth.filter(|d| *d > 0),
            ..options
        };
        self
    }

    pub fn build(self) -> Policy {
        Policy { levels: self.levels }
    }
}

/// Swappable holder for a policy snapshot.
#[derive(Debug)]
pub struct PolicyCell {
    inner: ArcSwap<Policy>,
}

impl PolicyCell {
    pub fn new(policy: Policy) -> Self {
        PolicyCell { inner: ArcSwap::from_pointee(policy) }
    }

    pub fn load(&self) -> Arc<Policy> {
        self.inner.load_full()
    }

    pub fn store(&self, policy: Policy) {
        self.inner.store(Arc::new(policy));
    }
}

impl Default for PolicyCell {
    fn default() -> Self {
        PolicyCell::new(Policy::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::thread;

    #[test]
    fn defaults_per_level() {
        let policy = Policy::default();
        assert_eq!(policy.effective_max_depth(Level::Debug), 20);
        assert_eq!(policy.effective_max_depth(Level::Info), 5);
        assert_eq!(policy.effective_max_depth(Level::Warn), 5);
        assert_eq!(policy.effective_max_depth(Level::Error), 10);
        for level in Level::ALL {
            assert!(!policy.auto_source(level));
            assert!(!policy.auto_callstack(level));
        }
    }

    #[test]
    fn configured_depth_overrides_default() {
        let policy = Policy::builder()
            .max_depth(Level::Error, 3)
            .max_depth(Level::Info, 0)
            .build();
        assert_eq!(policy.effective_max_depth(Level::Error), 3);
        assert_eq!(policy.effective_max_depth(Level::Info), 5);
        assert_eq!(policy.effective_max_depth(Level::Debug), 20);
    }

    #[test]
    fn level_options_drop_zero_depth() {
        let policy = Policy::builder()
            .level(
                Level::Warn,
                LevelOptions { auto_source: true, auto_callstack: false, max_depth: Some(0) },
            )
            .build();
        assert!(policy.auto_source(Level::Warn));
        assert_eq!(policy.options(Level::Warn).max_depth, None);
        assert_eq!(policy.effective_max_depth(Level::Warn), 5);
    }

    #[test]
    fn unknown_level_name_uses_fallback() {
        assert_eq!(default_max_depth_for_name("debug"), 20);
        assert_eq!(default_max_depth_for_name("ERROR"), 10);
        assert_eq!(default_max_depth_for_name("trace"), DEFAULT_FALLBACK_DEPTH);
    }

    #[test]
    fn builder_starts_from_defaults() {
        let first = Policy::builder().auto_source(Level::Error, true).build();
        let second = Policy::builder().auto_callstack(Level::Debug, true).build();
        assert!(first.auto_source(Level::Error));
        assert!(!second.auto_source(Level::Error));
    }

    #[test]
    fn replacement_is_never_observed_half_applied() {
        let old = Policy::default();
        let new = Policy::builder()
            .auto_source(Level::Debug, true)
            .auto_callstack(Level::Info, true)
            .max_depth(Level::Warn, 7)
            .max_depth(Level::Error, 2)
            .build();
        let cell = Arc::new(PolicyCell::new(old.clone()));
        let done = Arc::new(AtomicBool::new(false));

        let readers: Vec<_> = (0..4)
            .map(|_| {
                let cell = Arc::clone(&cell);
                let done = Arc::clone(&done);
                let (old, new) = (old.clone(), new.clone());
                thread::spawn(move || {
                    while !done.load(Ordering::Relaxed) {
                        let seen = cell.load();
                        assert!(*seen == old || *seen == new, "mixed snapshot: {:?}", seen);
                    }
                })
            })
            .collect();

        for i in 0..2_000 {
            cell.store(if i % 2 == 0 { new.clone() } else { old.clone() });
        }
        done.store(true, Ordering::Relaxed);
        for reader in readers {
            reader.join().expect("reader thread");
        }
    }
}
