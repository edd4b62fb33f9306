//! Policy and sink wiring for loggers.
//!
//! A [`Facility`] pairs a swappable [`Policy`] snapshot with a swappable
//! [`Sink`]. The crate-level constructors ([`debug`], [`info`], [`warn`],
//! [`error`], [`at`]) use a process-wide facility that writes JSON lines to
//! stdout until configured otherwise; applications that want isolated
//! wiring (tests, embedded components) can own a `Facility` of their own.

use crate::level::Level;
use crate::logger::Logger;
use crate::policy::{Policy, PolicyCell};
use crate::sink::{Sink, SinkError};
use crate::writer::WriterSink;
use arc_swap::ArcSwap;
use once_cell::sync::Lazy;
use std::fmt;
use std::sync::Arc;

/// Holds the policy and sink loggers are created with.
///
/// Both are replaced wholesale; a logger reads each exactly once when it
/// is created and keeps what it read.
pub struct Facility {
    policy: PolicyCell,
    sink: ArcSwap<Arc<dyn Sink>>,
}

impl Facility {
    pub fn new(sink: Arc<dyn Sink>) -> Self {
        Facility {
            policy: PolicyCell::default(),
            sink: ArcSwap::from_pointee(sink),
        }
    }

    pub fn with_policy(self, policy: Policy) -> Self {
        self.policy.store(policy);
        self
    }

    pub fn set_policy(&self, policy: Policy) {
        self.policy.store(policy);
    }

    pub fn policy(&self) -> Arc<Policy> {
        self.policy.load()
    }

    pub fn set_sink(&self, sink: Arc<dyn Sink>) {
        self.sink.store(Arc::new(sink));
    }

    pub fn sink(&self) -> Arc<dyn Sink> {
        let current = self.sink.load();
        (**current).clone()
    }

    pub fn flush(&self) -> Result<(), SinkError> {
        self.sink().flush()
    }

    #[inline(never)]
    pub fn debug(&self) -> Logger {
        Logger::open(Level::Debug, &self.policy(), self.sink())
    }

    #[inline(never)]
    pub fn info(&self) -> Logger {
        Logger::open(Level::Info, &self.policy(), self.sink())
    }

    #[inline(never)]
    pub fn warn(&self) -> Logger {
        Logger::open(Level::Warn, &self.policy(), self.sink())
    }

    #[inline(never)]
    pub fn error(&self) -> Logger {
        Logger::open(Level::Error, &self.policy(), self.sink())
    }

    #[inline(never)]
    pub fn at(&self, level: Level) -> Logger {
        Logger::open(level, &self.policy(), self.sink())
    }
}

impl Default for Facility {
    fn default() -> Self {
        Facility::new(Arc::new(WriterSink::stdout()))
    }
}

impl fmt::Debug for Facility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Facility").field("policy", &self.policy()).finish_non_exhaustive()
    }
}

static GLOBAL: Lazy<Facility> = Lazy::new(Facility::default);

/// The process-wide facility behind the crate-level constructors.
pub fn global() -> &'static Facility {
    &GLOBAL
}

/// Replace the process-wide policy.
///
/// Loggers created afterwards see `policy`; loggers that already exist keep
/// the settings they were created with.
pub fn set_policy(policy: Policy) {
    GLOBAL.set_policy(policy);
    tracing::debug!("zlog policy replaced");
}

/// Current process-wide policy snapshot.
pub fn policy() -> Arc<Policy> {
    GLOBAL.policy()
}

/// Replace the process-wide sink.
pub fn set_sink(sink: Arc<dyn Sink>) {
    GLOBAL.set_sink(sink);
}

/// Flush the process-wide sink.
pub fn flush() -> Result<(), SinkError> {
    GLOBAL.flush()
}

/// Logger at debug level, for detailed troubleshooting output.
///
/// Call stacks default to 20 frames.
#[inline(never)]
pub fn debug() -> Logger {
    Logger::open(Level::Debug, &GLOBAL.policy(), GLOBAL.sink())
}

/// Logger at info level, for routine operational events.
///
/// Call stacks default to 5 frames.
#[inline(never)]
pub fn info() -> Logger {
    Logger::open(Level::Info, &GLOBAL.policy(), GLOBAL.sink())
}

/// Logger at warn level, for recoverable problems.
///
/// Call stacks default to 5 frames.
#[inline(never)]
pub fn warn() -> Logger {
    Logger::open(Level::Warn, &GLOBAL.policy(), GLOBAL.sink())
}

/// Logger at error level, for failures that need investigating.
///
/// Call stacks default to 10 frames.
#[inline(never)]
pub fn error() -> Logger {
    Logger::open(Level::Error, &GLOBAL.policy(), GLOBAL.sink())
}

/// Logger at a level chosen at runtime.
#[inline(never)]
pub fn at(level: Level) -> Logger {
    Logger::open(level, &GLOBAL.policy(), GLOBAL.sink())
}

/// Panic with `message`.
pub fn panic(message: &str) -> ! {
    std::panic::panic_any(message.to_string())
}

/// Panic with a formatted message.
pub fn panicf(args: fmt::Arguments<'_>) -> ! {
    std::panic::panic_any(fmt::format(args))
}
