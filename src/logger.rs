use crate::callstack::{self, ENTRY_POINT_MARKER};
use crate::context::{self, Lookup};
use crate::frame;
use crate::level::Level;
use crate::policy::Policy;
use crate::record::{keys, Attribute, LogRecord, Value};
use crate::sink::Sink;
use std::fmt;
use std::io::Write;
use std::sync::Arc;

/// Distance from [`Logger::open`] to the code that called a public
/// constructor: `open` itself, then the constructor, then the caller.
const CONSTRUCTOR_CALLER: usize = 2;

/// Fluent builder for one log record.
///
/// Obtain one from [`debug`](crate::debug), [`info`](crate::info),
/// [`warn`](crate::warn), [`error`](crate::error) or a
/// [`Facility`](crate::Facility), chain enrichment calls, and finish with a
/// terminal call such as [`message`](Logger::message). Terminal calls
/// consume the builder, so a record is emitted at most once.
///
/// ```no_run
/// zlog::error()
///     .segment("order", &["process"])
///     .err("connection refused")
///     .alert()
///     .message("failed to place order");
/// ```
#[must_use = "a logger emits nothing until a terminal call such as `message`"]
pub struct Logger {
    level: Level,
    max_depth: usize,
    attributes: Vec<Attribute>,
    sink: Arc<dyn Sink>,
}

impl Logger {
    /// Create a logger from one policy snapshot.
    ///
    /// Must be called directly from a public constructor: automatic source
    /// and call-stack capture count [`CONSTRUCTOR_CALLER`] frames from here.
    #[inline(never)]
    pub(crate) fn open(level: Level, policy: &Policy, sink: Arc<dyn Sink>) -> Logger {
        let mut logger = Logger {
            level,
            max_depth: policy.effective_max_depth(level),
            attributes: Vec::new(),
            sink,
        };

        if policy.auto_source(level) {
            if let Some(source) = frame::resolve(CONSTRUCTOR_CALLER) {
                logger.push(keys::SOURCE, source.to_string());
            }
        }
        if policy.auto_callstack(level) {
            let stack =
                callstack::collect(CONSTRUCTOR_CALLER, logger.max_depth, ENTRY_POINT_MARKER);
            logger.push(keys::CALLSTACK, stack);
        }

        logger
    }

    pub fn level(&self) -> Level {
        self.level
    }

    /// Call-stack depth limit fixed when the logger was created.
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    fn push(&mut self, key: &str, value: impl Into<Value>) {
        self.attributes.push(Attribute::new(key, value));
    }

    fn with(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.push(key, value);
        self
    }

    /// Copy the values of `names` found in `source` into an `app_ctx` map.
    ///
    /// Keys `source` cannot resolve are left out; when none resolve nothing
    /// is attached.
    pub fn context<L, I, K>(self, source: &L, names: I) -> Self
    where
        L: Lookup + ?Sized,
        I: IntoIterator<Item = K>,
        K: AsRef<str>,
    {
        match context::extract(source, names) {
            Some(found) => self.with(keys::CONTEXT, found),
            None => self,
        }
    }

    /// Attach a `/`-joined hierarchical path. Empty detail segments are
    /// skipped.
    pub fn segment(self, main: &str, details: &[&str]) -> Self {
        let path = join_segment(main, details);
        self.with(keys::SEGMENT, path)
    }

    /// Attach the text of `err` as `error_msg`.
    pub fn err(self, err: impl fmt::Display) -> Self {
        self.with(keys::ERROR, err.to_string())
    }

    pub fn with_error(self, err: impl fmt::Display) -> Self {
        self.err(err)
    }

    /// Like [`err`](Logger::err), attaching nothing for `None`.
    pub fn err_opt<E: fmt::Display>(self, err: Option<E>) -> Self {
        match err {
            Some(err) => self.err(err),
            None => self,
        }
    }

    pub fn key_value(self, key: &str, value: impl Into<String>) -> Self {
        self.with(key, value.into())
    }

    pub fn kv(self, key: &str, value: impl Into<String>) -> Self {
        self.key_value(key, value)
    }

    /// Attach an arbitrary typed value.
    pub fn attr(self, key: &str, value: impl Into<Value>) -> Self {
        self.with(key, value)
    }

    /// Mark the record as needing immediate attention.
    pub fn alert(self) -> Self {
        self.with(keys::ALERT, true)
    }

    /// Attach the location this method was called from.
    #[inline(never)]
    pub fn with_source(self) -> Self {
        match frame::resolve(1) {
            Some(source) => self.with(keys::SOURCE, source.to_string()),
            None => self,
        }
    }

    /// Attach a location `skip` frames above the caller, for logging helpers
    /// that want to report their own caller.
    #[inline(never)]
    pub fn with_source_skip(self, skip: usize) -> Self {
        match frame::resolve(skip.saturating_add(1)) {
            Some(source) => self.with(keys::SOURCE, source.to_string()),
            None => self,
        }
    }

    /// Attach up to [`max_depth`](Logger::max_depth) frames starting at the
    /// caller, ending early at the binary's `main`.
    #[inline(never)]
    pub fn with_call_stack(self) -> Self {
        let stack = callstack::collect(1, self.max_depth, ENTRY_POINT_MARKER);
        self.with(keys::CALLSTACK, stack)
    }

    /// Emit the record.
    pub fn message(self, message: impl Into<String>) {
        let record = LogRecord::new(self.level, message, self.attributes);
        if let Err(e) = self.sink.send(&record) {
            tracing::warn!(error = %e, level = %record.level, "zlog sink rejected record");
        }
    }

    pub fn msg(self, message: impl Into<String>) {
        self.message(message)
    }

    /// Emit the record with a formatted message.
    ///
    /// ```no_run
    /// zlog::info().messagef(format_args!("processed {} items", 100));
    /// ```
    pub fn messagef(self, args: fmt::Arguments<'_>) {
        self.message(fmt::format(args))
    }

    pub fn msgf(self, args: fmt::Arguments<'_>) {
        self.messagef(args)
    }

    /// Emit the record, flush, and exit the process with status 1.
    ///
    /// Flush failures are ignored.
    pub fn fatal(self, message: impl Into<String>) -> ! {
        let sink = Arc::clone(&self.sink);
        self.message(message);
        let _ = sink.flush();
        let _ = std::io::stdout().flush();
        let _ = std::io::stderr().flush();
        std::process::exit(1)
    }

    pub fn fatalf(self, args: fmt::Arguments<'_>) -> ! {
        self.fatal(fmt::format(args))
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("level", &self.level)
            .field("max_depth", &self.max_depth)
            .field("attributes", &self.attributes)
            .finish_non_exhaustive()
    }
}

/// Join `main` and the non-empty `details` with `/`.
pub fn join_segment(main: &str, details: &[&str]) -> String {
    let mut path = main.to_string();
    for detail in details.iter().filter(|d| !d.is_empty()) {
        path.push('/');
        path.push_str(detail);
    }
    path
}
