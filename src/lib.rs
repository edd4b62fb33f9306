//! Fluent structured logging that writes one JSON object per record.
//!
//! ```no_run
//! use zlog::{Level, Policy};
//!
//! zlog::set_policy(
//!     Policy::builder()
//!         .auto_source(Level::Error, true)
//!         .auto_callstack(Level::Error, true)
//!         .max_depth(Level::Error, 8)
//!         .build(),
//! );
//!
//! zlog::info().segment("user", &["profile", "update"]).message("profile updated");
//! zlog::error().err("connection timeout").alert().message("payment failed");
//! ```

pub mod callstack;
pub mod config;
pub mod context;
pub mod env;
pub mod facility;
pub mod frame;
pub mod init;
pub mod level;
pub mod logger;
pub mod memory_sink;
pub mod noop_sink;
pub mod output;
pub mod policy;
pub mod record;
pub mod sink;
pub mod tracing_sink;
pub mod writer;

pub use context::{lookup_fn, Lookup};
pub use facility::{
    at, debug, error, flush, info, panic, panicf, policy, set_policy, set_sink, warn, Facility,
};
pub use level::Level;
pub use logger::Logger;
pub use policy::{LevelOptions, Policy};
pub use record::{Attribute, LogRecord, Value};
pub use sink::{Sink, SinkError};
