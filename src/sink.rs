use crate::record::LogRecord;

/// Error raised by a [`Sink`] while writing or flushing.
#[derive(thiserror::Error, Debug)]
pub enum SinkError {
    #[error("failed to write log record: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to serialize log record: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

/// Destination for finished [`LogRecord`]s.
///
/// Implementations own serialization and routing of the bytes (console,
/// file, fan-out, another logging framework). Loggers call `send` inline on
/// the logging thread, once per record, so implementations must be cheap to
/// share across threads.
pub trait Sink: Send + Sync {
    /// Write a single record.
    ///
    /// **Returns**
    /// - `Ok(())` once the record was handed to the destination.
    /// - `Err(..)` when the destination refused it. Loggers report the
    ///   failure through `tracing` and carry on; it never reaches the
    ///   code that logged.
    fn send(&self, record: &LogRecord) -> Result<(), SinkError>;

    /// Flush anything buffered.
    ///
    /// Default implementation is a no-op.
    fn flush(&self) -> Result<(), SinkError> {
        Ok(())
    }
}

impl<S: Sink + ?Sized> Sink for std::sync::Arc<S> {
    fn send(&self, record: &LogRecord) -> Result<(), SinkError> {
        (**self).send(record)
    }

    fn flush(&self) -> Result<(), SinkError> {
        (**self).flush()
    }
}
