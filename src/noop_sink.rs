use crate::record::LogRecord;
use crate::sink::{Sink, SinkError};

/// A sink that simply drops all records.
///
/// Useful for measuring the cost of building records and capturing stacks
/// without any I/O.
#[derive(Clone, Debug, Default)]
pub struct NoopSink;

impl Sink for NoopSink {
    fn send(&self, _record: &LogRecord) -> Result<(), SinkError> {
        Ok(())
    }
}
