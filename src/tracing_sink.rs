use crate::level::Level;
use crate::record::LogRecord;
use crate::sink::{Sink, SinkError};
use serde::ser::{SerializeMap, Serializer};

/// Target used for events emitted by [`TracingSink`].
pub const TRACING_TARGET: &str = "zlog";

/// Forwards records into the `tracing` ecosystem.
///
/// Each record becomes one event at the matching `tracing` level with the
/// record message as the event message and the attributes rendered as a JSON
/// object in the `attributes` field. Whatever subscriber the application has
/// installed decides formatting and routing.
#[derive(Clone, Debug, Default)]
pub struct TracingSink;

fn attributes_json(record: &LogRecord) -> Result<String, serde_json::Error> {
    let mut buf = Vec::new();
    let mut ser = serde_json::Serializer::new(&mut buf);
    let mut map = ser.serialize_map(Some(record.attributes.len()))?;
    for attr in &record.attributes {
        map.serialize_entry(&attr.key, &attr.value)?;
    }
    map.end()?;
    // serde_json only ever writes valid UTF-8.
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

impl Sink for TracingSink {
    fn send(&self, record: &LogRecord) -> Result<(), SinkError> {
        let attributes = attributes_json(record)?;
        let message = record.message.as_str();
        match record.level {
            Level::Debug => {
                tracing::debug!(target: TRACING_TARGET, attributes = %attributes, "{}", message)
            }
            Level::Info => {
                tracing::info!(target: TRACING_TARGET, attributes = %attributes, "{}", message)
            }
            Level::Warn => {
                tracing::warn!(target: TRACING_TARGET, attributes = %attributes, "{}", message)
            }
            Level::Error => {
                tracing::error!(target: TRACING_TARGET, attributes = %attributes, "{}", message)
            }
        }
        Ok(())
    }
}
