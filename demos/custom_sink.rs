use std::sync::Arc;

use zlog::{LogRecord, Sink, SinkError};

/// Example of integrating a completely custom destination by implementing
/// the `Sink` trait directly. Imagine this talks to some proprietary store
/// for which this crate does not provide a built-in sink.
struct MyCustomStoreSink;

impl Sink for MyCustomStoreSink {
    fn send(&self, record: &LogRecord) -> Result<(), SinkError> {
        // Here you would call your own client library for the target store.
        // For the sake of example we just print the record.
        println!("[my-custom-store] {}", record.to_json()?);
        Ok(())
    }
}

fn main() {
    zlog::init::init(Arc::new(MyCustomStoreSink), Default::default());

    zlog::info().message("custom sink example started");
    zlog::error()
        .key_value("store", "my-custom-store")
        .alert()
        .message("simulated error sent via custom sink");
}
