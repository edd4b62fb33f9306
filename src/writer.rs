use crate::record::LogRecord;
use crate::sink::{Sink, SinkError};
use std::fmt;
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;
use std::sync::{Arc, Mutex};

/// Writes each record as one JSON line to an [`io::Write`] destination.
///
/// Writes are serialized through a mutex, so lines from concurrent loggers
/// never interleave.
pub struct WriterSink {
    name: String,
    out: Mutex<Box<dyn Write + Send>>,
}

impl WriterSink {
    pub fn new(name: impl Into<String>, out: impl Write + Send + 'static) -> Self {
        WriterSink {
            name: name.into(),
            out: Mutex::new(Box::new(out)),
        }
    }

    pub fn stdout() -> Self {
        Self::new("stdout", io::stdout())
    }

    pub fn stderr() -> Self {
        Self::new("stderr", io::stderr())
    }

    /// Append to `path`, creating the file if needed.
    pub fn file(path: impl AsRef<Path>) -> io::Result<Self> {
        let path = path.as_ref();
        let file: File = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self::new(path.display().to_string(), file))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    fn with_out<T>(&self, f: impl FnOnce(&mut dyn Write) -> io::Result<T>) -> io::Result<T> {
        let mut guard = self.out.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        f(&mut **guard)
    }
}

impl fmt::Debug for WriterSink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WriterSink").field("name", &self.name).finish()
    }
}

impl Sink for WriterSink {
    fn send(&self, record: &LogRecord) -> Result<(), SinkError> {
        let mut line = serde_json::to_vec(record)?;
        line.push(b'\n');
        self.with_out(|out| out.write_all(&line))?;
        Ok(())
    }

    fn flush(&self) -> Result<(), SinkError> {
        self.with_out(|out| out.flush())?;
        Ok(())
    }
}

/// Sends every record to several sinks in turn.
///
/// A failing destination does not stop delivery to the others; the first
/// error is returned after all have been tried.
#[derive(Clone, Default)]
pub struct FanoutSink {
    sinks: Vec<Arc<dyn Sink>>,
}

impl FanoutSink {
    pub fn new(sinks: Vec<Arc<dyn Sink>>) -> Self {
        FanoutSink { sinks }
    }

    pub fn push(&mut self, sink: Arc<dyn Sink>) {
        self.sinks.push(sink);
    }

    pub fn len(&self) -> usize {
        self.sinks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sinks.is_empty()
    }

    fn each(&self, f: impl Fn(&dyn Sink) -> Result<(), SinkError>) -> Result<(), SinkError> {
        let mut first_err = None;
        for sink in &self.sinks {
            if let Err(e) = f(sink.as_ref()) {
                first_err.get_or_insert(e);
            }
        }
        first_err.map_or(Ok(()), Err)
    }
}

impl fmt::Debug for FanoutSink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FanoutSink").field("sinks", &self.sinks.len()).finish()
    }
}

impl Sink for FanoutSink {
    fn send(&self, record: &LogRecord) -> Result<(), SinkError> {
        self.each(|sink| sink.send(record))
    }

    fn flush(&self) -> Result<(), SinkError> {
        self.each(|sink| sink.flush())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::level::Level;
    use crate::memory_sink::MemorySink;
    use crate::record::Attribute;

    #[derive(Clone, Default)]
    struct SharedBuf(Arc<Mutex<Vec<u8>>>);

    impl Write for SharedBuf {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    struct Failing;

    impl Sink for Failing {
        fn send(&self, _record: &LogRecord) -> Result<(), SinkError> {
            Err(SinkError::Other("destination down".to_string()))
        }
    }

    #[test]
    fn writes_one_json_line_per_record() {
        let buf = SharedBuf::default();
        let sink = WriterSink::new("buffer", buf.clone());
        sink.send(&LogRecord::new(Level::Warn, "first", vec![])).unwrap();
        sink.send(&LogRecord::new(Level::Error, "second", vec![Attribute::new("alert", true)]))
            .unwrap();

        let text = String::from_utf8(buf.0.lock().unwrap().clone()).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        let second: serde_json::Value = serde_json::from_str(lines[1]).unwrap();
        assert_eq!(second["level"], "ERROR");
        assert_eq!(second["msg"], "second");
        assert_eq!(second["alert"], true);
    }

    #[test]
    fn file_sink_appends() {
        let path = std::env::temp_dir().join(format!("zlog-writer-{}.log", std::process::id()));
        let _ = std::fs::remove_file(&path);
        {
            let sink = WriterSink::file(&path).unwrap();
            sink.send(&LogRecord::new(Level::Info, "one", vec![])).unwrap();
        }
        {
            let sink = WriterSink::file(&path).unwrap();
            sink.send(&LogRecord::new(Level::Info, "two", vec![])).unwrap();
            sink.flush().unwrap();
        }
        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text.lines().count(), 2);
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn fanout_delivers_past_failures() {
        let memory = MemorySink::new();
        let fanout = FanoutSink::new(vec![Arc::new(Failing), Arc::new(memory.clone())]);
        let result = fanout.send(&LogRecord::new(Level::Info, "hello", vec![]));
        assert!(matches!(result, Err(SinkError::Other(_))));
        assert_eq!(memory.len(), 1);
    }
}
