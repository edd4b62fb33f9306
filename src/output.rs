use std::path::PathBuf;
use std::sync::Arc;

use crate::sink::Sink;
use crate::tracing_sink::TracingSink;
use crate::writer::{FanoutSink, WriterSink};

/// Supported destination kinds that can be selected by name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputKind {
    Stdout,
    Stderr,
    File(PathBuf),
    Tracing,
}

/// Destinations parsed from an output spec string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputSpec {
    /// Selected destinations, in the order they were given.
    pub targets: Vec<OutputKind>,
    /// Raw spec that was used to construct this value.
    pub raw: String,
}

impl Default for OutputSpec {
    fn default() -> Self {
        OutputSpec { targets: vec![OutputKind::Stdout], raw: "stdout".to_string() }
    }
}

/// Error type returned when parsing an output spec.
#[derive(thiserror::Error, Debug)]
pub enum OutputError {
    #[error("empty output spec")]
    Empty,

    #[error("unknown or unsupported output scheme: {0}")]
    UnknownScheme(String),

    #[error("failed to open log file {path}: {source}")]
    File {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

fn parse_target(item: &str) -> Result<OutputKind, OutputError> {
    let lower = item.to_ascii_lowercase();
    match lower.as_str() {
        "stdout" | "console" | "-" => return Ok(OutputKind::Stdout),
        "stderr" => return Ok(OutputKind::Stderr),
        "tracing" => return Ok(OutputKind::Tracing),
        _ => {}
    }

    if lower.starts_with("file://") {
        let path = &item["file://".len()..];
        if path.is_empty() {
            return Err(OutputError::Empty);
        }
        Ok(OutputKind::File(PathBuf::from(path)))
    } else if let Some((scheme, _)) = item.split_once("://") {
        Err(OutputError::UnknownScheme(scheme.to_string()))
    } else {
        Ok(OutputKind::File(PathBuf::from(item)))
    }
}

/// Parse an output spec.
///
/// Examples:
/// - "stdout" (also "console" or "-")
/// - "stderr"
/// - "tracing" (forward into the application's `tracing` subscriber)
/// - "file:///var/log/app.jsonl" or a bare path such as "logs/app.jsonl"
/// - "stdout,file:///var/log/app.jsonl" (fan-out to both)
pub fn parse_output(spec: &str) -> Result<OutputSpec, OutputError> {
    let targets = spec
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(parse_target)
        .collect::<Result<Vec<_>, _>>()?;

    if targets.is_empty() {
        return Err(OutputError::Empty);
    }
    Ok(OutputSpec { targets, raw: spec.to_string() })
}

fn make_target(kind: &OutputKind) -> Result<Arc<dyn Sink>, OutputError> {
    let sink: Arc<dyn Sink> = match kind {
        OutputKind::Stdout => Arc::new(WriterSink::stdout()),
        OutputKind::Stderr => Arc::new(WriterSink::stderr()),
        OutputKind::Tracing => Arc::new(TracingSink),
        OutputKind::File(path) => {
            let file = WriterSink::file(path).map_err(|source| OutputError::File {
                path: path.clone(),
                source,
            })?;
            Arc::new(file)
        }
    };
    Ok(sink)
}

/// Create a concrete [`Sink`] from an [`OutputSpec`].
///
/// A single destination is returned as-is; several are wrapped in a
/// [`FanoutSink`].
pub fn make_sink(spec: &OutputSpec) -> Result<Arc<dyn Sink>, OutputError> {
    let mut sinks = spec
        .targets
        .iter()
        .map(make_target)
        .collect::<Result<Vec<_>, _>>()?;

    if sinks.len() == 1 {
        if let Some(only) = sinks.pop() {
            return Ok(only);
        }
    }
    Ok(Arc::new(FanoutSink::new(sinks)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_named_destinations() {
        let spec = parse_output("stdout, STDERR ,tracing").unwrap();
        assert_eq!(spec.targets, vec![OutputKind::Stdout, OutputKind::Stderr, OutputKind::Tracing]);
    }

    #[test]
    fn parses_file_destinations() {
        let spec = parse_output("file:///var/log/app.jsonl,logs/app.jsonl").unwrap();
        assert_eq!(
            spec.targets,
            vec![
                OutputKind::File(PathBuf::from("/var/log/app.jsonl")),
                OutputKind::File(PathBuf::from("logs/app.jsonl")),
            ]
        );
    }

    #[test]
    fn rejects_empty_and_unknown() {
        assert!(matches!(parse_output(""), Err(OutputError::Empty)));
        assert!(matches!(parse_output(" , "), Err(OutputError::Empty)));
        assert!(matches!(parse_output("file://"), Err(OutputError::Empty)));
        assert!(matches!(
            parse_output("kafka://broker/topic"),
            Err(OutputError::UnknownScheme(s)) if s == "kafka"
        ));
    }

    #[test]
    fn builds_file_sink_and_reports_open_failures() {
        let path = std::env::temp_dir().join(format!("zlog-output-{}.jsonl", std::process::id()));
        let spec = parse_output(&format!("file://{}", path.display())).unwrap();
        assert!(make_sink(&spec).is_ok());
        let _ = std::fs::remove_file(&path);

        let bad = parse_output("/nonexistent-dir/zlog/app.jsonl").unwrap();
        assert!(matches!(make_sink(&bad), Err(OutputError::File { .. })));
    }
}
