//! Caller-frame resolution.
//!
//! [`resolve`] walks the live call stack with the `backtrace` crate and turns
//! one frame into a [`FrameDescriptor`]. Distances are counted from the
//! caller of `resolve`: `skip = 0` is the function that called it, `skip = 1`
//! that function's caller, and so on. Frames the compiler inlined are still
//! reported individually as long as debug info is available.

use std::fmt;

/// Placeholder used when a frame exists but its symbol cannot be named.
pub const UNKNOWN_FUNCTION: &str = "?";

const UNKNOWN_FILE: &str = "?";

/// One resolved stack frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameDescriptor {
    /// Function name, shortened to its last path segment.
    pub function: String,
    /// Source file as recorded in debug info, or `?`.
    pub file: String,
    /// Line within `file`, or 0 when debug info has none.
    pub line: u32,
}

impl fmt::Display for FrameDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{} @ {}:{}", self.function, self.file, self.line)
    }
}

/// A symbol as reported by the unwinder, before shortening.
struct RawSymbol {
    name: Option<String>,
    file: Option<String>,
    line: Option<u32>,
}

impl RawSymbol {
    fn from_symbol(symbol: &backtrace::Symbol) -> Self {
        RawSymbol {
            name: symbol.name().map(|n| strip_hash(&format!("{:#}", n)).to_string()),
            file: symbol.filename().map(|p| p.display().to_string()),
            line: symbol.lineno(),
        }
    }

    fn unknown() -> Self {
        RawSymbol { name: None, file: None, line: None }
    }

    fn into_descriptor(self) -> FrameDescriptor {
        let function = match self.name.as_deref() {
            Some(name) => short_function_name(name).to_string(),
            None => UNKNOWN_FUNCTION.to_string(),
        };
        FrameDescriptor {
            function,
            file: self.file.unwrap_or_else(|| UNKNOWN_FILE.to_string()),
            line: self.line.unwrap_or(0),
        }
    }
}

/// Resolve the frame `skip` levels above the caller of this function.
///
/// Returns `None` when the stack is shallower than requested, or when the
/// binary carries no symbols at all and the resolver cannot find its own
/// frame to count from.
#[inline(never)]
pub fn resolve(skip: usize) -> Option<FrameDescriptor> {
    let anchor = concat!(module_path!(), "::resolve");
    let mut anchored = false;
    let mut remaining = skip;
    let mut found = None;

    backtrace::trace(|frame| {
        let mut symbols = Vec::new();
        backtrace::resolve_frame(frame, |symbol| symbols.push(RawSymbol::from_symbol(symbol)));
        if symbols.is_empty() {
            symbols.push(RawSymbol::unknown());
        }

        for symbol in symbols {
            if !anchored {
                anchored = symbol.name.as_deref() == Some(anchor);
                continue;
            }
            if remaining == 0 {
                found = Some(symbol.into_descriptor());
                return false;
            }
            remaining -= 1;
        }
        true
    });

    found
}

/// Drop a trailing `::h<hex>` disambiguator left by legacy mangling.
fn strip_hash(name: &str) -> &str {
    match name.rfind("::h") {
        Some(pos)
            if name.len() - pos == 19
                && name[pos + 3..].bytes().all(|b| b.is_ascii_hexdigit()) =>
        {
            &name[..pos]
        }
        _ => name,
    }
}

/// Shorten a demangled path to its last segment.
///
/// Separators nested inside generic brackets are ignored, and closure
/// segments keep the segment that encloses them, so
/// `app::worker::run::{{closure}}` becomes `run::{{closure}}`.
pub fn short_function_name(full: &str) -> &str {
    let bytes = full.as_bytes();
    let mut depth = 0i32;
    let mut starts = Vec::new();
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'<' => depth += 1,
            b'>' if i == 0 || bytes[i - 1] != b'-' => depth -= 1,
            b':' if depth == 0 && bytes.get(i + 1) == Some(&b':') => {
                starts.push(i + 2);
                i += 2;
                continue;
            }
            _ => {}
        }
        i += 1;
    }

    let mut idx = starts.len();
    let mut start = starts.last().copied().unwrap_or(0);
    while idx > 0 && full[start..].starts_with("{{") {
        idx -= 1;
        start = if idx == 0 { 0 } else { starts[idx - 1] };
    }

    let short = &full[start..];
    if short.is_empty() {
        UNKNOWN_FUNCTION
    } else {
        short
    }
}
