use crate::frame;

/// Marker for the binary's `main` function after name shortening.
///
/// Walks stop once they reach it, so runtime start-up frames never show up
/// in a call stack. Shortening drops the module path, so any function named
/// `main` matches, not only the crate root's; a nested `cli::main` on the
/// stack ends the walk at that frame.
pub const ENTRY_POINT_MARKER: &str = "#main @ ";

/// Collect up to `max_depth` formatted frames, starting `start_skip` frames
/// above the caller of this function.
///
/// Frames that cannot be resolved are left out without ending the walk. The
/// first frame whose formatted text starts with `stop_marker` is kept and
/// ends the walk. Index 0 of the result is the frame nearest the call site.
#[inline(never)]
pub fn collect(start_skip: usize, max_depth: usize, stop_marker: &str) -> Vec<String> {
    let mut stack = Vec::with_capacity(max_depth.min(32));
    let end = start_skip.saturating_add(max_depth);

    for skip in start_skip..end {
        // +1 steps over this function's own frame.
        let Some(current) = frame::resolve(skip.saturating_add(1)) else {
            continue;
        };
        let current = current.to_string();
        let stop = !stop_marker.is_empty() && current.starts_with(stop_marker);
        stack.push(current);
        if stop {
            break;
        }
    }

    stack
}
