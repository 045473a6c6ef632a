//! Window-at-point resolution.
//!
//! Every call takes a fresh window-server snapshot. Overlap ties are broken
//! by asking, per candidate record, how many windows sit above it in the
//! stacking order; the record with the fewest wins. The window server
//! answers that relative query even though it exposes no ordinal z-index.

use tracing::trace;

use crate::sys::app::Window;
use crate::sys::geometry::{Point, SameAs};
use crate::sys::window_server::{WindowServer, WindowServerInfo};

/// Resolves the topmost window at `point` among `candidates`. Returns `None`
/// when no candidate is under the point, and also when the window-server
/// query fails; callers must treat that as "cannot determine", not as "no
/// window here".
pub fn top_window_at<W: Window>(
    server: &impl WindowServer,
    point: Point,
    candidates: &[W],
) -> Option<W> {
    let records = server.window_list(true, None)?;
    let mut hits: Vec<&WindowServerInfo> =
        records.iter().filter(|record| record.frame.contains(point)).collect();
    trace!(?point, hits = hits.len(), "resolving window at point");
    match hits.len() {
        0 => None,
        1 => match_candidate(hits[0], candidates),
        _ => {
            // A record whose stacking position cannot be determined never
            // wins the tie.
            hits.sort_by_key(|record| server.windows_above(record.id).unwrap_or(usize::MAX));
            hits.iter().find_map(|record| match_candidate(record, candidates))
        }
    }
}

/// Maps a window-server record back to the caller's candidate set. The title
/// participates because pid and bounds alone cannot tell apart same-process
/// windows with identical geometry (tab groups).
fn match_candidate<W: Window>(record: &WindowServerInfo, candidates: &[W]) -> Option<W> {
    candidates
        .iter()
        .find(|window| {
            window.pid() == record.pid
                && window.frame().same_as(record.frame)
                && window.title() == record.title
        })
        .cloned()
}
