//! The window-server query boundary.
//!
//! The window server enumerates on-screen windows and their stacking order.
//! It does not expose ordinal z-indices, but it does answer relative
//! queries: the list of windows above a given window. The resolver builds
//! its tie-break on that.

use serde::{Deserialize, Serialize};

use crate::sys::app::Pid;
use crate::sys::geometry::Rect;

/// Identifier assigned to a window by the window server. Distinct from
/// [`crate::sys::app::WindowId`], which is assigned by this system.
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Clone, Copy, Serialize, Deserialize)]
pub struct WindowServerId(pub u32);

impl WindowServerId {
    pub fn new(id: u32) -> WindowServerId { WindowServerId(id) }

    pub fn as_u32(self) -> u32 { self.0 }
}

impl From<WindowServerId> for u32 {
    fn from(id: WindowServerId) -> u32 { id.0 }
}

/// One record from a window-server snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindowServerInfo {
    pub id: WindowServerId,
    pub pid: Pid,
    pub frame: Rect,
    pub title: Option<String>,
    pub owner: Option<String>,
    pub layer: i32,
}

/// Synchronous window-server queries, issued from the engine's owning
/// thread only. Each call takes a fresh snapshot; results are never cached.
pub trait WindowServer {
    /// Lists window records, optionally restricted to on-screen windows and
    /// to windows above `relative_to` in stacking order. Returns `None` when
    /// the window server produced no data, which callers must treat as
    /// indeterminate rather than as an empty screen.
    fn window_list(
        &self,
        only_on_screen: bool,
        relative_to: Option<WindowServerId>,
    ) -> Option<Vec<WindowServerInfo>>;

    /// Number of windows stacked above `id` among the on-screen set.
    fn windows_above(&self, id: WindowServerId) -> Option<usize> {
        Some(self.window_list(true, Some(id))?.len())
    }
}
