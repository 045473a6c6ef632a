//! Entity abstractions for windows and applications.
//!
//! A window or application value is a capability reference to an OS-managed
//! object, never an owner of OS state. Coordinator and resolver logic is
//! generic over these traits; the production implementations are backed by
//! the platform accessibility layer outside this crate, and the test suites
//! use in-memory implementations.

use std::fmt;
use std::num::NonZeroU32;

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use crate::sys::geometry::Rect;

pub type Pid = i32;

/// Identifies a window.
///
/// Stable per physical window and unique within the session. The index is
/// assigned by the per-application observer when the window is discovered.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct WindowId {
    pub pid: Pid,
    pub idx: NonZeroU32,
}

impl WindowId {
    #[track_caller]
    pub fn new(pid: Pid, idx: u32) -> WindowId {
        WindowId {
            pid,
            idx: NonZeroU32::new(idx).expect("window index must be nonzero"),
        }
    }
}

impl fmt::Debug for WindowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "WindowId({}:{})", self.pid, self.idx)
    }
}

bitflags! {
    /// Capability set reported for a window.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct WindowFlags: u8 {
        const MOVABLE = 1 << 0;
        const RESIZABLE = 1 << 1;
        const ON_SCREEN = 1 << 2;
    }
}

/// A window as the coordination core sees it.
///
/// Matching a window against a live window-server record uses the
/// (pid, frame, title) tuple, never value equality of cached fields; two
/// same-process windows with identical geometry (tab groups) differ only in
/// title.
pub trait Window: Clone {
    fn id(&self) -> WindowId;
    fn frame(&self) -> Rect;
    fn title(&self) -> Option<String>;
    fn flags(&self) -> WindowFlags;

    fn pid(&self) -> Pid { self.id().pid }

    fn is_on_screen(&self) -> bool { self.flags().contains(WindowFlags::ON_SCREEN) }

    fn is_movable(&self) -> bool { self.flags().contains(WindowFlags::MOVABLE) }

    fn is_resizable(&self) -> bool { self.flags().contains(WindowFlags::RESIZABLE) }
}

/// An application owning zero or more windows.
pub trait Application {
    fn pid(&self) -> Pid;
    fn focused_window(&self) -> Option<WindowId>;
    fn is_frontmost(&self) -> bool;
}
