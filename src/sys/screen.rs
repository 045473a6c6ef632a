//! Screens and spaces.
//!
//! Screens are revalidated on every query; displays can be added or removed
//! between calls, so nothing here is cached across layout passes. A `Space`
//! is a snapshot of a virtual desktop, not a live handle.

use std::hash::{Hash, Hasher};

use rustc_hash::FxHasher;
use serde::{Deserialize, Serialize};

use crate::sys::geometry::Rect;

/// Stable per-display identifier derived from the display's geometry.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
pub struct ScreenId(u64);

impl ScreenId {
    pub fn new(id: u64) -> ScreenId { ScreenId(id) }

    pub fn get(&self) -> u64 { self.0 }

    /// Derives an identifier from a screen's full frame. Two displays cannot
    /// occupy the same frame, and a display keeps its frame across queries
    /// unless it is rearranged.
    pub fn from_frame(frame: Rect) -> ScreenId {
        let mut hasher = FxHasher::default();
        frame.origin.x.to_bits().hash(&mut hasher);
        frame.origin.y.to_bits().hash(&mut hasher);
        frame.size.width.to_bits().hash(&mut hasher);
        frame.size.height.to_bits().hash(&mut hasher);
        ScreenId(hasher.finish())
    }
}

/// A screen as the coordination core sees it.
pub trait Screen: Clone {
    fn id(&self) -> ScreenId;
    /// The full display frame.
    fn frame(&self) -> Rect;
    /// The frame excluding the menu bar and dock.
    fn visible_frame(&self) -> Rect;
}

/// Snapshot of one display, valid for the duration of a single call.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScreenInfo {
    pub id: ScreenId,
    pub frame: Rect,
    pub visible_frame: Rect,
}

impl ScreenInfo {
    pub fn new(frame: Rect, visible_frame: Rect) -> ScreenInfo {
        ScreenInfo {
            id: ScreenId::from_frame(frame),
            frame,
            visible_frame,
        }
    }
}

impl Screen for ScreenInfo {
    fn id(&self) -> ScreenId { self.id }

    fn frame(&self) -> Rect { self.frame }

    fn visible_frame(&self) -> Rect { self.visible_frame }
}

#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
pub struct SpaceId(u64);

impl SpaceId {
    pub fn new(id: u64) -> SpaceId { SpaceId(id) }

    pub fn get(&self) -> u64 { self.0 }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum SpaceKind {
    /// A regular user desktop.
    User,
    /// Fullscreen and other window-server-managed spaces.
    System,
}

/// Immutable snapshot of a space at query time.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Space {
    pub id: SpaceId,
    pub kind: SpaceKind,
    pub uuid: String,
}

impl Space {
    pub fn new(id: SpaceId, kind: SpaceKind, uuid: impl Into<String>) -> Space {
        Space {
            id,
            kind,
            uuid: uuid.into(),
        }
    }

    pub fn is_user(&self) -> bool { self.kind == SpaceKind::User }
}

/// One display's view of the space arrangement.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScreenDescriptor {
    pub screen: ScreenId,
    pub current_space: Space,
    pub spaces: Vec<Space>,
}

/// Query surface for displays and their spaces. Every call returns a fresh
/// snapshot; `None` from `descriptions` means the window server had no data
/// and callers must treat the result as indeterminate.
pub trait ScreenSource {
    fn screens(&self) -> Vec<ScreenInfo>;
    fn descriptions(&self) -> Option<Vec<ScreenDescriptor>>;
}
