//! The focus transition coordinator.
//!
//! Computes next-window-to-focus for cyclic in-screen navigation and
//! cross-screen focus restoration. The coordinator never focuses anything
//! itself; it returns a [`FocusTransition`] the reflow executor applies.
//! Every OS-boundary failure degrades to `None`, which callers treat as a
//! silent no-op.

use tracing::debug;

use crate::engine::resolver;
use crate::sys::app::Window;
use crate::sys::screen::Screen;
use crate::sys::window_server::WindowServer;

/// Cycling direction. "Clockwise" maps to array-index increment, matching
/// the pointer-coordinate convention.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CycleDirection {
    Clockwise,
    CounterClockwise,
}

impl CycleDirection {
    pub fn step(self, index: usize, len: usize) -> usize {
        debug_assert!(len > 0);
        match self {
            CycleDirection::Clockwise => (index + 1) % len,
            CycleDirection::CounterClockwise => (index + len - 1) % len,
        }
    }
}

/// State the coordinator queries. Window ordering is the activity cache's
/// per-screen ordering, supplied by the embedding window manager; the
/// adjacency hint is derived from window-server spatial adjacency.
pub trait FocusTarget {
    type W: Window;
    type S: Screen;

    fn focused_window(&self) -> Option<Self::W>;
    fn focused_screen(&self) -> Option<Self::S>;
    fn screens(&self) -> Vec<Self::S>;
    fn screen_of(&self, window: &Self::W) -> Option<Self::S>;
    /// Windows on `screen` in activity-cache order.
    fn windows_on(&self, screen: &Self::S) -> Vec<Self::W>;
    /// Spatially adjacent window in `direction`, when the window server can
    /// tell.
    fn adjacent_window(&self, from: &Self::W, direction: CycleDirection) -> Option<Self::W>;
    /// Last window focused on `screen`, if any is remembered.
    fn last_focused_on(&self, screen: &Self::S) -> Option<Self::W>;
}

#[derive(Clone, Debug, PartialEq)]
pub enum FocusTransition<W, S> {
    FocusWindow(W),
    /// Focus the screen surface directly; used when a screen has no windows.
    FocusScreen(S),
}

/// Moves focus to the next window in `direction` on the focused window's
/// screen. An adjacency hint wins outright; otherwise index arithmetic over
/// the activity-cache order, wrapping at both ends.
pub fn cycle_focus<T: FocusTarget>(
    target: &T,
    direction: CycleDirection,
) -> Option<FocusTransition<T::W, T::S>> {
    let focused = target.focused_window()?;
    if let Some(next) = target.adjacent_window(&focused, direction) {
        debug!(from = ?focused.id(), to = ?next.id(), "following adjacency hint");
        return Some(FocusTransition::FocusWindow(next));
    }
    let screen = target.screen_of(&focused)?;
    let windows = target.windows_on(&screen);
    if windows.is_empty() {
        return None;
    }
    let Some(index) = windows.iter().position(|w| w.id() == focused.id()) else {
        // Stale focus that the cache no longer lists; restart at the front.
        return Some(FocusTransition::FocusWindow(windows[0].clone()));
    };
    let next = windows[direction.step(index, windows.len())].clone();
    Some(FocusTransition::FocusWindow(next))
}

/// Moves focus to the main window (index 0 in cache order) of the focused
/// screen.
pub fn focus_main<T: FocusTarget>(target: &T) -> Option<FocusTransition<T::W, T::S>> {
    let screen = match target.focused_window() {
        Some(focused) => target.screen_of(&focused)?,
        None => target.focused_screen()?,
    };
    let windows = target.windows_on(&screen);
    windows.first().cloned().map(FocusTransition::FocusWindow)
}

/// Focuses the screen at `index`: a remembered last-focused window when it
/// is still on screen, else the screen surface when empty, else the topmost
/// window at the screen's center, else the first window in cache order.
pub fn focus_screen<T: FocusTarget>(
    target: &T,
    server: &impl WindowServer,
    index: usize,
) -> Option<FocusTransition<T::W, T::S>> {
    let screens = target.screens();
    let screen = screens.get(index)?.clone();
    if let Some(current) = target.focused_screen()
        && current.id() == screen.id()
    {
        return None;
    }
    let windows = target.windows_on(&screen);
    if let Some(last) = target.last_focused_on(&screen)
        && windows.iter().any(|w| w.id() == last.id())
    {
        return Some(FocusTransition::FocusWindow(last));
    }
    if windows.is_empty() {
        return Some(FocusTransition::FocusScreen(screen));
    }
    let top = resolver::top_window_at(server, screen.frame().center(), &windows);
    Some(FocusTransition::FocusWindow(
        top.unwrap_or_else(|| windows[0].clone()),
    ))
}
