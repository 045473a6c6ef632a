//! The window transition coordinator.
//!
//! Computes window-swap, cross-screen-throw, and cross-space-throw
//! operations as [`WindowTransition`] values for the reflow executor.
//! Floating windows are excluded from every operation: a floating or absent
//! focused window turns a swap into the weaker `ResetFocus` transition and
//! a throw into a silent no-op.

use tracing::debug;

use crate::engine::focus::{CycleDirection, FocusTarget};
use crate::sys::app::Window;
use crate::sys::screen::{Screen, Space};

/// Directed cross-space throw. Spaces are tracked in pairs, so a directed
/// throw moves one pair over.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SpaceDirection {
    Left,
    Right,
}

/// State the coordinator queries beyond [`FocusTarget`].
pub trait TransitionTarget: FocusTarget {
    /// Non-floating windows on `screen`, in activity-cache order.
    fn active_windows_on(&self, screen: &Self::S) -> Vec<Self::W>;
    fn is_floating(&self, window: &Self::W) -> bool;
    /// Ordered space list for `screen`; `None` when the space query fails.
    fn spaces_on(&self, screen: &Self::S) -> Option<Vec<Space>>;
    fn current_space(&self, screen: &Self::S) -> Option<Space>;
}

#[derive(Clone, Debug, PartialEq)]
pub enum WindowTransition<W, S> {
    SwitchWindows(W, W),
    MoveWindowToScreen(W, S),
    /// Move the window to the space at this index in its screen's space
    /// list.
    MoveWindowToSpace(W, usize),
    /// Weaker fallback when a swap has no valid subject: re-establish focus
    /// without changing the layout.
    ResetFocus,
}

/// Swaps the focused window into the main position (index 0 in cache
/// order). One active window: no-op. Two: swap the two, which also covers
/// the focused-window-already-main case. Three or more: swap focused with
/// the main window unless it already is the main window.
pub fn swap_focused_to_main<T: TransitionTarget>(
    target: &T,
) -> Option<WindowTransition<T::W, T::S>> {
    let (focused, screen) = match swap_subject(target) {
        Ok(subject) => subject,
        Err(reset) => return reset,
    };
    let windows = target.active_windows_on(&screen);
    match windows.len() {
        0 | 1 => None,
        2 => Some(WindowTransition::SwitchWindows(
            windows[0].clone(),
            windows[1].clone(),
        )),
        _ => {
            if windows[0].id() == focused.id() {
                return None;
            }
            Some(WindowTransition::SwitchWindows(focused, windows[0].clone()))
        }
    }
}

/// Swaps the focused window with its neighbor in `direction`, wrapping at
/// both ends.
pub fn swap_focused<T: TransitionTarget>(
    target: &T,
    direction: CycleDirection,
) -> Option<WindowTransition<T::W, T::S>> {
    let (focused, screen) = match swap_subject(target) {
        Ok(subject) => subject,
        Err(reset) => return reset,
    };
    let windows = target.active_windows_on(&screen);
    if windows.len() < 2 {
        return None;
    }
    let index = windows.iter().position(|w| w.id() == focused.id())?;
    let neighbor = windows[direction.step(index, windows.len())].clone();
    Some(WindowTransition::SwitchWindows(focused, neighbor))
}

/// Throws the focused window to the screen at `index`.
pub fn throw_focused_to_screen<T: TransitionTarget>(
    target: &T,
    index: usize,
) -> Option<WindowTransition<T::W, T::S>> {
    let (focused, screen) = throw_subject(target)?;
    let screens = target.screens();
    let dest = screens.get(index)?.clone();
    if dest.id() == screen.id() {
        return None;
    }
    Some(WindowTransition::MoveWindowToScreen(focused, dest))
}

/// Throws the focused window to the next screen in `direction`.
pub fn throw_focused_screen_cycled<T: TransitionTarget>(
    target: &T,
    direction: CycleDirection,
) -> Option<WindowTransition<T::W, T::S>> {
    let (_, screen) = throw_subject(target)?;
    let screens = target.screens();
    if screens.len() < 2 {
        return None;
    }
    let index = screens.iter().position(|s| s.id() == screen.id())?;
    throw_focused_to_screen(target, direction.step(index, screens.len()))
}

/// Throws the focused window to the user space at `index` in its screen's
/// space list.
pub fn throw_focused_to_space<T: TransitionTarget>(
    target: &T,
    index: usize,
) -> Option<WindowTransition<T::W, T::S>> {
    let (focused, screen) = throw_subject(target)?;
    let spaces = target.spaces_on(&screen)?;
    let space = spaces.get(index)?;
    if !space.is_user() {
        debug!(?space, "refusing to throw onto a system space");
        return None;
    }
    if target.current_space(&screen).map(|s| s.id) == Some(space.id) {
        return None;
    }
    Some(WindowTransition::MoveWindowToSpace(focused, index))
}

/// Throws the focused window one space pair to the left or right of its
/// current space. The target pair index must itself be a valid index into
/// the screen's space list.
pub fn throw_focused_space_directed<T: TransitionTarget>(
    target: &T,
    direction: SpaceDirection,
) -> Option<WindowTransition<T::W, T::S>> {
    let (_, screen) = throw_subject(target)?;
    let spaces = target.spaces_on(&screen)?;
    let current = target.current_space(&screen)?;
    let index = spaces.iter().position(|s| s.id == current.id)?;
    let target_index = match direction {
        SpaceDirection::Left => index.checked_sub(2)?,
        SpaceDirection::Right => {
            let next = index + 2;
            if next >= spaces.len() {
                return None;
            }
            next
        }
    };
    throw_focused_to_space(target, target_index)
}

/// Subject of a swap. An absent or floating focused window degrades to the
/// weaker `ResetFocus` transition on the error side; a failed screen query
/// degrades to a plain no-op.
#[allow(clippy::type_complexity)]
fn swap_subject<T: TransitionTarget>(
    target: &T,
) -> Result<(T::W, T::S), Option<WindowTransition<T::W, T::S>>> {
    let Some(focused) = target.focused_window() else {
        return Err(Some(WindowTransition::ResetFocus));
    };
    if target.is_floating(&focused) {
        debug!(window = ?focused.id(), "focused window floats; resetting focus");
        return Err(Some(WindowTransition::ResetFocus));
    }
    match target.screen_of(&focused) {
        Some(screen) => Ok((focused, screen)),
        None => Err(None),
    }
}

/// Subject of a throw. Unlike swaps, a floating or absent focused window is
/// a silent no-op.
fn throw_subject<T: TransitionTarget>(target: &T) -> Option<(T::W, T::S)> {
    let focused = target.focused_window()?;
    if target.is_floating(&focused) {
        return None;
    }
    let screen = target.screen_of(&focused)?;
    Some((focused, screen))
}
