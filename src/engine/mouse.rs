//! Classifies raw pointer activity into a single interaction state.
//!
//! Two streams feed the machine and are not orderable relative to each
//! other: raw button/drag events from the event monitor, and semantic
//! moved/resized upgrades from the accessibility observers. Whichever
//! arrives second wins the classification; button-up always drives
//! completion regardless of arrival order.

use std::time::Instant;

use tracing::trace;

use crate::sys::app::WindowId;
use crate::sys::geometry::Rect;
use crate::sys::screen::ScreenId;

/// What the user is currently doing with the pointer. Exactly one state is
/// live at a time; the machine is created once at startup and mutated in
/// place for the process lifetime.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PointerState {
    Pointing,
    Clicking,
    /// A drag that no observer has explained yet.
    Dragging,
    /// The drag is moving a specific window.
    Moving { window: WindowId },
    /// The drag is resizing; `ratio` is the main-pane ratio the frame
    /// implies on `screen`.
    Resizing { screen: ScreenId, ratio: f64 },
    /// The button went up mid-drag; a semantic notification is expected to
    /// arrive shortly and explain what happened.
    DoneDragging { at: Instant },
}

/// Completion action surfaced on button-up. The machine flips back to
/// `Pointing` before surfacing one of these, so a reflow triggered by the
/// action cannot observe an in-between state.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PointerAction {
    SwapDraggedWindow(WindowId),
    RecommendMainRatio { screen: ScreenId, ratio: f64 },
}

#[derive(Debug, Default)]
pub struct PointerStateMachine {
    state: PointerState,
    last_click: Option<Instant>,
}

impl Default for PointerState {
    fn default() -> Self { PointerState::Pointing }
}

impl PointerStateMachine {
    pub fn new() -> PointerStateMachine { PointerStateMachine::default() }

    pub fn state(&self) -> PointerState { self.state }

    pub fn last_click(&self) -> Option<Instant> { self.last_click }

    pub fn handle_button_down(&mut self, _at: Instant) {
        trace!(state = ?self.state, "button down");
        self.state = PointerState::Clicking;
    }

    pub fn handle_drag(&mut self) {
        match self.state {
            // An observer already upgraded the classification; the raw
            // stream must not downgrade it.
            PointerState::Moving { .. } | PointerState::Resizing { .. } => {}
            _ => self.state = PointerState::Dragging,
        }
    }

    pub fn handle_button_up(&mut self, at: Instant) -> Option<PointerAction> {
        trace!(state = ?self.state, "button up");
        match self.state {
            PointerState::Pointing => None,
            PointerState::Clicking => {
                self.last_click = Some(at);
                self.state = PointerState::Pointing;
                None
            }
            PointerState::Dragging => {
                self.state = PointerState::DoneDragging { at };
                None
            }
            PointerState::DoneDragging { .. } => {
                self.state = PointerState::DoneDragging { at };
                None
            }
            PointerState::Moving { window } => {
                self.state = PointerState::Pointing;
                Some(PointerAction::SwapDraggedWindow(window))
            }
            PointerState::Resizing { screen, ratio } => {
                self.state = PointerState::Pointing;
                Some(PointerAction::RecommendMainRatio { screen, ratio })
            }
        }
    }

    /// A reflow invalidates a provisional association with a specific
    /// window, but not active motion classification.
    pub fn reflow_started(&mut self) {
        match self.state {
            PointerState::DoneDragging { .. } => self.state = PointerState::Pointing,
            PointerState::Moving { .. } => self.state = PointerState::Dragging,
            _ => {}
        }
    }

    /// Observer upgrade. The accessibility stream may race ahead of or
    /// behind the pointer stream, so the previous state is not validated.
    pub fn begin_moving(&mut self, window: WindowId) {
        trace!(?window, state = ?self.state, "upgrade to moving");
        self.state = PointerState::Moving { window };
    }

    pub fn begin_resizing(&mut self, screen: ScreenId, ratio: f64) {
        trace!(?screen, ratio, state = ?self.state, "upgrade to resizing");
        self.state = PointerState::Resizing { screen, ratio };
    }
}

/// Main-pane ratio a resize drag implies: where the dragged window's right
/// edge sits within the screen's visible frame.
pub fn main_ratio_for_drag(visible_frame: Rect, window_frame: Rect) -> f64 {
    let width = visible_frame.size.width;
    if width <= 0.0 {
        return 0.5;
    }
    ((window_frame.max().x - visible_frame.min().x) / width).clamp(0.05, 0.95)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sys::geometry::Rect;

    fn t0() -> Instant { Instant::now() }

    fn machine() -> PointerStateMachine { PointerStateMachine::new() }

    #[test]
    fn click_records_last_click_and_returns_to_pointing() {
        let mut m = machine();
        let down = t0();
        let up = down + std::time::Duration::from_millis(10);
        m.handle_button_down(down);
        assert_eq!(m.state(), PointerState::Clicking);
        assert_eq!(m.handle_button_up(up), None);
        assert_eq!(m.state(), PointerState::Pointing);
        assert_eq!(m.last_click(), Some(up));
    }

    #[test]
    fn drag_without_upgrade_ends_done_dragging() {
        let mut m = machine();
        let down = t0();
        let up = down + std::time::Duration::from_millis(50);
        m.handle_button_down(down);
        m.handle_drag();
        assert_eq!(m.state(), PointerState::Dragging);
        assert_eq!(m.handle_button_up(up), None);
        assert_eq!(m.state(), PointerState::DoneDragging { at: up });
        // No click was recorded: a drag happened.
        assert_eq!(m.last_click(), None);
    }

    #[test]
    fn moving_upgrade_survives_further_drag_events() {
        let mut m = machine();
        m.handle_button_down(t0());
        m.handle_drag();
        m.begin_moving(WindowId::new(1, 1));
        m.handle_drag();
        m.handle_drag();
        assert_eq!(m.state(), PointerState::Moving { window: WindowId::new(1, 1) });
    }

    #[test]
    fn button_up_while_moving_flips_then_surfaces_one_swap() {
        let mut m = machine();
        m.handle_button_down(t0());
        m.handle_drag();
        m.handle_drag();
        m.begin_moving(WindowId::new(1, 3));
        let action = m.handle_button_up(t0());
        assert_eq!(action, Some(PointerAction::SwapDraggedWindow(WindowId::new(1, 3))));
        assert_eq!(m.state(), PointerState::Pointing);
        // Another up surfaces nothing further.
        assert_eq!(m.handle_button_up(t0()), None);
    }

    #[test]
    fn button_up_while_resizing_surfaces_the_ratio() {
        let mut m = machine();
        let screen = ScreenId::new(7);
        m.begin_resizing(screen, 0.6);
        let action = m.handle_button_up(t0());
        assert_eq!(action, Some(PointerAction::RecommendMainRatio { screen, ratio: 0.6 }));
        assert_eq!(m.state(), PointerState::Pointing);
    }

    #[test]
    fn button_up_while_done_dragging_refreshes_the_timestamp() {
        let mut m = machine();
        let first = t0();
        let second = first + std::time::Duration::from_millis(100);
        m.handle_drag();
        m.handle_button_up(first);
        assert_eq!(m.state(), PointerState::DoneDragging { at: first });
        m.handle_button_up(second);
        assert_eq!(m.state(), PointerState::DoneDragging { at: second });
    }

    #[test]
    fn reflow_downgrades_done_dragging_and_moving_only() {
        let mut m = machine();
        m.handle_drag();
        m.handle_button_up(t0());
        m.reflow_started();
        assert_eq!(m.state(), PointerState::Pointing);

        m.begin_moving(WindowId::new(2, 1));
        m.reflow_started();
        assert_eq!(m.state(), PointerState::Dragging);

        // Active resize classification is unaffected.
        m.begin_resizing(ScreenId::new(1), 0.5);
        m.reflow_started();
        assert_eq!(m.state(), PointerState::Resizing { screen: ScreenId::new(1), ratio: 0.5 });
    }

    #[test]
    fn upgrade_does_not_validate_the_previous_state() {
        let mut m = machine();
        // Upgrade straight from pointing: the accessibility stream ran
        // ahead of the pointer stream.
        m.begin_moving(WindowId::new(3, 1));
        assert_eq!(m.state(), PointerState::Moving { window: WindowId::new(3, 1) });
    }

    #[test]
    fn main_ratio_follows_the_right_edge() {
        let screen = Rect::from_parts(0.0, 0.0, 1000.0, 800.0);
        let window = Rect::from_parts(0.0, 0.0, 600.0, 800.0);
        assert_eq!(main_ratio_for_drag(screen, window), 0.6);

        let offset_screen = Rect::from_parts(1000.0, 0.0, 1000.0, 800.0);
        let offset_window = Rect::from_parts(1000.0, 0.0, 250.0, 800.0);
        assert_eq!(main_ratio_for_drag(offset_screen, offset_window), 0.25);
    }

    #[test]
    fn main_ratio_is_clamped() {
        let screen = Rect::from_parts(0.0, 0.0, 1000.0, 800.0);
        assert_eq!(
            main_ratio_for_drag(screen, Rect::from_parts(0.0, 0.0, 5.0, 800.0)),
            0.05
        );
        assert_eq!(
            main_ratio_for_drag(screen, Rect::from_parts(0.0, 0.0, 2000.0, 800.0)),
            0.95
        );
        assert_eq!(
            main_ratio_for_drag(Rect::from_parts(0.0, 0.0, 0.0, 0.0), screen),
            0.5
        );
    }
}
