//! The reactor owns all mutable engine state and drains events strictly in
//! arrival order on a single logical owner.
//!
//! It takes the raw pointer stream, the accessibility notification stream
//! and the command stream, keeps them coherent through the pointer state
//! machine and the coordinators, and tells the outside world what to do
//! about it through [`Reaction`]s. No other code mutates the pointer state;
//! external callers get snapshots or one-shot results.

#[cfg(test)]
pub(crate) mod testing;


use std::time::Instant;

use static_assertions::assert_impl_all;
use tracing::{debug, trace};

use crate::actor;
use crate::actor::broadcast::Broadcaster;
use crate::common::config::Config;
use crate::engine::changes::{self, Change};
use crate::engine::focus::{self, CycleDirection, FocusTransition};
use crate::engine::mouse::{
    PointerAction, PointerState, PointerStateMachine, main_ratio_for_drag,
};
use crate::engine::transition::{self, SpaceDirection, TransitionTarget, WindowTransition};
use crate::sys::app::WindowId;
use crate::sys::event::{PointerEvent, PointerEventKind};
use crate::sys::geometry::Rect;
use crate::sys::observer::NotificationKind;
use crate::sys::screen::ScreenId;
use crate::sys::window_server::WindowServer;

/// Coordinator commands, bound to hotkeys by the embedding process.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    FocusClockwise,
    FocusCounterClockwise,
    FocusMain,
    FocusScreen(usize),
    SwapMain,
    SwapClockwise,
    SwapCounterClockwise,
    ThrowToScreen(usize),
    ThrowScreenClockwise,
    ThrowScreenCounterClockwise,
    ThrowToSpace(usize),
    ThrowSpaceLeft,
    ThrowSpaceRight,
}

/// Inbound events, marshaled from OS callback threads via [`actor::channel`].
#[derive(Clone, Debug)]
pub enum Event {
    Pointer(PointerEvent),
    Notification {
        kind: NotificationKind,
        window: Option<WindowId>,
    },
    /// Observer upgrade: the current drag is moving `window`.
    BeganMoving { window: WindowId },
    /// Observer upgrade: the current drag is resizing a window on `screen`;
    /// the frames are captured at upgrade time.
    BeganResizing {
        screen: ScreenId,
        visible_frame: Rect,
        window_frame: Rect,
    },
    /// A reflow pass is starting; provisional pointer associations are no
    /// longer trustworthy.
    ReflowStarted,
    Command(Command),
}

assert_impl_all!(Event: Send);

/// Outbound instructions for the reflow executor.
#[derive(Clone, Debug, PartialEq)]
pub enum Reaction<W, S> {
    Change(Change<WindowId>),
    Focus(FocusTransition<W, S>),
    Window(WindowTransition<W, S>),
    /// Apply this main-pane ratio on `screen`.
    SetMainRatio { screen: ScreenId, ratio: f64 },
    /// Swap the dragged window with the window under the drop point.
    SwapDraggedWindow(WindowId),
}

pub type Sender = actor::Sender<Event>;
pub type Receiver = actor::Receiver<Event>;

pub struct Reactor<T: TransitionTarget, Srv: WindowServer> {
    target: T,
    server: Srv,
    config: Config,
    pointer: PointerStateMachine,
    reactions: Broadcaster<Reaction<T::W, T::S>>,
}

impl<T: TransitionTarget, Srv: WindowServer> Reactor<T, Srv> {
    pub fn new(target: T, server: Srv, config: Config) -> Self {
        Reactor {
            target,
            server,
            config,
            pointer: PointerStateMachine::new(),
            reactions: Broadcaster::new(),
        }
    }

    /// Subscribes to the outbound reaction stream.
    pub fn reactions(&self) -> actor::Receiver<Reaction<T::W, T::S>> {
        self.reactions.subscribe()
    }

    /// Read-only snapshot of the current pointer state.
    pub fn pointer_state(&self) -> PointerState { self.pointer.state() }

    pub fn last_click(&self) -> Option<Instant> { self.pointer.last_click() }

    /// Whether a press at `at` completes a double click.
    pub fn is_double_click(&self, at: Instant) -> bool {
        self.pointer
            .last_click()
            .is_some_and(|prev| at.duration_since(prev) <= self.config.settings.mouse.double_click_interval)
    }

    /// Reports a completed swap back into the change stream.
    pub fn notify_windows_swapped(&self, a: WindowId, b: WindowId) {
        self.reactions.send(Reaction::Change(Change::WindowsSwapped(a, b)));
    }

    /// Reports a layout-strategy switch into the change stream.
    pub fn notify_layout_changed(&self) {
        self.reactions.send(Reaction::Change(Change::LayoutChanged));
    }

    /// Drains the event channel until every sender is gone.
    pub async fn run(mut self, mut events: Receiver) {
        while let Some((span, event)) = events.recv().await {
            let _guard = span.enter();
            self.handle_event(event);
        }
    }

    pub fn handle_event(&mut self, event: Event) {
        trace!(?event, "handling event");
        match event {
            Event::Pointer(pointer) => self.handle_pointer(pointer),
            Event::Notification { kind, window } => self.handle_notification(kind, window),
            Event::BeganMoving { window } => self.upgrade_moving(window),
            Event::BeganResizing {
                screen,
                visible_frame,
                window_frame,
            } => {
                let ratio = main_ratio_for_drag(visible_frame, window_frame);
                self.upgrade_resizing(screen, ratio);
            }
            Event::ReflowStarted => self.pointer.reflow_started(),
            Event::Command(command) => self.handle_command(command),
        }
    }

    fn handle_pointer(&mut self, event: PointerEvent) {
        match event.kind {
            PointerEventKind::ButtonDown => self.pointer.handle_button_down(event.time),
            PointerEventKind::Dragged => self.pointer.handle_drag(),
            PointerEventKind::ButtonUp => {
                let action = self.pointer.handle_button_up(event.time);
                if let Some(action) = action {
                    self.emit_action(action);
                }
            }
        }
    }

    fn handle_notification(&mut self, kind: NotificationKind, window: Option<WindowId>) {
        match kind {
            // Moved/resized during a drag classify the drag; they are not
            // semantic changes on their own. A move reported while the
            // pointer is idle is programmatic (a reflow echo) and must not
            // fabricate a drag.
            NotificationKind::WindowMoved => {
                if let Some(window) = window
                    && !matches!(
                        self.pointer.state(),
                        PointerState::Pointing | PointerState::Resizing { .. }
                    )
                {
                    self.upgrade_moving(window);
                }
            }
            NotificationKind::WindowResized => {}
            _ => {
                let change = changes::classify(kind, window);
                if matches!(change, Change::Unknown) {
                    debug!(%kind, "unrecognized notification");
                }
                self.reactions.send(Reaction::Change(change));
            }
        }
    }

    /// Accepts a moving upgrade without validating the previous state. A
    /// drag that already ended gets completed on the spot: the pointer and
    /// accessibility streams are unordered relative to each other, and
    /// whichever arrives second wins.
    fn upgrade_moving(&mut self, window: WindowId) {
        match self.pointer.state() {
            PointerState::DoneDragging { at } => {
                self.pointer.begin_moving(window);
                self.finish_button_up(at);
            }
            _ => self.pointer.begin_moving(window),
        }
    }

    fn upgrade_resizing(&mut self, screen: ScreenId, ratio: f64) {
        match self.pointer.state() {
            PointerState::DoneDragging { at } => {
                self.pointer.begin_resizing(screen, ratio);
                self.finish_button_up(at);
            }
            _ => self.pointer.begin_resizing(screen, ratio),
        }
    }

    fn finish_button_up(&mut self, at: Instant) {
        if let Some(action) = self.pointer.handle_button_up(at) {
            self.emit_action(action);
        }
    }

    fn emit_action(&self, action: PointerAction) {
        match action {
            PointerAction::SwapDraggedWindow(window) => {
                if self.config.settings.mouse.swap_on_drag {
                    self.reactions.send(Reaction::SwapDraggedWindow(window));
                } else {
                    debug!(?window, "drag swap disabled; dropping action");
                }
            }
            PointerAction::RecommendMainRatio { screen, ratio } => {
                if self.config.settings.mouse.resize_on_drag {
                    self.reactions.send(Reaction::SetMainRatio { screen, ratio });
                } else {
                    debug!(?screen, ratio, "drag resize disabled; dropping action");
                }
            }
        }
    }

    fn handle_command(&mut self, command: Command) {
        let reaction = match command {
            Command::FocusClockwise => {
                focus::cycle_focus(&self.target, CycleDirection::Clockwise).map(Reaction::Focus)
            }
            Command::FocusCounterClockwise => {
                focus::cycle_focus(&self.target, CycleDirection::CounterClockwise)
                    .map(Reaction::Focus)
            }
            Command::FocusMain => focus::focus_main(&self.target).map(Reaction::Focus),
            Command::FocusScreen(index) => {
                focus::focus_screen(&self.target, &self.server, index).map(Reaction::Focus)
            }
            Command::SwapMain => {
                transition::swap_focused_to_main(&self.target).map(Reaction::Window)
            }
            Command::SwapClockwise => {
                transition::swap_focused(&self.target, CycleDirection::Clockwise)
                    .map(Reaction::Window)
            }
            Command::SwapCounterClockwise => {
                transition::swap_focused(&self.target, CycleDirection::CounterClockwise)
                    .map(Reaction::Window)
            }
            Command::ThrowToScreen(index) => {
                transition::throw_focused_to_screen(&self.target, index).map(Reaction::Window)
            }
            Command::ThrowScreenClockwise => {
                transition::throw_focused_screen_cycled(&self.target, CycleDirection::Clockwise)
                    .map(Reaction::Window)
            }
            Command::ThrowScreenCounterClockwise => transition::throw_focused_screen_cycled(
                &self.target,
                CycleDirection::CounterClockwise,
            )
            .map(Reaction::Window),
            Command::ThrowToSpace(index) => {
                transition::throw_focused_to_space(&self.target, index).map(Reaction::Window)
            }
            Command::ThrowSpaceLeft => {
                transition::throw_focused_space_directed(&self.target, SpaceDirection::Left)
                    .map(Reaction::Window)
            }
            Command::ThrowSpaceRight => {
                transition::throw_focused_space_directed(&self.target, SpaceDirection::Right)
                    .map(Reaction::Window)
            }
        };
        match reaction {
            Some(reaction) => self.reactions.send(reaction),
            // OS-boundary failures and guarded operations degrade to a
            // silent no-op rather than surfacing to the user.
            None => debug!(?command, "command resolved to no-op"),
        }
    }

    /// The target, for embedding-side bookkeeping between events.
    pub fn target_mut(&mut self) -> &mut T { &mut self.target }
}
