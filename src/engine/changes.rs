//! Maps OS notifications into the closed set of semantic change events the
//! reflow subsystem consumes.

use crate::sys::observer::NotificationKind;

/// Exactly one change per reported OS notification. `Unknown` is the default
/// for unrecognized signals; classification never fails.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Change<W> {
    Added(W),
    Removed(W),
    FocusChanged(W),
    WindowsSwapped(W, W),
    ApplicationActivated,
    ApplicationDeactivated,
    SpaceChanged,
    LayoutChanged,
    TabChanged(W),
    Unknown,
}

impl<W> Change<W> {
    /// Whether the reflow subsystem should recompute frames for this change.
    pub fn triggers_reflow(&self) -> bool { !matches!(self, Change::Unknown) }
}

/// Classifies one notification. Kinds that carry a window but arrived
/// without one classify as `Unknown`; moved/resized notifications drive the
/// pointer state machine instead of the change stream and also classify as
/// `Unknown` here.
pub fn classify<W>(kind: NotificationKind, window: Option<W>) -> Change<W> {
    use NotificationKind as N;
    match (kind, window) {
        (N::WindowCreated, Some(window)) => Change::Added(window),
        (N::ElementDestroyed, Some(window)) => Change::Removed(window),
        (N::WindowMiniaturized, Some(window)) => Change::Removed(window),
        (N::WindowDeminiaturized, Some(window)) => Change::Added(window),
        (N::FocusedWindowChanged | N::MainWindowChanged, Some(window)) => {
            Change::FocusChanged(window)
        }
        // Switching tabs in a native tab group retitles the hosting window.
        (N::TitleChanged, Some(window)) => Change::TabChanged(window),
        (N::ApplicationHidden, Some(window)) => Change::Removed(window),
        (N::ApplicationShown, Some(window)) => Change::Added(window),
        (N::ApplicationActivated, _) => Change::ApplicationActivated,
        (N::ApplicationDeactivated, _) => Change::ApplicationDeactivated,
        (N::ActiveSpaceChanged, _) => Change::SpaceChanged,
        _ => Change::Unknown,
    }
}
