pub mod changes;
pub mod focus;
pub mod mouse;
pub mod resolver;
pub mod transition;

pub use changes::{Change, classify};
pub use focus::{CycleDirection, FocusTarget, FocusTransition};
pub use mouse::{PointerAction, PointerState, PointerStateMachine};
pub use resolver::top_window_at;
pub use transition::{SpaceDirection, TransitionTarget, WindowTransition};
