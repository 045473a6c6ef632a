//! Raw pointer events delivered by the global event monitor.

use std::time::Instant;

use num_enum::TryFromPrimitive;

use crate::sys::geometry::Point;

/// Event type tag as delivered by the OS event monitor. Only the three tags
/// the pointer state machine consumes are recognized; everything else fails
/// conversion and is dropped at the boundary.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, TryFromPrimitive)]
#[repr(u32)]
pub enum PointerEventKind {
    ButtonDown = 1,
    ButtonUp = 2,
    Dragged = 6,
}

/// One raw pointer event, stamped at arrival.
#[derive(Clone, Copy, Debug)]
pub struct PointerEvent {
    pub kind: PointerEventKind,
    pub location: Point,
    pub time: Instant,
}

impl PointerEvent {
    pub fn new(kind: PointerEventKind, location: Point, time: Instant) -> PointerEvent {
        PointerEvent { kind, location, time }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognized_tags_convert() {
        assert_eq!(PointerEventKind::try_from(1u32).unwrap(), PointerEventKind::ButtonDown);
        assert_eq!(PointerEventKind::try_from(2u32).unwrap(), PointerEventKind::ButtonUp);
        assert_eq!(PointerEventKind::try_from(6u32).unwrap(), PointerEventKind::Dragged);
    }

    #[test]
    fn unrecognized_tags_are_rejected() {
        assert!(PointerEventKind::try_from(3u32).is_err());
        assert!(PointerEventKind::try_from(0u32).is_err());
    }
}
