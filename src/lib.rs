//! Coordination core of a tiling window manager.
//!
//! The crate decides which on-screen window is "the" window at a point,
//! tracks focus across screens and spaces, classifies raw pointer activity
//! into semantic drag/resize operations, and maintains the spatial partition
//! tree layout strategies consume. The OS accessibility layer and window
//! server enter only as traits; production implementations of those traits
//! are platform glue that lives outside this crate.

pub mod actor;
pub mod common;
pub mod engine;
pub mod model;
pub mod sys;
