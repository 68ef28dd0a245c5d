//! Shared grid vocabulary: axes, inclusive ranges and cross-product selections.
//! No engine state lives here.

pub mod selection;

pub use selection::{Axis, Range, Selection};
