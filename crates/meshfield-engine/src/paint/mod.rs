//! Paint model shared between app layers and renderers.
//!
//! Scope:
//! - color representation (linear premultiplied alpha)
//!
//! Geometry types remain in `coords`. Draw commands carry a solid `Color`
//! directly; there is no separate paint-source enum.

mod color;

pub use color::Color;
