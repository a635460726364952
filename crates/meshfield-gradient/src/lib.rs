//! Gradient field core.
//!
//! A small set of moving, draggable color control points whose weighted
//! influence determines the color of every cell in a fixed grid. This crate
//! owns the interaction model (drag capture, spread scrolling, visibility
//! toggling), the per-frame motion step, and the per-cell color blend.
//!
//! Everything here is headless: the engine crate is used only for CPU-side
//! types (`Vec2`, `DrawList`, `Color`, `Key`), so the whole model can be
//! driven and asserted in tests without a window or GPU.

pub mod config;
pub mod event;
pub mod field;
pub mod point;

pub use config::{ChannelMode, FieldConfig, PointSpec, Rgb};
pub use event::{Button, FieldEvent};
pub use field::{CellColor, GradientField};
pub use point::ControlPoint;
