//! Meshfield engine crate.
//!
//! Owns the platform + GPU runtime pieces consumed by higher layers: window
//! and event loop, device/surface management, input translation, frame
//! timing, and the draw-stream renderers. Nothing in here knows what a
//! gradient field is.

pub mod device;
pub mod window;
pub mod input;
pub mod time;
pub mod core;

pub mod logging;
pub mod coords;
pub mod render;
pub mod paint;
pub mod scene;
