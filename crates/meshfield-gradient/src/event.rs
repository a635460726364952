use meshfield_engine::coords::Vec2;
use meshfield_engine::input::Key;

/// Pointer buttons the field distinguishes.
///
/// Scroll notches are modeled as discrete button presses: one event per
/// notch, regardless of how the platform batches wheel motion.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Button {
    /// Starts and ends drags.
    Primary,
    /// Raises the spread of every visible point.
    ScrollUp,
    /// Lowers the spread of every visible point.
    ScrollDown,
}

/// Platform-free interaction events consumed by the field.
///
/// The app layer translates engine input into these; the core never sees
/// window-system types beyond the engine's own `Key`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum FieldEvent {
    ButtonDown { button: Button, pos: Vec2 },
    ButtonUp { button: Button },
    PointerMoved { pos: Vec2 },
    KeyDown { key: Key },
}
