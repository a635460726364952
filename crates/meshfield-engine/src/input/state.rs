use std::collections::HashSet;

use super::frame::InputFrame;
use super::types::{
    InputEvent,
    Key,
    KeyState,
    MouseButton,
    MouseButtonState,
    PointerButtonEvent,
    PointerMoveEvent,
};

/// Current input state for a window.
///
/// Holds "is down" information and current pointer position.
/// Per-frame transitions are recorded into an `InputFrame`.
#[derive(Debug, Default)]
pub struct InputState {
    /// Whether the window is focused.
    pub focused: bool,

    /// Pointer position in logical pixels.
    pub pointer_pos: Option<(f32, f32)>,

    /// Set of currently held keys.
    pub keys_down: HashSet<Key>,

    /// Set of currently held mouse buttons.
    pub buttons_down: HashSet<MouseButton>,
}

impl InputState {
    /// Applies a platform-agnostic input event to the current state and writes deltas to `frame`.
    pub fn apply_event(&mut self, frame: &mut InputFrame, ev: InputEvent) {
        match &ev {
            InputEvent::Focused(f) => {
                self.focused = *f;
                if !*f {
                    // On focus loss, clear "down" sets. Avoids stuck
                    // keys/buttons when focus changes mid-press.
                    self.keys_down.clear();
                    self.buttons_down.clear();
                }
            }

            InputEvent::PointerMoved(PointerMoveEvent { x, y }) => {
                self.pointer_pos = Some((*x, *y));
            }

            InputEvent::PointerLeft => {
                self.pointer_pos = None;
            }

            InputEvent::Key { key, state, .. } => match state {
                KeyState::Pressed => {
                    let inserted = self.keys_down.insert(*key);
                    if inserted {
                        frame.keys_pressed.insert(*key);
                    }
                }
                KeyState::Released => {
                    let removed = self.keys_down.remove(key);
                    if removed {
                        frame.keys_released.insert(*key);
                    }
                }
            },

            InputEvent::PointerButton(PointerButtonEvent {
                button,
                state,
                x,
                y,
            }) => {
                self.pointer_pos = Some((*x, *y));

                match state {
                    MouseButtonState::Pressed => {
                        let inserted = self.buttons_down.insert(*button);
                        if inserted {
                            frame.buttons_pressed.insert(*button);
                        }
                    }
                    MouseButtonState::Released => {
                        let removed = self.buttons_down.remove(button);
                        if removed {
                            frame.buttons_released.insert(*button);
                        }
                    }
                }
            }

            InputEvent::MouseWheel { .. } => {
                // No persistent state; wheel input is a per-frame stream.
            }
        }

        frame.push_event(ev);
    }

    /// Helper queries
    pub fn key_down(&self, key: Key) -> bool {
        self.keys_down.contains(&key)
    }

    pub fn button_down(&self, btn: MouseButton) -> bool {
        self.buttons_down.contains(&btn)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(button: MouseButton, x: f32, y: f32) -> InputEvent {
        InputEvent::PointerButton(PointerButtonEvent {
            button,
            state: MouseButtonState::Pressed,
            x,
            y,
        })
    }

    #[test]
    fn button_press_updates_state_and_frame() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();

        state.apply_event(&mut frame, press(MouseButton::Left, 10.0, 20.0));

        assert!(state.button_down(MouseButton::Left));
        assert_eq!(state.pointer_pos, Some((10.0, 20.0)));
        assert!(frame.buttons_pressed.contains(&MouseButton::Left));
        assert_eq!(frame.events.len(), 1);
    }

    #[test]
    fn key_press_and_release_round_trip() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();

        state.apply_event(
            &mut frame,
            InputEvent::Key { key: Key::Space, state: KeyState::Pressed, code: 0, repeat: false },
        );
        assert!(state.key_down(Key::Space));
        assert!(frame.keys_pressed.contains(&Key::Space));

        state.apply_event(
            &mut frame,
            InputEvent::Key { key: Key::Space, state: KeyState::Released, code: 0, repeat: false },
        );
        assert!(!state.key_down(Key::Space));
        assert!(frame.keys_released.contains(&Key::Space));
    }

    #[test]
    fn focus_loss_clears_held_sets() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();

        state.apply_event(&mut frame, InputEvent::Focused(true));
        state.apply_event(&mut frame, press(MouseButton::Left, 0.0, 0.0));
        state.apply_event(
            &mut frame,
            InputEvent::Key { key: Key::Space, state: KeyState::Pressed, code: 0, repeat: false },
        );

        state.apply_event(&mut frame, InputEvent::Focused(false));
        assert!(state.keys_down.is_empty());
        assert!(state.buttons_down.is_empty());
    }

    #[test]
    fn pointer_leave_clears_position() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();

        state.apply_event(&mut frame, InputEvent::PointerMoved(PointerMoveEvent { x: 5.0, y: 6.0 }));
        assert_eq!(state.pointer_pos, Some((5.0, 6.0)));

        state.apply_event(&mut frame, InputEvent::PointerLeft);
        assert_eq!(state.pointer_pos, None);
    }

    #[test]
    fn events_preserve_arrival_order() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();

        state.apply_event(&mut frame, press(MouseButton::Left, 1.0, 1.0));
        state.apply_event(&mut frame, InputEvent::PointerMoved(PointerMoveEvent { x: 2.0, y: 2.0 }));
        state.apply_event(&mut frame, InputEvent::MouseWheel {
            delta: crate::input::MouseWheelDelta::Line { x: 0.0, y: 1.0 },
        });

        assert!(matches!(frame.events[0], InputEvent::PointerButton(_)));
        assert!(matches!(frame.events[1], InputEvent::PointerMoved(_)));
        assert!(matches!(frame.events[2], InputEvent::MouseWheel { .. }));
    }
}
