use meshfield_engine::coords::Vec2;
use meshfield_engine::core::{App, AppControl, FrameCtx};
use meshfield_engine::input::{
    InputEvent, KeyState, MouseButton, MouseButtonState, MouseWheelDelta,
};
use meshfield_engine::paint::Color;
use meshfield_engine::render::shapes::circle::CircleRenderer;
use meshfield_engine::render::shapes::rect::RectRenderer;
use meshfield_engine::scene::DrawList;
use meshfield_gradient::{Button, FieldEvent, GradientField};

/// Background clear color. The grid covers the whole canvas, so this shows
/// only before the first cell lands.
const CLEAR_COLOR: Color = Color::from_premul(1.0, 1.0, 1.0, 1.0);

/// The windowed front end: translates the frame's input batch into field
/// events, steps the field, and renders the recorded draw list.
pub struct Viewer {
    field: GradientField,

    draw_list: DrawList,
    rect_renderer: RectRenderer,
    circle_renderer: CircleRenderer,

    // Reused per frame to avoid reallocation.
    events: Vec<FieldEvent>,
}

impl Viewer {
    pub fn new(field: GradientField) -> Self {
        Self {
            field,
            draw_list: DrawList::new(),
            rect_renderer: RectRenderer::new(),
            circle_renderer: CircleRenderer::new(),
            events: Vec::new(),
        }
    }

    /// Maps one engine input event to a field event.
    ///
    /// `pointer` is the tracked pointer position, used for scroll events,
    /// which carry no position of their own. One wheel event maps to one
    /// scroll notch; magnitude beyond the sign is ignored.
    fn translate(ev: &InputEvent, pointer: Vec2) -> Option<FieldEvent> {
        match *ev {
            InputEvent::PointerButton(pb) => match (pb.button, pb.state) {
                (MouseButton::Left, MouseButtonState::Pressed) => Some(FieldEvent::ButtonDown {
                    button: Button::Primary,
                    pos: Vec2::new(pb.x, pb.y),
                }),
                (MouseButton::Left, MouseButtonState::Released) => {
                    Some(FieldEvent::ButtonUp { button: Button::Primary })
                }
                _ => None,
            },

            InputEvent::PointerMoved(m) => {
                Some(FieldEvent::PointerMoved { pos: Vec2::new(m.x, m.y) })
            }

            InputEvent::MouseWheel { delta } => {
                let y = match delta {
                    MouseWheelDelta::Line { y, .. } => y,
                    MouseWheelDelta::Pixel { y, .. } => y,
                };
                if y > 0.0 {
                    Some(FieldEvent::ButtonDown { button: Button::ScrollUp, pos: pointer })
                } else if y < 0.0 {
                    Some(FieldEvent::ButtonDown { button: Button::ScrollDown, pos: pointer })
                } else {
                    None
                }
            }

            InputEvent::Key { key, state: KeyState::Pressed, repeat: false, .. } => {
                Some(FieldEvent::KeyDown { key })
            }

            _ => None,
        }
    }
}

impl App for Viewer {
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        // ── Input: drain this frame's batch in arrival order ──────────────
        let pointer = ctx
            .input
            .pointer_pos
            .map(|(x, y)| Vec2::new(x, y))
            .unwrap_or_default();

        self.events.clear();
        for ev in &ctx.input_frame.events {
            if let Some(fe) = Self::translate(ev, pointer) {
                self.events.push(fe);
            }
        }

        // ── Step: dispatch + motion, headless ─────────────────────────────
        self.field.step(&self.events);

        // ── Record the frame ──────────────────────────────────────────────
        self.draw_list.clear();
        self.field.draw(&mut self.draw_list);

        // ── Render ────────────────────────────────────────────────────────
        let dl = &mut self.draw_list;
        let rects = &mut self.rect_renderer;
        let circles = &mut self.circle_renderer;

        ctx.render(CLEAR_COLOR, |rctx, target| {
            rects.render(rctx, target, dl);
            circles.render(rctx, target, dl);
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use meshfield_engine::input::{Key, PointerButtonEvent, PointerMoveEvent};

    fn left(state: MouseButtonState, x: f32, y: f32) -> InputEvent {
        InputEvent::PointerButton(PointerButtonEvent {
            button: MouseButton::Left,
            state,
            x,
            y,
        })
    }

    #[test]
    fn left_press_becomes_primary_down_with_position() {
        let ev = Viewer::translate(&left(MouseButtonState::Pressed, 10.0, 20.0), Vec2::zero());
        assert_eq!(
            ev,
            Some(FieldEvent::ButtonDown {
                button: Button::Primary,
                pos: Vec2::new(10.0, 20.0),
            })
        );
    }

    #[test]
    fn left_release_becomes_primary_up() {
        let ev = Viewer::translate(&left(MouseButtonState::Released, 10.0, 20.0), Vec2::zero());
        assert_eq!(ev, Some(FieldEvent::ButtonUp { button: Button::Primary }));
    }

    #[test]
    fn other_buttons_are_ignored() {
        let ev = InputEvent::PointerButton(PointerButtonEvent {
            button: MouseButton::Right,
            state: MouseButtonState::Pressed,
            x: 0.0,
            y: 0.0,
        });
        assert_eq!(Viewer::translate(&ev, Vec2::zero()), None);
    }

    #[test]
    fn wheel_sign_selects_scroll_direction() {
        let pointer = Vec2::new(33.0, 44.0);

        let up = InputEvent::MouseWheel { delta: MouseWheelDelta::Line { x: 0.0, y: 1.0 } };
        assert_eq!(
            Viewer::translate(&up, pointer),
            Some(FieldEvent::ButtonDown { button: Button::ScrollUp, pos: pointer })
        );

        let down = InputEvent::MouseWheel { delta: MouseWheelDelta::Pixel { x: 0.0, y: -3.5 } };
        assert_eq!(
            Viewer::translate(&down, pointer),
            Some(FieldEvent::ButtonDown { button: Button::ScrollDown, pos: pointer })
        );

        let flat = InputEvent::MouseWheel { delta: MouseWheelDelta::Line { x: 1.0, y: 0.0 } };
        assert_eq!(Viewer::translate(&flat, pointer), None);
    }

    #[test]
    fn pointer_motion_passes_through() {
        let ev = InputEvent::PointerMoved(PointerMoveEvent { x: 1.5, y: 2.5 });
        assert_eq!(
            Viewer::translate(&ev, Vec2::zero()),
            Some(FieldEvent::PointerMoved { pos: Vec2::new(1.5, 2.5) })
        );
    }

    #[test]
    fn key_presses_forward_but_repeats_and_releases_do_not() {
        let press = InputEvent::Key { key: Key::Space, state: KeyState::Pressed, code: 0, repeat: false };
        assert_eq!(
            Viewer::translate(&press, Vec2::zero()),
            Some(FieldEvent::KeyDown { key: Key::Space })
        );

        let repeat = InputEvent::Key { key: Key::Space, state: KeyState::Pressed, code: 0, repeat: true };
        assert_eq!(Viewer::translate(&repeat, Vec2::zero()), None);

        let release = InputEvent::Key { key: Key::Space, state: KeyState::Released, code: 0, repeat: false };
        assert_eq!(Viewer::translate(&release, Vec2::zero()), None);
    }
}
