use meshfield_engine::coords::Vec2;
use meshfield_engine::scene::{Border, DrawList, ZIndex};
use rand::Rng;

use crate::config::Rgb;
use crate::event::{Button, FieldEvent};

/// Squared hit-test radius for starting a drag, in logical pixels
/// (≈ 17.3 px radius).
pub const HIT_RADIUS_SQ: f32 = 300.0;

/// Spread change applied per scroll notch. No floor or ceiling is enforced.
pub const SPREAD_STEP: f32 = 0.1;

/// On-screen disc radius.
const DOT_RADIUS: f32 = 10.0;

/// Outline stroke width.
const OUTLINE_WIDTH: f32 = 2.0;

/// Velocity component values drawn at construction; sign and magnitude are
/// picked together, so components are never zero.
const VELOCITY_CHOICES: [f32; 4] = [-2.0, -1.0, 1.0, 2.0];

/// A single color-emitting control point.
///
/// Owns its own motion and event response. `color` is fixed at construction;
/// `position` is mutated only here — snapped to the pointer while dragging,
/// advanced by velocity otherwise. Velocity components are drawn once from
/// [`VELOCITY_CHOICES`] and only ever change sign (wall bounces).
#[derive(Debug, Clone)]
pub struct ControlPoint {
    position: Vec2,
    color: Rgb,
    spread: f32,
    velocity: Vec2,
    dragging: bool,
    visible: bool,
}

impl ControlPoint {
    /// Creates a point at `position` with a randomized velocity.
    ///
    /// The generator is injected so callers control determinism: the app
    /// seeds from the OS, tests from a fixed seed.
    pub fn new(
        position: Vec2,
        color: Rgb,
        spread: f32,
        velocity_scale: f32,
        rng: &mut impl Rng,
    ) -> Self {
        let vx = VELOCITY_CHOICES[rng.gen_range(0..VELOCITY_CHOICES.len())] * velocity_scale;
        let vy = VELOCITY_CHOICES[rng.gen_range(0..VELOCITY_CHOICES.len())] * velocity_scale;

        Self {
            position,
            color,
            spread,
            velocity: Vec2::new(vx, vy),
            dragging: false,
            visible: true,
        }
    }

    #[inline]
    pub fn position(&self) -> Vec2 {
        self.position
    }

    #[inline]
    pub fn color(&self) -> Rgb {
        self.color
    }

    #[inline]
    pub fn spread(&self) -> f32 {
        self.spread
    }

    #[inline]
    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    #[inline]
    pub fn dragging(&self) -> bool {
        self.dragging
    }

    #[inline]
    pub fn visible(&self) -> bool {
        self.visible
    }

    pub(crate) fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    /// Responds to one interaction event.
    ///
    /// - primary press inside the hit radius captures the drag
    /// - scroll notches shift `spread` by ±[`SPREAD_STEP`], no radius check
    /// - primary release clears `dragging` unconditionally (idempotent)
    /// - pointer motion snaps the position exactly while dragging
    ///
    /// Every branch is a no-op while the point is invisible.
    pub fn apply_event(&mut self, ev: &FieldEvent) {
        if !self.visible {
            return;
        }

        match *ev {
            FieldEvent::ButtonDown { button: Button::Primary, pos } => {
                if (pos - self.position).length_sq() <= HIT_RADIUS_SQ {
                    self.dragging = true;
                }
            }
            FieldEvent::ButtonDown { button: Button::ScrollUp, .. } => {
                self.spread += SPREAD_STEP;
            }
            FieldEvent::ButtonDown { button: Button::ScrollDown, .. } => {
                self.spread -= SPREAD_STEP;
            }
            FieldEvent::ButtonUp { button: Button::Primary } => {
                self.dragging = false;
            }
            FieldEvent::PointerMoved { pos } => {
                if self.dragging {
                    self.position = pos;
                }
            }
            _ => {}
        }
    }

    /// Advances one motion step and bounces off the canvas walls.
    ///
    /// The bounce is a boundary-touch test, not a reflection-distance
    /// correction: a fast point may overshoot the edge slightly before its
    /// direction flips. Advancing is unconditional — a drag does not suspend
    /// it, the pointer snap simply overwrites the result.
    pub fn advance(&mut self, bounds: Vec2) {
        self.position = self.position + self.velocity;

        if self.position.x <= 0.0 || self.position.x >= bounds.x {
            self.velocity.x = -self.velocity.x;
        }
        if self.position.y <= 0.0 || self.position.y >= bounds.y {
            self.velocity.y = -self.velocity.y;
        }
    }

    /// Records the point's disc into the draw list; no-op while invisible.
    pub fn draw(&self, draw_list: &mut DrawList, z: ZIndex) {
        if !self.visible {
            return;
        }

        draw_list.push_circle(
            z,
            self.position.rounded(),
            DOT_RADIUS,
            self.color.to_paint(),
            Some(Border::new(OUTLINE_WIDTH, Rgb::BLACK.to_paint())),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use meshfield_engine::scene::DrawCmd;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(42)
    }

    fn point_at(x: f32, y: f32) -> ControlPoint {
        ControlPoint::new(Vec2::new(x, y), Rgb::BLUE, 0.5, 1.0, &mut rng())
    }

    fn press_at(x: f32, y: f32) -> FieldEvent {
        FieldEvent::ButtonDown { button: Button::Primary, pos: Vec2::new(x, y) }
    }

    // ── construction ──────────────────────────────────────────────────────

    #[test]
    fn velocity_components_come_from_the_choice_set() {
        let mut r = rng();
        for _ in 0..50 {
            let p = ControlPoint::new(Vec2::zero(), Rgb::RED, 0.5, 1.0, &mut r);
            let v = p.velocity();
            assert!(VELOCITY_CHOICES.contains(&v.x), "vx = {}", v.x);
            assert!(VELOCITY_CHOICES.contains(&v.y), "vy = {}", v.y);
        }
    }

    #[test]
    fn same_seed_reproduces_the_same_velocity() {
        let a = ControlPoint::new(Vec2::zero(), Rgb::RED, 0.5, 1.0, &mut rng());
        let b = ControlPoint::new(Vec2::zero(), Rgb::RED, 0.5, 1.0, &mut rng());
        assert_eq!(a.velocity(), b.velocity());
    }

    #[test]
    fn velocity_scale_multiplies_components() {
        let base = ControlPoint::new(Vec2::zero(), Rgb::RED, 0.5, 1.0, &mut rng());
        let scaled = ControlPoint::new(Vec2::zero(), Rgb::RED, 0.5, 3.0, &mut rng());
        assert_eq!(scaled.velocity(), base.velocity() * 3.0);
    }

    // ── drag capture ──────────────────────────────────────────────────────

    #[test]
    fn press_inside_hit_radius_starts_drag() {
        let mut p = point_at(100.0, 100.0);
        // Squared distance 200 < 300.
        p.apply_event(&press_at(110.0, 110.0));
        assert!(p.dragging());
    }

    #[test]
    fn hit_radius_boundary_is_inclusive() {
        // 17² = 289 ≤ 300 is a hit; 18² = 324 > 300 is a miss.
        let mut hit = point_at(100.0, 100.0);
        hit.apply_event(&press_at(117.0, 100.0));
        assert!(hit.dragging());

        let mut miss = point_at(100.0, 100.0);
        miss.apply_event(&press_at(118.0, 100.0));
        assert!(!miss.dragging());
    }

    #[test]
    fn press_outside_hit_radius_does_not_start_drag() {
        let mut p = point_at(100.0, 100.0);
        // Squared distance 800 > 300.
        p.apply_event(&press_at(120.0, 120.0));
        assert!(!p.dragging());
    }

    #[test]
    fn release_clears_drag_unconditionally() {
        let mut p = point_at(100.0, 100.0);
        p.apply_event(&FieldEvent::ButtonUp { button: Button::Primary });
        assert!(!p.dragging());

        p.apply_event(&press_at(100.0, 100.0));
        assert!(p.dragging());
        p.apply_event(&FieldEvent::ButtonUp { button: Button::Primary });
        assert!(!p.dragging());
    }

    #[test]
    fn pointer_move_snaps_exactly_while_dragging() {
        let mut p = point_at(100.0, 100.0);
        p.apply_event(&press_at(100.0, 100.0));
        p.apply_event(&FieldEvent::PointerMoved { pos: Vec2::new(250.25, 13.5) });
        assert_eq!(p.position(), Vec2::new(250.25, 13.5));
    }

    #[test]
    fn pointer_move_without_drag_is_ignored() {
        let mut p = point_at(100.0, 100.0);
        p.apply_event(&FieldEvent::PointerMoved { pos: Vec2::new(5.0, 5.0) });
        assert_eq!(p.position(), Vec2::new(100.0, 100.0));
    }

    #[test]
    fn drag_may_leave_the_canvas() {
        let mut p = point_at(100.0, 100.0);
        p.apply_event(&press_at(100.0, 100.0));
        p.apply_event(&FieldEvent::PointerMoved { pos: Vec2::new(-50.0, 450.0) });
        assert_eq!(p.position(), Vec2::new(-50.0, 450.0));
    }

    // ── spread scrolling ──────────────────────────────────────────────────

    #[test]
    fn scroll_up_raises_spread_by_exactly_one_step() {
        let mut p = point_at(100.0, 100.0);
        // Far from the pointer; scroll has no radius check.
        p.apply_event(&FieldEvent::ButtonDown {
            button: Button::ScrollUp,
            pos: Vec2::new(399.0, 399.0),
        });
        assert!((p.spread() - 0.6).abs() < 1e-6);
    }

    #[test]
    fn scroll_down_has_no_floor() {
        let mut p = point_at(100.0, 100.0);
        for _ in 0..10 {
            p.apply_event(&FieldEvent::ButtonDown {
                button: Button::ScrollDown,
                pos: Vec2::zero(),
            });
        }
        assert!((p.spread() - (-0.5)).abs() < 1e-5);
    }

    // ── visibility gating ─────────────────────────────────────────────────

    #[test]
    fn invisible_point_ignores_all_events() {
        let mut p = point_at(100.0, 100.0);
        p.set_visible(false);

        p.apply_event(&press_at(100.0, 100.0));
        assert!(!p.dragging());

        p.apply_event(&FieldEvent::ButtonDown { button: Button::ScrollUp, pos: Vec2::zero() });
        assert_eq!(p.spread(), 0.5);
    }

    #[test]
    fn hiding_mid_drag_freezes_but_keeps_the_capture() {
        let mut p = point_at(100.0, 100.0);
        p.apply_event(&press_at(100.0, 100.0));
        p.set_visible(false);

        p.apply_event(&FieldEvent::PointerMoved { pos: Vec2::new(0.0, 0.0) });
        assert_eq!(p.position(), Vec2::new(100.0, 100.0));
        assert!(p.dragging());
    }

    // ── motion ────────────────────────────────────────────────────────────

    #[test]
    fn advance_adds_velocity_each_step() {
        let mut p = point_at(100.0, 100.0);
        let v = p.velocity();
        p.advance(Vec2::new(400.0, 400.0));
        assert_eq!(p.position(), Vec2::new(100.0, 100.0) + v);
    }

    #[test]
    fn advance_runs_even_while_dragging() {
        let mut p = point_at(100.0, 100.0);
        p.apply_event(&press_at(100.0, 100.0));
        let v = p.velocity();
        p.advance(Vec2::new(400.0, 400.0));
        assert_eq!(p.position(), Vec2::new(100.0, 100.0) + v);
    }

    #[test]
    fn bounce_negates_vx_on_right_wall_touch() {
        let mut p = point_at(399.0, 200.0);
        p.velocity = Vec2::new(2.0, 0.0);
        p.advance(Vec2::new(400.0, 400.0));
        // 399 + 2 = 401 ≥ 400: direction flips, overshoot stays.
        assert_eq!(p.position(), Vec2::new(401.0, 200.0));
        assert_eq!(p.velocity(), Vec2::new(-2.0, 0.0));
    }

    #[test]
    fn bounce_negates_vy_on_top_wall_touch() {
        let mut p = point_at(200.0, 1.0);
        p.velocity = Vec2::new(0.0, -2.0);
        p.advance(Vec2::new(400.0, 400.0));
        assert_eq!(p.position(), Vec2::new(200.0, -1.0));
        assert_eq!(p.velocity(), Vec2::new(0.0, 2.0));
    }

    #[test]
    fn corner_touch_negates_both_components() {
        let mut p = point_at(1.0, 1.0);
        p.velocity = Vec2::new(-2.0, -1.0);
        p.advance(Vec2::new(400.0, 400.0));
        assert_eq!(p.velocity(), Vec2::new(2.0, 1.0));
    }

    #[test]
    fn no_bounce_in_the_interior() {
        let mut p = point_at(200.0, 200.0);
        let v = p.velocity();
        p.advance(Vec2::new(400.0, 400.0));
        assert_eq!(p.velocity(), v);
    }

    // ── drawing ───────────────────────────────────────────────────────────

    #[test]
    fn draw_emits_one_bordered_disc_at_rounded_position() {
        let mut p = point_at(100.6, 99.4);
        p.apply_event(&press_at(100.0, 100.0));

        let mut dl = DrawList::new();
        p.draw(&mut dl, ZIndex::new(1));

        assert_eq!(dl.items().len(), 1);
        let DrawCmd::Circle(cmd) = &dl.items()[0].cmd else {
            panic!("expected a circle command");
        };
        assert_eq!(cmd.center, Vec2::new(101.0, 99.0));
        assert_eq!(cmd.radius, 10.0);
        assert_eq!(cmd.color, Rgb::BLUE.to_paint());
        let border = cmd.border.as_ref().expect("disc is outlined");
        assert_eq!(border.width, 2.0);
        assert_eq!(border.color, Rgb::BLACK.to_paint());
    }

    #[test]
    fn draw_is_a_no_op_while_invisible() {
        let mut p = point_at(100.0, 100.0);
        p.set_visible(false);

        let mut dl = DrawList::new();
        p.draw(&mut dl, ZIndex::new(1));
        assert!(dl.items().is_empty());
    }
}
