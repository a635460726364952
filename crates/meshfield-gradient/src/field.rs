use meshfield_engine::coords::{Rect, Vec2};
use meshfield_engine::input::Key;
use meshfield_engine::paint::Color;
use meshfield_engine::scene::{DrawList, ZIndex};
use rand::Rng;

use crate::config::{ChannelMode, FieldConfig};
use crate::event::FieldEvent;
use crate::point::ControlPoint;

/// Distance floor for the inverse-power weight. Keeps the blend finite when a
/// cell center coincides with a control point.
const MIN_DISTANCE: f32 = 1.0;

/// Grid cells sit below the point discs; within a layer, insertion order
/// keeps later points on top of earlier ones.
const CELL_LAYER: ZIndex = ZIndex::new(0);
const POINT_LAYER: ZIndex = ZIndex::new(1);

/// One blended cell color.
///
/// Channels are `i32` because pass-through mode forwards the rounded blend
/// result without confining it to `[0, 255]`.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct CellColor {
    pub r: i32,
    pub g: i32,
    pub b: i32,
}

impl CellColor {
    /// Confines every channel to `[0, 255]`.
    #[inline]
    pub fn clamped(self) -> Self {
        Self {
            r: self.r.clamp(0, 255),
            g: self.g.clamp(0, 255),
            b: self.b.clamp(0, 255),
        }
    }

    /// Converts to the engine's paint color. Out-of-range channels saturate
    /// at the paint boundary regardless of the field's channel mode.
    #[inline]
    pub fn to_paint(self) -> Color {
        Color::from_straight(
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
            1.0,
        )
    }
}

/// The gradient field: an ordered, fixed collection of control points plus
/// the grid they color.
///
/// Iteration order of the collection defines both event dispatch order and
/// draw order. The collection is created once and never grows or shrinks.
pub struct GradientField {
    config: FieldConfig,
    points: Vec<ControlPoint>,
    points_visible: bool,
}

impl GradientField {
    /// Builds the field from its configuration.
    ///
    /// Point velocities are drawn from `rng`; inject a fixed seed for
    /// deterministic motion.
    pub fn new(config: FieldConfig, rng: &mut impl Rng) -> Self {
        let points: Vec<ControlPoint> = config
            .points
            .iter()
            .map(|spec| {
                ControlPoint::new(
                    spec.position,
                    spec.color,
                    spec.spread,
                    config.velocity_scale,
                    rng,
                )
            })
            .collect();

        let (cols, rows) = config.grid_dims();
        log::debug!(
            "gradient field: {} points over a {cols}x{rows} grid ({}x{} px canvas)",
            points.len(),
            config.canvas.x,
            config.canvas.y,
        );

        Self {
            config,
            points,
            points_visible: true,
        }
    }

    #[inline]
    pub fn config(&self) -> &FieldConfig {
        &self.config
    }

    #[inline]
    pub fn points(&self) -> &[ControlPoint] {
        &self.points
    }

    #[inline]
    pub fn points_visible(&self) -> bool {
        self.points_visible
    }

    /// Dispatches one event.
    ///
    /// Space toggles global visibility; every event is then forwarded to
    /// every point in collection order. Hit tests are independent per point,
    /// so a click can capture more than one overlapping point — the last
    /// point in order wins the pointer on move, since it snaps last.
    pub fn apply_event(&mut self, ev: &FieldEvent) {
        if let FieldEvent::KeyDown { key: Key::Space } = ev {
            self.toggle_visibility();
        }

        for point in &mut self.points {
            point.apply_event(ev);
        }
    }

    /// One frame step: dispatch the pending event batch in order, then
    /// advance every point's motion. Headless — drawing is separate.
    pub fn step(&mut self, events: &[FieldEvent]) {
        for ev in events {
            self.apply_event(ev);
        }

        let bounds = self.config.canvas;
        for point in &mut self.points {
            point.advance(bounds);
        }
    }

    /// Flips the shared visibility flag and writes it into every point.
    /// All-or-nothing: no per-point override survives.
    pub fn toggle_visibility(&mut self) {
        self.points_visible = !self.points_visible;
        for point in &mut self.points {
            point.set_visible(self.points_visible);
        }
    }

    /// Blends the color for one cell center.
    ///
    /// Each point contributes with weight `1 / d^(2·spread)`, with `d` floored
    /// at [`MIN_DISTANCE`]. Hidden points still contribute — visibility only
    /// suppresses drawing. Channels are normalized by the total weight and
    /// rounded independently; `ChannelMode::Clamp` additionally confines them
    /// to `[0, 255]`.
    pub fn cell_color(&self, center: Vec2) -> CellColor {
        let mut total_weight = 0.0f32;
        let (mut r, mut g, mut b) = (0.0f32, 0.0f32, 0.0f32);

        for point in &self.points {
            let distance = (center - point.position()).length().max(MIN_DISTANCE);
            let weight = 1.0 / distance.powf(2.0 * point.spread());

            total_weight += weight;
            let color = point.color();
            r += color.r as f32 * weight;
            g += color.g as f32 * weight;
            b += color.b as f32 * weight;
        }

        if total_weight > 0.0 {
            r /= total_weight;
            g /= total_weight;
            b /= total_weight;
        }

        let cell = CellColor {
            r: r.round() as i32,
            g: g.round() as i32,
            b: b.round() as i32,
        };

        match self.config.channel_mode {
            ChannelMode::PassThrough => cell,
            ChannelMode::Clamp => cell.clamped(),
        }
    }

    /// Records the full frame: one solid rect per grid cell in row-major
    /// order, then every point disc on top in collection order.
    pub fn draw(&self, draw_list: &mut DrawList) {
        let cell = self.config.cell_size();
        let (cols, rows) = self.config.grid_dims();

        for row in 0..rows {
            for col in 0..cols {
                let x = col as f32 * cell;
                let y = row as f32 * cell;
                let center = Vec2::new(x + cell * 0.5, y + cell * 0.5);
                let color = self.cell_color(center).to_paint();
                draw_list.push_rect(CELL_LAYER, Rect::new(x, y, cell, cell), color);
            }
        }

        for point in &self.points {
            point.draw(draw_list, POINT_LAYER);
        }
    }
}
