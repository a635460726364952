use meshfield_engine::coords::Vec2;
use meshfield_engine::paint::Color;

/// 8-bit RGB triple for control-point colors.
///
/// Control points keep their colors in byte form because the cell blend
/// accumulates and normalizes per-channel sums over the 0–255 range.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    pub const RED: Rgb = Rgb::new(255, 0, 0);
    pub const BLUE: Rgb = Rgb::new(0, 0, 255);
    pub const GREEN: Rgb = Rgb::new(0, 255, 0);
    pub const YELLOW: Rgb = Rgb::new(255, 255, 0);
    pub const ORANGE: Rgb = Rgb::new(255, 100, 0);

    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Converts to the engine's premultiplied paint color, fully opaque.
    #[inline]
    pub fn to_paint(self) -> Color {
        Color::from_srgb_u8(self.r, self.g, self.b, 255)
    }
}

/// How computed cell channels are treated on the way out of the blend.
///
/// The original behavior never clamps; `Clamp` is the opt-in strict mode.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub enum ChannelMode {
    /// Channels leave the blend as rounded integers, whatever their range.
    #[default]
    PassThrough,
    /// Channels are confined to `[0, 255]`.
    Clamp,
}

/// Initial placement of a single control point.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PointSpec {
    pub position: Vec2,
    pub color: Rgb,
    pub spread: f32,
}

impl PointSpec {
    #[inline]
    pub const fn new(position: Vec2, color: Rgb, spread: f32) -> Self {
        Self { position, color, spread }
    }
}

/// Field configuration, fixed for the process lifetime.
///
/// Constructed once at startup and handed to [`GradientField::new`]
/// explicitly; nothing here is ambient global state.
///
/// [`GradientField::new`]: crate::field::GradientField::new
#[derive(Debug, Clone)]
pub struct FieldConfig {
    /// Canvas size in logical pixels.
    pub canvas: Vec2,

    /// Number of grid cells per row; cell size is derived from the canvas
    /// width, so cells may have fractional pixel sizes.
    pub cells_per_row: u32,

    /// Strictness of the per-cell channel output.
    pub channel_mode: ChannelMode,

    /// Multiplier applied to the randomly drawn velocity components.
    pub velocity_scale: f32,

    /// Initial point layout, in dispatch/draw order.
    pub points: Vec<PointSpec>,
}

impl FieldConfig {
    /// Side length of one grid cell in logical pixels.
    #[inline]
    pub fn cell_size(&self) -> f32 {
        self.canvas.x / self.cells_per_row as f32
    }

    /// Grid dimensions as `(columns, rows)`.
    ///
    /// Rows follow from the canvas height at the derived cell size, so a
    /// square canvas yields a square grid.
    pub fn grid_dims(&self) -> (u32, u32) {
        let rows = (self.canvas.y / self.cell_size()).round() as u32;
        (self.cells_per_row, rows)
    }
}

impl Default for FieldConfig {
    /// The stock scene: 400×400 canvas, 60×60 grid, and four points parked
    /// 100 px inside each corner — white, blue, red, white — at spread 0.5.
    fn default() -> Self {
        let canvas = Vec2::new(400.0, 400.0);
        let inset = 100.0;
        Self {
            canvas,
            cells_per_row: 60,
            channel_mode: ChannelMode::default(),
            velocity_scale: 1.0,
            points: vec![
                PointSpec::new(Vec2::new(inset, inset), Rgb::WHITE, 0.5),
                PointSpec::new(Vec2::new(canvas.x - inset, inset), Rgb::BLUE, 0.5),
                PointSpec::new(Vec2::new(inset, canvas.y - inset), Rgb::RED, 0.5),
                PointSpec::new(Vec2::new(canvas.x - inset, canvas.y - inset), Rgb::WHITE, 0.5),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_layout_matches_stock_scene() {
        let cfg = FieldConfig::default();
        assert_eq!(cfg.points.len(), 4);
        assert_eq!(cfg.points[0].position, Vec2::new(100.0, 100.0));
        assert_eq!(cfg.points[0].color, Rgb::WHITE);
        assert_eq!(cfg.points[1].position, Vec2::new(300.0, 100.0));
        assert_eq!(cfg.points[1].color, Rgb::BLUE);
        assert_eq!(cfg.points[2].position, Vec2::new(100.0, 300.0));
        assert_eq!(cfg.points[2].color, Rgb::RED);
        assert_eq!(cfg.points[3].position, Vec2::new(300.0, 300.0));
        assert_eq!(cfg.points[3].color, Rgb::WHITE);
        for p in &cfg.points {
            assert_eq!(p.spread, 0.5);
        }
    }

    #[test]
    fn cell_size_is_fractional() {
        let cfg = FieldConfig::default();
        assert!((cfg.cell_size() - 400.0 / 60.0).abs() < 1e-6);
        assert_eq!(cfg.grid_dims(), (60, 60));
    }

    #[test]
    fn grid_rows_follow_canvas_height() {
        let cfg = FieldConfig {
            canvas: Vec2::new(400.0, 200.0),
            ..FieldConfig::default()
        };
        assert_eq!(cfg.grid_dims(), (60, 30));
    }

    #[test]
    fn rgb_to_paint_maps_extremes() {
        use meshfield_engine::paint::Color;
        assert_eq!(Rgb::WHITE.to_paint(), Color::from_premul(1.0, 1.0, 1.0, 1.0));
        assert_eq!(Rgb::BLACK.to_paint(), Color::from_premul(0.0, 0.0, 0.0, 1.0));
        let g = Rgb::GREEN.to_paint();
        assert_eq!((g.r, g.g, g.b, g.a), (0.0, 1.0, 0.0, 1.0));
    }

    #[test]
    fn channel_mode_defaults_to_pass_through() {
        assert_eq!(ChannelMode::default(), ChannelMode::PassThrough);
    }
}
