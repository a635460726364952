use crate::coords::Vec2;
use crate::paint::Color;
use crate::scene::{DrawCmd, DrawList, ZIndex};

use super::Border;

/// Circle draw payload.
#[derive(Debug, Clone, PartialEq)]
pub struct CircleCmd {
    pub center: Vec2,
    pub radius: f32,
    pub color: Color,
    pub border: Option<Border>,
}

impl CircleCmd {
    #[inline]
    pub fn new(center: Vec2, radius: f32, color: Color, border: Option<Border>) -> Self {
        Self { center, radius, color, border }
    }
}

impl DrawList {
    /// Records a circle draw command.
    #[inline]
    pub fn push_circle(
        &mut self,
        z: ZIndex,
        center: Vec2,
        radius: f32,
        color: Color,
        border: Option<Border>,
    ) {
        self.push(z, DrawCmd::Circle(CircleCmd::new(center, radius, color, border)));
    }
}
