use crate::coords::Rect;
use crate::paint::Color;
use crate::scene::{DrawCmd, DrawList, ZIndex};

/// Outline filled inside a shape's bounding rect.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum ShapeKind {
    /// Corner radius in logical pixels, clamped to half the short side.
    RoundedRect { radius: f32 },
    /// Ellipse inscribed in the rect.
    Ellipse,
    /// Isosceles triangle with its base on the top edge and apex at bottom-center.
    TriangleDown,
    /// Base on the bottom edge, apex at top-center.
    TriangleUp,
}

impl ShapeKind {
    /// Discriminant written to the GPU instance.
    pub(crate) fn code(self) -> f32 {
        match self {
            ShapeKind::RoundedRect { .. } => 0.0,
            ShapeKind::Ellipse => 1.0,
            ShapeKind::TriangleDown => 2.0,
            ShapeKind::TriangleUp => 3.0,
        }
    }

    pub(crate) fn radius(self) -> f32 {
        match self {
            ShapeKind::RoundedRect { radius } => radius.max(0.0),
            _ => 0.0,
        }
    }
}

/// Filled shape draw payload.
#[derive(Debug, Clone, PartialEq)]
pub struct ShapeCmd {
    pub rect: Rect,
    pub kind: ShapeKind,
    pub color: Color,
}

impl DrawList {
    pub fn push_shape(&mut self, z: ZIndex, rect: Rect, kind: ShapeKind, color: Color) {
        self.push(z, DrawCmd::Shape(ShapeCmd { rect, kind, color }));
    }

    #[inline]
    pub fn push_rounded_rect(&mut self, z: ZIndex, rect: Rect, radius: f32, color: Color) {
        self.push_shape(z, rect, ShapeKind::RoundedRect { radius }, color);
    }
}
