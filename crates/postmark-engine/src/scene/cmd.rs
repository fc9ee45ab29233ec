use crate::scene::shapes::image::ImageCmd;
use crate::scene::shapes::shape::ShapeCmd;
use crate::scene::shapes::text::TextCmd;

/// Renderer-agnostic draw command.
///
/// Each variant has its push helpers in `scene::shapes::*` and a matching
/// renderer in `render::*`.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCmd {
    Shape(ShapeCmd),
    Text(TextCmd),
    Image(ImageCmd),
}
