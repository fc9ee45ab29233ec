use crate::coords::Rect;
use crate::images::ImageId;
use crate::scene::{DrawCmd, DrawList, ZIndex};

/// Textured quad draw payload; the image is stretched to `rect`.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageCmd {
    pub image: ImageId,
    pub rect: Rect,
    pub corner_radius: f32,
    pub opacity: f32,
}

impl DrawList {
    pub fn push_image(&mut self, z: ZIndex, image: ImageId, rect: Rect, corner_radius: f32, opacity: f32) {
        self.push(z, DrawCmd::Image(ImageCmd { image, rect, corner_radius, opacity }));
    }
}
