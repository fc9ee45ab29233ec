use crate::coords::Vec2;
use crate::paint::Color;
use crate::scene::{DrawCmd, DrawList, ZIndex};
use crate::text::FontId;

#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub enum TextAlign {
    #[default]
    Left,
    Center,
}

/// Text draw payload.
#[derive(Debug, Clone, PartialEq)]
pub struct TextCmd {
    pub text: String,
    pub font: FontId,
    /// Font size in logical pixels.
    pub size: f32,
    pub color: Color,
    /// Top-left of the text block in logical pixels.
    pub origin: Vec2,
    /// Wrapping width in logical pixels. `None` = single unwrapped run.
    pub max_width: Option<f32>,
    /// Alignment within `max_width`; ignored without one.
    pub align: TextAlign,
}

impl DrawList {
    pub fn push_text(&mut self, z: ZIndex, cmd: TextCmd) {
        if cmd.text.is_empty() {
            return;
        }
        self.push(z, DrawCmd::Text(cmd));
    }
}
