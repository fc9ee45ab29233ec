use postmark_engine::coords::{Mat3, Rect, Vec2};
use postmark_engine::images::ImageId;
use postmark_engine::paint::Color;
use postmark_engine::scene::shapes::shape::ShapeKind;
use postmark_engine::scene::shapes::text::{TextAlign, TextCmd};
use postmark_engine::scene::{DrawList, ZIndex};
use postmark_engine::text::{FontId, FontSystem};

/// Drawing surface handed to the scene each frame.
///
/// Wraps the engine's `DrawList` with a higher-level API. Every call paints
/// above the previous one; transforms pushed here apply to everything drawn
/// until the matching pop.
pub struct Painter<'a> {
    draw_list: &'a mut DrawList,
    fonts: &'a FontSystem,
    font: Option<FontId>,
    z: i32,
}

impl<'a> Painter<'a> {
    /// Without a `font`, text calls draw nothing.
    pub fn new(draw_list: &'a mut DrawList, fonts: &'a FontSystem, font: Option<FontId>) -> Self {
        Self { draw_list, fonts, font, z: 0 }
    }

    // ── text measurement ──────────────────────────────────────────────────

    pub fn measure_text(&self, text: &str, size: f32, max_width: Option<f32>) -> Vec2 {
        match self.font {
            Some(font) => self.fonts.measure_text(text, font, size, max_width),
            None => Vec2::zero(),
        }
    }

    pub fn has_glyph(&self, ch: char) -> bool {
        self.font.is_some_and(|font| self.fonts.has_glyph(font, ch))
    }

    // ── transforms ────────────────────────────────────────────────────────

    pub fn push_transform(&mut self, local: Mat3) {
        self.draw_list.push_transform(local);
    }

    pub fn pop_transform(&mut self) {
        self.draw_list.pop_transform();
    }

    /// Runs `f` with `local` applied on top of the current transform.
    pub fn with_transform(&mut self, local: Mat3, f: impl FnOnce(&mut Self)) {
        self.push_transform(local);
        f(self);
        self.pop_transform();
    }

    // ── drawing ───────────────────────────────────────────────────────────

    /// Rounded rectangle; `radius = 0.0` for sharp corners.
    pub fn fill_rect(&mut self, rect: Rect, radius: f32, color: Color) {
        let z = self.next_z();
        self.draw_list.push_rounded_rect(z, rect, radius, color);
    }

    /// Ellipse inscribed in `rect`.
    pub fn fill_ellipse(&mut self, rect: Rect, color: Color) {
        let z = self.next_z();
        self.draw_list.push_shape(z, rect, ShapeKind::Ellipse, color);
    }

    /// Isosceles triangle inscribed in `rect`, apex at the top or bottom edge.
    pub fn fill_triangle(&mut self, rect: Rect, apex_up: bool, color: Color) {
        let z = self.next_z();
        let kind = if apex_up { ShapeKind::TriangleUp } else { ShapeKind::TriangleDown };
        self.draw_list.push_shape(z, rect, kind, color);
    }

    pub fn image(&mut self, image: ImageId, rect: Rect, radius: f32, opacity: f32) {
        let z = self.next_z();
        self.draw_list.push_image(z, image, rect, radius, opacity);
    }

    /// Left-aligned text with its first line's top at `origin`.
    pub fn text(&mut self, text: &str, size: f32, color: Color, origin: Vec2, max_width: Option<f32>) {
        self.push_text(text, size, color, origin, max_width, TextAlign::Left);
    }

    /// Text centered horizontally in `rect`, starting at its top edge.
    pub fn text_centered(&mut self, text: &str, size: f32, color: Color, rect: Rect) {
        self.push_text(text, size, color, rect.origin, Some(rect.size.x), TextAlign::Center);
    }

    /// Single glyph centered on `center`. Returns `false` when the font lacks it.
    pub fn glyph(&mut self, ch: char, size: f32, color: Color, center: Vec2) -> bool {
        if !self.has_glyph(ch) {
            return false;
        }
        let mut buf = [0u8; 4];
        let s = ch.encode_utf8(&mut buf);
        let extent = self.measure_text(s, size, None);
        self.text(s, size, color, center - extent * 0.5, None);
        true
    }

    fn push_text(
        &mut self,
        text: &str,
        size: f32,
        color: Color,
        origin: Vec2,
        max_width: Option<f32>,
        align: TextAlign,
    ) {
        let Some(font) = self.font else {
            return;
        };
        let z = self.next_z();
        self.draw_list.push_text(
            z,
            TextCmd { text: text.to_string(), font, size, color, origin, max_width, align },
        );
    }

    // ── internal ──────────────────────────────────────────────────────────

    #[inline]
    fn next_z(&mut self) -> ZIndex {
        let z = ZIndex::new(self.z);
        self.z += 1;
        z
    }
}
