//! Deterministic scene geometry.
//!
//! Everything inside the tilting wrapper is laid out in wrapper-local
//! coordinates: window logical pixels before the wrapper transform and before
//! page scroll. Layout depends only on the viewport size and the photo count,
//! never on time or randomness.

use postmark_engine::coords::{Rect, Vec2, Viewport};

use crate::gift::{HorizontalAnchor, PhotoPreset, VerticalAnchor, PHOTO_PRESETS};

/// Below this width the gifts stack under the letter and the page scrolls.
pub const COMPACT_BREAKPOINT: f32 = 720.0;

const ENVELOPE_ASPECT: f32 = 1.5;
const MAX_ENVELOPE_WIDTH: f32 = 440.0;
const GRID_GAP: f32 = 18.0;

/// Rect of one gift plus its resting tilt.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct GiftSlot {
    pub rect: Rect,
    pub rotate_deg: f32,
}

impl GiftSlot {
    /// Whether `p` (wrapper-local) hits the rotated gift.
    pub fn contains(&self, p: Vec2) -> bool {
        let c = self.rect.center();
        let local = (p - c).rotated(-self.rotate_deg.to_radians()) + c;
        self.rect.contains(local)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SceneLayout {
    pub viewport: Viewport,
    pub compact: bool,
    pub envelope: Rect,
    /// Letter at the top of its rise, still behind the envelope pocket.
    pub letter_raised: Rect,
    /// Letter fully out, in front of the envelope.
    pub letter_open: Rect,
    pub gifts: Vec<GiftSlot>,
    /// Baseline-center of the prompt under the envelope.
    pub prompt_anchor: Vec2,
    /// Total height of the scrollable page.
    pub content_height: f32,
}

impl SceneLayout {
    pub fn compute(viewport: Viewport, gift_count: usize) -> Self {
        let compact = viewport.width < COMPACT_BREAKPOINT;
        let vw = viewport.width.max(1.0);
        let vh = viewport.height.max(1.0);

        let width_share = if compact { 0.84 } else { 0.36 };
        let env_w = (vw * width_share)
            .min(MAX_ENVELOPE_WIDTH)
            .min(vh * 0.38 * ENVELOPE_ASPECT)
            .max(1.0);
        let env_h = env_w / ENVELOPE_ASPECT;
        let env_center = Vec2::new(vw * 0.5, vh * 0.5 + env_h * 0.1);
        let envelope = Rect::from_center_size(env_center, Vec2::new(env_w, env_h));

        let letter_raised = Rect::new(
            envelope.origin.x + env_w * 0.05,
            envelope.origin.y - env_h * 0.85,
            env_w * 0.9,
            env_h * 0.9,
        );
        let letter_open = Rect::from_center_size(
            Vec2::new(env_center.x, vh * 0.5 - env_h * 0.1),
            Vec2::new(env_w * 1.05, env_h * 1.55),
        );

        let count = gift_count.min(PHOTO_PRESETS.len());
        let (gifts, content_height) = if compact {
            grid_slots(letter_open, envelope, count, vh)
        } else {
            let slots = PHOTO_PRESETS[..count].iter().map(|p| preset_slot(letter_open, p)).collect();
            (slots, vh)
        };

        Self {
            viewport,
            compact,
            envelope,
            letter_raised,
            letter_open,
            gifts,
            prompt_anchor: Vec2::new(env_center.x, envelope.max().y + 30.0),
            content_height,
        }
    }

    /// Largest scroll offset; zero when everything fits.
    pub fn max_scroll(&self) -> f32 {
        (self.content_height - self.viewport.height).max(0.0)
    }

    /// Letter rect for a rise progress in `0..=1`, and whether it is drawn in
    /// front of the envelope.
    pub fn letter_at(&self, progress: f32) -> (Rect, bool) {
        const SWAP: f32 = 0.6;
        let p = progress.clamp(0.0, 1.0);
        let tucked = Rect::from_origin_size(
            Vec2::new(self.letter_raised.origin.x, self.envelope.origin.y + self.envelope.size.y * 0.08),
            self.letter_raised.size,
        );
        if p < SWAP {
            (lerp_rect(tucked, self.letter_raised, p / SWAP), false)
        } else {
            (lerp_rect(self.letter_raised, self.letter_open, (p - SWAP) / (1.0 - SWAP)), true)
        }
    }
}

fn lerp_rect(a: Rect, b: Rect, t: f32) -> Rect {
    Rect::from_origin_size(a.origin.lerp(b.origin, t), a.size.lerp(b.size, t))
}

fn gift_size(letter: Rect) -> Vec2 {
    let w = letter.size.x * 0.5;
    Vec2::new(w, w * 1.1)
}

/// Places a gift around the letter from its preset (wide layout).
fn preset_slot(letter: Rect, preset: &PhotoPreset) -> GiftSlot {
    let size = gift_size(letter);
    let x = match preset.horizontal {
        HorizontalAnchor::Left(f) => letter.origin.x + f * letter.size.x,
        HorizontalAnchor::Right(f) => letter.max().x - f * letter.size.x - size.x,
    };
    let y = match preset.vertical {
        VerticalAnchor::Top(f) => letter.origin.y + f * letter.size.y,
        VerticalAnchor::Bottom(f) => letter.max().y - f * letter.size.y - size.y,
    };
    GiftSlot { rect: Rect::new(x, y, size.x, size.y), rotate_deg: preset.rotate_deg }
}

/// 2×2 grid under the letter (compact layout). Returns slots and page height.
fn grid_slots(letter: Rect, envelope: Rect, count: usize, vh: f32) -> (Vec<GiftSlot>, f32) {
    if count == 0 {
        return (Vec::new(), vh);
    }
    let top = letter.max().y.max(envelope.max().y) + 64.0;
    let cell_w = (letter.size.x - GRID_GAP) * 0.5;
    let cell = Vec2::new(cell_w, cell_w * 1.1);
    let slots: Vec<GiftSlot> = (0..count)
        .map(|i| {
            let col = (i % 2) as f32;
            let row = (i / 2) as f32;
            let origin = Vec2::new(
                letter.origin.x + col * (cell.x + GRID_GAP),
                top + row * (cell.y + GRID_GAP),
            );
            GiftSlot { rect: Rect::from_origin_size(origin, cell), rotate_deg: 0.0 }
        })
        .collect();
    let bottom = slots.iter().map(|s| s.rect.max().y).fold(top, f32::max);
    (slots, (bottom + 40.0).max(vh))
}

// ── lightbox ──────────────────────────────────────────────────────────────

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct LightboxLayout {
    pub image: Rect,
    pub close: Rect,
    pub hint_anchor: Vec2,
}

impl LightboxLayout {
    /// `aspect` is width / height of the shown photo.
    pub fn compute(viewport: Viewport, aspect: f32) -> Self {
        let bounds = viewport.bounds();
        let frame = bounds.inset(viewport.width * 0.06, viewport.height * 0.1);
        Self {
            image: frame.fit_aspect(aspect),
            close: Rect::new(viewport.width - 60.0, 16.0, 44.0, 44.0),
            hint_anchor: Vec2::new(viewport.width * 0.5, viewport.height - 36.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wide(n: usize) -> SceneLayout {
        SceneLayout::compute(Viewport::new(1280.0, 800.0), n)
    }

    fn compact(n: usize) -> SceneLayout {
        SceneLayout::compute(Viewport::new(390.0, 780.0), n)
    }

    // ── wide ──────────────────────────────────────────────────────────────

    #[test]
    fn wide_layout_fits_the_viewport() {
        let l = wide(4);
        assert!(!l.compact);
        let bounds = l.viewport.bounds();
        for slot in &l.gifts {
            assert!(slot.rect.origin.x >= 0.0 && slot.rect.max().x <= bounds.max().x);
        }
        assert!(l.letter_raised.origin.y >= 0.0);
        assert_eq!(l.max_scroll(), 0.0);
    }

    #[test]
    fn gifts_flank_the_letter() {
        let l = wide(4);
        assert!(l.gifts[0].rect.max().x < l.letter_open.origin.x);
        assert!(l.gifts[1].rect.origin.x > l.letter_open.max().x);
        assert!(l.gifts[2].rect.center().y > l.gifts[0].rect.center().y);
        assert_eq!(l.gifts[1].rotate_deg, 5.5);
    }

    #[test]
    fn gift_count_follows_photos() {
        assert!(wide(0).gifts.is_empty());
        assert_eq!(wide(2).gifts.len(), 2);
        assert_eq!(wide(9).gifts.len(), 4);
    }

    // ── compact ───────────────────────────────────────────────────────────

    #[test]
    fn compact_layout_stacks_and_scrolls() {
        let l = compact(4);
        assert!(l.compact);
        assert!(l.gifts.iter().all(|g| g.rect.origin.y > l.letter_open.max().y));
        assert_eq!(l.gifts[0].rect.origin.y, l.gifts[1].rect.origin.y);
        assert!(l.gifts[2].rect.origin.y > l.gifts[0].rect.max().y);
        assert!(l.max_scroll() > 0.0);
    }

    #[test]
    fn compact_without_photos_does_not_scroll() {
        assert_eq!(compact(0).max_scroll(), 0.0);
    }

    // ── letter ────────────────────────────────────────────────────────────

    #[test]
    fn letter_moves_in_front_after_rising() {
        let l = wide(0);
        let (start, front) = l.letter_at(0.0);
        assert!(!front);
        assert!(start.origin.y > l.envelope.origin.y);
        assert_eq!(l.letter_at(1.0), (l.letter_open, true));
    }

    // ── hit testing ───────────────────────────────────────────────────────

    #[test]
    fn rotated_slot_hit_test() {
        let slot = GiftSlot { rect: Rect::new(0.0, 0.0, 100.0, 20.0), rotate_deg: 90.0 };
        // Rotated a quarter turn the slot stands upright around (50, 10).
        assert!(slot.contains(Vec2::new(50.0, 50.0)));
        assert!(!slot.contains(Vec2::new(95.0, 10.0)));
    }

    #[test]
    fn lightbox_image_keeps_aspect() {
        let lb = LightboxLayout::compute(Viewport::new(1000.0, 800.0), 2.0);
        assert!((lb.image.size.x / lb.image.size.y - 2.0).abs() < 1e-4);
        assert!(lb.close.max().x <= 1000.0);
    }
}
