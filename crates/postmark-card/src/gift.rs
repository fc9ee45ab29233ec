//! Per-photo gift boxes: wrapped present → unwrapped photo → enlarged view.

use std::f32::consts::TAU;

/// Wrap state of one photo. Only ever moves from `Wrapped` to `Unwrapped`.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub enum GiftWrapState {
    #[default]
    Wrapped,
    Unwrapped,
}

// ── presets ───────────────────────────────────────────────────────────────

#[derive(Debug, Copy, Clone, PartialEq)]
pub enum VerticalAnchor {
    /// Offset of the gift's top edge from the envelope's top edge.
    Top(f32),
    /// Offset of the gift's bottom edge from the envelope's bottom edge.
    Bottom(f32),
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub enum HorizontalAnchor {
    Left(f32),
    Right(f32),
}

/// Fixed placement of the gift at one photo position.
///
/// Offsets are fractions of the envelope size; negative values push the gift
/// outside the envelope.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PhotoPreset {
    pub vertical: VerticalAnchor,
    pub horizontal: HorizontalAnchor,
    pub rotate_deg: f32,
    /// Seconds after the letter opens before the gift appears.
    pub delay: f32,
}

pub const PHOTO_PRESETS: [PhotoPreset; 4] = [
    PhotoPreset {
        vertical: VerticalAnchor::Top(-0.08),
        horizontal: HorizontalAnchor::Left(-0.58),
        rotate_deg: -8.0,
        delay: 0.9,
    },
    PhotoPreset {
        vertical: VerticalAnchor::Top(-0.04),
        horizontal: HorizontalAnchor::Right(-0.58),
        rotate_deg: 5.5,
        delay: 1.1,
    },
    PhotoPreset {
        vertical: VerticalAnchor::Bottom(-0.06),
        horizontal: HorizontalAnchor::Left(-0.52),
        rotate_deg: -3.0,
        delay: 1.3,
    },
    PhotoPreset {
        vertical: VerticalAnchor::Bottom(-0.06),
        horizontal: HorizontalAnchor::Right(-0.52),
        rotate_deg: 6.0,
        delay: 1.5,
    },
];

/// Present box colors; repeats every four photos.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct PresentTheme {
    pub body: [u8; 3],
    pub shade: [u8; 3],
    pub ribbon: [u8; 3],
}

pub const PRESENT_THEMES: [PresentTheme; 4] = [
    PresentTheme { body: [0xe7, 0x4c, 0x6f], shade: [0xc4, 0x35, 0x58], ribbon: [0xff, 0xd7, 0x00] },
    PresentTheme { body: [0x4e, 0xcd, 0xc4], shade: [0x38, 0xb2, 0xa9], ribbon: [0xff, 0x6b, 0x6b] },
    PresentTheme { body: [0x7c, 0x5c, 0xbf], shade: [0x63, 0x44, 0xa3], ribbon: [0xff, 0xd7, 0x00] },
    PresentTheme { body: [0xe8, 0xa8, 0x38], shade: [0xc9, 0x8b, 0x20], ribbon: [0xff, 0x6b, 0x6b] },
];

// ── float motion ──────────────────────────────────────────────────────────

/// Vertical bob of a gift, drawn once per mount.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FloatMotion {
    /// Seconds per bob, 3.0–5.0.
    pub duration: f32,
    /// Phase delay, −5.0–0.
    pub delay: f32,
}

impl FloatMotion {
    /// Peak vertical travel in logical pixels.
    pub const AMPLITUDE: f32 = 8.0;

    pub fn generate(rng: &mut fastrand::Rng) -> Self {
        let duration = 3.0 + rng.f32() * 2.0;
        let delay = rng.f32() * -5.0;
        Self {
            duration: (duration * 10.0).round() / 10.0,
            delay: (delay * 10.0).round() / 10.0,
        }
    }

    /// Vertical offset at scene time `t`; negative is up.
    pub fn offset(&self, t: f32) -> f32 {
        let phase = (t - self.delay) / self.duration;
        -Self::AMPLITUDE * 0.5 * (1.0 - (phase * TAU).cos())
    }
}

// ── GiftBox ───────────────────────────────────────────────────────────────

/// Result of clicking a gift.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum GiftClick {
    /// Letter not open yet.
    Ignored,
    /// The present opened and the photo is now visible.
    Unwrapped,
    /// The photo was already visible; show it enlarged.
    Enlarge { url: String, label: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct GiftBox {
    index: usize,
    url: String,
    state: GiftWrapState,
    unwrapped_at: Option<f32>,
    float: FloatMotion,
}

impl GiftBox {
    pub fn new(index: usize, url: impl Into<String>, unwrapped: bool, rng: &mut fastrand::Rng) -> Self {
        Self {
            index,
            url: url.into(),
            state: if unwrapped { GiftWrapState::Unwrapped } else { GiftWrapState::Wrapped },
            unwrapped_at: None,
            float: FloatMotion::generate(rng),
        }
    }

    #[inline]
    pub fn index(&self) -> usize {
        self.index
    }

    #[inline]
    pub fn url(&self) -> &str {
        &self.url
    }

    #[inline]
    pub fn state(&self) -> GiftWrapState {
        self.state
    }

    #[inline]
    pub fn float(&self) -> FloatMotion {
        self.float
    }

    /// Placement preset; positions past the table reuse the last entry.
    pub fn preset(&self) -> &'static PhotoPreset {
        &PHOTO_PRESETS[self.index.min(PHOTO_PRESETS.len() - 1)]
    }

    pub fn theme(&self) -> &'static PresentTheme {
        &PRESENT_THEMES[self.index % PRESENT_THEMES.len()]
    }

    /// Accessible name, 1-based.
    pub fn label(&self) -> String {
        format!("Photo {}", self.index + 1)
    }

    /// Seconds since the unwrap click, infinite if it started unwrapped.
    pub fn time_since_unwrap(&self, now: f32) -> f32 {
        match self.unwrapped_at {
            Some(at) => (now - at).max(0.0),
            None => f32::INFINITY,
        }
    }

    pub fn click(&mut self, letter_open: bool, now: f32) -> GiftClick {
        if !letter_open {
            return GiftClick::Ignored;
        }
        match self.state {
            GiftWrapState::Wrapped => {
                self.state = GiftWrapState::Unwrapped;
                self.unwrapped_at = Some(now);
                log::info!("gift {} unwrapped", self.index + 1);
                GiftClick::Unwrapped
            }
            GiftWrapState::Unwrapped => GiftClick::Enlarge { url: self.url.clone(), label: self.label() },
        }
    }
}

// ── GiftShelf ─────────────────────────────────────────────────────────────

/// All gifts of one scene, in photo order.
#[derive(Debug, Clone, PartialEq)]
pub struct GiftShelf {
    gifts: Vec<GiftBox>,
}

impl GiftShelf {
    /// `None` when there are no photos: the gift subsystem does not exist then.
    pub fn new(photos: &[String], unwrapped: bool, rng: &mut fastrand::Rng) -> Option<Self> {
        if photos.is_empty() {
            return None;
        }
        let gifts = photos
            .iter()
            .enumerate()
            .map(|(i, url)| GiftBox::new(i, url.as_str(), unwrapped, rng))
            .collect();
        Some(Self { gifts })
    }

    #[inline]
    pub fn gifts(&self) -> &[GiftBox] {
        &self.gifts
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.gifts.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.gifts.is_empty()
    }

    pub fn states(&self) -> Vec<GiftWrapState> {
        self.gifts.iter().map(GiftBox::state).collect()
    }

    pub fn click(&mut self, index: usize, letter_open: bool, now: f32) -> GiftClick {
        match self.gifts.get_mut(index) {
            Some(gift) => gift.click(letter_open, now),
            None => GiftClick::Ignored,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rng() -> fastrand::Rng {
        fastrand::Rng::with_seed(42)
    }

    fn urls(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("photo{i}.png")).collect()
    }

    // ── click contract ────────────────────────────────────────────────────

    #[test]
    fn click_before_open_is_ignored() {
        let mut gift = GiftBox::new(0, "a.png", false, &mut rng());
        for _ in 0..3 {
            assert_eq!(gift.click(false, 0.0), GiftClick::Ignored);
        }
        assert_eq!(gift.state(), GiftWrapState::Wrapped);
    }

    #[test]
    fn first_click_unwraps_then_enlarges() {
        let mut gift = GiftBox::new(2, "c.png", false, &mut rng());
        assert_eq!(gift.click(true, 1.0), GiftClick::Unwrapped);
        assert_eq!(gift.state(), GiftWrapState::Unwrapped);
        assert_eq!(
            gift.click(true, 2.0),
            GiftClick::Enlarge { url: "c.png".into(), label: "Photo 3".into() }
        );
        assert_eq!(gift.state(), GiftWrapState::Unwrapped);
        assert_eq!(gift.time_since_unwrap(1.5), 0.5);
    }

    #[test]
    fn preview_gifts_start_unwrapped() {
        let mut gift = GiftBox::new(0, "a.png", true, &mut rng());
        assert_eq!(gift.state(), GiftWrapState::Unwrapped);
        assert_eq!(gift.time_since_unwrap(0.0), f32::INFINITY);
        assert!(matches!(gift.click(true, 0.0), GiftClick::Enlarge { .. }));
    }

    #[test]
    fn gifts_are_independent() {
        let mut shelf = GiftShelf::new(&urls(3), false, &mut rng()).unwrap();
        shelf.click(1, true, 0.0);
        assert_eq!(
            shelf.states(),
            vec![GiftWrapState::Wrapped, GiftWrapState::Unwrapped, GiftWrapState::Wrapped]
        );
        assert_eq!(shelf.click(7, true, 0.0), GiftClick::Ignored);
    }

    #[test]
    fn empty_photo_list_builds_no_shelf() {
        assert!(GiftShelf::new(&[], false, &mut rng()).is_none());
    }

    // ── deterministic tables ──────────────────────────────────────────────

    #[test]
    fn presets_and_themes_follow_position() {
        let shelf = GiftShelf::new(&urls(4), false, &mut rng()).unwrap();
        let delays: Vec<f32> = shelf.gifts().iter().map(|g| g.preset().delay).collect();
        assert_eq!(delays, vec![0.9, 1.1, 1.3, 1.5]);
        assert_eq!(shelf.gifts()[1].theme().body, [0x4e, 0xcd, 0xc4]);
        assert_eq!(shelf.gifts()[3].preset().rotate_deg, 6.0);
    }

    // ── float motion ──────────────────────────────────────────────────────

    #[test]
    fn float_params_stay_in_range() {
        let mut rng = fastrand::Rng::with_seed(3);
        for _ in 0..200 {
            let f = FloatMotion::generate(&mut rng);
            assert!((3.0..=5.0).contains(&f.duration));
            assert!((-5.0..=0.0).contains(&f.delay));
        }
    }

    #[test]
    fn float_params_are_frozen_per_gift() {
        let mut gift = GiftBox::new(0, "a.png", false, &mut rng());
        let before = gift.float();
        gift.click(true, 0.0);
        gift.click(true, 1.0);
        assert_eq!(gift.float(), before);
    }

    #[test]
    fn float_offset_stays_within_amplitude() {
        let f = FloatMotion { duration: 4.0, delay: -1.0 };
        for i in 0..40 {
            let y = f.offset(i as f32 * 0.1);
            assert!(y <= 0.0 && y >= -FloatMotion::AMPLITUDE);
        }
    }
}
