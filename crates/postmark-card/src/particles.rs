//! Ambient background particles (confetti, hearts, snowflakes).
//!
//! A [`ParticleField`] is generated once when a scene mounts and is never
//! regenerated: all per-instance randomness is frozen into the instances and
//! each frame only evaluates [`ParticleInstance::pose`] at the scene time.

use std::f32::consts::TAU;

use postmark_engine::coords::{Vec2, Viewport};

use crate::card::AnimationKind;

pub const CONFETTI_COLORS: [[u8; 3]; 5] = [
    [0xff, 0x6b, 0x6b],
    [0xff, 0xd7, 0x00],
    [0x4e, 0xcd, 0xc4],
    [0x7c, 0x5c, 0xbf],
    [0xe7, 0x4c, 0x6f],
];

pub const HEART_GLYPHS: [char; 1] = ['♥'];
pub const SNOWFLAKE_GLYPHS: [char; 5] = ['❄', '❅', '❆', '·', '•'];

/// Rectangles are drawn this much narrower than tall.
pub const CONFETTI_STRIP_ASPECT: f32 = 0.4;

/// Distance above the top edge (or below the bottom edge) particles spawn at.
const OFFSCREEN_MARGIN: f32 = 30.0;

// ── per-kind tables ───────────────────────────────────────────────────────

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct KindProfile {
    pub count: usize,
    /// The first `leading` instances start mid-animation (negative delay).
    pub leading: usize,
    pub size: (f32, f32),
    pub duration: (f32, f32),
    /// Positive delays are drawn from `0..max_delay`.
    pub max_delay: f32,
    /// Sway is drawn from `-sway..sway`.
    pub sway: f32,
}

impl KindProfile {
    pub fn for_kind(kind: AnimationKind) -> Option<KindProfile> {
        let profile = match kind {
            AnimationKind::None => return None,
            AnimationKind::Confetti => KindProfile {
                count: 55,
                leading: 22,
                size: (8.0, 24.0),
                duration: (4.0, 12.0),
                max_delay: 8.0,
                sway: 30.0,
            },
            AnimationKind::Hearts => KindProfile {
                count: 40,
                leading: 15,
                size: (14.0, 48.0),
                duration: (6.0, 15.0),
                max_delay: 8.0,
                sway: 30.0,
            },
            AnimationKind::Snowflakes => KindProfile {
                count: 50,
                leading: 20,
                size: (10.0, 38.0),
                duration: (6.0, 14.0),
                max_delay: 8.0,
                sway: 25.0,
            },
        };
        Some(profile)
    }
}

// ── instances ─────────────────────────────────────────────────────────────

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ConfettiShape {
    Rectangle,
    Circle,
}

/// Kind-specific appearance of one particle.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum ParticleLook {
    Confetti { color: [u8; 3], shape: ConfettiShape },
    Heart { glyph: char },
    Snowflake { glyph: char },
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ParticleInstance {
    /// Horizontal start as a fraction of the viewport width.
    pub left: f32,
    pub size: f32,
    /// Seconds per cycle.
    pub duration: f32,
    /// Seconds before the first cycle starts; negative means already running.
    pub delay: f32,
    /// Peak lateral drift in logical pixels.
    pub sway: f32,
    /// Degrees.
    pub rotation: f32,
    pub look: ParticleLook,
}

/// Where to draw a particle at a given instant.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ParticlePose {
    pub center: Vec2,
    /// Drawn box (confetti strips are narrower than `size`).
    pub extent: Vec2,
    pub rotation_rad: f32,
    pub opacity: f32,
}

fn draw(rng: &mut fastrand::Rng, (lo, hi): (f32, f32)) -> f32 {
    lo + rng.f32() * (hi - lo)
}

fn tenths(v: f32) -> f32 {
    (v * 10.0).round() / 10.0
}

impl ParticleInstance {
    fn generate(kind: AnimationKind, profile: &KindProfile, index: usize, rng: &mut fastrand::Rng) -> Self {
        let size = draw(rng, profile.size);
        let duration = draw(rng, profile.duration);
        let delay = if index < profile.leading {
            -(rng.f32() * duration)
        } else {
            rng.f32() * profile.max_delay
        };
        let sway = draw(rng, (-profile.sway, profile.sway)).round();

        let (rotation, look) = match kind {
            AnimationKind::Confetti => {
                let rotation = (rng.f32() * 360.0).round();
                let color = CONFETTI_COLORS[rng.usize(..CONFETTI_COLORS.len())];
                let shape = if rng.bool() { ConfettiShape::Rectangle } else { ConfettiShape::Circle };
                (rotation, ParticleLook::Confetti { color, shape })
            }
            AnimationKind::Hearts => {
                let rotation = draw(rng, (-20.0, 20.0)).round();
                let glyph = HEART_GLYPHS[rng.usize(..HEART_GLYPHS.len())];
                (rotation, ParticleLook::Heart { glyph })
            }
            _ => {
                let glyph = SNOWFLAKE_GLYPHS[rng.usize(..SNOWFLAKE_GLYPHS.len())];
                (0.0, ParticleLook::Snowflake { glyph })
            }
        };

        Self {
            left: rng.f32(),
            size,
            duration: tenths(duration),
            delay: tenths(delay),
            sway,
            rotation,
            look,
        }
    }

    /// Pose at scene time `t`, or `None` while the first cycle has not started.
    pub fn pose(&self, t: f32, viewport: Viewport) -> Option<ParticlePose> {
        let local = t - self.delay;
        if local < 0.0 || self.duration <= 0.0 {
            return None;
        }
        let phase = local.rem_euclid(self.duration) / self.duration;
        let x = self.left * viewport.width + self.sway * (phase * TAU).sin();

        let pose = match self.look {
            ParticleLook::Confetti { shape, .. } => {
                let travel = viewport.height + 2.0 * OFFSCREEN_MARGIN;
                let width = match shape {
                    ConfettiShape::Rectangle => self.size * CONFETTI_STRIP_ASPECT,
                    ConfettiShape::Circle => self.size,
                };
                ParticlePose {
                    center: Vec2::new(x, -OFFSCREEN_MARGIN + phase * travel),
                    extent: Vec2::new(width, self.size),
                    rotation_rad: (self.rotation + 360.0 * phase).to_radians(),
                    opacity: 1.0,
                }
            }
            ParticleLook::Heart { .. } => {
                let start = viewport.height + self.size + 10.0;
                let end = -(self.size + 10.0);
                ParticlePose {
                    center: Vec2::new(x, start + (end - start) * phase),
                    extent: Vec2::new(self.size, self.size),
                    rotation_rad: self.rotation.to_radians(),
                    // Fade out over the last stretch of the climb.
                    opacity: ((1.0 - phase) / 0.2).clamp(0.0, 1.0) * 0.85,
                }
            }
            ParticleLook::Snowflake { .. } => {
                let travel = viewport.height + 2.0 * OFFSCREEN_MARGIN;
                ParticlePose {
                    center: Vec2::new(x, -OFFSCREEN_MARGIN + phase * travel),
                    extent: Vec2::new(self.size, self.size),
                    rotation_rad: 0.0,
                    opacity: 0.9,
                }
            }
        };
        Some(pose)
    }
}

// ── ParticleField ─────────────────────────────────────────────────────────

/// The frozen particle set of one mount.
#[derive(Debug, Clone, PartialEq)]
pub struct ParticleField {
    kind: AnimationKind,
    instances: Vec<ParticleInstance>,
}

impl ParticleField {
    /// Draws every instance for `kind`. [`AnimationKind::None`] yields an empty field.
    pub fn generate(kind: AnimationKind, rng: &mut fastrand::Rng) -> Self {
        let instances = match KindProfile::for_kind(kind) {
            Some(profile) => (0..profile.count)
                .map(|i| ParticleInstance::generate(kind, &profile, i, rng))
                .collect(),
            None => Vec::new(),
        };
        log::debug!("generated {} {} particles", instances.len(), kind.as_str());
        Self { kind, instances }
    }

    #[inline]
    pub fn kind(&self) -> AnimationKind {
        self.kind
    }

    #[inline]
    pub fn instances(&self) -> &[ParticleInstance] {
        &self.instances
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.instances.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field(kind: AnimationKind, seed: u64) -> ParticleField {
        ParticleField::generate(kind, &mut fastrand::Rng::with_seed(seed))
    }

    // ── counts ────────────────────────────────────────────────────────────

    #[test]
    fn counts_per_kind() {
        assert_eq!(field(AnimationKind::Confetti, 1).len(), 55);
        assert_eq!(field(AnimationKind::Hearts, 1).len(), 40);
        assert_eq!(field(AnimationKind::Snowflakes, 1).len(), 50);
        assert!(field(AnimationKind::None, 1).is_empty());
    }

    // ── ranges ────────────────────────────────────────────────────────────

    fn check_ranges(kind: AnimationKind) {
        let profile = KindProfile::for_kind(kind).unwrap();
        for seed in 0..20 {
            let f = field(kind, seed);
            for (i, p) in f.instances().iter().enumerate() {
                assert!((0.0..1.0).contains(&p.left));
                assert!(p.size >= profile.size.0 && p.size <= profile.size.1);
                assert!(p.duration >= profile.duration.0 && p.duration <= profile.duration.1);
                assert!(p.sway.abs() <= profile.sway);
                if i < profile.leading {
                    assert!(p.delay <= 0.0 && p.delay >= -p.duration, "leading delay {}", p.delay);
                } else {
                    assert!(p.delay >= 0.0 && p.delay <= profile.max_delay);
                }
            }
        }
    }

    #[test]
    fn confetti_ranges() {
        check_ranges(AnimationKind::Confetti);
    }

    #[test]
    fn heart_ranges() {
        check_ranges(AnimationKind::Hearts);
        for p in field(AnimationKind::Hearts, 3).instances() {
            assert!(p.rotation >= -20.0 && p.rotation <= 20.0);
            assert_eq!(p.look, ParticleLook::Heart { glyph: '♥' });
        }
    }

    #[test]
    fn snowflake_ranges() {
        check_ranges(AnimationKind::Snowflakes);
        for p in field(AnimationKind::Snowflakes, 4).instances() {
            let ParticleLook::Snowflake { glyph } = p.look else { panic!("wrong look") };
            assert!(SNOWFLAKE_GLYPHS.contains(&glyph));
        }
    }

    #[test]
    fn confetti_extras_come_from_tables() {
        let f = field(AnimationKind::Confetti, 9);
        let mut shapes = (false, false);
        for p in f.instances() {
            assert!(p.rotation >= 0.0 && p.rotation <= 360.0);
            let ParticleLook::Confetti { color, shape } = p.look else { panic!("wrong look") };
            assert!(CONFETTI_COLORS.contains(&color));
            match shape {
                ConfettiShape::Rectangle => shapes.0 = true,
                ConfettiShape::Circle => shapes.1 = true,
            }
        }
        assert_eq!(shapes, (true, true));
    }

    #[test]
    fn timing_is_rounded_to_tenths() {
        for p in field(AnimationKind::Confetti, 5).instances() {
            assert!(((p.duration * 10.0) - (p.duration * 10.0).round()).abs() < 1e-3);
            assert!(((p.delay * 10.0) - (p.delay * 10.0).round()).abs() < 1e-3);
        }
    }

    // ── stability ─────────────────────────────────────────────────────────

    #[test]
    fn fresh_generation_differs() {
        assert_ne!(field(AnimationKind::Hearts, 1), field(AnimationKind::Hearts, 2));
    }

    #[test]
    fn same_seed_reproduces_the_field() {
        assert_eq!(field(AnimationKind::Snowflakes, 8), field(AnimationKind::Snowflakes, 8));
    }

    // ── poses ─────────────────────────────────────────────────────────────

    fn confetti(delay: f32) -> ParticleInstance {
        ParticleInstance {
            left: 0.5,
            size: 20.0,
            duration: 10.0,
            delay,
            sway: 0.0,
            rotation: 0.0,
            look: ParticleLook::Confetti { color: CONFETTI_COLORS[0], shape: ConfettiShape::Rectangle },
        }
    }

    #[test]
    fn hidden_until_delay_elapses() {
        let vp = Viewport::new(400.0, 600.0);
        assert!(confetti(2.0).pose(1.0, vp).is_none());
        assert!(confetti(2.0).pose(2.0, vp).is_some());
    }

    #[test]
    fn negative_delay_starts_mid_fall() {
        let vp = Viewport::new(400.0, 600.0);
        let pose = confetti(-5.0).pose(0.0, vp).unwrap();
        assert!((pose.center.y - 300.0).abs() < 1e-3);
        assert_eq!(pose.extent, Vec2::new(8.0, 20.0));
        assert!((pose.rotation_rad - std::f32::consts::PI).abs() < 1e-4);
    }

    #[test]
    fn hearts_rise() {
        let vp = Viewport::new(400.0, 600.0);
        let heart = ParticleInstance {
            look: ParticleLook::Heart { glyph: '♥' },
            ..confetti(0.0)
        };
        let early = heart.pose(0.1, vp).unwrap();
        let late = heart.pose(5.0, vp).unwrap();
        assert!(late.center.y < early.center.y);
        assert!(early.center.y > vp.height);
    }
}
