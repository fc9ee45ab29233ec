//! Pointer-driven card tilt with exponential smoothing and a breathing scale.
//!
//! Pointer events only write the four targets; [`TiltPhysics::step`] runs once
//! per frame and moves the current values toward them, so the rendered
//! transform is decoupled from the pointer event rate.

use std::f32::consts::TAU;

use postmark_engine::coords::{PerspectiveTilt, Vec2, Viewport};

/// Tuning for the tilt simulation.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct TiltConfig {
    /// Fraction of the remaining distance covered per frame, in (0, 1).
    pub ease: f32,
    /// Degrees at the viewport edge.
    pub max_rotate: f32,
    /// Logical pixels at the viewport edge.
    pub max_translate: f32,
    /// Perspective distance in logical pixels.
    pub perspective: f32,
    pub breathe_amplitude: f32,
    pub breathe_period: f32,
}

impl Default for TiltConfig {
    fn default() -> Self {
        Self {
            ease: 0.07,
            max_rotate: 10.0,
            max_translate: 5.0,
            perspective: 900.0,
            breathe_amplitude: 0.012,
            breathe_period: 4.0,
        }
    }
}

/// The four simulated axes.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct TiltAxes {
    pub rotate_x: f32,
    pub rotate_y: f32,
    pub translate_x: f32,
    pub translate_y: f32,
}

impl TiltAxes {
    pub const ZERO: TiltAxes = TiltAxes { rotate_x: 0.0, rotate_y: 0.0, translate_x: 0.0, translate_y: 0.0 };

    /// Largest absolute per-axis difference.
    pub fn max_distance(&self, other: &TiltAxes) -> f32 {
        (self.rotate_x - other.rotate_x)
            .abs()
            .max((self.rotate_y - other.rotate_y).abs())
            .max((self.translate_x - other.translate_x).abs())
            .max((self.translate_y - other.translate_y).abs())
    }
}

#[derive(Debug, Clone)]
pub struct TiltPhysics {
    config: TiltConfig,
    target: TiltAxes,
    current: TiltAxes,
    multiplier: f32,
}

impl TiltPhysics {
    pub fn new(config: TiltConfig) -> Self {
        Self { config, target: TiltAxes::ZERO, current: TiltAxes::ZERO, multiplier: 1.0 }
    }

    /// Physics for a scene that mounts already open: pointer input has no effect.
    pub fn settled(config: TiltConfig) -> Self {
        Self { multiplier: 0.0, ..Self::new(config) }
    }

    #[inline]
    pub fn config(&self) -> &TiltConfig {
        &self.config
    }

    #[inline]
    pub fn target(&self) -> TiltAxes {
        self.target
    }

    #[inline]
    pub fn current(&self) -> TiltAxes {
        self.current
    }

    #[inline]
    pub fn multiplier(&self) -> f32 {
        self.multiplier
    }

    /// Sets targets from a pointer position in viewport coordinates.
    pub fn pointer_moved(&mut self, pos: Vec2, viewport: Viewport) {
        if !viewport.is_valid() {
            return;
        }
        let c = viewport.center();
        let nx = (pos.x - c.x) / c.x;
        let ny = (pos.y - c.y) / c.y;
        let m = self.multiplier;
        let cfg = &self.config;

        // Vertical pointer offset tips the card about X, horizontal about Y.
        self.target = TiltAxes {
            rotate_x: -ny * cfg.max_rotate * m,
            rotate_y: nx * cfg.max_rotate * m,
            translate_x: nx * cfg.max_translate * m,
            translate_y: ny * cfg.max_translate * m,
        };
    }

    /// Pointer left the window: return to rest regardless of the multiplier.
    pub fn pointer_left(&mut self) {
        self.target = TiltAxes::ZERO;
    }

    /// Disables pointer tracking for good and sends the card back to rest.
    pub fn settle(&mut self) {
        self.multiplier = 0.0;
        self.target = TiltAxes::ZERO;
    }

    /// Advances all four axes from one target snapshot.
    pub fn step(&mut self) {
        let t = self.target;
        let k = self.config.ease;
        let c = &mut self.current;
        c.rotate_x += (t.rotate_x - c.rotate_x) * k;
        c.rotate_y += (t.rotate_y - c.rotate_y) * k;
        c.translate_x += (t.translate_x - c.translate_x) * k;
        c.translate_y += (t.translate_y - c.translate_y) * k;
    }

    /// Breathing scale at scene time `t`; pinned to 1 once open.
    pub fn breathing_scale(&self, t: f32, open: bool) -> f32 {
        if open {
            return 1.0;
        }
        let cfg = &self.config;
        1.0 + cfg.breathe_amplitude * (t * TAU / cfg.breathe_period).sin()
    }

    /// Composite wrapper transform for the current values.
    pub fn transform(&self, scale: f32) -> PerspectiveTilt {
        PerspectiveTilt {
            perspective: self.config.perspective,
            rotate_x_deg: self.current.rotate_x,
            rotate_y_deg: self.current.rotate_y,
            translate: Vec2::new(self.current.translate_x, self.current.translate_y),
            scale,
        }
    }
}

impl Default for TiltPhysics {
    fn default() -> Self {
        Self::new(TiltConfig::default())
    }
}
