use super::Vec2;

/// Axis-aligned rectangle in logical pixels (top-left origin).
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Rect {
    pub origin: Vec2,
    pub size: Vec2,
}

impl Rect {
    #[inline]
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            origin: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    #[inline]
    pub fn from_center_size(center: Vec2, size: Vec2) -> Self {
        Self {
            origin: Vec2::new(center.x - size.x * 0.5, center.y - size.y * 0.5),
            size,
        }
    }

    #[inline]
    pub fn max(self) -> Vec2 {
        self.origin + self.size
    }

    #[inline]
    pub fn center(self) -> Vec2 {
        self.origin + self.size * 0.5
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.size.x <= 0.0 || self.size.y <= 0.0
    }

    /// Normalizes the rectangle so width/height are non-negative.
    #[inline]
    pub fn normalized(self) -> Self {
        let (x, w) = if self.size.x < 0.0 {
            (self.origin.x + self.size.x, -self.size.x)
        } else {
            (self.origin.x, self.size.x)
        };
        let (y, h) = if self.size.y < 0.0 {
            (self.origin.y + self.size.y, -self.size.y)
        } else {
            (self.origin.y, self.size.y)
        };
        Rect::new(x, y, w, h)
    }

    /// Half-open containment: [min, max).
    #[inline]
    pub fn contains(self, p: Vec2) -> bool {
        let r = self.normalized();
        p.x >= r.origin.x
            && p.y >= r.origin.y
            && p.x < r.origin.x + r.size.x
            && p.y < r.origin.y + r.size.y
    }

    /// Shrinks every edge by `dx` horizontally and `dy` vertically.
    #[inline]
    pub fn inset(self, dx: f32, dy: f32) -> Rect {
        Rect::new(
            self.origin.x + dx,
            self.origin.y + dy,
            (self.size.x - 2.0 * dx).max(0.0),
            (self.size.y - 2.0 * dy).max(0.0),
        )
    }

    #[inline]
    pub fn translated(self, by: Vec2) -> Rect {
        Rect::from_origin_size(self.origin + by, self.size)
    }

    #[inline]
    pub const fn from_origin_size(origin: Vec2, size: Vec2) -> Self {
        Self { origin, size }
    }

    /// Largest rectangle with the given aspect ratio (w / h) centered inside `self`.
    pub fn fit_aspect(self, aspect: f32) -> Rect {
        if !(aspect > 0.0) || self.is_empty() {
            return self;
        }
        let own = self.size.x / self.size.y;
        let size = if aspect > own {
            Vec2::new(self.size.x, self.size.x / aspect)
        } else {
            Vec2::new(self.size.y * aspect, self.size.y)
        };
        Rect::from_center_size(self.center(), size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn r(x: f32, y: f32, w: f32, h: f32) -> Rect { Rect::new(x, y, w, h) }

    // ── normalized ────────────────────────────────────────────────────────

    #[test]
    fn normalized_flips_negative_extents() {
        let n = r(10.0, 10.0, -4.0, -3.0).normalized();
        assert_eq!(n, r(6.0, 7.0, 4.0, 3.0));
    }

    // ── contains ──────────────────────────────────────────────────────────

    #[test]
    fn contains_is_half_open() {
        let rect = r(0.0, 0.0, 10.0, 10.0);
        assert!(rect.contains(Vec2::new(0.0, 0.0)));
        assert!(rect.contains(Vec2::new(9.9, 9.9)));
        assert!(!rect.contains(Vec2::new(10.0, 10.0)));
        assert!(!rect.contains(Vec2::new(-1.0, 5.0)));
    }

    // ── center / inset ────────────────────────────────────────────────────

    #[test]
    fn from_center_size_round_trips_center() {
        let rect = Rect::from_center_size(Vec2::new(50.0, 20.0), Vec2::new(40.0, 10.0));
        assert_eq!(rect.origin, Vec2::new(30.0, 15.0));
        assert_eq!(rect.center(), Vec2::new(50.0, 20.0));
    }

    #[test]
    fn inset_never_goes_negative() {
        let rect = r(0.0, 0.0, 10.0, 10.0).inset(8.0, 2.0);
        assert_eq!(rect.size, Vec2::new(0.0, 6.0));
        assert!(rect.is_empty());
    }

    // ── fit_aspect ────────────────────────────────────────────────────────

    #[test]
    fn fit_aspect_letterboxes_wide_images() {
        let fitted = r(0.0, 0.0, 100.0, 100.0).fit_aspect(2.0);
        assert_eq!(fitted, r(0.0, 25.0, 100.0, 50.0));
    }

    #[test]
    fn fit_aspect_pillarboxes_tall_images() {
        let fitted = r(0.0, 0.0, 100.0, 100.0).fit_aspect(0.5);
        assert_eq!(fitted, r(25.0, 0.0, 50.0, 100.0));
    }

    #[test]
    fn fit_aspect_ignores_degenerate_ratio() {
        let rect = r(0.0, 0.0, 100.0, 50.0);
        assert_eq!(rect.fit_aspect(0.0), rect);
        assert_eq!(rect.fit_aspect(f32::NAN), rect);
    }
}
