use core::ops::Mul;

use super::Vec2;

/// Row-major 3×3 projective transform over logical pixels.
///
/// Points are treated as column vectors `(x, y, 1)`; `a * b` applies `b` first.
/// Affine transforms keep the last row at `(0, 0, 1)`; the perspective tilt
/// writes into it, which is why mapping a point can fail (see [`Mat3::map_point`]).
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Mat3 {
    pub rows: [[f32; 3]; 3],
}

impl Mat3 {
    pub const IDENTITY: Mat3 = Mat3::from_rows([1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]);

    #[inline]
    pub const fn from_rows(r0: [f32; 3], r1: [f32; 3], r2: [f32; 3]) -> Self {
        Self { rows: [r0, r1, r2] }
    }

    #[inline]
    pub const fn translate(tx: f32, ty: f32) -> Self {
        Self::from_rows([1.0, 0.0, tx], [0.0, 1.0, ty], [0.0, 0.0, 1.0])
    }

    #[inline]
    pub const fn scale(sx: f32, sy: f32) -> Self {
        Self::from_rows([sx, 0.0, 0.0], [0.0, sy, 0.0], [0.0, 0.0, 1.0])
    }

    /// In-plane rotation; positive angles turn clockwise on screen.
    #[inline]
    pub fn rotate(radians: f32) -> Self {
        let (s, c) = radians.sin_cos();
        Self::from_rows([c, -s, 0.0], [s, c, 0.0], [0.0, 0.0, 1.0])
    }

    /// `self` applied around `pivot` instead of the origin.
    #[inline]
    pub fn about(self, pivot: Vec2) -> Self {
        Mat3::translate(pivot.x, pivot.y) * self * Mat3::translate(-pivot.x, -pivot.y)
    }

    #[inline]
    pub fn is_identity(&self) -> bool {
        *self == Mat3::IDENTITY
    }

    /// Maps a point, dividing by the homogeneous coordinate.
    ///
    /// Returns `None` when the point lands on or behind the eye plane.
    pub fn map_point(&self, p: Vec2) -> Option<Vec2> {
        let [r0, r1, r2] = self.rows;
        let w = r2[0] * p.x + r2[1] * p.y + r2[2];
        if w <= 1e-6 {
            return None;
        }
        let x = r0[0] * p.x + r0[1] * p.y + r0[2];
        let y = r1[0] * p.x + r1[1] * p.y + r1[2];
        Some(Vec2::new(x / w, y / w))
    }

    pub fn determinant(&self) -> f32 {
        let m = &self.rows;
        m[0][0] * (m[1][1] * m[2][2] - m[1][2] * m[2][1])
            - m[0][1] * (m[1][0] * m[2][2] - m[1][2] * m[2][0])
            + m[0][2] * (m[1][0] * m[2][1] - m[1][1] * m[2][0])
    }

    /// Inverse via the adjugate; `None` for singular matrices.
    pub fn inverse(&self) -> Option<Mat3> {
        let det = self.determinant();
        if det.abs() <= f32::EPSILON || !det.is_finite() {
            return None;
        }
        let m = &self.rows;
        let inv = 1.0 / det;
        Some(Mat3::from_rows(
            [
                (m[1][1] * m[2][2] - m[1][2] * m[2][1]) * inv,
                (m[0][2] * m[2][1] - m[0][1] * m[2][2]) * inv,
                (m[0][1] * m[1][2] - m[0][2] * m[1][1]) * inv,
            ],
            [
                (m[1][2] * m[2][0] - m[1][0] * m[2][2]) * inv,
                (m[0][0] * m[2][2] - m[0][2] * m[2][0]) * inv,
                (m[0][2] * m[1][0] - m[0][0] * m[1][2]) * inv,
            ],
            [
                (m[1][0] * m[2][1] - m[1][1] * m[2][0]) * inv,
                (m[0][1] * m[2][0] - m[0][0] * m[2][1]) * inv,
                (m[0][0] * m[1][1] - m[0][1] * m[1][0]) * inv,
            ],
        ))
    }
}

impl Default for Mat3 {
    fn default() -> Self {
        Mat3::IDENTITY
    }
}

impl Mul for Mat3 {
    type Output = Mat3;

    fn mul(self, rhs: Mat3) -> Mat3 {
        let a = &self.rows;
        let b = &rhs.rows;
        let mut out = [[0.0f32; 3]; 3];
        for (i, row) in out.iter_mut().enumerate() {
            for (j, cell) in row.iter_mut().enumerate() {
                *cell = a[i][0] * b[0][j] + a[i][1] * b[1][j] + a[i][2] * b[2][j];
            }
        }
        Mat3 { rows: out }
    }
}

/// Card-style 3D tilt flattened onto the screen plane.
///
/// Equivalent to `perspective(d) rotateX(rx) rotateY(ry) translate(t) scale(s)`
/// applied to a planar layer (z = 0) with its origin at the layer center.
/// Positive `rotate_x_deg` pushes the top edge away from the viewer, positive
/// `rotate_y_deg` pushes the right edge away.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PerspectiveTilt {
    pub perspective: f32,
    pub rotate_x_deg: f32,
    pub rotate_y_deg: f32,
    pub translate: Vec2,
    pub scale: f32,
}

impl PerspectiveTilt {
    pub const FLAT: PerspectiveTilt = PerspectiveTilt {
        perspective: 900.0,
        rotate_x_deg: 0.0,
        rotate_y_deg: 0.0,
        translate: Vec2::zero(),
        scale: 1.0,
    };

    /// Builds the projective matrix with the layer center at `origin`.
    pub fn to_matrix(self, origin: Vec2) -> Mat3 {
        let (sx, cx) = self.rotate_x_deg.to_radians().sin_cos();
        let (sy, cy) = self.rotate_y_deg.to_radians().sin_cos();
        let d = self.perspective.max(1.0);

        // Columns 0/1 of Rx·Ry, with the z row folded into w = 1 - z/d.
        let projected = Mat3::from_rows(
            [cy, 0.0, 0.0],
            [sx * sy, cx, 0.0],
            [cx * sy / d, -sx / d, 1.0],
        );
        let placed = Mat3::from_rows(
            [self.scale, 0.0, self.translate.x],
            [0.0, self.scale, self.translate.y],
            [0.0, 0.0, 1.0],
        );
        (projected * placed).about(origin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: Vec2, b: Vec2) -> bool {
        (a.x - b.x).abs() < 1e-3 && (a.y - b.y).abs() < 1e-3
    }

    fn map(m: &Mat3, x: f32, y: f32) -> Vec2 {
        m.map_point(Vec2::new(x, y)).unwrap()
    }

    // ── composition ───────────────────────────────────────────────────────

    #[test]
    fn product_applies_right_operand_first() {
        let m = Mat3::translate(10.0, 0.0) * Mat3::scale(2.0, 2.0);
        assert!(close(map(&m, 1.0, 1.0), Vec2::new(12.0, 2.0)));
    }

    #[test]
    fn rotate_quarter_turn_is_clockwise_on_screen() {
        let m = Mat3::rotate(core::f32::consts::FRAC_PI_2);
        // +X maps to +Y (down) in a y-down space.
        assert!(close(map(&m, 1.0, 0.0), Vec2::new(0.0, 1.0)));
    }

    #[test]
    fn about_keeps_pivot_fixed() {
        let pivot = Vec2::new(40.0, 25.0);
        let m = Mat3::rotate(0.7).about(pivot);
        assert!(close(map(&m, pivot.x, pivot.y), pivot));
    }

    // ── inverse ───────────────────────────────────────────────────────────

    #[test]
    fn inverse_undoes_projective_tilt() {
        let tilt = PerspectiveTilt {
            rotate_x_deg: 8.0,
            rotate_y_deg: -6.0,
            translate: Vec2::new(3.0, -2.0),
            scale: 1.01,
            ..PerspectiveTilt::FLAT
        };
        let m = Mat3::translate(400.0, 300.0) * tilt.to_matrix(Vec2::zero());
        let inv = m.inverse().unwrap();
        for p in [Vec2::new(-120.0, -80.0), Vec2::new(90.0, 60.0), Vec2::zero()] {
            let screen = m.map_point(p).unwrap();
            assert!(close(inv.map_point(screen).unwrap(), p));
        }
    }

    #[test]
    fn singular_matrix_has_no_inverse() {
        assert!(Mat3::scale(0.0, 1.0).inverse().is_none());
    }

    #[test]
    fn point_behind_eye_plane_is_rejected() {
        let m = Mat3::from_rows([1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, -1.0]);
        assert!(m.map_point(Vec2::new(1.0, 1.0)).is_none());
    }

    // ── perspective tilt ──────────────────────────────────────────────────

    #[test]
    fn flat_tilt_is_identity() {
        let m = PerspectiveTilt::FLAT.to_matrix(Vec2::new(200.0, 100.0));
        assert!(close(map(&m, 13.0, 77.0), Vec2::new(13.0, 77.0)));
    }

    #[test]
    fn positive_rotate_x_shrinks_top_edge() {
        let tilt = PerspectiveTilt { rotate_x_deg: 10.0, ..PerspectiveTilt::FLAT };
        let m = tilt.to_matrix(Vec2::zero());
        let top = map(&m, 100.0, -100.0).x - map(&m, -100.0, -100.0).x;
        let bottom = map(&m, 100.0, 100.0).x - map(&m, -100.0, 100.0).x;
        assert!(top < 200.0);
        assert!(bottom > 200.0);
    }

    #[test]
    fn positive_rotate_y_shrinks_right_edge() {
        let tilt = PerspectiveTilt { rotate_y_deg: 10.0, ..PerspectiveTilt::FLAT };
        let m = tilt.to_matrix(Vec2::zero());
        let left = map(&m, -100.0, 100.0).y - map(&m, -100.0, -100.0).y;
        let right = map(&m, 100.0, 100.0).y - map(&m, 100.0, -100.0).y;
        assert!(right < left);
    }

    #[test]
    fn scale_and_translate_apply_before_projection() {
        let tilt = PerspectiveTilt {
            translate: Vec2::new(5.0, -5.0),
            scale: 2.0,
            ..PerspectiveTilt::FLAT
        };
        let m = tilt.to_matrix(Vec2::new(100.0, 100.0));
        assert!(close(map(&m, 110.0, 100.0), Vec2::new(125.0, 95.0)));
    }
}
