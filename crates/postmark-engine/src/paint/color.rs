use std::fmt;

/// Linear premultiplied RGBA color.
///
/// Invariant: `r`, `g`, `b` are already multiplied by `a`.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const TRANSPARENT: Color = Color::from_premul(0.0, 0.0, 0.0, 0.0);
    pub const BLACK: Color = Color::from_premul(0.0, 0.0, 0.0, 1.0);
    pub const WHITE: Color = Color::from_premul(1.0, 1.0, 1.0, 1.0);

    #[inline]
    pub const fn from_premul(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Straight-alpha sRGB bytes, as written in hex literals.
    pub fn from_srgb_u8(r: u8, g: u8, b: u8, a: u8) -> Self {
        let a = a as f32 / 255.0;
        Self {
            r: srgb_to_linear(r) * a,
            g: srgb_to_linear(g) * a,
            b: srgb_to_linear(b) * a,
            a,
        }
    }

    #[inline]
    pub fn from_rgb8([r, g, b]: [u8; 3]) -> Self {
        Self::from_srgb_u8(r, g, b, 255)
    }

    /// Parses `#rgb`, `#rrggbb` or `#rrggbbaa` (leading `#` optional).
    pub fn from_hex(src: &str) -> Result<Self, ColorParseError> {
        let trimmed = src.trim();
        let hex = trimmed.strip_prefix('#').unwrap_or(trimmed);
        if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(ColorParseError::new(src));
        }
        let digit = |i: usize| u8::from_str_radix(&hex[i..i + 1], 16).unwrap_or(0);
        let pair = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).unwrap_or(0);
        match hex.len() {
            3 => Ok(Self::from_srgb_u8(digit(0) * 17, digit(1) * 17, digit(2) * 17, 255)),
            6 => Ok(Self::from_srgb_u8(pair(0), pair(2), pair(4), 255)),
            8 => Ok(Self::from_srgb_u8(pair(0), pair(2), pair(4), pair(6))),
            _ => Err(ColorParseError::new(src)),
        }
    }

    /// Scales opacity, keeping premultiplication intact.
    #[inline]
    pub fn with_opacity(self, opacity: f32) -> Self {
        let k = opacity.clamp(0.0, 1.0);
        Self { r: self.r * k, g: self.g * k, b: self.b * k, a: self.a * k }
    }

    /// Moves the color toward black by `amount` in `[0, 1]`.
    #[inline]
    pub fn darken(self, amount: f32) -> Self {
        let k = 1.0 - amount.clamp(0.0, 1.0);
        Self { r: self.r * k, g: self.g * k, b: self.b * k, a: self.a }
    }

    /// Blends toward white by `amount` in `[0, 1]`.
    #[inline]
    pub fn lighten(self, amount: f32) -> Self {
        let k = amount.clamp(0.0, 1.0);
        Self {
            r: self.r + (self.a - self.r) * k,
            g: self.g + (self.a - self.g) * k,
            b: self.b + (self.a - self.b) * k,
            a: self.a,
        }
    }

    #[inline]
    pub fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Relative luminance of the straight color, used for contrast decisions.
    pub fn luminance(self) -> f32 {
        if self.a <= 0.0 {
            return 0.0;
        }
        let inv = 1.0 / self.a;
        0.2126 * self.r * inv + 0.7152 * self.g * inv + 0.0722 * self.b * inv
    }
}

fn srgb_to_linear(c: u8) -> f32 {
    let c = c as f32 / 255.0;
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

/// A color literal that is not valid hex.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorParseError {
    pub input: String,
}

impl ColorParseError {
    fn new(input: &str) -> Self {
        Self { input: input.to_string() }
    }
}

impl fmt::Display for ColorParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid hex color '{}'", self.input)
    }
}

impl std::error::Error for ColorParseError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-4
    }

    // ── from_hex ──────────────────────────────────────────────────────────

    #[test]
    fn parses_six_digit_hex() {
        let c = Color::from_hex("#ffffff").unwrap();
        assert_eq!(c, Color::WHITE);
        let c = Color::from_hex("000000").unwrap();
        assert_eq!(c, Color::BLACK);
    }

    #[test]
    fn short_form_expands_each_digit() {
        assert_eq!(Color::from_hex("#f00").unwrap(), Color::from_hex("#ff0000").unwrap());
    }

    #[test]
    fn eight_digit_hex_premultiplies_alpha() {
        let c = Color::from_hex("#ffffff80").unwrap();
        assert!(approx(c.a, 128.0 / 255.0));
        assert!(approx(c.r, c.a));
    }

    #[test]
    fn mid_grey_is_linearized() {
        let c = Color::from_hex("#808080").unwrap();
        // sRGB 0.5 is ~0.216 linear.
        assert!((c.r - 0.2158).abs() < 1e-3);
    }

    #[test]
    fn rejects_malformed_literals() {
        for bad in ["", "#", "#12", "#12345", "#gg0000", "rgb(1,2,3)"] {
            let err = Color::from_hex(bad).unwrap_err();
            assert_eq!(err.input, bad);
        }
    }

    // ── adjustments ───────────────────────────────────────────────────────

    #[test]
    fn opacity_keeps_premultiplication() {
        let c = Color::from_hex("#c4956a").unwrap().with_opacity(0.5);
        assert!(approx(c.a, 0.5));
        assert!(c.r <= c.a && c.g <= c.a && c.b <= c.a);
    }

    #[test]
    fn darken_and_lighten_hit_extremes() {
        let c = Color::from_hex("#6b9f76").unwrap();
        assert_eq!(c.darken(1.0), Color::BLACK);
        let w = c.lighten(1.0);
        assert!(approx(w.r, 1.0) && approx(w.g, 1.0) && approx(w.b, 1.0));
    }

    #[test]
    fn luminance_orders_black_below_white() {
        assert!(Color::BLACK.luminance() < Color::WHITE.luminance());
        assert!(approx(Color::WHITE.luminance(), 1.0));
    }
}
