//! Paint primitives.
//!
//! Colors are stored linear + premultiplied so they can be written straight
//! into the sRGB surface and blended with `PREMULTIPLIED_ALPHA_BLENDING`.

mod color;

pub use color::{Color, ColorParseError};
