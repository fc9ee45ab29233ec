//! Geometry shared by the renderers and the card scene.
//!
//! CPU space is logical pixels, origin top-left, +X right, +Y down.
//! Renderers map to clip space in shaders using a viewport uniform.
//! Projective transforms ([`Mat3`]) carry the perspective tilt of the card.

mod rect;
mod transform;
mod vec2;
mod viewport;

pub use rect::Rect;
pub use transform::{Mat3, PerspectiveTilt};
pub use vec2::Vec2;
pub use viewport::Viewport;
