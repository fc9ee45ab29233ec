//! GPU rendering subsystem.
//!
//! [`SceneRenderer`] consumes a [`DrawList`](crate::scene::DrawList) in paint
//! order and records it into a single render pass, switching between the
//! shape, glyph and image pipelines as the command kind changes.
//!
//! Convention:
//! - CPU geometry is in logical pixels (top-left origin, +Y down)
//! - every instance carries its 3×3 transform; shaders project to clip space
//!   with `w` taken from the transform so tilted quads interpolate correctly

mod common;
mod ctx;
mod glyph;
mod image;
mod scene_renderer;
mod shape;

pub use ctx::{RenderCtx, RenderTarget};
pub use scene_renderer::SceneRenderer;
