//! Postmark engine crate.
//!
//! Owns the platform + GPU runtime pieces the card presentation is drawn with:
//! window loop, input translation, frame timing, the renderer-agnostic draw
//! list and the wgpu renderers that consume it.

pub mod device;
pub mod window;
pub mod input;
pub mod time;
pub mod core;

pub mod logging;
pub mod coords;
pub mod images;
pub mod paint;
pub mod render;
pub mod scene;
pub mod text;
