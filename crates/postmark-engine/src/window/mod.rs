//! Window + runtime loop.
//!
//! Owns the winit event loop and the single presentation window, wiring it to
//! the GPU layer and the input translator.

mod runtime;

pub use runtime::{Runtime, RuntimeConfig, RuntimeCtx};
pub use winit::window::CursorIcon;
