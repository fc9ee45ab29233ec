//! Scene (draw stream) types.
//!
//! - renderer-agnostic draw commands
//! - deterministic ordering (z-index + insertion order)
//! - a transform stack so whole groups can be tilted or rotated together

mod cmd;
mod key;
mod list;

pub mod shapes;

pub use cmd::DrawCmd;
pub use key::{SortKey, ZIndex};
pub use list::{DrawItem, DrawList};
