//! Time subsystem.
//!
//! - one [`FrameClock`] per window, ticked once per presented frame
//! - [`FrameTask`] handles for work that re-schedules itself every frame

mod frame_clock;
mod frame_task;

pub use frame_clock::{FrameClock, FrameTime};
pub use frame_task::FrameTask;
