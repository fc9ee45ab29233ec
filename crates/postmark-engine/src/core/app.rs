use winit::event::WindowEvent;

use super::ctx::FrameCtx;

/// Control directive returned by app callbacks.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AppControl {
    Continue,
    Exit,
}

/// Application hosted by [`Runtime`](crate::window::Runtime).
pub trait App {
    /// Raw window events, before input translation. Rarely needed.
    fn on_window_event(&mut self, event: &WindowEvent) -> AppControl {
        let _ = event;
        AppControl::Continue
    }

    /// Called once per redraw. Call `ctx.runtime.request_frame()` to be
    /// called again on the next frame without waiting for input.
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl;

    /// Called once before the window and GPU context are torn down.
    fn on_exit(&mut self) {}
}
