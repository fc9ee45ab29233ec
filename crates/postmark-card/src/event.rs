use postmark_engine::coords::Vec2;
use postmark_engine::input::Key;

pub use postmark_engine::input::Modifiers;

/// Input events routed into a card scene.
///
/// Positions are logical window pixels; the scene maps them through the
/// wrapper transform itself.
#[derive(Debug, Clone, PartialEq)]
pub enum SceneEvent {
    /// Pointer moved to `pos`.
    PointerMoved { pos: Vec2 },
    /// Pointer left the window.
    PointerLeft,
    /// Primary button (or a touch) pressed and released at `pos`.
    Click { pos: Vec2 },
    /// Key pressed.
    KeyPress { key: Key, modifiers: Modifiers },
    /// Mouse wheel / trackpad scroll.
    ///
    /// `delta` > 0 → scroll down (reveal content below); < 0 → scroll up.
    Scroll { delta: f32 },
}

/// Result returned by [`crate::scene::SceneComposer::handle`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventResult {
    /// Event changed scene state.
    Consumed,
    /// Nothing reacted to the event.
    Ignored,
}

impl EventResult {
    #[inline]
    pub fn is_consumed(self) -> bool {
        self == EventResult::Consumed
    }
}
