//! Postmark card: the interactive greeting-card scene on top of `postmark-engine`.
//!
//! # Quick start
//!
//! ```rust,ignore
//! use postmark_card::prelude::*;
//!
//! let content = CardContent::from_json(&std::fs::read_to_string("card.json")?)?;
//! Application::new()
//!     .title(format!("You've Got Mail from {}", content.from_name))
//!     .card(content)
//!     .run()?;
//! ```
//!
//! # Headless
//!
//! [`SceneComposer`](scene::SceneComposer) runs without a window, which is how
//! hosts embed it and how the tests drive it:
//!
//! ```rust,ignore
//! let mut scene = SceneComposer::mount(content, SceneOptions::default(), MountEnv::default());
//! scene.handle(SceneEvent::Click { pos });
//! scene.frame(elapsed);
//! scene.paint(&mut Painter::new(&mut draw_list, &fonts, font));
//! ```

pub mod app;
pub mod card;
pub mod event;
pub mod focus;
pub mod gift;
pub mod layout;
pub mod lightbox;
pub mod painter;
pub mod particles;
pub mod photos;
pub mod reveal;
pub mod scene;
pub mod tilt;

pub use app::Application;

/// The types a host needs to load, mount and drive a card.
pub mod prelude {
    pub use crate::app::Application;
    pub use crate::card::{AnimationKind, CardContent, CardError, CardPalette};
    pub use crate::event::{EventResult, Modifiers, SceneEvent};
    pub use crate::gift::GiftWrapState;
    pub use crate::lightbox::CloseReason;
    pub use crate::painter::Painter;
    pub use crate::photos::PhotoBook;
    pub use crate::reveal::RevealState;
    pub use crate::scene::{AccessNode, AccessRole, MountEnv, SceneComposer, SceneCursor, SceneOptions};
    pub use crate::tilt::TiltConfig;

    pub use postmark_engine::coords::{Rect, Vec2, Viewport};
    pub use postmark_engine::paint::Color;
}
