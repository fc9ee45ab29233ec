use std::path::PathBuf;

use anyhow::{Context, Result};
use winit::dpi::LogicalSize;

use postmark_engine::core::{App as EngineApp, AppControl, FrameCtx};
use postmark_engine::coords::Vec2;
use postmark_engine::device::GpuInit;
use postmark_engine::input::{InputEvent, KeyState, MouseButton, MouseButtonState, TouchPhase};
use postmark_engine::render::SceneRenderer;
use postmark_engine::scene::DrawList;
use postmark_engine::text::{FontId, FontSystem};
use postmark_engine::window::{CursorIcon, Runtime, RuntimeConfig};

use crate::card::CardContent;
use crate::event::SceneEvent;
use crate::painter::Painter;
use crate::photos::PhotoBook;
use crate::scene::{MountEnv, SceneComposer, SceneCursor, SceneOptions};

// ── Application ───────────────────────────────────────────────────────────

/// Window host for one card.
///
/// ```rust,ignore
/// Application::new()
///     .card(CardContent::from_json(&json)?)
///     .options(SceneOptions { preview: false, initial_state: RevealState::Unopened })
///     .font(std::fs::read("DejaVuSans.ttf")?)
///     .run()?;
/// ```
pub struct Application {
    title:      String,
    width:      f64,
    height:     f64,
    content:    CardContent,
    options:    SceneOptions,
    env:        MountEnv,
    font:       Option<Vec<u8>>,
    photo_base: Option<PathBuf>,
}

impl Application {
    pub fn new() -> Self {
        Self {
            title:      "postmark".to_string(),
            width:      1100.0,
            height:     760.0,
            content:    CardContent::default(),
            options:    SceneOptions::default(),
            env:        MountEnv::default(),
            font:       None,
            photo_base: None,
        }
    }

    pub fn card(mut self, content: CardContent) -> Self {
        self.content = content;
        self
    }

    pub fn options(mut self, options: SceneOptions) -> Self {
        self.options = options;
        self
    }

    pub fn title(mut self, t: impl Into<String>) -> Self {
        self.title = t.into();
        self
    }

    /// Initial window size in logical pixels.
    pub fn size(mut self, width: f64, height: f64) -> Self {
        self.width  = width;
        self.height = height;
        self
    }

    /// TrueType / OpenType bytes for all card text. Without a font the card
    /// renders shapes and photos only.
    pub fn font(mut self, data: Vec<u8>) -> Self {
        self.font = Some(data);
        self
    }

    /// Directory relative photo paths resolve against.
    pub fn photo_base(mut self, dir: impl Into<PathBuf>) -> Self {
        self.photo_base = Some(dir.into());
        self
    }

    /// Treat the host as touch-first: no pointer-driven tilt.
    pub fn touch(mut self, touch_capable: bool) -> Self {
        self.env.touch_capable = touch_capable;
        self
    }

    /// Opens the window and runs until it is closed.
    pub fn run(self) -> Result<()> {
        let config = RuntimeConfig {
            title:        self.title.clone(),
            initial_size: LogicalSize::new(self.width, self.height),
            ..RuntimeConfig::default()
        };
        let viewer = CardViewer::new(self)?;
        Runtime::run(config, GpuInit::default(), viewer).context("card viewer runtime")
    }
}

impl Default for Application {
    fn default() -> Self {
        Self::new()
    }
}

// ── CardViewer ────────────────────────────────────────────────────────────

/// Implements the engine's `App`; owns the scene and everything needed to
/// draw it.
struct CardViewer {
    scene:     SceneComposer,
    fonts:     FontSystem,
    font:      Option<FontId>,
    draw_list: DrawList,
    renderer:  SceneRenderer,
    cursor:    SceneCursor,
}

impl CardViewer {
    fn new(app: Application) -> Result<Self> {
        let mut fonts = FontSystem::new();
        let font = match &app.font {
            Some(bytes) => Some(fonts.load_font(bytes).context("load card font")?),
            None => {
                log::warn!("no font configured; card text will not be drawn");
                None
            }
        };

        let photos = PhotoBook::load(app.content.photos(), app.photo_base.as_deref());
        let mut scene = SceneComposer::mount(app.content, app.options, app.env);
        scene.set_photos(photos);

        Ok(Self {
            scene,
            fonts,
            font,
            draw_list: DrawList::new(),
            renderer:  SceneRenderer::new(),
            cursor:    SceneCursor::Default,
        })
    }
}

impl EngineApp for CardViewer {
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        self.scene.resize(ctx.window.viewport());
        for event in &ctx.input_frame.events {
            if let Some(event) = scene_event(event) {
                self.scene.enqueue(event);
            }
        }
        self.scene.frame(ctx.time.elapsed);

        // ── Paint ─────────────────────────────────────────────────────────
        self.draw_list.clear();
        {
            let mut painter = Painter::new(&mut self.draw_list, &self.fonts, self.font);
            self.scene.paint(&mut painter);
        }

        let cursor = self.scene.cursor();
        if cursor != self.cursor {
            self.cursor = cursor;
            ctx.window.set_cursor(match cursor {
                SceneCursor::Default => CursorIcon::Default,
                SceneCursor::Pointer => CursorIcon::Pointer,
            });
        }

        // ── Render ────────────────────────────────────────────────────────
        let dl       = &mut self.draw_list;
        let fonts    = &self.fonts;
        let images   = self.scene.photo_store();
        let renderer = &mut self.renderer;
        let control = ctx.render(self.scene.background(), |rctx, target| {
            renderer.render(rctx, target, dl, fonts, images);
        });

        if self.scene.needs_redraw() {
            ctx.runtime.request_frame();
        }
        control
    }

    fn on_exit(&mut self) {
        self.scene.unmount();
    }
}

/// Maps a window input event to what the card scene reacts to.
fn scene_event(event: &InputEvent) -> Option<SceneEvent> {
    match *event {
        InputEvent::PointerMoved(m) => Some(SceneEvent::PointerMoved { pos: Vec2::new(m.x, m.y) }),
        InputEvent::PointerLeft => Some(SceneEvent::PointerLeft),
        InputEvent::PointerButton(b)
            if b.button == MouseButton::Left && b.state == MouseButtonState::Released =>
        {
            Some(SceneEvent::Click { pos: Vec2::new(b.x, b.y) })
        }
        InputEvent::Key { key, state: KeyState::Pressed, modifiers, .. } => {
            Some(SceneEvent::KeyPress { key, modifiers })
        }
        InputEvent::MouseWheel { delta, .. } => Some(SceneEvent::Scroll { delta: delta.scroll_y() }),
        InputEvent::Touch(t) if t.phase == TouchPhase::Ended => {
            Some(SceneEvent::Click { pos: Vec2::new(t.x, t.y) })
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use postmark_engine::input::{Key, Modifiers, MouseWheelDelta, PointerButtonEvent, PointerMoveEvent, TouchEvent};

    #[test]
    fn left_release_is_a_click() {
        let press = PointerButtonEvent {
            button: MouseButton::Left,
            state: MouseButtonState::Pressed,
            x: 10.0,
            y: 20.0,
            modifiers: Modifiers::default(),
        };
        assert_eq!(scene_event(&InputEvent::PointerButton(press)), None);
        let release = PointerButtonEvent { state: MouseButtonState::Released, ..press };
        assert_eq!(
            scene_event(&InputEvent::PointerButton(release)),
            Some(SceneEvent::Click { pos: Vec2::new(10.0, 20.0) })
        );
        let right = PointerButtonEvent { button: MouseButton::Right, ..release };
        assert_eq!(scene_event(&InputEvent::PointerButton(right)), None);
    }

    #[test]
    fn touch_end_is_a_click() {
        let touch = TouchEvent { id: 1, phase: TouchPhase::Ended, x: 3.0, y: 4.0 };
        assert_eq!(scene_event(&InputEvent::Touch(touch)), Some(SceneEvent::Click { pos: Vec2::new(3.0, 4.0) }));
        let moved = TouchEvent { phase: TouchPhase::Moved, ..touch };
        assert_eq!(scene_event(&InputEvent::Touch(moved)), None);
    }

    #[test]
    fn keys_wheel_and_pointer_translate() {
        let key = InputEvent::Key {
            key: Key::Escape,
            state: KeyState::Pressed,
            modifiers: Modifiers::default(),
            repeat: false,
        };
        assert!(matches!(scene_event(&key), Some(SceneEvent::KeyPress { key: Key::Escape, .. })));

        let released = InputEvent::Key {
            key: Key::Escape,
            state: KeyState::Released,
            modifiers: Modifiers::default(),
            repeat: false,
        };
        assert_eq!(scene_event(&released), None);

        let wheel = InputEvent::MouseWheel {
            delta: MouseWheelDelta::Pixel { x: 0.0, y: -30.0 },
            modifiers: Modifiers::default(),
        };
        assert_eq!(scene_event(&wheel), Some(SceneEvent::Scroll { delta: 30.0 }));

        let moved = InputEvent::PointerMoved(PointerMoveEvent { x: 1.0, y: 2.0 });
        assert_eq!(scene_event(&moved), Some(SceneEvent::PointerMoved { pos: Vec2::new(1.0, 2.0) }));
        assert_eq!(scene_event(&InputEvent::Focused(true)), None);
    }
}
