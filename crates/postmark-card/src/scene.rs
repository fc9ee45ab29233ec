//! Scene composer: mounts one card and owns everything it shows.
//!
//! The host feeds [`SceneEvent`]s in (directly through [`SceneComposer::handle`]
//! or queued for the next frame), calls [`SceneComposer::frame`] once per
//! redraw and then [`SceneComposer::paint`]. Everything is single-threaded.

use std::collections::VecDeque;
use std::f32::consts::PI;

use postmark_engine::coords::{Mat3, Rect, Vec2, Viewport};
use postmark_engine::images::ImageStore;
use postmark_engine::input::Key;
use postmark_engine::paint::Color;
use postmark_engine::time::FrameTask;

use crate::card::CardContent;
use crate::event::{EventResult, Modifiers, SceneEvent};
use crate::focus::{FocusManager, FocusTarget};
use crate::gift::{GiftClick, GiftShelf, GiftWrapState, PresentTheme};
use crate::layout::{GiftSlot, LightboxLayout, SceneLayout};
use crate::lightbox::{CloseReason, Lightbox, PageScroll, CLOSE_HINT, CLOSE_LABEL, DIALOG_LABEL};
use crate::painter::Painter;
use crate::particles::{ConfettiShape, ParticleField, ParticleLook};
use crate::photos::PhotoBook;
use crate::reveal::{Advance, RevealMachine, RevealState};
use crate::tilt::{TiltConfig, TiltPhysics};

/// Viewport assumed until the host reports the real one.
pub const DEFAULT_VIEWPORT: Viewport = Viewport::new(1100.0, 760.0);

pub const SCROLL_HINT: &str = "Scroll down for gifts!";

/// Seconds a gift takes to pop in once its stagger delay has passed.
const GIFT_APPEAR_SECONDS: f32 = 0.5;
/// Seconds the lid takes to fly off after an unwrap click.
const LID_OFF_SECONDS: f32 = 0.5;
const ARROW_SCROLL: f32 = 40.0;

const LETTER_PAPER: [u8; 3] = [0xff, 0xfd, 0xf8];
const HEART_COLOR: [u8; 3] = [0xe7, 0x4c, 0x6f];

// ── mount parameters ──────────────────────────────────────────────────────

#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct SceneOptions {
    /// Static rendering: no tilt loop, no pointer tracking, envelope ignores
    /// advance events, blank text shows placeholders.
    pub preview: bool,
    pub initial_state: RevealState,
}

/// Facts about the host decided once at mount.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct MountEnv {
    /// Touch-first hosts get no pointer tracking.
    pub touch_capable: bool,
}

/// Listener attachments of a mounted scene.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct Subscriptions {
    pub pointer_move: bool,
    pub pointer_leave: bool,
    /// Envelope keyboard activation, focus cycling and keyboard scrolling.
    pub keys: bool,
    /// Escape closes the lightbox.
    pub escape: bool,
}

impl Subscriptions {
    pub fn any(&self) -> bool {
        self.pointer_move || self.pointer_leave || self.keys || self.escape
    }

    fn detach_all(&mut self) {
        *self = Subscriptions::default();
    }
}

#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub enum SceneCursor {
    #[default]
    Default,
    Pointer,
}

// ── accessibility ─────────────────────────────────────────────────────────

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum AccessRole {
    Button,
    Dialog,
    Image,
    Text,
}

/// One entry of the scene's accessibility tree, in reading order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessNode {
    pub role: AccessRole,
    pub label: String,
    pub focusable: bool,
    pub focused: bool,
    pub hidden: bool,
}

impl AccessNode {
    fn new(role: AccessRole, label: impl Into<String>) -> Self {
        Self { role, label: label.into(), focusable: false, focused: false, hidden: false }
    }
}

// ── SceneComposer ─────────────────────────────────────────────────────────

pub struct SceneComposer {
    content: CardContent,
    options: SceneOptions,
    env: MountEnv,

    viewport: Viewport,
    layout: SceneLayout,

    reveal: RevealMachine,
    tilt: TiltPhysics,
    particles: ParticleField,
    gifts: Option<GiftShelf>,
    page: PageScroll,
    lightbox: Option<Lightbox>,
    photos: PhotoBook,
    focus: FocusManager,

    task: Option<FrameTask>,
    subscriptions: Subscriptions,
    queue: VecDeque<SceneEvent>,

    /// Scene time in seconds, from the last [`SceneComposer::frame`].
    now: f32,
    scroll: f32,
    wrapper: Mat3,
    hover: Option<Vec2>,
    mounted: bool,
}

impl SceneComposer {
    pub fn mount(content: CardContent, options: SceneOptions, env: MountEnv) -> Self {
        Self::mount_with_rng(content, options, env, &mut fastrand::Rng::new())
    }

    /// Like [`SceneComposer::mount`] with a caller-provided generator, so the
    /// per-mount random parameters are reproducible.
    pub fn mount_with_rng(
        content: CardContent,
        options: SceneOptions,
        env: MountEnv,
        rng: &mut fastrand::Rng,
    ) -> Self {
        let content = if options.preview { content.with_preview_placeholders() } else { content };
        let initial = options.initial_state;

        let reveal = if options.preview {
            RevealMachine::locked(initial)
        } else {
            RevealMachine::new(initial)
        };
        let tilt = if initial.is_open() {
            TiltPhysics::settled(TiltConfig::default())
        } else {
            TiltPhysics::new(TiltConfig::default())
        };

        let particles = ParticleField::generate(content.animation, rng);
        let gifts = GiftShelf::new(content.photos(), initial.is_open(), rng);

        let page = PageScroll::new();
        let lightbox = gifts.as_ref().map(|_| Lightbox::new(page.clone()));

        let task = (!options.preview).then(|| FrameTask::arm("card-tilt"));
        let pointer = !options.preview && !env.touch_capable;
        let subscriptions = Subscriptions {
            pointer_move: pointer,
            pointer_leave: pointer,
            keys: true,
            escape: true,
        };

        let viewport = DEFAULT_VIEWPORT;
        let layout = SceneLayout::compute(viewport, gifts.as_ref().map_or(0, GiftShelf::len));

        log::info!(
            "card scene mounted: state={} animation={} gifts={} preview={} touch={}",
            initial.as_str(),
            content.animation.as_str(),
            gifts.as_ref().map_or(0, GiftShelf::len),
            options.preview,
            env.touch_capable,
        );

        let mut scene = Self {
            content,
            options,
            env,
            viewport,
            layout,
            reveal,
            tilt,
            particles,
            gifts,
            page,
            lightbox,
            photos: PhotoBook::new(),
            focus: FocusManager::new(),
            task,
            subscriptions,
            queue: VecDeque::new(),
            now: 0.0,
            scroll: 0.0,
            wrapper: Mat3::IDENTITY,
            hover: None,
            mounted: true,
        };
        scene.wrapper = scene.compute_wrapper();
        scene
    }

    /// Hands the decoded photos to the scene. Gifts whose photo is missing
    /// show an empty frame.
    pub fn set_photos(&mut self, photos: PhotoBook) {
        self.photos = photos;
    }

    /// Cancels the frame task, detaches every listener and closes the
    /// lightbox. Runs at most once; dropping the scene calls it too.
    pub fn unmount(&mut self) {
        if !self.mounted {
            return;
        }
        self.mounted = false;
        if let Some(task) = self.task.as_mut() {
            task.cancel();
        }
        self.subscriptions.detach_all();
        if let Some(lightbox) = self.lightbox.as_mut() {
            lightbox.close(CloseReason::Teardown);
        }
        self.queue.clear();
        log::info!("card scene unmounted");
    }

    // ── accessors ─────────────────────────────────────────────────────────

    #[inline]
    pub fn content(&self) -> &CardContent {
        &self.content
    }

    #[inline]
    pub fn options(&self) -> SceneOptions {
        self.options
    }

    #[inline]
    pub fn env(&self) -> MountEnv {
        self.env
    }

    #[inline]
    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    #[inline]
    pub fn reveal_state(&self) -> RevealState {
        self.reveal.state()
    }

    #[inline]
    pub fn prompt_text(&self) -> Option<&'static str> {
        self.reveal.prompt_text()
    }

    #[inline]
    pub fn tilt(&self) -> &TiltPhysics {
        &self.tilt
    }

    #[inline]
    pub fn particles(&self) -> &ParticleField {
        &self.particles
    }

    #[inline]
    pub fn gifts(&self) -> Option<&GiftShelf> {
        self.gifts.as_ref()
    }

    /// Wrap state per photo; empty when the card has no gifts.
    pub fn gift_states(&self) -> Vec<GiftWrapState> {
        self.gifts.as_ref().map(GiftShelf::states).unwrap_or_default()
    }

    #[inline]
    pub fn lightbox(&self) -> Option<&Lightbox> {
        self.lightbox.as_ref()
    }

    #[inline]
    pub fn is_scroll_locked(&self) -> bool {
        self.page.is_locked()
    }

    #[inline]
    pub fn scroll(&self) -> f32 {
        self.scroll
    }

    /// Transform applied to everything inside the tilting wrapper.
    #[inline]
    pub fn wrapper_transform(&self) -> Mat3 {
        self.wrapper
    }

    #[inline]
    pub fn subscriptions(&self) -> Subscriptions {
        self.subscriptions
    }

    /// The per-frame tilt task; `None` for previews, which never start one.
    #[inline]
    pub fn frame_task(&self) -> Option<&FrameTask> {
        self.task.as_ref()
    }

    pub fn frame_task_armed(&self) -> bool {
        self.task.as_ref().is_some_and(FrameTask::is_armed)
    }

    #[inline]
    pub fn layout(&self) -> &SceneLayout {
        &self.layout
    }

    #[inline]
    pub fn focused(&self) -> Option<FocusTarget> {
        self.focus.focused()
    }

    #[inline]
    pub fn photo_store(&self) -> &ImageStore {
        self.photos.store()
    }

    #[inline]
    pub fn background(&self) -> Color {
        self.content.palette.background
    }

    /// Whether the host should schedule another frame without waiting for input.
    pub fn needs_redraw(&self) -> bool {
        if !self.mounted {
            return false;
        }
        let gifts_shown = self.gifts.is_some() && self.reveal.state().is_open();
        self.frame_task_armed()
            || !self.particles.is_empty()
            || self.reveal.is_transitioning(self.now)
            || gifts_shown
    }

    pub fn cursor(&self) -> SceneCursor {
        let Some(pos) = self.hover else {
            return SceneCursor::Default;
        };
        if self.lightbox_open() {
            return SceneCursor::Pointer;
        }
        let Some(local) = self.to_local(pos) else {
            return SceneCursor::Default;
        };
        let interactive = if self.reveal.state().is_open() {
            self.gift_at(local).is_some()
        } else {
            !self.reveal.is_locked() && self.layout.envelope.contains(local)
        };
        if interactive { SceneCursor::Pointer } else { SceneCursor::Default }
    }

    /// Accessibility tree in reading order.
    pub fn access_nodes(&self) -> Vec<AccessNode> {
        let modal = self.lightbox_open();
        let mut nodes = Vec::new();

        let mut envelope = AccessNode::new(AccessRole::Button, self.reveal.envelope_label());
        envelope.focusable = true;
        envelope.focused = self.focus.is_focused(FocusTarget::Envelope);
        envelope.hidden = modal;
        nodes.push(envelope);

        if let Some(prompt) = self.reveal.prompt_text() {
            let mut node = AccessNode::new(AccessRole::Text, prompt);
            node.hidden = modal;
            nodes.push(node);
        }

        if let Some(shelf) = &self.gifts {
            let shown = self.reveal.state().is_open();
            for gift in shelf.gifts() {
                let mut node = AccessNode::new(AccessRole::Image, gift.label());
                node.hidden = modal || !shown || gift.state() == GiftWrapState::Wrapped;
                nodes.push(node);
            }
        }

        if let Some(photo) = self.lightbox.as_ref().and_then(Lightbox::active) {
            nodes.push(AccessNode::new(AccessRole::Dialog, DIALOG_LABEL));
            let mut close = AccessNode::new(AccessRole::Button, CLOSE_LABEL);
            close.focusable = true;
            close.focused = self.focus.is_focused(FocusTarget::LightboxClose);
            nodes.push(close);
            nodes.push(AccessNode::new(AccessRole::Image, photo.image_label()));
            nodes.push(AccessNode::new(AccessRole::Text, CLOSE_HINT));
        }
        nodes
    }

    // ── input ─────────────────────────────────────────────────────────────

    /// Queues `event` for the next [`SceneComposer::frame`].
    pub fn enqueue(&mut self, event: SceneEvent) {
        if self.mounted {
            self.queue.push_back(event);
        }
    }

    /// Applies `event` immediately.
    pub fn handle(&mut self, event: SceneEvent) -> EventResult {
        if !self.mounted {
            return EventResult::Ignored;
        }
        match event {
            SceneEvent::PointerMoved { pos } => {
                self.hover = Some(pos);
                if !self.subscriptions.pointer_move {
                    return EventResult::Ignored;
                }
                self.tilt.pointer_moved(pos, self.viewport);
                EventResult::Consumed
            }
            SceneEvent::PointerLeft => {
                self.hover = None;
                if !self.subscriptions.pointer_leave {
                    return EventResult::Ignored;
                }
                self.tilt.pointer_left();
                EventResult::Consumed
            }
            SceneEvent::Click { pos } => self.click(pos),
            SceneEvent::KeyPress { key, modifiers } => self.key(key, modifiers),
            SceneEvent::Scroll { delta } => self.scroll_by(delta),
        }
    }

    /// Moves the reveal one step forward, as a click on the envelope would.
    pub fn advance(&mut self) -> EventResult {
        let step = self.reveal.advance(self.now);
        if step.opened() {
            self.tilt.settle();
        }
        match step {
            Advance::Moved { .. } => EventResult::Consumed,
            Advance::Unchanged => EventResult::Ignored,
        }
    }

    /// Clicks gift `index` regardless of where it is drawn.
    pub fn click_gift(&mut self, index: usize) -> EventResult {
        let open = self.reveal.state().is_open();
        let Some(shelf) = self.gifts.as_mut() else {
            return EventResult::Ignored;
        };
        match shelf.click(index, open, self.now) {
            GiftClick::Ignored => EventResult::Ignored,
            GiftClick::Unwrapped => EventResult::Consumed,
            GiftClick::Enlarge { url, label } => {
                if let Some(lightbox) = self.lightbox.as_mut() {
                    lightbox.open(url, label);
                    self.focus.request_focus(FocusTarget::LightboxClose);
                }
                EventResult::Consumed
            }
        }
    }

    /// Closes the lightbox; `false` if it was not open.
    pub fn close_lightbox(&mut self, reason: CloseReason) -> bool {
        let closed = self.lightbox.as_mut().is_some_and(|lb| lb.close(reason));
        if closed && self.focus.is_focused(FocusTarget::LightboxClose) {
            self.focus.request_focus(FocusTarget::Envelope);
        }
        closed
    }

    fn click(&mut self, pos: Vec2) -> EventResult {
        if self.lightbox_open() {
            let lb = self.lightbox_layout();
            let reason = if lb.close.contains(pos) {
                CloseReason::CloseButton
            } else if lb.image.contains(pos) {
                return EventResult::Ignored;
            } else {
                CloseReason::Backdrop
            };
            self.close_lightbox(reason);
            return EventResult::Consumed;
        }

        let Some(local) = self.to_local(pos) else {
            return EventResult::Ignored;
        };
        if let Some(index) = self.gift_at(local) {
            return self.click_gift(index);
        }
        if self.layout.envelope.contains(local) {
            self.focus.request_focus(FocusTarget::Envelope);
            return self.advance();
        }
        EventResult::Ignored
    }

    fn key(&mut self, key: Key, modifiers: Modifiers) -> EventResult {
        if key == Key::Escape {
            if self.subscriptions.escape && self.close_lightbox(CloseReason::Escape) {
                return EventResult::Consumed;
            }
            return EventResult::Ignored;
        }
        if !self.subscriptions.keys {
            return EventResult::Ignored;
        }

        match key {
            Key::Tab => {
                self.focus.advance(modifiers.shift);
                EventResult::Consumed
            }
            k if k.is_activation() => match self.focus.focused() {
                Some(FocusTarget::Envelope) => self.advance(),
                Some(FocusTarget::LightboxClose) => {
                    self.close_lightbox(CloseReason::CloseButton);
                    EventResult::Consumed
                }
                None => EventResult::Ignored,
            },
            Key::ArrowDown => self.scroll_by(ARROW_SCROLL),
            Key::ArrowUp => self.scroll_by(-ARROW_SCROLL),
            Key::PageDown => self.scroll_by(self.viewport.height * 0.9),
            Key::PageUp => self.scroll_by(-self.viewport.height * 0.9),
            Key::Home => self.scroll_by(-self.scroll),
            Key::End => self.scroll_by(self.layout.max_scroll() - self.scroll),
            _ => EventResult::Ignored,
        }
    }

    fn scroll_by(&mut self, delta: f32) -> EventResult {
        if self.page.is_locked() {
            return EventResult::Ignored;
        }
        let next = (self.scroll + delta).clamp(0.0, self.layout.max_scroll());
        if next == self.scroll {
            return EventResult::Ignored;
        }
        self.scroll = next;
        EventResult::Consumed
    }

    // ── frame ─────────────────────────────────────────────────────────────

    pub fn resize(&mut self, viewport: Viewport) {
        if viewport == self.viewport || !viewport.is_valid() {
            return;
        }
        log::debug!("card scene resized to {}x{}", viewport.width, viewport.height);
        self.viewport = viewport;
        self.layout = SceneLayout::compute(viewport, self.gifts.as_ref().map_or(0, GiftShelf::len));
        self.scroll = self.scroll.min(self.layout.max_scroll());
        self.wrapper = self.compute_wrapper();
    }

    /// Per-frame update at scene time `elapsed` (seconds since mount):
    /// drains queued input, steps the tilt and recomputes the wrapper
    /// transform.
    pub fn frame(&mut self, elapsed: f32) {
        if !self.mounted {
            return;
        }
        self.now = elapsed;
        while let Some(event) = self.queue.pop_front() {
            self.handle(event);
        }
        if let Some(task) = self.task.as_mut() {
            let tilt = &mut self.tilt;
            task.run(|| tilt.step());
        }
        self.wrapper = self.compute_wrapper();
    }

    fn compute_wrapper(&self) -> Mat3 {
        let open = self.reveal.state().is_open();
        let scale = if self.options.preview { 1.0 } else { self.tilt.breathing_scale(self.now, open) };
        let tilt = self.tilt.transform(scale).to_matrix(self.viewport.center());
        Mat3::translate(0.0, -self.scroll) * tilt
    }

    // ── hit testing ───────────────────────────────────────────────────────

    fn lightbox_open(&self) -> bool {
        self.lightbox.as_ref().is_some_and(Lightbox::is_open)
    }

    fn lightbox_layout(&self) -> LightboxLayout {
        let aspect = self
            .lightbox
            .as_ref()
            .and_then(Lightbox::active)
            .and_then(|photo| self.photos.get(&photo.url))
            .map_or(4.0 / 3.0, |entry| entry.aspect);
        LightboxLayout::compute(self.viewport, aspect)
    }

    fn to_local(&self, pos: Vec2) -> Option<Vec2> {
        self.wrapper.inverse()?.map_point(pos)
    }

    /// Where gift `index` is drawn right now and how far it has popped in;
    /// `None` while hidden.
    fn gift_pose(&self, index: usize) -> Option<(GiftSlot, f32)> {
        if !self.reveal.state().is_open() {
            return None;
        }
        let gift = self.gifts.as_ref()?.gifts().get(index)?;
        let slot = *self.layout.gifts.get(index)?;
        let since = self.reveal.time_in_state(self.now) - gift.preset().delay;
        let appear = (since / GIFT_APPEAR_SECONDS).clamp(0.0, 1.0);
        if appear <= 0.0 {
            return None;
        }
        let dy = gift.float().offset(self.now) + (1.0 - appear) * 24.0;
        let rect = slot.rect.translated(Vec2::new(0.0, dy));
        Some((GiftSlot { rect, ..slot }, appear))
    }

    /// Topmost visible gift under `local`.
    fn gift_at(&self, local: Vec2) -> Option<usize> {
        let count = self.gifts.as_ref().map_or(0, GiftShelf::len);
        (0..count)
            .rev()
            .find(|&i| self.gift_pose(i).is_some_and(|(slot, _)| slot.contains(local)))
    }

    // ── paint ─────────────────────────────────────────────────────────────

    /// Records the frame. The background itself is the clear color
    /// ([`SceneComposer::background`]).
    pub fn paint(&mut self, p: &mut Painter<'_>) {
        self.paint_particles(p);

        p.push_transform(self.wrapper);
        self.paint_card(p);
        self.paint_gifts(p);
        self.paint_prompt(p);
        p.pop_transform();

        self.paint_scroll_hint(p);
        self.paint_lightbox(p);
        self.focus.end_frame();
    }

    fn paint_particles(&self, p: &mut Painter<'_>) {
        for particle in self.particles.instances() {
            let Some(pose) = particle.pose(self.now, self.viewport) else {
                continue;
            };
            let rect = Rect::from_center_size(pose.center, pose.extent);
            match particle.look {
                ParticleLook::Confetti { color, shape } => {
                    let color = Color::from_rgb8(color).with_opacity(pose.opacity);
                    p.with_transform(Mat3::rotate(pose.rotation_rad).about(pose.center), |p| match shape {
                        ConfettiShape::Rectangle => p.fill_rect(rect, 1.0, color),
                        ConfettiShape::Circle => p.fill_ellipse(rect, color),
                    });
                }
                ParticleLook::Heart { glyph } => {
                    let color = Color::from_rgb8(HEART_COLOR).with_opacity(pose.opacity);
                    p.with_transform(Mat3::rotate(pose.rotation_rad).about(pose.center), |p| {
                        if !p.glyph(glyph, particle.size, color, pose.center) {
                            paint_heart_shape(p, rect, color);
                        }
                    });
                }
                ParticleLook::Snowflake { glyph } => {
                    let color = Color::WHITE.with_opacity(pose.opacity);
                    if !p.glyph(glyph, particle.size, color, pose.center) {
                        p.fill_ellipse(Rect::from_center_size(pose.center, pose.extent * 0.5), color);
                    }
                }
            }
        }
    }

    fn paint_card(&mut self, p: &mut Painter<'_>) {
        let palette = self.content.palette;
        let env = self.layout.envelope;
        let flip = self.reveal.flip_progress(self.now);
        let flap = self.reveal.flap_progress(self.now);
        let open = self.reveal.state().is_open();
        let front = flip >= 0.5;

        let (letter, letter_front) = self.layout.letter_at(self.reveal.letter_progress(self.now));

        // Flipping about the vertical axis squeezes the face horizontally.
        let squeeze = (flip * PI).cos().abs().max(0.02);
        p.push_transform(Mat3::scale(squeeze, 1.0).about(env.center()));

        let flap_rect = Rect::new(env.origin.x, env.origin.y, env.size.x, env.size.y * 0.55);
        let flap_swing = Mat3::scale(1.0, 1.0 - 2.0 * flap).about(env.origin + Vec2::new(env.size.x * 0.5, 0.0));
        if front && flap >= 0.5 {
            p.with_transform(flap_swing, |p| {
                p.fill_triangle(flap_rect, false, palette.envelope.lighten(0.15));
            });
        }
        if open && !letter_front {
            self.paint_letter(p, letter);
        }

        if front {
            p.fill_rect(env, 6.0, palette.envelope);
            let name_box = Rect::new(env.origin.x, env.origin.y + env.size.y * 0.6, env.size.x, env.size.y * 0.3);
            p.text_centered(&self.content.recipient_name, (env.size.y * 0.11).max(14.0), palette.text, name_box);
            if flap < 0.5 {
                p.with_transform(flap_swing, |p| {
                    p.fill_triangle(flap_rect, false, palette.envelope.darken(0.12));
                });
            }
        } else {
            let back = palette.envelope.darken(0.04);
            p.fill_rect(env, 6.0, back);
            let folds = Rect::new(env.origin.x, env.origin.y + env.size.y * 0.35, env.size.x, env.size.y * 0.65);
            p.fill_triangle(folds, true, back.darken(0.06));
            p.fill_triangle(flap_rect, false, back.darken(0.1));
        }
        p.pop_transform();

        if open && letter_front {
            self.paint_letter(p, letter);
        }

        if !self.lightbox_open() {
            self.focus.register(FocusTarget::Envelope);
            if self.focus.is_focused(FocusTarget::Envelope) {
                stroke_rect(p, env.inset(-6.0, -6.0), 3.0, palette.accent);
            }
        }
    }

    fn paint_letter(&self, p: &mut Painter<'_>, rect: Rect) {
        let content = &self.content;
        let ink = content.palette.text;
        p.fill_rect(rect, 8.0, Color::from_rgb8(LETTER_PAPER));

        let pad = rect.size.x * 0.08;
        let inner = rect.inset(pad, pad);
        let heading = (rect.size.x * 0.07).clamp(16.0, 30.0);
        let body = (rect.size.x * 0.04).clamp(12.0, 18.0);

        let mut y = inner.origin.y;
        if !content.greeting.is_empty() {
            p.text_centered(&content.greeting, heading, ink, Rect::new(inner.origin.x, y, inner.size.x, heading));
            y += p.measure_text(&content.greeting, heading, Some(inner.size.x)).y + body;
        }
        if !content.message.is_empty() {
            p.text(&content.message, body, ink, Vec2::new(inner.origin.x, y), Some(inner.size.x));
        }
        if !content.from_name.is_empty() {
            let from_y = inner.max().y - body * 1.4;
            p.text_centered(&content.from_name, body, ink, Rect::new(inner.origin.x, from_y, inner.size.x, body));
        }
    }

    fn paint_gifts(&self, p: &mut Painter<'_>) {
        let Some(shelf) = &self.gifts else {
            return;
        };
        for gift in shelf.gifts() {
            let Some((slot, appear)) = self.gift_pose(gift.index()) else {
                continue;
            };
            let rect = slot.rect;
            let theme = gift.theme();
            let spin = Mat3::rotate(slot.rotate_deg.to_radians()).about(rect.center());
            p.with_transform(spin, |p| match gift.state() {
                GiftWrapState::Wrapped => {
                    paint_present(p, rect, theme, appear);
                }
                GiftWrapState::Unwrapped => {
                    p.fill_rect(rect, 4.0, Color::WHITE.with_opacity(appear));
                    let frame = rect.inset(rect.size.x * 0.06, rect.size.x * 0.06);
                    match self.photos.get(gift.url()) {
                        Some(photo) => p.image(photo.image, frame.fit_aspect(photo.aspect), 2.0, appear),
                        None => p.fill_rect(frame, 2.0, Color::from_rgb8([0xdd, 0xdd, 0xdd]).with_opacity(appear)),
                    }
                    // Lid flies off for a moment after the click.
                    let t = gift.time_since_unwrap(self.now) / LID_OFF_SECONDS;
                    if t < 1.0 {
                        let lid = Rect::new(rect.origin.x - 4.0, rect.origin.y - t * 60.0, rect.size.x + 8.0, rect.size.y * 0.25);
                        let color = Color::from_rgb8(theme.shade).with_opacity(1.0 - t);
                        p.fill_rect(lid, 3.0, color);
                    }
                }
            });
        }
    }

    fn paint_prompt(&self, p: &mut Painter<'_>) {
        let Some(prompt) = self.reveal.prompt_text() else {
            return;
        };
        let size = 18.0;
        let anchor = self.layout.prompt_anchor;
        let pulse = 0.75 + 0.25 * (self.now * PI).sin().abs();
        let color = self.content.palette.text.with_opacity(pulse);
        let width = self.layout.envelope.size.x * 1.4;
        p.text_centered(prompt, size, color, Rect::new(anchor.x - width * 0.5, anchor.y - size, width, size * 1.5));
    }

    fn paint_scroll_hint(&self, p: &mut Painter<'_>) {
        let shown = self.layout.compact
            && self.gifts.is_some()
            && self.reveal.state().is_open()
            && self.scroll < 10.0
            && self.layout.max_scroll() > 0.0;
        if !shown {
            return;
        }
        let vp = self.viewport;
        let color = self.content.palette.text.with_opacity(0.85);
        p.text_centered(SCROLL_HINT, 15.0, color, Rect::new(0.0, vp.height - 64.0, vp.width, 20.0));
        let bob = (self.now * 2.0 * PI).sin() * 3.0;
        let arrow = Rect::from_center_size(Vec2::new(vp.width * 0.5, vp.height - 28.0 + bob), Vec2::new(14.0, 9.0));
        p.fill_triangle(arrow, false, color);
    }

    fn paint_lightbox(&mut self, p: &mut Painter<'_>) {
        let Some(photo) = self.lightbox.as_ref().and_then(Lightbox::active) else {
            return;
        };
        let lb = self.lightbox_layout();
        let vp = self.viewport;

        p.fill_rect(vp.bounds(), 0.0, Color::BLACK.with_opacity(0.85));
        match self.photos.get(&photo.url) {
            Some(entry) => p.image(entry.image, lb.image, 8.0, 1.0),
            None => p.fill_rect(lb.image, 8.0, Color::from_rgb8([0x33, 0x33, 0x33])),
        }

        p.fill_ellipse(lb.close, Color::WHITE.with_opacity(0.15));
        let c = lb.close.center();
        let bar = Rect::from_center_size(c, Vec2::new(lb.close.size.x * 0.5, 2.5));
        for angle in [PI / 4.0, -PI / 4.0] {
            p.with_transform(Mat3::rotate(angle).about(c), |p| p.fill_rect(bar, 1.0, Color::WHITE));
        }
        self.focus.register(FocusTarget::LightboxClose);
        if self.focus.is_focused(FocusTarget::LightboxClose) {
            stroke_rect(p, lb.close.inset(-4.0, -4.0), 2.0, Color::WHITE);
        }

        let hint = Rect::new(0.0, lb.hint_anchor.y - 8.0, vp.width, 16.0);
        p.text_centered(CLOSE_HINT, 14.0, Color::WHITE.with_opacity(0.7), hint);
    }
}

impl Drop for SceneComposer {
    fn drop(&mut self) {
        self.unmount();
    }
}

// ── shapes ────────────────────────────────────────────────────────────────

fn stroke_rect(p: &mut Painter<'_>, r: Rect, width: f32, color: Color) {
    let (o, s) = (r.origin, r.size);
    p.fill_rect(Rect::new(o.x, o.y, s.x, width), 0.0, color);
    p.fill_rect(Rect::new(o.x, o.y + s.y - width, s.x, width), 0.0, color);
    p.fill_rect(Rect::new(o.x, o.y, width, s.y), 0.0, color);
    p.fill_rect(Rect::new(o.x + s.x - width, o.y, width, s.y), 0.0, color);
}

/// Two lobes over a downward point, for fonts without a heart glyph.
fn paint_heart_shape(p: &mut Painter<'_>, r: Rect, color: Color) {
    let (o, s) = (r.origin, r.size);
    let lobe = Vec2::new(s.x * 0.55, s.y * 0.55);
    p.fill_ellipse(Rect::from_origin_size(o, lobe), color);
    p.fill_ellipse(Rect::from_origin_size(Vec2::new(o.x + s.x - lobe.x, o.y), lobe), color);
    p.fill_triangle(Rect::new(o.x, o.y + s.y * 0.3, s.x, s.y * 0.7), false, color);
}

/// Wrapped present: lid and body with a ribbon cross and a bow.
fn paint_present(p: &mut Painter<'_>, r: Rect, theme: &PresentTheme, opacity: f32) {
    let body = Color::from_rgb8(theme.body).with_opacity(opacity);
    let shade = Color::from_rgb8(theme.shade).with_opacity(opacity);
    let ribbon = Color::from_rgb8(theme.ribbon).with_opacity(opacity);
    let (o, s) = (r.origin, r.size);

    let lid_h = s.y * 0.25;
    let box_rect = Rect::new(o.x, o.y + lid_h, s.x, s.y - lid_h);
    p.fill_rect(box_rect, 3.0, body);
    p.fill_rect(Rect::new(o.x, box_rect.center().y - s.y * 0.04, s.x, s.y * 0.08), 0.0, ribbon);

    let ribbon_w = s.x * 0.14;
    let ribbon_x = o.x + (s.x - ribbon_w) * 0.5;
    p.fill_rect(Rect::new(ribbon_x, box_rect.origin.y, ribbon_w, box_rect.size.y), 0.0, ribbon);

    let lid = Rect::new(o.x - 4.0, o.y, s.x + 8.0, lid_h);
    p.fill_rect(lid, 3.0, shade);
    p.fill_rect(Rect::new(ribbon_x, lid.origin.y, ribbon_w, lid_h), 0.0, ribbon);

    let bow = Vec2::new(s.x * 0.26, s.y * 0.14);
    let knot = Vec2::new(o.x + s.x * 0.5, lid.origin.y);
    p.fill_ellipse(Rect::from_origin_size(Vec2::new(knot.x - bow.x, knot.y - bow.y), bow), ribbon);
    p.fill_ellipse(Rect::from_origin_size(Vec2::new(knot.x, knot.y - bow.y), bow), ribbon);
    p.fill_ellipse(Rect::from_center_size(knot, Vec2::new(bow.y * 0.8, bow.y * 0.8)), ribbon.darken(0.15));
}

#[cfg(test)]
mod tests {
    use super::*;
    use postmark_engine::scene::DrawList;
    use postmark_engine::text::FontSystem;

    use crate::card::AnimationKind;
    use crate::tilt::TiltAxes;

    fn card(animation: AnimationKind, photos: &[&str]) -> CardContent {
        CardContent {
            recipient_name: "Ada".to_string(),
            greeting: "Happy Birthday!".to_string(),
            message: "Have a wonderful day.".to_string(),
            from_name: "Grace".to_string(),
            animation,
            include_photos: !photos.is_empty(),
            photo_urls: photos.iter().map(|s| s.to_string()).collect(),
            ..CardContent::default()
        }
    }

    fn mount(content: CardContent, options: SceneOptions) -> SceneComposer {
        let mut rng = fastrand::Rng::with_seed(7);
        SceneComposer::mount_with_rng(content, options, MountEnv::default(), &mut rng)
    }

    fn open_options() -> SceneOptions {
        SceneOptions { preview: false, initial_state: RevealState::Open }
    }

    fn paint(scene: &mut SceneComposer) -> DrawList {
        let fonts = FontSystem::new();
        let mut list = DrawList::new();
        {
            let mut painter = Painter::new(&mut list, &fonts, None);
            scene.paint(&mut painter);
        }
        list
    }

    fn envelope_center(scene: &SceneComposer) -> Vec2 {
        let local = scene.layout().envelope.center();
        scene.wrapper_transform().map_point(local).unwrap()
    }

    fn key(k: Key) -> SceneEvent {
        SceneEvent::KeyPress { key: k, modifiers: Modifiers::default() }
    }

    // ── scenarios ─────────────────────────────────────────────────────────

    #[test]
    fn hearts_without_photos_have_no_gifts() {
        let mut scene = mount(card(AnimationKind::Hearts, &[]), SceneOptions::default());
        assert_eq!(scene.particles().len(), 40);
        assert!(scene.gifts().is_none());
        assert!(scene.lightbox().is_none());
        assert!(scene.gift_states().is_empty());
        assert_eq!(scene.click_gift(0), EventResult::Ignored);
        assert!(scene.access_nodes().iter().all(|n| n.role != AccessRole::Image));
    }

    #[test]
    fn preview_is_static() {
        let mut scene = mount(card(AnimationKind::None, &[]), SceneOptions { preview: true, ..Default::default() });
        assert!(scene.frame_task().is_none());
        assert!(!scene.subscriptions().pointer_move);
        assert!(!scene.subscriptions().pointer_leave);

        let before = scene.wrapper_transform();
        assert_eq!(scene.handle(SceneEvent::PointerMoved { pos: Vec2::new(10.0, 10.0) }), EventResult::Ignored);
        for i in 0..30 {
            scene.frame(i as f32 * 0.1);
        }
        assert_eq!(scene.wrapper_transform(), before);
        assert_eq!(scene.tilt().target(), TiltAxes::ZERO);

        scene.handle(SceneEvent::Click { pos: envelope_center(&scene) });
        scene.advance();
        assert_eq!(scene.reveal_state(), RevealState::Unopened);
    }

    #[test]
    fn preview_fills_blank_text() {
        let scene = mount(CardContent::default(), SceneOptions { preview: true, ..Default::default() });
        assert_eq!(scene.content().recipient_name, "John");
        assert_eq!(scene.content().greeting, "Dear John,");
    }

    #[test]
    fn preview_gifts_follow_the_initial_state() {
        let photos = card(AnimationKind::None, &["a.png", "b.png"]);
        let preview = SceneOptions { preview: true, ..Default::default() };
        let mut closed = mount(photos.clone(), preview);
        assert_eq!(closed.gift_states(), vec![GiftWrapState::Wrapped; 2]);
        assert_eq!(closed.click_gift(0), EventResult::Ignored);

        let open = mount(photos, SceneOptions { preview: true, initial_state: RevealState::Open });
        assert_eq!(open.gift_states(), vec![GiftWrapState::Unwrapped; 2]);
    }

    #[test]
    fn initial_open_shows_photo_unwrapped() {
        let scene = mount(card(AnimationKind::None, &["a.png"]), open_options());
        assert_eq!(scene.gift_states(), vec![GiftWrapState::Unwrapped]);
        assert_eq!(scene.tilt().multiplier(), 0.0);
        assert_eq!(scene.prompt_text(), None);
    }

    #[test]
    fn three_advances_end_open() {
        let mut scene = mount(card(AnimationKind::None, &[]), SceneOptions::default());
        assert!(scene.advance().is_consumed());
        assert_eq!(scene.reveal_state(), RevealState::Flapped);
        assert!(scene.advance().is_consumed());
        assert_eq!(scene.reveal_state(), RevealState::Open);
        assert_eq!(scene.advance(), EventResult::Ignored);
        assert_eq!(scene.reveal_state(), RevealState::Open);
    }

    // ── particles ─────────────────────────────────────────────────────────

    #[test]
    fn particles_survive_everything_within_a_mount() {
        let mut scene = mount(card(AnimationKind::Confetti, &["a.png"]), SceneOptions::default());
        let generated = scene.particles().clone();
        assert_eq!(generated.len(), 55);

        for i in 0..20 {
            scene.frame(i as f32 * 0.25);
        }
        scene.handle(SceneEvent::PointerMoved { pos: Vec2::new(200.0, 100.0) });
        scene.advance();
        scene.advance();
        scene.resize(Viewport::new(390.0, 700.0));
        scene.frame(10.0);
        scene.click_gift(0);
        scene.click_gift(0);
        paint(&mut scene);

        assert_eq!(scene.particles(), &generated);
    }

    #[test]
    fn fresh_mounts_generate_fresh_particles() {
        let first = SceneComposer::mount(card(AnimationKind::Snowflakes, &[]), SceneOptions::default(), MountEnv::default());
        let second = SceneComposer::mount(card(AnimationKind::Snowflakes, &[]), SceneOptions::default(), MountEnv::default());
        assert_eq!(first.particles().len(), second.particles().len());
        assert_ne!(first.particles(), second.particles());
    }

    // ── tilt ──────────────────────────────────────────────────────────────

    #[test]
    fn pointer_drives_tilt_through_frames() {
        let mut scene = mount(card(AnimationKind::None, &[]), SceneOptions::default());
        scene.enqueue(SceneEvent::PointerMoved { pos: Vec2::new(1100.0, 380.0) });
        assert_eq!(scene.tilt().target(), TiltAxes::ZERO);
        scene.frame(0.016);
        assert_eq!(scene.tilt().target().rotate_y, 10.0);
        assert!(scene.tilt().current().rotate_y > 0.0);
        assert_eq!(scene.frame_task().map(FrameTask::frames), Some(1));
    }

    #[test]
    fn opening_settles_the_tilt() {
        let mut scene = mount(card(AnimationKind::None, &[]), SceneOptions::default());
        scene.handle(SceneEvent::PointerMoved { pos: Vec2::new(0.0, 0.0) });
        for i in 0..20 {
            scene.frame(i as f32 / 60.0);
        }
        scene.advance();
        scene.advance();
        assert_eq!(scene.tilt().target(), TiltAxes::ZERO);

        scene.handle(SceneEvent::PointerMoved { pos: Vec2::new(900.0, 700.0) });
        assert_eq!(scene.tilt().target(), TiltAxes::ZERO);
        for i in 20..800 {
            scene.frame(i as f32 / 60.0);
        }
        assert!(scene.tilt().current().max_distance(&TiltAxes::ZERO) < 1e-3);
    }

    #[test]
    fn touch_hosts_get_no_pointer_tracking() {
        let mut rng = fastrand::Rng::with_seed(1);
        let env = MountEnv { touch_capable: true };
        let scene = SceneComposer::mount_with_rng(card(AnimationKind::None, &[]), SceneOptions::default(), env, &mut rng);
        let subs = scene.subscriptions();
        assert!(!subs.pointer_move && !subs.pointer_leave);
        assert!(subs.keys && subs.escape);
        assert!(scene.frame_task_armed());
    }

    // ── input routing ─────────────────────────────────────────────────────

    #[test]
    fn clicking_the_envelope_advances_and_focuses() {
        let mut scene = mount(card(AnimationKind::None, &[]), SceneOptions::default());
        let pos = envelope_center(&scene);
        assert!(scene.handle(SceneEvent::Click { pos }).is_consumed());
        assert_eq!(scene.reveal_state(), RevealState::Flapped);
        paint(&mut scene);
        assert_eq!(scene.focused(), Some(FocusTarget::Envelope));

        assert_eq!(scene.handle(SceneEvent::Click { pos: Vec2::new(2.0, 2.0) }), EventResult::Ignored);
    }

    #[test]
    fn keyboard_activates_the_focused_envelope() {
        let mut scene = mount(card(AnimationKind::None, &[]), SceneOptions::default());
        assert_eq!(scene.handle(key(Key::Enter)), EventResult::Ignored);
        paint(&mut scene);
        scene.handle(key(Key::Tab));
        assert_eq!(scene.focused(), Some(FocusTarget::Envelope));
        scene.handle(key(Key::Enter));
        scene.handle(key(Key::Space));
        assert_eq!(scene.reveal_state(), RevealState::Open);
        assert_eq!(scene.access_nodes()[0].label, "Envelope opened. Letter revealed.");
    }

    #[test]
    fn gifts_ignore_clicks_until_open() {
        let mut scene = mount(card(AnimationKind::None, &["a.png", "b.png"]), SceneOptions::default());
        assert_eq!(scene.click_gift(0), EventResult::Ignored);
        assert_eq!(scene.gift_states(), vec![GiftWrapState::Wrapped; 2]);

        scene.advance();
        scene.advance();
        assert!(scene.click_gift(1).is_consumed());
        assert_eq!(scene.gift_states(), vec![GiftWrapState::Wrapped, GiftWrapState::Unwrapped]);
    }

    #[test]
    fn gifts_appear_after_their_stagger() {
        let mut scene = mount(card(AnimationKind::None, &["a.png"]), SceneOptions::default());
        scene.advance();
        scene.advance();
        let slot = scene.layout().gifts[0];
        let center = scene.wrapper_transform().map_point(slot.rect.center()).unwrap();
        assert_eq!(scene.cursor(), SceneCursor::Default);

        scene.frame(0.5);
        assert_eq!(scene.handle(SceneEvent::Click { pos: center }), EventResult::Ignored);

        scene.frame(5.0);
        let center = scene.wrapper_transform().map_point(slot.rect.center()).unwrap();
        scene.handle(SceneEvent::PointerMoved { pos: center });
        assert_eq!(scene.cursor(), SceneCursor::Pointer);
        assert!(scene.handle(SceneEvent::Click { pos: center }).is_consumed());
        assert_eq!(scene.gift_states(), vec![GiftWrapState::Unwrapped]);
    }

    // ── lightbox ──────────────────────────────────────────────────────────

    #[test]
    fn lightbox_locks_scroll_and_closes_on_escape() {
        let mut scene = mount(card(AnimationKind::None, &["a.png"]), open_options());
        assert!(scene.click_gift(0).is_consumed());
        let photo = scene.lightbox().and_then(Lightbox::active).unwrap();
        assert_eq!(photo.label, "Photo 1");
        assert!(scene.is_scroll_locked());
        assert_eq!(scene.handle(SceneEvent::Scroll { delta: 100.0 }), EventResult::Ignored);

        paint(&mut scene);
        assert_eq!(scene.focused(), Some(FocusTarget::LightboxClose));
        assert!(scene.access_nodes().iter().any(|n| n.role == AccessRole::Dialog && n.label == DIALOG_LABEL));

        assert!(scene.handle(key(Key::Escape)).is_consumed());
        assert!(!scene.is_scroll_locked());
        assert_eq!(scene.handle(key(Key::Escape)), EventResult::Ignored);
    }

    #[test]
    fn backdrop_closes_but_image_does_not() {
        let mut scene = mount(card(AnimationKind::None, &["a.png"]), open_options());
        scene.click_gift(0);
        let layout = LightboxLayout::compute(DEFAULT_VIEWPORT, 4.0 / 3.0);

        assert_eq!(scene.handle(SceneEvent::Click { pos: layout.image.center() }), EventResult::Ignored);
        assert!(scene.lightbox().is_some_and(Lightbox::is_open));

        scene.handle(SceneEvent::Click { pos: Vec2::new(5.0, DEFAULT_VIEWPORT.height - 5.0) });
        assert!(!scene.lightbox().is_some_and(Lightbox::is_open));

        scene.click_gift(0);
        scene.handle(SceneEvent::Click { pos: layout.close.center() });
        assert!(!scene.is_scroll_locked());
    }

    // ── scrolling ─────────────────────────────────────────────────────────

    #[test]
    fn compact_layout_scrolls_within_bounds() {
        let mut scene = mount(card(AnimationKind::None, &["a", "b", "c", "d"]), open_options());
        scene.resize(Viewport::new(390.0, 700.0));
        let max = scene.layout().max_scroll();
        assert!(max > 0.0);

        assert!(scene.handle(SceneEvent::Scroll { delta: 1e6 }).is_consumed());
        assert_eq!(scene.scroll(), max);
        scene.handle(key(Key::Home));
        assert_eq!(scene.scroll(), 0.0);
        assert_eq!(scene.handle(SceneEvent::Scroll { delta: -10.0 }), EventResult::Ignored);
    }

    // ── painting ──────────────────────────────────────────────────────────

    fn close(a: Vec2, b: Vec2) -> bool {
        (a.x - b.x).abs() < 1e-2 && (a.y - b.y).abs() < 1e-2
    }

    #[test]
    fn card_items_carry_the_wrapper_transform() {
        let mut scene = mount(card(AnimationKind::None, &[]), SceneOptions::default());
        scene.handle(SceneEvent::PointerMoved { pos: Vec2::new(50.0, 50.0) });
        for i in 0..30 {
            scene.frame(i as f32 / 60.0);
        }
        let list = paint(&mut scene);
        assert!(!list.is_empty());

        // The flip squeeze and flap swing both pivot on points that keep the
        // envelope center fixed, so every item maps it like the wrapper does.
        let center = scene.layout().envelope.center();
        let expected = scene.wrapper_transform().map_point(center).unwrap();
        assert!(!close(expected, center));
        for item in list.items() {
            assert!(close(item.transform.map_point(center).unwrap(), expected));
        }
    }

    #[test]
    fn particles_paint_outside_the_wrapper() {
        let mut scene = mount(card(AnimationKind::Confetti, &[]), SceneOptions::default());
        scene.handle(SceneEvent::PointerMoved { pos: Vec2::new(0.0, 0.0) });
        for i in 0..30 {
            scene.frame(10.0 + i as f32 / 60.0);
        }
        let now = 10.0 + 29.0 / 60.0;
        let pose = scene
            .particles()
            .instances()
            .iter()
            .find_map(|p| p.pose(now, DEFAULT_VIEWPORT))
            .unwrap();
        let list = paint(&mut scene);
        let first = &list.items()[0];
        assert!(close(first.transform.map_point(pose.center).unwrap(), pose.center));
        assert!(!close(scene.wrapper_transform().map_point(pose.center).unwrap(), pose.center));
    }

    // ── teardown ──────────────────────────────────────────────────────────

    #[test]
    fn unmount_cancels_once_and_detaches() {
        let mut scene = mount(card(AnimationKind::Snowflakes, &["a.png"]), open_options());
        scene.click_gift(0);
        assert!(scene.is_scroll_locked());

        scene.unmount();
        assert!(!scene.is_mounted());
        assert!(!scene.frame_task_armed());
        assert!(!scene.subscriptions().any());
        assert!(!scene.is_scroll_locked());
        assert!(!scene.needs_redraw());

        let frames = scene.frame_task().map(FrameTask::frames);
        scene.frame(1.0);
        assert_eq!(scene.frame_task().map(FrameTask::frames), frames);
        assert_eq!(scene.handle(SceneEvent::PointerLeft), EventResult::Ignored);
        scene.unmount();
    }

    #[test]
    fn dropping_the_scene_releases_the_scroll_lock() {
        let page = {
            let mut scene = mount(card(AnimationKind::None, &["a.png"]), open_options());
            scene.click_gift(0);
            scene.page.clone()
        };
        assert!(!page.is_locked());
    }
}
