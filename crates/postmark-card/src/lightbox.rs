//! Enlarged photo viewer and the page scroll lock it holds while open.

use std::cell::Cell;
use std::rc::Rc;

pub const DIALOG_LABEL: &str = "Enlarged photo viewer";
pub const CLOSE_LABEL: &str = "Close photo viewer";
pub const CLOSE_HINT: &str = "Tap anywhere to close";

// ── scroll lock ───────────────────────────────────────────────────────────

/// Page scroll capability shared by everything that may suspend it.
///
/// Scrolling is allowed while no [`ScrollLock`] guard is alive.
#[derive(Debug, Clone, Default)]
pub struct PageScroll {
    locks: Rc<Cell<u32>>,
}

impl PageScroll {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn is_locked(&self) -> bool {
        self.locks.get() > 0
    }

    pub fn lock(&self) -> ScrollLock {
        self.locks.set(self.locks.get() + 1);
        ScrollLock { locks: Rc::clone(&self.locks) }
    }
}

/// Suspends page scrolling until dropped.
#[derive(Debug)]
pub struct ScrollLock {
    locks: Rc<Cell<u32>>,
}

impl Drop for ScrollLock {
    fn drop(&mut self) {
        self.locks.set(self.locks.get().saturating_sub(1));
    }
}

// ── Lightbox ──────────────────────────────────────────────────────────────

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum CloseReason {
    CloseButton,
    Backdrop,
    Escape,
    Teardown,
}

#[derive(Debug)]
pub struct ActivePhoto {
    pub url: String,
    pub label: String,
    _lock: ScrollLock,
}

impl ActivePhoto {
    /// Label for the enlarged image; never empty.
    pub fn image_label(&self) -> &str {
        if self.label.trim().is_empty() { "Photo" } else { &self.label }
    }
}

/// Holds at most one enlarged photo.
#[derive(Debug)]
pub struct Lightbox {
    page: PageScroll,
    active: Option<ActivePhoto>,
}

impl Lightbox {
    pub fn new(page: PageScroll) -> Self {
        Self { page, active: None }
    }

    #[inline]
    pub fn active(&self) -> Option<&ActivePhoto> {
        self.active.as_ref()
    }

    #[inline]
    pub fn is_open(&self) -> bool {
        self.active.is_some()
    }

    /// Shows `url`, replacing any photo already shown.
    pub fn open(&mut self, url: impl Into<String>, label: impl Into<String>) {
        let url = url.into();
        log::info!("lightbox open: {url}");
        // Take the new guard before the old one drops so scroll never unlocks in between.
        let lock = self.page.lock();
        self.active = Some(ActivePhoto { url, label: label.into(), _lock: lock });
    }

    /// Returns `false` if nothing was open.
    pub fn close(&mut self, reason: CloseReason) -> bool {
        match self.active.take() {
            Some(photo) => {
                log::info!("lightbox closed ({reason:?}): {}", photo.url);
                true
            }
            None => false,
        }
    }
}
