//! Keyboard focus for the scene's interactive controls.
//!
//! [`FocusManager`] lives on the scene composer.
//!
//! # How focus works
//!
//! 1. While painting, each focusable control that is currently shown calls
//!    [`FocusManager::register`], in paint order.
//! 2. Clicking a control requests focus for it ([`FocusManager::request_focus`]).
//! 3. Tab / Shift+Tab call [`FocusManager::advance`], cycling through the
//!    controls registered by the last paint.
//! 4. [`FocusManager::end_frame`] applies a pending request and drops focus
//!    from a control that is no longer shown.

/// Focusable controls of a card scene.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum FocusTarget {
    /// The envelope button that drives the reveal.
    Envelope,
    /// Close button of the open lightbox.
    LightboxClose,
}

#[derive(Debug, Default)]
pub struct FocusManager {
    focused: Option<FocusTarget>,
    /// Registered this frame, in paint order.
    registered: Vec<FocusTarget>,
    /// What the previous frame registered; Tab cycles through this.
    cycle: Vec<FocusTarget>,
    requested: Option<FocusTarget>,
}

impl FocusManager {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn focused(&self) -> Option<FocusTarget> {
        self.focused
    }

    #[inline]
    pub fn is_focused(&self, target: FocusTarget) -> bool {
        self.focused == Some(target)
    }

    /// Focus `target` at the end of the frame.
    #[inline]
    pub fn request_focus(&mut self, target: FocusTarget) {
        self.requested = Some(target);
    }

    /// Enrolls `target` in Tab cycling for this frame.
    #[inline]
    pub fn register(&mut self, target: FocusTarget) {
        if !self.registered.contains(&target) {
            self.registered.push(target);
        }
    }

    /// Moves focus to the next (or previous, if `reverse`) control.
    pub fn advance(&mut self, reverse: bool) {
        let order = &self.cycle;
        if order.is_empty() {
            return;
        }
        let n = order.len();
        self.focused = Some(match self.focused.and_then(|f| order.iter().position(|&x| x == f)) {
            None => order[if reverse { n - 1 } else { 0 }],
            Some(i) if reverse => order[(i + n - 1) % n],
            Some(i) => order[(i + 1) % n],
        });
    }

    pub fn end_frame(&mut self) {
        if let Some(req) = self.requested.take() {
            self.focused = Some(req);
        }
        std::mem::swap(&mut self.cycle, &mut self.registered);
        self.registered.clear();
        if let Some(f) = self.focused {
            if !self.cycle.contains(&f) {
                self.focused = None;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_frame(fm: &mut FocusManager, targets: &[FocusTarget]) {
        for &t in targets {
            fm.register(t);
        }
        fm.end_frame();
    }

    #[test]
    fn tab_cycles_in_paint_order() {
        let mut fm = FocusManager::new();
        with_frame(&mut fm, &[FocusTarget::Envelope, FocusTarget::LightboxClose]);
        fm.advance(false);
        assert_eq!(fm.focused(), Some(FocusTarget::Envelope));
        fm.advance(false);
        assert_eq!(fm.focused(), Some(FocusTarget::LightboxClose));
        fm.advance(false);
        assert_eq!(fm.focused(), Some(FocusTarget::Envelope));
    }

    #[test]
    fn shift_tab_goes_backwards() {
        let mut fm = FocusManager::new();
        with_frame(&mut fm, &[FocusTarget::Envelope, FocusTarget::LightboxClose]);
        fm.advance(true);
        assert_eq!(fm.focused(), Some(FocusTarget::LightboxClose));
        fm.advance(true);
        assert_eq!(fm.focused(), Some(FocusTarget::Envelope));
    }

    #[test]
    fn nothing_registered_means_no_focus() {
        let mut fm = FocusManager::new();
        fm.advance(false);
        assert_eq!(fm.focused(), None);
    }

    #[test]
    fn request_applies_at_end_of_frame() {
        let mut fm = FocusManager::new();
        fm.request_focus(FocusTarget::Envelope);
        assert!(!fm.is_focused(FocusTarget::Envelope));
        with_frame(&mut fm, &[FocusTarget::Envelope]);
        assert!(fm.is_focused(FocusTarget::Envelope));
    }

    #[test]
    fn focus_drops_when_control_disappears() {
        let mut fm = FocusManager::new();
        with_frame(&mut fm, &[FocusTarget::Envelope, FocusTarget::LightboxClose]);
        fm.request_focus(FocusTarget::LightboxClose);
        with_frame(&mut fm, &[FocusTarget::Envelope, FocusTarget::LightboxClose]);
        with_frame(&mut fm, &[FocusTarget::Envelope]);
        assert_eq!(fm.focused(), None);
    }
}
