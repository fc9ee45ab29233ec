//! Presentation state machine: closed envelope → flipped → opened letter.

/// Reveal phase. Only ever moves forward.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum RevealState {
    /// Envelope shows its back.
    #[default]
    Unopened,
    /// Envelope flipped to the addressed front, flap still closed.
    Flapped,
    /// Flap open, letter out.
    Open,
}

impl RevealState {
    /// The state an advance event leads to; `Open` is terminal.
    #[inline]
    pub fn next(self) -> RevealState {
        match self {
            RevealState::Unopened => RevealState::Flapped,
            RevealState::Flapped | RevealState::Open => RevealState::Open,
        }
    }

    #[inline]
    pub fn is_open(self) -> bool {
        self == RevealState::Open
    }

    pub fn prompt_text(self) -> Option<&'static str> {
        match self {
            RevealState::Unopened => Some("Click to rotate"),
            RevealState::Flapped => Some("Click to open"),
            RevealState::Open => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RevealState::Unopened => "unopened",
            RevealState::Flapped => "flapped",
            RevealState::Open => "open",
        }
    }
}

/// Outcome of [`RevealMachine::advance`].
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Advance {
    Moved { from: RevealState, to: RevealState },
    Unchanged,
}

impl Advance {
    /// True only for the single advance that reached `Open`.
    #[inline]
    pub fn opened(self) -> bool {
        matches!(self, Advance::Moved { to: RevealState::Open, .. })
    }
}

// ── transition timing ─────────────────────────────────────────────────────

/// Envelope flip (Unopened → Flapped).
pub const FLIP_SECONDS: f32 = 0.8;
/// Flap swing (Flapped → Open).
pub const FLAP_SECONDS: f32 = 0.6;
/// Letter waits for the flap before rising.
pub const LETTER_DELAY_SECONDS: f32 = 0.4;
pub const LETTER_RISE_SECONDS: f32 = 0.9;

fn ease_in_out(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
    }
}

// ── RevealMachine ─────────────────────────────────────────────────────────

/// Owns the [`RevealState`] of one scene.
///
/// Besides the state it remembers when the state was entered so the
/// presentation can animate the transition. A machine constructed directly in
/// a state starts settled (no transition plays).
#[derive(Debug, Clone)]
pub struct RevealMachine {
    state: RevealState,
    entered_at: Option<f32>,
    locked: bool,
}

impl RevealMachine {
    pub fn new(initial: RevealState) -> Self {
        Self { state: initial, entered_at: None, locked: false }
    }

    /// A machine that ignores advance events (static previews).
    pub fn locked(initial: RevealState) -> Self {
        Self { state: initial, entered_at: None, locked: true }
    }

    #[inline]
    pub fn state(&self) -> RevealState {
        self.state
    }

    #[inline]
    pub fn is_locked(&self) -> bool {
        self.locked
    }

    /// Moves one step forward. `now` is scene time in seconds.
    pub fn advance(&mut self, now: f32) -> Advance {
        if self.locked {
            return Advance::Unchanged;
        }
        let from = self.state;
        let to = from.next();
        if to == from {
            return Advance::Unchanged;
        }
        self.state = to;
        self.entered_at = Some(now);
        log::info!("reveal: {} -> {}", from.as_str(), to.as_str());
        Advance::Moved { from, to }
    }

    /// Seconds spent in the current state; infinite when it was never entered
    /// through a transition.
    pub fn time_in_state(&self, now: f32) -> f32 {
        match self.entered_at {
            Some(at) => (now - at).max(0.0),
            None => f32::INFINITY,
        }
    }

    #[inline]
    pub fn prompt_text(&self) -> Option<&'static str> {
        self.state.prompt_text()
    }

    /// Accessible name of the envelope control.
    pub fn envelope_label(&self) -> &'static str {
        if self.state.is_open() {
            "Envelope opened. Letter revealed."
        } else {
            "Envelope. Click to interact."
        }
    }

    /// Envelope flip, 0 = back facing, 1 = front facing.
    pub fn flip_progress(&self, now: f32) -> f32 {
        match self.state {
            RevealState::Unopened => 0.0,
            RevealState::Flapped => ease_in_out(self.time_in_state(now) / FLIP_SECONDS),
            RevealState::Open => 1.0,
        }
    }

    /// Flap swing, 0 = closed, 1 = fully open.
    pub fn flap_progress(&self, now: f32) -> f32 {
        match self.state {
            RevealState::Open => ease_in_out(self.time_in_state(now) / FLAP_SECONDS),
            _ => 0.0,
        }
    }

    /// Letter rise, 0 = tucked in the envelope, 1 = fully out.
    pub fn letter_progress(&self, now: f32) -> f32 {
        match self.state {
            RevealState::Open => {
                let t = self.time_in_state(now) - LETTER_DELAY_SECONDS;
                ease_in_out(t / LETTER_RISE_SECONDS)
            }
            _ => 0.0,
        }
    }

    /// Whether a transition animation is still playing.
    pub fn is_transitioning(&self, now: f32) -> bool {
        let t = self.time_in_state(now);
        match self.state {
            RevealState::Unopened => false,
            RevealState::Flapped => t < FLIP_SECONDS,
            RevealState::Open => t < LETTER_DELAY_SECONDS + LETTER_RISE_SECONDS,
        }
    }
}

impl Default for RevealMachine {
    fn default() -> Self {
        Self::new(RevealState::Unopened)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── transitions ───────────────────────────────────────────────────────

    #[test]
    fn advance_walks_forward_once_per_event() {
        let mut m = RevealMachine::default();
        assert_eq!(
            m.advance(0.0),
            Advance::Moved { from: RevealState::Unopened, to: RevealState::Flapped }
        );
        let second = m.advance(1.0);
        assert!(second.opened());
        assert_eq!(m.advance(2.0), Advance::Unchanged);
        assert_eq!(m.state(), RevealState::Open);
    }

    #[test]
    fn state_after_n_events_equals_state_after_min_n_2() {
        let after = |n: usize| {
            let mut m = RevealMachine::default();
            for i in 0..n {
                m.advance(i as f32);
            }
            m.state()
        };
        for n in 0..8 {
            assert_eq!(after(n), after(n.min(2)));
            if n > 0 {
                assert!(after(n) >= after(n - 1));
            }
        }
    }

    #[test]
    fn open_is_terminal_and_keeps_entry_time() {
        let mut m = RevealMachine::default();
        m.advance(0.0);
        m.advance(1.0);
        m.advance(5.0);
        assert_eq!(m.time_in_state(2.0), 1.0);
    }

    #[test]
    fn locked_machine_ignores_advances() {
        let mut m = RevealMachine::locked(RevealState::Unopened);
        assert_eq!(m.advance(0.0), Advance::Unchanged);
        assert_eq!(m.state(), RevealState::Unopened);
    }

    // ── derived text ──────────────────────────────────────────────────────

    #[test]
    fn prompt_follows_state() {
        let mut m = RevealMachine::default();
        assert_eq!(m.prompt_text(), Some("Click to rotate"));
        m.advance(0.0);
        assert_eq!(m.prompt_text(), Some("Click to open"));
        m.advance(0.0);
        assert_eq!(m.prompt_text(), None);
    }

    #[test]
    fn envelope_label_reports_open() {
        let mut m = RevealMachine::new(RevealState::Flapped);
        assert_eq!(m.envelope_label(), "Envelope. Click to interact.");
        m.advance(0.0);
        assert_eq!(m.envelope_label(), "Envelope opened. Letter revealed.");
    }

    // ── animation progress ────────────────────────────────────────────────

    #[test]
    fn initial_state_is_settled() {
        let m = RevealMachine::new(RevealState::Open);
        assert_eq!(m.time_in_state(0.0), f32::INFINITY);
        assert_eq!(m.letter_progress(0.0), 1.0);
        assert!(!m.is_transitioning(0.0));
    }

    #[test]
    fn flip_runs_over_its_duration() {
        let mut m = RevealMachine::default();
        m.advance(10.0);
        assert_eq!(m.flip_progress(10.0), 0.0);
        let mid = m.flip_progress(10.0 + FLIP_SECONDS / 2.0);
        assert!((mid - 0.5).abs() < 1e-4);
        assert_eq!(m.flip_progress(10.0 + FLIP_SECONDS), 1.0);
        assert!(!m.is_transitioning(10.0 + FLIP_SECONDS));
    }

    #[test]
    fn letter_waits_for_the_flap() {
        let mut m = RevealMachine::new(RevealState::Flapped);
        m.advance(0.0);
        assert_eq!(m.letter_progress(LETTER_DELAY_SECONDS * 0.5), 0.0);
        assert!(m.flap_progress(LETTER_DELAY_SECONDS) > 0.0);
        assert_eq!(m.letter_progress(LETTER_DELAY_SECONDS + LETTER_RISE_SECONDS), 1.0);
    }
}
