use std::collections::HashSet;

use super::frame::InputFrame;
use super::types::{
    InputEvent,
    Key,
    KeyState,
    Modifiers,
    MouseButton,
    MouseButtonState,
    PointerButtonEvent,
    PointerMoveEvent,
    TouchEvent,
};

/// Current input state for the window.
#[derive(Debug, Default)]
pub struct InputState {
    pub modifiers: Modifiers,
    pub focused: bool,

    /// Pointer position in logical pixels.
    pub pointer_pos: Option<(f32, f32)>,

    pub keys_down: HashSet<Key>,
    pub buttons_down: HashSet<MouseButton>,

    /// Set once any touch contact has been observed.
    pub touch_seen: bool,
}

impl InputState {
    /// Applies an event to the held state and records the transition into `frame`.
    pub fn apply_event(&mut self, frame: &mut InputFrame, ev: InputEvent) {
        match &ev {
            InputEvent::ModifiersChanged(m) => self.modifiers = *m,

            InputEvent::Focused(f) => {
                self.focused = *f;
                if !*f {
                    // Focus loss can swallow the matching release.
                    self.keys_down.clear();
                    self.buttons_down.clear();
                }
            }

            InputEvent::PointerMoved(PointerMoveEvent { x, y }) => {
                self.pointer_pos = Some((*x, *y));
            }

            InputEvent::PointerLeft => self.pointer_pos = None,

            InputEvent::Key { key, state, modifiers, .. } => {
                self.modifiers = *modifiers;
                match state {
                    KeyState::Pressed => {
                        if self.keys_down.insert(*key) {
                            frame.keys_pressed.insert(*key);
                        }
                    }
                    KeyState::Released => {
                        if self.keys_down.remove(key) {
                            frame.keys_released.insert(*key);
                        }
                    }
                }
            }

            InputEvent::PointerButton(PointerButtonEvent { button, state, x, y, modifiers }) => {
                self.pointer_pos = Some((*x, *y));
                self.modifiers = *modifiers;
                match state {
                    MouseButtonState::Pressed => {
                        if self.buttons_down.insert(*button) {
                            frame.buttons_pressed.insert(*button);
                        }
                    }
                    MouseButtonState::Released => {
                        if self.buttons_down.remove(button) {
                            frame.buttons_released.insert(*button);
                        }
                    }
                }
            }

            InputEvent::MouseWheel { delta, modifiers } => {
                self.modifiers = *modifiers;
                frame.scroll_delta += delta.scroll_y();
            }

            InputEvent::Touch(TouchEvent { .. }) => self.touch_seen = true,
        }

        frame.events.push(ev);
    }

    pub fn key_down(&self, key: Key) -> bool {
        self.keys_down.contains(&key)
    }

    pub fn button_down(&self, btn: MouseButton) -> bool {
        self.buttons_down.contains(&btn)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{MouseWheelDelta, TouchPhase};

    fn press(button: MouseButton, state: MouseButtonState) -> InputEvent {
        InputEvent::PointerButton(PointerButtonEvent {
            button,
            state,
            x: 10.0,
            y: 20.0,
            modifiers: Modifiers::default(),
        })
    }

    #[test]
    fn button_transitions_are_recorded_once() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();

        state.apply_event(&mut frame, press(MouseButton::Left, MouseButtonState::Pressed));
        state.apply_event(&mut frame, press(MouseButton::Left, MouseButtonState::Pressed));
        assert!(state.button_down(MouseButton::Left));
        assert_eq!(frame.buttons_pressed.len(), 1);
        assert_eq!(frame.events.len(), 2);

        state.apply_event(&mut frame, press(MouseButton::Left, MouseButtonState::Released));
        assert!(frame.buttons_released.contains(&MouseButton::Left));
        assert_eq!(state.pointer_pos, Some((10.0, 20.0)));
    }

    #[test]
    fn focus_loss_clears_held_keys() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();
        state.apply_event(&mut frame, InputEvent::Key {
            key: Key::Space,
            state: KeyState::Pressed,
            modifiers: Modifiers::default(),
            repeat: false,
        });
        assert!(state.key_down(Key::Space));

        state.apply_event(&mut frame, InputEvent::Focused(false));
        assert!(!state.key_down(Key::Space));
    }

    #[test]
    fn wheel_lines_accumulate_as_pixels() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();
        let wheel = InputEvent::MouseWheel {
            delta: MouseWheelDelta::Line { x: 0.0, y: -1.0 },
            modifiers: Modifiers::default(),
        };
        state.apply_event(&mut frame, wheel.clone());
        state.apply_event(&mut frame, wheel);
        assert_eq!(frame.scroll_delta, 80.0);

        frame.clear();
        assert_eq!(frame.scroll_delta, 0.0);
        assert!(frame.is_empty());
    }

    #[test]
    fn touch_contact_is_remembered() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();
        assert!(!state.touch_seen);
        state.apply_event(&mut frame, InputEvent::Touch(TouchEvent {
            id: 1,
            phase: TouchPhase::Started,
            x: 0.0,
            y: 0.0,
        }));
        assert!(state.touch_seen);
    }
}
