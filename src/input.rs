//! Keyboard input — translation of terminal events and held-key tracking.
//!
//! Terminals fall into two classes:
//! * **Keyboard-enhancement capable** (Ghostty, kitty, etc.): proper
//!   `Press` / `Repeat` / `Release` events, so keys are dropped on release.
//! * **Classic terminals**: only `Press` events (OS key-repeat shows as
//!   repeated `Press`).  Keys expire after `HOLD_WINDOW` frames of silence,
//!   which is shorter than the OS repeat interval, so a key stays live while
//!   it is actively generating repeats.

use std::collections::HashMap;

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// A key is considered "held" if its last press/repeat event arrived within
/// this many frames.  8 frames @ 60 FPS ≈ 133 ms, which the OS key-repeat
/// rate (≥ 15 Hz) always refreshes before expiry.
pub const HOLD_WINDOW: u64 = 8;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    Left,
    Right,
    Fire,
    Other,
}

/// A discrete input event, polled once per frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputEvent {
    Quit,
    KeyDown(Key),
    /// OS auto-repeat of a key that is already down.  Keeps it held but
    /// never fires.
    KeyRepeat(Key),
    KeyUp(Key),
}

/// Snapshot of the continuously held keys for one frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct KeyState {
    pub left: bool,
    pub right: bool,
    /// Reported for completeness only; shooting is driven by `KeyDown(Fire)`
    /// events, never by holding the key.
    pub fire: bool,
}

fn map_key(code: KeyCode) -> Key {
    match code {
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Key::Left,
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => Key::Right,
        KeyCode::Char(' ') => Key::Fire,
        _ => Key::Other,
    }
}

/// Translate a raw terminal event.  Anything that is not a key event
/// (resize, mouse, focus, paste) yields `None` and is ignored.
pub fn translate(event: &Event) -> Option<InputEvent> {
    let Event::Key(KeyEvent { code, kind, modifiers, .. }) = event else {
        return None;
    };
    let is_quit = matches!(code, KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc)
        || (*code == KeyCode::Char('c') && modifiers.contains(KeyModifiers::CONTROL));

    match kind {
        KeyEventKind::Press if is_quit => Some(InputEvent::Quit),
        KeyEventKind::Press => Some(InputEvent::KeyDown(map_key(*code))),
        KeyEventKind::Repeat => Some(InputEvent::KeyRepeat(map_key(*code))),
        KeyEventKind::Release => Some(InputEvent::KeyUp(map_key(*code))),
    }
}

/// Maps each held key → the frame it was last seen (press or repeat).
#[derive(Debug)]
pub struct KeyTracker {
    key_frame: HashMap<Key, u64>,
    window: u64,
}

impl Default for KeyTracker {
    fn default() -> Self {
        Self::with_window(HOLD_WINDOW)
    }
}

impl KeyTracker {
    pub fn with_window(window: u64) -> Self {
        Self { key_frame: HashMap::new(), window }
    }

    /// Classic terminals report OS auto-repeat as another `Press`.  A
    /// `KeyDown` for a key that is still held is demoted to `KeyRepeat` so it
    /// neither fires again nor acknowledges the game-over screen.
    pub fn classify(&self, event: InputEvent, frame: u64) -> InputEvent {
        match event {
            InputEvent::KeyDown(key) if self.is_held(key, frame) => InputEvent::KeyRepeat(key),
            other => other,
        }
    }

    /// Translate, classify and record one raw terminal event.
    pub fn process(&mut self, event: &Event, frame: u64) -> Option<InputEvent> {
        let event = self.classify(translate(event)?, frame);
        self.observe(&event, frame);
        Some(event)
    }

    /// Record an event seen during `frame`.
    pub fn observe(&mut self, event: &InputEvent, frame: u64) {
        match event {
            InputEvent::KeyDown(key) | InputEvent::KeyRepeat(key) => {
                self.key_frame.insert(*key, frame);
            }
            InputEvent::KeyUp(key) => {
                self.key_frame.remove(key);
            }
            InputEvent::Quit => {}
        }
    }

    /// Returns true if `key` was seen within the hold window of `frame`.
    pub fn is_held(&self, key: Key, frame: u64) -> bool {
        self.key_frame
            .get(&key)
            .map(|&last| frame.saturating_sub(last) <= self.window)
            .unwrap_or(false)
    }

    pub fn snapshot(&self, frame: u64) -> KeyState {
        KeyState {
            left: self.is_held(Key::Left, frame),
            right: self.is_held(Key::Right, frame),
            fire: self.is_held(Key::Fire, frame),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode, kind: KeyEventKind, modifiers: KeyModifiers) -> Event {
        Event::Key(KeyEvent::new_with_kind(code, modifiers, kind))
    }

    #[test]
    fn arrows_and_wasd_steer() {
        let press = |c| translate(&key(c, KeyEventKind::Press, KeyModifiers::NONE));
        assert_eq!(press(KeyCode::Left), Some(InputEvent::KeyDown(Key::Left)));
        assert_eq!(press(KeyCode::Char('a')), Some(InputEvent::KeyDown(Key::Left)));
        assert_eq!(press(KeyCode::Char('D')), Some(InputEvent::KeyDown(Key::Right)));
        assert_eq!(press(KeyCode::Char(' ')), Some(InputEvent::KeyDown(Key::Fire)));
        assert_eq!(press(KeyCode::Enter), Some(InputEvent::KeyDown(Key::Other)));
    }

    #[test]
    fn quit_keys() {
        assert_eq!(
            translate(&key(KeyCode::Esc, KeyEventKind::Press, KeyModifiers::NONE)),
            Some(InputEvent::Quit)
        );
        assert_eq!(
            translate(&key(KeyCode::Char('c'), KeyEventKind::Press, KeyModifiers::CONTROL)),
            Some(InputEvent::Quit)
        );
        // Releasing q is not a second quit
        assert_eq!(
            translate(&key(KeyCode::Char('q'), KeyEventKind::Release, KeyModifiers::NONE)),
            Some(InputEvent::KeyUp(Key::Other))
        );
    }

    #[test]
    fn non_key_events_are_ignored() {
        assert_eq!(translate(&Event::Resize(80, 24)), None);
        assert_eq!(translate(&Event::FocusLost), None);
    }

    #[test]
    fn held_key_expires_after_window() {
        let mut t = KeyTracker::with_window(4);
        t.observe(&InputEvent::KeyDown(Key::Left), 10);
        assert!(t.snapshot(14).left);
        assert!(!t.snapshot(15).left);
    }

    #[test]
    fn repeat_refreshes_and_release_clears() {
        let mut t = KeyTracker::with_window(4);
        t.observe(&InputEvent::KeyDown(Key::Right), 1);
        t.observe(&InputEvent::KeyRepeat(Key::Right), 5);
        assert!(t.snapshot(9).right);
        t.observe(&InputEvent::KeyUp(Key::Right), 9);
        assert_eq!(t.snapshot(9), KeyState::default());
    }

    #[test]
    fn press_of_held_key_is_classified_as_repeat() {
        let mut t = KeyTracker::with_window(4);
        let space = key(KeyCode::Char(' '), KeyEventKind::Press, KeyModifiers::NONE);

        assert_eq!(t.process(&space, 1), Some(InputEvent::KeyDown(Key::Fire)));
        assert!(t.snapshot(1).fire);
        // OS auto-repeat arriving as another press
        assert_eq!(t.process(&space, 3), Some(InputEvent::KeyRepeat(Key::Fire)));
        assert_eq!(t.process(&space, 6), Some(InputEvent::KeyRepeat(Key::Fire)));
        // After the hold window lapses a press is fresh again
        assert_eq!(t.process(&space, 20), Some(InputEvent::KeyDown(Key::Fire)));
    }

    #[test]
    fn press_after_release_is_a_new_press() {
        let mut t = KeyTracker::with_window(4);
        let press = key(KeyCode::Left, KeyEventKind::Press, KeyModifiers::NONE);
        let release = key(KeyCode::Left, KeyEventKind::Release, KeyModifiers::NONE);

        t.process(&press, 1);
        assert_eq!(t.process(&release, 2), Some(InputEvent::KeyUp(Key::Left)));
        assert_eq!(t.process(&press, 3), Some(InputEvent::KeyDown(Key::Left)));
    }

    #[test]
    fn classify_leaves_quit_and_releases_alone() {
        let mut t = KeyTracker::with_window(4);
        t.observe(&InputEvent::KeyDown(Key::Other), 1);
        assert_eq!(t.classify(InputEvent::Quit, 2), InputEvent::Quit);
        assert_eq!(t.classify(InputEvent::KeyUp(Key::Other), 2), InputEvent::KeyUp(Key::Other));
    }
}
