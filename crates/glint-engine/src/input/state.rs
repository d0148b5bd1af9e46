use std::collections::HashSet;

use super::types::Key;

/// Current input state for the window.
///
/// Holds "is down" information and the latest pointer position; the runtime
/// feeds it from platform events, the application reads it once per update.
#[derive(Debug, Default)]
pub struct InputState {
    /// Whether the window is focused.
    pub focused: bool,

    /// Pointer position in physical pixels, `None` until the first move.
    pub pointer_pos: Option<(f32, f32)>,

    /// Set of currently held keys.
    pub keys_down: HashSet<Key>,
}

impl InputState {
    pub fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
        if !focused {
            // On focus loss, clear the "down" set. Avoids stuck keys when
            // focus changes mid-press.
            self.keys_down.clear();
        }
    }

    pub fn key_event(&mut self, key: Key, pressed: bool) {
        if pressed {
            self.keys_down.insert(key);
        } else {
            self.keys_down.remove(&key);
        }
    }

    pub fn pointer_moved(&mut self, x: f32, y: f32) {
        self.pointer_pos = Some((x, y));
    }

    pub fn key_down(&self, key: Key) -> bool {
        self.keys_down.contains(&key)
    }
}

/// Pointer delta tracker with first-sample suppression.
///
/// The first sample after load only records a reference position: computing
/// a delta against an uninitialized reference would produce one spurious
/// large camera jump.
#[derive(Debug, Default)]
pub struct MouseTracker {
    last: Option<(f32, f32)>,
}

impl MouseTracker {
    /// Feeds the current pointer position; returns the delta from the
    /// previous sample, or `None` on the first call.
    pub fn delta(&mut self, x: f32, y: f32) -> Option<(f32, f32)> {
        let delta = self.last.map(|(lx, ly)| (x - lx, y - ly));
        self.last = Some((x, y));
        delta
    }

    /// Forgets the reference position, suppressing the next delta.
    pub fn reset(&mut self) {
        self.last = None;
    }
}
