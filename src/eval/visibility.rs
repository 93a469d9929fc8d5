use std::collections::HashMap;

use crate::foundation::core::VisibleWindow;

/// A change of visibility observed for one character.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Crossing {
    /// Moved from outside the window to inside it.
    Entered,
    /// Moved from inside the window to outside it.
    Exited,
}

/// Visibility timeline of one logical character.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CharacterState {
    /// Logical (clean text) index.
    pub index: usize,
    /// Whether the character was inside the window at the last observation.
    pub visible: bool,
    /// Animation time of the last `Entered` crossing.
    pub visible_since: f64,
    /// Animation time of the last `Exited` crossing; `None` if it never became visible.
    pub hidden_since: Option<f64>,
}

impl CharacterState {
    fn new(index: usize, now: f64) -> Self {
        Self {
            index,
            visible: false,
            visible_since: now,
            hidden_since: None,
        }
    }

    /// Seconds since the character last became visible.
    pub fn elapsed_visible(&self, now: f64) -> f64 {
        (now - self.visible_since).max(0.0)
    }

    /// Seconds since the character last became hidden, infinite if it was never shown.
    pub fn elapsed_hidden(&self, now: f64) -> f64 {
        self.hidden_since
            .map_or(f64::INFINITY, |since| (now - since).max(0.0))
    }

    /// Seconds since the last crossing in the current direction.
    pub fn elapsed_since_crossing(&self, now: f64) -> f64 {
        if self.visible {
            self.elapsed_visible(now)
        } else {
            self.elapsed_hidden(now)
        }
    }
}

/// Lazily populated per-character visibility states.
#[derive(Debug, Default)]
pub struct VisibilityTracker {
    states: HashMap<usize, CharacterState>,
}

impl VisibilityTracker {
    /// Create an empty tracker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Update `index` against `window` at animation time `now`.
    pub fn observe(&mut self, index: usize, window: VisibleWindow, now: f64) -> Option<Crossing> {
        let inside = window.contains(index);
        let state = self
            .states
            .entry(index)
            .or_insert_with(|| CharacterState::new(index, now));
        match (state.visible, inside) {
            (false, true) => {
                state.visible = true;
                state.visible_since = now;
                Some(Crossing::Entered)
            }
            (true, false) => {
                state.visible = false;
                state.hidden_since = Some(now);
                Some(Crossing::Exited)
            }
            _ => None,
        }
    }

    /// State of `index`, if it was ever observed.
    pub fn get(&self, index: usize) -> Option<&CharacterState> {
        self.states.get(&index)
    }

    /// Forget every state.
    pub fn clear(&mut self) {
        self.states.clear();
    }

    /// Number of tracked characters.
    pub fn len(&self) -> usize {
        self.states.len()
    }

    /// `true` when nothing is tracked.
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/eval/visibility.rs"]
mod tests;
