//! Floored score and the progression status shared by every mini-game.

use serde::{Deserialize, Serialize};

/// A running score that never drops below zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Score(u32);

impl Score {
    pub fn new(points: u32) -> Self {
        Self(points)
    }

    pub fn value(self) -> u32 {
        self.0
    }

    /// Apply a signed adjustment, saturating at zero.
    ///
    /// Returns the delta actually applied, which is smaller than `delta`
    /// in magnitude when a penalty hits the floor.
    pub fn apply(&mut self, delta: i32) -> i32 {
        let before = self.0;
        self.0 = if delta >= 0 {
            before.saturating_add(delta.unsigned_abs())
        } else {
            before.saturating_sub(delta.unsigned_abs())
        };
        self.0 as i32 - before as i32
    }
}

/// Lifecycle of a single mini-game instance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Progression {
    #[default]
    NotStarted,
    InProgress,
    Completed,
}

impl Progression {
    pub fn is_completed(self) -> bool {
        self == Progression::Completed
    }

    /// First interaction moves a fresh game into play.
    pub(crate) fn start(&mut self) {
        if *self == Progression::NotStarted {
            *self = Progression::InProgress;
        }
    }
}

/// What one resolved player action did to the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verdict {
    /// Whether the placement / answer matched.
    pub correct: bool,
    /// Score change actually applied (after flooring).
    pub delta: i32,
    /// Score after the action.
    pub score: u32,
    /// True only on the action that finished the game.
    pub completed: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_floor() {
        let mut s = Score::default();
        assert_eq!(s.apply(-5), 0);
        assert_eq!(s.value(), 0);
        assert_eq!(s.apply(15), 15);
        assert_eq!(s.apply(-10), -10);
        assert_eq!(s.value(), 5);
        assert_eq!(s.apply(-10), -5);
        assert_eq!(s.value(), 0);
    }

    #[test]
    fn test_progression_start_only_from_not_started() {
        let mut p = Progression::default();
        p.start();
        assert_eq!(p, Progression::InProgress);

        let mut done = Progression::Completed;
        done.start();
        assert!(done.is_completed());
    }
}
