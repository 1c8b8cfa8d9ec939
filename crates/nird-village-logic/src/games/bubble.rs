//! Bubble sort: drop each item into the open-source or the Big Tech bubble.
//!
//! Scored +15 / −10 by default. The game only ends once the source list is
//! empty and both bubbles are pure, so one wrong drop leaves the player
//! stuck until [`BubbleSortGame::reset`].

use rand::seq::SliceRandom;
use rand::Rng;

use crate::catalog::{SortingSet, BIG_TECH, OPEN_SOURCE};
use crate::engine::{CategorizeEngine, CategorizeRules, Progression, Score, Verdict};
use crate::error::GameError;

/// Display name of a bubble.
pub fn bubble_label(bin: &str) -> Option<&'static str> {
    match bin {
        OPEN_SOURCE => Some("Bulle Libre & Open Source"),
        BIG_TECH => Some("Bulle Big Tech"),
        _ => None,
    }
}

#[derive(Debug, Clone)]
pub struct BubbleSortGame {
    title: &'static str,
    hint: &'static str,
    engine: CategorizeEngine,
}

impl BubbleSortGame {
    /// Build from a sorting set, shuffling the source list.
    pub fn new<R: Rng + ?Sized>(set: SortingSet, rules: CategorizeRules, rng: &mut R) -> Self {
        let mut items = set.items;
        items.shuffle(rng);
        Self {
            title: set.title,
            hint: set.hint,
            engine: CategorizeEngine::new(items, vec![OPEN_SOURCE, BIG_TECH], rules),
        }
    }

    pub fn title(&self) -> &'static str {
        self.title
    }

    pub fn hint(&self) -> &'static str {
        self.hint
    }

    pub fn engine(&self) -> &CategorizeEngine {
        &self.engine
    }

    pub fn score(&self) -> Score {
        self.engine.score()
    }

    pub fn progression(&self) -> Progression {
        self.engine.progression()
    }

    pub fn place(&mut self, item_id: &str, bubble: &str) -> Result<Verdict, GameError> {
        self.engine.place(item_id, bubble)
    }

    /// A wrong drop makes completion unreachable until reset.
    pub fn is_stuck(&self) -> bool {
        self.engine.is_stuck()
    }

    pub fn reset(&mut self) {
        self.engine.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::bubble_set;
    use crate::config::ScoringRules;
    use crate::village::{AgeGroup, BuildingId};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn game() -> BubbleSortGame {
        let set = bubble_set(AgeGroup::Junior, BuildingId::Lab).unwrap();
        BubbleSortGame::new(set, ScoringRules::default().bubble(), &mut StdRng::seed_from_u64(1))
    }

    #[test]
    fn test_perfect_run_scores_sixty() {
        let mut g = game();
        let order: Vec<_> = g
            .engine()
            .remaining()
            .iter()
            .map(|i| (i.id, i.category))
            .collect();
        let mut last = None;
        for (id, bin) in order {
            last = Some(g.place(id, bin).unwrap());
        }
        let last = last.unwrap();
        assert!(last.completed);
        assert_eq!(last.score, 60);
        assert!(g.progression().is_completed());
    }

    #[test]
    fn test_wrong_drop_is_stuck_then_reset() {
        let mut g = game();
        let first = *g.engine().remaining()[0];
        let wrong = if first.category == OPEN_SOURCE { BIG_TECH } else { OPEN_SOURCE };
        let v = g.place(first.id, wrong).unwrap();
        assert!(!v.correct);
        assert_eq!(v.score, 0);
        assert!(g.is_stuck());

        g.reset();
        assert!(!g.is_stuck());
        assert_eq!(g.progression(), Progression::NotStarted);
    }

    #[test]
    fn test_labels() {
        assert_eq!(bubble_label(OPEN_SOURCE), Some("Bulle Libre & Open Source"));
        assert_eq!(bubble_label("other"), None);
    }
}
