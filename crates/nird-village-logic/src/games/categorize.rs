//! Drag-and-drop categorization over N categories.
//!
//! +10 / −5 by default; the game ends once every item has been dropped,
//! right or wrong.

use crate::catalog::SortingSet;
use crate::engine::{CategorizeEngine, CategorizeRules, Progression, Score, Verdict};
use crate::error::GameError;

#[derive(Debug, Clone)]
pub struct CategorizeGame {
    title: &'static str,
    description: &'static str,
    hint: &'static str,
    engine: CategorizeEngine,
}

impl CategorizeGame {
    pub fn new(set: SortingSet, rules: CategorizeRules) -> Self {
        Self {
            title: set.title,
            description: set.description,
            hint: set.hint,
            engine: CategorizeEngine::new(set.items, set.categories, rules),
        }
    }

    pub fn title(&self) -> &'static str {
        self.title
    }

    pub fn description(&self) -> &'static str {
        self.description
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

    pub fn place(&mut self, item_id: &str, category: &str) -> Result<Verdict, GameError> {
        self.engine.place(item_id, category)
    }

    pub fn reset(&mut self) {
        self.engine.reset();
    }
}
