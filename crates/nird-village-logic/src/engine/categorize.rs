//! Item-categorization state machine.
//!
//! A source list of [`ActivityItem`]s is sorted into named bins. Each drop
//! is scored by comparing the item's category with the target bin. The
//! completion rule decides when the game ends:
//!
//! * [`CompletionRule::AllPlaced`]: every item dropped somewhere.
//! * [`CompletionRule::AllPlacedCorrectly`]: source empty and every bin
//!   pure. A single wrong drop makes this unreachable; [`CategorizeEngine::is_stuck`]
//!   reports it and [`CategorizeEngine::reset`] starts over.

use serde::{Deserialize, Serialize};

use crate::catalog::ActivityItem;
use crate::engine::score::{Progression, Score, Verdict};
use crate::error::GameError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CompletionRule {
    AllPlaced,
    AllPlacedCorrectly,
}

/// Scoring for one categorization game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategorizeRules {
    pub correct_points: u32,
    pub incorrect_penalty: u32,
    pub completion: CompletionRule,
}

#[derive(Debug, Clone)]
pub struct CategorizeEngine {
    items: Vec<ActivityItem>,
    bins: Vec<&'static str>,
    /// (item index, bin index) in drop order.
    placements: Vec<(usize, usize)>,
    score: Score,
    progression: Progression,
    rules: CategorizeRules,
}

impl CategorizeEngine {
    pub fn new(items: Vec<ActivityItem>, bins: Vec<&'static str>, rules: CategorizeRules) -> Self {
        Self::with_score(items, bins, rules, Score::default())
    }

    /// Start from an existing score (used when a game chains phases).
    pub fn with_score(
        items: Vec<ActivityItem>,
        bins: Vec<&'static str>,
        rules: CategorizeRules,
        score: Score,
    ) -> Self {
        Self {
            items,
            bins,
            placements: Vec::new(),
            score,
            progression: Progression::NotStarted,
            rules,
        }
    }

    pub fn bins(&self) -> &[&'static str] {
        &self.bins
    }

    pub fn items(&self) -> &[ActivityItem] {
        &self.items
    }

    /// Items still waiting in the source list, in display order.
    pub fn remaining(&self) -> Vec<&ActivityItem> {
        self.items
            .iter()
            .enumerate()
            .filter(|(i, _)| !self.is_placed(*i))
            .map(|(_, item)| item)
            .collect()
    }

    /// Items dropped into `bin`, in drop order.
    pub fn bin_contents(&self, bin: &str) -> Vec<&ActivityItem> {
        let Some(bin_idx) = self.bins.iter().position(|b| *b == bin) else {
            return Vec::new();
        };
        self.placements
            .iter()
            .filter(|(_, b)| *b == bin_idx)
            .map(|(i, _)| &self.items[*i])
            .collect()
    }

    pub fn score(&self) -> Score {
        self.score
    }

    pub fn progression(&self) -> Progression {
        self.progression
    }

    /// Number of drops whose bin does not match the item's category.
    pub fn misplaced_count(&self) -> usize {
        self.placements
            .iter()
            .filter(|(i, b)| self.items[*i].category != self.bins[*b])
            .count()
    }

    /// Completion can no longer be reached without a reset.
    pub fn is_stuck(&self) -> bool {
        !self.progression.is_completed()
            && self.rules.completion == CompletionRule::AllPlacedCorrectly
            && self.misplaced_count() > 0
    }

    /// Drop `item_id` into `bin`.
    pub fn place(&mut self, item_id: &str, bin: &str) -> Result<Verdict, GameError> {
        if self.progression.is_completed() {
            return Err(GameError::AlreadyCompleted);
        }
        let item_idx = self
            .items
            .iter()
            .position(|i| i.id == item_id)
            .ok_or_else(|| GameError::UnknownItem(item_id.to_string()))?;
        let bin_idx = self
            .bins
            .iter()
            .position(|b| *b == bin)
            .ok_or_else(|| GameError::UnknownBin(bin.to_string()))?;
        if self.is_placed(item_idx) {
            return Err(GameError::AlreadyPlaced(item_id.to_string()));
        }

        self.progression.start();
        self.placements.push((item_idx, bin_idx));

        let correct = self.items[item_idx].category == bin;
        let delta = if correct {
            self.score.apply(self.rules.correct_points as i32)
        } else {
            self.score.apply(-(self.rules.incorrect_penalty as i32))
        };

        let completed = self.rule_satisfied();
        if completed {
            self.progression = Progression::Completed;
        }
        log::debug!(
            "placed {} in {} (correct={}, score={})",
            item_id,
            bin,
            correct,
            self.score.value()
        );

        Ok(Verdict {
            correct,
            delta,
            score: self.score.value(),
            completed,
        })
    }

    /// Empty every bin and zero the score.
    pub fn reset(&mut self) {
        self.placements.clear();
        self.score = Score::default();
        self.progression = Progression::NotStarted;
    }

    fn is_placed(&self, item_idx: usize) -> bool {
        self.placements.iter().any(|(i, _)| *i == item_idx)
    }

    fn rule_satisfied(&self) -> bool {
        let all_placed = self.placements.len() == self.items.len();
        match self.rules.completion {
            CompletionRule::AllPlaced => all_placed,
            CompletionRule::AllPlacedCorrectly => all_placed && self.misplaced_count() == 0,
        }
    }
}
