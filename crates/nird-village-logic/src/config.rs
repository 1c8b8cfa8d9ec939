//! Scoring and progression configuration.
//!
//! Defaults reproduce the classroom rules. A JSON file may override any
//! subset of fields; everything missing keeps its default.
//!
//! ```
//! use nird_village_logic::config::VillageConfig;
//!
//! let config = VillageConfig::from_json_str(r#"{ "progression": { "building_bonus": 0 } }"#).unwrap();
//! assert_eq!(config.progression.building_bonus, 0);
//! assert_eq!(config.scoring.bubble_correct, 15);
//! ```

use serde::{Deserialize, Serialize};

use crate::engine::{CategorizeRules, CompletionRule, MissPolicy, QuizRules};
use crate::error::ConfigError;

/// Points won and lost by each mini-game action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringRules {
    pub bubble_correct: u32,
    pub bubble_incorrect: u32,
    pub categorize_correct: u32,
    pub categorize_incorrect: u32,
    pub quiz_incorrect: u32,
    pub command_incorrect: u32,
    pub distro_choice: u32,
    pub distro_step: u32,
    /// Shuffle question order in the categorize + quiz game (options are always shuffled).
    pub shuffle_question_order: bool,
    /// What a wrong multiple-choice answer does to the current question.
    pub quiz_on_miss: MissPolicy,
}

impl Default for ScoringRules {
    fn default() -> Self {
        Self {
            bubble_correct: 15,
            bubble_incorrect: 10,
            categorize_correct: 10,
            categorize_incorrect: 5,
            quiz_incorrect: 5,
            command_incorrect: 5,
            distro_choice: 10,
            distro_step: 5,
            shuffle_question_order: true,
            quiz_on_miss: MissPolicy::Advance,
        }
    }
}

impl ScoringRules {
    pub fn bubble(&self) -> CategorizeRules {
        CategorizeRules {
            correct_points: self.bubble_correct,
            incorrect_penalty: self.bubble_incorrect,
            completion: CompletionRule::AllPlacedCorrectly,
        }
    }

    pub fn categorize(&self) -> CategorizeRules {
        CategorizeRules {
            correct_points: self.categorize_correct,
            incorrect_penalty: self.categorize_incorrect,
            completion: CompletionRule::AllPlaced,
        }
    }

    pub fn quiz(&self) -> QuizRules {
        QuizRules {
            incorrect_penalty: self.quiz_incorrect,
            on_miss: self.quiz_on_miss,
        }
    }

    /// Typed commands must match exactly, so a miss always retries.
    pub fn commands(&self) -> QuizRules {
        QuizRules {
            incorrect_penalty: self.command_incorrect,
            on_miss: MissPolicy::Retry,
        }
    }
}

/// Badge thresholds and completion bonuses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProgressionRules {
    pub starter_threshold: u32,
    pub hero_threshold: u32,
    pub champion_threshold: u32,
    /// Awarded once when all levels of a building are done for an age group.
    pub building_bonus: u32,
    /// Awarded once when every village slot is done for an age group.
    pub village_bonus: u32,
}

impl Default for ProgressionRules {
    fn default() -> Self {
        Self {
            starter_threshold: 20,
            hero_threshold: 50,
            champion_threshold: 100,
            building_bonus: 50,
            village_bonus: 100,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VillageConfig {
    pub scoring: ScoringRules,
    pub progression: ProgressionRules,
}

impl VillageConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: VillageConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Badge thresholds must be strictly increasing.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let p = &self.progression;
        if !(p.starter_threshold < p.hero_threshold && p.hero_threshold < p.champion_threshold) {
            return Err(ConfigError::Invalid(format!(
                "badge thresholds must increase: {} / {} / {}",
                p.starter_threshold, p.hero_threshold, p.champion_threshold
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_classroom_rules() {
        let c = VillageConfig::default();
        assert_eq!(c.scoring.bubble().correct_points, 15);
        assert_eq!(c.scoring.bubble().incorrect_penalty, 10);
        assert_eq!(c.scoring.categorize().completion, CompletionRule::AllPlaced);
        assert_eq!(c.scoring.commands().on_miss, MissPolicy::Retry);
        assert_eq!(c.progression.champion_threshold, 100);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let c = VillageConfig::from_json_str(r#"{"scoring": {"quiz_on_miss": "Retry"}}"#).unwrap();
        assert_eq!(c.scoring.quiz_on_miss, MissPolicy::Retry);
        assert_eq!(c.scoring.categorize_correct, 10);
        assert_eq!(c.progression, ProgressionRules::default());
    }

    #[test]
    fn test_rejects_unordered_thresholds() {
        let err = VillageConfig::from_json_str(r#"{"progression": {"hero_threshold": 10}}"#);
        assert!(matches!(err, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_rejects_bad_json() {
        assert!(matches!(
            VillageConfig::from_json_str("{ nope"),
            Err(ConfigError::Parse(_))
        ));
    }
}
