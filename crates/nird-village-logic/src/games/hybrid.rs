//! Categorize, then answer questions.
//!
//! Phase [`HybridPhase::Drag`] uses the categorize rules; once every item is
//! placed the game moves to [`HybridPhase::Question`] carrying the score
//! over. A set without questions ends with the drag phase.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::catalog::{HybridSet, SORTING_HINT};
use crate::engine::{
    prepare_questions, CategorizeEngine, CategorizeRules, Challenge, PreparedQuestion,
    Progression, QuizEngine, QuizRules, Score, Verdict,
};
use crate::error::GameError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HybridPhase {
    Drag,
    Question,
}

impl HybridPhase {
    fn name(self) -> &'static str {
        match self {
            HybridPhase::Drag => "drag",
            HybridPhase::Question => "question",
        }
    }
}

#[derive(Debug, Clone)]
pub struct CategorizeQuizGame {
    drag: CategorizeEngine,
    quiz: QuizEngine<PreparedQuestion>,
    phase: HybridPhase,
}

impl CategorizeQuizGame {
    pub fn new<R: Rng + ?Sized>(
        set: HybridSet,
        drag_rules: CategorizeRules,
        quiz_rules: QuizRules,
        shuffle_order: bool,
        rng: &mut R,
    ) -> Self {
        let questions = prepare_questions(&set.questions, shuffle_order, rng);
        Self {
            drag: CategorizeEngine::new(set.items, set.categories, drag_rules),
            quiz: QuizEngine::new(questions, quiz_rules),
            phase: HybridPhase::Drag,
        }
    }

    pub fn phase(&self) -> HybridPhase {
        self.phase
    }

    pub fn drag(&self) -> &CategorizeEngine {
        &self.drag
    }

    pub fn quiz(&self) -> &QuizEngine<PreparedQuestion> {
        &self.quiz
    }

    pub fn current_question(&self) -> Option<&PreparedQuestion> {
        match self.phase {
            HybridPhase::Drag => None,
            HybridPhase::Question => self.quiz.current(),
        }
    }

    pub fn hint(&self) -> &str {
        self.current_question()
            .map(|q| q.hint())
            .unwrap_or(SORTING_HINT)
    }

    pub fn score(&self) -> Score {
        match self.phase {
            HybridPhase::Drag => self.drag.score(),
            HybridPhase::Question => self.quiz.score(),
        }
    }

    pub fn progression(&self) -> Progression {
        match self.phase {
            HybridPhase::Drag => self.drag.progression(),
            HybridPhase::Question if self.quiz.progression().is_completed() => {
                Progression::Completed
            }
            HybridPhase::Question => Progression::InProgress,
        }
    }

    pub fn place(&mut self, item_id: &str, category: &str) -> Result<Verdict, GameError> {
        if self.phase != HybridPhase::Drag {
            return Err(GameError::WrongPhase(self.phase.name()));
        }
        let mut verdict = self.drag.place(item_id, category)?;
        if verdict.completed && !self.quiz.is_empty() {
            self.quiz.reset_to(self.drag.score());
            self.phase = HybridPhase::Question;
            verdict.completed = false;
            log::debug!("all items placed, moving to questions");
        }
        Ok(verdict)
    }

    /// Answer the current question by option index (display order).
    pub fn answer(&mut self, option: usize) -> Result<Verdict, GameError> {
        if self.phase != HybridPhase::Question {
            return Err(GameError::WrongPhase(self.phase.name()));
        }
        self.quiz.answer(&option)
    }

    pub fn reset(&mut self) {
        self.drag.reset();
        self.quiz.reset_to(Score::default());
        self.phase = HybridPhase::Drag;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{hybrid_set, ActivityItem, Question};
    use crate::config::ScoringRules;
    use crate::village::{AgeGroup, BuildingId, Difficulty, LevelKey};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn build(set: HybridSet) -> CategorizeQuizGame {
        let rules = ScoringRules::default();
        CategorizeQuizGame::new(
            set,
            rules.categorize(),
            rules.quiz(),
            true,
            &mut StdRng::seed_from_u64(3),
        )
    }

    fn place_all_correctly(g: &mut CategorizeQuizGame) -> Verdict {
        let items: Vec<ActivityItem> = g.drag().items().to_vec();
        let mut last = None;
        for item in items {
            last = Some(g.place(item.id, item.category).unwrap());
        }
        last.unwrap()
    }

    #[test]
    fn test_two_phases_perfect_run() {
        let key = LevelKey::new(AgeGroup::Junior, Difficulty::Intermediate, BuildingId::Lab);
        let mut g = build(hybrid_set(key).unwrap());
        assert_eq!(g.answer(0), Err(GameError::WrongPhase("drag")));

        let v = place_all_correctly(&mut g);
        assert!(!v.completed);
        assert_eq!(g.phase(), HybridPhase::Question);
        assert_eq!(g.score().value(), 30);
        assert!(g.place("1", "Gratuit").is_err());

        let right = g.current_question().unwrap().correct_index().unwrap();
        let v = g.answer(right).unwrap();
        assert!(v.completed);
        assert_eq!(v.score, 45);
        assert!(g.progression().is_completed());
    }

    #[test]
    fn test_wrong_answer_costs_points_and_advances() {
        let key = LevelKey::new(AgeGroup::Junior, Difficulty::Beginner, BuildingId::Eco);
        let mut g = build(hybrid_set(key).unwrap());
        place_all_correctly(&mut g);
        assert_eq!(g.quiz().len(), 2);

        let wrong = 1 - g.current_question().unwrap().correct_index().unwrap();
        let v = g.answer(wrong).unwrap();
        assert_eq!(v.delta, -5);
        assert!(!v.completed);
        let right = g.current_question().unwrap().correct_index().unwrap();
        assert!(g.answer(right).unwrap().completed);
        assert_eq!(g.score().value(), 30 - 5 + 15);
    }

    #[test]
    fn test_no_questions_completes_after_drag() {
        let set = HybridSet {
            items: vec![ActivityItem {
                id: "1",
                text: "Linux",
                category: "Gratuit",
                is_correct: true,
            }],
            categories: vec!["Gratuit", "Payant"],
            questions: Vec::<Question>::new(),
        };
        let mut g = build(set);
        let v = g.place("1", "Gratuit").unwrap();
        assert!(v.completed);
        assert_eq!(g.phase(), HybridPhase::Drag);
        assert!(g.progression().is_completed());
    }

    #[test]
    fn test_reset_returns_to_drag() {
        let key = LevelKey::new(AgeGroup::Senior, Difficulty::Advanced, BuildingId::CityHall);
        let mut g = build(hybrid_set(key).unwrap());
        place_all_correctly(&mut g);
        g.reset();
        assert_eq!(g.phase(), HybridPhase::Drag);
        assert_eq!(g.score().value(), 0);
        assert_eq!(g.drag().remaining().len(), 3);
    }
}
