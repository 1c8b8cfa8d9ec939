//! Linux install wizard: pick a distribution, walk its steps, then answer
//! a package-manager quiz.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::catalog::{Distro, Question};
use crate::engine::{
    prepare_questions, Challenge, PreparedQuestion, Progression, QuizEngine, QuizRules, Score,
    Verdict,
};
use crate::error::GameError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DistroPhase {
    Choose,
    /// Walking the steps of the chosen distribution.
    Steps { distro: usize, step: usize },
    Quiz,
}

impl DistroPhase {
    fn name(self) -> &'static str {
        match self {
            DistroPhase::Choose => "choose",
            DistroPhase::Steps { .. } => "steps",
            DistroPhase::Quiz => "quiz",
        }
    }
}

/// Points for the choice and for each step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WalkthroughPoints {
    pub choice: u32,
    pub step: u32,
}

#[derive(Debug, Clone)]
pub struct DistroInstallGame {
    distros: Vec<Distro>,
    phase: DistroPhase,
    score: Score,
    progression: Progression,
    quiz: QuizEngine<PreparedQuestion>,
    points: WalkthroughPoints,
}

impl DistroInstallGame {
    pub fn new<R: Rng + ?Sized>(
        distros: Vec<Distro>,
        questions: &[Question],
        points: WalkthroughPoints,
        quiz_rules: QuizRules,
        rng: &mut R,
    ) -> Self {
        Self {
            distros,
            phase: DistroPhase::Choose,
            score: Score::default(),
            progression: Progression::NotStarted,
            quiz: QuizEngine::new(prepare_questions(questions, false, rng), quiz_rules),
            points,
        }
    }

    pub fn distros(&self) -> &[Distro] {
        &self.distros
    }

    pub fn phase(&self) -> DistroPhase {
        self.phase
    }

    pub fn chosen(&self) -> Option<&Distro> {
        match self.phase {
            DistroPhase::Steps { distro, .. } => self.distros.get(distro),
            _ => None,
        }
    }

    /// Text of the step being shown.
    pub fn current_step(&self) -> Option<&'static str> {
        match self.phase {
            DistroPhase::Steps { distro, step } => {
                self.distros.get(distro).and_then(|d| d.steps.get(step)).copied()
            }
            _ => None,
        }
    }

    pub fn current_question(&self) -> Option<&PreparedQuestion> {
        match self.phase {
            DistroPhase::Quiz => self.quiz.current(),
            _ => None,
        }
    }

    pub fn hint(&self) -> &str {
        match self.phase {
            DistroPhase::Choose => "Linux NIRD est pensé pour les établissements scolaires",
            DistroPhase::Steps { .. } => "Suivez les étapes dans l'ordre, sans en sauter",
            DistroPhase::Quiz => self.current_question().map(|q| q.hint()).unwrap_or_default(),
        }
    }

    pub fn score(&self) -> Score {
        match self.phase {
            DistroPhase::Quiz => self.quiz.score(),
            _ => self.score,
        }
    }

    pub fn progression(&self) -> Progression {
        self.progression
    }

    pub fn choose(&mut self, name: &str) -> Result<Verdict, GameError> {
        if self.phase != DistroPhase::Choose {
            return Err(GameError::WrongPhase(self.phase.name()));
        }
        let distro = self
            .distros
            .iter()
            .position(|d| d.name == name)
            .ok_or_else(|| GameError::UnknownDistro(name.to_string()))?;
        self.progression.start();
        let delta = self.score.apply(self.points.choice as i32);
        self.phase = DistroPhase::Steps { distro, step: 0 };
        Ok(self.walkthrough_verdict(delta))
    }

    /// Confirm the current step and show the next one. Moving on to another
    /// step earns the step points; confirming the last step earns nothing
    /// and opens the quiz.
    pub fn next_step(&mut self) -> Result<Verdict, GameError> {
        let DistroPhase::Steps { distro, step } = self.phase else {
            return Err(GameError::WrongPhase(self.phase.name()));
        };
        let total = self.distros[distro].steps.len();
        if step + 1 < total {
            let delta = self.score.apply(self.points.step as i32);
            self.phase = DistroPhase::Steps {
                distro,
                step: step + 1,
            };
            return Ok(self.walkthrough_verdict(delta));
        }
        if self.quiz.is_empty() {
            self.progression = Progression::Completed;
            return Ok(Verdict {
                completed: true,
                ..self.walkthrough_verdict(0)
            });
        }
        self.quiz.reset_to(self.score);
        self.phase = DistroPhase::Quiz;
        Ok(self.walkthrough_verdict(0))
    }

    pub fn answer(&mut self, option: usize) -> Result<Verdict, GameError> {
        if self.phase != DistroPhase::Quiz {
            return Err(GameError::WrongPhase(self.phase.name()));
        }
        let verdict = self.quiz.answer(&option)?;
        if verdict.completed {
            self.progression = Progression::Completed;
        }
        Ok(verdict)
    }

    pub fn reset(&mut self) {
        self.phase = DistroPhase::Choose;
        self.score = Score::default();
        self.progression = Progression::NotStarted;
        self.quiz.reset_to(Score::default());
    }

    fn walkthrough_verdict(&self, delta: i32) -> Verdict {
        Verdict {
            correct: true,
            delta,
            score: self.score.value(),
            completed: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{distros, package_manager_questions};
    use crate::config::ScoringRules;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn game() -> DistroInstallGame {
        let rules = ScoringRules::default();
        DistroInstallGame::new(
            distros(),
            &package_manager_questions(),
            WalkthroughPoints {
                choice: rules.distro_choice,
                step: rules.distro_step,
            },
            rules.quiz(),
            &mut StdRng::seed_from_u64(11),
        )
    }

    #[test]
    fn test_perfect_run() {
        let mut g = game();
        assert!(g.next_step().is_err());
        assert_eq!(g.choose("Linux Mint").unwrap().score, 10);
        assert_eq!(g.current_step(), Some("Télécharger l'ISO depuis linuxmint.com"));
        for _ in 0..5 {
            g.next_step().unwrap();
        }
        assert_eq!(g.phase(), DistroPhase::Quiz);
        // Four moves between the five steps; the last confirmation is free.
        assert_eq!(g.score().value(), 30);

        let mut last = None;
        while let Some(q) = g.current_question() {
            let right = q.correct_index().unwrap();
            last = Some(g.answer(right).unwrap());
        }
        let last = last.unwrap();
        assert!(last.completed);
        assert_eq!(last.score, 30 + 15 + 15 + 10);
        assert!(g.progression().is_completed());
    }

    #[test]
    fn test_last_step_confirmation_scores_nothing() {
        let mut g = game();
        g.choose("Ubuntu").unwrap();
        for _ in 0..4 {
            assert_eq!(g.next_step().unwrap().delta, 5);
        }
        let last = g.next_step().unwrap();
        assert_eq!(last.delta, 0);
        assert_eq!(last.score, 30);
        assert_eq!(g.phase(), DistroPhase::Quiz);
    }

    #[test]
    fn test_unknown_distro_and_wrong_phase() {
        let mut g = game();
        assert_eq!(
            g.choose("Windows"),
            Err(GameError::UnknownDistro("Windows".into()))
        );
        assert_eq!(g.answer(0), Err(GameError::WrongPhase("choose")));
        g.choose("Ubuntu").unwrap();
        assert_eq!(g.choose("Ubuntu"), Err(GameError::WrongPhase("steps")));
    }

    #[test]
    fn test_reset_restarts_wizard() {
        let mut g = game();
        g.choose("Linux NIRD").unwrap();
        g.next_step().unwrap();
        g.reset();
        assert_eq!(g.phase(), DistroPhase::Choose);
        assert_eq!(g.score().value(), 0);
        assert_eq!(g.progression(), Progression::NotStarted);
    }
}
