//! Sequential-quiz state machine.
//!
//! Walks an ordered list of challenges. Each answer is checked against the
//! current challenge: a match adds the challenge's points and advances, a
//! miss costs the configured penalty and either advances or stays put
//! depending on [`MissPolicy`]. The game completes when the last challenge
//! is resolved.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::catalog::{AnswerOption, Question};
use crate::engine::score::{Progression, Score, Verdict};
use crate::error::GameError;

/// One prompt the quiz engine can check an answer against.
pub trait Challenge {
    type Answer: ?Sized;

    /// Points awarded for a correct answer.
    fn points(&self) -> u32;

    fn hint(&self) -> &str;

    /// `Ok(true)` on a match, `Ok(false)` on a miss, `Err` if the answer
    /// cannot be interpreted at all.
    fn check(&self, answer: &Self::Answer) -> Result<bool, GameError>;
}

/// What happens to the current challenge after a wrong answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MissPolicy {
    /// Stay on the same challenge until it is answered correctly.
    Retry,
    /// Move on to the next challenge.
    Advance,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizRules {
    pub incorrect_penalty: u32,
    pub on_miss: MissPolicy,
}

#[derive(Debug, Clone)]
pub struct QuizEngine<C> {
    challenges: Vec<C>,
    current: usize,
    score: Score,
    progression: Progression,
    rules: QuizRules,
}

impl<C: Challenge> QuizEngine<C> {
    pub fn new(challenges: Vec<C>, rules: QuizRules) -> Self {
        Self::with_score(challenges, rules, Score::default())
    }

    /// Continue from a score carried over from an earlier phase.
    pub fn with_score(challenges: Vec<C>, rules: QuizRules, score: Score) -> Self {
        Self {
            challenges,
            current: 0,
            score,
            progression: Progression::NotStarted,
            rules,
        }
    }

    pub fn current(&self) -> Option<&C> {
        if self.progression.is_completed() {
            return None;
        }
        self.challenges.get(self.current)
    }

    /// Zero-based index of the challenge being answered.
    pub fn position(&self) -> usize {
        self.current
    }

    pub fn len(&self) -> usize {
        self.challenges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.challenges.is_empty()
    }

    pub fn score(&self) -> Score {
        self.score
    }

    pub fn progression(&self) -> Progression {
        self.progression
    }

    pub fn answer(&mut self, answer: &C::Answer) -> Result<Verdict, GameError> {
        if self.progression.is_completed() {
            return Err(GameError::AlreadyCompleted);
        }
        let Some(challenge) = self.challenges.get(self.current) else {
            return Err(GameError::AlreadyCompleted);
        };
        let correct = challenge.check(answer)?;
        let points = challenge.points();

        self.progression.start();
        let delta = if correct {
            self.score.apply(points as i32)
        } else {
            self.score.apply(-(self.rules.incorrect_penalty as i32))
        };

        if correct || self.rules.on_miss == MissPolicy::Advance {
            self.current += 1;
        }
        let completed = self.current >= self.challenges.len();
        if completed {
            self.progression = Progression::Completed;
        }

        Ok(Verdict {
            correct,
            delta,
            score: self.score.value(),
            completed,
        })
    }

    /// Back to the first challenge with the given starting score.
    pub fn reset_to(&mut self, score: Score) {
        self.current = 0;
        self.score = score;
        self.progression = Progression::NotStarted;
    }
}

/// A multiple-choice question with its options in display order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PreparedQuestion {
    pub text: &'static str,
    pub options: Vec<AnswerOption>,
    pub hint: &'static str,
    pub points: u32,
}

impl PreparedQuestion {
    /// Copy a catalog question, shuffling its options.
    pub fn shuffled<R: Rng + ?Sized>(question: &Question, rng: &mut R) -> Self {
        let mut options = question.options.clone();
        options.shuffle(rng);
        Self {
            text: question.text,
            options,
            hint: question.hint,
            points: question.points,
        }
    }

    /// Index of the correct option in display order.
    pub fn correct_index(&self) -> Option<usize> {
        self.options.iter().position(|o| o.correct)
    }
}

impl Challenge for PreparedQuestion {
    type Answer = usize;

    fn points(&self) -> u32 {
        self.points
    }

    fn hint(&self) -> &str {
        self.hint
    }

    fn check(&self, answer: &usize) -> Result<bool, GameError> {
        self.options
            .get(*answer)
            .map(|o| o.correct)
            .ok_or(GameError::OptionOutOfRange {
                index: *answer,
                count: self.options.len(),
            })
    }
}

/// Prepare a question sequence: options always shuffled, order optionally.
pub fn prepare_questions<R: Rng + ?Sized>(
    questions: &[Question],
    shuffle_order: bool,
    rng: &mut R,
) -> Vec<PreparedQuestion> {
    let mut prepared: Vec<_> = questions
        .iter()
        .map(|q| PreparedQuestion::shuffled(q, rng))
        .collect();
    if shuffle_order {
        prepared.shuffle(rng);
    }
    prepared
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn yes_no(text: &'static str) -> Question {
        Question {
            text,
            options: vec![
                AnswerOption {
                    text: "Oui",
                    correct: true,
                },
                AnswerOption {
                    text: "Non",
                    correct: false,
                },
            ],
            hint: "",
            points: 15,
        }
    }

    fn quiz(on_miss: MissPolicy) -> QuizEngine<PreparedQuestion> {
        let mut rng = StdRng::seed_from_u64(7);
        QuizEngine::new(
            prepare_questions(&[yes_no("q1"), yes_no("q2")], false, &mut rng),
            QuizRules {
                incorrect_penalty: 5,
                on_miss,
            },
        )
    }

    fn wrong_index(q: &PreparedQuestion) -> usize {
        1 - q.correct_index().unwrap()
    }

    #[test]
    fn test_correct_answers_complete() {
        let mut q = quiz(MissPolicy::Advance);
        let first = q.current().unwrap().correct_index().unwrap();
        let v = q.answer(&first).unwrap();
        assert!(v.correct && !v.completed);
        assert_eq!(q.position(), 1);

        let second = q.current().unwrap().correct_index().unwrap();
        let v = q.answer(&second).unwrap();
        assert!(v.completed);
        assert_eq!(v.score, 30);
        assert!(q.current().is_none());
        assert_eq!(q.answer(&0), Err(GameError::AlreadyCompleted));
    }

    #[test]
    fn test_advance_policy_moves_on_after_miss() {
        let mut q = quiz(MissPolicy::Advance);
        let wrong = wrong_index(q.current().unwrap());
        let v = q.answer(&wrong).unwrap();
        assert!(!v.correct);
        assert_eq!(v.score, 0);
        assert_eq!(q.position(), 1);
        let wrong = wrong_index(q.current().unwrap());
        assert!(q.answer(&wrong).unwrap().completed);
    }

    #[test]
    fn test_retry_policy_stays_on_miss() {
        let mut q = quiz(MissPolicy::Retry);
        let right = q.current().unwrap().correct_index().unwrap();
        q.answer(&right).unwrap();
        let wrong = wrong_index(q.current().unwrap());
        let v = q.answer(&wrong).unwrap();
        assert_eq!(v.delta, -5);
        assert_eq!(q.position(), 1);
        assert_eq!(q.progression(), Progression::InProgress);
    }

    #[test]
    fn test_out_of_range_option_is_an_error() {
        let mut q = quiz(MissPolicy::Advance);
        assert_eq!(
            q.answer(&9),
            Err(GameError::OptionOutOfRange { index: 9, count: 2 })
        );
        assert_eq!(q.progression(), Progression::NotStarted);
    }

    #[test]
    fn test_shuffle_keeps_exactly_one_correct_option() {
        let mut rng = StdRng::seed_from_u64(99);
        for _ in 0..20 {
            let p = PreparedQuestion::shuffled(&yes_no("q"), &mut rng);
            assert_eq!(p.options.iter().filter(|o| o.correct).count(), 1);
        }
    }
}
