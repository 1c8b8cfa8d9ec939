//! Reusable mini-game engines.
//!
//! Every village activity is one of two state machines, or both chained:
//! [`categorize::CategorizeEngine`] sorts items into bins and
//! [`quiz::QuizEngine`] walks a sequence of challenges. Both keep a
//! floored [`Score`] and a [`Progression`].

pub mod categorize;
pub mod quiz;
pub mod score;

pub use categorize::{CategorizeEngine, CategorizeRules, CompletionRule};
pub use quiz::{prepare_questions, Challenge, MissPolicy, PreparedQuestion, QuizEngine, QuizRules};
pub use score::{Progression, Score, Verdict};
