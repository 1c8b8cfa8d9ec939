//! The five village mini-games and the session enum that drives them.
//!
//! | Variant | Engine(s) | Module |
//! |---------|-----------|--------|
//! | Bubble sort | categorize (pure bins) | [`bubble`] |
//! | Categorize | categorize | [`categorize`] |
//! | Categorize + quiz | categorize, then quiz | [`hybrid`] |
//! | Command line | quiz over typed commands | [`terminal`] |
//! | Distro install | walkthrough, then quiz | [`distro`] |

pub mod bubble;
pub mod categorize;
pub mod distro;
pub mod hybrid;
pub mod terminal;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::activity::ActivityKind;
use crate::catalog;
use crate::config::ScoringRules;
use crate::engine::{CategorizeEngine, PreparedQuestion, Progression, Score, Verdict};
use crate::error::GameError;
use crate::village::LevelKey;

pub use bubble::BubbleSortGame;
pub use categorize::CategorizeGame;
pub use distro::{DistroInstallGame, DistroPhase, WalkthroughPoints};
pub use hybrid::{CategorizeQuizGame, HybridPhase};
pub use terminal::{Autocomplete, CommandLineGame};

/// A player action, routed to whichever game is open.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameAction {
    /// Drop an item into a bin or category.
    Place { item_id: String, bin: String },
    /// Pick an option of the current question (display order).
    Answer(usize),
    /// Submit a line typed in the terminal.
    Command(String),
    ChooseDistro(String),
    NextStep,
}

/// The game behind an opened building.
#[derive(Debug, Clone)]
pub enum GameSession {
    BubbleSort(BubbleSortGame),
    Categorize(CategorizeGame),
    CategorizeQuiz(CategorizeQuizGame),
    CommandLine(CommandLineGame),
    DistroInstall(DistroInstallGame),
}

impl GameSession {
    /// Instantiate `kind` with the catalog content for `key`.
    ///
    /// `None` when the catalog has nothing for that slot.
    pub fn open<R: Rng + ?Sized>(
        kind: ActivityKind,
        key: LevelKey,
        rules: &ScoringRules,
        rng: &mut R,
    ) -> Option<Self> {
        let session = match kind {
            ActivityKind::BubbleSort => {
                let set = catalog::bubble_set(key.age, key.building)?;
                GameSession::BubbleSort(BubbleSortGame::new(set, rules.bubble(), rng))
            }
            ActivityKind::Categorize => {
                let set = catalog::categorize_set(key)?;
                GameSession::Categorize(CategorizeGame::new(set, rules.categorize()))
            }
            ActivityKind::CategorizeQuiz => {
                let set = catalog::hybrid_set(key)?;
                GameSession::CategorizeQuiz(CategorizeQuizGame::new(
                    set,
                    rules.categorize(),
                    rules.quiz(),
                    rules.shuffle_question_order,
                    rng,
                ))
            }
            ActivityKind::CommandLine => GameSession::CommandLine(CommandLineGame::new(
                catalog::command_tasks(),
                rules.commands(),
            )),
            ActivityKind::DistroInstall => GameSession::DistroInstall(DistroInstallGame::new(
                catalog::distros(),
                &catalog::package_manager_questions(),
                WalkthroughPoints {
                    choice: rules.distro_choice,
                    step: rules.distro_step,
                },
                rules.quiz(),
                rng,
            )),
        };
        Some(session)
    }

    pub fn kind(&self) -> ActivityKind {
        match self {
            GameSession::BubbleSort(_) => ActivityKind::BubbleSort,
            GameSession::Categorize(_) => ActivityKind::Categorize,
            GameSession::CategorizeQuiz(_) => ActivityKind::CategorizeQuiz,
            GameSession::CommandLine(_) => ActivityKind::CommandLine,
            GameSession::DistroInstall(_) => ActivityKind::DistroInstall,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            GameSession::BubbleSort(g) => g.title(),
            GameSession::Categorize(g) => g.title(),
            GameSession::CategorizeQuiz(_) => "Trier puis répondre",
            GameSession::CommandLine(_) => "Simulateur de Terminal Linux",
            GameSession::DistroInstall(_) => "Installer Linux",
        }
    }

    pub fn hint(&self) -> &str {
        match self {
            GameSession::BubbleSort(g) => g.hint(),
            GameSession::Categorize(g) => g.hint(),
            GameSession::CategorizeQuiz(g) => g.hint(),
            GameSession::CommandLine(g) => g.hint(),
            GameSession::DistroInstall(g) => g.hint(),
        }
    }

    pub fn score(&self) -> Score {
        match self {
            GameSession::BubbleSort(g) => g.score(),
            GameSession::Categorize(g) => g.score(),
            GameSession::CategorizeQuiz(g) => g.score(),
            GameSession::CommandLine(g) => g.score(),
            GameSession::DistroInstall(g) => g.score(),
        }
    }

    pub fn progression(&self) -> Progression {
        match self {
            GameSession::BubbleSort(g) => g.progression(),
            GameSession::Categorize(g) => g.progression(),
            GameSession::CategorizeQuiz(g) => g.progression(),
            GameSession::CommandLine(g) => g.progression(),
            GameSession::DistroInstall(g) => g.progression(),
        }
    }

    /// Only the bubble sort can get stuck.
    pub fn is_stuck(&self) -> bool {
        matches!(self, GameSession::BubbleSort(g) if g.is_stuck())
    }

    pub fn reset(&mut self) {
        match self {
            GameSession::BubbleSort(g) => g.reset(),
            GameSession::Categorize(g) => g.reset(),
            GameSession::CategorizeQuiz(g) => g.reset(),
            GameSession::CommandLine(g) => g.reset(),
            GameSession::DistroInstall(g) => g.reset(),
        }
    }

    /// The next move of a player who never makes a mistake. `None` once the
    /// game is over.
    pub fn perfect_action(&self) -> Option<GameAction> {
        fn place(engine: &CategorizeEngine) -> Option<GameAction> {
            engine.remaining().first().map(|item| GameAction::Place {
                item_id: item.id.to_string(),
                bin: item.category.to_string(),
            })
        }
        fn answer(question: Option<&PreparedQuestion>) -> Option<GameAction> {
            question
                .and_then(|q| q.correct_index())
                .map(GameAction::Answer)
        }

        if self.progression().is_completed() {
            return None;
        }
        match self {
            GameSession::BubbleSort(g) => place(g.engine()),
            GameSession::Categorize(g) => place(g.engine()),
            GameSession::CategorizeQuiz(g) => match g.phase() {
                HybridPhase::Drag => place(g.drag()),
                HybridPhase::Question => answer(g.current_question()),
            },
            GameSession::CommandLine(g) => g
                .current_task()
                .map(|task| GameAction::Command(task.command.to_string())),
            GameSession::DistroInstall(g) => match g.phase() {
                DistroPhase::Choose => g
                    .distros()
                    .first()
                    .map(|d| GameAction::ChooseDistro(d.name.to_string())),
                DistroPhase::Steps { .. } => Some(GameAction::NextStep),
                DistroPhase::Quiz => answer(g.current_question()),
            },
        }
    }

    pub fn apply(&mut self, action: &GameAction) -> Result<Verdict, GameError> {
        match (self, action) {
            (GameSession::BubbleSort(g), GameAction::Place { item_id, bin }) => g.place(item_id, bin),
            (GameSession::Categorize(g), GameAction::Place { item_id, bin }) => {
                g.place(item_id, bin)
            }
            (GameSession::CategorizeQuiz(g), GameAction::Place { item_id, bin }) => {
                g.place(item_id, bin)
            }
            (GameSession::CategorizeQuiz(g), GameAction::Answer(option)) => g.answer(*option),
            (GameSession::CommandLine(g), GameAction::Command(input)) => g.submit(input),
            (GameSession::DistroInstall(g), GameAction::ChooseDistro(name)) => g.choose(name),
            (GameSession::DistroInstall(g), GameAction::NextStep) => g.next_step(),
            (GameSession::DistroInstall(g), GameAction::Answer(option)) => g.answer(*option),
            (session, _) => Err(GameError::WrongGame(session.kind().name())),
        }
    }
}
