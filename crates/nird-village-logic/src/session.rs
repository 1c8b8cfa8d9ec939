//! The village page: age and level selection, opening buildings, routing
//! player actions into the open game and booking completions.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::activity::{select_activity, ActivityKind, ActivitySlot, PLACEHOLDER_MESSAGE};
use crate::config::VillageConfig;
use crate::engine::{Progression, Verdict};
use crate::error::{StorageError, VillageError};
use crate::games::{GameAction, GameSession};
use crate::progress::{CompletionOutcome, CumulativeProfile, ProgressStore};
use crate::storage::Storage;
use crate::village::{village_description, AgeGroup, BuildingId, Difficulty, LevelKey};

/// Shown when a young player clicks the adults-only workshop.
pub const ADULTS_ONLY_MESSAGE: &str =
    "L'atelier NIRD est réservé aux adultes. Continue d'explorer les autres bâtiments libres du village !";

/// What clicking a building produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Opened {
    Game(ActivityKind),
    Placeholder(&'static str),
    AdultsOnly(&'static str),
}

/// Result of one player action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Turn {
    pub verdict: Verdict,
    /// Set when the action finished the game.
    pub outcome: Option<CompletionOutcome>,
    /// Messages for the feedback banner, in display order.
    pub feedback: Vec<String>,
}

#[derive(Debug)]
struct OpenGame {
    /// Slot the game was opened for; its result is booked here.
    key: LevelKey,
    session: GameSession,
}

pub struct Village<S> {
    config: VillageConfig,
    progress: ProgressStore<S>,
    difficulty: Difficulty,
    open: Option<OpenGame>,
    rng: StdRng,
}

impl<S: Storage> Village<S> {
    pub fn new(storage: S, config: VillageConfig) -> Result<Self, StorageError> {
        Self::with_rng(storage, config, StdRng::from_entropy())
    }

    /// Deterministic shuffles and messages, for tests and the harness.
    pub fn with_seed(storage: S, config: VillageConfig, seed: u64) -> Result<Self, StorageError> {
        Self::with_rng(storage, config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(storage: S, config: VillageConfig, rng: StdRng) -> Result<Self, StorageError> {
        let progress = ProgressStore::load(storage, config.progression.clone())?;
        Ok(Self {
            config,
            progress,
            difficulty: Difficulty::default(),
            open: None,
            rng,
        })
    }

    pub fn config(&self) -> &VillageConfig {
        &self.config
    }

    pub fn progress(&self) -> &ProgressStore<S> {
        &self.progress
    }

    pub fn age(&self) -> Option<AgeGroup> {
        self.progress.selected_age()
    }

    /// Switching to another age group closes any open game.
    pub fn select_age(&mut self, age: AgeGroup) -> Result<(), VillageError> {
        if self.age() != Some(age) {
            self.close();
        }
        self.progress.select_age(age)?;
        log::info!("age group selected: {}", age);
        Ok(())
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// Switch level. Any open game is closed without recording anything.
    pub fn change_difficulty(&mut self, difficulty: Difficulty) {
        if difficulty == self.difficulty {
            return;
        }
        self.close();
        self.difficulty = difficulty;
    }

    /// Intro text for the current age group and level.
    pub fn description(&self) -> Option<&'static str> {
        self.age().map(|age| village_description(age, self.difficulty))
    }

    pub fn profile(&self) -> Option<CumulativeProfile> {
        self.age().map(|age| self.progress.profile(age))
    }

    pub fn open_building(&mut self, building: BuildingId) -> Result<Opened, VillageError> {
        let age = self.age().ok_or(VillageError::NoAgeSelected)?;
        self.close();

        if building.info().adult_only {
            return Ok(Opened::AdultsOnly(ADULTS_ONLY_MESSAGE));
        }

        let key = LevelKey::new(age, self.difficulty, building);
        let Some(session) = self.start_game(key) else {
            return Ok(Opened::Placeholder(PLACEHOLDER_MESSAGE));
        };

        let kind = session.kind();
        log::debug!("opened {} at {}", kind, key);
        self.open = Some(OpenGame { key, session });
        Ok(Opened::Game(kind))
    }

    /// A fresh game for `key`, or `None` when the slot has nothing to play.
    fn start_game(&mut self, key: LevelKey) -> Option<GameSession> {
        let ActivitySlot::Configured(kind) = select_activity(key.building, key.age, key.difficulty)
        else {
            return None;
        };
        let session = GameSession::open(kind, key, &self.config.scoring, &mut self.rng);
        if session.is_none() {
            log::warn!("{} is mapped to {} but has no content", key, kind);
        }
        session
    }

    pub fn session(&self) -> Option<&GameSession> {
        self.open.as_ref().map(|g| &g.session)
    }

    pub fn open_building_id(&self) -> Option<BuildingId> {
        self.open.as_ref().map(|g| g.key.building)
    }

    /// Leave the current building. Progress in the game is lost.
    pub fn close(&mut self) {
        self.open = None;
    }

    /// "Recommencer": restart the open game from scratch.
    pub fn restart_game(&mut self) -> Result<(), VillageError> {
        let open = self.open.as_mut().ok_or(VillageError::NoOpenActivity)?;
        open.session.reset();
        Ok(())
    }

    /// Route an action to the open game. A finishing action books the
    /// result in the progress store and closes the building, even when the
    /// result could not be saved.
    pub fn apply(&mut self, action: &GameAction) -> Result<Turn, VillageError> {
        self.age().ok_or(VillageError::NoAgeSelected)?;
        let open = self.open.as_mut().ok_or(VillageError::NoOpenActivity)?;
        let verdict = open.session.apply(action)?;
        if !verdict.completed {
            return Ok(Turn {
                verdict,
                outcome: None,
                feedback: Vec::new(),
            });
        }

        debug_assert_eq!(open.session.progression(), Progression::Completed);
        let key = open.key;
        self.close();
        let outcome =
            self.progress
                .record_completion(key.age, key.difficulty, key.building, verdict.score)?;
        let feedback = completion_feedback(verdict.score, key.building, &outcome, &mut self.rng);

        Ok(Turn {
            verdict,
            outcome: Some(outcome),
            feedback,
        })
    }

    /// Wipe all progress and the age selection.
    pub fn reset(&mut self) -> Result<(), VillageError> {
        self.close();
        self.progress.reset()?;
        Ok(())
    }
}

fn completion_feedback<R: Rng + ?Sized>(
    points: u32,
    building: BuildingId,
    outcome: &CompletionOutcome,
    rng: &mut R,
) -> Vec<String> {
    let praise = [
        format!("Excellent travail ! Vous avez gagné {points} points."),
        format!("Bravo ! {points} points ajoutés à votre score."),
        format!("Superbe ! Vous progressez bien (+{points} points)."),
    ];
    let mut feedback: Vec<String> = praise.choose(rng).cloned().into_iter().collect();
    if outcome.building_bonus > 0 {
        feedback.push(format!(
            "🎉 Félicitations ! Vous avez complété tous les niveaux de {} ! Bonus de {} points !",
            building.info().name,
            outcome.building_bonus
        ));
    }
    if outcome.village_bonus > 0 {
        feedback.push(format!(
            "🏆 INCROYABLE ! Vous avez complété TOUS les défis du village ! Vous êtes un véritable champion NIRD ! Bonus final de {} points !",
            outcome.village_bonus
        ));
    }
    feedback
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{MemoryStorage, RejectingStorage};

    fn village() -> Village<MemoryStorage> {
        Village::with_seed(MemoryStorage::new(), VillageConfig::default(), 17).unwrap()
    }

    #[test]
    fn test_open_requires_age() {
        let mut v = village();
        assert!(matches!(
            v.open_building(BuildingId::Lab),
            Err(VillageError::NoAgeSelected)
        ));
        assert!(matches!(
            v.apply(&GameAction::NextStep),
            Err(VillageError::NoAgeSelected)
        ));
    }

    #[test]
    fn test_workshop_is_adults_only() {
        let mut v = village();
        v.select_age(AgeGroup::Senior).unwrap();
        assert_eq!(
            v.open_building(BuildingId::Workshop).unwrap(),
            Opened::AdultsOnly(ADULTS_ONLY_MESSAGE)
        );
        assert!(v.session().is_none());
    }

    #[test]
    fn test_command_line_completion_books_points() {
        let mut v = village();
        v.select_age(AgeGroup::Junior).unwrap();
        v.change_difficulty(Difficulty::Advanced);
        assert_eq!(
            v.open_building(BuildingId::Lab).unwrap(),
            Opened::Game(ActivityKind::CommandLine)
        );

        let commands = ["ls", "mkdir mon_projet", "cd mon_projet", "pwd", "touch readme.txt"];
        let mut last = None;
        for cmd in commands {
            last = Some(v.apply(&GameAction::Command(cmd.into())).unwrap());
        }
        let turn = last.unwrap();
        assert!(turn.verdict.completed);
        assert_eq!(turn.feedback.len(), 1);
        assert!(turn.feedback[0].contains("65"));
        assert!(v.session().is_none());

        let profile = v.profile().unwrap();
        assert_eq!(profile.total_points, 65);
        assert_eq!(profile.resistance_level, 8);
        assert!(matches!(
            v.apply(&GameAction::Command("ls".into())),
            Err(VillageError::NoOpenActivity)
        ));
    }

    #[test]
    fn test_changing_level_closes_game() {
        let mut v = village();
        v.select_age(AgeGroup::Senior).unwrap();
        v.open_building(BuildingId::Library).unwrap();
        assert!(v.session().is_some());
        v.change_difficulty(Difficulty::Beginner);
        assert!(v.session().is_some());
        v.change_difficulty(Difficulty::Intermediate);
        assert!(v.session().is_none());
    }

    #[test]
    fn test_only_unconfigured_slots_start_no_game() {
        let mut v = village();
        for age in AgeGroup::ALL {
            for key in LevelKey::universe(age) {
                assert!(v.start_game(key).is_some(), "{key}");
            }
            for difficulty in Difficulty::ALL {
                let workshop = LevelKey::new(age, difficulty, BuildingId::Workshop);
                assert!(v.start_game(workshop).is_none());
            }
        }
    }

    #[test]
    fn test_switching_age_closes_game() {
        let mut v = village();
        v.select_age(AgeGroup::Junior).unwrap();
        v.open_building(BuildingId::Lab).unwrap();
        v.select_age(AgeGroup::Junior).unwrap();
        assert_eq!(v.open_building_id(), Some(BuildingId::Lab));

        v.select_age(AgeGroup::Senior).unwrap();
        assert!(v.session().is_none());
        assert!(matches!(
            v.apply(&GameAction::NextStep),
            Err(VillageError::NoOpenActivity)
        ));
    }

    #[test]
    fn test_completion_booked_under_opened_slot() {
        let mut v = village();
        v.select_age(AgeGroup::Junior).unwrap();
        v.open_building(BuildingId::Lab).unwrap();
        while let Some(action) = v.session().and_then(|s| s.perfect_action()) {
            v.apply(&action).unwrap();
        }
        let junior = LevelKey::new(AgeGroup::Junior, Difficulty::Beginner, BuildingId::Lab);
        let senior = LevelKey::new(AgeGroup::Senior, Difficulty::Beginner, BuildingId::Lab);
        assert!(v.progress().is_completed(junior));
        assert!(!v.progress().is_completed(senior));
    }

    #[test]
    fn test_failed_save_closes_game_and_keeps_progress() {
        let storage = RejectingStorage::new(crate::progress::keys::POINTS);
        let mut v = Village::with_seed(storage, VillageConfig::default(), 17).unwrap();
        v.select_age(AgeGroup::Junior).unwrap();
        v.open_building(BuildingId::Lab).unwrap();

        let mut result = None;
        while let Some(action) = v.session().and_then(|s| s.perfect_action()) {
            result = Some(v.apply(&action));
        }
        assert!(matches!(result, Some(Err(VillageError::Storage(StorageError::Io(_))))));
        assert!(v.session().is_none());
        assert_eq!(v.progress().total_points(), 0);
        assert_eq!(v.profile().unwrap().resistance_level, 0);

        // The building can be opened and played again.
        assert_eq!(
            v.open_building(BuildingId::Lab).unwrap(),
            Opened::Game(ActivityKind::BubbleSort)
        );
        assert!(v.session().and_then(|s| s.perfect_action()).is_some());
    }

    #[test]
    fn test_reset_forgets_age() {
        let mut v = village();
        v.select_age(AgeGroup::Junior).unwrap();
        v.reset().unwrap();
        assert_eq!(v.age(), None);
        assert_eq!(v.description(), None);
    }
}
