//! Persisted player progress: completed levels, points, badges, age group.
//!
//! Every key is stored as a string under the names in [`keys`], so a file
//! written by the browser build can be read back and vice versa. Loading
//! validates each key on its own; a key that does not parse is logged,
//! removed and replaced by its default while the others are kept.
//!
//! `total_points` grows on every completion, replays included, while the
//! per-level record keeps only the latest result.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::config::ProgressionRules;
use crate::error::{CorruptedStateError, StorageError};
use crate::storage::Storage;
use crate::village::{AgeGroup, BuildingId, Difficulty, LevelKey};

/// Storage key names.
pub mod keys {
    pub const POINTS: &str = "villagePoints";
    pub const BADGES: &str = "villageBadges";
    pub const AGE: &str = "villageAge";
    pub const COMPLETED_LEVELS: &str = "villageCompletedLevels";
    pub const LEVEL_RESULTS: &str = "villageLevelResults";
    pub const SCHEMA_VERSION: &str = "villageSchemaVersion";
    /// Owned by the community form; the progress store never touches it.
    pub const COMMUNITY_IDEAS: &str = "communityIdeas";
    /// Owned by the community form; the progress store never touches it.
    pub const USER_QUESTIONS: &str = "userQuestions";

    /// Keys cleared by a reset.
    pub const PROGRESS: [&str; 5] = [POINTS, BADGES, AGE, COMPLETED_LEVELS, LEVEL_RESULTS];
}

/// Current layout of the persisted keys.
pub const SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Badge {
    Starter,
    Hero,
    Champion,
}

impl Badge {
    pub const ALL: [Badge; 3] = [Badge::Starter, Badge::Hero, Badge::Champion];

    pub fn threshold(self, rules: &ProgressionRules) -> u32 {
        match self {
            Badge::Starter => rules.starter_threshold,
            Badge::Hero => rules.hero_threshold,
            Badge::Champion => rules.champion_threshold,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Badge::Starter => "Débutant résistant",
            Badge::Hero => "Héros du libre",
            Badge::Champion => "Champion NIRD",
        }
    }
}

/// Latest result for one level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ProgressRecord {
    pub completed: bool,
    pub points_earned: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CumulativeProfile {
    pub total_points: u32,
    pub badges: Vec<Badge>,
    /// Percentage of the age group's village levels completed.
    pub resistance_level: u8,
}

/// What a single completion changed.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CompletionOutcome {
    /// The level had never been completed before.
    pub first_completion: bool,
    /// Granted when this completion finished a building.
    pub building_bonus: u32,
    /// Granted when this completion finished the whole village.
    pub village_bonus: u32,
    pub new_badges: Vec<Badge>,
    pub total_points: u32,
}

impl CompletionOutcome {
    pub fn bonus_points(&self) -> u32 {
        self.building_bonus + self.village_bonus
    }
}

pub struct ProgressStore<S> {
    storage: S,
    rules: ProgressionRules,
    total_points: u32,
    badges: Vec<Badge>,
    selected_age: Option<AgeGroup>,
    completed: BTreeMap<LevelKey, bool>,
    results: BTreeMap<LevelKey, u32>,
}

impl<S: Storage> ProgressStore<S> {
    /// Read and validate persisted progress.
    ///
    /// Only storage failures are returned; malformed keys fall back to
    /// their defaults.
    pub fn load(storage: S, rules: ProgressionRules) -> Result<Self, StorageError> {
        let mut store = Self {
            storage,
            rules,
            total_points: 0,
            badges: Vec::new(),
            selected_age: None,
            completed: BTreeMap::new(),
            results: BTreeMap::new(),
        };

        match store.storage.get_item(keys::SCHEMA_VERSION)? {
            Some(raw) => {
                if let Err(err) = parse_version(&raw) {
                    log::warn!("{err}; discarding all saved progress");
                    for key in keys::PROGRESS {
                        store.storage.remove_item(key)?;
                    }
                    store.write_version()?;
                }
            }
            None => store.write_version()?,
        }

        store.total_points = store.load_key(keys::POINTS, parse_points)?.unwrap_or(0);
        store.badges = store.load_key(keys::BADGES, parse_badges)?.unwrap_or_default();
        store.selected_age = store.load_key(keys::AGE, parse_age)?;
        store.completed = store
            .load_key(keys::COMPLETED_LEVELS, |raw| {
                parse_level_map(keys::COMPLETED_LEVELS, raw)
            })?
            .unwrap_or_default();
        store.results = store
            .load_key(keys::LEVEL_RESULTS, |raw| {
                parse_level_map(keys::LEVEL_RESULTS, raw)
            })?
            .unwrap_or_default();

        log::debug!(
            "progress loaded: {} points, {} badges, {} levels completed",
            store.total_points,
            store.badges.len(),
            store.completed.values().filter(|done| **done).count()
        );
        Ok(store)
    }

    /// Read one key, dropping it if it does not validate.
    fn load_key<T>(
        &mut self,
        key: &'static str,
        parse: impl FnOnce(&str) -> Result<T, CorruptedStateError>,
    ) -> Result<Option<T>, StorageError> {
        let Some(raw) = self.storage.get_item(key)? else {
            return Ok(None);
        };
        match parse(&raw) {
            Ok(value) => Ok(Some(value)),
            Err(err) => {
                log::warn!("{err}; using default");
                self.storage.remove_item(key)?;
                Ok(None)
            }
        }
    }

    fn write_version(&mut self) -> Result<(), StorageError> {
        self.storage
            .set_item(keys::SCHEMA_VERSION, &SCHEMA_VERSION.to_string())
    }

    pub fn rules(&self) -> &ProgressionRules {
        &self.rules
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn into_storage(self) -> S {
        self.storage
    }

    pub fn total_points(&self) -> u32 {
        self.total_points
    }

    pub fn badges(&self) -> &[Badge] {
        &self.badges
    }

    pub fn selected_age(&self) -> Option<AgeGroup> {
        self.selected_age
    }

    pub fn select_age(&mut self, age: AgeGroup) -> Result<(), StorageError> {
        self.selected_age = Some(age);
        self.storage.set_item(keys::AGE, age.as_str())
    }

    pub fn is_completed(&self, key: LevelKey) -> bool {
        self.completed.get(&key).copied().unwrap_or(false)
    }

    pub fn record(&self, key: LevelKey) -> Option<ProgressRecord> {
        let completed = self.is_completed(key);
        let points = self.results.get(&key).copied();
        if !completed && points.is_none() {
            return None;
        }
        Some(ProgressRecord {
            completed,
            points_earned: points.unwrap_or(0),
        })
    }

    /// Number of village levels completed by an age group.
    pub fn completed_count(&self, age: AgeGroup) -> usize {
        LevelKey::universe(age)
            .filter(|key| self.is_completed(*key))
            .count()
    }

    /// `round(completed / total * 100)`, clamped to 0..=100.
    pub fn resistance_level(&self, age: AgeGroup) -> u8 {
        let total = LevelKey::universe(age).count();
        if total == 0 {
            return 0;
        }
        let pct = (self.completed_count(age) as f64 / total as f64 * 100.0).round();
        pct.clamp(0.0, 100.0) as u8
    }

    pub fn profile(&self, age: AgeGroup) -> CumulativeProfile {
        CumulativeProfile {
            total_points: self.total_points,
            badges: self.badges.clone(),
            resistance_level: self.resistance_level(age),
        }
    }

    fn building_complete(&self, age: AgeGroup, building: BuildingId) -> bool {
        Difficulty::ALL
            .into_iter()
            .all(|d| self.is_completed(LevelKey::new(age, d, building)))
    }

    fn village_complete(&self, age: AgeGroup) -> bool {
        LevelKey::universe(age).all(|key| self.is_completed(key))
    }

    /// Record a finished game and persist the result.
    ///
    /// The level record is overwritten; `total_points` always accumulates.
    /// When saving fails the in-memory state is rolled back, so the store
    /// never holds progress that storage does not.
    pub fn record_completion(
        &mut self,
        age: AgeGroup,
        difficulty: Difficulty,
        building: BuildingId,
        points: u32,
    ) -> Result<CompletionOutcome, StorageError> {
        let key = LevelKey::new(age, difficulty, building);
        let first_completion = !self.is_completed(key);
        let is_village = BuildingId::VILLAGE.contains(&building);
        let building_was_done = self.building_complete(age, building);
        let village_was_done = self.village_complete(age);
        let before = (
            self.total_points,
            self.badges.clone(),
            self.completed.clone(),
            self.results.clone(),
        );

        self.completed.insert(key, true);
        self.results.insert(key, points);
        self.total_points = self.total_points.saturating_add(points);

        let mut building_bonus = 0;
        let mut village_bonus = 0;
        if is_village && !building_was_done && self.building_complete(age, building) {
            building_bonus = self.rules.building_bonus;
            log::info!(
                "{} complete for {}: +{} bonus",
                building.info().name,
                age,
                self.rules.building_bonus
            );
        }
        if is_village && !village_was_done && self.village_complete(age) {
            village_bonus = self.rules.village_bonus;
            log::info!("village complete for {}: +{} bonus", age, self.rules.village_bonus);
        }
        self.total_points = self
            .total_points
            .saturating_add(building_bonus + village_bonus);

        let new_badges = self.award_badges();
        if let Err(err) = self.persist() {
            log::warn!("could not save {}: {}", key, err);
            (self.total_points, self.badges, self.completed, self.results) = before;
            // Undo any keys written before the failure.
            if let Err(restore) = self.persist() {
                log::debug!("restoring saved progress failed: {}", restore);
            }
            return Err(err);
        }

        log::info!(
            "{} completed with {} points (total {})",
            key,
            points,
            self.total_points
        );
        Ok(CompletionOutcome {
            first_completion,
            building_bonus,
            village_bonus,
            new_badges,
            total_points: self.total_points,
        })
    }

    /// Append every badge whose threshold is now reached. Never removes one.
    fn award_badges(&mut self) -> Vec<Badge> {
        let mut new_badges = Vec::new();
        for badge in Badge::ALL {
            if self.total_points >= badge.threshold(&self.rules) && !self.badges.contains(&badge) {
                self.badges.push(badge);
                new_badges.push(badge);
                log::info!("badge earned: {}", badge.label());
            }
        }
        new_badges
    }

    /// Forget everything: records, points, badges and the chosen age group.
    pub fn reset(&mut self) -> Result<(), StorageError> {
        self.total_points = 0;
        self.badges.clear();
        self.selected_age = None;
        self.completed.clear();
        self.results.clear();
        for key in keys::PROGRESS {
            self.storage.remove_item(key)?;
        }
        log::info!("progress reset");
        Ok(())
    }

    fn persist(&mut self) -> Result<(), StorageError> {
        let completed: BTreeMap<String, bool> = self
            .completed
            .iter()
            .map(|(key, done)| (key.to_string(), *done))
            .collect();
        let results: BTreeMap<String, u32> = self
            .results
            .iter()
            .map(|(key, points)| (key.to_string(), *points))
            .collect();

        self.write_version()?;
        self.storage
            .set_item(keys::POINTS, &self.total_points.to_string())?;
        self.storage
            .set_item(keys::BADGES, &serde_json::to_string(&self.badges)?)?;
        self.storage
            .set_item(keys::COMPLETED_LEVELS, &serde_json::to_string(&completed)?)?;
        self.storage
            .set_item(keys::LEVEL_RESULTS, &serde_json::to_string(&results)?)?;
        Ok(())
    }
}

fn parse_version(raw: &str) -> Result<u32, CorruptedStateError> {
    let version: u32 = raw
        .trim()
        .parse()
        .map_err(|e| CorruptedStateError::new(keys::SCHEMA_VERSION, format!("{e}")))?;
    if version > SCHEMA_VERSION {
        return Err(CorruptedStateError::new(
            keys::SCHEMA_VERSION,
            format!("version {version} is newer than supported {SCHEMA_VERSION}"),
        ));
    }
    Ok(version)
}

fn parse_points(raw: &str) -> Result<u32, CorruptedStateError> {
    raw.trim()
        .parse()
        .map_err(|e| CorruptedStateError::new(keys::POINTS, format!("{e}")))
}

fn parse_badges(raw: &str) -> Result<Vec<Badge>, CorruptedStateError> {
    let parsed: Vec<Badge> = serde_json::from_str(raw)
        .map_err(|e| CorruptedStateError::new(keys::BADGES, e.to_string()))?;
    let mut badges = Vec::with_capacity(parsed.len());
    for badge in parsed {
        if !badges.contains(&badge) {
            badges.push(badge);
        }
    }
    Ok(badges)
}

fn parse_age(raw: &str) -> Result<AgeGroup, CorruptedStateError> {
    AgeGroup::parse(raw.trim())
        .ok_or_else(|| CorruptedStateError::new(keys::AGE, format!("unknown age group `{raw}`")))
}

fn parse_level_map<V>(
    key: &'static str,
    raw: &str,
) -> Result<BTreeMap<LevelKey, V>, CorruptedStateError>
where
    V: for<'de> Deserialize<'de>,
{
    let entries: BTreeMap<String, V> =
        serde_json::from_str(raw).map_err(|e| CorruptedStateError::new(key, e.to_string()))?;
    entries
        .into_iter()
        .map(|(level, value)| {
            LevelKey::parse(&level)
                .map(|k| (k, value))
                .ok_or_else(|| CorruptedStateError::new(key, format!("bad level key `{level}`")))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;
    use AgeGroup::*;
    use BuildingId::*;
    use Difficulty::*;

    fn store() -> ProgressStore<MemoryStorage> {
        ProgressStore::load(MemoryStorage::new(), ProgressionRules::default()).unwrap()
    }

    fn no_bonus() -> ProgressionRules {
        ProgressionRules {
            building_bonus: 0,
            village_bonus: 0,
            ..ProgressionRules::default()
        }
    }

    #[test]
    fn test_fresh_store_writes_schema_version() {
        let s = store();
        assert_eq!(
            s.storage().get_item(keys::SCHEMA_VERSION).unwrap().as_deref(),
            Some("1")
        );
        assert_eq!(s.total_points(), 0);
        assert!(s.badges().is_empty());
        assert_eq!(s.resistance_level(Junior), 0);
    }

    #[test]
    fn test_record_overwrites_but_points_accumulate() {
        let mut s = store();
        let first = s.record_completion(Junior, Beginner, Lab, 30).unwrap();
        assert!(first.first_completion);
        let again = s.record_completion(Junior, Beginner, Lab, 20).unwrap();
        assert!(!again.first_completion);

        let key = LevelKey::new(Junior, Beginner, Lab);
        assert_eq!(
            s.record(key),
            Some(ProgressRecord {
                completed: true,
                points_earned: 20
            })
        );
        assert_eq!(s.total_points(), 50);
        assert_eq!(s.completed_count(Junior), 1);
    }

    #[test]
    fn test_four_of_twelve_is_thirty_three() {
        let mut s = ProgressStore::load(MemoryStorage::new(), no_bonus()).unwrap();
        s.record_completion(Junior, Beginner, Lab, 10).unwrap();
        s.record_completion(Junior, Beginner, Library, 10).unwrap();
        s.record_completion(Junior, Intermediate, Eco, 10).unwrap();
        s.record_completion(Junior, Advanced, CityHall, 10).unwrap();
        // Other age group and the workshop do not count.
        s.record_completion(Senior, Beginner, Lab, 10).unwrap();
        s.record_completion(Junior, Beginner, Workshop, 10).unwrap();
        assert_eq!(s.resistance_level(Junior), 33);
        assert_eq!(s.profile(Senior).resistance_level, 8);
    }

    #[test]
    fn test_badges_cross_thresholds_once() {
        let mut s = ProgressStore::load(MemoryStorage::new(), no_bonus()).unwrap();
        let out = s.record_completion(Junior, Beginner, Lab, 25).unwrap();
        assert_eq!(out.new_badges, vec![Badge::Starter]);
        let out = s.record_completion(Junior, Beginner, Lab, 90).unwrap();
        assert_eq!(out.new_badges, vec![Badge::Hero, Badge::Champion]);
        let out = s.record_completion(Junior, Beginner, Lab, 0).unwrap();
        assert!(out.new_badges.is_empty());
        assert_eq!(s.badges(), &[Badge::Starter, Badge::Hero, Badge::Champion]);
        assert_eq!(
            s.storage().get_item(keys::BADGES).unwrap().as_deref(),
            Some(r#"["starter","hero","champion"]"#)
        );
    }

    #[test]
    fn test_failed_save_rolls_back_memory() {
        let storage = crate::storage::RejectingStorage::new(keys::BADGES);
        let mut s = ProgressStore::load(storage, ProgressionRules::default()).unwrap();
        let err = s.record_completion(Junior, Beginner, Lab, 60);
        assert!(matches!(err, Err(StorageError::Io(_))));

        let key = LevelKey::new(Junior, Beginner, Lab);
        assert_eq!(s.total_points(), 0);
        assert!(s.badges().is_empty());
        assert_eq!(s.record(key), None);
        // The points key written before the failure is restored too.
        assert_eq!(s.storage().get_item(keys::POINTS).unwrap().as_deref(), Some("0"));
    }

    #[test]
    fn test_building_and_village_bonus_granted_once() {
        let mut s = store();
        s.record_completion(Senior, Beginner, Eco, 10).unwrap();
        s.record_completion(Senior, Intermediate, Eco, 10).unwrap();
        let out = s.record_completion(Senior, Advanced, Eco, 10).unwrap();
        assert_eq!(out.building_bonus, 50);
        assert_eq!(out.village_bonus, 0);
        assert_eq!(s.total_points(), 80);

        let replay = s.record_completion(Senior, Advanced, Eco, 10).unwrap();
        assert_eq!(replay.bonus_points(), 0);

        let mut last = CompletionOutcome::default();
        for key in LevelKey::universe(Senior) {
            if !s.is_completed(key) {
                last = s
                    .record_completion(key.age, key.difficulty, key.building, 0)
                    .unwrap();
            }
        }
        // Last building bonus plus the village bonus.
        assert_eq!(last.bonus_points(), 150);
        assert_eq!(last.village_bonus, 100);
        assert_eq!(s.resistance_level(Senior), 100);
        assert_eq!(s.total_points(), 90 + 3 * 50 + 100);
    }

    #[test]
    fn test_reset_clears_progress_only() {
        let mut storage = MemoryStorage::new();
        storage.set_item(keys::COMMUNITY_IDEAS, "[]").unwrap();
        let mut s = ProgressStore::load(storage, ProgressionRules::default()).unwrap();
        s.select_age(Senior).unwrap();
        s.record_completion(Senior, Advanced, Lab, 120).unwrap();
        assert_eq!(s.badges().len(), 3);

        s.reset().unwrap();
        assert_eq!(s.total_points(), 0);
        assert!(s.badges().is_empty());
        assert_eq!(s.selected_age(), None);
        assert_eq!(s.record(LevelKey::new(Senior, Advanced, Lab)), None);
        for key in keys::PROGRESS {
            assert_eq!(s.storage().get_item(key).unwrap(), None);
        }
        assert_eq!(
            s.storage().get_item(keys::COMMUNITY_IDEAS).unwrap().as_deref(),
            Some("[]")
        );
    }

    #[test]
    fn test_reload_restores_state() {
        let mut s = store();
        s.select_age(Junior).unwrap();
        s.record_completion(Junior, Intermediate, Library, 45).unwrap();
        let storage = s.into_storage();
        assert_eq!(
            storage.get_item(keys::COMPLETED_LEVELS).unwrap().as_deref(),
            Some(r#"{"junior-intermediate-library":true}"#)
        );

        let s = ProgressStore::load(storage, ProgressionRules::default()).unwrap();
        assert_eq!(s.selected_age(), Some(Junior));
        assert_eq!(s.total_points(), 45);
        assert_eq!(s.badges(), &[Badge::Starter]);
        assert!(s.is_completed(LevelKey::new(Junior, Intermediate, Library)));
    }

    #[test]
    fn test_corrupted_key_falls_back_to_default() {
        let mut storage = MemoryStorage::new();
        storage.set_item(keys::POINTS, "lots").unwrap();
        storage.set_item(keys::BADGES, r#"["starter"]"#).unwrap();
        storage.set_item(keys::AGE, "toddler").unwrap();
        storage
            .set_item(keys::COMPLETED_LEVELS, r#"{"junior-expert-lab":true}"#)
            .unwrap();

        let s = ProgressStore::load(storage, ProgressionRules::default()).unwrap();
        assert_eq!(s.total_points(), 0);
        assert_eq!(s.badges(), &[Badge::Starter]);
        assert_eq!(s.selected_age(), None);
        assert_eq!(s.completed_count(Junior), 0);
        assert_eq!(s.storage().get_item(keys::POINTS).unwrap(), None);
        assert_eq!(s.storage().get_item(keys::AGE).unwrap(), None);
        assert!(s.storage().get_item(keys::BADGES).unwrap().is_some());
    }

    #[test]
    fn test_newer_schema_discards_progress() {
        let mut storage = MemoryStorage::new();
        storage.set_item(keys::SCHEMA_VERSION, "7").unwrap();
        storage.set_item(keys::POINTS, "300").unwrap();
        storage.set_item(keys::USER_QUESTIONS, "[]").unwrap();

        let s = ProgressStore::load(storage, ProgressionRules::default()).unwrap();
        assert_eq!(s.total_points(), 0);
        assert_eq!(
            s.storage().get_item(keys::SCHEMA_VERSION).unwrap().as_deref(),
            Some("1")
        );
        assert!(s.storage().get_item(keys::USER_QUESTIONS).unwrap().is_some());
    }
}
