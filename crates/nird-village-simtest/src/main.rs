//! NIRD Village Headless Harness
//!
//! Validates the activity table, the content catalog and complete village
//! play-throughs without a browser. Runs entirely in-process.
//!
//! Usage:
//!   cargo run -p nird-village-simtest
//!   cargo run -p nird-village-simtest -- --verbose
//!   cargo run -p nird-village-simtest -- --config village.json --json

use std::collections::HashSet;
use std::path::PathBuf;

use nird_village_logic::activity::{select_activity, ActivitySlot, ACTIVITY_TABLE};
use nird_village_logic::catalog::{self, COMMAND_VOCABULARY};
use nird_village_logic::config::VillageConfig;
use nird_village_logic::games::terminal::{suggestions, MAX_SUGGESTIONS};
use nird_village_logic::games::{GameAction, GameSession};
use nird_village_logic::progress::{keys, Badge, ProgressStore};
use nird_village_logic::session::{Opened, Turn};
use nird_village_logic::storage::{JsonFileStorage, MemoryStorage, Storage};
use nird_village_logic::{AgeGroup, BuildingId, Difficulty, LevelKey, Village};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

// ── Test harness ────────────────────────────────────────────────────────

#[derive(Serialize)]
struct TestResult {
    name: String,
    passed: bool,
    detail: String,
}

impl TestResult {
    fn check(name: &str, passed: bool, detail: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            passed,
            detail: detail.into(),
        }
    }
}

struct Options {
    verbose: bool,
    json: bool,
    config: Option<PathBuf>,
}

impl Options {
    fn from_args() -> Self {
        let args: Vec<String> = std::env::args().skip(1).collect();
        let config = args
            .iter()
            .position(|a| a == "--config")
            .and_then(|i| args.get(i + 1))
            .map(PathBuf::from);
        Self {
            verbose: args.iter().any(|a| a == "--verbose"),
            json: args.iter().any(|a| a == "--json"),
            config,
        }
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}

fn main() {
    let opts = Options::from_args();
    init_logging(opts.verbose);
    println!("=== NIRD Village Harness ===\n");

    let mut results = Vec::new();

    // 1. Configuration
    let config = match load_config(&opts) {
        Ok(config) => {
            results.push(TestResult::check(
                "config_load",
                true,
                format!(
                    "badges at {}/{}/{}",
                    config.progression.starter_threshold,
                    config.progression.hero_threshold,
                    config.progression.champion_threshold
                ),
            ));
            config
        }
        Err(e) => {
            results.push(TestResult::check("config_load", false, e));
            VillageConfig::default()
        }
    };

    // 2. Activity table
    results.extend(validate_activity_table(opts.verbose));

    // 3. Content catalog
    results.extend(validate_catalog(opts.verbose));

    // 4. Full play-throughs per age group
    for age in AgeGroup::ALL {
        results.extend(validate_playthrough(age, &config, opts.verbose));
    }

    // 5. Scoring edge cases
    results.extend(validate_scoring_rules(&config, opts.verbose));

    // 6. Persistence
    results.extend(validate_persistence(&config, opts.verbose));

    // ── Summary ──
    println!();
    let passed = results.iter().filter(|r| r.passed).count();
    let failed = results.len() - passed;

    if opts.json {
        match serde_json::to_string_pretty(&results) {
            Ok(json) => println!("{}", json),
            Err(e) => log::error!("could not encode results: {}", e),
        }
    } else {
        for r in &results {
            let icon = if r.passed { "✓" } else { "✗" };
            if !r.passed || opts.verbose {
                println!("  {} {}: {}", icon, r.name, r.detail);
            }
        }
    }

    println!(
        "\n=== RESULT: {}/{} passed, {} failed ===",
        passed,
        results.len(),
        failed
    );

    if failed > 0 {
        std::process::exit(1);
    }
}

fn load_config(opts: &Options) -> Result<VillageConfig, String> {
    let Some(path) = &opts.config else {
        return Ok(VillageConfig::default());
    };
    let text = std::fs::read_to_string(path).map_err(|e| format!("{}: {}", path.display(), e))?;
    VillageConfig::from_json_str(&text).map_err(|e| format!("{}: {}", path.display(), e))
}

/// Drive the open game with perfect moves until it completes.
fn play_open_game<S: Storage>(village: &mut Village<S>) -> Result<Turn, String> {
    // Generous bound; the longest game needs well under a hundred moves.
    for _ in 0..200 {
        let action = village
            .session()
            .and_then(GameSession::perfect_action)
            .ok_or("no move available before completion")?;
        let turn = village.apply(&action).map_err(|e| e.to_string())?;
        if turn.verdict.completed {
            return Ok(turn);
        }
    }
    Err("game did not complete".into())
}

// ── 2. Activity Table ───────────────────────────────────────────────────

fn validate_activity_table(verbose: bool) -> Vec<TestResult> {
    println!("--- Activity Table ---");
    let mut results = Vec::new();

    results.push(TestResult::check(
        "table_size",
        ACTIVITY_TABLE.len() == 24,
        format!("{} configured slots", ACTIVITY_TABLE.len()),
    ));

    let mut seen = HashSet::new();
    let duplicates: Vec<_> = ACTIVITY_TABLE
        .iter()
        .filter(|(b, a, d, _)| !seen.insert((*b, *a, *d)))
        .collect();
    results.push(TestResult::check(
        "table_unique_slots",
        duplicates.is_empty(),
        if duplicates.is_empty() {
            "one row per slot".to_string()
        } else {
            format!("{} duplicate rows", duplicates.len())
        },
    ));

    let uncovered: Vec<String> = AgeGroup::ALL
        .into_iter()
        .flat_map(LevelKey::universe)
        .filter(|k| select_activity(k.building, k.age, k.difficulty) == ActivitySlot::Unconfigured)
        .map(|k| k.to_string())
        .collect();
    results.push(TestResult::check(
        "table_covers_village",
        uncovered.is_empty(),
        if uncovered.is_empty() {
            "every village slot has a game".to_string()
        } else {
            format!("unconfigured: {}", uncovered.join(", "))
        },
    ));

    let workshop_open = AgeGroup::ALL.into_iter().any(|age| {
        Difficulty::ALL.into_iter().any(|d| {
            select_activity(BuildingId::Workshop, age, d) != ActivitySlot::Unconfigured
        })
    });
    results.push(TestResult::check(
        "workshop_unconfigured",
        !workshop_open,
        "adults-only workshop yields the placeholder",
    ));

    if verbose {
        for (building, age, difficulty, kind) in ACTIVITY_TABLE {
            println!("  {:<9} {:<6} {:<12} → {}", building, age, difficulty, kind);
        }
    }

    results
}

// ── 3. Content Catalog ──────────────────────────────────────────────────

fn validate_catalog(verbose: bool) -> Vec<TestResult> {
    println!("--- Content Catalog ---");
    let mut results = Vec::new();

    let mut questions = catalog::package_manager_questions();
    for age in AgeGroup::ALL {
        for key in LevelKey::universe(age) {
            if let Some(set) = catalog::hybrid_set(key) {
                questions.extend(set.questions);
            }
        }
    }
    let bad: Vec<&str> = questions
        .iter()
        .filter(|q| q.options.iter().filter(|o| o.correct).count() != 1)
        .map(|q| q.text)
        .collect();
    results.push(TestResult::check(
        "questions_one_correct_option",
        bad.is_empty(),
        if bad.is_empty() {
            format!("{} questions checked", questions.len())
        } else {
            format!("ambiguous: {}", bad.join(" | "))
        },
    ));

    let mut stray = Vec::new();
    for age in AgeGroup::ALL {
        for key in LevelKey::universe(age) {
            if let Some(set) = catalog::categorize_set(key) {
                if set.items.iter().any(|i| !set.categories.contains(&i.category)) {
                    stray.push(key.to_string());
                }
            }
            if let Some(set) = catalog::hybrid_set(key) {
                if set.items.iter().any(|i| !set.categories.contains(&i.category)) {
                    stray.push(format!("{} (hybrid)", key));
                }
            }
        }
    }
    results.push(TestResult::check(
        "items_have_known_category",
        stray.is_empty(),
        if stray.is_empty() {
            "every item targets a listed category".to_string()
        } else {
            format!("stray items in {}", stray.join(", "))
        },
    ));

    let tasks = catalog::command_tasks();
    let task_points: u32 = tasks.iter().map(|t| t.points).sum();
    results.push(TestResult::check(
        "command_tasks",
        tasks.len() == 5 && task_points == 65,
        format!("{} tasks, {} points", tasks.len(), task_points),
    ));

    let over_cap = COMMAND_VOCABULARY
        .iter()
        .filter_map(|cmd| cmd.get(..1))
        .any(|prefix| suggestions(prefix).len() > MAX_SUGGESTIONS);
    results.push(TestResult::check(
        "autocomplete_cap",
        !over_cap,
        format!("at most {} suggestions", MAX_SUGGESTIONS),
    ));

    if verbose {
        println!(
            "  {} questions, {} vocabulary entries, {} distros",
            questions.len(),
            COMMAND_VOCABULARY.len(),
            catalog::distros().len()
        );
    }

    results
}

// ── 4. Play-throughs ────────────────────────────────────────────────────

fn validate_playthrough(age: AgeGroup, config: &VillageConfig, verbose: bool) -> Vec<TestResult> {
    println!("--- Play-through ({}) ---", age.label());
    let mut results = Vec::new();

    let mut village = match Village::with_seed(MemoryStorage::new(), config.clone(), 42) {
        Ok(v) => v,
        Err(e) => {
            results.push(TestResult::check("village_init", false, e.to_string()));
            return results;
        }
    };
    if let Err(e) = village.select_age(age) {
        results.push(TestResult::check("select_age", false, e.to_string()));
        return results;
    }

    let mut failures = Vec::new();
    let mut earned = 0;
    let mut bonuses = 0;
    for building in BuildingId::VILLAGE {
        for difficulty in Difficulty::ALL {
            village.change_difficulty(difficulty);
            let outcome = match village.open_building(building) {
                Ok(Opened::Game(_)) => play_open_game(&mut village),
                Ok(other) => Err(format!("did not open: {:?}", other)),
                Err(e) => Err(e.to_string()),
            };
            match outcome {
                Ok(turn) => {
                    earned += turn.verdict.score;
                    bonuses += turn.outcome.map(|o| o.bonus_points()).unwrap_or(0);
                    if verbose {
                        println!(
                            "  {:<9} {:<12} {:>3} pts  {}",
                            building,
                            difficulty,
                            turn.verdict.score,
                            turn.feedback.join(" / ")
                        );
                    }
                }
                Err(e) => failures.push(format!("{}-{}: {}", difficulty, building, e)),
            }
        }
    }
    let name = |check: &str| format!("{}_{}", age, check);

    results.push(TestResult::check(
        &name("all_slots_complete"),
        failures.is_empty(),
        if failures.is_empty() {
            format!("12 games won, {} points", earned)
        } else {
            failures.join("; ")
        },
    ));

    let Some(profile) = village.profile() else {
        results.push(TestResult::check(&name("profile"), false, "no age selected"));
        return results;
    };
    results.push(TestResult::check(
        &name("resistance_full"),
        profile.resistance_level == 100,
        format!("resistance {}%", profile.resistance_level),
    ));

    let expected_bonus = 4 * config.progression.building_bonus + config.progression.village_bonus;
    results.push(TestResult::check(
        &name("bonuses"),
        bonuses == expected_bonus && profile.total_points == earned + bonuses,
        format!("{} bonus points, {} total", bonuses, profile.total_points),
    ));

    let expected_badges: Vec<Badge> = Badge::ALL
        .into_iter()
        .filter(|b| profile.total_points >= b.threshold(&config.progression))
        .collect();
    results.push(TestResult::check(
        &name("badges"),
        profile.badges == expected_badges,
        format!("{:?}", profile.badges),
    ));

    results
}

// ── 5. Scoring Rules ────────────────────────────────────────────────────

fn validate_scoring_rules(config: &VillageConfig, _verbose: bool) -> Vec<TestResult> {
    println!("--- Scoring Rules ---");
    let mut results = Vec::new();

    let mut village = match Village::with_seed(MemoryStorage::new(), config.clone(), 7) {
        Ok(v) => v,
        Err(e) => {
            results.push(TestResult::check("scoring_init", false, e.to_string()));
            return results;
        }
    };
    let opened = village
        .select_age(AgeGroup::Junior)
        .and_then(|_| village.open_building(BuildingId::Lab));
    if !matches!(opened, Ok(Opened::Game(_))) {
        results.push(TestResult::check(
            "bubble_open",
            false,
            "junior lab beginner did not open",
        ));
        return results;
    }

    // Drop the first item into the wrong bubble.
    let wrong = village.session().and_then(|s| match s.perfect_action() {
        Some(GameAction::Place { item_id, bin }) => {
            let other = if bin == catalog::OPEN_SOURCE {
                catalog::BIG_TECH
            } else {
                catalog::OPEN_SOURCE
            };
            Some(GameAction::Place {
                item_id,
                bin: other.to_string(),
            })
        }
        _ => None,
    });
    let verdict = wrong.and_then(|action| village.apply(&action).ok());
    let floored = verdict.map(|t| t.verdict.score == 0).unwrap_or(false);
    results.push(TestResult::check(
        "score_floor",
        floored,
        "a first mistake leaves the score at 0",
    ));

    let stuck = village.session().map(GameSession::is_stuck).unwrap_or(false);
    let recovered = village.restart_game().is_ok()
        && village.session().map(|s| !s.is_stuck()).unwrap_or(false)
        && play_open_game(&mut village).is_ok();
    results.push(TestResult::check(
        "bubble_stuck_then_reset",
        stuck && recovered,
        format!("stuck={}, recovered={}", stuck, recovered),
    ));

    results
}

// ── 6. Persistence ──────────────────────────────────────────────────────

fn validate_persistence(config: &VillageConfig, verbose: bool) -> Vec<TestResult> {
    println!("--- Persistence ---");
    let mut results = Vec::new();

    let path = std::env::temp_dir().join(format!("nird-village-simtest-{}.json", std::process::id()));
    let _ = std::fs::remove_file(&path);

    let saved = (|| -> Result<u32, String> {
        let storage = JsonFileStorage::open(&path).map_err(|e| e.to_string())?;
        let mut village =
            Village::with_seed(storage, config.clone(), 3).map_err(|e| e.to_string())?;
        village.select_age(AgeGroup::Senior).map_err(|e| e.to_string())?;
        village.change_difficulty(Difficulty::Advanced);
        village.open_building(BuildingId::Lab).map_err(|e| e.to_string())?;
        play_open_game(&mut village)?;
        Ok(village.progress().total_points())
    })();

    let reloaded = saved.and_then(|points| {
        let storage = JsonFileStorage::open(&path).map_err(|e| e.to_string())?;
        let store = ProgressStore::load(storage, config.progression.clone())
            .map_err(|e| e.to_string())?;
        Ok((points, store))
    });
    match reloaded {
        Ok((points, store)) => {
            let key = LevelKey::new(AgeGroup::Senior, Difficulty::Advanced, BuildingId::Lab);
            results.push(TestResult::check(
                "json_file_reload",
                store.total_points() == points
                    && store.is_completed(key)
                    && store.selected_age() == Some(AgeGroup::Senior),
                format!("{} points restored from {}", store.total_points(), path.display()),
            ));
        }
        Err(e) => results.push(TestResult::check("json_file_reload", false, e)),
    }
    let _ = std::fs::remove_file(&path);

    let mut storage = MemoryStorage::new();
    let seeded = storage
        .set_item(keys::POINTS, "not a number")
        .and_then(|_| storage.set_item(keys::BADGES, "[\"starter\"]"));
    let recovered = seeded
        .and_then(|_| ProgressStore::load(storage, config.progression.clone()))
        .map(|store| {
            store.total_points() == 0
                && store.badges() == [Badge::Starter]
                && matches!(store.storage().get_item(keys::POINTS), Ok(None))
        })
        .unwrap_or(false);
    results.push(TestResult::check(
        "corrupted_key_recovery",
        recovered,
        "bad key dropped, other keys kept",
    ));

    if verbose {
        println!("  temp file: {}", path.display());
    }

    results
}
