//! Pure game logic for the NIRD village.
//!
//! The village is a map of school buildings. Each building hosts a short
//! mini-game per age group and level; finishing one earns points, badges
//! and a share of the "resistance level". Nothing here renders anything:
//! functions take plain data and return results, so the same crate drives a
//! web front end, the headless simtest harness and the unit tests.
//!
//! # Module Overview
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`activity`] | Lookup table from (building, age, level) to a mini-game variant |
//! | [`catalog`] | Static French content: items, categories, questions, commands, distros |
//! | [`config`] | Scoring rules, badge thresholds and bonuses (serde, JSON) |
//! | [`engine`] | Generic categorize and quiz state machines with floored scores |
//! | [`error`] | Error types for games, storage, configuration |
//! | [`games`] | The five mini-games and the [`games::GameSession`] dispatcher |
//! | [`progress`] | Persisted points, badges, level records and resistance level |
//! | [`session`] | Village controller: open buildings, route actions, book results |
//! | [`storage`] | `localStorage`-shaped key/value trait with memory and file backends |
//! | [`village`] | Age groups, levels, buildings and level keys |

pub mod activity;
pub mod catalog;
pub mod config;
pub mod engine;
pub mod error;
pub mod games;
pub mod progress;
pub mod session;
pub mod storage;
pub mod village;

pub use activity::{select_activity, ActivityKind, ActivitySlot};
pub use config::VillageConfig;
pub use games::{GameAction, GameSession};
pub use progress::{Badge, ProgressStore};
pub use session::{Opened, Turn, Village};
pub use village::{AgeGroup, BuildingId, Difficulty, LevelKey};
