//! Activity selector: which mini-game runs in which village slot.
//!
//! The whole mapping lives in [`ACTIVITY_TABLE`], one row per configured
//! `(building, age, difficulty)` triple. [`select_activity`] is total: any
//! triple without a row yields [`ActivitySlot::Unconfigured`], which the
//! village renders as a placeholder rather than an error.
//!
//! ```
//! use nird_village_logic::activity::{select_activity, ActivityKind, ActivitySlot};
//! use nird_village_logic::village::{AgeGroup, BuildingId, Difficulty};
//!
//! let slot = select_activity(BuildingId::Lab, AgeGroup::Junior, Difficulty::Beginner);
//! assert_eq!(slot, ActivitySlot::Configured(ActivityKind::BubbleSort));
//!
//! let slot = select_activity(BuildingId::Workshop, AgeGroup::Senior, Difficulty::Advanced);
//! assert_eq!(slot, ActivitySlot::Unconfigured);
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::village::{AgeGroup, BuildingId, Difficulty, LevelKey};

/// Placeholder text for slots without an activity.
pub const PLACEHOLDER_MESSAGE: &str = "Activité en préparation pour ce bâtiment et ce niveau.";

/// The five mini-game variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActivityKind {
    /// Two-bubble sort (open source vs Big Tech).
    BubbleSort,
    /// N-category drag and drop.
    Categorize,
    /// Drag and drop followed by a short quiz.
    CategorizeQuiz,
    /// Terminal command simulator.
    CommandLine,
    /// Linux distribution install walkthrough and package-manager quiz.
    DistroInstall,
}

impl ActivityKind {
    pub const ALL: [ActivityKind; 5] = [
        ActivityKind::BubbleSort,
        ActivityKind::Categorize,
        ActivityKind::CategorizeQuiz,
        ActivityKind::CommandLine,
        ActivityKind::DistroInstall,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ActivityKind::BubbleSort => "bubble sort",
            ActivityKind::Categorize => "categorize",
            ActivityKind::CategorizeQuiz => "categorize + quiz",
            ActivityKind::CommandLine => "command line",
            ActivityKind::DistroInstall => "distro install",
        }
    }
}

impl fmt::Display for ActivityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

/// Result of a selector lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActivitySlot {
    Configured(ActivityKind),
    /// No activity for this triple yet.
    Unconfigured,
}

impl ActivitySlot {
    pub fn kind(self) -> Option<ActivityKind> {
        match self {
            ActivitySlot::Configured(kind) => Some(kind),
            ActivitySlot::Unconfigured => None,
        }
    }
}

use ActivityKind::*;
use AgeGroup::*;
use BuildingId::*;
use Difficulty::*;

/// Every configured slot.
pub const ACTIVITY_TABLE: &[(BuildingId, AgeGroup, Difficulty, ActivityKind)] = &[
    // Salle info: Linux and PC refurbishing
    (Lab, Junior, Beginner, BubbleSort),
    (Lab, Junior, Intermediate, CategorizeQuiz),
    (Lab, Junior, Advanced, CommandLine),
    (Lab, Senior, Beginner, Categorize),
    (Lab, Senior, Intermediate, CategorizeQuiz),
    (Lab, Senior, Advanced, DistroInstall),
    // Bibliothèque: open educational resources
    (Library, Junior, Beginner, BubbleSort),
    (Library, Junior, Intermediate, CategorizeQuiz),
    (Library, Junior, Advanced, Categorize),
    (Library, Senior, Beginner, Categorize),
    (Library, Senior, Intermediate, CategorizeQuiz),
    (Library, Senior, Advanced, Categorize),
    // Mairie: budgets and software choices
    (CityHall, Junior, Beginner, BubbleSort),
    (CityHall, Junior, Intermediate, CategorizeQuiz),
    (CityHall, Junior, Advanced, Categorize),
    (CityHall, Senior, Beginner, Categorize),
    (CityHall, Senior, Intermediate, CategorizeQuiz),
    (CityHall, Senior, Advanced, CategorizeQuiz),
    // Coin éco: digital sobriety
    (Eco, Junior, Beginner, BubbleSort),
    (Eco, Junior, Intermediate, CategorizeQuiz),
    (Eco, Junior, Advanced, Categorize),
    (Eco, Senior, Beginner, Categorize),
    (Eco, Senior, Intermediate, CategorizeQuiz),
    (Eco, Senior, Advanced, Categorize),
];

pub fn select_activity(building: BuildingId, age: AgeGroup, difficulty: Difficulty) -> ActivitySlot {
    ACTIVITY_TABLE
        .iter()
        .find(|(b, a, d, _)| *b == building && *a == age && *d == difficulty)
        .map(|(_, _, _, kind)| ActivitySlot::Configured(*kind))
        .unwrap_or(ActivitySlot::Unconfigured)
}

/// Same lookup keyed by a [`LevelKey`].
pub fn select_for_key(key: LevelKey) -> ActivitySlot {
    select_activity(key.building, key.age, key.difficulty)
}
