//! Village model: age groups, difficulty levels, buildings and level keys.
//!
//! Every mini-game is addressed by a `(age group, difficulty, building)`
//! triple. Its persisted form is the [`LevelKey`] string
//! `"{age}-{level}-{buildingId}"`, e.g. `junior-beginner-lab`.
//!
//! ```
//! use nird_village_logic::village::{AgeGroup, BuildingId, Difficulty, LevelKey};
//!
//! let key = LevelKey::new(AgeGroup::Junior, Difficulty::Beginner, BuildingId::Lab);
//! assert_eq!(key.to_string(), "junior-beginner-lab");
//! assert_eq!(LevelKey::parse("junior-beginner-lab"), Some(key));
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

/// Target audience of the village content.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum AgeGroup {
    /// Under 15.
    #[default]
    Junior,
    /// 15 and over.
    Senior,
}

impl AgeGroup {
    pub const ALL: [AgeGroup; 2] = [AgeGroup::Junior, AgeGroup::Senior];

    pub fn as_str(self) -> &'static str {
        match self {
            AgeGroup::Junior => "junior",
            AgeGroup::Senior => "senior",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "junior" => Some(AgeGroup::Junior),
            "senior" => Some(AgeGroup::Senior),
            _ => None,
        }
    }

    /// Label shown on the age selection screen.
    pub fn label(self) -> &'static str {
        match self {
            AgeGroup::Junior => "Moins de 15 ans",
            AgeGroup::Senior => "15 ans et plus",
        }
    }
}

impl fmt::Display for AgeGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    #[default]
    Beginner,
    Intermediate,
    Advanced,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [
        Difficulty::Beginner,
        Difficulty::Intermediate,
        Difficulty::Advanced,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Difficulty::Beginner => "beginner",
            Difficulty::Intermediate => "intermediate",
            Difficulty::Advanced => "advanced",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "beginner" => Some(Difficulty::Beginner),
            "intermediate" => Some(Difficulty::Intermediate),
            "advanced" => Some(Difficulty::Advanced),
            _ => None,
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// A named activity zone on the village map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum BuildingId {
    #[serde(rename = "lab")]
    Lab,
    #[serde(rename = "library")]
    Library,
    #[serde(rename = "cityhall")]
    CityHall,
    #[serde(rename = "eco")]
    Eco,
    /// Adults-only workshop. Has a map slot but no activities yet.
    #[serde(rename = "workshop")]
    Workshop,
}

impl BuildingId {
    /// Buildings that make up the village progression universe.
    pub const VILLAGE: [BuildingId; 4] = [
        BuildingId::Lab,
        BuildingId::Library,
        BuildingId::CityHall,
        BuildingId::Eco,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            BuildingId::Lab => "lab",
            BuildingId::Library => "library",
            BuildingId::CityHall => "cityhall",
            BuildingId::Eco => "eco",
            BuildingId::Workshop => "workshop",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "lab" => Some(BuildingId::Lab),
            "library" => Some(BuildingId::Library),
            "cityhall" => Some(BuildingId::CityHall),
            "eco" => Some(BuildingId::Eco),
            "workshop" => Some(BuildingId::Workshop),
            _ => None,
        }
    }

    pub fn info(self) -> BuildingInfo {
        match self {
            BuildingId::Lab => BuildingInfo {
                id: self,
                name: "Salle Info Linux",
                description:
                    "Installez Linux NIRD, découvrez les distributions et réutilisez les PC",
                adult_only: false,
            },
            BuildingId::Library => BuildingInfo {
                id: self,
                name: "Bibliothèque Libre",
                description: "Explorez les ressources éducatives libres et la doc Linux",
                adult_only: false,
            },
            BuildingId::CityHall => BuildingInfo {
                id: self,
                name: "Mairie Numérique",
                description: "Gérez les services publics, les budgets et les choix logiciels",
                adult_only: false,
            },
            BuildingId::Eco => BuildingInfo {
                id: self,
                name: "Coin Éco (Green IT)",
                description: "Conseils pour la sobriété numérique",
                adult_only: false,
            },
            BuildingId::Workshop => BuildingInfo {
                id: self,
                name: "Atelier NIRD",
                description: "Reconditionnez du matériel avec la communauté",
                adult_only: true,
            },
        }
    }
}

impl fmt::Display for BuildingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Static presentation data for a building.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildingInfo {
    pub id: BuildingId,
    pub name: &'static str,
    pub description: &'static str,
    pub adult_only: bool,
}

/// Composite key of one mini-game slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LevelKey {
    pub age: AgeGroup,
    pub difficulty: Difficulty,
    pub building: BuildingId,
}

impl LevelKey {
    pub fn new(age: AgeGroup, difficulty: Difficulty, building: BuildingId) -> Self {
        Self {
            age,
            difficulty,
            building,
        }
    }

    /// Parse `"{age}-{level}-{buildingId}"`. None for anything else.
    pub fn parse(s: &str) -> Option<Self> {
        let mut parts = s.splitn(3, '-');
        let age = AgeGroup::parse(parts.next()?)?;
        let difficulty = Difficulty::parse(parts.next()?)?;
        let building = BuildingId::parse(parts.next()?)?;
        Some(Self::new(age, difficulty, building))
    }

    /// Every village slot for one age group (4 buildings × 3 levels).
    pub fn universe(age: AgeGroup) -> impl Iterator<Item = LevelKey> {
        BuildingId::VILLAGE.into_iter().flat_map(move |building| {
            Difficulty::ALL
                .into_iter()
                .map(move |difficulty| LevelKey::new(age, difficulty, building))
        })
    }
}

impl fmt::Display for LevelKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}-{}", self.age, self.difficulty, self.building)
    }
}

/// Intro text shown above the map for an age group and level.
pub fn village_description(age: AgeGroup, difficulty: Difficulty) -> &'static str {
    match (age, difficulty) {
        (AgeGroup::Junior, Difficulty::Beginner) => {
            "Bienvenue dans le village NIRD ! Explore chaque bâtiment pour apprendre les bases du numérique libre et responsable."
        }
        (AgeGroup::Junior, Difficulty::Intermediate) => {
            "Découvre comment les logiciels libres peuvent aider ton école à être plus écologique et indépendante."
        }
        (AgeGroup::Junior, Difficulty::Advanced) => {
            "Deviens un expert du numérique durable en relevant tous les défis du village !"
        }
        (AgeGroup::Senior, Difficulty::Beginner) => {
            "Explorez le village numérique résistant et découvrez les alternatives libres aux solutions propriétaires."
        }
        (AgeGroup::Senior, Difficulty::Intermediate) => {
            "Approfondissez vos connaissances sur Linux, l'open source et la souveraineté numérique."
        }
        (AgeGroup::Senior, Difficulty::Advanced) => {
            "Maîtrisez les concepts avancés de migration vers le libre et de reconditionnement informatique."
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_key_format() {
        let key = LevelKey::new(AgeGroup::Senior, Difficulty::Advanced, BuildingId::CityHall);
        assert_eq!(key.to_string(), "senior-advanced-cityhall");
    }

    #[test]
    fn test_level_key_parse_roundtrip_all() {
        for age in AgeGroup::ALL {
            for key in LevelKey::universe(age) {
                assert_eq!(LevelKey::parse(&key.to_string()), Some(key));
            }
        }
    }

    #[test]
    fn test_level_key_rejects_garbage() {
        assert_eq!(LevelKey::parse(""), None);
        assert_eq!(LevelKey::parse("junior-beginner"), None);
        assert_eq!(LevelKey::parse("adult-beginner-lab"), None);
        assert_eq!(LevelKey::parse("junior-expert-lab"), None);
        assert_eq!(LevelKey::parse("junior-beginner-lab-extra"), None);
    }

    #[test]
    fn test_universe_size() {
        assert_eq!(LevelKey::universe(AgeGroup::Junior).count(), 12);
        assert!(LevelKey::universe(AgeGroup::Senior).all(|k| k.age == AgeGroup::Senior));
        assert!(LevelKey::universe(AgeGroup::Junior).all(|k| k.building != BuildingId::Workshop));
    }

    #[test]
    fn test_only_workshop_is_adult_only() {
        assert!(BuildingId::Workshop.info().adult_only);
        assert!(BuildingId::VILLAGE.iter().all(|b| !b.info().adult_only));
    }

    #[test]
    fn test_serde_names_match_storage_strings() {
        let json = serde_json::to_string(&BuildingId::CityHall).unwrap();
        assert_eq!(json, "\"cityhall\"");
        let age: AgeGroup = serde_json::from_str("\"senior\"").unwrap();
        assert_eq!(age, AgeGroup::Senior);
    }
}
