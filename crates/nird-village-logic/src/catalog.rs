//! Static content catalog for the village mini-games.
//!
//! Pure data: sorting sets, quiz questions, terminal tasks and distribution
//! walkthroughs, keyed by `(age group, difficulty, building)`. No logic
//! beyond lookups lives here.

use serde::Serialize;

use crate::village::{AgeGroup, BuildingId, Difficulty, LevelKey};

/// Bubble-game bin for free/open-source items.
pub const OPEN_SOURCE: &str = "opensource";
/// Bubble-game bin for Big Tech items.
pub const BIG_TECH: &str = "bigtech";

/// A labeled item belonging to exactly one category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ActivityItem {
    pub id: &'static str,
    pub text: &'static str,
    pub category: &'static str,
    /// Authoring flag: false marks a decoy. Scoring only compares categories.
    pub is_correct: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AnswerOption {
    pub text: &'static str,
    pub correct: bool,
}

/// One multiple-choice prompt. Exactly one option is correct.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Question {
    pub text: &'static str,
    pub options: Vec<AnswerOption>,
    pub hint: &'static str,
    pub points: u32,
}

/// Items to sort into a fixed set of categories.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SortingSet {
    pub title: &'static str,
    pub description: &'static str,
    pub items: Vec<ActivityItem>,
    pub categories: Vec<&'static str>,
    pub hint: &'static str,
}

/// Sorting phase followed by a question phase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HybridSet {
    pub items: Vec<ActivityItem>,
    pub categories: Vec<&'static str>,
    pub questions: Vec<Question>,
}

/// One step of the terminal simulator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CommandTask {
    pub description: &'static str,
    pub command: &'static str,
    pub hint: &'static str,
    pub points: u32,
}

/// A Linux distribution the install wizard can walk through.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Distro {
    pub name: &'static str,
    pub description: &'static str,
    pub link: &'static str,
    pub steps: Vec<&'static str>,
}

/// Commands offered by terminal autocompletion.
pub const COMMAND_VOCABULARY: &[&str] = &[
    "ls", "ls -l", "ls -a", "ls -la", "mkdir", "mkdir -p", "cd", "cd ..", "cd ~", "pwd", "touch",
    "cat", "echo", "rm", "rm -r", "rm -rf", "cp", "cp -r", "mv", "grep", "find", "chmod", "chown",
    "sudo", "apt", "apt update", "apt install", "apt upgrade", "clear", "history", "man", "help",
    "whoami", "date", "cal",
];

/// Hint shown during any sorting phase without a dedicated hint.
pub const SORTING_HINT: &str = "Glissez les éléments dans les bonnes catégories";

fn item(id: &'static str, text: &'static str, category: &'static str) -> ActivityItem {
    ActivityItem {
        id,
        text,
        category,
        is_correct: true,
    }
}

fn decoy(id: &'static str, text: &'static str, category: &'static str) -> ActivityItem {
    ActivityItem {
        is_correct: false,
        ..item(id, text, category)
    }
}

fn yes_no(text: &'static str, hint: &'static str) -> Question {
    Question {
        text,
        options: vec![
            AnswerOption {
                text: "Oui ✓",
                correct: true,
            },
            AnswerOption {
                text: "Non ✗",
                correct: false,
            },
        ],
        hint,
        points: 15,
    }
}

fn choice(
    text: &'static str,
    correct: &'static str,
    wrong: [&'static str; 3],
    hint: &'static str,
    points: u32,
) -> Question {
    let mut options = vec![AnswerOption {
        text: correct,
        correct: true,
    }];
    options.extend(wrong.into_iter().map(|text| AnswerOption {
        text,
        correct: false,
    }));
    Question {
        text,
        options,
        hint,
        points,
    }
}

fn bubble(title: &'static str, texts: [&'static str; 4], hint: &'static str) -> SortingSet {
    let items = texts
        .into_iter()
        .zip(["1", "2", "3", "4"])
        .enumerate()
        .map(|(i, (text, id))| item(id, text, if i < 2 { OPEN_SOURCE } else { BIG_TECH }))
        .collect();
    SortingSet {
        title,
        description: "Glisse dans la bonne bulle",
        items,
        categories: vec![OPEN_SOURCE, BIG_TECH],
        hint,
    }
}

/// Bubble-sort content. Depends on building and age only.
///
/// The first two items of each set belong to the open-source bubble, the
/// last two to the Big Tech bubble.
pub fn bubble_set(age: AgeGroup, building: BuildingId) -> Option<SortingSet> {
    let set = match (building, age) {
        (BuildingId::Lab, AgeGroup::Junior) => bubble(
            "Gratuit ou Payant ?",
            [
                "PrimTux",
                "LibreOffice",
                "Windows",
                "Microsoft Office",
            ],
            "PrimTux et LibreOffice sont gratuits !",
        ),
        (BuildingId::Lab, AgeGroup::Senior) => bubble(
            "Libre ou Propriétaire ?",
            [
                "Linux",
                "Firefox",
                "Chrome",
                "Safari",
            ],
            "Linux et Firefox sont des logiciels libres !",
        ),
        (BuildingId::Library, AgeGroup::Junior) => bubble(
            "Gratuit ou Payant ?",
            [
                "Kiwix",
                "GCompris",
                "Google Classroom",
                "Microsoft Teams",
            ],
            "Kiwix et GCompris sont gratuits !",
        ),
        (BuildingId::Library, AgeGroup::Senior) => bubble(
            "Libre ou Propriétaire ?",
            [
                "Wikipedia",
                "Moodle",
                "Google Docs",
                "Microsoft 365",
            ],
            "Wikipedia et Moodle sont des plateformes libres !",
        ),
        (BuildingId::CityHall, AgeGroup::Junior) => bubble(
            "Gratuit ou Payant ?",
            [
                "PrimTux",
                "LibreOffice",
                "Windows",
                "Office 365",
            ],
            "PrimTux et LibreOffice ne coûtent rien !",
        ),
        (BuildingId::CityHall, AgeGroup::Senior) => bubble(
            "Libre ou Propriétaire ?",
            [
                "Nextcloud",
                "Peertube",
                "Google Drive",
                "Dropbox",
            ],
            "Nextcloud et Peertube sont des alternatives libres !",
        ),
        (BuildingId::Eco, AgeGroup::Junior) => bubble(
            "Bon ou Mauvais geste ?",
            [
                "Réutiliser un vieux PC",
                "Éteindre le PC après usage",
                "Laisser le PC allumé la nuit",
                "Jeter un PC qui marche",
            ],
            "Les solutions libres aident à protéger la planète !",
        ),
        (BuildingId::Eco, AgeGroup::Senior) => bubble(
            "Écologique ou Pas ?",
            [
                "Reconditionner du matériel",
                "Utiliser des serveurs locaux",
                "Acheter du neuf systématiquement",
                "Tout stocker dans le cloud",
            ],
            "Le reconditionnement et les serveurs locaux sont plus écologiques !",
        ),
        (BuildingId::Workshop, _) => return None,
    };
    Some(set)
}

fn two_way(
    title: &'static str,
    description: &'static str,
    first: (&'static str, [&'static str; 2]),
    second: (&'static str, [&'static str; 2]),
    hint: &'static str,
) -> SortingSet {
    SortingSet {
        title,
        description,
        items: vec![
            item("1", first.1[0], first.0),
            item("2", first.1[1], first.0),
            item("3", second.1[0], second.0),
            item("4", second.1[1], second.0),
        ],
        categories: vec![first.0, second.0],
        hint,
    }
}

/// Multi-category sorting content.
pub fn categorize_set(key: LevelKey) -> Option<SortingSet> {
    use AgeGroup::*;
    use BuildingId::*;
    use Difficulty::*;

    let set = match (key.building, key.age, key.difficulty) {
        (Lab, Junior, Beginner) => SortingSet {
            title: "Salle info : PC scolaire libre",
            description:
                "Glisse les bons éléments pour construire un PC scolaire NIRD Linux / PrimTux",
            items: vec![
                item("1", "PrimTux", "Distribution pour l’école primaire"),
                item("2", "Linux NIRD", "Distribution pour le secondaire"),
                decoy("3", "Windows 11 Éducation", "Distribution pour le secondaire"),
                item("4", "GCompris", "Logiciels éducatifs libres"),
                item("5", "Childsplay", "Logiciels éducatifs libres"),
                item("6", "LibreOffice", "Logiciels éducatifs libres"),
                decoy("7", "Suite propriétaire payante", "Logiciels éducatifs libres"),
            ],
            categories: vec![
                "Distribution pour l’école primaire",
                "Distribution pour le secondaire",
                "Logiciels éducatifs libres",
            ],
            hint: "PrimTux et Linux NIRD sont des distributions éducatives libres, avec GCompris, LibreOffice et d’autres outils déjà installés.",
        },
        (Lab, Senior, Beginner) => two_way(
            "Salle info",
            "Classe les logiciels",
            ("Gratuit", ["Linux NIRD", "LibreOffice"]),
            ("Payant", ["Windows", "Microsoft Office"]),
            "Linux NIRD et LibreOffice sont gratuits !",
        ),
        (CityHall, Senior, Beginner) => two_way(
            "Mairie : Budget",
            "Classe selon le coût",
            ("Gratuit", ["PrimTux", "Linux NIRD"]),
            ("Payant", ["Windows", "Microsoft Office"]),
            "Linux et PrimTux sont gratuits !",
        ),
        (CityHall, Junior, Advanced) => SortingSet {
            title: "Mairie : stratégie numérique durable",
            description: "Classe les décisions selon leur impact sur la souveraineté numérique",
            items: vec![
                item("1", "Migrer vers Linux NIRD pour toute la mairie", "Souveraineté numérique"),
                item("2", "Former les agents aux logiciels libres", "Souveraineté numérique"),
                item("3", "Utiliser des serveurs locaux plutôt que le cloud", "Souveraineté numérique"),
                item("4", "Renouveler les licences propriétaires chaque année", "Dépendance technologique"),
                item("5", "Stocker toutes les données sur des serveurs étrangers", "Dépendance technologique"),
                item("6", "Adopter des formats ouverts (ODF, PDF)", "Souveraineté numérique"),
            ],
            categories: vec!["Souveraineté numérique", "Dépendance technologique"],
            hint: "La souveraineté numérique passe par l'autonomie et le contrôle de ses données et outils.",
        },
        (CityHall, Senior, Advanced) => two_way(
            "Mairie : Stratégie",
            "Classe selon le coût",
            ("Investissement durable", ["Migrer vers Linux", "Former aux logiciels libres"]),
            ("Coût élevé", ["Acheter des licences", "Payer des abonnements"]),
            "Linux et les logiciels libres sont durables !",
        ),
        (Library, Junior, Beginner) => SortingSet {
            title: "Bibliothèque : ressources libres",
            description: "Classe les ressources entre libres et propriétaires",
            items: vec![
                item("1", "GCompris", "Ressources libres"),
                item("2", "Childsplay", "Ressources libres"),
                item("3", "Kolibri", "Ressources libres"),
                item("4", "Kiwix (Wikipedia hors-ligne)", "Ressources libres"),
                item("5", "Plateforme éducative propriétaire", "Ressources propriétaires"),
                item("6", "Abonnement payant à un service en ligne", "Ressources propriétaires"),
            ],
            categories: vec!["Ressources libres", "Ressources propriétaires"],
            hint: "Les ressources libres (GCompris, Kiwix, Kolibri) peuvent être utilisées sans abonnement et même hors-ligne.",
        },
        (Library, Senior, Beginner) => two_way(
            "Bibliothèque",
            "Classe les ressources",
            ("Gratuit", ["Kiwix", "GCompris"]),
            ("Payant", ["Google Classroom", "Microsoft Teams"]),
            "Kiwix et GCompris sont gratuits !",
        ),
        (Library, Junior, Advanced) => SortingSet {
            title: "Bibliothèque : plateformes d'apprentissage",
            description: "Classe les plateformes selon leur modèle (libre ou propriétaire)",
            items: vec![
                item("1", "Moodle", "Plateforme libre"),
                item("2", "Kolibri", "Plateforme libre"),
                item("3", "OpenBoard", "Plateforme libre"),
                item("4", "Google Classroom", "Plateforme propriétaire"),
                item("5", "Microsoft Teams Éducation", "Plateforme propriétaire"),
                item("6", "Canvas LMS", "Plateforme propriétaire"),
            ],
            categories: vec!["Plateforme libre", "Plateforme propriétaire"],
            hint: "Les plateformes libres comme Moodle et Kolibri vous donnent le contrôle de vos données et ne nécessitent pas d'abonnement.",
        },
        (Library, Senior, Advanced) => two_way(
            "Bibliothèque",
            "Classe les ressources",
            ("Libre", ["Kiwix", "Moodle"]),
            ("Propriétaire", ["Google Classroom", "Microsoft Teams"]),
            "Kiwix et Moodle sont libres !",
        ),
        (Eco, Junior, Beginner) => SortingSet {
            title: "Coin Éco : gestes numériques responsables",
            description: "Associe les bonnes pratiques à la bonne catégorie",
            items: vec![
                item("1", "Réutiliser un vieux PC avec Linux NIRD", "Bon geste NIRD"),
                item("2", "Installer PrimTux sur des PC reconditionnés", "Bon geste NIRD"),
                item("3", "Allumer tous les écrans pour décorer la classe", "Mauvaise pratique"),
                item("4", "Acheter des PC neufs tous les 3 ans", "Mauvaise pratique"),
                item("5", "Éteindre les PC après usage", "Bon geste NIRD"),
            ],
            categories: vec!["Bon geste NIRD", "Mauvaise pratique"],
            hint: "La démarche NIRD privilégie le reconditionnement, l'extinction des machines inutilisées et les distributions libres adaptées.",
        },
        (Eco, Senior, Beginner) => two_way(
            "Coin Éco",
            "Classe les actions",
            ("Bon geste", ["Réutiliser un vieux PC", "Éteindre le PC"]),
            ("Mauvais geste", ["Laisser le PC allumé", "Jeter un PC qui marche"]),
            "Réutiliser et éteindre, c'est bien !",
        ),
        (Eco, Junior, Advanced) => SortingSet {
            title: "Coin Éco : cycle de vie du matériel",
            description: "Classe les actions selon leur impact sur le cycle de vie des équipements",
            items: vec![
                item("1", "Reconditionner des PC avec Linux NIRD", "Prolongation de vie"),
                item("2", "Réparer plutôt que remplacer", "Prolongation de vie"),
                item("3", "Jeter un PC fonctionnel pour un modèle plus récent", "Obsolescence programmée"),
                item("4", "Changer d'ordinateur tous les 2 ans", "Obsolescence programmée"),
                item("5", "Utiliser PrimTux sur du matériel ancien", "Prolongation de vie"),
                item("6", "Acheter du matériel neuf sans vérifier la réparation", "Obsolescence programmée"),
            ],
            categories: vec!["Prolongation de vie", "Obsolescence programmée"],
            hint: "La démarche NIRD encourage la réparation et le reconditionnement pour réduire les déchets électroniques.",
        },
        (Eco, Senior, Advanced) => two_way(
            "Coin Éco",
            "Classe les actions",
            ("Écologique", ["Installer Linux sur vieux PC", "Utiliser Kiwix hors-ligne"]),
            ("Polluant", ["Tout stocker sur le cloud", "Changer de PC souvent"]),
            "Linux et Kiwix sont écologiques !",
        ),
        _ => return None,
    };
    Some(set)
}

fn free_or_paid(items: [(&'static str, &'static str); 3], questions: Vec<Question>) -> HybridSet {
    HybridSet {
        items: items
            .into_iter()
            .zip(["1", "2", "3"])
            .map(|((text, category), id)| item(id, text, category))
            .collect(),
        categories: vec!["Gratuit", "Payant"],
        questions,
    }
}

/// Sorting + quiz content. Slots without dedicated content fall back to a
/// generic free-software set for the age group; the workshop has none.
pub fn hybrid_set(key: LevelKey) -> Option<HybridSet> {
    use AgeGroup::*;
    use BuildingId::*;
    use Difficulty::*;

    if key.building == Workshop {
        return None;
    }

    let set = match (key.building, key.age, key.difficulty) {
        (CityHall, Junior, Intermediate) => free_or_paid(
            [("PrimTux", "Gratuit"), ("Windows", "Payant"), ("LibreOffice", "Gratuit")],
            vec![yes_no("PrimTux est gratuit ?", "PrimTux est gratuit !")],
        ),
        (CityHall, Senior, Intermediate) => HybridSet {
            items: vec![
                item("1", "Reconditionner avec Linux", "Durable"),
                item("2", "Acheter du neuf", "Coûteux"),
                item("3", "Former au libre", "Durable"),
            ],
            categories: vec!["Durable", "Coûteux"],
            questions: vec![yes_no("Former à Linux, c'est utile ?", "Former rend autonome !")],
        },
        (CityHall, Senior, Advanced) => HybridSet {
            items: vec![
                item("1", "Migrer vers Linux", "Autonomie"),
                item("2", "Acheter des licences", "Dépendance"),
                item("3", "Utiliser des logiciels libres", "Autonomie"),
            ],
            categories: vec!["Autonomie", "Dépendance"],
            questions: vec![yes_no("Linux donne plus d'autonomie ?", "Linux rend autonome !")],
        },
        (Eco, Junior, Intermediate) => HybridSet {
            items: vec![
                item("1", "Réutiliser un vieux PC", "Bon geste"),
                item("2", "Laisser le PC allumé toute la nuit", "Mauvais geste"),
                item("3", "Éteindre le PC après usage", "Bon geste"),
            ],
            categories: vec!["Bon geste", "Mauvais geste"],
            questions: vec![yes_no(
                "Réutiliser un vieux PC, c'est bien ?",
                "Réutiliser aide la planète !",
            )],
        },
        (Library, Junior, Intermediate) => free_or_paid(
            [("GCompris", "Gratuit"), ("Kiwix", "Gratuit"), ("Google Classroom", "Payant")],
            vec![yes_no("Kiwix marche sans internet ?", "Kiwix marche sans internet !")],
        ),
        (Library, Junior, Advanced) => HybridSet {
            items: vec![
                item("1", "Moodle", "Plateforme libre"),
                item("2", "Kolibri", "Plateforme libre"),
                item("3", "OpenBoard", "Plateforme libre"),
                item("4", "Google Classroom", "Plateforme propriétaire"),
                item("5", "Microsoft Teams", "Plateforme propriétaire"),
            ],
            categories: vec!["Plateforme libre", "Plateforme propriétaire"],
            questions: vec![yes_no("Moodle est gratuit ?", "Moodle est gratuit !")],
        },
        (Lab, Junior, Intermediate) => free_or_paid(
            [("PrimTux", "Gratuit"), ("Windows", "Payant"), ("LibreOffice", "Gratuit")],
            vec![yes_no(
                "PrimTux est pour les enfants ?",
                "PrimTux est fait pour les enfants !",
            )],
        ),
        (_, Junior, _) => free_or_paid(
            [("Linux", "Gratuit"), ("Windows", "Payant"), ("LibreOffice", "Gratuit")],
            vec![
                yes_no("Linux est gratuit ?", "Linux est gratuit !"),
                yes_no(
                    "Les logiciels libres sont gratuits ?",
                    "Les logiciels libres sont gratuits !",
                ),
            ],
        ),
        (_, Senior, _) => free_or_paid(
            [("Linux", "Gratuit"), ("Windows", "Payant"), ("LibreOffice", "Gratuit")],
            vec![yes_no("Linux est gratuit ?", "Linux est gratuit !")],
        ),
    };
    Some(set)
}

/// Ordered tasks of the terminal simulator.
pub fn command_tasks() -> Vec<CommandTask> {
    vec![
        CommandTask {
            description: "Affichez le contenu du répertoire actuel",
            command: "ls",
            hint: "Utilisez la commande qui liste les fichiers et dossiers",
            points: 10,
        },
        CommandTask {
            description: "Créez un nouveau dossier appelé \"mon_projet\"",
            command: "mkdir mon_projet",
            hint: "La commande mkdir permet de créer un dossier",
            points: 15,
        },
        CommandTask {
            description: "Entrez dans le dossier \"mon_projet\"",
            command: "cd mon_projet",
            hint: "La commande cd permet de changer de répertoire",
            points: 15,
        },
        CommandTask {
            description: "Affichez votre position actuelle dans le système",
            command: "pwd",
            hint: "Cette commande affiche le chemin complet du répertoire actuel",
            points: 10,
        },
        CommandTask {
            description: "Créez un fichier texte nommé \"readme.txt\"",
            command: "touch readme.txt",
            hint: "La commande touch crée un nouveau fichier vide",
            points: 15,
        },
    ]
}

/// Distributions offered by the install wizard.
pub fn distros() -> Vec<Distro> {
    vec![
        Distro {
            name: "Linux NIRD",
            description: "Distribution éducative pour le secondaire",
            link: "https://nird.forge.apps.education.fr/linux/",
            steps: vec![
                "Télécharger l'image ISO depuis le site officiel",
                "Vérifier l'intégrité avec la clé MD5",
                "Graver l'image sur une clé USB avec Balena Etcher ou Ventoy",
                "Démarrer l'ordinateur depuis la clé USB",
                "Suivre l'assistant d'installation",
            ],
        },
        Distro {
            name: "Linux Mint",
            description: "Distribution conviviale basée sur Ubuntu",
            link: "https://linuxmint.com/",
            steps: vec![
                "Télécharger l'ISO depuis linuxmint.com",
                "Vérifier la somme de contrôle",
                "Créer une clé USB bootable",
                "Configurer le BIOS pour démarrer sur USB",
                "Installer en mode dual-boot ou remplacement",
            ],
        },
        Distro {
            name: "Ubuntu",
            description: "Distribution populaire et bien documentée",
            link: "https://ubuntu.com/",
            steps: vec![
                "Télécharger Ubuntu Desktop depuis ubuntu.com",
                "Vérifier l'intégrité du fichier",
                "Utiliser Rufus ou Balena Etcher pour créer la clé USB",
                "Démarrer depuis la clé USB en mode \"Try Ubuntu\"",
                "Lancer l'installation complète",
            ],
        },
    ]
}

/// Package-manager quiz that closes the install wizard.
pub fn package_manager_questions() -> Vec<Question> {
    vec![
        choice(
            "Quelle commande installe un logiciel avec APT ?",
            "apt install nom_du_logiciel",
            [
                "apt get nom_du_logiciel",
                "install nom_du_logiciel",
                "apt download nom_du_logiciel",
            ],
            "APT utilise la commande \"install\" après \"apt\"",
            15,
        ),
        choice(
            "Comment mettre à jour la liste des paquets disponibles ?",
            "apt update",
            ["apt upgrade", "apt refresh", "apt reload"],
            "Cette commande synchronise la liste des paquets avec les dépôts",
            15,
        ),
        choice(
            "Quel gestionnaire graphique permet d'installer des applications facilement ?",
            "Ubuntu Software / Logiciels",
            ["Windows Store", "App Store", "Play Store"],
            "C'est l'équivalent Linux de l'App Store",
            10,
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn categories_cover_items(items: &[ActivityItem], categories: &[&str]) -> bool {
        items.iter().all(|i| categories.contains(&i.category))
    }

    #[test]
    fn test_bubble_sets_split_two_and_two() {
        for age in AgeGroup::ALL {
            for building in BuildingId::VILLAGE {
                let set = bubble_set(age, building).unwrap();
                let open = set.items.iter().filter(|i| i.category == OPEN_SOURCE).count();
                let big = set.items.iter().filter(|i| i.category == BIG_TECH).count();
                assert_eq!((open, big), (2, 2), "{age} {building}");
            }
        }
        assert!(bubble_set(AgeGroup::Senior, BuildingId::Workshop).is_none());
    }

    #[test]
    fn test_sorting_sets_are_consistent() {
        for age in AgeGroup::ALL {
            for key in LevelKey::universe(age) {
                if let Some(set) = categorize_set(key) {
                    assert!(!set.items.is_empty(), "{key}");
                    assert!(categories_cover_items(&set.items, &set.categories), "{key}");
                }
                let hybrid = hybrid_set(key).unwrap();
                assert!(categories_cover_items(&hybrid.items, &hybrid.categories), "{key}");
                assert!(!hybrid.questions.is_empty(), "{key}");
            }
        }
    }

    #[test]
    fn test_every_question_has_exactly_one_correct_option() {
        let mut all: Vec<Question> = package_manager_questions();
        for age in AgeGroup::ALL {
            for key in LevelKey::universe(age) {
                all.extend(hybrid_set(key).unwrap().questions);
            }
        }
        for q in &all {
            assert_eq!(q.options.iter().filter(|o| o.correct).count(), 1, "{}", q.text);
        }
    }

    #[test]
    fn test_item_ids_unique_per_set() {
        for age in AgeGroup::ALL {
            for key in LevelKey::universe(age) {
                if let Some(set) = categorize_set(key) {
                    let mut ids: Vec<_> = set.items.iter().map(|i| i.id).collect();
                    ids.sort_unstable();
                    ids.dedup();
                    assert_eq!(ids.len(), set.items.len(), "{key}");
                }
            }
        }
    }

    #[test]
    fn test_task_commands_are_in_vocabulary_prefix() {
        for task in command_tasks() {
            let verb = task.command.split_whitespace().next().unwrap();
            assert!(COMMAND_VOCABULARY.contains(&verb), "{}", task.command);
        }
    }

    #[test]
    fn test_distros_have_steps() {
        let d = distros();
        assert_eq!(d.len(), 3);
        assert!(d.iter().all(|d| d.steps.len() == 5));
    }
}
