//! Derived Tabletop Stat Block
//!
//! Maps a race and profession to a small fifth-edition style stat block.
//! Pure and table driven: the same inputs always give the same block.

use serde::Serialize;
use std::fmt;

pub const PROFICIENCY_BONUS: i32 = 2;

// ============================================================================
// Abilities
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Ability {
    Str,
    Dex,
    Con,
    Int,
    Wis,
    Cha,
}

impl Ability {
    pub const ALL: [Ability; 6] = [
        Ability::Str,
        Ability::Dex,
        Ability::Con,
        Ability::Int,
        Ability::Wis,
        Ability::Cha,
    ];

    pub fn abbr(&self) -> &'static str {
        match self {
            Ability::Str => "STR",
            Ability::Dex => "DEX",
            Ability::Con => "CON",
            Ability::Int => "INT",
            Ability::Wis => "WIS",
            Ability::Cha => "CHA",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AbilityScores {
    pub str: i32,
    pub dex: i32,
    pub con: i32,
    pub int: i32,
    pub wis: i32,
    pub cha: i32,
}

impl AbilityScores {
    pub const fn new(scores: [i32; 6]) -> Self {
        Self {
            str: scores[0],
            dex: scores[1],
            con: scores[2],
            int: scores[3],
            wis: scores[4],
            cha: scores[5],
        }
    }

    pub fn get(&self, ability: Ability) -> i32 {
        match ability {
            Ability::Str => self.str,
            Ability::Dex => self.dex,
            Ability::Con => self.con,
            Ability::Int => self.int,
            Ability::Wis => self.wis,
            Ability::Cha => self.cha,
        }
    }

    fn get_mut(&mut self, ability: Ability) -> &mut i32 {
        match ability {
            Ability::Str => &mut self.str,
            Ability::Dex => &mut self.dex,
            Ability::Con => &mut self.con,
            Ability::Int => &mut self.int,
            Ability::Wis => &mut self.wis,
            Ability::Cha => &mut self.cha,
        }
    }

    pub fn modifier(&self, ability: Ability) -> i32 {
        modifier(self.get(ability))
    }
}

/// `floor((score - 10) / 2)`.
pub fn modifier(score: i32) -> i32 {
    (score - 10).div_euclid(2)
}

fn signed(n: i32) -> String {
    format!("{:+}", n)
}

// ============================================================================
// Tables
// ============================================================================

/// Ability adjustments keyed by race name (matched case-insensitively).
const RACE_ADJUSTMENTS: &[(&str, &[(Ability, i32)])] = &[
    (
        "human",
        &[
            (Ability::Str, 1),
            (Ability::Dex, 1),
            (Ability::Con, 1),
            (Ability::Int, 1),
            (Ability::Wis, 1),
            (Ability::Cha, 1),
        ],
    ),
    ("elf", &[(Ability::Dex, 2), (Ability::Int, 1)]),
    ("dwarf", &[(Ability::Con, 2), (Ability::Wis, 1)]),
    ("halfling", &[(Ability::Dex, 2), (Ability::Cha, 1)]),
    ("gnome", &[(Ability::Int, 2), (Ability::Con, 1)]),
    (
        "half-elf",
        &[(Ability::Cha, 2), (Ability::Dex, 1), (Ability::Con, 1)],
    ),
    ("half-orc", &[(Ability::Str, 2), (Ability::Con, 1)]),
    ("tiefling", &[(Ability::Cha, 2), (Ability::Int, 1)]),
    ("dragonborn", &[(Ability::Str, 2), (Ability::Cha, 1)]),
];

const SLOW_RACES: &[&str] = &["dwarf", "halfling", "gnome"];

struct Skill {
    name: &'static str,
    ability: Ability,
}

const fn skill(name: &'static str, ability: Ability) -> Skill {
    Skill { name, ability }
}

struct Template {
    name: &'static str,
    keywords: &'static [&'static str],
    abilities: AbilityScores,
    armor_class: i32,
    armor: &'static str,
    hit_dice: (i32, i32),
    skills: &'static [Skill],
    weapons: &'static [&'static str],
}

const TEMPLATES: &[Template] = &[
    Template {
        name: "Guard",
        keywords: &["guard", "soldier", "knight", "mercenary", "warrior", "watch"],
        abilities: AbilityScores::new([13, 12, 12, 10, 11, 10]),
        armor_class: 16,
        armor: "chain shirt, shield",
        hit_dice: (2, 8),
        skills: &[skill("Athletics", Ability::Str), skill("Perception", Ability::Wis)],
        weapons: &["spear", "longsword", "light crossbow"],
    },
    Template {
        name: "Scout",
        keywords: &["hunter", "ranger", "scout", "trapper", "guide"],
        abilities: AbilityScores::new([11, 14, 12, 11, 13, 11]),
        armor_class: 13,
        armor: "leather armor",
        hit_dice: (3, 8),
        skills: &[
            skill("Nature", Ability::Int),
            skill("Perception", Ability::Wis),
            skill("Stealth", Ability::Dex),
            skill("Survival", Ability::Wis),
        ],
        weapons: &["shortsword", "longbow"],
    },
    Template {
        name: "Acolyte",
        keywords: &["priest", "acolyte", "cleric", "monk", "healer"],
        abilities: AbilityScores::new([10, 10, 10, 10, 14, 11]),
        armor_class: 10,
        armor: "robes",
        hit_dice: (2, 8),
        skills: &[skill("Medicine", Ability::Wis), skill("Religion", Ability::Int)],
        weapons: &["club"],
    },
    Template {
        name: "Apprentice",
        keywords: &["wizard", "mage", "scholar", "alchemist", "sage", "scribe", "herbalist"],
        abilities: AbilityScores::new([9, 12, 11, 15, 12, 10]),
        armor_class: 11,
        armor: "padded coat",
        hit_dice: (2, 6),
        skills: &[skill("Arcana", Ability::Int), skill("History", Ability::Int)],
        weapons: &["dagger", "quarterstaff"],
    },
    Template {
        name: "Spy",
        keywords: &["thief", "spy", "rogue", "smuggler", "cutpurse"],
        abilities: AbilityScores::new([10, 15, 10, 12, 14, 16]),
        armor_class: 12,
        armor: "dark clothing",
        hit_dice: (3, 8),
        skills: &[
            skill("Deception", Ability::Cha),
            skill("Insight", Ability::Wis),
            skill("Perception", Ability::Wis),
            skill("Sleight of Hand", Ability::Dex),
            skill("Stealth", Ability::Dex),
        ],
        weapons: &["shortsword", "hand crossbow"],
    },
    Template {
        name: "Noble",
        keywords: &["noble", "merchant", "innkeeper", "minstrel", "bard", "courtier"],
        abilities: AbilityScores::new([11, 12, 11, 12, 14, 16]),
        armor_class: 12,
        armor: "fine clothes",
        hit_dice: (2, 8),
        skills: &[
            skill("Deception", Ability::Cha),
            skill("Insight", Ability::Wis),
            skill("Persuasion", Ability::Cha),
        ],
        weapons: &["rapier"],
    },
    Template {
        name: "Laborer",
        keywords: &["blacksmith", "smith", "farmer", "sailor", "fisher", "miner", "laborer"],
        abilities: AbilityScores::new([14, 10, 13, 10, 10, 10]),
        armor_class: 11,
        armor: "leather apron",
        hit_dice: (2, 8),
        skills: &[skill("Athletics", Ability::Str)],
        weapons: &["warhammer", "club"],
    },
];

const COMMONER: Template = Template {
    name: "Commoner",
    keywords: &[],
    abilities: AbilityScores::new([10, 10, 10, 10, 10, 10]),
    armor_class: 10,
    armor: "clothes",
    hit_dice: (1, 8),
    skills: &[],
    weapons: &["club"],
};

#[derive(Clone, Copy)]
enum Reach {
    Melee,
    Ranged { normal: u32, long: u32 },
}

struct Weapon {
    name: &'static str,
    dice: (i32, i32),
    damage_type: &'static str,
    reach: Reach,
    finesse: bool,
    versatile: Option<i32>,
}

const WEAPONS: &[Weapon] = &[
    Weapon { name: "club", dice: (1, 4), damage_type: "bludgeoning", reach: Reach::Melee, finesse: false, versatile: None },
    Weapon { name: "dagger", dice: (1, 4), damage_type: "piercing", reach: Reach::Melee, finesse: true, versatile: None },
    Weapon { name: "quarterstaff", dice: (1, 6), damage_type: "bludgeoning", reach: Reach::Melee, finesse: false, versatile: Some(8) },
    Weapon { name: "spear", dice: (1, 6), damage_type: "piercing", reach: Reach::Melee, finesse: false, versatile: Some(8) },
    Weapon { name: "mace", dice: (1, 6), damage_type: "bludgeoning", reach: Reach::Melee, finesse: false, versatile: None },
    Weapon { name: "shortsword", dice: (1, 6), damage_type: "piercing", reach: Reach::Melee, finesse: true, versatile: None },
    Weapon { name: "rapier", dice: (1, 8), damage_type: "piercing", reach: Reach::Melee, finesse: true, versatile: None },
    Weapon { name: "longsword", dice: (1, 8), damage_type: "slashing", reach: Reach::Melee, finesse: false, versatile: Some(10) },
    Weapon { name: "warhammer", dice: (1, 8), damage_type: "bludgeoning", reach: Reach::Melee, finesse: false, versatile: Some(10) },
    Weapon { name: "greataxe", dice: (1, 12), damage_type: "slashing", reach: Reach::Melee, finesse: false, versatile: None },
    Weapon { name: "shortbow", dice: (1, 6), damage_type: "piercing", reach: Reach::Ranged { normal: 80, long: 320 }, finesse: false, versatile: None },
    Weapon { name: "longbow", dice: (1, 8), damage_type: "piercing", reach: Reach::Ranged { normal: 150, long: 600 }, finesse: false, versatile: None },
    Weapon { name: "light crossbow", dice: (1, 8), damage_type: "piercing", reach: Reach::Ranged { normal: 80, long: 320 }, finesse: false, versatile: None },
    Weapon { name: "hand crossbow", dice: (1, 6), damage_type: "piercing", reach: Reach::Ranged { normal: 30, long: 120 }, finesse: false, versatile: None },
];

fn template_for(profession: &str) -> &'static Template {
    let profession = profession.to_lowercase();
    TEMPLATES
        .iter()
        .find(|t| t.keywords.iter().any(|k| profession.contains(k)))
        .unwrap_or(&COMMONER)
}

fn race_adjusted(base: AbilityScores, race: &str) -> AbilityScores {
    let mut scores = base;
    if let Some((_, adjustments)) = RACE_ADJUSTMENTS
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(race.trim()))
    {
        for (ability, delta) in adjustments.iter() {
            *scores.get_mut(*ability) += delta;
        }
    }
    scores
}

// ============================================================================
// Stat Block
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatBlock {
    pub race: String,
    pub profession: String,
    pub template: String,
    pub armor_class: i32,
    pub armor: String,
    pub hit_points: i32,
    pub hit_dice: String,
    pub speed: u32,
    pub abilities: AbilityScores,
    pub skills: String,
    pub passive_perception: i32,
    pub attacks: Vec<String>,
    pub challenge_rating: &'static str,
}

/// Average of one die, `size / 2 + 0.5`, times `count`, plus CON per die;
/// computed in halves to stay exact.
pub fn hit_points(count: i32, size: i32, con_mod: i32) -> i32 {
    ((size + 1) * count + 2 * con_mod * count).div_euclid(2).max(1)
}

pub fn challenge_rating(hit_points: i32) -> &'static str {
    match hit_points {
        i32::MIN..=10 => "1/8",
        11..=25 => "1/4",
        _ => "1/2",
    }
}

/// `floor(count * size / 2) + 1 + modifier`, minimum 1.
pub fn average_damage(count: i32, size: i32, modifier: i32) -> i32 {
    ((count * size).div_euclid(2) + 1 + modifier).max(1)
}

fn damage_expr(count: i32, size: i32, modifier: i32) -> String {
    match modifier {
        0 => format!("{}d{}", count, size),
        m if m > 0 => format!("{}d{} + {}", count, size, m),
        m => format!("{}d{} - {}", count, size, -m),
    }
}

/// Attack line for a weapon, `None` when the weapon is not in the table.
pub fn attack_line(weapon: &str, abilities: &AbilityScores) -> Option<String> {
    let w = WEAPONS.iter().find(|w| w.name.eq_ignore_ascii_case(weapon))?;

    let modifier = match (w.reach, w.finesse) {
        (Reach::Ranged { .. }, _) => abilities.modifier(Ability::Dex),
        (Reach::Melee, true) => abilities
            .modifier(Ability::Str)
            .max(abilities.modifier(Ability::Dex)),
        (Reach::Melee, false) => abilities.modifier(Ability::Str),
    };
    let to_hit = signed(PROFICIENCY_BONUS + modifier);
    let (count, size) = w.dice;

    let (kind, reach) = match w.reach {
        Reach::Melee => ("Melee", "reach 5 ft.".to_string()),
        Reach::Ranged { normal, long } => ("Ranged", format!("range {}/{} ft.", normal, long)),
    };

    let mut line = format!(
        "{}. {} Weapon Attack: {} to hit, {}, one target. Hit: {} ({}) {} damage",
        capitalize(w.name),
        kind,
        to_hit,
        reach,
        average_damage(count, size, modifier),
        damage_expr(count, size, modifier),
        w.damage_type
    );
    if let Some(two_handed) = w.versatile {
        line.push_str(&format!(
            ", or {} ({}) {} damage if used with two hands",
            average_damage(count, two_handed, modifier),
            damage_expr(count, two_handed, modifier),
            w.damage_type
        ));
    }
    line.push('.');
    Some(line)
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Build the stat block for a race and profession.
pub fn stat_block(race: &str, profession: &str) -> StatBlock {
    let template = template_for(profession);
    let abilities = race_adjusted(template.abilities, race);

    let (count, size) = template.hit_dice;
    let hit_points = hit_points(count, size, abilities.modifier(Ability::Con));

    let skills = template
        .skills
        .iter()
        .map(|s| format!("{} {}", s.name, signed(PROFICIENCY_BONUS + abilities.modifier(s.ability))))
        .collect::<Vec<_>>()
        .join(", ");

    let perceptive = template.skills.iter().any(|s| s.name == "Perception");
    let passive_perception =
        10 + abilities.modifier(Ability::Wis) + if perceptive { PROFICIENCY_BONUS } else { 0 };

    let attacks = template
        .weapons
        .iter()
        .filter_map(|w| attack_line(w, &abilities))
        .collect();

    let slow = SLOW_RACES
        .iter()
        .any(|r| r.eq_ignore_ascii_case(race.trim()));

    StatBlock {
        race: race.to_string(),
        profession: profession.to_string(),
        template: template.name.to_string(),
        armor_class: template.armor_class,
        armor: template.armor.to_string(),
        hit_points,
        hit_dice: format!("{}d{}", count, size),
        speed: if slow { 25 } else { 30 },
        abilities,
        skills,
        passive_perception,
        attacks,
        challenge_rating: challenge_rating(hit_points),
    }
}

impl StatBlock {
    /// `("STR", "13 (+1)")` pairs in the usual order.
    pub fn ability_line(&self) -> Vec<(&'static str, String)> {
        Ability::ALL
            .iter()
            .map(|a| {
                let score = self.abilities.get(*a);
                (a.abbr(), format!("{} ({})", score, signed(modifier(score))))
            })
            .collect()
    }
}

impl fmt::Display for StatBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} {} ({} template)", self.race, self.profession, self.template)?;
        writeln!(f, "Armor Class {} ({})", self.armor_class, self.armor)?;
        writeln!(f, "Hit Points {} ({})", self.hit_points, self.hit_dice)?;
        writeln!(f, "Speed {} ft.", self.speed)?;
        let abilities: Vec<String> = self
            .ability_line()
            .into_iter()
            .map(|(abbr, value)| format!("{} {}", abbr, value))
            .collect();
        writeln!(f, "{}", abilities.join("  "))?;
        if !self.skills.is_empty() {
            writeln!(f, "Skills {}", self.skills)?;
        }
        writeln!(f, "Senses passive Perception {}", self.passive_perception)?;
        writeln!(f, "Challenge {}", self.challenge_rating)?;
        for attack in &self.attacks {
            writeln!(f, "{}", attack)?;
        }
        Ok(())
    }
}
