//! Base Character Generator
//!
//! Rolls a base character from static tables: race, gender, name,
//! profession, appearance, a few carried items and a purse whose size
//! depends on the profession's wealth tier. All randomness comes from the
//! caller's RNG so a seeded `StdRng` reproduces the same character.

pub mod stat_block;
pub mod tables;

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::RangeInclusive;

pub use stat_block::{stat_block, AbilityScores, StatBlock};

// ============================================================================
// Types
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    Male,
    Female,
    Nonbinary,
}

impl Gender {
    pub const ALL: [Gender; 3] = [Gender::Male, Gender::Female, Gender::Nonbinary];

    pub fn label(&self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
            Gender::Nonbinary => "nonbinary",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl std::str::FromStr for Gender {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "male" | "m" | "man" => Ok(Gender::Male),
            "female" | "f" | "woman" => Ok(Gender::Female),
            "nonbinary" | "non-binary" | "nb" | "x" => Ok(Gender::Nonbinary),
            other => Err(format!("unknown gender '{}'", other)),
        }
    }
}

/// How well a profession pays; drives the purse roll.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WealthTier {
    Poor,
    Modest,
    Comfortable,
    Wealthy,
}

impl WealthTier {
    fn gold(&self) -> RangeInclusive<u32> {
        match self {
            WealthTier::Poor => 0..=1,
            WealthTier::Modest => 0..=5,
            WealthTier::Comfortable => 2..=12,
            WealthTier::Wealthy => 8..=20,
        }
    }

    fn silver(&self) -> RangeInclusive<u32> {
        match self {
            WealthTier::Poor => 0..=10,
            WealthTier::Modest => 5..=25,
            WealthTier::Comfortable => 10..=40,
            WealthTier::Wealthy => 20..=50,
        }
    }

    fn copper(&self) -> RangeInclusive<u32> {
        match self {
            WealthTier::Wealthy => 0..=40,
            _ => 0..=99,
        }
    }

    /// Tier of a known profession; anything else is treated as modest.
    pub fn of_profession(profession: &str) -> Self {
        tables::PROFESSIONS
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(profession))
            .map(|(_, tier)| *tier)
            .unwrap_or(WealthTier::Modest)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Currency {
    pub gold: u32,
    pub silver: u32,
    pub copper: u32,
}

impl Currency {
    pub fn roll(tier: WealthTier, rng: &mut impl Rng) -> Self {
        Self {
            gold: rng.gen_range(tier.gold()),
            silver: rng.gen_range(tier.silver()),
            copper: rng.gen_range(tier.copper()),
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} gp, {} sp, {} cp", self.gold, self.silver, self.copper)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Appearance {
    pub age: String,
    pub height: String,
    pub build: String,
    pub hair: String,
    pub eyes: String,
    pub skin: String,
    pub mark: Option<String>,
}

/// A rolled base character. Immutable once generated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedCharacter {
    pub id: String,
    pub name: String,
    pub race: String,
    pub gender: Gender,
    pub profession: String,
    pub appearance: Appearance,
    pub items: Vec<String>,
    pub currency: Currency,
    pub description: String,
}

impl GeneratedCharacter {
    pub fn stat_block(&self) -> StatBlock {
        stat_block(&self.race, &self.profession)
    }

    pub fn first_name(&self) -> &str {
        self.name.split_whitespace().next().unwrap_or(&self.name)
    }
}

/// Fixed choices; anything left `None` is rolled.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationOptions {
    pub name: Option<String>,
    pub race: Option<String>,
    pub gender: Option<Gender>,
    pub profession: Option<String>,
}

// ============================================================================
// Generator
// ============================================================================

#[derive(Debug, Clone, Default)]
pub struct CharacterGenerator {
    options: GenerationOptions,
}

impl CharacterGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: GenerationOptions) -> Self {
        Self { options }
    }

    pub fn generate(&self, rng: &mut impl Rng) -> GeneratedCharacter {
        let id = uuid::Builder::from_random_bytes(rng.gen()).into_uuid().to_string();

        let race = self
            .options
            .race
            .clone()
            .unwrap_or_else(|| pick(tables::RACES, rng).to_string());
        let gender = self
            .options
            .gender
            .unwrap_or_else(|| Gender::ALL[rng.gen_range(0..Gender::ALL.len())]);
        let name = self
            .options
            .name
            .clone()
            .unwrap_or_else(|| random_name(gender, rng));

        let (profession, tier) = match &self.options.profession {
            Some(p) => (p.clone(), WealthTier::of_profession(p)),
            None => {
                let (p, tier) = tables::PROFESSIONS[rng.gen_range(0..tables::PROFESSIONS.len())];
                (p.to_string(), tier)
            }
        };

        let appearance = Appearance {
            age: pick(tables::AGES, rng).to_string(),
            height: pick(tables::HEIGHTS, rng).to_string(),
            build: pick(tables::BUILDS, rng).to_string(),
            hair: pick(tables::HAIR, rng).to_string(),
            eyes: pick(tables::EYES, rng).to_string(),
            skin: pick(tables::SKIN, rng).to_string(),
            mark: rng
                .gen_bool(0.6)
                .then(|| pick(tables::MARKS, rng).to_string()),
        };

        let item_count = rng.gen_range(2..=4);
        let items: Vec<String> = tables::ITEMS
            .choose_multiple(rng, item_count)
            .map(|s| s.to_string())
            .collect();

        let currency = Currency::roll(tier, rng);

        let mut character = GeneratedCharacter {
            id,
            name,
            race,
            gender,
            profession,
            appearance,
            items,
            currency,
            description: String::new(),
        };
        character.description = describe(&character);

        log::debug!(
            "Rolled {} ({} {} {})",
            character.name,
            character.race,
            character.gender,
            character.profession
        );
        character
    }
}

fn pick<'a>(table: &'a [&'a str], rng: &mut impl Rng) -> &'a str {
    table[rng.gen_range(0..table.len())]
}

pub fn random_name(gender: Gender, rng: &mut impl Rng) -> String {
    let feminine = match gender {
        Gender::Male => false,
        Gender::Female => true,
        Gender::Nonbinary => rng.gen_bool(0.5),
    };
    let (prefixes, suffixes) = if feminine {
        (tables::FEMININE_PREFIXES, tables::FEMININE_SUFFIXES)
    } else {
        (tables::MASCULINE_PREFIXES, tables::MASCULINE_SUFFIXES)
    };
    format!(
        "{}{} {}",
        pick(prefixes, rng),
        pick(suffixes, rng),
        pick(tables::FAMILY_NAMES, rng)
    )
}

fn join_list(items: &[String]) -> String {
    match items {
        [] => String::new(),
        [one] => one.clone(),
        [init @ .., last] => format!("{} and {}", init.join(", "), last),
    }
}

/// Free-text description composed from the rolled fields.
pub fn describe(c: &GeneratedCharacter) -> String {
    let a = &c.appearance;
    let profession = c.profession.to_lowercase();
    let mut text = format!(
        "{} is {} {} {} {} working as {} {}. {} is {} with a {} build, {} hair, {} eyes and {} skin.",
        c.name,
        article(&a.age),
        a.age,
        c.gender,
        c.race,
        article(&profession),
        profession,
        c.first_name(),
        a.height,
        a.build,
        a.hair,
        a.eyes,
        a.skin,
    );
    if let Some(mark) = &a.mark {
        text.push_str(&format!(" Notable for {}.", mark));
    }
    text.push_str(&format!(
        " Carries {} and a purse of {}.",
        join_list(&c.items),
        c.currency
    ));
    text
}

fn article(word: &str) -> &'static str {
    match word.chars().next() {
        Some(ch) if "aeiouAEIOU".contains(ch) => "an",
        _ => "a",
    }
}
