//! Static roll tables for the base character generator.

use super::WealthTier;

pub const RACES: &[&str] = &[
    "Human",
    "Elf",
    "Dwarf",
    "Halfling",
    "Gnome",
    "Half-Elf",
    "Half-Orc",
    "Tiefling",
    "Dragonborn",
];

// ============================================================================
// Names
// ============================================================================

pub const MASCULINE_PREFIXES: &[&str] = &[
    "Ald", "Bran", "Cor", "Dar", "Ed", "Gar", "Hal", "Tor", "Wul", "Rod", "Bev", "Mor",
];

pub const MASCULINE_SUFFIXES: &[&str] = &[
    "ric", "an", "wen", "mund", "bert", "ros", "vin", "ard", "old", "ek",
];

pub const FEMININE_PREFIXES: &[&str] = &[
    "Ael", "Bri", "Cas", "El", "Fen", "Ise", "Lyr", "Mar", "Sel", "Ys", "Tam", "Rho",
];

pub const FEMININE_SUFFIXES: &[&str] = &[
    "a", "wyn", "ria", "ella", "isse", "anne", "ira", "eth", "ise", "ora",
];

pub const FAMILY_NAMES: &[&str] = &[
    "Ashdown",
    "Blackwood",
    "Brightwater",
    "Copperkettle",
    "Dunmore",
    "Fairweather",
    "Greymantle",
    "Hollowell",
    "Ironfoot",
    "Marsh",
    "Oakenshield",
    "Quickstep",
    "Ravencroft",
    "Stonebrook",
    "Thornwood",
    "Underhill",
    "Vale",
    "Wyndham",
];

// ============================================================================
// Professions
// ============================================================================

pub const PROFESSIONS: &[(&str, WealthTier)] = &[
    ("Blacksmith", WealthTier::Modest),
    ("Farmer", WealthTier::Poor),
    ("Merchant", WealthTier::Comfortable),
    ("Town Guard", WealthTier::Modest),
    ("Soldier", WealthTier::Modest),
    ("Hunter", WealthTier::Poor),
    ("Priest", WealthTier::Modest),
    ("Scholar", WealthTier::Comfortable),
    ("Thief", WealthTier::Poor),
    ("Sailor", WealthTier::Poor),
    ("Innkeeper", WealthTier::Comfortable),
    ("Noble", WealthTier::Wealthy),
    ("Minstrel", WealthTier::Poor),
    ("Herbalist", WealthTier::Modest),
    ("Mercenary", WealthTier::Modest),
    ("Wizard's Apprentice", WealthTier::Modest),
    ("Ranger", WealthTier::Poor),
    ("Knight", WealthTier::Wealthy),
    ("Fisher", WealthTier::Poor),
    ("Alchemist", WealthTier::Comfortable),
];

// ============================================================================
// Appearance
// ============================================================================

pub const AGES: &[&str] = &["young", "youthful", "adult", "middle-aged", "weathered", "elderly"];

pub const HEIGHTS: &[&str] = &["very short", "short", "average height", "tall", "very tall"];

pub const BUILDS: &[&str] = &[
    "slender", "wiry", "lean", "average", "athletic", "stocky", "broad-shouldered", "heavyset",
];

pub const HAIR: &[&str] = &[
    "black",
    "dark brown",
    "chestnut",
    "auburn",
    "copper-red",
    "sandy blond",
    "platinum",
    "grey-streaked",
    "white",
    "shaved",
];

pub const EYES: &[&str] = &[
    "brown", "hazel", "green", "grey", "blue", "amber", "violet", "black",
];

pub const SKIN: &[&str] = &[
    "pale", "fair", "freckled", "olive", "tanned", "bronze", "brown", "dark", "ashen",
];

pub const MARKS: &[&str] = &[
    "a jagged scar across one cheek",
    "a missing finger on the left hand",
    "an elaborate shoulder tattoo",
    "a crooked, twice-broken nose",
    "a silver earring in one ear",
    "a pronounced limp",
    "a burn mark on one forearm",
    "mismatched eyes",
    "a faded brand on the wrist",
];

// ============================================================================
// Possessions
// ============================================================================

pub const ITEMS: &[&str] = &[
    "a worn leather journal",
    "a tarnished silver locket",
    "a set of loaded dice",
    "a coil of hempen rope",
    "a hooded lantern",
    "a small whetstone",
    "a pouch of dried herbs",
    "a wooden holy symbol",
    "a folded map of the region",
    "a flask of cheap brandy",
    "a bone flute",
    "a sealed letter",
    "a tinderbox",
    "a pair of iron manacles",
    "a deck of playing cards",
    "a lucky copper coin",
    "a vial of ink and a quill",
    "a child's wooden toy",
    "a dagger with a chipped hilt",
    "a bundle of candles",
];
