//! Property-based tests for stat block derivation

use proptest::prelude::*;

use crate::core::character_gen::stat_block::{modifier, stat_block};
use crate::core::character_gen::tables::{PROFESSIONS, RACES};

fn arb_race() -> impl Strategy<Value = &'static str> {
    prop::sample::select(RACES.to_vec())
}

fn arb_profession() -> impl Strategy<Value = String> {
    prop_oneof![
        prop::sample::select(PROFESSIONS.iter().map(|(p, _)| p.to_string()).collect::<Vec<_>>()),
        "[A-Za-z' ]{0,24}",
    ]
}

proptest! {
    #[test]
    fn prop_stat_block_is_deterministic(race in arb_race(), profession in arb_profession()) {
        prop_assert_eq!(stat_block(race, &profession), stat_block(race, &profession));
    }

    #[test]
    fn prop_stat_block_is_sane(race in arb_race(), profession in arb_profession()) {
        let block = stat_block(race, &profession);
        prop_assert!(block.hit_points >= 1);
        prop_assert!(block.armor_class >= 10);
        prop_assert!(block.speed == 25 || block.speed == 30);
        prop_assert!(!block.attacks.is_empty());
        prop_assert!(["1/8", "1/4", "1/2"].contains(&block.challenge_rating));
    }

    #[test]
    fn prop_modifier_is_floor_half(score in 1i32..=30) {
        let m = modifier(score);
        prop_assert!(2 * m + 10 <= score && score <= 2 * m + 11);
    }
}
