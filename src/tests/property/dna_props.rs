//! Property-based tests for the personality DNA codec

use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::core::dna::codec::{SCORE_MAX, SCORE_MIN};
use crate::core::dna::DnaCodec;

proptest! {
    #[test]
    fn prop_encoded_dna_round_trips(seed in any::<u64>()) {
        let codec = DnaCodec::standard();
        let dna = codec.encode(&mut StdRng::seed_from_u64(seed));
        let wire = dna.to_string();

        let decoded = codec.try_decode(&wire);
        prop_assert!(decoded.is_ok(), "failed to decode {}: {:?}", wire, decoded.err());
        let decoded = decoded.unwrap();
        prop_assert_eq!(decoded.to_dna().to_string(), wire);
    }

    #[test]
    fn prop_scores_stay_in_range(seed in any::<u64>()) {
        let codec = DnaCodec::standard();
        let dna = codec.encode(&mut StdRng::seed_from_u64(seed));

        for gene in &dna.paired {
            prop_assert!((SCORE_MIN..=SCORE_MAX).contains(&gene.score));
        }
        for gene in &dna.unpaired {
            prop_assert!((SCORE_MIN..=SCORE_MAX).contains(&gene.score));
        }
        prop_assert!((SCORE_MIN..=SCORE_MAX).contains(&dna.paired_average));
        prop_assert!((SCORE_MIN..=SCORE_MAX).contains(&dna.unpaired_average));
    }

    #[test]
    fn prop_decode_never_panics(input in ".{0,200}") {
        let _ = DnaCodec::standard().decode(&input);
    }

    #[test]
    fn prop_same_seed_same_dna(seed in any::<u64>()) {
        let codec = DnaCodec::standard();
        let a = codec.encode(&mut StdRng::seed_from_u64(seed)).to_string();
        let b = codec.encode(&mut StdRng::seed_from_u64(seed)).to_string();
        prop_assert_eq!(a, b);
    }
}
