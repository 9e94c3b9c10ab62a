pub mod ai;
pub mod character_gen;
pub mod dna;
pub mod export;
pub mod forge;
pub mod logging;
pub mod profile;
