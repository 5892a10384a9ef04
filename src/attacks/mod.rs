//! Password search routines
//!
//! Each attack compares candidates against a known target password.

pub mod brute_force;
mod dictionary;

pub use brute_force::{
    Alphabet, AlphabetError, BruteForceConfig, BruteForceOutcome, Combinations,
    brute_force_attack,
};
pub use dictionary::dictionary_attack;
