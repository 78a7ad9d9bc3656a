//! Verification harness for the 3GPP NEA/NIA algorithms
//!
//! This crate ties the published 3GPP test sets to a cipher/MAC engine:
//! the [`vectors`] module provides the test-set tables, the [`engine`]
//! module defines the engine boundary and a pure-software implementation,
//! and [`verify`] runs a vector through an engine and compares the masked
//! output against the published expectation.

pub mod engine;
pub mod vectors;
pub mod verify;

pub use engine::{CipherMacEngine, OpParams, SoftwareEngine};
pub use vectors::{all_vectors, set_count, test_vector, TestVector};
pub use verify::{run_vector, ByteMismatch, MismatchReport};

use nrkat_common::Error;

/// The six verifiable algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Algorithm {
    /// 128-NEA1 (SNOW3G f8)
    Nea1,
    /// 128-NEA2 (AES-128-CTR)
    Nea2,
    /// 128-NEA3 (ZUC-128)
    Nea3,
    /// 128-NIA1 (SNOW3G f9)
    Nia1,
    /// 128-NIA2 (AES-128-CMAC)
    Nia2,
    /// 128-NIA3 (ZUC-128 EIA3)
    Nia3,
}

/// What an algorithm does to its input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// Keystream cipher: output is the same bit-length as the input.
    Cipher,
    /// Integrity: output is a 32-bit MAC.
    Integrity,
}

impl Algorithm {
    /// Every algorithm, in CLI display order.
    pub const ALL: [Algorithm; 6] = [
        Algorithm::Nea1,
        Algorithm::Nea2,
        Algorithm::Nea3,
        Algorithm::Nia1,
        Algorithm::Nia2,
        Algorithm::Nia3,
    ];

    /// Whether this algorithm ciphers or authenticates.
    pub fn operation(self) -> Operation {
        match self {
            Algorithm::Nea1 | Algorithm::Nea2 | Algorithm::Nea3 => Operation::Cipher,
            Algorithm::Nia1 | Algorithm::Nia2 | Algorithm::Nia3 => Operation::Integrity,
        }
    }
}

impl std::fmt::Display for Algorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Algorithm::Nea1 => "NEA1",
            Algorithm::Nea2 => "NEA2",
            Algorithm::Nea3 => "NEA3",
            Algorithm::Nia1 => "NIA1",
            Algorithm::Nia2 => "NIA2",
            Algorithm::Nia3 => "NIA3",
        };
        f.write_str(name)
    }
}

impl std::str::FromStr for Algorithm {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "nea1" => Ok(Algorithm::Nea1),
            "nea2" => Ok(Algorithm::Nea2),
            "nea3" => Ok(Algorithm::Nea3),
            "nia1" => Ok(Algorithm::Nia1),
            "nia2" => Ok(Algorithm::Nia2),
            "nia3" => Ok(Algorithm::Nia3),
            _ => Err(Error::UnknownAlgorithm(s.to_owned())),
        }
    }
}
