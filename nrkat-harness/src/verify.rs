//! Masked comparison and mismatch reporting
//!
//! Both sides of a comparison are masked to their declared bit-length
//! first, so bits past the length never produce a spurious mismatch. A
//! failed comparison renders every differing byte offset in hex.

use std::fmt;

use nrkat_common::{BitString, Error};
use tracing::{debug, info};

use crate::engine::{CipherMacEngine, OpParams};
use crate::{Operation, TestVector};

/// One differing byte in a failed comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ByteMismatch {
    /// Byte offset into the masked output.
    pub offset: usize,
    /// Published expected byte.
    pub expected: u8,
    /// Byte the engine produced.
    pub actual: u8,
}

/// Full account of a failed comparison.
#[derive(Debug, Clone)]
pub struct MismatchReport {
    /// Number of bytes compared.
    pub compared: usize,
    /// Every differing offset, in order.
    pub mismatches: Vec<ByteMismatch>,
}

impl fmt::Display for MismatchReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{} of {} bytes differ",
            self.mismatches.len(),
            self.compared
        )?;
        for m in &self.mismatches {
            writeln!(
                f,
                "  byte {:4}: expected 0x{:02X}, got 0x{:02X}",
                m.offset, m.expected, m.actual
            )?;
        }
        Ok(())
    }
}

/// Mask both sides and compare byte-for-byte.
///
/// Returns `None` when the masked outputs agree. The two sides must
/// carry the same bit-length; differing lengths are reported as a
/// mismatch over the longer octet span.
pub fn compare_masked(expected: &BitString, actual: &BitString) -> Option<MismatchReport> {
    let expected = expected.masked();
    let actual = actual.masked();

    let compared = expected.data().len().max(actual.data().len());
    let mismatches: Vec<ByteMismatch> = (0..compared)
        .filter_map(|offset| {
            let e = expected.data().get(offset).copied().unwrap_or(0);
            let a = actual.data().get(offset).copied().unwrap_or(0);
            (e != a).then_some(ByteMismatch {
                offset,
                expected: e,
                actual: a,
            })
        })
        .collect();

    if mismatches.is_empty() {
        None
    } else {
        Some(MismatchReport {
            compared,
            mismatches,
        })
    }
}

/// Run one test vector through `engine` and verify the masked output.
pub fn run_vector(engine: &dyn CipherMacEngine, vector: &TestVector) -> Result<(), Error> {
    let params = OpParams::from(vector);
    debug!(algorithm = %vector.algorithm, set = vector.set, "running test set");

    let output = match vector.algorithm.operation() {
        Operation::Cipher => engine.apply_keystream(&params, &vector.input)?,
        Operation::Integrity => {
            let mac = engine.compute_mac(&params, &vector.input)?;
            BitString::from_bytes(mac.to_vec(), 32)
        }
    };

    match compare_masked(&vector.expected, &output) {
        None => {
            info!(algorithm = %vector.algorithm, set = vector.set, "verified");
            Ok(())
        }
        Some(report) => Err(Error::Mismatch(format!(
            "{} set {}: {report}",
            vector.algorithm, vector.set
        ))),
    }
}
