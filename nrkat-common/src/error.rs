//! Error types for nrkat

use thiserror::Error;

/// Error types for the nrkat library.
///
/// All errors are terminal for a single verification run; there are no
/// retries.
#[derive(Debug, Error)]
pub enum Error {
    /// The requested test set is not published for the algorithm family.
    #[error("unsupported test set {set} for {algorithm} (published sets: 1..={max})")]
    UnsupportedTestSet {
        /// Algorithm token the set was requested for.
        algorithm: String,
        /// The requested 1-based set number.
        set: u32,
        /// Number of published sets for this family.
        max: u32,
    },

    /// A token on the command line does not name a known algorithm.
    #[error("unknown algorithm {0:?} (expected nea1-3 or nia1-3)")]
    UnknownAlgorithm(String),

    /// The underlying cipher/MAC engine could not complete the operation.
    #[error("engine failure: {0}")]
    Engine(String),

    /// Engine output differs from the published expected output.
    #[error("verification mismatch:\n{0}")]
    Mismatch(String),

    /// A test-vector table entry could not be decoded.
    #[error("malformed test vector: {0}")]
    Vector(String),
}
