//! Integration tests for the nrkat workspace
//!
//! These tests exercise the full provider -> engine -> verify pipeline
//! across crate boundaries:
//!
//! - [`kat_verification`] - every published test set verifies end to end
//! - [`reference_checks`] - AES table rows recomputed with the RustCrypto
//!   crates directly
//! - [`masking`] - trailing-bit masking behavior across the pipeline
//! - [`error_paths`] - unsupported sets, engine misuse, corrupted vectors

pub mod test_utils;

pub mod error_paths;
pub mod kat_verification;
pub mod masking;
pub mod reference_checks;

pub use test_utils::init_test_logging;
