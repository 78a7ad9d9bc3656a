//! Common types and utilities for nrkat
//!
//! This crate provides the shared plumbing used across all nrkat crates:
//! the workspace error type, logging helpers, and the `BitString` type that
//! carries byte data together with an explicit bit-length.

pub mod bit_string;
pub mod error;
pub mod logging;

pub use bit_string::BitString;
pub use error::Error;
pub use logging::{
    format_hex_compact, format_hex_dump, init_logging, HexDump, LogLevel,
};
