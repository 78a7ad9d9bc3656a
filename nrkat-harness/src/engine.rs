//! Engine boundary between the harness and a cipher/MAC implementation
//!
//! The harness only ever talks to [`CipherMacEngine`]; the shipped
//! [`SoftwareEngine`] runs everything in-process on `nrkat-crypto`.

use nrkat_common::{BitString, Error, HexDump};
use nrkat_crypto::{nea, nia, Direction, KEY_SIZE, MAC_SIZE};
use tracing::debug;

use crate::{Algorithm, Operation, TestVector};

/// Per-operation parameter bundle handed to an engine.
#[derive(Debug, Clone)]
pub struct OpParams {
    /// Algorithm to run.
    pub algorithm: Algorithm,
    /// 128-bit key.
    pub key: [u8; KEY_SIZE],
    /// COUNT input word.
    pub count: u32,
    /// 5-bit bearer identity.
    pub bearer: u8,
    /// Explicit FRESH word; NIA1 derives `BEARER << 27` when absent.
    pub fresh: Option<u32>,
    /// Transfer direction.
    pub direction: Direction,
}

impl From<&TestVector> for OpParams {
    fn from(v: &TestVector) -> Self {
        OpParams {
            algorithm: v.algorithm,
            key: v.key,
            count: v.count,
            bearer: v.bearer,
            fresh: v.fresh,
            direction: v.direction,
        }
    }
}

/// A cipher/MAC implementation driven by the harness.
///
/// Keystream ciphers and MACs are split instead of sharing one entry
/// point: calling [`apply_keystream`](Self::apply_keystream) with an
/// integrity algorithm (or the reverse) is an [`Error::Engine`].
pub trait CipherMacEngine {
    /// Run an NEA keystream cipher over `input`, returning output of the
    /// same bit-length. Encryption and decryption are the same operation.
    fn apply_keystream(&self, params: &OpParams, input: &BitString) -> Result<BitString, Error>;

    /// Compute the 32-bit MAC an NIA algorithm assigns to `input`.
    fn compute_mac(&self, params: &OpParams, input: &BitString) -> Result<[u8; MAC_SIZE], Error>;
}

/// Pure-software engine backed by `nrkat-crypto`.
#[derive(Debug, Default)]
pub struct SoftwareEngine;

impl SoftwareEngine {
    pub fn new() -> Self {
        SoftwareEngine
    }
}

impl CipherMacEngine for SoftwareEngine {
    fn apply_keystream(&self, params: &OpParams, input: &BitString) -> Result<BitString, Error> {
        if params.algorithm.operation() != Operation::Cipher {
            return Err(Error::Engine(format!(
                "{} is an integrity algorithm, not a cipher",
                params.algorithm
            )));
        }

        let bit_len = input.bit_length();
        let mut data = input.data().to_vec();
        debug!(
            algorithm = %params.algorithm,
            count = params.count,
            bearer = params.bearer,
            direction = %params.direction,
            bits = bit_len,
            "applying keystream to {}",
            HexDump(&data)
        );

        match params.algorithm {
            Algorithm::Nea1 => nea::nea1(
                &params.key,
                params.count,
                params.bearer,
                params.direction,
                &mut data,
                bit_len,
            ),
            Algorithm::Nea2 => nea::nea2(
                &params.key,
                params.count,
                params.bearer,
                params.direction,
                &mut data,
                bit_len,
            ),
            Algorithm::Nea3 => nea::nea3(
                &params.key,
                params.count,
                params.bearer,
                params.direction,
                &mut data,
                bit_len,
            ),
            _ => unreachable!(),
        }

        Ok(BitString::from_bytes(data, bit_len))
    }

    fn compute_mac(&self, params: &OpParams, input: &BitString) -> Result<[u8; MAC_SIZE], Error> {
        if params.algorithm.operation() != Operation::Integrity {
            return Err(Error::Engine(format!(
                "{} is a cipher, not an integrity algorithm",
                params.algorithm
            )));
        }

        let bit_len = input.bit_length();
        let data = input.data();
        debug!(
            algorithm = %params.algorithm,
            count = params.count,
            bearer = params.bearer,
            direction = %params.direction,
            bits = bit_len,
            "computing MAC over {}",
            HexDump(data)
        );

        let mac = match params.algorithm {
            Algorithm::Nia1 => {
                let fresh = params
                    .fresh
                    .unwrap_or((params.bearer as u32 & 0x1F) << 27);
                nia::nia1(&params.key, params.count, fresh, params.direction, data, bit_len)
            }
            Algorithm::Nia2 => nia::nia2(
                &params.key,
                params.count,
                params.bearer,
                params.direction,
                data,
                bit_len,
            ),
            Algorithm::Nia3 => nia::nia3(
                &params.key,
                params.count,
                params.bearer,
                params.direction,
                data,
                bit_len,
            ),
            _ => unreachable!(),
        };

        Ok(mac)
    }
}
