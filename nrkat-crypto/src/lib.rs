//! Software cipher and MAC primitives for nrkat
//!
//! Implements the six 3GPP link-security algorithms the harness verifies:
//! - NEA1/NIA1: SNOW3G f8/f9
//! - NEA2/NIA2: AES-128 CTR / CMAC
//! - NEA3/NIA3: ZUC-128 EEA3/EIA3
//!
//! All entry points take an explicit bit-length; keystream ciphers XOR whole
//! bytes and leave trailing-bit masking to the caller, while the MAC
//! algorithms consume exactly the declared number of message bits.
//!
//! References: ETSI/3GPP TS 35.201, TS 35.215, TS 35.221-223, TS 33.401.

pub mod nea;
pub mod nia;
pub mod snow3g;
pub mod zuc;

/// 128-bit key size shared by all six algorithms.
pub const KEY_SIZE: usize = 16;

/// MAC size in bytes (32 bits) for the integrity algorithms.
pub const MAC_SIZE: usize = 4;

/// Transfer direction, a 1-bit input to every IV construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// UE to network (0)
    Uplink,
    /// Network to UE (1)
    Downlink,
}

impl Direction {
    /// The DIRECTION bit as carried in the IVs.
    pub fn bit(self) -> u8 {
        match self {
            Direction::Uplink => 0,
            Direction::Downlink => 1,
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Direction::Uplink => write!(f, "uplink"),
            Direction::Downlink => write!(f, "downlink"),
        }
    }
}
