//! BitString type for bit-granular data.
//!
//! The 3GPP confidentiality and integrity test sets declare their inputs and
//! outputs in bits, while the data is stored byte-aligned. `BitString` pairs
//! byte storage with an explicit bit-length and provides the trailing-bit
//! masking the verification contract requires: bits past the declared length
//! are undefined and must read as zero before any comparison.
//!
//! Bits are MSB-first within each byte.

use std::fmt;

/// A byte buffer with an explicit bit-length.
#[derive(Clone, PartialEq, Eq, Hash, Default)]
pub struct BitString {
    /// Underlying byte storage; may be longer than `octet_length()`.
    data: Vec<u8>,
    /// Number of valid bits.
    bit_len: usize,
}

impl BitString {
    /// Creates a new empty `BitString`.
    pub fn new() -> Self {
        Self {
            data: Vec::new(),
            bit_len: 0,
        }
    }

    /// Creates a `BitString` from existing bytes and a bit length.
    ///
    /// # Panics
    /// Panics if `bit_len > 8 * data.len()`.
    pub fn from_bytes(data: Vec<u8>, bit_len: usize) -> Self {
        assert!(
            bit_len <= data.len() * 8,
            "bit length {} exceeds storage of {} bytes",
            bit_len,
            data.len()
        );
        Self { data, bit_len }
    }

    /// Creates a byte-aligned `BitString` covering the whole slice.
    pub fn from_slice(data: &[u8]) -> Self {
        Self {
            bit_len: data.len() * 8,
            data: data.to_vec(),
        }
    }

    /// Appends a single bit.
    pub fn write(&mut self, bit: bool) {
        let octet_index = self.bit_len / 8;
        let bit_offset = self.bit_len % 8;

        if octet_index >= self.data.len() {
            self.data.push(0);
        }

        if bit {
            self.data[octet_index] |= 1 << (7 - bit_offset);
        } else {
            self.data[octet_index] &= !(1 << (7 - bit_offset));
        }

        self.bit_len += 1;
    }

    /// Appends the low `len` bits of `value`, MSB first.
    ///
    /// # Panics
    /// Panics if `len > 32`.
    pub fn write_bits(&mut self, value: u32, len: usize) {
        assert!(len <= 32, "cannot write more than 32 bits at once");
        for i in 0..len {
            let bit = (value >> (len - 1 - i)) & 1;
            self.write(bit != 0);
        }
    }

    /// Reads the bit at `index`.
    ///
    /// # Panics
    /// Panics if `index >= bit_length()`.
    pub fn read(&self, index: usize) -> bool {
        assert!(index < self.bit_len, "bit index out of bounds");
        (self.data[index / 8] >> (7 - index % 8)) & 1 != 0
    }

    /// Returns the number of valid bits.
    pub fn bit_length(&self) -> usize {
        self.bit_len
    }

    /// Returns the number of octets needed to hold the valid bits.
    pub fn octet_length(&self) -> usize {
        self.bit_len.div_ceil(8)
    }

    /// Returns the underlying bytes covering the valid bits.
    ///
    /// Trailing bits of the last byte are returned as stored; call
    /// [`mask_trailing`](Self::mask_trailing) first when they must be zero.
    pub fn data(&self) -> &[u8] {
        &self.data[..self.octet_length()]
    }

    /// Returns the bytes, consuming the `BitString`.
    pub fn into_bytes(mut self) -> Vec<u8> {
        let len = self.octet_length();
        self.data.truncate(len);
        self.data
    }

    /// Returns true if no bits are valid.
    pub fn is_empty(&self) -> bool {
        self.bit_len == 0
    }

    /// Returns the number of undefined bits in the last octet.
    pub fn unused_bits(&self) -> usize {
        (8 - self.bit_len % 8) % 8
    }

    /// Zeroes every bit past the declared bit-length.
    ///
    /// Bytes beyond `octet_length()` are truncated, and when the length is
    /// not byte-aligned the last byte is cleared with
    /// `byte &= 0xFF << (8 - bit_len % 8)`. Masking an already-masked string
    /// changes nothing, and a byte-aligned string is left untouched.
    pub fn mask_trailing(&mut self) {
        let octets = self.octet_length();
        self.data.truncate(octets);

        let rem = self.bit_len % 8;
        if rem != 0 {
            if let Some(last) = self.data.last_mut() {
                *last &= 0xFFu8 << (8 - rem);
            }
        }
    }

    /// Returns a masked copy of this string.
    pub fn masked(&self) -> Self {
        let mut out = self.clone();
        out.mask_trailing();
        out
    }

    /// Returns true if every bit past the declared length is zero.
    pub fn is_masked(&self) -> bool {
        if self.data.len() > self.octet_length()
            && self.data[self.octet_length()..].iter().any(|&b| b != 0)
        {
            return false;
        }
        let rem = self.bit_len % 8;
        if rem == 0 {
            return true;
        }
        match self.data.get(self.octet_length() - 1) {
            Some(&last) => last & !(0xFFu8 << (8 - rem)) == 0,
            None => true,
        }
    }
}

impl fmt::Debug for BitString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "BitString({} bits: {})",
            self.bit_len,
            hex::encode(self.data())
        )
    }
}

impl fmt::Display for BitString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(self.data()))
    }
}
