//! NIA integrity algorithms (128-NIA1/2/3)
//!
//! The three 5G NAS/PDCP integrity algorithms, each producing a 32-bit MAC:
//! - NIA1: SNOW3G f9 (128-EIA1 / UIA2)
//! - NIA2: AES-128 CMAC over a bit string (128-EIA2)
//! - NIA3: ZUC-based universal hash (128-EIA3)
//!
//! All three take the message length in bits and ignore any bits of the
//! final byte past that length.
//!
//! Reference: 3GPP TS 33.501 Annex D, TS 33.401 Annex B, TS 35.221

use aes::cipher::{BlockEncrypt, KeyInit};
use aes::Aes128;

use crate::snow3g;
use crate::zuc::{self, Zuc128};
use crate::{Direction, KEY_SIZE, MAC_SIZE};

/// 128-NIA1: SNOW3G f9 integrity.
///
/// 128-NIA1 derives FRESH as `BEARER << 27`; the UIA2 f9 sets carry an
/// explicit FRESH word, which callers replaying those sets pass through
/// `fresh` directly.
pub fn nia1(
    key: &[u8; KEY_SIZE],
    count: u32,
    fresh: u32,
    direction: Direction,
    data: &[u8],
    bit_len: usize,
) -> [u8; MAC_SIZE] {
    snow3g::f9(key, count, fresh, direction, data, bit_len)
}

/// Double a block in GF(2^128) for CMAC subkey derivation.
fn dbl(block: &[u8; 16]) -> [u8; 16] {
    let mut out = [0u8; 16];
    let mut carry = 0u8;
    for i in (0..16).rev() {
        out[i] = (block[i] << 1) | carry;
        carry = block[i] >> 7;
    }
    if carry != 0 {
        out[15] ^= 0x87;
    }
    out
}

/// 128-NIA2: AES-128 CMAC integrity.
///
/// The MAC covers the bit string
/// `COUNT || BEARER || DIRECTION || 0^26 || MESSAGE` (64 + `bit_len`
/// bits), so the CMAC padding is applied at bit granularity rather
/// than at the byte boundary.
pub fn nia2(
    key: &[u8; KEY_SIZE],
    count: u32,
    bearer: u8,
    direction: Direction,
    data: &[u8],
    bit_len: usize,
) -> [u8; MAC_SIZE] {
    let total_bits = 64 + bit_len;
    let msg_bytes = bit_len.div_ceil(8);

    let mut buf = Vec::with_capacity(8 + msg_bytes);
    buf.extend_from_slice(&count.to_be_bytes());
    buf.push(((bearer & 0x1F) << 3) | (direction.bit() << 2));
    buf.extend_from_slice(&[0u8; 3]);
    buf.extend_from_slice(&data[..msg_bytes.min(data.len())]);
    buf.resize(8 + msg_bytes, 0);

    // Zero any bits of the final message byte past the declared length.
    if bit_len % 8 != 0 {
        if let Some(last) = buf.last_mut() {
            *last &= 0xFFu8 << (8 - (bit_len % 8) as u32);
        }
    }

    let cipher = Aes128::new(key.into());

    let mut l = [0u8; 16];
    cipher.encrypt_block((&mut l).into());
    let k1 = dbl(&l);
    let k2 = dbl(&k1);

    // Pad to a whole number of blocks. A bit-aligned multiple of 128
    // takes K1 on the last block; anything else gets a '1' bit, zero
    // fill, and K2.
    let aligned = total_bits % 128 == 0;
    let blocks = if aligned {
        total_bits / 128
    } else {
        total_bits / 128 + 1
    };
    buf.resize(blocks * 16, 0);
    if !aligned {
        buf[total_bits / 8] |= 0x80 >> (total_bits % 8) as u32;
    }

    let subkey = if aligned { &k1 } else { &k2 };
    let last = (blocks - 1) * 16;
    for (b, k) in buf[last..].iter_mut().zip(subkey) {
        *b ^= k;
    }

    let mut state = [0u8; 16];
    for block in buf.chunks_exact(16) {
        for (s, b) in state.iter_mut().zip(block) {
            *s ^= b;
        }
        cipher.encrypt_block((&mut state).into());
    }

    let mut mac = [0u8; MAC_SIZE];
    mac.copy_from_slice(&state[..MAC_SIZE]);
    mac
}

/// Extract the 32-bit word starting at bit offset `i` of the keystream.
#[inline]
fn keystream_word(z: &[u32], i: usize) -> u32 {
    let w = i / 32;
    let off = (i % 32) as u32;
    if off == 0 {
        z[w]
    } else {
        (z[w] << off) | (z[w + 1] >> (32 - off))
    }
}

/// 128-NIA3: ZUC-based integrity.
///
/// The 16-byte IV repeats the COUNT || BEARER pattern with the
/// direction bit folded into bytes 8 and 14.
pub fn nia3(
    key: &[u8; KEY_SIZE],
    count: u32,
    bearer: u8,
    direction: Direction,
    data: &[u8],
    bit_len: usize,
) -> [u8; MAC_SIZE] {
    let dir = direction.bit() << 7;

    let mut iv = [0u8; zuc::IV_SIZE];
    iv[0..4].copy_from_slice(&count.to_be_bytes());
    iv[4] = (bearer & 0x1F) << 3;
    iv[8] = iv[0] ^ dir;
    iv[9] = iv[1];
    iv[10] = iv[2];
    iv[11] = iv[3];
    iv[12] = iv[4];
    iv[14] = dir;

    let mut zuc = Zuc128::new(key, &iv);
    let words = bit_len.div_ceil(32) + 2;
    let mut z = vec![0u32; words];
    zuc.generate_keystream(&mut z);

    let mut t = 0u32;
    for i in 0..bit_len {
        let byte = data.get(i / 8).copied().unwrap_or(0);
        if byte & (0x80 >> (i % 8)) != 0 {
            t ^= keystream_word(&z, i);
        }
    }
    t ^= keystream_word(&z, bit_len);

    let mac = t ^ z[words - 1];
    mac.to_be_bytes()
}
