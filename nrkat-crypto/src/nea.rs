//! NEA confidentiality algorithms (128-NEA1/2/3)
//!
//! The three 5G NAS/PDCP ciphering algorithms:
//! - NEA1: SNOW3G keystream (128-EEA1 / UEA2 f8)
//! - NEA2: AES-128 in CTR mode (128-EEA2)
//! - NEA3: ZUC-128 keystream (128-EEA3)
//!
//! All three XOR a keystream over the message in place; encryption and
//! decryption are the same operation. Each takes the message length in
//! bits and covers every byte the keystream touches, so bits past the
//! declared length come out garbled and the caller masks them off.
//!
//! Reference: 3GPP TS 33.501 Annex D, TS 35.215, TS 35.221

use aes::Aes128;
use ctr::cipher::{KeyIvInit, StreamCipher};

use crate::snow3g;
use crate::zuc::{self, Zuc128};
use crate::{Direction, KEY_SIZE};

/// Type alias for AES-128 CTR mode
type Aes128Ctr = ctr::Ctr128BE<Aes128>;

/// 128-NEA1: SNOW3G-based ciphering.
pub fn nea1(
    key: &[u8; KEY_SIZE],
    count: u32,
    bearer: u8,
    direction: Direction,
    data: &mut [u8],
    bit_len: usize,
) {
    snow3g::f8(key, count, bearer & 0x1F, direction, data, bit_len);
}

/// 128-NEA2: AES-128-CTR ciphering.
///
/// IV layout (128 bits):
/// ```text
/// | COUNT (32 bits) | BEARER (5) | DIRECTION (1) | 0...0 (90 bits) |
/// ```
pub fn nea2(
    key: &[u8; KEY_SIZE],
    count: u32,
    bearer: u8,
    direction: Direction,
    data: &mut [u8],
    bit_len: usize,
) {
    let mut iv = [0u8; 16];
    iv[0..4].copy_from_slice(&count.to_be_bytes());
    iv[4] = ((bearer & 0x1F) << 3) | (direction.bit() << 2);

    let n = bit_len.div_ceil(8).min(data.len());
    let mut cipher = Aes128Ctr::new(key.into(), &iv.into());
    cipher.apply_keystream(&mut data[..n]);
}

/// 128-NEA3: ZUC-based ciphering.
///
/// The 16-byte IV repeats an 8-byte pattern:
/// ```text
/// | COUNT (32 bits) | BEARER (5) | DIRECTION (1) | 00 | 0x00 0x00 0x00 |
/// ```
pub fn nea3(
    key: &[u8; KEY_SIZE],
    count: u32,
    bearer: u8,
    direction: Direction,
    data: &mut [u8],
    bit_len: usize,
) {
    let mut head = [0u8; 8];
    head[0..4].copy_from_slice(&count.to_be_bytes());
    head[4] = ((bearer & 0x1F) << 3) | (direction.bit() << 2);

    let mut iv = [0u8; zuc::IV_SIZE];
    iv[0..8].copy_from_slice(&head);
    iv[8..16].copy_from_slice(&head);

    let mut zuc = Zuc128::new(key, &iv);
    let words = bit_len.div_ceil(32);
    for (chunk, ks) in data.chunks_mut(4).zip((0..words).map(|_| zuc.generate())) {
        for (b, k) in chunk.iter_mut().zip(ks.to_be_bytes()) {
            *b ^= k;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const F8_KEY: [u8; 16] = [
        0x2B, 0xD6, 0x45, 0x9F, 0x82, 0xC5, 0xB3, 0x00, 0x95, 0x2C, 0x49, 0x10, 0x48, 0x81, 0xFF,
        0x48,
    ];

    #[test]
    fn test_nea1_roundtrip() {
        let original = b"Hello, NEA1 SNOW3G! Test message.";
        let bits = original.len() * 8;
        let mut data = original.to_vec();

        nea1(&F8_KEY, 0x72A4F20F, 0x0C, Direction::Downlink, &mut data, bits);
        assert_ne!(&data[..], &original[..]);

        nea1(&F8_KEY, 0x72A4F20F, 0x0C, Direction::Downlink, &mut data, bits);
        assert_eq!(&data[..], &original[..]);
    }

    #[test]
    fn test_nea1_empty_data() {
        let key = [0u8; 16];
        let mut data: Vec<u8> = vec![];
        nea1(&key, 0, 0, Direction::Uplink, &mut data, 0);
        assert!(data.is_empty());
    }

    /// 128-EEA2 Test Set 1 from 3GPP TS 33.401 C.1 (253-bit message)
    #[test]
    fn test_nea2_set1() {
        let key: [u8; 16] = [
            0xD3, 0xC5, 0xD5, 0x92, 0x32, 0x7F, 0xB1, 0x1C, 0x40, 0x35, 0xC6, 0x68, 0x0A, 0xF8,
            0xC6, 0xD1,
        ];
        let plaintext: [u8; 32] = [
            0x98, 0x1B, 0xA6, 0x82, 0x4C, 0x1B, 0xFB, 0x1A, 0xB4, 0x85, 0x47, 0x20, 0x29, 0xB7,
            0x1D, 0x80, 0x8C, 0xE3, 0x3E, 0x2C, 0xC3, 0xC0, 0xB5, 0xFC, 0x1F, 0x3D, 0xE8, 0xA6,
            0xDC, 0x66, 0xB1, 0xF0,
        ];
        let expected: [u8; 32] = [
            0xE9, 0xFE, 0xD8, 0xA6, 0x3D, 0x15, 0x53, 0x04, 0xD7, 0x1D, 0xF2, 0x0B, 0xF3, 0xE8,
            0x22, 0x14, 0xB2, 0x0E, 0xD7, 0xDA, 0xD2, 0xF2, 0x33, 0xDC, 0x3C, 0x22, 0xD7, 0xBD,
            0xEE, 0xED, 0x8E, 0x78,
        ];

        let mut data = plaintext;
        nea2(&key, 0x398A59B4, 0x15, Direction::Downlink, &mut data, 253);

        // Only the declared 253 bits are significant.
        *data.last_mut().unwrap() &= 0xF8;
        assert_eq!(&data[..], &expected[..]);
    }

    #[test]
    fn test_nea2_roundtrip() {
        let key = [0x2Bu8; 16];
        let original = b"Hello, 5G World! This is a test message for NEA2.";
        let bits = original.len() * 8;
        let mut data = original.to_vec();

        nea2(&key, 0x12345678, 0x0A, Direction::Downlink, &mut data, bits);
        assert_ne!(&data[..], &original[..]);

        nea2(&key, 0x12345678, 0x0A, Direction::Downlink, &mut data, bits);
        assert_eq!(&data[..], &original[..]);
    }

    #[test]
    fn test_nea2_different_bearers_differ() {
        let key = [0x2Bu8; 16];
        let mut data1 = [0u8; 16];
        let mut data2 = [0u8; 16];

        nea2(&key, 0, 0, Direction::Uplink, &mut data1, 128);
        nea2(&key, 0, 1, Direction::Uplink, &mut data2, 128);
        assert_ne!(data1, data2);
    }

    /// 128-EEA3 Test Set 1 from 3GPP TS 35.223 (193-bit message)
    #[test]
    fn test_nea3_set1() {
        let key: [u8; 16] = [
            0x17, 0x3D, 0x14, 0xBA, 0x50, 0x03, 0x73, 0x1D, 0x7A, 0x60, 0x04, 0x94, 0x70, 0xF0,
            0x0A, 0x29,
        ];
        let plaintext: [u8; 25] = [
            0x6C, 0xF6, 0x53, 0x40, 0x73, 0x55, 0x52, 0xAB, 0x0C, 0x97, 0x52, 0xFA, 0x6F, 0x90,
            0x25, 0xFE, 0x0B, 0xD6, 0x75, 0xD9, 0x00, 0x58, 0x75, 0xB2, 0x00,
        ];
        let expected: [u8; 25] = [
            0xA6, 0xC8, 0x5F, 0xC6, 0x6A, 0xFB, 0x85, 0x33, 0xAA, 0xFC, 0x25, 0x18, 0xDF, 0xE7,
            0x84, 0x94, 0x0E, 0xE1, 0xE4, 0xB0, 0x30, 0x23, 0x8C, 0xC8, 0x00,
        ];

        let mut data = plaintext;
        nea3(&key, 0x66035492, 0x0F, Direction::Uplink, &mut data, 193);

        *data.last_mut().unwrap() &= 0x80;
        assert_eq!(&data[..], &expected[..]);
    }

    #[test]
    fn test_nea3_roundtrip() {
        let key = [0x42u8; 16];
        let original = b"ZUC keystream roundtrip";
        let bits = original.len() * 8;
        let mut data = original.to_vec();

        nea3(&key, 0xABCDEF01, 0x1F, Direction::Downlink, &mut data, bits);
        assert_ne!(&data[..], &original[..]);

        nea3(&key, 0xABCDEF01, 0x1F, Direction::Downlink, &mut data, bits);
        assert_eq!(&data[..], &original[..]);
    }
}
