//! SNOW3G stream cipher and its f8/f9 modes
//!
//! SNOW3G is the word-oriented stream cipher behind the 3GPP UEA2/UIA2 and
//! NEA1/NIA1 confidentiality and integrity algorithms.
//!
//! Reference: ETSI TS 135 201 / TS 135 202 (3GPP TS 35.201/35.202)

use crate::Direction;

/// S-box SR (S1 transformation, Rijndael S-box)
const SR: [u8; 256] = [
    0x63, 0x7C, 0x77, 0x7B, 0xF2, 0x6B, 0x6F, 0xC5, 0x30, 0x01, 0x67, 0x2B, 0xFE, 0xD7, 0xAB, 0x76,
    0xCA, 0x82, 0xC9, 0x7D, 0xFA, 0x59, 0x47, 0xF0, 0xAD, 0xD4, 0xA2, 0xAF, 0x9C, 0xA4, 0x72, 0xC0,
    0xB7, 0xFD, 0x93, 0x26, 0x36, 0x3F, 0xF7, 0xCC, 0x34, 0xA5, 0xE5, 0xF1, 0x71, 0xD8, 0x31, 0x15,
    0x04, 0xC7, 0x23, 0xC3, 0x18, 0x96, 0x05, 0x9A, 0x07, 0x12, 0x80, 0xE2, 0xEB, 0x27, 0xB2, 0x75,
    0x09, 0x83, 0x2C, 0x1A, 0x1B, 0x6E, 0x5A, 0xA0, 0x52, 0x3B, 0xD6, 0xB3, 0x29, 0xE3, 0x2F, 0x84,
    0x53, 0xD1, 0x00, 0xED, 0x20, 0xFC, 0xB1, 0x5B, 0x6A, 0xCB, 0xBE, 0x39, 0x4A, 0x4C, 0x58, 0xCF,
    0xD0, 0xEF, 0xAA, 0xFB, 0x43, 0x4D, 0x33, 0x85, 0x45, 0xF9, 0x02, 0x7F, 0x50, 0x3C, 0x9F, 0xA8,
    0x51, 0xA3, 0x40, 0x8F, 0x92, 0x9D, 0x38, 0xF5, 0xBC, 0xB6, 0xDA, 0x21, 0x10, 0xFF, 0xF3, 0xD2,
    0xCD, 0x0C, 0x13, 0xEC, 0x5F, 0x97, 0x44, 0x17, 0xC4, 0xA7, 0x7E, 0x3D, 0x64, 0x5D, 0x19, 0x73,
    0x60, 0x81, 0x4F, 0xDC, 0x22, 0x2A, 0x90, 0x88, 0x46, 0xEE, 0xB8, 0x14, 0xDE, 0x5E, 0x0B, 0xDB,
    0xE0, 0x32, 0x3A, 0x0A, 0x49, 0x06, 0x24, 0x5C, 0xC2, 0xD3, 0xAC, 0x62, 0x91, 0x95, 0xE4, 0x79,
    0xE7, 0xC8, 0x37, 0x6D, 0x8D, 0xD5, 0x4E, 0xA9, 0x6C, 0x56, 0xF4, 0xEA, 0x65, 0x7A, 0xAE, 0x08,
    0xBA, 0x78, 0x25, 0x2E, 0x1C, 0xA6, 0xB4, 0xC6, 0xE8, 0xDD, 0x74, 0x1F, 0x4B, 0xBD, 0x8B, 0x8A,
    0x70, 0x3E, 0xB5, 0x66, 0x48, 0x03, 0xF6, 0x0E, 0x61, 0x35, 0x57, 0xB9, 0x86, 0xC1, 0x1D, 0x9E,
    0xE1, 0xF8, 0x98, 0x11, 0x69, 0xD9, 0x8E, 0x94, 0x9B, 0x1E, 0x87, 0xE9, 0xCE, 0x55, 0x28, 0xDF,
    0x8C, 0xA1, 0x89, 0x0D, 0xBF, 0xE6, 0x42, 0x68, 0x41, 0x99, 0x2D, 0x0F, 0xB0, 0x54, 0xBB, 0x16,
];

/// S-box SQ (S2 transformation)
const SQ: [u8; 256] = [
    0x25, 0x24, 0x73, 0x67, 0xD7, 0xAE, 0x5C, 0x30, 0xA4, 0xEE, 0x6E, 0xCB, 0x7D, 0xB5, 0x82, 0xDB,
    0xE4, 0x8E, 0x48, 0x49, 0x4F, 0x5D, 0x6A, 0x78, 0x70, 0x88, 0xE8, 0x5F, 0x5E, 0x84, 0x65, 0xE2,
    0xD8, 0xE9, 0xCC, 0xED, 0x40, 0x2F, 0x11, 0x28, 0x57, 0xD2, 0xAC, 0xE3, 0x4A, 0x15, 0x1B, 0xB9,
    0xB2, 0x80, 0x85, 0xA6, 0x2E, 0x02, 0x47, 0x29, 0x07, 0x4B, 0x0E, 0xC1, 0x51, 0xAA, 0x89, 0xD4,
    0xCA, 0x01, 0x46, 0xB3, 0xEF, 0xDD, 0x44, 0x7B, 0xC2, 0x7F, 0xBE, 0xC3, 0x9F, 0x20, 0x4C, 0x64,
    0x83, 0xA2, 0x68, 0x42, 0x13, 0xB4, 0x41, 0xCD, 0xBA, 0xC6, 0xBB, 0x6D, 0x4D, 0x71, 0x21, 0xF4,
    0x8D, 0xB0, 0xE5, 0x93, 0xFE, 0x8F, 0xE6, 0xCF, 0x43, 0x45, 0x31, 0x22, 0x37, 0x36, 0x96, 0xFA,
    0xBC, 0x0F, 0x08, 0x52, 0x1D, 0x55, 0x1A, 0xC5, 0x4E, 0x23, 0x69, 0x7A, 0x92, 0xFF, 0x5B, 0x5A,
    0xEB, 0x9A, 0x1C, 0xA9, 0xD1, 0x7E, 0x0D, 0xFC, 0x50, 0x8A, 0xB6, 0x62, 0xF5, 0x0A, 0xF8, 0xDC,
    0x03, 0x3C, 0x0C, 0x39, 0xF1, 0xB8, 0xF3, 0x3D, 0xF2, 0xD5, 0x97, 0x66, 0x81, 0x32, 0xA0, 0x00,
    0x06, 0xCE, 0xF6, 0xEA, 0xB7, 0x17, 0xF7, 0x8C, 0x79, 0xD6, 0xA7, 0xBF, 0x8B, 0x3F, 0x1F, 0x53,
    0x63, 0x75, 0x35, 0x2C, 0x60, 0xFD, 0x27, 0xD3, 0x94, 0xA5, 0x7C, 0xA1, 0x05, 0x58, 0x2D, 0xBD,
    0xD9, 0xC7, 0xAF, 0x6B, 0x54, 0x0B, 0xE0, 0x38, 0x04, 0xC8, 0x9D, 0xE7, 0x14, 0xB1, 0x87, 0x9C,
    0xDF, 0x6F, 0xF9, 0xDA, 0x2A, 0xC4, 0x59, 0x16, 0x74, 0x91, 0xAB, 0x26, 0x61, 0x76, 0x34, 0x2B,
    0xAD, 0x99, 0xFB, 0x72, 0xEC, 0x33, 0x12, 0xDE, 0x98, 0x3B, 0xC0, 0x9B, 0x3E, 0x18, 0x10, 0x3A,
    0x56, 0xE1, 0x77, 0xC9, 0x1E, 0x9E, 0x95, 0xA3, 0x90, 0x19, 0xA8, 0x6C, 0x09, 0xD0, 0xF0, 0x86,
];

/// `MULx`: multiplication by x in GF(2^8) with the given reduction constant
#[inline]
fn mul_x(v: u8, c: u8) -> u8 {
    if v & 0x80 != 0 {
        (v << 1) ^ c
    } else {
        v << 1
    }
}

/// `MULxPOW`: `MULx` applied `i` times
fn mul_x_pow(v: u8, i: u8, c: u8) -> u8 {
    let mut result = v;
    for _ in 0..i {
        result = mul_x(result, c);
    }
    result
}

/// `MULalpha`: multiplication by alpha in the LFSR feedback polynomial
#[inline]
fn mul_alpha(c: u8) -> u32 {
    ((mul_x_pow(c, 23, 0xa9) as u32) << 24)
        | ((mul_x_pow(c, 245, 0xa9) as u32) << 16)
        | ((mul_x_pow(c, 48, 0xa9) as u32) << 8)
        | (mul_x_pow(c, 239, 0xa9) as u32)
}

/// `DIValpha`: division by alpha in the LFSR feedback polynomial
#[inline]
fn div_alpha(c: u8) -> u32 {
    ((mul_x_pow(c, 16, 0xa9) as u32) << 24)
        | ((mul_x_pow(c, 39, 0xa9) as u32) << 16)
        | ((mul_x_pow(c, 6, 0xa9) as u32) << 8)
        | (mul_x_pow(c, 64, 0xa9) as u32)
}

/// S1 transformation: SR S-box bytes mixed through the MixColumn matrix
fn s1(w: u32) -> u32 {
    let b0 = SR[((w >> 24) & 0xff) as usize];
    let b1 = SR[((w >> 16) & 0xff) as usize];
    let b2 = SR[((w >> 8) & 0xff) as usize];
    let b3 = SR[(w & 0xff) as usize];

    let r0 = mul_x(b0, 0x1b) ^ b1 ^ b2 ^ (mul_x(b3, 0x1b) ^ b3);
    let r1 = (mul_x(b0, 0x1b) ^ b0) ^ mul_x(b1, 0x1b) ^ b2 ^ b3;
    let r2 = b0 ^ (mul_x(b1, 0x1b) ^ b1) ^ mul_x(b2, 0x1b) ^ b3;
    let r3 = b0 ^ b1 ^ (mul_x(b2, 0x1b) ^ b2) ^ mul_x(b3, 0x1b);

    ((r0 as u32) << 24) | ((r1 as u32) << 16) | ((r2 as u32) << 8) | (r3 as u32)
}

/// S2 transformation: SQ S-box bytes mixed with constant 0x69
fn s2(w: u32) -> u32 {
    let b0 = SQ[((w >> 24) & 0xff) as usize];
    let b1 = SQ[((w >> 16) & 0xff) as usize];
    let b2 = SQ[((w >> 8) & 0xff) as usize];
    let b3 = SQ[(w & 0xff) as usize];

    let r0 = mul_x(b0, 0x69) ^ b1 ^ b2 ^ (mul_x(b3, 0x69) ^ b3);
    let r1 = (mul_x(b0, 0x69) ^ b0) ^ mul_x(b1, 0x69) ^ b2 ^ b3;
    let r2 = b0 ^ (mul_x(b1, 0x69) ^ b1) ^ mul_x(b2, 0x69) ^ b3;
    let r3 = b0 ^ b1 ^ (mul_x(b2, 0x69) ^ b2) ^ mul_x(b3, 0x69);

    ((r0 as u32) << 24) | ((r1 as u32) << 16) | ((r2 as u32) << 8) | (r3 as u32)
}

/// SNOW3G keystream generator.
///
/// Construction runs the 32 initialization clocks plus the discarded first
/// keystream clock, so [`next_word`](Self::next_word) immediately yields
/// z1 of the standard's numbering.
pub struct Snow3g {
    /// LFSR state (16 x 32-bit words)
    lfsr: [u32; 16],
    /// FSM registers R1, R2, R3
    fsm: [u32; 3],
}

impl Snow3g {
    /// Initialize the cipher from key and IV words.
    pub fn new(key: &[u32; 4], iv: &[u32; 4]) -> Self {
        let mut s = Snow3g {
            lfsr: [
                key[0] ^ 0xffffffff,
                key[1] ^ 0xffffffff,
                key[2] ^ 0xffffffff,
                key[3] ^ 0xffffffff,
                key[0],
                key[1],
                key[2],
                key[3],
                key[0] ^ 0xffffffff,
                key[1] ^ 0xffffffff ^ iv[3],
                key[2] ^ 0xffffffff ^ iv[2],
                key[3] ^ 0xffffffff,
                key[0] ^ iv[1],
                key[1],
                key[2],
                key[3] ^ iv[0],
            ],
            fsm: [0u32; 3],
        };

        for _ in 0..32 {
            let f = s.clock_fsm();
            s.clock_lfsr(Some(f));
        }

        // Discard the first keystream clock per the standard.
        s.clock_fsm();
        s.clock_lfsr(None);

        s
    }

    /// Clock the LFSR, folding `f` into the feedback in initialization mode.
    fn clock_lfsr(&mut self, f: Option<u32>) {
        let mut v = ((self.lfsr[0] << 8) & 0xffffff00)
            ^ mul_alpha(((self.lfsr[0] >> 24) & 0xff) as u8)
            ^ self.lfsr[2]
            ^ ((self.lfsr[11] >> 8) & 0x00ffffff)
            ^ div_alpha((self.lfsr[11] & 0xff) as u8);
        if let Some(f) = f {
            v ^= f;
        }

        self.lfsr.copy_within(1.., 0);
        self.lfsr[15] = v;
    }

    /// Clock the FSM and return its output word F.
    fn clock_fsm(&mut self) -> u32 {
        let f = self.lfsr[15].wrapping_add(self.fsm[0]) ^ self.fsm[1];
        let r = self.fsm[1].wrapping_add(self.fsm[2] ^ self.lfsr[5]);
        self.fsm[2] = s2(self.fsm[1]);
        self.fsm[1] = s1(self.fsm[0]);
        self.fsm[0] = r;
        f
    }

    /// Produce the next keystream word.
    pub fn next_word(&mut self) -> u32 {
        let z = self.clock_fsm() ^ self.lfsr[0];
        self.clock_lfsr(None);
        z
    }
}

/// Load a 16-byte key into the word order f8/f9 expect (K3..K0).
fn key_words(key: &[u8; 16]) -> [u32; 4] {
    [
        u32::from_be_bytes([key[12], key[13], key[14], key[15]]),
        u32::from_be_bytes([key[8], key[9], key[10], key[11]]),
        u32::from_be_bytes([key[4], key[5], key[6], key[7]]),
        u32::from_be_bytes([key[0], key[1], key[2], key[3]]),
    ]
}

/// f8: SNOW3G confidentiality keystream, XORed over `data` in place.
///
/// `bit_len` is the message length in bits; the keystream covers
/// `ceil(bit_len / 32)` words and whole bytes of `data` are XORed,
/// trailing-bit masking being the caller's concern.
pub fn f8(
    key: &[u8; 16],
    count: u32,
    bearer: u8,
    direction: Direction,
    data: &mut [u8],
    bit_len: usize,
) {
    let head = ((bearer as u32 & 0x1f) << 27) | ((direction.bit() as u32) << 26);
    let iv = [head, count, head, count];

    let mut snow = Snow3g::new(&key_words(key), &iv);
    let words = bit_len.div_ceil(32);

    for (chunk, ks) in data
        .chunks_mut(4)
        .zip((0..words).map(|_| snow.next_word()))
    {
        for (b, k) in chunk.iter_mut().zip(ks.to_be_bytes()) {
            *b ^= k;
        }
    }
}

/// `MUL64x` for f9
#[inline]
fn mul64x(v: u64, c: u64) -> u64 {
    if v & 0x8000000000000000 != 0 {
        (v << 1) ^ c
    } else {
        v << 1
    }
}

/// `MUL64xPOW` for f9
fn mul64x_pow(v: u64, i: u8, c: u64) -> u64 {
    let mut result = v;
    for _ in 0..i {
        result = mul64x(result, c);
    }
    result
}

/// MUL64: carry-less product of v and p reduced by c
fn mul64(v: u64, p: u64, c: u64) -> u64 {
    let mut result = 0u64;
    for i in 0..64 {
        if (p >> i) & 0x1 != 0 {
            result ^= mul64x_pow(v, i, c);
        }
    }
    result
}

/// Keep the top `n` bits of a byte (1 <= n <= 8).
#[inline]
fn keep_high_bits(b: u8, n: u32) -> u8 {
    b & (0xFFu8 << (8 - n))
}

/// f9: SNOW3G integrity MAC over `bit_len` bits of `data`.
///
/// `fresh` is the 32-bit FRESH word; 128-NIA1 derives it as
/// `BEARER << 27`, while the published f9 sets carry it explicitly.
pub fn f9(
    key: &[u8; 16],
    count: u32,
    fresh: u32,
    direction: Direction,
    data: &[u8],
    bit_len: usize,
) -> [u8; 4] {
    let dir = direction.bit() as u32;
    let iv = [
        fresh ^ (dir << 15),
        count ^ (dir << 31),
        fresh,
        count,
    ];

    let mut snow = Snow3g::new(&key_words(key), &iv);
    let mut z = [0u32; 5];
    for w in z.iter_mut() {
        *w = snow.next_word();
    }

    let p = ((z[0] as u64) << 32) | (z[1] as u64);
    let q = ((z[2] as u64) << 32) | (z[3] as u64);
    let c = 0x1bu64;
    let length = bit_len as u64;

    // D is the number of 64-bit blocks including the length block.
    let d = if length % 64 == 0 {
        (length / 64) + 1
    } else {
        (length / 64) + 2
    } as usize;

    let load_block = |index: usize, bits: u32| -> u64 {
        let mut block = 0u64;
        let mut remaining = bits;
        let mut j = 0usize;
        while remaining >= 8 {
            let idx = index * 8 + j;
            if idx < data.len() {
                block |= (data[idx] as u64) << (8 * (7 - j));
            }
            remaining -= 8;
            j += 1;
        }
        if remaining > 0 {
            let idx = index * 8 + j;
            if idx < data.len() {
                block |= (keep_high_bits(data[idx], remaining) as u64) << (8 * (7 - j));
            }
        }
        block
    };

    let mut eval = 0u64;
    // An empty message has no message blocks at all (D = 1), only the
    // length block below.
    if length > 0 {
        for i in 0..(d - 2) {
            eval = mul64(eval ^ load_block(i, 64), p, c);
        }

        // Last message block holds the ragged tail (a full 64 bits when
        // the length is block-aligned).
        let rem_bits = match (length % 64) as u32 {
            0 => 64,
            n => n,
        };
        eval = mul64(eval ^ load_block(d - 2, rem_bits), p, c);
    }

    eval ^= length;
    eval = mul64(eval, q, c);

    let mac = ((eval >> 32) as u32) ^ z[4];
    mac.to_be_bytes()
}
