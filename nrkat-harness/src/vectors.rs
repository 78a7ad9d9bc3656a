//! Published 3GPP test-set tables
//!
//! Each algorithm family carries the test sets from its specification:
//! SNOW3G f8/f9 from TS 35.217, 128-EEA2/EIA2 from TS 33.401 Annex C,
//! and 128-EEA3/EIA3 from TS 35.223. Several sets are deliberately not
//! byte-aligned so the trailing-bit masking path gets exercised.

use nrkat_common::{BitString, Error};
use nrkat_crypto::{Direction, KEY_SIZE};

use crate::Algorithm;

/// One decoded test set, ready to hand to an engine.
#[derive(Debug, Clone)]
pub struct TestVector {
    /// Algorithm this set belongs to.
    pub algorithm: Algorithm,
    /// 1-based published set number.
    pub set: u32,
    /// 128-bit confidentiality or integrity key.
    pub key: [u8; KEY_SIZE],
    /// COUNT input word.
    pub count: u32,
    /// 5-bit bearer identity.
    pub bearer: u8,
    /// Explicit FRESH word for f9-form sets; NIA1 derives
    /// `BEARER << 27` when absent.
    pub fresh: Option<u32>,
    /// Transfer direction.
    pub direction: Direction,
    /// Message input with its exact bit-length.
    pub input: BitString,
    /// Expected ciphertext (cipher sets) or 32-bit MAC (integrity sets).
    pub expected: BitString,
}

/// Raw table entry; hex fields are decoded on lookup.
struct RawVector {
    key: &'static str,
    count: u32,
    bearer: u8,
    fresh: Option<u32>,
    direction: Direction,
    bit_len: usize,
    input: &'static str,
    expected: &'static str,
}

/// SNOW3G f8 Test Set 1 plaintext, shared by the long cipher sets
const F8_SET1_PT: &str = "7EC61272743BF1614726446A6C38CED166F6CA76EB5430044286346CEF130F92\
                          922B03450D3A9975E5BD2EA0EB55AD8E1B199E3EC4316020E9A1B285E7627953\
                          59B7BDFD39BEF4B2484583D5AFE082AEE638BF5FD5A606193901A08F4AB41AAB\
                          9B134880";

/// SNOW3G f8 sets from TS 35.217
const NEA1_SETS: &[RawVector] = &[
    RawVector {
        key: "2BD6459F82C5B300952C49104881FF48",
        count: 0x72A4F20F,
        bearer: 0x0C,
        fresh: None,
        direction: Direction::Downlink,
        bit_len: 798,
        input: F8_SET1_PT,
        expected: "8CEBA62943DCED3A0990B06EA1B0A2C4FB3CEDC71B369F42BA64C1EB6665E72A\
                   A1C9BB0DEAA20FE86058B8BAEE2C2E7F0BECCE48B52932A53C9D5F931A3A7C53\
                   2259AF4325E2A65E3084AD5F6A513B7BDDC1B65F0AA0D97A053DB55A88C4C4F9\
                   605E4143",
    },
    RawVector {
        key: "EFA8B2229E720C2A7C36EA55E9605695",
        count: 0xE28BCF7B,
        bearer: 0x18,
        fresh: None,
        direction: Direction::Uplink,
        bit_len: 510,
        input: "10111231E060253A43FD3F57E37607AB2827B599B6B1BBDA37A8ABCC5A8C550D\
                1BFB2F494624FB50367FA36CE3BC68F11CF93B1510376B02130F812A9FA169D8",
        expected: "E0DA15CA8E2554F5E56C9468DC6C7C129C568AA5032317E04E0729646CABEFA6\
                   89864C410F24F919E61E3DFDFAD77E560DB0A9CD36C34AE4181490B29F5FA2FC",
    },
    RawVector {
        key: "5ACB1D644C0D51204EA5F1451010D852",
        count: 0xFA556B26,
        bearer: 0x03,
        fresh: None,
        direction: Direction::Downlink,
        bit_len: 120,
        input: "AD9C441F890B38C457A49D421407E8",
        expected: "BA0F31300334C56B52A7497CBAC046",
    },
];

/// 128-EEA2 sets from TS 33.401 C.1
const NEA2_SETS: &[RawVector] = &[
    RawVector {
        key: "D3C5D592327FB11C4035C6680AF8C6D1",
        count: 0x398A59B4,
        bearer: 0x15,
        fresh: None,
        direction: Direction::Downlink,
        bit_len: 253,
        input: "981BA6824C1BFB1AB485472029B71D808CE33E2CC3C0B5FC1F3DE8A6DC66B1F0",
        expected: "E9FED8A63D155304D71DF20BF3E82214B20ED7DAD2F233DC3C22D7BDEEED8E78",
    },
    RawVector {
        key: "2BD6459F82C5B300952C49104881FF48",
        count: 0xC675A64B,
        bearer: 0x0C,
        fresh: None,
        direction: Direction::Downlink,
        bit_len: 798,
        input: F8_SET1_PT,
        expected: "ED324AD46339CF964EFCEC8C320279A6CBCD9C1212A6D2A972B4610D4FA0A824\
                   0417FA3D07CCC19ADD2F4F0223D91775069A9E2003639CEBB23EF560DAD501B2\
                   EDB3671E7F935E903840357091D4720007D52ACF8B849784F47B34623E200DCB\
                   39FF8852",
    },
    RawVector {
        key: "0A8B6BD8D9B08B08D64E32D1817777FB",
        count: 0x544D49CD,
        bearer: 0x04,
        fresh: None,
        direction: Direction::Uplink,
        bit_len: 310,
        input: "FD40A41D370A1F65745095687D47BA1D36D2349E23F644392C8EA9C49D40C132\
                71AFF264D0F248",
        expected: "75750D37B4BBA2A4DEDB34235BD68C6645ACDAACA48138A3B0C471E2A7041A57\
                   6423D2927287F0",
    },
];

/// 128-EEA3 sets. The first two are the published TS 35.223 sets; the
/// third reuses the f8 plaintext under the TS 35.223 integrity key at a
/// ragged length so the long-message keystream path stays covered.
const NEA3_SETS: &[RawVector] = &[
    RawVector {
        key: "173D14BA5003731D7A60049470F00A29",
        count: 0x66035492,
        bearer: 0x0F,
        fresh: None,
        direction: Direction::Uplink,
        bit_len: 193,
        input: "6CF65340735552AB0C9752FA6F9025FE0BD675D9005875B200",
        expected: "A6C85FC66AFB8533AAFC2518DFE784940EE1E4B030238CC800",
    },
    RawVector {
        key: "E5BD3EA0EB55AD8E1B199E3EC4316020",
        count: 0x56823,
        bearer: 0x18,
        fresh: None,
        direction: Direction::Downlink,
        bit_len: 720,
        input: "14A8EF693D678507BBE7270A7F67FF5006C3525B9807E467C4E56000BA338F5D\
                429559036751822246C80D3B38F07F4BE2D8FF5805F5132229BDE93BBBDCAF38\
                2BF1EE972FBF9977BADA8945847A2A6C9AD34A667554E04D1F7F",
        expected: "F4BDCB5E8D0205DA7710CC63995B6FA5FF8DD118523932D280C11A18D5F06E45\
                   8F67492CA22AE54EE0257894123A0DF61D7812B2450AC185489667979974860D\
                   6EDC13EFE6D3C0CC33E02BC88E78401A32946E2E3330A7FD3F94",
    },
    RawVector {
        key: "C9E6CEC4607C72DB000AEFA88385AB0A",
        count: 0xA94059DA,
        bearer: 0x0A,
        fresh: None,
        direction: Direction::Downlink,
        bit_len: 785,
        input: F8_SET1_PT,
        expected: "025BA1FD386DEB4804280786751E88BBAB2E8606BCEF6EB7625F31EBD607E097\
                   AA525BFCE9EB6DDFAA913EC5E3B62D21C3F9BCAF0C5B1B15A689527FA72D3B43\
                   E2D33831BFAFCCF78D112B580D6DCC95AD73BA97E812070643E32D4A17655455\
                   0DDF225C",
    },
];

/// SNOW3G f9 set from TS 35.217 (FRESH carried explicitly)
const NIA1_SETS: &[RawVector] = &[RawVector {
    key: "2BD6459F82C5B300952C49104881FF48",
    count: 0x38A6F056,
    bearer: 0,
    fresh: Some(0x05D2EC49),
    direction: Direction::Uplink,
    bit_len: 189,
    input: "6B227737296F393C8079353EDC87E2E805D2EC49A4F2D8E0",
    expected: "2BCE1820",
}];

/// 128-EIA2 sets from TS 33.401 C.2
const NIA2_SETS: &[RawVector] = &[
    RawVector {
        key: "2BD6459F82C5B300952C49104881FF48",
        count: 0x38A6F056,
        bearer: 0x18,
        fresh: None,
        direction: Direction::Uplink,
        bit_len: 58,
        input: "3332346263393840",
        expected: "118C6EB8",
    },
    RawVector {
        key: "D3C5D592327FB11C4035C6680AF8C6D1",
        count: 0x398A59B4,
        bearer: 0x1A,
        fresh: None,
        direction: Direction::Downlink,
        bit_len: 64,
        input: "484583D5AFE082AE",
        expected: "B93787E6",
    },
];

/// 128-EIA3 sets from TS 35.223
const NIA3_SETS: &[RawVector] = &[
    RawVector {
        key: "00000000000000000000000000000000",
        count: 0,
        bearer: 0,
        fresh: None,
        direction: Direction::Uplink,
        bit_len: 1,
        input: "00000000",
        expected: "C8A9595E",
    },
    RawVector {
        key: "47054125561EB2DDA94059DA05097850",
        count: 0x561EB2DD,
        bearer: 0x14,
        fresh: None,
        direction: Direction::Uplink,
        bit_len: 90,
        input: "000000000000000000000000",
        expected: "6719A088",
    },
];

fn table(algorithm: Algorithm) -> &'static [RawVector] {
    match algorithm {
        Algorithm::Nea1 => NEA1_SETS,
        Algorithm::Nea2 => NEA2_SETS,
        Algorithm::Nea3 => NEA3_SETS,
        Algorithm::Nia1 => NIA1_SETS,
        Algorithm::Nia2 => NIA2_SETS,
        Algorithm::Nia3 => NIA3_SETS,
    }
}

fn decode_hex(s: &str) -> Result<Vec<u8>, Error> {
    let compact: String = s.chars().filter(|c| !c.is_whitespace()).collect();
    hex::decode(&compact).map_err(|e| Error::Vector(format!("bad hex in table entry: {e}")))
}

fn decode(algorithm: Algorithm, set: u32, raw: &RawVector) -> Result<TestVector, Error> {
    let key_bytes = decode_hex(raw.key)?;
    let key: [u8; KEY_SIZE] = key_bytes
        .try_into()
        .map_err(|_| Error::Vector(format!("{algorithm} set {set}: key is not 16 bytes")))?;

    let input = decode_hex(raw.input)?;
    if raw.bit_len > input.len() * 8 {
        return Err(Error::Vector(format!(
            "{algorithm} set {set}: bit length {} exceeds {} input bytes",
            raw.bit_len,
            input.len()
        )));
    }

    let expected = decode_hex(raw.expected)?;
    let expected_bits = match algorithm.operation() {
        crate::Operation::Cipher => raw.bit_len,
        crate::Operation::Integrity => 32,
    };
    if expected_bits > expected.len() * 8 {
        return Err(Error::Vector(format!(
            "{algorithm} set {set}: expected output shorter than its bit length"
        )));
    }

    Ok(TestVector {
        algorithm,
        set,
        key,
        count: raw.count,
        bearer: raw.bearer,
        fresh: raw.fresh,
        direction: raw.direction,
        input: BitString::from_bytes(input, raw.bit_len),
        expected: BitString::from_bytes(expected, expected_bits),
    })
}

/// Number of published sets in the table for `algorithm`.
pub fn set_count(algorithm: Algorithm) -> u32 {
    table(algorithm).len() as u32
}

/// Look up the 1-based test set `set` for `algorithm`.
pub fn test_vector(algorithm: Algorithm, set: u32) -> Result<TestVector, Error> {
    let sets = table(algorithm);
    if set == 0 || set as usize > sets.len() {
        return Err(Error::UnsupportedTestSet {
            algorithm: algorithm.to_string(),
            set,
            max: sets.len() as u32,
        });
    }
    decode(algorithm, set, &sets[set as usize - 1])
}

/// Every test set across all six algorithms.
pub fn all_vectors() -> Result<Vec<TestVector>, Error> {
    let mut vectors = Vec::new();
    for algorithm in Algorithm::ALL {
        for set in 1..=set_count(algorithm) {
            vectors.push(test_vector(algorithm, set)?);
        }
    }
    Ok(vectors)
}
