//! Trailing-bit masking behavior across the pipeline

#![allow(unused_imports)]

use nrkat_common::BitString;
use nrkat_harness::{
    all_vectors, run_vector, test_vector, Algorithm, CipherMacEngine, OpParams, SoftwareEngine,
};

use crate::test_utils::init_test_logging;

#[test]
fn test_masking_is_idempotent() {
    let mut bs = BitString::from_bytes(vec![0xFF; 7], 51);
    bs.mask_trailing();
    let once = bs.clone();
    bs.mask_trailing();
    assert_eq!(bs, once);
}

#[test]
fn test_byte_aligned_mask_is_identity() {
    let original = BitString::from_bytes(vec![0xA5, 0x5A, 0xFF], 24);
    assert_eq!(original.masked(), original);
}

#[test]
fn test_ragged_mask_zeroes_trailing_bits() {
    // 13 bits leave 3 trailing bits in the second byte.
    let bs = BitString::from_bytes(vec![0xFF, 0xFF], 13).masked();
    assert_eq!(bs.data(), &[0xFF, 0xF8]);
    assert!(bs.is_masked());
}

#[test]
fn test_mask_drops_excess_bytes() {
    let bs = BitString::from_bytes(vec![0x11, 0x22, 0x33, 0x44], 10).masked();
    assert_eq!(bs.data().len(), 2);
}

#[test]
fn test_verification_tolerates_garbage_past_bit_length() {
    init_test_logging();
    let engine = SoftwareEngine::new();

    // The 798-bit f8 set leaves 2 undefined bits in the last byte. Flip
    // them in the input; the verified output must be unaffected.
    let mut vector = test_vector(Algorithm::Nea1, 1).unwrap();
    let mut bytes = vector.input.data().to_vec();
    *bytes.last_mut().unwrap() ^= 0x03;
    let bits = vector.input.bit_length();
    vector.input = BitString::from_bytes(bytes, bits);

    run_vector(&engine, &vector).unwrap();
}

#[test]
fn test_mac_ignores_bits_past_length_end_to_end() {
    init_test_logging();
    let engine = SoftwareEngine::new();

    // 58-bit EIA2 set: 6 bits of the last byte are outside the message.
    let vector = test_vector(Algorithm::Nia2, 1).unwrap();
    let params = OpParams::from(&vector);
    let baseline = engine.compute_mac(&params, &vector.input).unwrap();

    let mut bytes = vector.input.data().to_vec();
    *bytes.last_mut().unwrap() ^= 0x3F;
    let garbled = BitString::from_bytes(bytes, vector.input.bit_length());

    assert_eq!(engine.compute_mac(&params, &garbled).unwrap(), baseline);
}
