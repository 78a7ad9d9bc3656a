//! Error paths: unsupported sets, engine misuse, corrupted expectations

#![allow(unused_imports)]

use nrkat_common::{BitString, Error};
use nrkat_harness::{
    run_vector, set_count, test_vector, Algorithm, CipherMacEngine, OpParams, SoftwareEngine,
};

use crate::test_utils::init_test_logging;

#[test]
fn test_unsupported_set_for_every_algorithm() {
    for algorithm in Algorithm::ALL {
        let beyond = set_count(algorithm) + 1;
        for set in [0, beyond] {
            match test_vector(algorithm, set) {
                Err(Error::UnsupportedTestSet {
                    algorithm: name,
                    set: reported,
                    max,
                }) => {
                    assert_eq!(name, algorithm.to_string());
                    assert_eq!(reported, set);
                    assert_eq!(max, set_count(algorithm));
                }
                other => panic!("{algorithm} set {set}: expected UnsupportedTestSet, got {other:?}"),
            }
        }
    }
}

#[test]
fn test_unsupported_set_message_names_the_range() {
    let err = test_vector(Algorithm::Nia3, 9).unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains("unsupported test set 9"));
    assert!(msg.contains("NIA3"));
    assert!(msg.contains("1..=2"));
}

#[test]
fn test_engine_rejects_crossed_operations() {
    init_test_logging();
    let engine = SoftwareEngine::new();
    let input = BitString::from_slice(&[0u8; 16]);

    for algorithm in [Algorithm::Nia1, Algorithm::Nia2, Algorithm::Nia3] {
        let params = OpParams {
            algorithm,
            key: [0u8; 16],
            count: 0,
            bearer: 0,
            fresh: None,
            direction: nrkat_crypto::Direction::Uplink,
        };
        assert!(matches!(
            engine.apply_keystream(&params, &input),
            Err(Error::Engine(_))
        ));
    }

    for algorithm in [Algorithm::Nea1, Algorithm::Nea2, Algorithm::Nea3] {
        let params = OpParams {
            algorithm,
            key: [0u8; 16],
            count: 0,
            bearer: 0,
            fresh: None,
            direction: nrkat_crypto::Direction::Uplink,
        };
        assert!(matches!(
            engine.compute_mac(&params, &input),
            Err(Error::Engine(_))
        ));
    }
}

#[test]
fn test_corrupted_expectation_reports_exact_offsets() {
    init_test_logging();
    let engine = SoftwareEngine::new();
    let mut vector = test_vector(Algorithm::Nea2, 1).unwrap();

    let mut bytes = vector.expected.data().to_vec();
    bytes[3] ^= 0x80;
    bytes[17] ^= 0x01;
    let bits = vector.expected.bit_length();
    vector.expected = BitString::from_bytes(bytes, bits);

    match run_vector(&engine, &vector) {
        Err(Error::Mismatch(report)) => {
            assert!(report.contains("2 of 32 bytes differ"), "report: {report}");
            assert!(report.contains("byte    3"), "report: {report}");
            assert!(report.contains("byte   17"), "report: {report}");
        }
        other => panic!("expected Mismatch, got {other:?}"),
    }
}

#[test]
fn test_corrupted_mac_expectation_mismatches() {
    init_test_logging();
    let engine = SoftwareEngine::new();
    let mut vector = test_vector(Algorithm::Nia3, 2).unwrap();

    let mut bytes = vector.expected.data().to_vec();
    bytes[0] ^= 0xFF;
    vector.expected = BitString::from_bytes(bytes, 32);

    assert!(matches!(
        run_vector(&engine, &vector),
        Err(Error::Mismatch(_))
    ));
}
