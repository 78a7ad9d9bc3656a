//! nrkat CLI tool

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::debug;

use nrkat_common::{init_logging, LogLevel};
use nrkat_harness::{all_vectors, run_vector, test_vector, Algorithm, SoftwareEngine, TestVector};

const GREEN: &str = "\x1b[32m";
const RED: &str = "\x1b[31m";
const RESET: &str = "\x1b[0m";

#[derive(Parser, Debug)]
#[command(name = "nrkat")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Algorithm to verify: nea1, nea2, nea3, nia1, nia2 or nia3
    #[arg(value_name = "ALGO")]
    pub algorithm: Option<String>,

    /// 1-based published test set number
    #[arg(value_name = "TESTSET", default_value_t = 1)]
    pub testset: u32,

    /// Run every test set of every algorithm
    #[arg(short = 'a', long = "all", conflicts_with = "algorithm")]
    pub all: bool,

    /// Log level: trace, debug, info, warn, error
    #[arg(long = "log-level", value_name = "LEVEL", default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,
}

fn main() -> ExitCode {
    match run() {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("ERROR: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<bool> {
    let args = Args::parse();
    init_logging(args.log_level);

    if args.all {
        return run_all();
    }

    let token = args
        .algorithm
        .as_ref()
        .context("An algorithm is required. Use --all to run every test set.")?;
    let algorithm: Algorithm = token.parse()?;

    let vector = test_vector(algorithm, args.testset)?;
    let engine = SoftwareEngine::new();
    Ok(report(&engine, &vector))
}

fn run_all() -> Result<bool> {
    let vectors = all_vectors()?;
    let engine = SoftwareEngine::new();

    let mut passed = 0usize;
    for vector in &vectors {
        if report(&engine, vector) {
            passed += 1;
        }
    }

    println!("{}/{} test sets passed", passed, vectors.len());
    Ok(passed == vectors.len())
}

fn report(engine: &SoftwareEngine, vector: &TestVector) -> bool {
    debug!(bits = vector.input.bit_length(), "input loaded");
    match run_vector(engine, vector) {
        Ok(()) => {
            println!(
                "{} test set {} ... {GREEN}PASS{RESET}",
                vector.algorithm, vector.set
            );
            true
        }
        Err(e) => {
            println!(
                "{} test set {} ... {RED}FAIL{RESET}",
                vector.algorithm, vector.set
            );
            eprintln!("{e}");
            false
        }
    }
}
