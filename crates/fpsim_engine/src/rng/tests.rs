//! Unit tests for the RNG module.
//!
//! This module contains tests verifying:
//! - Seed reproducibility and in-place reseeding
//! - Uniform range and batch/single-draw equivalence
//! - Entropy-initialised generators report no seed

use super::*;
use rand::RngCore;

#[test]
fn test_seed_reproducibility() {
    let mut rng1 = FpRng::from_seed(12345);
    let mut rng2 = FpRng::from_seed(12345);

    for _ in 0..100 {
        assert_eq!(rng1.gen_uniform(), rng2.gen_uniform());
    }
}

#[test]
fn test_different_seeds_diverge() {
    let mut rng1 = FpRng::from_seed(1);
    let mut rng2 = FpRng::from_seed(2);

    let seq1: Vec<f64> = (0..16).map(|_| rng1.gen_uniform()).collect();
    let seq2: Vec<f64> = (0..16).map(|_| rng2.gen_uniform()).collect();
    assert_ne!(seq1, seq2);
}

#[test]
fn test_reseed_restarts_stream() {
    let mut rng = FpRng::from_seed(99);
    let first: Vec<f64> = (0..10).map(|_| rng.gen_uniform()).collect();

    rng.reseed(99);
    let second: Vec<f64> = (0..10).map(|_| rng.gen_uniform()).collect();
    assert_eq!(first, second);
}

#[test]
fn test_reseed_records_seed() {
    let mut rng = FpRng::from_entropy();
    assert_eq!(rng.seed(), None);

    rng.reseed(5);
    assert_eq!(rng.seed(), Some(5));
    assert_eq!(rng.gen_uniform(), FpRng::from_seed(5).gen_uniform());
}

#[test]
fn test_uniform_range() {
    let mut rng = FpRng::from_seed(42);

    for _ in 0..10_000 {
        let value = rng.gen_uniform();
        assert!(value >= 0.0, "Uniform value {} is below 0", value);
        assert!(value < 1.0, "Uniform value {} is >= 1", value);
    }
}

#[test]
fn test_fill_uniform_matches_single_draws() {
    let mut batch = FpRng::from_seed(3);
    let mut single = FpRng::from_seed(3);

    let mut buffer = vec![0.0; 257];
    batch.fill_uniform(&mut buffer);

    for &value in &buffer {
        assert_eq!(value, single.gen_uniform());
    }
}

#[test]
fn test_empty_buffer() {
    let mut rng = FpRng::from_seed(42);
    let mut empty: Vec<f64> = vec![];
    rng.fill_uniform(&mut empty);

    // The stream did not advance.
    assert_eq!(rng.gen_uniform(), FpRng::from_seed(42).gen_uniform());
}

#[test]
fn test_rng_core_delegates_to_inner_stream() {
    let mut rng1 = FpRng::from_seed(8);
    let mut rng2 = FpRng::from_seed(8);
    assert_eq!(rng1.next_u64(), rng2.next_u64());

    let mut bytes1 = [0u8; 32];
    let mut bytes2 = [0u8; 32];
    rng1.fill_bytes(&mut bytes1);
    rng2.fill_bytes(&mut bytes2);
    assert_eq!(bytes1, bytes2);
}

#[test]
fn test_uniform_mean() {
    let mut rng = FpRng::from_seed(2024);
    let n = 100_000;
    let mean = (0..n).map(|_| rng.gen_uniform()).sum::<f64>() / n as f64;
    assert!((mean - 0.5).abs() < 0.01, "Mean {mean} too far from 0.5");
}
