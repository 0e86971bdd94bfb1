//! Benchmark support crate for ccl.
//!
//! Provides seeded synthetic masks and parameter types used by the Criterion
//! benchmarks comparing the union-find labelers with the flood-fill
//! baselines and streaming insertion with full recomputation.

pub mod error;
pub mod mask;
pub mod params;
