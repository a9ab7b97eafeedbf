//! Benchmark Suite for Pagefill
//!
//! This crate provides:
//! - Synthetic item-set generation (uniform, mixed and strip-like sizes)
//! - Benchmark runner that paginates a set and records per-page statistics
//! - JSON result recording

mod result;
mod runner;
mod synthetic;

pub use result::{BenchmarkResult, PageSummary, PlacementInfo};
pub use runner::{BenchmarkConfig, BenchmarkRunner};
pub use synthetic::{ItemSet, SetKind, SyntheticGenerator};
