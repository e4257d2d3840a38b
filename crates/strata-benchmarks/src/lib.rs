//! Strata benchmarking suite
//!
//! This crate contains benchmarks for the hot paths of the asset store:
//! request path parsing, storage key building, content hashing, and full
//! resolution against a populated catalog.

pub mod common;

pub use common::*;
