#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Pure derivation pipeline over zone snapshots.
//!
//! Five components, all synchronous, stateless functions over in-memory
//! collections: the area parser, the status adjuster, the stats
//! aggregator, the cost estimator, and the prediction generator. None of
//! them performs I/O or mutates its input, so request handlers can call
//! them concurrently on per-request snapshots without synchronization.
//!
//! Failures are value-level throughout: malformed area text and unknown
//! status labels resolve to documented defaults, and empty inputs produce
//! zero-valued, well-formed outputs. This is display/advisory data, so
//! defensive defaulting beats propagated errors.

pub mod area;
pub mod cost;
pub mod predict;
pub mod stats;
pub mod status;
