//! Port definitions for the wallclock pipeline.
//!
//! The pipeline consumes exactly two operations from its host environment:
//! reading the current wall-clock time and replacing the displayed text.
//! Both are expressed as traits here so that higher level crates can be
//! exercised against recording or fixed-time implementations.

pub mod clock;
pub mod surface;
