//! earfloor — absolute hearing threshold and compressive specific loudness.
//!
//! Evaluates the ISO 226:2003 equal-loudness parametric fit, projects the
//! hearing-threshold contour onto arbitrary frequency grids, and maps
//! excitation power to perceptually compressed loudness above threshold.
//! Bark↔Hz conversion and the outer-to-inner excitation transfer are
//! supplied by the caller through the traits in [`core::transfer`].

pub mod config;
pub mod core;
