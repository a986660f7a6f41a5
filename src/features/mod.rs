//! Feature extraction modules
//!
//! This module contains the detection stages:
//! - Spectral peak extraction (phase-difference frequency refinement)
//! - Harmonic selection (comb heuristic + frequency ceiling)

pub mod harmonic;
pub mod peaks;
