//! Spectral peak extraction
//!
//! Scans a spectral frame for prominent peaks, refining each bin's nominal
//! frequency by the phase advance observed since the previous frame:
//! - Phase tracker (per-bin previous-phase state)
//! - Peak list (fixed-capacity, front-insertion container)
//! - Extractor (per-bin scan + frequency refinement)

use serde::{Deserialize, Serialize};

pub mod extractor;
pub mod peak_list;
pub mod phase_tracker;

/// Level assigned to unoccupied peak slots, in dB
pub const SENTINEL_LEVEL_DB: f32 = -200.0;

/// Frequency assigned to unoccupied peak slots, in Hz
pub const SENTINEL_FREQUENCY_HZ: f32 = 0.0;

/// Upper level bound for peak admission, in dB
///
/// Bins at or above this level are never admitted to the peak list; the
/// detector works on the headroom below full scale
pub const PEAK_LEVEL_CEILING_DB: f32 = 0.0;

/// One refined spectral peak
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpectralPeak {
    /// Refined frequency in Hz
    pub frequency: f32,

    /// Level in dB relative to full scale
    pub level_db: f32,
}

impl SpectralPeak {
    /// The unoccupied-slot marker (frequency 0.0, level -200 dB)
    pub fn sentinel() -> Self {
        Self {
            frequency: SENTINEL_FREQUENCY_HZ,
            level_db: SENTINEL_LEVEL_DB,
        }
    }

    /// Whether this slot holds a detected peak rather than the sentinel
    pub fn is_detected(&self) -> bool {
        self.frequency > 0.0
    }
}
