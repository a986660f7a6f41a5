//! Per-bin phase state carried between analysis frames
//!
//! The only state the detector keeps between calls. Holds the previous
//! frame's phase for every bin, zero-initialised at creation and overwritten
//! in place on every scan, whether or not the bin qualifies as a peak.

/// Previous-frame phase per bin
#[derive(Debug, Clone)]
pub struct PhaseTracker {
    last_phase: Vec<f32>,
}

impl PhaseTracker {
    /// Create a tracker with all phases at zero
    ///
    /// # Arguments
    ///
    /// * `fft_size` - Transform length; the tracker holds one slot per index
    ///   up to `fft_size`, covering every half-spectrum bin
    pub fn new(fft_size: usize) -> Self {
        Self {
            last_phase: vec![0.0; fft_size],
        }
    }

    /// Transform length this tracker was sized for
    pub fn fft_size(&self) -> usize {
        self.last_phase.len()
    }

    /// Record the current phase for a bin and return the advance since the
    /// previous frame
    ///
    /// The stored phase is overwritten unconditionally. `bin` must be below
    /// `fft_size`.
    pub fn advance(&mut self, bin: usize, phase: f32) -> f32 {
        let delta = phase - self.last_phase[bin];
        self.last_phase[bin] = phase;
        delta
    }
}
