//! Spectral frame container
//!
//! One analysis frame of the transform: magnitude and phase over the
//! canonical half spectrum (bin 0 through Nyquist inclusive). Frames are
//! produced by a transform and read-only to the detector; `from_parts` lets
//! an alternative transform implementation supply frames at the same
//! boundary.

use crate::error::DetectionError;

/// Magnitude and phase of one analysis frame
///
/// Holds `fft_size / 2 + 1` bins. Bin `k` covers center frequency
/// `k · sample_rate / fft_size`.
#[derive(Debug, Clone)]
pub struct SpectralFrame {
    pub(crate) magnitudes: Vec<f32>,
    pub(crate) phases: Vec<f32>,
    fft_size: usize,
}

impl SpectralFrame {
    /// Create a zeroed frame for the given FFT size
    ///
    /// # Arguments
    ///
    /// * `fft_size` - Transform length; must be even and non-zero
    ///
    /// # Errors
    ///
    /// Returns `DetectionError::InvalidInput` if `fft_size` is zero or odd
    pub fn new(fft_size: usize) -> Result<Self, DetectionError> {
        if fft_size == 0 {
            return Err(DetectionError::InvalidInput(
                "FFT size must be non-zero".to_string(),
            ));
        }
        if fft_size % 2 != 0 {
            return Err(DetectionError::InvalidInput(format!(
                "FFT size must be even, got {}",
                fft_size
            )));
        }

        let bins = fft_size / 2 + 1;
        Ok(Self {
            magnitudes: vec![0.0; bins],
            phases: vec![0.0; bins],
            fft_size,
        })
    }

    /// Build a frame from precomputed magnitude and phase arrays
    ///
    /// # Arguments
    ///
    /// * `magnitudes` - One magnitude per bin, `fft_size / 2 + 1` entries
    /// * `phases` - One phase (radians) per bin, same length
    /// * `fft_size` - Transform length the arrays were computed with
    ///
    /// # Errors
    ///
    /// Returns `DetectionError::InvalidInput` if `fft_size` is zero or odd,
    /// or if either array does not hold exactly `fft_size / 2 + 1` entries
    pub fn from_parts(
        magnitudes: Vec<f32>,
        phases: Vec<f32>,
        fft_size: usize,
    ) -> Result<Self, DetectionError> {
        let mut frame = Self::new(fft_size)?;
        let bins = frame.bins();

        if magnitudes.len() != bins {
            return Err(DetectionError::InvalidInput(format!(
                "Expected {} magnitude bins for FFT size {}, got {}",
                bins,
                fft_size,
                magnitudes.len()
            )));
        }
        if phases.len() != bins {
            return Err(DetectionError::InvalidInput(format!(
                "Expected {} phase bins for FFT size {}, got {}",
                bins,
                fft_size,
                phases.len()
            )));
        }

        frame.magnitudes = magnitudes;
        frame.phases = phases;
        Ok(frame)
    }

    /// Transform length this frame was computed with
    pub fn fft_size(&self) -> usize {
        self.fft_size
    }

    /// Number of bins (`fft_size / 2 + 1`)
    pub fn bins(&self) -> usize {
        self.magnitudes.len()
    }

    /// Magnitude per bin (linear, unnormalized FFT scale)
    pub fn magnitudes(&self) -> &[f32] {
        &self.magnitudes
    }

    /// Phase per bin in radians
    pub fn phases(&self) -> &[f32] {
        &self.phases
    }
}
