//! Configuration parameters for pitch detection

/// Default FFT size in samples (one analysis window)
pub const DEFAULT_FFT_SIZE: usize = 1024;

/// Default overlap factor (hop size = FFT size / overlap factor)
pub const DEFAULT_OVERLAP_FACTOR: usize = 4;

/// Default capacity of the spectral peak list
pub const DEFAULT_MAX_PEAKS: usize = 8;

/// Default highest harmonic ratio considered by the selector
pub const DEFAULT_MAX_HARMONIC: u32 = 5;

/// Default tolerance around an integer harmonic ratio
pub const DEFAULT_RATIO_TOLERANCE: f32 = 0.02;

/// Default frequency ceiling in Hz (estimates above it are reported as unpitched)
pub const DEFAULT_MAX_FREQUENCY_HZ: f32 = 5000.0;

/// Detector configuration parameters
#[derive(Debug, Clone)]
pub struct DetectorConfig {
    // Transform
    /// FFT size in samples (default: 1024)
    /// Must be even and divisible by `overlap_factor`
    pub fft_size: usize,

    /// Overlap factor between successive analysis windows (default: 4)
    /// The hop size is `fft_size / overlap_factor`
    pub overlap_factor: usize,

    // Peak extraction
    /// Capacity of the spectral peak list (default: 8)
    pub max_peaks: usize,

    // Harmonic selection
    /// Highest harmonic ratio the selector tests, down to 2 (default: 5)
    pub max_harmonic: u32,

    /// Tolerance around an integer harmonic ratio (default: 0.02)
    /// A peak pair qualifies when front/peak lies within `harmonic ± tolerance`
    pub ratio_tolerance: f32,

    // Post-filter
    /// Frequency ceiling in Hz (default: 5000.0)
    /// Estimates strictly above this are reported as 0.0 (no pitch)
    pub max_frequency_hz: f32,
}

impl DetectorConfig {
    /// Hop size in samples derived from the FFT size and overlap factor
    pub fn hop_size(&self) -> usize {
        self.fft_size / self.overlap_factor
    }
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            fft_size: DEFAULT_FFT_SIZE,
            overlap_factor: DEFAULT_OVERLAP_FACTOR,
            max_peaks: DEFAULT_MAX_PEAKS,
            max_harmonic: DEFAULT_MAX_HARMONIC,
            ratio_tolerance: DEFAULT_RATIO_TOLERANCE,
            max_frequency_hz: DEFAULT_MAX_FREQUENCY_HZ,
        }
    }
}
