//! Pitch detector state and per-hop detection
//!
//! `PitchDetector` owns everything one detection stream needs: the phase
//! vocoder (sliding analysis buffer + FFT plan), the per-bin phase tracker
//! carried between calls, and the configuration. Each `detect` call consumes
//! exactly one hop of samples and returns one frequency estimate, `0.0`
//! meaning no pitch.
//!
//! Instances are independent: two detectors share no state and can be driven
//! from different threads as long as each instance stays on one thread.
//! Dropping a detector releases the FFT plan and buffers; there is no
//! explicit teardown call.

use crate::config::DetectorConfig;
use crate::error::DetectionError;
use crate::features::harmonic::post_filter::apply_frequency_ceiling;
use crate::features::harmonic::selector::select_fundamental;
use crate::features::harmonic::MIN_HARMONIC;
use crate::features::peaks::extractor::extract_peaks;
use crate::features::peaks::peak_list::PeakList;
use crate::features::peaks::phase_tracker::PhaseTracker;
use crate::transform::phase_vocoder::PhaseVocoder;

/// Streaming fundamental-frequency estimator
///
/// Feed hop-sized frames in order; the phase tracker carried across calls is
/// what lets the frequency refinement converge, so skipping or reordering
/// frames degrades the estimate until the tracker settles again.
pub struct PitchDetector {
    sample_rate: u32,
    config: DetectorConfig,
    vocoder: PhaseVocoder,
    tracker: PhaseTracker,
}

impl PitchDetector {
    /// Create a detector for the given sample rate and configuration
    ///
    /// # Arguments
    ///
    /// * `sample_rate` - Sample rate of the incoming audio in Hz
    /// * `config` - Detector configuration (see `DetectorConfig` defaults)
    ///
    /// # Errors
    ///
    /// Returns `DetectionError::InvalidInput` when the configuration is
    /// inconsistent: zero sample rate, zero or odd FFT size, zero overlap
    /// factor, FFT size not divisible by the overlap factor, zero peak
    /// capacity, harmonic range below 2, non-positive ratio tolerance, or a
    /// non-positive frequency ceiling
    pub fn new(sample_rate: u32, config: DetectorConfig) -> Result<Self, DetectionError> {
        if sample_rate == 0 {
            return Err(DetectionError::InvalidInput(
                "Invalid sample rate".to_string(),
            ));
        }
        if config.fft_size == 0 {
            return Err(DetectionError::InvalidInput(
                "FFT size must be non-zero".to_string(),
            ));
        }
        if config.fft_size % 2 != 0 {
            return Err(DetectionError::InvalidInput(format!(
                "FFT size must be even, got {}",
                config.fft_size
            )));
        }
        if config.overlap_factor == 0 {
            return Err(DetectionError::InvalidInput(
                "Overlap factor must be non-zero".to_string(),
            ));
        }
        if config.fft_size % config.overlap_factor != 0 {
            return Err(DetectionError::InvalidInput(format!(
                "FFT size {} is not divisible by overlap factor {}",
                config.fft_size, config.overlap_factor
            )));
        }
        if config.max_peaks == 0 {
            return Err(DetectionError::InvalidInput(
                "Peak list capacity must be non-zero".to_string(),
            ));
        }
        if config.max_harmonic < MIN_HARMONIC {
            return Err(DetectionError::InvalidInput(format!(
                "Max harmonic must be at least {}, got {}",
                MIN_HARMONIC, config.max_harmonic
            )));
        }
        if config.ratio_tolerance <= 0.0 || !config.ratio_tolerance.is_finite() {
            return Err(DetectionError::InvalidInput(format!(
                "Ratio tolerance must be positive and finite, got {}",
                config.ratio_tolerance
            )));
        }
        if config.max_frequency_hz <= 0.0 || config.max_frequency_hz.is_nan() {
            return Err(DetectionError::InvalidInput(format!(
                "Frequency ceiling must be positive, got {}",
                config.max_frequency_hz
            )));
        }

        let hop_size = config.hop_size();
        let vocoder = PhaseVocoder::new(config.fft_size, hop_size)?;
        let tracker = PhaseTracker::new(config.fft_size);

        log::debug!(
            "Pitch detector ready: fft_size={}, hop_size={}, sample_rate={}",
            config.fft_size,
            hop_size,
            sample_rate
        );

        Ok(Self {
            sample_rate,
            config,
            vocoder,
            tracker,
        })
    }

    /// Sample rate this detector was created for
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Analysis window length in samples
    pub fn fft_size(&self) -> usize {
        self.config.fft_size
    }

    /// Samples consumed per `detect` call
    pub fn hop_size(&self) -> usize {
        self.config.hop_size()
    }

    /// Active configuration
    pub fn config(&self) -> &DetectorConfig {
        &self.config
    }

    /// Estimate the fundamental frequency from one hop of samples
    ///
    /// # Arguments
    ///
    /// * `frame` - Exactly `hop_size()` mono samples, in stream order
    ///
    /// # Returns
    ///
    /// Estimated fundamental in Hz, `0.0` when no pitch was detected
    ///
    /// # Errors
    ///
    /// Returns `DetectionError::InvalidInput` if `frame` is not exactly one
    /// hop long
    pub fn detect(&mut self, frame: &[f32]) -> Result<f32, DetectionError> {
        let (frequency, _) = self.detect_with_peaks(frame)?;
        Ok(frequency)
    }

    /// Estimate the fundamental and return the peak list alongside it
    ///
    /// Same contract as `detect`; the returned list is the scan result the
    /// selection was made from, useful for diagnostics.
    ///
    /// # Errors
    ///
    /// Returns `DetectionError::InvalidInput` if `frame` is not exactly one
    /// hop long
    pub fn detect_with_peaks(
        &mut self,
        frame: &[f32],
    ) -> Result<(f32, PeakList), DetectionError> {
        let hop_size = self.config.hop_size();
        if frame.len() != hop_size {
            return Err(DetectionError::InvalidInput(format!(
                "Expected one hop of {} samples, got {}",
                hop_size,
                frame.len()
            )));
        }

        let spectrum = self.vocoder.process(frame)?;
        let peaks = extract_peaks(
            spectrum,
            &mut self.tracker,
            self.sample_rate,
            hop_size,
            self.config.max_peaks,
        )?;

        let selected = select_fundamental(
            &peaks,
            self.config.max_harmonic,
            self.config.ratio_tolerance,
        )?;
        let frequency = apply_frequency_ceiling(selected, self.config.max_frequency_hz);

        Ok((frequency, peaks))
    }
}
