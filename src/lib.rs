//! # Overtone DSP
//!
//! A fundamental-frequency estimator for streaming audio, built on
//! phase-vocoder spectral analysis and a harmonic-comb peak selector.
//!
//! ## Features
//!
//! - **Phase-difference refinement**: per-bin frequencies corrected by the
//!   frame-to-frame phase advance, resolving well below one bin width
//! - **Harmonic-comb selection**: near-integer ratio matching with a
//!   loudness gate, so overtone-dominated spectra still report the
//!   fundamental
//! - **Streaming operation**: one hop of samples in, one estimate out, with
//!   only the phase-reference buffer carried between calls
//!
//! ## Quick Start
//!
//! ```no_run
//! use overtone_dsp::{detect_pitch, DetectorConfig};
//!
//! // Load audio samples (mono, f32, normalized)
//! let samples: Vec<f32> = vec![]; // Your audio data
//! let sample_rate = 44100;
//!
//! // One estimate per hop; 0.0 means no pitch
//! let estimates = detect_pitch(&samples, sample_rate, DetectorConfig::default())?;
//!
//! for (hop, frequency) in estimates.iter().enumerate() {
//!     println!("hop {}: {:.1} Hz", hop, frequency);
//! }
//! # Ok::<(), overtone_dsp::DetectionError>(())
//! ```
//!
//! ## Architecture
//!
//! The detection pipeline follows this flow:
//!
//! ```text
//! Hop Input → Phase Vocoder → Peak Extraction → Harmonic Selection → Ceiling → Estimate
//! ```
//!
//! `detector::PitchDetector` drives the pipeline one hop at a time;
//! `detect_pitch` runs it over a whole buffer.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod detector;
pub mod error;
pub mod features;
pub mod transform;

// Re-export main types
pub use config::DetectorConfig;
pub use detector::PitchDetector;
pub use error::DetectionError;
pub use features::peaks::peak_list::PeakList;
pub use features::peaks::SpectralPeak;
pub use transform::phase_vocoder::PhaseVocoder;
pub use transform::spectral_frame::SpectralFrame;

/// Detect pitch over a whole buffer, one estimate per hop
///
/// Slices `samples` into hop-sized frames (the tail shorter than one hop is
/// dropped) and runs a single detector over them in order. Estimates are raw
/// per-hop values: no smoothing, gating, or continuity constraint is
/// applied, and the first few hops reflect the analysis window filling up.
///
/// # Arguments
///
/// * `samples` - Mono audio samples, normalized to [-1.0, 1.0]
/// * `sample_rate` - Sample rate in Hz (typically 44100 or 48000)
/// * `config` - Detector configuration parameters
///
/// # Returns
///
/// One frequency estimate in Hz per full hop of input, `0.0` where no pitch
/// was detected
///
/// # Errors
///
/// Returns `DetectionError::InvalidInput` if `samples` is empty or shorter
/// than one hop, or if the configuration is inconsistent
///
/// # Example
///
/// ```no_run
/// use overtone_dsp::{detect_pitch, DetectorConfig};
///
/// let samples = vec![0.0f32; 44100]; // 1 second of silence
/// let estimates = detect_pitch(&samples, 44100, DetectorConfig::default())?;
/// assert!(estimates.iter().all(|&f| f == 0.0));
/// # Ok::<(), overtone_dsp::DetectionError>(())
/// ```
pub fn detect_pitch(
    samples: &[f32],
    sample_rate: u32,
    config: DetectorConfig,
) -> Result<Vec<f32>, DetectionError> {
    log::debug!(
        "Starting pitch detection: {} samples at {} Hz",
        samples.len(),
        sample_rate
    );

    if samples.is_empty() {
        return Err(DetectionError::InvalidInput(
            "Empty audio samples".to_string(),
        ));
    }

    let mut detector = PitchDetector::new(sample_rate, config)?;
    let hop_size = detector.hop_size();

    if samples.len() < hop_size {
        return Err(DetectionError::InvalidInput(format!(
            "Need at least one hop of {} samples, got {}",
            hop_size,
            samples.len()
        )));
    }

    let tail = samples.len() % hop_size;
    if tail != 0 {
        log::warn!("Dropping {} trailing samples shorter than one hop", tail);
    }

    let mut estimates = Vec::with_capacity(samples.len() / hop_size);
    for frame in samples.chunks_exact(hop_size) {
        estimates.push(detector.detect(frame)?);
    }

    log::debug!(
        "Pitch detection produced {} estimates ({} voiced)",
        estimates.len(),
        estimates.iter().filter(|&&f| f > 0.0).count()
    );

    Ok(estimates)
}
