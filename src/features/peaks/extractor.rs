//! Spectral peak extraction with phase-difference frequency refinement
//!
//! Scans every bin of a spectral frame and refines the bin's nominal center
//! frequency by the phase advance observed since the previous frame. A bin
//! whose content sits between bin centers shows a residual phase advance
//! proportional to the offset, so the refined frequency locks onto the
//! underlying partial rather than the bin grid.
//!
//! # Algorithm
//!
//! For each bin `k` of the half spectrum:
//! 1. Level: `20 · log10(2 · magnitude[k] / fft_size)` (dB re full scale)
//! 2. Phase advance since the previous frame (stored unconditionally)
//! 3. Subtract the advance a bin-centered component would show,
//!    `k · 2π · hop / fft_size`, and wrap into `(-π, π]`
//! 4. Deviation in bins: `(fft_size / hop) · wrapped / 2π`
//! 5. Refined frequency: `(k + deviation) · sample_rate / fft_size`
//! 6. Offer `(frequency, level)` to the fixed-capacity peak list
//!
//! # Reference
//!
//! Laroche, J., & Dolson, M. (1999). Improved Phase Vocoder Time-Scale
//! Modification of Audio. *IEEE Transactions on Speech and Audio
//! Processing*, 7(3), 323-332.

use std::f32::consts::PI;

use crate::error::DetectionError;
use crate::features::peaks::peak_list::PeakList;
use crate::features::peaks::phase_tracker::PhaseTracker;
use crate::features::peaks::SpectralPeak;
use crate::transform::spectral_frame::SpectralFrame;

/// Wrap a phase difference into the principal interval `(-π, π]`
pub fn wrap_phase(phase: f32) -> f32 {
    phase + 2.0 * PI * (1.0 + (-(phase + PI) / (2.0 * PI)).floor())
}

/// Scan a spectral frame for peaks with refined frequencies
///
/// The tracker's stored phase is overwritten for every bin, whether or not
/// the bin is admitted as a peak; carrying the tracker across successive
/// frames is what makes the refinement converge.
///
/// # Arguments
///
/// * `frame` - Spectral frame for the current window position
/// * `tracker` - Per-bin phase state, sized for the same FFT length
/// * `sample_rate` - Sample rate in Hz
/// * `hop_size` - Samples per hop; must divide the FFT size exactly
/// * `max_peaks` - Capacity of the returned peak list
///
/// # Returns
///
/// A freshly built `PeakList`; detected peaks form the prefix, strongest
/// first
///
/// # Errors
///
/// Returns `DetectionError::InvalidInput` if the tracker does not match the
/// frame, the hop size is zero or does not divide the FFT size, the sample
/// rate is zero, or `max_peaks` is zero
pub fn extract_peaks(
    frame: &SpectralFrame,
    tracker: &mut PhaseTracker,
    sample_rate: u32,
    hop_size: usize,
    max_peaks: usize,
) -> Result<PeakList, DetectionError> {
    let fft_size = frame.fft_size();

    if tracker.fft_size() != fft_size {
        return Err(DetectionError::InvalidInput(format!(
            "Phase tracker sized for FFT {} but frame has FFT {}",
            tracker.fft_size(),
            fft_size
        )));
    }
    if hop_size == 0 {
        return Err(DetectionError::InvalidInput(
            "Hop size must be non-zero".to_string(),
        ));
    }
    if fft_size % hop_size != 0 {
        return Err(DetectionError::InvalidInput(format!(
            "Hop size {} does not divide FFT size {}",
            hop_size, fft_size
        )));
    }
    if sample_rate == 0 {
        return Err(DetectionError::InvalidInput(
            "Invalid sample rate".to_string(),
        ));
    }

    let freq_per_bin = sample_rate as f32 / fft_size as f32;
    let expected_phase_per_bin = 2.0 * PI * hop_size as f32 / fft_size as f32;
    let overlap_factor = (fft_size / hop_size) as f32;

    let mut peaks = PeakList::new(max_peaks)?;

    for (bin, (&magnitude, &phase)) in frame
        .magnitudes()
        .iter()
        .zip(frame.phases())
        .enumerate()
    {
        // Step 1: level relative to full scale
        let level_db = 20.0 * (2.0 * magnitude / fft_size as f32).log10();

        // Steps 2-3: residual phase advance for this bin
        let mut delta = tracker.advance(bin, phase);
        delta -= bin as f32 * expected_phase_per_bin;
        let wrapped = wrap_phase(delta);

        // Steps 4-5: deviation in bins, then refined frequency
        let deviation = overlap_factor * wrapped / (2.0 * PI);
        let frequency = bin as f32 * freq_per_bin + deviation * freq_per_bin;

        // Step 6
        peaks.offer(SpectralPeak {
            frequency,
            level_db,
        });
    }

    log::debug!(
        "Peak scan over {} bins found {} peaks (front: {:.1} Hz at {:.1} dB)",
        frame.bins(),
        peaks.detected().count(),
        peaks.front().frequency,
        peaks.front().level_db
    );

    Ok(peaks)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Magnitude that produces the given level for the given FFT size
    fn magnitude_for_db(fft_size: usize, level_db: f32) -> f32 {
        fft_size as f32 / 2.0 * 10f32.powf(level_db / 20.0)
    }

    /// Frame with zero phases and magnitude spikes at the given bins
    fn frame_with_spikes(fft_size: usize, spikes: &[(usize, f32)]) -> SpectralFrame {
        let bins = fft_size / 2 + 1;
        let mut magnitudes = vec![0.0; bins];
        for &(bin, level_db) in spikes {
            magnitudes[bin] = magnitude_for_db(fft_size, level_db);
        }
        SpectralFrame::from_parts(magnitudes, vec![0.0; bins], fft_size).unwrap()
    }

    #[test]
    fn test_wrap_phase_principal_interval() {
        assert!((wrap_phase(0.0)).abs() < 1e-6);
        assert!((wrap_phase(PI) - PI).abs() < 1e-6);
        assert!((wrap_phase(-PI) - PI).abs() < 1e-6, "-π wraps to +π");
        assert!((wrap_phase(2.5 * PI) - 0.5 * PI).abs() < 1e-6);
        assert!((wrap_phase(-2.5 * PI) + 0.5 * PI).abs() < 1e-6);
        assert!((wrap_phase(6.0 * PI)).abs() < 1e-5);
    }

    #[test]
    fn test_silent_frame_yields_no_peaks() {
        let frame = frame_with_spikes(256, &[]);
        let mut tracker = PhaseTracker::new(256);
        let peaks = extract_peaks(&frame, &mut tracker, 25600, 64, 8).unwrap();
        assert_eq!(peaks.detected().count(), 0);
        assert_eq!(peaks.front().frequency, 0.0);
    }

    #[test]
    fn test_bin_centered_peak_reports_center_frequency() {
        // Bin 8 with zero phase drift at overlap 4: the expected advance
        // 8·π/2 wraps to zero, so the refined frequency is the bin center.
        // 25600 Hz / 256 bins = 100 Hz per bin.
        let frame = frame_with_spikes(256, &[(8, -20.0)]);
        let mut tracker = PhaseTracker::new(256);
        let peaks = extract_peaks(&frame, &mut tracker, 25600, 64, 8).unwrap();

        let front = peaks.front();
        assert!(
            (front.frequency - 800.0).abs() < 1e-2,
            "Expected 800 Hz, got {}",
            front.frequency
        );
        assert!(
            (front.level_db + 20.0).abs() < 1e-3,
            "Expected -20 dB, got {}",
            front.level_db
        );
    }

    #[test]
    fn test_phase_offset_shifts_refined_frequency() {
        // A +0.4π phase surplus at bin 8 with overlap 4 is 0.8 bins sharp:
        // (8 + 0.8) · 100 Hz = 880 Hz.
        let fft_size = 256;
        let bins = fft_size / 2 + 1;
        let mut magnitudes = vec![0.0; bins];
        magnitudes[8] = magnitude_for_db(fft_size, -20.0);
        let mut phases = vec![0.0; bins];
        phases[8] = 0.4 * PI;
        let frame = SpectralFrame::from_parts(magnitudes, phases, fft_size).unwrap();

        let mut tracker = PhaseTracker::new(fft_size);
        let peaks = extract_peaks(&frame, &mut tracker, 25600, 64, 8).unwrap();

        assert!(
            (peaks.front().frequency - 880.0).abs() < 0.1,
            "Expected 880 Hz, got {}",
            peaks.front().frequency
        );
    }

    #[test]
    fn test_tracker_updated_for_non_peak_bins() {
        // Bin 5 never qualifies (silent), but its phase must still be stored
        let fft_size = 256;
        let bins = fft_size / 2 + 1;
        let magnitudes = vec![0.0; bins];
        let phases = vec![0.3; bins];
        let frame = SpectralFrame::from_parts(magnitudes, phases, fft_size).unwrap();

        let mut tracker = PhaseTracker::new(fft_size);
        extract_peaks(&frame, &mut tracker, 25600, 64, 8).unwrap();

        assert!(
            tracker.advance(5, 0.3).abs() < 1e-6,
            "Second visit to bin 5 should see no phase change"
        );
    }

    #[test]
    fn test_peak_capacity_is_respected() {
        // Ten ascending spikes on multiples of 4 (zero wrapped residual, so
        // every refined frequency is positive); capacity 4 keeps the last 4
        let spikes: Vec<(usize, f32)> = (1..=10).map(|i| (4 * i, -60.0 + 4.0 * i as f32)).collect();
        let frame = frame_with_spikes(256, &spikes);
        let mut tracker = PhaseTracker::new(256);
        let peaks = extract_peaks(&frame, &mut tracker, 25600, 64, 4).unwrap();

        assert_eq!(peaks.capacity(), 4);
        assert_eq!(peaks.detected().count(), 4);
        assert!(
            (peaks.front().frequency - 4000.0).abs() < 1e-2,
            "Front should be the loudest spike at bin 40"
        );
        assert!((peaks.get(1).unwrap().frequency - 3600.0).abs() < 1e-2);
    }

    #[test]
    fn test_mismatched_tracker_rejected() {
        let frame = frame_with_spikes(256, &[]);
        let mut tracker = PhaseTracker::new(128);
        assert!(extract_peaks(&frame, &mut tracker, 25600, 64, 8).is_err());
    }

    #[test]
    fn test_invalid_scan_parameters_rejected() {
        let frame = frame_with_spikes(256, &[]);
        let mut tracker = PhaseTracker::new(256);
        assert!(extract_peaks(&frame, &mut tracker, 25600, 0, 8).is_err());
        assert!(
            extract_peaks(&frame, &mut tracker, 25600, 100, 8).is_err(),
            "Hop must divide the FFT size"
        );
        assert!(extract_peaks(&frame, &mut tracker, 0, 64, 8).is_err());
        assert!(extract_peaks(&frame, &mut tracker, 25600, 64, 0).is_err());
    }
}
