//! Harmonic comb selection
//!
//! The front of the peak list is the loudest refined peak, but with harmonic
//! material it is often an overtone of the actual fundamental. The selector
//! walks the remaining peaks looking for one the front divides by a
//! near-integer ratio; such a peak is taken as the fundamental instead.
//!
//! # Algorithm
//!
//! 1. Start with the front peak as the selection
//! 2. For each detected peak after the front, test harmonic ratios from the
//!    configured maximum down to 2: the pair qualifies when
//!    `front.frequency / peak.frequency` lies strictly inside
//!    `harmonic ± tolerance`
//! 3. A qualifying pair replaces the selection only when its harmonic ratio
//!    is higher than any found so far AND the front's level is below half
//!    the peak's level (both in dB, the halved-dB loudness gate)
//! 4. Return the selected peak's frequency
//!
//! The loudness gate operates on dB values directly, not linear amplitude;
//! with negative levels it admits a candidate only when the front is quieter
//! than half the candidate's dB figure. Ties on the harmonic ratio keep the
//! earliest qualifying peak.

use crate::error::DetectionError;
use crate::features::harmonic::MIN_HARMONIC;
use crate::features::peaks::peak_list::PeakList;

/// Pick the fundamental frequency from a peak list
///
/// # Arguments
///
/// * `peaks` - Peak list from the extraction scan
/// * `max_harmonic` - Highest harmonic ratio to test, at least 2
/// * `ratio_tolerance` - Width of the window around each integer ratio
///
/// # Returns
///
/// The selected frequency in Hz; `0.0` when the list holds no peaks
///
/// # Errors
///
/// Returns `DetectionError::InvalidInput` if `max_harmonic` is below 2 or
/// the tolerance is not a positive finite number
pub fn select_fundamental(
    peaks: &PeakList,
    max_harmonic: u32,
    ratio_tolerance: f32,
) -> Result<f32, DetectionError> {
    if max_harmonic < MIN_HARMONIC {
        return Err(DetectionError::InvalidInput(format!(
            "Max harmonic must be at least {}, got {}",
            MIN_HARMONIC, max_harmonic
        )));
    }
    if ratio_tolerance <= 0.0 || !ratio_tolerance.is_finite() {
        return Err(DetectionError::InvalidInput(format!(
            "Ratio tolerance must be positive and finite, got {}",
            ratio_tolerance
        )));
    }

    let front = *peaks.front();
    let mut selected = 0;
    let mut max_harmonic_found = 0;

    for index in 1..peaks.capacity() {
        let candidate = match peaks.get(index) {
            Some(peak) if peak.is_detected() => *peak,
            _ => break,
        };

        for harmonic in (MIN_HARMONIC..=max_harmonic).rev() {
            let ratio = front.frequency / candidate.frequency;
            let center = harmonic as f32;
            if ratio < center + ratio_tolerance
                && ratio > center - ratio_tolerance
                && harmonic > max_harmonic_found
                && front.level_db < candidate.level_db / 2.0
            {
                max_harmonic_found = harmonic;
                selected = index;
            }
        }
    }

    let frequency = peaks
        .get(selected)
        .map(|peak| peak.frequency)
        .unwrap_or(0.0);

    if selected != 0 {
        log::debug!(
            "Harmonic selector moved from {:.1} Hz to {:.1} Hz (ratio {})",
            front.frequency,
            frequency,
            max_harmonic_found
        );
    }

    Ok(frequency)
}
