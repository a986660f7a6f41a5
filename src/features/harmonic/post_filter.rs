//! Frequency post-filter
//!
//! Final range gate on the selected fundamental. Estimates strictly above
//! the ceiling are reported as unpitched (0.0); the ceiling itself passes.

/// Zero out estimates above the detection ceiling
///
/// # Arguments
///
/// * `frequency` - Selected fundamental in Hz (0.0 for no pitch)
/// * `ceiling_hz` - Highest reportable frequency
///
/// # Returns
///
/// `frequency` unchanged when at or below the ceiling, otherwise `0.0`
pub fn apply_frequency_ceiling(frequency: f32, ceiling_hz: f32) -> f32 {
    if frequency > ceiling_hz {
        log::debug!(
            "Estimate {:.1} Hz above ceiling {:.1} Hz, reporting no pitch",
            frequency,
            ceiling_hz
        );
        0.0
    } else {
        frequency
    }
}
