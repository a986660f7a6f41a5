//! Analysis window generation
//!
//! The phase vocoder uses a periodic Hann window. The periodic form (rather
//! than the symmetric form) keeps the frame-to-frame phase advance of a
//! stationary sinusoid exactly `2π · bin · hop / fft_size`, which is what the
//! phase-difference frequency refinement assumes.

use std::f32::consts::PI;

/// Generate a periodic Hann window of the given size
///
/// `w[i] = 0.5 - 0.5 · cos(2π · i / size)`
///
/// # Arguments
///
/// * `size` - Window length in samples
///
/// # Returns
///
/// Window coefficients, `w[0] = 0.0`, peak of 1.0 at `size / 2`
pub fn hann_window(size: usize) -> Vec<f32> {
    (0..size)
        .map(|i| 0.5 - 0.5 * (2.0 * PI * i as f32 / size as f32).cos())
        .collect()
}
