//! Phase vocoder analysis
//!
//! Overlap-add spectral analysis front end. Keeps a sliding buffer of the
//! most recent `fft_size` input samples; each call shifts the buffer left by
//! one hop, appends the new hop, applies a periodic Hann window and runs a
//! forward FFT, yielding one `SpectralFrame` of magnitude and phase over the
//! half spectrum.
//!
//! # Algorithm
//!
//! 1. Slide analysis buffer left by `hop_size`, append the new input hop
//! 2. Multiply by the Hann window into the complex FFT buffer
//! 3. Forward FFT (plan created once at construction, reused per call)
//! 4. Store `|X[k]|` and `arg(X[k])` for bins `0..=fft_size/2`
//!
//! # Reference
//!
//! Dolson, M. (1986). The Phase Vocoder: A Tutorial.
//! *Computer Music Journal*, 10(4), 14-27.

use std::sync::Arc;

use rustfft::num_complex::Complex;
use rustfft::{Fft, FftPlanner};

use crate::error::DetectionError;
use crate::transform::spectral_frame::SpectralFrame;
use crate::transform::window::hann_window;

/// Sliding-window spectral analyzer
///
/// One instance per audio channel. Construction plans the FFT; `process`
/// consumes exactly one hop of samples per call and returns a borrowed view
/// of the internal spectral frame, valid until the next call.
pub struct PhaseVocoder {
    fft_size: usize,
    hop_size: usize,
    window: Vec<f32>,
    analysis_buffer: Vec<f32>,
    fft_buffer: Vec<Complex<f32>>,
    fft: Arc<dyn Fft<f32>>,
    frame: SpectralFrame,
}

impl PhaseVocoder {
    /// Create an analyzer for the given FFT size and hop size
    ///
    /// # Arguments
    ///
    /// * `fft_size` - Analysis window length; must be even and non-zero
    /// * `hop_size` - New samples consumed per call; must be in `1..=fft_size`
    ///
    /// # Errors
    ///
    /// Returns `DetectionError::InvalidInput` if the sizes are inconsistent
    pub fn new(fft_size: usize, hop_size: usize) -> Result<Self, DetectionError> {
        let frame = SpectralFrame::new(fft_size)?;

        if hop_size == 0 {
            return Err(DetectionError::InvalidInput(
                "Hop size must be non-zero".to_string(),
            ));
        }
        if hop_size > fft_size {
            return Err(DetectionError::InvalidInput(format!(
                "Hop size {} exceeds FFT size {}",
                hop_size, fft_size
            )));
        }

        let mut planner = FftPlanner::new();
        let fft = planner.plan_fft_forward(fft_size);

        log::debug!(
            "Phase vocoder ready: fft_size={}, hop_size={}, {} bins",
            fft_size,
            hop_size,
            frame.bins()
        );

        Ok(Self {
            fft_size,
            hop_size,
            window: hann_window(fft_size),
            analysis_buffer: vec![0.0; fft_size],
            fft_buffer: vec![Complex::new(0.0, 0.0); fft_size],
            fft,
            frame,
        })
    }

    /// Analysis window length in samples
    pub fn fft_size(&self) -> usize {
        self.fft_size
    }

    /// Samples consumed per call
    pub fn hop_size(&self) -> usize {
        self.hop_size
    }

    /// Analyze one hop of input samples
    ///
    /// # Arguments
    ///
    /// * `input` - Exactly `hop_size` mono samples
    ///
    /// # Returns
    ///
    /// The spectral frame for the current window position, borrowed from the
    /// analyzer and overwritten by the next call
    ///
    /// # Errors
    ///
    /// Returns `DetectionError::InvalidInput` if `input` is not exactly one
    /// hop long
    pub fn process(&mut self, input: &[f32]) -> Result<&SpectralFrame, DetectionError> {
        if input.len() != self.hop_size {
            return Err(DetectionError::InvalidInput(format!(
                "Expected {} samples per hop, got {}",
                self.hop_size,
                input.len()
            )));
        }

        // Step 1: Slide the analysis buffer by one hop
        let keep = self.fft_size - self.hop_size;
        self.analysis_buffer.copy_within(self.hop_size.., 0);
        self.analysis_buffer[keep..].copy_from_slice(input);

        // Step 2: Window into the complex buffer
        for ((out, &sample), &coeff) in self
            .fft_buffer
            .iter_mut()
            .zip(&self.analysis_buffer)
            .zip(&self.window)
        {
            *out = Complex::new(sample * coeff, 0.0);
        }

        // Step 3: Forward FFT in place
        self.fft.process(&mut self.fft_buffer);

        // Step 4: Magnitude and phase for the half spectrum
        let bins = self.frame.bins();
        for ((magnitude, phase), value) in self
            .frame
            .magnitudes
            .iter_mut()
            .zip(self.frame.phases.iter_mut())
            .zip(&self.fft_buffer[..bins])
        {
            *magnitude = value.norm();
            *phase = value.arg();
        }

        Ok(&self.frame)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    /// Generate a phase-continuous sinusoid spanning `hops` hops
    fn generate_sine(cycles_per_window: f32, fft_size: usize, hop_size: usize, hops: usize) -> Vec<f32> {
        let omega = 2.0 * PI * cycles_per_window / fft_size as f32;
        (0..hop_size * hops).map(|t| (omega * t as f32).cos()).collect()
    }

    fn wrap_to_pi(mut delta: f32) -> f32 {
        while delta > PI {
            delta -= 2.0 * PI;
        }
        while delta <= -PI {
            delta += 2.0 * PI;
        }
        delta
    }

    #[test]
    fn test_new_rejects_inconsistent_sizes() {
        assert!(PhaseVocoder::new(0, 64).is_err());
        assert!(PhaseVocoder::new(255, 64).is_err(), "Odd FFT size");
        assert!(PhaseVocoder::new(256, 0).is_err());
        assert!(PhaseVocoder::new(256, 512).is_err(), "Hop beyond window");
        assert!(PhaseVocoder::new(256, 64).is_ok());
    }

    #[test]
    fn test_process_rejects_wrong_hop_length() {
        let mut vocoder = PhaseVocoder::new(256, 64).unwrap();
        assert!(vocoder.process(&[0.0; 63]).is_err());
        assert!(vocoder.process(&[0.0; 65]).is_err());
        assert!(vocoder.process(&[0.0; 64]).is_ok());
    }

    #[test]
    fn test_frame_has_half_spectrum_bins() {
        let mut vocoder = PhaseVocoder::new(256, 64).unwrap();
        assert_eq!(vocoder.fft_size(), 256);
        assert_eq!(vocoder.hop_size(), 64);
        let frame = vocoder.process(&[0.0; 64]).unwrap();
        assert_eq!(frame.bins(), 129);
        assert_eq!(frame.fft_size(), 256);
    }

    #[test]
    fn test_dc_input_concentrates_in_lowest_bins() {
        // A constant times the Hann window transforms to bins 0 and 1 only:
        // |X[0]| = N/2, |X[1]| = N/4, the rest vanish.
        let fft_size = 256;
        let hop_size = 64;
        let mut vocoder = PhaseVocoder::new(fft_size, hop_size).unwrap();

        let input = vec![1.0; hop_size];
        let mut last = (0.0, 0.0, 0.0);
        for _ in 0..(fft_size / hop_size) {
            let frame = vocoder.process(&input).unwrap();
            last = (
                frame.magnitudes()[0],
                frame.magnitudes()[1],
                frame.magnitudes()[2],
            );
        }

        assert!(
            (last.0 - 128.0).abs() < 0.1,
            "Expected |X[0]| = 128, got {}",
            last.0
        );
        assert!(
            (last.1 - 64.0).abs() < 0.1,
            "Expected |X[1]| = 64, got {}",
            last.1
        );
        assert!(last.2 < 0.1, "Expected |X[2]| near zero, got {}", last.2);
    }

    #[test]
    fn test_sine_at_bin_center_peaks_at_that_bin() {
        let fft_size = 256;
        let hop_size = 64;
        let mut vocoder = PhaseVocoder::new(fft_size, hop_size).unwrap();

        let signal = generate_sine(8.0, fft_size, hop_size, 8);
        let mut peak_bin = 0;
        let mut peak_magnitude = 0.0;
        for hop in signal.chunks_exact(hop_size) {
            let frame = vocoder.process(hop).unwrap();
            let (bin, magnitude) = frame
                .magnitudes()
                .iter()
                .enumerate()
                .max_by(|a, b| a.1.partial_cmp(b.1).unwrap())
                .unwrap();
            peak_bin = bin;
            peak_magnitude = *magnitude;
        }

        assert_eq!(peak_bin, 8, "Spectral peak should sit at bin 8");
        // Hann-windowed unit sinusoid peaks at N/4
        assert!(
            (peak_magnitude - 64.0).abs() < 0.5,
            "Expected |X[8]| near 64, got {}",
            peak_magnitude
        );
    }

    #[test]
    fn test_phase_advances_by_hop_times_frequency() {
        // For a stationary sinusoid at bin k, consecutive frames differ in
        // phase by 2π·k·hop/fft_size (mod 2π). Bin 9 with hop = N/4 gives
        // 2π·2.25, i.e. π/2 after wrapping.
        let fft_size = 256;
        let hop_size = 64;
        let bin = 9;
        let mut vocoder = PhaseVocoder::new(fft_size, hop_size).unwrap();

        let signal = generate_sine(bin as f32, fft_size, hop_size, 8);
        let mut phases = Vec::new();
        for hop in signal.chunks_exact(hop_size) {
            let frame = vocoder.process(hop).unwrap();
            phases.push(frame.phases()[bin]);
        }

        // Skip the fill-in period, then check the last few advances
        for pair in phases[5..].windows(2) {
            let advance = wrap_to_pi(pair[1] - pair[0]);
            assert!(
                (advance - PI / 2.0).abs() < 1e-2,
                "Expected phase advance π/2, got {}",
                advance
            );
        }
    }
}
