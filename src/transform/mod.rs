//! Overlap-add spectral transform front end
//!
//! Converts successive hops of time-domain samples into spectral frames:
//! - Window generation (periodic Hann)
//! - Spectral frame container (magnitude + phase per bin)
//! - Phase vocoder analysis (sliding buffer + forward FFT)

pub mod phase_vocoder;
pub mod spectral_frame;
pub mod window;
