//! Harmonic selection
//!
//! Chooses the reported fundamental from the extracted peaks:
//! - Comb selector (near-integer ratio test with a loudness gate)
//! - Frequency post-filter (detection ceiling)

pub mod post_filter;
pub mod selector;

/// Lowest harmonic ratio the selector tests
pub const MIN_HARMONIC: u32 = 2;
