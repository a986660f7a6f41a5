//! Fixed-capacity spectral peak list
//!
//! Every slot is always populated, either with a detected peak or with the
//! sentinel. Admission compares a candidate against the front slot only, so
//! the list is ordered by insertion recency (each admitted peak was the
//! loudest seen so far in the scan), not globally sorted by level. Detected
//! peaks therefore occupy a contiguous prefix, strongest first, with the
//! sentinel filling the tail.

use crate::error::DetectionError;
use crate::features::peaks::{SpectralPeak, PEAK_LEVEL_CEILING_DB};

/// Fixed-capacity, front-insertion peak container
#[derive(Debug, Clone)]
pub struct PeakList {
    slots: Vec<SpectralPeak>,
}

impl PeakList {
    /// Create a list with every slot set to the sentinel
    ///
    /// # Arguments
    ///
    /// * `capacity` - Number of slots; must be non-zero
    ///
    /// # Errors
    ///
    /// Returns `DetectionError::InvalidInput` if `capacity` is zero
    pub fn new(capacity: usize) -> Result<Self, DetectionError> {
        if capacity == 0 {
            return Err(DetectionError::InvalidInput(
                "Peak list capacity must be non-zero".to_string(),
            ));
        }
        Ok(Self {
            slots: vec![SpectralPeak::sentinel(); capacity],
        })
    }

    /// Number of slots (constant for the lifetime of the list)
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// The front slot (most recently admitted peak, or the sentinel)
    pub fn front(&self) -> &SpectralPeak {
        &self.slots[0]
    }

    /// Slot at `index`, if within capacity
    pub fn get(&self, index: usize) -> Option<&SpectralPeak> {
        self.slots.get(index)
    }

    /// All slots in order, detected prefix first, sentinel tail after
    pub fn as_slice(&self) -> &[SpectralPeak] {
        &self.slots
    }

    /// The contiguous prefix of detected peaks
    pub fn detected(&self) -> impl Iterator<Item = &SpectralPeak> {
        self.slots.iter().take_while(|peak| peak.is_detected())
    }

    /// Admit a candidate if it qualifies
    ///
    /// A candidate is admitted when its frequency is positive, its level is
    /// below the admission ceiling (0 dB) and above the current front slot's
    /// level. Admission inserts at the front, shifting every slot down one
    /// and dropping the last.
    ///
    /// # Returns
    ///
    /// `true` if the candidate was admitted
    pub fn offer(&mut self, candidate: SpectralPeak) -> bool {
        let qualifies = candidate.frequency > 0.0
            && candidate.level_db > self.slots[0].level_db
            && candidate.level_db < PEAK_LEVEL_CEILING_DB;
        if !qualifies {
            return false;
        }

        let last = self.slots.len() - 1;
        self.slots.copy_within(..last, 1);
        self.slots[0] = candidate;
        true
    }
}
