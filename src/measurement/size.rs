//! Payload size estimation
//!
//! The ledger accounts for the payload each record adds. Estimates are
//! the width of the raw fields, not of any particular encoding.

use crate::geo::Position;
use crate::measurement::noise::NoiseMeasurement;

/// Bytes used by one decimal coordinate (128-bit fixed representation).
pub const DECIMAL_SIZE: usize = 16;

/// Bytes used by one floating-point reading.
pub const READING_SIZE: usize = std::mem::size_of::<f64>();

/// Bytes used by the unit tag.
pub const UNIT_TAG_SIZE: usize = 1;

/// Capability of reporting an approximate serialized payload size.
pub trait SizeEstimate {
    /// Approximate size in bytes.
    fn approximate_size(&self) -> usize;
}

impl SizeEstimate for Position {
    fn approximate_size(&self) -> usize {
        2 * DECIMAL_SIZE
    }
}

impl SizeEstimate for NoiseMeasurement {
    // The secondary reading is stored under both units.
    fn approximate_size(&self) -> usize {
        2 * READING_SIZE + UNIT_TAG_SIZE + self.position().approximate_size()
    }
}
