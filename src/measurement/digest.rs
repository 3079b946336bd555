//! Content digest
//!
//! SHA-256 fingerprint over the size-relevant state of a measurement:
//! unit tag, both readings and both coordinates. Coordinates are hashed
//! in normalized form, so `38.70` and `38.7` digest alike.

use std::fmt;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::geo::Position;
use crate::measurement::noise::{canonical_bits, NoiseMeasurement};

/// A SHA-256 digest of a ledger payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContentDigest([u8; 32]);

impl ContentDigest {
    /// Digest a noise measurement.
    pub fn of(measurement: &NoiseMeasurement) -> Self {
        let mut hasher = Sha256::new();
        hasher.update([measurement.unit().tag()]);
        hasher.update(canonical_bits(measurement.noise_level()).to_be_bytes());
        hasher.update(canonical_bits(measurement.peak_or_base()).to_be_bytes());
        update_position(&mut hasher, measurement.position());

        let mut bytes = [0u8; 32];
        bytes.copy_from_slice(&hasher.finalize());
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

fn update_position(hasher: &mut Sha256, position: &Position) {
    hasher.update(position.latitude.normalize().to_string().as_bytes());
    hasher.update(b",");
    hasher.update(position.longitude.normalize().to_string().as_bytes());
}

impl fmt::Display for ContentDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in self.0 {
            write!(f, "{:02x}", byte)?;
        }
        Ok(())
    }
}
