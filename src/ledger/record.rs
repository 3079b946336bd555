//! Stored noise record
//!
//! Pairs a measurement with the identity the ledger assigns when the
//! measurement is admitted. Equality covers both parts, so two records
//! with the same readings but different identities are different records.

use std::fmt;
use std::hash::{Hash, Hasher};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{GeonoiseError, Result};
use crate::measurement::{ContentDigest, NoiseMeasurement, SizeEstimate};

/// Surrogate identity assigned by the ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RecordId(pub u64);

impl RecordId {
    pub const fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A noise measurement together with its (optional) storage identity.
#[derive(Debug, Clone)]
pub struct NoiseRecord {
    id: Option<RecordId>,
    measurement: NoiseMeasurement,
    admitted_at: Option<DateTime<Utc>>,
}

impl NoiseRecord {
    /// Wrap a measurement that has not been stored yet.
    pub fn new(measurement: NoiseMeasurement) -> Self {
        Self {
            id: None,
            measurement,
            admitted_at: None,
        }
    }

    /// Rebuild a record that was already stored.
    pub fn with_id(
        id: RecordId,
        measurement: NoiseMeasurement,
        admitted_at: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            id: Some(id),
            measurement,
            admitted_at,
        }
    }

    /// Assign the storage identity. Happens once; a second call fails and
    /// leaves the record untouched.
    pub fn assign_id(&mut self, id: RecordId, admitted_at: DateTime<Utc>) -> Result<()> {
        if let Some(existing) = self.id {
            return Err(GeonoiseError::IdentityAlreadyAssigned {
                existing: existing.value(),
            });
        }
        self.id = Some(id);
        self.admitted_at = Some(admitted_at);
        Ok(())
    }

    pub fn id(&self) -> Option<RecordId> {
        self.id
    }

    pub fn is_persisted(&self) -> bool {
        self.id.is_some()
    }

    pub fn measurement(&self) -> &NoiseMeasurement {
        &self.measurement
    }

    /// When the ledger admitted this record.
    pub fn admitted_at(&self) -> Option<DateTime<Utc>> {
        self.admitted_at
    }

    pub fn digest(&self) -> ContentDigest {
        ContentDigest::of(&self.measurement)
    }
}

impl SizeEstimate for NoiseRecord {
    fn approximate_size(&self) -> usize {
        std::mem::size_of::<u64>() + self.measurement.approximate_size()
    }
}

// admitted_at is bookkeeping and stays out of equality.
impl PartialEq for NoiseRecord {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id && self.measurement == other.measurement
    }
}

impl Eq for NoiseRecord {}

impl Hash for NoiseRecord {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
        self.measurement.hash(state);
    }
}

impl fmt::Display for NoiseRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.id {
            Some(id) => write!(f, "#{} {}", id, self.measurement),
            None => write!(f, "#- {}", self.measurement),
        }
    }
}
