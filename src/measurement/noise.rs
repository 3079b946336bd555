//! Ambient Noise Measurement
//!
//! A noise observation captured at a geographic position. The reading is
//! a tagged union, so a record always carries exactly one unit and the
//! meaning of both numbers follows from it:
//!
//! | unit    | `noise_level()`         | `peak_or_base()`       |
//! |---------|-------------------------|------------------------|
//! | `RMS`   | RMS of the PCM signal   | peak of the PCM signal |
//! | `DBSPL` | dB relative to SPL base | always `0`             |
//!
//! No range checks are performed. The `[-1, 1]` domain for PCM amplitudes
//! is documented, not enforced, and NaN or infinite readings are stored
//! as given.

use std::fmt;
use std::hash::{Hash, Hasher};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::geo::Position;
use crate::measurement::level::rms_to_dbfs;
use crate::measurement::unit::NoiseUnit;

/// The unit-dependent part of a noise measurement.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(tag = "unit")]
pub enum NoiseReading {
    /// PCM amplitude convention.
    #[serde(rename = "RMS")]
    Rms {
        #[serde(with = "crate::measurement::lenient_f64")]
        rms: f64,
        #[serde(with = "crate::measurement::lenient_f64")]
        peak: f64,
    },

    /// Relative decibel-SPL convention.
    #[serde(rename = "DBSPL")]
    DbSpl {
        #[serde(with = "crate::measurement::lenient_f64")]
        level: f64,
    },
}

impl NoiseReading {
    /// Unit tag implied by the variant.
    pub const fn unit(&self) -> NoiseUnit {
        match self {
            NoiseReading::Rms { .. } => NoiseUnit::Rms,
            NoiseReading::DbSpl { .. } => NoiseUnit::DbSpl,
        }
    }

    /// RMS amplitude or dB level.
    pub fn primary(&self) -> f64 {
        match *self {
            NoiseReading::Rms { rms, .. } => rms,
            NoiseReading::DbSpl { level } => level,
        }
    }

    /// Peak amplitude, or `0` under `DBSPL`.
    pub fn secondary(&self) -> f64 {
        match *self {
            NoiseReading::Rms { peak, .. } => peak,
            NoiseReading::DbSpl { .. } => 0.0,
        }
    }
}

// Bitwise comparison: every NaN equals every other NaN, 0.0 and -0.0 differ.
pub(crate) fn canonical_bits(value: f64) -> u64 {
    if value.is_nan() {
        f64::NAN.to_bits()
    } else {
        value.to_bits()
    }
}

impl PartialEq for NoiseReading {
    fn eq(&self, other: &Self) -> bool {
        self.unit() == other.unit()
            && canonical_bits(self.primary()) == canonical_bits(other.primary())
            && canonical_bits(self.secondary()) == canonical_bits(other.secondary())
    }
}

impl Eq for NoiseReading {}

impl Hash for NoiseReading {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.unit().hash(state);
        canonical_bits(self.primary()).hash(state);
        canonical_bits(self.secondary()).hash(state);
    }
}

/// Ambient noise level measured at a geographic position.
///
/// Immutable once built. Equality and hashing cover the unit and the bit
/// patterns of both readings; the position is carried along but does not
/// take part in comparisons. Storage identity is layered on top by
/// [`NoiseRecord`](crate::ledger::NoiseRecord).
///
/// # Example
/// ```
/// use geonoise::measurement::{NoiseMeasurement, NoiseUnit};
/// use rust_decimal::Decimal;
///
/// let m = NoiseMeasurement::from_rms_peak(
///     0.42,
///     0.95,
///     Decimal::new(387, 1),
///     Decimal::new(-91, 1),
/// );
/// assert_eq!(m.unit(), NoiseUnit::Rms);
/// assert_eq!(m.noise_level(), 0.42);
/// assert_eq!(m.peak_or_base(), 0.95);
/// ```
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct NoiseMeasurement {
    position: Position,
    reading: NoiseReading,
}

impl NoiseMeasurement {
    /// Build a measurement in the `RMS` convention.
    ///
    /// # Arguments
    /// * `rms` - RMS amplitude of the PCM signal, nominally in [-1, 1]
    /// * `peak` - Peak amplitude of the PCM signal
    /// * `lat`, `lng` - Position, passed through unmodified
    pub fn from_rms_peak(rms: f64, peak: f64, lat: Decimal, lng: Decimal) -> Self {
        Self::new(Position::new(lat, lng), NoiseReading::Rms { rms, peak })
    }

    /// Build a measurement in the `DBSPL` convention.
    ///
    /// The secondary reading is fixed at `0`.
    pub fn from_relative_db(level: f64, lat: Decimal, lng: Decimal) -> Self {
        Self::new(Position::new(lat, lng), NoiseReading::DbSpl { level })
    }

    /// Build a measurement from an already assembled position and reading.
    pub const fn new(position: Position, reading: NoiseReading) -> Self {
        Self { position, reading }
    }

    /// RMS amplitude under `RMS`, dB level under `DBSPL`.
    pub fn noise_level(&self) -> f64 {
        self.reading.primary()
    }

    /// Peak amplitude under `RMS`, always `0` under `DBSPL`.
    pub fn peak_or_base(&self) -> f64 {
        self.reading.secondary()
    }

    pub fn unit(&self) -> NoiseUnit {
        self.reading.unit()
    }

    pub fn position(&self) -> &Position {
        &self.position
    }

    pub fn reading(&self) -> &NoiseReading {
        &self.reading
    }

    /// RMS level in dBFS, for `RMS` measurements only.
    pub fn rms_dbfs(&self) -> Option<f64> {
        match self.reading {
            NoiseReading::Rms { rms, .. } => Some(rms_to_dbfs(rms)),
            NoiseReading::DbSpl { .. } => None,
        }
    }
}

impl PartialEq for NoiseMeasurement {
    fn eq(&self, other: &Self) -> bool {
        self.reading == other.reading
    }
}

impl Eq for NoiseMeasurement {}

impl Hash for NoiseMeasurement {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.reading.hash(state);
    }
}

impl fmt::Display for NoiseMeasurement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "NoiseMeasurement {{ unit: {}, noise_level: {}, peak_or_base: {}, position: {} }}",
            self.unit(),
            self.noise_level(),
            self.peak_or_base(),
            self.position
        )
    }
}
