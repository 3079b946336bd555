//! Noise Measurement Module
//!
//! The geotagged ambient-noise value type, the unit conventions it can be
//! recorded in, and the capabilities the ledger asks of every payload
//! (size estimation and content digest).

pub mod digest;
pub mod level;
pub(crate) mod lenient_f64;
pub mod noise;
pub mod size;
pub mod unit;

pub use digest::ContentDigest;
pub use level::{dbfs_to_rms, rms_to_dbfs};
pub use noise::{NoiseMeasurement, NoiseReading};
pub use size::SizeEstimate;
pub use unit::NoiseUnit;
