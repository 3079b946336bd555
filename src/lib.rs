//! Geonoise - Geotagged Ambient Noise Records
//!
//! A noise measurement is one payload type in a ledger of geotagged
//! sensor data. Each measurement is recorded in exactly one of two
//! conventions:
//! - `RMS`: RMS and peak amplitude of a PCM signal
//! - `DBSPL`: a level in dB relative to a sound-pressure reference
//!
//! # Layout
//!
//! - `geo`: latitude/longitude as arbitrary-precision decimals
//! - `measurement`: the noise value type, size estimation, digests
//! - `ledger`: surrogate identity, storage rows, the append-only ledger
//! - `config`, `cli`: ambient surface for the `geonoise-cli` binary

pub mod cli;
pub mod config;
pub mod error;
pub mod geo;
pub mod ledger;
pub mod measurement;

pub use error::{GeonoiseError, Result};
pub use geo::Position;
pub use ledger::{NoiseLedger, NoiseRecord, RecordId};
pub use measurement::{NoiseMeasurement, NoiseReading, NoiseUnit, SizeEstimate};
