//! Measurement unit tag.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Convention a noise reading was captured in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NoiseUnit {
    /// Root-mean-square and peak amplitude of a PCM signal, nominally in [-1, 1].
    #[serde(rename = "RMS")]
    Rms,

    /// Decibels relative to a standard sound-pressure reference.
    #[serde(rename = "DBSPL")]
    DbSpl,
}

impl NoiseUnit {
    /// Single-byte tag used in digests and size accounting.
    pub const fn tag(&self) -> u8 {
        match self {
            NoiseUnit::Rms => 0,
            NoiseUnit::DbSpl => 1,
        }
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            NoiseUnit::Rms => "RMS",
            NoiseUnit::DbSpl => "DBSPL",
        }
    }
}

impl fmt::Display for NoiseUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}
