//! Latitude/longitude pair
//!
//! Coordinates are kept as arbitrary-precision decimals so that a value
//! read from a sensor is stored exactly as given. Range checks are not
//! done here.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{GeonoiseError, Result};

/// A geographic position embedded by every geotagged record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Position {
    /// Latitude in decimal degrees.
    pub latitude: Decimal,
    /// Longitude in decimal degrees.
    pub longitude: Decimal,
}

impl Position {
    /// Create a position, passing both coordinates through unmodified.
    pub const fn new(latitude: Decimal, longitude: Decimal) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// The zero position (0, 0).
    pub const fn origin() -> Self {
        Self::new(Decimal::ZERO, Decimal::ZERO)
    }

    /// Parse a position from two decimal strings such as `"38.7"` and `"-9.1"`.
    pub fn parse(latitude: &str, longitude: &str) -> Result<Self> {
        Ok(Self::new(parse_decimal(latitude)?, parse_decimal(longitude)?))
    }
}

pub(crate) fn parse_decimal(value: &str) -> Result<Decimal> {
    Decimal::from_str(value.trim()).map_err(|_| GeonoiseError::InvalidDecimal {
        value: value.to_string(),
    })
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.latitude, self.longitude)
    }
}
