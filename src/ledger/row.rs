//! Flat storage rows
//!
//! The ledger file stores each record as a flat row. Loading is two-phase:
//! rows start out as the empty `NoiseRow::default()` placeholder, serde
//! fills them in, and only then are they converted into a
//! [`NoiseRecord`]. The placeholder never leaves this module as a
//! measurement: a row without a unit fails conversion.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{GeonoiseError, Result};
use crate::geo::Position;
use crate::ledger::record::{NoiseRecord, RecordId};
use crate::measurement::{NoiseMeasurement, NoiseReading, NoiseUnit};

/// Column types a storage adapter declares for its schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StorageType {
    Long,
    Double,
    Decimal,
    Enum,
    Timestamp,
}

/// Converts a ledger payload to and from its stored element.
pub trait StorageAdapter {
    type Payload;
    type Element;

    /// Schema name of the stored element.
    fn id(&self) -> &'static str;

    /// Stored properties and their column types.
    fn properties(&self) -> BTreeMap<&'static str, StorageType>;

    fn store(&self, payload: &Self::Payload) -> Self::Element;

    fn load(&self, element: Self::Element) -> Result<Self::Payload>;
}

/// One stored noise record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NoiseRow {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,

    #[serde(with = "crate::measurement::lenient_f64")]
    pub noise_level: f64,

    #[serde(with = "crate::measurement::lenient_f64")]
    pub peak_or_base: f64,

    pub unit: Option<NoiseUnit>,

    pub latitude: Decimal,

    pub longitude: Decimal,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub admitted_at: Option<DateTime<Utc>>,
}

impl From<&NoiseRecord> for NoiseRow {
    fn from(record: &NoiseRecord) -> Self {
        let measurement = record.measurement();
        let position = measurement.position();
        Self {
            id: record.id().map(|id| id.value()),
            noise_level: measurement.noise_level(),
            peak_or_base: measurement.peak_or_base(),
            unit: Some(measurement.unit()),
            latitude: position.latitude,
            longitude: position.longitude,
            admitted_at: record.admitted_at(),
        }
    }
}

impl TryFrom<NoiseRow> for NoiseRecord {
    type Error = GeonoiseError;

    fn try_from(row: NoiseRow) -> Result<Self> {
        if row.id == Some(0) {
            return Err(GeonoiseError::InconsistentRow {
                id: row.id,
                reason: "identity 0 means unset and cannot be stored".to_string(),
            });
        }

        let reading = match row.unit {
            None => return Err(GeonoiseError::MissingUnit { id: row.id }),
            Some(NoiseUnit::Rms) => NoiseReading::Rms {
                rms: row.noise_level,
                peak: row.peak_or_base,
            },
            Some(NoiseUnit::DbSpl) => {
                if row.peak_or_base != 0.0 {
                    return Err(GeonoiseError::InconsistentRow {
                        id: row.id,
                        reason: format!("DBSPL row carries peak_or_base {}", row.peak_or_base),
                    });
                }
                NoiseReading::DbSpl {
                    level: row.noise_level,
                }
            }
        };

        let measurement =
            NoiseMeasurement::new(Position::new(row.latitude, row.longitude), reading);

        Ok(match row.id {
            Some(id) => NoiseRecord::with_id(RecordId(id), measurement, row.admitted_at),
            None => NoiseRecord::new(measurement),
        })
    }
}

/// Storage adapter for noise records.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoiseRowAdapter;

impl NoiseRowAdapter {
    /// Schema name used in ledger files.
    pub const SCHEMA: &'static str = "NoiseData";
}

impl StorageAdapter for NoiseRowAdapter {
    type Payload = NoiseRecord;
    type Element = NoiseRow;

    fn id(&self) -> &'static str {
        Self::SCHEMA
    }

    fn properties(&self) -> BTreeMap<&'static str, StorageType> {
        BTreeMap::from([
            ("id", StorageType::Long),
            ("noise_level", StorageType::Double),
            ("peak_or_base", StorageType::Double),
            ("unit", StorageType::Enum),
            ("latitude", StorageType::Decimal),
            ("longitude", StorageType::Decimal),
            ("admitted_at", StorageType::Timestamp),
        ])
    }

    fn store(&self, payload: &NoiseRecord) -> NoiseRow {
        NoiseRow::from(payload)
    }

    fn load(&self, element: NoiseRow) -> Result<NoiseRecord> {
        NoiseRecord::try_from(element)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lat() -> Decimal {
        Decimal::new(387, 1)
    }

    fn lng() -> Decimal {
        Decimal::new(-91, 1)
    }

    #[test]
    fn test_placeholders_are_equal() {
        assert_eq!(NoiseRow::default(), NoiseRow::default());
        assert_eq!(NoiseRow::default().unit, None);
    }

    #[test]
    fn test_placeholder_is_not_a_record() {
        let err = NoiseRecord::try_from(NoiseRow::default()).unwrap_err();
        assert!(matches!(err, GeonoiseError::MissingUnit { id: None }));
    }

    #[test]
    fn test_populated_placeholder_rebuilds_record() {
        let mut original =
            NoiseRecord::new(NoiseMeasurement::from_rms_peak(0.42, 0.95, lat(), lng()));
        original.assign_id(RecordId(12), Utc::now()).unwrap();
        let stored = NoiseRow::from(&original);

        let mut row = NoiseRow::default();
        row.id = stored.id;
        row.noise_level = stored.noise_level;
        row.peak_or_base = stored.peak_or_base;
        row.unit = stored.unit;
        row.latitude = stored.latitude;
        row.longitude = stored.longitude;

        let rebuilt = NoiseRecord::try_from(row).unwrap();
        assert_eq!(rebuilt, original);
        assert_eq!(rebuilt.measurement().position(), original.measurement().position());
    }

    #[test]
    fn test_dbspl_row_with_peak_is_rejected() {
        let row = NoiseRow {
            id: Some(2),
            noise_level: 55.0,
            peak_or_base: 0.3,
            unit: Some(NoiseUnit::DbSpl),
            ..NoiseRow::default()
        };
        let err = NoiseRecord::try_from(row).unwrap_err();
        assert_eq!(err.error_code(), "INCONSISTENT_ROW");
    }

    #[test]
    fn test_zero_identity_is_rejected() {
        let row = NoiseRow {
            id: Some(0),
            noise_level: 55.0,
            unit: Some(NoiseUnit::DbSpl),
            ..NoiseRow::default()
        };
        let err = NoiseRecord::try_from(row).unwrap_err();
        assert!(matches!(err, GeonoiseError::InconsistentRow { id: Some(0), .. }));
    }

    #[test]
    fn test_dbspl_row_rebuilds_zero_secondary() {
        let row = NoiseRow {
            noise_level: 55.0,
            unit: Some(NoiseUnit::DbSpl),
            latitude: lat(),
            longitude: lng(),
            ..NoiseRow::default()
        };
        let record = NoiseRecord::try_from(row).unwrap();
        assert!(!record.is_persisted());
        assert_eq!(record.measurement().unit(), NoiseUnit::DbSpl);
        assert_eq!(record.measurement().peak_or_base(), 0.0);
    }

    #[test]
    fn test_non_finite_readings_survive_json() {
        let record = NoiseRecord::new(NoiseMeasurement::from_rms_peak(
            f64::NAN,
            f64::NEG_INFINITY,
            lat(),
            lng(),
        ));
        let json = serde_json::to_string(&NoiseRow::from(&record)).unwrap();
        assert!(json.contains("\"NaN\""));
        assert!(json.contains("\"-inf\""));

        let row: NoiseRow = serde_json::from_str(&json).unwrap();
        let back = NoiseRecord::try_from(row).unwrap();
        assert_eq!(back, record);
    }

    #[test]
    fn test_adapter_schema() {
        let adapter = NoiseRowAdapter;
        assert_eq!(adapter.id(), "NoiseData");

        let properties = adapter.properties();
        assert_eq!(properties.len(), 7);
        assert_eq!(properties["latitude"], StorageType::Decimal);
        assert_eq!(properties["peak_or_base"], StorageType::Double);
    }
}
