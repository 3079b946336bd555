//! Append-only noise ledger
//!
//! Admits measurements, assigns each one the next surrogate identity and
//! persists the whole ledger as a single JSON file. Records are never
//! updated or removed.

use std::fs;
use std::path::Path;

use chrono::Utc;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::LedgerConfig;
use crate::error::{GeonoiseError, Result};
use crate::ledger::record::{NoiseRecord, RecordId};
use crate::ledger::row::{NoiseRow, NoiseRowAdapter, StorageAdapter};
use crate::measurement::{NoiseMeasurement, SizeEstimate};

/// First identity handed out by an empty ledger.
pub const FIRST_RECORD_ID: u64 = 1;

/// On-disk layout of a ledger file.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct LedgerFile {
    ledger_id: Uuid,
    schema: String,
    // null once every identity has been handed out
    #[serde(default)]
    next_id: Option<u64>,
    #[serde(default)]
    rows: Vec<NoiseRow>,
}

/// Append-only store of noise records.
#[derive(Debug)]
pub struct NoiseLedger {
    config: LedgerConfig,
    ledger_id: Uuid,
    next_id: Option<u64>,
    records: Vec<NoiseRecord>,
    adapter: NoiseRowAdapter,
}

impl NoiseLedger {
    /// Create an empty ledger. Nothing is written until [`save`](Self::save).
    pub fn new(config: LedgerConfig) -> Self {
        Self {
            config,
            ledger_id: Uuid::new_v4(),
            next_id: Some(FIRST_RECORD_ID),
            records: Vec::new(),
            adapter: NoiseRowAdapter,
        }
    }

    /// Open the ledger at the configured path, or start an empty one if
    /// the file does not exist yet.
    pub fn open(config: LedgerConfig) -> Result<Self> {
        let path = config.ledger_path.clone();
        if !path.exists() {
            info!("No ledger at {}, starting a new one", path.display());
            return Ok(Self::new(config));
        }

        let content = fs::read_to_string(&path).map_err(|e| GeonoiseError::FileReadError {
            path: path.clone(),
            source: e,
        })?;
        let file: LedgerFile = serde_json::from_str(&content)?;

        let adapter = NoiseRowAdapter;
        if file.schema != adapter.id() {
            return Err(GeonoiseError::InconsistentRow {
                id: None,
                reason: format!("unexpected schema '{}'", file.schema),
            });
        }

        let mut records = Vec::with_capacity(file.rows.len());
        for row in file.rows {
            let record = adapter.load(row).map_err(|e| {
                warn!("Rejected row in {}: {}", path.display(), e);
                e
            })?;
            if record.id().is_none() {
                return Err(GeonoiseError::InconsistentRow {
                    id: None,
                    reason: "stored row has no identity".to_string(),
                });
            }
            records.push(record);
        }
        records.sort_by_key(|r| r.id());

        if let Some(pair) = records.windows(2).find(|pair| pair[0].id() == pair[1].id()) {
            let id = pair[0].id().map(|id| id.value());
            warn!("Duplicate identity {:?} in {}", id, path.display());
            return Err(GeonoiseError::InconsistentRow {
                id,
                reason: "duplicate identity".to_string(),
            });
        }

        let highest = records
            .last()
            .and_then(|r| r.id())
            .map_or(0, |id| id.value());
        let next_id = highest
            .checked_add(1)
            .map(|after_highest| {
                file.next_id
                    .unwrap_or(0)
                    .max(after_highest)
                    .max(FIRST_RECORD_ID)
            });

        info!(
            "Opened ledger {} with {} records from {}",
            file.ledger_id,
            records.len(),
            path.display()
        );

        Ok(Self {
            config,
            ledger_id: file.ledger_id,
            next_id,
            records,
            adapter,
        })
    }

    /// Admit a measurement, assigning it the next identity.
    pub fn admit(&mut self, measurement: NoiseMeasurement) -> Result<NoiseRecord> {
        if let Some(max_records) = self.config.max_records {
            if self.records.len() >= max_records {
                return Err(GeonoiseError::LedgerFull { max_records });
            }
        }

        let id = self.next_id.ok_or(GeonoiseError::LedgerFull {
            max_records: self.records.len(),
        })?;

        let mut record = NoiseRecord::new(measurement);
        record.assign_id(RecordId(id), Utc::now())?;
        self.next_id = id.checked_add(1);

        debug!("Admitted {}", record);
        self.records.push(record.clone());
        Ok(record)
    }

    /// Look up a record by identity.
    pub fn get(&self, id: RecordId) -> Option<&NoiseRecord> {
        self.records
            .binary_search_by_key(&Some(id), |r| r.id())
            .ok()
            .map(|index| &self.records[index])
    }

    /// Like [`get`](Self::get), but a missing record is an error.
    pub fn require(&self, id: RecordId) -> Result<&NoiseRecord> {
        self.get(id)
            .ok_or(GeonoiseError::RecordNotFound { id: id.value() })
    }

    pub fn records(&self) -> &[NoiseRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn ledger_id(&self) -> Uuid {
        self.ledger_id
    }

    pub fn path(&self) -> &Path {
        &self.config.ledger_path
    }

    /// Sum of the approximate payload sizes of all records.
    pub fn total_payload_size(&self) -> usize {
        self.records.iter().map(|r| r.approximate_size()).sum()
    }

    /// Write the ledger to its configured path.
    pub fn save(&self) -> Result<()> {
        let path = &self.config.ledger_path;
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).map_err(|e| GeonoiseError::DirectoryCreateError {
                    path: parent.to_path_buf(),
                    source: e,
                })?;
            }
        }

        let file = LedgerFile {
            ledger_id: self.ledger_id,
            schema: self.adapter.id().to_string(),
            next_id: self.next_id,
            rows: self.records.iter().map(|r| self.adapter.store(r)).collect(),
        };
        let content = if self.config.pretty {
            serde_json::to_string_pretty(&file)?
        } else {
            serde_json::to_string(&file)?
        };

        fs::write(path, content).map_err(|e| GeonoiseError::FileWriteError {
            path: path.clone(),
            source: e,
        })?;

        info!("Saved {} records to {}", self.records.len(), path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use tempfile::TempDir;

    fn create_test_config(temp_dir: &TempDir) -> LedgerConfig {
        LedgerConfig::with_path(temp_dir.path().join("data").join("ledger.json"))
    }

    fn db(level: f64) -> NoiseMeasurement {
        NoiseMeasurement::from_relative_db(level, Decimal::new(387, 1), Decimal::new(-91, 1))
    }

    #[test]
    fn test_admit_assigns_sequential_ids() {
        let temp_dir = tempfile::tempdir().unwrap();
        let mut ledger = NoiseLedger::new(create_test_config(&temp_dir));

        let first = ledger.admit(db(55.0)).unwrap();
        let second = ledger.admit(db(55.0)).unwrap();

        assert_eq!(first.id(), Some(RecordId(1)));
        assert_eq!(second.id(), Some(RecordId(2)));
        assert!(first.admitted_at().is_some());
        assert_ne!(first, second);
        assert_eq!(ledger.len(), 2);
    }

    #[test]
    fn test_get_and_require() {
        let temp_dir = tempfile::tempdir().unwrap();
        let mut ledger = NoiseLedger::new(create_test_config(&temp_dir));
        let stored = ledger.admit(db(61.5)).unwrap();

        assert_eq!(ledger.get(RecordId(1)), Some(&stored));
        assert!(ledger.get(RecordId(2)).is_none());

        let err = ledger.require(RecordId(2)).unwrap_err();
        assert_eq!(err.error_code(), "RECORD_NOT_FOUND");
    }

    #[test]
    fn test_max_records() {
        let temp_dir = tempfile::tempdir().unwrap();
        let mut config = create_test_config(&temp_dir);
        config.max_records = Some(1);
        let mut ledger = NoiseLedger::new(config);

        ledger.admit(db(40.0)).unwrap();
        let err = ledger.admit(db(41.0)).unwrap_err();
        assert!(matches!(err, GeonoiseError::LedgerFull { max_records: 1 }));
        assert_eq!(ledger.len(), 1);
    }

    #[test]
    fn test_open_missing_file_is_empty() {
        let temp_dir = tempfile::tempdir().unwrap();
        let ledger = NoiseLedger::open(create_test_config(&temp_dir)).unwrap();
        assert!(ledger.is_empty());
        assert_eq!(ledger.total_payload_size(), 0);
    }

    #[test]
    fn test_save_and_open() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config = create_test_config(&temp_dir);

        let mut ledger = NoiseLedger::new(config.clone());
        ledger.admit(db(55.0)).unwrap();
        ledger
            .admit(NoiseMeasurement::from_rms_peak(
                0.42,
                0.95,
                Decimal::new(387, 1),
                Decimal::new(-91, 1),
            ))
            .unwrap();
        ledger.save().unwrap();

        let reopened = NoiseLedger::open(config).unwrap();
        assert_eq!(reopened.ledger_id(), ledger.ledger_id());
        assert_eq!(reopened.records(), ledger.records());
        assert_eq!(reopened.total_payload_size(), ledger.total_payload_size());
    }

    fn write_ledger_file(config: &LedgerConfig, schema: &str, next_id: &str, rows: &str) {
        fs::create_dir_all(config.ledger_path.parent().unwrap()).unwrap();
        let content = format!(
            r#"{{
                "ledger_id": "7d0b3a0e-3f5e-4c3a-9a53-3c7f0b1f2e11",
                "schema": "{}",
                "next_id": {},
                "rows": [{}]
            }}"#,
            schema, next_id, rows
        );
        fs::write(&config.ledger_path, content).unwrap();
    }

    #[test]
    fn test_open_rejects_duplicate_identity() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config = create_test_config(&temp_dir);
        write_ledger_file(
            &config,
            "NoiseData",
            "2",
            r#"{ "id": 1, "noise_level": 55.0, "unit": "DBSPL" },
               { "id": 1, "noise_level": 0.4, "peak_or_base": 0.9, "unit": "RMS" }"#,
        );

        let err = NoiseLedger::open(config).unwrap_err();
        assert!(matches!(err, GeonoiseError::InconsistentRow { id: Some(1), .. }));
        assert_eq!(
            err.to_string(),
            "Stored row Some(1) is inconsistent: duplicate identity"
        );
    }

    #[test]
    fn test_open_rejects_foreign_schema() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config = create_test_config(&temp_dir);
        write_ledger_file(&config, "TemperatureData", "1", "");

        let err = NoiseLedger::open(config).unwrap_err();
        assert_eq!(err.error_code(), "INCONSISTENT_ROW");
        assert!(err.to_string().contains("TemperatureData"));
    }

    #[test]
    fn test_open_rejects_zero_identity() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config = create_test_config(&temp_dir);
        write_ledger_file(
            &config,
            "NoiseData",
            "1",
            r#"{ "id": 0, "noise_level": 55.0, "unit": "DBSPL" }"#,
        );

        let err = NoiseLedger::open(config).unwrap_err();
        assert!(matches!(err, GeonoiseError::InconsistentRow { id: Some(0), .. }));
    }

    #[test]
    fn test_exhausted_identities_fail_admission() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config = create_test_config(&temp_dir);
        write_ledger_file(
            &config,
            "NoiseData",
            "null",
            r#"{
                "id": 18446744073709551615,
                "noise_level": 55.0,
                "unit": "DBSPL"
            }"#,
        );

        let mut ledger = NoiseLedger::open(config.clone()).unwrap();
        assert_eq!(ledger.len(), 1);
        assert!(ledger.get(RecordId(u64::MAX)).is_some());

        let err = ledger.admit(db(60.0)).unwrap_err();
        assert!(matches!(err, GeonoiseError::LedgerFull { max_records: 1 }));
        assert_eq!(ledger.len(), 1);

        // survives a save/open cycle
        ledger.save().unwrap();
        let mut reopened = NoiseLedger::open(config).unwrap();
        assert!(reopened.admit(db(60.0)).is_err());
    }

    #[test]
    fn test_last_identity_is_handed_out_once() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config = create_test_config(&temp_dir);
        write_ledger_file(
            &config,
            "NoiseData",
            "18446744073709551615",
            r#"{
                "id": 18446744073709551614,
                "noise_level": 55.0,
                "unit": "DBSPL"
            }"#,
        );

        let mut ledger = NoiseLedger::open(config).unwrap();
        let last = ledger.admit(db(60.0)).unwrap();
        assert_eq!(last.id(), Some(RecordId(u64::MAX)));
        assert_eq!(ledger.admit(db(61.0)).unwrap_err().error_code(), "LEDGER_FULL");
    }

    #[test]
    fn test_open_rejects_row_without_unit() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config = create_test_config(&temp_dir);
        write_ledger_file(
            &config,
            "NoiseData",
            "2",
            r#"{ "id": 1, "noise_level": 0.0, "peak_or_base": 0.0 }"#,
        );

        let err = NoiseLedger::open(config).unwrap_err();
        assert_eq!(err.error_code(), "MISSING_UNIT");
    }
}
