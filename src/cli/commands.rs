//! CLI Command Implementations
//!
//! Implements the actual logic for each CLI command.

use log::info;

use crate::config::LedgerConfig;
use crate::error::Result;
use crate::geo::Position;
use crate::ledger::{NoiseLedger, RecordId};
use crate::measurement::{NoiseMeasurement, NoiseReading, SizeEstimate};

/// Record a measurement in the RMS convention.
pub fn record_rms(config: LedgerConfig, rms: f64, peak: f64, lat: &str, lng: &str) -> Result<()> {
    let position = Position::parse(lat, lng)?;
    let measurement =
        NoiseMeasurement::from_rms_peak(rms, peak, position.latitude, position.longitude);
    admit_and_save(config, measurement)
}

/// Record a measurement in the DBSPL convention.
pub fn record_db(config: LedgerConfig, level: f64, lat: &str, lng: &str) -> Result<()> {
    let position = Position::parse(lat, lng)?;
    let measurement =
        NoiseMeasurement::from_relative_db(level, position.latitude, position.longitude);
    admit_and_save(config, measurement)
}

fn admit_and_save(config: LedgerConfig, measurement: NoiseMeasurement) -> Result<()> {
    let mut ledger = NoiseLedger::open(config)?;
    let record = ledger.admit(measurement)?;
    ledger.save()?;

    info!("Recorded {} in {}", record, ledger.path().display());
    println!("{}", record);
    Ok(())
}

/// List all stored records.
pub fn list(config: LedgerConfig) -> Result<()> {
    let ledger = NoiseLedger::open(config)?;

    if ledger.is_empty() {
        println!("No records in ledger.");
        return Ok(());
    }

    println!("{:>6}  {:<6} {:>12} {:>12}  {}", "ID", "UNIT", "LEVEL", "PEAK/BASE", "POSITION");
    println!("{:-<60}", "");
    for record in ledger.records() {
        let m = record.measurement();
        let id = record.id().map_or_else(|| "-".to_string(), |id| id.to_string());
        println!(
            "{:>6}  {:<6} {:>12} {:>12}  {}",
            id,
            m.unit(),
            m.noise_level(),
            m.peak_or_base(),
            m.position()
        );
    }

    Ok(())
}

/// Show one record in detail.
pub fn show(config: LedgerConfig, id: u64) -> Result<()> {
    let ledger = NoiseLedger::open(config)?;
    let record = ledger.require(RecordId(id))?;
    let m = record.measurement();

    println!("Record:      {}", id);
    println!("Unit:        {}", m.unit());
    match m.reading() {
        NoiseReading::Rms { rms, peak } => {
            println!("RMS:         {}", rms);
            println!("Peak:        {}", peak);
            if let Some(dbfs) = m.rms_dbfs() {
                println!("RMS (dBFS):  {:.2}", dbfs);
            }
        }
        NoiseReading::DbSpl { level } => {
            println!("Level (dB):  {}", level);
        }
    }
    println!("Position:    {}", m.position());
    if let Some(at) = record.admitted_at() {
        println!("Admitted:    {}", at);
    }
    println!("Size:        {} bytes", record.approximate_size());
    println!("Digest:      {}", record.digest());

    Ok(())
}

/// Print ledger statistics.
pub fn stats(config: LedgerConfig) -> Result<()> {
    let ledger = NoiseLedger::open(config)?;

    println!("Ledger:      {}", ledger.ledger_id());
    println!("Path:        {}", ledger.path().display());
    println!("Records:     {}", ledger.len());
    println!("Payload:     {} bytes", ledger.total_payload_size());

    Ok(())
}
