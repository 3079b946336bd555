//! CLI Module
//!
//! Command-line interface for recording and inspecting noise measurements.

pub mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Geonoise - geotagged ambient noise ledger
#[derive(Parser, Debug)]
#[command(name = "geonoise")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to the ledger file (overrides the config file)
    #[arg(short, long, global = true)]
    pub ledger: Option<PathBuf>,

    /// Path to a JSON config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Record a PCM measurement (RMS and peak amplitude)
    #[command(name = "record-rms")]
    RecordRms {
        /// RMS amplitude, nominally in [-1, 1]
        #[arg(long, allow_hyphen_values = true)]
        rms: f64,

        /// Peak amplitude
        #[arg(long, allow_hyphen_values = true)]
        peak: f64,

        /// Latitude in decimal degrees
        #[arg(long, allow_hyphen_values = true)]
        lat: String,

        /// Longitude in decimal degrees
        #[arg(long, allow_hyphen_values = true)]
        lng: String,
    },

    /// Record a relative dB SPL measurement
    #[command(name = "record-db")]
    RecordDb {
        /// Level in dB relative to the SPL reference
        #[arg(long, allow_hyphen_values = true)]
        level: f64,

        /// Latitude in decimal degrees
        #[arg(long, allow_hyphen_values = true)]
        lat: String,

        /// Longitude in decimal degrees
        #[arg(long, allow_hyphen_values = true)]
        lng: String,
    },

    /// List all stored records
    #[command(name = "list")]
    List,

    /// Show one record
    #[command(name = "show")]
    Show {
        /// Record id
        id: u64,
    },

    /// Print record count and payload size
    #[command(name = "stats")]
    Stats,
}
