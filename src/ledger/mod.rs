//! Ledger Module
//!
//! Storage-side collaborators for noise measurements: surrogate identity,
//! the flat row the store persists, and the append-only ledger itself.

pub mod record;
pub mod row;
pub mod store;

pub use record::{NoiseRecord, RecordId};
pub use row::{NoiseRow, NoiseRowAdapter, StorageAdapter, StorageType};
pub use store::NoiseLedger;
