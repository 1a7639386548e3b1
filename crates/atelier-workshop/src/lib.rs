//! # Atelier Workshop
//!
//! Integration layer: the fiche lifecycle service over the injected
//! collaborators, the in-memory fallback store, and the flat-row export
//! against the fixed column contract.

pub mod export;
pub mod memory_store;
pub mod service;

pub use export::{ExportRow, COLUMNS};
pub use memory_store::MemoryStore;
pub use service::WorkshopService;
