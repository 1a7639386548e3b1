//! # Atelier Settings
//!
//! Workshop configuration management: placement zones, scale bounds,
//! preset-text catalog, revert policy and the notification template,
//! persisted as TOML under the platform config directory.

pub mod config;
pub mod error;

pub use config::{WorkshopConfig, ZoneConfig};
pub use error::{SettingsError, SettingsResult};
