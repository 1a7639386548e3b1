//! # Atelier
//!
//! Custom-apparel order ticketing for a small workshop: capture a fiche
//! (client, garment, pricing), place a front/back logo on an interactive
//! canvas, preview it on a deterministic mockup, and drive the order
//! through the guarded production workflow.
//!
//! ## Architecture
//!
//! Atelier is organized as a workspace with multiple crates:
//!
//! 1. **atelier-core** - Fiche model, placement geometry, step record,
//!    errors, collaborator traits
//! 2. **atelier-editor** - Interactive logo placement and snapshot capture
//! 3. **atelier-mockup** - Deterministic mockup scenes and SVG output
//! 4. **atelier-production** - Production stepper and client notification
//! 5. **atelier-settings** - Workshop configuration (TOML)
//! 6. **atelier-workshop** - Lifecycle service over the injected
//!    collaborators
//!
//! The UI shell, the persistence backend, the spreadsheet service and the
//! PDF engine are all injected collaborators; see
//! `atelier_core::collaborators`.

pub use atelier_core::{
    clamp, parse_price, placement, to_percent, BlobStore, DocumentStore, EditorError, Error,
    ExportError, Fiche, FicheEdit, FicheError, GarmentSize, ImagePayload, Letterbox, LogoPayload, LogoSlot,
    LogoSlots, LogoTransform, NotificationChannel, Phone, Placement, Pricing, ProductionSteps,
    Rasterizer, Rect, ResolvedFiche, Result, ScaleBounds, Size, Step, StepError, StoreError,
    TabularSink, TransformUpdate, View,
};

pub use atelier_editor::{EditorConfig, LogoEditor, ViewZone};
pub use atelier_mockup::{MockupRenderer, MockupScene, SceneContent, SceneLogo, ViewZones};
pub use atelier_production::{ClientNotification, Confirmation, RevertPolicy, Stepper};
pub use atelier_settings::{SettingsError, WorkshopConfig, ZoneConfig};
pub use atelier_workshop::{ExportRow, MemoryStore, WorkshopService, COLUMNS};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging with the default configuration
///
/// Sets up structured logging with:
/// - Console output with pretty formatting
/// - RUST_LOG environment variable support
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into());

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stdout)
        .with_target(true)
        .with_level(true)
        .pretty();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();

    Ok(())
}
