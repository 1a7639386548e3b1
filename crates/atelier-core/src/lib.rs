//! # Atelier Core
//!
//! Core types, geometry and collaborator traits for Atelier.
//! Provides the fiche (order) data model, the normalized logo placement
//! model shared by the interactive editor and the mockup renderer, the
//! production step record, and the abstract contracts for the injected
//! collaborators (document store, blob store, export sink, rasterizer,
//! notification channel).

pub mod collaborators;
pub mod constants;
pub mod error;
pub mod fiche;
pub mod geometry;
pub mod logo;

pub use collaborators::{
    BlobStore, DocumentStore, NotificationChannel, Rasterizer, TabularSink,
};

pub use error::{EditorError, Error, ExportError, FicheError, Result, StepError, StoreError};

pub use fiche::{
    defaults::ResolvedFiche, parse_price, steps::ProductionSteps, steps::Step, Fiche, FicheEdit,
    GarmentSize, Phone, Pricing,
};

pub use geometry::{
    clamp, placement, to_percent, Letterbox, LogoTransform, Placement, Rect, ScaleBounds, Size,
    TransformUpdate,
};

pub use logo::{ImagePayload, LogoPayload, LogoSlot, LogoSlots, View};
