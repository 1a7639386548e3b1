//! # Atelier Editor
//!
//! Interactive logo placement: a per-view canvas where the operator adds
//! an image or preset-text logo, moves and uniformly scales it by direct
//! manipulation, and captures a rasterized snapshot of the visual state.
//!
//! ## Architecture
//!
//! ```text
//! LogoEditor (per-instance EditorConfig, never a global registry)
//!   ├── LogoSlots (payload + normalized transform, from atelier-core)
//!   ├── gesture state (selection, pointer grab)
//!   └── snapshot capture (tiny-skia raster -> PNG)
//! ```
//!
//! All scale math is delegated to `atelier_core::geometry`; the editor
//! never keeps its own mapping between canvas pixels and stored
//! percentages.

pub mod canvas;
pub mod config;
pub mod font;
mod snapshot;

pub use canvas::LogoEditor;
pub use config::{EditorConfig, ViewZone};
