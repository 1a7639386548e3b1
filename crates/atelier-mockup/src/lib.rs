//! # Atelier Mockup
//!
//! Stateless, deterministic garment mockup rendering. Reads the per-view
//! logo state through the shared geometry model and produces a vector
//! scene (torso-clipped logo with a cosmetic skew, or a dashed
//! placeholder) plus its SVG serialization; the same path serves the
//! on-screen preview and the pre-export capture.

pub mod renderer;
pub mod scene;

pub use renderer::{MockupRenderer, ViewZones};
pub use scene::{MockupScene, SceneContent, SceneLogo};
