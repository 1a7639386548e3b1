//! Shared constants: reference frame, safe zones, transform bounds.
//!
//! All placement percentages are defined against the fixed reference
//! canvas below. Renderers letterbox this frame into their own viewport;
//! they never re-derive zones for a target size.

use crate::geometry::{Rect, Size};

/// Fixed reference canvas every safe zone is defined in.
pub const REFERENCE_CANVAS: Size = Size { w: 400.0, h: 500.0 };

/// Printable area on the front of the garment, reference coordinates.
pub const SAFE_ZONE_FRONT: Rect = Rect {
    x: 110.0,
    y: 130.0,
    w: 180.0,
    h: 230.0,
};

/// Printable area on the back of the garment, reference coordinates.
pub const SAFE_ZONE_BACK: Rect = Rect {
    x: 110.0,
    y: 110.0,
    w: 180.0,
    h: 260.0,
};

/// Torso clip region for the front view. Visual clipping only, never
/// placement math; strictly larger than the safe zone.
pub const TORSO_CLIP_FRONT: Rect = Rect {
    x: 70.0,
    y: 60.0,
    w: 260.0,
    h: 380.0,
};

/// Torso clip region for the back view.
pub const TORSO_CLIP_BACK: Rect = Rect {
    x: 70.0,
    y: 50.0,
    w: 260.0,
    h: 390.0,
};

/// Default logo transform: horizontally centered, upper chest, unit scale.
pub const DEFAULT_TRANSFORM_X: f64 = 50.0;
pub const DEFAULT_TRANSFORM_Y: f64 = 40.0;
pub const DEFAULT_TRANSFORM_SCALE: f64 = 1.0;

/// Uniform scale limits for a placed logo.
pub const MIN_LOGO_SCALE: f64 = 0.3;
pub const MAX_LOGO_SCALE: f64 = 2.5;

/// Nominal logo footprint at scale 1.0, reference pixels. Hit testing and
/// rasterization size the placed object from this.
pub const LOGO_BASE_WIDTH: f64 = 120.0;
pub const LOGO_BASE_HEIGHT: f64 = 120.0;

/// Preset-text badge line height at scale 1.0, reference pixels.
pub const TEXT_LOGO_FONT_SIZE: f64 = 36.0;

/// Cosmetic skew factors (degrees per percent of offset from center).
/// skew_y follows the horizontal offset, skew_x the vertical one.
pub const SKEW_Y_FACTOR: f64 = 0.08;
pub const SKEW_X_FACTOR: f64 = 0.05;

/// Fallback colors used whenever a fiche leaves a color unset.
pub const DEFAULT_GARMENT_COLOR: &str = "#FFFFFF";
pub const DEFAULT_LOGO_COLOR: &str = "#000000";

/// How far (reference pixels) a drag may overshoot the safe zone before
/// being clamped. The interactive boundary is the safe zone inflated by
/// this margin.
pub const BOUNDARY_SLACK: f64 = 12.0;

/// Upper bound on an outbound rasterization call.
pub const RASTER_TIMEOUT_SECS: u64 = 20;
