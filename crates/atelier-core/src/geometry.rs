//! Logo placement geometry.
//!
//! Handles conversion between the normalized storage representation of a
//! logo transform (percentages of the per-view safe zone) and pixel
//! coordinates in the fixed reference frame, plus clamping to the
//! configured bounds and uniform letterboxing of the reference frame into
//! an arbitrary viewport.
//!
//! Everything in this module is pure and deterministic: the mockup
//! renderer and the export pipeline rely on identical inputs producing
//! identical outputs. The interactive editor and the mockup renderer must
//! go through these functions for all scale math; neither keeps its own.

use serde::{Deserialize, Serialize};

use crate::constants;

/// A width/height pair in reference pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub w: f64,
    pub h: f64,
}

impl Size {
    pub const fn new(w: f64, h: f64) -> Self {
        Self { w, h }
    }
}

/// Axis-aligned rectangle in reference pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self { x, y, w, h }
    }

    pub fn right(&self) -> f64 {
        self.x + self.w
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.h
    }

    pub fn center(&self) -> (f64, f64) {
        (self.x + self.w / 2.0, self.y + self.h / 2.0)
    }

    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.x && x <= self.right() && y >= self.y && y <= self.bottom()
    }

    /// Grows the rectangle by `margin` on every side (negative shrinks).
    pub fn inflate(&self, margin: f64) -> Rect {
        Rect {
            x: self.x - margin,
            y: self.y - margin,
            w: self.w + margin * 2.0,
            h: self.h + margin * 2.0,
        }
    }

    /// Clamps a point into the rectangle.
    pub fn clamp_point(&self, x: f64, y: f64) -> (f64, f64) {
        (x.clamp(self.x, self.right()), y.clamp(self.y, self.bottom()))
    }
}

/// Normalized logo transform: position as percentages of the safe zone,
/// uniform scale factor. One instance per view, persisted with the fiche.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LogoTransform {
    pub x: f64,
    pub y: f64,
    pub scale: f64,
}

impl Default for LogoTransform {
    fn default() -> Self {
        Self {
            x: constants::DEFAULT_TRANSFORM_X,
            y: constants::DEFAULT_TRANSFORM_Y,
            scale: constants::DEFAULT_TRANSFORM_SCALE,
        }
    }
}

/// Partial transform update; unset fields keep their current value.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TransformUpdate {
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub scale: Option<f64>,
}

impl TransformUpdate {
    pub fn position(x: f64, y: f64) -> Self {
        Self {
            x: Some(x),
            y: Some(y),
            scale: None,
        }
    }

    pub fn scale(scale: f64) -> Self {
        Self {
            x: None,
            y: None,
            scale: Some(scale),
        }
    }

    /// Merges this update into `current` without clamping.
    pub fn apply_to(&self, current: &LogoTransform) -> LogoTransform {
        LogoTransform {
            x: self.x.unwrap_or(current.x),
            y: self.y.unwrap_or(current.y),
            scale: self.scale.unwrap_or(current.scale),
        }
    }
}

/// Configured limits for the uniform logo scale.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScaleBounds {
    pub min: f64,
    pub max: f64,
}

impl Default for ScaleBounds {
    fn default() -> Self {
        Self {
            min: constants::MIN_LOGO_SCALE,
            max: constants::MAX_LOGO_SCALE,
        }
    }
}

/// A transform resolved to reference-frame pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub px: f64,
    pub py: f64,
    pub scale: f64,
}

/// Maps a normalized transform into reference-frame pixels.
///
/// ```text
/// px = zone.x + t.x / 100 * zone.w
/// py = zone.y + t.y / 100 * zone.h
/// ```
///
/// Independent of any target canvas size: the safe zone lives in the fixed
/// reference frame and renderers letterbox that frame uniformly.
pub fn placement(t: &LogoTransform, zone: &Rect) -> Placement {
    Placement {
        px: zone.x + t.x / 100.0 * zone.w,
        py: zone.y + t.y / 100.0 * zone.h,
        scale: t.scale,
    }
}

/// Inverse of [`placement`] for the position components.
pub fn to_percent(px: f64, py: f64, zone: &Rect) -> (f64, f64) {
    ((px - zone.x) / zone.w * 100.0, (py - zone.y) / zone.h * 100.0)
}

/// Bounds a transform: x and y to [0, 100], scale to `bounds`.
///
/// Idempotent on already-valid input; fields within bounds pass through
/// unchanged. NaN components are replaced by the default transform's
/// component; infinities clamp to the nearest bound.
pub fn clamp(t: &LogoTransform, bounds: &ScaleBounds) -> LogoTransform {
    let sane = |v: f64, fallback: f64| if v.is_nan() { fallback } else { v };
    let d = LogoTransform::default();
    LogoTransform {
        x: sane(t.x, d.x).clamp(0.0, 100.0),
        y: sane(t.y, d.y).clamp(0.0, 100.0),
        scale: sane(t.scale, d.scale).clamp(bounds.min, bounds.max),
    }
}

/// Uniform mapping of the reference frame into a target viewport.
///
/// The reference frame is scaled by a single factor and centered, so the
/// same normalized state renders identically at any viewport size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Letterbox {
    pub scale: f64,
    pub offset_x: f64,
    pub offset_y: f64,
}

impl Letterbox {
    /// Fits `reference` into a `target_w` x `target_h` viewport.
    pub fn fit(reference: Size, target_w: f64, target_h: f64) -> Self {
        let scale = (target_w / reference.w).min(target_h / reference.h);
        Self {
            scale,
            offset_x: (target_w - reference.w * scale) / 2.0,
            offset_y: (target_h - reference.h * scale) / 2.0,
        }
    }

    /// Reference point to viewport point.
    pub fn to_target(&self, x: f64, y: f64) -> (f64, f64) {
        (x * self.scale + self.offset_x, y * self.scale + self.offset_y)
    }

    /// Viewport point back to reference coordinates.
    pub fn to_reference(&self, x: f64, y: f64) -> (f64, f64) {
        ((x - self.offset_x) / self.scale, (y - self.offset_y) / self.scale)
    }
}
