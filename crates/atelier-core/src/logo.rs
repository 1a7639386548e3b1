//! Per-view logo state: payload and normalized transform.
//!
//! A fiche carries one [`LogoSlot`] per garment view (front, back). The
//! slot owns the payload (uploaded raster image or preset-text token) and
//! the normalized transform; all transform writes go through
//! [`crate::geometry::clamp`]. No two views ever share a transform
//! instance.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::geometry::{self, LogoTransform, ScaleBounds, TransformUpdate};

/// Garment face. Each view has an independent slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum View {
    Front,
    Back,
}

impl View {
    /// Both views, front first.
    pub const ALL: [View; 2] = [View::Front, View::Back];

    /// The opposite face.
    pub fn other(self) -> View {
        match self {
            View::Front => View::Back,
            View::Back => View::Front,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            View::Front => "front",
            View::Back => "back",
        }
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An uploaded raster logo.
///
/// `remote_url` is filled when the blob store accepted the upload; when it
/// is `None` the raw bytes are the payload reference (degraded mode).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImagePayload {
    pub bytes: Vec<u8>,
    /// MIME type as sniffed at upload ("image/png", "image/jpeg", ...).
    pub content_type: String,
    #[serde(default)]
    pub remote_url: Option<String>,
}

/// Logo content for one view. At most one active payload per view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LogoPayload {
    Image(ImagePayload),
    /// A preset-text token from the workshop catalog.
    Text { token: String },
}

impl LogoPayload {
    pub fn text(token: impl Into<String>) -> Self {
        LogoPayload::Text {
            token: token.into(),
        }
    }

    pub fn is_text(&self) -> bool {
        matches!(self, LogoPayload::Text { .. })
    }

    pub fn is_image(&self) -> bool {
        matches!(self, LogoPayload::Image(_))
    }
}

/// Payload + transform for a single view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct LogoSlot {
    payload: Option<LogoPayload>,
    #[serde(default)]
    transform: LogoTransform,
    /// Bumped on any payload change; preview caches key off this.
    #[serde(default)]
    revision: u64,
}

impl LogoSlot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn payload(&self) -> Option<&LogoPayload> {
        self.payload.as_ref()
    }

    pub fn transform(&self) -> LogoTransform {
        self.transform
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn is_empty(&self) -> bool {
        self.payload.is_none()
    }

    /// Replaces the payload and resets the transform to its default.
    pub fn set_payload(&mut self, payload: LogoPayload) {
        self.payload = Some(payload);
        self.transform = LogoTransform::default();
        self.revision += 1;
    }

    /// Removes the payload and resets the transform. Bumping the revision
    /// invalidates any derived preview cache.
    pub fn clear_payload(&mut self) {
        self.payload = None;
        self.transform = LogoTransform::default();
        self.revision += 1;
    }

    /// Merges a partial update through the geometry clamp.
    pub fn update_transform(&mut self, update: TransformUpdate, bounds: &ScaleBounds) {
        let merged = update.apply_to(&self.transform);
        self.transform = geometry::clamp(&merged, bounds);
    }

    /// Overwrites the remote reference of an image payload after a
    /// successful blob upload. No-op for text payloads.
    pub fn set_remote_url(&mut self, url: Option<String>) {
        if let Some(LogoPayload::Image(image)) = self.payload.as_mut() {
            image.remote_url = url;
        }
    }
}

/// The two per-view slots of a fiche.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct LogoSlots {
    front: LogoSlot,
    back: LogoSlot,
}

impl LogoSlots {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn slot(&self, view: View) -> &LogoSlot {
        match view {
            View::Front => &self.front,
            View::Back => &self.back,
        }
    }

    pub fn slot_mut(&mut self, view: View) -> &mut LogoSlot {
        match view {
            View::Front => &mut self.front,
            View::Back => &mut self.back,
        }
    }

    /// Views that currently hold a payload.
    pub fn occupied(&self) -> impl Iterator<Item = View> + '_ {
        View::ALL
            .into_iter()
            .filter(|v| !self.slot(*v).is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_payload_resets_only_that_view() {
        let mut slots = LogoSlots::new();
        let bounds = ScaleBounds::default();

        slots.slot_mut(View::Back).update_transform(
            TransformUpdate::position(80.0, 10.0),
            &bounds,
        );
        let back_before = slots.slot(View::Back).transform();

        slots
            .slot_mut(View::Front)
            .set_payload(LogoPayload::text("CREW"));

        assert_eq!(slots.slot(View::Front).transform(), LogoTransform::default());
        assert_eq!(slots.slot(View::Back).transform(), back_before);
    }

    #[test]
    fn clear_resets_transform_and_bumps_revision() {
        let mut slot = LogoSlot::new();
        let bounds = ScaleBounds::default();
        slot.set_payload(LogoPayload::text("TEAM"));
        slot.update_transform(TransformUpdate::scale(2.0), &bounds);
        let rev = slot.revision();

        slot.clear_payload();
        assert!(slot.is_empty());
        assert_eq!(slot.transform(), LogoTransform::default());
        assert!(slot.revision() > rev);
    }

    #[test]
    fn update_transform_goes_through_clamp() {
        let mut slot = LogoSlot::new();
        let bounds = ScaleBounds::default();
        slot.update_transform(TransformUpdate::position(140.0, -3.0), &bounds);
        let t = slot.transform();
        assert_eq!(t.x, 100.0);
        assert_eq!(t.y, 0.0);
    }
}
