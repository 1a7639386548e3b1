//! Interactive logo placement editor.
//!
//! Presents the per-view logo slot as a draggable, uniformly scalable
//! object. All coordinate math goes through `atelier_core::geometry`:
//! input points are mapped from the on-screen canvas into the reference
//! frame, clamped against the interactive boundary continuously during
//! the gesture, and stored as clamped safe-zone percentages.
//!
//! Disabling the editor (after order validation) makes every object
//! non-interactive but still visible and still capturable.

use tracing::debug;

use atelier_core::constants;
use atelier_core::error::{EditorError, Error, FicheError, Result};
use atelier_core::fiche::defaults::ResolvedFiche;
use atelier_core::fiche::{parse_hex_color, Fiche};
use atelier_core::geometry::{self, Letterbox, Rect, TransformUpdate};
use atelier_core::logo::{ImagePayload, LogoPayload, LogoSlots, View};

use crate::config::EditorConfig;

/// Transient pointer-grab state for one view.
#[derive(Debug, Clone, Copy)]
struct DragState {
    /// Pointer offset from the object center at grab time, reference px.
    grab_dx: f64,
    grab_dy: f64,
}

/// Per-view interaction state (the slot itself lives in [`LogoSlots`]).
#[derive(Debug, Clone, Copy, Default)]
struct ViewUiState {
    selected: bool,
    drag: Option<DragState>,
}

/// Stateful editor surface over a fiche's logo slots.
#[derive(Debug, Clone)]
pub struct LogoEditor {
    config: EditorConfig,
    slots: LogoSlots,
    enabled: bool,
    garment_color: String,
    logo_color: String,
    front_ui: ViewUiState,
    back_ui: ViewUiState,
}

impl LogoEditor {
    /// Creates an empty, enabled editor.
    pub fn new(config: EditorConfig) -> Self {
        Self {
            config,
            slots: LogoSlots::new(),
            enabled: true,
            garment_color: constants::DEFAULT_GARMENT_COLOR.to_string(),
            logo_color: constants::DEFAULT_LOGO_COLOR.to_string(),
            front_ui: ViewUiState::default(),
            back_ui: ViewUiState::default(),
        }
    }

    /// Seeds the editor from a fiche: slots, resolved colors, and the
    /// enabled flag (validated fiches open read-only).
    pub fn from_fiche(config: EditorConfig, fiche: &Fiche) -> Self {
        let resolved = ResolvedFiche::new(fiche);
        Self {
            garment_color: resolved.garment_color().to_string(),
            logo_color: resolved.logo_color().to_string(),
            enabled: !fiche.validated,
            slots: fiche.logos.clone(),
            ..Self::new(config)
        }
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    /// Current slot state, written back to the fiche by the caller.
    pub fn slots(&self) -> &LogoSlots {
        &self.slots
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Enables or disables interaction. A disabled editor refuses every
    /// mutation but keeps its objects visible and capturable.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        if !enabled {
            self.clear_selection();
        }
    }

    pub fn garment_color(&self) -> &str {
        &self.garment_color
    }

    pub fn set_garment_color(&mut self, color: &str) -> Result<()> {
        self.garment_color = parse_hex_color(color).map_err(Error::Fiche)?;
        Ok(())
    }

    /// Current fill color of text objects. Image objects never use it.
    pub fn logo_color(&self) -> &str {
        &self.logo_color
    }

    /// Live-updates the fill color of every text-type object; image
    /// objects are unaffected. Allowed even while a drag is in flight.
    pub fn set_logo_color(&mut self, color: &str) -> Result<()> {
        self.logo_color = parse_hex_color(color).map_err(Error::Fiche)?;
        Ok(())
    }

    fn ui(&self, view: View) -> &ViewUiState {
        match view {
            View::Front => &self.front_ui,
            View::Back => &self.back_ui,
        }
    }

    fn ui_mut(&mut self, view: View) -> &mut ViewUiState {
        match view {
            View::Front => &mut self.front_ui,
            View::Back => &mut self.back_ui,
        }
    }

    fn ensure_enabled(&self) -> Result<()> {
        if self.enabled {
            Ok(())
        } else {
            Err(EditorError::Disabled.into())
        }
    }

    /// Letterbox of the reference frame into the on-screen canvas.
    pub fn letterbox(&self) -> Letterbox {
        Letterbox::fit(
            self.config.reference,
            self.config.canvas.w,
            self.config.canvas.h,
        )
    }

    // ----- object lifecycle -------------------------------------------

    /// Adds an uploaded raster image to a view. The bytes are sniffed;
    /// anything that is not PNG, JPEG or WebP is rejected with no
    /// mutation.
    pub fn place_image(&mut self, view: View, bytes: Vec<u8>) -> Result<()> {
        self.ensure_enabled()?;
        let format = image::guess_format(&bytes).map_err(|e| EditorError::UnsupportedImage {
            reason: e.to_string(),
        })?;
        let content_type = match format {
            image::ImageFormat::Png => "image/png",
            image::ImageFormat::Jpeg => "image/jpeg",
            image::ImageFormat::WebP => "image/webp",
            other => {
                return Err(EditorError::UnsupportedImage {
                    reason: format!("{other:?} is not accepted"),
                }
                .into())
            }
        };
        debug!(view = %view, content_type, "placing image logo");
        self.slots.slot_mut(view).set_payload(LogoPayload::Image(ImagePayload {
            bytes,
            content_type: content_type.to_string(),
            remote_url: None,
        }));
        self.ui_mut(view).selected = true;
        Ok(())
    }

    /// Adds a preset-text logo from the configured catalog.
    pub fn place_preset_text(&mut self, view: View, token: &str) -> Result<()> {
        self.ensure_enabled()?;
        if !self.config.preset_texts.iter().any(|t| t == token) {
            return Err(FicheError::UnknownPreset {
                token: token.to_string(),
            }
            .into());
        }
        debug!(view = %view, token, "placing preset text logo");
        self.slots.slot_mut(view).set_payload(LogoPayload::text(token));
        self.ui_mut(view).selected = true;
        Ok(())
    }

    /// Deletes the selected object: payload removed, transform reset.
    pub fn delete_selected(&mut self, view: View) -> Result<()> {
        self.ensure_enabled()?;
        if self.slots.slot(view).is_empty() {
            return Err(EditorError::NoPayload { view }.into());
        }
        self.slots.slot_mut(view).clear_payload();
        *self.ui_mut(view) = ViewUiState::default();
        Ok(())
    }

    // ----- selection ---------------------------------------------------

    pub fn is_selected(&self, view: View) -> bool {
        self.ui(view).selected
    }

    /// Selects the view's object when the canvas point hits it.
    pub fn select_at(&mut self, view: View, canvas_x: f64, canvas_y: f64) -> bool {
        if !self.enabled {
            return false;
        }
        let hit = self.hit_test(view, canvas_x, canvas_y);
        self.ui_mut(view).selected = hit;
        hit
    }

    /// Clears selection on both views (export capture requires this).
    pub fn clear_selection(&mut self) {
        self.front_ui = ViewUiState::default();
        self.back_ui = ViewUiState::default();
    }

    // ----- geometry helpers -------------------------------------------

    /// Bounding box of the placed object in reference pixels.
    pub fn object_bounds(&self, view: View) -> Option<Rect> {
        let slot = self.slots.slot(view);
        slot.payload()?;
        let t = slot.transform();
        let p = geometry::placement(&t, self.config.safe_zone(view));
        let half_w = constants::LOGO_BASE_WIDTH * p.scale / 2.0;
        let half_h = constants::LOGO_BASE_HEIGHT * p.scale / 2.0;
        Some(Rect::new(
            p.px - half_w,
            p.py - half_h,
            half_w * 2.0,
            half_h * 2.0,
        ))
    }

    /// Hit test in canvas coordinates.
    pub fn hit_test(&self, view: View, canvas_x: f64, canvas_y: f64) -> bool {
        let (rx, ry) = self.letterbox().to_reference(canvas_x, canvas_y);
        self.object_bounds(view)
            .is_some_and(|b| b.contains(rx, ry))
    }

    // ----- direct manipulation ----------------------------------------

    /// Starts a move gesture. Returns false when nothing was grabbed.
    pub fn begin_drag(&mut self, view: View, canvas_x: f64, canvas_y: f64) -> bool {
        if !self.enabled || !self.hit_test(view, canvas_x, canvas_y) {
            return false;
        }
        let (rx, ry) = self.letterbox().to_reference(canvas_x, canvas_y);
        let t = self.slots.slot(view).transform();
        let p = geometry::placement(&t, self.config.safe_zone(view));
        self.ui_mut(view).selected = true;
        self.ui_mut(view).drag = Some(DragState {
            grab_dx: rx - p.px,
            grab_dy: ry - p.py,
        });
        true
    }

    /// Moves the grabbed object. The center is clamped on every call so
    /// the object's bounding box never leaves the interactive boundary
    /// during the gesture, not only on release. The stored transform
    /// additionally passes through the geometry clamp.
    pub fn drag_to(&mut self, view: View, canvas_x: f64, canvas_y: f64) {
        if !self.enabled {
            return;
        }
        let Some(drag) = self.ui(view).drag else {
            return;
        };
        let (rx, ry) = self.letterbox().to_reference(canvas_x, canvas_y);
        let cx = rx - drag.grab_dx;
        let cy = ry - drag.grab_dy;

        let t = self.slots.slot(view).transform();
        let half_w = constants::LOGO_BASE_WIDTH * t.scale / 2.0;
        let half_h = constants::LOGO_BASE_HEIGHT * t.scale / 2.0;
        let boundary = self.config.boundary(view);

        // Range the center may occupy so the box stays inside the
        // boundary; collapses to the boundary center when the object is
        // wider than the boundary itself.
        let allowed = Rect::new(
            boundary.x + half_w.min(boundary.w / 2.0),
            boundary.y + half_h.min(boundary.h / 2.0),
            (boundary.w - 2.0 * half_w).max(0.0),
            (boundary.h - 2.0 * half_h).max(0.0),
        );
        let (cx, cy) = allowed.clamp_point(cx, cy);

        let zone = self.config.safe_zone(view);
        let (x_pct, y_pct) = geometry::to_percent(cx, cy, zone);
        self.slots.slot_mut(view).update_transform(
            TransformUpdate::position(x_pct, y_pct),
            &self.config.scale_bounds,
        );
    }

    /// Ends the move gesture.
    pub fn end_drag(&mut self, view: View) {
        self.ui_mut(view).drag = None;
    }

    /// Applies a transform update from the numeric form fields, merged
    /// through the geometry clamp like every other write.
    pub fn update_transform(&mut self, view: View, update: TransformUpdate) -> Result<()> {
        self.ensure_enabled()?;
        if self.slots.slot(view).is_empty() {
            return Err(EditorError::NoPayload { view }.into());
        }
        self.slots
            .slot_mut(view)
            .update_transform(update, &self.config.scale_bounds);
        Ok(())
    }

    /// Uniformly scales the selected object (aspect ratio locked), the
    /// factor multiplying the current scale and clamping to the bounds.
    pub fn scale_selected(&mut self, view: View, factor: f64) -> Result<()> {
        self.ensure_enabled()?;
        if self.slots.slot(view).is_empty() {
            return Err(EditorError::NoPayload { view }.into());
        }
        let current = self.slots.slot(view).transform().scale;
        self.slots.slot_mut(view).update_transform(
            TransformUpdate::scale(current * factor),
            &self.config.scale_bounds,
        );
        Ok(())
    }
}
