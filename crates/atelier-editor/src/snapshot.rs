//! Rasterized snapshot capture for the editor surface.
//!
//! Draws the current visual state of one view (garment fill, safe-zone
//! guide, placed logo) into a pixmap at canvas resolution and encodes it
//! as PNG. Capture works on disabled editors too; identical editor state
//! produces identical bytes.

use rusttype::{point, OutlineBuilder, Scale};
use tiny_skia::{
    Color, IntSize, Paint, PathBuilder, Pixmap, PixmapPaint, Stroke, StrokeDash, Transform,
};
use tracing::warn;

use atelier_core::constants;
use atelier_core::error::{EditorError, Error, Result};
use atelier_core::geometry;
use atelier_core::logo::{ImagePayload, LogoPayload, View};

use crate::canvas::LogoEditor;
use crate::font;

impl LogoEditor {
    /// Produces a PNG snapshot of the view's current visual state.
    pub fn capture_snapshot(&self, view: View) -> Result<Vec<u8>> {
        let w = self.config().canvas.w.round() as u32;
        let h = self.config().canvas.h.round() as u32;
        let mut pixmap = Pixmap::new(w, h).ok_or_else(|| {
            Error::Editor(EditorError::SnapshotFailed {
                reason: format!("invalid canvas size {w}x{h}"),
            })
        })?;
        pixmap.fill(Color::from_rgba8(0xF4, 0xF4, 0xF4, 0xFF));

        let lb = self.letterbox();
        self.draw_garment(&mut pixmap, &lb);
        self.draw_safe_zone(&mut pixmap, &lb, view);
        self.draw_logo(&mut pixmap, &lb, view)?;

        pixmap.encode_png().map_err(|e| {
            Error::Editor(EditorError::SnapshotFailed {
                reason: e.to_string(),
            })
        })
    }

    fn draw_garment(&self, pixmap: &mut Pixmap, lb: &geometry::Letterbox) {
        let reference = self.config().reference;
        let torso = geometry::Rect::new(
            reference.w * 0.175,
            reference.h * 0.10,
            reference.w * 0.65,
            reference.h * 0.80,
        );
        let mut paint = Paint::default();
        paint.set_color(parse_color(self.garment_color()));
        paint.anti_alias = true;
        if let Some(rect) = skia_rect(&torso, lb) {
            pixmap.fill_rect(rect, &paint, Transform::identity(), None);
        }
    }

    fn draw_safe_zone(&self, pixmap: &mut Pixmap, lb: &geometry::Letterbox, view: View) {
        let zone = self.config().safe_zone(view);
        let (x, y) = lb.to_target(zone.x, zone.y);
        let (r, b) = lb.to_target(zone.right(), zone.bottom());

        let mut pb = PathBuilder::new();
        pb.move_to(x as f32, y as f32);
        pb.line_to(r as f32, y as f32);
        pb.line_to(r as f32, b as f32);
        pb.line_to(x as f32, b as f32);
        pb.close();
        let Some(path) = pb.finish() else { return };

        let mut paint = Paint::default();
        paint.set_color(Color::from_rgba8(0x9A, 0x9A, 0x9A, 0xFF));
        paint.anti_alias = true;
        let stroke = Stroke {
            width: 1.5,
            dash: StrokeDash::new(vec![6.0, 4.0], 0.0),
            ..Stroke::default()
        };
        pixmap.stroke_path(&path, &paint, &stroke, Transform::identity(), None);
    }

    fn draw_logo(&self, pixmap: &mut Pixmap, lb: &geometry::Letterbox, view: View) -> Result<()> {
        let slot = self.slots().slot(view);
        let Some(payload) = slot.payload() else {
            return Ok(());
        };
        let t = slot.transform();
        let p = geometry::placement(&t, self.config().safe_zone(view));
        let (cx, cy) = lb.to_target(p.px, p.py);

        match payload {
            LogoPayload::Image(image) => {
                self.draw_image_logo(pixmap, image, cx, cy, p.scale * lb.scale)
            }
            LogoPayload::Text { token } => {
                self.draw_text_logo(pixmap, token, cx, cy, p.scale * lb.scale);
                Ok(())
            }
        }
    }

    fn draw_image_logo(
        &self,
        pixmap: &mut Pixmap,
        image: &ImagePayload,
        cx: f64,
        cy: f64,
        scale: f64,
    ) -> Result<()> {
        let decoded = image::load_from_memory(&image.bytes)
            .map_err(|e| {
                Error::Editor(EditorError::SnapshotFailed {
                    reason: format!("image decode: {e}"),
                })
            })?
            .to_rgba8();
        let (iw, ih) = decoded.dimensions();
        let logo_pixmap = premultiplied_pixmap(decoded.into_raw(), iw, ih).ok_or_else(|| {
            Error::Editor(EditorError::SnapshotFailed {
                reason: "empty image".to_string(),
            })
        })?;

        // Footprint is the nominal logo box; the raster is stretched into
        // it regardless of its own resolution.
        let target_w = constants::LOGO_BASE_WIDTH * scale;
        let target_h = constants::LOGO_BASE_HEIGHT * scale;
        let sx = (target_w / iw as f64) as f32;
        let sy = (target_h / ih as f64) as f32;
        let tx = (cx - target_w / 2.0) as f32;
        let ty = (cy - target_h / 2.0) as f32;

        pixmap.draw_pixmap(
            0,
            0,
            logo_pixmap.as_ref(),
            &PixmapPaint::default(),
            Transform::from_row(sx, 0.0, 0.0, sy, tx, ty),
            None,
        );
        Ok(())
    }

    fn draw_text_logo(&self, pixmap: &mut Pixmap, text: &str, cx: f64, cy: f64, scale: f64) {
        let px_size = (constants::TEXT_LOGO_FONT_SIZE * scale) as f32;
        let color = parse_color(self.logo_color());

        let Some(font) = font::text_font() else {
            // Headless fallback: a filled badge where the text would be.
            warn!("no system font available, rendering text logo as badge");
            let w = px_size as f64 * 0.62 * text.chars().count().max(1) as f64;
            let h = px_size as f64;
            let badge = geometry::Rect::new(cx - w / 2.0, cy - h / 2.0, w, h);
            let mut paint = Paint::default();
            paint.set_color(color);
            if let Some(rect) = tiny_skia::Rect::from_xywh(
                badge.x as f32,
                badge.y as f32,
                badge.w as f32,
                badge.h as f32,
            ) {
                pixmap.fill_rect(rect, &paint, Transform::identity(), None);
            }
            return;
        };

        let scale = Scale::uniform(px_size);
        let v = font.v_metrics(scale);
        let width: f32 = font
            .layout(text, scale, point(0.0, 0.0))
            .map(|g| g.position().x + g.unpositioned().h_metrics().advance_width)
            .last()
            .unwrap_or(0.0);

        let start = point(cx as f32 - width / 2.0, cy as f32 + (v.ascent + v.descent) / 2.0);

        let mut builder = GlyphPathBuilder::new();
        for glyph in font.layout(text, scale, start) {
            glyph.build_outline(&mut builder);
        }
        let Some(path) = builder.finish() else { return };

        let mut paint = Paint::default();
        paint.set_color(color);
        paint.anti_alias = true;
        pixmap.fill_path(
            &path,
            &paint,
            tiny_skia::FillRule::Winding,
            Transform::identity(),
            None,
        );
    }
}

/// Builds one tiny-skia path out of rusttype glyph outlines. Layout
/// already positions the glyphs, so coordinates pass through verbatim.
struct GlyphPathBuilder {
    pb: PathBuilder,
    open: bool,
}

impl GlyphPathBuilder {
    fn new() -> Self {
        Self {
            pb: PathBuilder::new(),
            open: false,
        }
    }

    fn finish(mut self) -> Option<tiny_skia::Path> {
        if self.open {
            self.pb.close();
        }
        self.pb.finish()
    }
}

impl OutlineBuilder for GlyphPathBuilder {
    fn move_to(&mut self, x: f32, y: f32) {
        if self.open {
            self.pb.close();
        }
        self.pb.move_to(x, y);
        self.open = true;
    }

    fn line_to(&mut self, x: f32, y: f32) {
        self.pb.line_to(x, y);
    }

    fn quad_to(&mut self, x1: f32, y1: f32, x: f32, y: f32) {
        self.pb.quad_to(x1, y1, x, y);
    }

    fn curve_to(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, x: f32, y: f32) {
        self.pb.cubic_to(x1, y1, x2, y2, x, y);
    }

    fn close(&mut self) {
        self.pb.close();
        self.open = false;
    }
}

/// Straight-alpha RGBA bytes to a premultiplied tiny-skia pixmap.
fn premultiplied_pixmap(mut rgba: Vec<u8>, w: u32, h: u32) -> Option<Pixmap> {
    for px in rgba.chunks_exact_mut(4) {
        let a = px[3] as u16;
        px[0] = ((px[0] as u16 * a) / 255) as u8;
        px[1] = ((px[1] as u16 * a) / 255) as u8;
        px[2] = ((px[2] as u16 * a) / 255) as u8;
    }
    Pixmap::from_vec(rgba, IntSize::from_wh(w, h)?)
}

fn skia_rect(rect: &geometry::Rect, lb: &geometry::Letterbox) -> Option<tiny_skia::Rect> {
    let (x, y) = lb.to_target(rect.x, rect.y);
    let (r, b) = lb.to_target(rect.right(), rect.bottom());
    tiny_skia::Rect::from_ltrb(x as f32, y as f32, r as f32, b as f32)
}

/// "#RRGGBB" to an opaque color. Colors are validated at the edit
/// boundary; malformed input renders black.
fn parse_color(hex: &str) -> Color {
    let parse = |s: &str| u8::from_str_radix(s, 16).ok();
    if hex.len() == 7 && hex.starts_with('#') {
        if let (Some(r), Some(g), Some(b)) =
            (parse(&hex[1..3]), parse(&hex[3..5]), parse(&hex[5..7]))
        {
            return Color::from_rgba8(r, g, b, 0xFF);
        }
    }
    Color::from_rgba8(0, 0, 0, 0xFF)
}
