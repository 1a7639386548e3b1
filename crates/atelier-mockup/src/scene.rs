//! Renderable mockup scene and its SVG serialization.
//!
//! A [`MockupScene`] is a plain value: rendering the same scene twice
//! yields byte-identical SVG, which the export pipeline and snapshot
//! tests rely on. All coordinates are reference-frame pixels; the target
//! viewport only enters through the uniform letterbox applied in
//! [`MockupScene::to_svg`].

use std::fmt::Write as _;

use atelier_core::geometry::{Letterbox, Placement, Rect, Size};
use atelier_core::logo::View;

/// Logo content resolved for rendering.
#[derive(Debug, Clone, PartialEq)]
pub enum SceneContent {
    /// Uploaded raster image, embedded as a data URI.
    Image {
        data_uri: String,
        /// Footprint at scale 1.0, reference pixels.
        width: f64,
        height: f64,
    },
    /// Preset text in the fiche's logo color.
    Text {
        text: String,
        color: String,
        font_size: f64,
    },
}

/// A placed logo with its cosmetic skew.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneLogo {
    pub placement: Placement,
    /// Degrees; derived from the vertical offset from center.
    pub skew_x: f64,
    /// Degrees; derived from the horizontal offset from center.
    pub skew_y: f64,
    pub content: SceneContent,
}

/// Deterministic description of one garment view.
#[derive(Debug, Clone, PartialEq)]
pub struct MockupScene {
    pub view: View,
    pub garment_color: String,
    /// Reference frame the scene is defined in.
    pub reference: Size,
    /// Torso clip region: visual clipping only.
    pub clip: Rect,
    /// Safe zone, drawn as the dashed placeholder when empty.
    pub safe_zone: Rect,
    /// `None` renders the placeholder.
    pub logo: Option<SceneLogo>,
}

impl MockupScene {
    /// Serializes the scene to SVG, letterboxing the reference frame into
    /// a `width` x `height` viewport. Pure function of the scene value.
    pub fn to_svg(&self, width: u32, height: u32) -> String {
        let lb = Letterbox::fit(self.reference, width as f64, height as f64);
        let mut svg = String::new();

        let _ = writeln!(
            svg,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{width}" height="{height}" viewBox="0 0 {width} {height}">"#
        );
        let _ = writeln!(
            svg,
            r#"<g transform="translate({:.2} {:.2}) scale({:.4})">"#,
            lb.offset_x, lb.offset_y, lb.scale
        );

        self.write_garment(&mut svg);
        let _ = writeln!(
            svg,
            r#"<clipPath id="torso-{view}"><rect x="{:.2}" y="{:.2}" width="{:.2}" height="{:.2}"/></clipPath>"#,
            self.clip.x,
            self.clip.y,
            self.clip.w,
            self.clip.h,
            view = self.view,
        );

        match &self.logo {
            Some(logo) => self.write_logo(&mut svg, logo),
            None => self.write_placeholder(&mut svg),
        }

        svg.push_str("</g>\n</svg>\n");
        svg
    }

    /// Simplified tee silhouette: torso panel plus two sleeves, all in
    /// the garment color.
    fn write_garment(&self, svg: &mut String) {
        let torso = Rect::new(
            self.reference.w * 0.175,
            self.reference.h * 0.10,
            self.reference.w * 0.65,
            self.reference.h * 0.80,
        );
        let sleeve_w = self.reference.w * 0.14;
        let sleeve_h = self.reference.h * 0.28;

        for (x, y, w, h) in [
            (torso.x, torso.y, torso.w, torso.h),
            (torso.x - sleeve_w, torso.y + 6.0, sleeve_w, sleeve_h),
            (torso.right(), torso.y + 6.0, sleeve_w, sleeve_h),
        ] {
            let _ = writeln!(
                svg,
                r##"<rect x="{x:.2}" y="{y:.2}" width="{w:.2}" height="{h:.2}" rx="14.00" fill="{}" stroke="#C8C8C8" stroke-width="1.50"/>"##,
                self.garment_color
            );
        }
    }

    fn write_placeholder(&self, svg: &mut String) {
        let z = &self.safe_zone;
        let _ = writeln!(
            svg,
            r##"<rect x="{:.2}" y="{:.2}" width="{:.2}" height="{:.2}" fill="none" stroke="#9A9A9A" stroke-width="1.50" stroke-dasharray="6 4"/>"##,
            z.x, z.y, z.w, z.h
        );
    }

    fn write_logo(&self, svg: &mut String, logo: &SceneLogo) {
        let p = &logo.placement;
        let _ = writeln!(
            svg,
            r#"<g clip-path="url(#torso-{view})" transform="translate({:.2} {:.2}) skewX({:.3}) skewY({:.3}) scale({:.4})">"#,
            p.px,
            p.py,
            logo.skew_x,
            logo.skew_y,
            p.scale,
            view = self.view,
        );
        match &logo.content {
            SceneContent::Image {
                data_uri,
                width,
                height,
            } => {
                let _ = writeln!(
                    svg,
                    r#"<image x="{:.2}" y="{:.2}" width="{width:.2}" height="{height:.2}" href="{data_uri}"/>"#,
                    -width / 2.0,
                    -height / 2.0,
                );
            }
            SceneContent::Text {
                text,
                color,
                font_size,
            } => {
                let _ = writeln!(
                    svg,
                    r#"<text x="0" y="0" fill="{color}" font-size="{font_size:.1}" font-family="sans-serif" font-weight="bold" text-anchor="middle" dominant-baseline="middle">{}</text>"#,
                    escape_text(text),
                );
            }
        }
        svg.push_str("</g>\n");
    }
}

fn escape_text(text: &str) -> String {
    text.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_is_escaped() {
        assert_eq!(escape_text("A&B <ok>"), "A&amp;B &lt;ok&gt;");
    }
}
