//! Stateless mockup renderer.
//!
//! Pure function of (garment color, view, logo slot, zones) to a
//! [`MockupScene`]. The cosmetic skew is derived here from the
//! transform's offset from center; it never feeds back into clamping or
//! placement math, which stay in `atelier_core::geometry`.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;

use atelier_core::constants;
use atelier_core::fiche::defaults::ResolvedFiche;
use atelier_core::fiche::Fiche;
use atelier_core::geometry::{self, Rect, Size};
use atelier_core::logo::{LogoPayload, LogoSlot, View};

use crate::scene::{MockupScene, SceneContent, SceneLogo};

/// Placement zones for one view.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewZones {
    pub safe_zone: Rect,
    pub torso_clip: Rect,
}

/// Renderer configuration: the reference frame and per-view zones.
/// Passed in explicitly per instance, like every other zone consumer.
#[derive(Debug, Clone, PartialEq)]
pub struct MockupRenderer {
    reference: Size,
    front: ViewZones,
    back: ViewZones,
}

impl Default for MockupRenderer {
    fn default() -> Self {
        Self {
            reference: constants::REFERENCE_CANVAS,
            front: ViewZones {
                safe_zone: constants::SAFE_ZONE_FRONT,
                torso_clip: constants::TORSO_CLIP_FRONT,
            },
            back: ViewZones {
                safe_zone: constants::SAFE_ZONE_BACK,
                torso_clip: constants::TORSO_CLIP_BACK,
            },
        }
    }
}

impl MockupRenderer {
    pub fn new(reference: Size, front: ViewZones, back: ViewZones) -> Self {
        Self {
            reference,
            front,
            back,
        }
    }

    pub fn zones(&self, view: View) -> &ViewZones {
        match view {
            View::Front => &self.front,
            View::Back => &self.back,
        }
    }

    /// Renders one view of a fiche. Deterministic: identical slot, color
    /// and zones produce an identical scene (and so identical SVG).
    pub fn render(&self, garment_color: &str, logo_color: &str, view: View, slot: &LogoSlot) -> MockupScene {
        let zones = self.zones(view);
        let logo = slot.payload().map(|payload| {
            let transform = slot.transform();
            let placement = geometry::placement(&transform, &zones.safe_zone);
            // Cosmetic curvature hint; strictly presentation.
            let skew_y = (transform.x - 50.0) * -constants::SKEW_Y_FACTOR;
            let skew_x = (transform.y - 50.0) * constants::SKEW_X_FACTOR;

            let content = match payload {
                LogoPayload::Image(image) => SceneContent::Image {
                    data_uri: format!(
                        "data:{};base64,{}",
                        image.content_type,
                        BASE64.encode(&image.bytes)
                    ),
                    width: constants::LOGO_BASE_WIDTH,
                    height: constants::LOGO_BASE_HEIGHT,
                },
                LogoPayload::Text { token } => SceneContent::Text {
                    text: token.clone(),
                    color: logo_color.to_string(),
                    font_size: constants::TEXT_LOGO_FONT_SIZE,
                },
            };
            SceneLogo {
                placement,
                skew_x,
                skew_y,
                content,
            }
        });

        MockupScene {
            view,
            garment_color: garment_color.to_string(),
            reference: self.reference,
            clip: zones.torso_clip,
            safe_zone: zones.safe_zone,
            logo,
        }
    }

    /// Convenience: renders a view straight from a fiche, resolving the
    /// optional colors through the shared defaults.
    pub fn render_fiche(&self, fiche: &Fiche, view: View) -> MockupScene {
        let resolved = ResolvedFiche::new(fiche);
        self.render(
            resolved.garment_color(),
            resolved.logo_color(),
            view,
            fiche.logos.slot(view),
        )
    }
}
