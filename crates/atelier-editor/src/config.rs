//! Per-instance editor configuration.
//!
//! Every editor receives its own configuration at construction time;
//! there is deliberately no process-wide registry of canvas settings.

use atelier_core::constants;
use atelier_core::geometry::{Rect, ScaleBounds, Size};
use atelier_core::logo::View;

/// Placement zones one editor view works against.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewZone {
    pub safe_zone: Rect,
}

/// Configuration for one [`crate::LogoEditor`] instance.
#[derive(Debug, Clone, PartialEq)]
pub struct EditorConfig {
    /// On-screen canvas size in device pixels.
    pub canvas: Size,
    /// Reference frame the zones are defined in.
    pub reference: Size,
    pub front: ViewZone,
    pub back: ViewZone,
    /// Reference pixels the logo's bounding box may overshoot the safe
    /// zone during a gesture. The interactive boundary is the safe zone
    /// inflated by this margin (a superset of the zone).
    pub boundary_slack: f64,
    pub scale_bounds: ScaleBounds,
    /// Tokens accepted as preset-text logos.
    pub preset_texts: Vec<String>,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            canvas: constants::REFERENCE_CANVAS,
            reference: constants::REFERENCE_CANVAS,
            front: ViewZone {
                safe_zone: constants::SAFE_ZONE_FRONT,
            },
            back: ViewZone {
                safe_zone: constants::SAFE_ZONE_BACK,
            },
            boundary_slack: constants::BOUNDARY_SLACK,
            scale_bounds: ScaleBounds::default(),
            preset_texts: vec![
                "CREW".to_string(),
                "STAFF".to_string(),
                "TEAM".to_string(),
                "SECURITY".to_string(),
            ],
        }
    }
}

impl EditorConfig {
    pub fn safe_zone(&self, view: View) -> &Rect {
        match view {
            View::Front => &self.front.safe_zone,
            View::Back => &self.back.safe_zone,
        }
    }

    /// The interactive boundary: safe zone inflated by the slack.
    pub fn boundary(&self, view: View) -> Rect {
        self.safe_zone(view).inflate(self.boundary_slack)
    }
}
