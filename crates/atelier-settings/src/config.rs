//! Workshop configuration.
//!
//! One TOML file holds everything an operator may tune: the per-view
//! placement zones (all defined in the fixed reference frame), logo scale
//! bounds, the interactive boundary slack, the preset-text catalog, the
//! step-revert policy and the client notification template. Defaults
//! mirror `atelier_core::constants`.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use atelier_core::constants;
use atelier_core::geometry::{Rect, ScaleBounds, Size};

use crate::error::{SettingsError, SettingsResult};

/// Placement zones for one view.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ZoneConfig {
    /// Safe zone: the rectangle placement percentages map into.
    pub safe_zone: Rect,
    /// Torso clip: visual clipping only, larger than the safe zone.
    pub torso_clip: Rect,
}

/// Complete workshop configuration.
///
/// Scalar settings come first so the TOML rendering stays flat values
/// followed by the zone tables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkshopConfig {
    /// Reference pixels a drag may overshoot the safe zone.
    pub boundary_slack: f64,
    /// When true, reverting a step also unsets every later step.
    pub cascade_revert: bool,
    /// Client message template; `{client}` and `{reference}` are
    /// substituted at send time.
    pub notification_template: String,
    /// Tokens offered as preset-text logos.
    pub preset_texts: Vec<String>,
    /// Fixed reference canvas the zones are defined in.
    pub reference_canvas: Size,
    pub scale_bounds: ScaleBounds,
    pub front: ZoneConfig,
    pub back: ZoneConfig,
}

impl Default for WorkshopConfig {
    fn default() -> Self {
        Self {
            boundary_slack: constants::BOUNDARY_SLACK,
            cascade_revert: false,
            notification_template:
                "Hello {client}, your order {reference} is ready for pickup!".to_string(),
            preset_texts: vec![
                "CREW".to_string(),
                "STAFF".to_string(),
                "TEAM".to_string(),
                "SECURITY".to_string(),
            ],
            reference_canvas: constants::REFERENCE_CANVAS,
            scale_bounds: ScaleBounds::default(),
            front: ZoneConfig {
                safe_zone: constants::SAFE_ZONE_FRONT,
                torso_clip: constants::TORSO_CLIP_FRONT,
            },
            back: ZoneConfig {
                safe_zone: constants::SAFE_ZONE_BACK,
                torso_clip: constants::TORSO_CLIP_BACK,
            },
        }
    }
}

impl WorkshopConfig {
    /// Zones for a view.
    pub fn zones(&self, view: atelier_core::logo::View) -> &ZoneConfig {
        match view {
            atelier_core::logo::View::Front => &self.front,
            atelier_core::logo::View::Back => &self.back,
        }
    }

    /// Loads configuration from a TOML file.
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| SettingsError::LoadError(format!("{}: {e}", path.display())))?;
        let config: WorkshopConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Saves configuration to a TOML file, creating parent directories.
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)
            .map_err(|e| SettingsError::SaveError(format!("{}: {e}", path.display())))?;
        Ok(())
    }

    /// Platform config file location (`<config_dir>/atelier/workshop.toml`).
    pub fn default_path() -> SettingsResult<PathBuf> {
        let dir = dirs::config_dir()
            .ok_or_else(|| SettingsError::ConfigDirectory("no config directory".to_string()))?;
        Ok(dir.join("atelier").join("workshop.toml"))
    }

    /// Checks the internal consistency of the configuration.
    pub fn validate(&self) -> SettingsResult<()> {
        if self.scale_bounds.min <= 0.0 || self.scale_bounds.min >= self.scale_bounds.max {
            return Err(SettingsError::InvalidSetting {
                key: "scale_bounds".to_string(),
                reason: "min must be positive and below max".to_string(),
            });
        }
        if self.boundary_slack < 0.0 {
            return Err(SettingsError::InvalidSetting {
                key: "boundary_slack".to_string(),
                reason: "must not be negative".to_string(),
            });
        }
        for (name, zones) in [("front", &self.front), ("back", &self.back)] {
            if zones.safe_zone.w <= 0.0 || zones.safe_zone.h <= 0.0 {
                return Err(SettingsError::InvalidSetting {
                    key: format!("{name}.safe_zone"),
                    reason: "zone must have positive extent".to_string(),
                });
            }
            let canvas = Rect::new(0.0, 0.0, self.reference_canvas.w, self.reference_canvas.h);
            if !canvas.contains(zones.safe_zone.x, zones.safe_zone.y)
                || !canvas.contains(zones.safe_zone.right(), zones.safe_zone.bottom())
            {
                return Err(SettingsError::InvalidSetting {
                    key: format!("{name}.safe_zone"),
                    reason: "zone must lie inside the reference canvas".to_string(),
                });
            }
        }
        if self.preset_texts.iter().any(|t| t.trim().is_empty()) {
            return Err(SettingsError::InvalidSetting {
                key: "preset_texts".to_string(),
                reason: "tokens must not be blank".to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        WorkshopConfig::default().validate().unwrap();
    }

    #[test]
    fn toml_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("workshop.toml");

        let mut config = WorkshopConfig::default();
        config.preset_texts.push("VOLUNTEER".to_string());
        config.cascade_revert = true;
        config.save_to_file(&path).unwrap();

        let loaded = WorkshopConfig::load_from_file(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn invalid_scale_bounds_refused() {
        let mut config = WorkshopConfig::default();
        config.scale_bounds.min = 3.0;
        config.scale_bounds.max = 2.0;
        assert!(matches!(
            config.validate(),
            Err(SettingsError::InvalidSetting { .. })
        ));
    }

    #[test]
    fn zone_outside_canvas_refused() {
        let mut config = WorkshopConfig::default();
        config.front.safe_zone.x = 390.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("partial.toml");
        std::fs::write(&path, "cascade_revert = true\n").unwrap();

        let loaded = WorkshopConfig::load_from_file(&path).unwrap();
        assert!(loaded.cascade_revert);
        assert_eq!(loaded.reference_canvas, constants::REFERENCE_CANVAS);
    }
}
