//! Tunables for snapping and editor seeding.

use serde::{Deserialize, Serialize};

/// Boundary-snapping constants.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SnapConfig {
    /// Seconds a boundary may move before an adjacent sentence is preferred.
    pub max_drift: f64,
    /// Seconds subtracted from the snapped start.
    pub pad_start: f64,
    /// Seconds added to the snapped end.
    pub pad_end: f64,
    /// Snaps producing a shorter clip are discarded.
    pub min_clip_duration: f64,
}

impl Default for SnapConfig {
    fn default() -> Self {
        Self {
            max_drift: 3.0,
            pad_start: 0.15,
            pad_end: 0.3,
            min_clip_duration: 30.0,
        }
    }
}

/// Values used when a new editing session is seeded.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    pub default_crop_x: f64,
    pub default_pixels_per_second: f64,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            default_crop_x: 0.5,
            default_pixels_per_second: 50.0,
        }
    }
}

/// Top-level configuration file layout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub snap: SnapConfig,
    pub editor: EditorConfig,
}

#[cfg(test)]
mod tests {
    use super::EngineConfig;

    #[test]
    fn partial_config_falls_back_to_defaults() {
        let config: EngineConfig =
            serde_json::from_str(r#"{ "snap": { "max_drift": 5.0 } }"#).expect("valid config");
        assert_eq!(config.snap.max_drift, 5.0);
        assert_eq!(config.snap.min_clip_duration, 30.0);
        assert_eq!(config.editor.default_crop_x, 0.5);
    }
}
