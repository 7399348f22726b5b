use std::fs;
use std::path::Path;

use anyhow::Context;
use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::spline::{ControlPoint, SplineBuilder, SplineType, DEFAULT_LENGTH_PRECISION};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{field} must be positive, got {value}")]
    NonPositive { field: &'static str, value: f32 },
    #[error(
        "max_distance_to_target ({max_distance_to_target}) must not exceed \
         max_distance_to_jump_cut ({max_distance_to_jump_cut})"
    )]
    ThresholdOrder {
        max_distance_to_target: f32,
        max_distance_to_jump_cut: f32,
    },
}

/// Tuning for the path-bound camera
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Tolerance ring radius: inside it the camera holds still
    pub max_distance_to_target: f32,
    /// Beyond this distance the camera may jump cut to the closest control point
    pub max_distance_to_jump_cut: f32,
    /// Cooldown between distance-based jump cuts, in seconds
    pub min_time_between_jump_cuts: f32,
    pub damping_enabled: bool,
    pub damping_constant: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            max_distance_to_target: 2.0,
            max_distance_to_jump_cut: 4.0,
            min_time_between_jump_cuts: 3.0,
            damping_enabled: true,
            damping_constant: 1.0,
        }
    }
}

impl CameraConfig {
    /// The two distance thresholds bound mutually exclusive ranges, so the
    /// tolerance ring may not be wider than the jump-cut trigger.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [
            ("max_distance_to_target", self.max_distance_to_target),
            ("max_distance_to_jump_cut", self.max_distance_to_jump_cut),
            ("min_time_between_jump_cuts", self.min_time_between_jump_cuts),
        ] {
            if value <= 0.0 {
                return Err(ConfigError::NonPositive { field, value });
            }
        }
        if self.max_distance_to_target > self.max_distance_to_jump_cut {
            return Err(ConfigError::ThresholdOrder {
                max_distance_to_target: self.max_distance_to_target,
                max_distance_to_jump_cut: self.max_distance_to_jump_cut,
            });
        }
        Ok(())
    }
}

/// One authored control point as it appears in a scene file
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ControlPointConfig {
    pub position: [f32; 3],
    #[serde(default)]
    pub tangent: Option<[f32; 3]>,
    pub time: f32,
}

impl From<ControlPointConfig> for ControlPoint {
    fn from(config: ControlPointConfig) -> Self {
        Self {
            position: Vec3::from_array(config.position),
            tangent: config.tangent.map(Vec3::from_array),
            time: config.time,
        }
    }
}

/// Curve authoring configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SplineConfig {
    pub spline_type: SplineType,
    pub length_precision: f32,
    pub tension: f32,
    pub continuity: f32,
    pub bias: f32,
    pub control_points: Vec<ControlPointConfig>,
}

impl Default for SplineConfig {
    fn default() -> Self {
        Self {
            spline_type: SplineType::Linear,
            length_precision: DEFAULT_LENGTH_PRECISION,
            tension: 0.0,
            continuity: 0.0,
            bias: 0.0,
            control_points: Vec::new(),
        }
    }
}

impl SplineConfig {
    pub fn builder(&self) -> SplineBuilder {
        SplineBuilder::new(self.spline_type)
            .length_precision(self.length_precision)
            .kochanek_bartels_params(self.tension, self.continuity, self.bias)
            .points(self.control_points.iter().copied().map(ControlPoint::from))
    }
}

/// A complete demo scene: the path, the camera tuning, and the target's
/// starting position.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SceneConfig {
    pub spline: SplineConfig,
    #[serde(default)]
    pub camera: CameraConfig,
    #[serde(default)]
    pub target: [f32; 3],
}

impl SceneConfig {
    pub fn from_path(path: &Path) -> anyhow::Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read scene file {}", path.display()))?;
        serde_json::from_str(&text)
            .with_context(|| format!("failed to parse scene file {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_camera_config_is_valid() {
        assert!(CameraConfig::default().validate().is_ok());
    }

    #[test]
    fn threshold_order_is_rejected() {
        let config = CameraConfig {
            max_distance_to_target: 5.0,
            max_distance_to_jump_cut: 4.0,
            ..CameraConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ThresholdOrder { .. })
        ));
    }

    #[test]
    fn scene_config_round_trips_through_json() {
        let scene = SceneConfig {
            spline: SplineConfig {
                spline_type: SplineType::SmoothBezier,
                control_points: vec![ControlPointConfig {
                    position: [1.0, 2.0, 3.0],
                    tangent: None,
                    time: 0.0,
                }],
                ..SplineConfig::default()
            },
            camera: CameraConfig::default(),
            target: [0.0, 1.0, 0.0],
        };
        let json = serde_json::to_string(&scene).unwrap();
        let parsed: SceneConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.spline.spline_type, SplineType::SmoothBezier);
        assert_eq!(parsed.spline.control_points.len(), 1);
    }
}
