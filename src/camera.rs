//! Camera tracking a moving target while confined to a spline path.
//!
//! Assumptions carried over from the authoring side: the target is visible
//! from the path within the configured distances (no visibility checks), and
//! the path does not collide with the environment. Neither may hold in a
//! scene with moving geometry.

use glam::Vec3;

use crate::config::{CameraConfig, ConfigError};
use crate::spline::{Curve, SharedCurve};

/// Which of the three behaviors a tick resolved to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickMode {
    /// Target inside the tolerance ring; the camera does not move
    Holding,
    /// Target too far for too long; snapped to the closest control point
    JumpCut,
    /// Default: slide the cursor along the path toward the target
    Gliding,
}

/// A camera whose movement is bound to a spline curve. Each tick it decides
/// whether to hold still, glide along the path, or jump cut, then blends the
/// actual position toward the decision when damping is enabled.
pub struct PathBoundCamera {
    curve: SharedCurve,
    config: CameraConfig,
    target: Vec3,
    /// Current parameter position on the path
    cursor: f32,
    desired_position: Vec3,
    position: Vec3,
    jump_cut_timer: f32,
    last_mode: TickMode,
}

impl PathBoundCamera {
    /// Validates the configuration and places the camera on the control
    /// point closest to the target (an unconditional initial jump cut).
    pub fn new(curve: SharedCurve, config: CameraConfig, target: Vec3) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut camera = Self {
            curve,
            config,
            target,
            cursor: 0.0,
            desired_position: Vec3::ZERO,
            position: Vec3::ZERO,
            jump_cut_timer: 0.0,
            last_mode: TickMode::JumpCut,
        };
        camera.jump_cut_to_closest_control_point();
        camera.position = camera.desired_position;
        Ok(camera)
    }

    /// Advances the camera by `delta_time` seconds and returns the new
    /// (possibly damped) camera position.
    pub fn tick(&mut self, delta_time: f32) -> Vec3 {
        self.jump_cut_timer += delta_time;

        let desired = self.camera_target_position();
        self.desired_position = desired;

        self.position = if self.config.damping_enabled {
            let blend = (self.config.damping_constant * delta_time).clamp(0.0, 1.0);
            self.position.lerp(desired, blend)
        } else {
            desired
        };
        self.position
    }

    /// Resolves this tick's desired camera position. Exactly one of the
    /// three modes applies per call; the decision is observable through
    /// `last_mode`.
    pub fn camera_target_position(&mut self) -> Vec3 {
        let spline_velocity = self.curve.velocity(self.cursor);
        let distance = self.desired_position - self.target;

        let hold_radius_sq = self.config.max_distance_to_target * self.config.max_distance_to_target;
        if distance.length_squared() <= hold_radius_sq {
            // Target is closer than the preferred distance; nothing to do
            self.last_mode = TickMode::Holding;
            return self.desired_position;
        }

        let jump_radius_sq =
            self.config.max_distance_to_jump_cut * self.config.max_distance_to_jump_cut;
        if distance.length_squared() > jump_radius_sq
            && self.jump_cut_timer > self.config.min_time_between_jump_cuts
        {
            self.jump_cut_to_closest_control_point();
            self.last_mode = TickMode::JumpCut;
            return self.desired_position;
        }

        self.last_mode = TickMode::Gliding;

        // Approach the target only up to the tolerance ring, not exactly
        let distance = distance - distance.normalize() * self.config.max_distance_to_target;

        let mut estimated_delta = distance.length();
        let dot_product = distance.dot(spline_velocity);
        if dot_product > 0.0 {
            estimated_delta = -estimated_delta;
        }

        let desired_cursor = self.cursor + estimated_delta;

        // Accept the tentative cursor only if the search direction still
        // holds there; otherwise the step would pull the camera backwards
        // past the target in a single tick.
        let new_velocity = self.curve.velocity(desired_cursor);
        let new_distance = self.curve.position(desired_cursor) - self.target;
        let new_dot_product = new_velocity.dot(new_distance);
        if (new_dot_product > 0.0) == (dot_product > 0.0) {
            self.cursor = desired_cursor.clamp(0.0, self.curve.total_length());
        }
        self.curve.position(self.cursor)
    }

    /// Scans every control point for the one closest to the target, moves
    /// the cursor there, and resets the jump-cut cooldown.
    fn jump_cut_to_closest_control_point(&mut self) {
        let control_points = self.curve.control_points();
        let mut min_distance = f32::MAX;
        let mut closest = 0;
        for (index, point) in control_points.iter().enumerate() {
            let distance = (*point - self.target).length_squared();
            if distance < min_distance {
                min_distance = distance;
                closest = index;
            }
        }

        self.cursor = self.curve.params()[closest];
        self.desired_position = control_points[closest];
        self.jump_cut_timer = 0.0;
        log::debug!(
            "jump cut to control point {closest} (cursor {:.3})",
            self.cursor
        );
    }

    /// Swaps in a freshly published curve, keeping the cursor inside the new
    /// parameter range.
    pub fn set_curve(&mut self, curve: SharedCurve) {
        self.curve = curve;
        self.cursor = self.cursor.clamp(0.0, self.curve.total_length());
    }

    pub fn set_target(&mut self, target: Vec3) {
        self.target = target;
    }

    pub fn target(&self) -> Vec3 {
        self.target
    }

    pub fn set_preferred_distance(&mut self, distance: f32) {
        self.config.max_distance_to_target = distance;
    }

    /// Actual (damped) camera position
    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Position the decision logic is steering toward
    pub fn desired_position(&self) -> Vec3 {
        self.desired_position
    }

    pub fn cursor(&self) -> f32 {
        self.cursor
    }

    pub fn jump_cut_timer(&self) -> f32 {
        self.jump_cut_timer
    }

    /// Mode resolved by the most recent tick
    pub fn last_mode(&self) -> TickMode {
        self.last_mode
    }
}

impl std::fmt::Debug for PathBoundCamera {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PathBoundCamera")
            .field("cursor", &self.cursor)
            .field("position", &self.position)
            .field("desired_position", &self.desired_position)
            .field("target", &self.target)
            .field("jump_cut_timer", &self.jump_cut_timer)
            .field("last_mode", &self.last_mode)
            .finish()
    }
}
