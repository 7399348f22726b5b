//! Headless demo: a sample path, a scripted target, and a tick loop standing
//! in for the host engine's per-frame update.

use glam::Vec3;

use crate::camera::PathBoundCamera;
use crate::cli::Cli;
use crate::clock::FrameClock;
use crate::config::{ControlPointConfig, SceneConfig, SplineConfig};
use crate::spline::{Curve, SplineSource, SplineType};

/// A gentle S-shaped path through the scene with a target start below it
pub fn demo_scene() -> SceneConfig {
    let positions = [
        [0.0, 2.0, 0.0],
        [4.0, 2.5, 2.0],
        [8.0, 3.0, 0.0],
        [12.0, 2.5, -2.0],
        [16.0, 2.0, 0.0],
        [20.0, 3.0, 2.0],
    ];
    SceneConfig {
        spline: SplineConfig {
            spline_type: SplineType::SmoothBezier,
            length_precision: 0.01,
            control_points: positions
                .iter()
                .enumerate()
                .map(|(i, &position)| ControlPointConfig {
                    position,
                    tangent: None,
                    time: i as f32,
                })
                .collect(),
            ..SplineConfig::default()
        },
        camera: Default::default(),
        target: [0.0, 0.0, 0.0],
    }
}

/// Scripted target: walks along the ground under the path, then teleports
/// far ahead to provoke a jump cut.
pub struct ScriptedTarget {
    position: Vec3,
    elapsed: f32,
    teleport_at: f32,
    teleported: bool,
}

impl ScriptedTarget {
    pub fn new(start: Vec3) -> Self {
        Self {
            position: start,
            elapsed: 0.0,
            teleport_at: 6.0,
            teleported: false,
        }
    }

    pub fn advance(&mut self, delta_time: f32) -> Vec3 {
        self.elapsed += delta_time;
        if !self.teleported && self.elapsed >= self.teleport_at {
            self.teleported = true;
            self.position += Vec3::new(14.0, 0.0, 0.0);
            log::info!("target teleported to {:?}", self.position);
        } else {
            self.position += Vec3::new(1.2 * delta_time, 0.0, (self.elapsed.sin()) * delta_time);
        }
        self.position
    }
}

pub fn run(cli: &Cli) -> anyhow::Result<()> {
    let mut scene = match &cli.scene {
        Some(path) => SceneConfig::from_path(path)?,
        None => demo_scene(),
    };
    if let Some(spline_type) = cli.spline_type {
        scene.spline.spline_type = spline_type;
    }

    let mut source = SplineSource::new(scene.spline.builder());
    let curve = source.curve()?;
    log::info!(
        "built {:?} spline: {} control points, length {:.2}",
        scene.spline.spline_type,
        curve.control_points().len(),
        curve.total_length()
    );

    let mut target = ScriptedTarget::new(Vec3::from_array(scene.target));
    let mut camera = PathBoundCamera::new(curve, scene.camera, Vec3::from_array(scene.target))?;
    let mut clock = FrameClock::default();

    let mut last_mode = camera.last_mode();
    for step in 0..cli.steps {
        let delta_time = cli.dt.unwrap_or_else(|| clock.tick());

        camera.set_target(target.advance(delta_time));
        let position = camera.tick(delta_time);

        if camera.last_mode() != last_mode {
            last_mode = camera.last_mode();
            log::info!("step {step}: mode -> {:?}", last_mode);
        }
        log::debug!(
            "step {step}: cursor {:.3} camera {:?} target {:?}",
            camera.cursor(),
            position,
            camera.target()
        );
    }

    log::info!(
        "finished: cursor {:.3}, camera at {:?}",
        camera.cursor(),
        camera.position()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demo_scene_builds() {
        let scene = demo_scene();
        let built = scene.spline.builder().build().unwrap();
        assert!(built.curve.total_length() > 0.0);
    }

    #[test]
    fn scripted_target_teleports_once() {
        let mut target = ScriptedTarget::new(Vec3::ZERO);
        let before = target.advance(5.9);
        let after = target.advance(0.2);
        assert!((after - before).length() > 10.0);

        let settled = target.advance(0.2);
        assert!((settled - after).length() < 1.0);
    }
}
