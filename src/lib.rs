pub mod camera;
pub mod cli;
pub mod clock;
pub mod config;
pub mod demo;
pub mod math;
pub mod spline;

pub use camera::{PathBoundCamera, TickMode};
pub use config::{CameraConfig, SceneConfig, SplineConfig};
pub use spline::{
    BuildError, BuiltSpline, ControlPoint, Curve, SharedCurve, SplineBuilder, SplineSource,
    SplineType,
};
