mod basis;

pub use basis::{bezier_point, bezier_velocity, hermite_point, hermite_velocity};
