// cli.rs - Command-line interface configuration
use std::path::PathBuf;

use clap::Parser;

use crate::spline::SplineType;

#[derive(Parser, Debug, Clone)]
#[command(name = "path-camera")]
#[command(about = "Path-bound tracking camera demo", long_about = None)]
pub struct Cli {
    /// Scene configuration JSON; a built-in demo scene is used when omitted
    #[arg(long)]
    pub scene: Option<PathBuf>,

    /// Override the scene's spline type
    #[arg(long, value_enum)]
    pub spline_type: Option<SplineType>,

    /// Number of simulation steps to run
    #[arg(long, default_value_t = 600)]
    pub steps: u32,

    /// Fixed timestep in seconds; wall-clock deltas are used when omitted
    #[arg(long)]
    pub dt: Option<f32>,
}
