use clap::Parser;

use path_camera::cli::Cli;
use path_camera::demo;

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    demo::run(&cli)
}
