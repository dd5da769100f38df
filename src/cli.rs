// cli.rs - Command-line interface configuration
use std::path::PathBuf;

use clap::Parser;

use crate::frame::Variant;

#[derive(Parser, Debug, Clone, Default)]
#[command(name = "cube-field")]
#[command(about = "Animated cube field rendered with wgpu", long_about = None)]
pub struct Cli {
    /// Frame loop behaviour
    #[arg(long, value_enum)]
    pub variant: Option<Variant>,

    /// Number of randomly placed cubes
    #[arg(long = "cubes")]
    pub cube_count: Option<usize>,

    /// Seed for colours and placement (random when omitted)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Rotation step in radians per frame
    #[arg(long = "step")]
    pub rotation_step: Option<f64>,

    /// Exit after this many frames
    #[arg(long = "frames")]
    pub max_frames: Option<u64>,

    /// JSON settings file; flags override its values
    #[arg(long)]
    pub config: Option<PathBuf>,
}
