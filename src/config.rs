use crate::state::{RenderConfig, DEFAULT_SAMPLES};
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

/// Point-light shadow casting in the terminal
#[derive(Debug, Parser)]
#[command(version, about)]
pub struct Args {
    /// Number of rays cast around the light each frame (at least 60)
    #[arg(short, long, default_value_t = DEFAULT_SAMPLES)]
    pub samples: usize,

    /// Start with the debug rays visible
    #[arg(short = 'r', long)]
    pub show_rays: bool,

    /// Delay between frames, in milliseconds
    #[arg(long, default_value_t = 10)]
    pub frame_ms: u64,

    /// Write log records to this file instead of stderr
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

impl Args {
    pub fn render_config(&self) -> RenderConfig {
        RenderConfig::new(self.samples, self.show_rays)
    }

    pub fn frame_delay(&self) -> Duration {
        Duration::from_millis(self.frame_ms)
    }
}
