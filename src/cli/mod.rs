//! CLI Module
//!
//! Command-line interface for the varispeed playback demo.

pub mod commands;

use clap::Parser;

/// Varispeed - playback transport demo over a simulated engine
#[derive(Parser, Debug)]
#[command(name = "varispeed")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Bundled track reference; the file stem becomes the display title
    #[arg(short, long, default_value = "./assets/music/Popular-Potpourri.mp3")]
    pub track: String,

    /// Simulated track duration in seconds
    #[arg(short, long, default_value_t = 125.0)]
    pub duration: f64,

    /// Position poll interval in milliseconds
    #[arg(short, long, default_value_t = 1000)]
    pub interval_ms: u64,

    /// Starting volume in [0.0, 1.0]
    #[arg(long, default_value_t = 1.0)]
    pub volume: f64,
}
