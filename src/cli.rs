//! Command line arguments.

use std::path::PathBuf;

use clap::Parser;

use crate::interval::Interval;

#[derive(Debug, Parser)]
#[command(name = "blinkly")]
#[command(about = "Full-screen blink reminders at a fixed interval")]
#[command(version)]
pub struct Cli {
    /// Reminder interval in minutes [default: 20]
    pub interval: Option<Interval>,

    /// JSON settings file to read
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    pub fn log_level(&self) -> log::LevelFilter {
        if self.verbose || cfg!(debug_assertions) {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Info
        }
    }
}
