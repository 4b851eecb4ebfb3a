//! Settings model and optional configuration file IO.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::interval::{Interval, DEFAULT_MINUTES};

/// Settings read from the `--config` JSON file.
///
/// Every field is optional in the file; missing fields take the defaults.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct AppSettings {
    /// Reminder interval in minutes when none is given on the command line.
    pub interval_minutes: u32,
    /// Minute values offered as one-click buttons.
    pub presets: Vec<u32>,
    /// Text shown in the middle of the overlay.
    pub message: String,
    /// Label of the overlay's dismiss button.
    pub dismiss_label: String,
    /// Show a confirmation dialog after starting.
    pub confirm_start: bool,
    /// Ask before closing the application.
    pub confirm_exit: bool,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            interval_minutes: DEFAULT_MINUTES,
            presets: vec![5, 10, 20, 30, 60],
            message: "Time to blink!".to_string(),
            dismiss_label: "Dismiss Timer".to_string(),
            confirm_start: true,
            confirm_exit: true,
        }
    }
}

impl AppSettings {
    /// The configured interval, validated.
    pub fn initial_interval(&self) -> Result<Interval> {
        Interval::from_minutes(self.interval_minutes)
            .context("`interval_minutes` in the settings file must be greater than 0")
    }

    /// Valid presets in file order; zero entries are skipped.
    pub fn preset_intervals(&self) -> Vec<Interval> {
        self.presets
            .iter()
            .filter_map(|&minutes| match Interval::from_minutes(minutes) {
                Ok(interval) => Some(interval),
                Err(err) => {
                    log::warn!("Skipping preset: {err}");
                    None
                }
            })
            .collect()
    }
}

/// Load settings from `path`, or return the defaults when no file was given.
pub fn load(path: Option<&Path>) -> Result<AppSettings> {
    let Some(path) = path else {
        return Ok(AppSettings::default());
    };
    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read settings file {}", path.display()))?;
    let settings = serde_json::from_str(&contents)
        .with_context(|| format!("failed to parse settings file {}", path.display()))?;
    log::info!("Loaded settings from {}", path.display());
    Ok(settings)
}
