//! Controls model behind the main window: interval entry, presets and start.

use crate::interval::{Interval, InvalidInterval};
use crate::scheduler::ReminderCycle;
use crate::timer::Timer;

/// Editable interval entry plus the preset buttons offered next to it.
#[derive(Debug, Clone)]
pub struct ConfigSurface {
    entry: String,
    presets: Vec<Interval>,
}

impl ConfigSurface {
    pub fn new(initial: Interval, presets: Vec<Interval>) -> Self {
        Self {
            entry: initial.to_string(),
            presets,
        }
    }

    #[cfg(test)]
    pub fn entry(&self) -> &str {
        &self.entry
    }

    /// Text buffer bound to the entry widget.
    pub fn entry_mut(&mut self) -> &mut String {
        &mut self.entry
    }

    pub fn presets(&self) -> &[Interval] {
        &self.presets
    }

    /// Replace the entry with a preset value.
    pub fn apply_preset(&mut self, preset: Interval) {
        self.entry = preset.to_string();
    }

    pub fn parsed(&self) -> Result<Interval, InvalidInterval> {
        self.entry.parse()
    }

    /// Validate the entry and start the cycle with it.
    ///
    /// On error the cycle is left exactly as it was.
    pub fn submit<T: Timer>(
        &self,
        cycle: &mut ReminderCycle<T>,
    ) -> Result<Interval, InvalidInterval> {
        let interval = self.parsed()?;
        cycle.start(interval);
        Ok(interval)
    }

    /// Push the entry to the cycle as its live interval when it is valid.
    ///
    /// Invalid text is ignored so the last valid value keeps being used.
    pub fn sync<T: Timer>(&self, cycle: &mut ReminderCycle<T>) {
        if let Ok(interval) = self.parsed() {
            cycle.set_interval(interval);
        }
    }
}
