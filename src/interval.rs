//! Reminder interval parsing and validation.

use std::fmt;
use std::num::NonZeroU32;
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

/// Seconds per minute, used to turn an interval into a timer delay.
const SECONDS_IN_MINUTE: u64 = 60;

/// Interval used when neither the command line nor the settings file name one.
pub const DEFAULT_MINUTES: u32 = 20;

/// Why an interval entry was rejected.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Error)]
pub enum Reason {
    #[error("not a whole number")]
    NotANumber,
    #[error("must be greater than 0")]
    NotPositive,
    #[error("too large")]
    TooLarge,
}

/// The only user-facing error: the entered interval is not a positive integer.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("invalid interval `{input}`: {reason}")]
pub struct InvalidInterval {
    pub input: String,
    pub reason: Reason,
}

impl InvalidInterval {
    fn new(input: impl Into<String>, reason: Reason) -> Self {
        Self {
            input: input.into(),
            reason,
        }
    }
}

/// A validated, strictly positive number of minutes.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Interval(NonZeroU32);

impl Interval {
    pub const DEFAULT: Interval = match NonZeroU32::new(DEFAULT_MINUTES) {
        Some(minutes) => Interval(minutes),
        None => panic!("default interval must be positive"),
    };

    /// Build an interval from a minute count, rejecting zero.
    pub fn from_minutes(minutes: u32) -> Result<Self, InvalidInterval> {
        NonZeroU32::new(minutes)
            .map(Self)
            .ok_or_else(|| InvalidInterval::new(minutes.to_string(), Reason::NotPositive))
    }

    pub fn minutes(self) -> u32 {
        self.0.get()
    }

    /// Delay until the reminder fires.
    pub fn as_duration(self) -> Duration {
        Duration::from_secs(u64::from(self.minutes()) * SECONDS_IN_MINUTE)
    }
}

impl Default for Interval {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl TryFrom<i64> for Interval {
    type Error = InvalidInterval;

    fn try_from(minutes: i64) -> Result<Self, Self::Error> {
        if minutes <= 0 {
            return Err(InvalidInterval::new(minutes.to_string(), Reason::NotPositive));
        }
        let minutes = u32::try_from(minutes)
            .map_err(|_| InvalidInterval::new(minutes.to_string(), Reason::TooLarge))?;
        Self::from_minutes(minutes)
    }
}

impl FromStr for Interval {
    type Err = InvalidInterval;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let trimmed = input.trim();
        let minutes: i64 = trimmed.parse().map_err(|err: std::num::ParseIntError| {
            let reason = match err.kind() {
                std::num::IntErrorKind::PosOverflow => Reason::TooLarge,
                std::num::IntErrorKind::NegOverflow => Reason::NotPositive,
                _ => Reason::NotANumber,
            };
            InvalidInterval::new(input, reason)
        })?;
        Self::try_from(minutes).map_err(|err| InvalidInterval::new(input, err.reason))
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
