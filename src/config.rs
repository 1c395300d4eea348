//! # Configuration Management

//! This module handles the configuration loading and management for the yard check-in core.
//! It leverages the `config` crate to provide a flexible and structured way to define and
//! access configuration settings from various sources, including:

//! * YAML configuration files (default.yaml plus an environment-specific file)
//! * Environment variables prefixed with `APP`

//! The core of this module is the `Settings` struct, which encapsulates the yard layout,
//! appointment policy, logging, and notification settings required by the application.

use serde::Deserialize;
use config::{Config, Environment, File};
use std::env;
use std::path::PathBuf;
use chrono_tz::Tz;
use log::debug;
use crate::errors::{CheckInError, CheckInResult};
use crate::models::appointment::DEFAULT_SYMBOLIC_CODES;
use crate::models::dock::RAMP_SENTINEL;

/// Represents the complete set of configuration settings for the yard check-in core.
#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    /// The yard layout and appointment policy.
    pub yard: YardSettings,
    /// Settings for application logging.
    pub logging: LoggingSettings,
    /// Settings for the assignment notification collaborator.
    pub notification: NotificationSettings,
}

/// Represents the yard layout and the scheduling policy constants.
///
/// Nothing in here is hardcoded by the core logic; the resolver, validator, and
/// calculator all take their dock set, timezone, tolerance, and grace period from
/// this struct.
#[derive(Debug, Deserialize, Clone)]
pub struct YardSettings {
    /// The first numbered dock in the yard.
    pub first_dock: u32,
    /// The last numbered dock in the yard.
    pub last_dock: u32,
    /// Whether the `Ramp` sentinel participates in the occupancy model like a numbered
    /// dock. When false, records parked on the ramp are excluded from occupancy and
    /// never count toward double-booking.
    pub include_ramp: bool,
    /// The yard's civil timezone name, e.g. `America/Indiana/Indianapolis`.
    pub timezone: String,
    /// Minutes of free time between the appointment slot and load completion before
    /// detention starts to accrue.
    pub detention_grace_minutes: i64,
    /// On-time tolerance in minutes: a check-in is on-time when
    /// `check_in - appointment <= tolerance`. Zero means at-or-before the slot.
    pub on_time_tolerance_minutes: i64,
    /// The recognized symbolic (non-timed) appointment codes.
    #[serde(default = "default_symbolic_codes")]
    pub symbolic_codes: Vec<String>,
}

fn default_symbolic_codes() -> Vec<String> {
    DEFAULT_SYMBOLIC_CODES.clone()
}

impl YardSettings {
    /// The full fixed dock-identifier set, in display order. Includes the `Ramp`
    /// sentinel when configured to participate in occupancy.
    pub fn dock_set(&self) -> Vec<String> {
        let mut docks: Vec<String> = (self.first_dock..=self.last_dock)
            .map(|n| n.to_string())
            .collect();
        if self.include_ramp {
            docks.push(RAMP_SENTINEL.to_string());
        }
        docks
    }

    /// Whether the identifier names a dock in the configured set.
    pub fn is_known_dock(&self, dock: &str) -> bool {
        if self.include_ramp && dock == RAMP_SENTINEL {
            return true;
        }
        dock.parse::<u32>()
            .map(|n| n >= self.first_dock && n <= self.last_dock)
            .unwrap_or(false)
    }

    /// Resolves the configured timezone name to a `chrono_tz::Tz`.
    pub fn tz(&self) -> CheckInResult<Tz> {
        self.timezone
            .parse::<Tz>()
            .map_err(|_| CheckInError::ConfigError(format!("unknown timezone: {}", self.timezone)))
    }
}

/// Holds the configuration settings for application logging.
#[derive(Debug, Deserialize, Clone)]
pub struct LoggingSettings {
    /// The logging level (e.g., "info", "debug", "error").
    pub level: String,
    /// The directory path where log files will be stored (optional).
    pub path: Option<PathBuf>,
}

/// Holds the configuration settings for the assignment notification collaborator.
#[derive(Debug, Deserialize, Clone)]
pub struct NotificationSettings {
    /// The webhook URL assignment notices are posted to. When absent, notices are
    /// logged and dropped.
    pub webhook_url: Option<String>,
    /// Request timeout for the webhook, in milliseconds.
    pub timeout_ms: u64,
}

impl Settings {
    /// Loads and constructs the application settings from various configuration sources.
    ///
    /// Settings are read from the following sources, in order of precedence:
    ///
    /// 1. `default.yaml`: default settings for the application
    /// 2. Environment-specific YAML file based on the `RUN_MODE` environment variable
    /// 3. Environment variables prefixed with `APP` (e.g., `APP__YARD__TIMEZONE`)
    ///
    /// The `CONFIG_DIR` environment variable selects the directory holding the YAML
    /// files (defaults to "config").
    ///
    /// # Returns
    ///
    /// * `Ok(Settings)` if the settings were loaded and constructed successfully
    /// * `Err(CheckInError)` if there was an error during loading or deserialization
    pub fn new() -> CheckInResult<Self> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());
        let config_dir = env::var("CONFIG_DIR").unwrap_or_else(|_| "config".into());
        debug!("Run Mode: {:?}, Config Dir: {:?}", run_mode, config_dir);

        let s = Config::builder()
            .add_source(File::with_name(&format!("{}/default", config_dir)))
            .add_source(File::with_name(&format!("{}/{}", config_dir, run_mode)).required(false))
            .add_source(Environment::with_prefix("APP").separator("__"))
            .build()?;

        let mut s: Self = s.try_deserialize::<Settings>()?;

        if let Some(ref mut path) = s.logging.path {
            *path = env::current_dir()?.join(path.clone());
        }

        if s.yard.first_dock > s.yard.last_dock {
            return Err(CheckInError::ConfigError(format!(
                "invalid dock range: {}..{}",
                s.yard.first_dock, s.yard.last_dock
            )));
        }
        s.yard.tz()?;

        Ok(s)
    }
}
