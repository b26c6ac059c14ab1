// Settings module
// Engine configuration: visible window, geometry floors, week layout and navigation limits

use chrono::{NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::models::period::Granularity;

/// Visible daily window, in whole hours.
///
/// Only [`TimelineBounds::new`] and `Default` build one, so a value always holds
/// `start_hour < end_hour <= 24`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TimelineBounds {
    start_hour: u32,
    end_hour: u32,
}

impl TimelineBounds {
    /// Create bounds, rejecting empty or inverted windows
    pub fn new(start_hour: u32, end_hour: u32) -> Result<Self, String> {
        let bounds = Self {
            start_hour,
            end_hour,
        };
        bounds.validate()?;
        Ok(bounds)
    }

    pub fn start_hour(&self) -> u32 {
        self.start_hour
    }

    pub fn end_hour(&self) -> u32 {
        self.end_hour
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.end_hour > 24 {
            return Err("End hour must be 24 or less".to_string());
        }
        if self.start_hour >= self.end_hour {
            return Err("Start hour must be before end hour".to_string());
        }
        Ok(())
    }

    /// Window start in minutes since midnight
    pub fn start_minutes(&self) -> u32 {
        self.start_hour * 60
    }

    /// Window end in minutes since midnight
    pub fn end_minutes(&self) -> u32 {
        self.end_hour * 60
    }

    /// Length of the visible window in minutes
    pub fn window_minutes(&self) -> u32 {
        self.end_minutes().saturating_sub(self.start_minutes())
    }

    /// Whether an hour of the day falls inside the window
    pub fn contains_hour(&self, hour: u32) -> bool {
        self.start_hour <= hour && hour < self.end_hour
    }
}

impl Default for TimelineBounds {
    fn default() -> Self {
        Self {
            start_hour: 8,
            end_hour: 20,
        }
    }
}

/// Full engine configuration, loaded from TOML by the settings service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineSettings {
    pub start_hour: u32,
    pub end_hour: u32,
    pub minimum_visual_minutes: u32,
    pub slot_interval_minutes: u32,
    pub pixels_per_hour: f32,
    pub first_day_of_week: u8,
    pub default_granularity: Granularity,
    pub time_zone: Option<String>,
    pub earliest_date: Option<NaiveDate>,
    pub latest_date: Option<NaiveDate>,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            start_hour: 8,
            end_hour: 20,
            minimum_visual_minutes: 15,
            slot_interval_minutes: 15,
            pixels_per_hour: 60.0,
            first_day_of_week: 1, // Monday
            default_granularity: Granularity::Day,
            time_zone: None,
            earliest_date: None,
            latest_date: None,
        }
    }
}

impl EngineSettings {
    /// Visible window, or why the configured hours do not form one
    pub fn bounds(&self) -> Result<TimelineBounds, String> {
        TimelineBounds::new(self.start_hour, self.end_hour)
    }

    /// First day of week as a chrono weekday (0 = Sunday)
    pub fn week_start(&self) -> Weekday {
        match self.first_day_of_week % 7 {
            0 => Weekday::Sun,
            1 => Weekday::Mon,
            2 => Weekday::Tue,
            3 => Weekday::Wed,
            4 => Weekday::Thu,
            5 => Weekday::Fri,
            _ => Weekday::Sat,
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        self.bounds()?;

        if self.minimum_visual_minutes == 0 {
            return Err("Minimum visual height must be at least one minute".to_string());
        }

        if self.slot_interval_minutes == 0 || 60 % self.slot_interval_minutes != 0 {
            return Err("Slot interval must be a non-zero divisor of 60".to_string());
        }

        if !(self.pixels_per_hour.is_finite() && self.pixels_per_hour > 0.0) {
            return Err("Pixels per hour must be a positive number".to_string());
        }

        if self.first_day_of_week > 6 {
            return Err("First day of week must be between 0 (Sunday) and 6 (Saturday)".to_string());
        }

        if let (Some(earliest), Some(latest)) = (self.earliest_date, self.latest_date) {
            if earliest > latest {
                return Err("Earliest navigation date must not be after the latest".to_string());
            }
        }

        if let Some(ref zone) = self.time_zone {
            if zone.parse::<chrono_tz::Tz>().is_err() {
                return Err(format!("Unknown time zone '{}'", zone));
            }
        }

        Ok(())
    }
}
