// Appointment module
// Appointment record as delivered by the data source, plus its validation boundary

use std::fmt;

use chrono::{NaiveDate, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Wire format of an appointment's calendar date.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Wire format of an appointment's start and end times.
pub const TIME_FORMAT: &str = "%H:%M";

/// Opaque appointment identifier
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AppointmentId(pub String);

impl AppointmentId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AppointmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for AppointmentId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Display state of an appointment. Only ever used to pick a visual style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AppointmentStatus {
    #[default]
    Scheduled,
    Confirmed,
    Canceled,
    Completed,
}

impl AppointmentStatus {
    pub fn label(&self) -> &'static str {
        match self {
            AppointmentStatus::Scheduled => "scheduled",
            AppointmentStatus::Confirmed => "confirmed",
            AppointmentStatus::Canceled => "canceled",
            AppointmentStatus::Completed => "completed",
        }
    }
}

/// Appointment as stored by the data source.
///
/// Date and times are kept as text exactly as delivered; nothing is trusted until
/// [`Appointment::validate`] turns the record into a [`TimedAppointment`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Appointment {
    pub id: AppointmentId,
    pub date: String,
    pub start_time: String,
    pub end_time: String,
    #[serde(default)]
    pub status: AppointmentStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Why an appointment was excluded from layout
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AppointmentError {
    #[error("malformed interval: {detail}")]
    MalformedInterval { detail: String },
    #[error("invalid date '{value}'")]
    InvalidDate { value: String },
    #[error("{start}-{end} lies entirely outside the visible window")]
    OutsideVisibleWindow { start: String, end: String },
}

impl Appointment {
    /// Create an appointment with the default status and no optional fields
    ///
    /// # Examples
    /// ```
    /// use calendar_layout::models::appointment::Appointment;
    ///
    /// let appt = Appointment::new("a1", "2026-01-05", "09:00", "10:00");
    /// assert!(appt.validate().is_ok());
    /// ```
    pub fn new(
        id: impl Into<String>,
        date: impl Into<String>,
        start_time: impl Into<String>,
        end_time: impl Into<String>,
    ) -> Self {
        Self {
            id: AppointmentId::new(id),
            date: date.into(),
            start_time: start_time.into(),
            end_time: end_time.into(),
            status: AppointmentStatus::default(),
            title: None,
            client_name: None,
            notes: None,
        }
    }

    pub fn with_status(mut self, status: AppointmentStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Parse the calendar date only
    pub fn parse_date(&self) -> Result<NaiveDate, AppointmentError> {
        NaiveDate::parse_from_str(self.date.trim(), DATE_FORMAT).map_err(|_| {
            AppointmentError::InvalidDate {
                value: self.date.clone(),
            }
        })
    }

    /// Parse both times and check `start < end`
    pub fn parse_interval(&self) -> Result<(NaiveTime, NaiveTime), AppointmentError> {
        let start = parse_clock_time(&self.start_time).map_err(|err| {
            AppointmentError::MalformedInterval {
                detail: format!("start time: {}", err),
            }
        })?;
        let end = parse_clock_time(&self.end_time).map_err(|err| {
            AppointmentError::MalformedInterval {
                detail: format!("end time: {}", err),
            }
        })?;

        if end <= start {
            return Err(AppointmentError::MalformedInterval {
                detail: format!(
                    "end {} is not after start {}",
                    self.end_time.trim(),
                    self.start_time.trim()
                ),
            });
        }

        Ok((start, end))
    }

    /// Validate the record into a typed appointment
    pub fn validate(&self) -> Result<TimedAppointment, AppointmentError> {
        let date = self.parse_date()?;
        let (start, end) = self.parse_interval()?;

        Ok(TimedAppointment {
            id: self.id.clone(),
            date,
            start,
            end,
            status: self.status,
        })
    }
}

/// Error returned when a clock time is not `HH:MM`
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("'{value}' is not a valid HH:MM time")]
pub struct TimeParseError {
    pub value: String,
}

/// Parse a strict `HH:MM` wall-clock time (hours 0-23, minutes 0-59)
pub fn parse_clock_time(value: &str) -> Result<NaiveTime, TimeParseError> {
    let invalid = || TimeParseError {
        value: value.to_string(),
    };

    let (hours, minutes) = value.trim().split_once(':').ok_or_else(invalid)?;
    let digits_only = |part: &str| part.chars().all(|c| c.is_ascii_digit());
    if !(1..=2).contains(&hours.len())
        || minutes.len() != 2
        || !digits_only(hours)
        || !digits_only(minutes)
    {
        return Err(invalid());
    }

    let hours: u32 = hours.parse().map_err(|_| invalid())?;
    let minutes: u32 = minutes.parse().map_err(|_| invalid())?;
    NaiveTime::from_hms_opt(hours, minutes, 0).ok_or_else(invalid)
}

/// Format a time the way appointments carry it
pub fn format_clock_time(time: NaiveTime) -> String {
    time.format(TIME_FORMAT).to_string()
}

/// Minutes elapsed since midnight
pub fn minutes_since_midnight(time: NaiveTime) -> u32 {
    time.hour() * 60 + time.minute()
}

/// Appointment that passed the validation boundary
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimedAppointment {
    pub id: AppointmentId,
    pub date: NaiveDate,
    pub start: NaiveTime,
    pub end: NaiveTime,
    pub status: AppointmentStatus,
}

impl TimedAppointment {
    pub fn start_minutes(&self) -> u32 {
        minutes_since_midnight(self.start)
    }

    pub fn end_minutes(&self) -> u32 {
        minutes_since_midnight(self.end)
    }

    /// Half-open overlap test; touching endpoints do not overlap
    pub fn overlaps(&self, other: &TimedAppointment) -> bool {
        self.start < other.end && other.start < self.end
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test]
    fn test_validate_well_formed_appointment() {
        let appt = Appointment::new("a1", "2026-03-02", "09:00", "10:30");
        let timed = appt.validate().unwrap();

        assert_eq!(timed.date, NaiveDate::from_ymd_opt(2026, 3, 2).unwrap());
        assert_eq!(timed.start_minutes(), 540);
        assert_eq!(timed.end_minutes(), 630);
        assert_eq!(timed.status, AppointmentStatus::Scheduled);
    }

    #[test_case("2026-02-30" ; "day past month end")]
    #[test_case("2026-13-01" ; "month thirteen")]
    #[test_case("03/02/2026" ; "wrong layout")]
    #[test_case("" ; "empty")]
    fn test_invalid_dates_are_rejected(date: &str) {
        let appt = Appointment::new("a1", date, "09:00", "10:00");
        assert!(matches!(
            appt.validate(),
            Err(AppointmentError::InvalidDate { .. })
        ));
    }

    #[test_case("24:00" ; "hour out of range")]
    #[test_case("09:60" ; "minute out of range")]
    #[test_case("9" ; "missing minutes")]
    #[test_case("09:5" ; "single digit minutes")]
    #[test_case("ab:cd" ; "not numeric")]
    #[test_case("09:00:00" ; "seconds not accepted")]
    fn test_malformed_times_are_rejected(time: &str) {
        assert!(parse_clock_time(time).is_err());
    }

    #[test]
    fn test_single_digit_hour_is_accepted() {
        let time = parse_clock_time("9:05").unwrap();
        assert_eq!(minutes_since_midnight(time), 545);
    }

    #[test]
    fn test_end_before_or_equal_start_is_malformed() {
        let equal = Appointment::new("a1", "2026-03-02", "10:00", "10:00");
        let reversed = Appointment::new("a2", "2026-03-02", "11:00", "10:00");

        assert!(matches!(
            equal.validate(),
            Err(AppointmentError::MalformedInterval { .. })
        ));
        assert!(matches!(
            reversed.validate(),
            Err(AppointmentError::MalformedInterval { .. })
        ));
    }

    #[test]
    fn test_overlap_is_half_open() {
        let first = Appointment::new("a", "2026-03-02", "09:00", "10:00")
            .validate()
            .unwrap();
        let touching = Appointment::new("b", "2026-03-02", "10:00", "11:00")
            .validate()
            .unwrap();
        let inside = Appointment::new("c", "2026-03-02", "09:30", "09:45")
            .validate()
            .unwrap();

        assert!(!first.overlaps(&touching));
        assert!(!touching.overlaps(&first));
        assert!(first.overlaps(&inside));
        assert!(inside.overlaps(&first));
    }

    #[test]
    fn test_deserialize_with_optional_fields_missing() {
        let json = r#"{"id":"x","date":"2026-03-02","start_time":"08:00","end_time":"08:30"}"#;
        let appt: Appointment = serde_json::from_str(json).unwrap();

        assert_eq!(appt.id, AppointmentId::from("x"));
        assert_eq!(appt.status, AppointmentStatus::Scheduled);
        assert!(appt.title.is_none());
    }

    #[test]
    fn test_status_deserializes_from_snake_case() {
        let json = r#"{"id":"x","date":"2026-03-02","start_time":"08:00","end_time":"08:30","status":"canceled"}"#;
        let appt: Appointment = serde_json::from_str(json).unwrap();
        assert_eq!(appt.status, AppointmentStatus::Canceled);
        assert_eq!(appt.status.label(), "canceled");
    }
}
