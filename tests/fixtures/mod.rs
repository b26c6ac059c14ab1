// Test fixtures - reusable test data
// Provides consistent appointments and dates across all test files
#![allow(dead_code)]

use chrono::{NaiveDate, NaiveDateTime};

/// Sample dates for testing
pub mod dates {
    use super::*;

    /// Monday, Mar 2, 2026
    pub fn monday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 2).unwrap()
    }

    /// Wednesday, Mar 4, 2026
    pub fn wednesday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 4).unwrap()
    }

    /// Returns Dec 31, 2025 (New Year's Eve)
    pub fn new_years_eve_2025() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 12, 31).unwrap()
    }

    /// Returns Feb 29, 2024 (leap year)
    pub fn leap_day_2024() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 2, 29).unwrap()
    }

    /// Given day at the given time
    pub fn at(date: NaiveDate, hour: u32, minute: u32) -> NaiveDateTime {
        date.and_hms_opt(hour, minute, 0).unwrap()
    }
}

/// Sample appointments for testing
pub mod appointments {
    use calendar_layout::Appointment;

    const MONDAY: &str = "2026-03-02";

    /// 09:00-10:00 and 09:30-10:30
    pub fn overlapping_pair() -> Vec<Appointment> {
        vec![
            Appointment::new("first", MONDAY, "09:00", "10:00"),
            Appointment::new("second", MONDAY, "09:30", "10:30"),
        ]
    }

    /// 08-09, 09-10, 10-11
    pub fn back_to_back() -> Vec<Appointment> {
        vec![
            Appointment::new("a", MONDAY, "08:00", "09:00"),
            Appointment::new("b", MONDAY, "09:00", "10:00"),
            Appointment::new("c", MONDAY, "10:00", "11:00"),
        ]
    }

    /// Starts an hour before an 08:00 window
    pub fn early_start() -> Appointment {
        Appointment::new("early", MONDAY, "07:00", "09:00")
    }

    /// One reversed interval among three independent appointments
    pub fn one_malformed() -> Vec<Appointment> {
        vec![
            Appointment::new("morning", MONDAY, "08:00", "09:00"),
            Appointment::new("reversed", MONDAY, "11:00", "10:00"),
            Appointment::new("noon", MONDAY, "12:00", "13:00"),
            Appointment::new("afternoon", MONDAY, "15:00", "16:00"),
        ]
    }

    /// A busy week spread over several days, including a bad date
    pub fn busy_week() -> Vec<Appointment> {
        vec![
            Appointment::new("mon-standup", "2026-03-02", "09:00", "09:15"),
            Appointment::new("mon-review", "2026-03-02", "09:00", "10:00"),
            Appointment::new("tue-clinic", "2026-03-03", "13:00", "17:00"),
            Appointment::new("wed-1", "2026-03-04", "10:00", "11:00"),
            Appointment::new("wed-2", "2026-03-04", "10:30", "11:30"),
            Appointment::new("wed-3", "2026-03-04", "11:00", "12:00"),
            Appointment::new("sun-brunch", "2026-03-08", "11:00", "12:30"),
            Appointment::new("next-mon", "2026-03-09", "09:00", "10:00"),
            Appointment::new("typo", "2026-03-32", "09:00", "10:00"),
        ]
    }
}
