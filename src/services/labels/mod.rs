// Labels service
// Locale-aware day/month naming is injected by the host; English ships as the default

use chrono::{Datelike, NaiveDate, NaiveTime, Weekday};

use crate::models::appointment::format_clock_time;
use crate::models::period::{Granularity, PeriodState};

/// Day and month names for one locale
pub trait CalendarLabels {
    fn weekday_name(&self, weekday: Weekday) -> String;

    fn month_name(&self, month: u32) -> String;

    fn weekday_short(&self, weekday: Weekday) -> String {
        self.weekday_name(weekday).chars().take(3).collect()
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct EnglishLabels;

impl CalendarLabels for EnglishLabels {
    fn weekday_name(&self, weekday: Weekday) -> String {
        match weekday {
            Weekday::Mon => "Monday",
            Weekday::Tue => "Tuesday",
            Weekday::Wed => "Wednesday",
            Weekday::Thu => "Thursday",
            Weekday::Fri => "Friday",
            Weekday::Sat => "Saturday",
            Weekday::Sun => "Sunday",
        }
        .to_string()
    }

    fn month_name(&self, month: u32) -> String {
        const MONTHS: [&str; 12] = [
            "January", "February", "March", "April", "May", "June", "July", "August",
            "September", "October", "November", "December",
        ];
        MONTHS
            .get(month.wrapping_sub(1) as usize)
            .copied()
            .unwrap_or("")
            .to_string()
    }
}

/// Heading for the visible period, e.g. "Monday 5 January 2026"
pub fn period_title(state: &PeriodState, days: &[NaiveDate], labels: &dyn CalendarLabels) -> String {
    let anchor = state.anchor_date;
    match state.granularity {
        Granularity::Day => format!(
            "{} {} {} {}",
            labels.weekday_name(anchor.weekday()),
            anchor.day(),
            labels.month_name(anchor.month()),
            anchor.year()
        ),
        Granularity::Week => {
            let (Some(first), Some(last)) = (days.first(), days.last()) else {
                return String::new();
            };
            if first.year() != last.year() {
                format!(
                    "{} {} {} - {} {} {}",
                    first.day(),
                    labels.month_name(first.month()),
                    first.year(),
                    last.day(),
                    labels.month_name(last.month()),
                    last.year()
                )
            } else if first.month() != last.month() {
                format!(
                    "{} {} - {} {} {}",
                    first.day(),
                    labels.month_name(first.month()),
                    last.day(),
                    labels.month_name(last.month()),
                    last.year()
                )
            } else {
                format!(
                    "{} - {} {} {}",
                    first.day(),
                    last.day(),
                    labels.month_name(last.month()),
                    last.year()
                )
            }
        }
        Granularity::Month => format!("{} {}", labels.month_name(anchor.month()), anchor.year()),
    }
}

/// Column headers for the visible days, e.g. "Mon 5"
pub fn day_headers(days: &[NaiveDate], labels: &dyn CalendarLabels) -> Vec<String> {
    days.iter()
        .map(|date| format!("{} {}", labels.weekday_short(date.weekday()), date.day()))
        .collect()
}

/// "09:00 - 10:30"
pub fn format_time_range(start: NaiveTime, end: NaiveTime) -> String {
    format!("{} - {}", format_clock_time(start), format_clock_time(end))
}
