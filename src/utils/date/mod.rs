// Date utility functions
// Calendar arithmetic shared by navigation and period selection

use chrono::{Datelike, Duration, NaiveDate, Weekday};

/// Calculate the start of the week containing the given date.
///
/// Clamped to `NaiveDate::MIN` for the first, partial week chrono can represent.
///
/// # Arguments
/// * `date` - The date to find the week start for
/// * `week_start` - The weekday weeks begin on
pub fn get_week_start(date: NaiveDate, week_start: Weekday) -> NaiveDate {
    let weekday = date.weekday().num_days_from_sunday() as i64;
    let first = week_start.num_days_from_sunday() as i64;
    let offset = (weekday - first + 7) % 7;
    date.checked_sub_signed(Duration::days(offset))
        .unwrap_or(NaiveDate::MIN)
}

/// `date + days`, saturating at chrono's representable range
pub fn saturating_add_days(date: NaiveDate, days: i64) -> NaiveDate {
    date.checked_add_signed(Duration::days(days))
        .unwrap_or(if days < 0 { NaiveDate::MIN } else { NaiveDate::MAX })
}

/// Number of days in the given month
pub fn last_day_of_month(year: i32, month: u32) -> Option<u32> {
    if month == 12 {
        // The year after NaiveDate::MAX does not exist
        return NaiveDate::from_ymd_opt(year, 12, 31).map(|date| date.day());
    }
    let first_of_next = NaiveDate::from_ymd_opt(year, month + 1, 1)?;
    first_of_next.pred_opt().map(|date| date.day())
}

/// First day of the month `delta_months` away from `current`.
///
/// Day-of-month is never carried over, so Jan 31 + 1 month is Feb 1, not an invalid Feb 31.
pub fn first_of_shifted_month(current: NaiveDate, delta_months: i32) -> Option<NaiveDate> {
    let total_months = (current.year() * 12) + (current.month() as i32 - 1) + delta_months;
    let new_year = total_months.div_euclid(12);
    let new_month = total_months.rem_euclid(12) + 1;
    NaiveDate::from_ymd_opt(new_year, new_month as u32, 1)
}

/// Whether two dates fall in the same calendar month
pub fn same_month(a: NaiveDate, b: NaiveDate) -> bool {
    a.year() == b.year() && a.month() == b.month()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_get_week_start_sunday() {
        // Wednesday, Dec 4, 2024
        let start = get_week_start(date(2024, 12, 4), Weekday::Sun);
        assert_eq!(start, date(2024, 12, 1));
    }

    #[test]
    fn test_get_week_start_monday() {
        let start = get_week_start(date(2024, 12, 4), Weekday::Mon);
        assert_eq!(start, date(2024, 12, 2));
    }

    #[test]
    fn test_get_week_start_on_week_start_is_identity() {
        let monday = date(2026, 1, 5);
        assert_eq!(get_week_start(monday, Weekday::Mon), monday);
    }

    #[test]
    fn test_last_day_of_month() {
        assert_eq!(last_day_of_month(2024, 2), Some(29));
        assert_eq!(last_day_of_month(2025, 2), Some(28));
        assert_eq!(last_day_of_month(2025, 12), Some(31));
        assert_eq!(last_day_of_month(2025, 4), Some(30));
        assert_eq!(last_day_of_month(NaiveDate::MAX.year(), 12), Some(31));
    }

    #[test]
    fn test_first_of_shifted_month_crosses_years() {
        assert_eq!(first_of_shifted_month(date(2025, 12, 31), 1), Some(date(2026, 1, 1)));
        assert_eq!(first_of_shifted_month(date(2026, 1, 15), -1), Some(date(2025, 12, 1)));
        assert_eq!(first_of_shifted_month(date(2025, 1, 31), 1), Some(date(2025, 2, 1)));
        assert_eq!(first_of_shifted_month(date(2025, 3, 10), -14), Some(date(2024, 1, 1)));
    }

    #[test]
    fn test_week_start_clamps_at_min_date() {
        let day_after = NaiveDate::MIN.weekday().succ();
        assert_eq!(get_week_start(NaiveDate::MIN, day_after), NaiveDate::MIN);
        assert_eq!(get_week_start(NaiveDate::MIN, NaiveDate::MIN.weekday()), NaiveDate::MIN);
    }

    #[test]
    fn test_saturating_add_days() {
        assert_eq!(saturating_add_days(date(2026, 1, 1), 6), date(2026, 1, 7));
        assert_eq!(saturating_add_days(NaiveDate::MAX, 6), NaiveDate::MAX);
        assert_eq!(saturating_add_days(NaiveDate::MIN, -6), NaiveDate::MIN);
    }

    #[test]
    fn test_same_month() {
        assert!(same_month(date(2025, 3, 1), date(2025, 3, 31)));
        assert!(!same_month(date(2025, 3, 1), date(2024, 3, 1)));
    }
}
