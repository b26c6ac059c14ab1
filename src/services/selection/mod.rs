//! Period selection.
//!
//! Works out which days a period shows and groups appointments into those days using date-only
//! equality. Appointment dates are calendar-day values, never instants, so no time zone conversion
//! happens here.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate, NaiveDateTime, Weekday};

use crate::models::appointment::Appointment;
use crate::models::layout::{CurrentTimeMarker, Diagnostic};
use crate::models::period::{DateRange, Granularity, PeriodState};
use crate::services::layout::time_grid::TimeGridMapper;
use crate::utils::date::{get_week_start, last_day_of_month, saturating_add_days};

/// Appointments grouped per visible day
#[derive(Debug, Default)]
pub struct DayBuckets<'a> {
    /// Every visible day is present, possibly with an empty bucket
    pub buckets: BTreeMap<NaiveDate, Vec<&'a Appointment>>,
    pub diagnostics: Vec<Diagnostic>,
    /// Valid appointments dated outside the visible days
    pub outside_period: usize,
}

impl<'a> DayBuckets<'a> {
    pub fn appointments_on(&self, date: NaiveDate) -> &[&'a Appointment] {
        self.buckets.get(&date).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn total(&self) -> usize {
        self.buckets.values().map(Vec::len).sum()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PeriodSelector {
    week_start: Weekday,
}

impl Default for PeriodSelector {
    fn default() -> Self {
        Self::new(Weekday::Mon)
    }
}

impl PeriodSelector {
    pub fn new(week_start: Weekday) -> Self {
        Self { week_start }
    }

    pub fn week_start(&self) -> Weekday {
        self.week_start
    }

    /// Ordered days shown for a period: one day, one week, or a rectangular month grid.
    pub fn visible_days(&self, state: &PeriodState) -> Vec<NaiveDate> {
        let range = self.fetch_range(state);
        let mut days = Vec::with_capacity(range.num_days().max(0) as usize);
        // iter_days stops one short of NaiveDate::MAX
        let mut next = Some(range.start);
        while let Some(day) = next.filter(|day| *day <= range.end) {
            days.push(day);
            next = day.succ_opt();
        }
        days
    }

    /// First and last visible day; the hint handed to the appointment source.
    ///
    /// Periods at the edge of chrono's date range are truncated rather than padded.
    pub fn fetch_range(&self, state: &PeriodState) -> DateRange {
        let anchor = state.anchor_date;
        match state.granularity {
            Granularity::Day => DateRange::single(anchor),
            Granularity::Week => {
                let start = get_week_start(anchor, self.week_start);
                DateRange::new(start, saturating_add_days(start, 6))
            }
            Granularity::Month => {
                let first = anchor.with_day(1).unwrap_or(anchor);
                let days_in_month =
                    last_day_of_month(anchor.year(), anchor.month()).unwrap_or(28) as i64;
                let last = saturating_add_days(first, days_in_month - 1);

                let grid_start = get_week_start(first, self.week_start);
                // Pad the trailing week so the grid stays rectangular
                let grid_end = saturating_add_days(get_week_start(last, self.week_start), 6);
                DateRange::new(grid_start, grid_end)
            }
        }
    }

    /// Group appointments into the given days by calendar date.
    pub fn bucket_by_day<'a>(
        &self,
        appointments: &'a [Appointment],
        days: &[NaiveDate],
    ) -> DayBuckets<'a> {
        let mut result = DayBuckets {
            buckets: days.iter().map(|date| (*date, Vec::new())).collect(),
            ..DayBuckets::default()
        };

        for appointment in appointments {
            let date = match appointment.parse_date() {
                Ok(date) => date,
                Err(reason) => {
                    log::warn!(
                        "Skipping appointment {}: {}",
                        appointment.id,
                        reason
                    );
                    result.diagnostics.push(Diagnostic {
                        appointment_id: appointment.id.clone(),
                        reason,
                    });
                    continue;
                }
            };

            match result.buckets.get_mut(&date) {
                Some(bucket) => bucket.push(appointment),
                None => result.outside_period += 1,
            }
        }

        result
    }

    /// Where the "now" line goes, if today is visible and the current hour is inside the window.
    pub fn current_time_marker(
        &self,
        days: &[NaiveDate],
        mapper: &TimeGridMapper,
        now: NaiveDateTime,
    ) -> CurrentTimeMarker {
        let Some(day_index) = days.iter().position(|date| *date == now.date()) else {
            return CurrentTimeMarker::HIDDEN;
        };

        match mapper.offset_for_time(now.time()) {
            Some(top_offset) => CurrentTimeMarker {
                visible: true,
                day_index: Some(day_index),
                top_offset: Some(top_offset),
            },
            None => CurrentTimeMarker {
                visible: false,
                day_index: Some(day_index),
                top_offset: None,
            },
        }
    }
}
