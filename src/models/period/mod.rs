//! Period state: the anchor date and granularity a calendar view is showing.
//!
//! All transitions are pure functions of `(state, action)`. The navigator service wraps them with
//! navigation limits; nothing here performs I/O or reads the clock.

use std::fmt;
use std::str::FromStr;

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::utils::date::{first_of_shifted_month, same_month};

/// Temporal zoom level of the view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    #[default]
    Day,
    Week,
    Month,
}

impl Granularity {
    pub fn label(&self) -> &'static str {
        match self {
            Granularity::Day => "day",
            Granularity::Week => "week",
            Granularity::Month => "month",
        }
    }
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Granularity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "day" => Ok(Granularity::Day),
            "week" => Ok(Granularity::Week),
            "month" => Ok(Granularity::Month),
            other => Err(format!(
                "unknown view '{}' (expected day, week or month)",
                other
            )),
        }
    }
}

/// Inclusive range of calendar days
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        if start <= end {
            Self { start, end }
        } else {
            Self {
                start: end,
                end: start,
            }
        }
    }

    pub fn single(date: NaiveDate) -> Self {
        Self {
            start: date,
            end: date,
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    pub fn num_days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }
}

/// Navigation request applied to a [`PeriodState`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavAction {
    Next,
    Previous,
    /// Jump to the given "today"; the caller reads the clock
    Today(NaiveDate),
    GoTo(NaiveDate),
    SetGranularity(Granularity),
}

/// Anchor date plus granularity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodState {
    pub anchor_date: NaiveDate,
    pub granularity: Granularity,
    /// Anchor in effect before the current chain of month hops started
    #[serde(skip)]
    month_origin: Option<NaiveDate>,
}

impl PeriodState {
    pub fn new(anchor_date: NaiveDate, granularity: Granularity) -> Self {
        Self {
            anchor_date,
            granularity,
            month_origin: None,
        }
    }

    /// Apply an action, returning the resulting state.
    ///
    /// A step that would leave chrono's representable range returns the state unchanged.
    pub fn apply(&self, action: NavAction) -> PeriodState {
        let next = match action {
            NavAction::Next => self.step(1),
            NavAction::Previous => self.step(-1),
            NavAction::Today(today) => Some(Self::new(today, self.granularity)),
            NavAction::GoTo(date) => Some(Self::new(date, self.granularity)),
            NavAction::SetGranularity(granularity) => Some(Self {
                granularity,
                month_origin: None,
                ..*self
            }),
        };

        next.unwrap_or_else(|| {
            log::warn!(
                "Navigation {:?} from {} overflows the supported date range",
                action,
                self.anchor_date
            );
            *self
        })
    }

    pub fn next(&self) -> PeriodState {
        self.apply(NavAction::Next)
    }

    pub fn previous(&self) -> PeriodState {
        self.apply(NavAction::Previous)
    }

    fn step(&self, direction: i64) -> Option<PeriodState> {
        match self.granularity {
            Granularity::Day => self.shift_days(direction),
            Granularity::Week => self.shift_days(direction * 7),
            Granularity::Month => self.shift_month(direction as i32),
        }
    }

    fn shift_days(&self, days: i64) -> Option<PeriodState> {
        let anchor = self.anchor_date.checked_add_signed(Duration::days(days))?;
        Some(Self::new(anchor, self.granularity))
    }

    // Month hops land on the 1st; returning to the month the chain started from restores the
    // original anchor so next/previous round-trips.
    fn shift_month(&self, delta: i32) -> Option<PeriodState> {
        let origin = self.month_origin.unwrap_or(self.anchor_date);
        let target = first_of_shifted_month(self.anchor_date, delta)?;

        if same_month(target, origin) {
            return Some(Self::new(origin, self.granularity));
        }

        Some(Self {
            anchor_date: target,
            granularity: self.granularity,
            month_origin: Some(origin),
        })
    }
}
