//! Period navigation.
//!
//! `PeriodNavigator` owns the single mutable [`PeriodState`] of a calendar view. Each operation
//! runs the pure [`transition`] function; a rejected transition leaves the state untouched and
//! tells the host why, so it can disable its "further" affordance.

use chrono::{Datelike, NaiveDate, Weekday};
use thiserror::Error;

use crate::models::period::{DateRange, Granularity, NavAction, PeriodState};
use crate::models::settings::EngineSettings;
use crate::services::clock::{Clock, SystemClock};
use crate::services::selection::PeriodSelector;
use crate::utils::date::last_day_of_month;

/// Optional hard limits on where navigation may go
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NavigationLimits {
    pub earliest: Option<NaiveDate>,
    pub latest: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NavigationError {
    #[error("{requested} is outside the navigable range ({})", describe_limits(.limits))]
    OutOfBoundsDay {
        requested: NaiveDate,
        limits: NavigationLimits,
    },
}

fn describe_limits(limits: &NavigationLimits) -> String {
    let side = |date: Option<NaiveDate>| {
        date.map(|d| d.to_string())
            .unwrap_or_else(|| "unbounded".to_string())
    };
    format!("{} to {}", side(limits.earliest), side(limits.latest))
}

impl NavigationLimits {
    pub fn unbounded() -> Self {
        Self::default()
    }

    pub fn from_settings(settings: &EngineSettings) -> Self {
        Self {
            earliest: settings.earliest_date,
            latest: settings.latest_date,
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.earliest.map_or(true, |earliest| date >= earliest)
            && self.latest.map_or(true, |latest| date <= latest)
    }

    /// Nearest navigable date
    pub fn clamp(&self, date: NaiveDate) -> NaiveDate {
        let date = self.earliest.map_or(date, |earliest| date.max(earliest));
        self.latest.map_or(date, |latest| date.min(latest))
    }

    /// A period is navigable when at least one of its days is.
    ///
    /// Weeks are measured from `week_start`; months cover their own days only, not the padding of
    /// the month grid.
    pub fn allows(&self, state: &PeriodState, week_start: Weekday) -> bool {
        let anchor = state.anchor_date;
        let range = match state.granularity {
            Granularity::Day => DateRange::single(anchor),
            Granularity::Week => PeriodSelector::new(week_start).fetch_range(state),
            Granularity::Month => {
                let first = anchor.with_day(1).unwrap_or(anchor);
                let last = last_day_of_month(anchor.year(), anchor.month())
                    .and_then(|day| anchor.with_day(day))
                    .unwrap_or(anchor);
                DateRange::new(first, last)
            }
        };
        self.earliest.map_or(true, |earliest| range.end >= earliest)
            && self.latest.map_or(true, |latest| range.start <= latest)
    }
}

/// Pure transition with limit checking
pub fn transition(
    state: &PeriodState,
    action: NavAction,
    limits: &NavigationLimits,
    week_start: Weekday,
) -> Result<PeriodState, NavigationError> {
    let next = state.apply(action);
    if next != *state && !limits.allows(&next, week_start) {
        return Err(NavigationError::OutOfBoundsDay {
            requested: next.anchor_date,
            limits: *limits,
        });
    }
    Ok(next)
}

pub struct PeriodNavigator<C: Clock = SystemClock> {
    state: PeriodState,
    limits: NavigationLimits,
    week_start: Weekday,
    clock: C,
}

impl PeriodNavigator<SystemClock> {
    /// Navigator configured from settings, starting today
    pub fn from_settings(settings: &EngineSettings) -> anyhow::Result<Self> {
        let clock = SystemClock::from_zone_name(settings.time_zone.as_deref())?;
        Ok(PeriodNavigator::starting_today(clock, settings.default_granularity)
            .with_week_start(settings.week_start())
            .with_limits(NavigationLimits::from_settings(settings)))
    }
}

impl<C: Clock> PeriodNavigator<C> {
    pub fn new(state: PeriodState, clock: C) -> Self {
        Self {
            state,
            limits: NavigationLimits::unbounded(),
            week_start: Weekday::Mon,
            clock,
        }
    }

    /// Start on today's date with the given granularity
    pub fn starting_today(clock: C, granularity: Granularity) -> Self {
        let state = PeriodState::new(clock.today(), granularity);
        Self::new(state, clock)
    }

    pub fn with_week_start(mut self, week_start: Weekday) -> Self {
        self.week_start = week_start;
        self
    }

    /// Install limits, moving the starting period inside them if needed
    pub fn with_limits(mut self, limits: NavigationLimits) -> Self {
        self.limits = limits;
        if !limits.allows(&self.state, self.week_start) {
            let anchor = limits.clamp(self.state.anchor_date);
            log::warn!(
                "Start date {} is outside the navigable range ({}); starting on {}",
                self.state.anchor_date,
                describe_limits(&limits),
                anchor
            );
            self.state = PeriodState::new(anchor, self.state.granularity);
        }
        self
    }

    pub fn state(&self) -> &PeriodState {
        &self.state
    }

    pub fn limits(&self) -> &NavigationLimits {
        &self.limits
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Apply an action; on error the state is left as it was
    pub fn apply(&mut self, action: NavAction) -> Result<&PeriodState, NavigationError> {
        match transition(&self.state, action, &self.limits, self.week_start) {
            Ok(next) => {
                log::debug!(
                    "Navigated {:?}: {} {} -> {} {}",
                    action,
                    self.state.granularity,
                    self.state.anchor_date,
                    next.granularity,
                    next.anchor_date
                );
                self.state = next;
                Ok(&self.state)
            }
            Err(err) => {
                log::warn!("Navigation {:?} rejected: {}", action, err);
                Err(err)
            }
        }
    }

    pub fn next(&mut self) -> Result<&PeriodState, NavigationError> {
        self.apply(NavAction::Next)
    }

    pub fn previous(&mut self) -> Result<&PeriodState, NavigationError> {
        self.apply(NavAction::Previous)
    }

    pub fn go_to_today(&mut self) -> Result<&PeriodState, NavigationError> {
        let today = self.clock.today();
        self.apply(NavAction::Today(today))
    }

    pub fn go_to_date(&mut self, date: NaiveDate) -> Result<&PeriodState, NavigationError> {
        self.apply(NavAction::GoTo(date))
    }

    pub fn set_granularity(&mut self, granularity: Granularity) -> Result<&PeriodState, NavigationError> {
        self.apply(NavAction::SetGranularity(granularity))
    }

    /// Whether `next`/`previous` would currently succeed
    pub fn can_apply(&self, action: NavAction) -> bool {
        transition(&self.state, action, &self.limits, self.week_start).is_ok()
    }
}
